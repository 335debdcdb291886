//! Integration tests for Layer 2: Machine
//!
//! Tests for the assembler, the control stack, and the execution model.

mod assembler;
mod control;
mod stack;
