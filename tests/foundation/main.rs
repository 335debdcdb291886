//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, BlockRef, Error, and persistent lists.

mod collections;
mod errors;
mod values;
