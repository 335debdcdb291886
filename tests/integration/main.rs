//! Cross-layer integration tests for regmach
//!
//! Tests that run complete controller programs through the assembler, the
//! machine, the standard operations and the runtime together.

mod iterative;
mod recursive;
mod runtime;
