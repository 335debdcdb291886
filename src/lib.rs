//! regmach - Register-machine abstract interpreter
//!
//! This crate re-exports all layers of the regmach system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: regmach_runtime    - Program loading, CLI
//! Layer 3: regmach_stdlib     - Standard operation table
//! Layer 2: regmach_machine    - Assembler, registers, stack, execution loop
//! Layer 1: regmach_language   - Lexer, parser, program datum
//! Layer 0: regmach_foundation - Core types (Value, Error)
//! ```

pub use regmach_foundation as foundation;
pub use regmach_language as language;
pub use regmach_machine as machine;
pub use regmach_runtime as runtime;
pub use regmach_stdlib as stdlib;
