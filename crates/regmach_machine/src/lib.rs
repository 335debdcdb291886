//! Registers, control stack, assembler and execution loop for regmach.
//!
//! This crate provides:
//! - [`Assembler`] - Compiles a program datum into a [`CompiledProgram`]
//! - [`Machine`] - Owns the machine state and runs compiled programs
//! - [`OperationTable`] - Caller-supplied primitive operations
//! - [`Tracer`] - Optional record of what a run did
//!
//! # Example
//!
//! ```
//! use regmach_foundation::Value;
//! use regmach_machine::{Machine, OperationTable};
//!
//! let ops = OperationTable::new().with("+", |args| {
//!     Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
//! });
//! let mut machine = Machine::from_source(
//!     ["n", "a"],
//!     ops,
//!     "(main ((assign n ((op +) (reg a) (const 2)))))",
//! )?;
//! machine.set_register_value("a", 2)?;
//! machine.run()?;
//! assert_eq!(machine.get_register_value("n")?, Value::Int(4));
//! # Ok::<(), regmach_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assembler;
pub mod config;
pub mod instruction;
pub mod machine;
pub mod operation;
pub mod register;
pub mod stack;
pub mod trace;

pub use assembler::{Assembler, CompiledProgram, LabelTable, assemble, assemble_instruction};
pub use config::MachineConfig;
pub use instruction::{Expression, Instruction, OperationCall, Primitive, Target};
pub use machine::{Machine, RunStats};
pub use operation::{Operation, OperationTable};
pub use register::{Register, RegisterFile};
pub use stack::ControlStack;
pub use trace::{TraceBuffer, TraceEvent, TraceOutput, TraceRecord, Tracer, TracerConfig};
