//! Core values and error types for regmach.
//!
//! This crate provides:
//! - [`Value`] - The payload carried by registers and the control stack
//! - [`BlockRef`] - A label's compiled block, as a first-class value
//! - [`Seq`] - Persistent list storage behind [`Value::List`]
//! - [`Error`] - Categorized error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod value;

pub use collections::Seq;
pub use error::{Error, ErrorContext, ErrorKind, Result, SemanticLimit};
pub use value::{BlockRef, Value};
