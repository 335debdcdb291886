//! Lexer and list reader for regmach controller programs.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of program text
//! - [`Parser`] - Reading tokens into the nested-list [`Ast`]
//! - [`parse`] - One-call text to program datum

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;


pub use ast::Ast;
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_one};
pub use span::Span;
pub use token::{Token, TokenKind};
