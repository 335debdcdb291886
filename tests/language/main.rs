//! Integration tests for Layer 1: Language
//!
//! Tests for the lexer and the reader that produces program datums.

mod lexer;
mod parser;
