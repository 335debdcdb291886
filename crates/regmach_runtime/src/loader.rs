//! Reading programs and values from text.

use std::fs;
use std::path::Path;

use regmach_foundation::{Error, ErrorKind, Result, Value};
use regmach_language::{Ast, parse};

/// Reads and parses a program file.
///
/// # Errors
/// Returns `IoError` if the file cannot be read, or a `ParseError` tagged
/// with the file name.
pub fn load_program(path: &Path) -> Result<Vec<Ast>> {
    let source = fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read {}: {e}",
            path.display()
        )))
    })?;

    parse(&source).map_err(|e| {
        let context = e
            .context
            .clone()
            .unwrap_or_default()
            .with_source(path.display().to_string());
        e.with_context(context)
    })
}

/// Reads one datum as a value, the way `const` operands are read.
///
/// # Errors
/// Returns a `ParseError` unless `text` is exactly one datum.
pub fn parse_value(text: &str) -> Result<Value> {
    match parse(text)?.as_slice() {
        [ast] => Ok(ast.to_value()),
        forms => Err(Error::new(ErrorKind::ParseError {
            message: format!("expected one value, found {}", forms.len()),
            line: 1,
            column: 1,
            context: text.to_string(),
        })),
    }
}
