//! Equality, logic and type predicates.

use regmach_foundation::{Error, Result, Value};

fn unary(args: &[Value]) -> Result<&Value> {
    match args {
        [value] => Ok(value),
        _ => Err(Error::arity_mismatch("1", args.len())),
    }
}

// =============================================================================
// Equality
// =============================================================================

/// `=` / `==` - true when every argument is structurally equal to the first.
pub(crate) fn op_eq(args: &[Value]) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::arity_mismatch("at least 2", args.len()));
    }
    Ok(Value::Bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

/// `!=`
pub(crate) fn op_ne(args: &[Value]) -> Result<Value> {
    match args {
        [a, b] => Ok(Value::Bool(a != b)),
        _ => Err(Error::arity_mismatch("2", args.len())),
    }
}

/// `eq?` - atoms compare by value, lists by contents.
pub(crate) fn op_eq_p(args: &[Value]) -> Result<Value> {
    match args {
        [a, b] => Ok(Value::Bool(a == b)),
        _ => Err(Error::arity_mismatch("2", args.len())),
    }
}

// =============================================================================
// Logic
// =============================================================================

/// `not` - true for `nil` and `false`.
pub(crate) fn op_not(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(!unary(args)?.is_truthy()))
}

// =============================================================================
// Type Predicates
// =============================================================================

/// `null?` - the empty list or `nil`.
pub(crate) fn op_null_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(match unary(args)? {
        Value::Nil => true,
        Value::List(items) => items.is_empty(),
        _ => false,
    }))
}

/// `pair?` - a non-empty list.
pub(crate) fn op_pair_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(
        matches!(unary(args)?, Value::List(items) if !items.is_empty()),
    ))
}

/// `number?`
pub(crate) fn op_number_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(
        unary(args)?,
        Value::Int(_) | Value::Float(_)
    )))
}

/// `symbol?`
pub(crate) fn op_symbol_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(unary(args)?, Value::Symbol(_))))
}
