//! List construction and access.
//!
//! `nil` counts as the empty list wherever a list is expected.

use regmach_foundation::{Error, Result, Seq, Value};

fn list_arg(value: &Value) -> Result<Seq<Value>> {
    match value {
        Value::List(items) => Ok(items.clone()),
        Value::Nil => Ok(Seq::new()),
        other => Err(Error::type_mismatch("list", other.type_name())),
    }
}

/// `cons` - prepends an element.
pub(crate) fn op_cons(args: &[Value]) -> Result<Value> {
    match args {
        [head, tail] => Ok(Value::List(list_arg(tail)?.push_front(head.clone()))),
        _ => Err(Error::arity_mismatch("2", args.len())),
    }
}

/// `car` - first element, `nil` for the empty list.
pub(crate) fn op_car(args: &[Value]) -> Result<Value> {
    match args {
        [list] => Ok(list_arg(list)?.first().cloned().unwrap_or(Value::Nil)),
        _ => Err(Error::arity_mismatch("1", args.len())),
    }
}

/// `cdr` - everything after the first element, empty for the empty list.
pub(crate) fn op_cdr(args: &[Value]) -> Result<Value> {
    match args {
        [list] => Ok(Value::List(list_arg(list)?.rest().unwrap_or_default())),
        _ => Err(Error::arity_mismatch("1", args.len())),
    }
}

/// `list` - a list of the arguments.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn op_list(args: &[Value]) -> Result<Value> {
    Ok(Value::List(args.iter().cloned().collect()))
}
