//! Arithmetic and numeric comparison operations.
//!
//! Integer results stay integers unless a float is involved or the exact
//! result does not fit in an `i64`.

#![allow(clippy::cast_precision_loss)]

use std::cmp::Ordering;

use regmach_foundation::{Error, ErrorKind, Result, Value};

fn number_mismatch(value: &Value) -> Error {
    Error::type_mismatch("number", value.type_name())
}

/// A binary operator over both number representations.
///
/// Two ints use `int`. If that overflows, or either side is a float, the
/// operands are widened and `float` is used instead.
struct Arith {
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
    /// Reject a zero right operand with `DivisionByZero`.
    zero_divisor: bool,
}

const ADD: Arith = Arith {
    int: i64::checked_add,
    float: |x, y| x + y,
    zero_divisor: false,
};

const SUB: Arith = Arith {
    int: i64::checked_sub,
    float: |x, y| x - y,
    zero_divisor: false,
};

const MUL: Arith = Arith {
    int: i64::checked_mul,
    float: |x, y| x * y,
    zero_divisor: false,
};

/// Int division truncates toward zero.
const DIV: Arith = Arith {
    int: i64::checked_div,
    float: |x, y| x / y,
    zero_divisor: true,
};

const REM: Arith = Arith {
    int: i64::checked_rem,
    float: |x, y| x % y,
    zero_divisor: true,
};

impl Arith {
    fn apply(&self, a: &Value, b: &Value) -> Result<Value> {
        let x = a.as_number().ok_or_else(|| number_mismatch(a))?;
        let y = b.as_number().ok_or_else(|| number_mismatch(b))?;
        if self.zero_divisor && y == 0.0 {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        if let (Value::Int(m), Value::Int(n)) = (a, b) {
            if let Some(result) = (self.int)(*m, *n) {
                return Ok(Value::Int(result));
            }
        }
        Ok(Value::Float((self.float)(x, y)))
    }

    /// Left fold over `args`. A variadic fold starts from `unit`. Otherwise
    /// the first argument is the seed, and a lone argument `v` means
    /// `unit OP v`.
    fn fold(&self, args: &[Value], unit: i64, variadic: bool) -> Result<Value> {
        let (seed, rest) = match args {
            [] if !variadic => return Err(Error::arity_mismatch("at least 1", 0)),
            [first, rest @ ..] if !variadic && !rest.is_empty() => (first.clone(), rest),
            _ => (Value::Int(unit), args),
        };
        rest.iter().try_fold(seed, |acc, v| self.apply(&acc, v))
    }
}

/// Orders two numbers. Ints compare exactly and `NaN` counts as equal.
pub(crate) fn compare_numbers(a: &Value, b: &Value) -> Result<Ordering> {
    if let (Value::Int(x), Value::Int(y)) = (a, b) {
        return Ok(x.cmp(y));
    }
    let x = a.as_number().ok_or_else(|| number_mismatch(a))?;
    let y = b.as_number().ok_or_else(|| number_mismatch(b))?;
    Ok(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
}

/// `+`: sum of all arguments, 0 for none.
pub(crate) fn op_add(args: &[Value]) -> Result<Value> {
    ADD.fold(args, 0, true)
}

/// `*`: product of all arguments, 1 for none.
pub(crate) fn op_mul(args: &[Value]) -> Result<Value> {
    MUL.fold(args, 1, true)
}

/// `-`: negates a single argument, otherwise subtracts left to right.
pub(crate) fn op_sub(args: &[Value]) -> Result<Value> {
    SUB.fold(args, 0, false)
}

/// `/`: reciprocal of a single argument, otherwise divides left to right.
pub(crate) fn op_div(args: &[Value]) -> Result<Value> {
    DIV.fold(args, 1, false)
}

/// `rem`: remainder taking the sign of the dividend.
pub(crate) fn op_rem(args: &[Value]) -> Result<Value> {
    match args {
        [a, b] => REM.apply(a, b),
        _ => Err(Error::arity_mismatch("2", args.len())),
    }
}

/// Builds a chained comparison such as `<` that holds when every adjacent
/// pair satisfies `pred`.
pub(crate) fn chain(pred: fn(Ordering) -> bool) -> impl Fn(&[Value]) -> Result<Value> {
    move |args| {
        if args.len() < 2 {
            return Err(Error::arity_mismatch("at least 2", args.len()));
        }
        for pair in args.windows(2) {
            if !pred(compare_numbers(&pair[0], &pair[1])?) {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    }
}
