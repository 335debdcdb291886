//! Standard operation table for regmach machines.
//!
//! Machines take their primitive operations from the caller. This crate
//! provides a ready-made table covering arithmetic, comparison, logic and
//! list manipulation, for the runtime and for tests.
//!
//! ```
//! use regmach_foundation::Value;
//! use regmach_stdlib::standard_operations;
//!
//! let ops = standard_operations();
//! let sum = ops.get("+")?.call(&[Value::Int(2), Value::Int(3)])?;
//! assert_eq!(sum, Value::Int(5));
//! # Ok::<(), regmach_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arithmetic;
mod list;
mod predicates;

use std::cmp::Ordering;

use regmach_foundation::{Result, Value};
use regmach_machine::{Operation, OperationTable};

use arithmetic::{chain, op_add, op_div, op_mul, op_rem, op_sub};
use list::{op_car, op_cdr, op_cons, op_list};
use predicates::{op_eq, op_eq_p, op_ne, op_not, op_null_p, op_number_p, op_pair_p, op_symbol_p};

/// Names of every operation in [`standard_operations`].
pub const OPERATION_NAMES: &[&str] = &[
    "+", "-", "*", "/", "rem", "=", "==", "!=", "<", "<=", ">", ">=", "not", "cons", "car", "cdr",
    "list", "null?", "pair?", "number?", "symbol?", "eq?",
];

/// Returns a table holding every standard operation.
#[must_use]
pub fn standard_operations() -> OperationTable {
    let mut table = OperationTable::new();
    register_arithmetic(&mut table);
    register_predicates(&mut table);
    register_lists(&mut table);
    table
}

/// Returns the standard table with `extra` layered on top.
///
/// Operations in `extra` replace standard ones of the same name.
#[must_use]
pub fn with_standard_operations(extra: OperationTable) -> OperationTable {
    let mut table = standard_operations();
    table.extend(extra);
    table
}

fn register<F>(table: &mut OperationTable, name: &str, func: F)
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
{
    table.insert(Operation::new(name, func));
}

fn register_arithmetic(table: &mut OperationTable) {
    register(table, "+", op_add);
    register(table, "-", op_sub);
    register(table, "*", op_mul);
    register(table, "/", op_div);
    register(table, "rem", op_rem);
    register(table, "<", chain(Ordering::is_lt));
    register(table, "<=", chain(Ordering::is_le));
    register(table, ">", chain(Ordering::is_gt));
    register(table, ">=", chain(Ordering::is_ge));
}

fn register_predicates(table: &mut OperationTable) {
    register(table, "=", op_eq);
    register(table, "==", op_eq);
    register(table, "!=", op_ne);
    register(table, "eq?", op_eq_p);
    register(table, "not", op_not);
    register(table, "null?", op_null_p);
    register(table, "pair?", op_pair_p);
    register(table, "number?", op_number_p);
    register(table, "symbol?", op_symbol_p);
}

fn register_lists(table: &mut OperationTable) {
    register(table, "cons", op_cons);
    register(table, "car", op_car);
    register(table, "cdr", op_cdr);
    register(table, "list", op_list);
}
