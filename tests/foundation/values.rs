//! Integration tests for Value types
//!
//! Tests Value variants, truthiness, equality, hashing, and display.

use regmach_foundation::{BlockRef, Value};
use std::collections::HashSet;

// =============================================================================
// Truthiness
// =============================================================================

#[test]
fn only_nil_and_false_are_falsy() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());

    for v in [
        Value::Bool(true),
        Value::Int(0),
        Value::Float(0.0),
        Value::from(""),
        Value::symbol("x"),
        Value::from(Vec::<Value>::new()),
    ] {
        assert!(v.is_truthy(), "{v:?}");
    }
}

// =============================================================================
// Equality and Hashing
// =============================================================================

#[test]
fn equality_is_structural_and_type_strict() {
    assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1, 2]));
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::from("a"), Value::symbol("a"));
}

#[test]
fn nan_equals_itself() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn values_work_as_set_members() {
    let mut set = HashSet::new();
    set.insert(Value::Int(1));
    set.insert(Value::Int(1));
    set.insert(Value::symbol("a"));
    set.insert(Value::from(vec![Value::Nil]));
    assert_eq!(set.len(), 3);
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn label_values() {
    let block = BlockRef::new("fact-done", 7..7);
    assert!(block.is_empty());
    assert_eq!(block.range(), 7..7);

    let v = Value::from(block.clone());
    assert_eq!(v.type_name(), "label");
    assert_eq!(v.as_label(), Some(&block));
    assert!(v.is_truthy());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::symbol("done").to_string(), "done");
    assert_eq!(
        Value::from(vec![Value::Int(1), Value::from(vec![2, 3])]).to_string(),
        "(1 (2 3))"
    );
    assert_eq!(
        Value::from(BlockRef::new("after-fact", 3..7)).to_string(),
        "<label after-fact>"
    );
}

#[test]
fn conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(5i32), Value::Int(5));
    assert_eq!(Value::from(String::from("s")).as_str(), Some("s"));
    assert_eq!(Value::Int(2).as_number(), Some(2.0));
    assert_eq!(Value::symbol("k").as_symbol(), Some("k"));
}
