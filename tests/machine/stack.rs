//! Integration tests for the control stack

use proptest::prelude::*;
use regmach_foundation::{ErrorKind, Value};
use regmach_machine::ControlStack;

#[test]
fn empty_pop_is_an_error() {
    let mut stack = ControlStack::new();
    assert!(stack.is_empty());
    assert!(matches!(stack.pop().unwrap_err().kind, ErrorKind::StackUnderflow));
}

#[test]
fn pop_after_drain_is_an_error() {
    let mut stack = ControlStack::new();
    stack.push(Value::Int(1));
    assert_eq!(stack.pop().unwrap(), Value::Int(1));
    assert!(stack.pop().is_err());
}

proptest! {
    #[test]
    fn pops_reverse_pushes(values in prop::collection::vec(any::<i64>(), 0..100)) {
        let mut stack = ControlStack::new();
        for v in &values {
            stack.push(Value::Int(*v));
        }
        prop_assert_eq!(stack.depth(), values.len());

        for v in values.iter().rev() {
            prop_assert_eq!(stack.pop().unwrap(), Value::Int(*v));
        }
        prop_assert!(stack.pop().is_err());
    }
}
