//! Integration tests for error kinds, messages and context

use regmach_foundation::{Error, ErrorContext, ErrorKind, SemanticLimit};

#[test]
fn messages_name_the_offender() {
    assert_eq!(
        Error::unknown_register("val").to_string(),
        "unknown register: val"
    );
    assert_eq!(
        Error::undefined_label("fact-done").to_string(),
        "undefined label: fact-done"
    );
    assert_eq!(
        Error::type_mismatch("label", "int").to_string(),
        "type mismatch: expected label, got int"
    );
    assert_eq!(
        Error::limit_exceeded(SemanticLimit::MaxSteps { limit: 5 }).to_string(),
        "limit exceeded: max steps (5) exceeded"
    );
}

#[test]
fn stack_underflow_kind() {
    assert!(matches!(
        Error::stack_underflow().kind,
        ErrorKind::StackUnderflow
    ));
}

#[test]
fn frames_accumulate() {
    let err = Error::malformed_instruction("save expects (save REG)")
        .with_context(ErrorContext::new().with_position(3, 4))
        .with_frame("label main");
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(3));
    assert_eq!(context.column, Some(4));
    assert_eq!(context.stack, vec!["label main".to_string()]);
}

#[test]
fn frame_creates_context() {
    let err = Error::stack_underflow().with_frame("label after-fact");
    assert_eq!(err.context.unwrap().stack.len(), 1);
}
