//! Integration tests for the reader

use regmach_foundation::{ErrorKind, Value};
use regmach_language::{Ast, parse, parse_one};

#[test]
fn reads_label_statements() {
    let program = parse(
        "(controller ((assign continue (label fact-done))))
         (fact-done)",
    )
    .unwrap();

    assert_eq!(program.len(), 2);
    let first = program[0].as_list().unwrap();
    assert_eq!(first[0].as_symbol(), Some("controller"));
    assert!(first[1].is_list());
    assert_eq!(program[1].as_list().unwrap().len(), 1);
}

#[test]
fn nodes_remember_positions() {
    let program = parse("(a)\n(b\n  ((save x)))").unwrap();
    let body = program[1].as_list().unwrap()[1].as_list().unwrap();
    let span = body[0].span();
    assert_eq!((span.line, span.column), (3, 4));
}

#[test]
fn quoted_values() {
    let ast = parse_one("(1 two \"three\" (4.0) nil)").unwrap();
    assert_eq!(
        ast.to_value(),
        Value::from(vec![
            Value::Int(1),
            Value::symbol("two"),
            Value::from("three"),
            Value::from(vec![Value::Float(4.0)]),
            Value::Nil,
        ])
    );
}

#[test]
fn display_round_trips_shape() {
    let source = "(main ((assign n ((op +) (reg n) (const 1)))))";
    assert_eq!(parse_one(source).unwrap().to_string(), source);
}

#[test]
fn synthetic_nodes() {
    let ast = Ast::list(vec![Ast::symbol("done")]);
    assert!(ast.span().is_synthetic());
    assert_eq!(ast.to_string(), "(done)");
}

#[test]
fn unbalanced_input_is_a_parse_error() {
    for source in ["(main", "main)", "(a (b)"] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::ParseError { .. }),
            "{source}: {err}"
        );
    }
}
