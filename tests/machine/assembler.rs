//! Integration tests for the assembler

use regmach_foundation::{ErrorKind, Value};
use regmach_language::{Ast, parse};
use regmach_machine::{Expression, Instruction, Primitive, Target, assemble};

#[test]
fn label_table_holds_disjoint_blocks() {
    let program = assemble(
        &parse(
            "(a ((save x) (save y)))
             (b ((restore y)))
             (halt)",
        )
        .unwrap(),
    )
    .unwrap();

    assert_eq!(program.code().len(), 3);
    assert_eq!(program.labels().get("a").unwrap(), 0..2);
    assert_eq!(program.labels().get("b").unwrap(), 2..3);
    assert_eq!(program.labels().get("halt").unwrap(), 3..3);
    assert_eq!(program.block("b").unwrap(), &[Instruction::Restore("y".into())]);
}

#[test]
fn programs_built_in_code() {
    let program = vec![
        Ast::list(vec![
            Ast::symbol("main"),
            Ast::list(vec![
                Ast::list(vec![
                    Ast::symbol("assign"),
                    Ast::symbol("n"),
                    Ast::list(vec![Ast::symbol("const"), Ast::int(1)]),
                ]),
                Ast::list(vec![
                    Ast::symbol("goto"),
                    Ast::symbol("label"),
                    Ast::symbol("done"),
                ]),
            ]),
        ]),
        Ast::list(vec![Ast::symbol("done")]),
    ];

    let compiled = assemble(&program).unwrap();
    assert_eq!(
        compiled.code(),
        vec![
            Instruction::Assign {
                register: "n".into(),
                expression: Expression::Primitive(Primitive::Const(Value::Int(1))),
            },
            Instruction::Goto(Target::Label("done".into())),
        ]
    );
}

#[test]
fn unknown_tag_fails_before_running() {
    let err = assemble(&parse("(ok ((save n))) (bad ((push n)))").unwrap()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownInstruction(ref t) if t == "push"));
    assert_eq!(err.context.unwrap().stack, vec!["label bad".to_string()]);
}

#[test]
fn instructions_display_as_source() {
    let source = "(main ((test ((op <) (reg n) (const 2))) (branch label base) (goto reg continue)))";
    let compiled = assemble(&parse(source).unwrap()).unwrap();
    let text: Vec<String> = compiled.code().iter().map(ToString::to_string).collect();
    assert_eq!(
        text,
        vec![
            "(test ((op <) (reg n) (const 2)))",
            "(branch label base)",
            "(goto reg continue)",
        ]
    );
}
