//! Integration tests for control transfer
//!
//! Each block owns its own range of instructions. Only the entry run covers
//! the whole program; every jump confines execution to the target block.

use regmach_foundation::{ErrorKind, Value};
use regmach_machine::{Machine, OperationTable};

fn ops() -> OperationTable {
    OperationTable::new()
        .with("+", |args| {
            Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
        })
        .with("==", |args| Ok(Value::Bool(args[0] == args[1])))
}

fn run(registers: &[&str], source: &str) -> Machine {
    let mut machine = Machine::from_source(registers.iter().copied(), ops(), source).unwrap();
    machine.run().unwrap();
    machine
}

#[test]
fn jump_target_block_does_not_fall_through() {
    let machine = run(
        &["trail"],
        "(start ((assign trail (const ())) (goto label one)))
         (one ((assign trail (const one))))
         (two ((assign trail (const two))))
         (three ((assign trail (const three))))",
    );
    assert_eq!(machine.get_register_value("trail").unwrap(), Value::symbol("one"));
}

#[test]
fn jumping_to_an_empty_block_halts() {
    let machine = run(
        &["x"],
        "(start ((goto label done) (assign x (const 1))))
         (done)
         (after ((assign x (const 2))))",
    );
    assert_eq!(machine.get_register_value("x").unwrap(), Value::Nil);
}

#[test]
fn label_values_survive_across_runs() {
    let mut machine = Machine::from_source(
        ["k", "hits"],
        ops(),
        "(entry ((test ((op ==) (reg k) (const nil)))
                 (branch label first-time)
                 (goto reg k)))
         (first-time ((assign k (label counted)) (goto label counted)))
         (counted ((assign hits ((op +) (reg hits) (const 1)))))",
    )
    .unwrap();
    machine.set_register_value("hits", 0).unwrap();

    // First run stores the label before counting.
    let stats = machine.run().unwrap();
    assert_eq!(stats.steps, 5);
    assert_eq!(machine.get_register_value("hits").unwrap(), Value::Int(1));

    // Second run jumps through the stored label straight to `counted`.
    let stats = machine.run().unwrap();
    assert_eq!(machine.get_register_value("hits").unwrap(), Value::Int(2));
    assert_eq!(stats.steps, 4);
}

#[test]
fn failed_run_keeps_partial_state() {
    let mut machine = Machine::from_source(
        ["a"],
        ops(),
        "(main ((assign a (const 1)) (restore a) (assign a (const 3))))",
    )
    .unwrap();

    let err = machine.run().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StackUnderflow));
    assert_eq!(machine.get_register_value("a").unwrap(), Value::Int(1));
    assert_eq!(machine.cursor(), 2..3);
}

#[test]
fn operations_see_label_arguments() {
    let ops = OperationTable::new().with("label-name", |args| {
        Ok(args[0]
            .as_label()
            .map_or(Value::Nil, |b| Value::symbol(&*b.label)))
    });
    let mut machine = Machine::from_source(
        ["x"],
        ops,
        "(main ((assign x ((op label-name) (label somewhere))))) (somewhere)",
    )
    .unwrap();
    machine.run().unwrap();
    assert_eq!(machine.get_register_value("x").unwrap(), Value::symbol("somewhere"));
}
