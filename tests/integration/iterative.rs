//! Loop-shaped controllers using the standard operations

use regmach_foundation::{ErrorKind, Value};
use regmach_machine::{Machine, OperationTable};
use regmach_runtime::parse_value;
use regmach_stdlib::{standard_operations, with_standard_operations};

const GCD: &str = "
    (test-b ((test ((op =) (reg b) (const 0)))
             (branch label gcd-done)
             (assign t ((op rem) (reg a) (reg b)))
             (assign a (reg b))
             (assign b (reg t))
             (goto label test-b)))
    (gcd-done)";

const REVERSE: &str = "
    (init ((assign acc (const ()))))
    (walk ((test ((op null?) (reg xs)))
           (branch label done)
           (assign head ((op car) (reg xs)))
           (assign acc ((op cons) (reg head) (reg acc)))
           (assign xs ((op cdr) (reg xs)))
           (goto label walk)))
    (done)";

#[test]
fn gcd_of_206_and_40() {
    let mut machine = Machine::from_source(["a", "b", "t"], standard_operations(), GCD).unwrap();
    machine.set_register_value("a", 206).unwrap();
    machine.set_register_value("b", 40).unwrap();
    machine.run().unwrap();
    assert_eq!(machine.get_register_value("a").unwrap(), Value::Int(2));
}

#[test]
fn same_machine_reruns_on_new_inputs() {
    let mut machine = Machine::from_source(["a", "b", "t"], standard_operations(), GCD).unwrap();
    for (a, b, expected) in [(206, 40, 2), (48, 18, 6), (17, 5, 1)] {
        machine.set_register_value("a", a).unwrap();
        machine.set_register_value("b", b).unwrap();
        machine.run().unwrap();
        assert_eq!(machine.get_register_value("a").unwrap(), Value::Int(expected));
    }
}

#[test]
fn reverse_a_list() {
    let mut machine =
        Machine::from_source(["xs", "head", "acc"], standard_operations(), REVERSE).unwrap();
    machine.set_register_value("xs", parse_value("(1 2 3)").unwrap()).unwrap();
    machine.run().unwrap();
    assert_eq!(
        machine.get_register_value("acc").unwrap(),
        parse_value("(3 2 1)").unwrap()
    );
    assert_eq!(machine.get_register_value("xs").unwrap(), parse_value("()").unwrap());
}

#[test]
fn caller_operations_extend_the_standard_table() {
    let extra = OperationTable::new().with("square", |args| {
        let n = args[0].as_int().unwrap_or(0);
        Ok(Value::Int(n * n))
    });
    let mut machine = Machine::from_source(
        ["x"],
        with_standard_operations(extra),
        "(main ((assign x ((op square) (const 7)))
                (assign x ((op +) (reg x) (const 1)))))",
    )
    .unwrap();
    machine.run().unwrap();
    assert_eq!(machine.get_register_value("x").unwrap(), Value::Int(50));
}

#[test]
fn operation_errors_carry_the_block() {
    let mut machine = Machine::from_source(
        ["x"],
        standard_operations(),
        "(setup ((assign x (const 1)))) (divide ((assign x ((op /) (reg x) (const 0)))))",
    )
    .unwrap();
    let err = machine.run().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivisionByZero));
    assert_eq!(err.context.unwrap().stack, vec!["label divide".to_string()]);
}
