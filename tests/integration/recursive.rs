//! Recursive procedures built from save/restore and label registers

use proptest::prelude::*;
use regmach_foundation::Value;
use regmach_machine::Machine;
use regmach_stdlib::standard_operations;

const FACTORIAL: &str = "
    (start ((assign continue (label fact-done))))
    (fact-loop ((test ((op =) (reg n) (const 1)))
                (branch label base-case)
                (save continue)
                (save n)
                (assign n ((op -) (reg n) (const 1)))
                (assign continue (label after-fact))
                (goto label fact-loop)))
    (after-fact ((restore n)
                 (restore continue)
                 (assign val ((op *) (reg n) (reg val)))
                 (goto reg continue)))
    (base-case ((assign val (const 1))
                (goto reg continue)))
    (fact-done)";

const FIBONACCI: &str = "
    (start ((assign continue (label fib-done))))
    (fib-loop ((test ((op <) (reg n) (const 2)))
               (branch label immediate-answer)
               (save continue)
               (assign continue (label afterfib-n-1))
               (save n)
               (assign n ((op -) (reg n) (const 1)))
               (goto label fib-loop)))
    (afterfib-n-1 ((restore n)
                   (restore continue)
                   (assign n ((op -) (reg n) (const 2)))
                   (save continue)
                   (assign continue (label afterfib-n-2))
                   (save val)
                   (goto label fib-loop)))
    (afterfib-n-2 ((assign n (reg val))
                   (restore val)
                   (restore continue)
                   (assign val ((op +) (reg val) (reg n)))
                   (goto reg continue)))
    (immediate-answer ((assign val (reg n))
                       (goto reg continue)))
    (fib-done)";

fn run(source: &str, n: i64) -> Machine {
    let mut machine =
        Machine::from_source(["n", "val", "continue"], standard_operations(), source).unwrap();
    machine.set_register_value("n", n).unwrap();
    machine.run().unwrap();
    machine
}

#[test]
fn factorial_of_five() {
    let machine = run(FACTORIAL, 5);
    assert_eq!(machine.get_register_value("val").unwrap(), Value::Int(120));
    assert!(machine.stack().is_empty());
}

#[test]
fn factorial_ends_at_the_done_label() {
    let machine = run(FACTORIAL, 3);
    let done = machine.program().labels().get("fact-done").unwrap();
    assert_eq!(machine.cursor(), done);
    assert_eq!(
        machine.get_register_value("continue").unwrap().as_label().map(|b| b.range()),
        Some(done)
    );
}

#[test]
fn fibonacci_of_ten() {
    let machine = run(FIBONACCI, 10);
    assert_eq!(machine.get_register_value("val").unwrap(), Value::Int(55));
    assert!(machine.stack().is_empty());
}

#[test]
fn fibonacci_base_cases() {
    assert_eq!(run(FIBONACCI, 0).get_register_value("val").unwrap(), Value::Int(0));
    assert_eq!(run(FIBONACCI, 1).get_register_value("val").unwrap(), Value::Int(1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn factorial_matches_product(n in 1i64..=20) {
        let machine = run(FACTORIAL, n);
        let expected: i64 = (1..=n).product();
        prop_assert_eq!(machine.get_register_value("val").unwrap(), Value::Int(expected));
    }

    #[test]
    fn fibonacci_matches_iteration(n in 0i64..=15) {
        let machine = run(FIBONACCI, n);
        let (mut a, mut b) = (0i64, 1i64);
        for _ in 0..n {
            (a, b) = (b, a + b);
        }
        prop_assert_eq!(machine.get_register_value("val").unwrap(), Value::Int(a));
    }
}
