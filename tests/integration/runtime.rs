//! Running program files the way the command line does

use std::fs;
use std::path::{Path, PathBuf};

use regmach_foundation::{ErrorKind, SemanticLimit, Value};
use regmach_runtime::{CliConfig, CliError, execute, load_program};

fn write_program(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("regmach_integration_{name}.rm"));
    fs::write(&path, source).unwrap();
    path
}

fn config(path: &Path, rest: &[&str]) -> CliConfig {
    let mut args = vec![path.display().to_string()];
    args.extend(rest.iter().map(ToString::to_string));
    CliConfig::parse(args).unwrap()
}

const COUNTDOWN: &str = "
    ; count n down to zero, summing as we go
    (loop ((test ((op =) (reg n) (const 0)))
           (branch label done)
           (assign total ((op +) (reg total) (reg n)))
           (assign n ((op -) (reg n) (const 1)))
           (goto label loop)))
    (done)";

#[test]
fn runs_a_file_and_reports_printed_registers() {
    let path = write_program("countdown", COUNTDOWN);
    let report = execute(&config(
        &path,
        &["--set", "n=4", "--set", "total=0", "--print", "total"],
    ))
    .unwrap();

    assert_eq!(report.values, vec![("total".to_string(), Value::Int(10))]);
    assert_eq!(report.to_string(), "total = 10\n");
    fs::remove_file(path).ok();
}

#[test]
fn reports_every_register_without_print() {
    let path = write_program("all_registers", COUNTDOWN);
    let report = execute(&config(&path, &["--set", "n=2", "--set", "total=0"])).unwrap();

    let names: Vec<&str> = report.values.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["n", "total"]);
    assert_eq!(report.values[0].1, Value::Int(0));
    fs::remove_file(path).ok();
}

#[test]
fn step_limit_stops_a_runaway_program() {
    let path = write_program("forever", "(spin ((goto label spin)))");
    let err = execute(&config(&path, &["--max-steps", "25"])).unwrap_err();

    let CliError::Machine(err) = err else {
        panic!("expected a machine error, got {err:?}");
    };
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::MaxSteps { limit: 25 })
    ));
    fs::remove_file(path).ok();
}

#[test]
fn explicit_registers_reject_strays() {
    let path = write_program("stray", "(main ((assign y (const 1))))");
    let err = execute(&config(&path, &["-r", "x"])).unwrap_err();

    let CliError::Machine(err) = err else {
        panic!("expected a machine error, got {err:?}");
    };
    assert!(matches!(err.kind, ErrorKind::UnknownRegister(ref r) if r == "y"));
    fs::remove_file(path).ok();
}

#[test]
fn malformed_file_fails_to_assemble() {
    let path = write_program("malformed", "(main ((assign x)))");
    let err = execute(&config(&path, &[])).unwrap_err();
    assert!(matches!(
        err,
        CliError::Machine(ref e) if matches!(e.kind, ErrorKind::MalformedInstruction(_))
    ));
    fs::remove_file(path).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("regmach_integration_does_not_exist.rm");
    let err = load_program(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
}

#[test]
fn no_file_is_a_usage_error() {
    let config = CliConfig::parse(["--trace"]).unwrap();
    assert!(matches!(execute(&config), Err(CliError::Usage(_))));
}
