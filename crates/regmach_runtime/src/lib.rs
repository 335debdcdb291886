//! Program loading and CLI for regmach.
//!
//! This crate provides:
//! - [`CliConfig`] - Command-line argument parsing
//! - [`load_program`] - Reading controller programs from files
//! - [`execute`] - Build a machine with the standard operations, seed it,
//!   run it and collect register values

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cli;
mod loader;

pub use cli::{CliConfig, CliError, help_text};
pub use loader::{load_program, parse_value};

use std::collections::BTreeSet;
use std::fmt;

use regmach_foundation::{Result, Value};
use regmach_language::Ast;
use regmach_machine::{Machine, RunStats, assemble};
use regmach_stdlib::standard_operations;

/// Register values collected after a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// `(register, value)` pairs in output order.
    pub values: Vec<(String, Value)>,
    /// Statistics for the run.
    pub stats: RunStats,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.values {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Assembles `program` and builds a seeded machine for it.
///
/// # Errors
/// Returns any assembler error, `DuplicateRegister` for a repeated `-r`, or
/// `UnknownRegister` when seeding a register that was not allocated.
pub fn build_machine(config: &CliConfig, program: &[Ast]) -> Result<Machine> {
    let compiled = assemble(program)?;

    let registers: Vec<String> = if config.registers.is_empty() {
        let mut names: BTreeSet<String> = compiled
            .register_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        names.extend(config.seeds.iter().map(|(name, _)| name.clone()));
        names.extend(config.print.iter().cloned());
        names.into_iter().collect()
    } else {
        config.registers.clone()
    };

    let mut machine = Machine::from_compiled(
        registers,
        standard_operations(),
        compiled,
        config.machine_config(),
    )?;
    for (name, value) in &config.seeds {
        machine.set_register_value(name, value.clone())?;
    }
    Ok(machine)
}

/// Loads, runs and reports on the program named in `config`.
///
/// # Errors
/// Returns `CliError::Usage` if no file was given, otherwise any error from
/// loading, assembling or running the program.
pub fn execute(config: &CliConfig) -> std::result::Result<Report, CliError> {
    let Some(path) = &config.file else {
        return Err(CliError::Usage("no program file given (try --help)".into()));
    };

    let program = load_program(path)?;
    let mut machine = build_machine(config, &program)?;
    let stats = machine.run()?;

    let names: Vec<String> = if config.print.is_empty() {
        machine
            .register_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        config.print.clone()
    };
    let values = names
        .into_iter()
        .map(|name| machine.get_register_value(&name).map(|value| (name, value)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Report { values, stats })
}
