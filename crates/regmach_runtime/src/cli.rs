//! Command-line argument parsing.

use std::path::PathBuf;

use regmach_foundation::Value;
use regmach_machine::{MachineConfig, TracerConfig};
use thiserror::Error;

use crate::loader::parse_value;

/// Errors from the command line layer.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad arguments.
    #[error("{0}")]
    Usage(String),

    /// Loading, assembling or running the program failed.
    #[error(transparent)]
    Machine(#[from] regmach_foundation::Error),
}

impl CliError {
    fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

/// CLI configuration parsed from arguments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliConfig {
    /// Program file to run.
    pub file: Option<PathBuf>,
    /// Registers to allocate. Empty means every register the program,
    /// `--set` and `--print` mention.
    pub registers: Vec<String>,
    /// Initial register values, applied in order.
    pub seeds: Vec<(String, Value)>,
    /// Registers to print after the run. Empty means all of them.
    pub print: Vec<String>,
    /// Trace every executed instruction to stderr.
    pub trace: bool,
    /// Step limit for the run.
    pub max_steps: Option<u64>,
    /// `-h` / `--help` was given.
    pub show_help: bool,
    /// `-V` / `--version` was given.
    pub show_version: bool,
}

impl CliConfig {
    /// Parses arguments, not including the program name.
    ///
    /// # Errors
    /// Returns `CliError::Usage` for unknown options, missing option values,
    /// unparsable values, or more than one program file.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => config.show_help = true,
                "-V" | "--version" => config.show_version = true,
                "--trace" => config.trace = true,
                "-r" | "--register" => {
                    i += 1;
                    config.registers.push(option_value(&args, i, "--register")?.to_string());
                }
                "--set" => {
                    i += 1;
                    let assignment = option_value(&args, i, "--set")?;
                    let Some((name, text)) = assignment.split_once('=') else {
                        return Err(CliError::usage(format!(
                            "--set expects REG=VALUE, got {assignment}"
                        )));
                    };
                    if name.is_empty() {
                        return Err(CliError::usage("--set requires a register name"));
                    }
                    let value = parse_value(text).map_err(|e| {
                        CliError::usage(format!("invalid value for {name}: {e}"))
                    })?;
                    config.seeds.push((name.to_string(), value));
                }
                "--print" => {
                    i += 1;
                    config.print.push(option_value(&args, i, "--print")?.to_string());
                }
                "--max-steps" => {
                    i += 1;
                    let text = option_value(&args, i, "--max-steps")?;
                    config.max_steps = Some(
                        text.parse()
                            .map_err(|_| CliError::usage(format!("invalid --max-steps value: {text}")))?,
                    );
                }
                arg if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(CliError::usage(format!("unknown option: {arg}")));
                }
                path => {
                    if config.file.is_some() {
                        return Err(CliError::usage(format!("unexpected argument: {path}")));
                    }
                    config.file = Some(PathBuf::from(path));
                }
            }
            i += 1;
        }

        Ok(config)
    }

    /// The machine configuration these flags ask for.
    #[must_use]
    pub fn machine_config(&self) -> MachineConfig {
        let mut config = MachineConfig::new();
        if self.trace {
            config = config.with_trace(TracerConfig::new().enabled().to_stderr());
        }
        if let Some(limit) = self.max_steps {
            config = config.with_max_steps(limit);
        }
        config
    }
}

fn option_value<'a>(args: &'a [String], i: usize, option: &str) -> Result<&'a str, CliError> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| CliError::usage(format!("{option} requires a value")))
}

/// Usage text for `--help`.
#[must_use]
pub fn help_text() -> String {
    format!(
        "\x1b[1mregmach\x1b[0m {} - Register machine interpreter

\x1b[1mUSAGE:\x1b[0m
    regmach [OPTIONS] FILE

\x1b[1mARGUMENTS:\x1b[0m
    FILE    Controller program to assemble and run

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -r, --register REG     Allocate REG (repeatable; default: every register mentioned)
    --set REG=VALUE        Seed REG before running (repeatable)
    --print REG            Print REG after running (repeatable; default: all)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace                Trace each executed instruction to stderr
    --max-steps N          Fail if the run executes more than N instructions

\x1b[1mEXAMPLES:\x1b[0m
    regmach fact.rm --set n=5 --print val
    regmach gcd.rm --set a=206 --set b=40
    regmach --trace --max-steps 1000 loop.rm",
        env!("CARGO_PKG_VERSION")
    )
}
