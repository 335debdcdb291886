//! regmach CLI entry point.

use regmach_runtime::{CliConfig, CliError, execute, help_text};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            if let CliError::Machine(inner) = &e {
                if let Some(context) = &inner.context {
                    eprintln!("  {context}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = CliConfig::parse(env::args().skip(1))?;

    if config.show_help {
        println!("{}", help_text());
        return Ok(());
    }

    if config.show_version {
        println!("regmach {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.trace || config.max_steps.is_some() {
        eprintln!("\x1b[33mDebug flags enabled:\x1b[0m");
        if config.trace {
            eprintln!("  - Instruction tracing (--trace)");
        }
        if let Some(max) = config.max_steps {
            eprintln!("  - Max steps: {max}");
        }
        eprintln!();
    }

    let report = execute(&config)?;
    print!("{report}");
    Ok(())
}
