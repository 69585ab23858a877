mod commands;

use crate::commands::Daylog;
use clap::Parser;
use std::process::ExitCode;
use yansi::{Condition, Paint};

/// Bad options get the same exit code clap uses for usage errors.
const EXIT_CONFIG: u8 = 2;
const EXIT_FAILURE: u8 = 1;

fn exit_code(err: &eyre::Report) -> u8 {
    let config_error = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<daylog::Error>())
        .any(daylog::Error::is_config);

    if config_error {
        EXIT_CONFIG
    } else {
        EXIT_FAILURE
    }
}

fn report(err: &eyre::Report) -> String {
    let mut message = format!("Error: {}", err);

    let root = err.root_cause().to_string();
    if root != err.to_string() {
        message.push_str(&format!("\n\nCaused by:\n  {}", root));
    }

    message
}

fn main() -> ExitCode {
    let daylog = Daylog::parse();

    match daylog.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report(&err).red().whenever(Condition::STDERR_IS_TTY));
            ExitCode::from(exit_code(&err))
        }
    }
}
