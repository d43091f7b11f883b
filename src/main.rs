//! Glossa CLI binary.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Builder, Env};
use log::{LevelFilter, error};

use glossa::cli::args::GlossaArgs;
use glossa::cli::commands::execute_command;
use glossa::error::GlossaError;

fn main() -> ExitCode {
    let args = GlossaArgs::parse();
    init_logging(args.verbosity());

    match execute_command(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            exit_code(&e)
        }
    }
}

/// Verbosity 0 (`-q`) logs errors only and 3 or more logs debug output.
/// `RUST_LOG` takes precedence.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format(|buf, record| writeln!(buf, "glossa [{}] {}", record.level(), record.args()))
        .init();
}

/// 2 for bad input files or arguments, 1 for everything else.
fn exit_code(error: &GlossaError) -> ExitCode {
    match error {
        GlossaError::Config(_) | GlossaError::InvalidArgument(_) | GlossaError::Json(_) => {
            ExitCode::from(2)
        }
        _ => ExitCode::FAILURE,
    }
}
