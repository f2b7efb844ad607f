//! Sidecar agent announcing a microservice through herald.
//!
//! The binary delegates to [`heraldd::run`] and turns its outcome into a
//! process exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use herald_config::ConfigError;
use heraldd::AgentError;

fn main() -> ExitCode {
    let Err(error) = heraldd::run() else {
        return ExitCode::SUCCESS;
    };

    let reported = match &error {
        // clap renders help, version, and usage errors itself.
        AgentError::Config {
            source: ConfigError::Parse(parse),
        } => parse.print(),
        _ => writeln!(io::stderr(), "heraldd: {error}"),
    };
    if reported.is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::from(error.exit_code())
}
