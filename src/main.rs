//! Turfwar -- a text front end for the Night City territory board.
//!
//! This binary reads commands from stdin and writes responses to stdout, one
//! command per line. Diagnostics go to stderr through `env_logger`; set
//! `RUST_LOG=debug` to trace every command.

use std::io::{self, BufRead};
use std::process::ExitCode;

use turfwar::session::{Control, Session};

/// Runs the main protocol loop until `quit` or end of input.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut session = match Session::new() {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to build board: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin: {}", e);
                break;
            }
        };

        match session.handle_line(&line, &mut out) {
            Ok(Control::Continue) => {}
            Ok(Control::Quit) => break,
            Err(e) => {
                log::error!("stdout: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
