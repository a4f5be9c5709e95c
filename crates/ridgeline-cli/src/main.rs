//! CLI entrypoint for the ridgeline call graph extractor.
//!
//! The binary delegates to [`ridgeline_cli::run`], which loads configuration,
//! scans the source tree, and writes the call graph as DOT.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    ridgeline_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
