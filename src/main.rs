//! recordlens CLI entry point
//!
//! Parses arguments and delegates to `cli::run`. Failures have already been
//! written to stdout as an error response; the process exits non-zero.

use recordlens::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
