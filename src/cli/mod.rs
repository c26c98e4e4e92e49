//! Command-line interface for innervoice.
//!
//! Parses flags and environment into configuration and starts the server.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli};
