//! Docsieve CLI library.
//!
//! Argument parsing, pipeline assembly from the environment, command
//! execution, and output formatting for the `docsieve` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod setup;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
