//! Sanoma CLI library.
//!
//! Command-line front end for the sanoma engine: argument parsing,
//! configuration, dataset I/O and output formatting. All analysis lives in
//! `sanoma-engine`; this crate only moves data in and out.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
