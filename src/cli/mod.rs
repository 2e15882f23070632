//! CLI module
//!
//! Command-line interface over the query engine.
//!
//! # Commands
//!
//! - `search` - Run a Scopus search, printing records as JSON lines
//! - `serial` - Look up serial title metadata by ISSN or title

mod commands;
mod runner;

pub use commands::{parse_param, Cli, Commands, OutputFormat};
pub use runner::Runner;
