//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scopus query client
#[derive(Parser, Debug)]
#[command(name = "scopus-query")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key; repeat to rotate through several keys
    #[arg(short = 'k', long = "api-key", global = true)]
    pub api_keys: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Scopus search and print matching records
    Search {
        /// Search query, e.g. "TITLE(graphene) AND PUBYEAR > 2020"
        #[arg(short, long)]
        query: String,

        /// Extra query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Stop after this many records
        #[arg(long)]
        max_records: Option<usize>,

        /// Page with explicit start offsets instead of next links
        #[arg(long)]
        offset_paging: bool,

        /// Print the API key that fetched each record
        #[arg(long)]
        with_key: bool,
    },

    /// Look up serial (journal) metadata
    Serial {
        /// ISSN of the serial
        #[arg(long)]
        issn: Option<String>,

        /// Title search (ignored when --issn is given)
        #[arg(long)]
        title: Option<String>,

        /// Extra query parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `key=value` parameter
pub fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{s}': expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{s}': empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}
