//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::engine::{Next, QueryEngine};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, RateLimiterConfig};
use crate::query::QueryConfiguration;
use crate::types::{LogLevel, QueryParameters};
use serde_json::{json, Value};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: ClientConfig,
}

impl Runner {
    /// Create a new runner, loading the config file named by `--config`
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { cli, config })
    }

    /// Log level for this invocation; `--verbose` overrides the config file
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            self.config.log_level
        }
    }

    /// Run the CLI command, printing records to stdout
    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.run_with_writer(&mut stdout).await?;
        Ok(())
    }

    /// Run the CLI command, writing records to `out`; returns the record count
    pub async fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<usize> {
        let config = &self.config;
        config.validate()?;
        debug!("Loaded config: {config:?}");

        match &self.cli.command {
            Commands::Search {
                query,
                params,
                max_records,
                offset_paging,
                with_key,
            } => {
                let mut parameters = to_parameters(params);
                parameters.insert("query".to_string(), query.clone());

                let configuration = if *offset_paging {
                    QueryConfiguration::scopus_offset_search()
                } else {
                    QueryConfiguration::scopus_search()
                };

                let mut engine = Self::build_engine(
                    config,
                    configuration,
                    RateLimiterConfig::scopus_search(),
                    parameters,
                )?
                .with_pair_with_key(*with_key || config.pair_with_key);

                self.drain(&mut engine, *max_records, out).await
            }
            Commands::Serial {
                issn,
                title,
                params,
            } => {
                let mut parameters = to_parameters(params);
                if let Some(issn) = issn {
                    parameters.insert("issn".to_string(), issn.clone());
                }
                if let Some(title) = title {
                    parameters.insert("title".to_string(), title.clone());
                }
                if !parameters.contains_key("issn") && !parameters.contains_key("title") {
                    return Err(Error::config("Serial lookup needs --issn or --title"));
                }

                let mut engine = Self::build_engine(
                    config,
                    QueryConfiguration::serial_title(),
                    RateLimiterConfig::serial_title(),
                    parameters,
                )?
                .with_pair_with_key(config.pair_with_key);

                self.drain(&mut engine, None, out).await
            }
        }
    }

    /// Merge file, environment and flags; flags take precedence
    fn load_config(cli: &Cli) -> Result<ClientConfig> {
        let mut config = match &cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if !cli.api_keys.is_empty() {
            config.api_keys.clone_from(&cli.api_keys);
        }
        if let Some(timeout) = cli.timeout {
            config.timeout_secs = timeout;
        }

        Ok(config.with_env())
    }

    fn build_engine(
        config: &ClientConfig,
        configuration: QueryConfiguration,
        default_rate: RateLimiterConfig,
        parameters: QueryParameters,
    ) -> Result<QueryEngine<HttpTransport>> {
        let transport = HttpTransport::with_config(config.transport_config(default_rate))?;

        let configuration = match &config.base_url {
            Some(root) => configuration.with_api_root(root),
            None => configuration,
        };

        Ok(
            QueryEngine::new(transport, configuration, config.credentials(), parameters)?
                .with_timeout(config.timeout()),
        )
    }

    /// Pull records until the end of the sequence or `max_records`
    async fn drain<W: Write>(
        &self,
        engine: &mut QueryEngine<HttpTransport>,
        max_records: Option<usize>,
        out: &mut W,
    ) -> Result<usize> {
        let started = Instant::now();
        let mut written = 0;

        while max_records.map_or(true, |max| written < max) {
            let value = match engine.next().await? {
                Next::End => break,
                Next::Record(record) => record,
                Next::Paired { record, api_key } => json!({
                    "api_key": api_key,
                    "record": record,
                }),
            };
            self.output_message(out, &value)?;
            written += 1;
        }
        out.flush()?;

        let stats = engine.stats();
        info!(
            "Wrote {} records from {} pages in {:.2}s ({} requests, {} key rotations)",
            written,
            stats.pages_fetched,
            started.elapsed().as_secs_f64(),
            stats.requests,
            stats.rotations
        );
        Ok(written)
    }

    /// Output a record in the selected format
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}

fn to_parameters(pairs: &[(String, String)]) -> QueryParameters {
    pairs.iter().cloned().collect()
}
