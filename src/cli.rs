//! Command-line argument parsing for ogq.
//!
//! Uses clap to parse global instance options and one subcommand.

use clap::{Parser, Subcommand};
use og_query_runner::config::InstanceConfig;
use std::path::PathBuf;

/// Run queries against an opencomply instance and save the results.
#[derive(Parser, Debug)]
#[command(name = "ogq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use named instance from config
    #[arg(short = 'i', long, value_name = "NAME", global = true)]
    pub instance: Option<String>,

    /// Instance base URL (e.g., https://og.example.com)
    #[arg(long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// API key used as the bearer token
    #[arg(long, value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run a query and print the result as JSON
    Run {
        /// Query text
        query: String,
    },

    /// Run a query and save it to <PATH>.csv and <PATH>.query
    RunAndSave {
        /// Query text
        query: String,
        /// Output path, without extension
        path: PathBuf,
    },

    /// Save a captured JSON query response to <PATH>.csv
    Save {
        /// JSON file holding `headers` and `result`
        input: PathBuf,
        /// Output path, without extension
        path: PathBuf,
        /// Query text to store in <PATH>.query
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,
    },

    /// Load <PATH>.csv (and <PATH>.query) and print it as JSON
    Read {
        /// Saved result path, without extension
        path: PathBuf,
    },
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts instance arguments to an InstanceConfig.
    ///
    /// Returns None when no instance argument was given on the command line.
    pub fn to_instance_config(&self) -> Option<InstanceConfig> {
        if self.url.is_none() && self.api_key.is_none() && self.timeout.is_none() {
            return None;
        }

        Some(InstanceConfig {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout,
        })
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(og_query_runner::config::Config::default_path)
    }

    /// Returns the named instance to use, if specified.
    pub fn instance_name(&self) -> Option<&str> {
        self.instance.as_deref()
    }
}
