//! ogq - run queries against an opencomply instance and keep the results.

mod cli;
mod logging;

use cli::{Cli, Command};
use og_query_runner::config::{Config, InstanceConfig};
use og_query_runner::error::{QueryRunnerError, Result};
use og_query_runner::{persistence, QueryClient, QueryResult};
use tracing::{debug, error, info};

fn main() {
    // Pick up OG_* variables from a local .env file
    dotenvy::dotenv().ok();

    logging::init_stderr_logging();

    if let Err(e) = run() {
        error!("{}: {}", e.category(), e.message());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    match &cli.command {
        Command::Run { query } => {
            let client = build_client(&cli)?;
            let result = client.run_query(query)?;
            print_json(&result, QueryRunnerError::QueryExecution)
        }
        Command::RunAndSave { query, path } => {
            let client = build_client(&cli)?;
            client.run_and_save(query, path)?;
            info!("Query results saved to {}", persistence::csv_path(path).display());
            Ok(())
        }
        Command::Save { input, path, query } => {
            let content = std::fs::read_to_string(input).map_err(|e| {
                QueryRunnerError::invalid_argument(format!("{}: {e}", input.display()))
            })?;
            let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
                QueryRunnerError::invalid_argument(format!("{}: {e}", input.display()))
            })?;
            persistence::save_query_results_json(value, path, query.as_deref())?;
            info!("Query results saved to {}", persistence::csv_path(path).display());
            Ok(())
        }
        Command::Read { path } => {
            let result = persistence::read_query_from_file(path)?;
            print_json(&result, QueryRunnerError::Load)
        }
    }
}

/// Builds a query client from CLI arguments, config file, and environment.
fn build_client(cli: &Cli) -> Result<QueryClient> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let instance = resolve_instance(cli, &config)?;
    info!("Instance: {}", instance.display_string());

    QueryClient::new(instance.to_client_config()?)
}

/// Resolves the final instance configuration.
///
/// Precedence:
/// 1. CLI arguments (highest)
/// 2. Named instance from config, or the default instance
/// 3. Environment variables
fn resolve_instance(cli: &Cli, config: &Config) -> Result<InstanceConfig> {
    let mut instance = match cli.instance_name() {
        Some(name) => config.get_instance(Some(name)).cloned().ok_or_else(|| {
            QueryRunnerError::config(format!("Instance '{name}' not found in config file"))
        })?,
        None => config.get_instance(None).cloned().unwrap_or_default(),
    };

    if let Some(overrides) = cli.to_instance_config() {
        debug!("Applying instance overrides from command line");
        instance.merge(&overrides);
    }

    instance.apply_env_defaults();

    Ok(instance)
}

/// Prints a result as pretty JSON, reporting failures as the command's own error kind.
fn print_json(result: &QueryResult, to_err: fn(String) -> QueryRunnerError) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| to_err(format!("Failed to format result: {e}")))?;
    println!("{json}");
    Ok(())
}
