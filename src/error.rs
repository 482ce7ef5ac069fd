//! Error types for og-query-runner.
//!
//! Defines the error enum shared by the query client, the result files and the CLI.

use thiserror::Error;

/// Main error type for query runner operations.
#[derive(Error, Debug)]
pub enum QueryRunnerError {
    /// A required input is empty or has the wrong shape. Raised before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport, HTTP status or response decoding failures while running a query.
    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    /// Failures writing the `.csv` or `.query` files.
    #[error("Failed to save query results: {0}")]
    Persistence(String),

    /// Failures reading the `.csv` or `.query` files.
    #[error("Failed to load query results: {0}")]
    Load(String),

    /// Configuration errors (invalid config file, missing instance settings, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueryRunnerError {
    /// Creates an invalid argument error with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a query execution error with the given message.
    pub fn query_execution(msg: impl Into<String>) -> Self {
        Self::QueryExecution(msg.into())
    }

    /// Creates a persistence error with the given message.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Creates a load error with the given message.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "Invalid Argument",
            Self::QueryExecution(_) => "Query Execution Error",
            Self::Persistence(_) => "Persistence Error",
            Self::Load(_) => "Load Error",
            Self::Config(_) => "Configuration Error",
        }
    }

    /// Returns the message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(msg)
            | Self::QueryExecution(msg)
            | Self::Persistence(msg)
            | Self::Load(msg)
            | Self::Config(msg) => msg,
        }
    }
}

/// Result type alias using QueryRunnerError.
pub type Result<T> = std::result::Result<T, QueryRunnerError>;
