//! og-query-runner - run queries against an opencomply instance and keep the results.
//!
//! [`run_query`] posts a query to the instance API, [`save_query_results`]
//! writes a result to `<path>.csv` (plus `<path>.query`), and
//! [`read_query_from_file`] loads it back. [`run_and_save_query`] chains the
//! first two.

pub mod client;
pub mod config;
pub mod error;
pub mod persistence;
pub mod result;
pub mod runner;

pub use client::{run_query, ClientConfig, QueryClient};
pub use error::{QueryRunnerError, Result};
pub use persistence::{read_query_from_file, save_query_results, save_query_results_json};
pub use result::{QueryResult, Row, Value};
pub use runner::run_and_save_query;
