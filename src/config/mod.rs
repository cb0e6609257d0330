
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::fetcher::{FraudQuery, DEFAULT_BASE_URL};
use crate::render::{CsvRenderer, JsonRenderer, TextRenderer, TreeRenderer};
use crate::types::AccountNumber;

/// Traces a fraud transaction chain and prints it as a tree.
///
/// The rendered chain goes to stdout, logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "fraud-chain-tracer", version, about)]
pub struct Cli {
    /// Debit account number to trace (at most 15 characters).
    #[arg(long)]
    pub account_number: AccountNumber,

    /// Transaction date to trace, as YYYY-MM-DD.
    #[arg(long)]
    pub transaction_date: NaiveDate,

    /// Base URL of the fraud-detection API.
    #[arg(long, env = "FRAUD_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Read a saved API response from this file instead of calling the API.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// One of: error, warn, info, debug, trace.
    #[arg(long, default_value = "error")]
    pub log_level: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Csv
}

impl Cli {
    pub fn query(&self) -> FraudQuery {
        FraudQuery::new(self.account_number.clone(), self.transaction_date)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn renderer(&self) -> Box<dyn TreeRenderer> {
        match self.format {
            OutputFormat::Json => Box::new(JsonRenderer::new(self.pretty)),
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Csv => Box::new(CsvRenderer)
        }
    }
}
