mod errors;
mod file_source;
mod http_source;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::future::Future;

use chrono::NaiveDate;

use crate::models::FraudChainResponse;
use crate::types::AccountNumber;

pub use errors::FetchError;
pub use file_source::FileChainSource;
pub use http_source::{HttpChainSource, DEFAULT_BASE_URL};

/// Date format the API expects for `transactionDate`.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// The two parameters identifying a fraud chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudQuery {
    pub account_number: AccountNumber,
    pub transaction_date: NaiveDate
}

impl FraudQuery {
    pub fn new(account_number: AccountNumber, transaction_date: NaiveDate) -> Self {
        Self { account_number, transaction_date }
    }
}

impl Display for FraudQuery {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}@{}", self.account_number, self.transaction_date.format(QUERY_DATE_FORMAT))
    }
}

/// Anything able to answer a fraud chain query.
///
/// Implementations make exactly one attempt per call. Retrying and caching are
/// left to the caller.
pub trait ChainSource: Send + Sync + 'static {
    fn fetch(&self, query: &FraudQuery) -> impl Future<Output = Result<FraudChainResponse, FetchError>> + Send;
}
