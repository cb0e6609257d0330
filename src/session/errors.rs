use thiserror::Error;

use crate::fetcher::FetchError;
use crate::models::MalformedTreeError;

const FETCH_FAILED_NOTICE: &str = "Failed to load the fraud chain, please try again";
const MALFORMED_TREE_NOTICE: &str = "The fraud chain for this query is inconsistent and cannot be shown";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    MalformedTree(#[from] MalformedTreeError)
}

impl QueryError {
    /// Message suitable for an end user. Details stay in the logs.
    pub fn user_notice(&self) -> &'static str {
        match self {
            Self::Fetch(_) => FETCH_FAILED_NOTICE,
            Self::MalformedTree(_) => MALFORMED_TREE_NOTICE
        }
    }
}
