use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Invalid API endpoint [{endpoint}]: {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: String
    },
    #[error("API error: status [{status}] with body [{body}]")]
    Api {
        status: u16,
        body: String
    },
    #[error("Decode error: response is not a fraud chain document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("I/O error reading [{}]: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    }
}
