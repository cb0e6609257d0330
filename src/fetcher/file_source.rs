use std::path::{Path, PathBuf};

use tracing::info;

use crate::fetcher::{ChainSource, FetchError, FraudQuery};
use crate::models::FraudChainResponse;

/// Replays a previously saved API response from disk.
pub struct FileChainSource {
    path: PathBuf
}

impl FileChainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChainSource for FileChainSource {
    async fn fetch(&self, query: &FraudQuery) -> Result<FraudChainResponse, FetchError> {
        info!("Reading saved fraud chain for [{query}] from [{}]", self.path.display());

        let contents = tokio::fs::read(&self.path).await.map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source
        })?;

        Ok(serde_json::from_slice(&contents)?)
    }
}
