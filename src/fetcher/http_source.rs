use std::time::Duration;

use tracing::{debug, info};

use crate::fetcher::{ChainSource, FetchError, FraudQuery, QUERY_DATE_FORMAT};
use crate::models::FraudChainResponse;

pub const DEFAULT_BASE_URL: &str = "https://fdsapiakrobat.xyz";

const FRAUD_CHAIN_PATH: &str = "v1.0/fraudds";

/// Queries the fraud-detection API over HTTP.
pub struct HttpChainSource {
    client: reqwest::Client,
    endpoint: String
}

impl HttpChainSource {
    /// Creates a source for the API rooted at `base_url`. `timeout` bounds the whole request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), FRAUD_CHAIN_PATH);

        if let Err(error) = reqwest::Url::parse(&endpoint) {
            return Err(FetchError::InvalidEndpoint { endpoint, reason: error.to_string() });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch(&self, query: &FraudQuery) -> Result<FraudChainResponse, FetchError> {
        let transaction_date = query.transaction_date.format(QUERY_DATE_FORMAT).to_string();

        info!("Fetching fraud chain for [{query}] from [{}]", self.endpoint);

        let response = self.client.get(&self.endpoint)
            .query(&[
                ("accountNumber", query.account_number.as_str()),
                ("transactionDate", transaction_date.as_str())
            ])
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Network)?;

        debug!("Fraud chain API answered [{status}] with [{}] byte(s)", body.len());

        if !status.is_success() {
            return Err(FetchError::Api { status: status.as_u16(), body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
