mod chain_view;
mod errors;

use std::sync::Arc;

use tracing::warn;

use crate::fetcher::{ChainSource, FraudQuery};
use crate::models::{build_tree_model, TreeModel};

pub use chain_view::{ChainView, ViewState};
pub use errors::QueryError;

/// Fetches and validates the fraud chain for one query.
pub async fn fetch_tree_model<S: ChainSource>(source: &S, query: &FraudQuery) -> Result<TreeModel, QueryError> {
    let response = source.fetch(query).await?;

    if response.input_acc_number != query.account_number.as_str() {
        warn!("Response echoes account [{}] for query [{query}]", response.input_acc_number);
    }

    Ok(build_tree_model(&response)?)
}

/// Runs one query end to end and publishes the outcome on `view`.
///
/// The outcome is also returned so a caller can render it. If a newer query was
/// started on the same view while this one was in flight, nothing is published.
pub async fn run_query<S: ChainSource>(source: &S, view: &ChainView, query: FraudQuery) -> Result<Arc<TreeModel>, QueryError> {
    let ticket = view.begin(query.clone());
    let outcome = fetch_tree_model(source, &query).await.map(Arc::new);

    view.complete(ticket, &outcome);

    outcome
}

/// Publishes a query that failed before any source could run, e.g. because the
/// source itself could not be set up. The failure goes through the same notice
/// path as a failed fetch.
pub fn reject_query(view: &ChainView, query: FraudQuery, error: QueryError) -> Result<Arc<TreeModel>, QueryError> {
    let ticket = view.begin(query);
    let outcome = Err(error);

    view.complete(ticket, &outcome);

    outcome
}
