use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::fetcher::FraudQuery;
use crate::models::TreeModel;
use crate::session::QueryError;

/// What a front end should currently show.
#[derive(Debug, Clone)]
pub enum ViewState {
    Idle,
    Loading {
        query: FraudQuery
    },
    Ready {
        query: FraudQuery,
        model: Arc<TreeModel>
    },
    /// Only the root came back: no chain exists for the query.
    NotFound {
        query: FraudQuery,
        model: Arc<TreeModel>
    },
    Failed {
        query: FraudQuery,
        message: String
    }
}

/// Handed out by [`ChainView::begin`]; only the newest ticket may publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: FraudQuery
}

impl Ticket {
    #[cfg(test)]
    pub fn query(&self) -> &FraudQuery {
        &self.query
    }
}

/// Holds the single current fraud chain view.
///
/// Each query replaces the state wholesale. Completions belonging to a query that
/// has since been superseded are dropped, so a slow response can never overwrite
/// a newer one.
pub struct ChainView {
    generation: AtomicU64,
    state: watch::Sender<ViewState>
}

impl ChainView {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Idle);

        Self {
            generation: AtomicU64::new(0),
            state
        }
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Marks `query` as in flight and supersedes any earlier ticket.
    pub fn begin(&self, query: FraudQuery) -> Ticket {
        let mut generation = 0;

        //NOTE: The generation is bumped under the watch lock so it stays ordered with `complete`
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ViewState::Loading { query: query.clone() };
        });

        debug!("Query [{query}] started as generation [{generation}]");

        Ticket { generation, query }
    }

    /// Publishes the outcome of `ticket`'s query. Returns `false` if the ticket was stale.
    pub fn complete(&self, ticket: Ticket, outcome: &Result<Arc<TreeModel>, QueryError>) -> bool {
        let Ticket { generation, query } = ticket;

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }

            *state = match outcome {
                Ok(model) if model.is_not_found() => ViewState::NotFound { query: query.clone(), model: model.clone() },
                Ok(model) => ViewState::Ready { query: query.clone(), model: model.clone() },
                Err(error) => ViewState::Failed { query: query.clone(), message: error.user_notice().to_string() }
            };

            true
        });

        match (published, outcome) {
            (false, _) => debug!("Dropped stale result for query [{query}] (generation [{generation}])"),
            (true, Ok(model)) if model.is_not_found() => info!("No fraud chain found for query [{query}]"),
            (true, Ok(model)) => info!("Fraud chain for query [{query}] holds [{}] node(s)", model.node_count()),
            (true, Err(QueryError::MalformedTree(error))) => {
                error!("Query [{query}] returned a malformed chain around {:?}: {error}", error.offending_keys())
            }
            (true, Err(error)) => error!("Query [{query}] failed: {error}")
        }

        published
    }
}

impl Default for ChainView {
    fn default() -> Self {
        Self::new()
    }
}
