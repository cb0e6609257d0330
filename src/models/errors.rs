use crate::types::NodeKey;
use thiserror::Error;

/// Raised when a fetched fraud chain cannot be shaped into a single rooted tree.
///
/// Every variant lists all offending entries of its kind so a caller can report them in one go.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedTreeError {
    #[error("Malformed tree: response carries no input account number to root the chain")]
    MissingRootKey,
    #[error("Malformed tree: record(s) at position [{}] have an empty key", join_positions(.positions))]
    EmptyKey {
        positions: Vec<usize>
    },
    #[error("Malformed tree: duplicate key(s) [{}]", .keys.join(", "))]
    DuplicateKey {
        keys: Vec<NodeKey>
    },
    #[error("Malformed tree: record(s) [{}] have no parent key", .keys.join(", "))]
    MissingParent {
        keys: Vec<NodeKey>
    },
    #[error("Malformed tree: parent reference(s) [{}] do not resolve", join_references(.references))]
    DanglingParent {
        references: Vec<(NodeKey, NodeKey)>
    },
    #[error("Malformed tree: record(s) [{}] are not reachable from the root", .keys.join(", "))]
    Cycle {
        keys: Vec<NodeKey>
    }
}

impl MalformedTreeError {
    /// Keys of the nodes that caused the error. Empty for errors that are not tied to a key.
    pub fn offending_keys(&self) -> Vec<&str> {
        match self {
            Self::MissingRootKey | Self::EmptyKey { .. } => Vec::new(),
            Self::DuplicateKey { keys } | Self::MissingParent { keys } | Self::Cycle { keys } => {
                keys.iter().map(String::as_str).collect()
            }
            Self::DanglingParent { references } => {
                references.iter().map(|(key, _)| key.as_str()).collect()
            }
        }
    }
}

fn join_positions(positions: &[usize]) -> String {
    positions.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
}

fn join_references(references: &[(NodeKey, NodeKey)]) -> String {
    references.iter()
        .map(|(key, parent_key)| format!("{key} -> {parent_key}"))
        .collect::<Vec<_>>()
        .join(", ")
}
