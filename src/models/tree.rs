use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use crate::models::errors::MalformedTreeError;
use crate::models::{FraudChainResponse, TransactionNode};
use crate::types::NodeKey;

/// Name of the node field that holds the parent reference, as serialized.
pub const PARENT_KEY_FIELD: &str = "parentKey";

/// A validated, parent-linked fraud chain.
///
/// The first node is always the root. Every other node has a `parent_key` that
/// resolves inside the model and every node is reachable from the root. Instances
/// only come out of [`build_tree_model`], so holding one is proof of those invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeModel {
    nodes: Vec<TransactionNode>,
    index: HashMap<NodeKey, usize>,
    children: Vec<Vec<usize>>
}

impl TreeModel {
    /// Nodes in render order: the root first, then the records as the API returned them.
    pub fn nodes(&self) -> &[TransactionNode] {
        &self.nodes
    }

    pub fn root(&self) -> &TransactionNode {
        &self.nodes[0]
    }

    pub fn get(&self, key: &str) -> Option<&TransactionNode> {
        self.index.get(key).map(|&position| &self.nodes[position])
    }

    pub fn parent_of(&self, key: &str) -> Option<&TransactionNode> {
        self.get(key)?.parent_key.as_deref().and_then(|parent_key| self.get(parent_key))
    }

    /// Direct children of `key`, in sequence order.
    pub fn children(&self, key: &str) -> Vec<&TransactionNode> {
        self.index.get(key)
            .map(|&position| self.children[position].iter().map(|&child| &self.nodes[child]).collect())
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// A chain holding only the synthesized root means the API found nothing for the query.
    pub fn is_not_found(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn parent_key_field(&self) -> &'static str {
        PARENT_KEY_FIELD
    }
}

/// Shapes a fetched response into a [`TreeModel`].
///
/// The root is synthesized from `inputAccNumber` and `inputTransactionDate` and
/// placed first, unless `data` already holds a parentless record with that key,
/// in which case that record becomes the root. All other records are passed
/// through in API order without re-keying.
///
/// # Errors
/// Returns `MalformedTreeError` if:
/// - The response has no input account number.
/// - A record has an empty key.
/// - Two nodes share a key.
/// - A non-root record has no parent key.
/// - A parent key does not resolve.
/// - A node cannot reach the root (parent cycle).
pub fn build_tree_model(response: &FraudChainResponse) -> Result<TreeModel, MalformedTreeError> {
    let root_key = &response.input_acc_number;

    if root_key.trim().is_empty() {
        return Err(MalformedTreeError::MissingRootKey);
    }

    let adopted_root = response.data.iter()
        .position(|record| &record.key == root_key && record.parent_key.is_none());

    let mut nodes = Vec::with_capacity(response.data.len() + 1);

    match adopted_root {
        Some(position) => {
            debug!("Root account [{root_key}] is present in the response at position [{position}]");
            nodes.push(TransactionNode::from(&response.data[position]));
        }
        None => {
            nodes.push(TransactionNode::debit_account(root_key.clone(), response.input_transaction_date.clone()));
        }
    }

    let mut empty_positions = Vec::new();

    for (position, record) in response.data.iter().enumerate() {
        if Some(position) == adopted_root {
            continue;
        }

        if record.key.trim().is_empty() {
            empty_positions.push(position);
            continue;
        }

        nodes.push(TransactionNode::from(record));
    }

    if !empty_positions.is_empty() {
        return Err(MalformedTreeError::EmptyKey { positions: empty_positions });
    }

    let index = index_keys(&nodes)?;
    let children = link_children(&nodes, &index)?;
    check_reachability(&nodes, &children)?;

    debug!("Built fraud chain for [{root_key}] with [{}] node(s)", nodes.len());

    Ok(TreeModel { nodes, index, children })
}

fn index_keys(nodes: &[TransactionNode]) -> Result<HashMap<NodeKey, usize>, MalformedTreeError> {
    let mut index = HashMap::with_capacity(nodes.len());
    let mut duplicates = Vec::new();

    for (position, node) in nodes.iter().enumerate() {
        if index.contains_key(&node.key) {
            if !duplicates.contains(&node.key) {
                duplicates.push(node.key.clone());
            }
            continue;
        }

        index.insert(node.key.clone(), position);
    }

    if !duplicates.is_empty() {
        warn!("Fraud chain holds duplicate key(s): {duplicates:?}");
        return Err(MalformedTreeError::DuplicateKey { keys: duplicates });
    }

    Ok(index)
}

fn link_children(nodes: &[TransactionNode], index: &HashMap<NodeKey, usize>) -> Result<Vec<Vec<usize>>, MalformedTreeError> {
    let mut children = vec![Vec::new(); nodes.len()];
    let mut unparented = Vec::new();
    let mut dangling = Vec::new();

    for (position, node) in nodes.iter().enumerate().skip(1) {
        let Some(parent_key) = &node.parent_key else {
            unparented.push(node.key.clone());
            continue;
        };

        match index.get(parent_key) {
            Some(&parent) => children[parent].push(position),
            None => dangling.push((node.key.clone(), parent_key.clone()))
        }
    }

    if !unparented.is_empty() {
        return Err(MalformedTreeError::MissingParent { keys: unparented });
    }

    if !dangling.is_empty() {
        warn!("Fraud chain holds dangling parent reference(s): {dangling:?}");
        return Err(MalformedTreeError::DanglingParent { references: dangling });
    }

    Ok(children)
}

fn check_reachability(nodes: &[TransactionNode], children: &[Vec<usize>]) -> Result<(), MalformedTreeError> {
    let mut reached = HashSet::with_capacity(nodes.len());
    let mut queue = VecDeque::from([0]);

    while let Some(position) = queue.pop_front() {
        if reached.insert(position) {
            queue.extend(children[position].iter().copied());
        }
    }

    if reached.len() == nodes.len() {
        return Ok(());
    }

    let unreachable: Vec<NodeKey> = nodes.iter().enumerate()
        .filter(|(position, _)| !reached.contains(position))
        .map(|(_, node)| node.key.clone())
        .collect();

    warn!("Fraud chain holds parent cycle(s) through: {unreachable:?}");

    Err(MalformedTreeError::Cycle { keys: unreachable })
}
