mod errors;
mod node;
mod record;
#[cfg(test)]
mod tests;
mod tree;

pub use errors::MalformedTreeError;
pub use node::TransactionNode;
pub use record::{FraudChainResponse, TransactionRecord};
pub use tree::{build_tree_model, TreeModel};
