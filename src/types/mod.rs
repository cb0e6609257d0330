mod account_number;
mod amount;
mod errors;

pub use account_number::AccountNumber;
pub use amount::Amount;

/// Identifier of a node in a fraud chain: an account number or a transaction id.
pub type NodeKey = String;
