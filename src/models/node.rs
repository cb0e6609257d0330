use serde::Serialize;

use crate::models::TransactionRecord;
use crate::types::{Amount, NodeKey};

/// Label carried by the synthesized root node.
pub const DEBIT_ACCOUNT_LABEL: &str = "Debit Account";

/// A render-ready node of the fraud chain.
///
/// Absent label fields are omitted when serialized so a renderer can drive
/// visibility purely from presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionNode {
    /// Account number or transaction id, unique within one chain.
    pub key: NodeKey,
    /// Key of the node the funds were credited from. `None` only for the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<NodeKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_date: Option<String>
}

impl TransactionNode {
    /// Builds the root node for the queried debit account. Only the key, the
    /// label and the input date are set.
    pub fn debit_account(key: NodeKey, input_date: Option<String>) -> Self {
        Self {
            key,
            parent_key: None,
            card_number: Some(DEBIT_ACCOUNT_LABEL.to_string()),
            channel_name: None,
            transaction_amount: None,
            transaction_time: None,
            input_date
        }
    }

    #[cfg(test)]
    pub fn is_root(&self) -> bool {
        self.parent_key.is_none()
    }
}

impl From<&TransactionRecord> for TransactionNode {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            key: record.key.clone(),
            parent_key: record.parent_key.clone(),
            card_number: record.card_number.clone(),
            channel_name: record.channel_name.clone(),
            transaction_amount: record.transaction_amount,
            transaction_time: record.transaction_time.clone(),
            input_date: record.input_date.clone()
        }
    }
}
