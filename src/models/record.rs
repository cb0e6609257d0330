use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::types::{Amount, NodeKey};

/// The response document of the fraud-detection API.
///
/// `inputAccNumber` and `inputTransactionDate` echo the query and are used to
/// synthesize the root of the chain. A missing or `null` `data` array is read as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudChainResponse {
    #[serde(default, deserialize_with = "key_from_json")]
    pub input_acc_number: NodeKey,
    #[serde(default)]
    pub input_transaction_date: Option<String>,
    #[serde(default, deserialize_with = "records_or_null")]
    pub data: Vec<TransactionRecord>
}

/// A single account or transaction as returned by the API.
///
/// Two naming schemes exist in the wild for the key and parent reference. The
/// canonical `key`/`parentKey` pair is used everywhere in this crate; the older
/// `debetAccount`, `parent` and `parentNumber` names are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, alias = "debetAccount", deserialize_with = "key_from_json")]
    pub key: NodeKey,
    #[serde(default, alias = "parent", alias = "parentNumber", deserialize_with = "optional_key_from_json")]
    pub parent_key: Option<NodeKey>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default, deserialize_with = "amount_or_absent")]
    pub transaction_amount: Option<Amount>,
    #[serde(default)]
    pub transaction_time: Option<String>,
    #[serde(default)]
    pub input_date: Option<String>
}

/// Keys are usually strings but transaction ids sometimes arrive as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Number(serde_json::Number)
}

impl RawKey {
    fn into_key(self) -> NodeKey {
        match self {
            RawKey::Text(text) => text,
            RawKey::Number(number) => number.to_string()
        }
    }
}

fn key_from_json<'de, D>(deserializer: D) -> Result<NodeKey, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawKey>::deserialize(deserializer)?
        .map(RawKey::into_key)
        .unwrap_or_default())
}

fn optional_key_from_json<'de, D>(deserializer: D) -> Result<Option<NodeKey>, D::Error>
where
    D: Deserializer<'de>,
{
    //NOTE: A blank parent reference carries no information, it is read the same as an absent one
    Ok(Option::<RawKey>::deserialize(deserializer)?
        .map(RawKey::into_key)
        .filter(|key| !key.trim().is_empty()))
}

fn records_or_null<'de, D>(deserializer: D) -> Result<Vec<TransactionRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TransactionRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Amounts are display labels: a blank or unreadable value drops the label, not the record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(IgnoredAny)
}

fn amount_or_absent<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<RawAmount>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawAmount::Other(_)) => {
            warn!("Dropping transaction amount that is neither a number nor a string");
            return Ok(None);
        }
        Some(RawAmount::Number(number)) => number.to_string(),
        Some(RawAmount::Text(text)) => text
    };

    if text.trim().is_empty() {
        return Ok(None);
    }

    match Amount::from_str(&text) {
        Ok(amount) => Ok(Some(amount)),
        Err(error) => {
            warn!("Dropping unreadable transaction amount [{text}]: {error}");
            Ok(None)
        }
    }
}
