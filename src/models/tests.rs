use super::node::DEBIT_ACCOUNT_LABEL;
use super::tree::PARENT_KEY_FIELD;
use super::{build_tree_model, FraudChainResponse, MalformedTreeError, TransactionRecord};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use proptest::prelude::*;

use crate::types::Amount;

fn create_record(key: &str, parent_key: Option<&str>) -> TransactionRecord {
    TransactionRecord {
        key: key.to_string(),
        parent_key: parent_key.map(str::to_string),
        ..TransactionRecord::default()
    }
}

fn create_response(root_key: &str, data: Vec<TransactionRecord>) -> FraudChainResponse {
    FraudChainResponse {
        input_acc_number: root_key.to_string(),
        input_transaction_date: Some("2023-06-13".to_string()),
        data
    }
}

#[test]
fn test_empty_data_yields_the_synthesized_root_only() -> Result<()> {
    let model = build_tree_model(&create_response("ROOT", Vec::new()))?;

    assert_eq!(model.node_count(), 1);
    assert!(model.is_not_found());

    let root = model.root();

    assert_eq!(root.key, "ROOT");
    assert_eq!(root.parent_key, None);
    assert_eq!(root.card_number.as_deref(), Some(DEBIT_ACCOUNT_LABEL));
    assert_eq!(root.input_date.as_deref(), Some("2023-06-13"));
    assert_eq!(root.channel_name, None);
    assert_eq!(root.transaction_amount, None);
    assert_eq!(root.transaction_time, None);

    Ok(())
}

#[test]
fn test_two_records_form_a_three_node_chain() -> Result<()> {
    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        create_record("B", Some("A")),
    ]);

    let model = build_tree_model(&response)?;
    let keys: Vec<&str> = model.nodes().iter().map(|node| node.key.as_str()).collect();

    assert_eq!(keys, vec!["ROOT", "A", "B"]);
    assert_eq!(model.get("A").and_then(|node| node.parent_key.as_deref()), Some("ROOT"));
    assert_eq!(model.get("B").and_then(|node| node.parent_key.as_deref()), Some("A"));
    assert_eq!(model.parent_of("B").map(|node| node.key.as_str()), Some("A"));
    assert_eq!(model.children("ROOT").len(), 1);
    assert!(!model.is_not_found());

    Ok(())
}

#[test]
fn test_records_keep_their_api_order_and_labels() -> Result<()> {
    let mut record = create_record("TRX-2", Some("ROOT"));
    record.channel_name = Some("ATM".to_string());
    record.transaction_amount = Some(Amount::from_str("1500000")?);

    let response = create_response("ROOT", vec![
        create_record("TRX-3", Some("TRX-2")),
        record.clone(),
    ]);

    let model = build_tree_model(&response)?;

    assert_eq!(model.nodes()[1].key, "TRX-3");
    assert_eq!(model.nodes()[2].key, "TRX-2");

    let node = model.get("TRX-2").ok_or_else(|| anyhow!("TRX-2 missing from model"))?;

    assert_eq!(node.channel_name.as_deref(), Some("ATM"));
    assert_eq!(node.transaction_amount, record.transaction_amount);

    Ok(())
}

#[test]
fn test_parentless_record_with_the_root_key_is_adopted_as_root() -> Result<()> {
    let mut existing_root = create_record("ROOT", None);
    existing_root.card_number = Some("4111-xxxx".to_string());

    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        existing_root,
    ]);

    let model = build_tree_model(&response)?;

    assert_eq!(model.node_count(), 2);
    assert_eq!(model.root().key, "ROOT");
    assert_eq!(model.root().card_number.as_deref(), Some("4111-xxxx"));
    assert_eq!(model.nodes().iter().filter(|node| node.is_root()).count(), 1);

    Ok(())
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        create_record("A", Some("ROOT")),
        create_record("ROOT", Some("A")),
    ]);

    let result = build_tree_model(&response);

    assert_eq!(result, Err(MalformedTreeError::DuplicateKey { keys: vec!["A".to_string(), "ROOT".to_string()] }));
}

#[test]
fn test_dangling_parent_reference_is_rejected() {
    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        create_record("B", Some("GHOST")),
    ]);

    let result = build_tree_model(&response);

    assert_eq!(result, Err(MalformedTreeError::DanglingParent {
        references: vec![("B".to_string(), "GHOST".to_string())]
    }));
}

#[test]
fn test_record_without_parent_is_rejected_as_second_root() {
    let response = create_response("ROOT", vec![create_record("A", None)]);

    let result = build_tree_model(&response);

    assert!(matches!(result, Err(MalformedTreeError::MissingParent { ref keys }) if keys == &vec!["A".to_string()]));
}

#[test]
fn test_parent_cycles_are_rejected() {
    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        create_record("B", Some("C")),
        create_record("C", Some("B")),
        create_record("D", Some("D")),
    ]);

    let result = build_tree_model(&response);

    assert_eq!(result, Err(MalformedTreeError::Cycle {
        keys: vec!["B".to_string(), "C".to_string(), "D".to_string()]
    }));
}

#[test]
fn test_empty_keys_and_missing_root_are_rejected() {
    let response = create_response("ROOT", vec![
        create_record("A", Some("ROOT")),
        create_record("  ", Some("A")),
    ]);

    assert_eq!(build_tree_model(&response), Err(MalformedTreeError::EmptyKey { positions: vec![1] }));
    assert_eq!(build_tree_model(&create_response("", Vec::new())), Err(MalformedTreeError::MissingRootKey));
}

#[test]
fn test_malformed_tree_error_reports_offending_keys() {
    let error = MalformedTreeError::DanglingParent {
        references: vec![("B".to_string(), "GHOST".to_string())]
    };

    assert_eq!(error.offending_keys(), vec!["B"]);
    assert!(error.to_string().contains("B -> GHOST"));
}

#[test]
fn test_response_deserializes_canonical_and_aliased_field_names() -> Result<()> {
    let json = r#"{
        "inputAccNumber": "050601019213501",
        "inputTransactionDate": "2023-06-13",
        "data": [
            { "key": "111", "parentKey": "050601019213501", "transactionAmount": 1500000 },
            { "key": "222", "parent": "111", "channelName": "ATM" },
            { "debetAccount": "333", "parentNumber": "222", "transactionAmount": "2500.5" },
            { "key": 444, "parentKey": "333", "unknownField": true }
        ]
    }"#;

    let response: FraudChainResponse = serde_json::from_str(json)?;
    let parents: Vec<Option<&str>> = response.data.iter().map(|record| record.parent_key.as_deref()).collect();

    assert_eq!(response.input_acc_number, "050601019213501");
    assert_eq!(response.data[2].key, "333");
    assert_eq!(response.data[3].key, "444");
    assert_eq!(parents, vec![Some("050601019213501"), Some("111"), Some("222"), Some("333")]);
    assert_eq!(response.data[2].transaction_amount, Some(Amount::from_str("2500.5")?));

    let model = build_tree_model(&response)?;

    assert_eq!(model.node_count(), 5);

    Ok(())
}

#[test]
fn test_unreadable_amounts_drop_the_label_but_keep_the_record() -> Result<()> {
    let json = r#"{
        "inputAccNumber": "ROOT",
        "inputTransactionDate": "2023-06-13",
        "data": [
            { "key": "A", "parentKey": "ROOT", "transactionAmount": "" },
            { "key": "B", "parentKey": "A", "transactionAmount": "N/A", "channelName": "ATM" },
            { "key": "C", "parentKey": "A", "transactionAmount": { "value": 1 } },
            { "key": "D", "parentKey": "A", "transactionAmount": null },
            { "key": "E", "parentKey": "A", "transactionAmount": 12500000.5 }
        ]
    }"#;

    let response: FraudChainResponse = serde_json::from_str(json)?;
    let amounts: Vec<Option<Amount>> = response.data.iter().map(|record| record.transaction_amount).collect();

    assert_eq!(amounts, vec![None, None, None, None, Some(Amount::from_str("12500000.5")?)]);
    assert_eq!(response.data[1].channel_name.as_deref(), Some("ATM"));
    assert_eq!(build_tree_model(&response)?.node_count(), 6);

    Ok(())
}

#[test]
fn test_response_tolerates_missing_or_null_data() -> Result<()> {
    let missing: FraudChainResponse = serde_json::from_str(r#"{ "inputAccNumber": "ROOT" }"#)?;
    let null: FraudChainResponse = serde_json::from_str(r#"{ "inputAccNumber": "ROOT", "data": null }"#)?;

    assert!(missing.data.is_empty());
    assert!(null.data.is_empty());

    Ok(())
}

#[test]
fn test_serialized_nodes_use_the_parent_key_field_and_omit_absent_labels() -> Result<()> {
    let model = build_tree_model(&create_response("ROOT", vec![create_record("A", Some("ROOT"))]))?;

    let root = serde_json::to_value(model.root())?;
    let child = serde_json::to_value(&model.nodes()[1])?;

    assert!(root.get(PARENT_KEY_FIELD).is_none());
    assert_eq!(child.get(PARENT_KEY_FIELD).and_then(|value| value.as_str()), Some("ROOT"));
    assert!(child.get("channelName").is_none());
    assert_eq!(model.parent_key_field(), PARENT_KEY_FIELD);

    Ok(())
}

/// Generates a valid chain as `(key, parent position)` pairs where every parent
/// precedes its child, then shuffles the record order.
fn valid_chain() -> impl Strategy<Value = Vec<TransactionRecord>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..40)
        .prop_map(|parents| {
            parents.iter().enumerate().map(|(position, parent)| {
                let parent_key = match parent.index(position + 1) {
                    0 => "ROOT".to_string(),
                    other => format!("N{}", other - 1)
                };
                create_record(&format!("N{position}"), Some(&parent_key))
            }).collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn test_valid_chains_have_one_root_and_no_dangling_edges(data in valid_chain()) {
        let record_count = data.len();
        let model = build_tree_model(&create_response("ROOT", data)).map_err(|error| TestCaseError::fail(error.to_string()))?;

        prop_assert_eq!(model.node_count(), record_count + 1);
        prop_assert_eq!(model.nodes().iter().filter(|node| node.is_root()).count(), 1);
        prop_assert!(model.root().is_root());

        for node in model.nodes().iter().skip(1) {
            prop_assert!(model.parent_of(&node.key).is_some());
        }

        let mut reachable = 0;
        let mut stack = vec![model.root()];
        while let Some(node) = stack.pop() {
            reachable += 1;
            stack.extend(model.children(&node.key));
        }
        prop_assert_eq!(reachable, model.node_count());
    }

    #[test]
    fn test_any_dangling_reference_is_rejected(data in valid_chain(), ghost in "[a-z]{1,8}") {
        let mut data = data;
        data.push(create_record("ORPHAN", Some(&format!("GHOST-{ghost}"))));

        let result = build_tree_model(&create_response("ROOT", data));

        prop_assert!(matches!(result, Err(MalformedTreeError::DanglingParent { .. })), "expected dangling parent error");
    }
}
