use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{TransactionNode, TreeModel};

const INPUT_DATE_FORMAT: &str = "%-d/%-m/%Y";
const TRANSACTION_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Detail lines shown under a node's title. A line only appears when its field is present.
pub(crate) fn detail_lines(model: &TreeModel, node: &TransactionNode) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(input_date) = &node.input_date {
        let formatted = parse_date(input_date)
            .map(|date| date.format(INPUT_DATE_FORMAT).to_string())
            .unwrap_or_else(|| input_date.clone());
        lines.push(format!("Transaction Date : {formatted}"));
    }

    if let Some(channel_name) = &node.channel_name {
        lines.push(format!("Channel : {channel_name}"));
    }

    if let Some(amount) = &node.transaction_amount {
        lines.push(format!("Amount : {amount}"));
    }

    if let Some(transaction_time) = &node.transaction_time {
        let formatted = parse_date_time(transaction_time)
            .map(|date_time| date_time.format(TRANSACTION_TIME_FORMAT).to_string())
            .unwrap_or_else(|| transaction_time.clone());
        lines.push(format!("Trx Date : {formatted}"));
    }

    if let Some(parent) = model.parent_of(&node.key) {
        lines.push(format!("Credit from: {}", parent.key));
    }

    lines
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
        .or_else(|| parse_date_time(value).map(|date_time| date_time.date()))
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.naive_local());
    }

    NAIVE_DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
