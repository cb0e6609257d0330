use std::io::Write;

use anyhow::Result;

use crate::models::TreeModel;
use crate::render::TreeRenderer;

/// Flat export of the chain, one row per node in sequence order.
#[derive(Debug, Default)]
pub struct CsvRenderer;

impl TreeRenderer for CsvRenderer {
    fn render(&self, model: &TreeModel, output: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);

        writer.write_record([
            "key",
            model.parent_key_field(),
            "cardNumber",
            "channelName",
            "transactionAmount",
            "transactionTime",
            "inputDate"
        ])?;

        for node in model.nodes() {
            let amount = node.transaction_amount.map(|amount| amount.value().to_string());

            writer.write_record([
                node.key.as_str(),
                node.parent_key.as_deref().unwrap_or_default(),
                node.card_number.as_deref().unwrap_or_default(),
                node.channel_name.as_deref().unwrap_or_default(),
                amount.as_deref().unwrap_or_default(),
                node.transaction_time.as_deref().unwrap_or_default(),
                node.input_date.as_deref().unwrap_or_default()
            ])?;
        }

        writer.flush()?;

        Ok(())
    }
}
