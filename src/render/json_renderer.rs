use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::models::{TransactionNode, TreeModel};
use crate::render::TreeRenderer;

const TREE_MODEL_CLASS: &str = "TreeModel";

/// Writes the chain as a diagram-library tree model document, ready to be
/// loaded by a tree-layout front end.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    pretty: bool
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeModelDocument<'a> {
    class: &'static str,
    node_parent_key_property: &'static str,
    node_data_array: &'a [TransactionNode]
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl TreeRenderer for JsonRenderer {
    fn render(&self, model: &TreeModel, output: &mut dyn Write) -> Result<()> {
        let document = TreeModelDocument {
            class: TREE_MODEL_CLASS,
            node_parent_key_property: model.parent_key_field(),
            node_data_array: model.nodes()
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *output, &document)?;
        } else {
            serde_json::to_writer(&mut *output, &document)?;
        }

        writeln!(output)?;

        Ok(())
    }
}
