use std::io::Write;

use anyhow::Result;

use crate::models::{TransactionNode, TreeModel};
use crate::render::labels::detail_lines;
use crate::render::TreeRenderer;

/// Indented terminal view of the chain, walked depth first from the root.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TreeRenderer for TextRenderer {
    fn render(&self, model: &TreeModel, output: &mut dyn Write) -> Result<()> {
        let mut stack: Vec<(&TransactionNode, usize)> = vec![(model.root(), 0)];

        while let Some((node, depth)) = stack.pop() {
            let indent = "    ".repeat(depth);
            let title = match &node.card_number {
                Some(card_number) => format!("{} [{}]", node.key, card_number),
                None => node.key.clone()
            };

            writeln!(output, "{indent}{title}")?;

            for line in detail_lines(model, node) {
                writeln!(output, "{indent}  {line}")?;
            }

            //NOTE: Pushed in reverse so siblings print in sequence order
            for child in model.children(&node.key).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        output.flush()?;

        Ok(())
    }
}
