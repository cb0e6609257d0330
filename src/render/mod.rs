mod csv_renderer;
mod json_renderer;
mod labels;
mod text_renderer;

use std::io::Write;

use anyhow::Result;

use crate::models::TreeModel;

pub use csv_renderer::CsvRenderer;
pub use json_renderer::JsonRenderer;
pub use text_renderer::TextRenderer;

/// Consumes a validated fraud chain.
///
/// Renderers only see the ordered node sequence and the name of the parent-key
/// field; they never re-validate or reshape the tree.
pub trait TreeRenderer {
    fn render(&self, model: &TreeModel, output: &mut dyn Write) -> Result<()>;
}
