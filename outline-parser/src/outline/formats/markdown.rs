//! Markdown output: every root rendered with [`render_node`]

use super::registry::{FormatError, Formatter};
use crate::outline::ast::Outline;
use crate::outline::query::render_node;

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Outline tree rendered back to Markdown headings and content"
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
        Ok(outline.tree.iter().map(|node| render_node(node, 0)).collect())
    }
}
