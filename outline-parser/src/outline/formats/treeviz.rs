//! Treeviz formatter for outlines
//!
//! One line per node, which makes the shape of a paper quick to scan.
//!
//! Nesting is drawn with box connectors, so the format is:
//! <prefix><connector> <icon><space><title> (truncated to 30 characters) [<role>]
//!
//! Example:
//!
//!     ⧉ A Great Paper
//!     ├─ ◇ Abstract [abstract]
//!     ├─ § Method [methodology]
//!     │ └─ § Setup [subsection]
//!     └─ ‡ References [references]
//!
//! Icons
//!     Document: ⧉
//!     Front matter (abstract, index terms, table of contents): ◇
//!     References: ‡
//!     Metadata-level nodes (level < 1): ∘
//!     Other sections: §

use super::registry::{FormatError, Formatter};
use crate::outline::ast::{Metadata, Node, Outline};

const MAX_TITLE_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node
fn get_icon(node: &Node) -> &'static str {
    if node.level < 1 {
        return "∘";
    }
    match node.role() {
        Some("abstract" | "abstract_ch" | "abstract_en" | "index_terms" | "table_of_contents") => {
            "◇"
        }
        Some("references") => "‡",
        _ => "§",
    }
}

fn format_node(node: &Node, prefix: &str, child_index: usize, child_count: usize) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let role = node
        .role()
        .map(|role| format!(" [{role}]"))
        .unwrap_or_default();

    output.push_str(&format!(
        "{}{} {} {}{}\n",
        prefix,
        connector,
        get_icon(node),
        truncate(&node.title, MAX_TITLE_CHARS),
        role
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        output.push_str(&format_node(child, &child_prefix, i, child_count));
    }

    output
}

pub fn to_treeviz_str(outline: &Outline) -> String {
    let label = outline
        .metadata
        .get(Metadata::TITLE)
        .unwrap_or(outline.genre.as_str());
    let mut output = format!("⧉ {}\n", truncate(label, MAX_TITLE_CHARS));

    let child_count = outline.tree.len();
    for (i, node) in outline.tree.iter().enumerate() {
        output.push_str(&format_node(node, "", i, child_count));
    }

    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and Unicode icons"
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
        Ok(to_treeviz_str(outline))
    }
}
