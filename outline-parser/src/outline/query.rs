//! Querying and rendering outline trees
//!
//!     [`find_nodes`] walks a forest in pre-order and keeps every node that satisfies a
//!     [`NodeFilter`]. Matched nodes are descended into as well, so a section and one of its
//!     subsections can both be returned.
//!
//!     [`get_section_content`] renders every found node back to Markdown with
//!     [`render_node`]. Because a rendered node includes its children, a match nested in
//!     another match is printed twice in [`QueryMode::Faithful`]. [`QueryMode::Deduplicated`]
//!     stops descending at the first match on each path.

use crate::outline::ast::Node;
use serde::{Deserialize, Serialize};

/// Deepest Markdown heading emitted for positive levels
pub const MAX_HEADING_DEPTH: i32 = 6;

/// Conjunction of optional node constraints. An empty filter matches every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFilter {
    pub level: Option<i32>,
    pub role: Option<String>,
    /// Substring of the title
    pub title: Option<String>,
    pub exact_title: Option<String>,
}

impl NodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn title(mut self, fragment: impl Into<String>) -> Self {
        self.title = Some(fragment.into());
        self
    }

    pub fn exact_title(mut self, title: impl Into<String>) -> Self {
        self.exact_title = Some(title.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// A role constraint never matches a node without a role.
    pub fn matches(&self, node: &Node) -> bool {
        self.level.map_or(true, |level| node.level == level)
            && self
                .role
                .as_deref()
                .map_or(true, |role| node.role() == Some(role))
            && self
                .title
                .as_deref()
                .map_or(true, |fragment| node.title.contains(fragment))
            && self
                .exact_title
                .as_deref()
                .map_or(true, |title| node.title == title)
    }
}

/// How nested matches are handled when rendering query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Every match is rendered, nested matches appear once per enclosing match as well
    #[default]
    Faithful,
    /// Descendants of a match are not considered
    Deduplicated,
}

/// Every node satisfying `filter`, in pre-order
pub fn find_nodes<'a>(tree: &'a [Node], filter: &NodeFilter) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect(tree, filter, QueryMode::Faithful, &mut found);
    found
}

fn collect<'a>(nodes: &'a [Node], filter: &NodeFilter, mode: QueryMode, found: &mut Vec<&'a Node>) {
    for node in nodes {
        let matched = filter.matches(node);
        if matched {
            found.push(node);
        }
        if !(matched && mode == QueryMode::Deduplicated) {
            collect(&node.children, filter, mode, found);
        }
    }
}

/// Markdown heading depth for `node` rendered `depth` levels below the query root
pub fn heading_depth_for(node: &Node, depth: usize) -> usize {
    let depth = depth as i32;
    let markers = if node.level > 0 {
        (node.level + depth).min(MAX_HEADING_DEPTH)
    } else {
        1 + depth
    };
    markers as usize
}

/// Render `node` and its subtree back to Markdown.
pub fn render_node(node: &Node, depth: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, node, depth);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&"#".repeat(heading_depth_for(node, depth)));
    out.push(' ');
    out.push_str(&node.title);
    out.push_str("\n\n");

    let content = node.content.trim();
    if !content.is_empty() {
        out.push_str(content);
        out.push_str("\n\n");
    }

    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

/// Render every node matched by `filter` at depth 0 and concatenate the results.
pub fn get_section_content(tree: &[Node], filter: &NodeFilter, mode: QueryMode) -> String {
    let mut found = Vec::new();
    collect(tree, filter, mode, &mut found);
    tracing::debug!(matches = found.len(), ?mode, "section query");
    found.into_iter().map(|node| render_node(node, 0)).collect()
}
