//! Node, Metadata and Outline

use crate::outline::patterns::strip_heading_markers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A heading together with the lines it governs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub level: i32,
    pub role: Option<String>,
    pub title: String,
    /// Index of the heading within the non-empty line sequence
    pub source_line: usize,
    pub content: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Build a node from a raw heading line, stripping the `#` markers from its title.
    pub fn from_heading(level: i32, role: Option<&str>, heading: &str, source_line: usize) -> Self {
        Self {
            level,
            role: role.map(str::to_string),
            title: strip_heading_markers(heading).to_string(),
            source_line,
            content: String::new(),
            children: Vec::new(),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn push_content(&mut self, line: &str) {
        self.content.push_str(line.trim());
        self.content.push('\n');
    }

    /// Pre-order iterator over this node and all of its descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// Pre-order walk over a node forest
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub fn over(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Document metadata: front matter, trailing matter and well-known keys.
///
/// Values accumulate multi-line text; keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub const TITLE: &'static str = "title";
    pub const AUTHORS: &'static str = "authors";
    pub const RAW: &'static str = "raw";
    pub const INDEX_TERMS: &'static str = "index_terms";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Append text to a key, creating it empty first if needed.
    pub fn append(&mut self, key: &str, text: &str) {
        self.0.entry(key.to_string()).or_default().push_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The result of outlining one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Name of the genre whose tables produced this outline
    pub genre: String,
    /// Detection confidence, absent when the genre was chosen by name
    pub confidence: Option<f64>,
    pub metadata: Metadata,
    pub tree: Vec<Node>,
}

impl Outline {
    /// Pre-order iterator over every node of the tree
    pub fn nodes(&self) -> PreOrder<'_> {
        PreOrder::over(&self.tree)
    }
}
