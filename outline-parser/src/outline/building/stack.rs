//! Stack-based tree builder
//!
//!     The builder keeps a stack of open nodes. Opening a node first closes every open node
//!     whose level is greater than or equal to the new one, so only strict ancestors remain.
//!     The new node then becomes a child of the stack top when there is one and its level is
//!     positive, or a new root otherwise.
//!
//!     Nodes are attached the moment they are opened, and the stack stores index paths into
//!     the forest. Root order is creation order, even for roots that open above a lower-level
//!     node still on the stack (levels 0 and -1).

use crate::outline::ast::{Metadata, Node};
use crate::outline::patterns::{is_heading, PatternTable};

use super::ParseResult;

#[derive(Debug, Clone)]
struct OpenNode {
    level: i32,
    root: usize,
    /// Child indices from the root down to this node
    path: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<OpenNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the nodes that are not strict ancestors of `node`, attach it and leave it open.
    pub fn open(&mut self, node: Node) {
        while self.open.last().is_some_and(|top| top.level >= node.level) {
            self.open.pop();
        }

        let level = node.level;
        let parent = match self.open.last() {
            Some(top) if level > 0 => Some((top.root, top.path.clone())),
            _ => None,
        };

        let entry = match parent {
            Some((root, mut path)) => {
                let siblings = &mut self.node_at_mut(root, &path).children;
                siblings.push(node);
                let index = siblings.len() - 1;
                path.push(index);
                OpenNode { level, root, path }
            }
            None => {
                self.roots.push(node);
                OpenNode {
                    level,
                    root: self.roots.len() - 1,
                    path: Vec::new(),
                }
            }
        };

        self.open.push(entry);
    }

    /// Append a line to the innermost open node. Returns `false` when nothing is open and the
    /// line was not stored.
    pub fn add_content(&mut self, line: &str) -> bool {
        let Some(top) = self.open.last() else {
            return false;
        };
        let (root, path) = (top.root, top.path.clone());
        self.node_at_mut(root, &path).push_content(line);
        true
    }

    pub fn finish(self) -> Vec<Node> {
        self.roots
    }

    fn node_at_mut(&mut self, root: usize, path: &[usize]) -> &mut Node {
        path.iter()
            .fold(&mut self.roots[root], |node, index| &mut node.children[*index])
    }
}

/// Generic builder: classified headings become nodes, everything else is content of the
/// innermost open node. Produces no metadata.
pub fn parse_generic<S: AsRef<str>>(lines: &[S], table: &PatternTable) -> ParseResult {
    let mut builder = TreeBuilder::new();

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.as_ref().trim();
        let classified = if is_heading(line) {
            table.classify(line)
        } else {
            None
        };

        match classified {
            Some((level, role)) => builder.open(Node::from_heading(level, Some(role), line, index)),
            None => {
                builder.add_content(line);
            }
        }
    }

    ParseResult {
        metadata: Metadata::new(),
        tree: builder.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(level: i32, title: &str) -> Node {
        Node::from_heading(level, Some("x"), title, 0)
    }

    #[test]
    fn equal_level_closes_previous_sibling() {
        let mut builder = TreeBuilder::new();
        builder.open(node(1, "# A"));
        builder.open(node(2, "## A.1"));
        builder.open(node(2, "## A.2"));
        builder.open(node(1, "# B"));
        let tree = builder.finish();

        assert_eq!(tree.len(), 2);
        let titles: Vec<_> = tree[0].children.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["A.1", "A.2"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn skipped_levels_still_nest() {
        let mut builder = TreeBuilder::new();
        builder.open(node(1, "# A"));
        builder.open(node(4, "#### deep"));
        builder.open(node(2, "## A.1"));
        let tree = builder.finish();

        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].title, "deep");
        assert_eq!(tree[0].children[1].title, "A.1");
    }

    #[test]
    fn content_without_open_node_is_dropped() {
        let mut builder = TreeBuilder::new();
        assert!(!builder.add_content("orphan"));
        builder.open(node(1, "# A"));
        assert!(builder.add_content("  kept  "));
        let tree = builder.finish();
        assert_eq!(tree[0].content, "kept\n");
    }

    #[test]
    fn non_positive_levels_stay_at_root_in_creation_order() {
        let mut builder = TreeBuilder::new();
        builder.open(node(1, "# A"));
        builder.open(node(-1, "# meta"));
        builder.open(node(0, "# zero"));
        builder.open(node(1, "# nested under zero"));
        let tree = builder.finish();

        let titles: Vec<_> = tree.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "meta", "zero"]);
        assert_eq!(tree[2].children[0].title, "nested under zero");
    }

    #[test]
    fn generic_parse_treats_unclassified_headings_as_content() {
        let table = PatternTable::from_rules(&[("Intro", "introduction", 1)]).unwrap();
        let lines = ["# Intro", "text", "# Unknown", "Intro mention"];
        let result = parse_generic(&lines, &table);

        assert!(result.metadata.is_empty());
        assert_eq!(result.tree.len(), 1);
        assert_eq!(result.tree[0].content, "text\n# Unknown\nIntro mention\n");
        assert_eq!(result.tree[0].source_line, 0);
    }
}
