//! Fluent assertions over outline nodes

use crate::outline::ast::Node;

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|n| format!("{}({})", n.role().unwrap_or("-"), n.title))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct TreeAssertion<'a> {
    pub(crate) nodes: &'a [Node],
}

impl<'a> TreeAssertion<'a> {
    /// Assert the number of root nodes
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "Expected {} root nodes, found {}: [{}]",
            expected,
            self.nodes.len(),
            summarize(self.nodes)
        );
        self
    }

    /// Assert on a specific root node by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.nodes.len(),
            "Item index {} out of bounds (tree has {} roots: [{}])",
            index,
            self.nodes.len(),
            summarize(self.nodes)
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("tree[{}]", index),
        });
        self
    }

    /// Assert the roles of the root nodes, in order
    pub fn roles(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.nodes.iter().map(|n| n.role().unwrap_or("-")).collect();
        assert_eq!(actual, expected, "Root roles differ");
        self
    }
}

pub struct NodeAssertion<'a> {
    pub(crate) node: &'a Node,
    pub(crate) context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.node.title, expected,
            "{}: Expected title '{}', found '{}'",
            self.context, expected, self.node.title
        );
        self
    }

    pub fn title_contains(self, fragment: &str) -> Self {
        assert!(
            self.node.title.contains(fragment),
            "{}: Expected title to contain '{}', found '{}'",
            self.context,
            fragment,
            self.node.title
        );
        self
    }

    pub fn role(self, expected: &str) -> Self {
        assert_eq!(
            self.node.role(),
            Some(expected),
            "{}: Expected role '{}', found {:?}",
            self.context,
            expected,
            self.node.role()
        );
        self
    }

    pub fn level(self, expected: i32) -> Self {
        assert_eq!(
            self.node.level, expected,
            "{}: Expected level {}, found {}",
            self.context, expected, self.node.level
        );
        self
    }

    /// Assert the content contains `fragment`
    pub fn content(self, fragment: &str) -> Self {
        assert!(
            self.node.content.contains(fragment),
            "{}: Expected content to contain '{}', found '{}'",
            self.context,
            fragment,
            self.node.content
        );
        self
    }

    pub fn no_content(self) -> Self {
        assert!(
            self.node.content.is_empty(),
            "{}: Expected no content, found '{}'",
            self.context,
            self.node.content
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.children.len(),
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            self.node.children.len(),
            summarize(&self.node.children)
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            self.node.children.len()
        );
        assertion(NodeAssertion {
            node: &self.node.children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}
