//! Testing utilities for outline assertions
//!
//!     Outline tests follow two rules:
//!
//!         1. Take whole documents from the curated fixtures (via [`fixtures`]) rather than
//!            inventing papers inline. Hand-written snippets tend to drift from what real
//!            converted papers look like, and then the tables get tuned to the snippet.
//!         2. Check trees with the fluent [`assert_outline`] API rather than indexing into
//!            `children` by hand.
//!
//!     Short inline line lists are fine when a test is about one builder rule.
//!
//! Fluent Assertion API
//!
//!     ```rust,ignore
//!     use outline_parser::outline::testing::{assert_outline, fixtures};
//!
//!     let outline = fixtures::outline("thesis");
//!
//!     assert_outline(&outline.tree)
//!         .item_count(5)
//!         .item(2, |chapter| {
//!             chapter
//!                 .role("chapter")
//!                 .title("第一章 绪论")
//!                 .child(0, |section| {
//!                     section.level(2).title_contains("研究背景");
//!                 });
//!         });
//!     ```

mod assertions;
pub mod fixtures;

pub use assertions::{NodeAssertion, TreeAssertion};

use crate::outline::ast::Node;

/// Create an assertion builder for a node forest
pub fn assert_outline(tree: &[Node]) -> TreeAssertion<'_> {
    TreeAssertion { nodes: tree }
}
