//! Tree building
//!
//!     Turns the non-empty lines of a document into a forest of [`Node`]s plus a metadata
//!     record. Which builder runs is decided by the genre's [`ParseStrategy`]:
//!
//!         - Generic: [`stack::parse_generic`], headings classified by the genre's table
//!         - Thesis, Conference, Journal: the staged builders in [`staged`], which also fill
//!           metadata from the front and back matter
//!
//!     All builders share [`stack::TreeBuilder`] for the attach rule.
//!
//!     Building never fails. Lines that match nothing end up as content, metadata or are
//!     dropped, depending on the builder.

pub mod stack;
pub mod staged;

use crate::outline::ast::{Metadata, Node, Outline};
use crate::outline::genres::{GenreDescriptor, ParseStrategy};
use serde::Serialize;

/// Metadata and forest produced by one builder run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub metadata: Metadata,
    pub tree: Vec<Node>,
}

impl ParseResult {
    pub fn into_outline(self, genre: &str, confidence: Option<f64>) -> Outline {
        Outline {
            genre: genre.to_string(),
            confidence,
            metadata: self.metadata,
            tree: self.tree,
        }
    }
}

/// Build the outline of `lines` with the builder selected by `genre`.
///
/// `lines` are expected to be non-empty; their index is recorded as each node's source line.
pub fn parse<S: AsRef<str>>(lines: &[S], genre: &GenreDescriptor) -> ParseResult {
    let table = genre.patterns();
    tracing::debug!(genre = genre.name(), strategy = ?genre.strategy(), "building outline");

    match genre.strategy() {
        ParseStrategy::Generic => stack::parse_generic(lines, table),
        ParseStrategy::Thesis => staged::parse_thesis(lines, table),
        ParseStrategy::Conference => staged::parse_article(lines, table, staged::Article::Conference),
        ParseStrategy::Journal => staged::parse_article(lines, table, staged::Article::Journal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::genres::DetectionFeatures;
    use crate::outline::patterns::PatternTable;

    #[test]
    fn generic_strategy_dispatch_ignores_document_markers() {
        let table = PatternTable::from_rules(&[("摘要", "abstract", 1)]).unwrap();
        let genre = GenreDescriptor::new("plain", table, DetectionFeatures::new());
        let lines = ["# 博士学位论文", "# 摘要", "内容"];

        let result = parse(&lines, &genre);
        assert!(result.metadata.is_empty());
        assert_eq!(result.tree.len(), 1);
        assert_eq!(result.tree[0].role(), Some("abstract"));
        assert_eq!(result.tree[0].source_line, 1);
    }

    #[test]
    fn into_outline_carries_genre_and_confidence() {
        let outline = ParseResult::default().into_outline("journal", Some(0.5));
        assert_eq!(outline.genre, "journal");
        assert_eq!(outline.confidence, Some(0.5));
        assert!(outline.tree.is_empty());
    }
}
