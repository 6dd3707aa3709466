//! Staged builders
//!
//!     Genre-specific builders run a small state machine over the lines. Front matter is
//!     captured into metadata before any node is built; the body uses the shared
//!     [`TreeBuilder`].
//!
//!     Thesis:
//!
//!         SeekMarker -> CaptureTitle -> CaptureFrontMatter -> Body -> Trailer
//!
//!         - SeekMarker drops everything up to the `博士学位论文` heading
//!         - CaptureTitle takes the next line as the title, seeding `raw`
//!         - CaptureFrontMatter appends lines to `raw` until the first heading
//!         - Body builds the tree. Once a references node has opened, the next heading moves
//!           to Trailer
//!         - Trailer files headings and their lines into metadata buckets keyed by role
//!
//!     Conference and journal articles:
//!
//!         CaptureTitle -> CaptureFrontMatter -> Body
//!
//!         - CaptureTitle waits for the first `# ` heading. It becomes `title` and also opens
//!           the first node, so an unclassified title is a plain `section`
//!         - CaptureFrontMatter appends lines to `authors` until the front matter ends. For
//!           conferences any `# ` line ends it; journals wait for `# Abstract` or `# <Roman>.`
//!           Headings seen here still open nodes as well
//!         - Body builds the tree, falling back on the `#` count for unknown headings
//!
//!     A line that ends a stage is reprocessed by the next one.

use super::stack::TreeBuilder;
use super::ParseResult;
use crate::outline::ast::{Metadata, Node};
use crate::outline::genres::{conference, journal, thesis};
use crate::outline::patterns::{heading_depth, is_heading, strip_heading_markers, PatternTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    SeekMarker,
    CaptureTitle,
    CaptureFrontMatter,
    Body,
    Trailer,
}

/// What a stage did with the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Consumed,
    Reprocess,
}

/// Article flavours sharing the three-stage builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Article {
    Conference,
    Journal,
}

impl Article {
    fn ends_front_matter(self, line: &str) -> bool {
        match self {
            Article::Conference => line.starts_with("# "),
            Article::Journal => journal::FRONT_MATTER_END.is_match(line),
        }
    }

    /// Role and level for a heading the table did not classify, by its `#` count
    fn fallback(self, line: &str) -> Option<(i32, &'static str)> {
        match (self, heading_depth(line)) {
            (Article::Conference, 1) => {
                Some((1, conference::categorize_unknown_heading(strip_heading_markers(line))))
            }
            (Article::Conference, 2) => Some((2, "subsection")),
            (Article::Conference, 3) => Some((3, "subsubsection")),
            (Article::Journal, 1) => Some((1, "section")),
            (Article::Journal, 2) => Some((2, "subsection")),
            _ => None,
        }
    }
}

/// Drive `step` over every line, letting a stage hand a line on to its successor.
fn run<S, F>(lines: &[S], mut step: F)
where
    S: AsRef<str>,
    F: FnMut(usize, &str) -> Step,
{
    for (index, raw) in lines.iter().enumerate() {
        let line = raw.as_ref().trim();
        while step(index, line) == Step::Reprocess {}
    }
}

struct ThesisParser<'t> {
    table: &'t PatternTable,
    stage: Stage,
    builder: TreeBuilder,
    metadata: Metadata,
    references_opened: bool,
    trailer_key: String,
}

impl<'t> ThesisParser<'t> {
    fn new(table: &'t PatternTable) -> Self {
        Self {
            table,
            stage: Stage::SeekMarker,
            builder: TreeBuilder::new(),
            metadata: Metadata::new(),
            references_opened: false,
            trailer_key: thesis::TRAILER_FALLBACK_KEY.to_string(),
        }
    }

    fn advance(&mut self, to: Stage, index: usize) {
        tracing::trace!(from = ?self.stage, to = ?to, line = index, "thesis stage transition");
        self.stage = to;
    }

    fn step(&mut self, index: usize, line: &str) -> Step {
        let table = self.table;

        match self.stage {
            Stage::SeekMarker => {
                if is_heading(line) && thesis::DOCUMENT_MARKER.is_match(line) {
                    self.advance(Stage::CaptureTitle, index);
                }
            }
            Stage::CaptureTitle => {
                let title = strip_heading_markers(line);
                self.metadata.insert(Metadata::TITLE, title);
                self.metadata.insert(Metadata::RAW, format!("# title: {title}\n\n"));
                self.advance(Stage::CaptureFrontMatter, index);
            }
            Stage::CaptureFrontMatter => {
                if is_heading(line) {
                    self.metadata.append(Metadata::RAW, "\n");
                    self.advance(Stage::Body, index);
                    return Step::Reprocess;
                }
                self.metadata.append(Metadata::RAW, &format!("{line}\n"));
            }
            Stage::Body => {
                if is_heading(line) {
                    if self.references_opened {
                        self.advance(Stage::Trailer, index);
                        return Step::Reprocess;
                    }
                    match table.classify(line) {
                        Some((level, role)) => {
                            if role == thesis::REFERENCES_ROLE {
                                self.references_opened = true;
                            }
                            self.builder.open(Node::from_heading(level, Some(role), line, index));
                        }
                        None => {
                            self.builder.add_content(line);
                        }
                    }
                } else if thesis::REFERENCES_CAPTION.is_match(line) {
                    self.references_opened = true;
                    self.builder
                        .open(Node::from_heading(1, Some(thesis::REFERENCES_ROLE), line, index));
                } else {
                    self.builder.add_content(line);
                }
            }
            Stage::Trailer => {
                if is_heading(line) {
                    let key = table
                        .classify(line)
                        .map_or(thesis::TRAILER_FALLBACK_KEY, |(_, role)| role);
                    self.trailer_key = key.to_string();
                    self.metadata.append(key, &format!("\n{line}\n"));
                } else {
                    self.metadata.append(&self.trailer_key, &format!("{line}\n"));
                }
            }
        }

        Step::Consumed
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            metadata: self.metadata,
            tree: self.builder.finish(),
        }
    }
}

/// Staged builder for doctoral theses.
///
/// A document without the thesis marker yields an empty tree and empty metadata.
pub fn parse_thesis<S: AsRef<str>>(lines: &[S], table: &PatternTable) -> ParseResult {
    let mut parser = ThesisParser::new(table);
    run(lines, |index, line| parser.step(index, line));
    parser.finish()
}

struct ArticleParser<'t> {
    table: &'t PatternTable,
    article: Article,
    stage: Stage,
    builder: TreeBuilder,
    metadata: Metadata,
}

impl<'t> ArticleParser<'t> {
    fn new(table: &'t PatternTable, article: Article) -> Self {
        Self {
            table,
            article,
            stage: Stage::CaptureTitle,
            builder: TreeBuilder::new(),
            metadata: Metadata::new(),
        }
    }

    fn advance(&mut self, to: Stage, index: usize) {
        tracing::trace!(
            article = ?self.article,
            from = ?self.stage,
            to = ?to,
            line = index,
            "article stage transition"
        );
        self.stage = to;
    }

    fn step(&mut self, index: usize, line: &str) -> Step {
        match self.stage {
            Stage::CaptureTitle => {
                if line.starts_with("# ") {
                    self.metadata
                        .insert(Metadata::TITLE, strip_heading_markers(line));
                    self.metadata.insert(Metadata::AUTHORS, "");
                    self.advance(Stage::CaptureFrontMatter, index);
                    self.open_heading(index, line);
                }
            }
            Stage::CaptureFrontMatter => {
                if self.article.ends_front_matter(line) {
                    self.advance(Stage::Body, index);
                    return Step::Reprocess;
                }
                self.metadata.append(Metadata::AUTHORS, &format!("{line}\n"));
                // a heading here is both author text and a node
                if is_heading(line) && !self.open_heading(index, line) {
                    self.builder.add_content(line);
                }
            }
            Stage::Body => {
                if is_heading(line) {
                    if !self.open_heading(index, line) {
                        self.add_content(line);
                    }
                } else if self.article == Article::Journal
                    && line.contains(journal::INDEX_TERMS_MARKER)
                    && !self.metadata.contains(Metadata::INDEX_TERMS)
                {
                    self.metadata.insert(Metadata::INDEX_TERMS, line);
                } else {
                    self.add_content(line);
                }
            }
            // articles have no marker to seek and no trailer
            Stage::SeekMarker | Stage::Trailer => {}
        }

        Step::Consumed
    }

    /// Classify `line` (table first, then the `#` count) and open its node.
    /// Returns false when the heading is too deep for either.
    fn open_heading(&mut self, index: usize, line: &str) -> bool {
        let table = self.table;
        match table.classify(line).or_else(|| self.article.fallback(line)) {
            Some((level, role)) => {
                self.builder.open(Node::from_heading(level, Some(role), line, index));
                true
            }
            None => false,
        }
    }

    /// Content before the first body node belongs to the author block.
    fn add_content(&mut self, line: &str) {
        if !self.builder.add_content(line) {
            self.metadata.append(Metadata::AUTHORS, &format!("{line}\n"));
        }
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            metadata: self.metadata,
            tree: self.builder.finish(),
        }
    }
}

/// Staged builder for conference and journal articles
pub fn parse_article<S: AsRef<str>>(
    lines: &[S],
    table: &PatternTable,
    article: Article,
) -> ParseResult {
    let mut parser = ArticleParser::new(table, article);
    run(lines, |index, line| parser.step(index, line));
    parser.finish()
}
