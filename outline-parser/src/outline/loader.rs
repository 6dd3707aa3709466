//! Document loading utilities
//!
//! `DocumentLoader` reads a paper from a file or a string, keeps the full text for detection
//! and the non-empty lines for building, and runs the whole pipeline on request.
//!
//! # Example
//!
//! ```rust,ignore
//! use outline_parser::outline::{Detector, DocumentLoader, GenreRegistry};
//!
//! let registry = GenreRegistry::with_defaults();
//! let outline = DocumentLoader::from_path("paper.md")?
//!     .outline(&registry, &Detector::new(), None)?;
//! ```

use crate::outline::ast::Outline;
use crate::outline::building;
use crate::outline::detection::Detector;
use crate::outline::error::{OutlineError, OutlineResult};
use crate::outline::genres::GenreRegistry;
use std::fs;
use std::path::Path;

/// Source text of one document, split the way the builders expect it
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
    lines: Vec<String>,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> OutlineResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| OutlineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_string(source))
    }

    /// Load from a string. `\r\n` and lone `\r` line endings become `\n`.
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        let source = normalize_newlines(source.into());
        let lines = source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        DocumentLoader { source, lines }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Non-empty lines, untrimmed
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Select a genre (by name when given, detected otherwise) and build the outline.
    pub fn outline(
        &self,
        registry: &GenreRegistry,
        detector: &Detector,
        genre: Option<&str>,
    ) -> OutlineResult<Outline> {
        let (descriptor, confidence) = detector.select(registry, genre, &self.source, &self.lines)?;
        let result = building::parse(&self.lines, descriptor);
        Ok(result.into_outline(descriptor.name(), confidence))
    }
}

/// Multi-line `$` in detection patterns only matches before `\n`.
fn normalize_newlines(source: String) -> String {
    if source.contains('\r') {
        source.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        source
    }
}
