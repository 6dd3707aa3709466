//! Curated sample papers
//!
//! One Markdown fixture per built-in genre lives in `tests/fixtures/<genre>.md`. Tests load
//! them by genre name so every test reads the same vetted documents.

use crate::outline::ast::Outline;
use crate::outline::detection::Detector;
use crate::outline::genres::GenreRegistry;
use crate::outline::loader::DocumentLoader;
use std::path::PathBuf;

/// Path of the fixture for `genre`
pub fn path(genre: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{genre}.md"))
}

/// Load the fixture for `genre`, panicking with the path when it is missing
pub fn load(genre: &str) -> DocumentLoader {
    let path = path(genre);
    DocumentLoader::from_path(&path)
        .unwrap_or_else(|e| panic!("fixture {} unavailable: {}", path.display(), e))
}

/// Outline of the fixture for `genre`, with the genre detected by the default registry
pub fn outline(genre: &str) -> Outline {
    load(genre)
        .outline(&GenreRegistry::with_defaults(), &Detector::new(), None)
        .unwrap_or_else(|e| panic!("fixture {genre} failed to outline: {e}"))
}
