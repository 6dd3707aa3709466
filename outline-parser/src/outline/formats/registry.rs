//! Output formats keyed by name
//!
//!     An [`Outline`] can leave the crate as Markdown, a tree sketch, serde documents or a
//!     metadata dump. Each rendition is a [`Formatter`]; the CLI resolves `--format` through
//!     a [`FormatRegistry`] so that unknown names fail before any paper is read.

use crate::outline::ast::Outline;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    /// The outline could not be encoded (serde failures)
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// One textual rendition of an outline
pub trait Formatter: Send + Sync {
    /// Name accepted by `--format` and the `output.format` setting
    fn name(&self) -> &str;

    /// One line shown by `--list-formats`
    fn description(&self) -> &str {
        ""
    }

    fn serialize(&self, outline: &Outline) -> Result<String, FormatError>;
}

/// Formatters by name, iterated in name order.
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Every built-in rendition: markdown, treeviz, json, yaml, metadata
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::markdown::MarkdownFormatter);
        registry.register(super::treeviz::TreevizFormatter);
        registry.register(super::serialized::JsonFormatter);
        registry.register(super::serialized::YamlFormatter);
        registry.register(super::metadata::MetadataFormatter);
        registry
    }

    /// A later formatter with the same name replaces the earlier one.
    pub fn register<F: Formatter + 'static>(&mut self, format: F) {
        self.formats.insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    pub fn serialize(&self, outline: &Outline, format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(outline)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::ast::{Metadata, Node};

    /// Prints the number of roots, enough to tell formatters apart
    struct RootCount;

    impl Formatter for RootCount {
        fn name(&self) -> &str {
            "roots"
        }

        fn serialize(&self, outline: &Outline) -> Result<String, FormatError> {
            Ok(format!("{} roots\n", outline.tree.len()))
        }
    }

    fn journal_outline() -> Outline {
        Outline {
            genre: "journal".into(),
            confidence: None,
            metadata: Metadata::new(),
            tree: vec![
                Node::from_heading(1, Some("introduction"), "# I. INTRODUCTION", 0),
                Node::from_heading(1, Some("references"), "# REFERENCES", 4),
            ],
        }
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
        assert!(!registry.has("markdown"));
    }

    #[test]
    fn custom_formatter_is_used_by_name() {
        let mut registry = FormatRegistry::new();
        registry.register(RootCount);

        assert!(registry.has("roots"));
        assert_eq!(registry.get("roots").map(|f| f.description()), Ok(""));
        assert_eq!(
            registry.serialize(&journal_outline(), "roots"),
            Ok("2 roots\n".to_string())
        );
    }

    #[test]
    fn unknown_format_names_the_request() {
        let registry = FormatRegistry::with_defaults();

        let err = registry.serialize(&journal_outline(), "pdf").unwrap_err();
        assert_eq!(err, FormatError::FormatNotFound("pdf".into()));
        assert_eq!(err.to_string(), "Format 'pdf' not found");
    }

    #[test]
    fn defaults_are_listed_in_name_order() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "markdown", "metadata", "treeviz", "yaml"]
        );
        for name in registry.list_formats() {
            let format = registry.get(&name).unwrap();
            assert!(!format.description().is_empty(), "{name} has no description");
        }
    }
}
