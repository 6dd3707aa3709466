//! Error types for genre selection and document loading
//!
//! Parsing itself never fails: unknown headings degrade to content or to a structural default.
//! The errors here are caller and configuration mistakes that surface immediately.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlineError {
    /// Detection was requested but no genre is registered
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A genre requested by name is not registered
    #[error("genre '{name}' not found. Available genres: {}", available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// A caller supplied an out-of-range value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type OutlineResult<T> = Result<T, OutlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_available_genres() {
        let err = OutlineError::NotFound {
            name: "poster".to_string(),
            available: vec!["thesis".to_string(), "journal".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "genre 'poster' not found. Available genres: thesis, journal"
        );
    }

    #[test]
    fn invalid_argument_display() {
        let err = OutlineError::InvalidArgument("threshold must be within [0, 1]".into());
        assert_eq!(
            format!("{err}"),
            "invalid argument: threshold must be within [0, 1]"
        );
    }
}
