//! Genre registry
//!
//! Holds the descriptors the detection engine may choose from. Unlike a name-keyed map the
//! registry keeps registration order, which breaks detection ties.

use super::descriptor::GenreDescriptor;
use super::{conference, journal, thesis};
use crate::outline::error::{OutlineError, OutlineResult};

#[derive(Debug, Clone, Default)]
pub struct GenreRegistry {
    genres: Vec<GenreDescriptor>,
}

impl GenreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { genres: Vec::new() }
    }

    /// Registry with the built-in genres: thesis, conference, journal
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(thesis::descriptor());
        registry.register(conference::descriptor());
        registry.register(journal::descriptor());
        registry
    }

    /// Register a genre.
    ///
    /// Returns `false` and leaves the registry untouched when a genre with the same name is
    /// already registered.
    pub fn register(&mut self, genre: GenreDescriptor) -> bool {
        if self.has(genre.name()) {
            return false;
        }
        self.genres.push(genre);
        true
    }

    /// Remove a genre by exact name
    pub fn unregister(&mut self, name: &str) -> Option<GenreDescriptor> {
        let index = self.genres.iter().position(|g| g.name() == name)?;
        Some(self.genres.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&GenreDescriptor> {
        self.genres.iter().find(|g| g.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look a genre up by a user-facing name (case-insensitive, legacy suffixes allowed)
    pub fn find(&self, query: &str) -> OutlineResult<&GenreDescriptor> {
        self.genres
            .iter()
            .find(|g| g.matches_name(query))
            .ok_or_else(|| OutlineError::NotFound {
                name: query.to_string(),
                available: self.names(),
            })
    }

    /// Registered genres in registration order
    pub fn list(&self) -> &[GenreDescriptor] {
        &self.genres
    }

    pub fn names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}
