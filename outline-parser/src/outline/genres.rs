//! Document genres
//!
//!     Every genre is a [`GenreDescriptor`]. The built-in ones are:
//!
//!         - [`thesis`]: Chinese doctoral theses
//!         - [`conference`]: conference papers
//!         - [`journal`]: IEEE-style journal articles
//!
//!     [`GenreRegistry::with_defaults`] registers them in that order. Registration order is
//!     the tie-break for detection, so it matters.

pub mod conference;
mod descriptor;
pub mod journal;
mod registry;
pub mod thesis;

pub use descriptor::{
    DetectionFeatures, GenreDescriptor, ParseStrategy, WeightedHeuristic, WeightedPattern,
};
pub use registry::GenreRegistry;
