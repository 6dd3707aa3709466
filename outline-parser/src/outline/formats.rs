//! Output formats for outlines
//!
//!     Every format implements [`Formatter`] and is looked up by name in a
//!     [`FormatRegistry`]. Built-in formats:
//!
//!         - markdown: the tree rendered back to headings and content
//!         - treeviz: one line per node with role icons
//!         - json, yaml: the full [`Outline`](crate::outline::Outline) through serde
//!         - metadata: `key: value` dump of the captured metadata

pub mod markdown;
pub mod metadata;
pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
