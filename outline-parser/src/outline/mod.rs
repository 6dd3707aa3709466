//! Main module for outline extraction

pub mod ast;
pub mod building;
pub mod detection;
pub mod error;
pub mod formats;
pub mod genres;
pub mod loader;
pub mod patterns;
pub mod query;
pub mod testing;

pub use ast::{Metadata, Node, Outline};
pub use building::{parse, ParseResult};
pub use detection::{Detection, DetectionScore, Detector, DEFAULT_CONFIDENCE_THRESHOLD};
pub use error::{OutlineError, OutlineResult};
pub use genres::{GenreDescriptor, GenreRegistry, ParseStrategy};
pub use loader::DocumentLoader;
pub use query::{find_nodes, get_section_content, NodeFilter, QueryMode};
