//! Outline data model
//!
//!     A parsed paper is a forest of [`Node`]s plus a [`Metadata`] map. Nodes own their
//!     children; nothing is shared. Levels come straight from the pattern table that
//!     classified the heading:
//!
//!         - `-1` marks a metadata-only role
//!         - `0` is a root that never nests
//!         - `1..` is nesting depth, 1 being the outermost heading
//!
//!     A child always has a strictly greater level than its parent. The builder's pop rule
//!     guarantees this, there is no separate validation pass.

mod node;

pub use node::{Metadata, Node, Outline};
