//! # outline-parser
//!
//! Extracts a hierarchical outline (chapters, sections, front and trailing matter) from
//! Markdown renditions of academic papers.
//!
//! File Layout
//!
//!     Papers come in genres (doctoral theses, conference papers, IEEE journal articles) and
//!     every genre spells its headings differently. The layout follows the flow of a document
//!     through the crate:
//!
//!     src/outline
//!       ├── patterns    Ordered heading tables and the first-match classifier
//!       ├── genres      Genre descriptors and the registry that owns them
//!       ├── detection   Confidence scoring and genre selection
//!       ├── building    Stack-based tree building, generic and staged per genre
//!       ├── query       Node filters and section extraction
//!       ├── formats     Markdown / treeviz / json / yaml serializers
//!       ├── loader      Reads a file and drives detection plus building
//!       └── testing     Fixtures and fluent tree assertions
//!
//! For testing guidelines see the [testing module](outline::testing).

pub mod outline;
