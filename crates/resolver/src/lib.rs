//! # Chunkstream Resolver
//!
//! Reference resolution and hierarchical chunk materialization.
//!
//! ## Pipeline
//!
//! ```text
//! ComponentStore
//!     │
//!     ├──> Entry detection (entry-type ids nobody references)
//!     │
//!     ├──> Materializer (per entry, worklist-driven)
//!     │      ├─ Directive scan (USE <id>)
//!     │      ├─ Recursive inline expansion (per-chunk dedup)
//!     │      ├─ Nested entries split into sibling chunks
//!     │      └─ Call graph accumulation
//!     │
//!     ├──> ChunkWriter (one artifact per entry)
//!     │
//!     └──> Call-tree report (indented ASCII tree)
//! ```
//!
//! The materializer terminates on arbitrary reference graphs: a per-chunk
//! visited set breaks cycles, and a missing or unreadable component
//! degrades to an inline marker rather than aborting the build.

mod entries;
mod error;
mod graph;
mod materializer;
mod scanner;
mod tree;
mod writer;

pub use entries::detect_entries;
pub use error::{ResolverError, Result};
pub use graph::CallGraph;
pub use materializer::{Chunk, Materializer};
pub use scanner::{scan, ReferenceOccurrence};
pub use tree::{render_tree, write_tree_report};
pub use writer::ChunkWriter;
