//! # Chunkstream Store
//!
//! Component storage for document reconstruction.
//!
//! ## Pipeline
//!
//! ```text
//! Component directory (one .txt file per component)
//!     │
//!     ├──> ComponentId (filename-derived, normalized)
//!     │
//!     └──> ComponentStore (read-only snapshot)
//!            └─> text lookups for the resolver
//! ```
//!
//! The store is populated once from a directory snapshot and is read-only
//! for the rest of a run. Component identifiers are a fixed grammar:
//! a three-letter type code, five digits, and an optional cosmetic suffix
//! that is discarded for resolution.
//!
//! Also hosts the listing cleaner, a preprocessing utility that extracts
//! generated component text from numbered COBOL compiler listings.

mod error;
mod id;
mod listing;
mod store;

pub use error::{Result, StoreError};
pub use id::{ComponentId, ComponentKind};
pub use listing::{clean_listing, clean_listing_lines};
pub use store::ComponentStore;
