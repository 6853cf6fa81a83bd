//! Catalog entry model and identifiers.
//!
//! Types here mirror the parsed-catalog handoff: the surrounding build
//! system parses the declarative catalog file and supplies flat
//! `CatalogEntry` records; this module gives them stable identities and the
//! split-path `Alias` form the trie builder consumes.

pub mod identity;
pub mod model;

pub use identity::{AliasKind, Coordinate, RawKey};
pub use model::{Alias, CatalogEntry, KEY_DELIMITERS, load_entries_from_path, split_key};
