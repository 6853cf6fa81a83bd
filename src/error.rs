//! Error taxonomy for catalog compilation and leaf resolution.
//!
//! Construction-time errors ([`CatalogError`]) abort the whole catalog load:
//! a tree with silently dropped or misnamed nodes is worse than a failed
//! build. Resolution-time errors ([`ResolveError`]) are local to the single
//! leaf access that triggered them and never corrupt the cache or the tree.

use crate::catalog::{AliasKind, RawKey};
use thiserror::Error;

/// Fatal problems detected while compiling a catalog into an accessor tree.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two catalog entries normalize to the identical path.
    #[error("duplicate {kind} alias '{raw_key}': key already declared")]
    DuplicateAlias { kind: AliasKind, raw_key: RawKey },

    /// Sibling accessor names collide and no discriminator separates them.
    #[error("{kind} aliases under '{path}' collide on accessor name '{name}' with no discriminator")]
    UnresolvableCollision {
        kind: AliasKind,
        path: String,
        name: String,
    },

    /// A catalog key normalizes to a reserved structural identifier.
    #[error("{kind} alias '{path}' maps to reserved accessor name '{name}'")]
    ReservedName {
        kind: AliasKind,
        path: String,
        name: String,
    },

    /// A catalog key contains an empty hierarchy segment.
    #[error("{kind} alias '{raw_key}' contains an empty segment")]
    EmptySegment { kind: AliasKind, raw_key: RawKey },

    /// A trie invariant was violated. Indicates a builder bug, not a
    /// catalog-authoring error; never catch-and-continue.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Failures surfaced at leaf-access time by the external resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver has no entry for the requested key.
    #[error("no {kind} entry found for key '{raw_key}'")]
    NotFound { kind: AliasKind, raw_key: RawKey },

    /// The resolver itself failed while looking up the key.
    #[error("resolver failed for '{raw_key}': {message}")]
    Failed { raw_key: RawKey, message: String },
}
