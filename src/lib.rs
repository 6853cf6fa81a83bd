//! Catalog-to-accessor compiler.
//!
//! The crate turns a flat namespace of aliased artifact coordinates
//! (libraries, versions, bundles, plugins) into a strongly-typed, navigable
//! accessor tree: aliases like `androidx-espresso-core` encode an implicit
//! hierarchy through their delimiters, and [`compile`] builds one trie per
//! catalog section, classifies every node as group, leaf, or both, assigns
//! collision-free accessor names, and emits the tree consumers navigate.
//! Actual coordinate resolution stays behind the [`Resolver`] trait; leaf
//! accessors call it lazily and memoize the handle.
//!
//! Construction is fail-fast: duplicate keys, unresolvable name collisions,
//! and reserved-name hits abort the whole load before any navigation is
//! possible. Resolver failures surface lazily, at the leaf access that hit
//! them.

use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod accessor;
pub mod catalog;
pub mod error;
pub mod names;
pub mod resolve;
pub mod trie;

pub use accessor::{AccessorNode, AccessorTree, LeafAccessor, emit};
pub use catalog::{
    Alias, AliasKind, CatalogEntry, Coordinate, RawKey, load_entries_from_path, split_key,
};
pub use error::{CatalogError, ResolveError};
pub use names::{RESERVED_NAMES, SELF_ACCESSOR, assign_names, canonical};
pub use resolve::{
    BundleHandle, Handle, LibraryHandle, PluginHandle, ProviderSlot, Resolver, VersionHandle,
};
pub use trie::{Classification, TrieNode, build_trie, classify};

/// Compile parsed catalog entries into the navigable accessor tree.
///
/// One-shot, single-threaded pipeline: ingest and split every entry, then
/// per catalog section build the trie, classify its nodes, assign accessor
/// names, and emit. Any construction-time error aborts the whole load; no
/// partial tree is ever returned.
pub fn compile(
    entries: impl IntoIterator<Item = CatalogEntry>,
    resolver: Arc<dyn Resolver>,
) -> Result<AccessorTree, CatalogError> {
    let mut by_kind: BTreeMap<AliasKind, Vec<Alias>> = BTreeMap::new();
    let mut total = 0usize;
    for entry in entries {
        let alias = Alias::from_entry(entry)?;
        by_kind.entry(alias.kind).or_default().push(alias);
        total += 1;
    }
    debug!("compiling catalog: {total} entries across {} sections", by_kind.len());

    let mut roots = BTreeMap::new();
    for kind in AliasKind::ALL {
        let aliases = by_kind.remove(&kind).unwrap_or_default();
        let mut root = build_trie(kind, aliases)?;
        classify(&mut root)?;
        assign_names(kind, &mut root)?;
        roots.insert(kind, emit(kind, root, &resolver)?);
    }
    AccessorTree::new(roots)
}
