//! Alias trie construction and node classification.
//!
//! One trie per catalog section: each alias path is walked segment by
//! segment, creating intermediate nodes for every prefix and attaching the
//! alias at the terminal node. Classification then marks every node as a
//! pure group, a pure leaf, or both. The both case covers an artifact whose
//! key is itself a prefix of deeper artifacts (`a` alongside `a.b`), which
//! real catalogs produce routinely and which must stay navigable, not error.

use crate::catalog::{Alias, AliasKind};
use crate::error::CatalogError;
use log::debug;
use std::collections::BTreeMap;

/// Three-way role of a trie node, derived after construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classification {
    GroupOnly,
    LeafOnly,
    GroupAndLeaf,
}

/// One node of a per-kind alias trie. Owned exclusively by its parent.
#[derive(Debug)]
pub struct TrieNode {
    /// Raw path segment, case-preserved. Empty on the root.
    pub segment: String,
    /// Children keyed by raw segment. The map gives deterministic walks;
    /// `order` preserves catalog declaration order where tie-breaks need it.
    pub children: BTreeMap<String, TrieNode>,
    /// Present iff some catalog entry terminates exactly at this node.
    pub alias: Option<Alias>,
    /// Set by `classify`; `None` until that pass runs.
    pub classification: Option<Classification>,
    /// Set by the disambiguator; empty until assigned.
    pub accessor_name: String,
    /// Insertion stamp: the index of the first alias that created this node.
    pub order: u64,
}

impl TrieNode {
    fn new(segment: &str, order: u64) -> Self {
        TrieNode {
            segment: segment.to_string(),
            children: BTreeMap::new(),
            alias: None,
            classification: None,
            accessor_name: String::new(),
            order,
        }
    }

    /// True for a root created with no aliases at all (an empty catalog
    /// section, e.g. a catalog with no bundles).
    pub fn is_empty_root(&self) -> bool {
        self.segment.is_empty() && self.children.is_empty() && self.alias.is_none()
    }
}

/// Build the trie for one catalog section.
///
/// Fails with `DuplicateAlias` when two aliases terminate at the same node:
/// the keys normalize to the identical path (delimiters are equivalent, so
/// `espresso-core` and `espresso.core` collide here) and overwriting one
/// silently would drop a declared entry.
pub fn build_trie(kind: AliasKind, aliases: Vec<Alias>) -> Result<TrieNode, CatalogError> {
    let mut root = TrieNode::new("", 0);
    for (stamp, alias) in aliases.into_iter().enumerate() {
        debug_assert_eq!(alias.kind, kind);
        let stamp = stamp as u64 + 1;
        let mut node = &mut root;
        for segment in &alias.segments {
            node = node
                .children
                .entry(segment.clone())
                .or_insert_with(|| TrieNode::new(segment, stamp));
        }
        if node.alias.is_some() {
            return Err(CatalogError::DuplicateAlias {
                kind,
                raw_key: alias.raw_key,
            });
        }
        node.alias = Some(alias);
    }
    debug!("built {kind} trie: {} top-level groups", root.children.len());
    Ok(root)
}

/// Classify every node in a single pass.
///
/// A childless node without an alias cannot occur (construction never
/// leaves dead ends), so observing one is an internal invariant violation,
/// not a catalog-authoring error. The root of an empty section is the one
/// legitimate childless, alias-less node and classifies as a group.
pub fn classify(root: &mut TrieNode) -> Result<(), CatalogError> {
    if root.is_empty_root() {
        root.classification = Some(Classification::GroupOnly);
        return Ok(());
    }
    classify_node(root, "")
}

fn classify_node(node: &mut TrieNode, parent_path: &str) -> Result<(), CatalogError> {
    let path = join_path(parent_path, &node.segment);
    node.classification = Some(match (node.alias.is_some(), node.children.is_empty()) {
        (true, true) => Classification::LeafOnly,
        (false, false) => Classification::GroupOnly,
        (true, false) => Classification::GroupAndLeaf,
        (false, true) => {
            return Err(CatalogError::Internal(format!(
                "dead-end trie node at '{path}': no children and no alias"
            )));
        }
    });
    for child in node.children.values_mut() {
        classify_node(child, &path)?;
    }
    Ok(())
}

pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        parent.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}
