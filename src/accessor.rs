//! Emitted accessor tree: the consumer-facing, navigable object graph.
//!
//! One accessor node per trie node, in the same shape. Emission is purely
//! structural (no resolver calls happen until a leaf accessor is invoked),
//! and the finished tree is immutable apart from the per-leaf cache slots,
//! so unsynchronized concurrent navigation is safe.

use crate::catalog::{Alias, AliasKind, KEY_DELIMITERS};
use crate::error::{CatalogError, ResolveError};
use crate::names::{SELF_ACCESSOR, canonical};
use crate::resolve::{Handle, ProviderSlot, Resolver, resolve_alias};
use crate::trie::{Classification, TrieNode};
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Resolvable end point bound to one catalog alias.
///
/// Owns its cache slot exclusively: repeated [`resolve`](Self::resolve)
/// calls invoke the external resolver at most once and return the identical
/// `Arc` every time.
pub struct LeafAccessor {
    alias: Alias,
    resolver: Arc<dyn Resolver>,
    slot: ProviderSlot,
}

impl LeafAccessor {
    fn new(alias: Alias, resolver: Arc<dyn Resolver>) -> Self {
        LeafAccessor {
            alias,
            resolver,
            slot: ProviderSlot::new(),
        }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Resolve this alias through the external service, memoized.
    pub fn resolve(&self) -> Result<Arc<Handle>, ResolveError> {
        self.slot
            .get_or_resolve(|| resolve_alias(self.resolver.as_ref(), &self.alias))
    }

    /// Human-readable summary for diagnostics: raw key, coordinate, and the
    /// version reference when the catalog declared one.
    pub fn describe(&self) -> String {
        match &self.alias.version_ref {
            Some(version_ref) => format!(
                "{} -> {} (version ref {version_ref})",
                self.alias.raw_key, self.alias.coordinate.0
            ),
            None => format!("{} -> {}", self.alias.raw_key, self.alias.coordinate.0),
        }
    }
}

impl fmt::Debug for LeafAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafAccessor")
            .field("alias", &self.alias.raw_key)
            .field("resolved", &self.slot.is_populated())
            .finish()
    }
}

/// Tagged node body: the three-way classification made exhaustive.
#[derive(Debug)]
enum NodeBody {
    Group {
        children: BTreeMap<String, AccessorNode>,
    },
    Leaf {
        leaf: LeafAccessor,
    },
    Both {
        leaf: LeafAccessor,
        children: BTreeMap<String, AccessorNode>,
    },
}

/// One node of the emitted tree, navigable by assigned accessor names.
#[derive(Debug)]
pub struct AccessorNode {
    name: String,
    kind: AliasKind,
    body: NodeBody,
}

impl AccessorNode {
    /// Assigned accessor name; empty on a per-kind root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AliasKind {
        self.kind
    }

    /// This node's own leaf, for `Leaf` and `Both` nodes.
    pub fn leaf(&self) -> Option<&LeafAccessor> {
        match &self.body {
            NodeBody::Leaf { leaf } | NodeBody::Both { leaf, .. } => Some(leaf),
            NodeBody::Group { .. } => None,
        }
    }

    /// True when deeper accessors hang off this node.
    pub fn is_group(&self) -> bool {
        matches!(
            &self.body,
            NodeBody::Group { .. } | NodeBody::Both { .. }
        )
    }

    /// Look up a child group/leaf by name.
    ///
    /// The query goes through the same normalization as name assignment, so
    /// `espresso-core`, `espressoCore` and `espressocore` all match.
    pub fn child(&self, name: &str) -> Option<&AccessorNode> {
        self.child_map()?.get(&canonical(name))
    }

    /// Children in accessor-name order.
    pub fn children(&self) -> impl Iterator<Item = &AccessorNode> {
        self.child_map().into_iter().flat_map(|map| map.values())
    }

    /// Follow a dotted accessor chain (`androidx.espresso.core`).
    ///
    /// The reserved segment `self` addresses a group-and-leaf node's own
    /// leaf position and is only valid as the final segment.
    pub fn at(&self, path: &str) -> Option<&AccessorNode> {
        let mut node = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segment == SELF_ACCESSOR {
                if segments.peek().is_some() || node.leaf().is_none() {
                    return None;
                }
                return Some(node);
            }
            node = node.child(segment)?;
        }
        Some(node)
    }

    fn child_map(&self) -> Option<&BTreeMap<String, AccessorNode>> {
        match &self.body {
            NodeBody::Group { children } | NodeBody::Both { children, .. } => Some(children),
            NodeBody::Leaf { .. } => None,
        }
    }

    fn find_by_raw_key(&self, raw_key: &str) -> Option<&LeafAccessor> {
        if let Some(leaf) = self.leaf() {
            if leaf.alias.raw_key.0 == raw_key {
                return Some(leaf);
            }
        }
        self.children()
            .find_map(|child| child.find_by_raw_key(raw_key))
    }

    fn inspect_into(&self, path: &str, lines: &mut Vec<String>) {
        let role = match &self.body {
            NodeBody::Group { .. } => "group",
            NodeBody::Leaf { .. } => "leaf",
            NodeBody::Both { .. } => "group+leaf",
        };
        if !self.name.is_empty() {
            lines.push(format!("{} {path} [{role}]", self.kind));
        }
        for child in self.children() {
            let child_path = if path.is_empty() {
                child.name.clone()
            } else {
                format!("{path}.{}", child.name)
            };
            child.inspect_into(&child_path, lines);
        }
    }
}

/// The compiled catalog: one navigable root per catalog section.
///
/// Built once at catalog-load time, then read-only; intended to be owned by
/// whatever build logic needs it and shared by reference from there.
#[derive(Debug)]
pub struct AccessorTree {
    libraries: AccessorNode,
    versions: AccessorNode,
    bundles: AccessorNode,
    plugins: AccessorNode,
}

impl AccessorTree {
    pub(crate) fn new(mut roots: BTreeMap<AliasKind, AccessorNode>) -> Result<Self, CatalogError> {
        let mut take = |kind: AliasKind| {
            roots
                .remove(&kind)
                .ok_or_else(|| CatalogError::Internal(format!("missing {kind} root")))
        };
        Ok(AccessorTree {
            libraries: take(AliasKind::Library)?,
            versions: take(AliasKind::Version)?,
            bundles: take(AliasKind::Bundle)?,
            plugins: take(AliasKind::Plugin)?,
        })
    }

    pub fn libraries(&self) -> &AccessorNode {
        &self.libraries
    }

    pub fn versions(&self) -> &AccessorNode {
        &self.versions
    }

    pub fn bundles(&self) -> &AccessorNode {
        &self.bundles
    }

    pub fn plugins(&self) -> &AccessorNode {
        &self.plugins
    }

    pub fn root(&self, kind: AliasKind) -> &AccessorNode {
        match kind {
            AliasKind::Library => &self.libraries,
            AliasKind::Version => &self.versions,
            AliasKind::Bundle => &self.bundles,
            AliasKind::Plugin => &self.plugins,
        }
    }

    /// Find the leaf bound to a declared raw key, regardless of how
    /// collisions renamed its accessor. Debug/audit helper; navigation
    /// through [`AccessorNode::at`] is the consumer path.
    pub fn find(&self, kind: AliasKind, raw_key: &str) -> Option<&LeafAccessor> {
        self.root(kind).find_by_raw_key(raw_key)
    }

    /// Navigate to a leaf by the accessor chain implied by a raw key.
    pub fn leaf_at(&self, kind: AliasKind, raw_key: &str) -> Option<&LeafAccessor> {
        let mut node = self.root(kind);
        for segment in raw_key.split(KEY_DELIMITERS) {
            node = node.child(segment)?;
        }
        node.leaf()
    }

    /// Stable, line-per-node dump of the compiled namespace.
    pub fn inspect(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for kind in AliasKind::ALL {
            self.root(kind).inspect_into("", &mut lines);
        }
        lines
    }
}

/// Emit the accessor node for a classified, named trie.
///
/// Consumes the trie: each alias moves into its leaf accessor together with
/// a fresh, empty cache slot sharing the injected resolver.
pub fn emit(
    kind: AliasKind,
    node: TrieNode,
    resolver: &Arc<dyn Resolver>,
) -> Result<AccessorNode, CatalogError> {
    let classification = node.classification.ok_or_else(|| {
        CatalogError::Internal(format!("unclassified {kind} node '{}'", node.segment))
    })?;

    let mut children = BTreeMap::new();
    for (_, child) in node.children {
        let emitted = emit(kind, child, resolver)?;
        children.insert(emitted.name.clone(), emitted);
    }
    let leaf = node
        .alias
        .map(|alias| LeafAccessor::new(alias, Arc::clone(resolver)));

    let body = match (classification, leaf) {
        (Classification::GroupOnly, None) => NodeBody::Group { children },
        (Classification::LeafOnly, Some(leaf)) => NodeBody::Leaf { leaf },
        (Classification::GroupAndLeaf, Some(leaf)) => NodeBody::Both { leaf, children },
        (classification, _) => {
            return Err(CatalogError::Internal(format!(
                "{kind} node '{}' classified {classification:?} but alias presence disagrees",
                node.segment
            )));
        }
    };

    if node.segment.is_empty() {
        debug!("emitted {kind} accessor root");
    }
    Ok(AccessorNode {
        name: node.accessor_name,
        kind,
        body,
    })
}
