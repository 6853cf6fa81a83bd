//! Accessor-name assignment and collision disambiguation.
//!
//! Aliases cannot be renamed, so every path segment must map onto a safe,
//! unique accessor name among its siblings. Comparison is aggressive on
//! purpose: case-insensitive, separator-blind, and blind to one trailing
//! `version` qualifier. The collisions real catalogs produce (`espressoCore`
//! vs `espressoCoreVersion`, `Foo` vs `foo`) all surface here, and the ones
//! with no discriminator left must fail the whole load rather than shadow an
//! entry silently.

use crate::catalog::AliasKind;
use crate::error::CatalogError;
use crate::trie::{TrieNode, join_path};
use std::collections::{BTreeMap, BTreeSet};

/// Fixed accessor under which a group-and-leaf node exposes its own leaf.
pub const SELF_ACCESSOR: &str = "self";

/// Structural identifiers no catalog key may claim.
pub const RESERVED_NAMES: [&str; 2] = [SELF_ACCESSOR, "provider"];

/// Trailing qualifier stripped when comparing sibling names.
const VERSION_QUALIFIER: &str = "version";

/// Canonical accessor form of a raw segment: ASCII alphanumerics only,
/// lowercased. Lookups on the emitted tree use the same transform, so
/// callers may navigate with any casing or separator style.
pub fn canonical(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Collision key: the canonical form with one trailing `version` qualifier
/// removed. `espressocore` and `espressocoreversion` meet on this key.
fn collision_key(canonical: &str) -> &str {
    match canonical.strip_suffix(VERSION_QUALIFIER) {
        Some(stem) if !stem.is_empty() => stem,
        _ => canonical,
    }
}

/// Assign accessor names to every node below `root`, depth-first with
/// siblings processed together.
///
/// Within a sibling set, names colliding on the collision key are resolved
/// deterministically: the segment carrying no trailing qualifier wins the
/// unqualified name (declaration order breaks ties), and every loser must be
/// separated by a discriminator: the stripped qualifier, or the alias's
/// declared version reference. A loser with no discriminator, a suffixed
/// name that still collides, or a name landing on a reserved identifier
/// fails the load.
pub fn assign_names(kind: AliasKind, root: &mut TrieNode) -> Result<(), CatalogError> {
    assign_children(kind, root, "")
}

struct Candidate {
    /// Index into the insertion-ordered sibling list.
    position: usize,
    canonical: String,
    qualified: bool,
    discriminator: Option<String>,
}

fn assign_children(kind: AliasKind, node: &mut TrieNode, path: &str) -> Result<(), CatalogError> {
    let mut ordered: Vec<&mut TrieNode> = node.children.values_mut().collect();
    ordered.sort_by_key(|child| child.order);

    // First pass: collect plain data so assignment below can mutate freely.
    let mut groups: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
    for (position, child) in ordered.iter().enumerate() {
        let canon = canonical(&child.segment);
        let key = collision_key(&canon).to_string();
        let qualified = key != canon;
        let discriminator = child
            .alias
            .as_ref()
            .and_then(|alias| alias.version_ref.as_deref())
            .map(canonical)
            .filter(|d| !d.is_empty());
        groups.entry(key).or_default().push(Candidate {
            position,
            canonical: canon,
            qualified,
            discriminator,
        });
    }

    let mut assigned: Vec<Option<String>> = vec![None; ordered.len()];
    for (key, candidates) in &groups {
        if let [only] = candidates.as_slice() {
            assigned[only.position] = Some(only.canonical.clone());
            continue;
        }
        // Only an unqualified segment may claim the bare collision key;
        // candidates arrive in declaration order, so the first match is the
        // stable winner. With no unqualified candidate there is no winner:
        // every qualified sibling keeps its canonical name, and the ones
        // that still coincide must be separated by a discriminator.
        let winner = candidates.iter().position(|c| !c.qualified);
        let mut group_taken = BTreeSet::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let base = if winner == Some(index) {
                key.clone()
            } else {
                candidate.canonical.clone()
            };
            let name = if !group_taken.contains(&base) {
                base
            } else if let Some(discriminator) = &candidate.discriminator {
                format!("{}{discriminator}", candidate.canonical)
            } else {
                let child = &ordered[candidate.position];
                return Err(CatalogError::UnresolvableCollision {
                    kind,
                    path: join_path(path, &child.segment),
                    name: candidate.canonical.clone(),
                });
            };
            group_taken.insert(name.clone());
            assigned[candidate.position] = Some(name);
        }
    }

    // Discriminator suffixes may themselves land on another sibling's name.
    let mut seen = BTreeSet::new();
    for (position, name) in assigned.iter().enumerate() {
        let name = name
            .as_deref()
            .ok_or_else(|| CatalogError::Internal("sibling left unnamed".to_string()))?;
        let child_path = join_path(path, &ordered[position].segment);
        if RESERVED_NAMES.contains(&name) {
            return Err(CatalogError::ReservedName {
                kind,
                path: child_path,
                name: name.to_string(),
            });
        }
        if !seen.insert(name.to_string()) {
            return Err(CatalogError::UnresolvableCollision {
                kind,
                path: child_path,
                name: name.to_string(),
            });
        }
        ordered[position].accessor_name = name.to_string();
    }
    drop(ordered);

    for child in node.children.values_mut() {
        let child_path = join_path(path, &child.segment);
        assign_children(kind, child, &child_path)?;
    }
    Ok(())
}
