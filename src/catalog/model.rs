//! Interchange model for parsed catalog entries.
//!
//! The surrounding build system parses whatever declarative file backs the
//! catalog; this crate only sees the flat `(kind, raw key, coordinate)`
//! records defined here. `Alias` is the compiler-facing form with the raw
//! key already split into hierarchy segments.

use crate::catalog::identity::{AliasKind, Coordinate, RawKey};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Hierarchy delimiters recognized inside a raw catalog key.
///
/// All three are equivalent: `androidx-espresso-core`, `androidx.espresso.core`
/// and `androidx_espresso_core` name the same path.
pub const KEY_DELIMITERS: [char; 3] = ['.', '-', '_'];

/// One parsed catalog declaration, as handed over by the catalog parser.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: AliasKind,
    pub raw_key: RawKey,
    pub coordinate: Coordinate,
    /// Version reference declared alongside the entry, when the catalog has
    /// one. Doubles as the collision discriminator during name assignment.
    #[serde(default)]
    pub version_ref: Option<String>,
}

/// A catalog entry with its key split into hierarchy segments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alias {
    pub kind: AliasKind,
    pub raw_key: RawKey,
    pub segments: Vec<String>,
    pub coordinate: Coordinate,
    pub version_ref: Option<String>,
}

impl CatalogEntry {
    pub fn new(kind: AliasKind, raw_key: &str, coordinate: &str) -> Self {
        CatalogEntry {
            kind,
            raw_key: RawKey(raw_key.to_string()),
            coordinate: Coordinate(coordinate.to_string()),
            version_ref: None,
        }
    }

    pub fn with_version_ref(mut self, version_ref: &str) -> Self {
        self.version_ref = Some(version_ref.to_string());
        self
    }
}

impl Alias {
    /// Split an entry's raw key into path segments.
    ///
    /// Splitting is case-preserving; path identity stays case-sensitive so
    /// that keys differing only in casing become distinct trie nodes (their
    /// accessor names collide later, which is the error the catalog author
    /// should see). Empty segments mean a malformed key and fail here.
    pub fn from_entry(entry: CatalogEntry) -> Result<Self, CatalogError> {
        let segments = split_key(entry.kind, &entry.raw_key)?;
        Ok(Alias {
            kind: entry.kind,
            raw_key: entry.raw_key,
            segments,
            coordinate: entry.coordinate,
            version_ref: entry.version_ref,
        })
    }

    /// Dotted display form of the alias path (`androidx.espresso.core`).
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

/// Split a raw key on the hierarchy delimiters, rejecting empty segments.
pub fn split_key(kind: AliasKind, raw_key: &RawKey) -> Result<Vec<String>, CatalogError> {
    let mut segments = Vec::new();
    for segment in raw_key.0.split(KEY_DELIMITERS) {
        // A segment with no alphanumeric content would normalize to an empty
        // accessor name later; reject it at ingestion.
        if !segment.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(CatalogError::EmptySegment {
                kind,
                raw_key: raw_key.clone(),
            });
        }
        segments.push(segment.to_string());
    }
    if segments.is_empty() {
        return Err(CatalogError::EmptySegment {
            kind,
            raw_key: raw_key.clone(),
        });
    }
    Ok(segments)
}

/// Read parsed catalog entries from a JSON interchange file.
///
/// The file holds a plain array of `CatalogEntry` records. This is not the
/// catalog format itself (parsing that is the caller's concern); it is the
/// handoff shape between the parser and this compiler.
pub fn load_entries_from_path(path: &Path) -> Result<Vec<CatalogEntry>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading catalog entries from {}", path.display()))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog entries from {}", path.display()))?;
    Ok(entries)
}
