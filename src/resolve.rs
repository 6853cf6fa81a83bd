//! External resolver boundary and the per-leaf provider cache.
//!
//! Coordinate resolution against repositories is out of scope for this
//! crate; everything behind the [`Resolver`] trait is an external service.
//! The cache guarantees that navigating to the same leaf repeatedly invokes
//! that service at most once and always hands back the identical handle.

use crate::catalog::{Alias, AliasKind, Coordinate, RawKey};
use crate::error::ResolveError;
use std::sync::{Arc, Mutex};

/// Resolved library dependency (`group:artifact` plus the key it came from).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LibraryHandle {
    pub raw_key: RawKey,
    pub coordinate: Coordinate,
}

/// Resolved version constraint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionHandle {
    pub raw_key: RawKey,
    pub version: String,
}

/// Resolved plugin reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PluginHandle {
    pub raw_key: RawKey,
    pub plugin_id: String,
}

/// Resolved bundle: the member coordinates it expands to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleHandle {
    pub raw_key: RawKey,
    pub members: Vec<Coordinate>,
}

/// Any resolved catalog entry, as stored in the provider cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Handle {
    Library(LibraryHandle),
    Version(VersionHandle),
    Plugin(PluginHandle),
    Bundle(BundleHandle),
}

impl Handle {
    pub fn kind(&self) -> AliasKind {
        match self {
            Handle::Library(_) => AliasKind::Library,
            Handle::Version(_) => AliasKind::Version,
            Handle::Plugin(_) => AliasKind::Plugin,
            Handle::Bundle(_) => AliasKind::Bundle,
        }
    }

    pub fn raw_key(&self) -> &RawKey {
        match self {
            Handle::Library(handle) => &handle.raw_key,
            Handle::Version(handle) => &handle.raw_key,
            Handle::Plugin(handle) => &handle.raw_key,
            Handle::Bundle(handle) => &handle.raw_key,
        }
    }
}

/// External resolution service supplied by the surrounding build system.
///
/// Calls are assumed local and fast (configuration lookups). Implementations
/// must be shareable across threads; the accessor tree navigates
/// concurrently after construction.
pub trait Resolver: Send + Sync {
    fn resolve_library(&self, raw_key: &RawKey) -> Result<LibraryHandle, ResolveError>;
    fn resolve_version(&self, raw_key: &RawKey) -> Result<VersionHandle, ResolveError>;
    fn resolve_plugin(&self, raw_key: &RawKey) -> Result<PluginHandle, ResolveError>;
    fn resolve_bundle(&self, raw_key: &RawKey) -> Result<BundleHandle, ResolveError>;
}

/// Dispatch an alias to the resolver primitive matching its kind.
pub fn resolve_alias(resolver: &dyn Resolver, alias: &Alias) -> Result<Handle, ResolveError> {
    match alias.kind {
        AliasKind::Library => resolver.resolve_library(&alias.raw_key).map(Handle::Library),
        AliasKind::Version => resolver.resolve_version(&alias.raw_key).map(Handle::Version),
        AliasKind::Plugin => resolver.resolve_plugin(&alias.raw_key).map(Handle::Plugin),
        AliasKind::Bundle => resolver.resolve_bundle(&alias.raw_key).map(Handle::Bundle),
    }
}

/// Write-once cache slot owned by a single leaf accessor.
///
/// Holding the slot lock across the resolver call gives at-most-once
/// invocation under concurrent first access: losers block on the lock, then
/// observe the stored handle. A failed resolution leaves the slot empty, so
/// the error stays local to the access that hit it and a later access may
/// retry.
#[derive(Debug, Default)]
pub struct ProviderSlot {
    cell: Mutex<Option<Arc<Handle>>>,
}

impl ProviderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached handle, resolving it first if the slot is empty.
    pub fn get_or_resolve<F>(&self, resolve: F) -> Result<Arc<Handle>, ResolveError>
    where
        F: FnOnce() -> Result<Handle, ResolveError>,
    {
        let mut slot = self.cell.lock().unwrap_or_else(|err| err.into_inner());
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new(resolve()?);
        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// True once a handle has been resolved and stored.
    pub fn is_populated(&self) -> bool {
        self.cell
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .is_some()
    }
}
