use catnav::{
    AliasKind, BundleHandle, CatalogEntry, Coordinate, LibraryHandle, PluginHandle, RawKey,
    ResolveError, Resolver, VersionHandle,
};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted in-memory resolver.
///
/// Seeded from the same catalog entries handed to `compile`, it answers
/// lookups from maps, counts every invocation per raw key, and can stall
/// inside the call to widen race windows in the concurrency tests.
#[derive(Debug)]
pub struct FakeResolver {
    libraries: BTreeMap<String, String>,
    versions: BTreeMap<String, String>,
    plugins: BTreeMap<String, String>,
    bundles: BTreeMap<String, Vec<String>>,
    calls: Mutex<BTreeMap<String, usize>>,
    delay: Option<Duration>,
}

impl FakeResolver {
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut resolver = FakeResolver {
            libraries: BTreeMap::new(),
            versions: BTreeMap::new(),
            plugins: BTreeMap::new(),
            bundles: BTreeMap::new(),
            calls: Mutex::new(BTreeMap::new()),
            delay: None,
        };
        for entry in entries {
            let key = entry.raw_key.0.clone();
            let coordinate = entry.coordinate.0.clone();
            match entry.kind {
                AliasKind::Library => {
                    resolver.libraries.insert(key, coordinate);
                }
                AliasKind::Version => {
                    resolver.versions.insert(key, coordinate);
                }
                AliasKind::Plugin => {
                    resolver.plugins.insert(key, coordinate);
                }
                AliasKind::Bundle => {
                    // Bundle coordinates arrive as a comma-joined member list.
                    let members = coordinate.split(',').map(str::to_string).collect();
                    resolver.bundles.insert(key, members);
                }
            }
        }
        resolver
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times any primitive was invoked for `raw_key`.
    pub fn calls_for(&self, raw_key: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .get(raw_key)
            .copied()
            .unwrap_or(0)
    }

    fn record(&self, raw_key: &RawKey) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let mut calls = self.calls.lock().unwrap_or_else(|err| err.into_inner());
        *calls.entry(raw_key.0.clone()).or_insert(0) += 1;
    }

    fn missing(&self, kind: AliasKind, raw_key: &RawKey) -> ResolveError {
        ResolveError::NotFound {
            kind,
            raw_key: raw_key.clone(),
        }
    }
}

impl Resolver for FakeResolver {
    fn resolve_library(&self, raw_key: &RawKey) -> Result<LibraryHandle, ResolveError> {
        self.record(raw_key);
        let coordinate = self
            .libraries
            .get(&raw_key.0)
            .ok_or_else(|| self.missing(AliasKind::Library, raw_key))?;
        Ok(LibraryHandle {
            raw_key: raw_key.clone(),
            coordinate: Coordinate(coordinate.clone()),
        })
    }

    fn resolve_version(&self, raw_key: &RawKey) -> Result<VersionHandle, ResolveError> {
        self.record(raw_key);
        let version = self
            .versions
            .get(&raw_key.0)
            .ok_or_else(|| self.missing(AliasKind::Version, raw_key))?;
        Ok(VersionHandle {
            raw_key: raw_key.clone(),
            version: version.clone(),
        })
    }

    fn resolve_plugin(&self, raw_key: &RawKey) -> Result<PluginHandle, ResolveError> {
        self.record(raw_key);
        let plugin_id = self
            .plugins
            .get(&raw_key.0)
            .ok_or_else(|| self.missing(AliasKind::Plugin, raw_key))?;
        Ok(PluginHandle {
            raw_key: raw_key.clone(),
            plugin_id: plugin_id.clone(),
        })
    }

    fn resolve_bundle(&self, raw_key: &RawKey) -> Result<BundleHandle, ResolveError> {
        self.record(raw_key);
        let members = self
            .bundles
            .get(&raw_key.0)
            .ok_or_else(|| self.missing(AliasKind::Bundle, raw_key))?;
        Ok(BundleHandle {
            raw_key: raw_key.clone(),
            members: members.iter().map(|m| Coordinate(m.clone())).collect(),
        })
    }
}

/// A realistic multi-section catalog modeled on an Android project.
pub fn android_fixture() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(AliasKind::Library, "androidx-core-ktx", "androidx.core:core-ktx")
            .with_version_ref("coreKtx"),
        CatalogEntry::new(
            AliasKind::Library,
            "androidx-compose-bom",
            "androidx.compose:compose-bom",
        )
        .with_version_ref("composeBom"),
        CatalogEntry::new(
            AliasKind::Library,
            "androidx-espresso-core",
            "androidx.test.espresso:espresso-core",
        )
        .with_version_ref("espressoCore"),
        CatalogEntry::new(
            AliasKind::Library,
            "androidx-espresso-core-v351",
            "androidx.test.espresso:espresso-core",
        )
        .with_version_ref("espressoCoreVersion"),
        CatalogEntry::new(AliasKind::Library, "material", "com.google.android.material:material")
            .with_version_ref("material"),
        CatalogEntry::new(AliasKind::Version, "coreKtx", "1.13.1"),
        CatalogEntry::new(AliasKind::Version, "composeBom", "2024.04.01"),
        CatalogEntry::new(AliasKind::Version, "espressoCore", "3.6.0"),
        CatalogEntry::new(AliasKind::Version, "espressoCoreVersion", "3.5.1"),
        CatalogEntry::new(AliasKind::Version, "material", "1.12.0"),
        CatalogEntry::new(
            AliasKind::Bundle,
            "compose-ui",
            "androidx.compose.ui:ui,androidx.compose.ui:ui-graphics",
        ),
        CatalogEntry::new(AliasKind::Plugin, "android-application", "com.android.application")
            .with_version_ref("agp"),
        CatalogEntry::new(
            AliasKind::Plugin,
            "jetbrains-kotlin-android",
            "org.jetbrains.kotlin.android",
        )
        .with_version_ref("kotlin"),
    ]
}
