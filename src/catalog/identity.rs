use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Raw catalog key exactly as declared (e.g. `androidx-espresso-core`).
///
/// Stored on every alias so leaf accessors can call back into the external
/// resolver with the key the catalog author wrote, and used verbatim as the
/// provider-cache key.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawKey(pub String);

/// Opaque external coordinate attached to an alias.
///
/// `group:artifact` for libraries, a plugin id for plugins, a version string
/// or constraint for versions. The compiler never interprets it; it only
/// carries it through to the resolved handle.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate(pub String);

/// Catalog section an alias was declared in.
///
/// Parsing is strict: an entry of unknown kind cannot be compiled into the
/// accessor tree, so there is no forward-compatible `Other` variant here.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AliasKind {
    Library,
    Version,
    Bundle,
    Plugin,
}

impl AliasKind {
    pub const ALL: [AliasKind; 4] = [
        AliasKind::Library,
        AliasKind::Version,
        AliasKind::Bundle,
        AliasKind::Plugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AliasKind::Library => "library",
            AliasKind::Version => "version",
            AliasKind::Bundle => "bundle",
            AliasKind::Plugin => "plugin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "library" => Some(AliasKind::Library),
            "version" => Some(AliasKind::Version),
            "bundle" => Some(AliasKind::Bundle),
            "plugin" => Some(AliasKind::Plugin),
            _ => None,
        }
    }
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AliasKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AliasKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        AliasKind::parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown alias kind '{value}'")))
    }
}
