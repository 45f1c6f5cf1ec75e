// Repository address.
// Composite key identifying a repository within the workspace.

use std::cmp::Ordering;
use std::fmt;

/// Separator used in the canonical string form `repository@location`.
const ADDRESS_SEPARATOR: char = '@';

/// A repository name paired with the name of the location hosting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoAddress {
    pub name: String,
    pub location: String,
}

impl RepoAddress {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Canonical key used for visibility matching and persistence.
    pub fn as_key(&self) -> String {
        format!("{}{}{}", self.name, ADDRESS_SEPARATOR, self.location)
    }

    /// Parse a key produced by [`RepoAddress::as_key`].
    ///
    /// Repository names cannot contain `@`, so the first separator splits the key.
    pub fn from_key(key: &str) -> Option<Self> {
        let (name, location) = key.split_once(ADDRESS_SEPARATOR)?;
        if name.is_empty() || location.is_empty() {
            return None;
        }
        Some(Self::new(name, location))
    }

    /// Display ordering: location first, then repository, ignoring case.
    /// Falls back to exact comparison so distinct addresses never tie.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.location
            .to_lowercase()
            .cmp(&other.location.to_lowercase())
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
            .then_with(|| self.location.cmp(&other.location))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for RepoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
