//! Object catalog: the registry of ids a layout may reference

use serde::{Deserialize, Serialize};

/// Placement rules for one catalog id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// Maximum number of instances per level. `None` or `0` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_level: Option<u32>,
    /// Role tags such as `path`, `towerSlot`, `spawner`, `base`, `decoration`
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_per_level: None,
            tags: Vec::new(),
        }
    }

    pub fn with_max(mut self, max_per_level: u32) -> Self {
        self.max_per_level = Some(max_per_level);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Finite cap, if any
    pub fn cap(&self) -> Option<usize> {
        match self.max_per_level {
            Some(0) | None => None,
            Some(n) => Some(n as usize),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Ordered collection of catalog entries with case-insensitive lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Look up an entry by id, ignoring ASCII case
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Finite cap for an id; unknown ids are unbounded
    pub fn cap_for(&self, id: &str) -> Option<usize> {
        self.get(id).and_then(CatalogEntry::cap)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<T: IntoIterator<Item = CatalogEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("TowerSlot").with_max(4).with_tags(["towerSlot"]),
            CatalogEntry::new("Rock").with_max(0),
            CatalogEntry::new("Path"),
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = sample();
        assert!(catalog.contains("towerslot"));
        assert!(catalog.contains("PATH"));
        assert!(!catalog.contains("Spawner"));
    }

    #[test]
    fn test_zero_and_missing_caps_are_unbounded() {
        let catalog = sample();
        assert_eq!(catalog.cap_for("TowerSlot"), Some(4));
        assert_eq!(catalog.cap_for("Rock"), None);
        assert_eq!(catalog.cap_for("Path"), None);
        assert_eq!(catalog.cap_for("Unknown"), None);
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let catalog = sample();
        let entry = catalog.get("TowerSlot").unwrap();
        assert!(entry.has_tag("towerslot"));
        assert!(!entry.has_tag("path"));
    }
}
