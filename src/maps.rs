//! Known terrains ("maps") with stable ids.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Name used when a thread does not state its map.
pub const UNKNOWN_MAP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapTable {
    by_id: BTreeMap<u32, MapEntry>,
    by_name: HashMap<String, u32>,
    aliases: HashMap<String, String>,
}

impl MapTable {
    pub fn new(entries: Vec<MapEntry>, aliases: Vec<(String, String)>) -> Self {
        let by_name = entries.iter().map(|e| (e.name.to_lowercase(), e.id)).collect();
        let by_id = entries.into_iter().map(|e| (e.id, e)).collect();
        let aliases = aliases.into_iter().map(|(variant, canonical)| (variant.to_lowercase(), canonical)).collect();
        Self { by_id, by_name, aliases }
    }

    /// Canonical spelling of a map name read from a thread. Unknown names
    /// are returned trimmed but otherwise unchanged.
    pub fn canonical(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let key = trimmed.to_lowercase();
        if let Some(canonical) = self.aliases.get(&key) {
            return canonical.clone();
        }
        match self.by_name.get(&key).and_then(|id| self.by_id.get(id)) {
            Some(entry) => entry.name.clone(),
            None => trimmed.to_string(),
        }
    }

    /// Id of a map, matched case-insensitively after alias resolution.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(&self.canonical(name).to_lowercase()).copied()
    }

    pub fn get(&self, id: u32) -> Option<&MapEntry> {
        self.by_id.get(&id)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.id_of(name).and_then(|id| self.get(id)).is_some_and(|e| e.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapEntry> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MapTable {
        MapTable::new(
            vec![
                MapEntry { id: 1, name: "Altis".into(), active: true },
                MapEntry { id: 2, name: "Chernarus".into(), active: false },
            ],
            vec![("Tschernarus".into(), "Chernarus".into())],
        )
    }

    #[test]
    fn canonical_resolves_case_and_aliases() {
        let maps = table();
        assert_eq!(maps.canonical(" altis "), "Altis");
        assert_eq!(maps.canonical("Tschernarus"), "Chernarus");
        assert_eq!(maps.canonical("Stratis"), "Stratis");
    }

    #[test]
    fn ids_and_activity() {
        let maps = table();
        assert_eq!(maps.id_of("ALTIS"), Some(1));
        assert_eq!(maps.id_of("tschernarus"), Some(2));
        assert_eq!(maps.id_of("Stratis"), None);
        assert!(maps.is_active("Altis"));
        assert!(!maps.is_active("Chernarus"));
        assert_eq!(maps.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
