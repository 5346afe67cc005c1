//! Player alias resolution.
//!
//! Players sign up under slightly different spellings over the years. The
//! alias table maps each known variant to one canonical name. Chains in the
//! source data (`a → b`, `b → c`) are flattened at load time so a single
//! lookup always lands on a canonical name and `resolve` is idempotent.

use std::collections::HashMap;

use crate::config::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Build the table from `(variant, canonical)` pairs.
    ///
    /// Identity pairs are dropped. A chain that loops back on itself is an
    /// error.
    pub fn new<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let raw: HashMap<String, String> = pairs
            .into_iter()
            .map(|(variant, canonical)| (variant.into(), canonical.into()))
            .filter(|(variant, canonical)| variant != canonical)
            .collect();

        let mut map = HashMap::with_capacity(raw.len());
        for variant in raw.keys() {
            let mut target = &raw[variant];
            let mut hops = 0;
            while let Some(next) = raw.get(target) {
                hops += 1;
                if next == variant || hops > raw.len() {
                    return Err(ConfigError::AliasCycle(variant.clone()));
                }
                target = next;
            }
            map.insert(variant.clone(), target.clone());
        }

        Ok(Self { map })
    }

    /// Canonical name for `raw`, or `raw` itself when it is not a known variant.
    /// Matching is exact and case-sensitive.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.map.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AliasTable {
        AliasTable::new([("Raxus", "RaXuS"), ("raxus", "RaXuS"), ("Seb", "Sebastian"), ("Basti", "Seb")]).unwrap()
    }

    #[test]
    fn resolves_known_variants() {
        let aliases = table();
        assert_eq!(aliases.resolve("Raxus"), "RaXuS");
        assert_eq!(aliases.resolve("raxus"), "RaXuS");
    }

    #[test]
    fn unknown_names_pass_through() {
        let aliases = table();
        assert_eq!(aliases.resolve("Bob"), "Bob");
        assert_eq!(aliases.resolve("RAXUS"), "RAXUS");
        assert_eq!(aliases.resolve(""), "");
    }

    #[test]
    fn chains_are_flattened() {
        let aliases = table();
        assert_eq!(aliases.resolve("Basti"), "Sebastian");
    }

    #[test]
    fn resolve_is_idempotent() {
        let aliases = table();
        for name in ["Raxus", "raxus", "Seb", "Basti", "Bob", "RaXuS", "Sebastian"] {
            let once = aliases.resolve(name);
            assert_eq!(aliases.resolve(once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn cycles_are_rejected() {
        let err = AliasTable::new([("Ulfberht", "Ulfberth"), ("Ulfberth", "Ulfberht")]).unwrap_err();
        assert!(matches!(err, ConfigError::AliasCycle(_)));
    }

    #[test]
    fn identity_pairs_are_ignored() {
        let aliases = AliasTable::new([("Bob", "Bob")]).unwrap();
        assert!(aliases.is_empty());
        assert_eq!(aliases.resolve("Bob"), "Bob");
    }
}
