//! Role classifier: free-text slot labels to [`RoleCategory`].
//!
//! Three tiers are tried in order and the first hit wins:
//!
//! 1. **Rules**: ordered, case-insensitive patterns anchored to the whole
//!    label. Order is priority; there is no specificity scoring.
//! 2. **Enum names**: the label *is* a category name (`"MDC"`), or carries one
//!    as a parenthesised qualifier (`"Rifleman (GNR)"`). Categories are
//!    checked in declaration order.
//! 3. **Lookup**: a case-insensitive dictionary of labels seen in old threads.
//!
//! A label no tier recognises becomes [`RoleCategory::Unknown`] together with
//! a `ClassificationMiss` diagnostic.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::RoleCategory;
use crate::engine::{DiagnosticKind, Diagnostics, Field};
use crate::normalize::trim_dashes;

/// Which classifier tier produced a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Rule,
    EnumName,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub role: RoleCategory,
    pub tier: Tier,
}

/// One rule-tier entry.
#[derive(Debug, Clone)]
pub struct RoleRule {
    pub role: RoleCategory,
    pattern: Regex,
}

impl RoleRule {
    /// Compile `pattern` as a case-insensitive whole-label match.
    pub fn new(role: RoleCategory, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!("^(?:{pattern})$")).case_insensitive(true).build()?;
        Ok(Self { role, pattern })
    }

    pub fn matches(&self, label: &str) -> bool {
        self.pattern.is_match(label)
    }
}

struct EnumName {
    role: RoleCategory,
    parenthesised: String,
}

pub struct RoleClassifier {
    rules: Vec<RoleRule>,
    names: Vec<EnumName>,
    lookup: HashMap<String, RoleCategory>,
}

impl std::fmt::Debug for RoleClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleClassifier")
            .field("rules", &self.rules.len())
            .field("lookup", &self.lookup.len())
            .finish()
    }
}

impl RoleClassifier {
    /// Build a classifier from ordered rules and `(label, role)` lookup pairs.
    /// Lookup keys are compared trimmed and lower-cased; the first pair for a
    /// key wins.
    pub fn new<I>(rules: Vec<RoleRule>, lookup: I) -> Self
    where
        I: IntoIterator<Item = (String, RoleCategory)>,
    {
        let names = RoleCategory::classifiable()
            .map(|role| EnumName { role, parenthesised: format!("({})", role.as_str().to_lowercase()) })
            .collect();

        let mut table = HashMap::new();
        for (label, role) in lookup {
            table.entry(lookup_key(&label)).or_insert(role);
        }

        Self { rules, names, lookup: table }
    }

    /// Classify `label`, returning the tier that matched.
    pub fn classify_tiered(&self, label: &str) -> Option<Classification> {
        let label = trim_dashes(label);

        if let Some(rule) = self.rules.iter().find(|r| r.matches(label)) {
            return Some(Classification { role: rule.role, tier: Tier::Rule });
        }

        if let Some(name) = self.names.iter().find(|n| n.role.as_str().eq_ignore_ascii_case(label)) {
            return Some(Classification { role: name.role, tier: Tier::EnumName });
        }
        let lower = label.to_lowercase();
        if let Some(name) = self.names.iter().find(|n| lower.contains(&n.parenthesised)) {
            return Some(Classification { role: name.role, tier: Tier::EnumName });
        }

        self.lookup.get(&lookup_key(label)).map(|role| Classification { role: *role, tier: Tier::Lookup })
    }

    /// Classify `label`; a miss yields `Unknown` and one diagnostic.
    pub fn classify(&self, label: &str, diagnostics: &mut Diagnostics) -> RoleCategory {
        match self.classify_tiered(label) {
            Some(hit) => hit.role,
            None => {
                diagnostics.push(
                    DiagnosticKind::ClassificationMiss,
                    Field::Role,
                    format!("can't classify role label '{}'", label.trim()),
                );
                RoleCategory::Unknown
            }
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn lookup_len(&self) -> usize {
        self.lookup.len()
    }
}

fn lookup_key(label: &str) -> String {
    trim_dashes(label).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RoleClassifier {
        let rules = vec![
            RoleRule::new(RoleCategory::Pl, r"Platoon[\s-]?Lead(er)?").unwrap(),
            RoleRule::new(RoleCategory::Sl, r"Squad[\s]?lead(er)?[\s]?(\(.*\))?").unwrap(),
            RoleRule::new(RoleCategory::Tl, r".*Lead(er)?").unwrap(),
            RoleRule::new(RoleCategory::Rfl, r"Rifleman|Schütze").unwrap(),
        ];
        let lookup = vec![
            ("UGV Specialist".to_string(), RoleCategory::Ugso),
            ("Zugsanitäter -".to_string(), RoleCategory::Cmdc),
            ("ugv specialist".to_string(), RoleCategory::Mdc),
        ];
        RoleClassifier::new(rules, lookup)
    }

    #[test]
    fn rule_order_decides() {
        let c = classifier();
        let mut diags = Diagnostics::new();
        assert_eq!(c.classify("Platoon Leader", &mut diags), RoleCategory::Pl);
        assert_eq!(c.classify("Squad Leader (Alpha)", &mut diags), RoleCategory::Sl);
        assert_eq!(c.classify("Fireteam Leader", &mut diags), RoleCategory::Tl);
        assert_eq!(c.classify("rifleman", &mut diags), RoleCategory::Rfl);
        assert!(diags.is_empty());
    }

    #[test]
    fn rules_are_anchored() {
        let c = classifier();
        assert_eq!(c.classify_tiered("Rifleman AT"), None);
    }

    #[test]
    fn enum_names_exact_and_parenthesised() {
        let c = classifier();
        assert_eq!(c.classify_tiered("mdc"), Some(Classification { role: RoleCategory::Mdc, tier: Tier::EnumName }));
        assert_eq!(
            c.classify_tiered("Gunner (GNR)"),
            Some(Classification { role: RoleCategory::Gnr, tier: Tier::EnumName })
        );
        assert_eq!(
            c.classify_tiered("Sanitäter (ZC_PLUS)"),
            Some(Classification { role: RoleCategory::ZcPlus, tier: Tier::EnumName })
        );
    }

    #[test]
    fn rule_tier_beats_parenthesised_name() {
        let c = classifier();
        assert_eq!(c.classify_tiered("Squad Leader (MDC)").map(|h| h.role), Some(RoleCategory::Sl));
    }

    #[test]
    fn lookup_is_case_insensitive_and_first_wins() {
        let c = classifier();
        assert_eq!(
            c.classify_tiered("UGV SPECIALIST"),
            Some(Classification { role: RoleCategory::Ugso, tier: Tier::Lookup })
        );
        assert_eq!(c.classify_tiered("Zugsanitäter").map(|h| h.role), Some(RoleCategory::Cmdc));
        assert_eq!(c.lookup_len(), 2);
    }

    #[test]
    fn miss_is_unknown_with_one_diagnostic() {
        let c = classifier();
        let mut diags = Diagnostics::new();
        assert_eq!(c.classify("???", &mut diags), RoleCategory::Unknown);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.of_kind(DiagnosticKind::ClassificationMiss).count(), 1);
    }

    #[test]
    fn sentinel_is_never_an_enum_name_hit() {
        let c = classifier();
        assert_eq!(c.classify_tiered("UNKNOWN"), None);
        assert_eq!(c.classify_tiered("Späher (UNKNOWN)"), None);
    }
}
