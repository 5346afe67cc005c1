//! Ordered rule cascades and title exception tables.
//!
//! A [`Cascade`] is the "first rule that matches wins" driver shared by every
//! field extractor. Rules are tried in declaration order. For each rule every
//! non-overlapping occurrence of its pattern is handed to the production in
//! turn; the production may reject an occurrence (wrong shape, out-of-range
//! number) by returning `None`, in which case the next occurrence and then the
//! next rule are tried.
//!
//! An [`ExceptionTable`] maps known problem titles to a fixed answer. Keys are
//! matched as substrings of the trimmed title and the first key in table order
//! wins.

use log::{debug, trace};
use regex::{Captures, Regex};

use super::diagnostics::Field;
use super::trigger::{BucketMask, TriggerInfo};

/// Text a cascade runs against, plus optional side text some rules consult
/// (the "posted at" line for titles that omit the year).
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    pub text: &'a str,
    pub context: Option<&'a str>,
}

impl<'a> Subject<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, context: None }
    }

    pub fn with_context(text: &'a str, context: Option<&'a str>) -> Self {
        Self { text, context }
    }
}

pub type Production<T> = Box<dyn Fn(&Captures<'_>, &Subject<'_>) -> Option<T> + Send + Sync>;

/// Box a production closure. Used by the `rule!` macro so closure argument
/// types are inferred from one place.
pub fn production<T, F>(f: F) -> Production<T>
where
    F: Fn(&Captures<'_>, &Subject<'_>) -> Option<T> + Send + Sync + 'static,
{
    Box::new(f)
}

/// One cascade entry: a name (used in traces), a pattern, coarse bucket
/// requirements and a production turning captures into a value.
pub struct Rule<T> {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// Rule is skipped unless the subject has all of these buckets.
    pub buckets: BucketMask,
    pub production: Production<T>,
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}

/// The winning rule and the value its production returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeMatch<T> {
    pub rule: &'static str,
    pub value: T,
}

/// Ordered rules for one field.
#[derive(Debug)]
pub struct Cascade<T> {
    field: Field,
    rules: Vec<Rule<T>>,
}

impl<T> Cascade<T> {
    pub fn new(field: Field, rules: Vec<Rule<T>>) -> Self {
        Self { field, rules }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Run the cascade against `subject` and return the first accepted match.
    pub fn first_match(&self, subject: &Subject<'_>) -> Option<CascadeMatch<T>> {
        let trigger = TriggerInfo::scan(subject.text);

        for rule in &self.rules {
            if !trigger.satisfies(rule.buckets) {
                trace!("{:?}: skip '{}' (buckets {:?})", self.field, rule.name, rule.buckets);
                continue;
            }

            for caps in rule.pattern.captures_iter(subject.text) {
                if let Some(value) = (rule.production)(&caps, subject) {
                    debug!("{:?}: rule '{}' matched '{}'", self.field, rule.name, &caps[0]);
                    return Some(CascadeMatch { rule: rule.name, value });
                }
            }
        }

        None
    }
}

/// Title substring → fixed value, consulted before a cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ExceptionTable<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> ExceptionTable<T> {
    pub fn new(entries: Vec<(String, T)>) -> Self {
        Self { entries }
    }

    /// First entry whose key occurs in the trimmed `title`.
    pub fn lookup(&self, title: &str) -> Option<&T> {
        let title = title.trim();
        self.entries.iter().find(|(key, _)| title.contains(key.as_str())).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_cascade() -> Cascade<u32> {
        Cascade::new(
            Field::Size,
            vec![
                rule! {
                    name: "two digits after CO",
                    pattern: r"CO(\d\d)",
                    buckets: BucketMask::HAS_DIGITS,
                    prod: |caps, _subject| -> Option<u32> { caps.get(1)?.as_str().parse().ok() },
                },
                rule! {
                    name: "any number below 50",
                    pattern: r"(\d+)",
                    buckets: BucketMask::HAS_DIGITS,
                    prod: |caps, _subject| -> Option<u32> {
                        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
                        (n < 50).then_some(n)
                    },
                },
                rule! {
                    name: "context fallback",
                    pattern: r"^",
                    prod: |_caps, subject| -> Option<u32> { subject.context?.parse().ok() },
                },
            ],
        )
    }

    #[test]
    fn earlier_rule_wins_when_both_match() {
        let cascade = number_cascade();
        let hit = cascade.first_match(&Subject::new("TvT 12 CO40")).unwrap();
        assert_eq!(hit, CascadeMatch { rule: "two digits after CO", value: 40 });
    }

    #[test]
    fn rejected_occurrence_tries_the_next_one() {
        let cascade = number_cascade();
        let hit = cascade.first_match(&Subject::new("2014 and then 7")).unwrap();
        assert_eq!(hit, CascadeMatch { rule: "any number below 50", value: 7 });
    }

    #[test]
    fn bucket_gating_skips_rules() {
        let cascade = number_cascade();
        let hit = cascade.first_match(&Subject::with_context("no digits", Some("9"))).unwrap();
        assert_eq!(hit.rule, "context fallback");
        assert!(cascade.first_match(&Subject::new("no digits")).is_none());
    }

    #[test]
    fn exception_table_first_key_wins() {
        let table = ExceptionTable::new(vec![
            ("Greeks".to_string(), 1),
            ("Comp58".to_string(), 2),
            ("Greeks Meet".to_string(), 3),
        ]);
        assert_eq!(table.lookup("  [06.02.] Comp58 OP Greeks Meet  "), Some(&1));
        assert_eq!(table.lookup("Comp58"), Some(&2));
        assert_eq!(table.lookup("nothing"), None);
        assert_eq!(table.len(), 3);
    }
}
