//! Event name rules (title).
//!
//! The name is what is left of a title once the date, the type-and-size tag
//! and any trailing annotations are cut away. Every rule captures the name in
//! group 1; they differ only in what surrounds it.

use crate::engine::{BucketMask, Rule, production};
use crate::rules::helpers::group_text;

fn name_rule(name: &'static str, buckets: BucketMask, pattern: &'static regex::Regex) -> Rule<String> {
    Rule { name, pattern, buckets, production: production(|caps, _subject| group_text(caps, 1).map(str::to_string)) }
}

pub fn get() -> Vec<Rule<String>> {
    let digits = BucketMask::HAS_DIGITS;
    let none = BucketMask::empty();

    vec![
        name_rule(
            "type nn - name",
            digits,
            regex!(r"[A-Za-zÄÖÜäöüß\s+´]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$"),
        ),
        name_rule("quoted", BucketMask::HAS_QUOTE, regex!(r#"["']([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)["']"#)),
        name_rule(
            "type nn - name vN",
            digits,
            regex!(r"[A-Za-zÄÖÜäöüß\s+´]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\d{0,2}[vV]\.?\d{1,2}$"),
        ),
        name_rule("- name [", BucketMask::HAS_DASH, regex!(r"- ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\s?[\[,]")),
        name_rule(
            "type nn - name n.n",
            digits,
            regex!(r"[A-Za-zÄÖÜäöüß\s+]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\d\.\d$"),
        ),
        name_rule(
            "type nn - name (",
            digits.union(BucketMask::HAS_PAREN),
            regex!(r"[A-Za-zÄÖÜäöüß\s+]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\("),
        ),
        name_rule("- name", BucketMask::HAS_DASH, regex!(r"- ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
        name_rule("name only", none, regex!(r"^([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
        name_rule(
            "type nn - name [",
            digits.union(BucketMask::HAS_BRACKET),
            regex!(r"[A-Za-zÄÖÜäöüß\s+\-]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\["),
        ),
        name_rule("] name", BucketMask::HAS_BRACKET, regex!(r"\] ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
        name_rule("- name - n", BucketMask::HAS_DASH, regex!(r"- ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+) - \d")),
        name_rule("nn name", digits, regex!(r"\d+\s+([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
        name_rule(
            "type nn - name nn",
            digits,
            regex!(r"[A-Za-zÄÖÜäöüß\s+]+\d{1,2}\s+-?\s{0,2}([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\d+$"),
        ),
        name_rule("nn single-spaced name", digits, regex!(r"\d+ ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
        name_rule("nn. name [", digits, regex!(r"\d+\.? ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\[")),
        name_rule("nn. name - n", digits, regex!(r"\d+\.? ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+) - \d")),
        name_rule("nn. name nn", digits, regex!(r"\d+\.? ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)\d+")),
        name_rule("nn. name", digits, regex!(r"\d+\.? ([A-Za-zÄÖÜäöüß\s\-/´',.!:]+)$")),
    ]
}
