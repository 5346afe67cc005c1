//! Capacity rules (title): the player count next to the event type,
//! `CO40`, `TvT 20`, `Coop+ 12`, `MILSIM-30`.

use crate::engine::{BucketMask, Rule};
use crate::rules::helpers::group_u32;

fn size_rule(name: &'static str, pattern: &'static regex::Regex) -> Rule<u32> {
    Rule {
        name,
        pattern,
        buckets: BucketMask::HAS_DIGITS,
        production: crate::engine::production(|caps, _subject| group_u32(caps, 1).filter(|n| *n > 0)),
    }
}

pub fn get() -> Vec<Rule<u32>> {
    vec![
        size_rule("type nn", regex!(r"[A-Za-z]+[+\s]?(\d\d)[\s\]]")),
        size_rule("type+ nn", regex!(r"[A-Za-z]{2}\+ (\d\d)\s")),
        size_rule("xx nn at word start", regex!(r"\s[A-Za-z]{2}(\d\d)")),
        size_rule("xxxx - nn", regex!(r"\s[A-Za-z]{4}\s?-\s?(\d\d)")),
        size_rule("xx n", regex!(r"\s[A-Za-z]{2}(\d)\s")),
        size_rule("xxxx n", regex!(r"\s[A-Za-z]{4}(\d)\s")),
        size_rule("xx spaced n", regex!(r"\s[A-Za-z]{2}\s(\d)\s")),
        size_rule("xxxx spaced nn", regex!(r"\s[A-Za-z]{4}\s(\d\d)")),
        rule! {
            name: "xxx nn+",
            pattern: r"\s[A-Za-z]{3}(\d\d)\+",
            buckets: BucketMask::HAS_DIGITS.union(BucketMask::HAS_PLUS),
            prod: |caps, _subject| -> Option<u32> { group_u32(caps, 1) },
        },
    ]
}
