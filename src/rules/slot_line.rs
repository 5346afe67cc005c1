//! Slot line rules (body lines inside a roster).
//!
//! A slot line carries a slot number, a role label and a player, e.g.
//! `#12 - Rifleman (AT) - [W] Bob<br />`. Lines are normalized first, so
//! color spans and bold tags are already gone; what is left differs in the
//! separators used and in the optional `[W]` (waiting list) marker. The
//! "nicht bestätigt" (unconfirmed) suffix is split off before matching.
//!
//! Labels may contain ` - ` themselves (`Rifleman - AT`), so labels match
//! greedily and the *last* separator before the player wins.

use std::borrow::Cow;

use crate::engine::{BucketMask, Rule, production};
use crate::normalize::trim_dashes;
use crate::rules::helpers::group_u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLine {
    pub key: u32,
    pub label: String,
    pub player: String,
}

/// Remove a trailing "nicht bestätigt" marker; the flag says whether there was one.
pub fn split_unconfirmed(line: &str) -> (Cow<'_, str>, bool) {
    let re = regex!(r"(?i)\s*-\s*nicht\s+best(?:ä|ae)tigt");
    if re.is_match(line) { (re.replace_all(line, ""), true) } else { (Cow::Borrowed(line), false) }
}

fn slot_rule(name: &'static str, pattern: &'static regex::Regex) -> Rule<SlotLine> {
    Rule {
        name,
        pattern,
        buckets: BucketMask::HAS_DIGITS,
        production: production(|caps, _subject| {
            let key = group_u32(caps, 1)?;
            let label = trim_dashes(caps.get(2)?.as_str());
            let player = trim_dashes(caps.get(3)?.as_str());
            if label.is_empty() || player.is_empty() {
                return None;
            }
            Some(SlotLine { key, label: label.to_string(), player: player.to_string() })
        }),
    }
}

pub fn get() -> Vec<Rule<SlotLine>> {
    vec![
        slot_rule(
            "#n - label - [W] player",
            regex!(
                r"(?i)#(\d+)\s{1,3}-\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:\[W\]|W\]|\[W|W\s)\s?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n - label - player",
            regex!(
                r"(?i)#(\d+)\s{1,3}-\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n label - [W] player",
            regex!(
                r"(?i)#(\d+)\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:\[W\]|W\]|\[W|W\s)\s?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n label - player",
            regex!(
                r"(?i)#(\d+)\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n- label [W] player",
            regex!(
                r"(?i)#(\d+)\s{0,3}-?\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-?\s{0,3}(?:\[W\]|W\]|\[W|W\s)\s?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n: label - player",
            regex!(
                r"(?i)#(\d+)[:.]\s{0,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n label: player",
            regex!(
                r"(?i)#(\d+)\s{0,3}-?\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}:\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "[n] label - player",
            regex!(
                r"(?i)\[(\d+)\]\s{0,3}-?\s{0,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "n. label - player",
            regex!(
                r"(?i)^\s*(\d+)[.)]\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n label / player",
            regex!(
                r"(?i)#(\d+)\s{0,3}-?\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{1,3}/\s{1,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n label | player",
            regex!(
                r"(?i)#(\d+)\s{0,3}-?\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}\|\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*<br\s?/?>"
            ),
        ),
        slot_rule(
            "#n - label - player, no break",
            regex!(
                r"(?i)#(\d+)\s{1,3}-\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*$"
            ),
        ),
        slot_rule(
            "#n label - player, no break",
            regex!(
                r"(?i)#(\d+)\s{1,3}([A-Za-zÄÖÜäöüß\s+´\-()/.0-9?,*]+)\s{0,3}-\s{0,3}(?:(?:\[W\]|W\]|\[W|W\s)\s?)?([A-Za-zÄÖÜäöüß\s´\-_0-9?.:]+)\s*$"
            ),
        ),
    ]
}
