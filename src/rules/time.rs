//! Start time rules (body lines).
//!
//! The start time is a labelled line in the first post, written as
//! `Beginn: 20:00 Uhr<br />` and a dozen variations thereof.

use chrono::NaiveTime;

use crate::engine::{BucketMask, Rule};
use crate::rules::helpers::group_u32;

fn hm(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

pub fn get() -> Vec<Rule<NaiveTime>> {
    vec![
        rule! {
            name: "label: hhmm",
            pattern: r"(?i)^\s*(?:Eventbeginn|Beginn|Eventstart|Treffen im (?:Teamspeak|TS)|Start|Treffen|Sammeln im Teamspeak|Trainingsbeginn)\s?:(?:\s|&gt;|-|ab)*(\d{2})[.:]?(\d{2})\s*(?:Uhr|h)?(?:\s|&lt;)*<br\s?/?>",
            buckets: BucketMask::HAS_DIGITS.union(BucketMask::HAS_BREAK),
            prod: |caps, _subject| -> Option<NaiveTime> { hm(group_u32(caps, 1)?, group_u32(caps, 2)?) },
        },
        rule! {
            name: "label um h:mm",
            pattern: r"(?i)^\s*(?:Eventbeginn|Beginn|Eventstart|Start|Treffen|Missionsstart|Trainingsbeginn)\s?:?\s+(?:um|ab)\s+(\d{1,2})[.:](\d{2})\s*(?:Uhr|h)?",
            buckets: BucketMask::HAS_DIGITS,
            prod: |caps, _subject| -> Option<NaiveTime> { hm(group_u32(caps, 1)?, group_u32(caps, 2)?) },
        },
        rule! {
            name: "Uhrzeit: h:mm",
            pattern: r"(?i)^\s*(?:Uhrzeit|Zeit|Startzeit|Time)\s?:\s*(?:ab\s+)?(\d{1,2})[.:](\d{2})\s*(?:Uhr|h)?",
            buckets: BucketMask::HAS_DIGITS.union(BucketMask::HAS_COLON),
            prod: |caps, _subject| -> Option<NaiveTime> { hm(group_u32(caps, 1)?, group_u32(caps, 2)?) },
        },
    ]
}
