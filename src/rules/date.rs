//! Event date rules (title).
//!
//! Titles write dates in every shape imaginable. When the title omits the
//! year, it is taken from the thread's "posted at" line, passed in as the
//! subject context.

use crate::engine::{BucketMask, Rule};
use crate::rules::helpers::{full_year, group_u32, posted_year, posted_year_after_dot};

/// Day and month as read; `year` is `None` when it had to come from the
/// "posted at" line and that line had none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    pub day: u32,
    pub month: u32,
    pub year: Option<i32>,
}

const DIGITS_AND_DOT: BucketMask = BucketMask::HAS_DIGITS.union(BucketMask::HAS_DOT);

pub fn get() -> Vec<Rule<DateMatch>> {
    vec![
        rule! {
            name: "dd.mm.yyyy",
            pattern: r"(\d{2})\.(\d{2})\.(\d{4})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(group_u32(caps, 3)? as i32) })
            },
        },
        rule! {
            name: "d.m.yyyy",
            pattern: r"(?:^|\D)(\d)\.(\d)\.(\d{4})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(group_u32(caps, 3)? as i32) })
            },
        },
        rule! {
            name: "dd.mm.yy",
            pattern: r"(\d{2})\.(\d{2})\.(\d{2})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(full_year(group_u32(caps, 3)?)) })
            },
        },
        rule! {
            name: "d.mm.yyyy",
            pattern: r"(\d)\.(\d{2})\.(\d{4})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(group_u32(caps, 3)? as i32) })
            },
        },
        rule! {
            name: "d.mm. + posted year",
            pattern: r"(?:^|\D)(\d)\.(\d{2})\.",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year(subject) })
            },
        },
        rule! {
            name: "d.mm + posted year",
            pattern: r"(?:^|[^\d.])(\d)\.(\d{2})(?:\D|$)",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year_after_dot(subject) })
            },
        },
        rule! {
            name: "dd.mm + posted year",
            pattern: r"(\d{2})\.(\d{2})(?:[^.]|$)",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year_after_dot(subject) })
            },
        },
        rule! {
            name: "dd.mm. + posted year",
            pattern: r"(?:^|[^.])(\d{2})\.(\d{2})\.",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year(subject) })
            },
        },
        rule! {
            name: "dd.mm. after dot + posted year",
            pattern: r"(\d{2})\.(\d{2})\.(?:\D|$)",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year(subject) })
            },
        },
        rule! {
            name: "dd.m + posted year",
            pattern: r"(\d{2})\.(\d)(?:[^\d.]|$)",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year_after_dot(subject) })
            },
        },
        rule! {
            name: "dd.m.yyyy",
            pattern: r"(\d{2})\.(\d)\.(\d{4})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(group_u32(caps, 3)? as i32) })
            },
        },
        rule! {
            name: "dd.m. + posted year",
            pattern: r"(\d{2})\.(\d)\.",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year(subject) })
            },
        },
        rule! {
            name: "d.m.yy",
            pattern: r"(\d)\.(\d)\.(\d{2})",
            buckets: DIGITS_AND_DOT,
            prod: |caps, _subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: Some(full_year(group_u32(caps, 3)?)) })
            },
        },
        rule! {
            name: "d.m + posted year",
            pattern: r"(\d)\.(\d)(?:[^\d.]|$)",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year_after_dot(subject) })
            },
        },
        rule! {
            name: "d.m. + posted year",
            pattern: r"(?:^|\D)(\d)\.(\d)\.",
            buckets: DIGITS_AND_DOT,
            prod: |caps, subject| -> Option<DateMatch> {
                Some(DateMatch { day: group_u32(caps, 1)?, month: group_u32(caps, 2)?, year: posted_year(subject) })
            },
        },
    ]
}
