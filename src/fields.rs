//! Field extractors.
//!
//! Every extractor follows the same order: the title exception table first,
//! then the field's cascade, then a sentinel plus an `UnparseableField`
//! diagnostic. Input is normalized here, so raw page text may be passed.

use chrono::NaiveTime;
use once_cell::sync::Lazy;

use crate::config::TitleExceptions;
use crate::engine::{Cascade, Diagnostics, Field, Source, Subject};
use crate::maps::{MapTable, UNKNOWN_MAP};
use crate::normalize::{normalize, strip_tags};
use crate::rules;
use crate::rules::date::DateMatch;
use crate::rules::helpers::substitute_month_names;
use crate::{EventDate, EventType};

static DATE_RULES: Lazy<Cascade<DateMatch>> = Lazy::new(|| Cascade::new(Field::Date, rules::date::get()));
static TIME_RULES: Lazy<Cascade<NaiveTime>> = Lazy::new(|| Cascade::new(Field::Time, rules::time::get()));
static SIZE_RULES: Lazy<Cascade<u32>> = Lazy::new(|| Cascade::new(Field::Size, rules::size::get()));
static CATEGORY_RULES: Lazy<Cascade<EventType>> = Lazy::new(|| Cascade::new(Field::Category, rules::category::get()));
static NAME_RULES: Lazy<Cascade<String>> = Lazy::new(|| Cascade::new(Field::Name, rules::name::get()));

/// A field value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Extracted<T> {
    fn exception(value: T) -> Self {
        Self { value, source: Source::Exception }
    }

    fn rule(value: T, rule: &'static str) -> Self {
        Self { value, source: Source::Rule(rule) }
    }

    fn fallback(value: T) -> Self {
        Self { value, source: Source::Fallback }
    }
}

/// Event date from the title. `posted_at` is the thread's "posted at" line,
/// used when the title leaves out the year. Implausible dates are kept and
/// reported.
pub fn extract_date(
    title: &str,
    posted_at: Option<&str>,
    exceptions: &TitleExceptions,
    current_year: i32,
    diagnostics: &mut Diagnostics,
) -> Extracted<Option<EventDate>> {
    let title = normalize(title);
    if let Some(date) = exceptions.date.lookup(&title) {
        return Extracted::exception(Some(*date));
    }

    let text = substitute_month_names(&title);
    let Some(hit) = DATE_RULES.first_match(&Subject::with_context(&text, posted_at)) else {
        diagnostics.unparseable(Field::Date, format!("can't parse a date from title '{}'", title.trim()));
        return Extracted::fallback(None);
    };

    let DateMatch { day, month, year } = hit.value;
    let Some(year) = year else {
        diagnostics.unparseable(Field::Date, format!("no year on the posted-at line for title '{}'", title.trim()));
        return Extracted::rule(None, hit.rule);
    };

    let date = EventDate::new(day, month, year);
    if !date.is_plausible(current_year) || date.to_naive().is_none() {
        let message = format!("date {date} read from title '{}' is not a valid day", title.trim());
        diagnostics.unparseable(Field::Date, message);
    }
    Extracted::rule(Some(date), hit.rule)
}

/// Start time from the first body line that states one.
pub fn extract_time<S: AsRef<str>>(
    title: &str,
    body: &[S],
    exceptions: &TitleExceptions,
    diagnostics: &mut Diagnostics,
) -> Extracted<Option<NaiveTime>> {
    let title = normalize(title);
    if let Some(time) = exceptions.time.lookup(&title) {
        return Extracted::exception(Some(*time));
    }

    for line in body {
        let line = normalize(line.as_ref());
        if let Some(hit) = TIME_RULES.first_match(&Subject::new(&line)) {
            return Extracted::rule(Some(hit.value), hit.rule);
        }
    }

    diagnostics.unparseable(Field::Time, format!("can't parse the start time of '{}'", title.trim()));
    Extracted::fallback(None)
}

/// Player capacity from the title.
pub fn extract_size(
    title: &str,
    exceptions: &TitleExceptions,
    diagnostics: &mut Diagnostics,
) -> Extracted<Option<u32>> {
    let title = normalize(title);
    if let Some(size) = exceptions.size.lookup(&title) {
        return Extracted::exception(Some(*size));
    }

    match SIZE_RULES.first_match(&Subject::new(&title)) {
        Some(hit) => Extracted::rule(Some(hit.value), hit.rule),
        None => {
            diagnostics.unparseable(Field::Size, format!("can't parse the size from title '{}'", title.trim()));
            Extracted::fallback(None)
        }
    }
}

/// Event category from the title; `Unknown` when nothing matches.
pub fn extract_category(
    title: &str,
    exceptions: &TitleExceptions,
    diagnostics: &mut Diagnostics,
) -> Extracted<EventType> {
    let title = normalize(title);
    if let Some(category) = exceptions.category.lookup(&title) {
        return Extracted::exception(*category);
    }

    match CATEGORY_RULES.first_match(&Subject::new(&title)) {
        Some(hit) => Extracted::rule(hit.value, hit.rule),
        None => {
            let message = format!("can't parse the event type from title '{}'", title.trim());
            diagnostics.unparseable(Field::Category, message);
            Extracted::fallback(EventType::Unknown)
        }
    }
}

/// Event name from the title; the whole title when no rule matches.
pub fn extract_name(title: &str, exceptions: &TitleExceptions, diagnostics: &mut Diagnostics) -> Extracted<String> {
    let title = normalize(title);
    if let Some(name) = exceptions.name.lookup(&title) {
        return Extracted::exception(name.clone());
    }

    match NAME_RULES.first_match(&Subject::new(&title)) {
        Some(hit) => Extracted::rule(hit.value, hit.rule),
        None => {
            diagnostics.unparseable(Field::Name, format!("can't parse the name from title '{}'", title.trim()));
            Extracted::fallback(title.trim().to_string())
        }
    }
}

/// Map named on a `Map:` / `Karte:` body line, in its canonical spelling.
/// A missing map is common and not reported.
pub fn extract_map<S: AsRef<str>>(body: &[S], maps: &MapTable) -> Extracted<String> {
    let pattern = regex!(r"(?i)(?:Map|Karte)\s?:\s?(.+)<");
    let yes = regex!(r"(?i)\bja\b");

    for line in body {
        let line = normalize(line.as_ref());
        let Some(caps) = pattern.captures(&line) else {
            continue;
        };
        let value = strip_tags(&caps[1]);
        let value = value.trim();
        if value.is_empty() || yes.is_match(value) {
            continue;
        }
        return Extracted::rule(maps.canonical(value), "map line");
    }

    Extracted::fallback(UNKNOWN_MAP.to_string())
}
