use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::engine::Subject;

/// Parse capture group `i` as an unsigned number.
pub fn group_u32(caps: &Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

/// Capture group `i`, trimmed, if non-empty.
pub fn group_text<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    Some(caps.get(i)?.as_str().trim()).filter(|s| !s.is_empty())
}

/// First four-digit number on the "posted at" line.
pub fn posted_year(subject: &Subject<'_>) -> Option<i32> {
    let line = subject.context?;
    regex!(r"(\d{4})").captures(line)?.get(1)?.as_str().parse().ok()
}

/// Year of the first `.yyyy` date suffix on the "posted at" line.
pub fn posted_year_after_dot(subject: &Subject<'_>) -> Option<i32> {
    let line = subject.context?;
    regex!(r"\.(\d{4})").captures(line)?.get(1)?.as_str().parse().ok()
}

/// Two-digit year in the 2000s.
pub fn full_year(yy: u32) -> i32 {
    2000 + yy as i32
}

/// German month names written after a day number, with their two-digit form.
/// Full names come before abbreviations.
static MONTH_NAMES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("Januar|Jan", "01"),
        ("Februar|Feb", "02"),
        ("März|Maerz|Mär", "03"),
        ("April|Apr", "04"),
        ("Mai", "05"),
        ("Juni|Jun", "06"),
        ("Juli|Jul", "07"),
        ("August|Aug", "08"),
        ("September|Sept|Sep", "09"),
        ("Oktober|Okt", "10"),
        ("November|Nov", "11"),
        ("Dezember|Dez", "12"),
    ]
    .into_iter()
    .filter_map(|(names, month)| {
        Regex::new(&format!(r"(\d{{1,2}}\.)\s?(?:{names})\b\.?")).ok().map(|re| (re, month))
    })
    .collect()
});

/// Rewrite `"02. März"` to `"02.03"` so the numeric date rules can read it.
pub fn substitute_month_names(title: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(title);
    for (re, month) in MONTH_NAMES.iter() {
        if re.is_match(&out) {
            let replaced = re.replace_all(&out, format!("${{1}}{month}").as_str()).into_owned();
            out = Cow::Owned(replaced);
        }
    }
    out
}
