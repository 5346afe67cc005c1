//! Text normalization applied to every title and body line before matching.
//!
//! Forum pages arrive with double-encoded UTF-8 ("Ã¤" for "ä"), a few HTML
//! entities, typographic dashes and inline decoration tags. [`normalize`]
//! rewrites all of that to a single plain form, repeating its passes until
//! the text stops changing, so `normalize(normalize(s)) == normalize(s)`.
//!
//! `&amp;`, `&lt;` and `&gt;` stay encoded; decoded, a second pass could
//! strip them as markup.

use std::borrow::Cow;

/// Literal substitutions, applied in order on each pass.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    // double-encoded UTF-8
    ("Ã¤", "ä"),
    ("Ã¶", "ö"),
    ("Ã¼", "ü"),
    ("Ã„", "Ä"),
    ("Ã–", "Ö"),
    ("Ãœ", "Ü"),
    ("ÃŸ", "ß"),
    ("Ã§", "c"),
    ("Ã¢", "a"),
    ("Â´", "´"),
    ("Â\u{a0}", " "),
    // entities
    ("&#39;", "'"),
    ("&#039;", "'"),
    ("&quot;", "\""),
    ("&nbsp;", " "),
    ("\u{a0}", " "),
    // dashes
    ("\u{2012}", "-"),
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{2212}", "-"),
    // letters the patterns do not know
    ("ç", "c"),
    ("â", "a"),
];

/// Canonical form of one line of page text.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    strip_decoration(&out).into_owned()
}

/// Remove inline styling tags (bold, italics, color, font, span) but keep
/// structural markup such as `<br />`.
fn strip_decoration(text: &str) -> Cow<'_, str> {
    regex!(r"(?i)</?(?:strong|b|i|em|u|font|span)\b[^>]*>").replace_all(text, "")
}

/// Remove every tag, for fields whose value is plain text only.
pub fn strip_tags(text: &str) -> String {
    regex!(r"<[^>]*>").replace_all(text, "").into_owned()
}

/// Trim whitespace and surrounding dashes from a role label or player name.
pub(crate) fn trim_dashes(text: &str) -> &str {
    text.trim().trim_matches('-').trim()
}
