//! Thread page layout.
//!
//! A saved thread is the board's rendered HTML, one source line per line. The
//! opening post is found relative to the title line: the creator sits a fixed
//! number of lines below it, the post anchor a few lines below the creator
//! and the "posted at" timestamp further down. Older page templates shift
//! these by a line or two, so each fixed offset falls back to a forward search.

use log::debug;

use crate::engine::{Diagnostics, Field};
use crate::normalize::{normalize, strip_tags};

pub(crate) const CONTENT_END: &str = "<!--sub_forum_post_message-->";
pub(crate) const UNKNOWN_CREATOR: &str = "UNKNOWN";

const TITLE_MARKER: &str = "class='forum_thread_title'>";
const TITLE_START: &str = "<strong>";
const TITLE_END: &str = "</strong>";
const CREATOR_MARKER: &str = "<!--forum_thread_user_name-->";
const CREATOR_END: &str = "</td>";
const ANONYMOUS: &str = "Anonymer Benutzer";

const CREATOR_OFFSET: usize = 5;
const POST_ID_OFFSET: usize = 3;
const POSTED_AT_OFFSET: usize = 9;

/// The opening post of one thread, located in its raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPage<'a> {
    /// Normalized and trimmed thread title.
    pub title: String,
    pub creator: String,
    pub post_id: Option<u32>,
    /// Thread id found in the page's own links.
    pub thread_id: Option<u32>,
    /// Raw "posted at" line, the source of the year for titles without one.
    pub posted_at: Option<&'a str>,
    /// Raw lines from the creator line up to and including the content-end marker.
    pub body: &'a [&'a str],
}

impl<'a> ThreadPage<'a> {
    /// Find the opening post. `None` when the page has no title line, which
    /// is reported as a structural anomaly.
    pub fn locate(lines: &'a [&'a str], diagnostics: &mut Diagnostics) -> Option<Self> {
        let Some((title_idx, title)) = find_title(lines) else {
            diagnostics.structural(Field::Title, "no thread title line on the page");
            return None;
        };
        debug!("layout: title '{}' on line {}", title, title_idx);

        let creator_idx = find_marker(lines, title_idx + CREATOR_OFFSET, title_idx + 1, CREATOR_MARKER);
        let creator = match creator_idx.and_then(|i| creator_of(lines[i])) {
            Some(creator) => creator,
            None => {
                diagnostics.unparseable(Field::Creator, format!("no thread creator found for '{title}'"));
                UNKNOWN_CREATOR.to_string()
            }
        };

        let post_from = creator_idx.unwrap_or(title_idx);
        let post_id = post_id_at(lines, post_from + POST_ID_OFFSET)
            .or_else(|| lines.iter().skip(post_from + 1).find_map(|line| post_id_of(line)));
        if post_id.is_none() {
            diagnostics.unparseable(Field::PostId, format!("no opening post id found for '{title}'"));
        }

        let posted_at = lines
            .get(title_idx + POSTED_AT_OFFSET)
            .copied()
            .filter(|line| has_year(line))
            .or_else(|| lines.iter().skip(title_idx + 1).copied().find(|line| has_year(line)));

        let body_start = creator_idx.unwrap_or(title_idx + 1).min(lines.len());
        let body_end = lines
            .iter()
            .skip(body_start)
            .position(|line| line.contains(CONTENT_END))
            .map_or(lines.len(), |offset| body_start + offset + 1);

        Some(Self {
            title,
            creator,
            post_id,
            thread_id: lines.iter().find_map(|line| thread_id_in(line)),
            posted_at,
            body: &lines[body_start..body_end],
        })
    }
}

/// Thread id from a thread URL (`viewthread.php?thread_id=1234`).
pub fn thread_id_from_url(url: &str) -> Option<u32> {
    regex!(r"id=(\d+)").captures(url)?.get(1)?.as_str().parse().ok()
}

// --- Line probes ---------------------------------------------------------------

fn find_title(lines: &[&str]) -> Option<(usize, String)> {
    let (idx, line) = lines.iter().enumerate().find(|(_, line)| line.contains(TITLE_MARKER))?;
    let start = line.find(TITLE_START)? + TITLE_START.len();
    let end = start + line[start..].find(TITLE_END)?;
    Some((idx, normalize(&line[start..end]).trim().to_string()))
}

/// `expected` if that line carries `marker`, else the first line from `from` on that does.
fn find_marker(lines: &[&str], expected: usize, from: usize, marker: &str) -> Option<usize> {
    if lines.get(expected).is_some_and(|line| line.contains(marker)) {
        return Some(expected);
    }
    lines.iter().skip(from).position(|line| line.contains(marker)).map(|offset| from + offset)
}

fn creator_of(line: &str) -> Option<String> {
    let start = line.find(CREATOR_MARKER)? + CREATOR_MARKER.len();
    let rest = &line[start..];
    let raw = rest.find(CREATOR_END).map_or(rest, |end| &rest[..end]);
    let creator = strip_tags(&normalize(raw)).trim().to_string();
    if creator.is_empty() {
        None
    } else if creator.contains(ANONYMOUS) {
        Some(UNKNOWN_CREATOR.to_string())
    } else {
        Some(creator)
    }
}

fn post_id_at(lines: &[&str], idx: usize) -> Option<u32> {
    lines.get(idx).and_then(|line| post_id_of(line))
}

fn post_id_of(line: &str) -> Option<u32> {
    regex!(r"id='post_(\d+)'>#1</a>").captures(line)?.get(1)?.as_str().parse().ok()
}

fn thread_id_in(line: &str) -> Option<u32> {
    regex!(r"thread_id=(\d+)").captures(line)?.get(1)?.as_str().parse().ok()
}

fn has_year(line: &str) -> bool {
    regex!(r"\d{2}\.\d{2}\.\d{4}").is_match(line)
}
