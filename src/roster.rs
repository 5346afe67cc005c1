//! Roster builder.
//!
//! Scans the opening post for the slot list. The scan is a small state
//! machine:
//!
//! ```text
//! Seeking --heading--> InList --content end--> Done
//! ```
//!
//! The heading line itself carries no slots; slot lines start on the next
//! line. Lines in the list that match no slot shape (free slots, blank lines,
//! group captions) are skipped. Every matched line is classified and its
//! player resolved to a canonical name straight away.

use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::alias::AliasTable;
use crate::classifier::RoleClassifier;
use crate::config::Tables;
use crate::engine::{Cascade, Diagnostics, Field, Subject};
use crate::layout::CONTENT_END;
use crate::normalize::normalize;
use crate::rules::slot_line::{SlotLine, split_unconfirmed};
use crate::rules::{heading, slot_line};
use crate::{AttendanceStatus, Roster, SlotAssignment};

static HEADINGS: Lazy<Cascade<()>> = Lazy::new(|| Cascade::new(Field::Roster, heading::get()));
static SLOT_LINES: Lazy<Cascade<SlotLine>> = Lazy::new(|| Cascade::new(Field::Roster, slot_line::get()));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Seeking,
    InList,
    Done,
}

#[derive(Debug, Clone, Copy)]
pub struct RosterBuilder<'a> {
    classifier: &'a RoleClassifier,
    aliases: &'a AliasTable,
}

impl<'a> RosterBuilder<'a> {
    pub fn new(classifier: &'a RoleClassifier, aliases: &'a AliasTable) -> Self {
        Self { classifier, aliases }
    }

    pub fn from_tables(tables: &'a Tables) -> Self {
        Self::new(&tables.classifier, &tables.aliases)
    }

    /// Build the roster from raw body lines.
    ///
    /// `None` when no heading was found. A heading with no slot lines under
    /// it yields an empty roster. Both cases are reported.
    pub fn build<S: AsRef<str>>(&self, body: &[S], diagnostics: &mut Diagnostics) -> Option<Roster> {
        let mut state = State::Seeking;
        let mut roster: Option<Roster> = None;

        for raw in body {
            let raw = raw.as_ref();
            let line = normalize(raw);

            match state {
                State::Seeking => {
                    if let Some(hit) = HEADINGS.first_match(&Subject::new(&line)) {
                        debug!("roster: heading '{}' via '{}'", line.trim(), hit.rule);
                        state = State::InList;
                        roster = Some(Roster::new());
                    }
                }
                State::InList => {
                    if let (Some(roster), Some(slot)) = (roster.as_mut(), self.read_slot(&line, diagnostics)) {
                        roster.push_slot(slot);
                    }
                }
                State::Done => break,
            }

            if raw.contains(CONTENT_END) {
                trace!("roster: content end, state {:?}", state);
                state = State::Done;
            }
        }

        match &roster {
            None => diagnostics.structural(Field::Roster, "no slot list heading found"),
            Some(roster) if roster.slots.is_empty() => {
                diagnostics.structural(Field::Roster, "slot list heading found but no slots under it")
            }
            Some(roster) => {
                let duplicates = roster.duplicate_keys();
                if !duplicates.is_empty() {
                    debug!("roster: duplicate slot keys {:?} kept", duplicates);
                }
            }
        }

        roster
    }

    /// One slot from a normalized line, or `None` if the line is not a slot.
    pub fn read_slot(&self, line: &str, diagnostics: &mut Diagnostics) -> Option<SlotAssignment> {
        let (line, unconfirmed) = split_unconfirmed(line);
        let hit = SLOT_LINES.first_match(&Subject::new(&line))?;
        let SlotLine { key, label, player } = hit.value;

        let role = self.classifier.classify(&label, diagnostics);
        let raw_role = if label.eq_ignore_ascii_case(role.as_str()) { None } else { Some(label) };

        Some(SlotAssignment {
            key,
            role,
            raw_role,
            player: self.aliases.resolve(&player).to_string(),
            status: AttendanceStatus::Unknown,
            unconfirmed,
        })
    }
}
