//! Roster heading rules (body lines).
//!
//! A heading marks the line after which slot lines start. Besides the usual
//! keywords ("Slotliste", "Teilnehmer", ...) a few threads used one-off
//! headings that are matched literally.

use crate::engine::Rule;

fn heading(name: &'static str, pattern: &'static regex::Regex) -> Rule<()> {
    Rule {
        name,
        pattern,
        buckets: crate::engine::BucketMask::empty(),
        production: crate::engine::production(|_caps, _subject| Some(())),
    }
}

pub fn get() -> Vec<Rule<()>> {
    vec![
        heading(
            "keyword",
            regex!(
                r"(?i)(?:Slotliste|Slotdatenbank|Slotlist|Teilnehmer|Anmeldungen|Wer kommt\?|Interessierte|Dabei sind|Lernwillige Zöglinge|Die Auserwählten|lotliste|Zeitslots|Slotierliste)[*:]?\s?(?:&lt;){0,3}\s*(?:<|$)"
            ),
        ),
        heading("Teilnehmer -", regex!(r"(?i)^\s*Teilnehmer -")),
        heading(
            "group title",
            regex!(r"(?i)(?:Gruppe W - Die Herausforderer!|Slotliste - Server #1)[*:]?\s?(?:&lt;){0,3}\s*(?:<|$)"),
        ),
        heading("Brigade2010 location", regex!(r"(?i)Wo: Brigade2010<br\s?/>$")),
        heading("Slot´s", regex!(r"(?i)^Slot´s<br\s?/>$")),
        heading("zu vergeben", regex!(r"(?i) zu vergeben:<br\s?/>$")),
        heading("Gruppe DELTA", regex!(r"(?i)^Gruppe DELTA:<br\s?/>$")),
        heading("wer dabei ist", regex!(r"(?i)wer dabei ist\.<br\s?/>$")),
        heading("1.0 Slotliste", regex!(r"(?i)^1\.0 Slotliste:<br\s?/>$")),
        heading("Godfather v3", regex!(r"(?i)^Godfather v3<br\s?/>$")),
        heading("freie Slots", regex!(r"(?i)^So, hier nun die freien Slots:<br\s?/>$")),
        heading("Mission anzupassen", regex!(r"(?i)Slotliste der Mission anzupassen\.\.\.<br\s?/>$")),
        heading("Plätze verfügbar", regex!(r"(?i)^Folgende Plätze sind verfügbar:<br\s?/>$")),
        heading("Missionsstart 2000h", regex!(r"(?i)^Missionsstart pünktlich 2000h<br\s?/>$")),
        heading("Flughafen", regex!(r"(?i)Flughafen einnehmen, Team Rot verteidigt!<br\s?/>$")),
        heading("roster image", regex!(r"(?i)<img src='http://i\.imgur\.com/zRMqnBu\.png'.*/>.*<br\s?/>$")),
    ]
}
