use chrono::NaiveTime;

use crate::EventType;
use crate::engine::{Cascade, Field, Subject};
use crate::rules::date::DateMatch;
use crate::rules::slot_line::{SlotLine, split_unconfirmed};
use crate::rules::{category, date, heading, name, size, slot_line, time};

const POSTED: &str = "Verfasst am 10.03.2014 18:21";

#[test]
fn date_examples_matching() {
    // Array of ((day, month, year), title)
    let cases: Vec<((u32, u32, i32), &str)> = vec![
        ((15, 3, 2014), "[15.03.2014] CO40 Example"),
        ((7, 2, 2014), "[7.2.2014] TvT 20 Example"),
        ((13, 10, 2012), "13.10.12 CO30 Example"),
        ((2, 3, 2014), "[02.03] Dessert"),
        ((15, 3, 2014), "[15.03.] CO40 Example"),
        ((2, 3, 2014), "[2.03.] CO20 Example"),
        ((7, 2, 2014), "[7.2.14] CO20 Example"),
        ((7, 2, 2014), "[7.2.] CO20 Example"),
    ];

    let cascade = Cascade::new(Field::Date, date::get());

    for ((day, month, year), input) in cases {
        let hit = cascade.first_match(&Subject::with_context(input, Some(POSTED)));
        let expected = DateMatch { day, month, year: Some(year) };
        assert_eq!(hit.as_ref().map(|h| h.value), Some(expected), "wrong date for title '{}' (hit: {:?})", input, hit);
    }
}

#[test]
fn date_year_is_missing_without_posted_line() {
    let cascade = Cascade::new(Field::Date, date::get());
    let hit = cascade.first_match(&Subject::new("[15.03.] CO40 Example")).unwrap();
    assert_eq!(hit.value, DateMatch { day: 15, month: 3, year: None });
    assert!(cascade.first_match(&Subject::new("CO40 Example")).is_none());
}

#[test]
fn time_examples_matching() {
    let cases: Vec<(Option<(u32, u32)>, &str)> = vec![
        (Some((20, 0)), "Beginn: 20:00 Uhr<br />"),
        (Some((19, 30)), "Start: 1930<br />"),
        (Some((20, 15)), "Eventbeginn: &gt; 20.15 Uhr<br />"),
        (Some((19, 45)), "Treffen um 19.45 Uhr"),
        (Some((8, 15)), "Uhrzeit: 8:15"),
        (None, "Beginn: 25:00<br />"),
        (None, "Karte: Altis<br />"),
    ];

    let cascade = Cascade::new(Field::Time, time::get());

    for (expected, input) in cases {
        let got = cascade.first_match(&Subject::new(input)).map(|h| h.value);
        let expected = expected.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
        assert_eq!(got, expected, "wrong start time for line '{}'", input);
    }
}

#[test]
fn size_examples_matching() {
    let cases: Vec<(Option<u32>, &str)> = vec![
        (Some(40), "[15.03.2014] CO40 Example"),
        (Some(20), "TvT 20 Example"),
        (Some(15), "CO+15 Example"),
        (Some(12), "Coop+ 12 Example"),
        (None, "TvT 00 Test"),
        (None, "Stammtisch"),
    ];

    let cascade = Cascade::new(Field::Size, size::get());

    for (expected, input) in cases {
        let got = cascade.first_match(&Subject::new(input)).map(|h| h.value);
        assert_eq!(got, expected, "wrong size for title '{}'", input);
    }
}

#[test]
fn category_examples_matching() {
    let cases: Vec<(Option<EventType>, &str)> = vec![
        (Some(EventType::Coop), "CO40 Example"),
        (Some(EventType::CoopPlus), "CO+15 Example"),
        (Some(EventType::Tvt), "TvT 20 Example"),
        (Some(EventType::Blackbox), "BB12 Box"),
        (Some(EventType::Competition), "Comp58 OP Greeks"),
        (Some(EventType::Milsim), "MILSIM 30 Example"),
        (Some(EventType::Orga), "[12.03.2014] Übung Funk"),
        (Some(EventType::Orga), "Orga X Treffen"),
        // Earlier rules win when a title fits several.
        (Some(EventType::Coop), "CO40 TvT 20"),
        (None, "Stammtisch"),
    ];

    let cascade = Cascade::new(Field::Category, category::get());

    for (expected, input) in cases {
        let got = cascade.first_match(&Subject::new(input)).map(|h| h.value);
        assert_eq!(got, expected, "wrong category for title '{}'", input);
    }
}

#[test]
fn name_examples_matching() {
    let cases: Vec<(Option<&str>, &str)> = vec![
        (Some("Example"), "[15.03.2014] CO40 Example"),
        (Some("Operation Example"), "[15.03.2014] CO40 - Operation Example"),
        (Some("Black Hawk Down"), "[03.04.2014] CO20 Black Hawk Down v2"),
        (Some("Fast Rope"), "[15.03.2014] TvT 20 \"Fast Rope\" (Test)"),
        (Some("Zeus Abend"), "[01.02.2014] Coop 12 - Zeus Abend [Test]"),
        (Some("Stammtisch"), "Stammtisch"),
        (None, "[12.03.2014] 12345"),
    ];

    let cascade = Cascade::new(Field::Name, name::get());

    for (expected, input) in cases {
        let got = cascade.first_match(&Subject::new(input)).map(|h| h.value);
        assert_eq!(got.as_deref(), expected, "wrong name for title '{}'", input);
    }
}

#[test]
fn heading_examples_matching() {
    let cases: Vec<(bool, &str)> = vec![
        (true, "Slotliste:<br />"),
        (true, "Slotliste"),
        (true, "Anmeldungen &lt;&lt;<br />"),
        (true, "Wer kommt?<br />"),
        (true, "Teilnehmer - bitte eintragen"),
        (true, "Slot´s<br />"),
        (false, "#1 - Rifleman - Bob<br />"),
        (false, "Die Slotliste wird später veröffentlicht<br />"),
    ];

    let cascade = Cascade::new(Field::Roster, heading::get());

    for (expected, input) in cases {
        let got = cascade.first_match(&Subject::new(input)).is_some();
        assert_eq!(got, expected, "heading detection wrong for line '{}'", input);
    }
}

#[test]
fn slot_line_examples_matching() {
    // Array of (expected (key, label, player, unconfirmed), line)
    let cases: Vec<(Option<(u32, &str, &str, bool)>, &str)> = vec![
        (Some((1, "Platoon Leader", "RaXuS", false)), "#1 - Platoon Leader - RaXuS<br />"),
        (Some((2, "Rifleman - AT", "Bob", false)), "#2 - Rifleman - AT - Bob<br />"),
        (Some((3, "Rifleman", "Carl", false)), "#3 - Rifleman - [W] Carl<br />"),
        (Some((3, "Rifleman", "Carl", true)), "#3 - Rifleman - Carl - nicht bestätigt<br />"),
        (Some((4, "Medic", "Dora", false)), "#4 Medic - W Dora<br />"),
        (Some((6, "Grenadier", "Eve", false)), "#6: Grenadier - Eve<br />"),
        (Some((7, "Sniper", "Frank", false)), "#7 - Sniper - Frank"),
        (Some((8, "Pilot", "Gus", false)), "[8] Pilot - Gus<br />"),
        (Some((9, "Co-Pilot", "Hank", false)), "9. Co-Pilot - Hank<br />"),
        (Some((10, "Autorifleman", "Ida", false)), "#10 Autorifleman / Ida<br />"),
        (Some((11, "Squad Leader (Alpha)", "Bob", false)), "#11 - Squad Leader (Alpha) - Bob<br />"),
        (Some((12, "???", "Dora", false)), "#12 - ??? - Dora<br />"),
        // Free slots have no player.
        (None, "#5 - Rifleman - <br />"),
        (None, "#13 - Rifleman - -<br />"),
        (None, "Karte: Altis<br />"),
    ];

    let cascade = Cascade::new(Field::Roster, slot_line::get());

    for (expected, input) in cases {
        let (line, unconfirmed) = split_unconfirmed(input);
        let got = cascade.first_match(&Subject::new(&line)).map(|h| (h.value, unconfirmed));
        let expected = expected.map(|(key, label, player, unconfirmed)| {
            (SlotLine { key, label: label.to_string(), player: player.to_string() }, unconfirmed)
        });
        assert_eq!(got, expected, "wrong slot for line '{}'", input);
    }
}

#[test]
fn cascades_have_named_rules() {
    let names = Cascade::new(Field::Date, date::get()).rule_names();
    assert_eq!(names.len(), 15);
    assert_eq!(names[14], "d.m. + posted year");
    assert_eq!(names[0], "dd.mm.yyyy");
    assert_eq!(Cascade::new(Field::Time, time::get()).len(), 3);
}
