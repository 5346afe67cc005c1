//! Event category rules (title).

use crate::EventType;
use crate::engine::Rule;

pub fn get() -> Vec<Rule<EventType>> {
    vec![
        rule! {
            name: "coop",
            pattern: r"(?i)(?:CO|COOP)\s?\d",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Coop) },
        },
        rule! {
            name: "coop plus",
            pattern: r"(?i)(?:CO|COOP)\+\s?\d",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::CoopPlus) },
        },
        rule! {
            name: "tvt",
            pattern: r"(?i)TVT[\s+]{0,2}\d|TVT-EVENT|TVT [A-Za-z]|S-PVP|SKIRMISH",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Tvt) },
        },
        rule! {
            name: "blackbox",
            pattern: r"(?i)(?:BB|BLACKBOX)\s?\d",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Blackbox) },
        },
        rule! {
            name: "competition",
            pattern: r"(?i)COMP\s?\d",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Competition) },
        },
        rule! {
            name: "milsim",
            pattern: r"(?i)(?:MILSIM\+?|MIL)\s?\d",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Milsim) },
        },
        rule! {
            name: "orga",
            pattern: r"(?i)ORG[A\s-]{0,4}[\dX]|TRAINING|ÜBUNG|THEORIE|VORTRAG",
            prod: |_caps, _subject| -> Option<EventType> { Some(EventType::Orga) },
        },
    ]
}
