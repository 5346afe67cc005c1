extern crate self as slotlist;

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[macro_use]
mod macros;
mod alias;
mod api;
mod classifier;
mod config;
mod engine;
mod event_date;
mod extract;
mod fields;
mod layout;
mod maps;
mod normalize;
mod reconcile;
mod roster;
mod rules;

pub use alias::AliasTable;
pub use api::{
    AttendanceSource, Context, ExtractionDetails, NoAttendance, Options, ThreadExtraction, ThreadExtractionVerbose,
    ThreadOutcome, extract, extract_verbose_with, extract_with,
};
pub use classifier::{Classification, RoleClassifier, RoleRule, Tier};
pub use config::{AttendanceExceptions, ConfigError, Tables, TitleExceptions};
pub use engine::{Diagnostic, DiagnosticKind, Diagnostics, ExceptionTable, Field, RuleTrace, Source, StageMetrics};
pub use event_date::{EventDate, InvalidDate};
pub use fields::{Extracted, extract_category, extract_date, extract_map, extract_name, extract_size, extract_time};
pub use layout::{ThreadPage, thread_id_from_url};
pub use maps::{MapEntry, MapTable};
pub use normalize::{normalize, strip_tags};
pub use reconcile::reconcile;
pub use roster::RosterBuilder;

// --- Vocabularies -------------------------------------------------------------

/// A string that does not name a member of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

vocabulary! {
    /// Event category derived from the thread title.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
    pub enum EventType {
        Coop => "COOP",
        CoopPlus => "COOP_PLUS",
        Tvt => "TVT",
        Blackbox => "BLACKBOX",
        Orga => "ORGA",
        Milsim => "MILSIM",
        Competition => "COMPETITION",
        #[default]
        Unknown => "UNKNOWN",
    }
}

vocabulary! {
    /// Slot role. `Unknown` is the sentinel for labels no tier could classify.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum RoleCategory {
        Co => "CO",
        Xo => "XO",
        Col => "COL",
        Jtac => "JTAC",
        Mio => "MIO",
        Fo => "FO",
        Pl => "PL",
        Psg => "PSG",
        Tc => "TC",
        Gnr => "GNR",
        Drv => "DRV",
        Tl => "TL",
        Sl => "SL",
        Ftl => "FTL",
        Ar => "AR",
        Rfl => "RFL",
        Gre => "GRE",
        Dm => "DM",
        Cmdc => "CMDC",
        Atr => "ATR",
        Aar => "AAR",
        Mg => "MG",
        Amg => "AMG",
        At => "AT",
        Aat => "AAT",
        Aa => "AA",
        Aaa => "AAA",
        Ce => "CE",
        Snp => "SNP",
        Spt => "SPT",
        Log => "LOG",
        Pil => "PIL",
        Cpil => "CPIL",
        Wco => "WCO",
        Wso => "WSO",
        Mdc => "MDC",
        Acso => "ACSO",
        ZcPlus => "ZC_PLUS",
        Uaso => "UASO",
        Ugso => "UGSO",
        Spec => "SPEC",
        Other => "OTHER",
        Unknown => "UNKNOWN",
    }
}

vocabulary! {
    /// Whether a player showed up, as reported by the external attendance source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub enum AttendanceStatus {
        #[default]
        Unknown => "UNKNOWN",
        Appeared => "APPEARED",
        NotAppeared => "NOT_APPEARED",
    }
}

impl RoleCategory {
    /// Every real role, without the `Unknown` sentinel.
    pub fn classifiable() -> impl Iterator<Item = RoleCategory> {
        Self::ALL.iter().copied().filter(|r| *r != RoleCategory::Unknown)
    }
}

// --- Records ------------------------------------------------------------------

/// One filled slot of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Slot number as written in the thread.
    pub key: u32,
    pub role: RoleCategory,
    /// The label as written, kept when it is more than the bare role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_role: Option<String>,
    pub player: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Set when the line carried the "nicht bestätigt" marker.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unconfirmed: bool,
}

/// A player who attended (or was expected) without holding a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEntry {
    pub player: String,
    pub status: AttendanceStatus,
}

/// Slots in thread order plus the reserve list filled by reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub slots: Vec<SlotAssignment>,
    #[serde(default)]
    pub reserve: Vec<ReserveEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_slot(&mut self, slot: SlotAssignment) {
        self.slots.push(slot);
    }

    pub fn push_reserve(&mut self, player: impl Into<String>, status: AttendanceStatus) {
        self.reserve.push(ReserveEntry { player: player.into(), status });
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.reserve.is_empty()
    }

    /// Slot keys that occur more than once, in ascending order.
    pub fn duplicate_keys(&self) -> Vec<u32> {
        let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
        for slot in &self.slots {
            *seen.entry(slot.key).or_default() += 1;
        }
        seen.into_iter().filter(|(_, n)| *n > 1).map(|(k, _)| k).collect()
    }

    pub fn slot_of(&self, player: &str) -> Option<&SlotAssignment> {
        self.slots.iter().find(|s| s.player == player)
    }
}

/// Everything extracted from one event thread.
///
/// Fields that could not be read stay `None`; string fields fall back to
/// `"UNKNOWN"` (creator) or `"Unknown"` (map) and the title (name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub category: EventType,
    pub capacity: Option<u32>,
    pub creator: String,
    pub map: String,
    pub date: Option<EventDate>,
    pub start_time: Option<NaiveTime>,
    pub thread_id: Option<u32>,
    pub post_id: Option<u32>,
    pub roster: Option<Roster>,
}

/// Attendance for one event as recorded by an outside source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAttendance {
    pub category: EventType,
    #[serde(default)]
    pub players: BTreeMap<String, AttendanceStatus>,
}

impl ExternalAttendance {
    pub fn new(category: EventType) -> Self {
        Self { category, players: BTreeMap::new() }
    }

    pub fn with_player(mut self, player: impl Into<String>, status: AttendanceStatus) -> Self {
        self.players.insert(player.into(), status);
        self
    }
}

/// `ExternalAttendance` keyed by its event date, as stored in attendance files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedAttendance {
    pub date: EventDate,
    #[serde(flatten)]
    pub attendance: ExternalAttendance,
}
