//! Curated data tables.
//!
//! Everything the extractors know beyond their own patterns lives in JSON
//! files under `data/`: player aliases, role rules and historical role
//! labels, per-title exception tables, attendance exceptions and the map
//! list. The files are compiled into the binary and parsed once on first use
//! ([`Tables::bundled`]); a directory with the same file names can be loaded
//! instead ([`Tables::load_dir`]).
//!
//! Loading validates everything up front: unknown role or category names,
//! bad dates, regexes that don't compile and alias cycles are all
//! [`ConfigError`]s, so extraction itself never sees a malformed table.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use log::debug;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

use crate::alias::AliasTable;
use crate::classifier::{RoleClassifier, RoleRule};
use crate::engine::ExceptionTable;
use crate::maps::{MapEntry, MapTable};
use crate::normalize::normalize;
use crate::{AttendanceStatus, EventDate, EventType, RoleCategory, UnknownName};

const ALIASES_FILE: &str = "player_aliases.json";
const ROLE_RULES_FILE: &str = "role_rules.json";
const ROLE_LABELS_FILE: &str = "role_labels.json";
const TITLES_FILE: &str = "title_exceptions.json";
const ATTENDANCE_FILE: &str = "attendance_exceptions.json";
const MAPS_FILE: &str = "maps.json";

static BUNDLED: OnceCell<Tables> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON in {file}: {source}")]
    Json { file: &'static str, source: serde_json::Error },
    #[error("invalid {role} pattern in {file}: {source}")]
    Pattern { file: &'static str, role: RoleCategory, source: regex::Error },
    #[error("{source} in {file}")]
    Name { file: &'static str, source: UnknownName },
    #[error("invalid date '{value}' in {file}")]
    Date { file: &'static str, value: String },
    #[error("invalid time '{value}' in {file}")]
    Time { file: &'static str, value: String },
    #[error("player alias cycle through '{0}'")]
    AliasCycle(String),
}

// --- File shapes ----------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AliasFile {
    aliases: Vec<AliasPair>,
}

#[derive(Debug, Deserialize)]
struct AliasPair {
    variant: String,
    canonical: String,
}

#[derive(Debug, Deserialize)]
struct RoleRulesFile {
    rules: Vec<RoleRuleRecord>,
}

#[derive(Debug, Deserialize)]
struct RoleRuleRecord {
    category: String,
    pattern: String,
}

#[derive(Debug, Deserialize)]
struct RoleLabelsFile {
    labels: Vec<RoleLabelRecord>,
}

#[derive(Debug, Deserialize)]
struct RoleLabelRecord {
    label: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct TitlesFile {
    #[serde(default)]
    skip_titles: Vec<String>,
    #[serde(default)]
    date: Vec<TitleDate>,
    #[serde(default)]
    time: Vec<TitleTime>,
    #[serde(default)]
    size: Vec<TitleSize>,
    #[serde(default)]
    category: Vec<TitleCategory>,
    #[serde(default)]
    name: Vec<TitleName>,
}

#[derive(Debug, Deserialize)]
struct TitleDate {
    title: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct TitleTime {
    title: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct TitleSize {
    title: String,
    size: u32,
}

#[derive(Debug, Deserialize)]
struct TitleCategory {
    title: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct TitleName {
    title: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AttendanceFile {
    #[serde(default)]
    category_mismatch: Vec<CategoryMismatch>,
    #[serde(default)]
    unrecorded_players: Vec<String>,
    #[serde(default)]
    dated_players: Vec<DatedPlayers>,
}

#[derive(Debug, Deserialize)]
struct CategoryMismatch {
    date: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct DatedPlayers {
    date: String,
    status: String,
    players: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MapsFile {
    maps: Vec<MapEntry>,
    #[serde(default)]
    aliases: Vec<AliasPair>,
}

// --- Loaded tables --------------------------------------------------------------

/// Per-title overrides consulted before each field cascade.
#[derive(Debug, Clone, Default)]
pub struct TitleExceptions {
    /// Threads whose titles contain one of these are not events.
    pub skip: Vec<String>,
    pub date: ExceptionTable<EventDate>,
    pub time: ExceptionTable<NaiveTime>,
    pub size: ExceptionTable<u32>,
    pub category: ExceptionTable<EventType>,
    pub name: ExceptionTable<String>,
}

impl TitleExceptions {
    pub fn is_skipped(&self, title: &str) -> bool {
        let title = title.trim();
        self.skip.iter().any(|s| title.contains(s.as_str()))
    }
}

/// Known gaps in the external attendance data.
#[derive(Debug, Clone, Default)]
pub struct AttendanceExceptions {
    /// Events whose external category legitimately differs from the title.
    pub category_mismatch: HashMap<EventDate, EventType>,
    /// Players the external source never tracked.
    pub unrecorded_players: HashSet<String>,
    /// Statuses to assume for players missing from one event's attendance.
    pub dated_players: HashMap<EventDate, HashMap<String, AttendanceStatus>>,
}

impl AttendanceExceptions {
    /// True when the external category on `date` is a known, accepted mismatch.
    pub fn accepts_category(&self, date: Option<EventDate>, external: EventType) -> bool {
        date.and_then(|d| self.category_mismatch.get(&d)).is_some_and(|c| *c == external)
    }

    pub fn dated_status(&self, date: Option<EventDate>, player: &str) -> Option<AttendanceStatus> {
        self.dated_players.get(&date?)?.get(player).copied()
    }
}

/// All curated tables, shared by reference between extractions.
#[derive(Debug)]
pub struct Tables {
    pub aliases: AliasTable,
    pub classifier: RoleClassifier,
    pub titles: TitleExceptions,
    pub attendance: AttendanceExceptions,
    pub maps: MapTable,
}

/// Raw JSON text of the six table files.
struct Sources {
    aliases: String,
    role_rules: String,
    role_labels: String,
    titles: String,
    attendance: String,
    maps: String,
}

impl Tables {
    /// The tables compiled into the crate, parsed on first call.
    pub fn bundled() -> Result<&'static Tables, ConfigError> {
        BUNDLED.get_or_try_init(|| {
            Self::from_sources(Sources {
                aliases: include_str!("../data/player_aliases.json").to_string(),
                role_rules: include_str!("../data/role_rules.json").to_string(),
                role_labels: include_str!("../data/role_labels.json").to_string(),
                titles: include_str!("../data/title_exceptions.json").to_string(),
                attendance: include_str!("../data/attendance_exceptions.json").to_string(),
                maps: include_str!("../data/maps.json").to_string(),
            })
        })
    }

    /// Load the six table files from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Tables, ConfigError> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })
        };
        Self::from_sources(Sources {
            aliases: read(ALIASES_FILE)?,
            role_rules: read(ROLE_RULES_FILE)?,
            role_labels: read(ROLE_LABELS_FILE)?,
            titles: read(TITLES_FILE)?,
            attendance: read(ATTENDANCE_FILE)?,
            maps: read(MAPS_FILE)?,
        })
    }

    fn from_sources(src: Sources) -> Result<Tables, ConfigError> {
        let aliases: AliasFile = parse_json(ALIASES_FILE, &src.aliases)?;
        let aliases = AliasTable::new(aliases.aliases.into_iter().map(|a| (a.variant, a.canonical)))?;

        let rules: RoleRulesFile = parse_json(ROLE_RULES_FILE, &src.role_rules)?;
        let rules = rules
            .rules
            .into_iter()
            .map(|r| {
                let role = parse_name::<RoleCategory>(ROLE_RULES_FILE, &r.category)?;
                RoleRule::new(role, &r.pattern).map_err(|source| ConfigError::Pattern {
                    file: ROLE_RULES_FILE,
                    role,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let labels: RoleLabelsFile = parse_json(ROLE_LABELS_FILE, &src.role_labels)?;
        let labels = labels
            .labels
            .into_iter()
            .map(|l| Ok((l.label, parse_name::<RoleCategory>(ROLE_LABELS_FILE, &l.role)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let classifier = RoleClassifier::new(rules, labels);

        let titles = load_titles(parse_json(TITLES_FILE, &src.titles)?)?;
        let attendance = load_attendance(parse_json(ATTENDANCE_FILE, &src.attendance)?)?;

        let maps: MapsFile = parse_json(MAPS_FILE, &src.maps)?;
        let maps = MapTable::new(maps.maps, maps.aliases.into_iter().map(|a| (a.variant, a.canonical)).collect());

        debug!(
            "tables loaded: {} aliases, {} role rules, {} role labels, {} maps",
            aliases.len(),
            classifier.rule_count(),
            classifier.lookup_len(),
            maps.len()
        );

        Ok(Tables { aliases, classifier, titles, attendance, maps })
    }
}

fn parse_json<'de, T: Deserialize<'de>>(file: &'static str, text: &'de str) -> Result<T, ConfigError> {
    serde_json::from_str(text).map_err(|source| ConfigError::Json { file, source })
}

fn parse_name<T>(file: &'static str, name: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = UnknownName>,
{
    name.parse().map_err(|source| ConfigError::Name { file, source })
}

fn parse_date(file: &'static str, value: &str) -> Result<EventDate, ConfigError> {
    value.parse().map_err(|_| ConfigError::Date { file, value: value.to_string() })
}

fn load_titles(file: TitlesFile) -> Result<TitleExceptions, ConfigError> {
    // keys are compared against normalized titles
    let key = |title: &str| normalize(title).trim().to_string();

    let date = file
        .date
        .iter()
        .map(|e| Ok((key(&e.title), parse_date(TITLES_FILE, &e.date)?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    let time = file
        .time
        .iter()
        .map(|e| {
            let time = NaiveTime::parse_from_str(&e.time, "%H:%M:%S")
                .map_err(|_| ConfigError::Time { file: TITLES_FILE, value: e.time.clone() })?;
            Ok((key(&e.title), time))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    let category = file
        .category
        .iter()
        .map(|e| Ok((key(&e.title), parse_name::<EventType>(TITLES_FILE, &e.category)?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(TitleExceptions {
        skip: file.skip_titles.iter().map(|t| key(t)).collect(),
        date: ExceptionTable::new(date),
        time: ExceptionTable::new(time),
        size: ExceptionTable::new(file.size.iter().map(|e| (key(&e.title), e.size)).collect()),
        category: ExceptionTable::new(category),
        name: ExceptionTable::new(file.name.iter().map(|e| (key(&e.title), e.name.clone())).collect()),
    })
}

fn load_attendance(file: AttendanceFile) -> Result<AttendanceExceptions, ConfigError> {
    let mut out = AttendanceExceptions {
        unrecorded_players: file.unrecorded_players.into_iter().collect(),
        ..Default::default()
    };

    for entry in file.category_mismatch {
        let date = parse_date(ATTENDANCE_FILE, &entry.date)?;
        out.category_mismatch.insert(date, parse_name(ATTENDANCE_FILE, &entry.category)?);
    }

    for entry in file.dated_players {
        let date = parse_date(ATTENDANCE_FILE, &entry.date)?;
        let status: AttendanceStatus = parse_name(ATTENDANCE_FILE, &entry.status)?;
        let players = out.dated_players.entry(date).or_default();
        for player in entry.players {
            players.insert(player, status);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tables_load() {
        let tables = Tables::bundled().unwrap();
        assert!(tables.aliases.len() > 50);
        assert!(tables.classifier.rule_count() > 30);
        assert!(tables.classifier.lookup_len() > 1000);
        assert!(!tables.titles.skip.is_empty());
        assert!(!tables.titles.size.is_empty());
        assert!(tables.maps.len() > 20);
        assert!(!tables.attendance.unrecorded_players.is_empty());
    }

    #[test]
    fn bundled_is_shared() {
        let a = Tables::bundled().unwrap() as *const Tables;
        let b = Tables::bundled().unwrap() as *const Tables;
        assert_eq!(a, b);
    }

    #[test]
    fn bundled_title_exceptions() {
        let titles = &Tables::bundled().unwrap().titles;
        assert_eq!(titles.date.lookup("Mini Sylvester Event"), Some(&EventDate::new(31, 12, 2013)));
        assert_eq!(
            titles.time.lookup("[06.02.] Comp58 OP Greeks Meet"),
            Some(&NaiveTime::from_hms_opt(19, 15, 0).unwrap())
        );
        assert_eq!(titles.name.lookup("[20.04] Co37 - (OP) Red Tsunami"), Some(&"Red Tsunami".to_string()));
        assert!(titles.is_skipped("[Alter Thread] WR2"));
        assert!(!titles.is_skipped("[15.03.2014] CO40 Example"));
    }

    #[test]
    fn bundled_attendance_exceptions() {
        let attendance = &Tables::bundled().unwrap().attendance;
        let date = EventDate::new(9, 1, 2015);
        assert!(attendance.accepts_category(Some(date), EventType::CoopPlus));
        assert!(!attendance.accepts_category(Some(date), EventType::Tvt));
        assert!(!attendance.accepts_category(None, EventType::CoopPlus));
        assert_eq!(
            attendance.dated_status(Some(EventDate::new(15, 1, 2015)), "Sunny"),
            Some(AttendanceStatus::Appeared)
        );
    }

    #[test]
    fn bad_role_name_is_reported() {
        let err = parse_name::<RoleCategory>(ROLE_RULES_FILE, "WIZARD").unwrap_err();
        assert!(err.to_string().contains("WIZARD"));
        assert!(err.to_string().contains(ROLE_RULES_FILE));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = Tables::load_dir("/nonexistent/slotlist-data").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_dir_reads_the_shipped_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let tables = Tables::load_dir(dir).unwrap();
        assert_eq!(tables.maps.len(), Tables::bundled().unwrap().maps.len());
    }
}
