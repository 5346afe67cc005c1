use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::{ConfigError, Tables};
use crate::engine::{Diagnostic, RuleTrace, StageMetrics};
use crate::extract as pipeline;
use crate::{EventDate, EventRecord, ExternalAttendance};

/// Extraction context.
///
/// Holds what the page itself does not say: today's date (the upper bound for
/// plausible event years) and the URL the page was fetched from.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference date; events before it are "in the past".
    pub reference_date: NaiveDate,
    /// URL of the thread, the preferred source of the thread id.
    pub source_url: Option<String>,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { reference_date: NaiveDate::from_ymd_opt(2016, 6, 1).unwrap_or(NaiveDate::MIN), source_url: None }
        } else {
            Self { reference_date: Local::now().date_naive(), source_url: None }
        }
    }
}

/// Options that affect extraction behavior.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Report past events that have no external attendance record.
    pub report_missing_attendance: bool,
}

/// Where external attendance comes from, keyed by event date.
pub trait AttendanceSource {
    fn attendance_for(&self, date: &EventDate) -> Option<&ExternalAttendance>;
}

impl<S: BuildHasher> AttendanceSource for HashMap<EventDate, ExternalAttendance, S> {
    fn attendance_for(&self, date: &EventDate) -> Option<&ExternalAttendance> {
        self.get(date)
    }
}

impl AttendanceSource for BTreeMap<EventDate, ExternalAttendance> {
    fn attendance_for(&self, date: &EventDate) -> Option<&ExternalAttendance> {
        self.get(date)
    }
}

/// No external data at all; every roster keeps `UNKNOWN` statuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttendance;

impl AttendanceSource for NoAttendance {
    fn attendance_for(&self, _date: &EventDate) -> Option<&ExternalAttendance> {
        None
    }
}

/// What became of one thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ThreadOutcome {
    Event(EventRecord),
    /// The title is on the not-an-event list.
    NotAnEvent { title: String },
    /// No thread title on the page.
    Unreadable,
}

/// Result from [`extract`] and [`extract_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ThreadExtraction {
    #[serde(flatten)]
    pub outcome: ThreadOutcome,
    pub diagnostics: Vec<Diagnostic>,
    /// Total time spent on the thread.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ThreadExtraction {
    pub fn record(&self) -> Option<&EventRecord> {
        match &self.outcome {
            ThreadOutcome::Event(record) => Some(record),
            _ => None,
        }
    }
}

/// Additional details returned by [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionDetails {
    /// Normalized title, when the page had one.
    pub title: Option<String>,
    /// Which exception, rule or fallback produced each field, in extraction order.
    pub trace: Vec<RuleTrace>,
    pub metrics: StageMetrics,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ThreadExtractionVerbose {
    pub outcome: ThreadOutcome,
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed: Duration,
    pub details: ExtractionDetails,
}

impl ThreadExtractionVerbose {
    pub fn record(&self) -> Option<&EventRecord> {
        match &self.outcome {
            ThreadOutcome::Event(record) => Some(record),
            _ => None,
        }
    }
}

/// Extract one thread with the bundled tables, a default [`Context`] and no
/// attendance data.
///
/// # Example
/// ```
/// let lines = [
///     "<td class='forum_thread_title'><strong>[15.03.2014] CO40 Example</strong></td>",
///     "<!--sub_forum_post_message-->",
/// ];
/// let out = slotlist::extract(&lines).unwrap();
/// assert_eq!(out.record().map(|r| r.capacity), Some(Some(40)));
/// ```
pub fn extract(lines: &[&str]) -> Result<ThreadExtraction, ConfigError> {
    let tables = Tables::bundled()?;
    Ok(extract_with(lines, tables, &Context::default(), &Options::default(), &NoAttendance))
}

/// Extract one thread with explicit tables, context, options and attendance.
///
/// Never fails: whatever could not be read is reported in `diagnostics`.
pub fn extract_with(
    lines: &[&str],
    tables: &Tables,
    context: &Context,
    options: &Options,
    attendance: &dyn AttendanceSource,
) -> ThreadExtraction {
    let run = pipeline::run(lines, tables, context, options, attendance);
    ThreadExtraction { outcome: run.outcome, diagnostics: run.diagnostics.into_vec(), elapsed: run.metrics.total }
}

/// Like [`extract_with`], and also report which rule produced each field and
/// how long each stage took.
pub fn extract_verbose_with(
    lines: &[&str],
    tables: &Tables,
    context: &Context,
    options: &Options,
    attendance: &dyn AttendanceSource,
) -> ThreadExtractionVerbose {
    let run = pipeline::run(lines, tables, context, options, attendance);
    ThreadExtractionVerbose {
        outcome: run.outcome,
        diagnostics: run.diagnostics.into_vec(),
        elapsed: run.metrics.total,
        details: ExtractionDetails { title: run.title, trace: run.trace, metrics: run.metrics },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DiagnosticKind, Field, Source};
    use crate::layout::tests::PAGE;
    use crate::{AttendanceStatus, EventType, ReserveEntry, RoleCategory};
    use chrono::NaiveTime;

    fn tables() -> &'static Tables {
        Tables::bundled().unwrap()
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<(DiagnosticKind, Field)> {
        diagnostics.iter().map(|d| (d.kind, d.field)).collect()
    }

    #[test]
    fn extracts_the_event_record() {
        let out = extract_with(PAGE, tables(), &Context::default(), &Options::default(), &NoAttendance);
        let record = out.record().unwrap();

        assert_eq!(record.name, "Operation Example");
        assert_eq!(record.category, EventType::Coop);
        assert_eq!(record.capacity, Some(40));
        assert_eq!(record.creator, "Zabuza");
        assert_eq!(record.map, "Altis");
        assert_eq!(record.date, Some(EventDate::new(15, 3, 2014)));
        assert_eq!(record.start_time, NaiveTime::from_hms_opt(20, 0, 0));
        assert_eq!(record.thread_id, Some(1234));
        assert_eq!(record.post_id, Some(5678));

        let roster = record.roster.as_ref().unwrap();
        let slots: Vec<(u32, RoleCategory, &str)> =
            roster.slots.iter().map(|s| (s.key, s.role, s.player.as_str())).collect();
        assert_eq!(
            slots,
            vec![
                (1, RoleCategory::Pl, "RaXuS"),
                (2, RoleCategory::Sl, "Bob"),
                (3, RoleCategory::Rfl, "Carl"),
                (4, RoleCategory::Unknown, "Dora"),
            ]
        );
        assert!(roster.slots[2].unconfirmed);

        assert_eq!(kinds(&out.diagnostics), vec![(DiagnosticKind::ClassificationMiss, Field::Role)]);
    }

    #[test]
    fn reconciles_against_external_attendance() {
        let mut attendance = BTreeMap::new();
        attendance.insert(
            EventDate::new(15, 3, 2014),
            ExternalAttendance::new(EventType::Coop)
                .with_player("RaXuS", AttendanceStatus::Appeared)
                .with_player("Bob", AttendanceStatus::NotAppeared)
                .with_player("Eve", AttendanceStatus::Appeared),
        );

        let out = extract_with(PAGE, tables(), &Context::default(), &Options::default(), &attendance);
        let roster = out.record().and_then(|r| r.roster.as_ref()).unwrap();

        let statuses: Vec<AttendanceStatus> = roster.slots.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                AttendanceStatus::Appeared,
                AttendanceStatus::NotAppeared,
                AttendanceStatus::Unknown,
                AttendanceStatus::Unknown,
            ]
        );
        let eve = ReserveEntry { player: "Eve".to_string(), status: AttendanceStatus::Appeared };
        assert_eq!(roster.reserve, vec![eve]);

        let conflicts = out.diagnostics.iter().filter(|d| d.kind == DiagnosticKind::ReconciliationConflict).count();
        assert_eq!(conflicts, 2);
    }

    #[test]
    fn accepted_category_mismatch_keeps_the_title_category() {
        let mut lines = PAGE.to_vec();
        lines[1] = "<td class='forum_thread_title'><strong>[09.01.2015] CO40 Operation Example</strong></td>";
        let mut attendance = BTreeMap::new();
        attendance.insert(
            EventDate::new(9, 1, 2015),
            ExternalAttendance::new(EventType::CoopPlus).with_player("RaXuS", AttendanceStatus::Appeared),
        );

        let out = extract_with(&lines, tables(), &Context::default(), &Options::default(), &attendance);
        let record = out.record().unwrap();

        assert_eq!(record.category, EventType::Coop);
        let roster = record.roster.as_ref().unwrap();
        assert_eq!(roster.slots[0].status, AttendanceStatus::Appeared);
        assert!(out.diagnostics.iter().all(|d| d.field != Field::Category));
    }

    #[test]
    fn source_url_wins_over_page_links() {
        let context = Context { source_url: Some("viewthread.php?thread_id=42".to_string()), ..Context::default() };
        let out = extract_with(PAGE, tables(), &context, &Options::default(), &NoAttendance);
        assert_eq!(out.record().and_then(|r| r.thread_id), Some(42));
    }

    #[test]
    fn missing_attendance_is_reported_on_request() {
        let options = Options { report_missing_attendance: true };
        let out = extract_with(PAGE, tables(), &Context::default(), &options, &NoAttendance);
        assert!(out.diagnostics.iter().any(|d| d.kind == DiagnosticKind::ReconciliationConflict));

        let empty: HashMap<EventDate, ExternalAttendance> = HashMap::new();
        let out = extract_with(PAGE, tables(), &Context::default(), &Options::default(), &empty);
        assert!(out.diagnostics.iter().all(|d| d.kind != DiagnosticKind::ReconciliationConflict));
    }

    #[test]
    fn skipped_and_unreadable_threads() {
        let lines = ["<td class='forum_thread_title'><strong>[Alter Thread] WR2</strong></td>"];
        let out = extract_with(&lines, tables(), &Context::default(), &Options::default(), &NoAttendance);
        assert_eq!(out.outcome, ThreadOutcome::NotAnEvent { title: "[Alter Thread] WR2".to_string() });
        assert!(out.diagnostics.is_empty());

        let out = extract_with(&["<html>"], tables(), &Context::default(), &Options::default(), &NoAttendance);
        assert_eq!(out.outcome, ThreadOutcome::Unreadable);
        assert_eq!(kinds(&out.diagnostics), vec![(DiagnosticKind::StructuralAnomaly, Field::Title)]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = extract_with(PAGE, tables(), &Context::default(), &Options::default(), &NoAttendance);
        let second = extract_with(PAGE, tables(), &Context::default(), &Options::default(), &NoAttendance);
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn verbose_includes_trace_and_metrics() {
        let out = extract_verbose_with(PAGE, tables(), &Context::default(), &Options::default(), &NoAttendance);

        assert_eq!(out.elapsed, out.details.metrics.total);
        assert!(out.details.metrics.roster <= out.details.metrics.total);
        assert_eq!(out.details.title.as_deref(), Some("[15.03.2014] CO40 Operation Example"));

        let date = out.details.trace.iter().find(|t| t.field == Field::Date).unwrap();
        assert_eq!(date.source, Source::Rule("dd.mm.yyyy"));
        let map = out.details.trace.iter().find(|t| t.field == Field::Map).unwrap();
        assert_eq!(map.source, Source::Rule("map line"));
    }

    #[test]
    fn extract_uses_bundled_tables() {
        let out = extract(PAGE).unwrap();
        assert_eq!(out.record().map(|r| r.name.as_str()), Some("Operation Example"));
    }
}
