//! The per-thread pipeline: layout, fields, roster, reconciliation.
//!
//! Every stage is timed and every field remembers where its value came from;
//! the plain API entry points drop that detail, the verbose one returns it.

use std::time::Instant;

use chrono::Datelike;
use log::info;

use crate::api::{AttendanceSource, Context, Options, ThreadOutcome};
use crate::config::Tables;
use crate::engine::{DiagnosticKind, Diagnostics, Field, RuleTrace, Source, StageMetrics};
use crate::fields::{self, Extracted};
use crate::layout::{ThreadPage, thread_id_from_url};
use crate::reconcile::reconcile;
use crate::roster::RosterBuilder;
use crate::{EventDate, EventRecord};

/// Everything one run produced.
#[derive(Debug)]
pub(crate) struct Run {
    pub outcome: ThreadOutcome,
    pub diagnostics: Diagnostics,
    pub title: Option<String>,
    pub trace: Vec<RuleTrace>,
    pub metrics: StageMetrics,
}

#[derive(Default)]
struct Tracer {
    entries: Vec<RuleTrace>,
}

impl Tracer {
    fn take<T>(&mut self, field: Field, extracted: Extracted<T>) -> T {
        self.entries.push(RuleTrace { field, source: extracted.source });
        extracted.value
    }
}

pub(crate) fn run(
    lines: &[&str],
    tables: &Tables,
    context: &Context,
    options: &Options,
    attendance: &dyn AttendanceSource,
) -> Run {
    let started = Instant::now();
    let mut diagnostics = Diagnostics::new();
    let mut metrics = StageMetrics::default();

    // --- Layout ---
    let stage = Instant::now();
    let page = ThreadPage::locate(lines, &mut diagnostics);
    metrics.layout = stage.elapsed();

    let Some(page) = page else {
        metrics.total = started.elapsed();
        return Run { outcome: ThreadOutcome::Unreadable, diagnostics, title: None, trace: Vec::new(), metrics };
    };

    if tables.titles.is_skipped(&page.title) {
        info!("skipping '{}': not an event thread", page.title);
        metrics.total = started.elapsed();
        let title = page.title.clone();
        // Layout problems of a non-event page are not worth reporting.
        return Run {
            outcome: ThreadOutcome::NotAnEvent { title: page.title },
            diagnostics: Diagnostics::new(),
            title: Some(title),
            trace: Vec::new(),
            metrics,
        };
    }

    // --- Fields ---
    let stage = Instant::now();
    let mut tracer = Tracer::default();
    let titles = &tables.titles;
    let title = page.title.as_str();
    let current_year = context.reference_date.year();

    let date = tracer.take(
        Field::Date,
        fields::extract_date(title, page.posted_at, titles, current_year, &mut diagnostics),
    );
    let start_time = tracer.take(Field::Time, fields::extract_time(title, page.body, titles, &mut diagnostics));
    let capacity = tracer.take(Field::Size, fields::extract_size(title, titles, &mut diagnostics));
    let category = tracer.take(Field::Category, fields::extract_category(title, titles, &mut diagnostics));
    let name = tracer.take(Field::Name, fields::extract_name(title, titles, &mut diagnostics));
    let map = tracer.take(Field::Map, fields::extract_map(page.body, &tables.maps));

    let from_url = context.source_url.as_deref().and_then(thread_id_from_url);
    let (thread_id, source) = match (from_url, page.thread_id) {
        (Some(id), _) => (Some(id), Source::Rule("source url")),
        (None, Some(id)) => (Some(id), Source::Rule("page link")),
        (None, None) => {
            diagnostics.unparseable(Field::ThreadId, format!("no thread id for '{title}'"));
            (None, Source::Fallback)
        }
    };
    tracer.entries.push(RuleTrace { field: Field::ThreadId, source });

    let creator = tables.aliases.resolve(&page.creator).to_string();
    metrics.fields = stage.elapsed();

    // --- Roster ---
    let stage = Instant::now();
    let roster = RosterBuilder::from_tables(tables).build(page.body, &mut diagnostics);
    metrics.roster = stage.elapsed();

    // --- Reconciliation ---
    let stage = Instant::now();
    let external = date.and_then(|d| attendance.attendance_for(&d));
    if external.is_none() && options.report_missing_attendance {
        report_missing(date, context, title, &mut diagnostics);
    }
    let roster = roster.map(|r| reconcile(r, category, date, external, &tables.attendance, &mut diagnostics));
    metrics.reconcile = stage.elapsed();

    let record = EventRecord {
        name,
        category,
        capacity,
        creator,
        map,
        date,
        start_time,
        thread_id,
        post_id: page.post_id,
        roster,
    };

    metrics.total = started.elapsed();
    Run {
        outcome: ThreadOutcome::Event(record),
        diagnostics,
        title: Some(page.title.clone()),
        trace: tracer.entries,
        metrics,
    }
}

/// Events in the past are expected to have an attendance record.
fn report_missing(date: Option<EventDate>, context: &Context, title: &str, diagnostics: &mut Diagnostics) {
    let Some(day) = date.and_then(|d| d.to_naive()) else {
        return;
    };
    if day < context.reference_date {
        diagnostics.push(
            DiagnosticKind::ReconciliationConflict,
            Field::Attendance,
            format!("no external attendance for '{title}' on {}", day.format("%d.%m.%Y")),
        );
    }
}
