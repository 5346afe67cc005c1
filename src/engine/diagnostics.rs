//! Non-fatal problem reports.
//!
//! Extraction never stops on a bad field. Whatever went wrong is pushed here
//! with the field it concerns and the pipeline carries on with a sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A field had no exception entry and no cascade rule matched.
    UnparseableField,
    /// A roster role label matched no classifier tier.
    ClassificationMiss,
    /// External attendance disagrees with the thread.
    ReconciliationConflict,
    /// The page or roster does not have the expected shape.
    StructuralAnomaly,
}

/// The record field (or pipeline stage) a diagnostic or trace entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Date,
    Time,
    Size,
    Category,
    Name,
    Map,
    Creator,
    ThreadId,
    PostId,
    Roster,
    Role,
    Attendance,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::Time => "time",
            Field::Size => "size",
            Field::Category => "category",
            Field::Name => "name",
            Field::Map => "map",
            Field::Creator => "creator",
            Field::ThreadId => "thread_id",
            Field::PostId => "post_id",
            Field::Roster => "roster",
            Field::Role => "role",
            Field::Attendance => "attendance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub field: Field,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field.as_str(), self.message)
    }
}

/// Collector for one extraction run. Order of insertion is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, field: Field, message: impl Into<String>) {
        let diagnostic = Diagnostic { kind, field, message: message.into() };
        log::debug!("diagnostic {:?}: {}", kind, diagnostic);
        self.items.push(diagnostic);
    }

    pub fn unparseable(&mut self, field: Field, message: impl Into<String>) {
        self.push(DiagnosticKind::UnparseableField, field, message);
    }

    pub fn structural(&mut self, field: Field, message: impl Into<String>) {
        self.push(DiagnosticKind::StructuralAnomaly, field, message);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
