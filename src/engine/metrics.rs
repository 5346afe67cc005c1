//! Extraction run metrics.
//!
//! Collected only by the verbose entry point. `StageMetrics` times the four
//! stages of one thread; `RuleTrace` records which rule (or exception, or
//! fallback) produced each field.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::diagnostics::Field;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageMetrics {
    /// Locating title, creator and body on the page.
    pub layout: Duration,
    /// Title and body field extractors.
    pub fields: Duration,
    /// Roster state machine.
    pub roster: Duration,
    /// Attendance reconciliation.
    pub reconcile: Duration,
    pub total: Duration,
}

/// Where a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum Source {
    /// Hand-curated title exception table.
    Exception,
    /// A named cascade rule.
    Rule(&'static str),
    /// Nothing matched; the sentinel was used.
    Fallback,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Exception => f.write_str("exception table"),
            Source::Rule(name) => write!(f, "rule '{name}'"),
            Source::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleTrace {
    pub field: Field,
    pub source: Source,
}
