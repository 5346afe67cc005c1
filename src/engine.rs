//! Rule cascade engine.
//!
//! Every field extractor in this crate works the same way: an ordered list of
//! regular-expression rules is tried against one piece of text and the first
//! rule whose production accepts the captures wins. This module holds that
//! shared machinery so the field modules only declare *what* to match.
//!
//! ## How the parts work together
//!
//! ```text
//! title / body line
//!        │
//!        ├─ ExceptionTable::lookup        (cascade.rs)
//!        │     hand-curated title fixes win outright
//!        │
//!        ├─ TriggerInfo::scan             (trigger.rs)
//!        │     coarse buckets: digits, dots, brackets, ...
//!        │
//!        └─ Cascade::first_match          (cascade.rs)
//!              rules in priority order, skipping those whose buckets
//!              are absent; every occurrence of a rule is offered to its
//!              production before the next rule is tried
//!                     │
//!                     v
//!               CascadeMatch { rule, value }
//! ```
//!
//! Failures never abort a thread. Extractors record them in a [`Diagnostics`]
//! collector (`diagnostics.rs`) and fall back to a sentinel value.
//!
//! ## Responsibilities by module
//!
//! - `cascade.rs`: `Rule`, `Cascade`, `Subject` and `ExceptionTable`.
//! - `trigger.rs`: `BucketMask` and the cheap input scan used for gating.
//! - `diagnostics.rs`: structured, non-fatal problem reports.
//! - `metrics.rs`: stage timings and the per-field rule trace.
//!
//! ## Adding a rule
//!
//! Rules live under `src/rules/**`, one module per field, and are declared with
//! the `rule!` macro. Order in the module's `get()` is priority order. If a
//! rule can only ever match text with some coarse feature (a digit, a dot),
//! declare the bucket so it is skipped cheaply elsewhere.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=slotlist=trace` to see which rules fire per field.

#[path = "engine/cascade.rs"]
mod cascade;
#[path = "engine/diagnostics.rs"]
mod diagnostics;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/trigger.rs"]
mod trigger;

pub use cascade::{Cascade, ExceptionTable, Rule, Subject, production};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Field};
pub use metrics::{RuleTrace, Source, StageMetrics};
pub use trigger::BucketMask;
