//! Pattern rules, one module per extracted field.
//!
//! Each module exposes `get()`, the field's rules in priority order. The
//! cascades built from them live next to their callers in `fields.rs` and
//! `roster.rs`.

pub(crate) mod category;
pub(crate) mod date;
pub(crate) mod heading;
pub(crate) mod helpers;
pub(crate) mod name;
pub(crate) mod size;
pub(crate) mod slot_line;
pub(crate) mod time;

#[cfg(test)]
mod tests;
