//! Calendar view assembly over immutable tracker snapshots.
//!
//! # Responsibility
//! - Combine recurrence, performance and calendar engines into the
//!   day/week/month/year projections rendered by the UI.
//!
//! # Invariants
//! - Views are pure functions of `(snapshot, anchor date, now)`.
//! - A day's completed count only counts distinct *due* tasks.

pub mod calendar_view;
pub mod snapshot;
