//! Pure scheduling engines.
//!
//! # Responsibility
//! - Decide whether a task is due on a calendar date.
//! - Bucket due/completed counts into performance tiers.
//! - Provide the calendar arithmetic used to iterate view dates.
//!
//! # Invariants
//! - No I/O and no ambient state: every function is a pure function of its
//!   arguments, callers inject "now".
//! - Dates are compared as local calendar dates.

pub mod calendar;
pub mod performance;
pub mod recurrence;
