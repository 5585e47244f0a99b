//! Domain model for recurring tasks, completions and user profiles.
//!
//! # Responsibility
//! - Define canonical records read by the recurrence/performance engines.
//! - Validate record shape before it reaches persistence.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil `Uuid`.
//! - Dates are local calendar dates (`NaiveDate`), never instants.

pub mod completion;
pub mod profile;
pub mod task;
