//! Flutter-facing bindings for the age & habit tracker core.

pub mod api;
