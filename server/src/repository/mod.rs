//! Per-table data access.
//!
//! Every function takes the connection of an already-open transaction and
//! runs its statements inside a `db.query` span, which the telemetry layer
//! counts per request.

pub mod ingredients;
pub mod recipes;
