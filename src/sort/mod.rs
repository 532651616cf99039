//! Field-driven table sorting.
//!
//! Tables describe their columns as [`Field`] descriptors; the engine in
//! [`engine`] orders rows by the primary column, an optional always-ascending
//! secondary column, and the remaining columns as deterministic tiebreakers.

pub mod engine;
pub mod field;
pub mod state;

pub use engine::sort_rows;
pub use field::{Field, FieldValue, RowAccess, SortKey};
pub use state::{ordered_fields, SortState};
