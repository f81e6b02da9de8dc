//! Module records and their ingestion.
//!
//! [`ModuleRecord`] is the immutable unit the search consumes.
//! [`RecordTable`] turns spreadsheet-style rows into records, applying the
//! [`Coercion`] policy exactly once.

mod normalize;
mod types;

pub use normalize::{Coercion, NormalizeError, RecordTable};
pub use types::{ModuleRecord, DEFAULT_ID};
