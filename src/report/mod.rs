//! Result table data for presentation layers.
//!
//! Turns ranked combinations into rows and columns: which attributes to
//! show, their levels and totals, and each member's values. Styling is left
//! to the caller; [`ResultTable`] also implements `Display` as a plain-text
//! table.

mod table;

pub use table::{display_columns, MemberRow, ResultTable, HIGHLIGHT_MIN_POSITIVE};

use crate::search::{ConstraintSet, SearchReport};

/// Builds one table per ranked combination, best first.
pub fn tables(report: &SearchReport, constraints: &ConstraintSet) -> Vec<ResultTable> {
    report
        .ranked
        .iter()
        .map(|ranked| ResultTable::build(ranked, constraints))
        .collect()
}
