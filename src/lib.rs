//! Exhaustive four-module combination search.
//!
//! Given a catalog of module records, each carrying numeric values for a
//! fixed set of attributes, finds every combination of exactly four modules
//! whose summed attributes reach the mandatory thresholds, and ranks them by
//! a fixed multi-key order.
//!
//! - **Catalog** ([`catalog`]): the attribute enumeration, fixed-size value
//!   arrays, attribute sets, and level derivation.
//! - **Records** ([`record`]): the module record type and spreadsheet-style
//!   ingestion with explicit numeric coercion.
//! - **Search** ([`search`]): candidate filtering, choose-4 enumeration,
//!   aggregation, qualification, ranking, and the runner tying them
//!   together (optionally parallel with the `parallel` feature).
//! - **Report** ([`report`]): display-column selection and per-combination
//!   tables for presentation layers.
//!
//! # Example
//!
//! ```
//! use u_modcombo::catalog::Attribute;
//! use u_modcombo::record::RecordTable;
//! use u_modcombo::search::{ConstraintSet, SearchConfig, SearchOutcome, SearchRunner};
//!
//! let table = RecordTable::from_headers(&["ID", "魔法耐性", "物理耐性", "集中・幸運"]);
//! let records = table
//!     .normalize_rows(vec![
//!         vec!["A", "6", "5", "2"],
//!         vec!["B", "5", "6", ""],
//!         vec!["C", "5", "5", "4"],
//!         vec!["D", "4", "4", "1"],
//!         vec!["E", "6", "6", "0"],
//!     ])
//!     .unwrap();
//!
//! let constraints = ConstraintSet::resistance_preset().with_priority([Attribute::FocusLuck]);
//! match SearchRunner::run(&records, &constraints, &SearchConfig::default()) {
//!     Ok(SearchOutcome::Ranked(report)) => {
//!         assert_eq!(report.ranked[0].ids(), ["A", "C", "D", "E"]);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod catalog;
pub mod record;
pub mod report;
pub mod search;
