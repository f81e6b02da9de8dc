//! Attribute catalog.
//!
//! The catalog is a fixed, ordered list of module attributes. Every record
//! stores one value per attribute in an array indexed by [`Attribute`], so
//! aggregation never performs name lookups.

mod attribute;
mod level;
mod values;

pub use attribute::{Attribute, AttributeSet, UnknownAttribute, ATTRIBUTE_COUNT};
pub use level::{level_label, Level, LEVEL_THRESHOLDS, MANDATORY_THRESHOLD, MAX_LEVEL};
pub use values::AttributeValues;
