//! Module record type.

use crate::catalog::{Attribute, AttributeSet, AttributeValues};

/// Identifier used when the source data has no ID column.
pub const DEFAULT_ID: &str = "NoID";

/// A single module: a display identifier and one value per attribute.
///
/// Identifiers are not required to be unique. Two records with identical
/// values are still distinct members of the pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleRecord {
    /// Display identifier; `"NoID"` when the source has none.
    pub id: String,
    /// One value per cataloged attribute.
    pub values: AttributeValues,
}

impl ModuleRecord {
    pub fn new(id: impl Into<String>, values: AttributeValues) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// Builds a record from `(attribute, value)` pairs; unlisted attributes
    /// are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_modcombo::catalog::Attribute;
    /// use u_modcombo::record::ModuleRecord;
    ///
    /// let m = ModuleRecord::from_pairs("A-01", [(Attribute::FocusLuck, 6.0)]);
    /// assert_eq!(m.value(Attribute::FocusLuck), 6.0);
    /// assert_eq!(m.value(Attribute::EliteStrike), 0.0);
    /// ```
    pub fn from_pairs<I: IntoIterator<Item = (Attribute, f64)>>(
        id: impl Into<String>,
        pairs: I,
    ) -> Self {
        Self::new(id, AttributeValues::from_pairs(pairs))
    }

    #[inline]
    pub fn value(&self, attribute: Attribute) -> f64 {
        self.values.get(attribute)
    }

    /// Whether the record has a positive value on any attribute in `set`.
    pub fn has_any(&self, set: AttributeSet) -> bool {
        self.values.any_positive(set)
    }

    /// Sum of the record's values over `set`.
    pub fn contribution(&self, set: AttributeSet) -> f64 {
        self.values.sum_over(set)
    }

    /// Whether every value is finite and non-negative.
    pub fn is_normalized(&self) -> bool {
        self.values
            .as_array()
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}
