//! Per-combination aggregation and the mandatory-threshold qualifier.

use super::constraints::ConstraintSet;
use crate::catalog::{
    Attribute, AttributeSet, AttributeValues, Level, ATTRIBUTE_COUNT, MANDATORY_THRESHOLD,
};

/// Aggregated statistics of one combination.
///
/// Derived once from the member sums and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinationStats {
    /// Per-attribute sum across the four members.
    pub sums: AttributeValues,
    /// Sum over the priority attributes.
    pub score: f64,
    /// Sum over every attribute.
    pub total_value: f64,
    /// Attributes at level 6 that are neither mandatory nor prioritized.
    pub extra_max: AttributeSet,
}

impl CombinationStats {
    /// Derives score, total value and extra-max set from member sums.
    pub fn from_sums(sums: AttributeValues, constraints: &ConstraintSet) -> Self {
        let score = sums.sum_over(constraints.priority);
        let total_value = sums.total();
        let extra_max = sums
            .at_least(MANDATORY_THRESHOLD)
            .difference(constraints.targets());
        Self {
            sums,
            score,
            total_value,
            extra_max,
        }
    }

    #[inline]
    pub fn sum(&self, attribute: Attribute) -> f64 {
        self.sums.get(attribute)
    }

    pub fn extra_max_count(&self) -> usize {
        self.extra_max.len()
    }

    pub fn level(&self, attribute: Attribute) -> Level {
        Level::from_value(self.sum(attribute))
    }

    /// Levels for every attribute, indexed by catalog position.
    pub fn levels(&self) -> [Level; ATTRIBUTE_COUNT] {
        let mut levels = [Level::NONE; ATTRIBUTE_COUNT];
        for (attribute, value) in self.sums.iter() {
            levels[attribute.index()] = Level::from_value(value);
        }
        levels
    }
}

/// Whether every mandatory attribute reaches [`MANDATORY_THRESHOLD`].
///
/// The comparison is on the raw sum, independent of level labels. An empty
/// `must` set always passes.
///
/// ```
/// use u_modcombo::catalog::{Attribute, AttributeSet, AttributeValues};
/// use u_modcombo::search::meets_mandatory;
///
/// let must = AttributeSet::from([Attribute::MagicResistance]);
/// let mut sums = AttributeValues::zeros();
/// sums[Attribute::MagicResistance] = 19.99;
/// assert!(!meets_mandatory(&sums, must));
/// sums[Attribute::MagicResistance] = 20.0;
/// assert!(meets_mandatory(&sums, must));
/// ```
#[inline]
pub fn meets_mandatory(sums: &AttributeValues, must: AttributeSet) -> bool {
    must.iter().all(|a| sums.get(a) >= MANDATORY_THRESHOLD)
}
