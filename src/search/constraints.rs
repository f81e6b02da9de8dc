//! Run-scoped search constraints.

use crate::catalog::{Attribute, AttributeSet};

/// Mandatory attributes preselected by module spreadsheets.
pub const DEFAULT_MUST: [Attribute; 2] = [Attribute::MagicResistance, Attribute::PhysicalResistance];

/// The three attribute selections that drive a search.
///
/// The sets may overlap. An attribute in both `must` and `priority` is
/// checked against the threshold and also counts toward the score. Records
/// with a positive `exclude` attribute are dropped before enumeration even
/// if that attribute is also mandatory.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::Attribute;
/// use u_modcombo::search::ConstraintSet;
///
/// let constraints = ConstraintSet::new()
///     .with_must([Attribute::MagicResistance])
///     .with_priority([Attribute::FocusCritical, Attribute::FocusLuck])
///     .with_exclude([Attribute::ExtremeHpAbsorb]);
///
/// assert_eq!(constraints.targets().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConstraintSet {
    /// Attributes whose combined sum must reach the level-6 threshold.
    pub must: AttributeSet,
    /// Attributes whose combined sum forms the ranking score.
    pub priority: AttributeSet,
    /// Attributes that disqualify any record carrying them.
    pub exclude: AttributeSet,
}

impl ConstraintSet {
    /// No constraints: every combination qualifies and scores 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both resistances mandatory, nothing else selected.
    pub fn resistance_preset() -> Self {
        Self::new().with_must(DEFAULT_MUST)
    }

    pub fn with_must<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        self.must.extend(attributes);
        self
    }

    pub fn with_priority<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        self.priority.extend(attributes);
        self
    }

    pub fn with_exclude<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        self.exclude.extend(attributes);
        self
    }

    /// `must ∪ priority`: the attributes a record has to contribute to.
    pub fn targets(&self) -> AttributeSet {
        self.must.union(self.priority)
    }
}
