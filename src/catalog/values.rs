//! Fixed-size attribute value storage.

use std::ops::{AddAssign, Index, IndexMut};

use super::attribute::{Attribute, AttributeSet, ATTRIBUTE_COUNT};

/// One numeric value per cataloged attribute.
///
/// Indexed by [`Attribute`]; absent attributes are simply `0.0`.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::{Attribute, AttributeValues};
///
/// let mut values = AttributeValues::zeros();
/// values[Attribute::MagicResistance] = 7.0;
/// assert_eq!(values.total(), 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeValues([f64; ATTRIBUTE_COUNT]);

impl AttributeValues {
    /// All attributes at zero.
    pub const fn zeros() -> Self {
        Self([0.0; ATTRIBUTE_COUNT])
    }

    /// Builds values from `(attribute, value)` pairs. Later pairs overwrite
    /// earlier ones for the same attribute.
    pub fn from_pairs<I: IntoIterator<Item = (Attribute, f64)>>(pairs: I) -> Self {
        let mut values = Self::zeros();
        for (attribute, value) in pairs {
            values[attribute] = value;
        }
        values
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.0[attribute.index()]
    }

    /// Sum over the attributes in `set`.
    pub fn sum_over(&self, set: AttributeSet) -> f64 {
        set.iter().map(|a| self.get(a)).sum()
    }

    /// Sum over the whole catalog, in catalog order.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whether any attribute in `set` is strictly positive.
    pub fn any_positive(&self, set: AttributeSet) -> bool {
        set.iter().any(|a| self.get(a) > 0.0)
    }

    /// Number of attributes in `set` that are strictly positive.
    pub fn count_positive(&self, set: AttributeSet) -> usize {
        set.iter().filter(|&a| self.get(a) > 0.0).count()
    }

    /// Attributes with a value at or above `threshold`.
    pub fn at_least(&self, threshold: f64) -> AttributeSet {
        self.iter()
            .filter(|&(_, v)| v >= threshold)
            .map(|(a, _)| a)
            .collect()
    }

    /// Iterates `(attribute, value)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.iter().map(move |&a| (a, self.get(a)))
    }

    pub fn as_array(&self) -> &[f64; ATTRIBUTE_COUNT] {
        &self.0
    }
}

impl Default for AttributeValues {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<Attribute> for AttributeValues {
    type Output = f64;

    #[inline]
    fn index(&self, attribute: Attribute) -> &f64 {
        &self.0[attribute.index()]
    }
}

impl IndexMut<Attribute> for AttributeValues {
    #[inline]
    fn index_mut(&mut self, attribute: Attribute) -> &mut f64 {
        &mut self.0[attribute.index()]
    }
}

impl AddAssign<&AttributeValues> for AttributeValues {
    #[inline]
    fn add_assign(&mut self, rhs: &AttributeValues) {
        for (acc, v) in self.0.iter_mut().zip(rhs.0.iter()) {
            *acc += v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttributeValues {
        AttributeValues::from_pairs([
            (Attribute::MagicResistance, 10.0),
            (Attribute::FocusLuck, 4.0),
            (Attribute::EliteStrike, 20.0),
        ])
    }

    #[test]
    fn test_missing_attributes_are_zero() {
        let values = sample();
        assert_eq!(values[Attribute::PhysicalResistance], 0.0);
        assert_eq!(values.get(Attribute::MagicResistance), 10.0);
    }

    #[test]
    fn test_sum_over_set() {
        let values = sample();
        let set = AttributeSet::from([Attribute::MagicResistance, Attribute::FocusLuck]);
        assert!((values.sum_over(set) - 14.0).abs() < 1e-12);
        assert!((values.sum_over(AttributeSet::empty())).abs() < 1e-12);
        assert!((values.total() - 34.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_assign_elementwise() {
        let mut acc = sample();
        acc += &sample();
        assert_eq!(acc[Attribute::EliteStrike], 40.0);
        assert_eq!(acc[Attribute::FocusLuck], 8.0);
        assert_eq!(acc[Attribute::ExtremeFirstAid], 0.0);
    }

    #[test]
    fn test_positive_queries() {
        let values = sample();
        let set = AttributeSet::from([Attribute::FocusLuck, Attribute::FocusCritical]);
        assert!(values.any_positive(set));
        assert_eq!(values.count_positive(set), 1);
        assert!(!values.any_positive(AttributeSet::from([Attribute::FocusCritical])));
    }

    #[test]
    fn test_at_least_threshold() {
        let values = sample();
        let maxed = values.at_least(20.0);
        assert_eq!(maxed.iter().collect::<Vec<_>>(), vec![Attribute::EliteStrike]);
    }
}
