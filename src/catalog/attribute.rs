//! The fixed attribute catalog and attribute sets.

use std::fmt;
use std::str::FromStr;

/// Number of attributes in the catalog.
pub const ATTRIBUTE_COUNT: usize = 21;

/// A recognized module attribute.
///
/// The discriminant is the attribute's position in the catalog, which is
/// also its index into [`AttributeValues`](super::AttributeValues).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Attribute {
    MagicResistance,
    PhysicalResistance,
    ExtremeHpCondense,
    ExtremeLastStand,
    ExtremeHpFluctuation,
    ExtremeHpAbsorb,
    StrengthBoost,
    AgilityBoost,
    IntellectBoost,
    SpecialAttackDamage,
    EliteStrike,
    SpecialAttackHealing,
    MasteryHealing,
    FocusCasting,
    FocusAttackSpeed,
    FocusCritical,
    FocusLuck,
    ExtremeDamageBoost,
    ExtremeAdaptability,
    ExtremeFirstAid,
    ExtremeLuckyCritical,
}

impl Attribute {
    /// Every attribute, in catalog order.
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::MagicResistance,
        Attribute::PhysicalResistance,
        Attribute::ExtremeHpCondense,
        Attribute::ExtremeLastStand,
        Attribute::ExtremeHpFluctuation,
        Attribute::ExtremeHpAbsorb,
        Attribute::StrengthBoost,
        Attribute::AgilityBoost,
        Attribute::IntellectBoost,
        Attribute::SpecialAttackDamage,
        Attribute::EliteStrike,
        Attribute::SpecialAttackHealing,
        Attribute::MasteryHealing,
        Attribute::FocusCasting,
        Attribute::FocusAttackSpeed,
        Attribute::FocusCritical,
        Attribute::FocusLuck,
        Attribute::ExtremeDamageBoost,
        Attribute::ExtremeAdaptability,
        Attribute::ExtremeFirstAid,
        Attribute::ExtremeLuckyCritical,
    ];

    /// Position of this attribute in the catalog.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the attribute at catalog position `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column label used by module spreadsheets.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::MagicResistance => "魔法耐性",
            Attribute::PhysicalResistance => "物理耐性",
            Attribute::ExtremeHpCondense => "極・HP凝縮",
            Attribute::ExtremeLastStand => "極・絶境守護",
            Attribute::ExtremeHpFluctuation => "極・HP変動",
            Attribute::ExtremeHpAbsorb => "極・HP吸収",
            Attribute::StrengthBoost => "筋力強化",
            Attribute::AgilityBoost => "敏捷強化",
            Attribute::IntellectBoost => "知力強化",
            Attribute::SpecialAttackDamage => "特攻ダメージ強化",
            Attribute::EliteStrike => "精鋭打撃",
            Attribute::SpecialAttackHealing => "特攻回復強化",
            Attribute::MasteryHealing => "マスタリー回復強化",
            Attribute::FocusCasting => "集中・詠唱",
            Attribute::FocusAttackSpeed => "集中・攻撃速度",
            Attribute::FocusCritical => "集中・会心",
            Attribute::FocusLuck => "集中・幸運",
            Attribute::ExtremeDamageBoost => "極・ダメージ増強",
            Attribute::ExtremeAdaptability => "極・適応力",
            Attribute::ExtremeFirstAid => "極・応急処置",
            Attribute::ExtremeLuckyCritical => "極・幸運会心",
        }
    }

    /// Snake-case identifier, e.g. `magic_resistance`.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::MagicResistance => "magic_resistance",
            Attribute::PhysicalResistance => "physical_resistance",
            Attribute::ExtremeHpCondense => "extreme_hp_condense",
            Attribute::ExtremeLastStand => "extreme_last_stand",
            Attribute::ExtremeHpFluctuation => "extreme_hp_fluctuation",
            Attribute::ExtremeHpAbsorb => "extreme_hp_absorb",
            Attribute::StrengthBoost => "strength_boost",
            Attribute::AgilityBoost => "agility_boost",
            Attribute::IntellectBoost => "intellect_boost",
            Attribute::SpecialAttackDamage => "special_attack_damage",
            Attribute::EliteStrike => "elite_strike",
            Attribute::SpecialAttackHealing => "special_attack_healing",
            Attribute::MasteryHealing => "mastery_healing",
            Attribute::FocusCasting => "focus_casting",
            Attribute::FocusAttackSpeed => "focus_attack_speed",
            Attribute::FocusCritical => "focus_critical",
            Attribute::FocusLuck => "focus_luck",
            Attribute::ExtremeDamageBoost => "extreme_damage_boost",
            Attribute::ExtremeAdaptability => "extreme_adaptability",
            Attribute::ExtremeFirstAid => "extreme_first_aid",
            Attribute::ExtremeLuckyCritical => "extreme_lucky_critical",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a name matches no cataloged attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute: {0:?}")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    /// Accepts either the spreadsheet label or the snake-case key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.label() == name || a.key() == name)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// A set of attributes backed by a bitmask.
///
/// Iteration always yields attributes in catalog order, regardless of the
/// order they were inserted in.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::{Attribute, AttributeSet};
///
/// let set: AttributeSet = [Attribute::FocusLuck, Attribute::MagicResistance]
///     .into_iter()
///     .collect();
/// let order: Vec<_> = set.iter().collect();
/// assert_eq!(order, vec![Attribute::MagicResistance, Attribute::FocusLuck]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "Vec<Attribute>", from = "Vec<Attribute>")
)]
pub struct AttributeSet {
    bits: u32,
}

impl AttributeSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of every cataloged attribute.
    pub const fn all() -> Self {
        Self {
            bits: (1u32 << ATTRIBUTE_COUNT) - 1,
        }
    }

    /// Adds an attribute. Returns `false` if it was already present.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        let mask = 1u32 << attribute.index();
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    /// Removes an attribute. Returns `false` if it was absent.
    pub fn remove(&mut self, attribute: Attribute) -> bool {
        let mask = 1u32 << attribute.index();
        let present = self.bits & mask != 0;
        self.bits &= !mask;
        present
    }

    #[inline]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.bits & (1u32 << attribute.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    pub fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Iterates members in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL
            .iter()
            .copied()
            .filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = Self::empty();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl Extend<Attribute> for AttributeSet {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        for attribute in iter {
            self.insert(attribute);
        }
    }
}

impl<const N: usize> From<[Attribute; N]> for AttributeSet {
    fn from(attributes: [Attribute; N]) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<Vec<Attribute>> for AttributeSet {
    fn from(attributes: Vec<Attribute>) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_index() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
            assert_eq!(Attribute::from_index(i), Some(*attribute));
        }
        assert_eq!(Attribute::from_index(ATTRIBUTE_COUNT), None);
    }

    #[test]
    fn test_parse_label_and_key() {
        assert_eq!("魔法耐性".parse::<Attribute>(), Ok(Attribute::MagicResistance));
        assert_eq!(
            "focus_attack_speed".parse::<Attribute>(),
            Ok(Attribute::FocusAttackSpeed)
        );
        assert_eq!(" 極・幸運会心 ".parse::<Attribute>(), Ok(Attribute::ExtremeLuckyCritical));
        assert!("ID".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_labels_and_keys_unique() {
        for (i, a) in Attribute::ALL.iter().enumerate() {
            for b in &Attribute::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn test_set_insert_remove() {
        let mut set = AttributeSet::empty();
        assert!(set.insert(Attribute::EliteStrike));
        assert!(!set.insert(Attribute::EliteStrike));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Attribute::EliteStrike));
        assert!(set.remove(Attribute::EliteStrike));
        assert!(!set.remove(Attribute::EliteStrike));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_algebra() {
        let a = AttributeSet::from([Attribute::MagicResistance, Attribute::FocusLuck]);
        let b = AttributeSet::from([Attribute::FocusLuck, Attribute::EliteStrike]);

        assert_eq!(a.union(b).len(), 3);
        assert_eq!(
            a.intersection(b).iter().collect::<Vec<_>>(),
            vec![Attribute::FocusLuck]
        );
        assert_eq!(
            a.difference(b).iter().collect::<Vec<_>>(),
            vec![Attribute::MagicResistance]
        );
        assert_eq!(AttributeSet::all().len(), ATTRIBUTE_COUNT);
    }
}
