//! Ranking order and bounded top-N collection.
//!
//! Qualifying combinations are ordered, best first, by:
//!
//! 1. number of extra attributes at level 6 (descending)
//! 2. priority score (descending)
//! 3. total value (descending)
//! 4. member positions (ascending), i.e. enumeration order
//!
//! The last key makes the order total, so the result never depends on the
//! order combinations were collected in.

use std::cmp::Ordering;

use super::combination::Members;
use super::stats::CombinationStats;

/// Below this many buffered items the collector does not compact.
const COMPACT_MIN: usize = 64;

/// A qualifying combination awaiting its final rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCombination {
    /// Pool positions, ascending.
    pub members: Members,
    /// Aggregates the ranking order reads.
    pub stats: CombinationStats,
}

/// Ranking comparator: `Less` means `a` ranks above `b`.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::{Attribute, AttributeValues};
/// use u_modcombo::search::{compare_ranked, ConstraintSet, CombinationStats, ScoredCombination};
/// use std::cmp::Ordering;
///
/// let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
/// let mut a = AttributeValues::zeros();
/// a[Attribute::FocusLuck] = 10.0;
/// let mut b = a;
/// b[Attribute::FocusLuck] = 12.0;
///
/// let a = ScoredCombination { members: [0, 1, 2, 3], stats: CombinationStats::from_sums(a, &c) };
/// let b = ScoredCombination { members: [0, 1, 2, 4], stats: CombinationStats::from_sums(b, &c) };
/// assert_eq!(compare_ranked(&b, &a), Ordering::Less);
/// ```
pub fn compare_ranked(a: &ScoredCombination, b: &ScoredCombination) -> Ordering {
    b.stats
        .extra_max_count()
        .cmp(&a.stats.extra_max_count())
        .then_with(|| b.stats.score.total_cmp(&a.stats.score))
        .then_with(|| b.stats.total_value.total_cmp(&a.stats.total_value))
        .then_with(|| a.members.cmp(&b.members))
}

/// Keeps the best `limit` combinations seen so far.
///
/// Produces the same list as sorting every pushed item with
/// [`compare_ranked`] and truncating, while holding at most
/// `max(2 * limit, 64)` items at any time.
#[derive(Debug, Clone)]
pub struct TopN {
    limit: usize,
    items: Vec<ScoredCombination>,
}

impl TopN {
    /// Creates a collector. A `limit` of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            items: Vec::with_capacity(Self::capacity_for(limit)),
        }
    }

    fn capacity_for(limit: usize) -> usize {
        limit.saturating_mul(2).max(COMPACT_MIN)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of buffered items (not yet truncated).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: ScoredCombination) {
        self.items.push(item);
        if self.items.len() >= Self::capacity_for(self.limit) {
            self.compact();
        }
    }

    /// Absorbs another collector's items.
    pub fn merge(mut self, other: TopN) -> TopN {
        self.items.extend(other.items);
        if self.items.len() > self.limit {
            self.compact();
        }
        self
    }

    /// The best `limit` items, best first.
    pub fn into_sorted(mut self) -> Vec<ScoredCombination> {
        self.items.sort_by(compare_ranked);
        self.items.truncate(self.limit);
        self.items
    }

    fn compact(&mut self) {
        if self.items.len() > self.limit {
            self.items.select_nth_unstable_by(self.limit - 1, compare_ranked);
            self.items.truncate(self.limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attribute, AttributeValues};
    use crate::search::ConstraintSet;

    fn scored(members: Members, pairs: &[(Attribute, f64)], c: &ConstraintSet) -> ScoredCombination {
        ScoredCombination {
            members,
            stats: CombinationStats::from_sums(AttributeValues::from_pairs(pairs.iter().copied()), c),
        }
    }

    #[test]
    fn test_extra_max_dominates_score() {
        let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
        // A: two extra attributes at level 6, score 10.
        let a = scored(
            [0, 1, 2, 3],
            &[
                (Attribute::FocusLuck, 10.0),
                (Attribute::EliteStrike, 20.0),
                (Attribute::FocusCasting, 20.0),
            ],
            &c,
        );
        // B: one extra attribute at level 6, score 100.
        let b = scored(
            [0, 1, 2, 4],
            &[(Attribute::FocusLuck, 100.0), (Attribute::EliteStrike, 20.0)],
            &c,
        );
        assert_eq!(a.stats.extra_max_count(), 2);
        assert_eq!(b.stats.extra_max_count(), 1);
        assert_eq!(compare_ranked(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_score_before_total() {
        let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
        let a = scored([0, 1, 2, 3], &[(Attribute::FocusLuck, 9.0), (Attribute::EliteStrike, 1.0)], &c);
        let b = scored([0, 1, 2, 4], &[(Attribute::FocusLuck, 8.0), (Attribute::EliteStrike, 15.0)], &c);
        assert_eq!(compare_ranked(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_total_breaks_score_tie() {
        let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
        let a = scored([0, 1, 2, 3], &[(Attribute::FocusLuck, 9.0)], &c);
        let b = scored([0, 1, 2, 4], &[(Attribute::FocusLuck, 9.0), (Attribute::EliteStrike, 1.0)], &c);
        assert_eq!(compare_ranked(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_full_tie_keeps_enumeration_order() {
        let c = ConstraintSet::new();
        let a = scored([0, 1, 2, 3], &[(Attribute::FocusLuck, 4.0)], &c);
        let b = scored([0, 1, 2, 4], &[(Attribute::FocusLuck, 4.0)], &c);
        assert_eq!(compare_ranked(&a, &b), Ordering::Less);
        assert_eq!(compare_ranked(&b, &a), Ordering::Greater);
        assert_eq!(compare_ranked(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_top_n_matches_full_sort() {
        let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
        let items: Vec<_> = (0..500usize)
            .map(|i| {
                let luck = ((i * 37) % 23) as f64;
                let extra = if i % 7 == 0 { 20.0 } else { 0.0 };
                scored(
                    [i, i + 1, i + 2, i + 3],
                    &[(Attribute::FocusLuck, luck), (Attribute::EliteStrike, extra)],
                    &c,
                )
            })
            .collect();

        let mut expected = items.clone();
        expected.sort_by(compare_ranked);
        expected.truncate(20);

        let mut top = TopN::new(20);
        for item in items {
            top.push(item);
            assert!(top.len() < 64);
        }
        assert_eq!(top.into_sorted(), expected);
    }

    #[test]
    fn test_top_n_merge() {
        let c = ConstraintSet::new().with_priority([Attribute::FocusLuck]);
        let mut left = TopN::new(3);
        let mut right = TopN::new(3);
        for i in 0..10usize {
            let item = scored([i, i + 1, i + 2, i + 3], &[(Attribute::FocusLuck, i as f64)], &c);
            if i % 2 == 0 {
                left.push(item);
            } else {
                right.push(item);
            }
        }
        let best: Vec<_> = left.merge(right).into_sorted().iter().map(|s| s.members[0]).collect();
        assert_eq!(best, vec![9, 8, 7]);
    }

    #[test]
    fn test_zero_limit_treated_as_one() {
        let top = TopN::new(0);
        assert_eq!(top.limit(), 1);
    }
}
