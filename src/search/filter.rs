//! Candidate filtering.
//!
//! Two passes, in order:
//!
//! 1. **Exclusion**: drop records with a positive value on any excluded
//!    attribute.
//! 2. **Relevance**: when `must ∪ priority` is non-empty, drop records whose
//!    sum over those attributes is not positive. Negative and NaN sums are
//!    dropped along with zero ones.

use std::cmp::Ordering;

use tracing::debug;

use super::constraints::ConstraintSet;
use crate::catalog::{AttributeSet, AttributeValues};
use crate::record::ModuleRecord;

/// A record that survived filtering, with its position in the input.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position of the record in the input sequence.
    pub source_index: usize,
    /// The record itself, borrowed from the input.
    pub record: &'a ModuleRecord,
}

/// The ordered set of records eligible for enumeration.
///
/// Pool positions (`0..len()`) are what combinations index into. The
/// original input position of each candidate is kept for reporting.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    candidates: Vec<Candidate<'a>>,
    excluded: usize,
    irrelevant: usize,
}

impl<'a> CandidatePool<'a> {
    /// Builds a pool from every record, unfiltered.
    pub fn unfiltered(records: &'a [ModuleRecord]) -> Self {
        Self {
            candidates: records
                .iter()
                .enumerate()
                .map(|(source_index, record)| Candidate {
                    source_index,
                    record,
                })
                .collect(),
            excluded: 0,
            irrelevant: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate at pool position `position`.
    ///
    /// # Panics
    /// Panics if `position >= len()`.
    #[inline]
    pub fn get(&self, position: usize) -> &Candidate<'a> {
        &self.candidates[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate<'a>> + '_ {
        self.candidates.iter()
    }

    /// Records dropped by the exclusion pass.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Records dropped by the relevance pass.
    pub fn irrelevant(&self) -> usize {
        self.irrelevant
    }

    /// Element-wise sum of the values at the given pool positions.
    #[inline]
    pub fn sum(&self, positions: &[usize]) -> AttributeValues {
        let mut sums = AttributeValues::zeros();
        for &p in positions {
            sums += &self.candidates[p].record.values;
        }
        sums
    }
}

/// Applies the exclusion and relevance passes to `records`.
///
/// Never fails; an empty pool is a valid result.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::Attribute;
/// use u_modcombo::record::ModuleRecord;
/// use u_modcombo::search::{filter_candidates, ConstraintSet};
///
/// let records = vec![
///     ModuleRecord::from_pairs("keep", [(Attribute::FocusLuck, 5.0)]),
///     ModuleRecord::from_pairs("noise", [(Attribute::EliteStrike, 5.0)]),
///     ModuleRecord::from_pairs("banned", [(Attribute::FocusLuck, 5.0), (Attribute::ExtremeHpAbsorb, 1.0)]),
/// ];
/// let constraints = ConstraintSet::new()
///     .with_priority([Attribute::FocusLuck])
///     .with_exclude([Attribute::ExtremeHpAbsorb]);
///
/// let pool = filter_candidates(&records, &constraints);
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool.get(0).record.id, "keep");
/// ```
pub fn filter_candidates<'a>(
    records: &'a [ModuleRecord],
    constraints: &ConstraintSet,
) -> CandidatePool<'a> {
    let targets = constraints.targets();

    let mut excluded = 0;
    let mut irrelevant = 0;
    let mut candidates = Vec::with_capacity(records.len());

    for (source_index, record) in records.iter().enumerate() {
        if record.has_any(constraints.exclude) {
            excluded += 1;
            continue;
        }
        if !targets.is_empty() && !contributes(record, targets) {
            irrelevant += 1;
            continue;
        }
        candidates.push(Candidate {
            source_index,
            record,
        });
    }

    debug!(
        records = records.len(),
        excluded,
        irrelevant,
        candidates = candidates.len(),
        "filtered candidate pool"
    );

    CandidatePool {
        candidates,
        excluded,
        irrelevant,
    }
}

/// Whether the record's sum over `targets` is strictly positive.
#[inline]
fn contributes(record: &ModuleRecord, targets: AttributeSet) -> bool {
    record.contribution(targets).partial_cmp(&0.0) == Some(Ordering::Greater)
}
