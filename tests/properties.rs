//! Property tests for the combination search.

use std::collections::HashSet;

use proptest::prelude::*;
use u_modcombo::catalog::{Attribute, AttributeValues, Level, ATTRIBUTE_COUNT};
use u_modcombo::record::ModuleRecord;
use u_modcombo::search::{
    combination_count, compare_ranked, filter_candidates, meets_mandatory, CandidatePool,
    CombinationStats, Combinations, ConstraintSet, ScoredCombination, SearchConfig, SearchError,
    SearchRunner, TopN,
};

fn record_strategy() -> impl Strategy<Value = ModuleRecord> {
    // Mostly-zero rows, like real module sheets.
    prop::collection::vec(prop_oneof![3 => Just(0u8), 1 => 1u8..=9], ATTRIBUTE_COUNT).prop_map(
        |cells| {
            let values = AttributeValues::from_pairs(
                Attribute::ALL
                    .iter()
                    .zip(cells)
                    .map(|(&a, v)| (a, f64::from(v))),
            );
            ModuleRecord::new("m", values)
        },
    )
}

fn records_strategy(max: usize) -> impl Strategy<Value = Vec<ModuleRecord>> {
    prop::collection::vec(record_strategy(), 0..max).prop_map(|mut records| {
        for (i, r) in records.iter_mut().enumerate() {
            r.id = format!("M{i}");
        }
        records
    })
}

fn attributes(max: usize) -> impl Strategy<Value = Vec<Attribute>> {
    prop::sample::subsequence(Attribute::ALL.to_vec(), 0..=max)
}

fn constraints_strategy() -> impl Strategy<Value = ConstraintSet> {
    (attributes(2), attributes(3), attributes(2)).prop_map(|(must, priority, exclude)| {
        ConstraintSet::new()
            .with_must(must)
            .with_priority(priority)
            .with_exclude(exclude)
    })
}

fn sequential() -> SearchConfig {
    SearchConfig::default().with_parallel(false)
}

proptest! {
    #[test]
    fn prop_enumeration_is_complete_and_unique(n in 0usize..14) {
        let all: Vec<_> = Combinations::new(n).collect();
        prop_assert_eq!(all.len() as u64, combination_count(n));

        let unique: HashSet<_> = all.iter().copied().collect();
        prop_assert_eq!(unique.len(), all.len());
        for members in &all {
            prop_assert!(members.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(members[3] < n);
        }
    }

    #[test]
    fn prop_outcome_counts(records in records_strategy(12), constraints in constraints_strategy()) {
        let pool = filter_candidates(&records, &constraints);
        match SearchRunner::run(&records, &constraints, &sequential()) {
            Err(SearchError::InsufficientCandidates { available, required }) => {
                prop_assert_eq!(available, pool.len());
                prop_assert_eq!(required, 4);
                prop_assert!(pool.len() < 4);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
            Ok(outcome) => {
                prop_assert_eq!(outcome.candidates(), pool.len());
                prop_assert_eq!(outcome.enumerated(), combination_count(pool.len()));
                prop_assert!(outcome.qualifying() <= outcome.enumerated());
                prop_assert!(outcome.ranked().len() <= 20);
                prop_assert_eq!(outcome.ranked().is_empty(), outcome.qualifying() == 0);
            }
        }
    }

    #[test]
    fn prop_ranked_results_respect_constraints(
        records in records_strategy(12),
        constraints in constraints_strategy(),
    ) {
        let Ok(outcome) = SearchRunner::run(&records, &constraints, &sequential()) else {
            return Ok(());
        };
        for ranked in outcome.ranked() {
            prop_assert!(meets_mandatory(&ranked.stats.sums, constraints.must));
            for member in &ranked.members {
                prop_assert!(!member.record.has_any(constraints.exclude));
            }
        }
        let scored: Vec<_> = outcome
            .ranked()
            .iter()
            .map(|r| {
                let sums = r.members.iter().fold(AttributeValues::zeros(), |mut acc, m| {
                    acc += &m.record.values;
                    acc
                });
                CombinationStats::from_sums(sums, &constraints)
            })
            .collect();
        for (ranked, recomputed) in outcome.ranked().iter().zip(&scored) {
            prop_assert_eq!(&ranked.stats, recomputed);
        }
        for pair in outcome.ranked().windows(2) {
            let (a, b) = (&pair[0].stats, &pair[1].stats);
            prop_assert!(a.extra_max_count() >= b.extra_max_count());
            if a.extra_max_count() == b.extra_max_count() {
                prop_assert!(a.score >= b.score);
                if a.score == b.score {
                    prop_assert!(a.total_value >= b.total_value);
                    if a.total_value == b.total_value {
                        prop_assert!(pair[0].source_indices() < pair[1].source_indices());
                    }
                }
            }
        }
    }

    #[test]
    fn prop_run_is_idempotent(records in records_strategy(11), constraints in constraints_strategy()) {
        let first = SearchRunner::run(&records, &constraints, &sequential());
        let second = SearchRunner::run(&records, &constraints, &sequential());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_zero_record_preserves_qualification(
        records in records_strategy(9),
        must in attributes(2),
    ) {
        let must = must.into_iter().collect();
        let mut extended = records.clone();
        extended.push(ModuleRecord::new("zero", AttributeValues::zeros()));

        let base = CandidatePool::unfiltered(&records);
        let grown = CandidatePool::unfiltered(&extended);

        let mut base_qualifying = 0u64;
        for members in Combinations::new(base.len()) {
            let before = meets_mandatory(&base.sum(&members), must);
            let after = meets_mandatory(&grown.sum(&members), must);
            prop_assert_eq!(before, after);
            base_qualifying += u64::from(before);
        }
        let grown_qualifying = Combinations::new(grown.len())
            .filter(|m| meets_mandatory(&grown.sum(m), must))
            .count() as u64;
        prop_assert!(grown_qualifying >= base_qualifying);
    }

    #[test]
    fn prop_top_n_equals_full_sort(
        records in records_strategy(10),
        constraints in constraints_strategy(),
        limit in 1usize..8,
    ) {
        let pool = CandidatePool::unfiltered(&records);
        let all: Vec<_> = Combinations::new(pool.len())
            .map(|members| ScoredCombination {
                members,
                stats: CombinationStats::from_sums(pool.sum(&members), &constraints),
            })
            .collect();

        let mut expected = all.clone();
        expected.sort_by(compare_ranked);
        expected.truncate(limit);

        let mut top = TopN::new(limit);
        for item in all {
            top.push(item);
        }
        prop_assert_eq!(top.into_sorted(), expected);
    }

    #[test]
    fn prop_level_is_monotonic(a in 0.0f64..40.0, b in 0.0f64..40.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Level::from_value(lo) <= Level::from_value(hi));
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #[test]
    fn prop_parallel_matches_sequential(
        records in records_strategy(14),
        constraints in constraints_strategy(),
    ) {
        let seq = SearchRunner::run(&records, &constraints, &sequential());
        let par = SearchRunner::run(
            &records,
            &constraints,
            &SearchConfig::default().with_parallel(true).with_top_n(7),
        );
        let seq_top7 = seq.map(|o| o.ranked().iter().take(7).cloned().collect::<Vec<_>>());
        let par_top7 = par.map(|o| o.ranked().to_vec());
        prop_assert_eq!(seq_top7, par_top7);
    }
}
