//! Combination search execution.
//!
//! # Pipeline
//!
//! 1. Filter the records into a candidate pool
//! 2. Fail with `InsufficientCandidates` if fewer than four remain
//! 3. For every 4-combination of the pool:
//!    a. Sum member values per attribute
//!    b. Drop it if a mandatory attribute is below the threshold
//!    c. Derive score, total value and extra-max set
//!    d. Offer it to the bounded top-N collector
//! 4. Sort the survivors by the ranking order and assign ranks
//!
//! With the `parallel` feature, step 3 is split by the lowest member
//! position and each worker keeps its own collector. Collectors merge under
//! the same total order, so the ranking is independent of scheduling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::combination::{combination_count, Combinations, Members, COMBINATION_SIZE};
use super::config::SearchConfig;
use super::constraints::ConstraintSet;
use super::error::SearchError;
use super::filter::{filter_candidates, CandidatePool};
use super::ranker::{ScoredCombination, TopN};
use super::stats::{meets_mandatory, CombinationStats};
use crate::catalog::AttributeValues;
use crate::record::ModuleRecord;

/// Combinations scanned between interrupt checks.
const INTERRUPT_CHECK_INTERVAL: usize = 4096;

/// One member of a ranked combination.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationMember {
    /// Position of the record in the input sequence.
    pub source_index: usize,
    /// Clone of the input record.
    pub record: ModuleRecord,
}

/// A combination with its final rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCombination {
    /// 1-based rank; 1 is best.
    pub rank: usize,
    /// Members in input order.
    pub members: [CombinationMember; COMBINATION_SIZE],
    /// Aggregates over the four members.
    pub stats: CombinationStats,
}

impl RankedCombination {
    /// Member identifiers, in input order.
    pub fn ids(&self) -> [&str; COMBINATION_SIZE] {
        self.members.each_ref().map(|m| m.record.id.as_str())
    }

    /// Member positions in the input sequence.
    pub fn source_indices(&self) -> [usize; COMBINATION_SIZE] {
        self.members.each_ref().map(|m| m.source_index)
    }
}

/// A completed search with at least one qualifying combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// Best first, at most `top_n` entries.
    pub ranked: Vec<RankedCombination>,
    /// Pool size after filtering.
    pub candidates: usize,
    /// Combinations enumerated, C(candidates, 4).
    pub enumerated: u64,
    /// Combinations that passed the mandatory threshold.
    pub qualifying: u64,
}

/// The two successful ends of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one combination qualified.
    Ranked(SearchReport),
    /// Enumeration completed but no combination met the mandatory
    /// thresholds.
    NoQualifyingCombinations { candidates: usize, enumerated: u64 },
}

impl SearchOutcome {
    /// Ranked combinations, empty when none qualified.
    pub fn ranked(&self) -> &[RankedCombination] {
        match self {
            SearchOutcome::Ranked(report) => &report.ranked,
            SearchOutcome::NoQualifyingCombinations { .. } => &[],
        }
    }

    pub fn report(&self) -> Option<&SearchReport> {
        match self {
            SearchOutcome::Ranked(report) => Some(report),
            SearchOutcome::NoQualifyingCombinations { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<SearchReport> {
        match self {
            SearchOutcome::Ranked(report) => Some(report),
            SearchOutcome::NoQualifyingCombinations { .. } => None,
        }
    }

    pub fn candidates(&self) -> usize {
        match self {
            SearchOutcome::Ranked(report) => report.candidates,
            SearchOutcome::NoQualifyingCombinations { candidates, .. } => *candidates,
        }
    }

    pub fn enumerated(&self) -> u64 {
        match self {
            SearchOutcome::Ranked(report) => report.enumerated,
            SearchOutcome::NoQualifyingCombinations { enumerated, .. } => *enumerated,
        }
    }

    pub fn qualifying(&self) -> u64 {
        match self {
            SearchOutcome::Ranked(report) => report.qualifying,
            SearchOutcome::NoQualifyingCombinations { .. } => 0,
        }
    }
}

/// Combination search runner.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the full search pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_modcombo::catalog::Attribute;
    /// use u_modcombo::record::ModuleRecord;
    /// use u_modcombo::search::{ConstraintSet, SearchConfig, SearchOutcome, SearchRunner};
    ///
    /// let records: Vec<_> = (0..5)
    ///     .map(|i| ModuleRecord::from_pairs(format!("M{i}"), [(Attribute::MagicResistance, 5.0 + i as f64)]))
    ///     .collect();
    /// let constraints = ConstraintSet::new().with_must([Attribute::MagicResistance]);
    ///
    /// let outcome = SearchRunner::run(&records, &constraints, &SearchConfig::default()).unwrap();
    /// assert!(matches!(outcome, SearchOutcome::Ranked(_)));
    /// assert_eq!(outcome.ranked()[0].ids(), ["M1", "M2", "M3", "M4"]);
    /// ```
    pub fn run(
        records: &[ModuleRecord],
        constraints: &ConstraintSet,
        config: &SearchConfig,
    ) -> Result<SearchOutcome, SearchError> {
        Self::run_with_cancel(records, constraints, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, the search stops
    /// at its next check and returns [`SearchError::Cancelled`]. A run that
    /// completes returns exactly what [`run`](Self::run) would.
    pub fn run_with_cancel(
        records: &[ModuleRecord],
        constraints: &ConstraintSet,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome, SearchError> {
        config.validate()?;
        let started = Instant::now();

        let pool = filter_candidates(records, constraints);
        let enumerated = combination_count(pool.len());
        info!(
            event = "search_start",
            records = records.len(),
            candidates = pool.len(),
            combinations = enumerated,
            must = constraints.must.len(),
            priority = constraints.priority.len(),
            exclude = constraints.exclude.len()
        );

        if pool.len() < COMBINATION_SIZE {
            debug!(candidates = pool.len(), "not enough candidates to enumerate");
            return Err(SearchError::InsufficientCandidates {
                available: pool.len(),
                required: COMBINATION_SIZE,
            });
        }

        let interrupt = Interrupt::new(cancel, config.time_limit_ms, started);
        let scan = match scan_pool(&pool, constraints, config, &interrupt) {
            Ok(scan) => scan,
            Err(err) => {
                warn!(event = "search_interrupted", error = %err);
                return Err(err);
            }
        };
        debug_assert_eq!(scan.enumerated, enumerated);

        info!(
            event = "search_end",
            enumerated = scan.enumerated,
            qualifying = scan.qualifying,
            elapsed_ms = started.elapsed().as_millis() as u64
        );

        if scan.qualifying == 0 {
            return Ok(SearchOutcome::NoQualifyingCombinations {
                candidates: pool.len(),
                enumerated: scan.enumerated,
            });
        }

        let ranked = scan
            .top
            .into_sorted()
            .into_iter()
            .enumerate()
            .map(|(i, scored)| RankedCombination {
                rank: i + 1,
                members: scored.members.map(|p| {
                    let candidate = pool.get(p);
                    CombinationMember {
                        source_index: candidate.source_index,
                        record: candidate.record.clone(),
                    }
                }),
                stats: scored.stats,
            })
            .collect();

        Ok(SearchOutcome::Ranked(SearchReport {
            ranked,
            candidates: pool.len(),
            enumerated: scan.enumerated,
            qualifying: scan.qualifying,
        }))
    }
}

/// Cancellation flag and deadline, polled during the scan.
struct Interrupt {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<(Instant, u64)>,
}

impl Interrupt {
    fn new(cancel: Option<Arc<AtomicBool>>, time_limit_ms: Option<u64>, started: Instant) -> Self {
        Self {
            cancel,
            deadline: time_limit_ms.map(|ms| (started + Duration::from_millis(ms), ms)),
        }
    }

    fn check(&self) -> Result<(), SearchError> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(SearchError::Cancelled);
            }
        }
        if let Some((deadline, limit_ms)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SearchError::TimeLimitExceeded { limit_ms });
            }
        }
        Ok(())
    }
}

/// Scan totals for one slice of the enumeration.
struct Scan {
    top: TopN,
    enumerated: u64,
    qualifying: u64,
}

impl Scan {
    fn new(top_n: usize) -> Self {
        Self {
            top: TopN::new(top_n),
            enumerated: 0,
            qualifying: 0,
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(self, other: Scan) -> Scan {
        Scan {
            top: self.top.merge(other.top),
            enumerated: self.enumerated + other.enumerated,
            qualifying: self.qualifying + other.qualifying,
        }
    }
}

#[cfg(feature = "parallel")]
fn scan_pool(
    pool: &CandidatePool<'_>,
    constraints: &ConstraintSet,
    config: &SearchConfig,
    interrupt: &Interrupt,
) -> Result<Scan, SearchError> {
    use rayon::prelude::*;

    if !config.parallel {
        return scan(pool, constraints, config.top_n, interrupt, Combinations::new(pool.len()));
    }

    (0..pool.len())
        .into_par_iter()
        .map(|first| {
            scan(
                pool,
                constraints,
                config.top_n,
                interrupt,
                Combinations::with_first(pool.len(), first),
            )
        })
        .try_reduce(|| Scan::new(config.top_n), |a, b| Ok(a.merge(b)))
}

#[cfg(not(feature = "parallel"))]
fn scan_pool(
    pool: &CandidatePool<'_>,
    constraints: &ConstraintSet,
    config: &SearchConfig,
    interrupt: &Interrupt,
) -> Result<Scan, SearchError> {
    scan(pool, constraints, config.top_n, interrupt, Combinations::new(pool.len()))
}

fn scan(
    pool: &CandidatePool<'_>,
    constraints: &ConstraintSet,
    top_n: usize,
    interrupt: &Interrupt,
    combinations: Combinations,
) -> Result<Scan, SearchError> {
    let mut result = Scan::new(top_n);

    for (i, members) in combinations.enumerate() {
        if i % INTERRUPT_CHECK_INTERVAL == 0 {
            interrupt.check()?;
        }
        result.enumerated += 1;

        let sums = pool.sum(&members);
        if !meets_mandatory(&sums, constraints.must) {
            continue;
        }
        result.qualifying += 1;
        result.top.push(scored(members, sums, constraints));
    }

    Ok(result)
}

#[inline]
fn scored(
    members: Members,
    sums: AttributeValues,
    constraints: &ConstraintSet,
) -> ScoredCombination {
    ScoredCombination {
        members,
        stats: CombinationStats::from_sums(sums, constraints),
    }
}

// ============================================================================
// Tests
// ============================================================================
