//! Four-module combination search.
//!
//! Selects every 4-combination of a filtered record pool that reaches the
//! mandatory thresholds, then ranks the survivors:
//!
//! - **Filter**: drop records carrying excluded attributes, then records
//!   contributing nothing to the mandatory or priority attributes.
//! - **Enumerate**: every 4-subset of the pool, lexicographic by position.
//! - **Aggregate**: per-attribute sums, priority score, total value, and the
//!   set of untargeted attributes that reached level 6.
//! - **Qualify**: every mandatory attribute must sum to at least 20.
//! - **Rank**: extra level-6 count, then score, then total value, all
//!   descending; remaining ties keep enumeration order. Truncated to top-N.
//!
//! Fewer than four candidates is an error
//! ([`SearchError::InsufficientCandidates`]); zero qualifying combinations is
//! a normal outcome ([`SearchOutcome::NoQualifyingCombinations`]).

mod combination;
mod config;
mod constraints;
mod error;
mod filter;
mod ranker;
mod runner;
mod stats;

pub use combination::{combination_count, Combinations, Members, COMBINATION_SIZE};
pub use config::{SearchConfig, DEFAULT_TOP_N};
pub use constraints::{ConstraintSet, DEFAULT_MUST};
pub use error::{Result, SearchError};
pub use filter::{filter_candidates, Candidate, CandidatePool};
pub use ranker::{compare_ranked, ScoredCombination, TopN};
pub use runner::{
    CombinationMember, RankedCombination, SearchOutcome, SearchReport, SearchRunner,
};
pub use stats::{meets_mandatory, CombinationStats};
