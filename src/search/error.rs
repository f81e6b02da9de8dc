//! Search error types.

use thiserror::Error;

/// Ways a search can fail to produce a ranking.
///
/// An empty ranking is not an error; see
/// [`SearchOutcome::NoQualifyingCombinations`](super::SearchOutcome::NoQualifyingCombinations).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Fewer records survived filtering than a combination needs.
    #[error("only {available} candidate modules after filtering, {required} required")]
    InsufficientCandidates { available: usize, required: usize },

    /// The cancellation flag was raised.
    #[error("search was cancelled")]
    Cancelled,

    /// The configured time limit elapsed.
    #[error("search exceeded time limit of {limit_ms} ms")]
    TimeLimitExceeded { limit_ms: u64 },

    /// Invalid [`SearchConfig`](super::SearchConfig).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
