//! Search configuration.

use super::error::SearchError;

/// Number of ranked combinations returned by default.
pub const DEFAULT_TOP_N: usize = 20;

/// Configuration parameters for a combination search.
///
/// # Examples
///
/// ```
/// use u_modcombo::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_top_n(5)
///     .with_parallel(false)
///     .with_time_limit_ms(2_000);
/// assert_eq!(config.top_n, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of ranked combinations to return.
    pub top_n: usize,

    /// Whether to scan combinations in parallel using rayon.
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature. Output is identical either way.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// When exceeded, the search stops and returns
    /// [`SearchError::TimeLimitExceeded`]. `None` disables the limit.
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    /// Sets the number of ranked combinations to return.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Enables or disables parallel scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_n == 0 {
            return Err(SearchError::InvalidConfig(
                "top_n must be at least 1".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(SearchError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
