//! Choose-4 enumeration over pool positions.
//!
//! Combinations are emitted in lexicographic order of their position
//! arrays, so value-identical records are never merged and the sequence is
//! reproducible across runs.

/// Members per combination.
pub const COMBINATION_SIZE: usize = 4;

/// Pool positions of one combination, strictly ascending.
pub type Members = [usize; COMBINATION_SIZE];

/// Number of 4-combinations of `n` items, C(n, 4).
///
/// Saturates at `u64::MAX`, which no realistic pool reaches.
///
/// ```
/// use u_modcombo::search::combination_count;
///
/// assert_eq!(combination_count(3), 0);
/// assert_eq!(combination_count(4), 1);
/// assert_eq!(combination_count(10), 210);
/// ```
pub fn combination_count(n: usize) -> u64 {
    if n < COMBINATION_SIZE {
        return 0;
    }
    let n = n as u128;
    let count = n * (n - 1) * (n - 2) * (n - 3) / 24;
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Iterator over every 4-combination of `0..n`.
///
/// # Examples
///
/// ```
/// use u_modcombo::search::Combinations;
///
/// let all: Vec<_> = Combinations::new(5).collect();
/// assert_eq!(all.len(), 5);
/// assert_eq!(all[0], [0, 1, 2, 3]);
/// assert_eq!(all[4], [1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    first_end: usize,
    pending: Option<Members>,
}

impl Combinations {
    /// All combinations of `0..n`.
    pub fn new(n: usize) -> Self {
        Self::with_first_range(n, 0, n)
    }

    /// Only the combinations whose lowest position is `first`.
    ///
    /// Iterating `with_first(n, f)` for `f` in `0..n` yields exactly the
    /// same sequence as `new(n)`.
    pub fn with_first(n: usize, first: usize) -> Self {
        Self::with_first_range(n, first, first.saturating_add(1))
    }

    fn with_first_range(n: usize, first_start: usize, first_end: usize) -> Self {
        let first_end = first_end.min(n.saturating_sub(COMBINATION_SIZE - 1));
        let pending = (first_start < first_end).then(|| {
            let mut members = [0; COMBINATION_SIZE];
            for (k, slot) in members.iter_mut().enumerate() {
                *slot = first_start + k;
            }
            members
        });
        Self {
            n,
            first_end,
            pending,
        }
    }
}

impl Iterator for Combinations {
    type Item = Members;

    fn next(&mut self) -> Option<Members> {
        let current = self.pending?;
        self.pending = advance(current, self.n).filter(|next| next[0] < self.first_end);
        Some(current)
    }
}

impl std::iter::FusedIterator for Combinations {}

/// Lexicographic successor of `members` among combinations of `0..n`.
fn advance(mut members: Members, n: usize) -> Option<Members> {
    let k = COMBINATION_SIZE;
    for p in (0..k).rev() {
        if members[p] < n - k + p {
            members[p] += 1;
            for q in p + 1..k {
                members[q] = members[q - 1] + 1;
            }
            return Some(members);
        }
    }
    None
}
