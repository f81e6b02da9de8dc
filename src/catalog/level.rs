//! Discretized attribute levels.
//!
//! A summed attribute value maps to one of seven bands by scanning the
//! ascending threshold ladder and stopping at the first threshold the value
//! does not reach.

use std::fmt;

/// Ascending thresholds for levels 1 through 6.
pub const LEVEL_THRESHOLDS: [f64; 6] = [1.0, 4.0, 8.0, 12.0, 16.0, 20.0];

/// The highest reachable level.
pub const MAX_LEVEL: u8 = LEVEL_THRESHOLDS.len() as u8;

/// Sum a mandatory attribute must reach (the level-6 threshold).
pub const MANDATORY_THRESHOLD: f64 = LEVEL_THRESHOLDS[LEVEL_THRESHOLDS.len() - 1];

/// A level in `0..=6`. Level 0 displays as `-`, others as `Lv.N`.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::Level;
///
/// assert_eq!(Level::from_value(19.9).to_string(), "Lv.5");
/// assert_eq!(Level::from_value(20.0).to_string(), "Lv.6");
/// assert_eq!(Level::from_value(0.0).to_string(), "-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level(u8);

impl Level {
    pub const NONE: Level = Level(0);
    pub const MAX: Level = Level(MAX_LEVEL);

    /// Derives the level of a summed value.
    pub fn from_value(value: f64) -> Self {
        let mut level = 0;
        for threshold in LEVEL_THRESHOLDS {
            if value >= threshold {
                level += 1;
            } else {
                break;
            }
        }
        Level(level)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_max(self) -> bool {
        self.0 == MAX_LEVEL
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            f.write_str("-")
        } else {
            write!(f, "Lv.{}", self.0)
        }
    }
}

/// Display label for a summed value, e.g. `"Lv.3"` or `"-"`.
pub fn level_label(value: f64) -> String {
    Level::from_value(value).to_string()
}
