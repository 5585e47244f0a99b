//! Performance tier classification.
//!
//! # Invariants
//! - Zero due tasks classifies as `Black`, same as very poor completion.
//! - Rates are not clamped: completed > due still maps to `Green`.
//! - Threshold comparisons use integer arithmetic, so exact boundaries
//!   (80%, 50%, 20%) land in the higher tier.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const GREEN_MIN_PERCENT: u64 = 80;
const YELLOW_MIN_PERCENT: u64 = 50;
const RED_MIN_PERCENT: u64 = 20;

/// Four-level completion band, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Green,
    Yellow,
    Red,
    Black,
}

impl PerformanceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Black => "black",
        }
    }

    /// Badge label shown next to a day's task list.
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "Excellent",
            Self::Yellow => "Very good",
            Self::Red => "Irregular",
            Self::Black => "Poor",
        }
    }
}

impl Display for PerformanceTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets `total_completed / total_due` into a tier.
pub fn classify(total_due: usize, total_completed: usize) -> PerformanceTier {
    if total_due == 0 {
        return PerformanceTier::Black;
    }

    let due = total_due as u64;
    let scaled = (total_completed as u64).saturating_mul(100);
    if scaled >= GREEN_MIN_PERCENT * due {
        PerformanceTier::Green
    } else if scaled >= YELLOW_MIN_PERCENT * due {
        PerformanceTier::Yellow
    } else if scaled >= RED_MIN_PERCENT * due {
        PerformanceTier::Red
    } else {
        PerformanceTier::Black
    }
}

/// Display percentage, rounded half-up. `0` when nothing is due.
pub fn completion_rate_percent(total_due: usize, total_completed: usize) -> u32 {
    if total_due == 0 {
        return 0;
    }
    let due = total_due as u64;
    let completed = total_completed as u64;
    let rounded = (completed.saturating_mul(200) + due) / (due * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{classify, completion_rate_percent, PerformanceTier};

    #[test]
    fn boundaries_fall_into_higher_tier() {
        assert_eq!(classify(5, 4), PerformanceTier::Green);
        assert_eq!(classify(4, 2), PerformanceTier::Yellow);
        assert_eq!(classify(5, 1), PerformanceTier::Red);
        assert_eq!(classify(100, 19), PerformanceTier::Black);
    }

    #[test]
    fn rate_rounds_half_up() {
        assert_eq!(completion_rate_percent(3, 2), 67);
        assert_eq!(completion_rate_percent(8, 1), 13);
        assert_eq!(completion_rate_percent(0, 3), 0);
    }

    #[test]
    fn tiers_order_best_to_worst() {
        assert!(PerformanceTier::Green < PerformanceTier::Yellow);
        assert!(PerformanceTier::Red < PerformanceTier::Black);
    }
}
