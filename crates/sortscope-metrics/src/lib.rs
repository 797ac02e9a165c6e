//! Comparison counters and search/sort outcomes for sortscope.
//!
//! Every container keeps two independent tallies: a search counter that is
//! reset at the start of each `search`, and (for the sorted variants) a sort
//! counter that only ever grows until the caller resets it. Both operations
//! also hand back the count for the call they just made.

use serde::{Deserialize, Serialize};

/// A monotonically increasing comparison tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparisons(u64);

impl Comparisons {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self(0)
    }

    /// Get the current value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Increment the counter by 1
    pub fn inc(&mut self) {
        self.0 += 1;
    }

    /// Increment the counter by a specific amount
    pub fn inc_by(&mut self, amount: u64) {
        self.0 += amount;
    }

    /// Reset the counter to zero
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Result of a single `search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub found: bool,
    pub comparisons: u64,
}

impl SearchOutcome {
    pub fn found(comparisons: u64) -> Self {
        Self {
            found: true,
            comparisons,
        }
    }

    pub fn not_found(comparisons: u64) -> Self {
        Self {
            found: false,
            comparisons,
        }
    }
}

/// Result of a single `sort` call.
///
/// `comparisons` covers this call only; the container's cumulative sort
/// counter is read separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortReport {
    pub comparisons: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        assert_eq!(Comparisons::new().value(), 0);
        assert_eq!(Comparisons::default(), Comparisons::new());
    }

    #[test]
    fn counter_inc_and_reset() {
        let mut c = Comparisons::new();
        c.inc();
        c.inc();
        c.inc_by(5);
        assert_eq!(c.value(), 7);
        c.reset();
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn outcome_constructors() {
        assert_eq!(
            SearchOutcome::found(2),
            SearchOutcome {
                found: true,
                comparisons: 2
            }
        );
        assert!(!SearchOutcome::not_found(4).found);
    }

    #[test]
    fn outcome_serializes_flat() {
        let json = serde_json::to_string(&SearchOutcome::found(3)).unwrap();
        assert_eq!(json, r#"{"found":true,"comparisons":3}"#);
        let json = serde_json::to_string(&SortReport { comparisons: 9 }).unwrap();
        assert_eq!(json, r#"{"comparisons":9}"#);
    }
}
