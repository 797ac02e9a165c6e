//! Property tests for sortscope-metrics

use proptest::prelude::*;
use sortscope_metrics::{Comparisons, SearchOutcome};

proptest! {
    /// `inc_by` agrees with repeated `inc`
    #[test]
    fn prop_inc_by_matches_repeated_inc(steps in proptest::collection::vec(0u64..50, 0..32)) {
        let mut stepped = Comparisons::new();
        let mut bulk = Comparisons::new();
        for &n in &steps {
            for _ in 0..n {
                stepped.inc();
            }
            bulk.inc_by(n);
        }
        prop_assert_eq!(stepped.value(), steps.iter().sum::<u64>());
        prop_assert_eq!(stepped, bulk);
    }

    /// `reset` always returns the counter to zero
    #[test]
    fn prop_reset_zeroes(start in 0u64..1_000_000) {
        let mut counter = Comparisons::new();
        counter.inc_by(start);
        counter.reset();
        prop_assert_eq!(counter.value(), 0);
        counter.inc();
        prop_assert_eq!(counter.value(), 1);
    }

    /// Outcome constructors keep the count and differ only in `found`
    #[test]
    fn prop_outcome_constructors(comparisons in any::<u64>()) {
        let hit = SearchOutcome::found(comparisons);
        let miss = SearchOutcome::not_found(comparisons);
        prop_assert!(hit.found);
        prop_assert!(!miss.found);
        prop_assert_eq!(hit.comparisons, miss.comparisons);
    }
}
