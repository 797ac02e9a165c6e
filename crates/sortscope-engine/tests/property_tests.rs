//! Property tests for sortscope-engine
//!
//! The array merge sort and the list merge sort must agree.

use proptest::prelude::*;
use sortscope_engine::{Structure, Workbench, WorkbenchConfig};
use sortscope_logging::{Logger, LoggingConfig};

proptest! {
    /// Both merge sorts produce the same sequence for the same multiset
    #[test]
    fn prop_array_and_list_sorts_agree(values in proptest::collection::vec(-100i64..100, 0..200)) {
        let mut logger = Logger::collecting(LoggingConfig::default());
        let mut bench = Workbench::new(WorkbenchConfig { capacity: values.len(), bst_sample: 20 });
        bench.load(&values, &mut logger).unwrap();
        let summary = bench.sort_all(&mut logger);
        prop_assert!(summary.consistent);
        prop_assert_eq!(
            bench.sorted_array().iter().collect::<Vec<_>>(),
            bench.sorted_list().iter().collect::<Vec<_>>()
        );
    }

    /// Every structure agrees on membership once sorted
    #[test]
    fn prop_membership_agrees(values in proptest::collection::vec(0i64..50, 1..100), probe in 0i64..60) {
        let mut logger = Logger::collecting(LoggingConfig::default());
        let mut bench = Workbench::new(WorkbenchConfig { capacity: values.len(), bst_sample: values.len() });
        bench.load(&values, &mut logger).unwrap();
        bench.sort_all(&mut logger);
        bench.build_tree(&mut logger);
        let report = bench.search_all(probe, &mut logger);
        let expected = values.contains(&probe);
        for structure in Structure::ALL {
            prop_assert_eq!(report.get(structure).map(|o| o.found), Some(expected));
        }
    }
}
