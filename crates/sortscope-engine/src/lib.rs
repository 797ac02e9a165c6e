//! Side-by-side workbench over every sortscope container.
//!
//! The workbench feeds one sample into all four linear containers, sorts the
//! two sorted variants, grows the tree from the head of the unsorted array
//! and then asks all five the same question, recording how many comparisons
//! each needed.

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use sortscope_array::{SortedArray, UnsortedArray};
use sortscope_bst::BinarySearchTree;
use sortscope_config::SortscopeConfig;
use sortscope_datagen::DataGenerator;
use sortscope_list::{SortedLinkedList, UnsortedLinkedList};
use sortscope_logging::Logger;
use sortscope_metrics::{SearchOutcome, SortReport};
use sortscope_ports::Searchable;

const COMPONENT: &str = "engine";

/// The five containers, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    UnsortedArray,
    UnsortedLinkedList,
    SortedArray,
    SortedLinkedList,
    Bst,
}

impl Structure {
    pub const ALL: [Structure; 5] = [
        Structure::UnsortedArray,
        Structure::UnsortedLinkedList,
        Structure::SortedArray,
        Structure::SortedLinkedList,
        Structure::Bst,
    ];
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Structure::UnsortedArray => write!(f, "Unsorted Array"),
            Structure::UnsortedLinkedList => write!(f, "Unsorted Linked List"),
            Structure::SortedArray => write!(f, "Sorted Array"),
            Structure::SortedLinkedList => write!(f, "Sorted Linked List"),
            Structure::Bst => write!(f, "BST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkbenchConfig {
    pub capacity: usize,
    pub bst_sample: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            capacity: 512,
            bst_sample: 20,
        }
    }
}

impl From<&SortscopeConfig> for WorkbenchConfig {
    fn from(config: &SortscopeConfig) -> Self {
        Self {
            capacity: config.capacity,
            bst_sample: config.bst_sample,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub offered: usize,
    /// Values the unsorted array dropped because it was full.
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSummary {
    pub array: SortReport,
    pub list: SortReport,
    pub array_total: u64,
    pub list_total: u64,
    /// Both sorts produced the same sequence.
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StructureResult {
    pub structure: Structure,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Outcome of searching every container for one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    pub value: i64,
    pub results: Vec<StructureResult>,
}

impl PerformanceReport {
    pub fn get(&self, structure: Structure) -> Option<&SearchOutcome> {
        self.results
            .iter()
            .find(|r| r.structure == structure)
            .map(|r| &r.outcome)
    }
}

/// All five containers over `i64`.
#[derive(Debug)]
pub struct Workbench {
    config: WorkbenchConfig,
    unsorted_array: UnsortedArray<i64>,
    unsorted_list: UnsortedLinkedList<i64>,
    sorted_array: SortedArray<i64>,
    sorted_list: SortedLinkedList<i64>,
    bst: BinarySearchTree<i64>,
    sorted: bool,
}

impl Workbench {
    pub fn new(config: WorkbenchConfig) -> Self {
        Self {
            config,
            unsorted_array: UnsortedArray::new(config.capacity),
            unsorted_list: UnsortedLinkedList::new(),
            sorted_array: SortedArray::new(config.capacity),
            sorted_list: SortedLinkedList::new(),
            bst: BinarySearchTree::new(),
            sorted: false,
        }
    }

    /// Adds every value to the four linear containers.
    ///
    /// A full unsorted array only drops the value and logs a warning. A full
    /// sorted array aborts the load with an error before any container takes
    /// the value, so the containers loaded so far stay in step.
    pub fn load(&mut self, values: &[i64], logger: &mut Logger) -> Result<LoadSummary> {
        self.load_from(values.iter().copied(), logger)
    }

    /// Generates `count` values below `max_value` and loads them.
    ///
    /// Values are drawn one at a time, so a count far beyond capacity fails
    /// at the first value that does not fit.
    pub fn load_random(
        &mut self,
        generator: &mut DataGenerator,
        count: usize,
        max_value: i64,
        logger: &mut Logger,
    ) -> Result<LoadSummary> {
        self.load_from(generator.stream(count, max_value), logger)
    }

    fn load_from(&mut self, values: impl Iterator<Item = i64>, logger: &mut Logger) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for value in values {
            self.sorted_array
                .add(value)
                .with_context(|| format!("sorted array could not take {value}"))?;
            summary.offered += 1;
            if let Some(err) = self.unsorted_array.add(value).rejection() {
                summary.rejected += 1;
                logger.warn(COMPONENT, format!("unsorted array dropped {value}: {err}"));
            }
            self.unsorted_list.add(value);
            self.sorted_list.add(value);
        }
        self.sorted = false;
        logger.info(
            COMPONENT,
            format!("loaded {} values ({} rejected)", summary.offered, summary.rejected),
        );
        Ok(summary)
    }

    /// Sorts both sorted containers.
    pub fn sort_all(&mut self, logger: &mut Logger) -> SortSummary {
        let array = self.sorted_array.sort();
        let list = self.sorted_list.sort();
        self.sorted = true;
        let consistent = self.consistent_sort();
        if !consistent {
            logger.error(COMPONENT, "array and list sorts disagree");
        }
        logger.debug(
            COMPONENT,
            format!(
                "sorted: array {} comparisons, list {} comparisons",
                array.comparisons, list.comparisons
            ),
        );
        SortSummary {
            array,
            list,
            array_total: self.sorted_array.sort_comparisons(),
            list_total: self.sorted_list.sort_comparisons(),
            consistent,
        }
    }

    /// Whether both sorted containers currently hold the same sequence.
    pub fn consistent_sort(&self) -> bool {
        self.sorted_array.iter().eq(self.sorted_list.iter())
    }

    /// Grows the tree from the first `bst_sample` values of the unsorted
    /// array and returns its height.
    pub fn build_tree(&mut self, logger: &mut Logger) -> usize {
        let take = self.config.bst_sample.min(self.unsorted_array.len());
        for &value in self.unsorted_array.as_slice().iter().take(take) {
            self.bst.add(value);
        }
        let height = self.bst.height();
        logger.debug(
            COMPONENT,
            format!("tree holds {} values, height {}", self.bst.len(), height),
        );
        height
    }

    /// Searches every container for `value`.
    ///
    /// The sorted array answers by binary search, which assumes
    /// [`Workbench::sort_all`] has run since the last load.
    pub fn search_all(&mut self, value: i64, logger: &mut Logger) -> PerformanceReport {
        if !self.sorted {
            logger.warn(
                COMPONENT,
                "searching sorted containers before sort; binary search results are unspecified",
            );
        }
        let containers: [(Structure, &mut dyn Searchable<i64>); 5] = [
            (Structure::UnsortedArray, &mut self.unsorted_array),
            (Structure::UnsortedLinkedList, &mut self.unsorted_list),
            (Structure::SortedArray, &mut self.sorted_array),
            (Structure::SortedLinkedList, &mut self.sorted_list),
            (Structure::Bst, &mut self.bst),
        ];
        let results = containers
            .into_iter()
            .map(|(structure, container)| StructureResult {
                structure,
                outcome: container.search(&value),
            })
            .collect();
        PerformanceReport { value, results }
    }

    /// Empties every container. Cumulative sort counters are kept.
    pub fn clear(&mut self) {
        self.unsorted_array.clear();
        self.unsorted_list.clear();
        self.sorted_array.clear();
        self.sorted_list.clear();
        self.bst.clear();
        self.sorted = false;
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn unsorted_array(&self) -> &UnsortedArray<i64> {
        &self.unsorted_array
    }

    pub fn unsorted_list(&self) -> &UnsortedLinkedList<i64> {
        &self.unsorted_list
    }

    pub fn sorted_array(&self) -> &SortedArray<i64> {
        &self.sorted_array
    }

    pub fn sorted_list(&self) -> &SortedLinkedList<i64> {
        &self.sorted_list
    }

    pub fn bst(&self) -> &BinarySearchTree<i64> {
        &self.bst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_logging::{LogLevel, LoggingConfig};

    fn logger() -> Logger {
        Logger::collecting(LoggingConfig::new().with_level(LogLevel::Trace))
    }

    fn loaded(values: &[i64], capacity: usize) -> (Workbench, Logger) {
        let mut logger = logger();
        let mut bench = Workbench::new(WorkbenchConfig {
            capacity,
            bst_sample: 20,
        });
        bench.load(values, &mut logger).unwrap();
        (bench, logger)
    }

    #[test]
    fn load_feeds_all_linear_containers() {
        let (bench, _) = loaded(&[3, 1, 2], 8);
        assert_eq!(bench.unsorted_array().as_slice(), &[3, 1, 2]);
        assert_eq!(bench.unsorted_list().iter().copied().collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(bench.sorted_array().len(), 3);
        assert_eq!(bench.sorted_list().len(), 3);
        assert!(bench.bst().is_empty());
    }

    #[test]
    fn full_sorted_array_aborts_load() {
        let mut logger = logger();
        let mut bench = Workbench::new(WorkbenchConfig {
            capacity: 2,
            bst_sample: 20,
        });
        let err = bench.load(&[1, 2, 3], &mut logger).unwrap_err();
        assert!(format!("{err:#}").contains("array is full (capacity 2)"));
        // The failing value reached none of the containers.
        assert_eq!(bench.unsorted_array().as_slice(), &[1, 2]);
        assert_eq!(bench.sorted_array().as_slice(), &[1, 2]);
        assert_eq!(bench.unsorted_list().iter().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(bench.sorted_list().iter().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert!(!logger.entries().iter().any(|e| e.level == LogLevel::Warn));
    }

    #[test]
    fn load_random_stops_at_capacity() {
        let mut logger = logger();
        let mut bench = Workbench::new(WorkbenchConfig {
            capacity: 4,
            bst_sample: 20,
        });
        let err = bench
            .load_random(&mut DataGenerator::new(Some(1)), usize::MAX, 1000, &mut logger)
            .unwrap_err();
        assert!(format!("{err:#}").contains("array is full (capacity 4)"));
        assert_eq!(bench.unsorted_list().len(), 4);
    }

    #[test]
    fn load_logs_summary_at_info() {
        let (_, logger) = loaded(&[1, 2], 4);
        assert!(logger
            .entries()
            .iter()
            .any(|e| e.level == LogLevel::Info && e.message == "loaded 2 values (0 rejected)"));
    }

    #[test]
    fn sort_all_agrees_and_reports_counts() {
        let (mut bench, mut logger) = loaded(&[5, 3, 8, 3, 1], 8);
        let summary = bench.sort_all(&mut logger);
        assert!(summary.consistent);
        assert!(summary.array.comparisons > 0);
        assert_eq!(summary.array_total, summary.array.comparisons);
        assert_eq!(bench.sorted_array().as_slice(), &[1, 3, 3, 5, 8]);
        assert!(bench.is_sorted());
    }

    #[test]
    fn build_tree_uses_head_of_unsorted_array() {
        let mut logger = logger();
        let mut bench = Workbench::new(WorkbenchConfig {
            capacity: 8,
            bst_sample: 3,
        });
        bench.load(&[5, 3, 8, 3, 1], &mut logger).unwrap();
        assert_eq!(bench.build_tree(&mut logger), 2);
        assert_eq!(bench.bst().in_order(), vec![&3, &5, &8]);
    }

    #[test]
    fn search_all_reports_every_structure() {
        let (mut bench, mut logger) = loaded(&[5, 3, 8, 3, 1], 8);
        bench.sort_all(&mut logger);
        bench.build_tree(&mut logger);

        let report = bench.search_all(3, &mut logger);
        assert_eq!(report.results.len(), 5);
        assert!(report.results.iter().all(|r| r.outcome.found));
        assert_eq!(report.get(Structure::UnsortedArray), Some(&SearchOutcome::found(2)));
        // List chain is 1 -> 3 -> 8 -> 3 -> 5.
        assert_eq!(report.get(Structure::UnsortedLinkedList), Some(&SearchOutcome::found(2)));
        assert_eq!(report.get(Structure::Bst), Some(&SearchOutcome::found(2)));

        let report = bench.search_all(9, &mut logger);
        assert!(report.results.iter().all(|r| !r.outcome.found));
        assert_eq!(report.get(Structure::Bst), Some(&SearchOutcome::not_found(2)));
    }

    #[test]
    fn search_before_sort_warns() {
        let (mut bench, mut logger) = loaded(&[2, 1], 4);
        let _ = bench.search_all(1, &mut logger);
        assert!(logger
            .entries()
            .iter()
            .any(|e| e.level == LogLevel::Warn && e.message.contains("before sort")));
    }

    #[test]
    fn report_serializes_flat_outcomes() {
        let (mut bench, mut logger) = loaded(&[1], 4);
        bench.sort_all(&mut logger);
        let report = bench.search_all(1, &mut logger);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["value"], 1);
        assert_eq!(json["results"][0]["structure"], "unsorted_array");
        assert_eq!(json["results"][0]["found"], true);
        assert_eq!(json["results"][4]["structure"], "bst");
    }

    #[test]
    fn load_random_is_reproducible() {
        let mut logger = logger();
        let mut a = Workbench::new(WorkbenchConfig::default());
        let mut b = Workbench::new(WorkbenchConfig::default());
        a.load_random(&mut DataGenerator::new(Some(3)), 100, 1000, &mut logger).unwrap();
        b.load_random(&mut DataGenerator::new(Some(3)), 100, 1000, &mut logger).unwrap();
        assert_eq!(a.unsorted_array().as_slice(), b.unsorted_array().as_slice());
    }

    #[test]
    fn clear_empties_everything() {
        let (mut bench, mut logger) = loaded(&[4, 2], 4);
        bench.sort_all(&mut logger);
        bench.build_tree(&mut logger);
        bench.clear();
        assert!(bench.unsorted_array().is_empty());
        assert!(bench.unsorted_list().is_empty());
        assert!(bench.sorted_array().is_empty());
        assert!(bench.sorted_list().is_empty());
        assert!(bench.bst().is_empty());
        assert!(!bench.is_sorted());
    }

    #[test]
    fn structure_display_names() {
        let names: Vec<String> = Structure::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec!["Unsorted Array", "Unsorted Linked List", "Sorted Array", "Sorted Linked List", "BST"]
        );
    }

    #[test]
    fn workbench_config_from_file_config() {
        let file = SortscopeConfig {
            capacity: 32,
            bst_sample: 7,
            ..SortscopeConfig::default()
        };
        assert_eq!(
            WorkbenchConfig::from(&file),
            WorkbenchConfig {
                capacity: 32,
                bst_sample: 7
            }
        );
    }
}
