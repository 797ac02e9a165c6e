use sortscope_metrics::{SearchOutcome, SortReport};

/// Membership lookup with comparison instrumentation.
///
/// `search` resets the container's search counter before it starts, so the
/// count it reports never includes earlier calls.
pub trait Searchable<T> {
    fn search(&mut self, value: &T) -> SearchOutcome;
    fn last_search_comparisons(&self) -> u64;
}

/// In-place sorting with a cumulative comparison counter.
///
/// Sorting is a separate capability: only the sorted containers carry it.
pub trait Sortable {
    fn sort(&mut self) -> SortReport;
    fn sort_comparisons(&self) -> u64;
    fn reset_sort_comparisons(&mut self);
}

/// Ordered, side-effect-free view of the contents for display.
pub trait Enumerable<T> {
    fn values(&self) -> Vec<&T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
