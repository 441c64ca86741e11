//! Page accumulation for infinitely scrolling lists.
//!
//! Pages are appended strictly in page order. A page that completes ahead
//! of a lower one waits in a reorder buffer until the gap is filled, and a
//! page below the cursor (a retry that raced a success) is discarded. The
//! item sequence therefore never loses or duplicates a page, whatever order
//! concurrent fetches finish in.

use std::collections::{BTreeMap, BTreeSet};

/// First page index of every list.
pub const FIRST_PAGE: u32 = 1;

/// Immutable paginated list snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    items: Vec<T>,
    /// Next page to append.
    page: u32,
    in_flight: BTreeSet<u32>,
    buffered: BTreeMap<u32, Vec<T>>,
    failures: u32,
}

/// What happened to a completed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page (and `pages - 1` buffered successors) joined the list.
    Appended { pages: u32 },
    /// Waiting for a lower page to complete first.
    Buffered,
    /// Already appended or already buffered; ignored.
    Duplicate,
}

impl<T: Clone> PaginatedList<T> {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), FIRST_PAGE)
    }

    pub fn from_parts(items: Vec<T>, page: u32) -> Self {
        Self {
            items,
            page: page.max(FIRST_PAGE),
            in_flight: BTreeSet::new(),
            buffered: BTreeMap::new(),
            failures: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Next page index the list expects.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight_pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.in_flight.iter().copied()
    }

    pub fn buffered_pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.buffered.keys().copied()
    }

    /// Lowest page at or past the cursor that nobody is fetching yet.
    pub fn next_request_page(&self) -> u32 {
        let mut candidate = self.page;
        while self.in_flight.contains(&candidate) || self.buffered.contains_key(&candidate) {
            candidate += 1;
        }
        candidate
    }

    /// Mark the next free page as in flight and return it.
    pub fn reserve(&self) -> (Self, u32) {
        let page = self.next_request_page();
        let mut next = self.clone();
        next.in_flight.insert(page);
        (next, page)
    }

    /// Drop the in-flight mark for `page` without touching the items, so
    /// the next fetch retries it.
    pub fn release(&self, page: u32) -> Self {
        let mut next = self.clone();
        next.in_flight.remove(&page);
        next
    }

    /// Record a failed fetch of `page`: releases it and bumps the failure
    /// count. Items and cursor stay as they were.
    pub fn fail(&self, page: u32) -> Self {
        let mut next = self.release(page);
        next.failures += 1;
        next
    }

    /// Number of failed fetches over the list's lifetime.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Fold a completed page into the list.
    pub fn with_page(&self, page: u32, items: Vec<T>) -> (Self, PageOutcome) {
        let mut next = self.release(page);
        if page < next.page || next.buffered.contains_key(&page) {
            return (next, PageOutcome::Duplicate);
        }

        next.buffered.insert(page, items);
        let mut appended = 0;
        while let Some(items) = next.buffered.remove(&next.page) {
            next.items.extend(items);
            next.page += 1;
            appended += 1;
        }

        let outcome = if appended == 0 {
            PageOutcome::Buffered
        } else {
            PageOutcome::Appended { pages: appended }
        };
        (next, outcome)
    }
}

impl<T: Clone> Default for PaginatedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_page_and_empty() {
        let list = PaginatedList::<char>::new();
        assert_eq!(list.page(), 1);
        assert!(list.is_empty());
        assert!(!list.is_fetching());
    }

    #[test]
    fn sequential_pages_concatenate() {
        let list = PaginatedList::new();
        let (list, outcome) = list.with_page(1, vec!['a', 'b']);
        assert_eq!(outcome, PageOutcome::Appended { pages: 1 });
        let (list, _) = list.with_page(2, vec!['c']);
        assert_eq!(list.items(), &['a', 'b', 'c']);
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn out_of_order_pages_are_reordered() {
        let list = PaginatedList::new();
        let (list, outcome) = list.with_page(2, vec!['b']);
        assert_eq!(outcome, PageOutcome::Buffered);
        assert!(list.is_empty());
        assert_eq!(list.page(), 1);

        let (list, outcome) = list.with_page(1, vec!['a']);
        assert_eq!(outcome, PageOutcome::Appended { pages: 2 });
        assert_eq!(list.items(), &['a', 'b']);
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn repeated_page_is_not_appended_twice() {
        let (list, _) = PaginatedList::new().with_page(1, vec!['a']);
        let (list, outcome) = list.with_page(1, vec!['a']);
        assert_eq!(outcome, PageOutcome::Duplicate);
        assert_eq!(list.items(), &['a']);
        assert_eq!(list.page(), 2);
    }

    #[test]
    fn reserve_skips_pages_already_in_flight() {
        let list = PaginatedList::<char>::new();
        let (list, first) = list.reserve();
        let (list, second) = list.reserve();
        assert_eq!((first, second), (1, 2));
        assert_eq!(list.in_flight_pages().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn release_lets_failed_page_be_retried() {
        let (list, page) = PaginatedList::<char>::new().reserve();
        let list = list.release(page);
        assert_eq!(list.next_request_page(), 1);
        assert_eq!(list.page(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn fail_counts_and_keeps_items() {
        let (list, _) = PaginatedList::new().with_page(1, vec!['a']);
        let (list, page) = list.reserve();
        let failed = list.fail(page);
        assert_eq!(failed.failures(), 1);
        assert_eq!(failed.items(), &['a']);
        assert_eq!(failed.page(), 2);
        assert!(!failed.is_fetching());
    }

    #[test]
    fn reserve_skips_buffered_pages() {
        let (list, _) = PaginatedList::new().with_page(2, vec!['b']);
        let (list, first) = list.reserve();
        let (_, second) = list.reserve();
        assert_eq!((first, second), (1, 3));
    }
}
