//! Filtering, sorting and pagination of record lists.
//!
//! Every list screen (customers, sellers, payments, deliveries) shows the
//! same thing: the records whose text fields contain the search string, in
//! backend order or sorted by one key, cut into fixed-size pages.
//! [`paginate`] is the pure function behind all of them and [`ListState`]
//! carries the filter/sort/page a screen is currently showing.
//!
//! # Page clamping
//!
//! Page indices are 1-based. A request beyond the last page shows the last
//! page; a request below 1 shows page 1. An empty filtered set has zero
//! pages, reports page 1 and yields no items, which [`PageView::is_empty`]
//! signals as "no records".

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use chrono::NaiveDate;

/// Page size used by list screens unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Text fields a record exposes to the search box.
pub trait Searchable {
    /// The fields searched, in no particular order.
    fn search_fields(&self) -> Vec<&str>;
}

/// Keys a list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Date,
    Quantity,
    Name,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "quantity" | "qty" => Ok(Self::Quantity),
            "name" => Ok(Self::Name),
            _ => Err(format!("invalid sort key: {s} (expected date, quantity or name)")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A sort order: one key plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending by `key`.
    #[must_use]
    pub const fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending by `key`.
    #[must_use]
    pub const fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// A record's value for one [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Date(NaiveDate),
    Number(f64),
    Text(&'a str),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => Ordering::Equal,
        }
    }
}

/// Records that can be ordered by a [`SortKey`].
pub trait Sortable {
    /// The value for `key`, or `None` if the record has no usable value.
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>>;
}

/// Case-insensitive substring match over a record's search fields.
///
/// The filter is used as typed, spaces included. An empty filter matches
/// everything.
#[must_use]
pub fn matches_filter<T: Searchable + ?Sized>(record: &T, filter: &str) -> bool {
    let needle = filter.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Stable sort of record references.
///
/// Ties keep their input order. Records without a value for the key go after
/// all records that have one, whatever the direction.
pub fn sort_records<T: Sortable>(records: &mut [&T], sort: Sort) {
    records.sort_by(|a, b| {
        match (a.sort_value(sort.key), b.sort_value(sort.key)) {
            (Some(x), Some(y)) => {
                let ord = x.compare(&y);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Number of pages needed for `count` records.
#[must_use]
pub const fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// Clamp a requested page into `[1, total_pages]` (page 1 when there are none).
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of a filtered, optionally sorted list.
#[derive(Debug, Clone)]
pub struct PageView<'a, T> {
    filtered: Vec<&'a T>,
    start: usize,
    end: usize,
    page: usize,
    total_pages: usize,
    total_count: usize,
}

impl<'a, T> PageView<'a, T> {
    /// Records on the current page, in display order.
    #[must_use]
    pub fn items(&self) -> &[&'a T] {
        self.filtered.get(self.start..self.end).unwrap_or(&[])
    }

    /// All records that passed the filter, in display order.
    #[must_use]
    pub fn filtered(&self) -> &[&'a T] {
        &self.filtered
    }

    /// The 1-based page shown.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages in the filtered list.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of records that passed the filter.
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Number of records before filtering.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// True when nothing passed the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Human label for the visible window, e.g. "6-10 of 18".
    #[must_use]
    pub fn range_label(&self) -> String {
        if self.is_empty() {
            return "0 of 0".to_string();
        }
        format!("{}-{} of {}", self.start + 1, self.end, self.filtered.len())
    }
}

/// Filter, sort and cut one page out of `records`.
///
/// `predicate` decides which records are kept; order is the input order
/// unless `sort` is given. `page` is clamped as described in the module docs.
pub fn paginate<'a, T, P>(
    records: &'a [T],
    predicate: P,
    sort: Option<Sort>,
    page_size: NonZeroUsize,
    page: usize,
) -> PageView<'a, T>
where
    T: Sortable,
    P: Fn(&T) -> bool,
{
    let mut filtered: Vec<&T> = records.iter().filter(|r| predicate(r)).collect();
    if let Some(sort) = sort {
        sort_records(&mut filtered, sort);
    }

    let total_pages = total_pages(filtered.len(), page_size);
    let page = clamp_page(page, total_pages);
    let start = ((page - 1) * page_size.get()).min(filtered.len());
    let end = (start + page_size.get()).min(filtered.len());

    PageView {
        filtered,
        start,
        end,
        page,
        total_pages,
        total_count: records.len(),
    }
}

/// Filter/sort/page state of one list screen.
///
/// Not persisted: a fresh screen starts with an empty filter on page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    filter: String,
    sort: Option<Sort>,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListState {
    /// Empty filter, no sort, page 1.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            filter: String::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Current sort, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Current (last clamped) page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Replace the filter text. Always returns to page 1.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Replace the sort order.
    pub const fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    /// Jump to `page`, clamped to the pages that exist.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_add(1), total_pages);
    }

    /// Go back one page; a no-op on page 1.
    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_sub(1), total_pages);
    }

    /// Compute the visible page for `records`.
    ///
    /// The stored page is re-clamped against the current data, so a list
    /// that shrank under the cursor never points past its end.
    pub fn view<'a, T>(&mut self, records: &'a [T]) -> PageView<'a, T>
    where
        T: Searchable + Sortable,
    {
        let filter = self.filter.clone();
        let view = paginate(
            records,
            |r| matches_filter(r, &filter),
            self.sort,
            self.page_size,
            self.page,
        );
        self.page = view.page();
        view
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        phone: String,
        qty: Option<f64>,
        date: Option<NaiveDate>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.phone]
        }
    }

    impl Sortable for Row {
        fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
            match key {
                SortKey::Name => Some(SortValue::Text(&self.name)),
                SortKey::Quantity => self.qty.map(SortValue::Number),
                SortKey::Date => self.date.map(SortValue::Date),
            }
        }
    }

    fn row(name: &str, phone: &str, qty: Option<f64>) -> Row {
        Row {
            name: name.to_string(),
            phone: phone.to_string(),
            qty,
            date: None,
        }
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_filter_is_case_insensitive_over_all_fields() {
        let r = row("Ramesh Kumar", "9876543210", None);
        assert!(matches_filter(&r, "ramesh"));
        assert!(matches_filter(&r, "KUMAR"));
        assert!(matches_filter(&r, "6543"));
        assert!(matches_filter(&r, ""));
        assert!(!matches_filter(&r, "suresh"));
    }

    #[test]
    fn test_filter_keeps_spaces() {
        let spaced = row("Ramesh Kumar", "9876543210", None);
        let single = row("Ramesh", "9876543210", None);
        assert!(matches_filter(&spaced, " "));
        assert!(matches_filter(&spaced, "h k"));
        assert!(!matches_filter(&single, " "));
        assert!(!matches_filter(&single, " ramesh"));
    }

    #[test]
    fn test_empty_collection_has_zero_pages() {
        let rows: Vec<Row> = vec![];
        let view = paginate(&rows, |_| true, None, size(5), 3);
        assert!(view.is_empty());
        assert_eq!(view.total_pages(), 0);
        assert_eq!(view.page(), 1);
        assert!(view.items().is_empty());
        assert_eq!(view.range_label(), "0 of 0");
    }

    #[test]
    fn test_page_beyond_end_clamps_to_last() {
        let rows: Vec<Row> = (0..12).map(|i| row(&format!("r{i}"), "", None)).collect();
        let last = paginate(&rows, |_| true, None, size(5), 3);
        let beyond = paginate(&rows, |_| true, None, size(5), 99);
        assert_eq!(beyond.page(), 3);
        assert_eq!(beyond.items(), last.items());
        assert_eq!(beyond.items().len(), 2);
        assert_eq!(beyond.range_label(), "11-12 of 12");
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let rows: Vec<Row> = (0..7).map(|i| row(&format!("r{i}"), "", None)).collect();
        let view = paginate(&rows, |_| true, None, size(5), 0);
        assert_eq!(view.page(), 1);
        assert_eq!(view.items()[0].name, "r0");
    }

    #[test]
    fn test_sort_is_stable_and_missing_values_last() {
        let rows = vec![
            row("a", "", Some(2.0)),
            row("b", "", None),
            row("c", "", Some(1.0)),
            row("d", "", Some(2.0)),
        ];
        let asc = paginate(&rows, |_| true, Some(Sort::ascending(SortKey::Quantity)), size(10), 1);
        let names: Vec<&str> = asc.items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "d", "b"]);

        let desc = paginate(&rows, |_| true, Some(Sort::descending(SortKey::Quantity)), size(10), 1);
        let names: Vec<&str> = desc.items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "d", "c", "b"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let rows = vec![row("beta", "", None), row("Alpha", "", None), row("charlie", "", None)];
        let view = paginate(&rows, |_| true, Some(Sort::ascending(SortKey::Name)), size(10), 1);
        let names: Vec<&str> = view.items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "charlie"]);
    }

    #[test]
    fn test_set_filter_resets_page() {
        let rows: Vec<Row> = (0..20).map(|i| row(&format!("r{i}"), "", None)).collect();
        let mut state = ListState::new(size(5));
        state.go_to(3, 4);
        assert_eq!(state.view(&rows).page(), 3);
        state.set_filter("r1");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_navigation_is_clamped_not_wrapped() {
        let mut state = ListState::new(size(5));
        state.prev_page(4);
        assert_eq!(state.page(), 1);
        state.go_to(4, 4);
        state.next_page(4);
        assert_eq!(state.page(), 4);
    }

    #[test]
    fn test_view_reclamps_when_list_shrinks() {
        let rows: Vec<Row> = (0..20).map(|i| row(&format!("r{i}"), "", None)).collect();
        let mut state = ListState::new(size(5));
        state.go_to(4, 4);
        let fewer = &rows[..6];
        let view = state.view(fewer);
        assert_eq!(view.page(), 2);
        assert_eq!(state.page(), 2);
        assert_eq!(view.items().len(), 1);
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(("[a-cA-C]{0,6}", "[0-9]{0,4}"), 0..40).prop_map(|v| {
            v.into_iter()
                .map(|(name, phone)| row(&name, &phone, None))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filtered_rows_all_match(rows in rows_strategy(), needle in "[a-c0-9]{0,2}") {
            let view = paginate(&rows, |r| matches_filter(r, &needle), None, size(5), 1);
            prop_assert!(view.filtered_count() <= rows.len());
            let lower = needle.to_lowercase();
            for r in view.filtered() {
                prop_assert!(
                    r.name.to_lowercase().contains(&lower) || r.phone.contains(&lower)
                );
            }
        }

        #[test]
        fn prop_pages_partition_filtered(rows in rows_strategy(), page_size in 1usize..8) {
            let ps = size(page_size);
            let first = paginate(&rows, |_| true, None, ps, 1);
            let mut seen = Vec::new();
            for page in 1..=first.total_pages() {
                let view = paginate(&rows, |_| true, None, ps, page);
                prop_assert!(view.items().len() <= page_size);
                seen.extend(view.items().iter().map(|r| (*r).clone()));
            }
            prop_assert_eq!(seen, rows);
        }

        #[test]
        fn prop_out_of_range_equals_last(rows in rows_strategy(), extra in 1usize..50) {
            let ps = size(5);
            let last = paginate(&rows, |_| true, None, ps, 1_000_000);
            let beyond = paginate(&rows, |_| true, None, ps, last.total_pages() + extra);
            prop_assert_eq!(last.page(), beyond.page());
            prop_assert_eq!(last.items(), beyond.items());
        }
    }
}
