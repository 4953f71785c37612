use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use chrono::NaiveDate;

/// Inclusive range of calendar days. A range built from a single day
/// matches only that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let end = end.unwrap_or(start);
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, None)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Range after the start picker changed. Clearing the start clears the
/// whole range.
pub fn pick_range_start(current: Option<DateRange>, day: Option<NaiveDate>) -> Option<DateRange> {
    let day = day?;
    Some(DateRange::new(day, current.map(|range| range.end())))
}

/// Range after the end picker changed. Clearing the end leaves the start
/// as a single day.
pub fn pick_range_end(current: Option<DateRange>, day: Option<NaiveDate>) -> Option<DateRange> {
    match (current, day) {
        (Some(range), Some(day)) => Some(DateRange::new(range.start(), Some(day))),
        (None, Some(day)) => Some(DateRange::single_day(day)),
        (Some(range), None) => Some(DateRange::single_day(range.start())),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub text: String,
    pub facets: BTreeMap<String, BTreeSet<String>>,
    pub date_range: Option<DateRange>,
    pub assoc_id: Option<String>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.facets.values().all(BTreeSet::is_empty)
            && self.date_range.is_none()
            && self.assoc_id.is_none()
    }

    /// Adds `value` to the group if absent, removes it otherwise.
    pub fn toggle_facet(&mut self, group: &str, value: &str) {
        let selected = self.facets.entry(group.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected.is_empty() {
            self.facets.remove(group);
        }
    }

    pub fn clear_facet(&mut self, group: &str) {
        self.facets.remove(group);
    }

    pub fn selected(&self, group: &str) -> BTreeSet<String> {
        self.facets.get(group).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOption {
    NewestFirst,
    OldestFirst,
    NameAsc,
    Unsorted,
}

impl SortOption {
    pub const CHOICES: [SortOption; 3] = [
        SortOption::NewestFirst,
        SortOption::OldestFirst,
        SortOption::NameAsc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortOption::NewestFirst => "Newest First",
            SortOption::OldestFirst => "Oldest First",
            SortOption::NameAsc => "A-Z",
            SortOption::Unsorted => "Default",
        }
    }

    /// Unknown labels fall back to the natural input order.
    pub fn from_label(label: &str) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or(SortOption::Unsorted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_size: NonZeroUsize,
    current_page: usize,
}

impl PageState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn with_size(page_size: usize) -> Option<Self> {
        NonZeroUsize::new(page_size).map(Self::new)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.get()).max(1)
    }

    pub fn next(&mut self, row_count: usize) {
        if self.current_page < self.total_pages(row_count) {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn jump_to(&mut self, target: usize, row_count: usize) {
        self.current_page = target.clamp(1, self.total_pages(row_count));
    }

    pub fn clamp(&mut self, row_count: usize) {
        self.jump_to(self.current_page, row_count);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Index of the first row on this page within the filtered sequence.
    pub start_index: usize,
    /// One past the last row on this page.
    pub end_index: usize,
    pub total_rows: usize,
}
