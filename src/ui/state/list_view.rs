use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::domain::entities::query::{DateRange, ListQuery, Page, PageState, SortOption};
use crate::domain::entities::row::{ListRow, RowUpdate};
use crate::usecase::pipeline::adapter::Adapted;
use crate::usecase::pipeline::filter::filter_rows;
use crate::usecase::pipeline::pager::paginate;
use crate::usecase::pipeline::sort::sort_rows;
use crate::usecase::ports::backend::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error(String),
}

/// Sequence number of a primary fetch. Only the most recent ticket may
/// write rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub expires_at: Instant,
}

/// State of one table screen: the loaded rows, every user-controlled
/// filter input, paging, selection and modal flags. The visible page is
/// recomputed synchronously whenever an input changes.
#[derive(Debug, Clone)]
pub struct ListViewController<R: ListRow> {
    rows: Vec<R>,
    arranged: Vec<R>,
    query: ListQuery,
    sort: SortOption,
    page: PageState,
    load_state: LoadState,
    warnings: Vec<String>,
    latest_ticket: u64,
    selected: Option<String>,
    pending_delete: Option<String>,
    export_open: bool,
    banner: Option<Banner>,
    banner_ttl: Duration,
}

impl<R: ListRow> ListViewController<R> {
    pub fn new(page_size: NonZeroUsize, sort: SortOption, banner_ttl: Duration) -> Self {
        Self {
            rows: Vec::new(),
            arranged: Vec::new(),
            query: ListQuery::default(),
            sort,
            page: PageState::new(page_size),
            load_state: LoadState::Loading,
            warnings: Vec::new(),
            latest_ticket: 0,
            selected: None,
            pending_delete: None,
            export_open: false,
            banner: None,
            banner_ttl,
        }
    }

    fn recompute(&mut self) {
        let filtered = filter_rows(&self.rows, &self.query);
        self.arranged = sort_rows(filtered, self.sort);
        self.page.clamp(self.arranged.len());
    }

    fn refilter(&mut self) {
        self.page.reset();
        self.recompute();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Filtered and sorted rows across all pages.
    pub fn arranged(&self) -> &[R] {
        &self.arranged
    }

    pub fn visible(&self) -> Page<R> {
        paginate(&self.arranged, &self.page)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    // --- fetch lifecycle ---

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        self.load_state = LoadState::Loading;
        tracing::debug!(ticket = self.latest_ticket, "fetch started");
        FetchTicket(self.latest_ticket)
    }

    /// Applies a fetch result. Returns `false` when the ticket was
    /// superseded by a later `begin_fetch` and the result was dropped.
    /// A failed refetch keeps whatever rows were already on screen.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Adapted<R>, BackendError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale fetch"
            );
            return false;
        }

        match result {
            Ok(adapted) => {
                tracing::info!(
                    rows = adapted.rows.len(),
                    warnings = adapted.warnings.len(),
                    "rows loaded"
                );
                self.rows = adapted.rows;
                self.warnings = adapted.warnings;
                self.load_state = LoadState::Ready;
                self.refilter();
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                self.load_state = LoadState::Error(err.to_string());
            }
        }
        true
    }

    // --- filter inputs ---

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.refilter();
    }

    pub fn toggle_facet(&mut self, group: &str, value: &str) {
        self.query.toggle_facet(group, value);
        self.refilter();
    }

    pub fn clear_facet(&mut self, group: &str) {
        self.query.clear_facet(group);
        self.refilter();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.query.date_range = range;
        self.refilter();
    }

    pub fn set_assoc(&mut self, assoc_id: Option<String>) {
        self.query.assoc_id = assoc_id;
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.query = ListQuery::default();
        self.refilter();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.refilter();
    }

    // --- paging ---

    pub fn next_page(&mut self) {
        self.page.next(self.arranged.len());
    }

    pub fn previous_page(&mut self) {
        self.page.previous();
    }

    pub fn jump_to_page(&mut self, target: usize) {
        self.page.jump_to(target, self.arranged.len());
    }

    // --- selection and modals ---

    pub fn select(&mut self, id: &str) {
        if self.rows.iter().any(|row| row.id() == id) {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_row(&self) -> Option<&R> {
        let id = self.selected.as_deref()?;
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn request_delete(&mut self, id: &str) {
        if self.rows.iter().any(|row| row.id() == id) {
            self.pending_delete = Some(id.to_string());
            self.export_open = false;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<&R> {
        let id = self.pending_delete.as_deref()?;
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn open_export(&mut self) {
        self.export_open = true;
        self.pending_delete = None;
    }

    pub fn close_export(&mut self) {
        self.export_open = false;
    }

    pub fn export_open(&self) -> bool {
        self.export_open
    }

    // --- row actions ---

    /// Applies the outcome of a confirmed row action. On failure the rows
    /// are left untouched and an error banner is raised.
    pub fn apply_action(
        &mut self,
        id: &str,
        result: Result<RowUpdate<R>, BackendError>,
        success_message: &str,
        now: Instant,
    ) -> bool {
        self.pending_delete = None;
        match result {
            Ok(update) => {
                match update {
                    RowUpdate::Replace(updated) => {
                        if let Some(slot) = self.rows.iter_mut().find(|row| row.id() == id) {
                            *slot = updated;
                        }
                    }
                    RowUpdate::Remove => {
                        self.rows.retain(|row| row.id() != id);
                        if self.selected.as_deref() == Some(id) {
                            self.selected = None;
                        }
                    }
                }
                self.recompute();
                self.show_banner(BannerKind::Success, success_message, now);
                true
            }
            Err(err) => {
                tracing::warn!(row_id = id, error = %err, "row action failed");
                self.show_banner(BannerKind::Error, &err.to_string(), now);
                false
            }
        }
    }

    // --- banner ---

    pub fn show_banner(&mut self, kind: BannerKind, message: &str, now: Instant) {
        self.banner = Some(Banner {
            kind,
            message: message.to_string(),
            expires_at: now + self.banner_ttl,
        });
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn banner_ttl(&self) -> Duration {
        self.banner_ttl
    }

    pub fn expire_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|banner| now >= banner.expires_at) {
            self.banner = None;
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }
}
