use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use assert_matches::assert_matches;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;

use crate::config::{AppConfig, ConfigError};
use crate::domain::calendar::{month_grid, month_title, shift_month, GRID_CELLS};
use crate::domain::entities::form::{validate_event_draft, EventDraft, TicketTierDraft};
use crate::domain::entities::query::{
    pick_range_end, pick_range_start, DateRange, ListQuery, PageState, SortOption,
};
use crate::domain::entities::record::{
    EventPayload, RawAttendee, RawEvent, RawOrder, RawTicketTier,
};
use crate::domain::entities::row::{
    EventRow, EventStatus, ListRow, OrderRow, OrderStatus, RowUpdate, FACET_CATEGORY,
    FACET_STATUS,
};
use crate::domain::entities::session::SessionContext;
use crate::domain::entities::settings::{Permission, RoleBook, RoleError};
use crate::domain::summary::{category_sales, summarize};
use crate::infra::export::csv::export_rows_to_csv;
use crate::infra::rest::client::{endpoint, error_message};
use crate::ui::components::{dropdown_label, facet_summary, DropdownOption};
use crate::ui::state::list_view::{BannerKind, ListViewController, LoadState};
use crate::ui::state::overlay::{OverlayId, OverlayState};
use crate::ui::views::attendees::{assoc_from_option, event_options};
use crate::ui::views::orders::order_status_options;
use crate::ui::views::overview::next_events;
use crate::usecase::pipeline::adapter::{
    adapt_attendee_batches, adapt_event, adapt_order, derive_event_status, AdaptContext, Adapted,
    PLACEHOLDER_BANNER, PLACEHOLDER_PHOTO, UNKNOWN_EVENT, UNNAMED_GUEST, UNTITLED_EVENT,
};
use crate::usecase::pipeline::filter::filter_rows;
use crate::usecase::pipeline::pager::paginate;
use crate::usecase::pipeline::sort::sort_rows;
use crate::usecase::ports::backend::{BackendError, OrganizerBackend};
use crate::usecase::services::action_service::ActionService;
use crate::usecase::services::edit_service::{EditService, SubmitError, SubmitMode};
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::query_service::QueryService;
use crate::{ALL_OPTION_VALUE, ORDERS_PAGE_SIZE};

const BANNER_TTL: Duration = Duration::from_millis(2500);

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("dashboard-{prefix}-{nanos}"))
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar day")
}

fn at(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    day(year, month, d)
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_utc()
}

fn long_ago() -> DateTime<Utc> {
    at(2020, 1, 1)
}

fn raw_event(
    id: &str,
    title: &str,
    category: &str,
    status: Option<&str>,
    start_at: Option<DateTime<Utc>>,
) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        title: Some(title.to_string()),
        category: Some(category.to_string()),
        status: status.map(str::to_string),
        start_at,
        end_at: start_at.map(|start| start + chrono::Duration::hours(3)),
        venue: Some("Main Hall".to_string()),
        banner_url: None,
        description: None,
        ticket_tiers: Vec::new(),
    }
}

fn event(id: &str, title: &str, category: &str, status: Option<&str>, start: DateTime<Utc>) -> EventRow {
    adapt_event(&raw_event(id, title, category, status, Some(start)), long_ago())
}

fn raw_order(id: &str, event_id: &str, buyer: &str, status: &str, total: f64) -> RawOrder {
    RawOrder {
        id: id.to_string(),
        event_id: Some(event_id.to_string()),
        buyer_name: Some(buyer.to_string()),
        buyer_email: Some(format!("{}@example.com", buyer.to_lowercase())),
        ticket_type: Some("General".to_string()),
        quantity: Some(1),
        total: Some(total),
        status: Some(status.to_string()),
        created_at: Some(at(2026, 3, 1)),
    }
}

fn order(id: &str, event_id: &str, buyer: &str, status: &str, total: f64) -> OrderRow {
    let names = HashMap::from([
        ("evt-1".to_string(), "Jazz Night".to_string()),
        ("evt-2".to_string(), "Rust Workshop".to_string()),
    ]);
    let ctx = AdaptContext {
        organizer_id: "org-1",
        now: long_ago(),
        event_name_by_id: &names,
    };
    adapt_order(&raw_order(id, event_id, buyer, status, total), &ctx)
}

fn ids<R: ListRow>(rows: &[R]) -> Vec<String> {
    rows.iter().map(|row| row.id().to_string()).collect()
}

fn ready_controller<R: ListRow>(
    page_size: usize,
    sort: SortOption,
    rows: Vec<R>,
) -> ListViewController<R> {
    let mut controller = ListViewController::new(
        NonZeroUsize::new(page_size).expect("page size should be positive"),
        sort,
        BANNER_TTL,
    );
    let ticket = controller.begin_fetch();
    assert!(controller.finish_fetch(ticket, Ok(Adapted::complete(rows))));
    controller
}

/// In-memory backend. Operations named in `failing` are rejected with an
/// API error; every call is recorded in order.
#[derive(Default)]
struct FakeBackend {
    events: Vec<RawEvent>,
    attendees: HashMap<String, Vec<RawAttendee>>,
    orders: Vec<RawOrder>,
    failing: HashSet<&'static str>,
    failing_attendees_for: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn record(&self, op: &'static str) -> Result<(), BackendError> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .push(op.to_string());
        if self.failing.contains(op) {
            Err(BackendError::Api {
                status: 500,
                message: format!("{op} rejected"),
            })
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .clone()
    }
}

impl OrganizerBackend for FakeBackend {
    fn get_events(&self, _organizer_id: &str) -> Result<Vec<RawEvent>, BackendError> {
        self.record("get_events")?;
        Ok(self.events.clone())
    }

    fn get_attendees_by_event(&self, event_id: &str) -> Result<Vec<RawAttendee>, BackendError> {
        self.record("get_attendees_by_event")?;
        if self.failing_attendees_for.contains(event_id) {
            return Err(BackendError::Transport("connection reset".to_string()));
        }
        Ok(self.attendees.get(event_id).cloned().unwrap_or_default())
    }

    fn check_in_attendee(&self, _ticket_id: &str, _event_id: &str) -> Result<(), BackendError> {
        self.record("check_in_attendee")
    }

    fn get_orders(&self) -> Result<Vec<RawOrder>, BackendError> {
        self.record("get_orders")?;
        Ok(self.orders.clone())
    }

    fn create_event(&self, payload: &EventPayload) -> Result<RawEvent, BackendError> {
        self.record("create_event")?;
        Ok(RawEvent {
            id: "evt-new".to_string(),
            title: Some(payload.title.clone()),
            category: Some(payload.category.clone()),
            status: Some("draft".to_string()),
            start_at: Some(payload.start_at),
            end_at: Some(payload.end_at),
            venue: Some(payload.venue.clone()),
            banner_url: payload.banner_url.clone(),
            description: Some(payload.description.clone()),
            ticket_tiers: payload
                .ticket_tiers
                .iter()
                .map(|tier| RawTicketTier {
                    name: tier.name.clone(),
                    price: tier.price,
                    capacity: tier.capacity,
                    sold: None,
                })
                .collect(),
        })
    }

    fn update_event(&self, _id: &str, _payload: &EventPayload) -> Result<(), BackendError> {
        self.record("update_event")
    }

    fn publish_event(&self, _id: &str) -> Result<(), BackendError> {
        self.record("publish_event")
    }

    fn delete_event(&self, _id: &str) -> Result<(), BackendError> {
        self.record("delete_event")
    }

    fn refund_order(&self, _id: &str) -> Result<(), BackendError> {
        self.record("refund_order")
    }

    fn cancel_order(&self, _id: &str) -> Result<(), BackendError> {
        self.record("cancel_order")
    }

    fn delete_order(&self, _id: &str) -> Result<(), BackendError> {
        self.record("delete_order")
    }
}

fn valid_draft() -> EventDraft {
    EventDraft {
        title: "Launch Party".to_string(),
        description: "Doors at eight".to_string(),
        category: "Concert".to_string(),
        venue: "Hall A".to_string(),
        banner_url: String::new(),
        start_date: "2026-05-01".to_string(),
        start_time: "09:00".to_string(),
        end_date: "2026-05-01".to_string(),
        end_time: "17:00".to_string(),
        tiers: vec![TicketTierDraft {
            name: "General".to_string(),
            price: "25".to_string(),
            capacity: "100".to_string(),
        }],
    }
}

fn mixed_events() -> Vec<EventRow> {
    vec![
        event("e1", "Jazz Night", "Concert", Some("draft"), at(2026, 1, 5)),
        event("e2", "Rust Workshop", "Workshop", None, at(2026, 1, 6)),
        event("e3", "Rock Fest", "Concert", None, at(2026, 1, 7)),
        event("e4", "Pottery", "Workshop", Some("draft"), at(2026, 1, 8)),
        event("e5", "Blues Evening", "Concert", Some("draft"), at(2026, 1, 9)),
    ]
}

// --- filter ---

#[test]
fn facet_groups_combine_as_intersection() {
    let rows = mixed_events();
    let mut status_only = ListQuery::default();
    status_only.toggle_facet(FACET_STATUS, "draft");
    let mut category_only = ListQuery::default();
    category_only.toggle_facet(FACET_CATEGORY, "Concert");
    let mut both = status_only.clone();
    both.toggle_facet(FACET_CATEGORY, "Concert");

    let by_status = ids(&filter_rows(&rows, &status_only));
    let by_category = ids(&filter_rows(&rows, &category_only));
    let combined = ids(&filter_rows(&rows, &both));
    let intersection = by_status
        .iter()
        .filter(|id| by_category.contains(id))
        .cloned()
        .collect::<Vec<_>>();

    assert_eq!(combined, intersection, "AND across groups");
    assert_eq!(combined, vec!["e1", "e5"]);
}

#[test]
fn values_within_one_facet_group_are_alternatives() {
    let rows = mixed_events();
    let mut query = ListQuery::default();
    query.toggle_facet(FACET_STATUS, "draft");
    query.toggle_facet(FACET_STATUS, "upcoming");

    assert_eq!(filter_rows(&rows, &query).len(), rows.len());
}

#[test]
fn toggling_a_facet_twice_removes_the_group() {
    let mut query = ListQuery::default();
    query.toggle_facet(FACET_STATUS, "draft");
    query.toggle_facet(FACET_STATUS, "draft");

    assert!(query.is_empty(), "empty group should impose no constraint");
    assert!(query.selected(FACET_STATUS).is_empty());
}

#[test]
fn empty_query_returns_rows_in_input_order() {
    let rows = mixed_events();

    let filtered = filter_rows(&rows, &ListQuery::default());

    assert_eq!(filtered, rows);
}

#[test]
fn text_search_is_case_insensitive_and_trimmed() {
    let rows = mixed_events();
    let query = ListQuery {
        text: "  JAZZ ".to_string(),
        ..ListQuery::default()
    };

    assert_eq!(ids(&filter_rows(&rows, &query)), vec!["e1"]);
}

#[test]
fn date_range_is_inclusive_and_skips_undated_rows() {
    let mut rows = mixed_events();
    rows.push(adapt_event(
        &raw_event("e6", "Someday", "Meetup", None, None),
        long_ago(),
    ));

    let single = ListQuery {
        date_range: Some(DateRange::single_day(day(2026, 1, 6))),
        ..ListQuery::default()
    };
    let span = ListQuery {
        date_range: Some(DateRange::new(day(2026, 1, 8), Some(day(2026, 1, 6)))),
        ..ListQuery::default()
    };

    assert_eq!(ids(&filter_rows(&rows, &single)), vec!["e2"]);
    assert_eq!(ids(&filter_rows(&rows, &span)), vec!["e2", "e3", "e4"]);
}

#[test]
fn association_filter_matches_event_id_exactly() {
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-2", "Ben", "completed", 20.0),
        order("o3", "evt-1", "Cid", "pending", 30.0),
    ];
    let query = ListQuery {
        assoc_id: Some("evt-1".to_string()),
        ..ListQuery::default()
    };

    assert_eq!(ids(&filter_rows(&rows, &query)), vec!["o1", "o3"]);
}

#[test]
fn range_pickers_build_and_clear_ranges() {
    let start = pick_range_start(None, Some(day(2026, 2, 10)));
    assert_eq!(start, Some(DateRange::single_day(day(2026, 2, 10))));

    let widened = pick_range_end(start, Some(day(2026, 2, 1)));
    assert_eq!(
        widened.map(|range| (range.start(), range.end())),
        Some((day(2026, 2, 1), day(2026, 2, 10))),
        "reversed ends should be normalized"
    );

    assert_eq!(
        pick_range_end(widened, None),
        Some(DateRange::single_day(day(2026, 2, 1)))
    );
    assert_eq!(pick_range_start(widened, None), None);
}

// --- sort ---

#[test]
fn newest_then_oldest_reverses_distinct_timestamps() {
    let original = vec![
        event("a", "A", "Concert", None, at(2026, 3, 3)),
        event("b", "B", "Concert", None, at(2026, 3, 2)),
        event("c", "C", "Concert", None, at(2026, 3, 1)),
    ];

    let newest = sort_rows(original.clone(), SortOption::NewestFirst);
    let oldest = sort_rows(newest.clone(), SortOption::OldestFirst);

    assert_eq!(ids(&newest), ids(&original));
    let mut reversed = ids(&original);
    reversed.reverse();
    assert_eq!(ids(&oldest), reversed);
}

#[test]
fn ties_keep_input_order_in_every_direction() {
    let same = at(2026, 4, 1);
    let rows = vec![
        event("x", "Same", "Concert", None, same),
        event("y", "same", "Concert", None, same),
        event("z", "SAME", "Concert", None, same),
    ];

    for option in [
        SortOption::NewestFirst,
        SortOption::OldestFirst,
        SortOption::NameAsc,
    ] {
        assert_eq!(
            ids(&sort_rows(rows.clone(), option)),
            vec!["x", "y", "z"],
            "{option:?} should be stable"
        );
    }
}

#[test]
fn name_sort_ignores_case() {
    let rows = vec![
        event("1", "banana", "Concert", None, at(2026, 1, 1)),
        event("2", "Apple", "Concert", None, at(2026, 1, 2)),
        event("3", "cherry", "Concert", None, at(2026, 1, 3)),
    ];

    assert_eq!(ids(&sort_rows(rows, SortOption::NameAsc)), vec!["2", "1", "3"]);
}

#[test]
fn unknown_sort_label_keeps_natural_order() {
    let rows = mixed_events();
    let option = SortOption::from_label("Most popular");

    assert_eq!(option, SortOption::Unsorted);
    assert_eq!(sort_rows(rows.clone(), option), rows);
    assert_eq!(SortOption::from_label("a-z"), SortOption::NameAsc);
}

#[test]
fn undated_rows_sort_last() {
    let rows = vec![
        adapt_event(&raw_event("u", "Undated", "Meetup", None, None), long_ago()),
        event("d", "Dated", "Meetup", None, at(2026, 1, 1)),
    ];

    assert_eq!(ids(&sort_rows(rows.clone(), SortOption::NewestFirst)), vec!["d", "u"]);
    assert_eq!(ids(&sort_rows(rows, SortOption::OldestFirst)), vec!["d", "u"]);
}

// --- pager ---

#[test]
fn pages_cover_every_row_exactly_once() {
    let rows = (0..23).collect::<Vec<u32>>();
    for size in [1_usize, 6, 9, 23, 40] {
        let mut state = PageState::with_size(size).expect("positive size");
        let total_pages = state.total_pages(rows.len());
        let mut seen = Vec::new();
        for page in 1..=total_pages {
            state.jump_to(page, rows.len());
            seen.extend(paginate(&rows, &state).rows);
        }
        assert_eq!(seen, rows, "page size {size} should cover all rows");
    }
}

#[test]
fn empty_input_has_one_empty_page() {
    let state = PageState::with_size(9).expect("positive size");
    let page = paginate::<u32>(&[], &state);

    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
    assert!(page.rows.is_empty());
    assert_eq!((page.start_index, page.end_index), (0, 0));
}

#[test]
fn zero_page_size_is_rejected() {
    assert!(PageState::with_size(0).is_none());
}

#[test]
fn navigation_stops_at_the_boundaries() {
    let rows = 20;
    let mut state = PageState::with_size(9).expect("positive size");

    state.previous();
    assert_eq!(state.current_page(), 1, "previous on first page is a no-op");

    state.jump_to(3, rows);
    state.next(rows);
    assert_eq!(state.current_page(), 3, "next on last page is a no-op");

    state.jump_to(99, rows);
    assert_eq!(state.current_page(), 3);
    state.jump_to(0, rows);
    assert_eq!(state.current_page(), 1);
}

// --- list view controller ---

#[test]
fn changing_any_filter_input_resets_to_first_page() {
    let rows = (0..30)
        .map(|idx| {
            event(
                &format!("e{idx}"),
                &format!("Show {idx}"),
                "Concert",
                None,
                at(2026, 1, 1) + chrono::Duration::hours(idx),
            )
        })
        .collect::<Vec<_>>();
    let mut controller = ready_controller(9, SortOption::NewestFirst, rows);

    controller.jump_to_page(3);
    assert_eq!(controller.current_page(), 3);
    controller.toggle_facet(FACET_CATEGORY, "Concert");
    assert_eq!(controller.visible().total_pages, 4, "filter still matches all rows");
    assert_eq!(controller.current_page(), 1);

    controller.jump_to_page(3);
    controller.set_search_text("show");
    assert_eq!(controller.current_page(), 1);

    controller.jump_to_page(3);
    controller.set_sort(SortOption::NameAsc);
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn ten_rows_over_three_months_page_then_collapse_on_filter() {
    let dates = [
        at(2026, 1, 3),
        at(2026, 1, 17),
        at(2026, 1, 28),
        at(2026, 2, 2),
        at(2026, 2, 11),
        at(2026, 2, 20),
        at(2026, 3, 1),
        at(2026, 3, 9),
        at(2026, 3, 15),
        at(2026, 3, 30),
    ];
    let rows = dates
        .iter()
        .enumerate()
        .map(|(idx, start)| {
            let status = (idx == 2 || idx == 7).then_some("draft");
            event(&format!("e{idx}"), &format!("Event {idx}"), "Concert", status, *start)
        })
        .collect::<Vec<_>>();
    let mut controller = ready_controller(9, SortOption::NewestFirst, rows);

    let first = controller.visible();
    assert_eq!(first.rows.len(), 9);
    assert_eq!(first.total_pages, 2);
    let first_dates = first
        .rows
        .iter()
        .filter_map(|row| row.start_at)
        .collect::<Vec<_>>();
    assert!(first_dates.windows(2).all(|pair| pair[0] >= pair[1]), "newest first");
    assert_eq!(first.rows[0].id, "e9");

    controller.next_page();
    let second = controller.visible();
    assert_eq!(ids(&second.rows), vec!["e0"]);

    controller.toggle_facet(FACET_STATUS, "draft");
    let filtered = controller.visible();
    assert_eq!(filtered.total_pages, 1);
    assert_eq!(filtered.current_page, 1);
    assert_eq!(ids(&filtered.rows), vec!["e7", "e2"]);
}

#[test]
fn rejected_delete_keeps_rows_and_banner_expires() {
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-2", "Ben", "completed", 20.0),
    ];
    let backend = Arc::new(FakeBackend {
        failing: HashSet::from(["delete_order"]),
        ..FakeBackend::default()
    });
    let actions = ActionService::new(backend.clone());
    let mut controller = ready_controller(ORDERS_PAGE_SIZE.get(), SortOption::NewestFirst, rows.clone());

    controller.request_delete("o1");
    let result = actions.delete_order(&rows[0]);
    let now = Instant::now();
    let applied = controller.apply_action("o1", result, "Order o1 deleted", now);

    assert!(!applied);
    assert_eq!(controller.rows(), rows.as_slice(), "rows must be unchanged");
    assert!(controller.pending_delete().is_none());
    let banner = controller.banner().cloned().expect("error banner should show");
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.message, "delete_order rejected");

    controller.expire_banner(now + BANNER_TTL - Duration::from_millis(1));
    assert!(controller.banner().is_some(), "banner stays until its time is up");
    controller.expire_banner(now + BANNER_TTL);
    assert!(controller.banner().is_none());
    assert_eq!(backend.calls(), vec!["delete_order"]);
}

#[test]
fn successful_actions_replace_or_remove_rows() {
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-2", "Ben", "completed", 20.0),
    ];
    let backend = Arc::new(FakeBackend::default());
    let actions = ActionService::new(backend.clone());
    let mut controller = ready_controller(6, SortOption::Unsorted, rows.clone());
    controller.select("o2");

    let refund = actions.refund_order(&rows[0]);
    assert!(controller.apply_action("o1", refund, "refunded", Instant::now()));
    assert_eq!(controller.rows()[0].status, OrderStatus::Refunded);
    assert_matches!(controller.banner(), Some(banner) if banner.kind == BannerKind::Success);

    let delete = actions.delete_order(&rows[1]);
    assert!(controller.apply_action("o2", delete, "deleted", Instant::now()));
    assert_eq!(ids(controller.rows()), vec!["o1"]);
    assert!(controller.selected_row().is_none(), "removed row cannot stay selected");
    assert_eq!(backend.calls(), vec!["refund_order", "delete_order"]);
}

#[test]
fn order_detail_follows_selection_and_row_updates() {
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-2", "Ben", "completed", 20.0),
    ];
    let backend = Arc::new(FakeBackend::default());
    let actions = ActionService::new(backend);
    let mut controller = ready_controller(ORDERS_PAGE_SIZE.get(), SortOption::Unsorted, rows.clone());

    controller.select("missing");
    assert!(controller.selected_row().is_none(), "unknown ids should not open a detail");

    controller.select("o2");
    let detail = controller.selected_row().expect("selected order should have a detail");
    assert_eq!(detail.buyer_name, "Ben");
    assert_eq!(detail.event_name, "Rust Workshop");

    let refund = actions.refund_order(&rows[1]);
    assert!(controller.apply_action("o2", refund, "refunded", Instant::now()));
    assert_matches!(controller.selected_row(), Some(row) if row.status == OrderStatus::Refunded);

    controller.clear_selection();
    assert!(controller.selected_row().is_none());
}

#[test]
fn removing_the_only_row_on_the_last_page_clamps_back() {
    let rows = (1..=7)
        .map(|idx| order(&format!("o{idx}"), "evt-1", "Ana", "completed", 10.0))
        .collect::<Vec<_>>();
    let mut controller = ready_controller(ORDERS_PAGE_SIZE.get(), SortOption::Unsorted, rows);
    controller.jump_to_page(2);
    assert_eq!(ids(&controller.visible().rows), vec!["o7"]);

    let removed = controller.apply_action(
        "o7",
        Ok(RowUpdate::Remove),
        "Order o7 deleted",
        Instant::now(),
    );

    assert!(removed);
    let page = controller.visible();
    assert_eq!(controller.current_page(), 1, "page should clamp to the new last page");
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.rows.len(), 6, "visible page must not be empty");
}

#[test]
fn failed_refetch_keeps_previous_rows_visible() {
    let mut controller = ready_controller(9, SortOption::NewestFirst, mixed_events());

    let ticket = controller.begin_fetch();
    assert!(controller.is_loading());
    controller.finish_fetch(ticket, Err(BackendError::Transport("timed out".to_string())));

    assert_matches!(controller.load_state(), LoadState::Error(message) if message.contains("timed out"));
    assert_eq!(controller.rows().len(), 5);
}

#[test]
fn stale_fetch_results_are_discarded() {
    let mut controller = ListViewController::<EventRow>::new(
        NonZeroUsize::new(9).expect("positive"),
        SortOption::NewestFirst,
        BANNER_TTL,
    );
    let superseded = controller.begin_fetch();
    let latest = controller.begin_fetch();

    let stale_rows = vec![event("old", "Old Org", "Concert", None, at(2026, 1, 1))];
    assert!(!controller.finish_fetch(superseded, Ok(Adapted::complete(stale_rows))));
    assert!(controller.rows().is_empty());
    assert!(controller.is_loading());

    assert!(controller.finish_fetch(latest, Ok(Adapted::complete(mixed_events()))));
    assert_eq!(controller.load_state(), &LoadState::Ready);
    assert_eq!(controller.rows().len(), 5);
}

#[test]
fn delete_confirm_and_export_modal_exclude_each_other() {
    let mut controller = ready_controller(9, SortOption::NewestFirst, mixed_events());
    controller.select("e3");

    controller.request_delete("e1");
    assert_eq!(controller.pending_delete().map(|row| row.id.as_str()), Some("e1"));

    controller.open_export();
    assert!(controller.export_open());
    assert!(controller.pending_delete().is_none());

    controller.request_delete("e2");
    assert!(!controller.export_open());
    assert_eq!(
        controller.selected_row().map(|row| row.id.as_str()),
        Some("e3"),
        "detail selection is independent of modals"
    );

    controller.request_delete("missing");
    assert_eq!(controller.pending_delete().map(|row| row.id.as_str()), Some("e2"));
}

#[test]
fn clear_filters_restores_all_rows() {
    let mut controller = ready_controller(9, SortOption::Unsorted, mixed_events());
    controller.set_search_text("jazz");
    controller.set_assoc(Some("nothing".to_string()));
    assert!(controller.arranged().is_empty());

    controller.clear_filters();
    assert_eq!(controller.arranged().len(), 5);
    assert!(controller.query().is_empty());
}

// --- adapter ---

#[test]
fn event_status_follows_schedule_unless_draft_or_cancelled() {
    let start = at(2026, 6, 1);
    let end = start + chrono::Duration::hours(4);

    assert_eq!(
        derive_event_status(None, Some(start), Some(end), at(2026, 5, 1)),
        EventStatus::Upcoming
    );
    assert_eq!(
        derive_event_status(None, Some(start), Some(end), start + chrono::Duration::hours(1)),
        EventStatus::Ongoing
    );
    assert_eq!(
        derive_event_status(Some("published"), Some(start), Some(end), at(2026, 7, 1)),
        EventStatus::Completed
    );
    assert_eq!(
        derive_event_status(Some("Draft"), Some(start), Some(end), at(2026, 7, 1)),
        EventStatus::Draft
    );
    assert_eq!(
        derive_event_status(Some("cancelled"), Some(start), Some(end), at(2026, 5, 1)),
        EventStatus::Cancelled
    );
    assert_eq!(
        derive_event_status(None, None, None, at(2026, 5, 1)),
        EventStatus::Upcoming
    );
}

#[test]
fn missing_event_fields_fall_back_to_placeholders() {
    let raw = RawEvent {
        id: "e1".to_string(),
        title: Some("   ".to_string()),
        category: None,
        status: None,
        start_at: None,
        end_at: None,
        venue: None,
        banner_url: None,
        description: None,
        ticket_tiers: vec![RawTicketTier {
            name: "VIP".to_string(),
            price: 80.0,
            capacity: 10,
            sold: None,
        }],
    };

    let row = adapt_event(&raw, long_ago());

    assert_eq!(row.title, UNTITLED_EVENT);
    assert_eq!(row.banner_url, PLACEHOLDER_BANNER);
    assert_eq!(row.tickets_sold(), 0);
    assert_eq!(row.capacity(), 10);
}

#[test]
fn attendee_placeholders_and_partial_batch_failure() {
    let names = HashMap::from([
        ("evt-1".to_string(), "Jazz Night".to_string()),
        ("evt-2".to_string(), "Rust Workshop".to_string()),
    ]);
    let ctx = AdaptContext {
        organizer_id: "org-1",
        now: long_ago(),
        event_name_by_id: &names,
    };
    let attendee = RawAttendee {
        ticket_id: "t-1".to_string(),
        event_id: None,
        name: None,
        email: Some("kim@example.com".to_string()),
        photo_url: None,
        ticket_type: None,
        checked_in: None,
        purchased_at: None,
    };

    let adapted = adapt_attendee_batches(
        vec![
            ("evt-1".to_string(), Ok(vec![attendee])),
            (
                "evt-2".to_string(),
                Err(BackendError::Transport("reset".to_string())),
            ),
        ],
        &ctx,
    );

    assert_eq!(adapted.rows.len(), 1);
    let row = &adapted.rows[0];
    assert_eq!(row.photo_url, PLACEHOLDER_PHOTO);
    assert_eq!(row.name, UNNAMED_GUEST);
    assert_eq!(row.event_id, "evt-1");
    assert_eq!(row.event_name, "Jazz Night");
    assert!(!row.checked_in);
    assert_eq!(adapted.warnings.len(), 1);
    assert!(adapted.warnings[0].contains("Rust Workshop"));
}

#[test]
fn order_status_parsing_accepts_aliases() {
    assert_eq!(OrderStatus::parse(" PAID "), OrderStatus::Completed);
    assert_eq!(OrderStatus::parse("canceled"), OrderStatus::Cancelled);
    let other = OrderStatus::parse("Chargeback");
    assert_eq!(other.as_str(), "chargeback");
    assert!(!other.is_settleable());
}

#[test]
fn raw_event_reads_camel_case_json() {
    let json = r#"{
        "id": "e1",
        "title": "Gala",
        "startAt": "2026-05-01T18:00:00Z",
        "ticketTiers": [{ "name": "VIP", "price": 50.0, "capacity": 20, "sold": 5 }]
    }"#;

    let raw: RawEvent = serde_json::from_str(json).expect("event json should parse");

    assert_eq!(raw.start_at, Some(at(2026, 5, 1) + chrono::Duration::hours(6)));
    assert_eq!(raw.ticket_tiers[0].sold, Some(5));
    assert!(raw.venue.is_none());
}

// --- services ---

#[test]
fn attendees_load_survives_one_failing_event() {
    let backend = Arc::new(FakeBackend {
        events: vec![
            raw_event("evt-1", "Jazz Night", "Concert", None, Some(at(2026, 5, 1))),
            raw_event("evt-2", "Rust Workshop", "Workshop", None, Some(at(2026, 5, 2))),
        ],
        attendees: HashMap::from([(
            "evt-1".to_string(),
            vec![RawAttendee {
                ticket_id: "t-1".to_string(),
                event_id: Some("evt-1".to_string()),
                name: Some("Kim".to_string()),
                email: None,
                photo_url: None,
                ticket_type: Some("VIP".to_string()),
                checked_in: Some(true),
                purchased_at: Some(at(2026, 4, 1)),
            }],
        )]),
        failing_attendees_for: HashSet::from(["evt-2".to_string()]),
        ..FakeBackend::default()
    });
    let service = QueryService::new(backend.clone());
    let session = SessionContext::new("org-1").expect("non-empty organizer");

    let adapted = service
        .load_attendees(&session, long_ago())
        .expect("event list loaded so attendees should load");

    assert_eq!(ids(&adapted.rows), vec!["t-1"]);
    assert_eq!(adapted.warnings.len(), 1);
    assert!(adapted.warnings[0].contains("Rust Workshop"));
    assert_eq!(
        backend.calls(),
        vec!["get_events", "get_attendees_by_event", "get_attendees_by_event"]
    );
}

#[test]
fn attendees_load_fails_when_event_list_fails() {
    let backend = Arc::new(FakeBackend {
        failing: HashSet::from(["get_events"]),
        ..FakeBackend::default()
    });
    let service = QueryService::new(backend);
    let session = SessionContext::new("org-1").expect("non-empty organizer");

    assert_matches!(
        service.load_attendees(&session, long_ago()),
        Err(BackendError::Api { status: 500, .. })
    );
}

#[test]
fn orders_load_without_event_names_when_events_fail() {
    let backend = Arc::new(FakeBackend {
        orders: vec![raw_order("o1", "evt-1", "Ana", "completed", 10.0)],
        failing: HashSet::from(["get_events"]),
        ..FakeBackend::default()
    });
    let service = QueryService::new(backend);
    let session = SessionContext::new("org-1").expect("non-empty organizer");

    let adapted = service
        .load_orders(&session, long_ago())
        .expect("orders should still load");

    assert_eq!(adapted.rows[0].event_name, UNKNOWN_EVENT);
    assert_eq!(adapted.warnings.len(), 1);
}

#[test]
fn check_in_refuses_attendees_already_inside() {
    let backend = Arc::new(FakeBackend::default());
    let actions = ActionService::new(backend.clone());
    let names = HashMap::new();
    let ctx = AdaptContext {
        organizer_id: "org-1",
        now: long_ago(),
        event_name_by_id: &names,
    };
    let raw = RawAttendee {
        ticket_id: "t-1".to_string(),
        event_id: Some("evt-1".to_string()),
        name: Some("Kim".to_string()),
        email: None,
        photo_url: None,
        ticket_type: None,
        checked_in: Some(false),
        purchased_at: None,
    };
    let mut row = adapt_attendee_batches(vec![("evt-1".to_string(), Ok(vec![raw]))], &ctx)
        .rows
        .remove(0);

    let update = actions.check_in(&row).expect("first check-in should succeed");
    assert_matches!(&update, RowUpdate::Replace(updated) if updated.checked_in);
    if let RowUpdate::Replace(updated) = update {
        row = updated;
    }

    assert_matches!(actions.check_in(&row), Err(BackendError::Message(_)));
    assert_eq!(backend.calls(), vec!["check_in_attendee"]);
}

#[test]
fn settled_orders_cannot_be_refunded_again() {
    let backend = Arc::new(FakeBackend::default());
    let actions = ActionService::new(backend.clone());
    let refunded = order("o1", "evt-1", "Ana", "refunded", 10.0);

    assert_matches!(actions.refund_order(&refunded), Err(BackendError::Message(_)));
    assert_matches!(actions.cancel_order(&refunded), Err(BackendError::Message(_)));
    assert!(backend.calls().is_empty(), "no backend call for a settled order");
}

#[test]
fn publishing_a_draft_rederives_its_status() {
    let backend = Arc::new(FakeBackend::default());
    let actions = ActionService::new(backend);
    let draft = event("e1", "Jazz Night", "Concert", Some("draft"), at(2026, 6, 1));

    let update = actions
        .publish_event(&draft, at(2026, 5, 1))
        .expect("publish should succeed");

    assert_matches!(update, RowUpdate::Replace(row) if row.status == EventStatus::Upcoming);
}

#[test]
fn invalid_form_never_reaches_the_backend() {
    let backend = Arc::new(FakeBackend::default());
    let edits = EditService::new(backend.clone());
    let draft = EventDraft {
        title: String::new(),
        ..valid_draft()
    };

    assert_matches!(
        edits.create_event(&draft, long_ago()),
        Err(SubmitError::Invalid(errors)) if errors.contains_key("title")
    );
    assert!(backend.calls().is_empty());
}

#[test]
fn create_and_publish_saves_then_publishes() {
    let backend = Arc::new(FakeBackend::default());
    let edits = EditService::new(backend.clone());

    let row = edits
        .create_and_publish(&valid_draft(), at(2026, 1, 1))
        .expect("valid draft should be created");

    assert_eq!(row.id, "evt-new");
    assert_eq!(row.status, EventStatus::Upcoming);
    assert_eq!(backend.calls(), vec!["create_event", "publish_event"]);
}

#[test]
fn publish_retry_after_failed_publish_reuses_created_draft() {
    let backend = Arc::new(FakeBackend {
        failing: HashSet::from(["publish_event"]),
        ..FakeBackend::default()
    });
    let edits = EditService::new(backend.clone());
    let draft = valid_draft();

    let created = match edits.submit(SubmitMode::Publish, None, &draft, at(2026, 1, 1)) {
        Err(SubmitError::PublishFailed { created, source }) => {
            assert_matches!(source, BackendError::Api { .. });
            created
        }
        other => panic!("expected the saved draft back with the publish error, got {other:?}"),
    };
    assert_eq!(created.id, "evt-new");
    assert_eq!(created.status, EventStatus::Draft);

    let retry = edits.submit(SubmitMode::Publish, Some(&created.id), &draft, at(2026, 1, 1));
    assert_matches!(retry, Err(SubmitError::Backend(BackendError::Api { .. })));

    let calls = backend.calls();
    assert_eq!(
        calls.iter().filter(|call| call.as_str() == "create_event").count(),
        1,
        "retrying must not create a second event"
    );
    assert_eq!(
        calls,
        vec!["create_event", "publish_event", "update_event", "publish_event"]
    );
}

#[test]
fn submit_updates_existing_events_without_creating() {
    let backend = Arc::new(FakeBackend::default());
    let edits = EditService::new(backend.clone());

    let saved = edits
        .submit(SubmitMode::Update, Some("evt-1"), &valid_draft(), at(2026, 1, 1))
        .expect("update should succeed");
    let created = edits
        .submit(SubmitMode::Draft, None, &valid_draft(), at(2026, 1, 1))
        .expect("draft should be created");

    assert!(saved.is_none());
    assert_matches!(created, Some(row) if row.status == EventStatus::Draft);
    assert_eq!(backend.calls(), vec!["update_event", "create_event"]);
}

// --- form validation ---

#[test]
fn valid_draft_builds_payload() {
    let payload = validate_event_draft(&valid_draft()).expect("draft should validate");

    assert_eq!(payload.start_at, at(2026, 5, 1) - chrono::Duration::hours(3));
    assert_eq!(payload.end_at, at(2026, 5, 1) + chrono::Duration::hours(5));
    assert_eq!(payload.ticket_tiers.len(), 1);
    assert_eq!(payload.banner_url, None);
}

#[test]
fn draft_errors_are_keyed_by_field() {
    let draft = EventDraft {
        venue: " ".to_string(),
        end_date: "2026-04-30".to_string(),
        tiers: vec![
            TicketTierDraft {
                name: "VIP".to_string(),
                price: "-1".to_string(),
                capacity: "0".to_string(),
            },
            TicketTierDraft {
                name: "vip".to_string(),
                price: "10".to_string(),
                capacity: "5".to_string(),
            },
        ],
        ..valid_draft()
    };

    let errors = validate_event_draft(&draft).expect_err("draft should be rejected");
    let keys = errors.keys().map(String::as_str).collect::<BTreeSet<_>>();

    assert_eq!(
        keys,
        BTreeSet::from([
            "end",
            "tiers[0].capacity",
            "tiers[0].price",
            "tiers[1].name",
            "venue",
        ])
    );
    assert_eq!(errors["end"], "End must be after start");
}

#[test]
fn draft_without_tiers_or_dates_is_rejected() {
    let draft = EventDraft {
        start_date: "01/05/2026".to_string(),
        end_date: String::new(),
        tiers: Vec::new(),
        ..valid_draft()
    };

    let errors = validate_event_draft(&draft).expect_err("draft should be rejected");

    assert!(errors.contains_key("start"));
    assert!(errors.contains_key("end"));
    assert!(errors.contains_key("tiers"));
}

#[test]
fn edit_form_round_trips_an_existing_event() {
    let mut raw = raw_event("e1", "Gala", "Concert", None, Some(at(2026, 5, 1)));
    raw.ticket_tiers = vec![RawTicketTier {
        name: "VIP".to_string(),
        price: 50.0,
        capacity: 20,
        sold: Some(3),
    }];
    let row = adapt_event(&raw, long_ago());

    let draft = EventDraft::from_row(&row);
    let payload = validate_event_draft(&draft).expect("existing event should validate");

    assert_eq!(draft.start_time, "12:00");
    assert_eq!(payload.start_at, at(2026, 5, 1));
    assert_eq!(payload.ticket_tiers[0].price, 50.0);
}

// --- calendar, summary, settings ---

#[test]
fn month_grid_starts_on_sunday_and_fills_six_weeks() {
    let cells = month_grid(2026, 10).expect("valid month");

    assert_eq!(cells.len(), GRID_CELLS);
    assert_eq!(cells[0].date, day(2026, 9, 27));
    assert!(!cells[0].in_month);
    assert_eq!(cells[4].date, day(2026, 10, 1));
    assert!(cells[4].in_month);
    assert!(month_grid(2026, 13).is_none());
}

#[test]
fn shifting_months_wraps_years() {
    assert_eq!(shift_month(2026, 12, 1), (2027, 1));
    assert_eq!(shift_month(2026, 1, -1), (2025, 12));
    assert_eq!(month_title(2026, 10), "October 2026");
}

#[test]
fn summary_uses_real_aggregates() {
    let mut first = raw_event("e1", "Jazz", "Concert", None, Some(at(2026, 6, 1)));
    first.ticket_tiers = vec![
        RawTicketTier {
            name: "General".to_string(),
            price: 10.0,
            capacity: 100,
            sold: Some(40),
        },
        RawTicketTier {
            name: "Comp".to_string(),
            price: 0.0,
            capacity: 0,
            sold: Some(0),
        },
    ];
    let mut second = raw_event("e2", "Rock", "Concert", Some("draft"), Some(at(2026, 7, 1)));
    second.ticket_tiers = vec![RawTicketTier {
        name: "General".to_string(),
        price: 20.0,
        capacity: 100,
        sold: Some(10),
    }];
    let events = vec![adapt_event(&first, long_ago()), adapt_event(&second, long_ago())];
    let orders = vec![
        order("o1", "evt-1", "Ana", "completed", 30.0),
        order("o2", "evt-1", "Ben", "refunded", 12.5),
        order("o3", "evt-1", "Cid", "pending", 99.0),
    ];

    let summary = summarize(&events, &orders);
    assert_eq!(summary.total_events, 2);
    assert_eq!(summary.upcoming_events, 1);
    assert_eq!(summary.tickets_sold, 50);
    assert_eq!(summary.revenue, 30.0);
    assert_eq!(summary.refunded, 12.5);

    let sales = category_sales(&events);
    let general = sales
        .iter()
        .find(|line| line.ticket_type == "General")
        .expect("general tier should be aggregated");
    assert_eq!((general.sold, general.capacity), (50, 200));
    assert_eq!(general.revenue, 600.0);
    assert_eq!(general.conversion, 25.0);
    let comp = sales
        .iter()
        .find(|line| line.ticket_type == "Comp")
        .expect("comp tier should be listed");
    assert_eq!(comp.conversion, 0.0);
}

#[test]
fn ticket_totals_saturate_on_huge_counts() {
    let mut raw = raw_event("big", "Stadium", "Sports", None, Some(at(2026, 8, 1)));
    raw.ticket_tiers = vec![
        RawTicketTier {
            name: "General".to_string(),
            price: 1.0,
            capacity: u32::MAX,
            sold: Some(u32::MAX),
        },
        RawTicketTier {
            name: "VIP".to_string(),
            price: 5.0,
            capacity: 10,
            sold: Some(10),
        },
    ];
    let row = adapt_event(&raw, long_ago());
    let events = vec![row.clone(), row.clone()];

    assert_eq!(row.tickets_sold(), u32::MAX);
    assert_eq!(row.capacity(), u32::MAX);
    assert_eq!(summarize(&events, &[]).tickets_sold, u32::MAX);

    let sales = category_sales(&events);
    let general = sales
        .iter()
        .find(|line| line.ticket_type == "General")
        .expect("general tier should be aggregated");
    assert_eq!((general.sold, general.capacity), (u32::MAX, u32::MAX));
    assert_eq!(general.conversion, 100.0);
}

#[test]
fn next_events_lists_upcoming_soonest_first() {
    let events = vec![
        event("late", "Late", "Concert", None, at(2026, 9, 1)),
        event("draft", "Draft", "Concert", Some("draft"), at(2026, 2, 1)),
        event("soon", "Soon", "Concert", None, at(2026, 3, 1)),
        event("mid", "Mid", "Concert", None, at(2026, 6, 1)),
    ];

    assert_eq!(ids(&next_events(&events, 2)), vec!["soon", "mid"]);
}

#[test]
fn role_book_validates_names_and_toggles_permissions() {
    let mut book = RoleBook::default();
    assert!(book.has("Owner", Permission::RefundOrders));

    assert_eq!(book.add_role("   "), Err(RoleError::EmptyName));
    assert_eq!(
        book.add_role("owner"),
        Err(RoleError::Duplicate("owner".to_string()))
    );
    book.add_role(" Volunteers ").expect("new role should be added");

    assert_eq!(book.toggle_permission("Volunteers", Permission::ViewEvents), Some(true));
    assert!(book.has("Volunteers", Permission::ViewEvents));
    assert_eq!(book.toggle_permission("Volunteers", Permission::ViewEvents), Some(false));
    assert_eq!(book.toggle_permission("Nobody", Permission::ViewEvents), None);

    assert!(book.remove_role("Volunteers"));
    assert!(!book.remove_role("Volunteers"));
}

#[test]
fn session_requires_an_organizer_id() {
    assert!(SessionContext::new("   ").is_none());
    assert_eq!(
        SessionContext::new(" org-7 ").map(|session| session.organizer_id),
        Some("org-7".to_string())
    );
}

// --- config, rest, export ---

#[test]
fn config_defaults_when_environment_is_empty() {
    let config = AppConfig::from_lookup(|_| None).expect("defaults should load");

    assert_eq!(config.api_url, "http://localhost:8080/api");
    assert_eq!(config.organizer_id, None);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.banner_ttl, Duration::from_millis(2500));
}

#[test]
fn config_reads_overrides_and_rejects_bad_numbers() {
    let vars = HashMap::from([
        ("DASHBOARD_API_URL", "https://api.example.com/v1/"),
        ("DASHBOARD_ORGANIZER_ID", "org-42"),
        ("DASHBOARD_BANNER_MS", "3000"),
    ]);
    let config = AppConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()))
        .expect("overrides should load");
    assert_eq!(config.api_url, "https://api.example.com/v1");
    assert_eq!(config.organizer_id.as_deref(), Some("org-42"));
    assert_eq!(config.banner_ttl, Duration::from_millis(3000));

    let bad = HashMap::from([("DASHBOARD_REQUEST_TIMEOUT_SECS", "soon")]);
    assert_eq!(
        AppConfig::from_lookup(|key| bad.get(key).map(|value| value.to_string())),
        Err(ConfigError::InvalidNumber {
            var: "DASHBOARD_REQUEST_TIMEOUT_SECS",
            value: "soon".to_string(),
        })
    );
}

#[test]
fn api_error_message_prefers_json_fields() {
    assert_eq!(error_message(404, r#"{"message":"Event not found"}"#), "Event not found");
    assert_eq!(error_message(400, r#"{"error":"Ticket already used"}"#), "Ticket already used");
    assert_eq!(error_message(500, "  upstream down "), "upstream down");
    assert_eq!(error_message(502, ""), "request failed with status 502");
}

#[test]
fn endpoint_escapes_ids_inside_path_segments() {
    let base = Url::parse("http://localhost:8080/api").expect("base url should parse");

    let url = endpoint(&base, &["events", "a/b?c#d", "publish"])
        .expect("http base should accept path segments");
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/events/a%2Fb%3Fc%23d/publish"
    );

    let slashed = Url::parse("http://localhost:8080/api/").expect("base url should parse");
    let url = endpoint(&slashed, &["orders"]).expect("trailing slash base should work");
    assert_eq!(url.as_str(), "http://localhost:8080/api/orders");

    let opaque = Url::parse("mailto:org@example.com").expect("mailto url should parse");
    assert_matches!(endpoint(&opaque, &["events"]), Err(BackendError::Message(_)));
}

#[test]
fn csv_export_writes_header_and_filtered_rows() {
    let temp_dir = unique_test_dir("export");
    let csv_path = temp_dir.join("nested").join("orders.csv");
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-2", "Ben, Jr.", "refunded", 20.5),
    ];

    let written = export_rows_to_csv(&csv_path, &rows).expect("export should succeed");

    assert_eq!(written, 2);
    let content = fs::read_to_string(&csv_path).expect("should read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("order_id,event,buyer,email,ticket_type,quantity,total,status,created_at")
    );
    assert_eq!(
        lines.next(),
        Some("o1,Jazz Night,Ana,ana@example.com,General,1,10.00,completed,2026-03-01 12:00")
    );
    assert!(content.contains("\"Ben, Jr.\""), "commas should be quoted");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_service_suggests_dated_file_names() {
    let service = ExportService::new(PathBuf::from("exports"));

    assert_eq!(
        service.default_path("orders", day(2026, 10, 19)),
        PathBuf::from("exports").join("orders-20261019.csv")
    );
}

// --- overlay and dropdown helpers ---

#[test]
fn only_one_overlay_is_open_at_a_time() {
    let mut overlay = OverlayState::default();
    overlay.open(OverlayId::Sort);
    assert!(overlay.is_open(OverlayId::Sort));

    overlay.toggle(OverlayId::Facet(FACET_STATUS));
    assert!(!overlay.is_open(OverlayId::Sort));
    assert_eq!(overlay.current(), Some(OverlayId::Facet(FACET_STATUS)));

    overlay.toggle(OverlayId::Facet(FACET_STATUS));
    assert_eq!(overlay.current(), None);

    overlay.open(OverlayId::Association);
    overlay.close();
    assert_eq!(overlay.current(), None);
}

#[test]
fn dropdown_labels_summarize_selection() {
    let options = vec![
        DropdownOption::new("draft", "Draft"),
        DropdownOption::new("upcoming", "Upcoming"),
    ];

    assert_eq!(dropdown_label(&options, Some("draft")), "Draft");
    assert_eq!(dropdown_label(&options, Some("gone")), "(none)");
    assert_eq!(facet_summary(&options, &BTreeSet::new()), "All");
    assert_eq!(
        facet_summary(&options, &BTreeSet::from(["upcoming".to_string()])),
        "Upcoming"
    );
    assert_eq!(
        facet_summary(
            &options,
            &BTreeSet::from(["draft".to_string(), "upcoming".to_string()])
        ),
        "2 selected"
    );
}

#[test]
fn association_options_start_with_all_events() {
    let options = event_options(
        [
            ("evt-2", "rust Workshop"),
            ("evt-1", "Jazz Night"),
            ("evt-2", "rust Workshop"),
        ]
        .into_iter(),
    );

    let values = options
        .iter()
        .map(|opt| opt.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(values, vec![ALL_OPTION_VALUE, "evt-1", "evt-2"]);
    assert_eq!(assoc_from_option(ALL_OPTION_VALUE), None);
    assert_eq!(assoc_from_option("evt-1"), Some("evt-1".to_string()));
}

#[test]
fn order_status_options_include_unknown_statuses() {
    let rows = vec![
        order("o1", "evt-1", "Ana", "completed", 10.0),
        order("o2", "evt-1", "Ben", "chargeback", 10.0),
    ];

    let values = order_status_options(&rows)
        .into_iter()
        .map(|opt| opt.value)
        .collect::<Vec<_>>();

    assert_eq!(
        values,
        vec!["completed", "pending", "refunded", "cancelled", "chargeback"]
    );
}

#[test]
fn webview_data_dir_is_created_under_base_dir() {
    let temp_dir = unique_test_dir("webview");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        crate::ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview data dir should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
