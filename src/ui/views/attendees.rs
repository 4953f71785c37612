use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::domain::entities::query::{DateRange, SortOption};
use crate::domain::entities::row::{
    format_timestamp, AttendeeRow, ListRow, CHECKED_IN, FACET_CHECK_IN, FACET_TICKET_TYPE,
    NOT_CHECKED_IN,
};
use crate::ui::components::{
    table_container_style, table_header_cell_style, BannerView, DateRangeFilter, DropdownOption,
    DropdownSelect, FacetDropdown, LoadStateView, PagerBar, SearchBox, BUTTON_STYLE, CELL_STYLE,
    TABLE_STYLE,
};
use crate::ui::state::app_state::AppState;
use crate::ui::state::list_view::ListViewController;
use crate::ui::state::overlay::OverlayId;
use crate::ui::views::events::sort_options;
use crate::ui::views::{
    export_into_banner, run_row_action, start_fetch, today, use_task_cleanup, ExportModal,
};
use crate::usecase::services::Services;
use crate::{ALL_OPTION_VALUE, ATTENDEES_PAGE_SIZE};

/// "All events" followed by every event that has at least one attendee.
pub fn event_options<'a>(
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<DropdownOption> {
    let by_id = pairs.collect::<BTreeMap<_, _>>();
    let mut named = by_id
        .into_iter()
        .map(|(id, name)| DropdownOption::new(id, name))
        .collect::<Vec<_>>();
    named.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    std::iter::once(DropdownOption::new(ALL_OPTION_VALUE, "All events"))
        .chain(named)
        .collect()
}

pub fn distinct_options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<DropdownOption> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|value| DropdownOption::new(value, value))
        .collect()
}

fn check_in_options() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new(CHECKED_IN, "Checked in"),
        DropdownOption::new(NOT_CHECKED_IN, "Not checked in"),
    ]
}

/// Maps the association dropdown value back to a filter.
pub fn assoc_from_option(value: &str) -> Option<String> {
    (value != ALL_OPTION_VALUE).then(|| value.to_string())
}

#[component]
pub fn AttendeesView() -> Element {
    let services = use_context::<Services>();
    let AppState {
        overlay,
        anchor,
        session,
        ..
    } = use_context::<AppState>();

    let banner_ttl = services.banner_ttl;
    let mut controller = use_signal(move || {
        ListViewController::<AttendeeRow>::new(
            ATTENDEES_PAGE_SIZE,
            SortOption::NewestFirst,
            banner_ttl,
        )
    });
    let fetch_task = use_signal(|| None::<Task>);
    let banner_task = use_signal(|| None::<Task>);
    use_task_cleanup(fetch_task, banner_task);

    let query = services.query.clone();
    use_effect(move || {
        let Some(session) = session() else {
            return;
        };
        let query = query.clone();
        start_fetch(controller, fetch_task, move || {
            query.load_attendees(&session, Utc::now())
        });
    });

    let view = controller();
    let page = view.visible();
    let list_query = view.query().clone();
    let detail = view.selected_row().cloned();
    let export_open = view.export_open();
    let arranged_count = view.arranged().len();
    let events = event_options(
        view.rows()
            .iter()
            .map(|row| (row.event_id.as_str(), row.event_name.as_str())),
    );
    let ticket_types = distinct_options(view.rows().iter().map(|row| row.ticket_type.as_str()));
    let selected_event = Some(
        list_query
            .assoc_id
            .clone()
            .unwrap_or_else(|| ALL_OPTION_VALUE.to_string()),
    );
    let today = today();

    let actions = services.actions.clone();
    let services_for_export = services.clone();

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; height: 100%;",
            BannerView {
                banner: view.banner().cloned(),
                on_dismiss: move |_| controller.write().dismiss_banner(),
            }

            div { style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
                SearchBox {
                    value: list_query.text.clone(),
                    placeholder: "Search name, email or ticket",
                    on_input: move |text: String| controller.write().set_search_text(text),
                }
                DropdownSelect {
                    id: OverlayId::Association,
                    label: "Event",
                    options: events,
                    selected: selected_event,
                    overlay,
                    anchor,
                    on_select: move |value: String| controller.write().set_assoc(assoc_from_option(&value)),
                }
                FacetDropdown {
                    id: OverlayId::Facet(FACET_TICKET_TYPE),
                    label: "Ticket",
                    options: ticket_types,
                    selected: list_query.selected(FACET_TICKET_TYPE),
                    overlay,
                    anchor,
                    on_toggle: move |value: String| controller.write().toggle_facet(FACET_TICKET_TYPE, &value),
                    on_clear: move |_| controller.write().clear_facet(FACET_TICKET_TYPE),
                }
                FacetDropdown {
                    id: OverlayId::Facet(FACET_CHECK_IN),
                    label: "Check-in",
                    options: check_in_options(),
                    selected: list_query.selected(FACET_CHECK_IN),
                    overlay,
                    anchor,
                    on_toggle: move |value: String| controller.write().toggle_facet(FACET_CHECK_IN, &value),
                    on_clear: move |_| controller.write().clear_facet(FACET_CHECK_IN),
                }
                DateRangeFilter {
                    range: list_query.date_range,
                    today,
                    overlay,
                    anchor,
                    on_change: move |range: Option<DateRange>| controller.write().set_date_range(range),
                }
                DropdownSelect {
                    id: OverlayId::Sort,
                    label: "Sort",
                    options: sort_options(),
                    selected: Some(view.sort().label().to_string()),
                    overlay,
                    anchor,
                    on_select: move |label: String| {
                        controller.write().set_sort(SortOption::from_label(&label))
                    },
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| controller.write().clear_filters(),
                    "Reset"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| controller.write().open_export(),
                    "Export"
                }
            }

            LoadStateView {
                state: view.load_state().clone(),
                empty: page.rows.is_empty(),
                warnings: view.warnings().to_vec(),
            }

            div { style: "{table_container_style()}",
                table { style: TABLE_STYLE,
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "Name" }
                            th { style: "{table_header_cell_style()}", "Email" }
                            th { style: "{table_header_cell_style()}", "Event" }
                            th { style: "{table_header_cell_style()}", "Ticket" }
                            th { style: "{table_header_cell_style()}", "Purchased" }
                            th { style: "{table_header_cell_style()}", "Check-in" }
                        }
                    }
                    tbody {
                        {page.rows.iter().map(|row| {
                            let id = row.ticket_id.clone();
                            let row_for_check_in = row.clone();
                            let actions = actions.clone();
                            let purchased = format_timestamp(row.purchased_at);
                            let checked_in = row.checked_in;
                            rsx!(
                                tr {
                                    style: "cursor: pointer;",
                                    onclick: move |_| controller.write().select(&id),
                                    td { style: CELL_STYLE, "{row.name}" }
                                    td { style: CELL_STYLE, "{row.email}" }
                                    td { style: CELL_STYLE, "{row.event_name}" }
                                    td { style: CELL_STYLE, "{row.ticket_type}" }
                                    td { style: CELL_STYLE, "{purchased}" }
                                    td { style: CELL_STYLE,
                                        onclick: move |event| event.stop_propagation(),
                                        if checked_in {
                                            span { style: "color: #2f9e44;", "Checked in" }
                                        } else {
                                            button {
                                                style: BUTTON_STYLE,
                                                onclick: move |_| {
                                                    let actions = actions.clone();
                                                    let row = row_for_check_in.clone();
                                                    run_row_action(
                                                        controller,
                                                        banner_task,
                                                        row.ticket_id.clone(),
                                                        format!("{} checked in", row.name),
                                                        move || actions.check_in(&row),
                                                    );
                                                },
                                                "Check in"
                                            }
                                        }
                                    }
                                }
                            )
                        })}
                    }
                }
            }

            PagerBar {
                current_page: page.current_page,
                total_pages: page.total_pages,
                start_index: page.start_index,
                end_index: page.end_index,
                total_rows: page.total_rows,
                on_previous: move |_| controller.write().previous_page(),
                on_next: move |_| controller.write().next_page(),
                on_jump: move |number: usize| controller.write().jump_to_page(number),
            }

            if let Some(row) = detail {
                AttendeeDetail {
                    row,
                    on_close: move |_| controller.write().clear_selection(),
                }
            }

            if export_open {
                ExportModal {
                    row_count: arranged_count,
                    on_export: move |_| {
                        export_into_banner(&services_for_export, "attendees", controller, banner_task)
                    },
                    on_close: move |_| controller.write().close_export(),
                }
            }
        }
    }
}

#[component]
fn AttendeeDetail(row: AttendeeRow, on_close: EventHandler<()>) -> Element {
    let purchased = format_timestamp(row.purchased_at);
    let name = row.display_name().to_string();
    let state = if row.checked_in { "Checked in" } else { "Not checked in" };

    rsx! {
        div { style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px; background: #fff; display: flex; gap: 16px; align-items: center;",
            img {
                src: "{row.photo_url}",
                style: "width: 72px; height: 72px; object-fit: cover; border-radius: 50%;",
            }
            div { style: "flex: 1;",
                div { style: "font-weight: 600; font-size: 16px;", "{name}" }
                div { style: "color: #666;", "{row.email}" }
                div { "{row.event_name} | {row.ticket_type} | ticket {row.ticket_id}" }
                div { style: "color: #666;", "Purchased {purchased} | {state}" }
            }
            button { style: BUTTON_STYLE, onclick: move |_| on_close.call(()), "Close" }
        }
    }
}
