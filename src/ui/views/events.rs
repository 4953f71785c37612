use std::collections::BTreeSet;

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::domain::entities::query::{DateRange, SortOption};
use crate::domain::entities::row::{
    format_timestamp, EventRow, EventStatus, ListRow, FACET_CATEGORY, FACET_STATUS,
};
use crate::ui::components::{
    table_container_style, table_header_cell_style, BannerView, DateRangeFilter, DropdownOption,
    DropdownSelect, FacetDropdown, LoadStateView, PagerBar, SearchBox, BUTTON_STYLE, CELL_STYLE,
    TABLE_STYLE,
};
use crate::ui::state::app_state::{AppState, NavTab};
use crate::ui::state::list_view::ListViewController;
use crate::ui::state::overlay::OverlayId;
use crate::ui::views::{
    confirm_dialog, export_into_banner, run_row_action, start_fetch, today, use_task_cleanup,
    ConfirmModal, ExportModal,
};
use crate::usecase::services::Services;
use crate::EVENTS_PAGE_SIZE;

pub fn status_options() -> Vec<DropdownOption> {
    EventStatus::ALL
        .iter()
        .map(|status| DropdownOption::new(status.as_str(), status.label()))
        .collect()
}

pub fn category_options(rows: &[EventRow]) -> Vec<DropdownOption> {
    rows.iter()
        .map(|row| row.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|category| DropdownOption::new(category.clone(), category))
        .collect()
}

pub fn sort_options() -> Vec<DropdownOption> {
    SortOption::CHOICES
        .iter()
        .map(|option| DropdownOption::new(option.label(), option.label()))
        .collect()
}

#[component]
pub fn EventsView() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut active_tab,
        overlay,
        anchor,
        session,
        mut editing_event,
        ..
    } = use_context::<AppState>();

    let banner_ttl = services.banner_ttl;
    let mut controller = use_signal(move || {
        ListViewController::<EventRow>::new(EVENTS_PAGE_SIZE, SortOption::NewestFirst, banner_ttl)
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
            query.load_events(&session, Utc::now())
        });
    });

    let view = controller();
    let page = view.visible();
    let list_query = view.query().clone();
    let detail = view.selected_row().cloned();
    let pending_delete = view.pending_delete().cloned();
    let export_open = view.export_open();
    let arranged_count = view.arranged().len();
    let categories = category_options(view.rows());
    let today = today();

    let actions_for_publish = services.actions.clone();
    let actions_for_delete = services.actions.clone();
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
                    placeholder: "Search events",
                    on_input: move |text: String| controller.write().set_search_text(text),
                }
                FacetDropdown {
                    id: OverlayId::Facet(FACET_STATUS),
                    label: "Status",
                    options: status_options(),
                    selected: list_query.selected(FACET_STATUS),
                    overlay,
                    anchor,
                    on_toggle: move |value: String| controller.write().toggle_facet(FACET_STATUS, &value),
                    on_clear: move |_| controller.write().clear_facet(FACET_STATUS),
                }
                FacetDropdown {
                    id: OverlayId::Facet(FACET_CATEGORY),
                    label: "Category",
                    options: categories,
                    selected: list_query.selected(FACET_CATEGORY),
                    overlay,
                    anchor,
                    on_toggle: move |value: String| controller.write().toggle_facet(FACET_CATEGORY, &value),
                    on_clear: move |_| controller.write().clear_facet(FACET_CATEGORY),
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
                            th { style: "{table_header_cell_style()}", "Title" }
                            th { style: "{table_header_cell_style()}", "Category" }
                            th { style: "{table_header_cell_style()}", "Status" }
                            th { style: "{table_header_cell_style()}", "Starts" }
                            th { style: "{table_header_cell_style()}", "Venue" }
                            th { style: "{table_header_cell_style()}", "Sold" }
                            th { style: "{table_header_cell_style()}", "" }
                        }
                    }
                    tbody {
                        {page.rows.iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_delete = row.id.clone();
                            let row_for_publish = row.clone();
                            let row_for_edit = row.clone();
                            let actions = actions_for_publish.clone();
                            let can_publish = row.status == EventStatus::Draft;
                            let starts = format_timestamp(row.start_at);
                            let sold = format!("{} / {}", row.tickets_sold(), row.capacity());
                            let status = row.status.label();
                            rsx!(
                                tr {
                                    style: "cursor: pointer;",
                                    onclick: move |_| controller.write().select(&id),
                                    td { style: CELL_STYLE, "{row.title}" }
                                    td { style: CELL_STYLE, "{row.category}" }
                                    td { style: CELL_STYLE, "{status}" }
                                    td { style: CELL_STYLE, "{starts}" }
                                    td { style: CELL_STYLE, "{row.venue}" }
                                    td { style: CELL_STYLE, "{sold}" }
                                    td { style: "{CELL_STYLE} white-space: nowrap;",
                                        onclick: move |event| event.stop_propagation(),
                                        if can_publish {
                                            button {
                                                style: BUTTON_STYLE,
                                                onclick: move |_| {
                                                    if !confirm_dialog("Publish event", "Publish this event so tickets go on sale?") {
                                                        return;
                                                    }
                                                    let actions = actions.clone();
                                                    let row = row_for_publish.clone();
                                                    run_row_action(
                                                        controller,
                                                        banner_task,
                                                        row.id.clone(),
                                                        format!("Published {}", row.title),
                                                        move || actions.publish_event(&row, Utc::now()),
                                                    );
                                                },
                                                "Publish"
                                            }
                                        }
                                        button {
                                            style: BUTTON_STYLE,
                                            onclick: move |_| {
                                                editing_event.set(Some(row_for_edit.clone()));
                                                active_tab.set(NavTab::CreateEvent);
                                            },
                                            "Edit"
                                        }
                                        button {
                                            style: BUTTON_STYLE,
                                            onclick: move |_| controller.write().request_delete(&id_for_delete),
                                            "Delete"
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
                EventDetail {
                    row,
                    on_close: move |_| controller.write().clear_selection(),
                }
            }

            if let Some(row) = pending_delete {
                ConfirmModal {
                    title: "Delete event".to_string(),
                    message: format!("Delete \"{}\"? This cannot be undone.", row.title),
                    confirm_label: "Delete",
                    on_confirm: move |_| {
                        let actions = actions_for_delete.clone();
                        let row = row.clone();
                        run_row_action(
                            controller,
                            banner_task,
                            row.id.clone(),
                            format!("Deleted {}", row.title),
                            move || actions.delete_event(&row),
                        );
                    },
                    on_cancel: move |_| controller.write().cancel_delete(),
                }
            }

            if export_open {
                ExportModal {
                    row_count: arranged_count,
                    on_export: move |_| {
                        export_into_banner(&services_for_export, "events", controller, banner_task)
                    },
                    on_close: move |_| controller.write().close_export(),
                }
            }
        }
    }
}

#[component]
fn EventDetail(row: EventRow, on_close: EventHandler<()>) -> Element {
    let starts = format_timestamp(row.start_at);
    let ends = format_timestamp(row.end_at);
    let title = row.display_name().to_string();
    let description = if row.description.is_empty() {
        "No description".to_string()
    } else {
        row.description.clone()
    };

    rsx! {
        div { style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px; background: #fff; display: flex; gap: 16px;",
            img {
                src: "{row.banner_url}",
                style: "width: 180px; height: 100px; object-fit: cover; border-radius: 6px;",
            }
            div { style: "flex: 1;",
                div { style: "display: flex; justify-content: space-between;",
                    span { style: "font-weight: 600; font-size: 16px;", "{title}" }
                    button { style: BUTTON_STYLE, onclick: move |_| on_close.call(()), "Close" }
                }
                div { style: "color: #666; margin: 4px 0;", "{row.venue} | {starts} - {ends}" }
                p { "{description}" }
                table { style: TABLE_STYLE,
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "Tier" }
                            th { style: "{table_header_cell_style()}", "Price" }
                            th { style: "{table_header_cell_style()}", "Sold" }
                            th { style: "{table_header_cell_style()}", "Capacity" }
                        }
                    }
                    tbody {
                        {row.tiers.iter().map(|tier| {
                            let price = format!("{:.2}", tier.price);
                            rsx!(
                                tr {
                                    td { style: CELL_STYLE, "{tier.name}" }
                                    td { style: CELL_STYLE, "{price}" }
                                    td { style: CELL_STYLE, "{tier.sold}" }
                                    td { style: CELL_STYLE, "{tier.capacity}" }
                                }
                            )
                        })}
                    }
                }
            }
        }
    }
}
