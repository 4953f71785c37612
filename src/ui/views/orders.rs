use std::collections::BTreeSet;

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::domain::entities::query::{DateRange, SortOption};
use crate::domain::entities::row::{
    format_timestamp, OrderRow, OrderStatus, FACET_STATUS, FACET_TICKET_TYPE,
};
use crate::ui::components::{
    table_container_style, table_header_cell_style, BannerView, DateRangeFilter, DropdownOption,
    DropdownSelect, FacetDropdown, LoadStateView, PagerBar, SearchBox, BUTTON_STYLE, CELL_STYLE,
    TABLE_STYLE,
};
use crate::ui::state::app_state::AppState;
use crate::ui::state::list_view::ListViewController;
use crate::ui::state::overlay::OverlayId;
use crate::ui::views::attendees::{assoc_from_option, distinct_options, event_options};
use crate::ui::views::events::sort_options;
use crate::ui::views::{
    confirm_dialog, export_into_banner, run_row_action, start_fetch, today, use_task_cleanup,
    ConfirmModal, ExportModal,
};
use crate::usecase::services::Services;
use crate::{ALL_OPTION_VALUE, ORDERS_PAGE_SIZE};

/// Known statuses first, then anything else the backend reported.
pub fn order_status_options(rows: &[OrderRow]) -> Vec<DropdownOption> {
    let known = OrderStatus::KNOWN
        .iter()
        .map(|status| status.as_str().to_string())
        .collect::<Vec<_>>();
    let extra = rows
        .iter()
        .map(|row| row.status.as_str().to_string())
        .filter(|status| !known.contains(status))
        .collect::<BTreeSet<_>>();
    known
        .into_iter()
        .chain(extra)
        .map(|status| DropdownOption::new(status.clone(), capitalize(&status)))
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn OrdersView() -> Element {
    let services = use_context::<Services>();
    let AppState {
        overlay,
        anchor,
        session,
        ..
    } = use_context::<AppState>();

    let banner_ttl = services.banner_ttl;
    let mut controller = use_signal(move || {
        ListViewController::<OrderRow>::new(ORDERS_PAGE_SIZE, SortOption::NewestFirst, banner_ttl)
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
            query.load_orders(&session, Utc::now())
        });
    });

    let view = controller();
    let page = view.visible();
    let list_query = view.query().clone();
    let pending_delete = view.pending_delete().cloned();
    let detail = view.selected_row().cloned();
    let export_open = view.export_open();
    let arranged_count = view.arranged().len();
    let events = event_options(
        view.rows()
            .iter()
            .map(|row| (row.event_id.as_str(), row.event_name.as_str())),
    );
    let statuses = order_status_options(view.rows());
    let ticket_types = distinct_options(view.rows().iter().map(|row| row.ticket_type.as_str()));
    let selected_event = Some(
        list_query
            .assoc_id
            .clone()
            .unwrap_or_else(|| ALL_OPTION_VALUE.to_string()),
    );
    let today = today();

    let actions = services.actions.clone();
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
                    placeholder: "Search buyer, email or order",
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
                    id: OverlayId::Facet(FACET_STATUS),
                    label: "Status",
                    options: statuses,
                    selected: list_query.selected(FACET_STATUS),
                    overlay,
                    anchor,
                    on_toggle: move |value: String| controller.write().toggle_facet(FACET_STATUS, &value),
                    on_clear: move |_| controller.write().clear_facet(FACET_STATUS),
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
                            th { style: "{table_header_cell_style()}", "Order" }
                            th { style: "{table_header_cell_style()}", "Buyer" }
                            th { style: "{table_header_cell_style()}", "Event" }
                            th { style: "{table_header_cell_style()}", "Ticket" }
                            th { style: "{table_header_cell_style()}", "Qty" }
                            th { style: "{table_header_cell_style()}", "Total" }
                            th { style: "{table_header_cell_style()}", "Status" }
                            th { style: "{table_header_cell_style()}", "Created" }
                            th { style: "{table_header_cell_style()}", "" }
                        }
                    }
                    tbody {
                        {page.rows.iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_delete = row.id.clone();
                            let row_for_refund = row.clone();
                            let row_for_cancel = row.clone();
                            let actions_for_refund = actions.clone();
                            let actions_for_cancel = actions.clone();
                            let settleable = row.status.is_settleable();
                            let total = format!("{:.2}", row.total);
                            let status = capitalize(row.status.as_str());
                            let created = format_timestamp(row.created_at);
                            rsx!(
                                tr {
                                    style: "cursor: pointer;",
                                    onclick: move |_| controller.write().select(&id),
                                    td { style: CELL_STYLE, "{row.id}" }
                                    td { style: CELL_STYLE,
                                        div { "{row.buyer_name}" }
                                        div { style: "color: #666; font-size: 12px;", "{row.buyer_email}" }
                                    }
                                    td { style: CELL_STYLE, "{row.event_name}" }
                                    td { style: CELL_STYLE, "{row.ticket_type}" }
                                    td { style: CELL_STYLE, "{row.quantity}" }
                                    td { style: CELL_STYLE, "{total}" }
                                    td { style: CELL_STYLE, "{status}" }
                                    td { style: CELL_STYLE, "{created}" }
                                    td { style: "{CELL_STYLE} white-space: nowrap;",
                                        onclick: move |event| event.stop_propagation(),
                                        if settleable {
                                            button {
                                                style: BUTTON_STYLE,
                                                onclick: move |_| {
                                                    let row = row_for_refund.clone();
                                                    let prompt = format!("Refund {:.2} to {}?", row.total, row.buyer_name);
                                                    if !confirm_dialog("Refund order", &prompt) {
                                                        return;
                                                    }
                                                    let actions = actions_for_refund.clone();
                                                    run_row_action(
                                                        controller,
                                                        banner_task,
                                                        row.id.clone(),
                                                        format!("Order {} refunded", row.id),
                                                        move || actions.refund_order(&row),
                                                    );
                                                },
                                                "Refund"
                                            }
                                            button {
                                                style: BUTTON_STYLE,
                                                onclick: move |_| {
                                                    let row = row_for_cancel.clone();
                                                    let prompt = format!("Cancel order {}?", row.id);
                                                    if !confirm_dialog("Cancel order", &prompt) {
                                                        return;
                                                    }
                                                    let actions = actions_for_cancel.clone();
                                                    run_row_action(
                                                        controller,
                                                        banner_task,
                                                        row.id.clone(),
                                                        format!("Order {} cancelled", row.id),
                                                        move || actions.cancel_order(&row),
                                                    );
                                                },
                                                "Cancel"
                                            }
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
                OrderDetail {
                    row,
                    on_close: move |_| controller.write().clear_selection(),
                }
            }

            if let Some(row) = pending_delete {
                ConfirmModal {
                    title: "Delete order".to_string(),
                    message: format!("Delete order {} from {}?", row.id, row.buyer_name),
                    confirm_label: "Delete",
                    on_confirm: move |_| {
                        let actions = actions_for_delete.clone();
                        let row = row.clone();
                        run_row_action(
                            controller,
                            banner_task,
                            row.id.clone(),
                            format!("Order {} deleted", row.id),
                            move || actions.delete_order(&row),
                        );
                    },
                    on_cancel: move |_| controller.write().cancel_delete(),
                }
            }

            if export_open {
                ExportModal {
                    row_count: arranged_count,
                    on_export: move |_| {
                        export_into_banner(&services_for_export, "orders", controller, banner_task)
                    },
                    on_close: move |_| controller.write().close_export(),
                }
            }
        }
    }
}

#[component]
fn OrderDetail(row: OrderRow, on_close: EventHandler<()>) -> Element {
    let created = format_timestamp(row.created_at);
    let total = format!("{:.2}", row.total);
    let status = capitalize(row.status.as_str());

    rsx! {
        div { style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px; background: #fff; display: flex; gap: 16px; align-items: center;",
            div { style: "flex: 1;",
                div { style: "font-weight: 600; font-size: 16px;", "Order {row.id}" }
                div { "{row.buyer_name}" }
                div { style: "color: #666;", "{row.buyer_email}" }
                div { "{row.event_name} | {row.ticket_type} x {row.quantity}" }
                div { "Total {total} | {status}" }
                div { style: "color: #666;", "Created {created}" }
            }
            button { style: BUTTON_STYLE, onclick: move |_| on_close.call(()), "Close" }
        }
    }
}
