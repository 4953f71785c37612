use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::domain::entities::row::{format_timestamp, EventRow, EventStatus, OrderRow};
use crate::domain::summary::{category_sales, summarize};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::{table_header_cell_style, CELL_STYLE, TABLE_STYLE};
use crate::ui::state::app_state::AppState;
use crate::usecase::services::Services;

const UPCOMING_LIMIT: usize = 5;

/// Events still to come, soonest first.
pub fn next_events(events: &[EventRow], limit: usize) -> Vec<EventRow> {
    let mut upcoming = events
        .iter()
        .filter(|event| event.status == EventStatus::Upcoming)
        .cloned()
        .collect::<Vec<_>>();
    upcoming.sort_by(|a, b| match (a.start_at, b.start_at) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    upcoming.truncate(limit);
    upcoming
}

#[derive(Clone, PartialEq)]
enum OverviewState {
    Loading,
    Ready(Vec<EventRow>, Vec<OrderRow>),
    Failed(String),
}

#[component]
pub fn OverviewView() -> Element {
    let services = use_context::<Services>();
    let AppState { session, .. } = use_context::<AppState>();
    let mut state = use_signal(|| OverviewState::Loading);
    let mut fetch_task = use_signal(|| None::<Task>);
    use_drop(move || {
        if let Some(task) = *fetch_task.peek() {
            task.cancel();
        }
    });

    let query = services.query.clone();
    use_effect(move || {
        let Some(session) = session() else {
            return;
        };
        if let Some(task) = fetch_task.write().take() {
            task.cancel();
        }
        state.set(OverviewState::Loading);
        let query = query.clone();
        let task = spawn(async move {
            let result = run_blocking(move || query.load_overview(&session, Utc::now())).await;
            match result {
                Ok((events, orders)) => state.set(OverviewState::Ready(events, orders)),
                Err(err) => {
                    tracing::warn!(error = %err, "overview load failed");
                    state.set(OverviewState::Failed(err.to_string()));
                }
            }
        });
        fetch_task.set(Some(task));
    });

    let (events, orders) = match state() {
        OverviewState::Loading => {
            return rsx! {
                div { style: "padding: 12px; color: #666;", "Loading..." }
            };
        }
        OverviewState::Failed(message) => {
            return rsx! {
                div { style: "padding: 12px; color: #e03131;", "Failed to load: {message}" }
            };
        }
        OverviewState::Ready(events, orders) => (events, orders),
    };

    let summary = summarize(&events, &orders);
    let sales = category_sales(&events);
    let upcoming = next_events(&events, UPCOMING_LIMIT);
    let revenue = format!("{:.2}", summary.revenue);
    let refunded = format!("{:.2}", summary.refunded);
    let cards = [
        ("Events", summary.total_events.to_string()),
        ("Upcoming", summary.upcoming_events.to_string()),
        ("Tickets sold", summary.tickets_sold.to_string()),
        ("Revenue", revenue),
        ("Refunded", refunded),
    ];

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 16px;",
            div { style: "display: flex; gap: 12px; flex-wrap: wrap;",
                {cards.iter().map(|(label, value)| rsx!(
                    div { style: "border: 1px solid #ddd; border-radius: 8px; padding: 12px 16px; min-width: 140px; background: #fff;",
                        div { style: "color: #666; font-size: 12px;", "{label}" }
                        div { style: "font-size: 22px; font-weight: 600;", "{value}" }
                    }
                ))}
            }

            div {
                h3 { "Sales by ticket type" }
                table { style: TABLE_STYLE,
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}", "Ticket" }
                            th { style: "{table_header_cell_style()}", "Sold" }
                            th { style: "{table_header_cell_style()}", "Capacity" }
                            th { style: "{table_header_cell_style()}", "Revenue" }
                            th { style: "{table_header_cell_style()}", "Conversion" }
                        }
                    }
                    tbody {
                        {sales.iter().map(|line| {
                            let revenue = format!("{:.2}", line.revenue);
                            let conversion = format!("{:.1}%", line.conversion);
                            rsx!(
                                tr {
                                    td { style: CELL_STYLE, "{line.ticket_type}" }
                                    td { style: CELL_STYLE, "{line.sold}" }
                                    td { style: CELL_STYLE, "{line.capacity}" }
                                    td { style: CELL_STYLE, "{revenue}" }
                                    td { style: CELL_STYLE,
                                        div { style: "display: flex; align-items: center; gap: 8px;",
                                            div { style: "width: 120px; height: 8px; background: #eee; border-radius: 4px;",
                                                div { style: "width: {line.conversion.min(100.0)}%; height: 8px; background: #4c6ef5; border-radius: 4px;" }
                                            }
                                            span { "{conversion}" }
                                        }
                                    }
                                }
                            )
                        })}
                    }
                }
            }

            div {
                h3 { "Coming up" }
                if upcoming.is_empty() {
                    div { style: "color: #666;", "No upcoming events" }
                }
                {upcoming.iter().map(|event| {
                    let starts = format_timestamp(event.start_at);
                    rsx!(
                        div { style: "display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #eee;",
                            span { "{event.title}" }
                            span { style: "color: #666;", "{starts} | {event.venue}" }
                        }
                    )
                })}
            }
        }
    }
}
