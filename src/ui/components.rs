use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use dioxus::prelude::*;

use crate::domain::calendar::{month_grid, month_title, shift_month};
use crate::domain::entities::query::{pick_range_end, pick_range_start, DateRange};
use crate::ui::state::list_view::{Banner, BannerKind, LoadState};
use crate::ui::state::overlay::{DateField, OverlayId, OverlayState};

pub const PANEL_STYLE: &str = "position: fixed; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;";
pub const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
pub const MODAL_BACKDROP_STYLE: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;";
pub const MODAL_STYLE: &str =
    "background: #fff; padding: 16px; border: 1px solid #999; border-radius: 8px; min-width: 320px; max-width: 640px;";

pub const TABLE_STYLE: &str = "border-collapse: collapse; width: 100%; background: #fff;";
pub const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 6px 8px;";

pub fn table_container_style() -> String {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;".to_string()
}

pub fn table_header_cell_style() -> String {
    "position: sticky; top: 0; background: #f8f9fa; border: 1px solid #ddd; padding: 6px 8px; text-align: left;"
        .to_string()
}

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Button text for a facet: "All", the single selection, or a count.
pub fn facet_summary(options: &[DropdownOption], selected: &BTreeSet<String>) -> String {
    match selected.len() {
        0 => "All".to_string(),
        1 => dropdown_label(options, selected.iter().next().map(String::as_str)),
        count => format!("{count} selected"),
    }
}

fn toggle_at_pointer(
    mut overlay: Signal<OverlayState>,
    mut anchor: Signal<Option<(f64, f64)>>,
    id: OverlayId,
    event: &MouseEvent,
) {
    event.stop_propagation();
    if overlay().is_open(id) {
        overlay.write().close();
        return;
    }
    let point = event.client_coordinates();
    anchor.set(Some((point.x, point.y + 24.0)));
    overlay.write().open(id);
}

#[component]
pub fn DropdownSelect(
    id: OverlayId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    mut overlay: Signal<OverlayState>,
    anchor: Signal<Option<(f64, f64)>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = overlay().is_open(id);
    let selected_label = dropdown_label(&options, selected.as_deref());
    let (left, top) = anchor().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: BUTTON_STYLE,
                onclick: move |event| toggle_at_pointer(overlay, anchor, id, &event),
                "{selected_label}"
            }
        }

        if is_open {
            div {
                style: "{PANEL_STYLE} left: {left}px; top: {top}px;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    let background = if is_selected { "#eef4ff" } else { "transparent" };
                    rsx!(
                        div {
                            style: "padding: 8px 10px; cursor: pointer; background: {background};",
                            onclick: move |_| {
                                on_select.call(value.clone());
                                overlay.write().close();
                            },
                            "{label}"
                        }
                    )
                })}
            }
        }
    }
}

/// Multi-select checkbox list for one facet group. Stays open while values
/// are toggled.
#[component]
pub fn FacetDropdown(
    id: OverlayId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: BTreeSet<String>,
    overlay: Signal<OverlayState>,
    anchor: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<String>,
    on_clear: EventHandler<()>,
) -> Element {
    let is_open = overlay().is_open(id);
    let summary = facet_summary(&options, &selected);
    let (left, top) = anchor().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: BUTTON_STYLE,
                onclick: move |event| toggle_at_pointer(overlay, anchor, id, &event),
                "{summary}"
            }
        }

        if is_open {
            div {
                style: "{PANEL_STYLE} left: {left}px; top: {top}px; padding: 6px;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let checked = selected.contains(&opt.value);
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| on_toggle.call(value.clone()),
                            }
                            span { "{label}" }
                        }
                    )
                })}
                if !selected.is_empty() {
                    button {
                        style: "{BUTTON_STYLE} margin-top: 6px;",
                        onclick: move |_| on_clear.call(()),
                        "Clear"
                    }
                }
            }
        }
    }
}

/// Month grid picker. `value` is the currently chosen day, if any.
#[component]
pub fn DatePicker(
    id: OverlayId,
    label: &'static str,
    value: Option<NaiveDate>,
    today: NaiveDate,
    mut overlay: Signal<OverlayState>,
    anchor: Signal<Option<(f64, f64)>>,
    on_pick: EventHandler<Option<NaiveDate>>,
) -> Element {
    let shown = value.unwrap_or(today);
    let mut visible_month = use_signal(|| (shown.year(), shown.month()));
    let is_open = overlay().is_open(id);
    let (left, top) = anchor().unwrap_or((0.0, 0.0));
    let (year, month) = visible_month();
    let title = month_title(year, month);
    let cells = month_grid(year, month).unwrap_or_default();
    let button_text = value
        .map(|day| day.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Any".to_string());

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: BUTTON_STYLE,
                onclick: move |event| toggle_at_pointer(overlay, anchor, id, &event),
                "{button_text}"
            }
        }

        if is_open {
            div {
                style: "{PANEL_STYLE} left: {left}px; top: {top}px; padding: 8px; min-width: 260px;",
                onclick: move |event| event.stop_propagation(),
                div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 6px;",
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            let (y, m) = visible_month();
                            visible_month.set(shift_month(y, m, -1));
                        },
                        "<"
                    }
                    span { style: "font-weight: 600;", "{title}" }
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            let (y, m) = visible_month();
                            visible_month.set(shift_month(y, m, 1));
                        },
                        ">"
                    }
                }
                div { style: "display: grid; grid-template-columns: repeat(7, 1fr); gap: 2px; text-align: center;",
                    {["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].iter().map(|name| rsx!(
                        span { style: "color: #888; font-size: 12px;", "{name}" }
                    ))}
                    {cells.into_iter().map(|cell| {
                        let day = cell.date;
                        let color = if cell.in_month { "#222" } else { "#bbb" };
                        let background = if value == Some(day) {
                            "#4c6ef5"
                        } else if day == today {
                            "#eef4ff"
                        } else {
                            "transparent"
                        };
                        let number = day.day();
                        rsx!(
                            button {
                                style: "border: none; border-radius: 4px; padding: 4px 0; cursor: pointer; color: {color}; background: {background};",
                                onclick: move |_| {
                                    on_pick.call(Some(day));
                                    overlay.write().close();
                                },
                                "{number}"
                            }
                        )
                    })}
                }
                div { style: "display: flex; justify-content: flex-end; margin-top: 6px;",
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            on_pick.call(None);
                            overlay.write().close();
                        },
                        "Clear"
                    }
                }
            }
        }
    }
}

#[component]
pub fn PagerBar(
    current_page: usize,
    total_pages: usize,
    start_index: usize,
    end_index: usize,
    total_rows: usize,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_jump: EventHandler<usize>,
) -> Element {
    let first_shown = if total_rows == 0 { 0 } else { start_index + 1 };

    rsx! {
        div { style: "display: flex; align-items: center; gap: 8px; margin-top: 12px;",
            span { style: "color: #666;", "Showing {first_shown}-{end_index} of {total_rows}" }
            button {
                style: BUTTON_STYLE,
                disabled: current_page <= 1,
                onclick: move |_| on_previous.call(()),
                "Previous"
            }
            {(1..=total_pages).map(|number| {
                let active = number == current_page;
                let background = if active { "#eef4ff" } else { "#fff" };
                rsx!(
                    button {
                        style: "border: 1px solid #bbb; background: {background}; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| on_jump.call(number),
                        "{number}"
                    }
                )
            })}
            button {
                style: BUTTON_STYLE,
                disabled: current_page >= total_pages,
                onclick: move |_| on_next.call(()),
                "Next"
            }
        }
    }
}

#[component]
pub fn BannerView(banner: Option<Banner>, on_dismiss: EventHandler<()>) -> Element {
    let Some(banner) = banner else {
        return rsx! {};
    };
    let (background, border) = match banner.kind {
        BannerKind::Success => ("#ebfbee", "#2f9e44"),
        BannerKind::Error => ("#fff5f5", "#e03131"),
    };
    let message = banner.message;

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 12px; margin-bottom: 12px; border: 1px solid {border}; background: {background}; border-radius: 6px;",
            span { "{message}" }
            button {
                style: "border: none; background: transparent; cursor: pointer;",
                onclick: move |_| on_dismiss.call(()),
                "x"
            }
        }
    }
}

#[component]
pub fn LoadStateView(state: LoadState, empty: bool, warnings: Vec<String>) -> Element {
    rsx! {
        {match state {
            LoadState::Loading => rsx! {
                div { style: "padding: 12px; color: #666;", "Loading..." }
            },
            LoadState::Error(message) => rsx! {
                div { style: "padding: 12px; color: #e03131;", "Failed to load: {message}" }
            },
            LoadState::Ready if empty => rsx! {
                div { style: "padding: 12px; color: #666;", "No matching records" }
            },
            LoadState::Ready => rsx! {},
        }}
        {warnings.iter().map(|warning| rsx!(
            div { style: "padding: 4px 12px; color: #e8590c;", "{warning}" }
        ))}
    }
}

/// Start and end pickers for the date-range filter.
#[component]
pub fn DateRangeFilter(
    range: Option<DateRange>,
    today: NaiveDate,
    overlay: Signal<OverlayState>,
    anchor: Signal<Option<(f64, f64)>>,
    on_change: EventHandler<Option<DateRange>>,
) -> Element {
    let start = range.map(|r| r.start());
    let end = range.map(|r| r.end()).filter(|day| Some(*day) != start);

    rsx! {
        DatePicker {
            id: OverlayId::DatePicker(DateField::RangeStart),
            label: "From",
            value: start,
            today,
            overlay,
            anchor,
            on_pick: move |day: Option<NaiveDate>| on_change.call(pick_range_start(range, day)),
        }
        DatePicker {
            id: OverlayId::DatePicker(DateField::RangeEnd),
            label: "To",
            value: end,
            today,
            overlay,
            anchor,
            on_pick: move |day: Option<NaiveDate>| on_change.call(pick_range_end(range, day)),
        }
    }
}

#[component]
pub fn SearchBox(value: String, placeholder: &'static str, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px; min-width: 220px;",
            placeholder,
            value: "{value}",
            oninput: move |event| on_input.call(event.value()),
        }
    }
}
