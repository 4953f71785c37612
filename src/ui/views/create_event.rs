use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;

use crate::domain::entities::form::{
    parse_day, EventDraft, FieldErrors, TicketTierDraft, EVENT_CATEGORIES,
};
use crate::domain::entities::row::{EventRow, EventStatus};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::{DatePicker, DropdownOption, DropdownSelect, BUTTON_STYLE};
use crate::ui::state::app_state::{AppState, NavTab};
use crate::ui::state::overlay::{DateField, OverlayId};
use crate::ui::views::today;
use crate::usecase::services::edit_service::{SubmitError, SubmitMode};
use crate::usecase::services::Services;

const INPUT_STYLE: &str = "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px; width: 100%; box-sizing: border-box;";
const SECTION_STYLE: &str =
    "border: 1px solid #ddd; border-radius: 8px; padding: 12px; background: #fff; display: flex; flex-direction: column; gap: 10px;";

pub fn category_choices() -> Vec<DropdownOption> {
    EVENT_CATEGORIES
        .iter()
        .map(|category| DropdownOption::new(*category, *category))
        .collect()
}

fn format_day(day: Option<NaiveDate>) -> String {
    day.map(|day| day.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[component]
fn TextField(
    label: &'static str,
    value: String,
    error: Option<String>,
    placeholder: &'static str,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { style: "display: flex; flex-direction: column; gap: 4px;",
            span { style: "font-weight: 600;", "{label}" }
            input {
                style: INPUT_STYLE,
                placeholder,
                value: "{value}",
                oninput: move |event| on_input.call(event.value()),
            }
            if let Some(message) = error {
                span { style: "color: #e03131; font-size: 12px;", "{message}" }
            }
        }
    }
}

#[component]
pub fn CreateEventView() -> Element {
    let services = use_context::<Services>();
    let AppState {
        mut active_tab,
        overlay,
        anchor,
        mut editing_event,
        ..
    } = use_context::<AppState>();

    let editing = editing_event();
    let editing_for_init = editing.clone();
    let mut draft = use_signal(move || {
        editing_for_init
            .as_ref()
            .map(EventDraft::from_row)
            .unwrap_or_else(EventDraft::blank)
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut notice = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let form = draft();
    let field_errors = errors();
    let error_for = move |key: &str| field_errors.get(key).cloned();
    let today = today();
    let editing_draft = editing
        .as_ref()
        .is_some_and(|row| row.status == EventStatus::Draft);
    let heading = if editing.is_some() {
        "Edit event"
    } else {
        "Create event"
    };

    let edit_service = services.edits.clone();
    let submit = use_callback(move |mode: SubmitMode| {
        if submitting() {
            return;
        }
        submitting.set(true);
        notice.set(None);
        let snapshot = draft();
        let edits = edit_service.clone();
        let editing_id = editing_event().map(|row: EventRow| row.id);
        spawn(async move {
            let result = run_blocking(move || {
                Ok(edits.submit(mode, editing_id.as_deref(), &snapshot, Utc::now()))
            })
            .await;
            submitting.set(false);

            match result {
                Ok(Ok(_)) => {
                    errors.set(FieldErrors::new());
                    draft.set(EventDraft::blank());
                    editing_event.set(None);
                    active_tab.set(NavTab::Events);
                }
                Ok(Err(SubmitError::Invalid(field_errors))) => {
                    notice.set(Some("Please fix the highlighted fields".to_string()));
                    errors.set(field_errors);
                }
                Ok(Err(SubmitError::PublishFailed { created, source })) => {
                    tracing::warn!(event_id = %created.id, error = %source, "event saved but not published");
                    errors.set(FieldErrors::new());
                    notice.set(Some(format!(
                        "Saved as a draft, but publishing failed: {source}. Publish again to retry."
                    )));
                    editing_event.set(Some(*created));
                }
                Ok(Err(SubmitError::Backend(err))) | Err(err) => {
                    tracing::warn!(error = %err, "event save failed");
                    errors.set(FieldErrors::new());
                    notice.set(Some(err.to_string()));
                }
            }
        });
    });

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; max-width: 760px;",
            h2 { "{heading}" }

            if let Some(message) = notice() {
                div { style: "padding: 8px 12px; border: 1px solid #e03131; background: #fff5f5; border-radius: 6px;",
                    "{message}"
                }
            }

            div { style: SECTION_STYLE,
                h3 { "Basics" }
                TextField {
                    label: "Title",
                    value: form.title.clone(),
                    error: error_for("title"),
                    placeholder: "Summer Music Night",
                    on_input: move |value: String| draft.write().title = value,
                }
                label { style: "display: flex; flex-direction: column; gap: 4px;",
                    span { style: "font-weight: 600;", "Description" }
                    textarea {
                        style: "{INPUT_STYLE} min-height: 80px;",
                        value: "{form.description}",
                        oninput: move |event| draft.write().description = event.value(),
                    }
                }
                DropdownSelect {
                    id: OverlayId::Category,
                    label: "Category",
                    options: category_choices(),
                    selected: Some(form.category.clone()).filter(|category| !category.is_empty()),
                    overlay,
                    anchor,
                    on_select: move |value: String| draft.write().category = value,
                }
                if let Some(message) = error_for("category") {
                    span { style: "color: #e03131; font-size: 12px;", "{message}" }
                }
                TextField {
                    label: "Banner image URL",
                    value: form.banner_url.clone(),
                    error: None,
                    placeholder: "https://",
                    on_input: move |value: String| draft.write().banner_url = value,
                }
            }

            div { style: SECTION_STYLE,
                h3 { "Date and venue" }
                div { style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                    DatePicker {
                        id: OverlayId::DatePicker(DateField::EventStart),
                        label: "Starts",
                        value: parse_day(&form.start_date),
                        today,
                        overlay,
                        anchor,
                        on_pick: move |day: Option<NaiveDate>| draft.write().start_date = format_day(day),
                    }
                    input {
                        style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px; width: 80px;",
                        placeholder: "HH:MM",
                        value: "{form.start_time}",
                        oninput: move |event| draft.write().start_time = event.value(),
                    }
                    DatePicker {
                        id: OverlayId::DatePicker(DateField::EventEnd),
                        label: "Ends",
                        value: parse_day(&form.end_date),
                        today,
                        overlay,
                        anchor,
                        on_pick: move |day: Option<NaiveDate>| draft.write().end_date = format_day(day),
                    }
                    input {
                        style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px; width: 80px;",
                        placeholder: "HH:MM",
                        value: "{form.end_time}",
                        oninput: move |event| draft.write().end_time = event.value(),
                    }
                }
                if let Some(message) = error_for("start") {
                    span { style: "color: #e03131; font-size: 12px;", "{message}" }
                }
                if let Some(message) = error_for("end") {
                    span { style: "color: #e03131; font-size: 12px;", "{message}" }
                }
                TextField {
                    label: "Venue",
                    value: form.venue.clone(),
                    error: error_for("venue"),
                    placeholder: "Hall A, City Convention Center",
                    on_input: move |value: String| draft.write().venue = value,
                }
            }

            div { style: SECTION_STYLE,
                h3 { "Tickets" }
                if let Some(message) = error_for("tiers") {
                    span { style: "color: #e03131; font-size: 12px;", "{message}" }
                }
                {form.tiers.iter().enumerate().map(|(idx, tier)| {
                    let name_error = error_for(&format!("tiers[{idx}].name"));
                    let price_error = error_for(&format!("tiers[{idx}].price"));
                    let capacity_error = error_for(&format!("tiers[{idx}].capacity"));
                    rsx!(
                        div { style: "display: grid; grid-template-columns: 2fr 1fr 1fr auto; gap: 8px; align-items: start;",
                            TextField {
                                label: "Tier name",
                                value: tier.name.clone(),
                                error: name_error,
                                placeholder: "General",
                                on_input: move |value: String| {
                                    if let Some(tier) = draft.write().tiers.get_mut(idx) {
                                        tier.name = value;
                                    }
                                },
                            }
                            TextField {
                                label: "Price",
                                value: tier.price.clone(),
                                error: price_error,
                                placeholder: "0.00",
                                on_input: move |value: String| {
                                    if let Some(tier) = draft.write().tiers.get_mut(idx) {
                                        tier.price = value;
                                    }
                                },
                            }
                            TextField {
                                label: "Capacity",
                                value: tier.capacity.clone(),
                                error: capacity_error,
                                placeholder: "100",
                                on_input: move |value: String| {
                                    if let Some(tier) = draft.write().tiers.get_mut(idx) {
                                        tier.capacity = value;
                                    }
                                },
                            }
                            button {
                                style: "{BUTTON_STYLE} margin-top: 22px;",
                                onclick: move |_| {
                                    let mut form = draft.write();
                                    if idx < form.tiers.len() {
                                        form.tiers.remove(idx);
                                    }
                                },
                                "Remove"
                            }
                        }
                    )
                })}
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| draft.write().tiers.push(TicketTierDraft::default()),
                    "Add tier"
                }
            }

            div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                if editing.is_some() {
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| {
                            editing_event.set(None);
                            draft.set(EventDraft::blank());
                            errors.set(FieldErrors::new());
                            active_tab.set(NavTab::Events);
                        },
                        "Cancel"
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: submitting(),
                        onclick: move |_| submit.call(SubmitMode::Update),
                        "Save changes"
                    }
                    if editing_draft {
                        button {
                            style: BUTTON_STYLE,
                            disabled: submitting(),
                            onclick: move |_| submit.call(SubmitMode::Publish),
                            "Save and publish"
                        }
                    }
                } else {
                    button {
                        style: BUTTON_STYLE,
                        disabled: submitting(),
                        onclick: move |_| submit.call(SubmitMode::Draft),
                        "Save draft"
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: submitting(),
                        onclick: move |_| submit.call(SubmitMode::Publish),
                        "Create and publish"
                    }
                }
            }
        }
    }
}
