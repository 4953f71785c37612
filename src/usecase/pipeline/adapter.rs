use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::entities::record::{RawAttendee, RawEvent, RawOrder};
use crate::domain::entities::row::{
    AttendeeRow, EventRow, EventStatus, OrderRow, OrderStatus, TicketTier,
};
use crate::usecase::ports::backend::BackendError;

pub const PLACEHOLDER_PHOTO: &str = "assets/avatar-placeholder.png";
pub const PLACEHOLDER_BANNER: &str = "assets/banner-placeholder.png";
pub const UNTITLED_EVENT: &str = "Untitled event";
pub const UNKNOWN_EVENT: &str = "Unknown event";
pub const UNNAMED_GUEST: &str = "Guest";
pub const GENERAL_TICKET: &str = "General";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const MISSING: &str = "-";

const SEARCH_SEPARATOR: char = '\u{1f}';

pub struct AdaptContext<'a> {
    pub organizer_id: &'a str,
    pub now: DateTime<Utc>,
    pub event_name_by_id: &'a HashMap<String, String>,
}

/// Rows produced from one fetch plus the per-item problems that were
/// skipped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapted<R> {
    pub rows: Vec<R>,
    pub warnings: Vec<String>,
}

impl<R> Adapted<R> {
    pub fn complete(rows: Vec<R>) -> Self {
        Self {
            rows,
            warnings: Vec::new(),
        }
    }
}

fn text_or(value: Option<&String>, fallback: &str) -> String {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn search_surface(fields: &[&str]) -> String {
    let mut surface = String::new();
    for field in fields {
        if !surface.is_empty() {
            surface.push(SEARCH_SEPARATOR);
        }
        surface.push_str(&field.to_lowercase());
    }
    surface
}

/// A backend `draft` or `cancelled` status always wins; otherwise the
/// status follows the schedule relative to `now`.
pub fn derive_event_status(
    backend_status: Option<&str>,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> EventStatus {
    match backend_status.map(|status| status.trim().to_lowercase()).as_deref() {
        Some("draft") => return EventStatus::Draft,
        Some("cancelled") | Some("canceled") => return EventStatus::Cancelled,
        _ => {}
    }

    let Some(start_at) = start_at else {
        return EventStatus::Upcoming;
    };
    let end_at = end_at.unwrap_or(start_at);
    if now < start_at {
        EventStatus::Upcoming
    } else if now <= end_at {
        EventStatus::Ongoing
    } else {
        EventStatus::Completed
    }
}

pub fn adapt_event(raw: &RawEvent, now: DateTime<Utc>) -> EventRow {
    let title = text_or(raw.title.as_ref(), UNTITLED_EVENT);
    let category = text_or(raw.category.as_ref(), UNCATEGORIZED);
    let venue = text_or(raw.venue.as_ref(), MISSING);
    let search_text = search_surface(&[title.as_str(), category.as_str(), venue.as_str()]);

    EventRow {
        id: raw.id.clone(),
        status: derive_event_status(raw.status.as_deref(), raw.start_at, raw.end_at, now),
        start_at: raw.start_at,
        end_at: raw.end_at,
        banner_url: text_or(raw.banner_url.as_ref(), PLACEHOLDER_BANNER),
        description: raw.description.clone().unwrap_or_default(),
        tiers: raw
            .ticket_tiers
            .iter()
            .map(|tier| TicketTier {
                name: tier.name.clone(),
                price: tier.price,
                capacity: tier.capacity,
                sold: tier.sold.unwrap_or(0),
            })
            .collect(),
        title,
        category,
        venue,
        search_text,
    }
}

pub fn adapt_events(raw: &[RawEvent], ctx: &AdaptContext<'_>) -> Adapted<EventRow> {
    tracing::debug!(organizer_id = ctx.organizer_id, count = raw.len(), "adapting events");
    Adapted::complete(raw.iter().map(|event| adapt_event(event, ctx.now)).collect())
}

pub fn event_name_map(events: &[EventRow]) -> HashMap<String, String> {
    events
        .iter()
        .map(|event| (event.id.clone(), event.title.clone()))
        .collect()
}

fn adapt_attendee(
    raw: &RawAttendee,
    fallback_event_id: &str,
    ctx: &AdaptContext<'_>,
) -> AttendeeRow {
    let event_id = text_or(raw.event_id.as_ref(), fallback_event_id);
    let event_name = ctx
        .event_name_by_id
        .get(&event_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_EVENT.to_string());
    let name = text_or(raw.name.as_ref(), UNNAMED_GUEST);
    let email = text_or(raw.email.as_ref(), MISSING);
    let ticket_type = text_or(raw.ticket_type.as_ref(), GENERAL_TICKET);
    let search_text = search_surface(&[
        name.as_str(),
        email.as_str(),
        raw.ticket_id.as_str(),
        event_name.as_str(),
        ticket_type.as_str(),
    ]);

    AttendeeRow {
        ticket_id: raw.ticket_id.clone(),
        photo_url: text_or(raw.photo_url.as_ref(), PLACEHOLDER_PHOTO),
        checked_in: raw.checked_in.unwrap_or(false),
        purchased_at: raw.purchased_at,
        event_id,
        event_name,
        name,
        email,
        ticket_type,
        search_text,
    }
}

/// One batch per event. A failed batch is skipped and reported as a
/// warning; the remaining batches still produce rows.
pub fn adapt_attendee_batches(
    batches: Vec<(String, Result<Vec<RawAttendee>, BackendError>)>,
    ctx: &AdaptContext<'_>,
) -> Adapted<AttendeeRow> {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (event_id, batch) in batches {
        match batch {
            Ok(attendees) => {
                rows.extend(
                    attendees
                        .iter()
                        .map(|attendee| adapt_attendee(attendee, &event_id, ctx)),
                );
            }
            Err(err) => {
                let event_name = ctx
                    .event_name_by_id
                    .get(&event_id)
                    .map(String::as_str)
                    .unwrap_or(event_id.as_str());
                tracing::warn!(%event_id, error = %err, "skipping attendees for event");
                warnings.push(format!("Could not load attendees for {event_name}: {err}"));
            }
        }
    }

    Adapted { rows, warnings }
}

pub fn adapt_order(raw: &RawOrder, ctx: &AdaptContext<'_>) -> OrderRow {
    let event_id = text_or(raw.event_id.as_ref(), "");
    let event_name = ctx
        .event_name_by_id
        .get(&event_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_EVENT.to_string());
    let buyer_name = text_or(raw.buyer_name.as_ref(), UNNAMED_GUEST);
    let buyer_email = text_or(raw.buyer_email.as_ref(), MISSING);
    let ticket_type = text_or(raw.ticket_type.as_ref(), GENERAL_TICKET);
    let search_text = search_surface(&[
        raw.id.as_str(),
        buyer_name.as_str(),
        buyer_email.as_str(),
        event_name.as_str(),
    ]);

    OrderRow {
        id: raw.id.clone(),
        quantity: raw.quantity.unwrap_or(1),
        total: raw.total.unwrap_or(0.0),
        status: OrderStatus::parse(raw.status.as_deref().unwrap_or("pending")),
        created_at: raw.created_at,
        event_id,
        event_name,
        buyer_name,
        buyer_email,
        ticket_type,
        search_text,
    }
}

pub fn adapt_orders(raw: &[RawOrder], ctx: &AdaptContext<'_>) -> Adapted<OrderRow> {
    Adapted::complete(raw.iter().map(|order| adapt_order(order, ctx)).collect())
}
