use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::entities::record::{EventPayload, TicketTierPayload};
use crate::domain::entities::row::EventRow;

pub const EVENT_CATEGORIES: [&str; 6] = [
    "Conference",
    "Concert",
    "Workshop",
    "Festival",
    "Sports",
    "Meetup",
];

/// Field name to human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketTierDraft {
    pub name: String,
    pub price: String,
    pub capacity: String,
}

/// Raw text of the create-event form, one field per input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub venue: String,
    pub banner_url: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub tiers: Vec<TicketTierDraft>,
}

impl EventDraft {
    pub fn blank() -> Self {
        Self {
            tiers: vec![TicketTierDraft::default()],
            ..Self::default()
        }
    }

    pub fn from_row(row: &EventRow) -> Self {
        let (start_date, start_time) = split_timestamp(row.start_at);
        let (end_date, end_time) = split_timestamp(row.end_at);
        Self {
            title: row.title.clone(),
            description: row.description.clone(),
            category: row.category.clone(),
            venue: row.venue.clone(),
            banner_url: row.banner_url.clone(),
            start_date,
            start_time,
            end_date,
            end_time,
            tiers: row
                .tiers
                .iter()
                .map(|tier| TicketTierDraft {
                    name: tier.name.clone(),
                    price: format!("{:.2}", tier.price),
                    capacity: tier.capacity.to_string(),
                })
                .collect(),
        }
    }
}

fn split_timestamp(value: Option<DateTime<Utc>>) -> (String, String) {
    value
        .map(|ts| (ts.format("%Y-%m-%d").to_string(), ts.format("%H:%M").to_string()))
        .unwrap_or_default()
}

pub fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn parse_moment(date: &str, time: &str) -> Result<DateTime<Utc>, &'static str> {
    if date.trim().is_empty() {
        return Err("date is required");
    }
    let day = parse_day(date).ok_or("date must be YYYY-MM-DD")?;
    let time = if time.trim().is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| "time must be HH:MM")?
    };
    Ok(day.and_time(time).and_utc())
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
    trimmed.to_string()
}

/// Checks every field and either returns the payload ready for the backend
/// or the full set of field-level messages.
pub fn validate_event_draft(draft: &EventDraft) -> Result<EventPayload, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = require(&mut errors, "title", &draft.title, "Event title is required");
    let category = require(&mut errors, "category", &draft.category, "Choose a category");
    let venue = require(&mut errors, "venue", &draft.venue, "Venue is required");

    let start_at = parse_moment(&draft.start_date, &draft.start_time)
        .map_err(|message| errors.insert("start".to_string(), format!("Start {message}")))
        .ok();
    let end_at = parse_moment(&draft.end_date, &draft.end_time)
        .map_err(|message| errors.insert("end".to_string(), format!("End {message}")))
        .ok();
    if let (Some(start), Some(end)) = (start_at, end_at) {
        if end <= start {
            errors.insert("end".to_string(), "End must be after start".to_string());
        }
    }

    if draft.tiers.is_empty() {
        errors.insert(
            "tiers".to_string(),
            "Add at least one ticket tier".to_string(),
        );
    }

    let mut seen_names = BTreeSet::new();
    let mut tiers = Vec::with_capacity(draft.tiers.len());
    for (idx, tier) in draft.tiers.iter().enumerate() {
        let name = require(
            &mut errors,
            &format!("tiers[{idx}].name"),
            &tier.name,
            "Tier name is required",
        );
        if !name.is_empty() && !seen_names.insert(name.to_lowercase()) {
            errors.insert(
                format!("tiers[{idx}].name"),
                "Tier names must be unique".to_string(),
            );
        }

        let price = match tier.price.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
            _ => {
                errors.insert(
                    format!("tiers[{idx}].price"),
                    "Price must be a number of at least 0".to_string(),
                );
                None
            }
        };
        let capacity = match tier.capacity.trim().parse::<u32>() {
            Ok(value) if value > 0 => Some(value),
            _ => {
                errors.insert(
                    format!("tiers[{idx}].capacity"),
                    "Capacity must be a whole number above 0".to_string(),
                );
                None
            }
        };

        if let (Some(price), Some(capacity)) = (price, capacity) {
            tiers.push(TicketTierPayload {
                name: name.clone(),
                price,
                capacity,
            });
        }
    }

    match (start_at, end_at) {
        (Some(start_at), Some(end_at)) if errors.is_empty() => Ok(EventPayload {
            title,
            description: draft.description.trim().to_string(),
            category,
            venue,
            start_at,
            end_at,
            banner_url: Some(draft.banner_url.trim().to_string()).filter(|url| !url.is_empty()),
            ticket_tiers: tiers,
        }),
        _ => Err(errors),
    }
}
