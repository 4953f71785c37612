use chrono::{DateTime, Utc};

pub const FACET_STATUS: &str = "status";
pub const FACET_CATEGORY: &str = "category";
pub const FACET_TICKET_TYPE: &str = "ticket_type";
pub const FACET_CHECK_IN: &str = "check_in";

pub const CHECKED_IN: &str = "checked_in";
pub const NOT_CHECKED_IN: &str = "not_checked_in";

/// A display-ready record that the list pipeline can search, filter, sort
/// and page over.
pub trait ListRow: Clone {
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Value of the named facet group, or `None` when the row has no such
    /// field.
    fn facet(&self, group: &str) -> Option<&str>;

    fn timestamp(&self) -> Option<DateTime<Utc>>;

    /// Lowercased concatenation of every field the search box matches.
    fn search_surface(&self) -> &str;

    fn assoc_id(&self) -> Option<&str> {
        None
    }

    fn export_headers() -> &'static [&'static str];

    fn export_record(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventStatus {
    Draft,
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 5] = [
        EventStatus::Draft,
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Completed,
    Pending,
    Refunded,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 4] = [
        OrderStatus::Completed,
        OrderStatus::Pending,
        OrderStatus::Refunded,
        OrderStatus::Cancelled,
    ];

    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "completed" | "paid" => OrderStatus::Completed,
            "pending" => OrderStatus::Pending,
            "refunded" => OrderStatus::Refunded,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Pending => "pending",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value.as_str(),
        }
    }

    /// Refund and cancel only make sense while money is still held.
    pub fn is_settleable(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketTier {
    pub name: String,
    pub price: f64,
    pub capacity: u32,
    pub sold: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: EventStatus,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub venue: String,
    pub banner_url: String,
    pub description: String,
    pub tiers: Vec<TicketTier>,
    pub search_text: String,
}

impl EventRow {
    pub fn tickets_sold(&self) -> u32 {
        self.tiers
            .iter()
            .fold(0_u32, |total, tier| total.saturating_add(tier.sold))
    }

    pub fn capacity(&self) -> u32 {
        self.tiers
            .iter()
            .fold(0_u32, |total, tier| total.saturating_add(tier.capacity))
    }
}

impl ListRow for EventRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn facet(&self, group: &str) -> Option<&str> {
        match group {
            FACET_STATUS => Some(self.status.as_str()),
            FACET_CATEGORY => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_at
    }

    fn search_surface(&self) -> &str {
        &self.search_text
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "id", "title", "category", "status", "start_at", "end_at", "venue", "sold", "capacity",
        ]
    }

    fn export_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.category.clone(),
            self.status.as_str().to_string(),
            format_timestamp(self.start_at),
            format_timestamp(self.end_at),
            self.venue.clone(),
            self.tickets_sold().to_string(),
            self.capacity().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeRow {
    pub ticket_id: String,
    pub event_id: String,
    pub event_name: String,
    pub name: String,
    pub email: String,
    pub photo_url: String,
    pub ticket_type: String,
    pub checked_in: bool,
    pub purchased_at: Option<DateTime<Utc>>,
    pub search_text: String,
}

impl AttendeeRow {
    pub fn check_in_state(&self) -> &'static str {
        if self.checked_in {
            CHECKED_IN
        } else {
            NOT_CHECKED_IN
        }
    }

    pub fn with_checked_in(&self) -> AttendeeRow {
        AttendeeRow {
            checked_in: true,
            ..self.clone()
        }
    }
}

impl ListRow for AttendeeRow {
    fn id(&self) -> &str {
        &self.ticket_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facet(&self, group: &str) -> Option<&str> {
        match group {
            FACET_TICKET_TYPE => Some(self.ticket_type.as_str()),
            FACET_CHECK_IN => Some(self.check_in_state()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.purchased_at
    }

    fn search_surface(&self) -> &str {
        &self.search_text
    }

    fn assoc_id(&self) -> Option<&str> {
        Some(&self.event_id)
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "ticket_id",
            "event",
            "name",
            "email",
            "ticket_type",
            "checked_in",
            "purchased_at",
        ]
    }

    fn export_record(&self) -> Vec<String> {
        vec![
            self.ticket_id.clone(),
            self.event_name.clone(),
            self.name.clone(),
            self.email.clone(),
            self.ticket_type.clone(),
            self.checked_in.to_string(),
            format_timestamp(self.purchased_at),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub event_id: String,
    pub event_name: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub ticket_type: String,
    pub quantity: u32,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub search_text: String,
}

impl OrderRow {
    pub fn with_status(&self, status: OrderStatus) -> OrderRow {
        OrderRow {
            status,
            ..self.clone()
        }
    }
}

impl ListRow for OrderRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.buyer_name
    }

    fn facet(&self, group: &str) -> Option<&str> {
        match group {
            FACET_STATUS => Some(self.status.as_str()),
            FACET_TICKET_TYPE => Some(self.ticket_type.as_str()),
            _ => None,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn search_surface(&self) -> &str {
        &self.search_text
    }

    fn assoc_id(&self) -> Option<&str> {
        Some(&self.event_id)
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "order_id",
            "event",
            "buyer",
            "email",
            "ticket_type",
            "quantity",
            "total",
            "status",
            "created_at",
        ]
    }

    fn export_record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.event_name.clone(),
            self.buyer_name.clone(),
            self.buyer_email.clone(),
            self.ticket_type.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.total),
            self.status.as_str().to_string(),
            format_timestamp(self.created_at),
        ]
    }
}

pub fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Effect of a confirmed row action on the local list.
#[derive(Debug, Clone, PartialEq)]
pub enum RowUpdate<R> {
    Replace(R),
    Remove,
}
