use crate::domain::entities::record::{EventPayload, RawAttendee, RawEvent, RawOrder};

/// Failure of a backend call. `Display` is the text shown to the organizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Message(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("background task failed: {0}")]
    Worker(String),
}

/// REST collaborator the dashboard reads from and writes through.
pub trait OrganizerBackend: Send + Sync {
    fn get_events(&self, organizer_id: &str) -> Result<Vec<RawEvent>, BackendError>;
    fn get_attendees_by_event(&self, event_id: &str) -> Result<Vec<RawAttendee>, BackendError>;
    fn check_in_attendee(&self, ticket_id: &str, event_id: &str) -> Result<(), BackendError>;
    fn get_orders(&self) -> Result<Vec<RawOrder>, BackendError>;

    fn create_event(&self, payload: &EventPayload) -> Result<RawEvent, BackendError>;
    fn update_event(&self, id: &str, payload: &EventPayload) -> Result<(), BackendError>;
    fn publish_event(&self, id: &str) -> Result<(), BackendError>;
    fn delete_event(&self, id: &str) -> Result<(), BackendError>;

    fn refund_order(&self, id: &str) -> Result<(), BackendError>;
    fn cancel_order(&self, id: &str) -> Result<(), BackendError>;
    fn delete_order(&self, id: &str) -> Result<(), BackendError>;
}
