use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::form::{validate_event_draft, EventDraft, FieldErrors};
use crate::domain::entities::row::EventRow;
use crate::usecase::pipeline::adapter::{adapt_event, derive_event_status};
use crate::usecase::ports::backend::{BackendError, OrganizerBackend};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("please fix the highlighted fields")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The event exists on the backend as a draft; only publishing failed.
    #[error("saved as a draft, but publishing failed: {source}")]
    PublishFailed {
        created: Box<EventRow>,
        source: BackendError,
    },
}

/// Which form button was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    Draft,
    Publish,
    Update,
}

/// Writes from the create/edit event form. Validation happens before any
/// backend call.
pub struct EditService {
    backend: Arc<dyn OrganizerBackend>,
}

impl EditService {
    pub fn new(backend: Arc<dyn OrganizerBackend>) -> Self {
        Self { backend }
    }

    /// Creates the event as a draft and returns its row.
    pub fn create_event(
        &self,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> Result<EventRow, SubmitError> {
        let payload = validate_event_draft(draft).map_err(SubmitError::Invalid)?;
        let created = self.backend.create_event(&payload)?;
        tracing::info!(event_id = %created.id, title = %payload.title, "event created");
        Ok(adapt_event(&created, now))
    }

    pub fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), SubmitError> {
        let payload = validate_event_draft(draft).map_err(SubmitError::Invalid)?;
        self.backend.update_event(id, &payload)?;
        tracing::info!(event_id = %id, "event updated");
        Ok(())
    }

    /// Saves the form and publishes in one go. A publish failure after a
    /// successful save hands back the created draft so a retry can publish
    /// it instead of creating it again.
    pub fn create_and_publish(
        &self,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> Result<EventRow, SubmitError> {
        let created = self.create_event(draft, now)?;
        if let Err(source) = self.backend.publish_event(&created.id) {
            tracing::warn!(event_id = %created.id, error = %source, "publish after create failed");
            return Err(SubmitError::PublishFailed {
                created: Box::new(created),
                source,
            });
        }
        tracing::info!(event_id = %created.id, "event published");
        Ok(EventRow {
            status: derive_event_status(None, created.start_at, created.end_at, now),
            ..created
        })
    }

    pub fn update_and_publish(&self, id: &str, draft: &EventDraft) -> Result<(), SubmitError> {
        self.update_event(id, draft)?;
        self.backend.publish_event(id)?;
        tracing::info!(event_id = %id, "event published");
        Ok(())
    }

    /// Routes a form submission. An event that already exists is only ever
    /// updated; `Some(row)` comes back when a new event was created.
    pub fn submit(
        &self,
        mode: SubmitMode,
        editing_id: Option<&str>,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<EventRow>, SubmitError> {
        match (mode, editing_id) {
            (SubmitMode::Publish, Some(id)) => self.update_and_publish(id, draft).map(|_| None),
            (SubmitMode::Publish, None) => self.create_and_publish(draft, now).map(Some),
            (_, Some(id)) => self.update_event(id, draft).map(|_| None),
            (_, None) => self.create_event(draft, now).map(Some),
        }
    }
}
