use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::row::{AttendeeRow, EventRow, OrderRow, OrderStatus, RowUpdate};
use crate::usecase::pipeline::adapter::derive_event_status;
use crate::usecase::ports::backend::{BackendError, OrganizerBackend};

/// Row-level actions. Each one calls the backend first and only describes
/// the local change once the call succeeded.
pub struct ActionService {
    backend: Arc<dyn OrganizerBackend>,
}

impl ActionService {
    pub fn new(backend: Arc<dyn OrganizerBackend>) -> Self {
        Self { backend }
    }

    pub fn check_in(&self, row: &AttendeeRow) -> Result<RowUpdate<AttendeeRow>, BackendError> {
        if row.checked_in {
            return Err(BackendError::Message(format!(
                "{} is already checked in",
                row.name
            )));
        }
        self.backend
            .check_in_attendee(&row.ticket_id, &row.event_id)?;
        tracing::info!(ticket_id = %row.ticket_id, event_id = %row.event_id, "attendee checked in");
        Ok(RowUpdate::Replace(row.with_checked_in()))
    }

    pub fn publish_event(
        &self,
        row: &EventRow,
        now: DateTime<Utc>,
    ) -> Result<RowUpdate<EventRow>, BackendError> {
        self.backend.publish_event(&row.id)?;
        tracing::info!(event_id = %row.id, "event published");
        let status = derive_event_status(None, row.start_at, row.end_at, now);
        Ok(RowUpdate::Replace(EventRow {
            status,
            ..row.clone()
        }))
    }

    pub fn delete_event(&self, row: &EventRow) -> Result<RowUpdate<EventRow>, BackendError> {
        self.backend.delete_event(&row.id)?;
        tracing::info!(event_id = %row.id, "event deleted");
        Ok(RowUpdate::Remove)
    }

    pub fn refund_order(&self, row: &OrderRow) -> Result<RowUpdate<OrderRow>, BackendError> {
        ensure_settleable(row)?;
        self.backend.refund_order(&row.id)?;
        tracing::info!(order_id = %row.id, total = row.total, "order refunded");
        Ok(RowUpdate::Replace(row.with_status(OrderStatus::Refunded)))
    }

    pub fn cancel_order(&self, row: &OrderRow) -> Result<RowUpdate<OrderRow>, BackendError> {
        ensure_settleable(row)?;
        self.backend.cancel_order(&row.id)?;
        tracing::info!(order_id = %row.id, "order cancelled");
        Ok(RowUpdate::Replace(row.with_status(OrderStatus::Cancelled)))
    }

    pub fn delete_order(&self, row: &OrderRow) -> Result<RowUpdate<OrderRow>, BackendError> {
        self.backend.delete_order(&row.id)?;
        tracing::info!(order_id = %row.id, "order deleted");
        Ok(RowUpdate::Remove)
    }
}

fn ensure_settleable(row: &OrderRow) -> Result<(), BackendError> {
    if row.status.is_settleable() {
        Ok(())
    } else {
        Err(BackendError::Message(format!(
            "Order {} is already {}",
            row.id,
            row.status.as_str()
        )))
    }
}
