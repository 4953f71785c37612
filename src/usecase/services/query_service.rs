use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::row::{AttendeeRow, EventRow, OrderRow};
use crate::domain::entities::session::SessionContext;
use crate::usecase::pipeline::adapter::{
    adapt_attendee_batches, adapt_events, adapt_orders, event_name_map, AdaptContext, Adapted,
};
use crate::usecase::ports::backend::{BackendError, OrganizerBackend};

pub struct QueryService {
    backend: Arc<dyn OrganizerBackend>,
}

impl QueryService {
    pub fn new(backend: Arc<dyn OrganizerBackend>) -> Self {
        Self { backend }
    }

    pub fn load_events(
        &self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<Adapted<EventRow>, BackendError> {
        let raw = self.backend.get_events(&session.organizer_id)?;
        let names = HashMap::new();
        let ctx = AdaptContext {
            organizer_id: &session.organizer_id,
            now,
            event_name_by_id: &names,
        };
        Ok(adapt_events(&raw, &ctx))
    }

    /// Fetches every event's attendees one event at a time. Losing the event
    /// list fails the whole load; losing one event's attendees only drops
    /// that event.
    pub fn load_attendees(
        &self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<Adapted<AttendeeRow>, BackendError> {
        let events = self.load_events(session, now)?.rows;
        let names = event_name_map(&events);

        let batches = events
            .iter()
            .map(|event| {
                (
                    event.id.clone(),
                    self.backend.get_attendees_by_event(&event.id),
                )
            })
            .collect::<Vec<_>>();

        let ctx = AdaptContext {
            organizer_id: &session.organizer_id,
            now,
            event_name_by_id: &names,
        };
        Ok(adapt_attendee_batches(batches, &ctx))
    }

    /// Orders are joined with event titles; if the event list cannot be
    /// fetched the orders still load with a placeholder event name.
    pub fn load_orders(
        &self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<Adapted<OrderRow>, BackendError> {
        let raw = self.backend.get_orders()?;

        let mut warnings = Vec::new();
        let names = match self.load_events(session, now) {
            Ok(events) => event_name_map(&events.rows),
            Err(err) => {
                tracing::warn!(error = %err, "orders loaded without event names");
                warnings.push(format!("Event names unavailable: {err}"));
                HashMap::new()
            }
        };

        let ctx = AdaptContext {
            organizer_id: &session.organizer_id,
            now,
            event_name_by_id: &names,
        };
        let mut adapted = adapt_orders(&raw, &ctx);
        adapted.warnings.extend(warnings);
        Ok(adapted)
    }

    /// Events and orders together, for the overview page.
    pub fn load_overview(
        &self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<(Vec<EventRow>, Vec<OrderRow>), BackendError> {
        let events = self.load_events(session, now)?.rows;
        let names = event_name_map(&events);
        let raw_orders = self.backend.get_orders()?;
        let ctx = AdaptContext {
            organizer_id: &session.organizer_id,
            now,
            event_name_by_id: &names,
        };
        Ok((events, adapt_orders(&raw_orders, &ctx).rows))
    }
}
