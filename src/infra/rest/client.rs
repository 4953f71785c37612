//! Blocking REST client for the organizer backend.
//!
//! Wraps the backend's JSON endpoints using [`reqwest::blocking`]; callers
//! run it off the UI thread.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::domain::entities::record::{EventPayload, RawAttendee, RawEvent, RawOrder};
use crate::usecase::ports::backend::{BackendError, OrganizerBackend};

pub struct RestBackend {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl RestBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let api_url = Url::parse(&config.api_url).map_err(|err| {
            BackendError::Message(format!("invalid API url {}: {err}", config.api_url))
        })?;
        endpoint(&api_url, &[])?;
        Ok(Self {
            client,
            api_url,
            token: config.api_token.clone(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        endpoint(&self.api_url, segments)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = ensure_success(self.authorize(request).send()?)?;
        Ok(response.json::<T>()?)
    }

    fn send(&self, request: RequestBuilder) -> Result<(), BackendError> {
        ensure_success(self.authorize(request).send()?)?;
        Ok(())
    }
}

/// Appends path segments to the API base, percent-encoding each one so an
/// id cannot change which endpoint is hit.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, BackendError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| BackendError::Message(format!("{base} cannot be used as an API base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turns a non-2xx response into [`BackendError::Api`], preferring the
/// `message` field of a JSON error body over the raw text.
fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(BackendError::Api {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

pub fn error_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty());

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("request failed with status {status}"),
    }
}

impl OrganizerBackend for RestBackend {
    fn get_events(&self, organizer_id: &str) -> Result<Vec<RawEvent>, BackendError> {
        self.get_json(
            self.client
                .get(self.url(&["events"])?)
                .query(&[("organizerId", organizer_id)]),
        )
    }

    fn get_attendees_by_event(&self, event_id: &str) -> Result<Vec<RawAttendee>, BackendError> {
        self.get_json(
            self.client
                .get(self.url(&["events", event_id, "attendees"])?),
        )
    }

    fn check_in_attendee(&self, ticket_id: &str, event_id: &str) -> Result<(), BackendError> {
        self.send(
            self.client
                .post(self.url(&["events", event_id, "check-in"])?)
                .json(&serde_json::json!({ "ticketId": ticket_id, "eventId": event_id })),
        )
    }

    fn get_orders(&self) -> Result<Vec<RawOrder>, BackendError> {
        self.get_json(self.client.get(self.url(&["orders"])?))
    }

    fn create_event(&self, payload: &EventPayload) -> Result<RawEvent, BackendError> {
        self.get_json(self.client.post(self.url(&["events"])?).json(payload))
    }

    fn update_event(&self, id: &str, payload: &EventPayload) -> Result<(), BackendError> {
        self.send(
            self.client
                .put(self.url(&["events", id])?)
                .json(payload),
        )
    }

    fn publish_event(&self, id: &str) -> Result<(), BackendError> {
        self.send(
            self.client
                .post(self.url(&["events", id, "publish"])?),
        )
    }

    fn delete_event(&self, id: &str) -> Result<(), BackendError> {
        self.send(self.client.delete(self.url(&["events", id])?))
    }

    fn refund_order(&self, id: &str) -> Result<(), BackendError> {
        self.send(
            self.client
                .post(self.url(&["orders", id, "refund"])?),
        )
    }

    fn cancel_order(&self, id: &str) -> Result<(), BackendError> {
        self.send(
            self.client
                .post(self.url(&["orders", id, "cancel"])?),
        )
    }

    fn delete_order(&self, id: &str) -> Result<(), BackendError> {
        self.send(self.client.delete(self.url(&["orders", id])?))
    }
}
