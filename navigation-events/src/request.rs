use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;

use crate::api::EventError;
use crate::builder::{EventBuilder, FeedbackInput};
use crate::event::{EventType, NavigationEvent, RerouteDetail, RouteProgress};
use crate::location::LocationSample;
use crate::metadata::SessionState;

/// One event to build, as received from an SDK bridge:
/// `{"type": "arrive", "sdkIdentifier": "...", ..., "startTimestamp": "2024-01-01T00:00:00Z"}`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventRequest {
    Turnstile(TurnstileRequest),
    Depart(DepartRequest),
    Feedback(FeedbackRequest),
    Arrive(ArriveRequest),
    Cancel(CancelRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnstileRequest {
    pub sdk_identifier: String,
    pub sdk_version: String,
}

#[derive(Debug, Deserialize)]
pub struct DepartRequest {
    #[serde(flatten)]
    pub session: SessionState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(flatten)]
    pub session: SessionState,
    #[serde(with = "time::serde::rfc3339")]
    pub start_timestamp: OffsetDateTime,
    pub feedback_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations_before: Vec<LocationSample>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations_after: Vec<LocationSample>,
    #[serde(flatten)]
    pub progress: RouteProgress,
    #[serde(flatten)]
    pub reroute: RerouteDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArriveRequest {
    #[serde(flatten)]
    pub session: SessionState,
    #[serde(with = "time::serde::rfc3339")]
    pub start_timestamp: OffsetDateTime,
    pub distance_completed: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[serde(flatten)]
    pub session: SessionState,
    #[serde(with = "time::serde::rfc3339")]
    pub start_timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub progress: RouteProgress,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LocationSample>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LocationSample>>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventRequest {
    pub fn from_json(payload: &str) -> Result<EventRequest, EventError> {
        serde_json::from_str(payload).map_err(EventError::RequestParsingError)
    }

    pub fn event_type(&self) -> EventType {
        match self {
            EventRequest::Turnstile(_) => EventType::Turnstile,
            EventRequest::Depart(_) => EventType::Depart,
            EventRequest::Feedback(_) => EventType::Feedback,
            EventRequest::Arrive(_) => EventType::Arrive,
            EventRequest::Cancel(_) => EventType::Cancel,
        }
    }

    pub fn build(self, builder: &EventBuilder) -> NavigationEvent {
        match self {
            EventRequest::Turnstile(req) => {
                builder.build_turnstile_event(&req.sdk_identifier, &req.sdk_version)
            }
            EventRequest::Depart(req) => builder.build_depart_event(&req.session),
            EventRequest::Feedback(req) => builder.build_feedback_event(
                &req.session,
                req.start_timestamp,
                FeedbackInput {
                    feedback_type: req.feedback_type,
                    locations_before: req.locations_before,
                    locations_after: req.locations_after,
                    progress: req.progress,
                    reroute: req.reroute,
                },
            ),
            EventRequest::Arrive(req) => builder.build_arrive_event(
                &req.session,
                req.start_timestamp,
                req.distance_completed,
            ),
            EventRequest::Cancel(req) => {
                builder.build_cancel_event(&req.session, req.start_timestamp, req.progress)
            }
        }
    }
}
