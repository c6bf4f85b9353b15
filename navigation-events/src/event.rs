use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::api::EventError;
use crate::location::LocationSample;
use crate::metadata::Metadata;

/// The feedback type that carries reroute details.
pub const FEEDBACK_TYPE_REROUTE: &str = "reroute";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    #[serde(rename = "navigation.turnstile")]
    Turnstile,
    #[serde(rename = "navigation.depart")]
    Depart,
    #[serde(rename = "navigation.feedback")]
    Feedback,
    #[serde(rename = "navigation.arrive")]
    Arrive,
    #[serde(rename = "navigation.cancel")]
    Cancel,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Turnstile,
        EventType::Depart,
        EventType::Feedback,
        EventType::Arrive,
        EventType::Cancel,
    ];

    /// Event name as sent on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            EventType::Turnstile => "navigation.turnstile",
            EventType::Depart => "navigation.depart",
            EventType::Feedback => "navigation.feedback",
            EventType::Arrive => "navigation.arrive",
            EventType::Cancel => "navigation.cancel",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How far along the route the user is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteProgress {
    pub distance_completed: u32,
    pub distance_remaining: u32,
    pub duration_remaining: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RerouteDetail {
    pub new_distance_remaining: u32,
    pub new_duration_remaining: u32,
    pub seconds_since_last_reroute: u32,
}

/// The `feedbackType` of a feedback event. Only `reroute` feedback keeps the
/// reroute details; every other value is stored as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Reroute(RerouteDetail),
    Other(String),
}

impl FeedbackKind {
    /// Exact, case-sensitive match on `reroute`. Anything else drops `reroute`.
    pub fn from_parts(feedback_type: &str, reroute: RerouteDetail) -> Self {
        if feedback_type == FEEDBACK_TYPE_REROUTE {
            FeedbackKind::Reroute(reroute)
        } else {
            FeedbackKind::Other(feedback_type.to_owned())
        }
    }

    pub fn feedback_type(&self) -> &str {
        match self {
            FeedbackKind::Reroute(_) => FEEDBACK_TYPE_REROUTE,
            FeedbackKind::Other(feedback_type) => feedback_type,
        }
    }

    pub fn reroute(&self) -> Option<&RerouteDetail> {
        match self {
            FeedbackKind::Reroute(detail) => Some(detail),
            FeedbackKind::Other(_) => None,
        }
    }
}

impl Serialize for FeedbackKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Flattened<'a> {
            feedback_type: &'a str,
            #[serde(flatten)]
            reroute: Option<&'a RerouteDetail>,
        }

        Flattened {
            feedback_type: self.feedback_type(),
            reroute: self.reroute(),
        }
        .serialize(serializer)
    }
}

/// SDK usage ping. Carries no session context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnstileEvent {
    pub operating_system: String,
    pub sdk_identifier: String,
    pub sdk_version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartEvent {
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEvent {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub start_timestamp: String,
    #[serde(flatten)]
    pub feedback: FeedbackKind,
    pub locations_before: Vec<LocationSample>,
    pub locations_after: Vec<LocationSample>,
    #[serde(flatten)]
    pub progress: RouteProgress,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArriveEvent {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub start_timestamp: String,
    pub distance_completed: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelEvent {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub start_timestamp: String,
    #[serde(flatten)]
    pub progress: RouteProgress,
}

/// A single navigation telemetry event, serialized with its name under `event`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum NavigationEvent {
    #[serde(rename = "navigation.turnstile")]
    Turnstile(TurnstileEvent),
    #[serde(rename = "navigation.depart")]
    Depart(DepartEvent),
    #[serde(rename = "navigation.feedback")]
    Feedback(FeedbackEvent),
    #[serde(rename = "navigation.arrive")]
    Arrive(ArriveEvent),
    #[serde(rename = "navigation.cancel")]
    Cancel(CancelEvent),
}

impl NavigationEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            NavigationEvent::Turnstile(_) => EventType::Turnstile,
            NavigationEvent::Depart(_) => EventType::Depart,
            NavigationEvent::Feedback(_) => EventType::Feedback,
            NavigationEvent::Arrive(_) => EventType::Arrive,
            NavigationEvent::Cancel(_) => EventType::Cancel,
        }
    }

    /// Shared session fields, absent only for the turnstile ping.
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            NavigationEvent::Turnstile(_) => None,
            NavigationEvent::Depart(event) => Some(&event.metadata),
            NavigationEvent::Feedback(event) => Some(&event.metadata),
            NavigationEvent::Arrive(event) => Some(&event.metadata),
            NavigationEvent::Cancel(event) => Some(&event.metadata),
        }
    }

    pub fn to_json(&self) -> Result<String, EventError> {
        serde_json::to_string(self).map_err(EventError::SerializationError)
    }

    pub fn to_value(&self) -> Result<Value, EventError> {
        serde_json::to_value(self).map_err(EventError::SerializationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_names_match_serialized_names() {
        for event_type in EventType::ALL {
            assert_eq!(
                serde_json::to_value(event_type).unwrap(),
                json!(event_type.name())
            );
        }
        assert_eq!(EventType::Depart.to_string(), "navigation.depart");
    }

    #[test]
    fn feedback_kind_only_keeps_reroute_for_exact_match() {
        let detail = RerouteDetail {
            new_distance_remaining: 10,
            new_duration_remaining: 20,
            seconds_since_last_reroute: 30,
        };

        assert_eq!(
            FeedbackKind::from_parts("reroute", detail),
            FeedbackKind::Reroute(detail)
        );
        for feedback_type in ["general", "Reroute", "reroute ", "re-route", ""] {
            let kind = FeedbackKind::from_parts(feedback_type, detail);
            assert_eq!(kind, FeedbackKind::Other(feedback_type.to_owned()));
            assert_eq!(kind.feedback_type(), feedback_type);
            assert!(kind.reroute().is_none());
        }
    }

    #[test]
    fn test_feedback_kind_serialization() {
        let reroute = FeedbackKind::Reroute(RerouteDetail {
            new_distance_remaining: 1200,
            new_duration_remaining: 300,
            seconds_since_last_reroute: 45,
        });
        let other = FeedbackKind::Other("inaccurate-gps".to_owned());

        assert_eq!(
            serde_json::to_string(&reroute).unwrap(),
            r#"{"feedbackType":"reroute","newDistanceRemaining":1200,"newDurationRemaining":300,"secondsSinceLastReroute":45}"#
        );
        assert_eq!(
            serde_json::to_string(&other).unwrap(),
            r#"{"feedbackType":"inaccurate-gps"}"#
        );
    }

    #[test]
    fn test_turnstile_serialization() {
        let event = NavigationEvent::Turnstile(TurnstileEvent {
            operating_system: "Android - 13".to_owned(),
            sdk_identifier: "nav-core".to_owned(),
            sdk_version: "1.0".to_owned(),
        });

        assert_eq!(event.event_type(), EventType::Turnstile);
        assert!(event.metadata().is_none());
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"event":"navigation.turnstile","operatingSystem":"Android - 13","sdkIdentifier":"nav-core","sdkVersion":"1.0"}"#
        );
    }
}
