use serde::{Deserialize, Serialize, Serializer};

use crate::utils::new_session_identifier;

/// Version stamped on every session event.
pub const EVENT_VERSION: u32 = 1;

/// What the navigation SDK knows about the running session when an event is built.
/// Values are carried into the event untouched.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub sdk_identifier: String,
    pub sdk_version: String,
    #[serde(default = "new_session_identifier")]
    pub session_identifier: String,
    pub lat: f64,
    pub lng: f64,
    pub geometry: String,
    pub profile: String,
    pub estimated_distance: u32,
    pub estimated_duration: u32,
    #[serde(default)]
    pub reroute_count: u32,
}

/// Fields shared by every event except the turnstile ping.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub operating_system: String,
    pub sdk_identifier: String,
    pub sdk_version: String,
    pub event_version: u32,
    pub session_identifier: String,
    #[serde(serialize_with = "serialize_coordinate")]
    pub lat: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub lng: f64,
    pub geometry: String,
    pub created: String,
    pub profile: String,
    pub estimated_distance: u32,
    pub estimated_duration: u32,
    pub reroute_count: u32,
}

impl Metadata {
    pub fn new(operating_system: &str, session: &SessionState, created: String) -> Self {
        Metadata {
            operating_system: operating_system.to_owned(),
            sdk_identifier: session.sdk_identifier.clone(),
            sdk_version: session.sdk_version.clone(),
            event_version: EVENT_VERSION,
            session_identifier: session.session_identifier.clone(),
            lat: session.lat,
            lng: session.lng,
            geometry: session.geometry.clone(),
            created,
            profile: session.profile.clone(),
            estimated_distance: session.estimated_distance,
            estimated_duration: session.estimated_duration,
            reroute_count: session.reroute_count,
        }
    }
}

/// NaN and infinities have no JSON number form and are written as `null`.
fn serialize_coordinate<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        tracing::warn!(value = %value, "non-finite coordinate serialized as null");
    }
    serializer.serialize_f64(*value)
}
