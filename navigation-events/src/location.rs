use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A location fix captured by the platform. Attached to feedback events as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: OffsetDateTime,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: OffsetDateTime) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }
}

/// RFC 3339 in UTC. Instants RFC 3339 cannot express (negative or five digit
/// years) are written as Unix seconds so the event still serializes.
pub fn format_sample_timestamp(instant: OffsetDateTime) -> String {
    let formatted = OffsetDateTime::from_unix_timestamp_nanos(instant.unix_timestamp_nanos())
        .ok()
        .and_then(|utc| utc.format(&Rfc3339).ok());

    formatted.unwrap_or_else(|| {
        tracing::warn!("location timestamp {} is not RFC 3339 representable", instant);
        instant.unix_timestamp().to_string()
    })
}

fn serialize_timestamp<S>(instant: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_sample_timestamp(*instant))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;
    use time::{Date, Month};

    fn before_year_zero() -> OffsetDateTime {
        Date::from_calendar_date(-1, Month::January, 1)
            .unwrap()
            .midnight()
            .assume_utc()
    }

    #[test]
    fn test_location_sample_serialization() {
        let sample = LocationSample::new(52.52, 13.405, datetime!(2024-05-01 10:00:00 UTC));

        assert_eq!(
            serde_json::to_value(&sample).unwrap(),
            json!({
                "latitude": 52.52,
                "longitude": 13.405,
                "timestamp": "2024-05-01T10:00:00Z",
            })
        );
    }

    #[test]
    fn out_of_range_coordinates_are_kept() {
        let raw = r#"{"latitude":123.0,"longitude":-500.5,"timestamp":"2024-05-01T10:00:00Z"}"#;
        let sample: LocationSample = serde_json::from_str(raw).unwrap();

        assert_eq!(sample.latitude, 123.0);
        assert_eq!(sample.longitude, -500.5);
    }

    #[test]
    fn timestamps_are_written_in_utc() {
        let sample = LocationSample::new(1.0, 2.0, datetime!(2024-01-01 0:00 +00:00:30));

        assert_eq!(
            serde_json::to_value(&sample).unwrap()["timestamp"],
            "2023-12-31T23:59:30Z"
        );
        assert_eq!(
            format_sample_timestamp(datetime!(2024-05-01 12:00:00 +2)),
            "2024-05-01T10:00:00Z"
        );
    }

    #[test]
    fn unrepresentable_timestamps_fall_back_to_unix_seconds() {
        let instant = before_year_zero();
        let sample = LocationSample::new(1.0, 2.0, instant);

        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["timestamp"], instant.unix_timestamp().to_string());
    }

    #[test]
    fn feedback_with_odd_sample_timestamps_serializes() {
        use crate::builder::{EventBuilder, FeedbackInput};
        use crate::metadata::SessionState;
        use crate::time::FixedTime;

        let builder = EventBuilder::new(
            "Linux",
            FixedTime::new(datetime!(2024-01-01 0:00 UTC)),
        );
        let session = SessionState {
            sdk_identifier: "nav-core".to_owned(),
            sdk_version: "1.0".to_owned(),
            session_identifier: "sess-123".to_owned(),
            lat: 1.0,
            lng: 2.0,
            geometry: "g".to_owned(),
            profile: "driving".to_owned(),
            estimated_distance: 10,
            estimated_duration: 20,
            reroute_count: 0,
        };
        let event = builder.build_feedback_event(
            &session,
            datetime!(2024-01-01 0:00 UTC),
            FeedbackInput {
                feedback_type: "general".to_owned(),
                locations_before: vec![LocationSample::new(
                    1.0,
                    2.0,
                    datetime!(2024-01-01 0:00 +00:00:30),
                )],
                locations_after: vec![LocationSample::new(1.0, 2.0, before_year_zero())],
                ..Default::default()
            },
        );

        assert!(event.to_json().is_ok());
    }
}
