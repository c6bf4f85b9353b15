use std::sync::Arc;

use metrics::counter;
use time::OffsetDateTime;

use crate::config::Config;
use crate::event::{
    ArriveEvent, CancelEvent, DepartEvent, EventType, FeedbackEvent, FeedbackKind,
    NavigationEvent, RerouteDetail, RouteProgress, TurnstileEvent,
};
use crate::location::LocationSample;
use crate::metadata::{Metadata, SessionState};
use crate::time::{SystemTime, TimeSource};

/// Inputs of a feedback event beyond the session itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackInput {
    pub feedback_type: String,
    pub locations_before: Vec<LocationSample>,
    pub locations_after: Vec<LocationSample>,
    pub progress: RouteProgress,
    /// Dropped unless `feedback_type` is `reroute`.
    pub reroute: RerouteDetail,
}

/// Builds navigation telemetry events.
///
/// Every builder is total: inputs are copied into the event without validation,
/// and no state is kept between calls. The only outside calls made are to the
/// time source, for `created` and `startTimestamp`.
#[derive(Clone)]
pub struct EventBuilder {
    operating_system: String,
    timesource: Arc<dyn TimeSource + Send + Sync>,
}

impl EventBuilder {
    pub fn new<T: TimeSource + Send + Sync + 'static>(
        operating_system: impl Into<String>,
        timesource: T,
    ) -> Self {
        Self {
            operating_system: operating_system.into(),
            timesource: Arc::new(timesource),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.operating_system(), SystemTime {})
    }

    pub fn operating_system(&self) -> &str {
        &self.operating_system
    }

    /// Fields shared by every session event. `created` is always "now".
    pub fn build_metadata(&self, session: &SessionState) -> Metadata {
        Metadata::new(&self.operating_system, session, self.timesource.format(None))
    }

    pub fn build_turnstile_event(
        &self,
        sdk_identifier: &str,
        sdk_version: &str,
    ) -> NavigationEvent {
        track(EventType::Turnstile);
        NavigationEvent::Turnstile(TurnstileEvent {
            operating_system: self.operating_system.clone(),
            sdk_identifier: sdk_identifier.to_owned(),
            sdk_version: sdk_version.to_owned(),
        })
    }

    pub fn build_depart_event(&self, session: &SessionState) -> NavigationEvent {
        track(EventType::Depart);
        NavigationEvent::Depart(DepartEvent {
            metadata: self.build_metadata(session),
        })
    }

    pub fn build_feedback_event(
        &self,
        session: &SessionState,
        start_timestamp: OffsetDateTime,
        input: FeedbackInput,
    ) -> NavigationEvent {
        track(EventType::Feedback);

        let feedback = FeedbackKind::from_parts(&input.feedback_type, input.reroute);
        if feedback.reroute().is_none() && input.reroute != RerouteDetail::default() {
            tracing::debug!(
                feedback_type = input.feedback_type.as_str(),
                "dropping reroute details from non-reroute feedback"
            );
        }

        NavigationEvent::Feedback(FeedbackEvent {
            metadata: self.build_metadata(session),
            start_timestamp: self.timesource.format(Some(start_timestamp)),
            feedback,
            locations_before: input.locations_before,
            locations_after: input.locations_after,
            progress: input.progress,
        })
    }

    pub fn build_arrive_event(
        &self,
        session: &SessionState,
        start_timestamp: OffsetDateTime,
        distance_completed: u32,
    ) -> NavigationEvent {
        track(EventType::Arrive);
        NavigationEvent::Arrive(ArriveEvent {
            metadata: self.build_metadata(session),
            start_timestamp: self.timesource.format(Some(start_timestamp)),
            distance_completed,
        })
    }

    pub fn build_cancel_event(
        &self,
        session: &SessionState,
        start_timestamp: OffsetDateTime,
        progress: RouteProgress,
    ) -> NavigationEvent {
        track(EventType::Cancel);
        NavigationEvent::Cancel(CancelEvent {
            metadata: self.build_metadata(session),
            start_timestamp: self.timesource.format(Some(start_timestamp)),
            progress,
        })
    }
}

fn track(event_type: EventType) {
    tracing::debug!(event = event_type.name(), "building navigation event");
    counter!("navigation_events_built_total", "event" => event_type.name()).increment(1);
}
