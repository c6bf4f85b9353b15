use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `2017-03-01T12:00:00.000+0000`, the creation-date layout the analytics backend expects.
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory][offset_minute]"
);

pub trait TimeSource {
    fn now(&self) -> OffsetDateTime;

    /// Format `instant`, or the current time when none is given.
    fn format(&self, instant: Option<OffsetDateTime>) -> String {
        format_timestamp(instant.unwrap_or_else(|| self.now()))
    }
}

#[derive(Clone, Default)]
pub struct SystemTime {}

impl TimeSource for SystemTime {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always reports the same instant. Used for replays and tests.
#[derive(Clone, Debug)]
pub struct FixedTime {
    pub time: OffsetDateTime,
}

impl FixedTime {
    pub fn new(time: OffsetDateTime) -> Self {
        Self { time }
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> OffsetDateTime {
        self.time
    }
}

pub fn format_timestamp(instant: OffsetDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).unwrap_or_else(|err| {
        tracing::warn!("failed to format timestamp {}: {}", instant, err);
        instant.to_offset(UtcOffset::UTC).unix_timestamp().to_string()
    })
}
