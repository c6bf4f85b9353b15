use std::io::Write;
use std::sync::Mutex;

use metrics::counter;

use crate::api::EventError;
use crate::event::NavigationEvent;

/// Hands built events to whatever transport sits behind it.
pub trait EventSink {
    fn send(&self, event: &NavigationEvent) -> Result<(), EventError>;

    fn send_batch(&self, events: &[NavigationEvent]) -> Result<(), EventError> {
        for event in events {
            self.send(event)?;
        }
        Ok(())
    }
}

pub struct PrintSink {}

impl EventSink for PrintSink {
    fn send(&self, event: &NavigationEvent) -> Result<(), EventError> {
        tracing::info!("single event: {}", event.to_json()?);
        counter!("navigation_events_emitted_total", "sink" => "print").increment(1);

        Ok(())
    }

    fn send_batch(&self, events: &[NavigationEvent]) -> Result<(), EventError> {
        let span = tracing::span!(tracing::Level::INFO, "batch of events");
        let _enter = span.enter();

        for event in events {
            tracing::info!("event: {}", event.to_json()?);
        }
        counter!("navigation_events_emitted_total", "sink" => "print")
            .increment(events.len() as u64);

        Ok(())
    }
}

/// Writes each event as one line of compact JSON.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, EventError> {
        self.writer.into_inner().map_err(|_| EventError::SinkPoisoned)
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn send(&self, event: &NavigationEvent) -> Result<(), EventError> {
        self.send_batch(std::slice::from_ref(event))
    }

    fn send_batch(&self, events: &[NavigationEvent]) -> Result<(), EventError> {
        let mut writer = self.writer.lock().map_err(|_| EventError::SinkPoisoned)?;
        let mut written: u64 = 0;

        let result = events.iter().try_for_each(|event| -> Result<(), EventError> {
            let payload = event.to_json().map_err(|err| {
                tracing::error!("failed to serialize event: {}", err);
                err
            })?;
            writeln!(writer, "{}", payload)?;
            written += 1;
            Ok(())
        });

        // Lines written before a failure still go out and are counted.
        let flushed = writer.flush();
        counter!("navigation_events_emitted_total", "sink" => "json_lines").increment(written);

        result?;
        flushed?;
        Ok(())
    }
}
