use thiserror::Error;

/// Failures at the transport boundary. Event builders themselves never fail.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("failed to serialize event: {0}")]
    SerializationError(#[source] serde_json::Error),
    #[error("failed to parse event request: {0}")]
    RequestParsingError(#[source] serde_json::Error),

    #[error("failed to write event: {0}")]
    SinkWriteError(#[from] std::io::Error),
    #[error("event sink is unusable after a writer panicked")]
    SinkPoisoned,
}
