use std::io;

use navigation_events::api::EventError;
use navigation_events::request::EventRequest;
use navigation_events::sink::EventSink;
use navigation_events::EventBuilder;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub emitted: usize,
    pub rejected: usize,
}

/// Build one event per non-blank line and hand it to `sink`.
///
/// Lines that do not decode are logged and counted; read and sink failures stop processing.
pub fn process_lines<I>(
    lines: I,
    builder: &EventBuilder,
    sink: &dyn EventSink,
) -> Result<Summary, EventError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut summary = Summary::default();

    for (number, line) in lines.into_iter().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request = match EventRequest::from_json(&line) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(line = number + 1, "rejected event request: {}", err);
                summary.rejected += 1;
                continue;
            }
        };

        sink.send(&request.build(builder))?;
        summary.emitted += 1;
    }

    Ok(summary)
}
