use std::io::{self, BufRead};

use anyhow::Context;
use envconfig::Envconfig;
use tracing_subscriber::EnvFilter;

use navigation_events::config::Config;
use navigation_events::sink::{EventSink, JsonLinesSink, PrintSink};
use navigation_events::EventBuilder;
use navigation_events_cli::process_lines;

fn main() -> anyhow::Result<()> {
    let config = Config::init_from_env().context("invalid configuration")?;

    // stdout carries the events, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let builder = EventBuilder::from_config(&config);
    tracing::info!(
        operating_system = builder.operating_system(),
        print_sink = config.print_sink,
        "reading event requests from stdin"
    );

    let sink: Box<dyn EventSink> = if config.print_sink {
        Box::new(PrintSink {})
    } else {
        Box::new(JsonLinesSink::new(io::stdout()))
    };

    let stdin = io::stdin();
    let summary = process_lines(stdin.lock().lines(), &builder, sink.as_ref())?;
    tracing::info!(
        emitted = summary.emitted,
        rejected = summary.rejected,
        "finished reading event requests"
    );

    if summary.rejected > 0 {
        anyhow::bail!("{} event request(s) could not be decoded", summary.rejected);
    }
    Ok(())
}
