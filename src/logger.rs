use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
///
/// Pipeline spans report their close time (and so their duration) once debug output is on.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let span_events = span_events_for(&env_filter);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn span_events_for(filter: &EnvFilter) -> FmtSpan {
    let verbose = filter
        .max_level_hint()
        .is_some_and(|level| level >= LevelFilter::DEBUG);
    if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE }
}
