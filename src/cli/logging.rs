//! Logging setup shared by both binaries
//!
//! Logs go to stderr so stdout carries only script names and child output.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Environment variable carrying the dispatcher's log verbosity.
pub const DEBUG_ENV: &str = "XSHEEL_DEBUG";

/// Verbosity from `XSHEEL_DEBUG`: a level number, or any other non-empty
/// value for level 1.
pub fn verbosity_from_env() -> u8 {
    parse_verbosity(std::env::var(DEBUG_ENV).ok().as_deref())
}

fn parse_verbosity(value: Option<&str>) -> u8 {
    match value.map(str::trim) {
        None | Some("") => 0,
        Some(v) => v.parse().unwrap_or(1),
    }
}

pub fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    // A second init (e.g. in tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
