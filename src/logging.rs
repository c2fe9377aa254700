use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Variable holding the log filter. `RUST_LOG` belongs to whatever else the
/// container runs and is reported, not obeyed.
pub const LOG_ENV: &str = "CONTAINER_PROBE_LOG";

/// Installs the tracing subscriber.
///
/// Filter comes from `CONTAINER_PROBE_LOG` and defaults to `warn`. Output goes
/// to stderr so stdout carries only the report.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
