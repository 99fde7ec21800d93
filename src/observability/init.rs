//! Tracing initialization and subscriber setup.

use super::exporter::{file_tracer_provider, SCOPE_NAME};
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "recipe-box-otlp.json";

/// Level used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Spans are filtered by `config.trace_level` (default `info`), converted to
/// OpenTelemetry spans and appended to `recipe-box-otlp.json` in the data
/// directory.
///
/// Observability is optional: if the data directory cannot be created the call
/// returns without installing anything. Only the first call takes effect.
///
/// # Example
///
/// ```rust
/// use recipe_box::observability::init_tracing;
/// use recipe_box::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .as_deref()
        .unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SCOPE_NAME,
    )]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE), resource);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME)));

    let _ = subscriber.try_init();
}
