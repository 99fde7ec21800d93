//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → recipe-box-otlp.json
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces go to `~/.local/share/zellij/recipe-box/recipe-box-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3 numbered backups
//! - **OTLP Format**: One OpenTelemetry Protocol JSON document per line
//! - **Request Correlation**: Recipe search responses are parented to the span
//!   that issued the request, across the host round trip
//!
//! # Configuration
//!
//! The level comes from the `trace_level` plugin option and defaults to `"info"`.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`exporter`]: Span exporter and OTLP JSON encoding
//! - [`rotation`]: Rotating line file
//! - [`context`]: Trace ids carried in web-request context maps

pub mod context;
pub mod exporter;
pub mod init;
pub mod rotation;

pub use context::TraceContext;
pub use init::init_tracing;
