//! Trace context carried across host web requests.
//!
//! A web request leaves the plugin in one `update` call and its result comes back in
//! another. The ids of the span that issued the request travel in the request's
//! context map, so the span handling the response can be parented to it.

use std::collections::BTreeMap;

const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Serializable reference to an OpenTelemetry span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 hex characters.
    pub trace_id: String,
    /// Span id as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is not
    /// sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Writes the ids into a web-request context map.
    pub fn inject(&self, context: &mut BTreeMap<String, String>) {
        context.insert(TRACE_ID_KEY.to_string(), self.trace_id.clone());
        context.insert(PARENT_SPAN_ID_KEY.to_string(), self.parent_span_id.clone());
    }

    /// Reads the ids back out of a web-request context map.
    #[must_use]
    pub fn extract(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: context.get(PARENT_SPAN_ID_KEY)?.clone(),
        })
    }

    /// Makes this context the remote parent of `span`.
    ///
    /// Returns `false` if the ids do not parse, leaving the span untouched.
    pub fn adopt(&self, span: &tracing::Span) -> bool {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let (Ok(trace_id), Ok(span_id)) = (
            TraceId::from_hex(&self.trace_id),
            SpanId::from_hex(&self.parent_span_id),
        ) else {
            return false;
        };
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        span.set_parent(opentelemetry::Context::new().with_remote_span_context(span_context));
        true
    }
}
