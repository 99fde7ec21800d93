//! Sequence tokens for in-flight requests.
//!
//! Each issued request gets the next id. Only a response carrying the id of the most
//! recently issued request is applied, whatever order responses arrive in.

use std::collections::BTreeMap;

/// Web-request context key holding the request id.
pub const REQUEST_ID_KEY: &str = "request_id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    next_id: u64,
    latest: Option<u64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the id for a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> u64 {
        self.next_id += 1;
        self.latest = Some(self.next_id);
        self.next_id
    }

    /// Whether a response with `id` belongs to the latest request.
    #[must_use]
    pub fn is_current(&self, id: u64) -> bool {
        self.latest == Some(id)
    }

    /// Marks the latest request as answered; any further response is stale.
    pub fn settle(&mut self, id: u64) {
        if self.is_current(id) {
            self.latest = None;
        }
    }

    /// Id of the request still awaiting its response, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.latest
    }

    /// Reads the request id from a web-request context map.
    #[must_use]
    pub fn id_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
        context.get(REQUEST_ID_KEY)?.parse().ok()
    }
}
