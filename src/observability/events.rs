//! Observability events for folio
//!
//! Events are explicit and typed. Each one is emitted as the `event` field of
//! a `tracing` record so log consumers can filter on a stable name.

use std::fmt;

/// Observable events in folio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Server startup begins
    BootStart,
    /// Server listening, ready to serve
    BootComplete,

    // Configuration
    /// Site configuration loaded
    ConfigLoaded,

    // Content
    /// One collection finished loading
    CollectionLoaded,
    /// A collection directory does not exist
    CollectionMissing,
    /// A content file failed validation and was excluded
    ContentRejected,
    /// Content load aborted in strict mode
    ContentLoadFailed,
    /// All collections loaded
    ContentLoaded,

    // Requests
    /// A request was rewritten to not-found by the route gate
    RouteGated,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CollectionLoaded => "COLLECTION_LOADED",
            Event::CollectionMissing => "COLLECTION_MISSING",
            Event::ContentRejected => "CONTENT_REJECTED",
            Event::ContentLoadFailed => "CONTENT_LOAD_FAILED",
            Event::ContentLoaded => "CONTENT_LOADED",
            Event::RouteGated => "ROUTE_GATED",
        }
    }

    /// Returns whether this event stops the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ContentLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        for event in [
            Event::BootStart,
            Event::BootComplete,
            Event::ConfigLoaded,
            Event::CollectionLoaded,
            Event::CollectionMissing,
            Event::ContentRejected,
            Event::ContentLoadFailed,
            Event::ContentLoaded,
            Event::RouteGated,
        ] {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", name);
        }
    }

    #[test]
    fn test_only_strict_load_failure_is_fatal() {
        assert!(Event::ContentLoadFailed.is_fatal());
        assert!(!Event::ContentRejected.is_fatal());
        assert!(!Event::RouteGated.is_fatal());
    }
}
