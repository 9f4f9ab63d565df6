//! Observability for folio
//!
//! Structured JSON logs through `tracing`. Every lifecycle record carries an
//! `event` field taken from [`Event`].
//!
//! # Usage
//!
//! ```ignore
//! use folio::observability::{self, Event};
//!
//! observability::init();
//! tracing::info!(event = %Event::ConfigLoaded, path = "site.json");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Installs the global JSON subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    if event.is_fatal() {
        tracing::error!(event = event.as_str());
    } else {
        tracing::info!(event = event.as_str());
    }
}
