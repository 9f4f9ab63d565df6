//! # HTTP Server Module
//!
//! Serves validated content as JSON, behind the route gate.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/about` - Resume entries
//! - `/education`, `/experience` - Timelines, most recent first
//! - `/blog`, `/blog/:slug` - Published posts (gated by `blog.enabled`)
//! - `/404` - Not found, also where gated requests land

pub mod config;
pub mod content_routes;
pub mod errors;
pub mod gate;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use content_routes::SiteState;
pub use errors::{SiteError, SiteResult};
pub use gate::{GateDecision, GuardedSection, RouteGate, NOT_FOUND_PATH, REDIRECT_HEADER};
pub use server::HttpServer;
