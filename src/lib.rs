//! folio - a portfolio and blog site with strictly validated content
//!
//! Markdown content with YAML front-matter is validated per collection,
//! loaded once at startup and served as JSON. A route gate hides the blog
//! section when it is disabled in configuration.

pub mod cli;
pub mod config;
pub mod dates;
pub mod http_server;
pub mod observability;
pub mod schema;
