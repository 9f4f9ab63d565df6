//! Route Gate Middleware
//!
//! Hides whole site sections when their configuration flag is off. Every
//! request gets one of two decisions:
//!
//! - PASSTHROUGH: forwarded unchanged
//! - GATED: rewritten to `/404`, with the original path carried in the
//!   `x-redirect-to` header on both the rewritten request and the response
//!
//! The decision is a pure function of the path and the configuration loaded
//! at startup. The gate has no state of its own and never fails.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Uri},
    middleware::Next,
    response::Response,
};

use crate::config::SiteConfig;
use crate::observability::Event;

/// Header carrying the originally requested path of a gated request
pub const REDIRECT_HEADER: &str = "x-redirect-to";

/// Path gated requests are rewritten to
pub const NOT_FOUND_PATH: &str = "/404";

/// A path prefix guarded by an enabled flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedSection {
    prefix: String,
    enabled: bool,
}

impl GuardedSection {
    pub fn new(prefix: impl Into<String>, enabled: bool) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/');
        Self {
            prefix: format!("/{}", prefix.trim_start_matches('/')),
            enabled,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Plain string prefix: `/blog` also covers `/blogroll` and `/blog.xml`
    fn contains(&self, path: &str) -> bool {
        path.starts_with(self.prefix.as_str())
    }
}

/// Outcome of gating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Passthrough,
    Gated { original_path: String },
}

/// The set of guarded sections, built once from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    sections: Vec<GuardedSection>,
}

impl RouteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a guarded section
    pub fn guard(mut self, prefix: impl Into<String>, enabled: bool) -> Self {
        self.sections.push(GuardedSection::new(prefix, enabled));
        self
    }

    /// Guards `/blog` behind `blog.enabled`
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new().guard("/blog", config.blog.enabled)
    }

    pub fn sections(&self) -> &[GuardedSection] {
        &self.sections
    }

    /// Decides whether `path` passes through or is gated.
    pub fn decide(&self, path: &str) -> GateDecision {
        let gated = self
            .sections
            .iter()
            .any(|section| !section.enabled && section.contains(path));

        if gated {
            GateDecision::Gated {
                original_path: path.to_string(),
            }
        } else {
            GateDecision::Passthrough
        }
    }
}

/// Axum middleware applying a [`RouteGate`].
///
/// Must wrap the router from outside so the rewritten URI is routed.
pub async fn route_gate(
    State(gate): State<Arc<RouteGate>>,
    mut request: Request,
    next: Next,
) -> Response {
    let original_path = match gate.decide(request.uri().path()) {
        GateDecision::Passthrough => return next.run(request).await,
        GateDecision::Gated { original_path } => original_path,
    };

    tracing::debug!(event = Event::RouteGated.as_str(), path = %original_path);

    let redirect_to = HeaderValue::from_str(&original_path).ok();
    *request.uri_mut() = Uri::from_static(NOT_FOUND_PATH);
    if let Some(value) = &redirect_to {
        request.headers_mut().insert(REDIRECT_HEADER, value.clone());
    }

    let mut response = next.run(request).await;
    if let Some(value) = redirect_to {
        response.headers_mut().insert(REDIRECT_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_gate(enabled: bool) -> RouteGate {
        RouteGate::new().guard("/blog", enabled)
    }

    #[test]
    fn test_disabled_section_is_gated() {
        assert_eq!(
            blog_gate(false).decide("/blog/post-1"),
            GateDecision::Gated {
                original_path: "/blog/post-1".into()
            }
        );
        assert!(matches!(blog_gate(false).decide("/blog"), GateDecision::Gated { .. }));
        assert!(matches!(blog_gate(false).decide("/blog/"), GateDecision::Gated { .. }));
    }

    #[test]
    fn test_enabled_section_passes() {
        assert_eq!(blog_gate(true).decide("/blog/post-1"), GateDecision::Passthrough);
        assert_eq!(blog_gate(true).decide("/blog"), GateDecision::Passthrough);
    }

    #[test]
    fn test_other_paths_never_gated() {
        for enabled in [true, false] {
            let gate = blog_gate(enabled);
            assert_eq!(gate.decide("/about"), GateDecision::Passthrough);
            assert_eq!(gate.decide("/"), GateDecision::Passthrough);
            assert_eq!(gate.decide("/experience/blog"), GateDecision::Passthrough);
        }
    }

    #[test]
    fn test_lookalike_paths_share_prefix() {
        for path in ["/blogroll", "/blog-drafts/secret", "/blog.xml"] {
            assert_eq!(
                blog_gate(false).decide(path),
                GateDecision::Gated {
                    original_path: path.into()
                }
            );
            assert_eq!(blog_gate(true).decide(path), GateDecision::Passthrough);
        }
    }

    #[test]
    fn test_prefix_normalized() {
        let section = GuardedSection::new("blog/", false);
        assert_eq!(section.prefix(), "/blog");
        assert!(!section.enabled());
    }

    #[test]
    fn test_empty_gate_passes_everything() {
        assert_eq!(RouteGate::new().decide("/blog/post-1"), GateDecision::Passthrough);
    }

    #[test]
    fn test_from_config_follows_blog_flag() {
        let mut config = SiteConfig::default();
        assert!(matches!(
            RouteGate::from_config(&config).decide("/blog"),
            GateDecision::Gated { .. }
        ));

        config.blog.enabled = true;
        let gate = RouteGate::from_config(&config);
        assert_eq!(gate.decide("/blog"), GateDecision::Passthrough);
        assert_eq!(gate.sections().len(), 1);
    }
}
