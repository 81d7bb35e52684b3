//! Client and per-query configuration.

use std::sync::Arc;

use crate::content::item::{ContentItem, SystemAttributes};
use crate::content::registry::{FieldNameResolverFn, RichTextResolverFn, UrlSlugResolverFn};

/// Default live delivery endpoint.
const LIVE_ENDPOINT: &str = "https://deliver.stratum.io";

/// Default preview delivery endpoint.
const PREVIEW_ENDPOINT: &str = "https://preview-deliver.stratum.io";

/// Configuration for [`DeliveryClient`](crate::client::DeliveryClient).
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Project identifier, the first path segment of every request.
    pub project_id: String,
    /// API key required for preview requests.
    pub preview_api_key: Option<String>,
    /// Serve unpublished content by default (overridable per query).
    pub enable_preview_mode: bool,
    /// Record and emit mapping diagnostics.
    pub enable_advanced_logging: bool,
    /// Live endpoint, without a trailing slash.
    pub live_endpoint: String,
    /// Preview endpoint, without a trailing slash.
    pub preview_endpoint: String,
}

impl DeliveryConfig {
    /// Configuration with defaults for the given project.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            preview_api_key: None,
            enable_preview_mode: false,
            enable_advanced_logging: false,
            live_endpoint: LIVE_ENDPOINT.to_string(),
            preview_endpoint: PREVIEW_ENDPOINT.to_string(),
        }
    }

    /// Set the preview API key.
    pub fn preview_api_key(mut self, key: impl Into<String>) -> Self {
        self.preview_api_key = Some(key.into());
        self
    }

    /// Serve unpublished content by default.
    pub fn enable_preview_mode(mut self) -> Self {
        self.enable_preview_mode = true;
        self
    }

    /// Record and emit mapping diagnostics.
    pub fn enable_advanced_logging(mut self) -> Self {
        self.enable_advanced_logging = true;
        self
    }

    /// Override the live endpoint (e.g. to point at a mock).
    pub fn live_endpoint(mut self, url: impl Into<String>) -> Self {
        self.live_endpoint = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the preview endpoint.
    pub fn preview_endpoint(mut self, url: impl Into<String>) -> Self {
        self.preview_endpoint = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Per-query configuration and resolver overrides.
///
/// Resolvers set here take precedence over the ones registered per content
/// type in the [`ModelRegistry`](crate::content::registry::ModelRegistry).
#[derive(Clone, Default)]
pub struct QueryConfig {
    /// Override the client-level preview default for this query.
    pub use_preview_mode: Option<bool>,
    /// Rich text resolver applied to every embedded item of this query.
    pub rich_text_resolver: Option<RichTextResolverFn>,
    /// Url slug resolver for this query.
    pub url_slug_resolver: Option<UrlSlugResolverFn>,
    /// Field-name resolver for this query.
    pub field_name_resolver: Option<FieldNameResolverFn>,
}

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force preview mode on or off for this query.
    pub fn use_preview_mode(mut self, enabled: bool) -> Self {
        self.use_preview_mode = Some(enabled);
        self
    }

    /// Resolve every embedded item of this query with `resolver`.
    pub fn rich_text_resolver(
        mut self,
        resolver: impl Fn(&ContentItem) -> String + Send + Sync + 'static,
    ) -> Self {
        self.rich_text_resolver = Some(Arc::new(resolver));
        self
    }

    /// Resolve url slug fields of this query with `resolver`.
    pub fn url_slug_resolver(
        mut self,
        resolver: impl Fn(&SystemAttributes, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.url_slug_resolver = Some(Arc::new(resolver));
        self
    }

    /// Map raw field codenames to model property names for this query.
    pub fn field_name_resolver(
        mut self,
        resolver: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.field_name_resolver = Some(Arc::new(resolver));
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_live_endpoints() {
        let config = DeliveryConfig::new("my-project");

        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.live_endpoint, "https://deliver.stratum.io");
        assert_eq!(config.preview_endpoint, "https://preview-deliver.stratum.io");
        assert!(!config.enable_preview_mode);
        assert!(!config.enable_advanced_logging);
        assert!(config.preview_api_key.is_none());
    }

    #[test]
    fn endpoint_overrides_strip_trailing_slash() {
        let config = DeliveryConfig::new("p").live_endpoint("http://127.0.0.1:9000/");
        assert_eq!(config.live_endpoint, "http://127.0.0.1:9000");
    }

    #[test]
    fn query_overrides_are_opt_in() {
        let query = QueryConfig::new();
        assert!(query.use_preview_mode.is_none());
        assert!(query.rich_text_resolver.is_none());

        let query = query.use_preview_mode(true);
        assert_eq!(query.use_preview_mode, Some(true));
    }
}
