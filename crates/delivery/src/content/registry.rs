//! Model registry: per-type resolver configuration.
//!
//! The Rust rendition of "resolvers defined on the model class": callers
//! register a [`ModelDescriptor`] per content type codename, and the mapper
//! and rich text resolver consult it at assembly/resolution time. Query
//! level overrides in [`QueryConfig`](crate::config::QueryConfig) take
//! precedence over anything registered here.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::content::item::{ContentItem, SystemAttributes};

/// Maps a raw field codename to the property name used in the field map.
pub type FieldNameResolverFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Produces replacement markup for an embedded content item.
pub type RichTextResolverFn = Arc<dyn Fn(&ContentItem) -> String + Send + Sync>;

/// Computes the navigable url for an item given its raw slug.
pub type UrlSlugResolverFn = Arc<dyn Fn(&SystemAttributes, &str) -> String + Send + Sync>;

/// Resolver configuration for one content type.
#[derive(Clone, Default)]
pub struct ModelDescriptor {
    pub(crate) field_names: Option<FieldNameResolverFn>,
    pub(crate) rich_text: Option<RichTextResolverFn>,
    pub(crate) url_slug: Option<UrlSlugResolverFn>,
}

impl ModelDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map raw field codenames to model property names.
    pub fn field_names(
        mut self,
        resolver: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.field_names = Some(Arc::new(resolver));
        self
    }

    /// Produce markup when an item of this type is embedded in rich text.
    pub fn rich_text(
        mut self,
        resolver: impl Fn(&ContentItem) -> String + Send + Sync + 'static,
    ) -> Self {
        self.rich_text = Some(Arc::new(resolver));
        self
    }

    /// Resolve url slug fields of items of this type.
    pub fn url_slug(
        mut self,
        resolver: impl Fn(&SystemAttributes, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.url_slug = Some(Arc::new(resolver));
        self
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("field_names", &self.field_names.is_some())
            .field("rich_text", &self.rich_text.is_some())
            .field("url_slug", &self.url_slug.is_some())
            .finish()
    }
}

/// Registry of model descriptors keyed by content type codename.
///
/// Cloning is cheap; clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    inner: Arc<DashMap<String, ModelDescriptor>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor for a content type, replacing any previous one.
    pub fn register(&self, type_codename: impl Into<String>, descriptor: ModelDescriptor) {
        self.inner.insert(type_codename.into(), descriptor);
    }

    /// Descriptor for a content type.
    pub fn get(&self, type_codename: &str) -> Option<ModelDescriptor> {
        self.inner.get(type_codename).map(|entry| entry.clone())
    }

    pub fn contains(&self, type_codename: &str) -> bool {
        self.inner.contains_key(type_codename)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
