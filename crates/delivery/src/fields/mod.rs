//! Field type dispatch and field value objects.
//!
//! Raw elements arrive as `{type, name, value}`; the type tag selects the
//! variant and the value is normalized into it. Malformed list values
//! normalize to empty lists and malformed datetimes to an invalid
//! sentinel; only an unknown type tag is reported back to the mapper.

mod models;

pub use models::{Asset, MultipleChoiceOption};

use std::fmt;
use std::sync::{Arc, Weak};

use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::content::graph::LinkedItemGraph;
use crate::content::item::{ContentItem, SystemAttributes};
use crate::content::registry::{ModelRegistry, RichTextResolverFn, UrlSlugResolverFn};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::DeliveryError;
use crate::rich_text;

// ---------------------------------------------------------------------------
// Field type dispatch
// ---------------------------------------------------------------------------

/// Kinds of fields the delivery API can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    DateTime,
    RichText,
    Asset,
    MultipleChoice,
    UrlSlug,
    ModularContent,
}

/// Error for a type tag with no corresponding [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported field type '{tag}'")]
pub struct UnsupportedFieldType {
    /// The raw tag as it appeared in the payload.
    pub tag: String,
}

impl FieldType {
    /// Map a raw payload type tag to a field kind.
    pub fn from_tag(tag: &str) -> Result<Self, UnsupportedFieldType> {
        match tag {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "date_time" => Ok(Self::DateTime),
            "rich_text" => Ok(Self::RichText),
            "asset" => Ok(Self::Asset),
            "multiple_choice" => Ok(Self::MultipleChoice),
            "url_slug" => Ok(Self::UrlSlug),
            "modular_content" => Ok(Self::ModularContent),
            other => Err(UnsupportedFieldType {
                tag: other.to_string(),
            }),
        }
    }
}

/// A mapped field of a content item.
#[derive(Debug)]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    DateTime(DateTimeField),
    RichText(RichTextField),
    Assets(AssetsField),
    MultipleChoice(MultipleChoiceField),
    UrlSlug(UrlSlugField),
    LinkedItems(LinkedItemsField),
}

impl Field {
    /// Raw codename of the field.
    pub fn name(&self) -> &str {
        match self {
            Field::Text(f) => &f.name,
            Field::Number(f) => &f.name,
            Field::DateTime(f) => &f.name,
            Field::RichText(f) => &f.name,
            Field::Assets(f) => &f.name,
            Field::MultipleChoice(f) => &f.name,
            Field::UrlSlug(f) => &f.name,
            Field::LinkedItems(f) => &f.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

/// Plain text field; the value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub name: String,
    pub text: String,
}

impl TextField {
    pub(crate) fn new(name: &str, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            text: value.as_str().unwrap_or_default().to_string(),
        }
    }
}

/// Numeric field; `None` when the payload carried null.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    pub name: String,
    pub number: Option<f64>,
}

impl NumberField {
    pub(crate) fn new(name: &str, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            number: value.as_f64(),
        }
    }
}

/// Date/time field parsed from ISO-8601.
///
/// Malformed input is kept as an invalid sentinel rather than rejected at
/// construction; callers detect it through [`DateTimeField::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeField {
    pub name: String,
    /// Raw value as it appeared on the wire.
    pub value: String,
    datetime: Option<DateTime<FixedOffset>>,
}

impl DateTimeField {
    pub(crate) fn new(name: &str, value: &Value) -> Self {
        let raw = value.as_str().unwrap_or_default();
        Self {
            name: name.to_string(),
            value: raw.to_string(),
            datetime: DateTime::parse_from_rfc3339(raw).ok(),
        }
    }

    /// Parsed value, or `None` for the invalid sentinel.
    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.datetime
    }

    /// Whether the raw value parsed as a datetime.
    pub fn is_valid(&self) -> bool {
        self.datetime.is_some()
    }
}

// ---------------------------------------------------------------------------
// List fields
// ---------------------------------------------------------------------------

/// Normalize a JSON array into typed entries.
///
/// Absent or non-array values, and entries that fail to deserialize, are
/// dropped rather than reported; list fields degrade to empty lists.
fn collect_array<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Ordered multiple choice selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceField {
    pub name: String,
    pub options: Vec<MultipleChoiceOption>,
}

impl MultipleChoiceField {
    pub(crate) fn new(name: &str, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            options: collect_array(value),
        }
    }
}

/// Ordered asset list.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetsField {
    pub name: String,
    pub assets: Vec<Asset>,
}

impl AssetsField {
    pub(crate) fn new(name: &str, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            assets: collect_array(value),
        }
    }
}

/// Reference-list field: ordered codenames of linked items.
#[derive(Debug, Clone)]
pub struct LinkedItemsField {
    pub name: String,
    pub codenames: Vec<String>,
    graph: Weak<LinkedItemGraph>,
}

impl LinkedItemsField {
    pub(crate) fn new(name: &str, value: &Value, graph: Weak<LinkedItemGraph>) -> Self {
        Self {
            name: name.to_string(),
            codenames: collect_array(value),
            graph,
        }
    }

    /// Resolve the referenced items out of the response's linked-item graph.
    ///
    /// Codenames not inlined by the API are skipped.
    pub fn items(&self) -> Vec<Arc<ContentItem>> {
        let Some(graph) = self.graph.upgrade() else {
            return Vec::new();
        };
        self.codenames
            .iter()
            .filter_map(|codename| graph.get(codename).cloned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Url slug
// ---------------------------------------------------------------------------

/// Url slug field with its resolved url.
///
/// `url` is `None` when no resolver was configured and `Some("")` when a
/// configured resolver produced an empty result (a soft warning, kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSlugField {
    pub name: String,
    /// Raw slug value.
    pub value: String,
    pub url: Option<String>,
}

impl UrlSlugField {
    pub(crate) fn new(
        name: &str,
        value: &Value,
        system: &SystemAttributes,
        resolver: Option<&UrlSlugResolverFn>,
        sink: &DiagnosticSink,
    ) -> Self {
        let slug = value.as_str().unwrap_or_default().to_string();
        let url = match resolver {
            None => {
                sink.record(Diagnostic::MissingUrlSlugResolver {
                    field: name.to_string(),
                });
                None
            }
            Some(resolve) => {
                let url = resolve(system, &slug);
                if url.is_empty() {
                    sink.record(Diagnostic::EmptyResolvedUrl {
                        item_type: system.item_type.clone(),
                    });
                }
                Some(url)
            }
        };

        Self {
            name: name.to_string(),
            value: slug,
            url,
        }
    }
}

// ---------------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------------

/// State of the memoized html resolution.
enum ResolveState {
    Unresolved,
    /// Resolution is running; observing this from the same instance means
    /// the field re-entered its own resolution.
    Resolving,
    Resolved(Arc<str>),
}

/// Rich text field with lazily resolved html.
pub struct RichTextField {
    pub name: String,
    /// Raw html as delivered, placeholders included.
    pub value: String,
    graph: Weak<LinkedItemGraph>,
    registry: ModelRegistry,
    override_resolver: Option<RichTextResolverFn>,
    sink: DiagnosticSink,
    resolved: Mutex<ResolveState>,
}

impl RichTextField {
    pub(crate) fn new(
        name: &str,
        value: &Value,
        graph: Weak<LinkedItemGraph>,
        registry: ModelRegistry,
        override_resolver: Option<RichTextResolverFn>,
        sink: DiagnosticSink,
    ) -> Self {
        Self {
            name: name.to_string(),
            value: value.as_str().unwrap_or_default().to_string(),
            graph,
            registry,
            override_resolver,
            sink,
            resolved: Mutex::new(ResolveState::Unresolved),
        }
    }

    /// Resolved html with every embedded-item placeholder substituted.
    ///
    /// The first call resolves and caches; later calls return the same
    /// `Arc<str>` without re-resolving. Re-entering `html()` on this
    /// instance while its own resolution is still running fails with
    /// [`DeliveryError::CyclicResolution`].
    pub fn html(&self) -> Result<Arc<str>, DeliveryError> {
        {
            let mut state = self.resolved.lock();
            match &*state {
                ResolveState::Resolved(html) => return Ok(Arc::clone(html)),
                ResolveState::Resolving => {
                    return Err(DeliveryError::CyclicResolution {
                        field: self.name.clone(),
                    });
                }
                ResolveState::Unresolved => *state = ResolveState::Resolving,
            }
        }

        // The lock is released while resolvers run: they may read other
        // items' rich text fields, which take their own locks.
        let guard = ResetOnUnwind {
            state: &self.resolved,
        };
        let html: Arc<str> = rich_text::resolve_fragment(
            &self.value,
            self.graph.upgrade().as_deref(),
            &self.registry,
            self.override_resolver.as_ref(),
            &self.sink,
        )
        .into();
        std::mem::forget(guard);

        *self.resolved.lock() = ResolveState::Resolved(Arc::clone(&html));
        Ok(html)
    }

    /// Whether `html()` has already been computed.
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.resolved.lock(), ResolveState::Resolved(_))
    }
}

impl fmt::Debug for RichTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextField")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Restores the memo cell to `Unresolved` if resolution unwinds.
struct ResetOnUnwind<'a> {
    state: &'a Mutex<ResolveState>,
}

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        *self.state.lock() = ResolveState::Unresolved;
    }
}

// ---------------------------------------------------------------------------
// Field map
// ---------------------------------------------------------------------------

/// Ordered mapping of resolved field names to mapped fields.
///
/// The typed accessors return `None` when the name is absent or bound to a
/// field of another kind; models read the names they care about and ignore
/// the rest.
#[derive(Debug, Default)]
pub struct FieldMap {
    entries: Vec<(String, Field)>,
}

impl FieldMap {
    pub(crate) fn insert(&mut self, name: String, field: Field) {
        self.entries.push((name, field));
    }

    /// Field bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate name/field pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Field::Text(field) => Some(&field.text),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Field::Number(field) => field.number,
            _ => None,
        }
    }

    pub fn datetime(&self, name: &str) -> Option<&DateTimeField> {
        match self.get(name)? {
            Field::DateTime(field) => Some(field),
            _ => None,
        }
    }

    pub fn rich_text(&self, name: &str) -> Option<&RichTextField> {
        match self.get(name)? {
            Field::RichText(field) => Some(field),
            _ => None,
        }
    }

    pub fn assets(&self, name: &str) -> Option<&AssetsField> {
        match self.get(name)? {
            Field::Assets(field) => Some(field),
            _ => None,
        }
    }

    pub fn multiple_choice(&self, name: &str) -> Option<&MultipleChoiceField> {
        match self.get(name)? {
            Field::MultipleChoice(field) => Some(field),
            _ => None,
        }
    }

    pub fn url_slug(&self, name: &str) -> Option<&UrlSlugField> {
        match self.get(name)? {
            Field::UrlSlug(field) => Some(field),
            _ => None,
        }
    }

    pub fn linked_items(&self, name: &str) -> Option<&LinkedItemsField> {
        match self.get(name)? {
            Field::LinkedItems(field) => Some(field),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
