//! Soft-failure diagnostics.
//!
//! Mapping never aborts a response over per-field problems. When advanced
//! logging is enabled, each problem is recorded here and emitted as a
//! `tracing` warning; when disabled the sink is inert and records nothing.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// One soft-failure condition observed while mapping a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A raw element carried a type tag the SDK does not know.
    UnsupportedFieldType { field: String, tag: String },
    /// Rich text referenced a codename absent from the linked-item graph.
    MissingLinkedItem { codename: String },
    /// No rich text resolver is configured for an embedded item's type.
    MissingRichTextResolver { codename: String, item_type: String },
    /// A url_slug field was mapped without a resolver.
    MissingUrlSlugResolver { field: String },
    /// A configured url slug resolver produced an empty url.
    EmptyResolvedUrl { item_type: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedFieldType { field, tag } => {
                write!(f, "field '{field}' has unsupported type '{tag}' and was skipped")
            }
            Diagnostic::MissingLinkedItem { codename } => {
                write!(
                    f,
                    "rich text references item '{codename}' which is not present in the response"
                )
            }
            Diagnostic::MissingRichTextResolver { codename, item_type } => {
                write!(
                    f,
                    "no rich text resolver is configured for item '{codename}' of type '{item_type}'"
                )
            }
            Diagnostic::MissingUrlSlugResolver { field } => {
                write!(
                    f,
                    "a url slug resolver is required to resolve the url of field '{field}'"
                )
            }
            Diagnostic::EmptyResolvedUrl { item_type } => {
                write!(
                    f,
                    "the url slug resolver returned an empty url for type '{item_type}'"
                )
            }
        }
    }
}

/// Collector for [`Diagnostic`]s, shared across one response assembly.
///
/// Cloning is cheap; every clone feeds the same list. A sink created with
/// `new(false)` drops everything, so callers record unconditionally.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    entries: Option<Arc<Mutex<Vec<Diagnostic>>>>,
}

impl DiagnosticSink {
    /// Create a sink; `enabled` is the advanced-logging flag.
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: enabled.then(|| Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Whether this sink records anything.
    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Record one diagnostic and emit it as a warning.
    pub fn record(&self, diagnostic: Diagnostic) {
        if let Some(entries) = &self.entries {
            warn!(%diagnostic, "delivery mapping diagnostic");
            entries.lock().push(diagnostic);
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .as_ref()
            .map(|entries| entries.lock().clone())
            .unwrap_or_default()
    }
}
