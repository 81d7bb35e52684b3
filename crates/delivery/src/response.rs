//! Response envelopes and pagination.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::content::graph::LinkedItemGraph;
use crate::content::item::ContentItem;
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Paging metadata, verbatim from the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
    pub count: i64,
    pub next_page: String,
}

/// Envelope for a single-item query.
#[derive(Debug)]
pub struct ItemResponse {
    item: Arc<ContentItem>,
    linked_items: Arc<LinkedItemGraph>,
    sink: DiagnosticSink,
}

impl ItemResponse {
    pub(crate) fn new(
        item: Arc<ContentItem>,
        linked_items: Arc<LinkedItemGraph>,
        sink: DiagnosticSink,
    ) -> Self {
        Self {
            item,
            linked_items,
            sink,
        }
    }

    pub fn item(&self) -> &Arc<ContentItem> {
        &self.item
    }

    /// Linked items inlined with this response.
    pub fn linked_items(&self) -> &Arc<LinkedItemGraph> {
        &self.linked_items
    }

    /// Diagnostics recorded so far: assembly plus any lazy rich text
    /// resolution that already ran. Empty unless advanced logging is on.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.sink.entries()
    }
}

/// Envelope for a listing query.
///
/// `is_empty`, `first_item` and `last_item` are computed exactly once at
/// construction and never recomputed.
#[derive(Debug)]
pub struct ItemListingResponse {
    items: Vec<Arc<ContentItem>>,
    pagination: Pagination,
    linked_items: Arc<LinkedItemGraph>,
    sink: DiagnosticSink,
    is_empty: bool,
    first_item: Option<Arc<ContentItem>>,
    last_item: Option<Arc<ContentItem>>,
}

impl ItemListingResponse {
    pub(crate) fn new(
        items: Vec<Arc<ContentItem>>,
        pagination: Pagination,
        linked_items: Arc<LinkedItemGraph>,
        sink: DiagnosticSink,
    ) -> Self {
        let is_empty = items.is_empty();
        let first_item = items.first().cloned();
        let last_item = items.last().cloned();
        Self {
            items,
            pagination,
            linked_items,
            sink,
            is_empty,
            first_item,
            last_item,
        }
    }

    pub fn items(&self) -> &[Arc<ContentItem>] {
        &self.items
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Whether the response carried no items.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// First item, unset when the response is empty.
    pub fn first_item(&self) -> Option<&Arc<ContentItem>> {
        self.first_item.as_ref()
    }

    /// Last item, unset when the response is empty.
    pub fn last_item(&self) -> Option<&Arc<ContentItem>> {
        self.last_item.as_ref()
    }

    /// Linked items inlined with this response.
    pub fn linked_items(&self) -> &Arc<LinkedItemGraph> {
        &self.linked_items
    }

    /// Diagnostics recorded so far: assembly plus any lazy rich text
    /// resolution that already ran. Empty unless advanced logging is on.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.sink.entries()
    }
}
