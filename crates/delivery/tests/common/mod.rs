//! Shared fixtures for mapping tests.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use serde_json::{Value, json};
use stratum_delivery::content::{RawItemEnvelope, RawListingEnvelope};

/// A `system` block for the given codename and type.
pub fn system(codename: &str, item_type: &str) -> Value {
    json!({
        "id": "9c9cbd19-4f1e-4737-ae3f-55b8e2f7a111",
        "name": codename,
        "codename": codename,
        "type": item_type,
        "language": "en-US",
        "last_modified": "2024-01-01T00:00:00Z"
    })
}

/// An item payload with the given elements.
pub fn item(codename: &str, item_type: &str, elements: Value) -> Value {
    json!({
        "system": system(codename, item_type),
        "elements": elements
    })
}

/// An item with a single `full_name` text element.
pub fn item_with_name(codename: &str, item_type: &str, full_name: &str) -> Value {
    item(
        codename,
        item_type,
        json!({
            "full_name": {"type": "text", "name": "Full name", "value": full_name}
        }),
    )
}

/// Pagination with every number zeroed.
pub fn zero_pagination() -> Value {
    json!({"skip": 0, "limit": 0, "count": 0, "next_page": ""})
}

/// A single-item envelope.
pub fn single(item: Value, modular_content: Value) -> RawItemEnvelope {
    serde_json::from_value(json!({
        "item": item,
        "modular_content": modular_content
    }))
    .unwrap()
}

/// A listing envelope with zeroed pagination.
pub fn listing(items: Vec<Value>, modular_content: Value) -> RawListingEnvelope {
    serde_json::from_value(json!({
        "items": items,
        "modular_content": modular_content,
        "pagination": zero_pagination()
    }))
    .unwrap()
}
