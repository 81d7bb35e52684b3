//! Assembled content items and their raw wire shapes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::fields::FieldMap;
use crate::response::Pagination;

/// The `system` block every item carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAttributes {
    pub id: Uuid,
    pub name: String,
    pub codename: String,
    /// Content type codename.
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub language: Option<String>,
    pub last_modified: DateTime<Utc>,
}

/// One assembled content item.
///
/// Immutable after assembly; rich text fields carry their own memo cells.
/// Items are shared via `Arc` — a codename maps to exactly one instance
/// per response, no matter how many fields reference it.
#[derive(Debug)]
pub struct ContentItem {
    system: SystemAttributes,
    fields: FieldMap,
}

impl ContentItem {
    pub(crate) fn new(system: SystemAttributes, fields: FieldMap) -> Self {
        Self { system, fields }
    }

    pub fn system(&self) -> &SystemAttributes {
        &self.system
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

// ---------------------------------------------------------------------------
// Raw wire shapes
// ---------------------------------------------------------------------------

/// Raw element payload: `{type, name, value}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// Raw item payload: `{system, elements}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub system: SystemAttributes,
    #[serde(default)]
    pub elements: BTreeMap<String, RawElement>,
}

/// Raw single-item envelope: `{item, modular_content}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemEnvelope {
    pub item: RawItem,
    #[serde(default)]
    pub modular_content: BTreeMap<String, RawItem>,
}

/// Raw listing envelope: `{items, modular_content, pagination}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListingEnvelope {
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub modular_content: BTreeMap<String, RawItem>,
    pub pagination: Pagination,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_item_deserializes_wire_shape() {
        let raw: RawItem = serde_json::from_value(json!({
            "system": {
                "id": "2f7f8a5e-2e24-4d2c-9a2f-0b4f0f8a1c11",
                "name": "Rick",
                "codename": "rick",
                "type": "character",
                "language": "en-US",
                "last_modified": "2024-02-20T08:00:00Z"
            },
            "elements": {
                "name": {"type": "text", "name": "Name", "value": "Rick"}
            }
        }))
        .unwrap();

        assert_eq!(raw.system.codename, "rick");
        assert_eq!(raw.system.item_type, "character");
        assert_eq!(raw.elements["name"].element_type, "text");
    }

    #[test]
    fn listing_envelope_defaults_absent_sections() {
        let raw: RawListingEnvelope = serde_json::from_value(json!({
            "pagination": {"skip": 0, "limit": 0, "count": 0, "next_page": ""}
        }))
        .unwrap();

        assert!(raw.items.is_empty());
        assert!(raw.modular_content.is_empty());
    }

    #[test]
    fn listing_envelope_requires_pagination() {
        let result: Result<RawListingEnvelope, _> = serde_json::from_value(json!({
            "items": []
        }));
        assert!(result.is_err());
    }
}
