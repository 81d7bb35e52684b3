//! Content type (schema) models.
//!
//! Mapped from the `/types` endpoint: each content type carries a `system`
//! block and the declarations of its elements. Unlike items, types map by
//! plain deserialization — there is no resolver machinery involved.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::Pagination;

/// The `system` block of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSystemAttributes {
    pub id: Uuid,
    pub name: String,
    pub codename: String,
    pub last_modified: DateTime<Utc>,
}

/// One selectable option declared by a multiple choice element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOption {
    pub name: String,
    pub codename: String,
}

/// Declaration of one element of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Field type tag, as accepted by
    /// [`FieldType::from_tag`](crate::fields::FieldType::from_tag).
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<ElementOption>,
}

/// A content type with its element declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub system: TypeSystemAttributes,
    #[serde(default)]
    pub elements: BTreeMap<String, ElementDefinition>,
}

/// Raw listing envelope for `/types`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTypeListingEnvelope {
    #[serde(default)]
    pub types: Vec<ContentType>,
    pub pagination: Pagination,
}

/// Envelope for a single content type.
#[derive(Debug, Clone)]
pub struct TypeResponse {
    content_type: ContentType,
}

impl TypeResponse {
    pub(crate) fn new(content_type: ContentType) -> Self {
        Self { content_type }
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }
}

/// Envelope for the content type listing.
#[derive(Debug, Clone)]
pub struct TypeListingResponse {
    types: Vec<ContentType>,
    pagination: Pagination,
}

impl TypeListingResponse {
    pub(crate) fn new(types: Vec<ContentType>, pagination: Pagination) -> Self {
        Self { types, pagination }
    }

    pub fn types(&self) -> &[ContentType] {
        &self.types
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_deserializes_wire_shape() {
        let content_type: ContentType = serde_json::from_value(json!({
            "system": {
                "id": "7c3e1f4e-57f1-4d0e-9c11-7d3a24409cbb",
                "name": "Article",
                "codename": "article",
                "last_modified": "2024-01-05T10:00:00Z"
            },
            "elements": {
                "title": {"type": "text", "name": "Title"},
                "category": {
                    "type": "multiple_choice",
                    "name": "Category",
                    "options": [
                        {"name": "News", "codename": "news"},
                        {"name": "Opinion", "codename": "opinion"}
                    ]
                }
            }
        }))
        .unwrap();

        assert_eq!(content_type.system.codename, "article");
        assert_eq!(content_type.elements.len(), 2);
        assert_eq!(content_type.elements["category"].options.len(), 2);
        assert!(content_type.elements["title"].options.is_empty());
    }
}
