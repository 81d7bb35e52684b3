//! Value objects carried by asset and multiple choice fields.

use serde::{Deserialize, Serialize};

/// A binary asset attached to a content item.
///
/// A pure value object; its only identity is its url.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    /// MIME type reported by the API.
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
}

/// One selected option of a multiple choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceOption {
    pub name: String,
    pub codename: String,
}
