//! Stratum Delivery SDK.
//!
//! Client-side SDK for the Stratum headless content delivery API:
//! - `client`: the async [`DeliveryClient`] and the [`HttpFetcher`] transport seam
//! - `content`: item assembly — linked-item arena, model registry, mapper
//! - `fields`: field type dispatch and typed field value objects
//! - `rich_text`: embedded-item placeholder resolution
//! - `response`: envelopes and pagination
//! - `types`: content type (schema) models
//!
//! Mapping is best-effort: per-field problems degrade to diagnostics and
//! empty values, so a successful fetch always yields a fully-shaped
//! response. Only configuration, transport, and envelope-shape problems
//! surface as [`DeliveryError`].

pub mod client;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod params;
pub mod response;
pub mod rich_text;
pub mod types;

pub use client::{DeliveryClient, Header, HttpFetcher, ReqwestFetcher};
pub use config::{DeliveryConfig, QueryConfig};
pub use content::{
    ContentItem, ItemMapper, LinkedItemGraph, ModelDescriptor, ModelRegistry, SystemAttributes,
};
pub use error::{DeliveryError, DeliveryResult};
pub use response::{ItemListingResponse, ItemResponse, Pagination};
