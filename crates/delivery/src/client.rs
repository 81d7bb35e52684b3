//! Delivery client: transport seam, url assembly, response orchestration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::{DeliveryConfig, QueryConfig};
use crate::content::item::{RawItemEnvelope, RawListingEnvelope};
use crate::content::mapper::ItemMapper;
use crate::content::registry::ModelRegistry;
use crate::error::{DeliveryError, DeliveryResult};
use crate::params::Parameter;
use crate::response::{ItemListingResponse, ItemResponse};
use crate::types::{ContentType, RawTypeListingEnvelope, TypeListingResponse, TypeResponse};

/// One request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Transport capability: fetch a url and return the parsed JSON body.
///
/// The default implementation is [`ReqwestFetcher`]; tests substitute
/// their own to serve canned payloads without a network.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get_json(&self, url: &str, headers: &[Header]) -> DeliveryResult<Value>;
}

/// [`HttpFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str, headers: &[Header]) -> DeliveryResult<Value> {
        let mut request = self.client.get(url);
        for header in headers {
            request = request.header(&header.name, &header.value);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

/// Client for the delivery API.
///
/// Cheap to clone; clones share the fetcher and the model registry.
#[derive(Clone)]
pub struct DeliveryClient {
    config: DeliveryConfig,
    fetcher: Arc<dyn HttpFetcher>,
    registry: ModelRegistry,
    mapper: ItemMapper,
}

impl DeliveryClient {
    /// Client with the default [`ReqwestFetcher`].
    pub fn new(config: DeliveryConfig) -> Self {
        Self::with_fetcher(config, Arc::new(ReqwestFetcher::new()))
    }

    /// Client with a caller-supplied transport.
    pub fn with_fetcher(config: DeliveryConfig, fetcher: Arc<dyn HttpFetcher>) -> Self {
        let registry = ModelRegistry::new();
        let mapper = ItemMapper::new(registry.clone(), config.enable_advanced_logging);
        Self {
            config,
            fetcher,
            registry,
            mapper,
        }
    }

    /// Registry used to attach per-type model descriptors.
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Fetch one item by codename.
    pub async fn item(
        &self,
        codename: &str,
        parameters: &[Parameter],
        query: &QueryConfig,
    ) -> DeliveryResult<ItemResponse> {
        let json = self
            .fetch(&format!("/items/{codename}"), parameters, query)
            .await?;
        let raw: RawItemEnvelope = serde_json::from_value(json)?;
        Ok(self.mapper.map_item(raw, query))
    }

    /// Fetch a filtered item listing.
    pub async fn items(
        &self,
        parameters: &[Parameter],
        query: &QueryConfig,
    ) -> DeliveryResult<ItemListingResponse> {
        let json = self.fetch("/items", parameters, query).await?;
        let raw: RawListingEnvelope = serde_json::from_value(json)?;
        Ok(self.mapper.map_listing(raw, query))
    }

    /// Fetch one content type by codename.
    pub async fn content_type(&self, codename: &str) -> DeliveryResult<TypeResponse> {
        let json = self
            .fetch(&format!("/types/{codename}"), &[], &QueryConfig::default())
            .await?;
        let content_type: ContentType = serde_json::from_value(json)?;
        Ok(TypeResponse::new(content_type))
    }

    /// Fetch the content type listing.
    pub async fn content_types(&self, parameters: &[Parameter]) -> DeliveryResult<TypeListingResponse> {
        let json = self
            .fetch("/types", parameters, &QueryConfig::default())
            .await?;
        let raw: RawTypeListingEnvelope = serde_json::from_value(json)?;
        Ok(TypeListingResponse::new(raw.types, raw.pagination))
    }

    async fn fetch(
        &self,
        path: &str,
        parameters: &[Parameter],
        query: &QueryConfig,
    ) -> DeliveryResult<Value> {
        let (endpoint, headers) = self.request_target(query)?;
        let url = self.build_url(endpoint, path, parameters);
        debug!(%url, "delivery request");
        self.fetcher.get_json(&url, &headers).await
    }

    /// Whether this request should hit the preview endpoint.
    fn preview_enabled(&self, query: &QueryConfig) -> bool {
        query
            .use_preview_mode
            .unwrap_or(self.config.enable_preview_mode)
    }

    /// Endpoint and headers for one request. Preview mode without a
    /// configured key is a configuration error, raised before any fetch.
    fn request_target(&self, query: &QueryConfig) -> DeliveryResult<(&str, Vec<Header>)> {
        if !self.preview_enabled(query) {
            return Ok((&self.config.live_endpoint, Vec::new()));
        }

        let Some(key) = &self.config.preview_api_key else {
            return Err(DeliveryError::Config(
                "preview mode requires a preview api key".to_string(),
            ));
        };

        let headers = vec![Header {
            name: "authorization".to_string(),
            value: format!("bearer {key}"),
        }];
        Ok((&self.config.preview_endpoint, headers))
    }

    fn build_url(&self, endpoint: &str, path: &str, parameters: &[Parameter]) -> String {
        let mut url = format!("{}/{}{}", endpoint, self.config.project_id, path);
        for (index, parameter) in parameters.iter().enumerate() {
            let (name, value) = parameter.pair();
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(&name);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
        url
    }
}
