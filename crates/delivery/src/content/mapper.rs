//! Response assembly: raw payloads into typed items.
//!
//! Assembly is two-phase. The full linked-item arena is built first —
//! every field created inside captures a `Weak` handle to it — and only
//! then can rich text resolution read the arena lazily. Items already
//! present in the arena are reused rather than rebuilt, so one codename
//! maps to one shared instance per response.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use crate::config::QueryConfig;
use crate::content::graph::LinkedItemGraph;
use crate::content::item::{ContentItem, RawItem, RawItemEnvelope, RawListingEnvelope};
use crate::content::registry::ModelRegistry;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fields::{
    AssetsField, DateTimeField, Field, FieldMap, FieldType, LinkedItemsField,
    MultipleChoiceField, NumberField, RichTextField, TextField, UrlSlugField,
};
use crate::response::{ItemListingResponse, ItemResponse};

/// Maps raw delivery payloads into assembled items and envelopes.
#[derive(Debug, Clone)]
pub struct ItemMapper {
    registry: ModelRegistry,
    advanced_logging: bool,
}

impl ItemMapper {
    pub fn new(registry: ModelRegistry, advanced_logging: bool) -> Self {
        Self {
            registry,
            advanced_logging,
        }
    }

    /// Map a single-item envelope.
    pub fn map_item(&self, raw: RawItemEnvelope, query: &QueryConfig) -> ItemResponse {
        let sink = DiagnosticSink::new(self.advanced_logging);
        let graph = self.build_graph(raw.modular_content, query, &sink);
        let item = self.top_level_item(raw.item, &graph, query, &sink);
        ItemResponse::new(item, graph, sink)
    }

    /// Map a listing envelope.
    pub fn map_listing(&self, raw: RawListingEnvelope, query: &QueryConfig) -> ItemListingResponse {
        let sink = DiagnosticSink::new(self.advanced_logging);
        let graph = self.build_graph(raw.modular_content, query, &sink);
        let items = raw
            .items
            .into_iter()
            .map(|item| self.top_level_item(item, &graph, query, &sink))
            .collect();
        ItemListingResponse::new(items, raw.pagination, graph, sink)
    }

    /// Assemble the arena. The `Weak` handle captured by fields only
    /// becomes upgradable once the arena is complete, which is exactly the
    /// point where resolution is first allowed to run.
    fn build_graph(
        &self,
        modular: BTreeMap<String, RawItem>,
        query: &QueryConfig,
        sink: &DiagnosticSink,
    ) -> Arc<LinkedItemGraph> {
        Arc::new_cyclic(|graph: &Weak<LinkedItemGraph>| {
            let items = modular
                .into_iter()
                .map(|(codename, raw)| {
                    let item = Arc::new(self.assemble(raw, graph.clone(), query, sink));
                    (codename, item)
                })
                .collect();
            LinkedItemGraph::new(items)
        })
    }

    /// Top-level items reuse the arena instance when the codename is
    /// already present (self-referencing or reused modular content).
    fn top_level_item(
        &self,
        raw: RawItem,
        graph: &Arc<LinkedItemGraph>,
        query: &QueryConfig,
        sink: &DiagnosticSink,
    ) -> Arc<ContentItem> {
        if let Some(existing) = graph.get(&raw.system.codename) {
            return Arc::clone(existing);
        }
        Arc::new(self.assemble(raw, Arc::downgrade(graph), query, sink))
    }

    /// Assemble one item, field by field.
    fn assemble(
        &self,
        raw: RawItem,
        graph: Weak<LinkedItemGraph>,
        query: &QueryConfig,
        sink: &DiagnosticSink,
    ) -> ContentItem {
        let descriptor = self.registry.get(&raw.system.item_type).unwrap_or_default();
        let mut fields = FieldMap::default();

        for (raw_name, element) in &raw.elements {
            let field_type = match FieldType::from_tag(&element.element_type) {
                Ok(field_type) => field_type,
                Err(err) => {
                    sink.record(Diagnostic::UnsupportedFieldType {
                        field: raw_name.clone(),
                        tag: err.tag,
                    });
                    continue;
                }
            };

            // Raw codename -> model property name; unresolved names fall
            // back to the raw name unchanged.
            let name = query
                .field_name_resolver
                .as_ref()
                .and_then(|resolve| resolve(raw_name))
                .or_else(|| {
                    descriptor
                        .field_names
                        .as_ref()
                        .and_then(|resolve| resolve(raw_name))
                })
                .unwrap_or_else(|| raw_name.clone());

            let value = &element.value;
            let field = match field_type {
                FieldType::Text => Field::Text(TextField::new(raw_name, value)),
                FieldType::Number => Field::Number(NumberField::new(raw_name, value)),
                FieldType::DateTime => Field::DateTime(DateTimeField::new(raw_name, value)),
                FieldType::MultipleChoice => {
                    Field::MultipleChoice(MultipleChoiceField::new(raw_name, value))
                }
                FieldType::Asset => Field::Assets(AssetsField::new(raw_name, value)),
                FieldType::UrlSlug => {
                    let resolver = query
                        .url_slug_resolver
                        .as_ref()
                        .or_else(|| descriptor.url_slug.as_ref());
                    Field::UrlSlug(UrlSlugField::new(
                        raw_name,
                        value,
                        &raw.system,
                        resolver,
                        sink,
                    ))
                }
                FieldType::RichText => Field::RichText(RichTextField::new(
                    raw_name,
                    value,
                    graph.clone(),
                    self.registry.clone(),
                    query.rich_text_resolver.clone(),
                    sink.clone(),
                )),
                FieldType::ModularContent => {
                    Field::LinkedItems(LinkedItemsField::new(raw_name, value, graph.clone()))
                }
            };

            fields.insert(name, field);
        }

        ContentItem::new(raw.system, fields)
    }
}
