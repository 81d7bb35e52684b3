//! Integration tests for rich text resolution.
//!
//! These run through the mapper so every field carries a real arena
//! handle: memoization, resolver priority, link rewriting, missing items,
//! and cycle behavior.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use stratum_delivery::QueryConfig;
use stratum_delivery::content::{ItemMapper, ModelDescriptor, ModelRegistry};
use stratum_delivery::diagnostics::Diagnostic;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("stratum_delivery=warn")
        .try_init();
}

/// One item of type `article` whose body is the given html, plus the given
/// modular items.
fn article_with_body(
    html: &str,
    modular_content: serde_json::Value,
) -> stratum_delivery::content::RawItemEnvelope {
    common::single(
        common::item(
            "a",
            "article",
            json!({"body": {"type": "rich_text", "name": "Body", "value": html}}),
        ),
        modular_content,
    )
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn html_is_resolved_once_and_memoized() {
    init_tracing();
    let registry = ModelRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let raw = article_with_body(
        r#"<p>Intro</p><object data-type="item" data-codename="b"></object>"#,
        json!({"b": common::item("b", "author", json!({}))}),
    );

    let query = QueryConfig::new().rich_text_resolver(move |item| {
        counter.fetch_add(1, Ordering::SeqCst);
        format!("<em>{}</em>", item.system().codename)
    });

    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &query);
    let field = response.item().fields().rich_text("body").unwrap();

    assert!(!field.is_resolved());
    let first = field.html().unwrap();
    let second = field.html().unwrap();

    assert_eq!(&*first, "<p>Intro</p><em>b</em>");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(field.is_resolved());
}

#[test]
fn memoized_resolution_does_not_duplicate_diagnostics() {
    let registry = ModelRegistry::new();
    let raw = article_with_body(
        r#"<object data-type="item" data-codename="ghost"></object>"#,
        json!({}),
    );

    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &QueryConfig::default());
    let field = response.item().fields().rich_text("body").unwrap();

    field.html().unwrap();
    field.html().unwrap();

    assert_eq!(
        response.diagnostics(),
        vec![Diagnostic::MissingLinkedItem {
            codename: "ghost".to_string()
        }]
    );
}

// ============================================================================
// Resolver priority and substitution shapes
// ============================================================================

#[test]
fn link_reference_is_rewritten_to_href() {
    let registry = ModelRegistry::new();
    let raw = article_with_body(
        r#"<p>See <a data-item-id="b">this</a></p>"#,
        json!({"b": common::item("b", "author", json!({}))}),
    );

    let query = QueryConfig::new().rich_text_resolver(|_| "LINK".to_string());
    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &query);
    let html = response.item().fields().rich_text("body").unwrap().html().unwrap();

    assert_eq!(&*html, r#"<p>See <a href="LINK">this</a></p>"#);
}

#[test]
fn embed_resolves_through_the_model_resolver() {
    let registry = ModelRegistry::new();
    registry.register(
        "author",
        ModelDescriptor::new().rich_text(|item| {
            format!(
                "<h3>{}</h3>",
                item.fields().text("full_name").unwrap_or_default()
            )
        }),
    );

    let raw = article_with_body(
        r#"<p>By</p><object data-type="item" data-codename="ana"></object><p>.</p>"#,
        json!({"ana": common::item_with_name("ana", "author", "Ana Ortiz")}),
    );

    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &QueryConfig::default());
    let html = response.item().fields().rich_text("body").unwrap().html().unwrap();

    assert_eq!(&*html, "<p>By</p><h3>Ana Ortiz</h3><p>.</p>");
    assert!(response.diagnostics().is_empty());
}

#[test]
fn query_resolver_beats_model_resolver() {
    let registry = ModelRegistry::new();
    registry.register(
        "author",
        ModelDescriptor::new().rich_text(|_| "<from-model/>".to_string()),
    );

    let raw = article_with_body(
        r#"<object data-type="item" data-codename="b"></object>"#,
        json!({"b": common::item("b", "author", json!({}))}),
    );

    let query = QueryConfig::new().rich_text_resolver(|_| "<from-query/>".to_string());
    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &query);
    let html = response.item().fields().rich_text("body").unwrap().html().unwrap();

    assert_eq!(&*html, "<from-query/>");
}

#[test]
fn missing_resolver_substitutes_empty_with_diagnostic() {
    let registry = ModelRegistry::new();
    let raw = article_with_body(
        r#"<p>x</p><object data-type="item" data-codename="b"></object>"#,
        json!({"b": common::item("b", "author", json!({}))}),
    );

    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_item(raw, &QueryConfig::default());
    let html = response.item().fields().rich_text("body").unwrap().html().unwrap();

    assert_eq!(&*html, "<p>x</p>");
    assert_eq!(
        response.diagnostics(),
        vec![Diagnostic::MissingRichTextResolver {
            codename: "b".to_string(),
            item_type: "author".to_string()
        }]
    );
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn mutual_embeds_terminate() {
    init_tracing();
    let registry = ModelRegistry::new();
    // Articles resolve by rendering their own body; alphas have no resolver,
    // so the innermost reference degrades to an empty fragment.
    registry.register(
        "article",
        ModelDescriptor::new().rich_text(|item| {
            let body = item
                .fields()
                .rich_text("body")
                .map(|field| field.html().map(|html| html.to_string()).unwrap_or_default())
                .unwrap_or_default();
            format!("<aside>{body}</aside>")
        }),
    );

    let a = common::item(
        "a",
        "alpha",
        json!({"body": {"type": "rich_text", "name": "Body", "value":
            r#"<p>A</p><object data-type="item" data-codename="b"></object>"#}}),
    );
    let b = common::item(
        "b",
        "article",
        json!({"body": {"type": "rich_text", "name": "Body", "value":
            r#"<p>B</p><object data-type="item" data-codename="a"></object>"#}}),
    );

    let raw = common::listing(vec![a.clone()], json!({"a": a, "b": b}));
    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_listing(raw, &QueryConfig::default());

    let html = response.items()[0]
        .fields()
        .rich_text("body")
        .unwrap()
        .html()
        .unwrap();

    // B's fragment is embedded; the reference back to A inside it resolved
    // to empty because alphas have no resolver.
    assert_eq!(&*html, "<p>A</p><aside><p>B</p></aside>");
    assert_eq!(
        response.diagnostics(),
        vec![Diagnostic::MissingRichTextResolver {
            codename: "a".to_string(),
            item_type: "alpha".to_string()
        }]
    );
}

#[test]
fn self_embedding_reports_a_cycle_to_the_resolver() {
    let registry = ModelRegistry::new();
    // The resolver tries to render the embedded item's own body, which for
    // a self-embed is the very field being resolved.
    registry.register(
        "article",
        ModelDescriptor::new().rich_text(|item| {
            match item.fields().rich_text("body").map(|field| field.html()) {
                Some(Ok(html)) => html.to_string(),
                Some(Err(_)) => "[cycle]".to_string(),
                None => String::new(),
            }
        }),
    );

    let a = common::item(
        "a",
        "article",
        json!({"body": {"type": "rich_text", "name": "Body", "value":
            r#"<p>me</p><object data-type="item" data-codename="a"></object>"#}}),
    );

    let raw = common::listing(vec![a.clone()], json!({"a": a}));
    let mapper = ItemMapper::new(registry, true);
    let response = mapper.map_listing(raw, &QueryConfig::default());

    let field = response.items()[0].fields().rich_text("body").unwrap();
    let html = field.html().unwrap();

    assert_eq!(&*html, "<p>me</p>[cycle]");
    // The memoized value is served on the second call.
    assert!(Arc::ptr_eq(&html, &field.html().unwrap()));
}
