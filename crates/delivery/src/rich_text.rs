//! Rich text placeholder resolution.
//!
//! Scans a delivered html fragment for embedded-item placeholders and item
//! links, substitutes resolved markup, and copies every untouched region
//! verbatim. Resolved fragments are spliced in raw and never re-scanned;
//! recursion across items happens through their memoized rich text fields,
//! which terminates mutual references once each per-item cache is
//! populated.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::content::graph::LinkedItemGraph;
use crate::content::registry::{ModelRegistry, RichTextResolverFn};
use crate::diagnostics::{Diagnostic, DiagnosticSink};

// The pattern literals are compile-time constants; a parse failure is a
// programmer error, so the helper is allowed to expect.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("placeholder pattern must compile")
}

/// Matches the two placeholder shapes: self-contained object embeds and
/// anchors that reference an item instead of carrying an href.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r#"(?is)(?P<embed><object\b[^>]*\bdata-type\s*=\s*"item"[^>]*>\s*</object>)"#,
        r#"|(?P<link><a\b[^>]*\bdata-item-id\s*=\s*"[^"]*"[^>]*>)"#,
    ))
});

/// Extracts the codename attribute of an embed tag.
static CODENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\bdata-codename\s*=\s*"([^"]*)""#));

/// Extracts the item reference of a link tag.
static ITEM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\bdata-item-id\s*=\s*"([^"]*)""#));

/// Resolve every placeholder in `html` against the linked-item graph.
///
/// Object embeds are replaced whole by the resolved markup; item links
/// keep their tag and inner content, only the reference attribute is
/// rewritten to an `href`. `graph` is `None` when the owning response (and
/// with it the arena) has been dropped; every reference then resolves as
/// missing.
pub fn resolve_fragment(
    html: &str,
    graph: Option<&LinkedItemGraph>,
    registry: &ModelRegistry,
    override_resolver: Option<&RichTextResolverFn>,
    sink: &DiagnosticSink,
) -> String {
    let mut output = String::with_capacity(html.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_RE.captures_iter(html) {
        let (start, end, replacement) = if let Some(embed) = caps.name("embed") {
            let codename = first_capture(&CODENAME_RE, embed.as_str());
            let markup = resolve_item(&codename, graph, registry, override_resolver, sink);
            (embed.start(), embed.end(), markup)
        } else if let Some(link) = caps.name("link") {
            let codename = first_capture(&ITEM_ID_RE, link.as_str());
            let href = resolve_item(&codename, graph, registry, override_resolver, sink);
            let attribute = format!("href=\"{}\"", escape_attribute(&href));
            let tag = ITEM_ID_RE
                .replace(link.as_str(), NoExpand(&attribute))
                .into_owned();
            (link.start(), link.end(), tag)
        } else {
            continue;
        };

        output.push_str(&html[last_end..start]);
        output.push_str(&replacement);
        last_end = end;
    }

    output.push_str(&html[last_end..]);
    output
}

/// Resolved markup for one referenced item.
///
/// Priority: the query-level override, then the resolver registered for
/// the item's type, then a diagnostic plus an empty string. A codename
/// absent from the graph is also a diagnostic plus an empty string; it is
/// never an error.
fn resolve_item(
    codename: &str,
    graph: Option<&LinkedItemGraph>,
    registry: &ModelRegistry,
    override_resolver: Option<&RichTextResolverFn>,
    sink: &DiagnosticSink,
) -> String {
    let Some(item) = graph.and_then(|graph| graph.get(codename)) else {
        sink.record(Diagnostic::MissingLinkedItem {
            codename: codename.to_string(),
        });
        return String::new();
    };

    if let Some(resolve) = override_resolver {
        return resolve(item);
    }

    if let Some(resolve) = registry
        .get(&item.system().item_type)
        .and_then(|descriptor| descriptor.rich_text)
    {
        return resolve(item);
    }

    sink.record(Diagnostic::MissingRichTextResolver {
        codename: codename.to_string(),
        item_type: item.system().item_type.clone(),
    });
    String::new()
}

/// First capture group of `re` in `text`, or empty when absent.
fn first_capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Minimal attribute-value escaping for spliced href values.
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
