//! Linked-item arena.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::content::item::ContentItem;

/// Every modular item inlined in one response, keyed by codename.
///
/// The arena is built in full before any rich text resolution reads from
/// it, then treated as read-only. It may describe cycles (A embeds B
/// embeds A): fields hold `Weak` handles to the arena and the response
/// envelope holds the one strong handle, so content cycles never become
/// reference cycles.
#[derive(Debug, Default)]
pub struct LinkedItemGraph {
    items: BTreeMap<String, Arc<ContentItem>>,
}

impl LinkedItemGraph {
    pub(crate) fn new(items: BTreeMap<String, Arc<ContentItem>>) -> Self {
        Self { items }
    }

    /// Item by codename.
    pub fn get(&self, codename: &str) -> Option<&Arc<ContentItem>> {
        self.items.get(codename)
    }

    pub fn contains(&self, codename: &str) -> bool {
        self.items.contains_key(codename)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate codename/item pairs in codename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ContentItem>)> {
        self.items.iter().map(|(codename, item)| (codename.as_str(), item))
    }
}
