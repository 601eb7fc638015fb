//! Scoped observer table.

use super::entry::ObserverEntry;
use breakfall_core::{Exchange, HandlerId};
use std::collections::HashMap;

/// Per-unit observer lists keyed by [`HandlerId`].
///
/// Lookups of an absent key yield an empty slice and never insert.
pub(crate) struct ScopedTable<X: Exchange> {
    map: HashMap<HandlerId, Vec<ObserverEntry<X>>>,
}

impl<X: Exchange> ScopedTable<X> {
    pub(crate) fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub(crate) fn push(&mut self, handler_id: HandlerId, entry: ObserverEntry<X>) {
        self.map.entry(handler_id).or_default().push(entry);
    }

    /// Observers registered for `handler_id`, in registration order.
    pub(crate) fn get(&self, handler_id: &str) -> &[ObserverEntry<X>] {
        self.map.get(handler_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn units(&self) -> impl Iterator<Item = &HandlerId> {
        self.map.keys()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &ObserverEntry<X>> {
        self.map.values().flatten()
    }

    pub(crate) fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
