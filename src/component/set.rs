use crate::component::Component;
use std::collections::BTreeMap;

/// Open components keyed by identity.
///
/// Storage order is irrelevant; [`ComponentSet::to_sorted_vec`] gives the
/// display order.
#[derive(Debug, Default)]
pub struct ComponentSet {
    by_id: BTreeMap<String, Component>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, component: &Component) -> bool {
        self.by_id.contains_key(&component.id())
    }

    /// Insert unless a component with the same identity is present.
    /// Returns whether the component was inserted.
    pub fn add(&mut self, component: Component) -> bool {
        let id = component.id();
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.by_id.insert(id, component);
        true
    }

    /// Remove by identity. Returns `false` when nothing was removed.
    pub fn delete(&mut self, component: &Component) -> bool {
        self.by_id.remove(&component.id()).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Components ordered by name, then platform priority. The sort is
    /// stable, so ties beyond that keep identity order.
    pub fn to_sorted_vec(&self) -> Vec<&Component> {
        let mut components: Vec<&Component> = self.by_id.values().collect();
        components.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.platform.priority().cmp(&right.platform.priority()))
        });
        components
    }
}
