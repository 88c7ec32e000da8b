//! Per-kind row selection for the admin tables.

use std::collections::{BTreeMap, BTreeSet};

use canopy_core::{EntityId, EntityKind};

/// One set of selected IDs per [`EntityKind`], each toggled independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionModel {
    sets: BTreeMap<EntityKind, BTreeSet<EntityId>>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self {
            sets: EntityKind::ALL
                .iter()
                .map(|&kind| (kind, BTreeSet::new()))
                .collect(),
        }
    }
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set_mut(&mut self, kind: EntityKind) -> &mut BTreeSet<EntityId> {
        self.sets.entry(kind).or_default()
    }

    /// Inserts `id` if absent, removes it if present. Returns whether the
    /// ID is selected afterwards.
    pub fn toggle(&mut self, kind: EntityKind, id: EntityId) -> bool {
        let set = self.set_mut(kind);
        if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        }
    }

    /// Replaces the selection for `kind` with exactly `visible`.
    pub fn select_all<I>(&mut self, kind: EntityKind, visible: I)
    where
        I: IntoIterator<Item = EntityId>,
    {
        *self.set_mut(kind) = visible.into_iter().collect();
    }

    pub fn clear(&mut self, kind: EntityKind) {
        self.set_mut(kind).clear();
    }

    pub fn clear_all(&mut self) {
        for set in self.sets.values_mut() {
            set.clear();
        }
    }

    /// Drops selected IDs that are no longer in `existing`.
    pub fn retain_existing(&mut self, kind: EntityKind, existing: &BTreeSet<EntityId>) {
        self.set_mut(kind).retain(|id| existing.contains(id));
    }

    #[must_use]
    pub fn is_selected(&self, kind: EntityKind, id: EntityId) -> bool {
        self.sets.get(&kind).is_some_and(|s| s.contains(&id))
    }

    /// Selected IDs for `kind`, ascending.
    #[must_use]
    pub fn ids(&self, kind: EntityKind) -> Vec<EntityId> {
        self.sets
            .get(&kind)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.sets.get(&kind).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.values().all(BTreeSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_contents() {
        let mut selection = SelectionModel::new();
        selection.select_all(EntityKind::Products, [1, 2]);
        let before = selection.clone();

        assert!(selection.toggle(EntityKind::Products, 3));
        assert!(!selection.toggle(EntityKind::Products, 3));
        assert_eq!(selection, before);

        assert!(!selection.toggle(EntityKind::Products, 1));
        assert!(selection.toggle(EntityKind::Products, 1));
        assert_eq!(selection, before);
    }

    #[test]
    fn kinds_are_independent() {
        let mut selection = SelectionModel::new();
        selection.toggle(EntityKind::Products, 7);
        selection.toggle(EntityKind::Bundles, 7);
        selection.clear(EntityKind::Products);
        assert!(!selection.is_selected(EntityKind::Products, 7));
        assert!(selection.is_selected(EntityKind::Bundles, 7));
    }

    #[test]
    fn select_all_replaces_rather_than_merges() {
        let mut selection = SelectionModel::new();
        selection.toggle(EntityKind::Specials, 99);
        selection.select_all(EntityKind::Specials, vec![3, 1, 2]);
        assert_eq!(selection.ids(EntityKind::Specials), vec![1, 2, 3]);
    }

    #[test]
    fn clear_all_empties_every_kind() {
        let mut selection = SelectionModel::new();
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            selection.toggle(*kind, i64::try_from(i).unwrap());
        }
        assert!(!selection.is_empty());
        selection.clear_all();
        assert!(selection.is_empty());
        for kind in EntityKind::ALL {
            assert_eq!(selection.count(kind), 0);
        }
    }

    #[test]
    fn retain_existing_prunes_deleted_ids() {
        let mut selection = SelectionModel::new();
        selection.select_all(EntityKind::PricingRules, [1, 2, 3]);
        let existing: BTreeSet<EntityId> = [2, 3, 4].into_iter().collect();
        selection.retain_existing(EntityKind::PricingRules, &existing);
        assert_eq!(selection.ids(EntityKind::PricingRules), vec![2, 3]);
    }
}
