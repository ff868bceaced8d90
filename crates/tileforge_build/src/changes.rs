//! Change notifications produced by build and destroy

use std::collections::HashSet;
use tileforge_core::TileCoordinate;

/// Cells touched by one operation.
///
/// Hosts use this to mark persisted state dirty. A cell removed and placed
/// again by the same operation (e.g. [`rebuild`](crate::WorldBuilder::rebuild))
/// appears in both `removed` and `placed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Newly materialized tiles
    pub placed: HashSet<TileCoordinate>,
    /// Tiles taken out of the world
    pub removed: HashSet<TileCoordinate>,
    /// Existing tiles whose variant was re-resolved to a different value
    pub changed: HashSet<TileCoordinate>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Number of distinct coordinates touched
    pub fn len(&self) -> usize {
        self.coordinates().len()
    }

    /// Union of every touched coordinate
    pub fn coordinates(&self) -> HashSet<TileCoordinate> {
        self.placed
            .iter()
            .chain(&self.removed)
            .chain(&self.changed)
            .copied()
            .collect()
    }

    pub fn merge(&mut self, other: ChangeSet) {
        self.placed.extend(other.placed);
        self.removed.extend(other.removed);
        self.changed.extend(other.changed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_distinct_coordinates() {
        let a = TileCoordinate::new(1, 0, 1);
        let b = TileCoordinate::new(2, 0, 1);
        let mut changes = ChangeSet::new();
        assert!(changes.is_empty());

        changes.removed.insert(a);
        changes.placed.insert(a);
        changes.changed.insert(b);
        assert_eq!(changes.len(), 2);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut first = ChangeSet::new();
        first.placed.insert(TileCoordinate::new(0, 0, 0));
        let mut second = ChangeSet::new();
        second.changed.insert(TileCoordinate::new(1, 0, 0));

        first.merge(second);
        assert_eq!(first.placed.len(), 1);
        assert_eq!(first.changed.len(), 1);
    }
}
