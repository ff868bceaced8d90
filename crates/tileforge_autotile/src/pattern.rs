//! 3×3 neighborhood occupancy snapshots
//!
//! Cells are stored row-major over `(dz, dx)` with `dz = -1` as the top row:
//!
//! ```text
//!   0 | 1 | 2      (dz = -1)
//!   3 | 4 | 5      (dz =  0)
//!   6 | 7 | 8      (dz = +1)
//! ```
//!
//! Index 4 is the center cell. Rule tables are authored against this same
//! layout, so the two must change together.

use serde::{Deserialize, Serialize};
use tileforge_core::{ChunkStore, TerrainId, TileCoordinate};

pub const TOP_LEFT: usize = 0;
pub const TOP: usize = 1;
pub const TOP_RIGHT: usize = 2;
pub const LEFT: usize = 3;
pub const CENTER: usize = 4;
pub const RIGHT: usize = 5;
pub const BOTTOM_LEFT: usize = 6;
pub const BOTTOM: usize = 7;
pub const BOTTOM_RIGHT: usize = 8;

/// Occupancy of a cell and its 8 horizontal neighbors for one terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NeighborhoodPattern(pub [bool; 9]);

impl NeighborhoodPattern {
    pub const EMPTY: Self = Self([false; 9]);
    pub const FULL: Self = Self([true; 9]);

    /// `(dx, dz)` offset of a pattern slot
    pub const fn offset(index: usize) -> (i32, i32) {
        ((index % 3) as i32 - 1, (index / 3) as i32 - 1)
    }

    /// Pattern slot of a `(dx, dz)` offset in `-1..=1`
    pub const fn index_of(dx: i32, dz: i32) -> usize {
        ((dz + 1) * 3 + (dx + 1)) as usize
    }

    /// Build a pattern by querying each offset.
    pub fn from_fn(mut occupied: impl FnMut(i32, i32) -> bool) -> Self {
        let mut cells = [false; 9];
        for (index, cell) in cells.iter_mut().enumerate() {
            let (dx, dz) = Self::offset(index);
            *cell = occupied(dx, dz);
        }
        Self(cells)
    }

    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    pub fn cells(&self) -> &[bool; 9] {
        &self.0
    }

    /// Number of occupied neighbors, center excluded
    pub fn neighbor_count(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|&(i, &occupied)| i != CENTER && occupied)
            .count()
    }
}

impl From<[bool; 9]> for NeighborhoodPattern {
    fn from(cells: [bool; 9]) -> Self {
        Self(cells)
    }
}

/// Snapshot `terrain`'s occupancy around `center` at the same `y`.
pub fn neighborhood_pattern(
    store: &ChunkStore,
    terrain: TerrainId,
    center: TileCoordinate,
) -> NeighborhoodPattern {
    NeighborhoodPattern::from_fn(|dx, dz| store.occupies(terrain, center.offset(dx, dz)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileforge_core::ChunkSize;

    #[test]
    fn test_offset_index_round_trip() {
        for index in 0..9 {
            let (dx, dz) = NeighborhoodPattern::offset(index);
            assert_eq!(NeighborhoodPattern::index_of(dx, dz), index);
        }
        assert_eq!(NeighborhoodPattern::offset(CENTER), (0, 0));
        assert_eq!(NeighborhoodPattern::offset(TOP), (0, -1));
        assert_eq!(NeighborhoodPattern::offset(RIGHT), (1, 0));
    }

    #[test]
    fn test_pattern_from_store() {
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        let grass = TerrainId::from_u128(1);
        let center = TileCoordinate::new(4, 0, 4);
        // Straddles four chunks
        store.set_tiles(
            grass,
            &[
                center,
                center.offset(0, -1),
                center.offset(-1, -1),
                center.offset(1, 1),
            ],
        );
        // Different layer must not leak into the pattern
        store.set_tiles(grass, &[TileCoordinate::new(5, 1, 4)]);

        let pattern = neighborhood_pattern(&store, grass, center);
        let mut expected = [false; 9];
        expected[CENTER] = true;
        expected[TOP] = true;
        expected[TOP_LEFT] = true;
        expected[BOTTOM_RIGHT] = true;
        assert_eq!(pattern, NeighborhoodPattern(expected));
        assert_eq!(pattern.neighbor_count(), 3);
    }

    #[test]
    fn test_pattern_at_origin_treats_negative_as_empty() {
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        let grass = TerrainId::from_u128(1);
        store.set_tiles(grass, &[TileCoordinate::ZERO, TileCoordinate::new(1, 0, 0)]);

        let pattern = neighborhood_pattern(&store, grass, TileCoordinate::ZERO);
        assert!(pattern.get(CENTER));
        assert!(pattern.get(RIGHT));
        assert!(!pattern.get(LEFT));
        assert!(!pattern.get(TOP_LEFT));
    }
}
