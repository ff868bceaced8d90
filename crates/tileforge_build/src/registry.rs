//! Live tile bookkeeping: the variant and backend handle of every placed tile

use crate::materialize::Materializer;
use std::collections::HashMap;
use tileforge_autotile::{TileDescriptor, TileVariant, VariantSet};
use tileforge_core::{TerrainId, TileCoordinate};
use tracing::warn;

/// One tile the engine has placed.
///
/// `descriptor`/`handle` are `None` when the terrain has no tile authored for
/// the variant; the cell is still occupied and still re-evaluated.
#[derive(Debug)]
pub(crate) struct LiveTile<H> {
    pub variant: TileVariant,
    pub descriptor: Option<TileDescriptor>,
    pub handle: Option<H>,
}

pub(crate) struct TileRegistry<M: Materializer> {
    pub materializer: M,
    tiles: HashMap<TerrainId, HashMap<TileCoordinate, LiveTile<M::Handle>>>,
}

impl<M: Materializer> TileRegistry<M> {
    pub fn new(materializer: M) -> Self {
        Self {
            materializer,
            tiles: HashMap::new(),
        }
    }

    pub fn get(&self, terrain: TerrainId, coord: TileCoordinate) -> Option<&LiveTile<M::Handle>> {
        self.tiles.get(&terrain)?.get(&coord)
    }

    pub fn contains(&self, terrain: TerrainId, coord: TileCoordinate) -> bool {
        self.get(terrain, coord).is_some()
    }

    /// Materialize `variant` at `coord`, replacing whatever tile was there.
    pub fn place(
        &mut self,
        terrain: TerrainId,
        coord: TileCoordinate,
        variant: TileVariant,
        variants: &VariantSet,
    ) {
        self.remove(terrain, coord);

        let descriptor = variants.resolve(variant);
        let handle = match &descriptor {
            Some(descriptor) => Some(self.materializer.materialize(descriptor, coord)),
            None => {
                warn!(
                    %terrain,
                    ?coord,
                    variant = variant.name(),
                    "no tile authored for variant; cell left unmaterialized"
                );
                None
            }
        };

        self.tiles.entry(terrain).or_default().insert(
            coord,
            LiveTile {
                variant,
                descriptor,
                handle,
            },
        );
    }

    /// Dematerialize and forget the tile. Returns `false` if there was none.
    pub fn remove(&mut self, terrain: TerrainId, coord: TileCoordinate) -> bool {
        let Some(tiles) = self.tiles.get_mut(&terrain) else {
            return false;
        };
        let Some(tile) = tiles.remove(&coord) else {
            return false;
        };
        if tiles.is_empty() {
            self.tiles.remove(&terrain);
        }
        if let Some(handle) = tile.handle {
            self.materializer.dematerialize(handle);
        }
        true
    }

    /// Remove every tile of one terrain. Returns how many were removed.
    pub fn remove_terrain(&mut self, terrain: TerrainId) -> usize {
        let Some(tiles) = self.tiles.remove(&terrain) else {
            return 0;
        };
        let count = tiles.len();
        for handle in tiles.into_values().filter_map(|tile| tile.handle) {
            self.materializer.dematerialize(handle);
        }
        count
    }

    pub fn clear(&mut self) -> usize {
        let terrains: Vec<TerrainId> = self.tiles.keys().copied().collect();
        terrains
            .into_iter()
            .map(|terrain| self.remove_terrain(terrain))
            .sum()
    }

    pub fn coordinates(&self, terrain: TerrainId) -> Vec<TileCoordinate> {
        self.tiles
            .get(&terrain)
            .map(|tiles| tiles.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn terrains(&self) -> Vec<TerrainId> {
        self.tiles.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.values().map(HashMap::len).sum()
    }
}
