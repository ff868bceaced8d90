//! Bake: a fresh, read-only snapshot of every tile's variant
//!
//! Baking ignores whatever the builder has live and re-derives each variant
//! from the store alone, so the result is correct even after builds that ran
//! without propagation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tileforge_autotile::{neighborhood_pattern, TerrainCatalog, TileVariant};
use tileforge_core::{
    ChunkCoordinate, ChunkExtent, ChunkSize, ChunkStore, LocalTileCoordinate, TerrainId,
    TileCoordinate,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakedTile {
    pub variant: TileVariant,
    /// Reserved for culling fully surrounded tiles. Always `false` for now.
    pub occludable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakedTerrainSection {
    pub terrain: TerrainId,
    /// Written as a list of `[coordinate, tile]` pairs sorted by coordinate,
    /// since formats like JSON only accept string map keys.
    #[serde(with = "tile_entries")]
    pub tiles: HashMap<LocalTileCoordinate, BakedTile>,
}

mod tile_entries {
    use super::BakedTile;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::HashMap;
    use tileforge_core::LocalTileCoordinate;

    pub fn serialize<S: Serializer>(
        tiles: &HashMap<LocalTileCoordinate, BakedTile>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = tiles.iter().collect();
        entries.sort_by_key(|(local, _)| **local);
        serializer.collect_seq(entries)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<LocalTileCoordinate, BakedTile>, D::Error> {
        let entries = Vec::<(LocalTileCoordinate, BakedTile)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakedChunk {
    pub area: ChunkExtent,
    pub sections: Vec<BakedTerrainSection>,
}

impl BakedChunk {
    pub fn section(&self, terrain: TerrainId) -> Option<&BakedTerrainSection> {
        self.sections.iter().find(|s| s.terrain == terrain)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BakedWorld {
    /// Chunk size of the store this was baked from
    pub chunk_size: ChunkSize,
    pub chunks: HashMap<ChunkCoordinate, BakedChunk>,
}

impl BakedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any previous bake and rebuild it from `store`.
    ///
    /// Sections of `empty` terrains are left out. Sections whose terrain is
    /// missing from `catalog` are skipped with a warning.
    pub fn rebake(&mut self, store: &ChunkStore, catalog: &impl TerrainCatalog) {
        self.chunks.clear();
        self.chunk_size = store.chunk_size();

        for (&coordinate, chunk) in store.chunks() {
            let mut sections = Vec::new();
            for section in chunk.sections() {
                if section.is_empty() {
                    continue;
                }
                let Some(definition) = catalog.definition(section.terrain) else {
                    warn!(
                        terrain = %section.terrain,
                        chunk = ?coordinate,
                        "terrain missing from catalog; section not baked"
                    );
                    continue;
                };
                if definition.empty {
                    continue;
                }

                let tiles = section
                    .tiles
                    .iter()
                    .map(|&local| {
                        let global = local.to_global(&chunk.area);
                        let pattern = neighborhood_pattern(store, section.terrain, global);
                        let tile = BakedTile {
                            variant: definition.rules.match_variant(&pattern),
                            occludable: false,
                        };
                        (local, tile)
                    })
                    .collect();
                sections.push(BakedTerrainSection {
                    terrain: section.terrain,
                    tiles,
                });
            }

            if !sections.is_empty() {
                self.chunks.insert(
                    coordinate,
                    BakedChunk {
                        area: chunk.area,
                        sections,
                    },
                );
            }
        }

        debug!(chunks = self.chunks.len(), tiles = self.tile_count(), "baked world");
    }

    pub fn chunk(&self, coordinate: ChunkCoordinate) -> Option<&BakedChunk> {
        self.chunks.get(&coordinate)
    }

    /// Baked variant of `terrain` at a global coordinate
    pub fn variant_at(&self, terrain: TerrainId, coord: TileCoordinate) -> Option<TileVariant> {
        let chunk = self.chunks.get(&self.chunk_size.chunk_of(coord)?)?;
        if !chunk.area.contains(coord) {
            return None;
        }
        let local = chunk.area.to_local(coord);
        chunk.section(terrain)?.tiles.get(&local).map(|t| t.variant)
    }

    /// Number of baked chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn tile_count(&self) -> usize {
        self.chunks
            .values()
            .flat_map(|chunk| &chunk.sections)
            .map(|section| section.tiles.len())
            .sum()
    }
}

/// Bake `store` into a new snapshot.
pub fn bake(store: &ChunkStore, catalog: &impl TerrainCatalog) -> BakedWorld {
    let mut world = BakedWorld::new();
    world.rebake(store, catalog);
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileforge_autotile::{TerrainDefinition, TerrainLibrary};

    #[test]
    fn test_bake_recomputes_from_store() {
        let mut library = TerrainLibrary::new();
        let grass = library.insert(TerrainDefinition::new("Grass")).unwrap();
        let mut store = ChunkStore::new(ChunkSize::new(2, 2));
        let block: Vec<_> = (0..3)
            .flat_map(|z| (0..3).map(move |x| TileCoordinate::new(x, 0, z)))
            .collect();
        store.set_tiles(grass, &block);

        let world = bake(&store, &library);
        // 3x3 over 2x2 chunks spans four chunks
        assert_eq!(world.len(), 4);
        assert_eq!(world.tile_count(), 9);
        assert_eq!(world.variant_at(grass, TileCoordinate::new(1, 0, 1)), Some(TileVariant::Fill));
        assert_eq!(
            world.variant_at(grass, TileCoordinate::new(0, 0, 0)),
            Some(TileVariant::ExteriorTopLeft)
        );
        assert_eq!(
            world.variant_at(grass, TileCoordinate::new(2, 0, 1)),
            Some(TileVariant::EdgeRight)
        );
        assert_eq!(world.variant_at(grass, TileCoordinate::new(5, 0, 5)), None);

        let all_flags_clear = world
            .chunks
            .values()
            .flat_map(|c| &c.sections)
            .flat_map(|s| s.tiles.values())
            .all(|t| !t.occludable);
        assert!(all_flags_clear);
    }

    #[test]
    fn test_rebake_clears_previous_state() {
        let mut library = TerrainLibrary::new();
        let grass = library.insert(TerrainDefinition::new("Grass")).unwrap();
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        store.set_tiles(grass, &[TileCoordinate::new(9, 0, 9)]);

        let mut world = bake(&store, &library);
        assert_eq!(world.len(), 1);

        store.clear();
        store.set_tiles(grass, &[TileCoordinate::new(1, 0, 1)]);
        world.rebake(&store, &library);
        assert_eq!(world.len(), 1);
        assert!(world.chunk(ChunkCoordinate::new(2, 2)).is_none());
        assert!(world.chunk(ChunkCoordinate::new(0, 0)).is_some());
    }

    #[test]
    fn test_unknown_and_empty_terrains_are_skipped() {
        let mut library = TerrainLibrary::new();
        let air = library.insert(TerrainDefinition::new("Air").empty()).unwrap();
        let ghost = TerrainId::from_u128(7);
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        store.set_tiles(air, &[TileCoordinate::ZERO]);
        store.set_tiles(ghost, &[TileCoordinate::new(1, 0, 0)]);

        let world = bake(&store, &library);
        assert!(world.is_empty());
    }

    #[test]
    fn test_variant_lookup_across_chunks() {
        let mut library = TerrainLibrary::new();
        let grass = library.insert(TerrainDefinition::new("Grass")).unwrap();
        let mut store = ChunkStore::new(ChunkSize::new(3, 2));
        let cells = [
            TileCoordinate::new(0, 0, 0),
            TileCoordinate::new(7, 0, 5),
            TileCoordinate::new(30, 4, 1),
        ];
        store.set_tiles(grass, &cells);

        let world = bake(&store, &library);
        assert_eq!(world.chunk_size, ChunkSize::new(3, 2));
        assert_eq!(world.len(), 3);
        for cell in cells {
            assert_eq!(world.variant_at(grass, cell), Some(TileVariant::Fill));
        }
        assert_eq!(world.variant_at(grass, TileCoordinate::new(8, 0, 5)), None);
        assert_eq!(world.variant_at(grass, TileCoordinate::new(-1, 0, 0)), None);
        assert_eq!(world.variant_at(grass, TileCoordinate::new(0, -2, 0)), None);
        assert_eq!(world.variant_at(grass, TileCoordinate::new(i32::MAX, 0, 0)), None);
        assert_eq!(world.variant_at(TerrainId::from_u128(9), cells[1]), None);
    }

    #[test]
    fn test_baked_chunk_json_round_trip() {
        let mut library = TerrainLibrary::new();
        let grass = library.insert(TerrainDefinition::new("Grass")).unwrap();
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        let block: Vec<_> = (0..2)
            .flat_map(|z| (0..3).map(move |x| TileCoordinate::new(x, 0, z)))
            .collect();
        store.set_tiles(grass, &block);

        let world = bake(&store, &library);
        let chunk = world.chunk(ChunkCoordinate::new(0, 0)).unwrap();
        let json = serde_json::to_string(chunk).unwrap();
        let restored: BakedChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, chunk);
        assert_eq!(restored.section(grass).unwrap().tiles.len(), 6);
    }
}
