//! Per-chunk terrain occupancy

use crate::coords::{ChunkExtent, LocalTileCoordinate, TileCoordinate};
use crate::terrain::TerrainId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of cells one terrain occupies inside a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainSection {
    pub terrain: TerrainId,
    pub tiles: HashSet<LocalTileCoordinate>,
}

impl TerrainSection {
    pub fn new(terrain: TerrainId) -> Self {
        Self {
            terrain,
            tiles: HashSet::new(),
        }
    }

    pub fn contains(&self, local: LocalTileCoordinate) -> bool {
        self.tiles.contains(&local)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// A fixed-size partition of the world holding one section per terrain.
///
/// Sections of different terrains may overlap on the same cell; a terrain
/// occupies a given cell at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub area: ChunkExtent,
    sections: Vec<TerrainSection>,
}

impl Chunk {
    pub fn new(area: ChunkExtent) -> Self {
        Self {
            area,
            sections: Vec::new(),
        }
    }

    /// Sections in insertion order
    pub fn sections(&self) -> &[TerrainSection] {
        &self.sections
    }

    pub fn section(&self, terrain: TerrainId) -> Option<&TerrainSection> {
        self.sections.iter().find(|s| s.terrain == terrain)
    }

    fn section_mut(&mut self, terrain: TerrainId) -> Option<&mut TerrainSection> {
        self.sections.iter_mut().find(|s| s.terrain == terrain)
    }

    fn section_or_insert(&mut self, terrain: TerrainId) -> &mut TerrainSection {
        let index = match self.sections.iter().position(|s| s.terrain == terrain) {
            Some(index) => index,
            None => {
                self.sections.push(TerrainSection::new(terrain));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Every terrain occupying the given global coordinate.
    pub fn terrains_at(&self, coord: TileCoordinate) -> HashSet<TerrainId> {
        let local = self.area.to_local(coord);
        self.sections
            .iter()
            .filter(|s| s.contains(local))
            .map(|s| s.terrain)
            .collect()
    }

    pub fn contains(&self, terrain: TerrainId, local: LocalTileCoordinate) -> bool {
        self.section(terrain).is_some_and(|s| s.contains(local))
    }

    /// Union `tiles` into the terrain's section, creating it if needed.
    /// Returns how many cells were newly occupied.
    pub fn set_tiles(
        &mut self,
        terrain: TerrainId,
        tiles: impl IntoIterator<Item = LocalTileCoordinate>,
    ) -> usize {
        let section = self.section_or_insert(terrain);
        tiles
            .into_iter()
            .filter(|local| section.tiles.insert(*local))
            .count()
    }

    /// Remove `tiles` from the terrain's section. A missing section is a no-op.
    /// Returns how many cells were actually vacated.
    pub fn remove_tiles(
        &mut self,
        terrain: TerrainId,
        tiles: impl IntoIterator<Item = LocalTileCoordinate>,
    ) -> usize {
        let Some(section) = self.section_mut(terrain) else {
            return 0;
        };
        tiles
            .into_iter()
            .filter(|local| section.tiles.remove(local))
            .count()
    }

    /// Drop the terrain's section entirely. Returns `false` if it did not exist.
    pub fn remove_terrain(&mut self, terrain: TerrainId) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.terrain != terrain);
        self.sections.len() != before
    }

    /// True when no section holds any tile
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.is_empty())
    }

    /// Global coordinates of every tile the terrain occupies in this chunk.
    pub fn tiles_of(&self, terrain: TerrainId) -> impl Iterator<Item = TileCoordinate> + '_ {
        let area = self.area;
        self.section(terrain)
            .into_iter()
            .flat_map(move |s| s.tiles.iter().map(move |local| local.to_global(&area)))
    }
}
