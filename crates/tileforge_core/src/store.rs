//! Chunk store: owns every chunk, keyed by chunk coordinate

use crate::chunk::Chunk;
use crate::coords::{
    ChunkCoordinate, ChunkExtent, ChunkSize, LocalTileCoordinate, TileCoordinate, MAX_CHUNK_EXTENT,
};
use crate::terrain::TerrainId;
use std::collections::{HashMap, HashSet};

/// All chunks of one world.
///
/// Chunks are created lazily on first write and never merged. Reads of
/// coordinates whose chunk does not exist report "unoccupied".
#[derive(Debug, Clone)]
pub struct ChunkStore {
    chunk_size: ChunkSize,
    chunks: HashMap<ChunkCoordinate, Chunk>,
}

impl ChunkStore {
    /// Panics if either dimension of `chunk_size` is outside `1..=MAX_CHUNK_EXTENT`.
    pub fn new(chunk_size: ChunkSize) -> Self {
        assert!(
            chunk_size.is_valid(),
            "chunk size must be in 1..={}, got {}x{}",
            MAX_CHUNK_EXTENT,
            chunk_size.width,
            chunk_size.depth
        );
        Self {
            chunk_size,
            chunks: HashMap::new(),
        }
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    /// Chunk index containing `coord`, or `None` if it lies outside the
    /// addressable grid (negative, or beyond the `u16` chunk range).
    pub fn try_chunk_coordinate(&self, coord: TileCoordinate) -> Option<ChunkCoordinate> {
        self.chunk_size.chunk_of(coord)
    }

    /// Chunk index containing `coord`.
    ///
    /// Panics if the coordinate is outside the addressable grid.
    pub fn chunk_coordinate(&self, coord: TileCoordinate) -> ChunkCoordinate {
        match self.try_chunk_coordinate(coord) {
            Some(chunk) => chunk,
            None => panic!("{:?} is outside the addressable world grid", coord),
        }
    }

    pub fn extent(&self, chunk: ChunkCoordinate) -> ChunkExtent {
        ChunkExtent::new(chunk, self.chunk_size)
    }

    pub fn get_or_create(&mut self, chunk: ChunkCoordinate) -> &mut Chunk {
        let size = self.chunk_size;
        self.chunks
            .entry(chunk)
            .or_insert_with(|| Chunk::new(ChunkExtent::new(chunk, size)))
    }

    pub fn chunk_at(&self, chunk: ChunkCoordinate) -> Option<&Chunk> {
        self.chunks.get(&chunk)
    }

    /// Chunk holding `coord`, if it has been created
    pub fn chunk_containing(&self, coord: TileCoordinate) -> Option<&Chunk> {
        self.try_chunk_coordinate(coord)
            .and_then(|chunk| self.chunks.get(&chunk))
    }

    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkCoordinate, &Chunk)> {
        self.chunks.iter()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Every terrain occupying `coord`. Empty for unaddressable coordinates.
    pub fn terrains_at(&self, coord: TileCoordinate) -> HashSet<TerrainId> {
        self.chunk_containing(coord)
            .map(|chunk| chunk.terrains_at(coord))
            .unwrap_or_default()
    }

    /// Whether `terrain` occupies `coord`
    pub fn occupies(&self, terrain: TerrainId, coord: TileCoordinate) -> bool {
        self.chunk_containing(coord)
            .is_some_and(|chunk| chunk.contains(terrain, chunk.area.to_local(coord)))
    }

    /// Occupy `coords` with `terrain`. Returns how many cells were newly occupied.
    pub fn set_tiles(&mut self, terrain: TerrainId, coords: &[TileCoordinate]) -> usize {
        self.group_by_chunk(coords)
            .into_iter()
            .map(|(chunk, locals)| self.get_or_create(chunk).set_tiles(terrain, locals))
            .sum()
    }

    /// Vacate `coords` for `terrain`. Missing chunks or sections are no-ops.
    /// Returns how many cells were actually vacated.
    pub fn remove_tiles(&mut self, terrain: TerrainId, coords: &[TileCoordinate]) -> usize {
        self.group_by_chunk(coords)
            .into_iter()
            .map(|(chunk, locals)| match self.chunks.get_mut(&chunk) {
                Some(chunk) => chunk.remove_tiles(terrain, locals),
                None => 0,
            })
            .sum()
    }

    /// Drop the terrain's section from every chunk. Returns `false` if no chunk held it.
    pub fn remove_terrain(&mut self, terrain: TerrainId) -> bool {
        let mut removed = false;
        for chunk in self.chunks.values_mut() {
            removed |= chunk.remove_terrain(terrain);
        }
        removed
    }

    /// Destroy one chunk as a whole
    pub fn remove_chunk(&mut self, chunk: ChunkCoordinate) -> Option<Chunk> {
        self.chunks.remove(&chunk)
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Global coordinates of every tile `terrain` occupies, across all chunks.
    pub fn enumerate_tiles(&self, terrain: TerrainId) -> Vec<TileCoordinate> {
        self.chunks
            .values()
            .flat_map(|chunk| chunk.tiles_of(terrain))
            .collect()
    }

    /// Every terrain that has a section in at least one chunk
    pub fn terrains(&self) -> HashSet<TerrainId> {
        self.chunks
            .values()
            .flat_map(|chunk| chunk.sections().iter().map(|s| s.terrain))
            .collect()
    }

    fn group_by_chunk(
        &self,
        coords: &[TileCoordinate],
    ) -> HashMap<ChunkCoordinate, Vec<LocalTileCoordinate>> {
        let mut grouped: HashMap<ChunkCoordinate, Vec<LocalTileCoordinate>> = HashMap::new();
        for &coord in coords {
            let chunk = self.chunk_coordinate(coord);
            let local = self.extent(chunk).to_local(coord);
            grouped.entry(chunk).or_default().push(local);
        }
        grouped
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new(ChunkSize::default())
    }
}
