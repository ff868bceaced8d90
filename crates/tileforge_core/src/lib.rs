//! Core data structures for tileforge
//!
//! This crate provides the storage layer of a chunked tile world:
//! - `TileCoordinate` / `LocalTileCoordinate` - global and chunk-relative addresses
//! - `ChunkCoordinate` / `ChunkExtent` - chunk indexing and coordinate conversion
//! - `TerrainId` - value identity of a terrain definition
//! - `Chunk` / `TerrainSection` - per-terrain occupancy sets within one chunk
//! - `ChunkStore` - lazily created chunks owned by one world
//!
//! It knows nothing about rules, variants or rendering.

mod chunk;
mod coords;
mod store;
mod terrain;

pub use chunk::{Chunk, TerrainSection};
pub use coords::{
    ChunkCoordinate, ChunkExtent, ChunkSize, LocalTileCoordinate, TileCoordinate, MAX_CHUNK_EXTENT,
};
pub use store::ChunkStore;
pub use terrain::TerrainId;
