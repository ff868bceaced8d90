//! Chunked, rule-driven tile world authoring
//!
//! `tileforge` stores which terrain occupies which cell, picks the visual
//! variant of every tile from its 3×3 neighborhood, and keeps neighbors
//! consistent as cells are painted and erased.
//!
//! This crate re-exports the pieces:
//! - [`tileforge_core`] - coordinates and the chunk store
//! - [`tileforge_autotile`] - rule tables, variants and terrain catalogs
//! - [`tileforge_build`] - the incremental build engine, materializer contract and bake
//!
//! # Example
//!
//! ```rust,ignore
//! use tileforge::prelude::*;
//!
//! let config = WorldConfig::load(Path::new("world.toml"))?;
//! let library = load_terrain_library(Path::new("terrains.json"))?;
//! let grass = library.find_by_name("Grass").map(|t| t.id).unwrap();
//!
//! let mut store = ChunkStore::new(config.chunk);
//! let mut builder = WorldBuilder::new(&library, RecordingMaterializer::new(), config.propagation);
//! builder.build(&mut store, grass, &[TileCoordinate::new(5, 0, 5)], true)?;
//!
//! let baked = bake(&store, &library);
//! ```

pub mod prelude;

pub use tileforge_autotile;
pub use tileforge_build;
pub use tileforge_core;
