//! Neighborhood rule matching and variant resolution
//!
//! This crate decides what a terrain tile should look like at a cell:
//! - [`neighborhood_pattern`] snapshots a cell's 3×3 occupancy from a
//!   [`ChunkStore`](tileforge_core::ChunkStore)
//! - [`RuleTable::match_variant`] maps the snapshot to one of 13 [`TileVariant`]s
//! - [`VariantSet::resolve`] turns the variant into a [`TileDescriptor`],
//!   deriving rotations from one canonical tile per rule group
//! - [`TerrainCatalog`] / [`TerrainLibrary`] hold the per-terrain definitions
//!
//! # Example
//!
//! ```rust,ignore
//! use tileforge_autotile::{neighborhood_pattern, RuleTable, TerrainDefinition};
//!
//! let grass = TerrainDefinition::new("Grass");
//! let pattern = neighborhood_pattern(&store, grass.id, coord);
//! let variant = grass.rules.match_variant(&pattern);
//! let tile = grass.variants.resolve(variant);
//! ```

pub mod pattern;
pub mod resolve;
pub mod rules;
pub mod terrain;
pub mod variant;

pub use pattern::{neighborhood_pattern, NeighborhoodPattern};
pub use resolve::{Rotation, TileDescriptor, VariantGroup, VariantSet};
pub use rules::{CellConstraint, RuleEntry, RuleTable};
pub use terrain::{
    load_terrain_library, parse_terrain_library, save_terrain_library, CatalogError,
    TerrainCatalog, TerrainDefinition, TerrainLibrary,
};
pub use variant::{TileVariant, VariantFamily};

// Re-export tileforge_core
pub use tileforge_core;
