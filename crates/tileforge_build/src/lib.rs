//! Incremental build engine for tileforge worlds
//!
//! - [`WorldBuilder`] places and removes terrain tiles, keeping neighbors
//!   consistent by propagating variant changes to a fixed point
//! - [`Materializer`] is the host's backend for turning resolved tiles into
//!   something visible; [`RecordingMaterializer`] is a headless one
//! - [`bake`] re-derives every variant into a [`BakedWorld`] snapshot
//! - [`WorldConfig`] carries chunk size and propagation limits, loadable from TOML
//!
//! # Example
//!
//! ```rust,ignore
//! use tileforge_build::{PropagationLimits, RecordingMaterializer, WorldBuilder};
//!
//! let mut builder = WorldBuilder::new(library, RecordingMaterializer::new(), PropagationLimits::default());
//! let changes = builder.build(&mut store, grass, &coords, true)?;
//! for coord in changes.coordinates() {
//!     mark_dirty(coord);
//! }
//! ```

pub mod bake;
pub mod builder;
pub mod changes;
pub mod config;
pub mod error;
pub mod materialize;
mod propagate;
mod registry;

pub use bake::{bake, BakedChunk, BakedTerrainSection, BakedTile, BakedWorld};
pub use builder::WorldBuilder;
pub use changes::ChangeSet;
pub use config::{
    PropagationLimits, WorldConfig, DEFAULT_MAX_PROPAGATION_DEPTH, DEFAULT_MAX_VISITED_CELLS,
};
pub use error::{BuildError, ConfigError};
pub use materialize::{Materializer, RecordedTile, RecordingMaterializer};
pub use propagate::PropagationStats;

// Re-export dependencies
pub use tileforge_autotile;
pub use tileforge_core;
