//! Error types for building and configuration

use std::path::PathBuf;
use thiserror::Error;
use tileforge_core::TerrainId;

/// Errors returned by build, destroy and bake operations
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Terrain {0} is not defined in the catalog")]
    UnknownTerrain(TerrainId),
    /// A propagation ceiling was hit. `depth` counts passes that changed a
    /// variant; `visited` counts candidate cells examined.
    #[error(
        "Propagation for terrain {terrain} did not settle: {depth} changing passes, {visited} cells visited"
    )]
    RunawayPropagation {
        terrain: TerrainId,
        depth: u32,
        visited: usize,
    },
}

/// Errors that can occur when loading or saving a world configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
