//! World configuration, loadable from TOML
//!
//! ```toml
//! [chunk]
//! width = 32
//! depth = 32
//!
//! [propagation]
//! max_depth = 16
//! max_visited_cells = 65536
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tileforge_core::{ChunkSize, MAX_CHUNK_EXTENT};

/// Default number of tile-changing propagation passes before a build is
/// considered runaway
pub const DEFAULT_MAX_PROPAGATION_DEPTH: u32 = 64;

/// Default number of candidate cells one propagation may examine
pub const DEFAULT_MAX_VISITED_CELLS: usize = 1 << 20;

/// Safety ceiling for neighbor propagation.
///
/// `max_depth` bounds the passes that change at least one variant. The final
/// pass that confirms a fixed point changes nothing and is never counted, so
/// a depth of 1 is enough for any build whose neighbors settle after one
/// round of updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationLimits {
    pub max_depth: u32,
    /// Total candidate cells examined across all passes
    pub max_visited_cells: usize,
}

impl Default for PropagationLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PROPAGATION_DEPTH,
            max_visited_cells: DEFAULT_MAX_VISITED_CELLS,
        }
    }
}

/// Settings for one world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk: ChunkSize,
    pub propagation: PropagationLimits,
}

impl WorldConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Fails for limits TOML cannot represent, such as counts above `i64::MAX`.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write this configuration as TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.chunk.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "chunk size must be in 1..={}, got {}x{}",
                MAX_CHUNK_EXTENT, self.chunk.width, self.chunk.depth
            )));
        }
        if self.propagation.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "propagation.max_depth must be at least 1".to_string(),
            ));
        }
        if self.propagation.max_visited_cells == 0 {
            return Err(ConfigError::Invalid(
                "propagation.max_visited_cells must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
