//! Terrain identity

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque 128-bit identifier naming a terrain definition.
///
/// Terrains are compared by value; two ids naming the same UUID are the same
/// terrain regardless of where the definition lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainId(pub Uuid);

impl TerrainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TerrainId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TerrainId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TerrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
