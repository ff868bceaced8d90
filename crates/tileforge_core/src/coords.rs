//! Grid coordinate types
//!
//! Global tile positions ([`TileCoordinate`]) are partitioned horizontally into
//! chunks ([`ChunkCoordinate`]). A [`ChunkExtent`] ties a chunk index to its
//! size and converts between global and chunk-local ([`LocalTileCoordinate`])
//! addresses.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Global 3D grid position. `y` is the vertical layer, `x`/`z` are horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TileCoordinate {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset on the horizontal plane, keeping the layer.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y, self.z + dz)
    }

    /// True when no component is negative
    pub const fn is_non_negative(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.z >= 0
    }

    /// The 8 horizontal neighbors at the same `y`, row-major from `(-1, -1)`.
    pub fn horizontal_neighbors(self) -> [TileCoordinate; 8] {
        let mut out = [self; 8];
        let mut i = 0;
        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                out[i] = self.offset(dx, dz);
                i += 1;
            }
        }
        out
    }
}

impl Add for TileCoordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for TileCoordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for TileCoordinate {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Index of a chunk in the horizontal chunk grid. `y` indexes the global `z` axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoordinate {
    pub x: u16,
    pub y: u16,
}

impl ChunkCoordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Pack into a single 32-bit key (`x` in the high half).
    pub const fn key(&self) -> u32 {
        ((self.x as u32) << 16) | self.y as u32
    }

    pub const fn from_key(key: u32) -> Self {
        Self::new((key >> 16) as u16, (key & 0xFFFF) as u16)
    }
}

/// Largest chunk width or depth. Local coordinates are `u16`, so a chunk
/// spans at most `u16::MAX + 1` tiles per axis.
pub const MAX_CHUNK_EXTENT: i32 = u16::MAX as i32 + 1;

/// Horizontal size of a chunk in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSize {
    pub width: i32,
    pub depth: i32,
}

impl ChunkSize {
    pub const fn new(width: i32, depth: i32) -> Self {
        Self { width, depth }
    }

    /// Both dimensions lie in `1..=MAX_CHUNK_EXTENT`.
    pub const fn is_valid(&self) -> bool {
        self.width > 0
            && self.depth > 0
            && self.width <= MAX_CHUNK_EXTENT
            && self.depth <= MAX_CHUNK_EXTENT
    }

    /// Chunk index holding `coord`, or `None` when the coordinate is negative,
    /// above the vertical range, or past the last addressable chunk.
    pub fn chunk_of(&self, coord: TileCoordinate) -> Option<ChunkCoordinate> {
        if !self.is_valid() || !coord.is_non_negative() || coord.y > u16::MAX as i32 {
            return None;
        }
        let cx = u16::try_from(coord.x / self.width).ok()?;
        let cz = u16::try_from(coord.z / self.depth).ok()?;
        Some(ChunkCoordinate::new(cx, cz))
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::new(16, 16)
    }
}

/// Chunk origin plus size. Converts between global and chunk-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkExtent {
    pub coordinate: ChunkCoordinate,
    pub size: ChunkSize,
}

impl ChunkExtent {
    /// Panics if `size` is not valid or the chunk origin does not fit in
    /// global tile space.
    pub fn new(coordinate: ChunkCoordinate, size: ChunkSize) -> Self {
        assert!(
            size.is_valid(),
            "chunk size must be in 1..={}, got {}x{}",
            MAX_CHUNK_EXTENT,
            size.width,
            size.depth
        );
        let extent = Self { coordinate, size };
        assert!(
            extent.origin().is_some(),
            "chunk {:?} of size {}x{} starts outside global tile space",
            coordinate,
            size.width,
            size.depth
        );
        extent
    }

    fn origin(&self) -> Option<(i32, i32)> {
        let x = (self.coordinate.x as i32).checked_mul(self.size.width)?;
        let z = (self.coordinate.y as i32).checked_mul(self.size.depth)?;
        Some((x, z))
    }

    /// Inclusive lower horizontal bound (`y` is always 0).
    pub fn start(&self) -> TileCoordinate {
        match self.origin() {
            Some((x, z)) => TileCoordinate::new(x, 0, z),
            None => panic!(
                "chunk {:?} of size {}x{} starts outside global tile space",
                self.coordinate, self.size.width, self.size.depth
            ),
        }
    }

    /// Inclusive upper horizontal bound (`y` is always 0). Clamped to
    /// `i32::MAX` for the last chunk on an axis.
    pub fn end(&self) -> TileCoordinate {
        let start = self.start();
        let last = |origin: i32, span: i32| {
            i32::try_from(i64::from(origin) + i64::from(span) - 1).unwrap_or(i32::MAX)
        };
        TileCoordinate::new(
            last(start.x, self.size.width),
            0,
            last(start.z, self.size.depth),
        )
    }

    /// Whether the global coordinate falls inside this chunk's horizontal span.
    pub fn contains(&self, coord: TileCoordinate) -> bool {
        let start = self.start();
        let end = self.end();
        coord.x >= start.x
            && coord.x <= end.x
            && coord.z >= start.z
            && coord.z <= end.z
            && (0..=u16::MAX as i32).contains(&coord.y)
    }

    /// Convert a global coordinate to this chunk's local space.
    ///
    /// Panics if `coord` does not lie within the chunk: callers validate against
    /// world bounds before reaching the store.
    pub fn to_local(&self, coord: TileCoordinate) -> LocalTileCoordinate {
        assert!(
            self.contains(coord),
            "{:?} is outside chunk {:?} (size {}x{})",
            coord,
            self.coordinate,
            self.size.width,
            self.size.depth
        );
        let start = self.start();
        LocalTileCoordinate::new(
            local_axis(coord.x - start.x),
            local_axis(coord.y),
            local_axis(coord.z - start.z),
        )
    }

    /// Convert a local coordinate back into global space
    pub fn to_global(&self, local: LocalTileCoordinate) -> TileCoordinate {
        local.to_global(self)
    }
}

// Offsets inside a valid chunk are below MAX_CHUNK_EXTENT
fn local_axis(offset: i32) -> u16 {
    match u16::try_from(offset) {
        Ok(value) => value,
        Err(_) => panic!("local offset {} does not fit a chunk axis", offset),
    }
}

/// Chunk-relative tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalTileCoordinate {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl LocalTileCoordinate {
    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    pub fn to_global(&self, area: &ChunkExtent) -> TileCoordinate {
        let start = area.start();
        TileCoordinate::new(
            start.x + self.x as i32,
            self.y as i32,
            start.z + self.z as i32,
        )
    }
}
