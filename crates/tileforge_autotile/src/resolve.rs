//! Variant resolution: which tile to place for a variant
//!
//! Each terrain authors up to four [`VariantGroup`]s (fill, edge, exterior
//! corner, interior corner). A group holds one canonical descriptor for slot 0
//! of its rotational cycle; the other three slots are derived by rotating it
//! a quarter turn per step unless an alternate is authored for that slot.

use crate::variant::{TileVariant, VariantFamily};
use serde::{Deserialize, Serialize};

/// Clockwise quarter turns, always normalized to `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rotation(u8);

impl Rotation {
    pub const NONE: Self = Self(0);

    pub const fn quarter_turns(turns: u8) -> Self {
        Self(turns % 4)
    }

    pub const fn turns(&self) -> u8 {
        self.0 % 4
    }

    pub const fn degrees(&self) -> u16 {
        self.turns() as u16 * 90
    }

    /// Compose with another rotation
    pub const fn then(self, other: Rotation) -> Self {
        Self::quarter_turns(self.turns() + other.turns())
    }
}

/// Renderable result of resolution: a tile of the host's tileset plus rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub tile: u32,
    #[serde(default)]
    pub rotation: Rotation,
}

impl TileDescriptor {
    pub const fn new(tile: u32) -> Self {
        Self {
            tile,
            rotation: Rotation::NONE,
        }
    }

    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self {
            tile: self.tile,
            rotation: self.rotation.then(rotation),
        }
    }
}

/// One authored rule group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Tile for slot 0 of the cycle (`EdgeTop`, `*TopLeft`, or `Fill`).
    pub canonical: Option<TileDescriptor>,
    /// Per-slot overrides, indexed by [`TileVariant::rotation_step`].
    #[serde(default)]
    pub alternates: [Option<TileDescriptor>; 4],
}

impl VariantGroup {
    pub fn canonical(descriptor: TileDescriptor) -> Self {
        Self {
            canonical: Some(descriptor),
            alternates: [None; 4],
        }
    }

    /// A fully authored set; slot 0 doubles as the canonical.
    pub fn full_set(descriptors: [TileDescriptor; 4]) -> Self {
        Self {
            canonical: Some(descriptors[0]),
            alternates: descriptors.map(Some),
        }
    }

    pub fn with_alternate(mut self, variant: TileVariant, descriptor: TileDescriptor) -> Self {
        self.alternates[variant.rotation_step() as usize] = Some(descriptor);
        self
    }

    pub fn is_full_set(&self) -> bool {
        self.alternates.iter().all(Option::is_some)
    }

    /// Descriptor for `variant`, or `None` when the canonical is not authored.
    pub fn resolve(&self, variant: TileVariant) -> Option<TileDescriptor> {
        let canonical = self.canonical?;
        let step = variant.rotation_step();
        if let Some(alternate) = self.alternates[step as usize] {
            return Some(alternate);
        }
        Some(canonical.rotated(Rotation::quarter_turns(step)))
    }
}

/// All rule groups of one terrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    #[serde(default)]
    pub fill: VariantGroup,
    #[serde(default)]
    pub edge: VariantGroup,
    #[serde(default)]
    pub exterior_corner: VariantGroup,
    #[serde(default)]
    pub interior_corner: VariantGroup,
}

impl VariantSet {
    pub fn group(&self, family: VariantFamily) -> &VariantGroup {
        match family {
            VariantFamily::Fill => &self.fill,
            VariantFamily::Edge => &self.edge,
            VariantFamily::ExteriorCorner => &self.exterior_corner,
            VariantFamily::InteriorCorner => &self.interior_corner,
        }
    }

    pub fn group_mut(&mut self, family: VariantFamily) -> &mut VariantGroup {
        match family {
            VariantFamily::Fill => &mut self.fill,
            VariantFamily::Edge => &mut self.edge,
            VariantFamily::ExteriorCorner => &mut self.exterior_corner,
            VariantFamily::InteriorCorner => &mut self.interior_corner,
        }
    }

    pub fn resolve(&self, variant: TileVariant) -> Option<TileDescriptor> {
        self.group(variant.family()).resolve(variant)
    }
}
