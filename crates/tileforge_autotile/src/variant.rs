//! The 13 tile variants and their rotational families

use serde::{Deserialize, Serialize};

/// Which fill/edge/corner shape a terrain tile uses at a cell.
///
/// Edges name the side that borders empty space. Exterior corners name the
/// convex corner of a region; interior corners name the missing diagonal of a
/// concave (re-entrant) corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileVariant {
    #[default]
    Fill,
    EdgeTop,
    EdgeRight,
    EdgeBottom,
    EdgeLeft,
    ExteriorTopLeft,
    ExteriorTopRight,
    ExteriorBottomRight,
    ExteriorBottomLeft,
    InteriorTopLeft,
    InteriorTopRight,
    InteriorBottomRight,
    InteriorBottomLeft,
}

/// Rule group a variant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantFamily {
    Fill,
    Edge,
    ExteriorCorner,
    InteriorCorner,
}

impl TileVariant {
    pub const ALL: [TileVariant; 13] = [
        TileVariant::Fill,
        TileVariant::EdgeTop,
        TileVariant::EdgeRight,
        TileVariant::EdgeBottom,
        TileVariant::EdgeLeft,
        TileVariant::ExteriorTopLeft,
        TileVariant::ExteriorTopRight,
        TileVariant::ExteriorBottomRight,
        TileVariant::ExteriorBottomLeft,
        TileVariant::InteriorTopLeft,
        TileVariant::InteriorTopRight,
        TileVariant::InteriorBottomRight,
        TileVariant::InteriorBottomLeft,
    ];

    pub fn family(&self) -> VariantFamily {
        match self {
            TileVariant::Fill => VariantFamily::Fill,
            TileVariant::EdgeTop
            | TileVariant::EdgeRight
            | TileVariant::EdgeBottom
            | TileVariant::EdgeLeft => VariantFamily::Edge,
            TileVariant::ExteriorTopLeft
            | TileVariant::ExteriorTopRight
            | TileVariant::ExteriorBottomRight
            | TileVariant::ExteriorBottomLeft => VariantFamily::ExteriorCorner,
            TileVariant::InteriorTopLeft
            | TileVariant::InteriorTopRight
            | TileVariant::InteriorBottomRight
            | TileVariant::InteriorBottomLeft => VariantFamily::InteriorCorner,
        }
    }

    /// Clockwise quarter-turns from the family's canonical variant
    /// (`EdgeTop`, `ExteriorTopLeft`, `InteriorTopLeft`). Always 0 for `Fill`.
    pub fn rotation_step(&self) -> u8 {
        match self {
            TileVariant::Fill
            | TileVariant::EdgeTop
            | TileVariant::ExteriorTopLeft
            | TileVariant::InteriorTopLeft => 0,
            TileVariant::EdgeRight
            | TileVariant::ExteriorTopRight
            | TileVariant::InteriorTopRight => 1,
            TileVariant::EdgeBottom
            | TileVariant::ExteriorBottomRight
            | TileVariant::InteriorBottomRight => 2,
            TileVariant::EdgeLeft
            | TileVariant::ExteriorBottomLeft
            | TileVariant::InteriorBottomLeft => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileVariant::Fill => "Fill",
            TileVariant::EdgeTop => "Top Edge",
            TileVariant::EdgeRight => "Right Edge",
            TileVariant::EdgeBottom => "Bottom Edge",
            TileVariant::EdgeLeft => "Left Edge",
            TileVariant::ExteriorTopLeft => "Top-Left Exterior Corner",
            TileVariant::ExteriorTopRight => "Top-Right Exterior Corner",
            TileVariant::ExteriorBottomRight => "Bottom-Right Exterior Corner",
            TileVariant::ExteriorBottomLeft => "Bottom-Left Exterior Corner",
            TileVariant::InteriorTopLeft => "Top-Left Interior Corner",
            TileVariant::InteriorTopRight => "Top-Right Interior Corner",
            TileVariant::InteriorBottomRight => "Bottom-Right Interior Corner",
            TileVariant::InteriorBottomLeft => "Bottom-Left Interior Corner",
        }
    }
}

impl VariantFamily {
    /// The four variants of a rotating family in cycle order, or `None` for `Fill`.
    pub fn cycle(&self) -> Option<[TileVariant; 4]> {
        match self {
            VariantFamily::Fill => None,
            VariantFamily::Edge => Some([
                TileVariant::EdgeTop,
                TileVariant::EdgeRight,
                TileVariant::EdgeBottom,
                TileVariant::EdgeLeft,
            ]),
            VariantFamily::ExteriorCorner => Some([
                TileVariant::ExteriorTopLeft,
                TileVariant::ExteriorTopRight,
                TileVariant::ExteriorBottomRight,
                TileVariant::ExteriorBottomLeft,
            ]),
            VariantFamily::InteriorCorner => Some([
                TileVariant::InteriorTopLeft,
                TileVariant::InteriorTopRight,
                TileVariant::InteriorBottomRight,
                TileVariant::InteriorBottomLeft,
            ]),
        }
    }
}
