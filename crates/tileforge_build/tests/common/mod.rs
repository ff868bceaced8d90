#![allow(dead_code)]

use tileforge_build::tileforge_autotile::{
    TerrainDefinition, TerrainLibrary, TileDescriptor, VariantGroup, VariantSet,
};
use tileforge_build::tileforge_core::{ChunkSize, ChunkStore, TerrainId, TileCoordinate};
use tileforge_build::{PropagationLimits, RecordingMaterializer, WorldBuilder};

pub type TestBuilder = WorldBuilder<TerrainLibrary, RecordingMaterializer>;

pub const FILL_TILE: u32 = 0;
pub const EDGE_TILE: u32 = 1;
pub const EXTERIOR_TILE: u32 = 2;
pub const INTERIOR_TILE: u32 = 3;

pub fn authored_variants() -> VariantSet {
    VariantSet {
        fill: VariantGroup::canonical(TileDescriptor::new(FILL_TILE)),
        edge: VariantGroup::canonical(TileDescriptor::new(EDGE_TILE)),
        exterior_corner: VariantGroup::canonical(TileDescriptor::new(EXTERIOR_TILE)),
        interior_corner: VariantGroup::canonical(TileDescriptor::new(INTERIOR_TILE)),
    }
}

pub struct World {
    pub builder: TestBuilder,
    pub store: ChunkStore,
    pub grass: TerrainId,
    pub sand: TerrainId,
}

impl World {
    pub fn new(chunk: ChunkSize) -> Self {
        let mut library = TerrainLibrary::new();
        let grass = library
            .insert(TerrainDefinition::new("Grass").with_variants(authored_variants()))
            .unwrap();
        let sand = library
            .insert(TerrainDefinition::new("Sand").with_variants(authored_variants()))
            .unwrap();
        Self {
            builder: WorldBuilder::new(
                library,
                RecordingMaterializer::new(),
                PropagationLimits::default(),
            ),
            store: ChunkStore::new(chunk),
            grass,
            sand,
        }
    }
}

/// `side`×`side` cells starting at (x0, 0, z0)
pub fn square(x0: i32, z0: i32, side: i32) -> Vec<TileCoordinate> {
    (z0..z0 + side)
        .flat_map(|z| (x0..x0 + side).map(move |x| TileCoordinate::new(x, 0, z)))
        .collect()
}

pub fn at(x: i32, z: i32) -> TileCoordinate {
    TileCoordinate::new(x, 0, z)
}
