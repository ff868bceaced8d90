pub use tileforge_core::{
    Chunk, ChunkCoordinate, ChunkExtent, ChunkSize, ChunkStore, LocalTileCoordinate,
    TerrainId, TerrainSection, TileCoordinate, MAX_CHUNK_EXTENT,
};

pub use tileforge_autotile::{
    load_terrain_library, neighborhood_pattern, parse_terrain_library, save_terrain_library,
    CatalogError, CellConstraint, NeighborhoodPattern, Rotation, RuleEntry, RuleTable,
    TerrainCatalog, TerrainDefinition, TerrainLibrary, TileDescriptor, TileVariant,
    VariantFamily, VariantGroup, VariantSet,
};

pub use tileforge_build::{
    bake, BakedChunk, BakedTerrainSection, BakedTile, BakedWorld, BuildError, ChangeSet,
    ConfigError, Materializer, PropagationLimits, PropagationStats, RecordedTile, RecordingMaterializer,
    WorldBuilder, WorldConfig,
};
