use std::io::Write;

use tileforge_build::tileforge_autotile::{TerrainDefinition, TerrainLibrary, TileVariant};
use tileforge_build::tileforge_core::{ChunkCoordinate, ChunkSize, ChunkStore, TileCoordinate};
use tileforge_build::{
    ConfigError, PropagationLimits, RecordingMaterializer, WorldBuilder, WorldConfig,
};

#[test]
fn config_file_drives_store_and_builder() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[chunk]\nwidth = 8\ndepth = 4\n\n[propagation]\nmax_depth = 8\n"
    )
    .unwrap();

    let config = WorldConfig::load(file.path()).unwrap();
    assert_eq!(config.chunk, ChunkSize::new(8, 4));

    let mut library = TerrainLibrary::new();
    let grass = library.insert(TerrainDefinition::new("Grass")).unwrap();
    let mut store = ChunkStore::new(config.chunk);
    let mut builder = WorldBuilder::new(&library, RecordingMaterializer::new(), config.propagation);
    assert_eq!(builder.limits().max_depth, 8);

    let cell = TileCoordinate::new(9, 0, 5);
    builder.build(&mut store, grass, &[cell], true).unwrap();
    assert!(store.chunk_at(ChunkCoordinate::new(1, 1)).is_some());
    assert_eq!(builder.variant_at(grass, cell), Some(TileVariant::Fill));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.toml");
    let config = WorldConfig {
        chunk: ChunkSize::new(32, 32),
        ..WorldConfig::default()
    };
    config.save(&path).unwrap();

    assert_eq!(WorldConfig::load(&path).unwrap(), config);
}

#[test]
fn unrepresentable_config_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.toml");
    let config = WorldConfig {
        propagation: PropagationLimits {
            max_visited_cells: usize::MAX,
            ..PropagationLimits::default()
        },
        ..WorldConfig::default()
    };

    assert!(matches!(config.save(&path), Err(ConfigError::Serialize(_))));
    assert!(!path.exists());
}

#[test]
fn oversized_chunk_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[chunk]\nwidth = 100000\ndepth = 4\n").unwrap();
    assert!(matches!(
        WorldConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = WorldConfig::load(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn invalid_config_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[chunk]\nwidth = -4\n").unwrap();
    assert!(matches!(
        WorldConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}
