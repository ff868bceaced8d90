mod common;

use common::{at, World};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tileforge_build::bake;
use tileforge_build::tileforge_core::{ChunkSize, TerrainId, TileCoordinate};

const AREA: i32 = 12;

fn random_brush(rng: &mut SmallRng) -> Vec<TileCoordinate> {
    let x = rng.gen_range(0..AREA);
    let z = rng.gen_range(0..AREA);
    let w = rng.gen_range(1..=3);
    let d = rng.gen_range(1..=3);
    (z..z + d)
        .flat_map(|z| (x..x + w).map(move |x| at(x, z)))
        .collect()
}

/// Live tiles, store occupancy and a fresh bake must all agree, and
/// re-deriving every variant must change nothing.
fn assert_settled(world: &mut World, terrains: &[TerrainId], step: usize) {
    let redo = world.builder.reevaluate_all(&world.store).unwrap();
    assert!(redo.is_empty(), "step {}: {} tiles were stale", step, redo.changed.len());

    let baked = bake(&world.store, world.builder.catalog());
    for &terrain in terrains {
        let live: HashSet<_> = world.builder.tiles(terrain).into_iter().collect();
        let stored: HashSet<_> = world.store.enumerate_tiles(terrain).into_iter().collect();
        assert_eq!(live, stored, "step {}: live tiles differ from store", step);

        for coord in live {
            assert_eq!(
                world.builder.variant_at(terrain, coord),
                baked.variant_at(terrain, coord),
                "step {}: live variant at {:?} differs from bake",
                step,
                coord
            );
        }
    }
    assert_eq!(world.builder.materializer().live_count(), world.builder.live_count());
}

#[test]
fn random_paint_and_erase_reaches_fixed_point() {
    for seed in [1_u64, 7, 42, 1234] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut world = World::new(ChunkSize::new(5, 5));
        let terrains = [world.grass, world.sand];

        for step in 0..150 {
            let terrain = terrains[rng.gen_range(0..terrains.len())];
            let brush = random_brush(&mut rng);
            match rng.gen_range(0..10) {
                0..=5 => {
                    world
                        .builder
                        .build(&mut world.store, terrain, &brush, true)
                        .unwrap();
                }
                6..=8 => {
                    world
                        .builder
                        .destroy(&mut world.store, terrain, &brush, true)
                        .unwrap();
                }
                _ => {
                    world
                        .builder
                        .rebuild(&mut world.store, terrain, &brush, true)
                        .unwrap();
                }
            }
            assert_settled(&mut world, &terrains, step);
        }
    }
}

#[test]
fn unpropagated_builds_are_repaired_by_reevaluate_all() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut world = World::new(ChunkSize::new(4, 4));
    let grass = world.grass;

    for _ in 0..40 {
        let brush = random_brush(&mut rng);
        world
            .builder
            .build(&mut world.store, grass, &brush, false)
            .unwrap();
    }

    world.builder.reevaluate_all(&world.store).unwrap();
    assert_settled(&mut world, &[grass], 0);
}
