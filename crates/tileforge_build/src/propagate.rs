//! Neighbor re-evaluation after a change, run to a fixed point.
//!
//! Given a frontier of cells that just changed, every live neighbor that is
//! neither in the frontier nor already settled is re-matched. Neighbors whose
//! variant changed become the next frontier; the previous frontier joins the
//! settled set and is never looked at again in this chain. The loop ends when
//! a pass changes nothing.
//!
//! The settled set only grows and the grid is finite, so the loop terminates.
//! [`PropagationLimits`] still caps the passes that change a variant and the
//! cells examined. The closing pass that changes nothing is free, so a chain
//! that settles after its first round of updates needs a depth of 1.

use crate::changes::ChangeSet;
use crate::config::PropagationLimits;
use crate::error::BuildError;
use crate::materialize::Materializer;
use crate::registry::TileRegistry;
use std::collections::HashSet;
use tileforge_autotile::{neighborhood_pattern, TerrainDefinition};
use tileforge_core::{ChunkStore, TileCoordinate};
use tracing::{error, trace};

/// Outcome of one propagation chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Passes run, including the final one that changed nothing
    pub passes: u32,
    /// Passes that changed at least one variant
    pub depth: u32,
    /// Candidate cells examined across all passes
    pub visited: usize,
    /// Candidate cells examined by each pass, in order
    pub candidates: Vec<usize>,
    /// Tiles whose variant changed
    pub changed: usize,
}

/// Re-match the live tile at `coord` against the current store.
/// Returns `true` if it was re-materialized at a new variant.
pub(crate) fn reevaluate<M: Materializer>(
    registry: &mut TileRegistry<M>,
    store: &ChunkStore,
    definition: &TerrainDefinition,
    coord: TileCoordinate,
) -> bool {
    let Some(current) = registry.get(definition.id, coord).map(|tile| tile.variant) else {
        return false;
    };
    let variant = definition
        .rules
        .match_variant(&neighborhood_pattern(store, definition.id, coord));
    if variant == current {
        return false;
    }
    registry.place(definition.id, coord, variant, &definition.variants);
    true
}

/// Candidate cells around a frontier: 8-neighbors at the same layer, minus
/// the frontier itself, minus settled cells, minus negative coordinates.
fn candidates(
    frontier: &HashSet<TileCoordinate>,
    settled: &HashSet<TileCoordinate>,
) -> HashSet<TileCoordinate> {
    frontier
        .iter()
        .flat_map(|coord| coord.horizontal_neighbors())
        .filter(|n| n.is_non_negative() && !frontier.contains(n) && !settled.contains(n))
        .collect()
}

pub(crate) fn propagate<M: Materializer>(
    registry: &mut TileRegistry<M>,
    store: &ChunkStore,
    definition: &TerrainDefinition,
    seeds: HashSet<TileCoordinate>,
    limits: PropagationLimits,
    changes: &mut ChangeSet,
) -> Result<PropagationStats, BuildError> {
    let mut stats = PropagationStats::default();
    let mut frontier = seeds;
    let mut settled: HashSet<TileCoordinate> = HashSet::new();

    while !frontier.is_empty() {
        stats.passes += 1;

        let candidates = candidates(&frontier, &settled);
        stats.visited += candidates.len();
        stats.candidates.push(candidates.len());
        if stats.visited > limits.max_visited_cells {
            return Err(runaway(definition, &stats));
        }

        let mut changed = HashSet::new();
        for coord in candidates {
            if reevaluate(registry, store, definition, coord) {
                changed.insert(coord);
            }
        }

        trace!(
            terrain = %definition.id,
            pass = stats.passes,
            frontier = frontier.len(),
            changed = changed.len(),
            "propagation pass"
        );

        if !changed.is_empty() {
            stats.depth += 1;
            if stats.depth > limits.max_depth {
                return Err(runaway(definition, &stats));
            }
        }

        stats.changed += changed.len();
        changes.changed.extend(changed.iter().copied());
        settled.extend(frontier);
        frontier = changed;
    }

    Ok(stats)
}

fn runaway(definition: &TerrainDefinition, stats: &PropagationStats) -> BuildError {
    error!(
        terrain = %definition.id,
        name = %definition.name,
        passes = stats.passes,
        depth = stats.depth,
        visited = stats.visited,
        "propagation exceeded its ceiling"
    );
    BuildError::RunawayPropagation {
        terrain: definition.id,
        depth: stats.depth,
        visited: stats.visited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::RecordingMaterializer;
    use tileforge_autotile::{TileVariant, TileDescriptor, VariantGroup, VariantSet};
    use tileforge_core::ChunkSize;

    fn grass() -> TerrainDefinition {
        TerrainDefinition::new("Grass").with_variants(VariantSet {
            fill: VariantGroup::canonical(TileDescriptor::new(0)),
            edge: VariantGroup::canonical(TileDescriptor::new(1)),
            exterior_corner: VariantGroup::canonical(TileDescriptor::new(2)),
            interior_corner: VariantGroup::canonical(TileDescriptor::new(3)),
        })
    }

    #[test]
    fn test_candidates_exclude_frontier_settled_and_negative() {
        let frontier = HashSet::from([TileCoordinate::new(0, 0, 0), TileCoordinate::new(1, 0, 0)]);
        let settled = HashSet::from([TileCoordinate::new(2, 0, 1)]);

        let result = candidates(&frontier, &settled);
        assert!(!result.contains(&TileCoordinate::new(0, 0, 0)));
        assert!(!result.contains(&TileCoordinate::new(1, 0, 0)));
        assert!(!result.contains(&TileCoordinate::new(2, 0, 1)));
        assert!(result.iter().all(|c| c.is_non_negative()));
        // (0,1) (1,1) (2,0)
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_reevaluate_unchanged_does_nothing() {
        let definition = grass();
        let mut store = ChunkStore::new(ChunkSize::new(8, 8));
        let mut registry = TileRegistry::new(RecordingMaterializer::new());
        let at = TileCoordinate::new(3, 0, 3);
        store.set_tiles(definition.id, &[at]);
        registry.place(definition.id, at, TileVariant::Fill, &definition.variants);

        assert!(!reevaluate(&mut registry, &store, &definition, at));
        assert_eq!(registry.materializer.materialized, 1);
    }

    #[test]
    fn test_reevaluate_skips_cells_without_live_tile() {
        let definition = grass();
        let store = ChunkStore::new(ChunkSize::new(8, 8));
        let mut registry = TileRegistry::new(RecordingMaterializer::new());
        assert!(!reevaluate(&mut registry, &store, &definition, TileCoordinate::new(1, 0, 1)));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_empty_seed_runs_no_passes() {
        let definition = grass();
        let store = ChunkStore::new(ChunkSize::new(8, 8));
        let mut registry = TileRegistry::new(RecordingMaterializer::new());
        let mut changes = ChangeSet::new();

        let stats = propagate(
            &mut registry,
            &store,
            &definition,
            HashSet::new(),
            PropagationLimits::default(),
            &mut changes,
        )
        .unwrap();
        assert_eq!(stats, PropagationStats::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_candidates_of_single_cell_are_its_ring() {
        let center = TileCoordinate::new(1, 0, 1);
        let ring: HashSet<_> = center.horizontal_neighbors().into_iter().collect();
        assert_eq!(candidates(&HashSet::from([center]), &HashSet::new()), ring);
    }

    /// A two-row strip whose live tiles are all stale `Fill`: each pass fixes
    /// one more column, so the chain is as deep as the strip is long.
    fn stale_strip(
        definition: &TerrainDefinition,
        length: i32,
    ) -> (ChunkStore, TileRegistry<RecordingMaterializer>) {
        let mut store = ChunkStore::new(ChunkSize::new(4, 4));
        let mut registry = TileRegistry::new(RecordingMaterializer::new());
        let cells: Vec<_> = (0..length)
            .flat_map(|x| [TileCoordinate::new(x, 0, 0), TileCoordinate::new(x, 0, 1)])
            .collect();
        store.set_tiles(definition.id, &cells);
        for &cell in &cells {
            registry.place(definition.id, cell, TileVariant::Fill, &definition.variants);
        }
        (store, registry)
    }

    #[test]
    fn test_depth_counts_changing_passes_only() {
        let definition = grass();
        let (store, mut registry) = stale_strip(&definition, 8);
        let mut changes = ChangeSet::new();
        let limits = PropagationLimits {
            max_depth: 7,
            ..PropagationLimits::default()
        };

        let stats = propagate(
            &mut registry,
            &store,
            &definition,
            HashSet::from([TileCoordinate::new(0, 0, 0)]),
            limits,
            &mut changes,
        )
        .unwrap();
        assert_eq!(stats.depth, 7);
        assert_eq!(stats.passes, 8);
        assert_eq!(stats.candidates.len(), 8);
        assert_eq!(stats.candidates.iter().sum::<usize>(), stats.visited);
        assert!(changes.changed.contains(&TileCoordinate::new(7, 0, 1)));
    }

    #[test]
    fn test_depth_ceiling_trips_on_long_chain() {
        let definition = grass();
        let (store, mut registry) = stale_strip(&definition, 8);
        let mut changes = ChangeSet::new();
        let limits = PropagationLimits {
            max_depth: 2,
            ..PropagationLimits::default()
        };

        let result = propagate(
            &mut registry,
            &store,
            &definition,
            HashSet::from([TileCoordinate::new(0, 0, 0)]),
            limits,
            &mut changes,
        );
        assert!(matches!(
            result,
            Err(BuildError::RunawayPropagation { depth: 3, .. })
        ));
    }

    #[test]
    fn test_visited_ceiling_trips() {
        let definition = grass();
        let store = ChunkStore::new(ChunkSize::new(8, 8));
        let mut registry = TileRegistry::new(RecordingMaterializer::new());
        let mut changes = ChangeSet::new();
        let limits = PropagationLimits {
            max_depth: 10,
            max_visited_cells: 4,
        };

        let result = propagate(
            &mut registry,
            &store,
            &definition,
            HashSet::from([TileCoordinate::new(4, 0, 4)]),
            limits,
            &mut changes,
        );
        assert!(matches!(
            result,
            Err(BuildError::RunawayPropagation { visited: 8, .. })
        ));
    }
}
