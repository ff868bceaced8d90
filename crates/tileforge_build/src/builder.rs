//! Incremental build engine
//!
//! [`WorldBuilder`] applies paint and erase batches to a [`ChunkStore`],
//! materializes the resolved tiles through a [`Materializer`] and keeps
//! neighboring tiles consistent by propagating changes to a fixed point.
//!
//! The store is passed into each call rather than owned, so hosts can keep
//! it alongside their own state and query it between calls.

use crate::changes::ChangeSet;
use crate::config::PropagationLimits;
use crate::error::BuildError;
use crate::materialize::Materializer;
use crate::propagate::{propagate, reevaluate, PropagationStats};
use crate::registry::TileRegistry;
use std::collections::HashSet;
use tileforge_autotile::{
    neighborhood_pattern, TerrainCatalog, TerrainDefinition, TileDescriptor, TileVariant,
};
use tileforge_core::{ChunkStore, TerrainId, TileCoordinate};
use tracing::debug;

pub struct WorldBuilder<C: TerrainCatalog, M: Materializer> {
    catalog: C,
    tiles: TileRegistry<M>,
    limits: PropagationLimits,
    last_propagation: Option<PropagationStats>,
}

impl<C: TerrainCatalog, M: Materializer> WorldBuilder<C, M> {
    pub fn new(catalog: C, materializer: M, limits: PropagationLimits) -> Self {
        Self {
            catalog,
            tiles: TileRegistry::new(materializer),
            limits,
            last_propagation: None,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn materializer(&self) -> &M {
        &self.tiles.materializer
    }

    pub fn materializer_mut(&mut self) -> &mut M {
        &mut self.tiles.materializer
    }

    pub fn limits(&self) -> PropagationLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: PropagationLimits) {
        self.limits = limits;
    }

    /// Statistics of the propagation run by the most recent build or destroy,
    /// or `None` if that call did not propagate.
    pub fn last_propagation(&self) -> Option<&PropagationStats> {
        self.last_propagation.as_ref()
    }

    /// Place `terrain` on every cell in `coords`.
    ///
    /// Variants are matched against the store as it was before this batch, so
    /// batch members do not see each other. With `propagate`, the batch is then
    /// settled against the committed state and the change spreads outward to
    /// live neighbors until nothing changes.
    ///
    /// Terrains flagged `empty` are skipped entirely.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is negative or outside the addressable grid.
    /// Nothing is modified in that case.
    pub fn build(
        &mut self,
        store: &mut ChunkStore,
        terrain: TerrainId,
        coords: &[TileCoordinate],
        propagate_changes: bool,
    ) -> Result<ChangeSet, BuildError> {
        let definition = lookup(&self.catalog, terrain)?;
        let mut changes = ChangeSet::new();
        self.last_propagation = None;
        if definition.empty {
            debug!(%terrain, name = %definition.name, "skipping build of empty terrain");
            return Ok(changes);
        }

        let batch = dedup_addressable(store, coords);

        let resolved: Vec<(TileCoordinate, TileVariant)> = batch
            .iter()
            .map(|&coord| {
                let pattern = neighborhood_pattern(store, terrain, coord);
                (coord, definition.rules.match_variant(&pattern))
            })
            .collect();

        for (coord, variant) in resolved {
            self.tiles.place(terrain, coord, variant, &definition.variants);
            changes.placed.insert(coord);
        }
        store.set_tiles(terrain, &batch);

        if propagate_changes {
            for &coord in &batch {
                reevaluate(&mut self.tiles, store, definition, coord);
            }
            let seeds: HashSet<TileCoordinate> = batch.iter().copied().collect();
            let stats = propagate(
                &mut self.tiles,
                store,
                definition,
                seeds,
                self.limits,
                &mut changes,
            )?;
            debug!(
                %terrain,
                placed = changes.placed.len(),
                changed = changes.changed.len(),
                passes = stats.passes,
                "built tiles"
            );
            self.last_propagation = Some(stats);
        } else {
            debug!(%terrain, placed = changes.placed.len(), "built tiles without propagation");
        }

        Ok(changes)
    }

    /// Remove `terrain` from every cell in `coords`.
    ///
    /// Cells the terrain does not occupy are ignored. With `propagate`, live
    /// neighbors of the removed cells are re-evaluated to a fixed point.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is negative or outside the addressable grid.
    pub fn destroy(
        &mut self,
        store: &mut ChunkStore,
        terrain: TerrainId,
        coords: &[TileCoordinate],
        propagate_changes: bool,
    ) -> Result<ChangeSet, BuildError> {
        let definition = lookup(&self.catalog, terrain)?;
        let mut changes = ChangeSet::new();
        self.last_propagation = None;

        let batch = dedup_addressable(store, coords);
        for &coord in &batch {
            let live = self.tiles.remove(terrain, coord);
            if live || store.occupies(terrain, coord) {
                changes.removed.insert(coord);
            }
        }
        store.remove_tiles(terrain, &batch);

        if propagate_changes && !changes.removed.is_empty() {
            let stats = propagate(
                &mut self.tiles,
                store,
                definition,
                changes.removed.clone(),
                self.limits,
                &mut changes,
            )?;
            debug!(
                %terrain,
                removed = changes.removed.len(),
                changed = changes.changed.len(),
                passes = stats.passes,
                "destroyed tiles"
            );
            self.last_propagation = Some(stats);
        } else {
            debug!(%terrain, removed = changes.removed.len(), "destroyed tiles");
        }

        Ok(changes)
    }

    /// Destroy then build the same cells, re-deriving their variants from
    /// scratch. Returned changes list the cells as both removed and placed.
    pub fn rebuild(
        &mut self,
        store: &mut ChunkStore,
        terrain: TerrainId,
        coords: &[TileCoordinate],
        propagate_changes: bool,
    ) -> Result<ChangeSet, BuildError> {
        let mut changes = self.destroy(store, terrain, coords, false)?;
        changes.merge(self.build(store, terrain, coords, propagate_changes)?);
        Ok(changes)
    }

    /// Dematerialize and forget every tile of `terrain`, and drop its occupancy
    /// from the store. Returns `false` if the terrain had nothing to remove.
    pub fn destroy_terrain(&mut self, store: &mut ChunkStore, terrain: TerrainId) -> bool {
        let live = self.tiles.remove_terrain(terrain);
        let stored = store.remove_terrain(terrain);
        debug!(%terrain, live, "destroyed terrain");
        live > 0 || stored
    }

    /// Dematerialize everything and empty the store.
    pub fn clear(&mut self, store: &mut ChunkStore) {
        let removed = self.tiles.clear();
        store.clear();
        debug!(removed, "cleared world");
    }

    /// Re-derive the variant of every live tile against the current store.
    ///
    /// After any propagated build or destroy this reports no changes. Tiles
    /// built without propagation may be stale; this brings them up to date.
    pub fn reevaluate_all(&mut self, store: &ChunkStore) -> Result<ChangeSet, BuildError> {
        let mut changes = ChangeSet::new();
        for terrain in self.tiles.terrains() {
            let definition = lookup(&self.catalog, terrain)?;
            for coord in self.tiles.coordinates(terrain) {
                if reevaluate(&mut self.tiles, store, definition, coord) {
                    changes.changed.insert(coord);
                }
            }
        }
        debug!(changed = changes.changed.len(), "re-evaluated all live tiles");
        Ok(changes)
    }

    pub fn variant_at(&self, terrain: TerrainId, coord: TileCoordinate) -> Option<TileVariant> {
        self.tiles.get(terrain, coord).map(|tile| tile.variant)
    }

    /// Descriptor placed at the cell. `None` both for cells without a live
    /// tile and for live tiles whose variant has no authored descriptor.
    pub fn descriptor_at(&self, terrain: TerrainId, coord: TileCoordinate) -> Option<TileDescriptor> {
        self.tiles.get(terrain, coord).and_then(|tile| tile.descriptor)
    }

    pub fn is_live(&self, terrain: TerrainId, coord: TileCoordinate) -> bool {
        self.tiles.contains(terrain, coord)
    }

    /// Coordinates of every live tile of `terrain`, in no particular order
    pub fn tiles(&self, terrain: TerrainId) -> Vec<TileCoordinate> {
        self.tiles.coordinates(terrain)
    }

    pub fn live_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn into_parts(self) -> (C, M) {
        (self.catalog, self.tiles.materializer)
    }
}

fn lookup<C: TerrainCatalog>(catalog: &C, terrain: TerrainId) -> Result<&TerrainDefinition, BuildError> {
    catalog
        .definition(terrain)
        .ok_or(BuildError::UnknownTerrain(terrain))
}

/// Drop duplicate coordinates, keeping first-seen order, and assert that all
/// of them can be stored.
fn dedup_addressable(store: &ChunkStore, coords: &[TileCoordinate]) -> Vec<TileCoordinate> {
    let mut seen = HashSet::with_capacity(coords.len());
    let mut batch = Vec::with_capacity(coords.len());
    for &coord in coords {
        assert!(
            store.try_chunk_coordinate(coord).is_some(),
            "{:?} is outside the addressable world grid",
            coord
        );
        if seen.insert(coord) {
            batch.push(coord);
        }
    }
    batch
}
