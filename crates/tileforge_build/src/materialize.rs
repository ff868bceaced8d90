//! Materialization backend contract
//!
//! The engine decides *what* tile goes where; a [`Materializer`] owned by the
//! host turns that decision into something concrete (a sprite, a mesh instance,
//! an entry in a tilemap) and hands back an opaque handle. The engine only
//! stores handles and returns them for disposal.

use std::collections::HashMap;
use tileforge_autotile::TileDescriptor;
use tileforge_core::TileCoordinate;

pub trait Materializer {
    /// Opaque token for one placed tile
    type Handle;

    fn materialize(&mut self, descriptor: &TileDescriptor, at: TileCoordinate) -> Self::Handle;

    fn dematerialize(&mut self, handle: Self::Handle);
}

impl<M: Materializer + ?Sized> Materializer for &mut M {
    type Handle = M::Handle;

    fn materialize(&mut self, descriptor: &TileDescriptor, at: TileCoordinate) -> Self::Handle {
        (**self).materialize(descriptor, at)
    }

    fn dematerialize(&mut self, handle: Self::Handle) {
        (**self).dematerialize(handle)
    }
}

/// Handle issued by [`RecordingMaterializer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedTile {
    pub id: u64,
    pub at: TileCoordinate,
}

/// Headless backend that keeps every live descriptor in memory.
///
/// Several terrains may place tiles on the same cell, so each coordinate maps
/// to the live handles placed there.
#[derive(Debug, Default)]
pub struct RecordingMaterializer {
    next_id: u64,
    live: HashMap<u64, (TileCoordinate, TileDescriptor)>,
    pub materialized: usize,
    pub dematerialized: usize,
}

impl RecordingMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles currently placed
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Descriptors currently placed at `at`
    pub fn descriptors_at(&self, at: TileCoordinate) -> Vec<TileDescriptor> {
        self.live
            .values()
            .filter(|(coord, _)| *coord == at)
            .map(|(_, descriptor)| *descriptor)
            .collect()
    }

    pub fn is_live(&self, handle: &RecordedTile) -> bool {
        self.live.contains_key(&handle.id)
    }
}

impl Materializer for RecordingMaterializer {
    type Handle = RecordedTile;

    fn materialize(&mut self, descriptor: &TileDescriptor, at: TileCoordinate) -> RecordedTile {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, (at, *descriptor));
        self.materialized += 1;
        RecordedTile { id, at }
    }

    fn dematerialize(&mut self, handle: RecordedTile) {
        if self.live.remove(&handle.id).is_some() {
            self.dematerialized += 1;
        }
    }
}
