//! Detached, relocated copies of extent regions.
//!
//! Building an archetype takes two passes over the source. The first only
//! collects the palette; once every distinct value is known the backing
//! buffer is allocated at the narrowest tier that fits, and the second pass
//! writes each block and captures each tile entity at its relative position.
//! Writes in the second pass never widen the backing array.

use std::hash::Hash;

use glam::IVec3;
use rustc_hash::FxHashMap;
use strata_math::{Region3, checked_add3, checked_sub3};
use tracing::debug;

use crate::buffer::{BlockBuffer, ImmutableBlockBuffer};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::extent::{Extent, MutableExtent, TileArchetype, TileEntity};
use crate::palette::Palette;
use crate::storage::StorageTier;
use crate::view::ExtentViewDownsize;
use crate::volume::{BlockVolume, MutableBlockVolume};

/// Frozen blocks plus the tile archetypes captured with them, keyed by
/// position relative to the archetype's origin.
#[derive(Clone, Debug)]
pub struct ArchetypeVolume<V, A> {
    backing: ImmutableBlockBuffer<V>,
    tiles: FxHashMap<IVec3, A>,
}

impl<V: Clone + Eq + Hash, A> ArchetypeVolume<V, A> {
    pub fn new(backing: ImmutableBlockBuffer<V>, tiles: FxHashMap<IVec3, A>) -> Self {
        Self { backing, tiles }
    }

    pub fn backing(&self) -> &ImmutableBlockBuffer<V> {
        &self.backing
    }

    pub fn tile_archetypes(&self) -> &FxHashMap<IVec3, A> {
        &self.tiles
    }

    pub fn tile_archetype(&self, position: IVec3) -> Option<&A> {
        self.tiles.get(&position)
    }

    /// Writes every block into `target` at `position + relative`, restoring
    /// the tile archetype captured at a position right after its block.
    ///
    /// Positions are visited in the backing region's linear order.
    ///
    /// # Errors
    ///
    /// Stops at the first write `target` rejects. Earlier writes remain.
    /// If a backing corner shifted by `position` leaves `i32`, fails with
    /// [`VolumeError::BlockOutOfBounds`] for that corner and `target`'s
    /// bounds before writing anything.
    pub fn apply<T>(&self, target: &mut T, position: IVec3, cause: &Cause) -> Result<(), VolumeError>
    where
        T: MutableExtent<Block = V> + ?Sized,
        <T as Extent>::TileEntity: TileEntity<Archetype = A>,
    {
        let region = self.backing.block_region();
        for corner in [region.min(), region.max()] {
            if checked_add3(corner, position).is_none() {
                return Err(VolumeError::block_out_of_bounds(corner, &target.block_region()));
            }
        }
        for relative in region {
            // Both corners fit, so every position between them does.
            let destination = relative.wrapping_add(position);
            target.set_block(destination, self.backing.block(relative)?, cause)?;
            if let Some(tile) = self.tiles.get(&relative) {
                target.restore_tile_entity(destination, tile, cause)?;
            }
        }
        debug!(
            "applied archetype of {} blocks and {} tiles at {}",
            self.backing.block_region().volume(),
            self.tiles.len(),
            position
        );
        Ok(())
    }
}

impl<V: Clone + Eq + Hash, A> BlockVolume for ArchetypeVolume<V, A> {
    type Block = V;

    fn block_region(&self) -> Region3 {
        self.backing.block_region()
    }

    fn block(&self, position: IVec3) -> Result<V, VolumeError> {
        self.backing.block(position)
    }
}

pub(crate) fn build_archetype<E: Extent + ?Sized>(
    extent: &E,
    min: IVec3,
    max: IVec3,
    origin: IVec3,
) -> Result<ArchetypeVolume<E::Block, TileArchetype<E>>, VolumeError> {
    let tmin = min.min(max);
    let tmax = min.max(max);
    let view = ExtentViewDownsize::new(extent, tmin, tmax)?;

    let mut palette = Palette::new();
    view.block_worker(Cause::implementation())
        .iterate(|source, position, _| {
            palette.get_or_assign(&source.block(position)?);
            Ok(())
        })?;

    let tier = StorageTier::for_highest_id(palette.highest_id());
    debug!(
        "building archetype over {}..={} with {} values at {:?} tier",
        tmin,
        tmax,
        palette.len(),
        tier
    );

    let bounds = extent.block_region();
    let relocate = |corner: IVec3| {
        checked_sub3(corner, origin)
            .ok_or_else(|| VolumeError::block_out_of_bounds(corner, &bounds))
    };
    let relative_region = Region3::new(relocate(tmin)?, relocate(tmax)?);

    let mut backing = BlockBuffer::new(palette, relative_region);
    let mut tiles = FxHashMap::default();
    view.block_worker(Cause::implementation())
        .iterate(|source, position, cause| {
            let relative = position.wrapping_sub(origin);
            backing.set_block(relative, source.block(position)?, cause)?;
            if let Some(tile) = source.tile_entity(position)? {
                tiles.insert(relative, tile.create_archetype());
            }
            Ok(())
        })?;

    Ok(ArchetypeVolume::new(backing.freeze(), tiles))
}
