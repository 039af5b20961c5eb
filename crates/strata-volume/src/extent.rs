//! Extents: block volumes that also carry biomes and tile entities.
//!
//! An [`Extent`] is what a host world exposes to this crate. Snapshots and
//! archetype volumes are taken from extents and are detached from them once
//! built.

use glam::IVec3;

use crate::archetype::{ArchetypeVolume, build_archetype};
use crate::area::{BiomeArea, MutableBiomeArea};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::view::ExtentViewDownsize;
use crate::volume::{BlockVolume, MutableBlockVolume};

/// Per-block data attached to some positions of an extent.
pub trait TileEntity {
    /// Detached, position-free form of the tile entity.
    type Archetype: Clone;

    fn create_archetype(&self) -> Self::Archetype;
}

/// Archetype type of an extent's tile entities.
pub type TileArchetype<E> = <<E as Extent>::TileEntity as TileEntity>::Archetype;

/// State of a single position at the moment it was captured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSnapshot<V, A> {
    pub position: IVec3,
    pub state: V,
    pub tile: Option<A>,
}

/// Read access to blocks, biomes and tile entities of one bounded region.
pub trait Extent: BlockVolume + BiomeArea {
    type TileEntity: TileEntity;

    /// Returns the tile entity at `position`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if `position` is outside the
    /// block region.
    fn tile_entity(&self, position: IVec3) -> Result<Option<Self::TileEntity>, VolumeError>;

    /// Narrows the whole extent to `[min, max]` and the biome columns under it.
    ///
    /// # Errors
    ///
    /// Fails with [`VolumeError::BlockOutOfBounds`] if either corner lies
    /// outside this extent, or with [`VolumeError::BiomeOutOfBounds`] if the
    /// biome area does not cover the footprint.
    fn extent_view(
        &self,
        min: IVec3,
        max: IVec3,
    ) -> Result<ExtentViewDownsize<&Self>, VolumeError>
    where
        Self: Sized,
    {
        ExtentViewDownsize::new(self, min, max)
    }

    /// Captures the block and the archetype of any tile entity at `position`.
    fn block_snapshot(
        &self,
        position: IVec3,
    ) -> Result<BlockSnapshot<Self::Block, TileArchetype<Self>>, VolumeError> {
        let state = self.block(position)?;
        let tile = self
            .tile_entity(position)?
            .map(|tile| tile.create_archetype());
        Ok(BlockSnapshot {
            position,
            state,
            tile,
        })
    }

    /// Copies `[min, max]` into a detached archetype whose coordinates are
    /// shifted by `-origin`.
    ///
    /// The corners may be given in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`VolumeError::BlockOutOfBounds`] if either corner lies
    /// outside this extent or cannot be shifted by `-origin` within `i32`,
    /// with [`VolumeError::BiomeOutOfBounds`] if the biome area does not
    /// cover the footprint, or with the first error raised while reading it.
    fn create_archetype_volume(
        &self,
        min: IVec3,
        max: IVec3,
        origin: IVec3,
    ) -> Result<ArchetypeVolume<Self::Block, TileArchetype<Self>>, VolumeError> {
        build_archetype(self, min, max, origin)
    }
}

/// Write access on top of [`Extent`].
pub trait MutableExtent: Extent + MutableBlockVolume + MutableBiomeArea {
    /// Recreates a tile entity at `position` from its archetype.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if `position` is outside the
    /// block region.
    fn restore_tile_entity(
        &mut self,
        position: IVec3,
        archetype: &TileArchetype<Self>,
        cause: &Cause,
    ) -> Result<(), VolumeError>;

    fn extent_view_mut(
        &mut self,
        min: IVec3,
        max: IVec3,
    ) -> Result<ExtentViewDownsize<&mut Self>, VolumeError>
    where
        Self: Sized,
    {
        ExtentViewDownsize::new(self, min, max)
    }
}

impl<T: Extent + ?Sized> Extent for &T {
    type TileEntity = T::TileEntity;

    fn tile_entity(&self, position: IVec3) -> Result<Option<Self::TileEntity>, VolumeError> {
        (**self).tile_entity(position)
    }
}

impl<T: Extent + ?Sized> Extent for &mut T {
    type TileEntity = T::TileEntity;

    fn tile_entity(&self, position: IVec3) -> Result<Option<Self::TileEntity>, VolumeError> {
        (**self).tile_entity(position)
    }
}

impl<T: MutableExtent + ?Sized> MutableExtent for &mut T {
    fn restore_tile_entity(
        &mut self,
        position: IVec3,
        archetype: &TileArchetype<T>,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        (**self).restore_tile_entity(position, archetype, cause)
    }
}
