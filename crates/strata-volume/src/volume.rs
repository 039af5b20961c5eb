//! The coordinate-addressed block volume contract.
//!
//! Every concrete block source (buffers, views, extents, archetypes)
//! implements [`BlockVolume`]; the default methods give all of them the same
//! views, copies and workers without a shared base type.

use std::hash::Hash;

use glam::IVec3;
use strata_math::{DiscreteTransform3, Region3};

use crate::buffer::{BlockBuffer, ImmutableBlockBuffer};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::palette::Palette;
use crate::storage::{CellArray, StorageKind};
use crate::view::{BlockViewDownsize, BlockViewTransform, UnmodifiableBlockVolume};
use crate::worker::{BlockVolumeWorker, MutableBlockVolumeWorker};

/// Read access to a bounded 3D grid of block values.
pub trait BlockVolume {
    /// Value stored per block.
    type Block: Clone + Eq + Hash;

    /// Inclusive bounds of every addressable position.
    fn block_region(&self) -> Region3;

    /// Returns the block at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if `position` is outside
    /// [`block_region`](Self::block_region).
    fn block(&self, position: IVec3) -> Result<Self::Block, VolumeError>;

    fn contains_block(&self, position: IVec3) -> bool {
        self.block_region().contains(position)
    }

    fn block_min(&self) -> IVec3 {
        self.block_region().min()
    }

    fn block_max(&self) -> IVec3 {
        self.block_region().max()
    }

    fn block_size(&self) -> IVec3 {
        self.block_region().size()
    }

    /// Read-only view narrowed to `[min, max]`, keeping absolute coordinates.
    ///
    /// # Errors
    ///
    /// Fails with [`VolumeError::BlockOutOfBounds`] if either corner lies
    /// outside this volume.
    fn block_view(&self, min: IVec3, max: IVec3) -> Result<BlockViewDownsize<&Self>, VolumeError>
    where
        Self: Sized,
    {
        BlockViewDownsize::new(self, min, max)
    }

    /// Read-only view whose coordinates are this volume's under `transform`.
    ///
    /// Fails with [`VolumeError::BlockOutOfBounds`] if the transformed region
    /// does not fit in `i32`.
    fn block_transform_view(
        &self,
        transform: DiscreteTransform3,
    ) -> Result<BlockViewTransform<&Self>, VolumeError>
    where
        Self: Sized,
    {
        BlockViewTransform::new(self, transform)
    }

    /// View exposing only the read half of the contract.
    fn unmodifiable_block_view(&self) -> UnmodifiableBlockVolume<&Self>
    where
        Self: Sized,
    {
        UnmodifiableBlockVolume::new(self)
    }

    /// Materialises this volume, through every active coordinate remap, into
    /// an owned mutable buffer over the same region.
    ///
    /// # Errors
    ///
    /// Fails with [`VolumeError::UnsupportedStorageKind`] for anything other
    /// than [`StorageKind::Standard`].
    fn block_copy(&self, kind: StorageKind) -> Result<BlockBuffer<Self::Block>, VolumeError> {
        kind.ensure_supported()?;
        let region = self.block_region();
        let mut palette = Palette::new();
        let mut ids = Vec::with_capacity(region.volume());
        for position in region.iter() {
            ids.push(palette.get_or_assign(&self.block(position)?));
        }
        tracing::trace!(
            "copied {} blocks with {} distinct values",
            ids.len(),
            palette.len()
        );
        BlockBuffer::from_raw_parts(palette, CellArray::pack(&ids), region)
    }

    /// Like [`block_copy`](Self::block_copy) but frozen.
    fn immutable_block_copy(&self) -> Result<ImmutableBlockBuffer<Self::Block>, VolumeError> {
        Ok(self.block_copy(StorageKind::Standard)?.freeze())
    }

    /// Bulk traversal helper over this volume.
    fn block_worker(&self, cause: Cause) -> BlockVolumeWorker<'_, Self> {
        BlockVolumeWorker::new(self, cause)
    }
}

/// Write access on top of [`BlockVolume`].
pub trait MutableBlockVolume: BlockVolume {
    /// Stores `block` at `position`, attributing the write to `cause`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if `position` is outside
    /// [`block_region`](BlockVolume::block_region).
    fn set_block(
        &mut self,
        position: IVec3,
        block: Self::Block,
        cause: &Cause,
    ) -> Result<(), VolumeError>;

    /// Writable counterpart of [`block_view`](BlockVolume::block_view).
    fn block_view_mut(
        &mut self,
        min: IVec3,
        max: IVec3,
    ) -> Result<BlockViewDownsize<&mut Self>, VolumeError>
    where
        Self: Sized,
    {
        BlockViewDownsize::new(self, min, max)
    }

    /// Writable counterpart of
    /// [`block_transform_view`](BlockVolume::block_transform_view).
    fn block_transform_view_mut(
        &mut self,
        transform: DiscreteTransform3,
    ) -> Result<BlockViewTransform<&mut Self>, VolumeError>
    where
        Self: Sized,
    {
        BlockViewTransform::new(self, transform)
    }

    /// Bulk traversal helper that may write through the volume.
    fn block_worker_mut(&mut self, cause: Cause) -> MutableBlockVolumeWorker<'_, Self> {
        MutableBlockVolumeWorker::new(self, cause)
    }
}

impl<T: BlockVolume + ?Sized> BlockVolume for &T {
    type Block = T::Block;

    fn block_region(&self) -> Region3 {
        (**self).block_region()
    }

    fn block(&self, position: IVec3) -> Result<Self::Block, VolumeError> {
        (**self).block(position)
    }
}

impl<T: BlockVolume + ?Sized> BlockVolume for &mut T {
    type Block = T::Block;

    fn block_region(&self) -> Region3 {
        (**self).block_region()
    }

    fn block(&self, position: IVec3) -> Result<Self::Block, VolumeError> {
        (**self).block(position)
    }
}

impl<T: MutableBlockVolume + ?Sized> MutableBlockVolume for &mut T {
    fn set_block(
        &mut self,
        position: IVec3,
        block: Self::Block,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        (**self).set_block(position, block, cause)
    }
}
