//! The coordinate-addressed biome area contract, the 2D twin of
//! [`BlockVolume`](crate::BlockVolume).

use std::hash::Hash;

use glam::IVec2;
use strata_math::{DiscreteTransform2, Region2};

use crate::buffer::{BiomeBuffer, ImmutableBiomeBuffer};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::palette::Palette;
use crate::storage::{CellArray, StorageKind};
use crate::view::{BiomeViewDownsize, BiomeViewTransform, UnmodifiableBiomeArea};
use crate::worker::{BiomeAreaWorker, MutableBiomeAreaWorker};

/// Read access to a bounded 2D grid of biome values.
pub trait BiomeArea {
    type Biome: Clone + Eq + Hash;

    fn biome_region(&self) -> Region2;

    /// # Errors
    ///
    /// Returns [`VolumeError::BiomeOutOfBounds`] outside
    /// [`biome_region`](Self::biome_region).
    fn biome(&self, position: IVec2) -> Result<Self::Biome, VolumeError>;

    fn contains_biome(&self, position: IVec2) -> bool {
        self.biome_region().contains(position)
    }

    fn biome_min(&self) -> IVec2 {
        self.biome_region().min()
    }

    fn biome_max(&self) -> IVec2 {
        self.biome_region().max()
    }

    fn biome_size(&self) -> IVec2 {
        self.biome_region().size()
    }

    fn biome_view(&self, min: IVec2, max: IVec2) -> Result<BiomeViewDownsize<&Self>, VolumeError>
    where
        Self: Sized,
    {
        BiomeViewDownsize::new(self, min, max)
    }

    fn biome_transform_view(
        &self,
        transform: DiscreteTransform2,
    ) -> Result<BiomeViewTransform<&Self>, VolumeError>
    where
        Self: Sized,
    {
        BiomeViewTransform::new(self, transform)
    }

    fn unmodifiable_biome_view(&self) -> UnmodifiableBiomeArea<&Self>
    where
        Self: Sized,
    {
        UnmodifiableBiomeArea::new(self)
    }

    /// # Errors
    ///
    /// Fails with [`VolumeError::UnsupportedStorageKind`] for anything other
    /// than [`StorageKind::Standard`].
    fn biome_copy(&self, kind: StorageKind) -> Result<BiomeBuffer<Self::Biome>, VolumeError> {
        kind.ensure_supported()?;
        let region = self.biome_region();
        let mut palette = Palette::new();
        let mut ids = Vec::with_capacity(region.area());
        for position in region.iter() {
            ids.push(palette.get_or_assign(&self.biome(position)?));
        }
        BiomeBuffer::from_raw_parts(palette, CellArray::pack(&ids), region)
    }

    fn immutable_biome_copy(&self) -> Result<ImmutableBiomeBuffer<Self::Biome>, VolumeError> {
        Ok(self.biome_copy(StorageKind::Standard)?.freeze())
    }

    fn biome_worker(&self, cause: Cause) -> BiomeAreaWorker<'_, Self> {
        BiomeAreaWorker::new(self, cause)
    }
}

/// Write access on top of [`BiomeArea`].
pub trait MutableBiomeArea: BiomeArea {
    /// # Errors
    ///
    /// Returns [`VolumeError::BiomeOutOfBounds`] outside
    /// [`biome_region`](BiomeArea::biome_region).
    fn set_biome(
        &mut self,
        position: IVec2,
        biome: Self::Biome,
        cause: &Cause,
    ) -> Result<(), VolumeError>;

    fn biome_view_mut(
        &mut self,
        min: IVec2,
        max: IVec2,
    ) -> Result<BiomeViewDownsize<&mut Self>, VolumeError>
    where
        Self: Sized,
    {
        BiomeViewDownsize::new(self, min, max)
    }

    fn biome_transform_view_mut(
        &mut self,
        transform: DiscreteTransform2,
    ) -> Result<BiomeViewTransform<&mut Self>, VolumeError>
    where
        Self: Sized,
    {
        BiomeViewTransform::new(self, transform)
    }

    fn biome_worker_mut(&mut self, cause: Cause) -> MutableBiomeAreaWorker<'_, Self> {
        MutableBiomeAreaWorker::new(self, cause)
    }
}

impl<T: BiomeArea + ?Sized> BiomeArea for &T {
    type Biome = T::Biome;

    fn biome_region(&self) -> Region2 {
        (**self).biome_region()
    }

    fn biome(&self, position: IVec2) -> Result<Self::Biome, VolumeError> {
        (**self).biome(position)
    }
}

impl<T: BiomeArea + ?Sized> BiomeArea for &mut T {
    type Biome = T::Biome;

    fn biome_region(&self) -> Region2 {
        (**self).biome_region()
    }

    fn biome(&self, position: IVec2) -> Result<Self::Biome, VolumeError> {
        (**self).biome(position)
    }
}

impl<T: MutableBiomeArea + ?Sized> MutableBiomeArea for &mut T {
    fn set_biome(
        &mut self,
        position: IVec2,
        biome: Self::Biome,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        (**self).set_biome(position, biome, cause)
    }
}
