//! Views that expose their source under a discrete transform.
//!
//! The view's region is the source region mapped forward through the
//! transform; each access maps the view coordinate back through the inverse
//! before touching the source. Construction fails when the mapped region
//! would leave the `i32` lattice.

use glam::{IVec2, IVec3};
use strata_math::{DiscreteTransform2, DiscreteTransform3, Region2, Region3};

use crate::area::{BiomeArea, MutableBiomeArea};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::volume::{BlockVolume, MutableBlockVolume};

/// A block volume viewed through a [`DiscreteTransform3`].
#[derive(Clone, Debug)]
pub struct BlockViewTransform<S> {
    source: S,
    transform: DiscreteTransform3,
    inverse: DiscreteTransform3,
    region: Region3,
}

impl<S: BlockVolume> BlockViewTransform<S> {
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] naming the first source
    /// corner whose image does not fit in `i32`.
    pub fn new(source: S, transform: DiscreteTransform3) -> Result<Self, VolumeError> {
        let bounds = source.block_region();
        let region = transform.apply_region(&bounds).ok_or_else(|| {
            let corner = [bounds.min(), bounds.max()]
                .into_iter()
                .find(|&c| transform.checked_apply(c).is_none())
                .unwrap_or(bounds.min());
            VolumeError::block_out_of_bounds(corner, &bounds)
        })?;
        Ok(Self {
            region,
            inverse: transform.inverse(),
            transform,
            source,
        })
    }

    /// Applies `next` after this view's transform, keeping a single view
    /// over the original source.
    pub fn then(self, next: &DiscreteTransform3) -> Result<Self, VolumeError> {
        Self::new(self.source, self.transform.and_then(next))
    }

    pub fn transform(&self) -> &DiscreteTransform3 {
        &self.transform
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn source_position(&self, position: IVec3) -> Result<IVec3, VolumeError> {
        if !self.region.contains(position) {
            return Err(VolumeError::block_out_of_bounds(position, &self.region));
        }
        Ok(self.inverse.apply(position))
    }
}

impl<S: BlockVolume> BlockVolume for BlockViewTransform<S> {
    type Block = S::Block;

    fn block_region(&self) -> Region3 {
        self.region
    }

    fn block(&self, position: IVec3) -> Result<S::Block, VolumeError> {
        self.source.block(self.source_position(position)?)
    }
}

impl<S: MutableBlockVolume> MutableBlockVolume for BlockViewTransform<S> {
    fn set_block(
        &mut self,
        position: IVec3,
        block: S::Block,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        let mapped = self.source_position(position)?;
        self.source.set_block(mapped, block, cause)
    }
}

/// A biome area viewed through a [`DiscreteTransform2`].
#[derive(Clone, Debug)]
pub struct BiomeViewTransform<S> {
    source: S,
    transform: DiscreteTransform2,
    inverse: DiscreteTransform2,
    region: Region2,
}

impl<S: BiomeArea> BiomeViewTransform<S> {
    /// # Errors
    ///
    /// Returns [`VolumeError::BiomeOutOfBounds`] naming the first source
    /// corner whose image does not fit in `i32`.
    pub fn new(source: S, transform: DiscreteTransform2) -> Result<Self, VolumeError> {
        let bounds = source.biome_region();
        let region = transform.apply_region(&bounds).ok_or_else(|| {
            let corner = [bounds.min(), bounds.max()]
                .into_iter()
                .find(|&c| transform.checked_apply(c).is_none())
                .unwrap_or(bounds.min());
            VolumeError::biome_out_of_bounds(corner, &bounds)
        })?;
        Ok(Self {
            region,
            inverse: transform.inverse(),
            transform,
            source,
        })
    }

    pub fn then(self, next: &DiscreteTransform2) -> Result<Self, VolumeError> {
        Self::new(self.source, self.transform.and_then(next))
    }

    pub fn transform(&self) -> &DiscreteTransform2 {
        &self.transform
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn source_position(&self, position: IVec2) -> Result<IVec2, VolumeError> {
        if !self.region.contains(position) {
            return Err(VolumeError::biome_out_of_bounds(position, &self.region));
        }
        Ok(self.inverse.apply(position))
    }
}

impl<S: BiomeArea> BiomeArea for BiomeViewTransform<S> {
    type Biome = S::Biome;

    fn biome_region(&self) -> Region2 {
        self.region
    }

    fn biome(&self, position: IVec2) -> Result<S::Biome, VolumeError> {
        self.source.biome(self.source_position(position)?)
    }
}

impl<S: MutableBiomeArea> MutableBiomeArea for BiomeViewTransform<S> {
    fn set_biome(
        &mut self,
        position: IVec2,
        biome: S::Biome,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        let mapped = self.source_position(position)?;
        self.source.set_biome(mapped, biome, cause)
    }
}
