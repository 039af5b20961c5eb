//! Views that narrow the addressable region without shifting coordinates.

use glam::{IVec2, IVec3};
use strata_math::{Region2, Region3};

use crate::area::{BiomeArea, MutableBiomeArea};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::extent::{Extent, MutableExtent, TileArchetype};
use crate::volume::{BlockVolume, MutableBlockVolume};

fn check_block_corners(source: &Region3, min: IVec3, max: IVec3) -> Result<(), VolumeError> {
    for corner in [min, max] {
        if !source.contains(corner) {
            return Err(VolumeError::block_out_of_bounds(corner, source));
        }
    }
    Ok(())
}

fn check_block(region: &Region3, position: IVec3) -> Result<(), VolumeError> {
    if region.contains(position) {
        Ok(())
    } else {
        Err(VolumeError::block_out_of_bounds(position, region))
    }
}

fn check_biome(region: &Region2, position: IVec2) -> Result<(), VolumeError> {
    if region.contains(position) {
        Ok(())
    } else {
        Err(VolumeError::biome_out_of_bounds(position, region))
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// A sub-region of a block volume, addressed with the source's coordinates.
#[derive(Clone, Debug)]
pub struct BlockViewDownsize<S> {
    source: S,
    region: Region3,
}

impl<S: BlockVolume> BlockViewDownsize<S> {
    /// Narrows `source` to `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] carrying the offending
    /// corner and the source's bounds if either corner is outside `source`.
    pub fn new(source: S, min: IVec3, max: IVec3) -> Result<Self, VolumeError> {
        check_block_corners(&source.block_region(), min, max)?;
        Ok(Self {
            region: Region3::new(min, max),
            source,
        })
    }

    /// Narrows this view further without nesting another view.
    ///
    /// # Errors
    ///
    /// Fails like [`new`](Self::new), checked against this view's bounds.
    pub fn narrow(self, min: IVec3, max: IVec3) -> Result<Self, VolumeError> {
        check_block_corners(&self.region, min, max)?;
        Ok(Self {
            region: Region3::new(min, max),
            source: self.source,
        })
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: BlockVolume> BlockVolume for BlockViewDownsize<S> {
    type Block = S::Block;

    fn block_region(&self) -> Region3 {
        self.region
    }

    fn block(&self, position: IVec3) -> Result<S::Block, VolumeError> {
        check_block(&self.region, position)?;
        self.source.block(position)
    }
}

impl<S: MutableBlockVolume> MutableBlockVolume for BlockViewDownsize<S> {
    fn set_block(
        &mut self,
        position: IVec3,
        block: S::Block,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        check_block(&self.region, position)?;
        self.source.set_block(position, block, cause)
    }
}

// ---------------------------------------------------------------------------
// Biomes
// ---------------------------------------------------------------------------

/// A sub-area of a biome area, addressed with the source's coordinates.
#[derive(Clone, Debug)]
pub struct BiomeViewDownsize<S> {
    source: S,
    region: Region2,
}

impl<S: BiomeArea> BiomeViewDownsize<S> {
    /// # Errors
    ///
    /// Returns [`VolumeError::BiomeOutOfBounds`] if either corner is outside
    /// `source`.
    pub fn new(source: S, min: IVec2, max: IVec2) -> Result<Self, VolumeError> {
        let bounds = source.biome_region();
        for corner in [min, max] {
            check_biome(&bounds, corner)?;
        }
        Ok(Self {
            region: Region2::new(min, max),
            source,
        })
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: BiomeArea> BiomeArea for BiomeViewDownsize<S> {
    type Biome = S::Biome;

    fn biome_region(&self) -> Region2 {
        self.region
    }

    fn biome(&self, position: IVec2) -> Result<S::Biome, VolumeError> {
        check_biome(&self.region, position)?;
        self.source.biome(position)
    }
}

impl<S: MutableBiomeArea> MutableBiomeArea for BiomeViewDownsize<S> {
    fn set_biome(
        &mut self,
        position: IVec2,
        biome: S::Biome,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        check_biome(&self.region, position)?;
        self.source.set_biome(position, biome, cause)
    }
}

// ---------------------------------------------------------------------------
// Extents
// ---------------------------------------------------------------------------

/// A sub-region of a whole extent: blocks, tile entities, and the biome
/// columns under the block footprint.
#[derive(Clone, Debug)]
pub struct ExtentViewDownsize<S> {
    source: S,
    blocks: Region3,
    biomes: Region2,
}

impl<S: Extent> ExtentViewDownsize<S> {
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if either corner is outside
    /// the source's block region, or [`VolumeError::BiomeOutOfBounds`] if a
    /// corner of the footprint is outside the source's biome area.
    pub fn new(source: S, min: IVec3, max: IVec3) -> Result<Self, VolumeError> {
        check_block_corners(&source.block_region(), min, max)?;
        let blocks = Region3::new(min, max);
        let biomes = Region2::footprint(&blocks);
        let biome_bounds = source.biome_region();
        for corner in [biomes.min(), biomes.max()] {
            check_biome(&biome_bounds, corner)?;
        }
        Ok(Self {
            biomes,
            blocks,
            source,
        })
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Extent> BlockVolume for ExtentViewDownsize<S> {
    type Block = S::Block;

    fn block_region(&self) -> Region3 {
        self.blocks
    }

    fn block(&self, position: IVec3) -> Result<S::Block, VolumeError> {
        check_block(&self.blocks, position)?;
        self.source.block(position)
    }
}

impl<S: Extent> BiomeArea for ExtentViewDownsize<S> {
    type Biome = S::Biome;

    fn biome_region(&self) -> Region2 {
        self.biomes
    }

    fn biome(&self, position: IVec2) -> Result<S::Biome, VolumeError> {
        check_biome(&self.biomes, position)?;
        self.source.biome(position)
    }
}

impl<S: Extent> Extent for ExtentViewDownsize<S> {
    type TileEntity = S::TileEntity;

    fn tile_entity(&self, position: IVec3) -> Result<Option<S::TileEntity>, VolumeError> {
        check_block(&self.blocks, position)?;
        self.source.tile_entity(position)
    }
}

impl<S: MutableExtent> MutableBlockVolume for ExtentViewDownsize<S> {
    fn set_block(
        &mut self,
        position: IVec3,
        block: S::Block,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        check_block(&self.blocks, position)?;
        self.source.set_block(position, block, cause)
    }
}

impl<S: MutableExtent> MutableBiomeArea for ExtentViewDownsize<S> {
    fn set_biome(
        &mut self,
        position: IVec2,
        biome: S::Biome,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        check_biome(&self.biomes, position)?;
        self.source.set_biome(position, biome, cause)
    }
}

impl<S: MutableExtent> MutableExtent for ExtentViewDownsize<S> {
    fn restore_tile_entity(
        &mut self,
        position: IVec3,
        archetype: &TileArchetype<S>,
        cause: &Cause,
    ) -> Result<(), VolumeError> {
        check_block(&self.blocks, position)?;
        self.source.restore_tile_entity(position, archetype, cause)
    }
}
