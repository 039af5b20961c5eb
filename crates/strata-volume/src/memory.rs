//! An extent held entirely in memory.
//!
//! Stands in for a host world wherever one is not available: blocks and
//! biomes live in mutable buffers, tile entities in a sparse map.

use std::hash::Hash;

use glam::{IVec2, IVec3};
use rustc_hash::FxHashMap;
use strata_math::{Region2, Region3};

use crate::area::{BiomeArea, MutableBiomeArea};
use crate::buffer::{BiomeBuffer, BlockBuffer};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::extent::{Extent, MutableExtent, TileArchetype, TileEntity};
use crate::volume::{BlockVolume, MutableBlockVolume};

#[derive(Clone, Debug)]
pub struct MemoryExtent<V, B, T> {
    blocks: BlockBuffer<V>,
    biomes: BiomeBuffer<B>,
    tiles: FxHashMap<IVec3, T>,
}

impl<V: Clone + Eq + Hash, B: Clone + Eq + Hash, T> MemoryExtent<V, B, T> {
    /// Creates an extent over `region` filled with `block`, with `biome` on
    /// every column of its footprint.
    pub fn new(region: Region3, block: V, biome: B) -> Self {
        Self {
            blocks: BlockBuffer::filled(region, block),
            biomes: BiomeBuffer::filled(Region2::footprint(&region), biome),
            tiles: FxHashMap::default(),
        }
    }

    pub fn blocks(&self) -> &BlockBuffer<V> {
        &self.blocks
    }

    pub fn biomes(&self) -> &BiomeBuffer<B> {
        &self.biomes
    }

    /// Places `tile` at `position`, returning whatever was there before.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BlockOutOfBounds`] if `position` is outside the
    /// block region.
    pub fn set_tile_entity(&mut self, position: IVec3, tile: T) -> Result<Option<T>, VolumeError> {
        let region = self.blocks.block_region();
        if !region.contains(position) {
            return Err(VolumeError::block_out_of_bounds(position, &region));
        }
        Ok(self.tiles.insert(position, tile))
    }

    pub fn remove_tile_entity(&mut self, position: IVec3) -> Option<T> {
        self.tiles.remove(&position)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl<V: Clone + Eq + Hash, B: Clone + Eq + Hash, T> BlockVolume for MemoryExtent<V, B, T> {
    type Block = V;

    fn block_region(&self) -> Region3 {
        self.blocks.block_region()
    }

    fn block(&self, position: IVec3) -> Result<V, VolumeError> {
        self.blocks.block(position)
    }
}

impl<V: Clone + Eq + Hash, B: Clone + Eq + Hash, T> MutableBlockVolume for MemoryExtent<V, B, T> {
    fn set_block(&mut self, position: IVec3, block: V, cause: &Cause) -> Result<(), VolumeError> {
        self.blocks.set_block(position, block, cause)
    }
}

impl<V: Clone + Eq + Hash, B: Clone + Eq + Hash, T> BiomeArea for MemoryExtent<V, B, T> {
    type Biome = B;

    fn biome_region(&self) -> Region2 {
        self.biomes.biome_region()
    }

    fn biome(&self, position: IVec2) -> Result<B, VolumeError> {
        self.biomes.biome(position)
    }
}

impl<V: Clone + Eq + Hash, B: Clone + Eq + Hash, T> MutableBiomeArea for MemoryExtent<V, B, T> {
    fn set_biome(&mut self, position: IVec2, biome: B, cause: &Cause) -> Result<(), VolumeError> {
        self.biomes.set_biome(position, biome, cause)
    }
}

impl<V, B, T> Extent for MemoryExtent<V, B, T>
where
    V: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    T: TileEntity + Clone,
{
    type TileEntity = T;

    fn tile_entity(&self, position: IVec3) -> Result<Option<T>, VolumeError> {
        let region = self.blocks.block_region();
        if !region.contains(position) {
            return Err(VolumeError::block_out_of_bounds(position, &region));
        }
        Ok(self.tiles.get(&position).cloned())
    }
}

impl<V, B, T> MutableExtent for MemoryExtent<V, B, T>
where
    V: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    T: TileEntity + Clone + From<T::Archetype>,
{
    fn restore_tile_entity(
        &mut self,
        position: IVec3,
        archetype: &TileArchetype<Self>,
        _cause: &Cause,
    ) -> Result<(), VolumeError> {
        self.set_tile_entity(position, T::from(archetype.clone()))?;
        Ok(())
    }
}
