use std::hash::Hash;
use std::sync::Arc;

use glam::IVec2;
use strata_math::Region2;

use super::{check_len, decode};
use crate::area::{BiomeArea, MutableBiomeArea};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::palette::Palette;
use crate::storage::{CellArray, StorageTier};

/// Mutable palette-compressed biome storage for one area.
#[derive(Clone, Debug)]
pub struct BiomeBuffer<B> {
    region: Region2,
    palette: Palette<B>,
    cells: CellArray,
}

impl<B: Clone + Eq + Hash> BiomeBuffer<B> {
    /// Allocates cells for `region` at the tier `palette` already needs.
    pub fn new(palette: Palette<B>, region: Region2) -> Self {
        let tier = StorageTier::for_highest_id(palette.highest_id());
        Self {
            cells: CellArray::new(tier, region.area()),
            region,
            palette,
        }
    }

    pub fn filled(region: Region2, fill: B) -> Self {
        let mut palette = Palette::new();
        palette.get_or_assign(&fill);
        Self::new(palette, region)
    }

    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not hold
    /// exactly one id per column of `region`.
    pub fn from_raw_parts(
        palette: Palette<B>,
        cells: CellArray,
        region: Region2,
    ) -> Result<Self, VolumeError> {
        check_len(&cells, region.area())?;
        Ok(Self {
            region,
            palette,
            cells,
        })
    }

    pub fn tier(&self) -> StorageTier {
        self.cells.tier()
    }

    pub fn palette(&self) -> &Palette<B> {
        &self.palette
    }

    pub fn cells(&self) -> &CellArray {
        &self.cells
    }

    pub fn freeze(self) -> ImmutableBiomeBuffer<B> {
        ImmutableBiomeBuffer {
            region: self.region,
            palette: Arc::new(self.palette),
            cells: Arc::new(self.cells),
        }
    }

    fn index(&self, position: IVec2) -> Result<usize, VolumeError> {
        self.region
            .index_of(position)
            .ok_or_else(|| VolumeError::biome_out_of_bounds(position, &self.region))
    }
}

impl<B: Clone + Eq + Hash> BiomeArea for BiomeBuffer<B> {
    type Biome = B;

    fn biome_region(&self) -> Region2 {
        self.region
    }

    fn biome(&self, position: IVec2) -> Result<B, VolumeError> {
        let index = self.index(position)?;
        decode(&self.palette, &self.cells, index)
    }
}

impl<B: Clone + Eq + Hash> MutableBiomeArea for BiomeBuffer<B> {
    fn set_biome(&mut self, position: IVec2, biome: B, _cause: &Cause) -> Result<(), VolumeError> {
        let index = self.index(position)?;
        let id = self.palette.get_or_assign(&biome);
        self.cells.set(index, id);
        Ok(())
    }
}

/// Frozen palette-compressed biome storage.
#[derive(Clone, Debug)]
pub struct ImmutableBiomeBuffer<B> {
    region: Region2,
    palette: Arc<Palette<B>>,
    cells: Arc<CellArray>,
}

impl<B: Clone + Eq + Hash> ImmutableBiomeBuffer<B> {
    /// Wraps existing shared storage without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not match
    /// `region`.
    pub fn from_shared(
        palette: Arc<Palette<B>>,
        cells: Arc<CellArray>,
        region: Region2,
    ) -> Result<Self, VolumeError> {
        check_len(&cells, region.area())?;
        Ok(Self {
            region,
            palette,
            cells,
        })
    }

    /// Builds a buffer from its own copy of `palette` and `cells`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not match
    /// `region`.
    pub fn copy_of(
        palette: &Palette<B>,
        cells: &CellArray,
        region: Region2,
    ) -> Result<Self, VolumeError> {
        Self::from_shared(Arc::new(palette.clone()), Arc::new(cells.clone()), region)
    }

    pub fn tier(&self) -> StorageTier {
        self.cells.tier()
    }

    pub fn shares_cells_with(&self, other: &ImmutableBiomeBuffer<B>) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    pub fn to_mutable(&self) -> BiomeBuffer<B> {
        BiomeBuffer {
            region: self.region,
            palette: (*self.palette).clone(),
            cells: (*self.cells).clone(),
        }
    }
}

impl<B: Clone + Eq + Hash> BiomeArea for ImmutableBiomeBuffer<B> {
    type Biome = B;

    fn biome_region(&self) -> Region2 {
        self.region
    }

    fn biome(&self, position: IVec2) -> Result<B, VolumeError> {
        let index = self
            .region
            .index_of(position)
            .ok_or_else(|| VolumeError::biome_out_of_bounds(position, &self.region))?;
        decode(&self.palette, &self.cells, index)
    }
}
