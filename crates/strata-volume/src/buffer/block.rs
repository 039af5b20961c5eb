use std::hash::Hash;
use std::sync::Arc;

use glam::IVec3;
use strata_math::Region3;

use super::{check_len, decode};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::palette::Palette;
use crate::storage::{CellArray, StorageTier};
use crate::volume::{BlockVolume, MutableBlockVolume};

/// Mutable palette-compressed block storage for one region.
///
/// The id width is chosen from the palette at construction. Writing a value
/// whose new id no longer fits widens the cells in place.
#[derive(Clone, Debug)]
pub struct BlockBuffer<V> {
    region: Region3,
    palette: Palette<V>,
    cells: CellArray,
}

impl<V: Clone + Eq + Hash> BlockBuffer<V> {
    /// Allocates cells for `region` at the tier `palette` already needs.
    ///
    /// Every cell starts out referencing id 0, so `palette` should not be
    /// empty unless every cell is written before it is read.
    pub fn new(palette: Palette<V>, region: Region3) -> Self {
        let tier = StorageTier::for_highest_id(palette.highest_id());
        Self {
            cells: CellArray::new(tier, region.volume()),
            region,
            palette,
        }
    }

    /// A buffer over `region` where every block is `fill`.
    pub fn filled(region: Region3, fill: V) -> Self {
        let mut palette = Palette::new();
        palette.get_or_assign(&fill);
        Self::new(palette, region)
    }

    /// Assembles a buffer from already-encoded cells.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not hold
    /// exactly one id per position of `region`.
    pub fn from_raw_parts(
        palette: Palette<V>,
        cells: CellArray,
        region: Region3,
    ) -> Result<Self, VolumeError> {
        check_len(&cells, region.volume())?;
        Ok(Self {
            region,
            palette,
            cells,
        })
    }

    pub fn tier(&self) -> StorageTier {
        self.cells.tier()
    }

    pub fn palette(&self) -> &Palette<V> {
        &self.palette
    }

    pub fn cells(&self) -> &CellArray {
        &self.cells
    }

    /// Approximate memory used by the cells, in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.cells.storage_bytes()
    }

    /// Converts into an immutable buffer without copying the cells.
    pub fn freeze(self) -> ImmutableBlockBuffer<V> {
        ImmutableBlockBuffer {
            region: self.region,
            palette: Arc::new(self.palette),
            cells: Arc::new(self.cells),
        }
    }

    fn index(&self, position: IVec3) -> Result<usize, VolumeError> {
        self.region
            .index_of(position)
            .ok_or_else(|| VolumeError::block_out_of_bounds(position, &self.region))
    }
}

impl<V: Clone + Eq + Hash> BlockVolume for BlockBuffer<V> {
    type Block = V;

    fn block_region(&self) -> Region3 {
        self.region
    }

    fn block(&self, position: IVec3) -> Result<V, VolumeError> {
        let index = self.index(position)?;
        decode(&self.palette, &self.cells, index)
    }
}

impl<V: Clone + Eq + Hash> MutableBlockVolume for BlockBuffer<V> {
    fn set_block(&mut self, position: IVec3, block: V, _cause: &Cause) -> Result<(), VolumeError> {
        let index = self.index(position)?;
        let id = self.palette.get_or_assign(&block);
        self.cells.set(index, id);
        Ok(())
    }
}

/// Frozen palette-compressed block storage.
///
/// Palette and cells sit behind [`Arc`], so clones are cheap and several
/// buffers may alias one array. Nothing can write through it.
#[derive(Clone, Debug)]
pub struct ImmutableBlockBuffer<V> {
    region: Region3,
    palette: Arc<Palette<V>>,
    cells: Arc<CellArray>,
}

impl<V: Clone + Eq + Hash> ImmutableBlockBuffer<V> {
    /// Wraps existing shared storage without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not match
    /// `region`.
    pub fn from_shared(
        palette: Arc<Palette<V>>,
        cells: Arc<CellArray>,
        region: Region3,
    ) -> Result<Self, VolumeError> {
        check_len(&cells, region.volume())?;
        Ok(Self {
            region,
            palette,
            cells,
        })
    }

    /// Builds a buffer from its own copy of `palette` and `cells`, so later
    /// changes to the originals cannot show through.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::CellCountMismatch`] if `cells` does not match
    /// `region`.
    pub fn copy_of(
        palette: &Palette<V>,
        cells: &CellArray,
        region: Region3,
    ) -> Result<Self, VolumeError> {
        Self::from_shared(Arc::new(palette.clone()), Arc::new(cells.clone()), region)
    }

    pub fn tier(&self) -> StorageTier {
        self.cells.tier()
    }

    pub fn palette(&self) -> &Arc<Palette<V>> {
        &self.palette
    }

    pub fn cells(&self) -> &Arc<CellArray> {
        &self.cells
    }

    /// Returns true if both buffers read from the same cell allocation.
    pub fn shares_cells_with(&self, other: &ImmutableBlockBuffer<V>) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// An independent mutable copy.
    pub fn to_mutable(&self) -> BlockBuffer<V> {
        BlockBuffer {
            region: self.region,
            palette: (*self.palette).clone(),
            cells: (*self.cells).clone(),
        }
    }
}

impl<V: Clone + Eq + Hash> BlockVolume for ImmutableBlockBuffer<V> {
    type Block = V;

    fn block_region(&self) -> Region3 {
        self.region
    }

    fn block(&self, position: IVec3) -> Result<V, VolumeError> {
        let index = self
            .region
            .index_of(position)
            .ok_or_else(|| VolumeError::block_out_of_bounds(position, &self.region))?;
        decode(&self.palette, &self.cells, index)
    }
}
