//! Errors surfaced by volume storage, views and workers.

use glam::{IVec2, IVec3};
use thiserror::Error;

use crate::storage::StorageKind;

/// Failure of a volume, area or palette operation.
///
/// None of these are retried internally; a worker stops at the first one and
/// any writes it already performed stay in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    /// A block position outside the addressed region. Also reported with a
    /// source corner and the source bounds when moving that region would
    /// take a position past the `i32` lattice.
    #[error("block position {position} is outside {min}..={max}")]
    BlockOutOfBounds {
        position: IVec3,
        min: IVec3,
        max: IVec3,
    },

    /// A biome column outside the addressed area, or a source corner whose
    /// transformed image leaves the `i32` lattice.
    #[error("biome position {position} is outside {min}..={max}")]
    BiomeOutOfBounds {
        position: IVec2,
        min: IVec2,
        max: IVec2,
    },

    /// The requested storage kind is recognised but has no implementation.
    #[error("storage kind {0:?} is not supported")]
    UnsupportedStorageKind(StorageKind),

    /// A cell referenced an id the palette never issued. Indicates a
    /// desynchronised buffer rather than bad input.
    #[error("palette has no entry for id {0}")]
    UnknownPaletteId(u32),

    /// Raw cells handed to a buffer do not match its region.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

impl VolumeError {
    pub(crate) fn block_out_of_bounds(position: IVec3, region: &strata_math::Region3) -> Self {
        VolumeError::BlockOutOfBounds {
            position,
            min: region.min(),
            max: region.max(),
        }
    }

    pub(crate) fn biome_out_of_bounds(position: IVec2, region: &strata_math::Region2) -> Self {
        VolumeError::BiomeOutOfBounds {
            position,
            min: region.min(),
            max: region.max(),
        }
    }
}
