//! Array-backed storage for block volumes and biome areas.
//!
//! Each buffer pairs a [`Palette`](crate::Palette) with a
//! [`CellArray`](crate::CellArray) of ids laid out in the region's canonical
//! linear order. Mutable and immutable buffers are distinct types; the
//! immutable ones do not implement the mutable traits.

mod biome;
mod block;

pub use biome::{BiomeBuffer, ImmutableBiomeBuffer};
pub use block::{BlockBuffer, ImmutableBlockBuffer};

use crate::error::VolumeError;
use crate::palette::Palette;
use crate::storage::CellArray;

/// Decodes the cell at `index` through `palette`.
fn decode<V: Clone + Eq + std::hash::Hash>(
    palette: &Palette<V>,
    cells: &CellArray,
    index: usize,
) -> Result<V, VolumeError> {
    palette.value_of(cells.get(index)).cloned()
}

fn check_len(cells: &CellArray, expected: usize) -> Result<(), VolumeError> {
    if cells.len() != expected {
        return Err(VolumeError::CellCountMismatch {
            expected,
            actual: cells.len(),
        });
    }
    Ok(())
}
