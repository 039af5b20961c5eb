//! Palette-compressed block volumes and biome areas, zero-copy views over
//! them, bulk workers, and detached archetype snapshots of extents.

mod archetype;
mod area;
mod buffer;
mod cause;
mod error;
mod extent;
mod memory;
mod palette;
mod storage;
mod view;
mod volume;
mod worker;

#[cfg(test)]
mod view_composition_tests;

pub use archetype::ArchetypeVolume;
pub use area::{BiomeArea, MutableBiomeArea};
pub use buffer::{BiomeBuffer, BlockBuffer, ImmutableBiomeBuffer, ImmutableBlockBuffer};
pub use cause::Cause;
pub use error::VolumeError;
pub use extent::{BlockSnapshot, Extent, MutableExtent, TileArchetype, TileEntity};
pub use memory::MemoryExtent;
pub use palette::Palette;
pub use storage::{CellArray, StorageKind, StorageTier};
pub use view::{
    BiomeViewDownsize, BiomeViewTransform, BlockViewDownsize, BlockViewTransform,
    ExtentViewDownsize, UnmodifiableBiomeArea, UnmodifiableBlockVolume,
};
pub use volume::{BlockVolume, MutableBlockVolume};
pub use worker::{BiomeAreaWorker, BlockVolumeWorker, MutableBiomeAreaWorker, MutableBlockVolumeWorker};
