//! Read-only wrappers.
//!
//! These implement only the read traits, so even a wrapper around `&mut T`
//! offers no way to mutate.

use glam::{IVec2, IVec3};
use strata_math::{Region2, Region3};

use crate::area::BiomeArea;
use crate::error::VolumeError;
use crate::volume::BlockVolume;

#[derive(Clone, Debug)]
pub struct UnmodifiableBlockVolume<S> {
    source: S,
}

impl<S: BlockVolume> UnmodifiableBlockVolume<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: BlockVolume> BlockVolume for UnmodifiableBlockVolume<S> {
    type Block = S::Block;

    fn block_region(&self) -> Region3 {
        self.source.block_region()
    }

    fn block(&self, position: IVec3) -> Result<S::Block, VolumeError> {
        self.source.block(position)
    }
}

#[derive(Clone, Debug)]
pub struct UnmodifiableBiomeArea<S> {
    source: S,
}

impl<S: BiomeArea> UnmodifiableBiomeArea<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: BiomeArea> BiomeArea for UnmodifiableBiomeArea<S> {
    type Biome = S::Biome;

    fn biome_region(&self) -> Region2 {
        self.source.biome_region()
    }

    fn biome(&self, position: IVec2) -> Result<S::Biome, VolumeError> {
        self.source.biome(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BiomeBuffer, BlockBuffer};
    use crate::cause::Cause;
    use crate::volume::MutableBlockVolume;

    #[test]
    fn test_reads_delegate() {
        let region = Region3::new(IVec3::ZERO, IVec3::splat(2));
        let mut buffer = BlockBuffer::filled(region, 'a');
        buffer.set_block(IVec3::ONE, 'b', &Cause::new("test")).unwrap();
        let view = buffer.unmodifiable_block_view();
        assert_eq!(view.block_region(), region);
        assert_eq!(view.block(IVec3::ONE), Ok('b'));
        assert!(view.block(IVec3::splat(3)).is_err());
    }

    #[test]
    fn test_wrapping_exclusive_borrow_stays_read_only() {
        let region = Region2::new(IVec2::ZERO, IVec2::ONE);
        let mut area = BiomeBuffer::filled(region, 5u8);
        let view = UnmodifiableBiomeArea::new(&mut area);
        assert_eq!(view.biome(IVec2::ONE), Ok(5));
        let copy = view.biome_copy(crate::StorageKind::Standard).unwrap();
        assert_eq!(copy.biome_region(), region);
    }
}
