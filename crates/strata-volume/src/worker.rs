//! Deterministic bulk traversal over volumes and areas.
//!
//! Workers walk every position of their source's region exactly once, in
//! ascending linear index order (z outer, y middle, x inner for blocks; y
//! outer, x inner for biome columns), on the calling thread. Visitors return
//! `Result`; the first error stops the walk and is returned as-is. Writes
//! made before that point are not undone.

use glam::{IVec2, IVec3};

use crate::area::{BiomeArea, MutableBiomeArea};
use crate::cause::Cause;
use crate::error::VolumeError;
use crate::volume::{BlockVolume, MutableBlockVolume};

/// Read-only traversal of a block volume.
pub struct BlockVolumeWorker<'a, V: ?Sized> {
    volume: &'a V,
    cause: Cause,
}

impl<'a, V: BlockVolume + ?Sized> BlockVolumeWorker<'a, V> {
    pub fn new(volume: &'a V, cause: Cause) -> Self {
        Self { volume, cause }
    }

    pub fn volume(&self) -> &'a V {
        self.volume
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Calls `visitor` for every position with the worker's cause.
    pub fn iterate<F>(&self, mut visitor: F) -> Result<(), VolumeError>
    where
        F: FnMut(&V, IVec3, &Cause) -> Result<(), VolumeError>,
    {
        for position in self.volume.block_region() {
            visitor(self.volume, position, &self.cause)?;
        }
        Ok(())
    }

    /// Folds every position into an accumulator.
    pub fn reduce<T, F>(&self, identity: T, mut reducer: F) -> Result<T, VolumeError>
    where
        F: FnMut(T, &V, IVec3) -> Result<T, VolumeError>,
    {
        let mut acc = identity;
        for position in self.volume.block_region() {
            acc = reducer(acc, self.volume, position)?;
        }
        Ok(acc)
    }

    /// Writes `mapper(volume, position)` into `destination` for every
    /// position, lining up the destination's minimum with the source's.
    ///
    /// # Errors
    ///
    /// Fails with [`VolumeError::BlockOutOfBounds`] on the first mapped
    /// position the destination does not contain.
    pub fn map<D, F>(&self, mut mapper: F, destination: &mut D) -> Result<(), VolumeError>
    where
        D: MutableBlockVolume + ?Sized,
        F: FnMut(&V, IVec3) -> Result<D::Block, VolumeError>,
    {
        // A wrapped position lands below the destination's minimum, so the
        // destination's own bounds check rejects it.
        let offset = destination.block_min().wrapping_sub(self.volume.block_min());
        for position in self.volume.block_region() {
            let block = mapper(self.volume, position)?;
            destination.set_block(position.wrapping_add(offset), block, &self.cause)?;
        }
        Ok(())
    }
}

/// Traversal of a block volume that may write through it.
pub struct MutableBlockVolumeWorker<'a, V: ?Sized> {
    volume: &'a mut V,
    cause: Cause,
}

impl<'a, V: MutableBlockVolume + ?Sized> MutableBlockVolumeWorker<'a, V> {
    pub fn new(volume: &'a mut V, cause: Cause) -> Self {
        Self { volume, cause }
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Calls `visitor` for every position with mutable access to the volume.
    pub fn iterate<F>(&mut self, mut visitor: F) -> Result<(), VolumeError>
    where
        F: FnMut(&mut V, IVec3, &Cause) -> Result<(), VolumeError>,
    {
        for position in self.volume.block_region() {
            visitor(&mut *self.volume, position, &self.cause)?;
        }
        Ok(())
    }

    pub fn reduce<T, F>(&self, identity: T, reducer: F) -> Result<T, VolumeError>
    where
        F: FnMut(T, &V, IVec3) -> Result<T, VolumeError>,
    {
        BlockVolumeWorker::new(&*self.volume, self.cause.clone()).reduce(identity, reducer)
    }

    /// Same as [`BlockVolumeWorker::map`], reading from this worker's volume.
    pub fn map<D, F>(&self, mapper: F, destination: &mut D) -> Result<(), VolumeError>
    where
        D: MutableBlockVolume + ?Sized,
        F: FnMut(&V, IVec3) -> Result<D::Block, VolumeError>,
    {
        BlockVolumeWorker::new(&*self.volume, self.cause.clone()).map(mapper, destination)
    }

    /// Overwrites every position with `filler(position)`.
    pub fn fill<F>(&mut self, mut filler: F) -> Result<(), VolumeError>
    where
        F: FnMut(IVec3) -> V::Block,
    {
        for position in self.volume.block_region() {
            self.volume.set_block(position, filler(position), &self.cause)?;
        }
        Ok(())
    }
}

/// Read-only traversal of a biome area.
pub struct BiomeAreaWorker<'a, A: ?Sized> {
    area: &'a A,
    cause: Cause,
}

impl<'a, A: BiomeArea + ?Sized> BiomeAreaWorker<'a, A> {
    pub fn new(area: &'a A, cause: Cause) -> Self {
        Self { area, cause }
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn iterate<F>(&self, mut visitor: F) -> Result<(), VolumeError>
    where
        F: FnMut(&A, IVec2, &Cause) -> Result<(), VolumeError>,
    {
        for position in self.area.biome_region() {
            visitor(self.area, position, &self.cause)?;
        }
        Ok(())
    }

    pub fn reduce<T, F>(&self, identity: T, mut reducer: F) -> Result<T, VolumeError>
    where
        F: FnMut(T, &A, IVec2) -> Result<T, VolumeError>,
    {
        let mut acc = identity;
        for position in self.area.biome_region() {
            acc = reducer(acc, self.area, position)?;
        }
        Ok(acc)
    }

    pub fn map<D, F>(&self, mut mapper: F, destination: &mut D) -> Result<(), VolumeError>
    where
        D: MutableBiomeArea + ?Sized,
        F: FnMut(&A, IVec2) -> Result<D::Biome, VolumeError>,
    {
        let offset = destination.biome_min().wrapping_sub(self.area.biome_min());
        for position in self.area.biome_region() {
            let biome = mapper(self.area, position)?;
            destination.set_biome(position.wrapping_add(offset), biome, &self.cause)?;
        }
        Ok(())
    }
}

/// Traversal of a biome area that may write through it.
pub struct MutableBiomeAreaWorker<'a, A: ?Sized> {
    area: &'a mut A,
    cause: Cause,
}

impl<'a, A: MutableBiomeArea + ?Sized> MutableBiomeAreaWorker<'a, A> {
    pub fn new(area: &'a mut A, cause: Cause) -> Self {
        Self { area, cause }
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn iterate<F>(&mut self, mut visitor: F) -> Result<(), VolumeError>
    where
        F: FnMut(&mut A, IVec2, &Cause) -> Result<(), VolumeError>,
    {
        for position in self.area.biome_region() {
            visitor(&mut *self.area, position, &self.cause)?;
        }
        Ok(())
    }

    pub fn reduce<T, F>(&self, identity: T, reducer: F) -> Result<T, VolumeError>
    where
        F: FnMut(T, &A, IVec2) -> Result<T, VolumeError>,
    {
        BiomeAreaWorker::new(&*self.area, self.cause.clone()).reduce(identity, reducer)
    }

    pub fn map<D, F>(&self, mapper: F, destination: &mut D) -> Result<(), VolumeError>
    where
        D: MutableBiomeArea + ?Sized,
        F: FnMut(&A, IVec2) -> Result<D::Biome, VolumeError>,
    {
        BiomeAreaWorker::new(&*self.area, self.cause.clone()).map(mapper, destination)
    }

    pub fn fill<F>(&mut self, mut filler: F) -> Result<(), VolumeError>
    where
        F: FnMut(IVec2) -> A::Biome,
    {
        for position in self.area.biome_region() {
            self.area.set_biome(position, filler(position), &self.cause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strata_math::{Region2, Region3};

    use super::*;
    use crate::buffer::{BiomeBuffer, BlockBuffer};

    fn region() -> Region3 {
        Region3::new(IVec3::new(-1, 0, 2), IVec3::new(1, 1, 3))
    }

    #[test]
    fn test_iterate_visits_each_position_once_in_order() {
        let buffer = BlockBuffer::filled(region(), 0u8);
        let mut visited = Vec::new();
        buffer
            .block_worker(Cause::new("visitor"))
            .iterate(|_, p, cause| {
                assert_eq!(cause.name(), "visitor");
                visited.push(p);
                Ok(())
            })
            .unwrap();
        let expected: Vec<_> = region().iter().collect();
        assert_eq!(visited, expected);
        assert_eq!(visited[0], IVec3::new(-1, 0, 2));
        assert_eq!(visited[1], IVec3::new(0, 0, 2));
        assert_eq!(visited[3], IVec3::new(-1, 1, 2));
        assert_eq!(visited[6], IVec3::new(-1, 0, 3));
    }

    #[test]
    fn test_traversal_order_is_stable() {
        let buffer = BlockBuffer::filled(region(), 0u8);
        let collect = || {
            let mut out = Vec::new();
            buffer
                .block_worker(Cause::implementation())
                .iterate(|_, p, _| {
                    out.push(p);
                    Ok(())
                })
                .unwrap();
            out
        };
        assert_eq!(collect(), collect());
    }

    #[test]
    fn test_visitor_error_stops_traversal() {
        let buffer = BlockBuffer::filled(region(), 0u8);
        let mut count = 0;
        let result = buffer.block_worker(Cause::new("test")).iterate(|v, p, _| {
            count += 1;
            v.block(p + IVec3::new(0, 0, 5)).map(|_| ())
        });
        assert!(matches!(result, Err(VolumeError::BlockOutOfBounds { .. })));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reduce_counts_values() {
        let mut buffer = BlockBuffer::filled(region(), 0u8);
        let cause = Cause::new("test");
        buffer.set_block(IVec3::new(0, 1, 3), 1, &cause).unwrap();
        buffer.set_block(IVec3::new(1, 0, 2), 1, &cause).unwrap();
        let ones = buffer
            .block_worker(cause)
            .reduce(0, |acc, v, p| Ok(acc + usize::from(v.block(p)? == 1)))
            .unwrap();
        assert_eq!(ones, 2);
    }

    #[test]
    fn test_map_into_offset_destination() {
        let mut source = BlockBuffer::filled(region(), 0i32);
        let cause = Cause::new("test");
        for (i, p) in region().iter().enumerate() {
            source.set_block(p, i as i32, &cause).unwrap();
        }
        let mut destination =
            BlockBuffer::filled(region().translate(IVec3::splat(10)).unwrap(), 0i32);
        source
            .block_worker(cause)
            .map(|v, p| Ok(v.block(p)? * 2), &mut destination)
            .unwrap();
        for (i, p) in region().iter().enumerate() {
            assert_eq!(destination.block(p + IVec3::splat(10)), Ok(i as i32 * 2));
        }
    }

    #[test]
    fn test_map_into_smaller_destination_fails() {
        let source = BlockBuffer::filled(region(), 0u8);
        let mut destination = BlockBuffer::filled(Region3::single(region().min()), 0u8);
        let result = source
            .block_worker(Cause::new("test"))
            .map(|v, p| v.block(p), &mut destination);
        assert!(result.is_err());
    }

    #[test]
    fn test_map_past_lattice_edge_fails() {
        let source = BlockBuffer::filled(Region3::new(IVec3::ZERO, IVec3::new(2, 0, 0)), 1u8);
        let edge = Region3::new(IVec3::new(i32::MAX - 1, 0, 0), IVec3::new(i32::MAX, 0, 0));
        let mut destination = BlockBuffer::filled(edge, 0u8);
        let result = source
            .block_worker(Cause::new("test"))
            .map(|v, p| v.block(p), &mut destination);
        assert_eq!(
            result,
            Err(VolumeError::BlockOutOfBounds {
                position: IVec3::new(i32::MIN, 0, 0),
                min: edge.min(),
                max: edge.max(),
            })
        );
        assert_eq!(destination.block(edge.max()), Ok(1));
    }

    #[test]
    fn test_mutable_worker_maps_into_destination() {
        let mut buffer = BlockBuffer::filled(region(), 0i32);
        let mut worker = buffer.block_worker_mut(Cause::new("copy"));
        worker.fill(|p| p.x * 100 + p.z).unwrap();
        assert_eq!(worker.cause().name(), "copy");
        let target_region = region().translate(IVec3::new(0, -20, 0)).unwrap();
        let mut target = BlockBuffer::filled(target_region, 0i32);
        worker.map(|v, p| Ok(v.block(p)? + 1), &mut target).unwrap();
        for p in region() {
            assert_eq!(target.block(p - IVec3::new(0, 20, 0)), Ok(p.x * 100 + p.z + 1));
        }
        worker.fill(|_| 0).unwrap();
        assert_eq!(buffer.block(region().max()), Ok(0));
    }

    #[test]
    fn test_mutable_fill_and_iterate() {
        let mut buffer = BlockBuffer::filled(region(), 0i32);
        let mut worker = buffer.block_worker_mut(Cause::new("fill"));
        worker.fill(|p| p.x + p.y + p.z).unwrap();
        worker
            .iterate(|v, p, cause| {
                let doubled = v.block(p)? * 2;
                v.set_block(p, doubled, cause)
            })
            .unwrap();
        let total = worker.reduce(0, |acc, v, p| Ok(acc + v.block(p)?)).unwrap();
        let expected: i32 = region().iter().map(|p| 2 * (p.x + p.y + p.z)).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_biome_workers() {
        let region = Region2::new(IVec2::ZERO, IVec2::new(3, 2));
        let mut area = BiomeBuffer::filled(region, 0i32);
        area.biome_worker_mut(Cause::new("test"))
            .fill(|p| p.x * 10 + p.y)
            .unwrap();
        let mut seen = Vec::new();
        area.biome_worker(Cause::new("test"))
            .iterate(|a, p, _| {
                seen.push(a.biome(p)?);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen.len(), 12);
        assert_eq!(seen[..4], [0, 10, 20, 30]);
        let sum = area
            .biome_worker(Cause::new("test"))
            .reduce(0, |acc, a, p| Ok(acc + a.biome(p)?))
            .unwrap();
        assert_eq!(sum, seen.iter().sum::<i32>());

        let mut copy = BiomeBuffer::filled(region, 0i32);
        area.biome_worker(Cause::new("test"))
            .map(|a, p| Ok(-a.biome(p)?), &mut copy)
            .unwrap();
        assert_eq!(copy.biome(IVec2::new(3, 2)), Ok(-32));
    }

    #[test]
    fn test_mutable_biome_worker_reduces_and_maps() {
        let region = Region2::new(IVec2::new(-2, 0), IVec2::new(1, 1));
        let mut area = BiomeBuffer::filled(region, 0i32);
        let mut worker = area.biome_worker_mut(Cause::new("paint"));
        worker.fill(|p| p.x + 10 * p.y).unwrap();
        assert_eq!(worker.cause().name(), "paint");
        let sum = worker.reduce(0, |acc, a, p| Ok(acc + a.biome(p)?)).unwrap();
        assert_eq!(sum, region.iter().map(|p| p.x + 10 * p.y).sum::<i32>());

        let mut shifted = BiomeBuffer::filled(Region2::new(IVec2::ZERO, IVec2::new(3, 1)), 0i32);
        worker.map(|a, p| a.biome(p), &mut shifted).unwrap();
        assert_eq!(shifted.biome(IVec2::ZERO), Ok(-2));
        assert_eq!(shifted.biome(IVec2::new(3, 1)), Ok(11));

        let mut short = BiomeBuffer::filled(Region2::new(IVec2::ZERO, IVec2::ZERO), 0i32);
        let result = worker.map(|a, p| a.biome(p), &mut short);
        assert!(matches!(result, Err(VolumeError::BiomeOutOfBounds { .. })));
    }
}
