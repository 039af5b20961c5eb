//! Cross-module tests: views stacked over buffers and extents, and archetypes
//! built through them.

use glam::{IVec2, IVec3};
use strata_math::{Axis, DiscreteTransform3, Region3};

use crate::{
    BiomeArea, BlockBuffer, BlockViewTransform, BlockVolume, Cause, Extent, MemoryExtent,
    MutableBlockVolume, StorageKind, StorageTier, TileEntity, VolumeError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Banner(u8);

impl TileEntity for Banner {
    type Archetype = u8;

    fn create_archetype(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Banner {
    fn from(colour: u8) -> Self {
        Self(colour)
    }
}

fn numbered(region: Region3) -> BlockBuffer<i32> {
    let mut buffer = BlockBuffer::filled(region, 0);
    let cause = Cause::new("test");
    for (i, p) in region.iter().enumerate() {
        buffer.set_block(p, i as i32, &cause).unwrap();
    }
    buffer
}

fn line_extent(len: i32) -> MemoryExtent<i32, u8, Banner> {
    let region = Region3::new(IVec3::ZERO, IVec3::new(len - 1, 0, 0));
    let mut extent = MemoryExtent::new(region, 0, 0);
    let cause = Cause::new("test");
    for p in region.iter() {
        extent.set_block(p, p.x, &cause).unwrap();
    }
    extent
}

#[test]
fn test_downsize_is_transparent() {
    let buffer = numbered(Region3::new(IVec3::splat(-3), IVec3::splat(3)));
    let view = buffer.block_view(IVec3::new(-1, 0, -2), IVec3::new(2, 3, 1)).unwrap();
    for p in view.block_region() {
        assert_eq!(view.block(p), buffer.block(p));
    }
    assert!(view.block(IVec3::new(-2, 0, 0)).is_err());
}

#[test]
fn test_single_block_region_boundary() {
    let buffer = numbered(Region3::new(IVec3::ZERO, IVec3::splat(9)));
    let p = IVec3::splat(5);
    let view = buffer.block_view(p, p).unwrap();
    assert_eq!(view.block_region().volume(), 1);
    assert_eq!(view.block(p), buffer.block(p));
    assert_eq!(
        view.block(IVec3::new(5, 5, 6)),
        Err(VolumeError::BlockOutOfBounds {
            position: IVec3::new(5, 5, 6),
            min: p,
            max: p,
        })
    );
}

#[test]
fn test_nested_transforms_equal_composed_transform() {
    let buffer = numbered(Region3::new(IVec3::new(0, 0, 0), IVec3::new(4, 2, 3)));
    let t1 = DiscreteTransform3::rotation(1, Axis::Y, IVec3::new(2, 0, 1), true);
    let t2 = DiscreteTransform3::mirror(Axis::Z, IVec3::new(0, 0, 4)).with_translation(IVec3::X);

    let nested = BlockViewTransform::new(buffer.block_transform_view(t1).unwrap(), t2).unwrap();
    let composed = buffer.block_transform_view(t1.and_then(&t2)).unwrap();
    let flattened = buffer.block_transform_view(t1).unwrap().then(&t2).unwrap();

    assert_eq!(nested.block_region(), composed.block_region());
    for q in composed.block_region() {
        assert_eq!(nested.block(q), composed.block(q));
        assert_eq!(flattened.block(q), composed.block(q));
    }
}

#[test]
fn test_transform_over_downsize_matches_direct_reads() {
    let buffer = numbered(Region3::new(IVec3::splat(-4), IVec3::splat(4)));
    let narrowed = buffer.block_view(IVec3::new(-2, -1, 0), IVec3::new(1, 3, 2)).unwrap();
    let t = DiscreteTransform3::rotation(3, Axis::X, IVec3::ZERO, false)
        .with_translation(IVec3::new(10, 0, 0));
    let view = narrowed.block_transform_view(t).unwrap();
    assert_eq!(
        Some(view.block_region()),
        t.apply_region(&narrowed.block_region())
    );
    for q in view.block_region() {
        assert_eq!(view.block(q), buffer.block(t.inverse().apply(q)));
    }
}

#[test]
fn test_copy_through_view_materialises_remap() {
    let buffer = numbered(Region3::new(IVec3::ZERO, IVec3::new(3, 1, 2)));
    let t = DiscreteTransform3::rotation(2, Axis::Z, IVec3::ZERO, true);
    let view = buffer.block_transform_view(t).unwrap();
    let copy = view.block_copy(StorageKind::Standard).unwrap();
    assert_eq!(copy.block_region(), view.block_region());
    for q in copy.block_region() {
        assert_eq!(copy.block(q), view.block(q));
    }
    assert!(matches!(
        view.block_copy(StorageKind::ThreadSafe),
        Err(VolumeError::UnsupportedStorageKind(StorageKind::ThreadSafe))
    ));
}

#[test]
fn test_eight_cell_archetype_with_three_values() {
    let region = Region3::new(IVec3::ZERO, IVec3::ONE);
    let mut extent: MemoryExtent<&str, u8, Banner> = MemoryExtent::new(region, "stone", 0);
    let cause = Cause::new("test");
    extent.set_block(IVec3::new(1, 0, 0), "dirt", &cause).unwrap();
    extent.set_block(IVec3::new(0, 1, 1), "grass", &cause).unwrap();
    extent.set_block(IVec3::new(1, 1, 1), "dirt", &cause).unwrap();

    let archetype = extent
        .create_archetype_volume(IVec3::ZERO, IVec3::ONE, IVec3::ZERO)
        .unwrap();
    let backing = archetype.backing();
    assert_eq!(backing.tier(), StorageTier::Byte);
    let ids: Vec<u32> = backing.palette().iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(backing.palette().id_of(&"stone"), Some(0));
    assert_eq!(backing.palette().id_of(&"dirt"), Some(1));
    assert_eq!(backing.palette().id_of(&"grass"), Some(2));

    let decoded: Vec<_> = region.iter().map(|p| archetype.block(p).unwrap()).collect();
    let source: Vec<_> = region.iter().map(|p| extent.block(p).unwrap()).collect();
    assert_eq!(decoded, source);
}

#[test]
fn test_archetype_is_detached_from_source() {
    let mut extent = line_extent(6);
    extent.set_tile_entity(IVec3::new(2, 0, 0), Banner(4)).unwrap();
    let archetype = extent
        .create_archetype_volume(IVec3::ZERO, IVec3::new(5, 0, 0), IVec3::new(1, 0, 0))
        .unwrap();

    let cause = Cause::new("test");
    for p in extent.block_region() {
        extent.set_block(p, -1, &cause).unwrap();
    }
    extent.set_tile_entity(IVec3::new(2, 0, 0), Banner(9)).unwrap();

    for x in 0..6 {
        assert_eq!(archetype.block(IVec3::new(x - 1, 0, 0)), Ok(x));
    }
    assert_eq!(archetype.tile_archetype(IVec3::new(1, 0, 0)), Some(&4));
}

#[test]
fn test_archetype_tiles_appear_only_at_relative_keys() {
    let mut extent = line_extent(8);
    for x in [1, 3, 7] {
        extent.set_tile_entity(IVec3::new(x, 0, 0), Banner(x as u8)).unwrap();
    }
    let origin = IVec3::new(2, 0, 0);
    let archetype = extent
        .create_archetype_volume(IVec3::new(6, 0, 0), IVec3::new(1, 0, 0), origin)
        .unwrap();
    let mut keys: Vec<_> = archetype.tile_archetypes().keys().copied().collect();
    keys.sort_by_key(|p| p.x);
    assert_eq!(keys, vec![IVec3::new(-1, 0, 0), IVec3::new(1, 0, 0)]);
    assert_eq!(archetype.tile_archetype(IVec3::new(1, 0, 0)), Some(&3));
}

#[test]
fn test_archetype_tier_thresholds() {
    let byte = line_extent(0x100);
    let archetype = byte
        .create_archetype_volume(IVec3::ZERO, byte.block_max(), IVec3::ZERO)
        .unwrap();
    assert_eq!(archetype.backing().palette().highest_id(), 0xFF);
    assert_eq!(archetype.backing().tier(), StorageTier::Byte);

    let wide = line_extent(0x101);
    let archetype = wide
        .create_archetype_volume(IVec3::ZERO, wide.block_max(), IVec3::ZERO)
        .unwrap();
    assert_eq!(archetype.backing().tier(), StorageTier::Char);
    assert_eq!(archetype.block(IVec3::new(0x100, 0, 0)), Ok(0x100));

    let widest = line_extent(0x10001);
    let archetype = widest
        .create_archetype_volume(IVec3::ZERO, widest.block_max(), IVec3::ZERO)
        .unwrap();
    assert_eq!(archetype.backing().tier(), StorageTier::Int);
    assert_eq!(archetype.block(IVec3::new(0x10000, 0, 0)), Ok(0x10000));
}

#[test]
fn test_archetype_relocation_past_lattice_edge_is_rejected() {
    let region = Region3::new(IVec3::new(i32::MIN, 0, 0), IVec3::new(i32::MIN + 1, 0, 0));
    let extent: MemoryExtent<i32, u8, Banner> = MemoryExtent::new(region, 3, 0);
    let result = extent.create_archetype_volume(region.min(), region.max(), IVec3::X);
    assert_eq!(
        result.err(),
        Some(VolumeError::BlockOutOfBounds {
            position: region.min(),
            min: region.min(),
            max: region.max(),
        })
    );

    let shifted = extent
        .create_archetype_volume(region.min(), region.max(), IVec3::NEG_X)
        .unwrap();
    assert_eq!(shifted.block_min(), IVec3::new(i32::MIN + 1, 0, 0));
    assert_eq!(shifted.block(IVec3::new(i32::MIN + 2, 0, 0)), Ok(3));
}

#[test]
fn test_translation_view_past_lattice_edge_is_rejected() {
    let region = Region3::new(IVec3::new(i32::MAX - 1, 0, 0), IVec3::new(i32::MAX, 0, 0));
    let buffer = numbered(region);
    let shift = DiscreteTransform3::from_translation(IVec3::X);
    assert!(matches!(
        buffer.block_transform_view(shift),
        Err(VolumeError::BlockOutOfBounds { position, .. }) if position == region.max()
    ));

    let narrowed = buffer.block_view(region.min(), region.min()).unwrap();
    let view = narrowed.block_transform_view(shift).unwrap();
    assert_eq!(view.block(region.max()), Ok(0));
    assert!(view.then(&shift).is_err());
}

#[test]
fn test_archetype_copy_rejects_thread_safe_storage() {
    let extent = line_extent(4);
    let archetype = extent
        .create_archetype_volume(IVec3::ZERO, IVec3::new(3, 0, 0), IVec3::ZERO)
        .unwrap();
    assert!(matches!(
        archetype.block_copy(StorageKind::ThreadSafe),
        Err(VolumeError::UnsupportedStorageKind(StorageKind::ThreadSafe))
    ));
    let copy = archetype.block_copy(StorageKind::Standard).unwrap();
    assert_eq!(copy.block(IVec3::new(3, 0, 0)), Ok(3));
}

#[test]
fn test_archetype_from_extent_view_and_paste_round_trip() {
    let mut extent = line_extent(10);
    extent.set_tile_entity(IVec3::new(4, 0, 0), Banner(2)).unwrap();
    let view = extent
        .extent_view(IVec3::new(3, 0, 0), IVec3::new(6, 0, 0))
        .unwrap();
    assert_eq!(view.biome_region().size(), IVec2::new(4, 1));
    let archetype = view
        .create_archetype_volume(IVec3::new(3, 0, 0), IVec3::new(6, 0, 0), IVec3::new(3, 0, 0))
        .unwrap();

    let mut target: MemoryExtent<i32, u8, Banner> =
        MemoryExtent::new(Region3::new(IVec3::ZERO, IVec3::new(9, 0, 0)), -5, 0);
    archetype
        .apply(&mut target, IVec3::new(6, 0, 0), &Cause::new("paste"))
        .unwrap();
    for x in 0..4 {
        assert_eq!(target.block(IVec3::new(6 + x, 0, 0)), Ok(3 + x));
    }
    assert_eq!(target.block(IVec3::new(5, 0, 0)), Ok(-5));
    assert_eq!(target.tile_entity(IVec3::new(7, 0, 0)), Ok(Some(Banner(2))));
    assert_eq!(target.tile_count(), 1);
}

#[test]
fn test_snapshot_through_view_and_rotation() {
    let mut extent = line_extent(5);
    extent.set_tile_entity(IVec3::new(1, 0, 0), Banner(8)).unwrap();
    let view = extent.extent_view(IVec3::ZERO, IVec3::new(2, 0, 0)).unwrap();
    let snapshot = view.block_snapshot(IVec3::new(1, 0, 0)).unwrap();
    assert_eq!(snapshot.state, 1);
    assert_eq!(snapshot.tile, Some(8));
    assert!(view.block_snapshot(IVec3::new(3, 0, 0)).is_err());

    let rotated = extent
        .block_transform_view(DiscreteTransform3::rotation(1, Axis::Y, IVec3::ZERO, false))
        .unwrap();
    let moved = DiscreteTransform3::rotation(1, Axis::Y, IVec3::ZERO, false).apply(IVec3::new(4, 0, 0));
    assert_eq!(rotated.block(moved), Ok(4));
}
