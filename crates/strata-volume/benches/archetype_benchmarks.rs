use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strata_math::{Axis, DiscreteTransform3, IVec3, Region3};
use strata_volume::*;

#[derive(Clone)]
struct Chest(u16);

impl TileEntity for Chest {
    type Archetype = u16;

    fn create_archetype(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Chest {
    fn from(slots: u16) -> Self {
        Self(slots)
    }
}

fn world(distinct: u32) -> MemoryExtent<u32, u8, Chest> {
    let region = Region3::new(IVec3::ZERO, IVec3::splat(31));
    let mut world = MemoryExtent::new(region, 0, 0);
    let cause = Cause::new("bench");
    for (i, p) in region.iter().enumerate() {
        world.set_block(p, i as u32 % distinct, &cause).unwrap();
        if i % 97 == 0 {
            world.set_tile_entity(p, Chest(i as u16)).unwrap();
        }
    }
    world
}

fn bench_archetype_byte_tier(c: &mut Criterion) {
    let world = world(16);
    c.bench_function("archetype_32_cubed_byte", |bencher| {
        bencher.iter(|| {
            black_box(
                world
                    .create_archetype_volume(IVec3::ZERO, IVec3::splat(31), IVec3::splat(16))
                    .unwrap(),
            )
        })
    });
}

fn bench_archetype_char_tier(c: &mut Criterion) {
    let world = world(4096);
    c.bench_function("archetype_32_cubed_char", |bencher| {
        bencher.iter(|| {
            black_box(
                world
                    .create_archetype_volume(IVec3::ZERO, IVec3::splat(31), IVec3::ZERO)
                    .unwrap(),
            )
        })
    });
}

fn bench_archetype_apply(c: &mut Criterion) {
    let world = world(16);
    let archetype = world
        .create_archetype_volume(IVec3::ZERO, IVec3::splat(15), IVec3::ZERO)
        .unwrap();
    let mut target = world.clone();
    c.bench_function("archetype_apply_16_cubed", |bencher| {
        bencher.iter(|| {
            archetype
                .apply(&mut target, black_box(IVec3::splat(8)), &Cause::new("bench"))
                .unwrap()
        })
    });
}

fn bench_rotated_copy(c: &mut Criterion) {
    let world = world(16);
    let rotation = DiscreteTransform3::rotation(1, Axis::Y, IVec3::splat(16), true);
    c.bench_function("rotated_view_copy_32_cubed", |bencher| {
        bencher.iter(|| {
            let view = world.block_transform_view(rotation).unwrap();
            black_box(view.block_copy(StorageKind::Standard).unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_archetype_byte_tier,
    bench_archetype_char_tier,
    bench_archetype_apply,
    bench_rotated_copy
);
criterion_main!(benches);
