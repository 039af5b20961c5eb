//! Builds an in-memory world, snapshots part of it into an archetype and
//! pastes the archetype elsewhere, logging each step.

use std::path::PathBuf;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use strata_config::{Config, default_config_dir};
use strata_math::{Axis, DiscreteTransform3, IVec2, IVec3, Region3};
use strata_volume::{
    BiomeArea, BlockVolume, Cause, Extent, MemoryExtent, MutableBiomeArea, MutableBlockVolume,
    StorageKind, TileEntity, VolumeError,
};
use tracing::{error, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Block {
    Air,
    Stone,
    Dirt,
    Grass,
    Ore(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Biome {
    Plains,
    Forest,
    Desert,
}

#[derive(Clone, Debug)]
struct Sign {
    text: String,
}

impl TileEntity for Sign {
    type Archetype = String;

    fn create_archetype(&self) -> String {
        self.text.clone()
    }
}

impl From<String> for Sign {
    fn from(text: String) -> Self {
        Self { text }
    }
}

type World = MemoryExtent<Block, Biome, Sign>;

const WORLD_SIZE: i32 = 32;
const GROUND: i32 = 12;

fn generate_world(rng: &mut Xoshiro256StarStar) -> Result<World, VolumeError> {
    let region = Region3::new(IVec3::ZERO, IVec3::splat(WORLD_SIZE - 1));
    let mut world = World::new(region, Block::Air, Biome::Plains);
    let cause = Cause::new("worldgen");

    for column in world.biome_region() {
        let biome = match rng.gen_range(0..3) {
            0 => Biome::Plains,
            1 => Biome::Forest,
            _ => Biome::Desert,
        };
        world.set_biome(column, biome, &cause)?;
    }

    world.block_worker_mut(cause).fill(|p| match p.y {
        y if y < GROUND - 4 => Block::Stone,
        y if y < GROUND => Block::Dirt,
        y if y == GROUND => Block::Grass,
        _ => Block::Air,
    })?;

    let cause = Cause::new("worldgen/ores");
    for _ in 0..400 {
        let p = IVec3::new(
            rng.gen_range(0..WORLD_SIZE),
            rng.gen_range(0..GROUND - 4),
            rng.gen_range(0..WORLD_SIZE),
        );
        world.set_block(p, Block::Ore(rng.gen_range(0..300)), &cause)?;
    }

    for (i, x) in (4..WORLD_SIZE).step_by(8).enumerate() {
        let p = IVec3::new(x, GROUND + 1, 6);
        world.set_tile_entity(
            p,
            Sign {
                text: format!("marker {i}"),
            },
        )?;
    }

    info!(
        "Generated {} blocks, {} biome columns, {} tiles",
        world.block_region().volume(),
        world.biome_region().area(),
        world.tile_count()
    );
    Ok(world)
}

fn demonstrate_snapshot(world: &World) -> Result<(), VolumeError> {
    let snapshot = world.block_snapshot(IVec3::new(4, GROUND + 1, 6))?;
    info!(
        "Snapshot at {}: {:?} with tile {:?}",
        snapshot.position, snapshot.state, snapshot.tile
    );
    Ok(())
}

fn demonstrate_views(world: &World) -> Result<(), VolumeError> {
    let surface = world.block_view(
        IVec3::new(0, GROUND, 0),
        IVec3::new(WORLD_SIZE - 1, GROUND, WORLD_SIZE - 1),
    )?;
    let grass = surface
        .block_worker(Cause::new("survey"))
        .reduce(0usize, |acc, view, p| {
            Ok(acc + usize::from(view.block(p)? == Block::Grass))
        })?;
    info!("Surface layer holds {grass} grass blocks");

    let turned = world.block_transform_view(DiscreteTransform3::rotation(
        1,
        Axis::Y,
        IVec3::splat(WORLD_SIZE / 2),
        true,
    ))?;
    info!(
        "Rotated view spans {}..={}",
        turned.block_min(),
        turned.block_max()
    );

    let deserts = world
        .biome_worker(Cause::new("survey"))
        .reduce(0usize, |acc, area, p: IVec2| {
            Ok(acc + usize::from(area.biome(p)? == Biome::Desert))
        })?;
    info!("{deserts} desert columns");
    Ok(())
}

fn demonstrate_copy(world: &World, kind: StorageKind) {
    match world.block_copy(kind) {
        Ok(copy) => info!(
            "Copied world with {} palette entries at {:?} tier ({} bytes)",
            copy.palette().len(),
            copy.tier(),
            copy.storage_bytes()
        ),
        Err(e) => warn!("Configured copy failed: {e}"),
    }
}

fn demonstrate_archetype(world: &World, origin: IVec3) -> Result<(), VolumeError> {
    let min = IVec3::new(0, GROUND - 2, 0);
    let max = IVec3::new(15, GROUND + 2, 15);
    let archetype = world.create_archetype_volume(min, max, origin)?;
    info!(
        "Archetype spans {}..={} with {} tiles at {:?} tier",
        archetype.block_min(),
        archetype.block_max(),
        archetype.tile_archetypes().len(),
        archetype.backing().tier()
    );

    let mut target = World::new(
        Region3::new(IVec3::ZERO, IVec3::new(WORLD_SIZE - 1, 15, WORLD_SIZE - 1)),
        Block::Air,
        Biome::Plains,
    );
    let paste_at = IVec3::new(16, 4, 16) - archetype.block_min();
    archetype.apply(&mut target, paste_at, &Cause::new("paste"))?;
    info!(
        "Pasted archetype at {}; target now holds {} tiles",
        paste_at + archetype.block_min(),
        target.tile_count()
    );
    Ok(())
}

fn main() {
    let config_dir = default_config_dir().unwrap_or_else(|e| {
        eprintln!("{e}, using ./strata");
        PathBuf::from("strata")
    });

    let config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5742_7a7a);
    let result = generate_world(&mut rng).and_then(|world| {
        demonstrate_snapshot(&world)?;
        demonstrate_views(&world)?;
        demonstrate_copy(&world, config.volume.copy_storage);
        demonstrate_archetype(&world, config.volume.archetype_origin())
    });

    match result {
        Ok(()) => info!("Demo completed"),
        Err(e) => error!("Demo failed: {e}"),
    }
}
