//! Integer regions and axis-aligned discrete transforms for block and biome lattices.

mod region;
mod transform;

pub use glam::{IVec2, IVec3};
pub use region::{
    Region2, Region2Iter, Region3, Region3Iter, checked_add2, checked_add3, checked_sub3,
};
pub use transform::{Axis, DiscreteTransform2, DiscreteTransform3, TransformError};
