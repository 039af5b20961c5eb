use std::iter::FusedIterator;

use glam::{IVec2, IVec3};

/// Number of lattice points in `min..=max`. Fits in `usize` even when the
/// span covers all of `i32`.
fn span(min: i32, max: i32) -> usize {
    (i64::from(max) - i64::from(min) + 1) as usize
}

/// Distance of `p` from `min` along one axis, for `min <= p`.
fn offset(min: i32, p: i32) -> usize {
    p.wrapping_sub(min) as u32 as usize
}

/// Inclusive axis-aligned box of block positions.
///
/// Invariant: `min <= max` on every axis. The constructor enforces this by
/// sorting components, so any two opposite corners describe the same region.
///
/// Positions inside the region are linearised with x varying fastest:
/// `index = dx + dy * size.x + dz * size.x * size.y`. Every buffer, view and
/// worker in the workspace relies on this one mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region3 {
    min: IVec3,
    max: IVec3,
}

impl Region3 {
    /// Creates a region from two arbitrary corners.
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a region starting at `min` spanning `size` blocks per axis.
    ///
    /// Size components below 1 are treated as 1. The far corner saturates at
    /// `i32::MAX`.
    pub fn from_min_size(min: IVec3, size: IVec3) -> Self {
        let size = size.max(IVec3::ONE);
        Self::new(min, min.saturating_add(size - IVec3::ONE))
    }

    /// A region covering exactly one position.
    pub fn single(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    pub fn min(&self) -> IVec3 {
        self.min
    }

    pub fn max(&self) -> IVec3 {
        self.max
    }

    /// Number of positions along each axis (`max - min + 1`).
    ///
    /// An axis spanning every `i32` wraps to 0; [`volume`](Self::volume)
    /// counts such regions correctly.
    pub fn size(&self) -> IVec3 {
        self.max.wrapping_sub(self.min).wrapping_add(IVec3::ONE)
    }

    /// Total number of positions in the region, saturating at `usize::MAX`.
    pub fn volume(&self) -> usize {
        span(self.min.x, self.max.x)
            .saturating_mul(span(self.min.y, self.max.y))
            .saturating_mul(span(self.min.z, self.max.z))
    }

    /// Returns true if `p` lies inside or on the boundary.
    pub fn contains(&self, p: IVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Returns true if every position of `other` lies inside `self`.
    pub fn contains_region(&self, other: &Region3) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Returns this region shifted by `offset`, or `None` if either corner
    /// leaves `i32`.
    pub fn translate(&self, offset: IVec3) -> Option<Region3> {
        Some(Region3 {
            min: checked_add3(self.min, offset)?,
            max: checked_add3(self.max, offset)?,
        })
    }

    /// Linear cell index of `p`, or `None` when `p` is outside the region.
    pub fn index_of(&self, p: IVec3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let sx = span(self.min.x, self.max.x);
        let sy = span(self.min.y, self.max.y);
        Some(
            offset(self.min.x, p.x)
                + offset(self.min.y, p.y) * sx
                + offset(self.min.z, p.z) * sx * sy,
        )
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn position_of(&self, index: usize) -> Option<IVec3> {
        if index >= self.volume() {
            return None;
        }
        let sx = span(self.min.x, self.max.x);
        let sy = span(self.min.y, self.max.y);
        let x = index % sx;
        let y = (index / sx) % sy;
        let z = index / (sx * sy);
        Some(
            self.min
                .wrapping_add(IVec3::new(x as u32 as i32, y as u32 as i32, z as u32 as i32)),
        )
    }

    /// Iterates every position in ascending linear index order
    /// (z outermost, x innermost).
    pub fn iter(&self) -> Region3Iter {
        Region3Iter {
            region: *self,
            next: Some(self.min),
        }
    }
}

impl IntoIterator for Region3 {
    type Item = IVec3;
    type IntoIter = Region3Iter;

    fn into_iter(self) -> Region3Iter {
        self.iter()
    }
}

/// Iterator over the positions of a [`Region3`].
#[derive(Clone, Debug)]
pub struct Region3Iter {
    region: Region3,
    next: Option<IVec3>,
}

impl Iterator for Region3Iter {
    type Item = IVec3;

    fn next(&mut self) -> Option<IVec3> {
        let current = self.next?;
        let (min, max) = (self.region.min, self.region.max);
        self.next = if current.x < max.x {
            Some(IVec3::new(current.x + 1, current.y, current.z))
        } else if current.y < max.y {
            Some(IVec3::new(min.x, current.y + 1, current.z))
        } else if current.z < max.z {
            Some(IVec3::new(min.x, min.y, current.z + 1))
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for Region3Iter {}

/// Inclusive axis-aligned rectangle of biome columns.
///
/// The second component addresses the world z axis. Linearisation is
/// `index = dx + dy * size.x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region2 {
    min: IVec2,
    max: IVec2,
}

impl Region2 {
    /// Creates a region from two arbitrary corners.
    pub fn new(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a region starting at `min` spanning `size` columns per axis.
    ///
    /// Size components below 1 are treated as 1.
    pub fn from_min_size(min: IVec2, size: IVec2) -> Self {
        let size = size.max(IVec2::ONE);
        Self::new(min, min.saturating_add(size - IVec2::ONE))
    }

    /// The `x`/`z` footprint of a block region.
    pub fn footprint(region: &Region3) -> Self {
        Self {
            min: IVec2::new(region.min().x, region.min().z),
            max: IVec2::new(region.max().x, region.max().z),
        }
    }

    pub fn min(&self) -> IVec2 {
        self.min
    }

    pub fn max(&self) -> IVec2 {
        self.max
    }

    pub fn size(&self) -> IVec2 {
        self.max.wrapping_sub(self.min).wrapping_add(IVec2::ONE)
    }

    pub fn area(&self) -> usize {
        span(self.min.x, self.max.x).saturating_mul(span(self.min.y, self.max.y))
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn contains_region(&self, other: &Region2) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    pub fn translate(&self, offset: IVec2) -> Option<Region2> {
        Some(Region2 {
            min: checked_add2(self.min, offset)?,
            max: checked_add2(self.max, offset)?,
        })
    }

    pub fn index_of(&self, p: IVec2) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let sx = span(self.min.x, self.max.x);
        Some(offset(self.min.x, p.x) + offset(self.min.y, p.y) * sx)
    }

    pub fn position_of(&self, index: usize) -> Option<IVec2> {
        if index >= self.area() {
            return None;
        }
        let sx = span(self.min.x, self.max.x);
        let step = IVec2::new((index % sx) as u32 as i32, (index / sx) as u32 as i32);
        Some(self.min.wrapping_add(step))
    }

    /// Iterates every column in ascending linear index order (y outer, x inner).
    pub fn iter(&self) -> Region2Iter {
        Region2Iter {
            region: *self,
            next: Some(self.min),
        }
    }
}

impl IntoIterator for Region2 {
    type Item = IVec2;
    type IntoIter = Region2Iter;

    fn into_iter(self) -> Region2Iter {
        self.iter()
    }
}

/// Iterator over the columns of a [`Region2`].
#[derive(Clone, Debug)]
pub struct Region2Iter {
    region: Region2,
    next: Option<IVec2>,
}

impl Iterator for Region2Iter {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        let current = self.next?;
        let (min, max) = (self.region.min, self.region.max);
        self.next = if current.x < max.x {
            Some(IVec2::new(current.x + 1, current.y))
        } else if current.y < max.y {
            Some(IVec2::new(min.x, current.y + 1))
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for Region2Iter {}

/// Component-wise `a + b`, or `None` if any component overflows.
pub fn checked_add3(a: IVec3, b: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        a.x.checked_add(b.x)?,
        a.y.checked_add(b.y)?,
        a.z.checked_add(b.z)?,
    ))
}

/// Component-wise `a - b`, or `None` if any component overflows.
pub fn checked_sub3(a: IVec3, b: IVec3) -> Option<IVec3> {
    Some(IVec3::new(
        a.x.checked_sub(b.x)?,
        a.y.checked_sub(b.y)?,
        a.z.checked_sub(b.z)?,
    ))
}

/// Component-wise `a + b`, or `None` if any component overflows.
pub fn checked_add2(a: IVec2, b: IVec2) -> Option<IVec2> {
    Some(IVec2::new(a.x.checked_add(b.x)?, a.y.checked_add(b.y)?))
}
