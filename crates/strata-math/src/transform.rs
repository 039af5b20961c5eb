//! Axis-aligned integer affine transforms.
//!
//! A discrete transform is a signed permutation matrix followed by a
//! translation. That family covers quarter-turn rotations, mirrors and
//! translations, is closed under composition, always has an exact integer
//! inverse, and maps boxes onto boxes.
//!
//! `apply` wraps on overflow, which keeps composition and inversion exact
//! modulo 2^32. Callers that need the image to stay on the i32 lattice use
//! `checked_apply` or `apply_region`.

use glam::{IVec2, IVec3};
use thiserror::Error;

use crate::{Region2, Region3};

/// Coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Errors produced when building a transform from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Every row and column must hold exactly one `1` or `-1`.
    #[error("transform matrix {0} is not a signed permutation")]
    NotAxisAligned(String),
}

fn is_signed_permutation<const N: usize>(m: &[[i32; N]; N]) -> bool {
    let rows_ok = m.iter().all(|row| {
        row.iter().filter(|&&v| v != 0).count() == 1 && row.iter().all(|v| v.abs() <= 1)
    });
    let cols_ok = (0..N).all(|j| m.iter().filter(|row| row[j] != 0).count() == 1);
    rows_ok && cols_ok
}

fn mul<const N: usize>(a: &[[i32; N]; N], b: &[[i32; N]; N]) -> [[i32; N]; N] {
    let mut out = [[0; N]; N];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..N).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn transpose<const N: usize>(m: &[[i32; N]; N]) -> [[i32; N]; N] {
    let mut out = [[0; N]; N];
    for (i, row) in m.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            out[j][i] = v;
        }
    }
    out
}

fn identity<const N: usize>() -> [[i32; N]; N] {
    let mut out = [[0; N]; N];
    for (i, row) in out.iter_mut().enumerate() {
        row[i] = 1;
    }
    out
}

fn power<const N: usize>(base: &[[i32; N]; N], exponent: u32) -> [[i32; N]; N] {
    (0..exponent).fold(identity(), |acc, _| mul(base, &acc))
}

fn wrapping_affine<const N: usize>(m: &[[i32; N]; N], p: [i32; N], t: [i32; N]) -> [i32; N] {
    std::array::from_fn(|i| {
        (0..N).fold(t[i], |acc, k| acc.wrapping_add(m[i][k].wrapping_mul(p[k])))
    })
}

fn checked_affine<const N: usize>(
    m: &[[i32; N]; N],
    p: [i32; N],
    t: [i32; N],
) -> Option<[i32; N]> {
    let mut out = [0; N];
    for (i, cell) in out.iter_mut().enumerate() {
        let exact = (0..N).fold(i64::from(t[i]), |acc, k| {
            acc + i64::from(m[i][k]) * i64::from(p[k])
        });
        *cell = i32::try_from(exact).ok()?;
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// 3D
// ---------------------------------------------------------------------------

/// Invertible axis-aligned transform of block positions: `p' = M * p + t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiscreteTransform3 {
    matrix: [[i32; 3]; 3],
    translation: IVec3,
}

impl DiscreteTransform3 {
    /// The transform that leaves every position in place.
    pub fn identity() -> Self {
        Self {
            matrix: identity(),
            translation: IVec3::ZERO,
        }
    }

    /// A pure translation by `offset`.
    pub fn from_translation(offset: IVec3) -> Self {
        Self {
            matrix: identity(),
            translation: offset,
        }
    }

    /// Builds a transform from a row-major matrix and translation.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotAxisAligned`] unless `matrix` is a signed
    /// permutation.
    pub fn from_matrix(matrix: [[i32; 3]; 3], translation: IVec3) -> Result<Self, TransformError> {
        if !is_signed_permutation(&matrix) {
            return Err(TransformError::NotAxisAligned(format!("{matrix:?}")));
        }
        Ok(Self {
            matrix,
            translation,
        })
    }

    /// Rotates by `quarter_turns` (counter-clockwise looking down the
    /// positive `axis`) around `point`.
    ///
    /// With `block_corner` false the pivot is the centre of block `point`;
    /// with it true the pivot is the lattice corner at the minimum of block
    /// `point`.
    pub fn rotation(quarter_turns: i32, axis: Axis, point: IVec3, block_corner: bool) -> Self {
        let base = match axis {
            Axis::X => [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
            Axis::Y => [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
            Axis::Z => [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
        };
        let matrix = power(&base, quarter_turns.rem_euclid(4) as u32);
        let linear = Self {
            matrix,
            translation: IVec3::ZERO,
        };
        let mut translation = point.wrapping_sub(linear.apply(point));
        if block_corner {
            // A block spans [p, p + 1); rotating it about a lattice corner
            // lands its minimum one block over on every flipped axis.
            translation = translation.wrapping_add((linear.apply(IVec3::ONE) - IVec3::ONE) / 2);
        }
        Self {
            matrix,
            translation,
        }
    }

    /// Mirrors along `axis` through the centre of block `point`.
    pub fn mirror(axis: Axis, point: IVec3) -> Self {
        let mut matrix: [[i32; 3]; 3] = identity();
        let i = axis.index();
        matrix[i][i] = -1;
        let mut translation = IVec3::ZERO;
        translation[i] = point[i].wrapping_mul(2);
        Self {
            matrix,
            translation,
        }
    }

    pub fn matrix(&self) -> [[i32; 3]; 3] {
        self.matrix
    }

    pub fn translation(&self) -> IVec3 {
        self.translation
    }

    /// Transforms a single position, wrapping on overflow.
    pub fn apply(&self, p: IVec3) -> IVec3 {
        IVec3::from_array(wrapping_affine(
            &self.matrix,
            p.to_array(),
            self.translation.to_array(),
        ))
    }

    /// Transforms a single position, or `None` if any component of the
    /// image falls outside `i32`.
    pub fn checked_apply(&self, p: IVec3) -> Option<IVec3> {
        checked_affine(&self.matrix, p.to_array(), self.translation.to_array())
            .map(IVec3::from_array)
    }

    /// Transforms a region. The result is again axis-aligned.
    ///
    /// Every image coordinate comes from one corner coordinate, so the region
    /// fits in `i32` exactly when both corner images do. Returns `None`
    /// otherwise.
    pub fn apply_region(&self, region: &Region3) -> Option<Region3> {
        Some(Region3::new(
            self.checked_apply(region.min())?,
            self.checked_apply(region.max())?,
        ))
    }

    /// Returns the transform equivalent to applying `self`, then `next`.
    pub fn and_then(&self, next: &DiscreteTransform3) -> DiscreteTransform3 {
        let linear = Self {
            matrix: next.matrix,
            translation: IVec3::ZERO,
        };
        Self {
            matrix: mul(&next.matrix, &self.matrix),
            translation: linear.apply(self.translation).wrapping_add(next.translation),
        }
    }

    /// Returns this transform followed by a translation.
    pub fn with_translation(&self, offset: IVec3) -> DiscreteTransform3 {
        self.and_then(&Self::from_translation(offset))
    }

    /// The exact inverse. Signed permutations are orthogonal, so the inverse
    /// matrix is the transpose.
    pub fn inverse(&self) -> DiscreteTransform3 {
        let linear = Self {
            matrix: transpose(&self.matrix),
            translation: IVec3::ZERO,
        };
        Self {
            matrix: linear.matrix,
            translation: IVec3::ZERO.wrapping_sub(linear.apply(self.translation)),
        }
    }
}

impl Default for DiscreteTransform3 {
    fn default() -> Self {
        Self::identity()
    }
}

// ---------------------------------------------------------------------------
// 2D
// ---------------------------------------------------------------------------

/// Invertible axis-aligned transform of biome columns: `p' = M * p + t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiscreteTransform2 {
    matrix: [[i32; 2]; 2],
    translation: IVec2,
}

impl DiscreteTransform2 {
    pub fn identity() -> Self {
        Self {
            matrix: identity(),
            translation: IVec2::ZERO,
        }
    }

    pub fn from_translation(offset: IVec2) -> Self {
        Self {
            matrix: identity(),
            translation: offset,
        }
    }

    /// # Errors
    ///
    /// Returns [`TransformError::NotAxisAligned`] unless `matrix` is a signed
    /// permutation.
    pub fn from_matrix(matrix: [[i32; 2]; 2], translation: IVec2) -> Result<Self, TransformError> {
        if !is_signed_permutation(&matrix) {
            return Err(TransformError::NotAxisAligned(format!("{matrix:?}")));
        }
        Ok(Self {
            matrix,
            translation,
        })
    }

    /// Rotates by `quarter_turns` counter-clockwise (`+x` towards `+y`)
    /// around column `point`, or around its minimum corner when
    /// `block_corner` is set.
    pub fn rotation(quarter_turns: i32, point: IVec2, block_corner: bool) -> Self {
        let matrix = power(&[[0, -1], [1, 0]], quarter_turns.rem_euclid(4) as u32);
        let linear = Self {
            matrix,
            translation: IVec2::ZERO,
        };
        let mut translation = point.wrapping_sub(linear.apply(point));
        if block_corner {
            translation = translation.wrapping_add((linear.apply(IVec2::ONE) - IVec2::ONE) / 2);
        }
        Self {
            matrix,
            translation,
        }
    }

    /// Mirrors along `axis` (`X` or `Z`; `Y` is treated as `Z`) through
    /// column `point`.
    pub fn mirror(axis: Axis, point: IVec2) -> Self {
        let i = match axis {
            Axis::X => 0,
            Axis::Y | Axis::Z => 1,
        };
        let mut matrix: [[i32; 2]; 2] = identity();
        matrix[i][i] = -1;
        let mut translation = IVec2::ZERO;
        translation[i] = point[i].wrapping_mul(2);
        Self {
            matrix,
            translation,
        }
    }

    pub fn matrix(&self) -> [[i32; 2]; 2] {
        self.matrix
    }

    pub fn translation(&self) -> IVec2 {
        self.translation
    }

    pub fn apply(&self, p: IVec2) -> IVec2 {
        IVec2::from_array(wrapping_affine(
            &self.matrix,
            p.to_array(),
            self.translation.to_array(),
        ))
    }

    pub fn checked_apply(&self, p: IVec2) -> Option<IVec2> {
        checked_affine(&self.matrix, p.to_array(), self.translation.to_array())
            .map(IVec2::from_array)
    }

    pub fn apply_region(&self, region: &Region2) -> Option<Region2> {
        Some(Region2::new(
            self.checked_apply(region.min())?,
            self.checked_apply(region.max())?,
        ))
    }

    /// Returns the transform equivalent to applying `self`, then `next`.
    pub fn and_then(&self, next: &DiscreteTransform2) -> DiscreteTransform2 {
        let linear = Self {
            matrix: next.matrix,
            translation: IVec2::ZERO,
        };
        Self {
            matrix: mul(&next.matrix, &self.matrix),
            translation: linear.apply(self.translation).wrapping_add(next.translation),
        }
    }

    pub fn with_translation(&self, offset: IVec2) -> DiscreteTransform2 {
        self.and_then(&Self::from_translation(offset))
    }

    pub fn inverse(&self) -> DiscreteTransform2 {
        let linear = Self {
            matrix: transpose(&self.matrix),
            translation: IVec2::ZERO,
        };
        Self {
            matrix: linear.matrix,
            translation: IVec2::ZERO.wrapping_sub(linear.apply(self.translation)),
        }
    }
}

impl Default for DiscreteTransform2 {
    fn default() -> Self {
        Self::identity()
    }
}
