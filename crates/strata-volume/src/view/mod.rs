//! Zero-copy views over volumes, areas and extents.
//!
//! A view owns no cells. It holds its source (a shared or exclusive borrow,
//! or any other handle implementing the source trait) and only remaps or
//! restricts coordinates. Write access exists exactly when the source is
//! writable, so a view over `&T` is read-only by type.

mod downsize;
mod transform;
mod unmodifiable;

pub use downsize::{BiomeViewDownsize, BlockViewDownsize, ExtentViewDownsize};
pub use transform::{BiomeViewTransform, BlockViewTransform};
pub use unmodifiable::{UnmodifiableBiomeArea, UnmodifiableBlockVolume};
