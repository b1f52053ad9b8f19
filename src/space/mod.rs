//! Coordinate feature space.
//!
//! Signatures over points in ℝⁿ are the common case for color and texture
//! descriptors. [`Point`] labels such bins and [`Metric`] prices moving mass
//! between them.
mod metric;
mod point;

pub use metric::*;
pub use point::*;
