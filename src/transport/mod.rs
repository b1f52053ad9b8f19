//! Optimal transport vocabulary.
//!
//! Distances between weighted distributions are posed as transport problems:
//! move the mass of a source [`Density`] onto a target [`Density`] at the
//! per-unit price given by a ground [`Measure`]. A solved problem is a
//! [`Coupling`].
//!
//! ## Core Types
//!
//! - [`Support`]: Elements that can carry mass (signature labels)
//! - [`Density`]: A weighted distribution over a support
//! - [`Measure`]: Ground distance between source and target elements
//! - [`Coupling`]: A transport plan between two distributions
//! - [`Signature`]: Ordered label → weight mapping
//! - [`Ground`]: A [`Measure`] backed by any distance closure
mod coupling;
mod density;
mod ground;
mod measure;
mod signature;
mod support;

pub use coupling::*;
pub use density::*;
pub use ground::*;
pub use measure::*;
pub use signature::*;
pub use support::*;
