use super::support::Support;
use crate::Energy;
use crate::Mass;

/// A transport plan (coupling) between two distributions.
///
/// In optimal transport theory, a coupling is a joint distribution π(x,y) whose
/// marginals match the source and target distributions. The transport cost
/// is the expected ground cost under this joint distribution.
///
/// When the two distributions carry different total mass, only the smaller
/// total is moved, and the cost is normalized by that shared mass.
pub trait Coupling {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the mass transported from `x` to `y` in the coupling.
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Mass;
    /// Returns the normalized transport cost of this coupling.
    ///
    /// This is the integral of `flow(x, y) * distance(x, y)` over all pairs,
    /// divided by the total mass moved.
    fn cost(&self) -> Energy;
}
