use super::support::Support;
use crate::Energy;

/// Ground metric between elements of two support spaces.
///
/// Defines the cost of transporting one unit of mass from a point in
/// the source space to a point in the target space. This is the "ground cost"
/// that optimal transport minimizes over.
///
/// # Type Parameters
///
/// - `X`: Source support space
/// - `Y`: Target support space
///
/// While `X` and `Y` are often the same type, the trait supports heterogeneous
/// transport problems where source and target live in different spaces.
///
/// # Contract
///
/// Distances must be finite and non-negative. They need not be symmetric,
/// though a true metric yields a true metric between signatures.
pub trait Measure {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the cost of transporting mass from `x` to `y`.
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy;
}
