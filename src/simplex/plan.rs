use super::basis::Cell;
use super::tableau::Optimum;
use crate::Coupling;
use crate::Energy;
use crate::Mass;
use crate::Support;

/// An optimal transport plan between two signatures.
///
/// Holds the non-zero flows between real bins. Mass routed to or from a
/// dummy bin during balancing is not part of the plan.
#[derive(Debug, Clone)]
pub struct Plan<X, Y> {
    source: Vec<X>,
    target: Vec<Y>,
    flows: Vec<Cell>,
    work: Energy,
    mass: Mass,
    iterations: usize,
}

impl<X, Y> Plan<X, Y> {
    pub(super) fn new(source: Vec<X>, target: Vec<Y>, optimum: Optimum) -> Self {
        let flows = optimum
            .cells
            .into_iter()
            .filter(|cell| cell.row < source.len())
            .filter(|cell| cell.col < target.len())
            .filter(|cell| cell.flow != 0.)
            .collect();
        Self {
            source,
            target,
            flows,
            work: optimum.work,
            mass: optimum.mass,
            iterations: optimum.iterations,
        }
    }
    /// Earth Mover's Distance: work per unit of mass moved.
    pub fn distance(&self) -> Energy {
        self.work / self.mass
    }
    /// Total work, Σ flow × distance.
    pub fn work(&self) -> Energy {
        self.work
    }
    /// Mass moved, the smaller of the two total weights.
    pub fn mass(&self) -> Mass {
        self.mass
    }
    /// Pivots the solver needed beyond the initial basis.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    /// Non-zero flows as (source label, target label, mass).
    pub fn flows(&self) -> impl Iterator<Item = (&X, &Y, Mass)> + '_ {
        self.flows
            .iter()
            .map(|cell| (&self.source[cell.row], &self.target[cell.col], cell.flow))
    }
    /// Non-zero flows by bin index.
    pub fn cells(&self) -> &[Cell] {
        &self.flows
    }
}

impl<X, Y> Coupling for Plan<X, Y>
where
    X: Support + PartialEq,
    Y: Support + PartialEq,
{
    type X = X;
    type Y = Y;
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Mass {
        self.flows()
            .filter(|(a, b, _)| *a == x && *b == y)
            .map(|(_, _, m)| m)
            .sum()
    }
    fn cost(&self) -> Energy {
        self.distance()
    }
}
