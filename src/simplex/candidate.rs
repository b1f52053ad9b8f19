use super::basis::Basis;
use super::error::Fault;
use super::grid::Grid;
use super::potential::Potentials;
use crate::Energy;

/// The non-basic cell with the most negative reduced cost.
///
/// It is the entering cell of the next pivot unless the basis is already
/// optimal, in which case it is simply discarded.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub delta: Energy,
}

impl Candidate {
    /// Row-major scan over non-basic cells; the first minimum wins.
    pub fn search(basis: &Basis, cost: &Grid, potentials: &Potentials) -> Result<Self, Fault> {
        let mut best = None;
        let mut min = Energy::INFINITY;
        for i in 0..basis.rows() {
            for j in 0..basis.cols() {
                if basis.contains(i, j) {
                    continue;
                }
                let delta = potentials.reduced(cost, i, j);
                if min > delta {
                    min = delta;
                    best = Some(Self { row: i, col: j, delta });
                }
            }
        }
        best.ok_or(Fault::Saturated)
    }
    /// No pivot can lower the cost by more than `tolerance` per unit.
    pub fn is_optimal(&self, tolerance: Energy) -> bool {
        self.delta >= -tolerance
    }
}
