use super::basis::Basis;
use super::basis::Cell;
use super::candidate::Candidate;
use super::error::Fault;
use crate::Mass;

/// One basis exchange along the cycle closed by an entering cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Pivot {
    /// The entering cell, with its flow after the exchange.
    pub enter: Cell,
    /// The leaving cell, with its flow before removal.
    pub leave: Cell,
    /// Mass shifted around the cycle. Zero for a degenerate pivot.
    pub theta: Mass,
    /// (row, col) of every cycle member, starting at the entering cell.
    pub cycle: Vec<(usize, usize)>,
}

impl Pivot {
    /// Brings `candidate` into the basis and drives one cell out.
    ///
    /// The leaving cell is the losing cycle member with the least flow.
    /// Shifting that much mass around the cycle keeps every row and column
    /// sum intact and zeroes the leaving cell. Degenerate pivots (zero
    /// theta) still swap the cells.
    pub fn apply(basis: &mut Basis, candidate: &Candidate) -> Result<Self, Fault> {
        let enter = basis.insert(candidate.row, candidate.col, 0.)?;
        let cycle = basis.cycle(enter)?;
        let mut leave = None;
        let mut theta = Mass::INFINITY;
        for &slot in cycle.iter().skip(1).step_by(2) {
            let flow = basis.cell(slot).flow;
            if flow < theta {
                theta = flow;
                leave = Some(slot);
            }
        }
        let leave = leave.ok_or(Fault::Acyclic)?;
        for pair in cycle.chunks_exact(2) {
            *basis.flow_mut(pair[0]) += theta;
            *basis.flow_mut(pair[1]) -= theta;
        }
        let left = *basis.cell(leave);
        basis.remove(leave);
        Ok(Self {
            enter: *basis.cell(enter),
            leave: left,
            theta,
            cycle: cycle
                .iter()
                .map(|&slot| (basis.cell(slot).row, basis.cell(slot).col))
                .collect(),
        })
    }
}
