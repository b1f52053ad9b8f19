use super::basis::Basis;
use super::error::Fault;
use super::grid::Grid;
use crate::Energy;

/// Row and column dual potentials of the current basis.
///
/// For every basic cell, `cost[i][j] = u[i] + v[j]`. A spanning tree gives
/// `rows + cols - 1` such equations over `rows + cols` unknowns, so `v[0]`
/// is pinned to zero and everything else follows.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Potentials {
    pub u: Vec<Energy>,
    pub v: Vec<Energy>,
}

impl Potentials {
    /// Propagates potentials outward from `v[0]` across the basis tree.
    ///
    /// Alternates two frontiers: columns learned in the last round assign
    /// the rows they share a basic cell with, and those rows assign their
    /// columns in turn. A round that learns nothing means the basis is
    /// not connected.
    pub fn solve(basis: &Basis, cost: &Grid) -> Result<Self, Fault> {
        let (n1, n2) = (basis.rows(), basis.cols());
        let mut u = vec![0.; n1];
        let mut v = vec![0.; n2];
        let mut known_u = vec![false; n1];
        let mut known_v = vec![false; n2];
        let mut next_cols = vec![0];
        let mut next_rows = Vec::new();
        let mut done_rows = 0;
        let mut done_cols = 0;
        known_v[0] = true;
        while done_rows < n1 || done_cols < n2 {
            let mut found = false;
            if done_cols < n2 {
                for j in std::mem::take(&mut next_cols) {
                    for slot in basis.col(j) {
                        let i = basis.cell(slot).row;
                        if !known_u[i] {
                            u[i] = cost[(i, j)] - v[j];
                            known_u[i] = true;
                            next_rows.push(i);
                        }
                    }
                    done_cols += 1;
                    found = true;
                }
            }
            if done_rows < n1 {
                for i in std::mem::take(&mut next_rows) {
                    for slot in basis.row(i) {
                        let j = basis.cell(slot).col;
                        if !known_v[j] {
                            v[j] = cost[(i, j)] - u[i];
                            known_v[j] = true;
                            next_cols.push(j);
                        }
                    }
                    done_rows += 1;
                    found = true;
                }
            }
            if !found {
                return Err(Fault::Disconnected);
            }
        }
        Ok(Self { u, v })
    }
    /// Reduced cost of moving one unit along (i, j).
    pub fn reduced(&self, cost: &Grid, i: usize, j: usize) -> Energy {
        cost[(i, j)] - self.u[i] - self.v[j]
    }
}
