use super::balance::Balance;
use super::basis::Basis;
use super::error::Fault;
use super::grid::Grid;
use crate::Energy;
use crate::Mass;

/// Russel's approximation method for an initial basic feasible solution.
///
/// Prices every cell by how far its cost sits below the most expensive
/// cell of its row and of its column, then greedily fills the cheapest
/// cell as far as its row supply or column demand allows.
///
/// # Algorithm
///
/// 1. `u_i = max_j c_ij`, `v_j = max_i c_ij`, `δ_ij = c_ij - u_i - v_j`
/// 2. Pick the active cell with the smallest δ (first one wins ties)
/// 3. Move min(supply, demand) along it and retire the exhausted line.
///    When both are exhausted the row goes, unless it is the last row.
/// 4. Refresh the maxima that depended on the retired line
/// 5. Repeat until no active cell remains
///
/// Every step retires exactly one line, so a well-posed problem ends with
/// `rows + cols - 1` basic cells forming a spanning tree.
pub struct Russel<'a> {
    cost: &'a Grid,
    supply: Vec<Mass>,
    demand: Vec<Mass>,
    rows: Vec<usize>,
    cols: Vec<usize>,
    u: Vec<Energy>,
    v: Vec<Energy>,
    delta: Vec<Energy>,
    epsilon: Energy,
    heaviest: Mass,
}

impl<'a> Russel<'a> {
    pub fn new(balance: &'a Balance, epsilon: Energy) -> Self {
        let cost = &balance.cost;
        let (n1, n2) = (balance.rows(), balance.cols());
        let mut u = vec![Energy::NEG_INFINITY; n1];
        let mut v = vec![Energy::NEG_INFINITY; n2];
        for i in 0..n1 {
            for j in 0..n2 {
                let c = cost[(i, j)];
                if u[i] <= c {
                    u[i] = c;
                }
                if v[j] <= c {
                    v[j] = c;
                }
            }
        }
        let delta = (0..n1)
            .flat_map(|i| (0..n2).map(move |j| (i, j)))
            .map(|(i, j)| cost[(i, j)] - u[i] - v[j])
            .collect();
        Self {
            cost,
            supply: balance.supply.clone(),
            demand: balance.demand.clone(),
            rows: (0..n1).collect(),
            cols: (0..n2).collect(),
            u,
            v,
            delta,
            epsilon,
            heaviest: balance.heaviest,
        }
    }

    /// Fills `basis` with the initial spanning tree.
    pub fn build(mut self, basis: &mut Basis) -> Result<(), Fault> {
        while !self.rows.is_empty() || !self.cols.is_empty() {
            let Some((a, b)) = self.cheapest() else {
                break;
            };
            let (i, j) = (self.rows[a], self.cols[b]);
            let flow = self.allocate(i, j);
            basis.insert(i, j, flow)?;
            if self.supply[i] == 0. && self.rows.len() > 1 {
                self.rows.remove(a);
                self.retire_row(i);
            } else {
                self.cols.remove(b);
                self.retire_col(j);
            }
        }
        let expected = basis.rows() + basis.cols() - 1;
        match basis.len() {
            found if found == expected => Ok(()),
            found => Err(Fault::Underfilled { expected, found }),
        }
    }

    /// Positions in the active row and column lists of the smallest δ.
    fn cheapest(&self) -> Option<(usize, usize)> {
        let mut best = None;
        let mut min = Energy::INFINITY;
        for (a, &i) in self.rows.iter().enumerate() {
            for (b, &j) in self.cols.iter().enumerate() {
                let delta = self.delta[self.index(i, j)];
                if min > delta {
                    min = delta;
                    best = Some((a, b));
                }
            }
        }
        best
    }

    /// Moves as much mass as possible along (i, j).
    /// Supply and demand within tolerance of each other count as the
    /// supply running out.
    fn allocate(&mut self, i: usize, j: usize) -> Mass {
        let (s, d) = (self.supply[i], self.demand[j]);
        if (s - d).abs() <= self.epsilon * self.heaviest || s < d {
            self.supply[i] = 0.;
            self.demand[j] -= s;
            s
        } else {
            self.demand[j] = 0.;
            self.supply[i] -= d;
            d
        }
    }

    /// Row `i` left the active set: refresh the column maxima it defined.
    fn retire_row(&mut self, i: usize) {
        for b in 0..self.cols.len() {
            let j = self.cols[b];
            if self.v[j] != self.cost[(i, j)] {
                continue;
            }
            let old = self.v[j];
            let new = self
                .rows
                .iter()
                .map(|&r| self.cost[(r, j)])
                .fold(Energy::NEG_INFINITY, |max, c| if max <= c { c } else { max });
            self.v[j] = new;
            let diff = old - new;
            if diff.abs() < self.epsilon * self.cost.max() {
                for a in 0..self.rows.len() {
                    let r = self.rows[a];
                    let k = self.index(r, j);
                    self.delta[k] += diff;
                }
            }
        }
    }

    /// Column `j` left the active set: refresh the row maxima it defined.
    fn retire_col(&mut self, j: usize) {
        for a in 0..self.rows.len() {
            let i = self.rows[a];
            if self.u[i] != self.cost[(i, j)] {
                continue;
            }
            let old = self.u[i];
            let new = self
                .cols
                .iter()
                .map(|&c| self.cost[(i, c)])
                .fold(Energy::NEG_INFINITY, |max, c| if max <= c { c } else { max });
            self.u[i] = new;
            let diff = old - new;
            if diff.abs() < self.epsilon * self.cost.max() {
                for b in 0..self.cols.len() {
                    let c = self.cols[b];
                    let k = self.index(i, c);
                    self.delta[k] += diff;
                }
            }
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.v.len() + j
    }
}
