use super::grid::Grid;
use crate::Energy;
use crate::Mass;

/// Which side of the problem received the zero-cost dummy bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dummy {
    /// Demand exceeded supply, so an extra supplier absorbs the excess.
    Row,
    /// Supply exceeded demand, so an extra consumer absorbs the excess.
    Column,
}

/// A transportation problem with equal total supply and demand.
///
/// When the two signatures carry different total mass, a dummy bin at zero
/// cost from everywhere takes up the difference. The distance is then
/// normalized by the shared mass, the smaller of the two totals.
#[derive(Debug, Clone)]
pub struct Balance {
    pub cost: Grid,
    pub supply: Vec<Mass>,
    pub demand: Vec<Mass>,
    pub dummy: Option<Dummy>,
    /// Mass actually moved, min(Σ supply, Σ demand).
    pub shared: Mass,
    /// max(Σ supply, Σ demand).
    pub heaviest: Mass,
}

impl Balance {
    pub fn new(mut cost: Grid, mut supply: Vec<Mass>, mut demand: Vec<Mass>, epsilon: Energy) -> Self {
        debug_assert!(cost.rows() == supply.len());
        debug_assert!(cost.cols() == demand.len());
        let s = supply.iter().fold(0., |acc, m| acc + m);
        let d = demand.iter().fold(0., |acc, m| acc + m);
        let diff = s - d;
        let dummy = if diff.abs() >= epsilon * s {
            if diff < 0. {
                cost.extend_rows();
                supply.push(-diff);
                Some(Dummy::Row)
            } else {
                cost.extend_cols();
                demand.push(diff);
                Some(Dummy::Column)
            }
        } else {
            None
        };
        Self {
            cost,
            supply,
            demand,
            dummy,
            shared: if s > d { d } else { s },
            heaviest: if s > d { s } else { d },
        }
    }
    pub fn rows(&self) -> usize {
        self.supply.len()
    }
    pub fn cols(&self) -> usize {
        self.demand.len()
    }
}
