use crate::Energy;

/// Dense row-major cost matrix.
///
/// Allocated with room for one extra row and one extra column so that
/// balancing can append a zero-cost dummy bin without reallocating.
/// Tracks the largest ground distance among the real entries.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Vec<Energy>,
    stride: usize,
    rows: usize,
    cols: usize,
    max: Energy,
}

impl Grid {
    /// Fills a `rows × cols` matrix from `f`, stopping at the first error.
    pub fn build<F, E>(rows: usize, cols: usize, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize, usize) -> Result<Energy, E>,
    {
        let stride = cols + 1;
        let mut grid = Self {
            data: vec![0.; (rows + 1) * stride],
            stride,
            rows,
            cols,
            max: 0.,
        };
        for i in 0..rows {
            for j in 0..cols {
                let cost = f(i, j)?;
                grid.data[i * stride + j] = cost;
                if cost > grid.max {
                    grid.max = cost;
                }
            }
        }
        Ok(grid)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Largest ground distance among the real entries.
    pub fn max(&self) -> Energy {
        self.max
    }
    /// Appends a zero-cost row.
    pub fn extend_rows(&mut self) {
        debug_assert!((self.rows + 1) * self.stride <= self.data.len());
        self.rows += 1;
    }
    /// Appends a zero-cost column.
    pub fn extend_cols(&mut self) {
        debug_assert!(self.cols < self.stride);
        self.cols += 1;
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = Energy;
    fn index(&self, (i, j): (usize, usize)) -> &Energy {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.stride + j]
    }
}
