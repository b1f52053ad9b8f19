use super::error::Fault;
use crate::Mass;

/// Index of a record in the basis arena.
pub type Slot = usize;

/// Direction of travel through the basis graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Between cells sharing a row.
    Row,
    /// Between cells sharing a column.
    Column,
}

impl Axis {
    /// Axis of the step that extends a cycle path of length `n`.
    /// Odd lengths leave along a row, even lengths along a column.
    fn step(n: usize) -> Self {
        if n % 2 == 1 { Self::Row } else { Self::Column }
    }
    fn turn(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

/// A basic variable: flow on one (row, column) edge of the transport graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub flow: Mass,
}

impl Cell {
    fn line(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.col,
        }
    }
}

/// Sparse basis graph over a fixed-capacity arena.
///
/// Every basic cell lives in one slot and is threaded onto the list of its
/// row and the list of its column. New cells go to the front of both lists.
/// A dense membership matrix mirrors list membership for O(1) lookup.
///
/// Capacity is `rows + cols`: a spanning tree uses `rows + cols - 1` slots,
/// leaving exactly one for the entering cell of a pivot.
#[derive(Debug, Clone)]
pub struct Basis {
    cells: Vec<Cell>,
    used: Vec<bool>,
    next_in_row: Vec<Option<Slot>>,
    next_in_col: Vec<Option<Slot>>,
    row_heads: Vec<Option<Slot>>,
    col_heads: Vec<Option<Slot>>,
    member: Vec<bool>,
    free: Vec<Slot>,
}

impl Basis {
    pub fn new(rows: usize, cols: usize) -> Self {
        let capacity = rows + cols;
        Self {
            cells: vec![Cell::default(); capacity],
            used: vec![false; capacity],
            next_in_row: vec![None; capacity],
            next_in_col: vec![None; capacity],
            row_heads: vec![None; rows],
            col_heads: vec![None; cols],
            member: vec![false; rows * cols],
            free: (0..capacity).rev().collect(),
        }
    }
    pub fn rows(&self) -> usize {
        self.row_heads.len()
    }
    pub fn cols(&self) -> usize {
        self.col_heads.len()
    }
    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.cells.len() - self.free.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.member[row * self.cols() + col]
    }
    pub fn cell(&self, slot: Slot) -> &Cell {
        &self.cells[slot]
    }
    pub fn flow_mut(&mut self, slot: Slot) -> &mut Mass {
        &mut self.cells[slot].flow
    }
    /// Occupied slots in arena order.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(slot, _)| self.used[*slot])
    }
    /// Slots of the basic cells in row `i`, most recent first.
    pub fn row(&self, i: usize) -> impl Iterator<Item = Slot> + '_ {
        self.line(Axis::Row, i)
    }
    /// Slots of the basic cells in column `j`, most recent first.
    pub fn col(&self, j: usize) -> impl Iterator<Item = Slot> + '_ {
        self.line(Axis::Column, j)
    }

    /// Makes (row, col) basic with the given flow.
    pub fn insert(&mut self, row: usize, col: usize, flow: Mass) -> Result<Slot, Fault> {
        debug_assert!(!self.contains(row, col), "cell already basic");
        let slot = self.free.pop().ok_or(Fault::Exhausted)?;
        let cols = self.cols();
        self.cells[slot] = Cell { row, col, flow };
        self.used[slot] = true;
        self.next_in_row[slot] = self.row_heads[row];
        self.next_in_col[slot] = self.col_heads[col];
        self.row_heads[row] = Some(slot);
        self.col_heads[col] = Some(slot);
        self.member[row * cols + col] = true;
        Ok(slot)
    }
    /// Splices the cell at `slot` out of its row and column and frees the slot.
    pub fn remove(&mut self, slot: Slot) {
        debug_assert!(self.used[slot], "slot already free");
        let Cell { row, col, .. } = self.cells[slot];
        let cols = self.cols();
        Self::splice(&mut self.row_heads[row], &mut self.next_in_row, slot);
        Self::splice(&mut self.col_heads[col], &mut self.next_in_col, slot);
        self.member[row * cols + col] = false;
        self.used[slot] = false;
        self.free.push(slot);
    }

    /// Finds the unique cycle closed by the basic cell at `enter`.
    ///
    /// Depth-first search that leaves `enter` along its row, then alternates
    /// column and row moves, backtracking out of dead ends, until a column
    /// move lands back on `enter`. Even positions of the returned path
    /// (starting with `enter`) gain flow in a pivot; odd positions lose it.
    pub fn cycle(&self, enter: Slot) -> Result<Vec<Slot>, Fault> {
        let ref mut visited = vec![false; self.cells.len()];
        let mut path = vec![enter];
        let mut cursors = vec![self.head(Axis::Row, self.cells[enter].row)];
        visited[enter] = true;
        while let Some(cursor) = cursors.last_mut() {
            let axis = Axis::step(path.len());
            let mut candidate = *cursor;
            while let Some(slot) = candidate {
                if axis == Axis::Column && slot == enter {
                    return Ok(path);
                }
                if !visited[slot] {
                    break;
                }
                candidate = self.next(axis, slot);
            }
            match candidate {
                Some(slot) => {
                    *cursor = self.next(axis, slot);
                    visited[slot] = true;
                    path.push(slot);
                    let turn = axis.turn();
                    cursors.push(self.head(turn, self.cells[slot].line(turn)));
                }
                None => {
                    cursors.pop();
                    if let Some(slot) = path.pop() {
                        visited[slot] = false;
                    }
                }
            }
        }
        Err(Fault::Acyclic)
    }

    fn head(&self, axis: Axis, line: usize) -> Option<Slot> {
        match axis {
            Axis::Row => self.row_heads[line],
            Axis::Column => self.col_heads[line],
        }
    }
    fn next(&self, axis: Axis, slot: Slot) -> Option<Slot> {
        match axis {
            Axis::Row => self.next_in_row[slot],
            Axis::Column => self.next_in_col[slot],
        }
    }
    fn line(&self, axis: Axis, line: usize) -> impl Iterator<Item = Slot> + '_ {
        std::iter::successors(self.head(axis, line), move |&slot| self.next(axis, slot))
    }
    fn splice(head: &mut Option<Slot>, next: &mut [Option<Slot>], slot: Slot) {
        if *head == Some(slot) {
            *head = next[slot];
            return;
        }
        let mut cursor = *head;
        while let Some(prev) = cursor {
            if next[prev] == Some(slot) {
                next[prev] = next[slot];
                return;
            }
            cursor = next[prev];
        }
    }
}
