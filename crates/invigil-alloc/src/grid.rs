// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Seat grids and the walks that fill them.

use crate::config::Traversal;
use invigil_model::index::StudentIndex;
use std::iter::FusedIterator;

/// Visits every cell of a `rows x cols` grid once, as zero-based
/// `(row, col)` pairs.
///
/// Row-major walks go left to right on every row. Serpentine walks alternate,
/// starting left to right unless `flip_first_row` is set.
///
/// ```rust
/// # use invigil_alloc::{config::Traversal, grid::GridWalk};
/// let cells: Vec<(usize, usize)> = GridWalk::new(2, 3, Traversal::Serpentine, false).collect();
/// assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWalk {
    rows: usize,
    cols: usize,
    traversal: Traversal,
    flip_first_row: bool,
    next: usize,
}

impl GridWalk {
    #[inline]
    pub fn new(rows: usize, cols: usize, traversal: Traversal, flip_first_row: bool) -> Self {
        Self {
            rows,
            cols,
            traversal,
            flip_first_row,
            next: 0,
        }
    }

    #[inline]
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    #[inline]
    pub fn flips_first_row(&self) -> bool {
        self.flip_first_row
    }

    /// Returns `true` if `row` is walked right to left.
    #[inline]
    pub fn is_reversed(&self, row: usize) -> bool {
        match self.traversal {
            Traversal::RowMajor => false,
            Traversal::Serpentine => (row % 2 == 1) != self.flip_first_row,
        }
    }

    /// Restarts the walk from the first cell.
    #[inline]
    pub fn restart(&self) -> Self {
        Self {
            next: 0,
            ..self.clone()
        }
    }

    #[inline]
    fn total(&self) -> usize {
        self.rows * self.cols
    }
}

impl Iterator for GridWalk {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }
        let row = self.next / self.cols;
        let offset = self.next % self.cols;
        let col = if self.is_reversed(row) {
            self.cols - 1 - offset
        } else {
            offset
        };
        self.next += 1;
        Some((row, col))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridWalk {}
impl FusedIterator for GridWalk {}

/// The occupancy of one hall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<StudentIndex>>,
    occupied: usize,
}

impl SeatGrid {
    /// Creates an empty grid.
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            occupied: 0,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of seated students.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns the occupant of the zero-based cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<StudentIndex> {
        assert!(
            row < self.rows && col < self.cols,
            "called `SeatGrid::get` with cell ({}, {}) outside a {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );

        self.cells[row * self.cols + col]
    }

    /// One row of cells, left to right.
    #[inline]
    pub fn row(&self, row: usize) -> &[Option<StudentIndex>] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// All rows, front to back.
    #[inline]
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Option<StudentIndex>]> + '_ {
        // `chunks_exact` rejects a chunk size of zero.
        self.cells.chunks_exact(self.cols.max(1))
    }

    /// Seats `student` at the zero-based cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid or is already taken.
    pub fn place(&mut self, row: usize, col: usize, student: StudentIndex) {
        assert!(
            row < self.rows && col < self.cols,
            "called `SeatGrid::place` with cell ({}, {}) outside a {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        let cell = &mut self.cells[row * self.cols + col];
        assert!(
            cell.is_none(),
            "called `SeatGrid::place` on occupied cell ({}, {})",
            row,
            col
        );

        *cell = Some(student);
        self.occupied += 1;
    }

    /// First empty cell in row-major order.
    #[inline]
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(Option::is_none)
            .map(|i| (i / self.cols, i % self.cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_walk() {
        let cells: Vec<_> = GridWalk::new(2, 2, Traversal::RowMajor, true).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_serpentine_flipped_walk() {
        let walk = GridWalk::new(3, 2, Traversal::Serpentine, true);
        assert_eq!(walk.len(), 6);
        assert!(walk.is_reversed(0));
        assert!(!walk.is_reversed(1));
        let cells: Vec<_> = walk.collect();
        assert_eq!(cells, vec![(0, 1), (0, 0), (1, 0), (1, 1), (2, 1), (2, 0)]);
    }

    #[test]
    fn test_walk_restart() {
        let mut walk = GridWalk::new(1, 3, Traversal::RowMajor, false);
        walk.next();
        walk.next();
        assert_eq!(walk.len(), 1);
        assert_eq!(walk.restart().len(), 3);
    }

    #[test]
    fn test_serpentine_fill_three_by_four() {
        let mut grid = SeatGrid::new(3, 4);
        for (i, (row, col)) in GridWalk::new(3, 4, Traversal::Serpentine, false).enumerate() {
            grid.place(row, col, StudentIndex::new(i));
        }
        let rows: Vec<Vec<usize>> = grid
            .iter_rows()
            .map(|r| r.iter().map(|c| c.map(|s| s.get()).unwrap_or(usize::MAX)).collect())
            .collect();
        assert_eq!(
            rows,
            vec![vec![0, 1, 2, 3], vec![7, 6, 5, 4], vec![8, 9, 10, 11]]
        );
        assert_eq!(grid.occupied(), 12);
        assert_eq!(grid.first_empty(), None);
    }

    #[test]
    fn test_first_empty_is_row_major() {
        let mut grid = SeatGrid::new(2, 2);
        assert!(grid.is_empty());
        grid.place(0, 0, StudentIndex::new(0));
        grid.place(1, 0, StudentIndex::new(1));
        assert_eq!(grid.first_empty(), Some((0, 1)));
        assert_eq!(grid.get(1, 0), Some(StudentIndex::new(1)));
        assert_eq!(grid.row(1), &[Some(StudentIndex::new(1)), None]);
    }

    #[test]
    #[should_panic(expected = "called `SeatGrid::place` on occupied cell (0, 0)")]
    fn test_double_placement_panics() {
        let mut grid = SeatGrid::new(1, 1);
        grid.place(0, 0, StudentIndex::new(0));
        grid.place(0, 0, StudentIndex::new(1));
    }
}
