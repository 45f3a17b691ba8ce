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

//! Seat numbers.
//!
//! Seats are numbered along the walk the hall was filled by, so the
//! numbers follow the order in which students were seated. Halls sharing a
//! base code (`LH-1`, `LH-2`) count on from where the previous hall of the
//! same base stopped. Halls without students get no numbers and do not
//! advance the count.

use invigil_alloc::plan::{Seat, SeatingPlan};
use invigil_model::index::HallIndex;
use rustc_hash::FxHashMap;

/// Seat numbers of one hall, including its empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HallNumbers {
    hall: HallIndex,
    rows: usize,
    cols: usize,
    numbers: Vec<usize>,
    first: usize,
    last: usize,
}

impl HallNumbers {
    #[inline]
    pub fn hall(&self) -> HallIndex {
        self.hall
    }

    /// The number of the one-based cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the hall.
    #[inline]
    pub fn number(&self, row: usize, col: usize) -> usize {
        assert!(
            (1..=self.rows).contains(&row) && (1..=self.cols).contains(&col),
            "called `HallNumbers::number` with cell ({}, {}) outside a {}x{} hall",
            row,
            col,
            self.rows,
            self.cols
        );
        self.numbers[(row - 1) * self.cols + (col - 1)]
    }

    /// Rows of seat numbers, front to back.
    #[inline]
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.numbers.chunks_exact(self.cols.max(1))
    }

    /// Lowest number in the hall.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Highest number in the hall.
    #[inline]
    pub fn last(&self) -> usize {
        self.last
    }
}

/// Seat numbers of every hall of a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatNumbering {
    halls: Vec<Option<HallNumbers>>,
}

impl SeatNumbering {
    pub fn new(plan: &SeatingPlan<'_>) -> Self {
        let model = plan.model();
        let mut last_per_base: FxHashMap<&str, usize> = FxHashMap::default();

        let halls = plan
            .hall_seatings()
            .iter()
            .map(|seating| {
                if seating.is_empty() {
                    return None;
                }

                let hall = model.hall(seating.hall());
                let base = hall.base_code();
                let first = last_per_base.get(base).copied().unwrap_or(0) + 1;

                let mut numbers = vec![0; hall.grid_capacity()];
                let mut next = first;
                for (row, col) in seating.walk() {
                    numbers[row * hall.cols() + col] = next;
                    next += 1;
                }
                let last = next - 1;
                last_per_base.insert(base, last);

                Some(HallNumbers {
                    hall: seating.hall(),
                    rows: hall.rows(),
                    cols: hall.cols(),
                    numbers,
                    first,
                    last,
                })
            })
            .collect();

        Self { halls }
    }

    /// Numbers of `hall`, or `None` if it holds no students.
    #[inline]
    pub fn hall(&self, hall: HallIndex) -> Option<&HallNumbers> {
        self.halls.get(hall.get()).and_then(Option::as_ref)
    }

    /// The number printed on `seat`.
    #[inline]
    pub fn seat_number(&self, seat: Seat) -> Option<usize> {
        self.hall(seat.hall())
            .map(|numbers| numbers.number(seat.row(), seat.col()))
    }
}
