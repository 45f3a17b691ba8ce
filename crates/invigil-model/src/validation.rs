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

//! Capacity validation.
//!
//! Runs before any allocation work. Two conditions are fatal:
//!
//! * a hall declares more seats than its grid has cells, and
//! * all halls together have fewer usable seats than there are students.
//!
//! Hall checks come first and report the first offending hall in input order,
//! so the message always points at a concrete row of the hall list.

use crate::{hall::Hall, model::ExamModel};
use thiserror::Error;

/// The input cannot be seated as declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// A hall declares more seats than its grid holds.
    #[error("hall '{hall_code}' declares capacity {declared} but its grid only has {grid} seats")]
    ExceedsGrid {
        hall_code: String,
        declared: usize,
        grid: usize,
    },
    /// There are more students than usable seats across all halls.
    #[error("not enough seats ({seats}) for {students} students")]
    InsufficientSeats { seats: usize, students: usize },
}

/// Seat totals of a model that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySummary {
    /// Number of students to seat.
    pub students: usize,
    /// Sum of `rows * cols` across all halls.
    pub grid_seats: usize,
    /// Sum of usable capacities across all halls.
    pub usable_seats: usize,
}

impl CapacitySummary {
    /// Seats left over once every student is seated.
    #[inline]
    pub fn slack(&self) -> usize {
        self.usable_seats - self.students
    }
}

impl std::fmt::Display for CapacitySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} students, {} usable seats ({} grid cells)",
            self.students, self.usable_seats, self.grid_seats
        )
    }
}

/// Checks a single hall's declared capacity against its grid.
#[inline]
pub fn validate_hall(hall: &Hall) -> Result<(), CapacityError> {
    let grid = hall.grid_capacity();
    if hall.declared_capacity() > grid {
        return Err(CapacityError::ExceedsGrid {
            hall_code: hall.code().to_owned(),
            declared: hall.declared_capacity(),
            grid,
        });
    }
    Ok(())
}

/// Checks every hall and the overall seat count.
///
/// # Examples
///
/// ```rust
/// # use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};
/// # use invigil_model::validation::{validate_capacity, CapacityError};
/// let mut builder = ExamModelBuilder::new();
/// builder
///     .add_hall(Hall::new("H1", 1, 1))
///     .add_student(Student::new("1", "CSE", "CS101", "Programming"))
///     .add_student(Student::new("2", "CSE", "CS101", "Programming"));
/// let model = builder.build().unwrap();
/// assert_eq!(
///     validate_capacity(&model),
///     Err(CapacityError::InsufficientSeats { seats: 1, students: 2 })
/// );
/// ```
pub fn validate_capacity(model: &ExamModel) -> Result<CapacitySummary, CapacityError> {
    for hall in model.halls() {
        validate_hall(hall)?;
    }

    let summary = CapacitySummary {
        students: model.num_students(),
        grid_seats: model.total_grid_capacity(),
        usable_seats: model.total_usable_capacity(),
    };

    if summary.students > summary.usable_seats {
        return Err(CapacityError::InsufficientSeats {
            seats: summary.usable_seats,
            students: summary.students,
        });
    }

    Ok(summary)
}
