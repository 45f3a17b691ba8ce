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

//! The seating plan produced by a successful run.
//!
//! A [`SeatingPlan`] is the allocation ledger: for every student at most one
//! seat, for every hall a grid in which each cell holds at most one student.
//! It borrows the [`ExamModel`] it was built for, so lookups can hand out
//! views that join seat data with student and hall details.

use crate::{
    config::Traversal,
    grid::{GridWalk, SeatGrid},
    grouping::CourseGroups,
};
use invigil_model::{
    hall::Hall,
    index::{CourseIndex, HallIndex, StudentIndex},
    model::ExamModel,
    student::Student,
};
use serde::{Deserialize, Serialize};

/// A seat, with one-based row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seat {
    hall: HallIndex,
    row: usize,
    col: usize,
}

impl Seat {
    #[inline]
    pub fn new(hall: HallIndex, row: usize, col: usize) -> Self {
        debug_assert!(
            row > 0 && col > 0,
            "called `Seat::new` with a zero row or column; seats are one-based"
        );
        Self { hall, row, col }
    }

    #[inline]
    pub fn hall(&self) -> HallIndex {
        self.hall
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat({}, row: {}, col: {})", self.hall, self.row, self.col)
    }
}

/// Occupancy and course mix of one hall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HallSeating {
    hall: HallIndex,
    grid: SeatGrid,
    courses: Vec<CourseIndex>,
    walk: GridWalk,
}

impl HallSeating {
    #[inline]
    pub fn hall(&self) -> HallIndex {
        self.hall
    }

    #[inline]
    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    /// Number of seated students.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.grid.occupied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Courses with at least one student in this hall, in order of first placement.
    #[inline]
    pub fn courses(&self) -> &[CourseIndex] {
        &self.courses
    }

    /// The walk the hall was filled along, from its first cell.
    #[inline]
    pub fn walk(&self) -> GridWalk {
        self.walk.restart()
    }
}

/// The allocation ledger.
#[derive(Clone, Debug)]
pub struct SeatingPlan<'a> {
    model: &'a ExamModel,
    groups: CourseGroups,
    seats: Vec<Option<Seat>>,
    halls: Vec<HallSeating>,
    allocated: usize,
}

impl<'a> SeatingPlan<'a> {
    /// Creates an empty plan with one row-major grid per hall.
    pub fn new(model: &'a ExamModel, groups: CourseGroups) -> Self {
        let halls = model
            .hall_indices()
            .map(|hall_index| {
                let hall = model.hall(hall_index);
                HallSeating {
                    hall: hall_index,
                    grid: SeatGrid::new(hall.rows(), hall.cols()),
                    courses: Vec::new(),
                    walk: GridWalk::new(hall.rows(), hall.cols(), Traversal::RowMajor, false),
                }
            })
            .collect();

        Self {
            model,
            groups,
            seats: vec![None; model.num_students()],
            halls,
            allocated: 0,
        }
    }

    #[inline]
    pub fn model(&self) -> &'a ExamModel {
        self.model
    }

    /// The course ranking the plan was built from.
    #[inline]
    pub fn groups(&self) -> &CourseGroups {
        &self.groups
    }

    /// Number of students with a seat.
    #[inline]
    pub fn num_allocated(&self) -> usize {
        self.allocated
    }

    /// Returns `true` once every student has a seat.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.allocated == self.seats.len()
    }

    /// Seat of `student_index`, if any.
    #[inline]
    pub fn seat(&self, student_index: StudentIndex) -> Option<Seat> {
        self.seats[student_index.get()]
    }

    /// Looks up the allocation of a registration id.
    pub fn allocation(&self, registration_id: &str) -> Option<Allocation<'a>> {
        let student_index = self.model.student_index(registration_id)?;
        self.allocation_of(student_index)
    }

    /// Allocation view of `student_index`, if the student has a seat.
    #[inline]
    pub fn allocation_of(&self, student_index: StudentIndex) -> Option<Allocation<'a>> {
        let seat = self.seat(student_index)?;
        Some(Allocation {
            student: self.model.student(student_index),
            hall: self.model.hall(seat.hall()),
            seat,
        })
    }

    /// All allocations in student input order.
    pub fn allocations(&self) -> impl Iterator<Item = Allocation<'a>> + '_ {
        self.model
            .student_indices()
            .filter_map(move |student_index| self.allocation_of(student_index))
    }

    /// Seating of `hall_index`.
    #[inline]
    pub fn hall_seating(&self, hall_index: HallIndex) -> &HallSeating {
        let index = hall_index.get();
        debug_assert!(
            index < self.halls.len(),
            "called `SeatingPlan::hall_seating` with hall index out of bounds: the len is {} but the index is {}",
            self.halls.len(),
            index
        );

        &self.halls[index]
    }

    /// Seatings of all halls in declared order, including empty ones.
    #[inline]
    pub fn hall_seatings(&self) -> &[HallSeating] {
        &self.halls
    }

    /// Rows of `hall_index`'s grid, front to back.
    #[inline]
    pub fn hall_seats(
        &self,
        hall_index: HallIndex,
    ) -> impl ExactSizeIterator<Item = &[Option<StudentIndex>]> + '_ {
        self.hall_seating(hall_index).grid.iter_rows()
    }

    /// Course codes present in `hall_index`, sorted and unique.
    pub fn hall_courses(&self, hall_index: HallIndex) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .hall_seating(hall_index)
            .courses
            .iter()
            .map(|&course| self.groups.course(course).code())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Owned copies of every allocation, in student input order.
    pub fn records(&self) -> Vec<AllocationRecord> {
        self.allocations().map(|a| a.to_record()).collect()
    }

    /// Sets the walk recorded for `hall_index`.
    pub(crate) fn set_walk(&mut self, hall_index: HallIndex, walk: GridWalk) {
        self.halls[hall_index.get()].walk = walk;
    }

    /// Seats `student_index` at the zero-based cell `(row, col)` of `hall_index`.
    ///
    /// # Panics
    ///
    /// Panics if the student already has a seat or the cell is taken.
    pub(crate) fn place(
        &mut self,
        student_index: StudentIndex,
        hall_index: HallIndex,
        row: usize,
        col: usize,
    ) -> Seat {
        let slot = &mut self.seats[student_index.get()];
        assert!(
            slot.is_none(),
            "called `SeatingPlan::place` for {} which already has a seat",
            student_index
        );

        let course = self.groups.course_of(student_index);
        let seating = &mut self.halls[hall_index.get()];
        seating.grid.place(row, col, student_index);
        if !seating.courses.contains(&course) {
            seating.courses.push(course);
        }

        let seat = Seat::new(hall_index, row + 1, col + 1);
        *slot = Some(seat);
        self.allocated += 1;
        seat
    }
}

impl std::fmt::Display for SeatingPlan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.halls.iter().filter(|h| !h.is_empty()).count();
        write!(
            f,
            "SeatingPlan(allocated: {}/{}, halls used: {}/{})",
            self.allocated,
            self.seats.len(),
            used,
            self.halls.len()
        )
    }
}

/// One ledger entry joined with its student and hall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation<'a> {
    student: &'a Student,
    hall: &'a Hall,
    seat: Seat,
}

impl<'a> Allocation<'a> {
    #[inline]
    pub fn student(&self) -> &'a Student {
        self.student
    }

    #[inline]
    pub fn hall(&self) -> &'a Hall {
        self.hall
    }

    #[inline]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[inline]
    pub fn registration_id(&self) -> &'a str {
        self.student.registration_id()
    }

    #[inline]
    pub fn hall_code(&self) -> &'a str {
        self.hall.code()
    }

    #[inline]
    pub fn hall_name(&self) -> &'a str {
        self.hall.name()
    }

    #[inline]
    pub fn block(&self) -> &'a str {
        self.hall.block()
    }

    /// One-based row.
    #[inline]
    pub fn row(&self) -> usize {
        self.seat.row()
    }

    /// One-based column.
    #[inline]
    pub fn col(&self) -> usize {
        self.seat.col()
    }

    #[inline]
    pub fn course_code(&self) -> &'a str {
        self.student.course_code()
    }

    #[inline]
    pub fn course_title(&self) -> &'a str {
        self.student.course_title()
    }

    #[inline]
    pub fn department(&self) -> &'a str {
        self.student.department()
    }

    #[inline]
    pub fn exam_date(&self) -> Option<&'a str> {
        self.student.exam_date()
    }

    /// Copies the entry into an owned record.
    pub fn to_record(&self) -> AllocationRecord {
        AllocationRecord {
            registration_id: self.registration_id().to_owned(),
            hall_code: self.hall_code().to_owned(),
            hall_name: self.hall_name().to_owned(),
            block: self.block().to_owned(),
            row: self.row(),
            col: self.col(),
            course_code: self.course_code().to_owned(),
            course_title: self.course_title().to_owned(),
            department: self.department().to_owned(),
            exam_date: self.exam_date().map(str::to_owned),
        }
    }
}

impl std::fmt::Display for Allocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} row {} col {} ({})",
            self.registration_id(),
            self.hall_code(),
            self.row(),
            self.col(),
            self.course_code()
        )
    }
}

/// An owned ledger entry for export.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub registration_id: String,
    pub hall_code: String,
    pub hall_name: String,
    pub block: String,
    pub row: usize,
    pub col: usize,
    pub course_code: String,
    pub course_title: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
}
