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

use crate::{
    hall::Hall,
    index::{HallIndex, StudentIndex},
    student::Student,
};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Rejections raised by [`ExamModelBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A student at the given input position has an empty registration id.
    #[error("student at position {position} has an empty registration id")]
    EmptyRegistrationId { position: usize },
    /// Two students share a registration id.
    #[error("registration id '{0}' appears more than once")]
    DuplicateRegistrationId(String),
    /// A student has an empty course code.
    #[error("student '{registration_id}' has an empty course code")]
    EmptyCourseCode { registration_id: String },
    /// A hall at the given input position has an empty code.
    #[error("hall at position {position} has an empty code")]
    EmptyHallCode { position: usize },
    /// Two halls share a code.
    #[error("hall code '{0}' appears more than once")]
    DuplicateHallCode(String),
    /// A hall has zero rows or zero columns.
    #[error("hall '{hall_code}' has an empty seating grid ({rows}x{cols})")]
    EmptyGrid {
        hall_code: String,
        rows: usize,
        cols: usize,
    },
}

/// The immutable input of one allocation run.
///
/// Students and halls are stored in the order they were supplied. Both are
/// addressed by typed indices; lookups by registration id or hall code go
/// through hash indices built once at construction.
///
/// Construction:
/// - Use `ExamModelBuilder` and call `ExamModelBuilder::build` to obtain a checked `ExamModel`.
#[derive(Clone, Debug)]
pub struct ExamModel {
    students: Vec<Student>,
    halls: Vec<Hall>,
    student_lookup: FxHashMap<String, StudentIndex>,
    hall_lookup: FxHashMap<String, HallIndex>,
}

impl ExamModel {
    /// Returns the number of students in the model.
    #[inline]
    pub fn num_students(&self) -> usize {
        self.students.len()
    }

    /// Returns the number of halls in the model.
    #[inline]
    pub fn num_halls(&self) -> usize {
        self.halls.len()
    }

    /// Returns all students in input order.
    #[inline]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Returns all halls in input order.
    #[inline]
    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    /// Returns the student at `student_index`.
    ///
    /// # Panics
    ///
    /// Panics if `student_index` is not in `0..num_students()`.
    #[inline]
    pub fn student(&self, student_index: StudentIndex) -> &Student {
        let index = student_index.get();
        debug_assert!(
            index < self.num_students(),
            "called `ExamModel::student` with student index out of bounds: the len is {} but the index is {}",
            self.num_students(),
            index
        );

        &self.students[index]
    }

    /// Returns the hall at `hall_index`.
    ///
    /// # Panics
    ///
    /// Panics if `hall_index` is not in `0..num_halls()`.
    #[inline]
    pub fn hall(&self, hall_index: HallIndex) -> &Hall {
        let index = hall_index.get();
        debug_assert!(
            index < self.num_halls(),
            "called `ExamModel::hall` with hall index out of bounds: the len is {} but the index is {}",
            self.num_halls(),
            index
        );

        &self.halls[index]
    }

    /// Looks up a student by registration id.
    #[inline]
    pub fn student_index(&self, registration_id: &str) -> Option<StudentIndex> {
        self.student_lookup.get(registration_id).copied()
    }

    /// Looks up a hall by code.
    #[inline]
    pub fn hall_index(&self, hall_code: &str) -> Option<HallIndex> {
        self.hall_lookup.get(hall_code).copied()
    }

    /// Iterates over all student indices in input order.
    #[inline]
    pub fn student_indices(
        &self,
    ) -> impl DoubleEndedIterator<Item = StudentIndex> + ExactSizeIterator {
        StudentIndex::range(self.num_students())
    }

    /// Iterates over all hall indices in input order.
    #[inline]
    pub fn hall_indices(&self) -> impl DoubleEndedIterator<Item = HallIndex> + ExactSizeIterator {
        HallIndex::range(self.num_halls())
    }

    /// Total grid cells across all halls.
    #[inline]
    pub fn total_grid_capacity(&self) -> usize {
        self.halls.iter().map(Hall::grid_capacity).sum()
    }

    /// Total usable seats across all halls.
    #[inline]
    pub fn total_usable_capacity(&self) -> usize {
        self.halls.iter().map(Hall::usable_capacity).sum()
    }
}

impl std::fmt::Display for ExamModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExamModel(num_students: {}, num_halls: {})",
            self.num_students(),
            self.num_halls()
        )
    }
}

/// Collects students and halls and checks identifiers before producing an
/// [`ExamModel`].
///
/// The builder checks what every later stage relies on: identifiers are
/// non-empty and unique, and every hall has at least one row and one column.
/// Capacity consistency is a separate concern handled by
/// [`crate::validation::validate_capacity`] right before allocation.
///
/// # Examples
///
/// ```rust
/// # use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};
/// let mut builder = ExamModelBuilder::new();
/// builder
///     .add_hall(Hall::new("H1", 2, 2))
///     .add_student(Student::new("1", "CSE", "CS101", "Programming"))
///     .add_student(Student::new("2", "CSE", "CS101", "Programming"));
/// let model = builder.build().unwrap();
/// assert_eq!(model.num_students(), 2);
/// assert_eq!(model.num_halls(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExamModelBuilder {
    students: Vec<Student>,
    halls: Vec<Hall>,
}

impl ExamModelBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for the given number of halls and students.
    #[inline]
    pub fn with_capacity(num_halls: usize, num_students: usize) -> Self {
        Self {
            students: Vec::with_capacity(num_students),
            halls: Vec::with_capacity(num_halls),
        }
    }

    /// Returns the number of students added so far.
    #[inline]
    pub fn num_students(&self) -> usize {
        self.students.len()
    }

    /// Returns the number of halls added so far.
    #[inline]
    pub fn num_halls(&self) -> usize {
        self.halls.len()
    }

    /// Appends a student.
    #[inline]
    pub fn add_student(&mut self, student: Student) -> &mut Self {
        self.students.push(student);
        self
    }

    /// Appends every student yielded by `students`.
    #[inline]
    pub fn add_students<I>(&mut self, students: I) -> &mut Self
    where
        I: IntoIterator<Item = Student>,
    {
        self.students.extend(students);
        self
    }

    /// Appends a hall.
    #[inline]
    pub fn add_hall(&mut self, hall: Hall) -> &mut Self {
        self.halls.push(hall);
        self
    }

    /// Appends every hall yielded by `halls`.
    #[inline]
    pub fn add_halls<I>(&mut self, halls: I) -> &mut Self
    where
        I: IntoIterator<Item = Hall>,
    {
        self.halls.extend(halls);
        self
    }

    /// Checks identifiers and grids, then freezes the model.
    pub fn build(self) -> Result<ExamModel, ModelError> {
        let mut student_lookup =
            FxHashMap::with_capacity_and_hasher(self.students.len(), Default::default());
        for (position, student) in self.students.iter().enumerate() {
            let registration_id = student.registration_id();
            if registration_id.trim().is_empty() {
                return Err(ModelError::EmptyRegistrationId { position });
            }
            if student.course_code().trim().is_empty() {
                return Err(ModelError::EmptyCourseCode {
                    registration_id: registration_id.to_owned(),
                });
            }
            if student_lookup
                .insert(registration_id.to_owned(), StudentIndex::new(position))
                .is_some()
            {
                return Err(ModelError::DuplicateRegistrationId(
                    registration_id.to_owned(),
                ));
            }
        }

        let mut hall_lookup =
            FxHashMap::with_capacity_and_hasher(self.halls.len(), Default::default());
        for (position, hall) in self.halls.iter().enumerate() {
            if hall.code().trim().is_empty() {
                return Err(ModelError::EmptyHallCode { position });
            }
            if hall.rows() == 0 || hall.cols() == 0 {
                return Err(ModelError::EmptyGrid {
                    hall_code: hall.code().to_owned(),
                    rows: hall.rows(),
                    cols: hall.cols(),
                });
            }
            if hall_lookup
                .insert(hall.code().to_owned(), HallIndex::new(position))
                .is_some()
            {
                return Err(ModelError::DuplicateHallCode(hall.code().to_owned()));
            }
        }

        Ok(ExamModel {
            students: self.students,
            halls: self.halls,
            student_lookup,
            hall_lookup,
        })
    }
}
