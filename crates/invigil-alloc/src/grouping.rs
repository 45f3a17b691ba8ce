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

//! Course grouping and per-course queues.
//!
//! Students sitting the same paper form a course. Courses are ranked by
//! descending size; equal sizes are ranked by course code. Inside a course,
//! members are ordered by registration number.

use invigil_model::{
    index::{CourseIndex, StudentIndex},
    model::ExamModel,
};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// One course and its members in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    code: String,
    title: String,
    members: Vec<StudentIndex>,
}

impl Course {
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Title of the first member listed for this course.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn members(&self) -> &[StudentIndex] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Course({}, students: {})", self.code, self.members.len())
    }
}

/// Courses of a model, ranked largest first.
///
/// `CourseIndex(0)` is the largest course.
#[derive(Clone, Debug)]
pub struct CourseGroups {
    courses: Vec<Course>,
    student_course: Vec<CourseIndex>,
}

impl CourseGroups {
    /// Groups the students of `model` by course code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};
    /// # use invigil_alloc::grouping::CourseGroups;
    /// let mut builder = ExamModelBuilder::new();
    /// builder
    ///     .add_hall(Hall::new("H1", 2, 2))
    ///     .add_student(Student::new("10", "CSE", "B", "Beta"))
    ///     .add_student(Student::new("9", "CSE", "A", "Alpha"))
    ///     .add_student(Student::new("2", "CSE", "A", "Alpha"));
    /// let model = builder.build().unwrap();
    /// let groups = CourseGroups::from_model(&model);
    /// let codes: Vec<&str> = groups.courses().iter().map(|c| c.code()).collect();
    /// assert_eq!(codes, vec!["A", "B"]);
    /// ```
    pub fn from_model(model: &ExamModel) -> Self {
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut courses: Vec<Course> = Vec::new();

        for student_index in model.student_indices() {
            let student = model.student(student_index);
            let position = *positions.entry(student.course_code()).or_insert_with(|| {
                courses.push(Course {
                    code: student.course_code().to_owned(),
                    title: student.course_title().to_owned(),
                    members: Vec::new(),
                });
                courses.len() - 1
            });
            courses[position].members.push(student_index);
        }

        for course in &mut courses {
            course.members.sort_by(|&a, &b| {
                model
                    .student(a)
                    .registration_key()
                    .cmp(&model.student(b).registration_key())
            });
        }

        courses.sort_by(|a, b| {
            b.members
                .len()
                .cmp(&a.members.len())
                .then_with(|| a.code.cmp(&b.code))
        });

        let mut student_course = vec![CourseIndex::new(0); model.num_students()];
        for (rank, course) in courses.iter().enumerate() {
            for &member in &course.members {
                student_course[member.get()] = CourseIndex::new(rank);
            }
        }

        Self {
            courses,
            student_course,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Returns the course at `course_index`.
    ///
    /// # Panics
    ///
    /// Panics if `course_index` is not in `0..len()`.
    #[inline]
    pub fn course(&self, course_index: CourseIndex) -> &Course {
        let index = course_index.get();
        debug_assert!(
            index < self.courses.len(),
            "called `CourseGroups::course` with course index out of bounds: the len is {} but the index is {}",
            self.courses.len(),
            index
        );

        &self.courses[index]
    }

    /// Returns the course `student_index` belongs to.
    #[inline]
    pub fn course_of(&self, student_index: StudentIndex) -> CourseIndex {
        let index = student_index.get();
        debug_assert!(
            index < self.student_course.len(),
            "called `CourseGroups::course_of` with student index out of bounds: the len is {} but the index is {}",
            self.student_course.len(),
            index
        );

        self.student_course[index]
    }

    /// Iterates over course indices in rank order.
    #[inline]
    pub fn course_indices(
        &self,
    ) -> impl DoubleEndedIterator<Item = CourseIndex> + ExactSizeIterator {
        CourseIndex::range(self.courses.len())
    }
}

/// Students not yet placed, one FIFO queue per course.
#[derive(Clone, Debug)]
pub struct CourseQueues {
    queues: Vec<VecDeque<StudentIndex>>,
    remaining: usize,
}

impl CourseQueues {
    /// Loads every course's members in registration order.
    pub fn new(groups: &CourseGroups) -> Self {
        let queues: Vec<VecDeque<StudentIndex>> = groups
            .courses()
            .iter()
            .map(|course| course.members().iter().copied().collect())
            .collect();
        let remaining = queues.iter().map(VecDeque::len).sum();

        Self { queues, remaining }
    }

    /// Takes the next student of `course_index`.
    #[inline]
    pub fn pop_front(&mut self, course_index: CourseIndex) -> Option<StudentIndex> {
        let student = self.queues[course_index.get()].pop_front()?;
        self.remaining -= 1;
        Some(student)
    }

    /// Students still waiting in `course_index`.
    #[inline]
    pub fn len(&self, course_index: CourseIndex) -> usize {
        self.queues[course_index.get()].len()
    }

    #[inline]
    pub fn is_exhausted(&self, course_index: CourseIndex) -> bool {
        self.queues[course_index.get()].is_empty()
    }

    /// Students still waiting across all courses.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns the highest-ranked course that still has students and is not
    /// rejected by `skip`.
    pub fn next_available<F>(&self, mut skip: F) -> Option<CourseIndex>
    where
        F: FnMut(CourseIndex) -> bool,
    {
        CourseIndex::range(self.queues.len())
            .find(|&course| !self.is_exhausted(course) && !skip(course))
    }

    /// Empties every queue, courses in rank order.
    pub fn drain_remaining(&mut self) -> Vec<StudentIndex> {
        let mut drained = Vec::with_capacity(self.remaining);
        for queue in &mut self.queues {
            drained.extend(queue.drain(..));
        }
        self.remaining = 0;
        drained
    }
}
