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

//! Interleaved packing.
//!
//! Fills one hall up to its target by letting the courses in an
//! [`ActiveWindow`] take turns. Neighbouring seats then go to students of
//! different papers wherever more than one course is left.
//!
//! Each hall opens a fresh window seeded with the largest courses that still
//! have students. When the course whose turn it is has run dry, it is retired
//! and the largest remaining course outside the window takes its place. If
//! no course is left to admit the window shrinks; once it is empty the hall
//! stops short of its target.

use crate::{config::InterleavePattern, grouping::CourseQueues, window::ActiveWindow};
use invigil_model::{
    index::{CourseIndex, HallIndex, StudentIndex},
    model::ExamModel,
};

/// The students chosen for one hall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedHall {
    hall: HallIndex,
    target: usize,
    students: Vec<StudentIndex>,
    courses: Vec<CourseIndex>,
    admissions: usize,
}

impl PackedHall {
    #[inline]
    pub fn hall(&self) -> HallIndex {
        self.hall
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Packed students, sorted by registration number.
    #[inline]
    pub fn students(&self) -> &[StudentIndex] {
        &self.students
    }

    /// Courses with at least one packed student, in order of first placement.
    #[inline]
    pub fn courses(&self) -> &[CourseIndex] {
        &self.courses
    }

    /// Number of courses admitted to the window while packing this hall.
    #[inline]
    pub fn admissions(&self) -> usize {
        self.admissions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Seats of the target that stayed empty.
    #[inline]
    pub fn shortfall(&self) -> usize {
        self.target - self.students.len()
    }
}

impl std::fmt::Display for PackedHall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PackedHall({}, students: {}/{}, courses: {})",
            self.hall,
            self.students.len(),
            self.target,
            self.courses.len()
        )
    }
}

/// Packs halls one after another from shared course queues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packer {
    window_size: usize,
    pattern: InterleavePattern,
}

impl Packer {
    #[inline]
    pub fn new(window_size: usize, pattern: InterleavePattern) -> Self {
        Self {
            window_size,
            pattern,
        }
    }

    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[inline]
    pub fn pattern(&self) -> InterleavePattern {
        self.pattern
    }

    /// Takes up to `target` students for `hall` out of `queues`.
    pub fn pack_hall(
        &self,
        model: &ExamModel,
        hall: HallIndex,
        target: usize,
        queues: &mut CourseQueues,
    ) -> PackedHall {
        let mut window = ActiveWindow::new(self.window_size, self.pattern);
        let mut students = Vec::with_capacity(target);
        let mut courses: Vec<CourseIndex> = Vec::new();
        let mut admissions = 0usize;

        if target > 0 {
            while !window.is_full() {
                match queues.next_available(|c| window.contains(c)) {
                    Some(course) => {
                        window.admit(course);
                        admissions += 1;
                    }
                    None => break,
                }
            }
        }

        while students.len() < target {
            let Some(course) = window.current() else {
                break;
            };

            match queues.pop_front(course) {
                Some(student) => {
                    students.push(student);
                    if !courses.contains(&course) {
                        courses.push(course);
                    }
                    window.advance();
                }
                None => {
                    window.retire_current();
                    if let Some(next) = queues.next_available(|c| window.contains(c)) {
                        window.admit(next);
                        admissions += 1;
                    }
                }
            }
        }

        students.sort_by(|&a, &b| {
            model
                .student(a)
                .registration_key()
                .cmp(&model.student(b).registration_key())
        });

        PackedHall {
            hall,
            target,
            students,
            courses,
            admissions,
        }
    }
}

impl Default for Packer {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_WINDOW_SIZE,
            InterleavePattern::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::CourseGroups;
    use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};

    fn model(courses: &[(&str, usize)]) -> ExamModel {
        let mut builder = ExamModelBuilder::new();
        builder.add_hall(Hall::new("H1", 10, 10));
        let mut next_id = 1;
        for (code, size) in courses {
            for _ in 0..*size {
                builder.add_student(Student::new(next_id.to_string(), "CSE", *code, *code));
                next_id += 1;
            }
        }
        builder.build().expect("valid model")
    }

    /// Course code of every packed student.
    fn packed_courses(model: &ExamModel, packer: Packer, target: usize) -> Vec<String> {
        let groups = CourseGroups::from_model(model);
        let mut queues = CourseQueues::new(&groups);
        let packed = packer.pack_hall(model, HallIndex::new(0), target, &mut queues);
        packed
            .students()
            .iter()
            .map(|&s| model.student(s).course_code().to_owned())
            .collect()
    }

    #[test]
    fn test_round_robin_takes_from_both_courses() {
        let m = model(&[("A", 5), ("B", 5)]);
        let order = packed_courses(&m, Packer::new(2, InterleavePattern::RoundRobin), 6);
        assert_eq!(order.iter().filter(|c| *c == "A").count(), 3);
        assert_eq!(order.iter().filter(|c| *c == "B").count(), 3);
    }

    #[test]
    fn test_lead_weighted_gives_front_course_half() {
        let m = model(&[("A", 10), ("B", 10), ("C", 10)]);
        let order = packed_courses(&m, Packer::new(3, InterleavePattern::LeadWeighted), 8);
        assert_eq!(order.iter().filter(|c| *c == "A").count(), 4);
        assert_eq!(order.iter().filter(|c| *c == "B").count(), 2);
        assert_eq!(order.iter().filter(|c| *c == "C").count(), 2);
    }

    #[test]
    fn test_exhausted_course_is_replaced() {
        // Ranks: A(4), B(2), C(1). Window of two starts with A and B.
        let m = model(&[("A", 4), ("B", 2), ("C", 1)]);
        let groups = CourseGroups::from_model(&m);
        let mut queues = CourseQueues::new(&groups);
        let packed = Packer::default().pack_hall(&m, HallIndex::new(0), 7, &mut queues);

        assert_eq!(packed.len(), 7);
        assert_eq!(packed.shortfall(), 0);
        assert_eq!(packed.admissions(), 3);
        assert_eq!(
            packed.courses(),
            &[CourseIndex::new(0), CourseIndex::new(1), CourseIndex::new(2)]
        );
        assert_eq!(queues.remaining(), 0);
    }

    #[test]
    fn test_students_sorted_by_registration() {
        let m = model(&[("A", 3), ("B", 3)]);
        let groups = CourseGroups::from_model(&m);
        let mut queues = CourseQueues::new(&groups);
        let packed = Packer::default().pack_hall(&m, HallIndex::new(0), 4, &mut queues);
        let ids: Vec<&str> = packed
            .students()
            .iter()
            .map(|&s| m.student(s).registration_id())
            .collect();
        // A contributes 1, 2 and B contributes 4, 5.
        assert_eq!(ids, vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_hall_stays_short_when_students_run_out() {
        let m = model(&[("A", 2)]);
        let groups = CourseGroups::from_model(&m);
        let mut queues = CourseQueues::new(&groups);
        let packed = Packer::default().pack_hall(&m, HallIndex::new(0), 5, &mut queues);
        assert_eq!(packed.len(), 2);
        assert_eq!(packed.shortfall(), 3);
    }

    #[test]
    fn test_zero_target_packs_nothing() {
        let m = model(&[("A", 2)]);
        let groups = CourseGroups::from_model(&m);
        let mut queues = CourseQueues::new(&groups);
        let packed = Packer::default().pack_hall(&m, HallIndex::new(0), 0, &mut queues);
        assert!(packed.is_empty());
        assert!(packed.courses().is_empty());
        assert_eq!(packed.admissions(), 0);
        assert_eq!(queues.remaining(), 2);
    }

    #[test]
    fn test_later_hall_continues_from_queues() {
        let m = model(&[("A", 3), ("B", 1)]);
        let groups = CourseGroups::from_model(&m);
        let mut queues = CourseQueues::new(&groups);
        let packer = Packer::default();
        let first = packer.pack_hall(&m, HallIndex::new(0), 2, &mut queues);
        assert_eq!(first.courses().len(), 2);
        let second = packer.pack_hall(&m, HallIndex::new(0), 2, &mut queues);
        assert_eq!(second.courses(), &[CourseIndex::new(0)]);
        assert_eq!(queues.remaining(), 0);
    }
}
