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

//! Plain-text seating plan.
//!
//! ```text
//! Hall: Main Hall (H1, Block: A)
//! Courses: CS101, EC201
//! Row 1: 1 (CS101) 5 (EC201) -
//! ```

use invigil_alloc::plan::SeatingPlan;

/// Renders every hall that holds at least one student, in declared order.
#[derive(Clone, Copy, Debug)]
pub struct ConsolePlan<'p, 'a> {
    plan: &'p SeatingPlan<'a>,
}

impl<'p, 'a> ConsolePlan<'p, 'a> {
    #[inline]
    pub fn new(plan: &'p SeatingPlan<'a>) -> Self {
        Self { plan }
    }
}

impl std::fmt::Display for ConsolePlan<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let model = self.plan.model();
        let mut first = true;

        for seating in self.plan.hall_seatings() {
            if seating.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;

            let hall = model.hall(seating.hall());
            writeln!(
                f,
                "Hall: {} ({}, Block: {})",
                hall.name(),
                hall.code(),
                hall.block()
            )?;

            let courses = self.plan.hall_courses(seating.hall());
            if courses.is_empty() {
                writeln!(f, "Courses: -")?;
            } else {
                writeln!(f, "Courses: {}", courses.join(", "))?;
            }

            for (index, row) in self.plan.hall_seats(seating.hall()).enumerate() {
                write!(f, "Row {}:", index + 1)?;
                for cell in row {
                    match cell {
                        Some(student) => write!(f, " {}", model.student(*student))?,
                        None => write!(f, " -")?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invigil_alloc::{allocator::AllocatorBuilder, config::Traversal};
    use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};

    #[test]
    fn test_renders_occupied_halls_only() {
        let mut builder = ExamModelBuilder::new();
        builder
            .add_hall(Hall::new("H1", 2, 2).with_name("Main Hall").with_block("A"))
            .add_hall(Hall::new("H2", 1, 1).with_declared_capacity(0))
            .add_student(Student::new("1", "CSE", "CS101", "Programming"))
            .add_student(Student::new("2", "CSE", "CS101", "Programming"))
            .add_student(Student::new("5", "ECE", "EC201", "Circuits"));
        let model = builder.build().expect("valid model");

        let mut allocator = AllocatorBuilder::new()
            .with_traversal(Traversal::RowMajor)
            .build()
            .expect("valid config");
        let outcome = allocator.allocate(&model).expect("enough seats");

        let rendered = ConsolePlan::new(outcome.plan()).to_string();
        assert_eq!(
            rendered,
            "Hall: Main Hall (H1, Block: A)\n\
             Courses: CS101, EC201\n\
             Row 1: 1 (CS101) 2 (CS101)\n\
             Row 2: 5 (EC201) -\n"
        );
    }

    #[test]
    fn test_separates_halls_with_blank_line() {
        let mut builder = ExamModelBuilder::new();
        builder
            .add_hall(Hall::new("H1", 1, 1))
            .add_hall(Hall::new("H2", 1, 1))
            .add_student(Student::new("1", "CSE", "CS101", "Programming"))
            .add_student(Student::new("2", "CSE", "CS101", "Programming"));
        let model = builder.build().expect("valid model");
        let outcome = invigil_alloc::allocator::allocate_seats(&model).expect("exact fit");

        let rendered = ConsolePlan::new(outcome.plan()).to_string();
        assert_eq!(
            rendered,
            "Hall: H1 (H1, Block: )\nCourses: CS101\nRow 1: 1 (CS101)\n\n\
             Hall: H2 (H2, Block: )\nCourses: CS101\nRow 1: 2 (CS101)\n"
        );
    }
}
