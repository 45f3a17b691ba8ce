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

//! Per-hall summaries.
//!
//! A hall report carries everything printed on the hall's door sheet: the
//! header, the papers sat in the hall, the seat table with seat numbers and
//! the register-number ranges per paper and department.

use crate::{
    context::{ReportContext, Session, header_line},
    ranges::{RegistrationRange, compress_ranges, join_ranges},
    seat_numbers::SeatNumbering,
};
use invigil_alloc::plan::SeatingPlan;
use invigil_model::index::HallIndex;
use serde::Serialize;
use std::collections::BTreeMap;

/// One paper sat in a hall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CourseLine {
    pub course_code: String,
    pub course_title: String,
    pub count: usize,
}

/// One cell of the seat table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatCell {
    pub seat_number: usize,
    pub registration_id: Option<String>,
    pub course_code: Option<String>,
}

/// Students of one paper and department in a hall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupLine {
    pub course_code: String,
    pub department: String,
    pub ranges: Vec<RegistrationRange>,
    pub count: usize,
}

/// The door sheet of one hall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HallReport {
    pub hall_code: String,
    pub hall_name: String,
    pub block: String,
    pub exam_date: Option<String>,
    pub session: Option<Session>,
    pub courses: Vec<CourseLine>,
    pub seats: Vec<Vec<SeatCell>>,
    pub groups: Vec<GroupLine>,
    pub total: usize,
}

impl HallReport {
    /// Builds the report of `hall`, or `None` if it holds no students.
    pub fn build(
        plan: &SeatingPlan<'_>,
        numbering: &SeatNumbering,
        context: &ReportContext,
        hall: HallIndex,
    ) -> Option<Self> {
        let numbers = numbering.hall(hall)?;
        let model = plan.model();
        let hall_data = model.hall(hall);

        let mut courses: BTreeMap<&str, CourseLine> = BTreeMap::new();
        let mut groups: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
        for allocation in plan.allocations().filter(|a| a.seat().hall() == hall) {
            courses
                .entry(allocation.course_code())
                .or_insert_with(|| CourseLine {
                    course_code: allocation.course_code().to_owned(),
                    course_title: allocation.course_title().to_owned(),
                    count: 0,
                })
                .count += 1;
            groups
                .entry((allocation.course_code(), allocation.department()))
                .or_default()
                .push(allocation.registration_id());
        }

        let seats = plan
            .hall_seats(hall)
            .zip(numbers.rows())
            .map(|(cells, seat_numbers)| {
                cells
                    .iter()
                    .zip(seat_numbers)
                    .map(|(cell, &seat_number)| {
                        let student = cell.map(|s| model.student(s));
                        SeatCell {
                            seat_number,
                            registration_id: student.map(|s| s.registration_id().to_owned()),
                            course_code: student.map(|s| s.course_code().to_owned()),
                        }
                    })
                    .collect()
            })
            .collect();

        let groups: Vec<GroupLine> = groups
            .into_iter()
            .map(|((course_code, department), ids)| GroupLine {
                course_code: course_code.to_owned(),
                department: department.to_owned(),
                count: ids.len(),
                ranges: compress_ranges(ids),
            })
            .collect();
        let total = groups.iter().map(|g| g.count).sum();

        Some(Self {
            hall_code: hall_data.code().to_owned(),
            hall_name: hall_data.name().to_owned(),
            block: hall_data.block().to_owned(),
            exam_date: context.hall_date(plan, hall).map(str::to_owned),
            session: context.session(),
            courses: courses.into_values().collect(),
            seats,
            groups,
            total,
        })
    }

    /// Reports of all occupied halls, in declared order.
    pub fn build_all(plan: &SeatingPlan<'_>, context: &ReportContext) -> Vec<Self> {
        let numbering = SeatNumbering::new(plan);
        plan.model()
            .hall_indices()
            .filter_map(|hall| Self::build(plan, &numbering, context, hall))
            .collect()
    }
}

impl std::fmt::Display for HallReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Block: {} | Hall Code: {}", self.block, self.hall_code)?;
        writeln!(f, "Hall: {}", self.hall_name)?;
        writeln!(f, "{}", header_line(self.exam_date.as_deref(), self.session))?;

        writeln!(f, "Courses:")?;
        for course in &self.courses {
            writeln!(
                f,
                "  {} {} ({})",
                course.course_code, course.course_title, course.count
            )?;
        }

        writeln!(f, "Seats:")?;
        for row in &self.seats {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| {
                    format!(
                        "{}:{}",
                        cell.seat_number,
                        cell.registration_id.as_deref().unwrap_or("-")
                    )
                })
                .collect();
            writeln!(f, "  {}", cells.join(" "))?;
        }

        writeln!(f, "Summary:")?;
        for group in &self.groups {
            writeln!(
                f,
                "  {} {} {} ({:02})",
                group.course_code,
                group.department,
                join_ranges(&group.ranges, 0),
                group.count
            )?;
        }
        write!(f, "Total: {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invigil_alloc::{allocator::AllocatorBuilder, config::Traversal};
    use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};

    fn model() -> invigil_model::model::ExamModel {
        let mut builder = ExamModelBuilder::new();
        builder
            .add_hall(Hall::new("LH-1", 2, 3).with_name("Lecture Hall 1").with_block("A"))
            .add_hall(Hall::new("LH-2", 1, 2).with_name("Lecture Hall 2").with_block("A"))
            .add_students([
                Student::new("101", "CSE", "CS101", "Programming").with_exam_date("19-11-2025"),
                Student::new("102", "CSE", "CS101", "Programming"),
                Student::new("103", "CSE", "CS101", "Programming"),
                Student::new("104", "IT", "CS101", "Programming"),
                Student::new("201", "ECE", "EC201", "Circuits"),
                Student::new("202", "ECE", "EC201", "Circuits"),
                Student::new("301", "ME", "ME301", "Statics"),
                Student::new("302", "ME", "ME301", "Statics"),
            ]);
        builder.build().expect("valid model")
    }

    #[test]
    fn test_hall_report_contents() {
        let m = model();
        let mut allocator = AllocatorBuilder::new()
            .with_traversal(Traversal::RowMajor)
            .build()
            .expect("valid config");
        let outcome = allocator.allocate(&m).expect("exact fit");
        let context = ReportContext::new().with_session(Session::Forenoon);
        let reports = HallReport::build_all(outcome.plan(), &context);
        assert_eq!(reports.len(), 2);

        let first = &reports[0];
        assert_eq!(first.hall_code, "LH-1");
        assert_eq!(first.exam_date.as_deref(), Some("19-11-2025"));
        assert_eq!(first.session, Some(Session::Forenoon));
        assert_eq!(first.total, 6);
        assert_eq!(first.seats.len(), 2);
        assert_eq!(first.seats[0][0].seat_number, 1);
        assert_eq!(first.seats[1][2].seat_number, 6);
        assert_eq!(
            first.courses.iter().map(|c| c.count).sum::<usize>(),
            first.total
        );

        let second = &reports[1];
        assert_eq!(second.seats[0][0].seat_number, 7);
        assert_eq!(second.total, 2);
        assert_eq!(first.total + second.total, m.num_students());

        for group in first.groups.iter().chain(&second.groups) {
            assert_eq!(group.ranges.iter().map(|r| r.len).sum::<usize>(), group.count);
        }
    }

    #[test]
    fn test_groups_compress_ranges() {
        let mut builder = ExamModelBuilder::new();
        builder.add_hall(Hall::new("H1", 2, 3));
        for id in ["1", "2", "3", "5"] {
            builder.add_student(Student::new(id, "CSE", "CS101", "Programming"));
        }
        builder.add_student(Student::new("9", "IT", "CS101", "Programming"));
        let m = builder.build().expect("valid model");
        let outcome = invigil_alloc::allocator::allocate_seats(&m).expect("enough seats");

        let numbering = SeatNumbering::new(outcome.plan());
        let report = HallReport::build(
            outcome.plan(),
            &numbering,
            &ReportContext::new(),
            HallIndex::new(0),
        )
        .expect("occupied");

        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].department, "CSE");
        assert_eq!(join_ranges(&report.groups[0].ranges, 0), "1-3, 5");
        assert_eq!(report.groups[1].department, "IT");
        assert_eq!(report.courses.len(), 1);
        assert_eq!(report.courses[0].count, 5);
        assert_eq!(report.exam_date, None);

        let rendered = report.to_string();
        assert!(rendered.contains("Block:  | Hall Code: H1"));
        assert!(rendered.contains("  CS101 CSE 1-3, 5 (04)"));
        assert!(rendered.contains("  1:1 2:2 3:3"));
        assert!(rendered.ends_with("Total: 5"));

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["total"], 5);
        assert_eq!(json["groups"][0]["ranges"][0]["start"], "1");
    }

    #[test]
    fn test_empty_hall_has_no_report() {
        let mut builder = ExamModelBuilder::new();
        builder
            .add_hall(Hall::new("H1", 1, 1))
            .add_hall(Hall::new("H2", 1, 1))
            .add_student(Student::new("1", "CSE", "CS101", "Programming"));
        let m = builder.build().expect("valid model");
        let outcome = invigil_alloc::allocator::allocate_seats(&m).expect("enough seats");
        let reports = HallReport::build_all(outcome.plan(), &ReportContext::new());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].hall_code, "H1");
    }
}
