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

//! The master seating summary.
//!
//! One table for the whole session: for each block, the halls in declared
//! order, and within each hall one row per department and paper with the
//! compressed register-number ranges seated there.

use crate::{
    context::{ReportContext, Session, header_line},
    ranges::{RegistrationRange, compress_ranges, join_ranges},
};
use invigil_alloc::plan::SeatingPlan;
use invigil_model::index::HallIndex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ranges printed per line in the master table.
const RANGES_PER_LINE: usize = 2;

/// One department and paper seated in one hall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MasterRow {
    pub hall_code: String,
    pub hall_name: String,
    pub department: String,
    pub course_code: String,
    pub ranges: Vec<RegistrationRange>,
    pub count: usize,
}

/// Number of students seated in one hall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HallTotal {
    pub hall_code: String,
    pub hall_name: String,
    pub total: usize,
}

/// The halls of one block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockSection {
    pub block: String,
    pub rows: Vec<MasterRow>,
    pub halls: Vec<HallTotal>,
    pub total: usize,
}

/// Students of one paper from one department across all halls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentTotal {
    pub department: String,
    pub course_code: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MasterReport {
    pub exam_date: Option<String>,
    pub session: Option<Session>,
    pub blocks: Vec<BlockSection>,
    pub departments: Vec<DepartmentTotal>,
    pub grand_total: usize,
}

impl MasterReport {
    pub fn build(plan: &SeatingPlan<'_>, context: &ReportContext) -> Self {
        let model = plan.model();

        // (hall, department, course) -> registration ids
        let mut seated: BTreeMap<(HallIndex, &str, &str), Vec<&str>> = BTreeMap::new();
        let mut departments: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for allocation in plan.allocations() {
            let key = (allocation.department(), allocation.course_code());
            seated
                .entry((allocation.seat().hall(), key.0, key.1))
                .or_default()
                .push(allocation.registration_id());
            *departments.entry(key).or_default() += 1;
        }

        let mut blocks: BTreeMap<&str, BlockSection> = BTreeMap::new();
        for hall_index in model.hall_indices() {
            let hall = model.hall(hall_index);
            let rows: Vec<MasterRow> = seated
                .range((hall_index, "", "")..)
                .take_while(|((h, _, _), _)| *h == hall_index)
                .map(|((_, department, course_code), ids)| MasterRow {
                    hall_code: hall.code().to_owned(),
                    hall_name: hall.name().to_owned(),
                    department: (*department).to_owned(),
                    course_code: (*course_code).to_owned(),
                    count: ids.len(),
                    ranges: compress_ranges(ids),
                })
                .collect();
            if rows.is_empty() {
                continue;
            }

            let total: usize = rows.iter().map(|r| r.count).sum();
            let section = blocks.entry(hall.block()).or_insert_with(|| BlockSection {
                block: hall.block().to_owned(),
                rows: Vec::new(),
                halls: Vec::new(),
                total: 0,
            });
            section.rows.extend(rows);
            section.halls.push(HallTotal {
                hall_code: hall.code().to_owned(),
                hall_name: hall.name().to_owned(),
                total,
            });
            section.total += total;
        }

        let blocks: Vec<BlockSection> = blocks.into_values().collect();
        let grand_total = blocks.iter().map(|b| b.total).sum();

        Self {
            exam_date: context.plan_date(plan).map(str::to_owned),
            session: context.session(),
            blocks,
            departments: departments
                .into_iter()
                .map(|((department, course_code), count)| DepartmentTotal {
                    department: department.to_owned(),
                    course_code: course_code.to_owned(),
                    count,
                })
                .collect(),
            grand_total,
        }
    }

    /// Totals of every occupied hall, block by block.
    pub fn hall_totals(&self) -> impl Iterator<Item = &HallTotal> + '_ {
        self.blocks.iter().flat_map(|b| b.halls.iter())
    }
}

impl std::fmt::Display for MasterReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Master Seating Plan")?;
        writeln!(f, "{}", header_line(self.exam_date.as_deref(), self.session))?;

        for block in &self.blocks {
            writeln!(f)?;
            writeln!(f, "Block: {}", block.block)?;
            for row in &block.rows {
                let ranges = join_ranges(&row.ranges, RANGES_PER_LINE).replace('\n', "\n    ");
                writeln!(
                    f,
                    "  {} | {} | {} | {} | {}",
                    row.hall_name, row.department, row.course_code, ranges, row.count
                )?;
            }
            for hall in &block.halls {
                writeln!(f, "  Total {}: {}", hall.hall_name, hall.total)?;
            }
            writeln!(f, "Block Total: {}", block.total)?;
        }

        writeln!(f)?;
        writeln!(f, "Department Totals:")?;
        for department in &self.departments {
            writeln!(
                f,
                "  {} {}: {}",
                department.department, department.course_code, department.count
            )?;
        }
        write!(f, "Grand Total: {}", self.grand_total)
    }
}
