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
    config::AllocationConfig, monitor::allocation_monitor::AllocationMonitor, packing::PackedHall,
    plan::Seat, selection::SelectedHalls, stats::AllocationStatistics,
};
use invigil_model::{hall::Hall, model::ExamModel, student::Student};
use std::time::Instant;
use tracing::{debug, info};

/// Emits a `tracing` event for every phase of a run.
///
/// Run boundaries and the hall selection are logged at `info`, individual
/// halls and leftover placements at `debug`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    halls_packed: usize,
    leftovers: usize,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            halls_packed: 0,
            leftovers: 0,
        }
    }

    /// Halls reported since the current run started.
    #[inline]
    pub fn halls_packed(&self) -> usize {
        self.halls_packed
    }

    /// Leftover placements reported since the current run started.
    #[inline]
    pub fn leftovers(&self) -> usize {
        self.leftovers
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(halls_packed: {}, leftovers: {})",
            self.halls_packed, self.leftovers
        )
    }
}

impl AllocationMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_allocation(&mut self, model: &ExamModel, config: &AllocationConfig) {
        self.start_time = Instant::now();
        self.halls_packed = 0;
        self.leftovers = 0;
        info!(
            students = model.num_students(),
            halls = model.num_halls(),
            %config,
            "allocation started"
        );
    }

    fn on_halls_selected(&mut self, model: &ExamModel, selection: &SelectedHalls) {
        let codes: Vec<&str> = selection
            .halls()
            .iter()
            .map(|&h| model.hall(h).code())
            .collect();
        info!(
            selected = selection.len(),
            capacity = selection.capacity(),
            required = selection.required(),
            halls = %codes.join(", "),
            "halls selected"
        );
    }

    fn on_hall_packed(&mut self, hall: &Hall, packed: &PackedHall) {
        self.halls_packed += 1;
        debug!(
            hall = hall.code(),
            students = packed.len(),
            target = packed.target(),
            courses = packed.courses().len(),
            admissions = packed.admissions(),
            "hall packed"
        );
    }

    fn on_leftover_placed(&mut self, student: &Student, hall: &Hall, seat: Seat) {
        self.leftovers += 1;
        debug!(
            student = student.registration_id(),
            hall = hall.code(),
            row = seat.row(),
            col = seat.col(),
            "leftover placed"
        );
    }

    fn on_exit_allocation(&mut self, statistics: &AllocationStatistics) {
        info!(
            allocated = statistics.students_allocated,
            students = statistics.students,
            halls_used = statistics.halls_used,
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "allocation finished"
        );
    }
}
