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

use std::time::Duration;

/// Counters collected during one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationStatistics {
    /// Students in the model.
    pub students: usize,
    /// Students that received a seat.
    pub students_allocated: usize,
    /// Halls in the model.
    pub halls_considered: usize,
    /// Halls chosen by hall selection.
    pub halls_selected: usize,
    /// Halls holding at least one student at the end of the run.
    pub halls_used: usize,
    /// Students seated by the leftover pass.
    pub leftover_placements: usize,
    /// Courses admitted to an active window, summed over all halls.
    pub window_admissions: usize,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

impl AllocationStatistics {
    #[inline]
    pub fn on_student_allocated(&mut self) {
        self.students_allocated = self.students_allocated.saturating_add(1);
    }

    #[inline]
    pub fn on_leftover_placed(&mut self) {
        self.leftover_placements = self.leftover_placements.saturating_add(1);
    }

    #[inline]
    pub fn on_window_admissions(&mut self, admissions: usize) {
        self.window_admissions = self.window_admissions.saturating_add(admissions);
    }

    #[inline]
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Students left without a seat.
    #[inline]
    pub fn students_unallocated(&self) -> usize {
        self.students.saturating_sub(self.students_allocated)
    }
}

impl std::fmt::Display for AllocationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allocation Statistics:")?;
        writeln!(
            f,
            "  Students allocated:  {}/{}",
            self.students_allocated, self.students
        )?;
        writeln!(f, "  Halls considered:    {}", self.halls_considered)?;
        writeln!(f, "  Halls selected:      {}", self.halls_selected)?;
        writeln!(f, "  Halls used:          {}", self.halls_used)?;
        writeln!(f, "  Leftover placements: {}", self.leftover_placements)?;
        writeln!(f, "  Window admissions:   {}", self.window_admissions)?;
        writeln!(
            f,
            "  Duration (secs):     {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Builder for `AllocationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationStatisticsBuilder {
    statistics: AllocationStatistics,
}

impl AllocationStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn students(mut self, students: usize) -> Self {
        self.statistics.students = students;
        self
    }

    #[inline]
    pub fn students_allocated(mut self, students_allocated: usize) -> Self {
        self.statistics.students_allocated = students_allocated;
        self
    }

    #[inline]
    pub fn halls_considered(mut self, halls_considered: usize) -> Self {
        self.statistics.halls_considered = halls_considered;
        self
    }

    #[inline]
    pub fn halls_selected(mut self, halls_selected: usize) -> Self {
        self.statistics.halls_selected = halls_selected;
        self
    }

    #[inline]
    pub fn halls_used(mut self, halls_used: usize) -> Self {
        self.statistics.halls_used = halls_used;
        self
    }

    #[inline]
    pub fn leftover_placements(mut self, leftover_placements: usize) -> Self {
        self.statistics.leftover_placements = leftover_placements;
        self
    }

    #[inline]
    pub fn window_admissions(mut self, window_admissions: usize) -> Self {
        self.statistics.window_admissions = window_admissions;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.statistics.duration = duration;
        self
    }

    #[inline]
    pub fn build(self) -> AllocationStatistics {
        self.statistics
    }
}
