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

/// A monitor that ignores every event.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl AllocationMonitor for NoOpMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    #[inline(always)]
    fn on_enter_allocation(&mut self, _model: &ExamModel, _config: &AllocationConfig) {}

    #[inline(always)]
    fn on_halls_selected(&mut self, _model: &ExamModel, _selection: &SelectedHalls) {}

    #[inline(always)]
    fn on_hall_packed(&mut self, _hall: &Hall, _packed: &PackedHall) {}

    #[inline(always)]
    fn on_leftover_placed(&mut self, _student: &Student, _hall: &Hall, _seat: Seat) {}

    #[inline(always)]
    fn on_exit_allocation(&mut self, _statistics: &AllocationStatistics) {}
}
