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

//! Allocation monitoring interface
//!
//! Declares the `AllocationMonitor` trait for observing an allocation run.
//! Monitors only watch; they cannot steer the run.
//!
//! Lifecycle
//! - enter -> halls selected -> hall packed (once per selected hall) ->
//!   leftover placed (first-fit pass only) -> exit
//! - `on_exit_allocation` fires for failed runs as well, with the statistics
//!   gathered up to the failure.
//!
//! Methods take `&mut self`; a run drives its monitors from one thread.

use crate::{
    config::AllocationConfig, packing::PackedHall, plan::Seat, selection::SelectedHalls,
    stats::AllocationStatistics,
};
use invigil_model::{hall::Hall, model::ExamModel, student::Student};

/// Observer of the phases of an allocation run.
pub trait AllocationMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before validation, with the configuration of the run.
    fn on_enter_allocation(&mut self, model: &ExamModel, config: &AllocationConfig);

    /// Called when the halls for the run have been selected.
    fn on_halls_selected(&mut self, model: &ExamModel, selection: &SelectedHalls);

    /// Called when a selected hall has been packed and laid out.
    fn on_hall_packed(&mut self, hall: &Hall, packed: &PackedHall);

    /// Called when the first-fit pass seats a leftover student.
    fn on_leftover_placed(&mut self, student: &Student, hall: &Hall, seat: Seat);

    /// Called once when the run ends, successful or not.
    fn on_exit_allocation(&mut self, statistics: &AllocationStatistics);
}

impl std::fmt::Debug for dyn AllocationMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn AllocationMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllocationMonitor({})", self.name())
    }
}

impl<M> AllocationMonitor for &mut M
where
    M: AllocationMonitor + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_allocation(&mut self, model: &ExamModel, config: &AllocationConfig) {
        (**self).on_enter_allocation(model, config);
    }

    #[inline]
    fn on_halls_selected(&mut self, model: &ExamModel, selection: &SelectedHalls) {
        (**self).on_halls_selected(model, selection);
    }

    #[inline]
    fn on_hall_packed(&mut self, hall: &Hall, packed: &PackedHall) {
        (**self).on_hall_packed(hall, packed);
    }

    #[inline]
    fn on_leftover_placed(&mut self, student: &Student, hall: &Hall, seat: Seat) {
        (**self).on_leftover_placed(student, hall, seat);
    }

    #[inline]
    fn on_exit_allocation(&mut self, statistics: &AllocationStatistics) {
        (**self).on_exit_allocation(statistics);
    }
}
