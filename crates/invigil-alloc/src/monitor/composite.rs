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

/// A composite monitor that aggregates multiple monitors and forwards events
/// to all of them, in insertion order.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn AllocationMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new `CompositeMonitor` from a vector of boxed monitors.
    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn AllocationMonitor + 'a>>) -> Self {
        Self { monitors }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: AllocationMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn AllocationMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Names of the contained monitors, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a> FromIterator<Box<dyn AllocationMonitor + 'a>> for CompositeMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn AllocationMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl AllocationMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_allocation(&mut self, model: &ExamModel, config: &AllocationConfig) {
        for monitor in &mut self.monitors {
            monitor.on_enter_allocation(model, config);
        }
    }

    fn on_halls_selected(&mut self, model: &ExamModel, selection: &SelectedHalls) {
        for monitor in &mut self.monitors {
            monitor.on_halls_selected(model, selection);
        }
    }

    fn on_hall_packed(&mut self, hall: &Hall, packed: &PackedHall) {
        for monitor in &mut self.monitors {
            monitor.on_hall_packed(hall, packed);
        }
    }

    fn on_leftover_placed(&mut self, student: &Student, hall: &Hall, seat: Seat) {
        for monitor in &mut self.monitors {
            monitor.on_leftover_placed(student, hall, seat);
        }
    }

    fn on_exit_allocation(&mut self, statistics: &AllocationStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_allocation(statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOpMonitor;
    use std::{cell::RefCell, rc::Rc};

    /// Appends `"<label>:<event>"` to a shared journal.
    struct Recorder {
        label: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn record(&self, event: &str) {
            self.journal
                .borrow_mut()
                .push(format!("{}:{}", self.label, event));
        }
    }

    impl AllocationMonitor for Recorder {
        fn name(&self) -> &str {
            self.label
        }

        fn on_enter_allocation(&mut self, _model: &ExamModel, _config: &AllocationConfig) {
            self.record("enter");
        }

        fn on_halls_selected(&mut self, _model: &ExamModel, _selection: &SelectedHalls) {
            self.record("selected");
        }

        fn on_hall_packed(&mut self, _hall: &Hall, _packed: &PackedHall) {
            self.record("packed");
        }

        fn on_leftover_placed(&mut self, _student: &Student, _hall: &Hall, _seat: Seat) {
            self.record("leftover");
        }

        fn on_exit_allocation(&mut self, _statistics: &AllocationStatistics) {
            self.record("exit");
        }
    }

    #[test]
    fn test_forwards_in_insertion_order() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(Recorder {
            label: "a",
            journal: Rc::clone(&journal),
        });
        composite.add_monitor_boxed(Box::new(Recorder {
            label: "b",
            journal: Rc::clone(&journal),
        }));

        let model = invigil_model::model::ExamModelBuilder::new()
            .build()
            .expect("empty model");
        composite.on_enter_allocation(&model, &AllocationConfig::default());
        composite.on_exit_allocation(&AllocationStatistics::default());

        assert_eq!(
            *journal.borrow(),
            vec!["a:enter", "b:enter", "a:exit", "b:exit"]
        );
    }

    #[test]
    fn test_names_and_display() {
        let composite: CompositeMonitor<'_> = vec![
            Box::new(NoOpMonitor::new()) as Box<dyn AllocationMonitor>,
            Box::new(NoOpMonitor::new()) as Box<dyn AllocationMonitor>,
        ]
        .into_iter()
        .collect();
        assert_eq!(composite.len(), 2);
        assert_eq!(
            format!("{}", composite),
            "CompositeMonitor([NoOpMonitor, NoOpMonitor])"
        );
        assert!(CompositeMonitor::new().is_empty());
    }
}
