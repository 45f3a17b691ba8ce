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

//! The active course window.
//!
//! While a hall is being packed, only a handful of courses take turns. The
//! window holds those courses in admission order and keeps track of whose
//! turn it is. A course leaves the window when its queue runs dry, and the
//! next course is appended at the back.
//!
//! Turn order is a cycle over the window. Round-robin visits every slot once
//! per cycle. The lead-weighted pattern applies only while exactly three
//! courses are active and visits slots `[0, 0, 1, 2]`, giving the course in
//! front twice the seats of the others. With any other window length it
//! behaves like round-robin.

use crate::config::{InterleavePattern, MAX_WINDOW_SIZE};
use invigil_model::index::CourseIndex;
use smallvec::SmallVec;

/// Slot visited at each step of the lead-weighted cycle.
const LEAD_WEIGHTED_CYCLE: [usize; 4] = [0, 0, 1, 2];

/// A bounded, ordered set of courses taking turns.
#[derive(Clone, Debug)]
pub struct ActiveWindow {
    slots: SmallVec<[CourseIndex; MAX_WINDOW_SIZE]>,
    capacity: usize,
    pattern: InterleavePattern,
    step: usize,
}

impl ActiveWindow {
    /// Creates an empty window holding at most `capacity` courses.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not in `1..=MAX_WINDOW_SIZE`.
    pub fn new(capacity: usize, pattern: InterleavePattern) -> Self {
        assert!(
            (1..=MAX_WINDOW_SIZE).contains(&capacity),
            "called `ActiveWindow::new` with capacity {} outside 1..={}",
            capacity,
            MAX_WINDOW_SIZE
        );

        Self {
            slots: SmallVec::new(),
            capacity,
            pattern,
            step: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn pattern(&self) -> InterleavePattern {
        self.pattern
    }

    #[inline]
    pub fn contains(&self, course: CourseIndex) -> bool {
        self.slots.contains(&course)
    }

    /// Active courses in admission order.
    #[inline]
    pub fn courses(&self) -> &[CourseIndex] {
        &self.slots
    }

    /// Appends `course` at the back. Returns `false` and leaves the window
    /// untouched if it is full or already holds `course`.
    pub fn admit(&mut self, course: CourseIndex) -> bool {
        if self.is_full() || self.contains(course) {
            return false;
        }

        let slot = self.current_slot();
        self.slots.push(course);
        self.step = self.step_for_slot(slot.unwrap_or(0));
        true
    }

    /// The course whose turn it is.
    #[inline]
    pub fn current(&self) -> Option<CourseIndex> {
        self.current_slot().map(|slot| self.slots[slot])
    }

    /// Moves the turn on to the next step of the cycle.
    #[inline]
    pub fn advance(&mut self) {
        let cycle = self.cycle_len();
        if cycle > 0 {
            self.step = (self.step + 1) % cycle;
        }
    }

    /// Removes the current course. The turn passes to the course that moves
    /// into its slot, or to the front if the retired course was last.
    pub fn retire_current(&mut self) -> Option<CourseIndex> {
        let slot = self.current_slot()?;
        let retired = self.slots.remove(slot);
        let next = if slot < self.slots.len() { slot } else { 0 };
        self.step = self.step_for_slot(next);
        Some(retired)
    }

    #[inline]
    fn is_lead_weighted(&self) -> bool {
        self.pattern == InterleavePattern::LeadWeighted && self.slots.len() == 3
    }

    #[inline]
    fn cycle_len(&self) -> usize {
        if self.is_lead_weighted() {
            LEAD_WEIGHTED_CYCLE.len()
        } else {
            self.slots.len()
        }
    }

    #[inline]
    fn current_slot(&self) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        if self.is_lead_weighted() {
            Some(LEAD_WEIGHTED_CYCLE[self.step % LEAD_WEIGHTED_CYCLE.len()])
        } else {
            Some(self.step % self.slots.len())
        }
    }

    /// First cycle step that lands on `slot` under the current length.
    #[inline]
    fn step_for_slot(&self, slot: usize) -> usize {
        if self.is_lead_weighted() {
            LEAD_WEIGHTED_CYCLE
                .iter()
                .position(|&s| s == slot)
                .unwrap_or(0)
        } else {
            slot
        }
    }
}

impl std::fmt::Display for ActiveWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActiveWindow([")?;
        for (i, course) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", course.get())?;
        }
        write!(f, "], capacity: {}, pattern: {})", self.capacity, self.pattern)
    }
}
