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

//! Hall selection.
//!
//! Decides which halls take part in a run. Both policies only look at usable
//! capacity and never pick a hall that cannot seat anyone. Whatever order the
//! halls were accumulated in, the selection is handed on in declared order.

use crate::{
    config::{HallOrder, HallSelection},
    error::InsufficientCapacityError,
};
use invigil_model::{index::HallIndex, model::ExamModel};

/// Halls chosen for a run, in declared order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedHalls {
    halls: Vec<HallIndex>,
    capacity: usize,
    required: usize,
}

impl SelectedHalls {
    #[inline]
    pub fn halls(&self) -> &[HallIndex] {
        &self.halls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.halls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.halls.is_empty()
    }

    /// Combined usable capacity of the selected halls.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The threshold the policy aimed for. For block-quantized selection this
    /// is the rounded need, which may exceed `capacity()` when even all halls
    /// together cannot reach it.
    #[inline]
    pub fn required(&self) -> usize {
        self.required
    }

    #[inline]
    pub fn contains(&self, hall_index: HallIndex) -> bool {
        self.halls.binary_search(&hall_index).is_ok()
    }
}

impl std::fmt::Display for SelectedHalls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SelectedHalls(halls: {}, capacity: {}, required: {})",
            self.halls.len(),
            self.capacity,
            self.required
        )
    }
}

/// Rounds `students` up to the next multiple of `block_size`.
///
/// ```rust
/// # use invigil_alloc::selection::rounded_need;
/// assert_eq!(rounded_need(0, 25), 0);
/// assert_eq!(rounded_need(1, 25), 25);
/// assert_eq!(rounded_need(50, 25), 50);
/// assert_eq!(rounded_need(51, 25), 75);
/// ```
#[inline]
pub fn rounded_need(students: usize, block_size: usize) -> usize {
    assert!(
        block_size > 0,
        "called `rounded_need` with a block size of zero"
    );
    students.div_ceil(block_size) * block_size
}

/// Picks the halls for seating every student of `model` under `policy`.
pub fn select_halls(
    model: &ExamModel,
    policy: HallSelection,
) -> Result<SelectedHalls, InsufficientCapacityError> {
    let students = model.num_students();
    match policy {
        HallSelection::ExactNeed { order } => {
            let candidates = ordered_candidates(model, order);
            accumulate(model, candidates, students, students)
        }
        HallSelection::BlockQuantized { block_size } => {
            let need = rounded_need(students, block_size);
            let candidates = ordered_candidates(model, HallOrder::CapacityDescending);
            accumulate(model, candidates, need, students)
        }
    }
}

/// Halls with room for at least one student, in accumulation order.
fn ordered_candidates(model: &ExamModel, order: HallOrder) -> Vec<HallIndex> {
    let mut candidates: Vec<HallIndex> = model
        .hall_indices()
        .filter(|&h| model.hall(h).usable_capacity() > 0)
        .collect();

    if order == HallOrder::CapacityDescending {
        // Stable: ties keep declared order.
        candidates.sort_by(|&a, &b| {
            model
                .hall(b)
                .usable_capacity()
                .cmp(&model.hall(a).usable_capacity())
        });
    }
    candidates
}

/// Takes candidates until `target` seats are reached. Running out of halls is
/// only an error when even `minimum` seats are out of reach.
fn accumulate(
    model: &ExamModel,
    candidates: Vec<HallIndex>,
    target: usize,
    minimum: usize,
) -> Result<SelectedHalls, InsufficientCapacityError> {
    let mut halls = Vec::new();
    let mut capacity = 0usize;

    for hall_index in candidates {
        if capacity >= target {
            break;
        }
        capacity += model.hall(hall_index).usable_capacity();
        halls.push(hall_index);
    }

    if capacity < minimum {
        return Err(InsufficientCapacityError::new(minimum, capacity));
    }

    halls.sort_unstable();
    Ok(SelectedHalls {
        halls,
        capacity,
        required: target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};

    fn model(halls: &[(&str, usize)], students: usize) -> ExamModel {
        let mut builder = ExamModelBuilder::new();
        for (code, capacity) in halls {
            builder.add_hall(Hall::new(*code, 10, 10).with_declared_capacity(*capacity));
        }
        for i in 0..students {
            builder.add_student(Student::new(i.to_string(), "CSE", "CS101", "Programming"));
        }
        builder.build().expect("valid model")
    }

    fn codes<'a>(model: &'a ExamModel, selected: &SelectedHalls) -> Vec<&'a str> {
        selected.halls().iter().map(|&h| model.hall(h).code()).collect()
    }

    #[test]
    fn test_exact_need_declared_order() {
        let m = model(&[("A", 10), ("B", 30), ("C", 20)], 35);
        let selected = select_halls(
            &m,
            HallSelection::ExactNeed {
                order: HallOrder::Declared,
            },
        )
        .expect("enough seats");
        assert_eq!(codes(&m, &selected), vec!["A", "B"]);
        assert_eq!(selected.capacity(), 40);
        assert_eq!(selected.required(), 35);
    }

    #[test]
    fn test_exact_need_capacity_descending_returns_declared_order() {
        let m = model(&[("A", 10), ("B", 30), ("C", 20)], 35);
        let selected = select_halls(
            &m,
            HallSelection::ExactNeed {
                order: HallOrder::CapacityDescending,
            },
        )
        .expect("enough seats");
        assert_eq!(codes(&m, &selected), vec!["B", "C"]);
        assert!(selected.contains(HallIndex::new(2)));
        assert!(!selected.contains(HallIndex::new(0)));
    }

    #[test]
    fn test_block_quantized_rounds_need_up() {
        // 30 students need 50 seats: B (40) alone is not enough, B + C is.
        let m = model(&[("A", 5), ("B", 40), ("C", 20), ("D", 20)], 30);
        let selected =
            select_halls(&m, HallSelection::BlockQuantized { block_size: 25 }).expect("enough");
        assert_eq!(codes(&m, &selected), vec!["B", "C"]);
        assert_eq!(selected.required(), 50);
        assert_eq!(selected.capacity(), 60);
    }

    #[test]
    fn test_block_quantized_ties_keep_declared_order() {
        let m = model(&[("A", 20), ("B", 20), ("C", 20)], 30);
        let selected =
            select_halls(&m, HallSelection::BlockQuantized { block_size: 25 }).expect("enough");
        assert_eq!(codes(&m, &selected), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_block_quantized_accepts_shortfall_covering_students() {
        // Rounded need is 50 but all halls together only reach 45.
        let m = model(&[("A", 25), ("B", 20)], 45);
        let selected =
            select_halls(&m, HallSelection::BlockQuantized { block_size: 25 }).expect("enough");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.capacity(), 45);
        assert_eq!(selected.required(), 50);
    }

    #[test]
    fn test_insufficient_capacity() {
        let m = model(&[("A", 5), ("B", 5)], 11);
        let err = select_halls(
            &m,
            HallSelection::ExactNeed {
                order: HallOrder::Declared,
            },
        )
        .unwrap_err();
        assert_eq!(err.required(), 11);
        assert_eq!(err.available(), 10);

        let err = select_halls(&m, HallSelection::BlockQuantized { block_size: 25 }).unwrap_err();
        assert_eq!(err.required(), 11);
    }

    #[test]
    fn test_zero_capacity_halls_are_never_selected() {
        let m = model(&[("Z", 0), ("A", 10)], 5);
        let selected = select_halls(
            &m,
            HallSelection::ExactNeed {
                order: HallOrder::Declared,
            },
        )
        .expect("enough");
        assert_eq!(codes(&m, &selected), vec!["A"]);
    }

    #[test]
    fn test_no_students_selects_nothing() {
        let m = model(&[("A", 10)], 0);
        let selected = select_halls(&m, HallSelection::default()).expect("trivial");
        assert!(selected.is_empty());
        assert_eq!(selected.capacity(), 0);
    }
}
