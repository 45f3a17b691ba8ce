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

//! Proportional seat targets.
//!
//! Each selected hall receives `floor(cap * students / total_cap)` students,
//! computed in integer arithmetic. The seats lost to rounding are then handed
//! out one at a time in declared order, skipping full halls and wrapping
//! around, until every student has a target.

use invigil_model::{index::HallIndex, model::ExamModel};

/// Per-hall seat targets, in declared hall order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HallTargets {
    entries: Vec<(HallIndex, usize)>,
}

impl HallTargets {
    /// Iterates over `(hall, target)` pairs in declared order.
    #[inline]
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (HallIndex, usize)> + ExactSizeIterator + '_ {
        self.entries.iter().copied()
    }

    /// Returns the target of `hall_index`, or `None` if the hall was not selected.
    #[inline]
    pub fn target(&self, hall_index: HallIndex) -> Option<usize> {
        self.entries
            .iter()
            .find(|(hall, _)| *hall == hall_index)
            .map(|&(_, target)| target)
    }

    /// Sum of all targets.
    #[inline]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, target)| target).sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for HallTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HallTargets(")?;
        for (i, (hall, target)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", hall, target)?;
        }
        write!(f, ")")
    }
}

/// Splits `students` over `halls` in proportion to usable capacity.
///
/// `halls` must be in declared order. When the halls hold fewer seats than
/// `students`, every hall is filled and the rest stays without a target.
///
/// # Examples
///
/// ```rust
/// # use invigil_model::{hall::Hall, index::HallIndex, model::ExamModelBuilder};
/// # use invigil_alloc::distribution::distribute;
/// let mut builder = ExamModelBuilder::new();
/// builder
///     .add_hall(Hall::new("A", 2, 5))
///     .add_hall(Hall::new("B", 2, 5))
///     .add_hall(Hall::new("C", 2, 5));
/// let model = builder.build().unwrap();
/// let halls: Vec<HallIndex> = model.hall_indices().collect();
///
/// // 10 * 10 / 30 = 3 each, the remaining seat goes to the first hall.
/// let targets = distribute(&model, &halls, 10);
/// let split: Vec<usize> = targets.iter().map(|(_, t)| t).collect();
/// assert_eq!(split, vec![4, 3, 3]);
/// ```
pub fn distribute(model: &ExamModel, halls: &[HallIndex], students: usize) -> HallTargets {
    debug_assert!(
        halls.windows(2).all(|w| w[0] < w[1]),
        "called `distribute` with halls that are not in declared order"
    );

    let capacities: Vec<usize> = halls
        .iter()
        .map(|&h| model.hall(h).usable_capacity())
        .collect();
    let total_capacity: usize = capacities.iter().sum();

    let mut targets: Vec<usize> = if total_capacity == 0 {
        vec![0; halls.len()]
    } else {
        capacities
            .iter()
            .map(|&capacity| {
                let share = capacity as u128 * students as u128 / total_capacity as u128;
                share as usize
            })
            .collect()
    };

    let mut residual = students.min(total_capacity) - targets.iter().sum::<usize>();
    while residual > 0 {
        let mut progressed = false;
        for (target, &capacity) in targets.iter_mut().zip(&capacities) {
            if residual == 0 {
                break;
            }
            if *target < capacity {
                *target += 1;
                residual -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    HallTargets {
        entries: halls.iter().copied().zip(targets).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invigil_model::{hall::Hall, model::ExamModelBuilder};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn model(capacities: &[usize]) -> ExamModel {
        let mut builder = ExamModelBuilder::new();
        for (i, &capacity) in capacities.iter().enumerate() {
            builder.add_hall(
                Hall::new(format!("H{i}"), 10, 10).with_declared_capacity(capacity),
            );
        }
        builder.build().expect("valid model")
    }

    fn split(targets: &HallTargets) -> Vec<usize> {
        targets.iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn test_exact_proportions() {
        let m = model(&[10, 30]);
        let halls: Vec<HallIndex> = m.hall_indices().collect();
        let targets = distribute(&m, &halls, 20);
        assert_eq!(split(&targets), vec![5, 15]);
        assert_eq!(targets.total(), 20);
        assert_eq!(targets.target(HallIndex::new(1)), Some(15));
    }

    #[test]
    fn test_residual_skips_full_halls() {
        // Floors are 3 and 2; the residual seat cannot go to the full hall 0.
        let m = model(&[3, 3]);
        let halls: Vec<HallIndex> = m.hall_indices().collect();
        let targets = distribute(&m, &halls, 6);
        assert_eq!(split(&targets), vec![3, 3]);

        let m = model(&[1, 7]);
        let halls: Vec<HallIndex> = m.hall_indices().collect();
        let targets = distribute(&m, &halls, 7);
        // 1*7/8 = 0, 7*7/8 = 6; one residual seat goes to the first hall.
        assert_eq!(split(&targets), vec![1, 6]);
    }

    #[test]
    fn test_subset_of_halls() {
        let m = model(&[10, 10, 10]);
        let targets = distribute(&m, &[HallIndex::new(0), HallIndex::new(2)], 5);
        assert_eq!(split(&targets), vec![3, 2]);
        assert_eq!(targets.target(HallIndex::new(1)), None);
    }

    #[test]
    fn test_no_halls_no_students() {
        let m = model(&[]);
        let targets = distribute(&m, &[], 0);
        assert!(targets.is_empty());
        assert_eq!(targets.total(), 0);
    }

    #[test]
    fn test_targets_sum_to_students_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        for _ in 0..500 {
            let num_halls = rng.random_range(1..=12);
            let capacities: Vec<usize> = (0..num_halls).map(|_| rng.random_range(0..=60)).collect();
            let m = model(&capacities);
            let halls: Vec<HallIndex> = m.hall_indices().collect();
            let total: usize = capacities.iter().sum();
            let students = rng.random_range(0..=total);

            let targets = distribute(&m, &halls, students);
            assert_eq!(targets.total(), students, "capacities {:?}", capacities);
            for (hall, target) in targets.iter() {
                assert!(target <= m.hall(hall).usable_capacity());
            }
        }
    }
}
