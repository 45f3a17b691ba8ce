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

//! # Allocation Orchestrator
//!
//! Runs the full seat allocation pipeline on an [`ExamModel`]:
//!
//! 1. check the configuration and the hall capacities,
//! 2. group students by course and rank the courses,
//! 3. select halls and split the students over them in proportion to capacity,
//! 4. pack every selected hall through an active course window,
//! 5. lay the packed students out along the hall's walk,
//! 6. optionally seat leftovers first-fit.
//!
//! A run is synchronous and all-or-nothing: it either returns a complete
//! [`SeatingPlan`] with its statistics or an [`AllocationError`], in which
//! case no partial plan survives.
//!
//! ## Usage
//!
//! ```rust
//! use invigil_alloc::allocator::AllocatorBuilder;
//! use invigil_alloc::config::Traversal;
//! use invigil_model::{hall::Hall, model::ExamModelBuilder, student::Student};
//!
//! let mut builder = ExamModelBuilder::new();
//! builder.add_hall(Hall::new("H1", 2, 3));
//! for i in 1..=5 {
//!     builder.add_student(Student::new(i.to_string(), "CSE", "CS101", "Programming"));
//! }
//! let model = builder.build().unwrap();
//!
//! let mut allocator = AllocatorBuilder::new()
//!     .with_traversal(Traversal::RowMajor)
//!     .build()
//!     .unwrap();
//! let outcome = allocator.allocate(&model).unwrap();
//! let seat = outcome.plan().allocation("5").unwrap();
//! assert_eq!((seat.row(), seat.col()), (2, 2));
//! ```

use crate::{
    config::{
        AllocationConfig, ConfigError, HallSelection, InterleavePattern, LeftoverPolicy, Traversal,
    },
    distribution::distribute,
    error::{AllocationError, UnallocatedStudentsError},
    grid::GridWalk,
    grouping::{CourseGroups, CourseQueues},
    monitor::{allocation_monitor::AllocationMonitor, composite::CompositeMonitor},
    packing::Packer,
    plan::SeatingPlan,
    selection::select_halls,
    stats::AllocationStatistics,
};
use invigil_model::{index::StudentIndex, model::ExamModel, validation::validate_capacity};
use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct AllocationOutcome<'m> {
    plan: SeatingPlan<'m>,
    statistics: AllocationStatistics,
}

impl<'m> AllocationOutcome<'m> {
    #[inline]
    pub fn plan(&self) -> &SeatingPlan<'m> {
        &self.plan
    }

    #[inline]
    pub fn statistics(&self) -> &AllocationStatistics {
        &self.statistics
    }

    #[inline]
    pub fn into_plan(self) -> SeatingPlan<'m> {
        self.plan
    }

    #[inline]
    pub fn into_parts(self) -> (SeatingPlan<'m>, AllocationStatistics) {
        (self.plan, self.statistics)
    }
}

impl std::fmt::Display for AllocationOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.plan)?;
        write!(f, "{}", self.statistics)
    }
}

/// Seats every student of a model under one fixed configuration.
#[derive(Debug)]
pub struct Allocator<'a> {
    config: AllocationConfig,
    monitor: CompositeMonitor<'a>,
}

impl Default for Allocator<'_> {
    fn default() -> Self {
        Self {
            config: AllocationConfig::default(),
            monitor: CompositeMonitor::new(),
        }
    }
}

impl<'a> Allocator<'a> {
    #[inline]
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Runs the pipeline on `model`.
    pub fn allocate<'m>(
        &mut self,
        model: &'m ExamModel,
    ) -> Result<AllocationOutcome<'m>, AllocationError> {
        run(&self.config, model, &mut self.monitor)
    }

    /// Runs the pipeline on `model`, reporting to `monitor` after the
    /// allocator's own monitors.
    pub fn allocate_with<'m, M>(
        &mut self,
        model: &'m ExamModel,
        monitor: &mut M,
    ) -> Result<AllocationOutcome<'m>, AllocationError>
    where
        M: AllocationMonitor + ?Sized,
    {
        let mut tee = CompositeMonitor::with_capacity(2);
        tee.add_monitor(&mut self.monitor);
        tee.add_monitor(monitor);
        run(&self.config, model, &mut tee)
    }
}

/// Seats every student of `model` with the default configuration.
#[inline]
pub fn allocate_seats(model: &ExamModel) -> Result<AllocationOutcome<'_>, AllocationError> {
    Allocator::default().allocate(model)
}

fn run<'m, M>(
    config: &AllocationConfig,
    model: &'m ExamModel,
    monitor: &mut M,
) -> Result<AllocationOutcome<'m>, AllocationError>
where
    M: AllocationMonitor + ?Sized,
{
    let start_time = Instant::now();
    let mut statistics = AllocationStatistics {
        students: model.num_students(),
        halls_considered: model.num_halls(),
        ..Default::default()
    };

    monitor.on_enter_allocation(model, config);
    let result = execute(config, model, monitor, &mut statistics);
    statistics.set_duration(start_time.elapsed());
    monitor.on_exit_allocation(&statistics);

    match result {
        Ok(plan) => {
            info!(
                students = statistics.students,
                halls_used = statistics.halls_used,
                elapsed_ms = statistics.duration.as_millis() as u64,
                "seats allocated"
            );
            Ok(AllocationOutcome { plan, statistics })
        }
        Err(error) => {
            warn!(%error, "allocation failed");
            Err(error)
        }
    }
}

fn execute<'m, M>(
    config: &AllocationConfig,
    model: &'m ExamModel,
    monitor: &mut M,
    statistics: &mut AllocationStatistics,
) -> Result<SeatingPlan<'m>, AllocationError>
where
    M: AllocationMonitor + ?Sized,
{
    config.validate()?;
    let summary = validate_capacity(model)?;
    debug!(%summary, "capacity validated");

    let groups = CourseGroups::from_model(model);
    debug!(courses = groups.len(), "students grouped by course");

    let selection = select_halls(model, config.hall_selection)?;
    statistics.halls_selected = selection.len();
    monitor.on_halls_selected(model, &selection);

    let targets = distribute(model, selection.halls(), model.num_students());
    debug!(%targets, "seat targets distributed");

    let mut queues = CourseQueues::new(&groups);
    let mut plan = SeatingPlan::new(model, groups);
    let packer = Packer::new(config.window_size, config.pattern);
    let mut seated_bases: FxHashSet<&str> = FxHashSet::default();

    for (hall_index, target) in targets.iter() {
        let hall = model.hall(hall_index);
        let packed = packer.pack_hall(model, hall_index, target, &mut queues);
        statistics.on_window_admissions(packed.admissions());

        let flip_first_row = config.traversal == Traversal::Serpentine
            && config.continue_shared_base
            && seated_bases.contains(hall.base_code());
        let walk = GridWalk::new(hall.rows(), hall.cols(), config.traversal, flip_first_row);

        for (&student, (row, col)) in packed.students().iter().zip(walk.clone()) {
            plan.place(student, hall_index, row, col);
            statistics.on_student_allocated();
        }
        plan.set_walk(hall_index, walk);

        if !packed.is_empty() {
            seated_bases.insert(hall.base_code());
        }
        monitor.on_hall_packed(hall, &packed);
    }

    if queues.remaining() > 0 {
        let leftovers = queues.drain_remaining();
        debug!(count = leftovers.len(), policy = %config.leftover, "students left after packing");

        let unplaced = match config.leftover {
            LeftoverPolicy::Fail => leftovers,
            LeftoverPolicy::FirstFit => {
                place_first_fit(model, &mut plan, &leftovers, monitor, statistics)
            }
        };
        if !unplaced.is_empty() {
            return Err(unallocated(model, &unplaced).into());
        }
    }

    statistics.halls_used = plan
        .hall_seatings()
        .iter()
        .filter(|seating| !seating.is_empty())
        .count();
    Ok(plan)
}

/// Seats `leftovers` in the first free cell of each hall, halls in declared
/// order, never beyond a hall's usable capacity. Returns the students that
/// still have no seat.
fn place_first_fit<M>(
    model: &ExamModel,
    plan: &mut SeatingPlan<'_>,
    leftovers: &[StudentIndex],
    monitor: &mut M,
    statistics: &mut AllocationStatistics,
) -> Vec<StudentIndex>
where
    M: AllocationMonitor + ?Sized,
{
    let mut next = 0;
    for hall_index in model.hall_indices() {
        let hall = model.hall(hall_index);
        while next < leftovers.len() {
            let seating = plan.hall_seating(hall_index);
            if seating.occupied() >= hall.usable_capacity() {
                break;
            }
            let Some((row, col)) = seating.grid().first_empty() else {
                break;
            };

            let student = leftovers[next];
            let seat = plan.place(student, hall_index, row, col);
            statistics.on_student_allocated();
            statistics.on_leftover_placed();
            monitor.on_leftover_placed(model.student(student), hall, seat);
            next += 1;
        }
    }
    leftovers[next..].to_vec()
}

fn unallocated(model: &ExamModel, students: &[StudentIndex]) -> UnallocatedStudentsError {
    UnallocatedStudentsError::new(
        students
            .iter()
            .map(|&s| model.student(s).registration_id().to_owned())
            .collect(),
    )
}

/// Fluent construction of an [`Allocator`].
pub struct AllocatorBuilder<'a> {
    config: AllocationConfig,
    monitor: CompositeMonitor<'a>,
}

impl Default for AllocatorBuilder<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> AllocatorBuilder<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: AllocationConfig::default(),
            monitor: CompositeMonitor::new(),
        }
    }

    /// Replaces the whole configuration.
    #[inline]
    pub fn with_config(mut self, config: AllocationConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn with_hall_selection(mut self, hall_selection: HallSelection) -> Self {
        self.config.hall_selection = hall_selection;
        self
    }

    #[inline]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    #[inline]
    pub fn with_pattern(mut self, pattern: InterleavePattern) -> Self {
        self.config.pattern = pattern;
        self
    }

    #[inline]
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.config.traversal = traversal;
        self
    }

    #[inline]
    pub fn with_continue_shared_base(mut self, continue_shared_base: bool) -> Self {
        self.config.continue_shared_base = continue_shared_base;
        self
    }

    #[inline]
    pub fn with_leftover_policy(mut self, leftover: LeftoverPolicy) -> Self {
        self.config.leftover = leftover;
        self
    }

    #[inline]
    pub fn add_monitor<M>(mut self, monitor: M) -> Self
    where
        M: AllocationMonitor + 'a,
    {
        self.monitor.add_monitor(monitor);
        self
    }

    /// Checks the configuration and creates the allocator.
    #[inline]
    pub fn build(self) -> Result<Allocator<'a>, ConfigError> {
        self.config.validate()?;
        Ok(Allocator {
            config: self.config,
            monitor: self.monitor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::HallOrder, error::InsufficientCapacityError, monitor::log::LogMonitor};
    use invigil_model::{
        hall::Hall, index::HallIndex, model::ExamModelBuilder, student::Student,
        validation::CapacityError,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn model(halls: Vec<Hall>, courses: &[(&str, usize)]) -> ExamModel {
        let mut builder = ExamModelBuilder::new();
        builder.add_halls(halls);
        let mut next_id = 1;
        for (code, size) in courses {
            for _ in 0..*size {
                builder.add_student(Student::new(
                    format!("R{next_id:03}"),
                    "CSE",
                    *code,
                    format!("{code} title"),
                ));
                next_id += 1;
            }
        }
        builder.build().expect("valid model")
    }

    /// Every student sits in exactly one cell and every occupied cell
    /// matches the ledger.
    fn assert_consistent(plan: &SeatingPlan<'_>) {
        let model = plan.model();
        assert!(plan.is_complete());

        let mut seen = vec![0usize; model.num_students()];
        for seating in plan.hall_seatings() {
            let hall = model.hall(seating.hall());
            assert!(seating.occupied() <= hall.usable_capacity());
            for (r, row) in plan.hall_seats(seating.hall()).enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    if let Some(student) = cell {
                        seen[student.get()] += 1;
                        let seat = plan.seat(*student).expect("seated student");
                        assert_eq!(seat.hall(), seating.hall());
                        assert_eq!((seat.row(), seat.col()), (r + 1, c + 1));
                    }
                }
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "cell counts {:?}", seen);
    }

    #[test]
    fn test_end_to_end_three_courses_two_halls() {
        let m = model(
            vec![Hall::new("A", 2, 2), Hall::new("B", 2, 2)],
            &[("C1", 5), ("C2", 2), ("C3", 1)],
        );
        let outcome = allocate_seats(&m).expect("enough seats");
        let plan = outcome.plan();

        assert_consistent(plan);
        assert_eq!(plan.num_allocated(), 8);

        let mut codes: Vec<&str> = plan.hall_courses(HallIndex::new(0));
        codes.extend(plan.hall_courses(HallIndex::new(1)));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, vec!["C1", "C2", "C3"]);

        let stats = outcome.statistics();
        assert_eq!(stats.students, 8);
        assert_eq!(stats.students_allocated, 8);
        assert_eq!(stats.halls_considered, 2);
        assert_eq!(stats.halls_selected, 2);
        assert_eq!(stats.halls_used, 2);
        assert_eq!(stats.leftover_placements, 0);
    }

    #[test]
    fn test_exact_fit_succeeds() {
        let m = model(
            vec![Hall::new("A", 2, 2), Hall::new("B", 1, 3)],
            &[("C1", 4), ("C2", 3)],
        );
        let outcome = allocate_seats(&m).expect("exact fit");
        assert_consistent(outcome.plan());
        assert!(
            outcome
                .plan()
                .hall_seatings()
                .iter()
                .all(|s| s.grid().first_empty().is_none())
        );
    }

    #[test]
    fn test_capacity_errors_abort_before_seating() {
        let m = model(
            vec![Hall::new("A", 2, 2).with_declared_capacity(5)],
            &[("C1", 1)],
        );
        assert!(matches!(
            allocate_seats(&m),
            Err(AllocationError::Capacity(CapacityError::ExceedsGrid { .. }))
        ));

        let m = model(vec![Hall::new("A", 2, 2)], &[("C1", 5)]);
        assert!(matches!(
            allocate_seats(&m),
            Err(AllocationError::Capacity(
                CapacityError::InsufficientSeats {
                    seats: 4,
                    students: 5
                }
            ))
        ));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        assert_eq!(
            AllocatorBuilder::new().with_window_size(1).build().unwrap_err(),
            ConfigError::WindowSizeOutOfRange(1)
        );
        assert_eq!(
            AllocatorBuilder::new()
                .with_hall_selection(HallSelection::BlockQuantized { block_size: 0 })
                .build()
                .unwrap_err(),
            ConfigError::ZeroBlockSize
        );
    }

    #[test]
    fn test_serpentine_layout() {
        let m = model(vec![Hall::new("A", 3, 4)], &[("C1", 12)]);
        let outcome = allocate_seats(&m).expect("exact fit");
        let rows: Vec<Vec<usize>> = outcome
            .plan()
            .hall_seats(HallIndex::new(0))
            .map(|row| row.iter().map(|c| c.map(|s| s.get()).unwrap_or(usize::MAX)).collect())
            .collect();
        assert_eq!(
            rows,
            vec![vec![0, 1, 2, 3], vec![7, 6, 5, 4], vec![8, 9, 10, 11]]
        );
    }

    #[test]
    fn test_shared_base_flips_first_row() {
        let m = model(
            vec![
                Hall::new("X-1", 1, 3),
                Hall::new("Y-1", 1, 3),
                Hall::new("X-2", 1, 3),
            ],
            &[("C1", 9)],
        );
        let outcome = allocate_seats(&m).expect("exact fit");
        let plan = outcome.plan();
        assert!(!plan.hall_seating(HallIndex::new(0)).walk().flips_first_row());
        assert!(!plan.hall_seating(HallIndex::new(1)).walk().flips_first_row());
        assert!(plan.hall_seating(HallIndex::new(2)).walk().flips_first_row());

        let last: Vec<&str> = plan
            .hall_seats(HallIndex::new(2))
            .next()
            .expect("one row")
            .iter()
            .map(|c| m.student(c.expect("full hall")).registration_id())
            .collect();
        assert_eq!(last, vec!["R009", "R008", "R007"]);

        let mut allocator = AllocatorBuilder::new()
            .with_continue_shared_base(false)
            .build()
            .expect("valid config");
        let outcome = allocator.allocate(&m).expect("exact fit");
        assert!(
            !outcome
                .plan()
                .hall_seating(HallIndex::new(2))
                .walk()
                .flips_first_row()
        );
    }

    #[test]
    fn test_unselected_halls_stay_empty() {
        let m = model(
            vec![
                Hall::new("A", 2, 2),
                Hall::new("B", 5, 6),
                Hall::new("C", 1, 1),
            ],
            &[("C1", 10)],
        );
        let mut allocator = AllocatorBuilder::new()
            .with_hall_selection(HallSelection::ExactNeed {
                order: HallOrder::CapacityDescending,
            })
            .build()
            .expect("valid config");
        let outcome = allocator.allocate(&m).expect("enough seats");
        let plan = outcome.plan();
        assert_consistent(plan);
        assert!(plan.hall_seating(HallIndex::new(0)).is_empty());
        assert_eq!(plan.hall_seating(HallIndex::new(1)).occupied(), 10);
        assert_eq!(outcome.statistics().halls_used, 1);
    }

    #[test]
    fn test_first_fit_places_in_declared_order() {
        let m = model(
            vec![
                Hall::new("A", 1, 2).with_declared_capacity(1),
                Hall::new("B", 2, 2),
            ],
            &[("C1", 4)],
        );
        let groups = CourseGroups::from_model(&m);
        let mut plan = SeatingPlan::new(&m, groups);
        plan.place(StudentIndex::new(0), HallIndex::new(1), 0, 0);

        let leftovers = [StudentIndex::new(1), StudentIndex::new(2), StudentIndex::new(3)];
        let mut statistics = AllocationStatistics::default();
        let mut monitor = LogMonitor::new();
        let unplaced = place_first_fit(&m, &mut plan, &leftovers, &mut monitor, &mut statistics);

        assert!(unplaced.is_empty());
        assert_eq!(statistics.leftover_placements, 3);
        assert_eq!(monitor.leftovers(), 3);
        let seat = plan.seat(StudentIndex::new(1)).expect("seated");
        assert_eq!((seat.hall(), seat.row(), seat.col()), (HallIndex::new(0), 1, 1));
        let seat = plan.seat(StudentIndex::new(2)).expect("seated");
        assert_eq!((seat.hall(), seat.row(), seat.col()), (HallIndex::new(1), 1, 2));
        let seat = plan.seat(StudentIndex::new(3)).expect("seated");
        assert_eq!((seat.hall(), seat.row(), seat.col()), (HallIndex::new(1), 2, 1));
    }

    #[test]
    fn test_first_fit_reports_students_without_room() {
        let m = model(vec![Hall::new("A", 1, 1)], &[("C1", 1), ("C2", 2)]);
        let groups = CourseGroups::from_model(&m);
        let mut plan = SeatingPlan::new(&m, groups);
        let leftovers: Vec<StudentIndex> = m.student_indices().collect();
        let mut statistics = AllocationStatistics::default();
        let unplaced = place_first_fit(
            &m,
            &mut plan,
            &leftovers,
            &mut crate::monitor::no_op::NoOpMonitor::new(),
            &mut statistics,
        );
        assert_eq!(unplaced.len(), 2);

        let error = unallocated(&m, &unplaced);
        assert_eq!(error.count(), 2);
        assert_eq!(error.registration_ids(), &["R002".to_owned(), "R003".to_owned()]);
    }

    #[test]
    fn test_insufficient_capacity_error_converts() {
        let err: AllocationError = InsufficientCapacityError::new(10, 5).into();
        assert_eq!(
            err.to_string(),
            "selected halls provide 5 seats but 10 are required"
        );
    }

    #[test]
    fn test_identical_input_gives_identical_plan() {
        let m = model(
            vec![
                Hall::new("LH-1", 3, 5),
                Hall::new("LH-2", 3, 5),
                Hall::new("MAIN", 4, 6).with_declared_capacity(20),
            ],
            &[("C1", 17), ("C2", 11), ("C3", 9), ("C4", 4)],
        );
        let first = allocate_seats(&m).expect("enough seats");
        let second = allocate_seats(&m).expect("enough seats");
        assert_eq!(first.plan().records(), second.plan().records());
        for hall in m.hall_indices() {
            assert!(
                first
                    .plan()
                    .hall_seats(hall)
                    .eq(second.plan().hall_seats(hall))
            );
        }
    }

    #[test]
    fn test_random_models_are_fully_seated() {
        let mut rng = StdRng::seed_from_u64(0xA110_C8ED);
        let patterns = [InterleavePattern::RoundRobin, InterleavePattern::LeadWeighted];
        let traversals = [Traversal::RowMajor, Traversal::Serpentine];

        for round in 0..200 {
            let num_halls = rng.random_range(1..=6);
            let halls: Vec<Hall> = (0..num_halls)
                .map(|i| {
                    let rows = rng.random_range(1..=6);
                    let cols = rng.random_range(1..=6);
                    let declared = rng.random_range(0..=rows * cols);
                    Hall::new(format!("H{}-{}", i % 3, i), rows, cols)
                        .with_declared_capacity(declared)
                })
                .collect();
            let capacity: usize = halls.iter().map(Hall::usable_capacity).sum();
            let mut remaining = rng.random_range(0..=capacity);
            let mut courses = Vec::new();
            let codes = ["C1", "C2", "C3", "C4", "C5"];
            for code in codes {
                if remaining == 0 {
                    break;
                }
                let size = rng.random_range(1..=remaining);
                courses.push((code, size));
                remaining -= size;
            }
            let m = model(halls, &courses);

            let selection = if round % 2 == 0 {
                HallSelection::default()
            } else {
                HallSelection::ExactNeed {
                    order: HallOrder::Declared,
                }
            };
            let mut allocator = AllocatorBuilder::new()
                .with_hall_selection(selection)
                .with_window_size(rng.random_range(2..=4))
                .with_pattern(patterns[round % 2])
                .with_traversal(traversals[(round / 2) % 2])
                .build()
                .expect("valid config");
            let outcome = allocator.allocate(&m).expect("capacity covers students");
            assert_consistent(outcome.plan());
            assert_eq!(outcome.statistics().leftover_placements, 0);
        }
    }
}
