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

//! Run configuration.
//!
//! Every policy choice of an allocation run lives in [`AllocationConfig`].
//! The default is the canonical run: block-quantized hall selection with
//! blocks of 25 seats, a window of two courses visited round-robin,
//! serpentine seating that continues across halls sharing a base code, and
//! no leftover pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Block size of the canonical hall selection.
pub const DEFAULT_BLOCK_SIZE: usize = 25;

/// Default number of courses interleaved within one hall.
pub const DEFAULT_WINDOW_SIZE: usize = 2;

/// Smallest supported active window.
pub const MIN_WINDOW_SIZE: usize = 2;

/// Largest supported active window.
pub const MAX_WINDOW_SIZE: usize = 4;

/// Order in which exact-need selection accumulates halls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallOrder {
    /// Halls in the order they were declared.
    #[default]
    Declared,
    /// Largest usable capacity first; ties keep declared order.
    CapacityDescending,
}

impl std::fmt::Display for HallOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HallOrder::Declared => write!(f, "Declared"),
            HallOrder::CapacityDescending => write!(f, "CapacityDescending"),
        }
    }
}

/// How the set of halls used in a run is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum HallSelection {
    /// Take halls in `order` until their capacity covers every student.
    ExactNeed { order: HallOrder },
    /// Round the student count up to a multiple of `block_size`, then take
    /// the largest halls until that rounded need is covered.
    BlockQuantized { block_size: usize },
}

impl Default for HallSelection {
    #[inline]
    fn default() -> Self {
        HallSelection::BlockQuantized {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl std::fmt::Display for HallSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HallSelection::ExactNeed { order } => write!(f, "ExactNeed(order: {})", order),
            HallSelection::BlockQuantized { block_size } => {
                write!(f, "BlockQuantized(block_size: {})", block_size)
            }
        }
    }
}

/// Visiting order of the courses in the active window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterleavePattern {
    /// Every active course gets one seat per cycle.
    #[default]
    RoundRobin,
    /// With exactly three active courses the first one gets two seats per
    /// cycle (`2:1:1`). Any other window length falls back to round-robin.
    LeadWeighted,
}

impl std::fmt::Display for InterleavePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterleavePattern::RoundRobin => write!(f, "RoundRobin"),
            InterleavePattern::LeadWeighted => write!(f, "LeadWeighted"),
        }
    }
}

/// Order in which the cells of a hall are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Every row left to right.
    RowMajor,
    /// Rows alternate direction, starting left to right.
    #[default]
    Serpentine,
}

impl std::fmt::Display for Traversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Traversal::RowMajor => write!(f, "RowMajor"),
            Traversal::Serpentine => write!(f, "Serpentine"),
        }
    }
}

/// What happens to students the packer could not place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    /// Report them as unallocated.
    #[default]
    Fail,
    /// Seat them in the first free cell of any hall, halls in declared order.
    FirstFit,
}

impl std::fmt::Display for LeftoverPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeftoverPolicy::Fail => write!(f, "Fail"),
            LeftoverPolicy::FirstFit => write!(f, "FirstFit"),
        }
    }
}

/// A configuration value outside its supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "window size {0} is outside the supported range {min}..={max}",
        min = MIN_WINDOW_SIZE,
        max = MAX_WINDOW_SIZE
    )]
    WindowSizeOutOfRange(usize),
    #[error("block size must be at least 1")]
    ZeroBlockSize,
}

/// All policy choices of one allocation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub hall_selection: HallSelection,
    pub window_size: usize,
    pub pattern: InterleavePattern,
    pub traversal: Traversal,
    /// Flip the first serpentine row of a hall when an earlier hall with the
    /// same base code already holds students.
    pub continue_shared_base: bool,
    pub leftover: LeftoverPolicy,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            hall_selection: HallSelection::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            pattern: InterleavePattern::default(),
            traversal: Traversal::default(),
            continue_shared_base: true,
            leftover: LeftoverPolicy::default(),
        }
    }
}

impl AllocationConfig {
    /// Checks that every value is in its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&self.window_size) {
            return Err(ConfigError::WindowSizeOutOfRange(self.window_size));
        }
        if let HallSelection::BlockQuantized { block_size: 0 } = self.hall_selection {
            return Err(ConfigError::ZeroBlockSize);
        }
        Ok(())
    }
}

impl std::fmt::Display for AllocationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AllocationConfig(selection: {}, window: {}, pattern: {}, traversal: {}, continue_shared_base: {}, leftover: {})",
            self.hall_selection,
            self.window_size,
            self.pattern,
            self.traversal,
            self.continue_shared_base,
            self.leftover
        )
    }
}
