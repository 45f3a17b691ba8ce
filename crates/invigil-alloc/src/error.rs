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

use crate::config::ConfigError;
use invigil_model::validation::CapacityError;
use thiserror::Error;

/// The chosen halls cannot reach the capacity the selection policy needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selected halls provide {available} seats but {required} are required")]
pub struct InsufficientCapacityError {
    required: usize,
    available: usize,
}

impl InsufficientCapacityError {
    #[inline]
    pub fn new(required: usize, available: usize) -> Self {
        Self {
            required,
            available,
        }
    }

    #[inline]
    pub fn required(&self) -> usize {
        self.required
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.available
    }
}

/// Students that are still without a seat after every placement pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} students could not be allocated", .registration_ids.len())]
pub struct UnallocatedStudentsError {
    registration_ids: Vec<String>,
}

impl UnallocatedStudentsError {
    #[inline]
    pub fn new(registration_ids: Vec<String>) -> Self {
        Self { registration_ids }
    }

    /// Number of students without a seat.
    #[inline]
    pub fn count(&self) -> usize {
        self.registration_ids.len()
    }

    /// Registration ids in course rank order, then registration order.
    #[inline]
    pub fn registration_ids(&self) -> &[String] {
        &self.registration_ids
    }
}

/// Any failure of an allocation run. No partial plan survives an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    InsufficientCapacity(#[from] InsufficientCapacityError),
    #[error(transparent)]
    Unallocated(#[from] UnallocatedStudentsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = InsufficientCapacityError::new(50, 40);
        assert_eq!(
            err.to_string(),
            "selected halls provide 40 seats but 50 are required"
        );

        let err = UnallocatedStudentsError::new(vec!["1".into(), "2".into()]);
        assert_eq!(err.count(), 2);
        assert_eq!(err.to_string(), "2 students could not be allocated");
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err: AllocationError = CapacityError::InsufficientSeats {
            seats: 3,
            students: 4,
        }
        .into();
        assert_eq!(err.to_string(), "not enough seats (3) for 4 students");
        assert!(matches!(err, AllocationError::Capacity(_)));

        let err: AllocationError = InsufficientCapacityError::new(2, 1).into();
        assert!(matches!(err, AllocationError::InsufficientCapacity(_)));
    }
}
