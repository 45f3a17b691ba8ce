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

use serde::{Deserialize, Serialize};

/// A physical exam room.
///
/// The room is a `rows x cols` seating grid. `declared_capacity` is how many
/// candidates the room may actually hold; it may be lower than the grid (seats
/// kept free for spacing) but never higher. The allocator works with the
/// usable capacity, `min(declared_capacity, rows * cols)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hall {
    code: String,
    name: String,
    block: String,
    rows: usize,
    cols: usize,
    declared_capacity: usize,
}

impl Hall {
    /// Creates a hall whose declared capacity equals its grid size. The name
    /// defaults to the code and the block is left empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use invigil_model::hall::Hall;
    /// let hall = Hall::new("H-101", 5, 6)
    ///     .with_name("Seminar Hall")
    ///     .with_block("A")
    ///     .with_declared_capacity(25);
    /// assert_eq!(hall.grid_capacity(), 30);
    /// assert_eq!(hall.usable_capacity(), 25);
    /// ```
    pub fn new(code: impl Into<String>, rows: usize, cols: usize) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            block: String::new(),
            rows,
            cols,
            declared_capacity: rows * cols,
        }
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    #[inline]
    pub fn with_declared_capacity(mut self, declared_capacity: usize) -> Self {
        self.declared_capacity = declared_capacity;
        self
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn block(&self) -> &str {
        &self.block
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn declared_capacity(&self) -> usize {
        self.declared_capacity
    }

    /// Number of cells in the seating grid.
    #[inline]
    pub fn grid_capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of candidates the hall may hold.
    #[inline]
    pub fn usable_capacity(&self) -> usize {
        self.declared_capacity.min(self.grid_capacity())
    }

    /// Returns the code up to its last `-`, or the whole code if it has none.
    ///
    /// Halls that are two halves of one room (`"LH-1"`, `"LH-2"`) share a base
    /// code, and seat numbering continues from one half into the other.
    ///
    /// ```rust
    /// # use invigil_model::hall::Hall;
    /// assert_eq!(Hall::new("LH-2", 1, 1).base_code(), "LH");
    /// assert_eq!(Hall::new("A-B-7", 1, 1).base_code(), "A-B");
    /// assert_eq!(Hall::new("MAIN", 1, 1).base_code(), "MAIN");
    /// ```
    #[inline]
    pub fn base_code(&self) -> &str {
        self.code
            .rsplit_once('-')
            .map_or(self.code.as_str(), |(base, _)| base)
    }
}

impl std::fmt::Display for Hall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hall({}, {}x{}, capacity: {})",
            self.code, self.rows, self.cols, self.declared_capacity
        )
    }
}
