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

//! # Invigil Model
//!
//! **The input data model for exam seat allocation.**
//!
//! This crate holds the read-only records an allocation run starts from and the
//! checks that must pass before any seat is handed out.
//!
//! ## Architecture
//!
//! * **`index`**: strongly typed positions (`StudentIndex`, `HallIndex`, `CourseIndex`).
//! * **`student`**: one exam candidate.
//! * **`hall`**: one room with its seating grid and declared capacity.
//! * **`model`**: the immutable `ExamModel` and the `ExamModelBuilder` that rejects
//!   malformed identifiers up front.
//! * **`validation`**: the capacity validator run before every allocation.
//!
//! ## Design Philosophy
//!
//! 1.  **Input order is meaningful**: students and halls keep the order they were
//!     supplied in. Hall order decides placement order; student order decides
//!     tie-breaking between courses of equal size.
//! 2.  **Fail-fast**: identifier problems are reported by the builder, capacity
//!     problems by the validator, both before any allocation work happens.

pub mod hall;
pub mod index;
pub mod model;
pub mod student;
pub mod validation;
