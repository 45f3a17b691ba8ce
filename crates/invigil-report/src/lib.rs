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

//! # Invigil Report
//!
//! Read-only views over a finished `invigil_alloc::plan::SeatingPlan`.
//!
//! * **`seat_numbers`**: seat numbers along each hall's walk, continued across halls
//!   sharing a base code.
//! * **`console`**: the plain-text seating plan.
//! * **`hall`**: per-hall summaries (course list, numbered seat table, register-number ranges).
//! * **`master`**: the session-wide summary grouped by block, with department and hall totals.
//! * **`ranges`**: folding sorted registration numbers into `start-end` runs.
//! * **`context`**: exam date and session shown in report headers.
//!
//! Reports are plain data (`serde::Serialize`) with a `Display` rendering; turning them into
//! documents is left to the caller.

pub mod console;
pub mod context;
pub mod hall;
pub mod master;
pub mod ranges;
pub mod seat_numbers;
