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

//! Invigil-Alloc: exam seat allocation
//!
//! Takes an `invigil_model::model::ExamModel` and seats every student in a
//! hall grid so that neighbours mostly sit different papers.
//!
//! Core flow
//! - Validate hall capacities (`invigil_model::validation`).
//! - Group students by course and rank courses by size (`grouping`).
//! - Select halls (`selection`) and split students over them in proportion
//!   to capacity (`distribution`).
//! - Pack each hall from a small window of active courses (`window`, `packing`).
//! - Lay packed students out along a row-major or serpentine walk (`grid`).
//! - Seat leftovers first-fit, if configured.
//!
//! Design highlights
//! - Deterministic: identical input and configuration give an identical plan.
//! - All-or-nothing: a failed run returns an error and no partial plan.
//! - Every policy choice is explicit in `config::AllocationConfig`.
//!
//! Module map
//! - `allocator`: the orchestrator, its builder and `allocate_seats`.
//! - `config`: policies and their defaults.
//! - `error`: run errors.
//! - `monitor`: observers of a run (log, composite, no-op).
//! - `plan`: the seating plan (ledger, per-hall grids, record views).
//! - `stats`: counters and timing.

pub mod allocator;
pub mod config;
pub mod distribution;
pub mod error;
pub mod grid;
pub mod grouping;
pub mod monitor;
pub mod packing;
pub mod plan;
pub mod selection;
pub mod stats;
pub mod window;
