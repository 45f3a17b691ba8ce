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

//! Registration-number ranges.
//!
//! Summaries list the candidates of a group compactly: runs of consecutive
//! registration numbers collapse to `start-end`, everything else is listed
//! on its own. Two ids are consecutive when they share the prefix in front
//! of their numeric suffix and the second suffix is one larger.
//!
//! ```rust
//! use invigil_report::ranges::{compress_ranges, join_ranges};
//!
//! let ranges = compress_ranges(["5", "2", "1", "3"]);
//! assert_eq!(join_ranges(&ranges, 0), "1-3, 5");
//! ```

use invigil_core::regno::RegistrationKey;
use serde::{Deserialize, Serialize};

/// A run of consecutive registration numbers. Single ids have `start == end`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationRange {
    pub start: String,
    pub end: String,
    pub len: usize,
}

impl RegistrationRange {
    #[inline]
    pub fn single(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            end: id.clone(),
            start: id,
            len: 1,
        }
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.len == 1
    }
}

impl std::fmt::Display for RegistrationRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            f.write_str(&self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Sorts `ids` by registration number and folds consecutive runs.
pub fn compress_ranges<I, S>(ids: I) -> Vec<RegistrationRange>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let owned: Vec<S> = ids.into_iter().collect();
    let mut keys: Vec<RegistrationKey<'_>> =
        owned.iter().map(|id| RegistrationKey::new(id.as_ref())).collect();
    keys.sort();

    let mut ranges: Vec<RegistrationRange> = Vec::new();
    let mut previous: Option<RegistrationKey<'_>> = None;
    for key in keys {
        let extends = previous.is_some_and(|prev| prev.is_followed_by(&key));
        if extends {
            if let Some(run) = ranges.last_mut() {
                run.end = key.raw().to_owned();
                run.len += 1;
            }
        } else {
            ranges.push(RegistrationRange::single(key.raw()));
        }
        previous = Some(key);
    }
    ranges
}

/// Joins ranges with `", "`, starting a new line after every `per_line`
/// ranges. A `per_line` of zero keeps everything on one line.
pub fn join_ranges(ranges: &[RegistrationRange], per_line: usize) -> String {
    let rendered: Vec<String> = ranges.iter().map(ToString::to_string).collect();
    if per_line == 0 {
        return rendered.join(", ");
    }
    rendered
        .chunks(per_line)
        .map(|line| line.join(", "))
        .collect::<Vec<_>>()
        .join("\n")
}
