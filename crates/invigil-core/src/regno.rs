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

//! Registration-number ordering.
//!
//! Candidate identifiers arrive in mixed shapes: purely numeric
//! (`"2021001"`), prefixed (`"CS-0042"`) or free text (`"guest"`). Sorting
//! them as strings puts `"CS-10"` before `"CS-9"`, which is not the order an
//! invigilator expects to find candidates in a hall.
//!
//! [`RegistrationKey`] splits off the trailing run of ASCII digits and
//! compares identifiers as follows:
//!
//! 1. Identifiers with a numeric suffix come before identifiers without one.
//! 2. Two numeric suffixes compare by value. The comparison works on the
//!    digit string (leading zeros stripped, then length, then digits), so
//!    suffixes longer than any machine integer still order correctly.
//! 3. Equal suffix values fall back to comparing the full identifier, which
//!    keeps the order total and deterministic.
//! 4. Identifiers without a suffix compare lexicographically.
//!
//! ```rust
//! use invigil_core::regno::compare_registration;
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_registration("CS-9", "CS-10"), Ordering::Less);
//! assert_eq!(compare_registration("2021002", "2021010"), Ordering::Less);
//! assert_eq!(compare_registration("42", "guest"), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// Sort key for a registration identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationKey<'a> {
    raw: &'a str,
    prefix: &'a str,
    digits: Option<&'a str>,
}

impl<'a> RegistrationKey<'a> {
    /// Builds the key for `raw`.
    #[inline]
    pub fn new(raw: &'a str) -> Self {
        let prefix = raw.trim_end_matches(|c: char| c.is_ascii_digit());
        let suffix = &raw[prefix.len()..];
        let digits = if suffix.is_empty() {
            None
        } else {
            Some(suffix.trim_start_matches('0'))
        };

        Self {
            raw,
            prefix,
            digits,
        }
    }

    /// Returns the identifier this key was built from.
    #[inline]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Returns everything before the numeric suffix. For identifiers without
    /// a suffix this is the whole identifier.
    #[inline]
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Returns `true` if the identifier ends in at least one ASCII digit.
    #[inline]
    pub fn has_numeric_suffix(&self) -> bool {
        self.digits.is_some()
    }

    /// Returns the numeric suffix as a number, or `None` if there is no
    /// suffix or it does not fit into a `u128`.
    #[inline]
    pub fn suffix_value(&self) -> Option<u128> {
        match self.digits {
            Some("") => Some(0),
            Some(digits) => digits.parse().ok(),
            None => None,
        }
    }

    /// Returns `true` if `next` directly follows `self`: same prefix and a
    /// suffix exactly one larger.
    ///
    /// ```rust
    /// # use invigil_core::regno::RegistrationKey;
    /// let a = RegistrationKey::new("CS-0041");
    /// assert!(a.is_followed_by(&RegistrationKey::new("CS-0042")));
    /// assert!(!a.is_followed_by(&RegistrationKey::new("EE-0042")));
    /// assert!(!a.is_followed_by(&RegistrationKey::new("CS-0043")));
    /// ```
    pub fn is_followed_by(&self, next: &RegistrationKey<'_>) -> bool {
        if self.prefix != next.prefix {
            return false;
        }
        match (self.suffix_value(), next.suffix_value()) {
            (Some(a), Some(b)) => a.checked_add(1) == Some(b),
            _ => false,
        }
    }
}

impl Ord for RegistrationKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.digits, other.digits) {
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.raw.cmp(other.raw)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(other.raw),
        }
    }
}

impl PartialOrd for RegistrationKey<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for RegistrationKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}

/// Compares two registration identifiers with the [`RegistrationKey`] order.
#[inline]
pub fn compare_registration(a: &str, b: &str) -> Ordering {
    RegistrationKey::new(a).cmp(&RegistrationKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    #[test]
    fn test_numeric_suffix_compares_by_value() {
        assert_eq!(compare_registration("9", "10"), Ordering::Less);
        assert_eq!(compare_registration("CS-9", "CS-10"), Ordering::Less);
        assert_eq!(compare_registration("CS-0100", "CS-99"), Ordering::Greater);
    }

    #[test]
    fn test_suffix_wins_over_prefix() {
        // Only the numeric suffix decides while both identifiers carry one.
        assert_eq!(compare_registration("ZZ-1", "AA-2"), Ordering::Less);
    }

    #[test]
    fn test_numeric_before_non_numeric() {
        assert_eq!(compare_registration("999999", "alpha"), Ordering::Less);
        assert_eq!(compare_registration("alpha", "1"), Ordering::Greater);
    }

    #[test]
    fn test_non_numeric_are_lexicographic() {
        assert_eq!(compare_registration("alpha", "beta"), Ordering::Less);
        assert_eq!(compare_registration("beta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_equal_values_fall_back_to_raw() {
        // "007" and "7" share the value 7; the raw string breaks the tie.
        assert_eq!(compare_registration("007", "7"), Ordering::Less);
        assert_eq!(compare_registration("7", "7"), Ordering::Equal);
    }

    #[test]
    fn test_very_long_suffixes_do_not_overflow() {
        let a = "1".repeat(60);
        let b = format!("2{}", "0".repeat(59));
        assert_eq!(compare_registration(&a, &b), Ordering::Less);
        assert_eq!(RegistrationKey::new(&a).suffix_value(), None);
    }

    #[test]
    fn test_zero_suffix_value() {
        let key = RegistrationKey::new("X-000");
        assert!(key.has_numeric_suffix());
        assert_eq!(key.suffix_value(), Some(0));
        assert_eq!(key.prefix(), "X-");
    }

    #[test]
    fn test_is_followed_by() {
        let a = RegistrationKey::new("100");
        assert!(a.is_followed_by(&RegistrationKey::new("101")));
        assert!(!a.is_followed_by(&RegistrationKey::new("102")));
        assert!(!RegistrationKey::new("x").is_followed_by(&RegistrationKey::new("x1")));
    }

    #[test]
    fn test_order_is_total_and_stable_under_shuffles() {
        let ids = vec![
            "2021001", "2021010", "2021002", "CS-7", "CS-07", "EE-3", "guest", "alpha", "0", "10",
        ];

        let mut expected = ids.clone();
        expected.sort_by(|a, b| compare_registration(a, b));

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let mut shuffled = ids.clone();
            shuffled.shuffle(&mut rng);
            shuffled.sort_by(|a, b| compare_registration(a, b));
            assert_eq!(shuffled, expected);
        }

        assert_eq!(
            expected,
            vec![
                "0", "EE-3", "CS-07", "CS-7", "10", "2021001", "2021002", "2021010", "alpha",
                "guest"
            ]
        );
    }
}
