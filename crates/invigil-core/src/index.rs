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

//! # Strongly Typed Indices
//!
//! `TypedIndex<T>` wraps a plain `usize` position and carries a tag type that
//! names the collection it points into. Students, halls and courses all live
//! in flat vectors; the tag keeps the three index spaces apart at compile time
//! while compiling down to a bare `usize`.
//!
//! ```rust
//! use invigil_core::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct RoomTag;
//! impl TypedIndexTag for RoomTag { const NAME: &'static str = "RoomIndex"; }
//!
//! type RoomIndex = TypedIndex<RoomTag>;
//! let room = RoomIndex::new(2);
//! assert_eq!(room.get(), 2);
//! assert_eq!(format!("{}", room), "RoomIndex(2)");
//! ```

use std::{iter::FusedIterator, marker::PhantomData};

/// Names an index space. The name shows up in `Debug` and `Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A position inside one specific collection.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the raw position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns an iterator over `TypedIndex(0)..TypedIndex(len)`.
    ///
    /// ```rust
    /// # use invigil_core::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    /// # struct Tag;
    /// # impl TypedIndexTag for Tag { const NAME: &'static str = "Idx"; }
    /// let all: Vec<usize> = TypedIndex::<Tag>::range(3).map(|i| i.get()).collect();
    /// assert_eq!(all, vec![0, 1, 2]);
    /// ```
    #[inline]
    pub fn range(len: usize) -> TypedIndexRange<T> {
        TypedIndexRange {
            next: 0,
            end: len,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

/// Iterator returned by [`TypedIndex::range`].
#[derive(Clone, Debug)]
pub struct TypedIndexRange<T> {
    next: usize,
    end: usize,
    _marker: PhantomData<T>,
}

impl<T> Iterator for TypedIndexRange<T> {
    type Item = TypedIndex<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = TypedIndex::new(self.next);
        self.next += 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for TypedIndexRange<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(TypedIndex::new(self.end))
    }
}

impl<T> ExactSizeIterator for TypedIndexRange<T> {}
impl<T> FusedIterator for TypedIndexRange<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct SeatTag;

    impl TypedIndexTag for SeatTag {
        const NAME: &'static str = "SeatIdx";
    }

    type SeatIndex = TypedIndex<SeatTag>;

    #[test]
    fn test_new_and_get() {
        assert_eq!(SeatIndex::new(10).get(), 10);
    }

    #[test]
    fn test_conversions() {
        let idx: SeatIndex = 42.into();
        assert_eq!(idx.get(), 42);
        let raw: usize = idx.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        let idx = SeatIndex::new(7);
        assert_eq!(format!("{}", idx), "SeatIdx(7)");
        assert_eq!(format!("{:?}", idx), "SeatIdx(7)");
    }

    #[test]
    fn test_ordering_follows_raw_position() {
        assert!(SeatIndex::new(1) < SeatIndex::new(2));
        assert_eq!(SeatIndex::new(3), SeatIndex::new(3));
    }

    #[test]
    fn test_range_forward_and_backward() {
        let forward: Vec<usize> = SeatIndex::range(4).map(|i| i.get()).collect();
        assert_eq!(forward, vec![0, 1, 2, 3]);

        let backward: Vec<usize> = SeatIndex::range(3).rev().map(|i| i.get()).collect();
        assert_eq!(backward, vec![2, 1, 0]);

        assert_eq!(SeatIndex::range(5).len(), 5);
        assert_eq!(SeatIndex::range(0).next(), None);
    }

    #[test]
    fn test_range_mixed_ends_meet() {
        let mut it = SeatIndex::range(3);
        assert_eq!(it.next().map(|i| i.get()), Some(0));
        assert_eq!(it.next_back().map(|i| i.get()), Some(2));
        assert_eq!(it.next().map(|i| i.get()), Some(1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }
}
