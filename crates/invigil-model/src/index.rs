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

use invigil_core::index::{TypedIndex, TypedIndexTag};

/// A tag type for student indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StudentIndexTag;

impl TypedIndexTag for StudentIndexTag {
    const NAME: &'static str = "StudentIndex";
}

/// A typed index into `ExamModel::students`.
pub type StudentIndex = TypedIndex<StudentIndexTag>;

/// A tag type for hall indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct HallIndexTag;

impl TypedIndexTag for HallIndexTag {
    const NAME: &'static str = "HallIndex";
}

/// A typed index into `ExamModel::halls`.
pub type HallIndex = TypedIndex<HallIndexTag>;

/// A tag type for course indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CourseIndexTag;

impl TypedIndexTag for CourseIndexTag {
    const NAME: &'static str = "CourseIndex";
}

/// A typed index into the ranked course list produced by course grouping.
pub type CourseIndex = TypedIndex<CourseIndexTag>;
