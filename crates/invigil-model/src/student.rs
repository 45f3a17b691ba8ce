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

use invigil_core::regno::RegistrationKey;
use serde::{Deserialize, Serialize};

/// One exam candidate.
///
/// Students are immutable once loaded. The registration id is the candidate's
/// identity everywhere downstream: in the ledger, the seat grids and the reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    registration_id: String,
    department: String,
    course_code: String,
    course_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exam_date: Option<String>,
}

impl Student {
    /// Creates a student without an exam date.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use invigil_model::student::Student;
    /// let s = Student::new("2021001", "CSE", "CS101", "Programming")
    ///     .with_exam_date("2025-11-19");
    /// assert_eq!(s.registration_id(), "2021001");
    /// assert_eq!(s.exam_date(), Some("2025-11-19"));
    /// ```
    pub fn new(
        registration_id: impl Into<String>,
        department: impl Into<String>,
        course_code: impl Into<String>,
        course_title: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            department: department.into(),
            course_code: course_code.into(),
            course_title: course_title.into(),
            exam_date: None,
        }
    }

    /// Attaches an exam date.
    #[inline]
    pub fn with_exam_date(mut self, exam_date: impl Into<String>) -> Self {
        self.exam_date = Some(exam_date.into());
        self
    }

    #[inline]
    pub fn registration_id(&self) -> &str {
        &self.registration_id
    }

    #[inline]
    pub fn department(&self) -> &str {
        &self.department
    }

    #[inline]
    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    #[inline]
    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    #[inline]
    pub fn exam_date(&self) -> Option<&str> {
        self.exam_date.as_deref()
    }

    /// Returns the ordering key of this student's registration id.
    #[inline]
    pub fn registration_key(&self) -> RegistrationKey<'_> {
        RegistrationKey::new(&self.registration_id)
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.registration_id, self.course_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let s = Student::new("CS-0042", "CSE", "CS101", "Programming");
        assert_eq!(s.registration_id(), "CS-0042");
        assert_eq!(s.department(), "CSE");
        assert_eq!(s.course_code(), "CS101");
        assert_eq!(s.course_title(), "Programming");
        assert_eq!(s.exam_date(), None);
        assert_eq!(s.registration_key().suffix_value(), Some(42));
    }

    #[test]
    fn test_display() {
        let s = Student::new("7", "ME", "ME201", "Statics");
        assert_eq!(format!("{}", s), "7 (ME201)");
    }

    #[test]
    fn test_serde_round_trip_omits_missing_date() {
        let s = Student::new("1", "CSE", "CS101", "Programming");
        let json = serde_json::to_string(&s).expect("serialize");
        assert!(!json.contains("exam_date"));
        let back: Student = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, s);

        let dated = s.with_exam_date("19-11-2025");
        let json = serde_json::to_string(&dated).expect("serialize");
        let back: Student = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.exam_date(), Some("19-11-2025"));
    }
}
