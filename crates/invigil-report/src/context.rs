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

use invigil_alloc::plan::SeatingPlan;
use invigil_model::index::HallIndex;
use serde::{Deserialize, Serialize};

/// Half of the exam day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "FN")]
    Forenoon,
    #[serde(rename = "AN")]
    Afternoon,
}

impl Session {
    /// The short label printed on reports.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Session::Forenoon => "FN",
            Session::Afternoon => "AN",
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Header details shared by all reports of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContext {
    exam_date: Option<String>,
    session: Option<Session>,
}

impl ReportContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_exam_date(mut self, exam_date: impl Into<String>) -> Self {
        self.exam_date = Some(exam_date.into());
        self
    }

    #[inline]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    #[inline]
    pub fn exam_date(&self) -> Option<&str> {
        self.exam_date.as_deref()
    }

    #[inline]
    pub fn session(&self) -> Option<Session> {
        self.session
    }

    /// The date printed for `hall`: the configured date, or else the date of
    /// the first student in input order seated there who carries one.
    pub fn hall_date<'a>(&'a self, plan: &SeatingPlan<'a>, hall: HallIndex) -> Option<&'a str> {
        if let Some(date) = self.exam_date.as_deref() {
            return Some(date);
        }
        plan.allocations()
            .filter(|a| a.seat().hall() == hall)
            .find_map(|a| a.exam_date())
    }

    /// The date printed on the master report: the configured date, or else
    /// the first dated student of the whole plan.
    pub fn plan_date<'a>(&'a self, plan: &SeatingPlan<'a>) -> Option<&'a str> {
        if let Some(date) = self.exam_date.as_deref() {
            return Some(date);
        }
        plan.allocations().find_map(|a| a.exam_date())
    }
}

/// Formats the `Date of Exam: <date> | Session: <session>` header line.
pub(crate) fn header_line(date: Option<&str>, session: Option<Session>) -> String {
    let mut line = format!("Date of Exam: {}", date.unwrap_or(""));
    if let Some(session) = session {
        line.push_str(&format!(" | Session: {}", session));
    }
    line
}
