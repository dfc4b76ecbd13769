//! Create-exam draft: name, date range and one marks row per picked subject.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    api::ApiClient,
    features::{
        common::SubmitGate,
        exams::{
            client::create_exam,
            types::{CreateExam, ExamSubjectInput},
        },
        subjects::Subject,
    },
    notice::Notice,
};

pub const DEFAULT_PASS_MARK: u32 = 40;
pub const DEFAULT_MAX_MARK: u32 = 100;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExamSubjectRow {
    pub subject_id: String,
    pub subject_name: String,
    pub pass_mark: u32,
    pub max_mark: u32,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Exam name is required")]
    MissingName,
    #[error("Start date is required")]
    MissingStartDate,
    #[error("End date is required")]
    MissingEndDate,
    #[error("Add at least one subject")]
    NoSubjects,
}

#[derive(Clone, Debug, Default)]
pub struct ExamDraft {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    rows: Vec<ExamSubjectRow>,
    gate: SubmitGate,
}

impl ExamDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rows(&self) -> &[ExamSubjectRow] {
        &self.rows
    }

    #[must_use]
    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    /// Appends a row with the default marks. Returns `false` when the subject
    /// already has a row.
    pub fn add_subject(&mut self, subject: &Subject) -> bool {
        if self.rows.iter().any(|row| row.subject_id == subject.id) {
            return false;
        }
        self.rows.push(ExamSubjectRow {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            pass_mark: DEFAULT_PASS_MARK,
            max_mark: DEFAULT_MAX_MARK,
        });
        true
    }

    pub fn remove_subject(&mut self, subject_id: &str) {
        self.rows.retain(|row| row.subject_id != subject_id);
    }

    /// Returns `false` when no row exists for `subject_id`.
    pub fn set_marks(&mut self, subject_id: &str, pass_mark: u32, max_mark: u32) -> bool {
        match self.rows.iter_mut().find(|row| row.subject_id == subject_id) {
            Some(row) => {
                row.pass_mark = pass_mark;
                row.max_mark = max_mark;
                true
            }
            None => false,
        }
    }

    /// Subjects that can still be picked.
    #[must_use]
    pub fn available<'a>(&self, subjects: &'a [Subject]) -> Vec<&'a Subject> {
        subjects
            .iter()
            .filter(|subject| !self.rows.iter().any(|row| row.subject_id == subject.id))
            .collect()
    }

    /// # Errors
    /// Returns the first missing piece of the draft.
    pub fn payload(&self) -> Result<CreateExam, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let start = self.start_date.ok_or(DraftError::MissingStartDate)?;
        let end = self.end_date.ok_or(DraftError::MissingEndDate)?;
        if self.rows.is_empty() {
            return Err(DraftError::NoSubjects);
        }

        Ok(CreateExam {
            name: name.to_string(),
            start_date: start.format(DATE_FORMAT).to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
            subjects: self
                .rows
                .iter()
                .map(|row| ExamSubjectInput {
                    subject_id: row.subject_id.clone(),
                    pass_mark: row.pass_mark,
                    max_mark: row.max_mark,
                })
                .collect(),
        })
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.start_date = None;
        self.end_date = None;
        self.rows.clear();
    }

    /// Creates the exam and clears the draft on success. Returns `None` while
    /// another submit is in flight.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Notice> {
        let exam = match self.payload() {
            Ok(exam) => exam,
            Err(err) => return Some(Notice::error(err.to_string())),
        };
        let _guard = self.gate.begin()?;

        match create_exam(api, &exam).await {
            Ok(_) => {
                self.reset();
                Some(Notice::success("Exam created"))
            }
            Err(err) => Some(Notice::from_error(&err, "Failed to create exam")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: &str, name: &str) -> Subject {
        Subject {
            id: id.to_string(),
            name: name.to_string(),
            code: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn rows_start_with_default_marks_and_never_repeat() {
        let mut draft = ExamDraft::new();
        let maths = subject("m", "Maths");
        assert!(draft.add_subject(&maths));
        assert!(!draft.add_subject(&maths));
        assert_eq!(draft.rows().len(), 1);
        assert_eq!(draft.rows()[0].pass_mark, DEFAULT_PASS_MARK);
        assert_eq!(draft.rows()[0].max_mark, DEFAULT_MAX_MARK);
    }

    #[test]
    fn available_hides_picked_subjects() {
        let all = vec![subject("m", "Maths"), subject("p", "Physics")];
        let mut draft = ExamDraft::new();
        draft.add_subject(&all[0]);
        let names: Vec<_> = draft.available(&all).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Physics"]);
        draft.remove_subject("m");
        assert_eq!(draft.available(&all).len(), 2);
    }

    #[test]
    fn payload_requires_every_piece() {
        let mut draft = ExamDraft::new();
        assert_eq!(draft.payload(), Err(DraftError::MissingName));
        draft.name = "Mid-Term".to_string();
        assert_eq!(draft.payload(), Err(DraftError::MissingStartDate));
        draft.start_date = date(2026, 3, 1);
        assert_eq!(draft.payload(), Err(DraftError::MissingEndDate));
        draft.end_date = date(2026, 3, 10);
        assert_eq!(draft.payload(), Err(DraftError::NoSubjects));
        assert_eq!(DraftError::NoSubjects.to_string(), "Add at least one subject");
    }

    #[test]
    fn payload_formats_dates_and_marks() {
        let mut draft = ExamDraft::new();
        draft.name = " Finals ".to_string();
        draft.start_date = date(2026, 3, 1);
        draft.end_date = date(2026, 3, 10);
        draft.add_subject(&subject("m", "Maths"));
        assert!(draft.set_marks("m", 33, 75));
        assert!(!draft.set_marks("x", 1, 2));

        let exam = draft.payload().expect("complete draft");
        assert_eq!(exam.name, "Finals");
        assert_eq!(exam.start_date, "2026-03-01");
        assert_eq!(exam.end_date, "2026-03-10");
        assert_eq!(
            exam.subjects,
            vec![ExamSubjectInput {
                subject_id: "m".to_string(),
                pass_mark: 33,
                max_mark: 75
            }]
        );
    }
}
