pub mod client;
pub mod form;
pub mod types;

pub use client::{create_exam, get_exam, list_exams};
pub use form::{DraftError, ExamDraft, ExamSubjectRow};
pub use types::{CreateExam, Exam, ExamSubject, ExamSubjectInput, ExamSubjectRef};
