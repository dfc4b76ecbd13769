pub mod client;
pub mod sheet;
pub mod types;

pub use client::{get_assessment, submit_assessment};
pub use sheet::{AssessmentRow, AssessmentSheet, CLASSES, SECTIONS};
pub use types::{AssessmentParams, AssessmentSheetData, SubmitAssessment};
