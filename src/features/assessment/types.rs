use serde::{Deserialize, Serialize};

use crate::features::common::string_or_number;

/// Exam, subject, class and section picked on the assessment screen. Every
/// field is required before the sheet is loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentParams {
    pub exam_id: String,
    pub subject_id: String,
    pub class: String,
    pub section: String,
}

impl AssessmentParams {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.exam_id, &self.subject_id, &self.class, &self.section]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentStudent {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(
        rename = "rollNumber",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub roll_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSheetData {
    #[serde(default)]
    pub students: Vec<AssessmentStudent>,
    pub pass_mark: u32,
    pub max_mark: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentEntry {
    pub student_id: String,
    pub marks_obtained: u32,
    pub remarks: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessment {
    pub exam_id: String,
    pub subject_id: String,
    pub assessment: Vec<AssessmentEntry>,
}
