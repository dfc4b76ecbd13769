//! Marks entry sheet for one exam subject and class section.

use serde::Serialize;

use crate::{
    api::{ApiClient, ApiError},
    features::{
        assessment::{
            client::{get_assessment, submit_assessment},
            types::{AssessmentEntry, AssessmentParams, AssessmentSheetData, SubmitAssessment},
        },
        common::SubmitGate,
    },
    notice::Notice,
};

pub const CLASSES: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];
pub const SECTIONS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRow {
    pub student_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    pub pass_mark: u32,
    pub max_mark: u32,
    pub marks_obtained: u32,
    pub remarks: String,
}

impl AssessmentRow {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.marks_obtained >= self.pass_mark
    }
}

#[derive(Clone, Debug)]
pub struct AssessmentSheet {
    params: AssessmentParams,
    rows: Vec<AssessmentRow>,
    gate: SubmitGate,
}

impl AssessmentSheet {
    /// Builds the sheet from a loaded response: zero marks and empty remarks
    /// per student, with the subject's pass/max marks copied into each row.
    #[must_use]
    pub fn new(params: AssessmentParams, data: &AssessmentSheetData) -> Self {
        let rows = data
            .students
            .iter()
            .map(|student| AssessmentRow {
                student_id: student.id.clone(),
                name: student.name.clone(),
                roll_number: student.roll_number.clone(),
                pass_mark: data.pass_mark,
                max_mark: data.max_mark,
                marks_obtained: 0,
                remarks: String::new(),
            })
            .collect();
        Self {
            params,
            rows,
            gate: SubmitGate::new(),
        }
    }

    /// # Errors
    /// Returns `ApiError` if the selection is incomplete or the request fails.
    pub async fn load(api: &ApiClient, params: AssessmentParams) -> Result<Self, ApiError> {
        let data = get_assessment(api, &params).await?;
        Ok(Self::new(params, &data))
    }

    #[must_use]
    pub fn params(&self) -> &AssessmentParams {
        &self.params
    }

    #[must_use]
    pub fn rows(&self) -> &[AssessmentRow] {
        &self.rows
    }

    /// Marks are capped at the row's max mark. Returns `false` for an unknown
    /// student.
    pub fn set_marks(&mut self, student_id: &str, marks: u32) -> bool {
        self.row_mut(student_id).is_some_and(|row| {
            row.marks_obtained = marks.min(row.max_mark);
            true
        })
    }

    pub fn set_remarks(&mut self, student_id: &str, remarks: impl Into<String>) -> bool {
        let remarks = remarks.into();
        self.row_mut(student_id).is_some_and(|row| {
            row.remarks = remarks;
            true
        })
    }

    fn row_mut(&mut self, student_id: &str) -> Option<&mut AssessmentRow> {
        self.rows.iter_mut().find(|row| row.student_id == student_id)
    }

    #[must_use]
    pub fn payload(&self) -> SubmitAssessment {
        SubmitAssessment {
            exam_id: self.params.exam_id.clone(),
            subject_id: self.params.subject_id.clone(),
            assessment: self
                .rows
                .iter()
                .map(|row| AssessmentEntry {
                    student_id: row.student_id.clone(),
                    marks_obtained: row.marks_obtained,
                    remarks: row.remarks.clone(),
                })
                .collect(),
        }
    }

    /// Sends every row. An empty sheet has nothing to submit and returns
    /// `None`, as does a submit while another is in flight.
    pub async fn submit(&self, api: &ApiClient) -> Option<Notice> {
        if self.rows.is_empty() {
            return None;
        }
        let _guard = self.gate.begin()?;
        match submit_assessment(api, &self.payload()).await {
            Ok(_) => Some(Notice::success("Assessment submitted")),
            Err(err) => Some(Notice::from_error(&err, "Failed to submit assessment")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::assessment::types::AssessmentStudent;

    fn sheet() -> AssessmentSheet {
        let data = AssessmentSheetData {
            students: vec![
                AssessmentStudent {
                    id: "st1".to_string(),
                    name: "Asha".to_string(),
                    roll_number: Some("1".to_string()),
                },
                AssessmentStudent {
                    id: "st2".to_string(),
                    name: "Ravi".to_string(),
                    roll_number: None,
                },
            ],
            pass_mark: 35,
            max_mark: 80,
        };
        let params = AssessmentParams {
            exam_id: "e1".to_string(),
            subject_id: "sub1".to_string(),
            class: "7".to_string(),
            section: "B".to_string(),
        };
        AssessmentSheet::new(params, &data)
    }

    #[test]
    fn rows_start_blank_with_denormalized_limits() {
        let sheet = sheet();
        assert_eq!(sheet.rows().len(), 2);
        for row in sheet.rows() {
            assert_eq!(row.marks_obtained, 0);
            assert!(row.remarks.is_empty());
            assert_eq!((row.pass_mark, row.max_mark), (35, 80));
        }
    }

    #[test]
    fn edits_flow_into_payload() {
        let mut sheet = sheet();
        assert!(sheet.set_marks("st1", 72));
        assert!(sheet.set_remarks("st1", "Good"));
        assert!(sheet.set_marks("st2", 500));
        assert!(!sheet.set_marks("missing", 1));

        let payload = sheet.payload();
        assert_eq!(payload.exam_id, "e1");
        assert_eq!(payload.subject_id, "sub1");
        assert_eq!(payload.assessment[0].marks_obtained, 72);
        assert_eq!(payload.assessment[0].remarks, "Good");
        assert_eq!(payload.assessment[1].marks_obtained, 80);
        assert!(sheet.rows()[0].passed());
    }

    #[test]
    fn payload_uses_camel_case_keys() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(sheet().payload())?;
        assert_eq!(value["examId"], "e1");
        assert_eq!(value["assessment"][0]["studentId"], "st1");
        assert_eq!(value["assessment"][0]["marksObtained"], 0);
        Ok(())
    }
}
