use serde::{Deserialize, Serialize};

/// Subject of an exam row: the backend answers with a bare id, or with the
/// populated `{ _id, name }` when the read joins subjects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamSubjectRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        name: String,
    },
}

impl ExamSubjectRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Populated { id, .. } => id,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated { name, .. } => Some(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubject {
    pub subject_id: ExamSubjectRef,
    pub pass_mark: u32,
    pub max_mark: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub subjects: Vec<ExamSubject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubjectInput {
    pub subject_id: String,
    pub pass_mark: u32,
    pub max_mark: u32,
}

/// Create payload, sent as `{ "exam": ... }`. Dates are `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExam {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub subjects: Vec<ExamSubjectInput>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct CreateExamBody<'a> {
    pub exam: &'a CreateExam,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subject_can_be_id_or_populated() -> Result<(), serde_json::Error> {
        let exam: Exam = serde_json::from_value(json!({
            "_id": "e1",
            "name": "Mid-Term",
            "startDate": "2026-03-01",
            "endDate": "2026-03-10",
            "subjects": [
                {"subjectId": "sub1", "passMark": 40, "maxMark": 100},
                {"subjectId": {"_id": "sub2", "name": "Physics"}, "passMark": 35, "maxMark": 80}
            ]
        }))?;
        assert_eq!(exam.subjects[0].subject_id.id(), "sub1");
        assert_eq!(exam.subjects[0].subject_id.name(), None);
        assert_eq!(exam.subjects[1].subject_id.id(), "sub2");
        assert_eq!(exam.subjects[1].subject_id.name(), Some("Physics"));
        Ok(())
    }

    #[test]
    fn subjects_default_to_empty() -> Result<(), serde_json::Error> {
        let exam: Exam = serde_json::from_value(json!({
            "_id": "e1", "name": "Unit Test", "startDate": "2026-01-01", "endDate": "2026-01-02"
        }))?;
        assert!(exam.subjects.is_empty());
        Ok(())
    }
}
