use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        assessment::types::{AssessmentParams, AssessmentSheetData, SubmitAssessment},
        common::MessageResponse,
    },
};

pub const ASSESSMENT_ENDPOINT: &str = "api/v1/assessment";
pub const SUBMIT_ASSESSMENT_ENDPOINT: &str = "api/v1/assessment/submit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetAssessment(pub AssessmentParams);

impl Query for GetAssessment {
    type Output = AssessmentSheetData;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(ASSESSMENT_ENDPOINT)
            .param("examId", self.0.exam_id.as_str())
            .param("subjectId", self.0.subject_id.as_str())
            .param("class", self.0.class.as_str())
            .param("section", self.0.section.as_str())
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Assessment)]
    }
}

pub struct SubmitAssessmentMutation<'a>(pub &'a SubmitAssessment);

impl Mutation for SubmitAssessmentMutation<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(SUBMIT_ASSESSMENT_ENDPOINT).json(self.0)
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Assessment)]
    }
}

/// Loads the students and mark limits for one exam subject and class.
///
/// # Errors
/// Returns `ApiError::Config` when a selection is missing, otherwise the
/// request error.
pub async fn get_assessment(
    api: &ApiClient,
    params: &AssessmentParams,
) -> Result<AssessmentSheetData, ApiError> {
    if !params.is_complete() {
        return Err(ApiError::Config(
            "Exam, subject, class and section are required.".to_string(),
        ));
    }
    api.query(&GetAssessment(params.clone())).await
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn submit_assessment(
    api: &ApiClient,
    payload: &SubmitAssessment,
) -> Result<MessageResponse, ApiError> {
    api.mutate(&SubmitAssessmentMutation(payload)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_every_selection() {
        let query = GetAssessment(AssessmentParams {
            exam_id: "e1".to_string(),
            subject_id: "s1".to_string(),
            class: "7".to_string(),
            section: "B".to_string(),
        });
        let request = query.request();
        assert_eq!(request.path, ASSESSMENT_ENDPOINT);
        assert_eq!(
            request.query,
            vec![
                ("examId".to_string(), "e1".to_string()),
                ("subjectId".to_string(), "s1".to_string()),
                ("class".to_string(), "7".to_string()),
                ("section".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn incomplete_selection_is_detected() {
        let params = AssessmentParams {
            exam_id: "e1".to_string(),
            subject_id: "s1".to_string(),
            class: "7".to_string(),
            section: " ".to_string(),
        };
        assert!(!params.is_complete());
    }
}
