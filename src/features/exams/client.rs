//! Exam endpoints under one coarse `Exam` tag.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::Envelope,
        exams::types::{CreateExam, CreateExamBody, Exam},
    },
};

pub const EXAMS_ENDPOINT: &str = "api/v1/exams";
pub const CREATE_EXAM_ENDPOINT: &str = "api/v1/exams/create";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListExams;

impl Query for ListExams {
    type Output = Envelope<Vec<Exam>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(EXAMS_ENDPOINT)
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Exam)]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetExam {
    pub id: String,
}

impl Query for GetExam {
    type Output = Envelope<Option<Exam>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(format!("{EXAMS_ENDPOINT}/{}", self.id))
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Exam)]
    }
}

pub struct CreateExamMutation<'a>(pub &'a CreateExam);

impl Mutation for CreateExamMutation<'_> {
    type Output = Envelope<Exam>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(CREATE_EXAM_ENDPOINT).json(&CreateExamBody { exam: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Exam)]
    }
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn list_exams(api: &ApiClient) -> Result<Vec<Exam>, ApiError> {
    Ok(api.query(&ListExams).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn get_exam(api: &ApiClient, id: &str) -> Result<Option<Exam>, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Config("Exam id is required.".to_string()));
    }
    let query = GetExam { id: id.to_string() };
    Ok(api.query(&query).await?.data)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn create_exam(api: &ApiClient, exam: &CreateExam) -> Result<Exam, ApiError> {
    Ok(api.mutate(&CreateExamMutation(exam)).await?.data)
}
