//! Subject endpoints. One `Subject` tag covers every subject read.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::Envelope,
        subjects::types::{NewSubject, NewSubjectBody, Subject},
    },
};

pub const SUBJECTS_ENDPOINT: &str = "api/v1/subjects";
pub const CREATE_SUBJECT_ENDPOINT: &str = "api/v1/subjects/create";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListSubjects;

impl Query for ListSubjects {
    type Output = Envelope<Vec<Subject>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(SUBJECTS_ENDPOINT)
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Subject)]
    }
}

pub struct CreateSubject<'a>(pub &'a NewSubject);

impl Mutation for CreateSubject<'_> {
    type Output = Envelope<Subject>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(CREATE_SUBJECT_ENDPOINT).json(&NewSubjectBody { subject: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Subject)]
    }
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn list_subjects(api: &ApiClient) -> Result<Vec<Subject>, ApiError> {
    Ok(api.query(&ListSubjects).await?.data)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn create_subject(api: &ApiClient, subject: &NewSubject) -> Result<Subject, ApiError> {
    Ok(api.mutate(&CreateSubject(subject)).await?.data)
}
