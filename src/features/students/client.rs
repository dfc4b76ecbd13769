//! Student endpoints. Lists provide one tag per student plus `Student:LIST`,
//! so adding a student refreshes lists and deleting one also drops its
//! detail view.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::{Envelope, MessageResponse, list_tags},
        students::{
            filters::StudentFilters,
            types::{NewStudent, NewStudentBody, Student},
        },
    },
};

pub const STUDENTS_ENDPOINT: &str = "api/v1/students";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListStudents {
    pub filters: StudentFilters,
}

impl Query for ListStudents {
    type Output = Envelope<Vec<Student>>;

    fn request(&self) -> RequestDescriptor {
        self.filters.apply(RequestDescriptor::get(STUDENTS_ENDPOINT))
    }

    fn provides(&self, output: &Self::Output) -> Vec<Tag> {
        list_tags(
            TagKind::Student,
            output.data.iter().map(|student| student.id.as_str()),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetStudent {
    pub id: String,
}

impl Query for GetStudent {
    type Output = Envelope<Option<Student>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(format!("{STUDENTS_ENDPOINT}/{}", self.id))
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::id(TagKind::Student, self.id.clone())]
    }
}

pub struct CreateStudent<'a>(pub &'a NewStudent);

impl Mutation for CreateStudent<'_> {
    type Output = Envelope<Student>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(STUDENTS_ENDPOINT).json(&NewStudentBody { student: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(TagKind::Student)]
    }
}

pub struct DeleteStudent<'a>(pub &'a str);

impl Mutation for DeleteStudent<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::delete(format!(
            "{STUDENTS_ENDPOINT}/{}",
            self.0
        )))
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(TagKind::Student), Tag::id(TagKind::Student, self.0)]
    }
}

fn required_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("Student id is required.".to_string()));
    }
    Ok(trimmed)
}

/// Fetches the student list matching `filters`.
///
/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn list_students(api: &ApiClient, filters: &StudentFilters) -> Result<Vec<Student>, ApiError> {
    let query = ListStudents {
        filters: filters.clone(),
    };
    Ok(api.query(&query).await?.data)
}

/// Fetches one student after basic input validation.
///
/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn get_student(api: &ApiClient, id: &str) -> Result<Option<Student>, ApiError> {
    let query = GetStudent {
        id: required_id(id)?.to_string(),
    };
    Ok(api.query(&query).await?.data)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn create_student(api: &ApiClient, student: &NewStudent) -> Result<Student, ApiError> {
    Ok(api.mutate(&CreateStudent(student)).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn delete_student(api: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    api.mutate(&DeleteStudent(required_id(id)?)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TagId;

    #[test]
    fn delete_invalidates_list_and_detail() {
        let tags = DeleteStudent("s9").invalidates(&MessageResponse::default());
        assert!(tags.contains(&Tag::list(TagKind::Student)));
        assert!(tags.contains(&Tag::id(TagKind::Student, "s9")));
    }

    #[test]
    fn detail_provides_its_id() {
        let query = GetStudent {
            id: "s1".to_string(),
        };
        let tags = query.provides(&Envelope {
            data: None,
            message: None,
        });
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, Some(TagId::Id("s1".to_string())));
        assert_eq!(query.request().path, "api/v1/students/s1");
    }
}
