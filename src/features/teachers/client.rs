//! Teacher endpoints with per-id tags plus `Teacher:LIST`.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::{Envelope, MessageResponse, list_tags},
        teachers::types::{Teacher, TeacherBody, TeacherInput},
    },
    notice::Notice,
};

pub const TEACHERS_ENDPOINT: &str = "api/v1/teachers";

fn teacher_path(id: &str) -> String {
    format!("{TEACHERS_ENDPOINT}/{id}")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListTeachers;

impl Query for ListTeachers {
    type Output = Envelope<Vec<Teacher>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(TEACHERS_ENDPOINT)
    }

    fn provides(&self, output: &Self::Output) -> Vec<Tag> {
        list_tags(
            TagKind::Teacher,
            output.data.iter().map(|teacher| teacher.id.as_str()),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetTeacher {
    pub id: String,
}

impl Query for GetTeacher {
    type Output = Envelope<Option<Teacher>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(teacher_path(&self.id))
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::id(TagKind::Teacher, self.id.clone())]
    }
}

pub struct CreateTeacher<'a>(pub &'a TeacherInput);

impl Mutation for CreateTeacher<'_> {
    type Output = Envelope<Teacher>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(TEACHERS_ENDPOINT).json(&TeacherBody { teacher: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::list(TagKind::Teacher)]
    }
}

pub struct UpdateTeacher<'a> {
    pub id: &'a str,
    pub teacher: &'a TeacherInput,
}

impl Mutation for UpdateTeacher<'_> {
    type Output = Envelope<Teacher>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::put(teacher_path(self.id)).json(&TeacherBody {
            teacher: self.teacher,
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::id(TagKind::Teacher, self.id), Tag::list(TagKind::Teacher)]
    }
}

pub struct DeleteTeacher<'a>(pub &'a str);

impl Mutation for DeleteTeacher<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::delete(teacher_path(self.0)))
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::id(TagKind::Teacher, self.0), Tag::list(TagKind::Teacher)]
    }
}

fn required_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("Teacher id is required.".to_string()));
    }
    Ok(trimmed)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn list_teachers(api: &ApiClient) -> Result<Vec<Teacher>, ApiError> {
    Ok(api.query(&ListTeachers).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn get_teacher(api: &ApiClient, id: &str) -> Result<Option<Teacher>, ApiError> {
    let query = GetTeacher {
        id: required_id(id)?.to_string(),
    };
    Ok(api.query(&query).await?.data)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn create_teacher(api: &ApiClient, teacher: &TeacherInput) -> Result<Teacher, ApiError> {
    Ok(api.mutate(&CreateTeacher(teacher)).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn update_teacher(
    api: &ApiClient,
    id: &str,
    teacher: &TeacherInput,
) -> Result<Teacher, ApiError> {
    let id = required_id(id)?;
    Ok(api.mutate(&UpdateTeacher { id, teacher }).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn delete_teacher(api: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    api.mutate(&DeleteTeacher(required_id(id)?)).await
}

/// Add-teacher modal submit.
pub async fn add_teacher(api: &ApiClient, teacher: &TeacherInput) -> Notice {
    match create_teacher(api, teacher).await {
        Ok(_) => Notice::success("Teacher added successfully"),
        Err(err) => Notice::from_error(&err, "Failed to add teacher"),
    }
}
