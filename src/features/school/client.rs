//! School details. Reads and writes share the coarse `School` tag.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::Envelope,
        school::types::{School, SchoolBody},
    },
    notice::Notice,
};

pub const SCHOOL_ENDPOINT: &str = "api/v1/school";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetSchool;

impl Query for GetSchool {
    type Output = Envelope<Option<School>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(SCHOOL_ENDPOINT)
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::School)]
    }
}

pub struct CreateSchool<'a>(pub &'a School);

impl Mutation for CreateSchool<'_> {
    type Output = Envelope<Option<School>>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(SCHOOL_ENDPOINT).json(&SchoolBody { school: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::School)]
    }
}

pub struct UpdateSchool<'a> {
    pub id: &'a str,
    pub school: &'a School,
}

impl Mutation for UpdateSchool<'_> {
    type Output = Envelope<Option<School>>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::put(format!("{SCHOOL_ENDPOINT}/{}", self.id)).json(&SchoolBody {
            school: self.school,
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::School)]
    }
}

/// The operator's school, `None` until one is registered.
///
/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn get_school(api: &ApiClient) -> Result<Option<School>, ApiError> {
    Ok(api.query(&GetSchool).await?.data)
}

/// Updates the school when `existing_id` is set, creates it otherwise.
///
/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn upsert_school(
    api: &ApiClient,
    existing_id: Option<&str>,
    school: &School,
) -> Result<Option<School>, ApiError> {
    let response = match existing_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => api.mutate(&UpdateSchool { id, school }).await?,
        None => api.mutate(&CreateSchool(school)).await?,
    };
    Ok(response.data)
}

/// School details form submit. An existing school is updated in place;
/// otherwise a new one is created.
pub async fn save_school(api: &ApiClient, existing_id: Option<&str>, school: &School) -> Notice {
    let editing = existing_id.is_some_and(|id| !id.trim().is_empty());
    match upsert_school(api, existing_id, school).await {
        Ok(_) if editing => Notice::success("School details updated successfully!"),
        Ok(_) => Notice::success("School details added successfully!"),
        Err(err) => Notice::from_error(&err, "Failed to save school details"),
    }
}
