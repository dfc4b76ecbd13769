//! Phone numbers allowed to receive SMS. Every endpoint shares the coarse
//! `AllowList` tag.

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        allow_list::types::{AllowListBody, AllowListEntry, NewAllowListEntry},
        common::{Envelope, MessageResponse},
    },
    notice::Notice,
    validation::is_valid_contact_phone,
};

pub const ALLOW_LIST_ENDPOINT: &str = "auth/allow-list";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListAllowList;

impl Query for ListAllowList {
    type Output = Envelope<Vec<AllowListEntry>>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(ALLOW_LIST_ENDPOINT)
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::AllowList)]
    }
}

pub struct AddToAllowList<'a>(pub &'a str);

impl Mutation for AddToAllowList<'_> {
    type Output = Envelope<AllowListEntry>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(ALLOW_LIST_ENDPOINT).json(&AllowListBody {
            allow_list: NewAllowListEntry { phone: self.0 },
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::AllowList)]
    }
}

pub struct RemoveFromAllowList<'a>(pub &'a str);

impl Mutation for RemoveFromAllowList<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::delete(format!(
            "{ALLOW_LIST_ENDPOINT}/{}",
            self.0
        )))
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::AllowList)]
    }
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn list_allow_list(api: &ApiClient) -> Result<Vec<AllowListEntry>, ApiError> {
    Ok(api.query(&ListAllowList).await?.data)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn create_allow_list_entry(
    api: &ApiClient,
    phone: &str,
) -> Result<AllowListEntry, ApiError> {
    Ok(api.mutate(&AddToAllowList(phone)).await?.data)
}

/// # Errors
/// Returns `ApiError` if the id is blank or the request fails.
pub async fn delete_allow_list_entry(
    api: &ApiClient,
    id: &str,
) -> Result<MessageResponse, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Config("Allow list id is required.".to_string()));
    }
    api.mutate(&RemoveFromAllowList(id)).await
}

/// Add-number modal submit. The number is checked locally first.
pub async fn add_phone(api: &ApiClient, phone: &str) -> Notice {
    let phone = phone.trim();
    if phone.is_empty() {
        return Notice::error("Phone number is required");
    }
    if !is_valid_contact_phone(phone) {
        return Notice::error("Enter a valid phone number");
    }
    match create_allow_list_entry(api, phone).await {
        Ok(_) => Notice::success("Phone number added to allow list"),
        Err(err) => Notice::from_error(&err, "Failed to add phone number"),
    }
}

pub async fn remove_phone(api: &ApiClient, id: &str) -> Notice {
    match delete_allow_list_entry(api, id).await {
        Ok(_) => Notice::success("Removed from allow list"),
        Err(err) => Notice::from_error(&err, "Failed to remove"),
    }
}
