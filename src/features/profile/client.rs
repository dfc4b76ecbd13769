//! Signed-in user's profile. Successful reads also refresh the locally
//! stored profile blob.

use tracing::warn;

use crate::{
    api::{ApiClient, ApiError, Mutation, Query, RequestDescriptor},
    cache::{Tag, TagKind},
    features::{
        common::Envelope,
        profile::types::{ProfileBody, ProfileDetails, ProfileUpdate},
    },
    notice::Notice,
    session::profile::store_profile,
};

pub const PROFILE_ENDPOINT: &str = "api/v1/getProfileDetails";
pub const UPDATE_PROFILE_ENDPOINT: &str = "api/v1/updateProfile";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetProfile;

impl Query for GetProfile {
    type Output = Envelope<ProfileDetails>;

    fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(PROFILE_ENDPOINT)
    }

    fn provides(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Profile)]
    }
}

pub struct UpdateProfile<'a>(pub &'a ProfileUpdate);

impl Mutation for UpdateProfile<'_> {
    type Output = Envelope<Option<ProfileDetails>>;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::put(UPDATE_PROFILE_ENDPOINT).json(&ProfileBody { profile: self.0 })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        vec![Tag::kind(TagKind::Profile)]
    }
}

fn remember(api: &ApiClient, profile: &ProfileDetails) {
    let stored = serde_json::to_value(profile)
        .map_err(|err| err.to_string())
        .and_then(|value| {
            store_profile(api.session().storage().as_ref(), &value).map_err(|err| err.to_string())
        });
    if let Err(err) = stored {
        warn!("failed to store profile locally: {err}");
    }
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn get_profile(api: &ApiClient) -> Result<ProfileDetails, ApiError> {
    let profile = api.query(&GetProfile).await?.data;
    remember(api, &profile);
    Ok(profile)
}

/// # Errors
/// Returns `ApiError` if the request fails.
pub async fn update_profile(
    api: &ApiClient,
    update: &ProfileUpdate,
) -> Result<Option<ProfileDetails>, ApiError> {
    let updated = api.mutate(&UpdateProfile(update)).await?.data;
    if let Some(profile) = &updated {
        remember(api, profile);
    }
    Ok(updated)
}

/// Profile form submit.
pub async fn save_profile(api: &ApiClient, update: &ProfileUpdate) -> Notice {
    match update_profile(api, update).await {
        Ok(_) => Notice::success("Profile updated successfully!"),
        Err(err) => Notice::from_error(&err, "Failed to update profile"),
    }
}
