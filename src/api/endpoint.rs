//! Endpoint definitions. A query describes a cacheable read and the tags its
//! result provides; a mutation describes a write and the tags it invalidates.

use serde::de::DeserializeOwned;

use super::{error::ApiError, request::RequestDescriptor};
use crate::cache::Tag;

pub trait Query: Clone + Send + Sync + 'static {
    type Output: DeserializeOwned;

    fn request(&self) -> RequestDescriptor;

    fn provides(&self, output: &Self::Output) -> Vec<Tag>;
}

pub trait Mutation: Send + Sync {
    type Output: DeserializeOwned;

    /// # Errors
    /// Returns `ApiError::Serialization` if the payload cannot be encoded.
    fn request(&self) -> Result<RequestDescriptor, ApiError>;

    fn invalidates(&self, output: &Self::Output) -> Vec<Tag>;
}
