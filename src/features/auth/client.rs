//! Auth endpoints. None of them declare cache tags; a successful sign-in
//! resets the whole cache instead.

use crate::{
    api::{ApiError, Mutation, RequestDescriptor},
    cache::Tag,
    features::{
        auth::types::{
            Credentials, ForgotPasswordRequest, LoginResponse, RegisterResponse,
            ResetPasswordRequest, UserBody,
        },
        common::MessageResponse,
    },
    validation::{ForgotPasswordInputs, LoginInputs, RegisterInputs, ResetPasswordInputs},
};

pub const LOGIN_ENDPOINT: &str = "auth/login";
pub const REGISTER_ENDPOINT: &str = "auth/register";
pub const FORGOT_ENDPOINT: &str = "auth/forgot";
pub const RESET_ENDPOINT: &str = "auth/reset";

pub struct Login<'a>(pub &'a LoginInputs);

impl Mutation for Login<'_> {
    type Output = LoginResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(LOGIN_ENDPOINT).json(&UserBody {
            user: Credentials {
                phone: &self.0.phone,
                password: &self.0.password,
            },
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        Vec::new()
    }
}

pub struct Register<'a>(pub &'a RegisterInputs);

impl Mutation for Register<'_> {
    type Output = RegisterResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(REGISTER_ENDPOINT).json(&UserBody {
            user: Credentials {
                phone: &self.0.phone,
                password: &self.0.password,
            },
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        Vec::new()
    }
}

pub struct ForgotPassword<'a>(pub &'a ForgotPasswordInputs);

impl Mutation for ForgotPassword<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(FORGOT_ENDPOINT).json(&UserBody {
            user: ForgotPasswordRequest {
                email: &self.0.email,
                new_password: &self.0.new_password,
            },
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        Vec::new()
    }
}

pub struct ResetPassword<'a>(pub &'a ResetPasswordInputs);

impl Mutation for ResetPassword<'_> {
    type Output = MessageResponse;

    fn request(&self) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(RESET_ENDPOINT).json(&UserBody {
            user: ResetPasswordRequest {
                old_password: &self.0.old_password,
                new_password: &self.0.new_password,
                confirm_password: &self.0.confirm_password,
            },
        })
    }

    fn invalidates(&self, _: &Self::Output) -> Vec<Tag> {
        Vec::new()
    }
}
