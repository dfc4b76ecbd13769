use serde::{Deserialize, Serialize};

/// Auth endpoints wrap their payload in `{ "user": ... }`.
#[derive(Clone, Debug, Serialize)]
pub struct UserBody<T> {
    pub user: T,
}

#[derive(Clone, Serialize)]
pub struct Credentials<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

#[derive(Clone, Serialize)]
pub struct ResetPasswordRequest<'a> {
    #[serde(rename = "oldPassword")]
    pub old_password: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub school_id: Option<String>,
}

impl LoginData {
    #[must_use]
    pub fn has_school(&self) -> bool {
        self.school_id
            .as_deref()
            .is_some_and(|school| !school.is_empty())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, alias = "registerationStatus")]
    pub registration_status: bool,
}
