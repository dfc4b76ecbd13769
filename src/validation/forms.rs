//! Auth form inputs and the context-sensitive checks run against them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{is_valid_email, is_valid_password, is_valid_phone, password_message};

/// Screen a form belongs to. Decides what `confirm_password` is compared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormContext {
    Login,
    Register,
    ResetPassword,
    ForgotPassword,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Phone,
    Password,
    OldPassword,
    NewPassword,
    ConfirmPassword,
}

impl Field {
    /// Wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::OldPassword => "oldPassword",
            Self::NewPassword => "newPassword",
            Self::ConfirmPassword => "confirm_password",
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::Email => "Email is required",
            Self::Phone => "Phone number is required",
            Self::Password | Self::NewPassword => "Password is required",
            Self::OldPassword => "Temporary password from the reset link is required",
            Self::ConfirmPassword => "Confirm password is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values of one auth form.
pub trait FormInputs {
    const CONTEXT: FormContext;

    /// Fields shown on the form, in display order.
    fn fields(&self) -> &'static [Field];

    /// Current value of `field`; `None` when the form has no such field.
    fn value(&self, field: Field) -> Option<&str>;

    /// Whether a submit is held to the password strength rule.
    fn enforces_strength(&self) -> bool {
        true
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInputs {
    pub phone: String,
    pub password: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterInputs {
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordInputs {
    pub email: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordInputs {
    /// Temporary password carried by the reset link.
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
    pub confirm_password: String,
}

impl fmt::Debug for LoginInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInputs")
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RegisterInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInputs")
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ForgotPasswordInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgotPasswordInputs")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ResetPasswordInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordInputs").finish_non_exhaustive()
    }
}

impl FormInputs for LoginInputs {
    const CONTEXT: FormContext = FormContext::Login;

    fn fields(&self) -> &'static [Field] {
        &[Field::Phone, Field::Password]
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Phone => Some(&self.phone),
            Field::Password => Some(&self.password),
            Field::Email | Field::OldPassword | Field::NewPassword | Field::ConfirmPassword => None,
        }
    }

    // Sign-in accepts whatever password the account already has.
    fn enforces_strength(&self) -> bool {
        false
    }
}

impl FormInputs for RegisterInputs {
    const CONTEXT: FormContext = FormContext::Register;

    fn fields(&self) -> &'static [Field] {
        &[Field::Phone, Field::Password, Field::ConfirmPassword]
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Phone => Some(&self.phone),
            Field::Password => Some(&self.password),
            Field::ConfirmPassword => Some(&self.confirm_password),
            Field::Email | Field::OldPassword | Field::NewPassword => None,
        }
    }
}

impl FormInputs for ForgotPasswordInputs {
    const CONTEXT: FormContext = FormContext::ForgotPassword;

    fn fields(&self) -> &'static [Field] {
        &[Field::Email, Field::NewPassword, Field::ConfirmPassword]
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => Some(&self.email),
            Field::NewPassword => Some(&self.new_password),
            Field::ConfirmPassword => Some(&self.confirm_password),
            Field::Phone | Field::Password | Field::OldPassword => None,
        }
    }
}

impl FormInputs for ResetPasswordInputs {
    const CONTEXT: FormContext = FormContext::ResetPassword;

    fn fields(&self) -> &'static [Field] {
        &[Field::OldPassword, Field::NewPassword, Field::ConfirmPassword]
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::OldPassword => Some(&self.old_password),
            Field::NewPassword => Some(&self.new_password),
            Field::ConfirmPassword => Some(&self.confirm_password),
            Field::Email | Field::Phone | Field::Password => None,
        }
    }
}

/// Whether `field` currently holds an invalid value. Empty and absent fields
/// are not invalid here; they are caught by the required-field rule on submit.
#[must_use]
pub fn check_validation<I: FormInputs + ?Sized>(field: Field, inputs: &I, ctx: FormContext) -> bool {
    let Some(value) = inputs.value(field).filter(|value| !value.is_empty()) else {
        return false;
    };

    match field {
        Field::Email => !is_valid_email(value),
        Field::Phone => !is_valid_phone(value),
        Field::Password | Field::NewPassword => !is_valid_password(value),
        Field::OldPassword => false,
        Field::ConfirmPassword => match ctx {
            FormContext::Register => inputs.value(Field::Password) != Some(value),
            FormContext::ResetPassword | FormContext::ForgotPassword => {
                inputs.value(Field::NewPassword) != Some(value)
            }
            FormContext::Login => false,
        },
    }
}

/// Message under `field`, or `None` when the field is fine. `submitted` turns
/// on the required-field messages, as the screens only show those after the
/// first submit attempt.
#[must_use]
pub fn field_message<I: FormInputs + ?Sized>(
    field: Field,
    inputs: &I,
    ctx: FormContext,
    submitted: bool,
) -> Option<String> {
    let value = inputs.value(field)?;
    if submitted && value.is_empty() {
        return Some(field.required_message().to_string());
    }
    let is_password = matches!(field, Field::Password | Field::NewPassword);
    if (is_password && !inputs.enforces_strength()) || !check_validation(field, inputs, ctx) {
        return None;
    }

    let message = match field {
        Field::Email => "Please enter a valid email",
        Field::Phone => "Phone number must be 10 digits",
        Field::Password | Field::NewPassword => password_message(value),
        Field::OldPassword => return None,
        Field::ConfirmPassword => "Password do not match",
    };
    Some(message.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every failing field of a submitted form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", summary(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

/// Runs the submit-time checks. Submission is allowed only on `Ok`.
///
/// # Errors
/// Returns `ValidationError` listing every empty or invalid field.
pub fn validate_form<I: FormInputs + ?Sized>(inputs: &I, ctx: FormContext) -> Result<(), ValidationError> {
    let errors: Vec<FieldError> = inputs
        .fields()
        .iter()
        .filter_map(|field| {
            field_message(*field, inputs, ctx, true).map(|message| FieldError {
                field: *field,
                message,
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(errors))
    }
}
