//! Sign-in, registration and password screens. Each operation validates the
//! form locally first and only talks to the backend when it passes.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    context::AppContext,
    features::auth::client::{ForgotPassword, Login, Register, ResetPassword},
    guard::{HOME_PATH, LOGIN_PATH, SCHOOL_DETAILS_PATH},
    notice::{Notice, SERVER_NOT_REACHABLE, UNEXPECTED_ERROR},
    session::jwt::{self, DecodedToken},
    validation::{
        FormContext, ForgotPasswordInputs, LoginInputs, RegisterInputs, ResetPasswordInputs,
        ValidationError, validate_form,
    },
};
use secrecy::ExposeSecret;

pub const PROFILE_DETAILS_PATH: &str = "/dashboard/settings/profile-details";

/// Result of an auth screen submit: the notice to show and where to go next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl AuthOutcome {
    fn stay(notice: Notice) -> Self {
        Self {
            notice,
            redirect: None,
        }
    }

    fn go(ctx: &AppContext, notice: Notice, path: &'static str) -> Self {
        ctx.navigator().redirect(path);
        Self {
            notice,
            redirect: Some(path),
        }
    }
}

/// Signs in with phone and password. Verified accounts get a session and a
/// clean cache, then land on the dashboard, or on the school details screen
/// while no school is linked yet.
///
/// # Errors
/// Returns `ValidationError` when the form is incomplete; nothing is sent.
#[instrument(skip_all, fields(phone = %inputs.phone))]
pub async fn login(ctx: &AppContext, inputs: &LoginInputs) -> Result<AuthOutcome, ValidationError> {
    validate_form(inputs, FormContext::Login)?;

    let response = match ctx.api().mutate(&Login(inputs)).await {
        Ok(response) => response,
        Err(err) => return Ok(AuthOutcome::stay(Notice::from_error(&err, SERVER_NOT_REACHABLE))),
    };
    ctx.cache().reset();

    let data = response.data;
    if !data.is_email_verified {
        return Ok(AuthOutcome::stay(Notice::error("Please verify your email")));
    }

    if let Err(err) = ctx.session().create(&data.access_token) {
        warn!("failed to persist session: {err}");
        return Ok(AuthOutcome::stay(Notice::error(UNEXPECTED_ERROR)));
    }
    info!("signed in");

    let destination = if data.has_school() {
        HOME_PATH
    } else {
        SCHOOL_DETAILS_PATH
    };
    Ok(AuthOutcome::go(ctx, Notice::success("Welcome"), destination))
}

/// Creates an account and sends the operator to the sign-in screen.
///
/// # Errors
/// Returns `ValidationError` when the form is incomplete or inconsistent.
#[instrument(skip_all, fields(phone = %inputs.phone))]
pub async fn register(ctx: &AppContext, inputs: &RegisterInputs) -> Result<AuthOutcome, ValidationError> {
    validate_form(inputs, FormContext::Register)?;

    match ctx.api().mutate(&Register(inputs)).await {
        Ok(response) if response.registration_status => Ok(AuthOutcome::go(
            ctx,
            Notice::success("Registration successful!"),
            LOGIN_PATH,
        )),
        Ok(_) => Ok(AuthOutcome::stay(Notice::error("Registration failed"))),
        Err(err) => Ok(AuthOutcome::stay(Notice::from_error(&err, SERVER_NOT_REACHABLE))),
    }
}

/// Requests a password reset email.
///
/// # Errors
/// Returns `ValidationError` when the form is incomplete or inconsistent.
#[instrument(skip_all, fields(email = %inputs.email))]
pub async fn forgot_password(
    ctx: &AppContext,
    inputs: &ForgotPasswordInputs,
) -> Result<AuthOutcome, ValidationError> {
    validate_form(inputs, FormContext::ForgotPassword)?;

    match ctx.api().mutate(&ForgotPassword(inputs)).await {
        Ok(_) => Ok(AuthOutcome::stay(Notice::success("Email sent!"))),
        Err(err) => Ok(AuthOutcome::stay(Notice::from_error(&err, SERVER_NOT_REACHABLE))),
    }
}

/// Sets a new password. `link_token` is the access token carried by the reset
/// link; it becomes the session credential before the request is sent and is
/// removed again if the reset fails.
///
/// # Errors
/// Returns `ValidationError` when the form is incomplete or inconsistent.
#[instrument(skip_all)]
pub async fn reset_password(
    ctx: &AppContext,
    link_token: Option<&str>,
    inputs: &ResetPasswordInputs,
) -> Result<AuthOutcome, ValidationError> {
    validate_form(inputs, FormContext::ResetPassword)?;

    let link_token = link_token.map(str::trim).filter(|token| !token.is_empty());
    if let Some(token) = link_token {
        if let Err(err) = ctx.session().create(token) {
            warn!("failed to persist reset token: {err}");
            return Ok(AuthOutcome::stay(Notice::error(UNEXPECTED_ERROR)));
        }
    }

    match ctx.api().mutate(&ResetPassword(inputs)).await {
        Ok(_) => Ok(AuthOutcome::go(
            ctx,
            Notice::success("Welcome!"),
            PROFILE_DETAILS_PATH,
        )),
        Err(err) => {
            if link_token.is_some() {
                if let Err(clear_err) = ctx.session().destroy() {
                    warn!("failed to clear reset token: {clear_err}");
                }
            }
            Ok(AuthOutcome::stay(Notice::from_error(&err, "Unexpected error!")))
        }
    }
}

/// Signs out locally and returns to the sign-in screen. Storage failures are
/// logged; the operator is signed out in memory either way.
pub fn logout(ctx: &AppContext) -> AuthOutcome {
    if let Err(err) = ctx.logout() {
        warn!("failed to clear persisted session: {err}");
    }
    AuthOutcome::go(ctx, Notice::success("Logged out!"), LOGIN_PATH)
}

/// Claims of the current credential, for display only.
#[must_use]
pub fn identity(ctx: &AppContext) -> Option<DecodedToken> {
    let token = ctx.session().token()?;
    jwt::decode(token.expose_secret())
}
