use anyhow::{Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::instrument;

use crate::{
    cli::actions::output::{print_json, report},
    context::AppContext,
    features::auth::{self, AuthOutcome},
    validation::{ForgotPasswordInputs, LoginInputs, RegisterInputs, ResetPasswordInputs},
};

#[derive(Debug)]
pub enum Command {
    Login {
        phone: String,
        password: SecretString,
    },
    Register {
        phone: String,
        password: SecretString,
        confirm_password: SecretString,
    },
    Logout,
    ForgotPassword {
        email: String,
        new_password: SecretString,
        confirm_password: SecretString,
    },
    ResetPassword {
        token: Option<SecretString>,
        old_password: SecretString,
        new_password: SecretString,
        confirm_password: SecretString,
    },
    Whoami,
}

fn finish(outcome: &AuthOutcome) -> Result<()> {
    report(&outcome.notice)?;
    if let Some(path) = outcome.redirect {
        print_json(&json!({ "redirect": path }))?;
    }
    Ok(())
}

fn exposed(secret: &SecretString) -> String {
    secret.expose_secret().to_string()
}

/// # Errors
/// Returns an error when the form is invalid or the backend rejects it.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Login { phone, password } => {
            let inputs = LoginInputs {
                phone,
                password: exposed(&password),
            };
            finish(&auth::login(ctx, &inputs).await?)
        }
        Command::Register {
            phone,
            password,
            confirm_password,
        } => {
            let inputs = RegisterInputs {
                phone,
                password: exposed(&password),
                confirm_password: exposed(&confirm_password),
            };
            finish(&auth::register(ctx, &inputs).await?)
        }
        Command::Logout => finish(&auth::logout(ctx)),
        Command::ForgotPassword {
            email,
            new_password,
            confirm_password,
        } => {
            let inputs = ForgotPasswordInputs {
                email,
                new_password: exposed(&new_password),
                confirm_password: exposed(&confirm_password),
            };
            finish(&auth::forgot_password(ctx, &inputs).await?)
        }
        Command::ResetPassword {
            token,
            old_password,
            new_password,
            confirm_password,
        } => {
            let inputs = ResetPasswordInputs {
                old_password: exposed(&old_password),
                new_password: exposed(&new_password),
                confirm_password: exposed(&confirm_password),
            };
            let token = token.as_ref().map(|token| token.expose_secret());
            finish(&auth::reset_password(ctx, token, &inputs).await?)
        }
        Command::Whoami => {
            let identity = auth::identity(ctx).ok_or_else(|| anyhow!("not signed in"))?;
            print_json(&identity)
        }
    }
}
