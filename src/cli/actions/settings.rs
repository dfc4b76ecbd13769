use anyhow::{Result, anyhow, bail};
use serde_json::json;
use std::path::PathBuf;
use tracing::{instrument, warn};

use crate::{
    cli::actions::output::{open_screen, print_json, report},
    context::AppContext,
    features::{
        auth::flow::PROFILE_DETAILS_PATH,
        profile::{ProfileUpdate, get_profile, save_profile},
        school::{School, get_school, save_school},
        upload::{remember_avatar, upload_image},
    },
    guard::SCHOOL_DETAILS_PATH,
};

#[derive(Debug)]
pub enum Command {
    ShowSchool,
    SaveSchool(Box<School>),
    ShowProfile,
    UpdateProfile(ProfileUpdate),
    Upload { file: PathBuf, avatar: bool },
}

/// Adds the school, or updates the one already linked to the account.
async fn save(ctx: &AppContext, school: &School) -> Result<()> {
    let problems = school.problems();
    if !problems.is_empty() {
        bail!("{}", problems.join("; "));
    }

    let existing = get_school(ctx.api()).await?;
    let existing_id = existing.as_ref().and_then(|school| school.id.as_deref());
    report(&save_school(ctx.api(), existing_id, school).await)
}

/// # Errors
/// Returns an error when signed out, when the form is invalid, or when the
/// backend call fails.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::ShowSchool => {
            open_screen(ctx, SCHOOL_DETAILS_PATH)?;
            let school = get_school(ctx.api())
                .await?
                .ok_or_else(|| anyhow!("no school linked yet; run `schooldesk school save`"))?;
            print_json(&school)
        }
        Command::SaveSchool(school) => {
            open_screen(ctx, SCHOOL_DETAILS_PATH)?;
            save(ctx, &school).await
        }
        Command::ShowProfile => {
            open_screen(ctx, PROFILE_DETAILS_PATH)?;
            print_json(&get_profile(ctx.api()).await?)
        }
        Command::UpdateProfile(update) => {
            open_screen(ctx, PROFILE_DETAILS_PATH)?;
            if update.is_empty() {
                bail!("nothing to update");
            }
            report(&save_profile(ctx.api(), &update).await)
        }
        Command::Upload { file, avatar } => {
            open_screen(ctx, PROFILE_DETAILS_PATH)?;
            let (notice, url) = upload_image(ctx.api(), &file).await;
            report(&notice)?;
            if let Some(url) = url {
                if avatar {
                    if let Err(err) = remember_avatar(ctx.api(), &url) {
                        warn!("failed to store avatar locally: {err}");
                    }
                }
                print_json(&json!({ "url": url }))?;
            }
            Ok(())
        }
    }
}
