use anyhow::Result;
use tracing::instrument;

use crate::{
    cli::actions::output::{open_screen, print_json, report},
    context::AppContext,
    features::allow_list::{add_phone, list_allow_list, remove_phone},
};

pub const AUTHORIZED_PATH: &str = "/dashboard/authorized";

#[derive(Debug)]
pub enum Command {
    List,
    Add(String),
    Remove(String),
}

/// # Errors
/// Returns an error when signed out or when the backend call fails.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    open_screen(ctx, AUTHORIZED_PATH)?;
    match command {
        Command::List => print_json(&list_allow_list(ctx.api()).await?),
        Command::Add(phone) => report(&add_phone(ctx.api(), &phone).await),
        Command::Remove(id) => report(&remove_phone(ctx.api(), &id).await),
    }
}
