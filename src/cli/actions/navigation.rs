use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{
    cli::actions::output::{open_screen, print_json},
    context::AppContext,
    features::auth::identity,
    guard::{HOME_PATH, RouteDecision},
    navigation::{active_item, visible_items},
    session::profile::load_profile,
};

#[derive(Debug)]
pub enum Command {
    Route(String),
    Menu,
}

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    path: &'a str,
    redirected: bool,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<&'static str>,
}

/// Role shown to the menu: the stored profile wins over the token claim.
fn current_role(ctx: &AppContext) -> Option<String> {
    let stored = match load_profile(ctx.session().storage().as_ref()) {
        Ok(profile) => profile,
        Err(err) => {
            warn!("failed to read stored profile: {err}");
            None
        }
    };
    stored
        .as_ref()
        .and_then(|profile| profile.get("role"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| identity(ctx).and_then(|token| token.kind))
}

/// # Errors
/// Returns an error if the report cannot be printed, or when the menu is
/// requested while signed out.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Route(path) => {
            let decision = ctx.visit(&path);
            let location = ctx.navigator().location();
            let report = RouteReport {
                path: &path,
                redirected: matches!(decision, RouteDecision::Redirect(_)),
                active: active_item(&location).map(|item| item.text),
                location,
            };
            print_json(&report)
        }
        Command::Menu => {
            open_screen(ctx, HOME_PATH)?;
            let role = current_role(ctx);
            print_json(&visible_items(role.as_deref()))
        }
    }
}
