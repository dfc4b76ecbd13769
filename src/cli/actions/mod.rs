pub mod academics;
pub mod allow_list;
pub mod auth;
pub mod navigation;
pub mod output;
pub mod settings;
pub mod students;
pub mod teachers;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

/// A parsed subcommand together with the global options.
#[derive(Debug)]
pub struct Args<C> {
    pub globals: GlobalArgs,
    pub command: C,
}

#[derive(Debug)]
pub enum Action {
    Auth(Args<auth::Command>),
    Navigation(Args<navigation::Command>),
    Students(Args<students::Command>),
    Teachers(Args<teachers::Command>),
    Academics(Args<academics::Command>),
    Settings(Args<settings::Command>),
    AllowList(Args<allow_list::Command>),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
