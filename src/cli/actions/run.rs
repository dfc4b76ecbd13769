use crate::cli::actions::{
    Action, academics, allow_list, auth, navigation, settings, students, teachers,
};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point: every `Action` variant builds the context from its
// globals, then hands the command to its module.
/// # Errors
/// Returns an error if the context cannot be built or the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Auth(args) => auth::execute(&args.globals.context()?, args.command).await,
        Action::Navigation(args) => {
            navigation::execute(&args.globals.context()?, args.command).await
        }
        Action::Students(args) => students::execute(&args.globals.context()?, args.command).await,
        Action::Teachers(args) => teachers::execute(&args.globals.context()?, args.command).await,
        Action::Academics(args) => {
            academics::execute(&args.globals.context()?, args.command).await
        }
        Action::Settings(args) => settings::execute(&args.globals.context()?, args.command).await,
        Action::AllowList(args) => {
            allow_list::execute(&args.globals.context()?, args.command).await
        }
    }
}
