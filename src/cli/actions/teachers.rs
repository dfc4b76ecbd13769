use anyhow::{Result, anyhow};
use tracing::instrument;

use crate::{
    cli::actions::output::{open_screen, print_json, report},
    context::AppContext,
    features::teachers::{
        TeacherInput, add_teacher, delete_teacher, get_teacher, list_teachers, update_teacher,
    },
    notice::Notice,
};

pub const TEACHERS_PATH: &str = "/dashboard/teachers";

#[derive(Debug)]
pub enum Command {
    List,
    Show(String),
    Add(TeacherInput),
    Update { id: String, teacher: TeacherInput },
    Delete(String),
}

/// # Errors
/// Returns an error when signed out, or when the backend call fails.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    open_screen(ctx, TEACHERS_PATH)?;
    let api = ctx.api();

    match command {
        Command::List => print_json(&list_teachers(api).await?),
        Command::Show(id) => {
            let teacher = get_teacher(api, &id)
                .await?
                .ok_or_else(|| anyhow!("teacher {id} not found"))?;
            print_json(&teacher)
        }
        Command::Add(teacher) => report(&add_teacher(api, &teacher).await),
        Command::Update { id, teacher } => {
            let notice = match update_teacher(api, &id, &teacher).await {
                Ok(_) => Notice::success("Teacher updated successfully"),
                Err(err) => Notice::from_error(&err, "Failed to update teacher"),
            };
            report(&notice)
        }
        Command::Delete(id) => {
            let notice = match delete_teacher(api, &id).await {
                Ok(_) => Notice::success("Teacher deleted"),
                Err(err) => Notice::from_error(&err, "Failed to delete teacher"),
            };
            report(&notice)
        }
    }
}
