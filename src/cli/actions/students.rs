use anyhow::{Result, anyhow};
use tracing::instrument;

use crate::{
    cli::actions::output::{open_screen, print_json, report},
    context::AppContext,
    features::students::{NewStudent, StudentFilters, StudentsScreen, get_student},
};

pub const STUDENTS_PATH: &str = "/dashboard/students";

#[derive(Debug)]
pub enum Command {
    List(StudentFilters),
    Show(String),
    Add(NewStudent),
    Delete(String),
}

/// # Errors
/// Returns an error when signed out, or when the backend call fails.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    open_screen(ctx, STUDENTS_PATH)?;
    let screen = StudentsScreen::new(ctx.api().clone());

    match command {
        Command::List(filters) => {
            screen.update_filters(filters);
            print_json(&screen.list().await?)
        }
        Command::Show(id) => {
            let student = get_student(ctx.api(), &id)
                .await?
                .ok_or_else(|| anyhow!("student {id} not found"))?;
            print_json(&student)
        }
        Command::Add(student) => match screen.add(&student).await {
            Some(notice) => report(&notice),
            None => Ok(()),
        },
        Command::Delete(id) => match screen.delete(&id).await {
            Some(notice) => report(&notice),
            None => Ok(()),
        },
    }
}
