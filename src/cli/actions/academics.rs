use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::{
    cli::actions::output::{open_screen, print_json, report},
    context::AppContext,
    features::{
        assessment::{AssessmentParams, AssessmentSheet},
        exams::{
            ExamDraft, get_exam, list_exams,
            form::{DEFAULT_MAX_MARK, DEFAULT_PASS_MARK},
        },
        subjects::{SubjectForm, list_subjects},
    },
};

pub const ACADEMICS_PATH: &str = "/dashboard/academics";
pub const ASSESSMENT_PATH: &str = "/dashboard/assessment";

/// One `--subject` value of `exams create`: `SUBJECT_ID[:PASS[:MAX]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectMarks {
    pub subject_id: String,
    pub pass_mark: u32,
    pub max_mark: u32,
}

impl FromStr for SubjectMarks {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut parts = value.split(':').map(str::trim);
        let subject_id = parts.next().unwrap_or_default();
        if subject_id.is_empty() {
            bail!("subject id is required in {value:?}");
        }
        let mark = |part: Option<&str>, default: u32| -> Result<u32> {
            part.map_or(Ok(default), |part| {
                part.parse()
                    .with_context(|| format!("invalid mark {part:?} in {value:?}"))
            })
        };
        let pass_mark = mark(parts.next(), DEFAULT_PASS_MARK)?;
        let max_mark = mark(parts.next(), DEFAULT_MAX_MARK)?;
        if parts.next().is_some() {
            bail!("expected SUBJECT_ID[:PASS[:MAX]], got {value:?}");
        }
        Ok(Self {
            subject_id: subject_id.to_string(),
            pass_mark,
            max_mark,
        })
    }
}

/// Splits `ID=VALUE`.
///
/// # Errors
/// Returns an error when there is no `=` or the id is blank.
pub fn split_entry(value: &str) -> Result<(String, String)> {
    let (id, rest) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected STUDENT_ID=VALUE, got {value:?}"))?;
    let id = id.trim();
    if id.is_empty() {
        bail!("student id is required in {value:?}");
    }
    Ok((id.to_string(), rest.trim().to_string()))
}

#[derive(Debug)]
pub enum Command {
    ListSubjects,
    AddSubject(String),
    ListExams,
    ShowExam(String),
    CreateExam {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
        subjects: Vec<SubjectMarks>,
    },
    ShowAssessment(AssessmentParams),
    SubmitAssessment {
        params: AssessmentParams,
        marks: Vec<(String, u32)>,
        remarks: Vec<(String, String)>,
    },
}

async fn create_exam(
    ctx: &AppContext,
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    subjects: &[SubjectMarks],
) -> Result<()> {
    let known = list_subjects(ctx.api()).await?;
    let mut draft = ExamDraft::new();
    draft.name = name;
    draft.start_date = Some(start);
    draft.end_date = Some(end);

    for marks in subjects {
        let subject = known
            .iter()
            .find(|subject| subject.id == marks.subject_id)
            .ok_or_else(|| anyhow!("unknown subject {}", marks.subject_id))?;
        if !draft.add_subject(subject) {
            debug!("subject {} listed twice", subject.id);
        }
        draft.set_marks(&subject.id, marks.pass_mark, marks.max_mark);
    }

    match draft.submit(ctx.api()).await {
        Some(notice) => report(&notice),
        None => Ok(()),
    }
}

async fn submit_assessment(
    ctx: &AppContext,
    params: AssessmentParams,
    marks: &[(String, u32)],
    remarks: Vec<(String, String)>,
) -> Result<()> {
    let mut sheet = AssessmentSheet::load(ctx.api(), params).await?;
    if sheet.rows().is_empty() {
        bail!("no students in this class section");
    }
    for (student_id, value) in marks {
        if !sheet.set_marks(student_id, *value) {
            bail!("student {student_id} is not on this sheet");
        }
    }
    for (student_id, text) in remarks {
        if !sheet.set_remarks(&student_id, text) {
            bail!("student {student_id} is not on this sheet");
        }
    }

    match sheet.submit(ctx.api()).await {
        Some(notice) => report(&notice),
        None => Ok(()),
    }
}

/// # Errors
/// Returns an error when signed out, when the input does not match the
/// loaded data, or when the backend call fails.
#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::ShowAssessment(_) | Command::SubmitAssessment { .. } => {
            open_screen(ctx, ASSESSMENT_PATH)?;
        }
        _ => open_screen(ctx, ACADEMICS_PATH)?,
    }

    match command {
        Command::ListSubjects => print_json(&list_subjects(ctx.api()).await?),
        Command::AddSubject(name) => {
            let mut form = SubjectForm::new();
            form.set_name(name);
            match form.submit(ctx.api()).await {
                Some(notice) => report(&notice),
                None => bail!("Subject name is required"),
            }
        }
        Command::ListExams => print_json(&list_exams(ctx.api()).await?),
        Command::ShowExam(id) => {
            let exam = get_exam(ctx.api(), &id)
                .await?
                .ok_or_else(|| anyhow!("exam {id} not found"))?;
            print_json(&exam)
        }
        Command::CreateExam {
            name,
            start,
            end,
            subjects,
        } => create_exam(ctx, name, start, end, &subjects).await,
        Command::ShowAssessment(params) => {
            let sheet = AssessmentSheet::load(ctx.api(), params).await?;
            print_json(sheet.rows())
        }
        Command::SubmitAssessment {
            params,
            marks,
            remarks,
        } => submit_assessment(ctx, params, &marks, remarks).await,
    }
}
