use crate::{
    api::config::DEFAULT_UPLOAD_MAX_MB,
    cli::{
        actions::{
            Action, Args, academics, allow_list, auth, navigation, settings, students, teachers,
        },
        commands::{
            self, ARG_API_URL, ARG_STATE_DIR, ARG_TIMEOUT, ARG_UPLOAD_MAX_MB,
            academics as academics_args, auth as auth_args, settings as settings_args,
            students as student_args, teachers as teacher_args,
        },
        globals::{GlobalArgs, default_state_dir},
    },
    features::{
        assessment::AssessmentParams,
        common::{Gender, Role},
        exams::form::DATE_FORMAT,
        profile::ProfileUpdate,
        school::{School, SchoolBoard, SchoolLevel, SchoolType, parse_label},
        students::{DobRange, NewStudent, StudentFilters},
        teachers::TeacherInput,
    },
};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn secret(matches: &ArgMatches, id: &str) -> Result<SecretString> {
    required(matches, id).map(SecretString::from)
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn date(matches: &ArgMatches, id: &str) -> Result<NaiveDate> {
    matches
        .get_one::<NaiveDate>(id)
        .copied()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn gender(matches: &ArgMatches, id: &str) -> Result<Option<Gender>> {
    string(matches, id)
        .map(|value| Gender::parse(&value).ok_or_else(|| anyhow!("invalid gender: {value}")))
        .transpose()
}

fn role(value: &str) -> Result<Role> {
    Role::SELECTABLE
        .into_iter()
        .find(|role| role.as_str() == value || role.label().eq_ignore_ascii_case(value))
        .ok_or_else(|| anyhow!("invalid role: {value}"))
}

fn subcommand(matches: &ArgMatches) -> Result<(&str, &ArgMatches)> {
    matches.subcommand().context("missing subcommand")
}

/// Reads the options shared by every subcommand.
///
/// # Errors
/// Returns an error when the API URL is missing.
pub fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url (or SCHOOLDESK_API_URL)")?;

    Ok(GlobalArgs {
        api_url,
        state_dir: matches
            .get_one::<PathBuf>(ARG_STATE_DIR)
            .cloned()
            .unwrap_or_else(default_state_dir),
        timeout: matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .map(Duration::from_secs),
        upload_max_mb: matches
            .get_one::<u64>(ARG_UPLOAD_MAX_MB)
            .copied()
            .unwrap_or(DEFAULT_UPLOAD_MAX_MB),
    })
}

fn auth_command(name: &str, m: &ArgMatches) -> Result<auth::Command> {
    Ok(match name {
        "login" => auth::Command::Login {
            phone: required(m, auth_args::ARG_PHONE)?,
            password: secret(m, auth_args::ARG_PASSWORD)?,
        },
        "register" => auth::Command::Register {
            phone: required(m, auth_args::ARG_PHONE)?,
            password: secret(m, auth_args::ARG_PASSWORD)?,
            confirm_password: secret(m, auth_args::ARG_CONFIRM_PASSWORD)?,
        },
        "logout" => auth::Command::Logout,
        "forgot-password" => auth::Command::ForgotPassword {
            email: required(m, auth_args::ARG_EMAIL)?,
            new_password: secret(m, auth_args::ARG_NEW_PASSWORD)?,
            confirm_password: secret(m, auth_args::ARG_CONFIRM_PASSWORD)?,
        },
        "reset-password" => auth::Command::ResetPassword {
            token: string(m, auth_args::ARG_TOKEN).map(SecretString::from),
            old_password: secret(m, auth_args::ARG_OLD_PASSWORD)?,
            new_password: secret(m, auth_args::ARG_NEW_PASSWORD)?,
            confirm_password: secret(m, auth_args::ARG_CONFIRM_PASSWORD)?,
        },
        "whoami" => auth::Command::Whoami,
        other => bail!("unknown command: {other}"),
    })
}

fn student_filters(m: &ArgMatches) -> Result<StudentFilters> {
    let from = string(m, student_args::ARG_DOB_FROM);
    let to = string(m, student_args::ARG_DOB_TO);
    Ok(StudentFilters {
        search_query: string(m, student_args::ARG_SEARCH),
        gender: gender(m, student_args::ARG_GENDER)?.map(|gender| gender.as_str().to_string()),
        dob_range: (from.is_some() || to.is_some()).then_some(DobRange { from, to }),
        class: string(m, student_args::ARG_CLASS),
        section: string(m, student_args::ARG_SECTION),
        roll_number: string(m, student_args::ARG_ROLL_NUMBER),
    })
}

fn new_student(m: &ArgMatches) -> Result<NewStudent> {
    Ok(NewStudent {
        name: required(m, student_args::ARG_NAME)?,
        phone_number: string(m, student_args::ARG_PHONE),
        gender: gender(m, student_args::ARG_GENDER)?,
        avatar_url: string(m, student_args::ARG_AVATAR_URL),
        dob: date(m, student_args::ARG_DOB)?.format(DATE_FORMAT).to_string(),
        address: required(m, student_args::ARG_ADDRESS)?,
        class: string(m, student_args::ARG_CLASS),
        section: string(m, student_args::ARG_SECTION),
        roll_number: string(m, student_args::ARG_ROLL_NUMBER),
        about: string(m, student_args::ARG_ABOUT),
    })
}

fn students_command(m: &ArgMatches) -> Result<students::Command> {
    let (name, m) = subcommand(m)?;
    Ok(match name {
        "list" => students::Command::List(student_filters(m)?),
        "show" => students::Command::Show(required(m, student_args::ARG_ID)?),
        "add" => students::Command::Add(new_student(m)?),
        "delete" => students::Command::Delete(required(m, student_args::ARG_ID)?),
        other => bail!("unknown students command: {other}"),
    })
}

fn teacher_input(m: &ArgMatches) -> Result<TeacherInput> {
    Ok(TeacherInput {
        name: required(m, teacher_args::ARG_NAME)?,
        phone_number: string(m, teacher_args::ARG_PHONE),
        gender: gender(m, teacher_args::ARG_GENDER)?,
        avatar_url: string(m, teacher_args::ARG_AVATAR_URL),
        dob: date(m, teacher_args::ARG_DOB)?.format(DATE_FORMAT).to_string(),
        address: required(m, teacher_args::ARG_ADDRESS)?,
        subjects: many(m, teacher_args::ARG_SUBJECT),
    })
}

fn teachers_command(m: &ArgMatches) -> Result<teachers::Command> {
    let (name, m) = subcommand(m)?;
    Ok(match name {
        "list" => teachers::Command::List,
        "show" => teachers::Command::Show(required(m, teacher_args::ARG_ID)?),
        "add" => teachers::Command::Add(teacher_input(m)?),
        "update" => teachers::Command::Update {
            id: required(m, teacher_args::ARG_ID)?,
            teacher: teacher_input(m)?,
        },
        "delete" => teachers::Command::Delete(required(m, teacher_args::ARG_ID)?),
        other => bail!("unknown teachers command: {other}"),
    })
}

fn assessment_params(m: &ArgMatches) -> Result<AssessmentParams> {
    Ok(AssessmentParams {
        exam_id: required(m, academics_args::ARG_EXAM)?,
        subject_id: required(m, academics_args::ARG_SUBJECT)?,
        class: required(m, academics_args::ARG_CLASS)?,
        section: required(m, academics_args::ARG_SECTION)?,
    })
}

fn academics_command(area: &str, m: &ArgMatches) -> Result<academics::Command> {
    let (name, m) = subcommand(m)?;
    Ok(match (area, name) {
        ("subjects", "list") => academics::Command::ListSubjects,
        ("subjects", "add") => academics::Command::AddSubject(required(m, academics_args::ARG_NAME)?),
        ("exams", "list") => academics::Command::ListExams,
        ("exams", "show") => academics::Command::ShowExam(required(m, academics_args::ARG_ID)?),
        ("exams", "create") => academics::Command::CreateExam {
            name: required(m, academics_args::ARG_NAME)?,
            start: date(m, academics_args::ARG_START)?,
            end: date(m, academics_args::ARG_END)?,
            subjects: many(m, academics_args::ARG_SUBJECT)
                .iter()
                .map(|value| value.parse())
                .collect::<Result<_>>()?,
        },
        ("assessment", "show") => academics::Command::ShowAssessment(assessment_params(m)?),
        ("assessment", "submit") => academics::Command::SubmitAssessment {
            params: assessment_params(m)?,
            marks: many(m, academics_args::ARG_MARKS)
                .iter()
                .map(|value| {
                    let (id, marks) = academics::split_entry(value)?;
                    let marks = marks
                        .parse::<u32>()
                        .with_context(|| format!("invalid marks in {value:?}"))?;
                    Ok((id, marks))
                })
                .collect::<Result<_>>()?,
            remarks: many(m, academics_args::ARG_REMARK)
                .iter()
                .map(|value| academics::split_entry(value))
                .collect::<Result<_>>()?,
        },
        (area, other) => bail!("unknown {area} command: {other}"),
    })
}

fn school(m: &ArgMatches) -> Result<School> {
    let level = required(m, settings_args::ARG_LEVEL)?;
    let board = required(m, settings_args::ARG_BOARD)?;
    let school_type = required(m, settings_args::ARG_TYPE)?;

    Ok(School {
        id: None,
        name: required(m, settings_args::ARG_NAME)?,
        phone_number: required(m, settings_args::ARG_PHONE)?,
        email: required(m, settings_args::ARG_EMAIL)?,
        address_line: required(m, settings_args::ARG_ADDRESS)?,
        city: required(m, settings_args::ARG_CITY)?,
        state: required(m, settings_args::ARG_STATE)?,
        country: required(m, settings_args::ARG_COUNTRY)?,
        pincode: required(m, settings_args::ARG_PINCODE)?,
        level: parse_label(&SchoolLevel::ALL, SchoolLevel::label, &level)
            .ok_or_else(|| anyhow!("invalid school level: {level}"))?,
        board: parse_label(&SchoolBoard::ALL, SchoolBoard::label, &board)
            .ok_or_else(|| anyhow!("invalid board: {board}"))?,
        school_type: parse_label(&SchoolType::ALL, SchoolType::label, &school_type)
            .ok_or_else(|| anyhow!("invalid school type: {school_type}"))?,
        primary_contact_name: string(m, settings_args::ARG_CONTACT_NAME),
        primary_contact_number: string(m, settings_args::ARG_CONTACT_PHONE),
        logo_url: string(m, settings_args::ARG_LOGO_URL),
    })
}

fn profile_update(m: &ArgMatches) -> Result<ProfileUpdate> {
    Ok(ProfileUpdate {
        name: string(m, settings_args::ARG_NAME),
        email: string(m, settings_args::ARG_EMAIL),
        phone_number: string(m, settings_args::ARG_PHONE),
        gender: gender(m, settings_args::ARG_GENDER)?,
        role: string(m, settings_args::ARG_ROLE)
            .map(|value| role(&value))
            .transpose()?,
        avatar_url: string(m, settings_args::ARG_AVATAR_URL),
    })
}

fn settings_command(area: &str, m: &ArgMatches) -> Result<settings::Command> {
    if area == "upload" {
        return Ok(settings::Command::Upload {
            file: m
                .get_one::<PathBuf>(settings_args::ARG_FILE)
                .cloned()
                .context("missing required argument: file")?,
            avatar: m.get_flag(settings_args::ARG_AVATAR),
        });
    }

    let (name, m) = subcommand(m)?;
    Ok(match (area, name) {
        ("school", "show") => settings::Command::ShowSchool,
        ("school", "save") => settings::Command::SaveSchool(Box::new(school(m)?)),
        ("profile", "show") => settings::Command::ShowProfile,
        ("profile", "update") => settings::Command::UpdateProfile(profile_update(m)?),
        (area, other) => bail!("unknown {area} command: {other}"),
    })
}

fn allow_list_command(m: &ArgMatches) -> Result<allow_list::Command> {
    let (name, m) = subcommand(m)?;
    Ok(match name {
        "list" => allow_list::Command::List,
        "add" => allow_list::Command::Add(required(m, commands::allow_list::ARG_PHONE)?),
        "remove" => allow_list::Command::Remove(required(m, commands::allow_list::ARG_ID)?),
        other => bail!("unknown allow-list command: {other}"),
    })
}

/// Turns parsed arguments into an [`Action`].
///
/// # Errors
/// Returns an error if required arguments are missing or a value cannot be
/// interpreted.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;
    let (name, sub) = subcommand(matches)?;

    Ok(match name {
        "login" | "register" | "logout" | "forgot-password" | "reset-password" | "whoami" => {
            Action::Auth(Args {
                globals,
                command: auth_command(name, sub)?,
            })
        }
        "route" => Action::Navigation(Args {
            globals,
            command: navigation::Command::Route(required(sub, commands::navigation::ARG_PATH)?),
        }),
        "menu" => Action::Navigation(Args {
            globals,
            command: navigation::Command::Menu,
        }),
        "students" => Action::Students(Args {
            globals,
            command: students_command(sub)?,
        }),
        "teachers" => Action::Teachers(Args {
            globals,
            command: teachers_command(sub)?,
        }),
        "subjects" | "exams" | "assessment" => Action::Academics(Args {
            globals,
            command: academics_command(name, sub)?,
        }),
        "school" | "profile" | "upload" => Action::Settings(Args {
            globals,
            command: settings_command(name, sub)?,
        }),
        "allow-list" => Action::AllowList(Args {
            globals,
            command: allow_list_command(sub)?,
        }),
        other => bail!("unknown command: {other}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn action(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn test_missing_api_url() {
        temp_env::with_var("SCHOOLDESK_API_URL", None::<&str>, || {
            let err = action(&["schooldesk", "logout"]).err().map(|e| e.to_string());
            assert!(err.is_some_and(|message| message.contains("--api-url")));
        });
    }

    #[test]
    fn test_globals_from_env() {
        temp_env::with_vars(
            [
                ("SCHOOLDESK_API_URL", Some("https://api.school.tld/")),
                ("SCHOOLDESK_STATE_DIR", Some("/tmp/desk")),
                ("SCHOOLDESK_TIMEOUT_SECONDS", Some("15")),
                ("SCHOOLDESK_UPLOAD_MAX_MB", None),
            ],
            || {
                let Ok(Action::Auth(args)) = action(&["schooldesk", "whoami"]) else {
                    panic!("expected an auth action");
                };
                assert_eq!(args.globals.api_url, "https://api.school.tld/");
                assert_eq!(args.globals.state_dir, PathBuf::from("/tmp/desk"));
                assert_eq!(args.globals.timeout, Some(Duration::from_secs(15)));
                assert_eq!(args.globals.upload_max_mb, DEFAULT_UPLOAD_MAX_MB);
                assert!(matches!(args.command, auth::Command::Whoami));
            },
        );
    }

    #[test]
    fn test_login_reads_password_env() {
        temp_env::with_vars(
            [
                ("SCHOOLDESK_API_URL", Some("https://api.school.tld/")),
                ("SCHOOLDESK_PASSWORD", Some("Secret@123")),
            ],
            || {
                let Ok(Action::Auth(args)) =
                    action(&["schooldesk", "login", "--phone", "9876543210"])
                else {
                    panic!("expected an auth action");
                };
                let auth::Command::Login { phone, password } = args.command else {
                    panic!("expected login");
                };
                assert_eq!(phone, "9876543210");
                assert_eq!(password.expose_secret(), "Secret@123");
            },
        );
    }

    #[test]
    fn test_students_list_filters() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let result = action(&[
                "schooldesk",
                "students",
                "list",
                "--gender",
                "Female",
                "--dob-from",
                "2012-01-01",
                "--class",
                "5",
            ]);
            let Ok(Action::Students(args)) = result else {
                panic!("expected a students action");
            };
            let students::Command::List(filters) = args.command else {
                panic!("expected list");
            };
            assert_eq!(filters.gender.as_deref(), Some("female"));
            assert_eq!(
                filters.dob_range,
                Some(DobRange {
                    from: Some("2012-01-01".to_string()),
                    to: None,
                })
            );
            assert_eq!(filters.class.as_deref(), Some("5"));
            assert_eq!(filters.search_query, None);
        });
    }

    #[test]
    fn test_invalid_gender() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let result = action(&["schooldesk", "students", "list", "--gender", "robot"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_exam_subjects() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let result = action(&[
                "schooldesk",
                "exams",
                "create",
                "--name",
                "Midterm",
                "--start",
                "2024-03-01",
                "--end",
                "2024-03-10",
                "--subject",
                "sub1",
                "--subject",
                "sub2:18:50",
            ]);
            let Ok(Action::Academics(args)) = result else {
                panic!("expected an academics action");
            };
            let academics::Command::CreateExam { subjects, .. } = args.command else {
                panic!("expected create");
            };
            assert_eq!(subjects.len(), 2);
            assert_eq!(subjects[1].subject_id, "sub2");
            assert_eq!((subjects[1].pass_mark, subjects[1].max_mark), (18, 50));
        });
    }

    #[test]
    fn test_assessment_marks() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let result = action(&[
                "schooldesk",
                "assessment",
                "submit",
                "--exam",
                "e1",
                "--subject",
                "sub1",
                "--class",
                "5",
                "--section",
                "A",
                "--marks",
                "st1=72",
                "--remark",
                "st1=Good",
            ]);
            let Ok(Action::Academics(args)) = result else {
                panic!("expected an academics action");
            };
            let academics::Command::SubmitAssessment {
                params,
                marks,
                remarks,
            } = args.command
            else {
                panic!("expected submit");
            };
            assert!(params.is_complete());
            assert_eq!(marks, vec![("st1".to_string(), 72)]);
            assert_eq!(remarks, vec![("st1".to_string(), "Good".to_string())]);

            let bad = action(&[
                "schooldesk", "assessment", "submit", "--exam", "e1", "--subject", "sub1",
                "--class", "5", "--section", "A", "--marks", "st1=lots",
            ]);
            assert!(bad.is_err());
        });
    }

    #[test]
    fn test_school_labels() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let base = [
                "schooldesk", "school", "save", "--name", "Green Valley", "--phone",
                "9876543210", "--email", "office@gv.edu", "--address", "1 Main Road", "--city",
                "Pune", "--state", "MH", "--country", "India", "--pincode", "411001",
                "--board", "state board", "--type", "Private", "--level",
            ];

            let mut args = base.to_vec();
            args.push("Higher Secondary");
            let Ok(Action::Settings(parsed)) = action(&args) else {
                panic!("expected a settings action");
            };
            let settings::Command::SaveSchool(school) = parsed.command else {
                panic!("expected save");
            };
            assert_eq!(school.level, SchoolLevel::HigherSecondary);
            assert_eq!(school.board, SchoolBoard::StateBoard);
            assert_eq!(school.school_type, SchoolType::Private);

            let mut args = base.to_vec();
            args.push("University");
            assert!(action(&args).is_err());
        });
    }

    #[test]
    fn test_profile_role() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let Ok(Action::Settings(args)) =
                action(&["schooldesk", "profile", "update", "--role", "Staff"])
            else {
                panic!("expected a settings action");
            };
            let settings::Command::UpdateProfile(update) = args.command else {
                panic!("expected update");
            };
            assert_eq!(update.role, Some(Role::Staff));

            assert!(action(&["schooldesk", "profile", "update", "--role", "super_admin"]).is_err());
        });
    }

    #[test]
    fn test_teachers_update() {
        temp_env::with_var("SCHOOLDESK_API_URL", Some("https://api.school.tld/"), || {
            let result = action(&[
                "schooldesk",
                "teachers",
                "update",
                "t1",
                "--name",
                "Meera Iyer",
                "--gender",
                "female",
                "--dob",
                "1988-04-12",
                "--address",
                "4 Temple Street",
                "--subject",
                "math",
                "--subject",
                "physics",
            ]);
            let Ok(Action::Teachers(args)) = result else {
                panic!("expected a teachers action");
            };
            let teachers::Command::Update { id, teacher } = args.command else {
                panic!("expected update");
            };
            assert_eq!(id, "t1");
            assert_eq!(teacher.name, "Meera Iyer");
            assert_eq!(teacher.gender, Some(Gender::Female));
            assert_eq!(teacher.dob, "1988-04-12");
            assert_eq!(teacher.subjects, vec!["math".to_string(), "physics".to_string()]);
        });
    }
}
