use clap::{Arg, ArgAction, Command};

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_START: &str = "start";
pub const ARG_END: &str = "end";
pub const ARG_SUBJECT: &str = "subject";
pub const ARG_EXAM: &str = "exam";
pub const ARG_CLASS: &str = "class";
pub const ARG_SECTION: &str = "section";
pub const ARG_MARKS: &str = "marks";
pub const ARG_REMARK: &str = "remark";

fn date(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(chrono::NaiveDate))
}

fn selection(command: Command) -> Command {
    command
        .arg(Arg::new(ARG_EXAM).long(ARG_EXAM).help("Exam id").required(true))
        .arg(
            Arg::new(ARG_SUBJECT)
                .long(ARG_SUBJECT)
                .help("Subject id")
                .required(true),
        )
        .arg(
            Arg::new(ARG_CLASS)
                .long(ARG_CLASS)
                .help("Class")
                .required(true)
                .value_parser(crate::features::assessment::CLASSES),
        )
        .arg(
            Arg::new(ARG_SECTION)
                .long(ARG_SECTION)
                .help("Section")
                .required(true)
                .value_parser(crate::features::assessment::SECTIONS),
        )
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("subjects")
                .about("Subjects taught at the school")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List subjects"))
                .subcommand(
                    Command::new("add").about("Add a subject").arg(
                        Arg::new(ARG_NAME)
                            .help("Subject name")
                            .required(true),
                    ),
                ),
        )
        .subcommand(
            Command::new("exams")
                .about("Exams and their subjects")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List exams"))
                .subcommand(
                    Command::new("show")
                        .about("Show one exam")
                        .arg(Arg::new(ARG_ID).help("Exam id").required(true)),
                )
                .subcommand(
                    Command::new("create")
                        .about("Create an exam")
                        .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Exam name").required(true))
                        .arg(date(ARG_START, "Start date, YYYY-MM-DD"))
                        .arg(date(ARG_END, "End date, YYYY-MM-DD"))
                        .arg(
                            Arg::new(ARG_SUBJECT)
                                .long(ARG_SUBJECT)
                                .help("SUBJECT_ID[:PASS[:MAX]]; marks default to 40 and 100")
                                .action(ArgAction::Append),
                        ),
                ),
        )
        .subcommand(
            Command::new("assessment")
                .about("Marks entry")
                .subcommand_required(true)
                .subcommand(selection(
                    Command::new("show").about("Load the marks sheet for a class section"),
                ))
                .subcommand(selection(
                    Command::new("submit")
                        .about("Submit marks for a class section")
                        .arg(
                            Arg::new(ARG_MARKS)
                                .long(ARG_MARKS)
                                .help("STUDENT_ID=MARKS; repeat per student, others get 0")
                                .action(ArgAction::Append),
                        )
                        .arg(
                            Arg::new(ARG_REMARK)
                                .long(ARG_REMARK)
                                .help("STUDENT_ID=TEXT; repeat per student")
                                .action(ArgAction::Append),
                        ),
                )),
        )
}
