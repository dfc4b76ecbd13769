use clap::{Arg, ArgAction, Command};

pub use super::students::{
    ARG_ADDRESS, ARG_AVATAR_URL, ARG_DOB, ARG_GENDER, ARG_ID, ARG_NAME, ARG_PHONE,
};

pub const ARG_SUBJECT: &str = "subject";

fn id() -> Arg {
    Arg::new(ARG_ID).help("Teacher id").required(true)
}

fn form(command: Command) -> Command {
    command
        .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Full name").required(true))
        .arg(Arg::new(ARG_PHONE).long(ARG_PHONE).help("Phone number"))
        .arg(
            Arg::new(ARG_GENDER)
                .long(ARG_GENDER)
                .help("male, female, other or prefer_not_to_say"),
        )
        .arg(
            Arg::new(ARG_AVATAR_URL)
                .long(ARG_AVATAR_URL)
                .help("Photo URL from `upload`"),
        )
        .arg(
            Arg::new(ARG_DOB)
                .long(ARG_DOB)
                .help("Date of birth, YYYY-MM-DD")
                .required(true)
                .value_parser(clap::value_parser!(chrono::NaiveDate)),
        )
        .arg(
            Arg::new(ARG_ADDRESS)
                .long(ARG_ADDRESS)
                .help("Home address")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SUBJECT)
                .long(ARG_SUBJECT)
                .help("Subject taught; repeat for several")
                .action(ArgAction::Append),
        )
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new("teachers")
            .about("Teacher records")
            .subcommand_required(true)
            .subcommand(Command::new("list").about("List teachers"))
            .subcommand(Command::new("show").about("Show one teacher").arg(id()))
            .subcommand(form(Command::new("add").about("Add a teacher")))
            .subcommand(form(Command::new("update").about("Replace a teacher's details").arg(id())))
            .subcommand(Command::new("delete").about("Delete a teacher").arg(id())),
    )
}
