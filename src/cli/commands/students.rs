use clap::{Arg, Command};

pub const ARG_ID: &str = "id";
pub const ARG_SEARCH: &str = "search";
pub const ARG_GENDER: &str = "gender";
pub const ARG_DOB_FROM: &str = "dob-from";
pub const ARG_DOB_TO: &str = "dob-to";
pub const ARG_CLASS: &str = "class";
pub const ARG_SECTION: &str = "section";
pub const ARG_ROLL_NUMBER: &str = "roll-number";
pub const ARG_NAME: &str = "name";
pub const ARG_PHONE: &str = "phone";
pub const ARG_AVATAR_URL: &str = "avatar-url";
pub const ARG_DOB: &str = "dob";
pub const ARG_ADDRESS: &str = "address";
pub const ARG_ABOUT: &str = "about";

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn id() -> Arg {
    Arg::new(ARG_ID).help("Record id").required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new("students")
            .about("Student records")
            .subcommand_required(true)
            .subcommand(
                Command::new("list")
                    .about("List students, optionally filtered")
                    .arg(opt(ARG_SEARCH, "Search text"))
                    .arg(opt(ARG_GENDER, "male, female, other or prefer_not_to_say"))
                    .arg(opt(ARG_DOB_FROM, "Born on or after, YYYY-MM-DD"))
                    .arg(opt(ARG_DOB_TO, "Born on or before, YYYY-MM-DD"))
                    .arg(opt(ARG_CLASS, "Class"))
                    .arg(opt(ARG_SECTION, "Section"))
                    .arg(opt(ARG_ROLL_NUMBER, "Roll number")),
            )
            .subcommand(Command::new("show").about("Show one student").arg(id()))
            .subcommand(
                Command::new("add")
                    .about("Add a student")
                    .arg(opt(ARG_NAME, "Full name").required(true))
                    .arg(opt(ARG_PHONE, "Phone number"))
                    .arg(opt(ARG_GENDER, "male, female, other or prefer_not_to_say"))
                    .arg(opt(ARG_AVATAR_URL, "Photo URL from `upload`"))
                    .arg(
                        opt(ARG_DOB, "Date of birth, YYYY-MM-DD")
                            .required(true)
                            .value_parser(clap::value_parser!(chrono::NaiveDate)),
                    )
                    .arg(opt(ARG_ADDRESS, "Home address").required(true))
                    .arg(opt(ARG_CLASS, "Class"))
                    .arg(opt(ARG_SECTION, "Section"))
                    .arg(opt(ARG_ROLL_NUMBER, "Roll number"))
                    .arg(opt(ARG_ABOUT, "Notes")),
            )
            .subcommand(Command::new("delete").about("Delete a student").arg(id())),
    )
}
