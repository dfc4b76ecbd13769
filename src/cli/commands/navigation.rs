use clap::{Arg, Command};

pub const ARG_PATH: &str = "path";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("route")
                .about("Show where a visit to a console path ends up")
                .arg(
                    Arg::new(ARG_PATH)
                        .help("Console path, example: /dashboard/students")
                        .required(true),
                ),
        )
        .subcommand(Command::new("menu").about("List the side menu entries for the current operator"))
}
