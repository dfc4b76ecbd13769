use clap::{Arg, Command};

pub const ARG_PHONE: &str = "phone";
pub const ARG_ID: &str = "id";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new("allow-list")
            .about("Phone numbers allowed to receive SMS")
            .subcommand_required(true)
            .subcommand(Command::new("list").about("List allowed numbers"))
            .subcommand(
                Command::new("add")
                    .about("Allow a phone number")
                    .arg(Arg::new(ARG_PHONE).help("Phone number").required(true)),
            )
            .subcommand(
                Command::new("remove")
                    .about("Remove an entry")
                    .arg(Arg::new(ARG_ID).help("Entry id").required(true)),
            ),
    )
}
