use clap::{Arg, Command};

pub const ARG_NAME: &str = "name";
pub const ARG_PHONE: &str = "phone";
pub const ARG_EMAIL: &str = "email";
pub const ARG_ADDRESS: &str = "address";
pub const ARG_CITY: &str = "city";
pub const ARG_STATE: &str = "state";
pub const ARG_COUNTRY: &str = "country";
pub const ARG_PINCODE: &str = "pincode";
pub const ARG_LEVEL: &str = "level";
pub const ARG_BOARD: &str = "board";
pub const ARG_TYPE: &str = "type";
pub const ARG_CONTACT_NAME: &str = "contact-name";
pub const ARG_CONTACT_PHONE: &str = "contact-phone";
pub const ARG_LOGO_URL: &str = "logo-url";
pub const ARG_GENDER: &str = "gender";
pub const ARG_ROLE: &str = "role";
pub const ARG_AVATAR_URL: &str = "avatar-url";
pub const ARG_FILE: &str = "file";
pub const ARG_AVATAR: &str = "avatar";

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).required(true)
}

fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("school")
                .about("School details")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the school details"))
                .subcommand(
                    Command::new("save")
                        .about("Add the school, or update it when one exists")
                        .arg(required(ARG_NAME, "School name"))
                        .arg(required(ARG_PHONE, "Ten digit phone number"))
                        .arg(required(ARG_EMAIL, "Contact email"))
                        .arg(required(ARG_ADDRESS, "Address line"))
                        .arg(required(ARG_CITY, "City"))
                        .arg(required(ARG_STATE, "State"))
                        .arg(required(ARG_COUNTRY, "Country"))
                        .arg(required(ARG_PINCODE, "Six digit pincode"))
                        .arg(required(
                            ARG_LEVEL,
                            "Primary, Secondary, Higher Secondary or Composite",
                        ))
                        .arg(required(ARG_BOARD, "CBSE, HSLC, ICSE, State Board or Other"))
                        .arg(required(ARG_TYPE, "Government or Private"))
                        .arg(optional(ARG_CONTACT_NAME, "Primary contact name"))
                        .arg(optional(ARG_CONTACT_PHONE, "Primary contact phone"))
                        .arg(optional(ARG_LOGO_URL, "Logo URL from `upload`")),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Signed-in operator's profile")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the profile"))
                .subcommand(
                    Command::new("update")
                        .about("Update profile fields")
                        .arg(optional(ARG_NAME, "Full name"))
                        .arg(optional(ARG_EMAIL, "Email"))
                        .arg(optional(ARG_PHONE, "Ten digit phone number"))
                        .arg(optional(ARG_GENDER, "male, female, other or prefer_not_to_say"))
                        .arg(optional(ARG_ROLE, "admin, teacher, staff or student"))
                        .arg(optional(ARG_AVATAR_URL, "Avatar URL from `upload`")),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload an image and print its URL")
                .arg(
                    Arg::new(ARG_FILE)
                        .help("Image file")
                        .required(true)
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    Arg::new(ARG_AVATAR)
                        .long(ARG_AVATAR)
                        .help("Also record the URL as the stored profile avatar")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
