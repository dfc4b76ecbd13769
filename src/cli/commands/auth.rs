use clap::{Arg, Command};

pub const ARG_PHONE: &str = "phone";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_EMAIL: &str = "email";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_TOKEN: &str = "token";
pub const ARG_OLD_PASSWORD: &str = "old-password";

fn phone() -> Arg {
    Arg::new(ARG_PHONE)
        .long(ARG_PHONE)
        .help("Ten digit phone number")
        .env("SCHOOLDESK_PHONE")
        .required(true)
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("SCHOOLDESK_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn new_password() -> Arg {
    Arg::new(ARG_NEW_PASSWORD)
        .long(ARG_NEW_PASSWORD)
        .help("New password: 8-16 characters with upper, lower, digit and one of @$!%*?&#")
        .env("SCHOOLDESK_NEW_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn confirm_password() -> Arg {
    Arg::new(ARG_CONFIRM_PASSWORD)
        .long(ARG_CONFIRM_PASSWORD)
        .help("Repeat the password")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in with phone and password")
                .arg(phone())
                .arg(password()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(phone())
                .arg(password())
                .arg(confirm_password()),
        )
        .subcommand(Command::new("logout").about("Sign out and clear local state"))
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password reset email")
                .arg(
                    Arg::new(ARG_EMAIL)
                        .long(ARG_EMAIL)
                        .help("Account email")
                        .required(true),
                )
                .arg(new_password())
                .arg(confirm_password()),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Set a new password")
                .arg(
                    Arg::new(ARG_TOKEN)
                        .long(ARG_TOKEN)
                        .help("Token from the reset link; the current session is used when absent")
                        .env("SCHOOLDESK_RESET_TOKEN")
                        .hide_env_values(true),
                )
                .arg(
                    Arg::new(ARG_OLD_PASSWORD)
                        .long(ARG_OLD_PASSWORD)
                        .help("Temporary password from the reset link")
                        .env("SCHOOLDESK_OLD_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                )
                .arg(new_password())
                .arg(confirm_password()),
        )
        .subcommand(Command::new("whoami").about("Show the signed-in identity"))
}
