pub mod academics;
pub mod allow_list;
pub mod auth;
pub mod logging;
pub mod navigation;
pub mod settings;
pub mod students;
pub mod teachers;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_DIR: &str = "state-dir";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_UPLOAD_MAX_MB: &str = "upload-max-mb";

fn with_globals(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend base URL, example: https://api.school.tld/")
                .env("SCHOOLDESK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long(ARG_STATE_DIR)
                .help("Directory holding the session record and profile blob")
                .long_help(
                    "Directory holding the session record and profile blob. Defaults to ~/.schooldesk, or ./.schooldesk when HOME is not set.",
                )
                .env("SCHOOLDESK_STATE_DIR")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("SCHOOLDESK_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_UPLOAD_MAX_MB)
                .long(ARG_UPLOAD_MAX_MB)
                .help("Largest accepted image upload, in megabytes")
                .env("SCHOOLDESK_UPLOAD_MAX_MB")
                .global(true)
                .default_value("5")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("schooldesk")
        .about("School management console")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = with_globals(command);
    let command = auth::with_subcommands(command);
    let command = navigation::with_subcommands(command);
    let command = students::with_subcommands(command);
    let command = teachers::with_subcommands(command);
    let command = academics::with_subcommands(command);
    let command = settings::with_subcommands(command);
    let command = allow_list::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::DEFAULT_UPLOAD_MAX_MB;

    const API: &str = "https://api.school.tld";

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "schooldesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("School management console".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_globals_after_subcommand() {
        temp_env::with_vars([("SCHOOLDESK_API_URL", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "schooldesk",
                "menu",
                "--api-url",
                API,
                "--timeout",
                "10",
            ]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                Some(API)
            );
            assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
            assert_eq!(
                matches.get_one::<u64>(ARG_UPLOAD_MAX_MB).copied(),
                Some(DEFAULT_UPLOAD_MAX_MB)
            );
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SCHOOLDESK_API_URL", Some(API)),
                ("SCHOOLDESK_STATE_DIR", Some("/tmp/schooldesk-state")),
                ("SCHOOLDESK_TIMEOUT_SECONDS", Some("30")),
                ("SCHOOLDESK_UPLOAD_MAX_MB", Some("2")),
                ("SCHOOLDESK_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["schooldesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).map(String::as_str),
                    Some(API)
                );
                assert_eq!(
                    matches
                        .get_one::<std::path::PathBuf>(ARG_STATE_DIR)
                        .map(|path| path.display().to_string()),
                    Some("/tmp/schooldesk-state".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(matches.get_one::<u64>(ARG_UPLOAD_MAX_MB).copied(), Some(2));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("SCHOOLDESK_LOG_LEVEL", Some(*level)),
                    ("SCHOOLDESK_API_URL", Some(API)),
                ],
                || {
                    let matches = new().get_matches_from(vec!["schooldesk", "menu"]);
                    assert_eq!(
                        matches
                            .get_one::<u8>(logging::ARG_VERBOSITY)
                            .map(|v| usize::from(*v)),
                        Some(index)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for count in 1..=4 {
            temp_env::with_vars(
                [
                    ("SCHOOLDESK_LOG_LEVEL", None::<&str>),
                    ("SCHOOLDESK_API_URL", Some(API)),
                ],
                || {
                    let flag = format!("-{}", "v".repeat(count));
                    let matches = new().get_matches_from(vec!["schooldesk", "menu", flag.as_str()]);
                    assert_eq!(
                        matches
                            .get_one::<u8>(logging::ARG_VERBOSITY)
                            .map(|v| usize::from(*v)),
                        Some(count)
                    );
                },
            );
        }
    }
}
