use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of clock updates per second",
        default_value_t = 1.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 30.0
    )]
    pub frame_rate: f64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Browse and delete your letters (default)
    Dashboard,

    /// Store the bearer token handed out by the web login
    Login {
        #[arg(long, value_name = "TOKEN")]
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Schedule a new letter
    #[command(group(ArgGroup::new("body").required(true).args(["content", "content_file"])))]
    Write {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: Option<String>,

        /// Read the letter body from a file
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,

        /// Delivery day, delivered at noon local time
        #[arg(long, value_name = "YYYY-MM-DD")]
        deliver_on: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["futureletters"]).expect("parse");

        assert_eq!(cli.command, None);
        assert_eq!(cli.tick_rate, 1.0);
        assert_eq!(cli.frame_rate, 30.0);
    }

    #[test]
    fn test_write_parses_date() {
        let cli = Cli::try_parse_from([
            "futureletters",
            "write",
            "--title",
            "Hello",
            "--content",
            "Dear me",
            "--deliver-on",
            "2031-02-03",
        ])
        .expect("parse");

        assert_eq!(
            cli.command,
            Some(Command::Write {
                title: "Hello".to_string(),
                content: Some("Dear me".to_string()),
                content_file: None,
                deliver_on: NaiveDate::from_ymd_opt(2031, 2, 3).expect("valid date"),
            })
        );
    }

    #[test]
    fn test_write_requires_a_body() {
        let result = Cli::try_parse_from([
            "futureletters",
            "write",
            "--title",
            "Hello",
            "--deliver-on",
            "2031-02-03",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_write_rejects_malformed_date() {
        let result = Cli::try_parse_from([
            "futureletters",
            "write",
            "--title",
            "Hello",
            "--content",
            "x",
            "--deliver-on",
            "03/02/2031",
        ]);

        assert!(result.is_err());
    }
}
