use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::ActivityForm;

pub const DEFAULT_PROJECT_FILE: &str = "witw.board";

#[derive(Debug, Parser)]
#[command(name = "witw")]
#[command(about = "Browse community activities, sign up and leave comments")]
pub struct Cli {
    /// Board file holding activities and the session user
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_PROJECT_FILE)]
    pub project: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every activity (the default)
    List,
    /// Join an activity, or leave it if already attending
    Attend {
        #[arg(value_name = "ID")]
        activity_id: i64,
    },
    /// Comment on an activity
    Comment {
        #[arg(value_name = "ID")]
        activity_id: i64,
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Create a new activity
    Create(CreateArgs),
    /// Find activities by name
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Activities dated today or later
    Upcoming {
        /// First date to include (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE")]
        from: Option<String>,
    },
    /// Show or edit the session profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Switch between dark and light display
    Theme {
        #[arg(value_enum)]
        mode: ThemeMode,
    },
    /// Show the map section
    Map,
    /// Open the desktop window
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub place: String,
    #[arg(long, default_value = "")]
    pub date: String,
    #[arg(long, default_value = "")]
    pub time: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Image URL shown on the activity card
    #[arg(long, default_value = "")]
    pub image: String,
    /// Maximum attendees; anything but a positive number means 10
    #[arg(long, default_value = "")]
    pub capacity: String,
}

impl CreateArgs {
    pub fn to_form(&self) -> ActivityForm {
        ActivityForm::from_fields([
            (ActivityForm::NAME, self.name.as_str()),
            (ActivityForm::PLACE, self.place.as_str()),
            (ActivityForm::DATE, self.date.as_str()),
            (ActivityForm::TIME, self.time.as_str()),
            (ActivityForm::DESCRIPTION, self.description.as_str()),
            (ActivityForm::IMAGE_REF, self.image.as_str()),
            (ActivityForm::CAPACITY, self.capacity.as_str()),
        ])
    }
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Edit {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Use an image file as avatar
    Avatar {
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub project_file: PathBuf,
    pub verbose: bool,
}

impl AppConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "witw=debug" } else { "witw=info" }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            project_file: cli.project.clone(),
            verbose: cli.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_board_in_working_dir() {
        let cli = Cli::try_parse_from(["witw"]).unwrap();
        let config = AppConfig::from(&cli);
        assert_eq!(config.project_file, PathBuf::from(DEFAULT_PROJECT_FILE));
        assert_eq!(config.default_log_filter(), "witw=info");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_comment_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["witw", "comment", "2", "nice", "--project", "x.board", "-v"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Comment { activity_id: 2, ref text }) if text == "nice"
        ));
        assert_eq!(AppConfig::from(&cli).default_log_filter(), "witw=debug");
    }

    #[test]
    fn create_keeps_capacity_as_text() {
        let cli = Cli::try_parse_from(["witw", "create", "--name", "Evento", "--capacity", "abc"])
            .unwrap();
        match cli.command {
            Some(Command::Create(args)) => {
                assert_eq!(args.name, "Evento");
                assert_eq!(args.capacity, "abc");
                assert_eq!(args.to_form().capacity(), 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
