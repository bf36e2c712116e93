use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use devtips::Settings;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct Args {
    /// Directory holding config.json and tips.json (defaults to ~/.devtips)
    #[clap(long, env = "DEVTIPS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print debug logs to stderr
    #[clap(long, default_value = "false")]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the current settings
    Show,

    /// List tips, for one topic or all of them
    Tips {
        /// Only show this topic
        topic: Option<String>,
    },

    /// Change one or more settings
    Set(SetArgs),

    /// Append a tip to a topic
    AddTip {
        topic: String,
        tip: String,
    },

    /// Print the storage directory
    Path,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SetArgs {
    /// Notification time, as HH:MM
    #[clap(long)]
    pub time: Option<String>,

    /// Comma separated list of topics
    #[clap(long, value_delimiter = ',')]
    pub topics: Option<Vec<String>>,

    /// Turn notifications on
    #[clap(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Turn notifications off
    #[clap(long)]
    pub disable: bool,
}

impl SetArgs {
    /// Only the settings that were given on the command line
    pub fn updates(&self) -> Vec<(&'static str, Value)> {
        let mut updates = Vec::new();

        if let Some(time) = &self.time {
            updates.push((Settings::NOTIFICATION_TIME, Value::from(time.as_str())));
        }
        if let Some(topics) = &self.topics {
            updates.push((Settings::TOPICS, Value::from(topics.clone())));
        }
        if self.enable {
            updates.push((Settings::ENABLED, Value::Bool(true)));
        } else if self.disable {
            updates.push((Settings::ENABLED, Value::Bool(false)));
        }

        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_set_collects_only_given_keys() {
        let args = parse(&["devtips", "set", "--disable"]);
        let Command::Set(set) = args.command else {
            panic!("expected set command");
        };
        assert_eq!(set.updates(), vec![("enabled", json!(false))]);
    }

    #[test]
    fn test_set_splits_topics() {
        let args = parse(&["devtips", "set", "--time", "07:45", "--topics", "rust,git"]);
        let Command::Set(set) = args.command else {
            panic!("expected set command");
        };
        assert_eq!(
            set.updates(),
            vec![
                ("notification_time", json!("07:45")),
                ("topics", json!(["rust", "git"])),
            ]
        );
    }

    #[test]
    fn test_enable_and_disable_conflict() {
        assert!(Args::try_parse_from(["devtips", "set", "--enable", "--disable"]).is_err());
    }

    #[test]
    fn test_config_dir_flag() {
        let args = parse(&["devtips", "--config-dir", "/tmp/tips", "path"]);
        assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/tips")));
        assert!(matches!(args.command, Command::Path));
    }
}
