use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::{Args, Command};
use devtips::{ConfigManager, Settings};

fn setup_logging(debug: bool) {
    let level = if debug {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::WARN
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(debug)
        .with_line_number(debug);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.debug);
    debug!("Parsed args: {:?}", args);

    let mut manager = ConfigManager::new(args.config_dir.clone())?;

    run(&mut manager, args.command)
}

fn run(manager: &mut ConfigManager, command: Command) -> Result<()> {
    match command {
        Command::Show => show_settings(manager),
        Command::Tips { topic } => show_tips(manager, topic.as_deref())?,
        Command::Set(set) => {
            let updates = set.updates();
            if updates.is_empty() {
                bail!("Nothing to set; pass --time, --topics, --enable or --disable");
            }
            manager.update_config(updates)?;
            info!("Settings updated");
            show_settings(manager);
        }
        Command::AddTip { topic, tip } => {
            add_tip(manager, &topic, tip)?;
            println!("Added tip to {}", topic.bold());
        }
        Command::Path => println!("{}", manager.directory().root.display()),
    }

    Ok(())
}

fn add_tip(manager: &mut ConfigManager, topic: &str, tip: String) -> Result<()> {
    let mut tips = manager.tips().clone();
    tips.add_tip(topic, tip);
    manager.save_tips(Some(tips))
}

fn show_settings(manager: &ConfigManager) {
    let settings = manager.settings();
    let fallback =
        |value: Option<String>| value.unwrap_or_else(|| "(not set)".dimmed().to_string());

    println!(
        "{:<18} {}",
        "notification_time".bold(),
        fallback(settings.notification_time().map(str::to_string))
    );
    println!(
        "{:<18} {}",
        "topics".bold(),
        fallback(settings.topics().map(|topics| topics.join(", ")))
    );
    println!(
        "{:<18} {}",
        "enabled".bold(),
        fallback(settings.enabled().map(|enabled| enabled.to_string()))
    );

    let known = [Settings::NOTIFICATION_TIME, Settings::TOPICS, Settings::ENABLED];
    for (key, value) in settings.as_map() {
        if !known.contains(&key.as_str()) {
            println!("{:<18} {}", key.bold(), value);
        }
    }

    for topic in manager.topics_without_tips() {
        warn!("Topic '{}' has no tips", topic);
    }
}

fn show_tips(manager: &ConfigManager, topic: Option<&str>) -> Result<()> {
    let width = textwrap::termwidth().saturating_sub(4).max(20);
    let options = textwrap::Options::new(width)
        .initial_indent("  - ")
        .subsequent_indent("    ");

    let print_topic = |name: &str, tips: &[String]| {
        println!("{}", name.cyan().bold());
        if tips.is_empty() {
            println!("  {}", "(no tips)".dimmed());
        }
        for tip in tips {
            println!("{}", textwrap::fill(tip, &options));
        }
    };

    match topic {
        Some(name) => match manager.tips().for_topic(name) {
            Some(tips) => print_topic(name, tips),
            None => bail!("No tips for topic '{}'", name),
        },
        None => {
            for (name, tips) in manager.tips().iter() {
                print_topic(name, tips);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::new(Some(temp_dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_add_tip_is_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);

        let command = Command::AddTip {
            topic: "rust".to_string(),
            tip: "Run clippy".to_string(),
        };
        run(&mut manager, command).unwrap();

        let reopened = open(&temp_dir);
        assert_eq!(reopened.tips().for_topic("rust").unwrap(), &["Run clippy"]);
        assert_eq!(reopened.tips().for_topic("git").unwrap(), &["Tip 7", "Tip 8"]);
    }

    #[test]
    fn test_unknown_topic_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = open(&temp_dir);

        let err = show_tips(&manager, Some("cobol")).unwrap_err();
        assert!(err.to_string().contains("cobol"));
        assert!(show_tips(&manager, Some("git")).is_ok());
        assert!(show_tips(&manager, None).is_ok());
    }

    #[test]
    fn test_set_without_flags_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);

        assert!(run(&mut manager, Command::Set(Default::default())).is_err());
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_set_updates_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = open(&temp_dir);

        let set = config::SetArgs {
            time: Some("06:00".to_string()),
            ..Default::default()
        };
        run(&mut manager, Command::Set(set)).unwrap();

        let reopened = open(&temp_dir);
        assert_eq!(reopened.settings().notification_time(), Some("06:00"));
        assert_eq!(reopened.settings().get("enabled"), Some(&json!(true)));
    }
}
