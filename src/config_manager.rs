use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::directory::{global_devtips_dir, DevtipsDirectory};
use crate::persistence::{read_json, write_json};

/// Notification preferences persisted as `config.json`.
///
/// This is an open JSON object: keys written by other tools or older
/// versions are kept, and a file missing one of the well-known keys loads
/// fine. The typed accessors return `None` in that case.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    pub const NOTIFICATION_TIME: &'static str = "notification_time";
    pub const TOPICS: &'static str = "topics";
    pub const ENABLED: &'static str = "enabled";

    /// Time of day to notify, as "HH:MM"
    pub fn notification_time(&self) -> Option<&str> {
        self.0.get(Self::NOTIFICATION_TIME)?.as_str()
    }

    /// Topics the user wants tips for, in configured order
    pub fn topics(&self) -> Option<Vec<&str>> {
        self.0
            .get(Self::TOPICS)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    pub fn enabled(&self) -> Option<bool> {
        self.0.get(Self::ENABLED)?.as_bool()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Overwrite or insert each key in turn
    fn merge<I, K>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in updates {
            self.0.insert(key.into(), value);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert(Self::NOTIFICATION_TIME.to_string(), Value::from("09:00"));
        map.insert(
            Self::TOPICS.to_string(),
            Value::from(vec!["python", "javascript", "devops", "git"]),
        );
        map.insert(Self::ENABLED.to_string(), Value::from(true));
        Settings(map)
    }
}

/// Topic name to tip list, persisted as `tips.json`. Topics keep file order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Tips(IndexMap<String, Vec<String>>);

impl Tips {
    pub fn for_topic(&self, topic: &str) -> Option<&[String]> {
        self.0.get(topic).map(Vec::as_slice)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(topic, tips)| (topic.as_str(), tips.as_slice()))
    }

    /// Append a tip, creating the topic if needed
    pub fn add_tip(&mut self, topic: impl Into<String>, tip: impl Into<String>) {
        self.0.entry(topic.into()).or_default().push(tip.into());
    }
}

impl Default for Tips {
    fn default() -> Self {
        let placeholders = [
            ("python", ["Tip 1", "Tip 2"]),
            ("javascript", ["Tip 3", "Tip 4"]),
            ("devops", ["Tip 5", "Tip 6"]),
            ("git", ["Tip 7", "Tip 8"]),
        ];

        Tips(
            placeholders
                .into_iter()
                .map(|(topic, tips)| {
                    (
                        topic.to_string(),
                        tips.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Single access point for reading and persisting settings and tips.
///
/// Construction creates the storage directory if needed and loads both
/// files, writing the built-in defaults for whichever is missing. After
/// that the in-memory copies are what callers read; the save methods write
/// them back in full.
pub struct ConfigManager {
    directory: DevtipsDirectory,
    config: Settings,
    tips: Tips,
}

impl ConfigManager {
    /// Open the store in `config_dir`, or in `~/.devtips` when none is given
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let directory = match config_dir {
            Some(root) => DevtipsDirectory::new(root),
            None => global_devtips_dir()?,
        };
        directory.create()?;

        let config = Self::load_config(&directory)?;
        let tips = Self::load_tips(&directory)?;

        debug!("ConfigManager initialized at {}", directory.root.display());
        Ok(Self {
            directory,
            config,
            tips,
        })
    }

    /// Read `config.json`, writing the defaults first if it does not exist
    fn load_config(directory: &DevtipsDirectory) -> Result<Settings> {
        if directory.has_config() {
            return read_json(&directory.config_file);
        }

        info!(
            "No settings found, writing defaults to {}",
            directory.config_file.display()
        );
        let default_config = Settings::default();
        write_json(&directory.config_file, &default_config)?;
        Ok(default_config)
    }

    /// Read `tips.json`, writing the defaults first if it does not exist
    fn load_tips(directory: &DevtipsDirectory) -> Result<Tips> {
        if directory.has_tips() {
            return read_json(&directory.tips_file);
        }

        info!(
            "No tips found, writing defaults to {}",
            directory.tips_file.display()
        );
        let default_tips = Tips::default();
        write_json(&directory.tips_file, &default_tips)?;
        Ok(default_tips)
    }

    /// Current in-memory settings
    pub fn settings(&self) -> &Settings {
        &self.config
    }

    /// Current in-memory tips
    pub fn tips(&self) -> &Tips {
        &self.tips
    }

    /// Storage directory backing this store
    pub fn directory(&self) -> &DevtipsDirectory {
        &self.directory
    }

    /// Write settings to disk. With `Some`, the given value is written and
    /// becomes the in-memory settings; with `None`, the current ones are written.
    pub fn save_config(&mut self, config: Option<Settings>) -> Result<()> {
        match config {
            Some(config) => {
                write_json(&self.directory.config_file, &config)?;
                self.config = config;
            }
            None => write_json(&self.directory.config_file, &self.config)?,
        }

        debug!("Saved settings to {}", self.directory.config_file.display());
        Ok(())
    }

    /// Write tips to disk, same contract as [`ConfigManager::save_config`]
    pub fn save_tips(&mut self, tips: Option<Tips>) -> Result<()> {
        match tips {
            Some(tips) => {
                write_json(&self.directory.tips_file, &tips)?;
                self.tips = tips;
            }
            None => write_json(&self.directory.tips_file, &self.tips)?,
        }

        debug!("Saved tips to {}", self.directory.tips_file.display());
        Ok(())
    }

    /// Merge `updates` into the current settings and persist the whole result
    pub fn update_config<I, K>(&mut self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.config.merge(updates);
        self.save_config(None)
    }

    /// Configured topics that have no entry in the tips file
    pub fn topics_without_tips(&self) -> Vec<String> {
        self.config
            .topics()
            .unwrap_or_default()
            .into_iter()
            .filter(|topic| self.tips.for_topic(topic).is_none())
            .map(str::to_string)
            .collect()
    }
}
