//! # Configuration Management Module
//!
//! Settings for the `ett` binary: where the bundled catalog, the quest
//! database and the locale tables live, which language is the reference for
//! name resolution, and how logging is set up.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [paths]
//! catalog = "Resources/QuestInfo.json"
//! quests = "database/templates/quests.json"
//! locales_dir = "database/locales/global"
//! output_dir = "augmented"
//!
//! [augment]
//! reference_language = "en"
//! languages = []          # empty = every <lang>.json in locales_dir
//!
//! [logging]
//! level = "info"
//! file = "ett.log"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use expanded_task_text::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Reference language: {}", config.augment.reference_language);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub augment: AugmentConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Bundled quest catalog (`QuestInfo.json`).
    pub catalog: PathBuf,
    /// Host quest database: JSON object of quest id to quest record.
    pub quests: PathBuf,
    /// Directory holding one `<lang>.json` table per language.
    pub locales_dir: PathBuf,
    /// Where augmented tables are written.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Language whose table resolves key and quest names for every language.
    #[serde(default = "default_reference_language")]
    pub reference_language: String,
    /// Restrict the pass to these languages. Empty means all tables found.
    #[serde(default)]
    pub languages: Vec<String>,
}

fn default_reference_language() -> String {
    "en".to_string()
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            reference_language: default_reference_language(),
            languages: Vec::new(),
        }
    }
}

impl AugmentConfig {
    /// Whether `language` takes part in the pass.
    pub fn includes(&self, language: &str) -> bool {
        self.languages.is_empty() || self.languages.iter().any(|l| l == language)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        if config.augment.reference_language.trim().is_empty() {
            return Err(anyhow!(
                "Invalid config file {}: augment.reference_language must not be empty",
                path
            ));
        }

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: PathsConfig {
                catalog: PathBuf::from("Resources").join(crate::augment::CATALOG_FILE_NAME),
                quests: PathBuf::from("database/templates/quests.json"),
                locales_dir: PathBuf::from("database/locales/global"),
                output_dir: PathBuf::from("augmented"),
            },
            augment: AugmentConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}
