//! # Expanded Task Text
//!
//! Prepends cross-referenced information to every quest description in a
//! game's locale tables:
//!
//! - whether the quest is required for Collector (Kappa) or Lightkeeper,
//! - which keys its objectives require, resolved to display names,
//! - which quests it unlocks, resolved to display names.
//!
//! The rewrite runs once per process, after the host has loaded its quest
//! database and locale tables. Rewrites are queued as deferred transformers
//! on each lazily loaded language and applied when that table is realized.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use expanded_task_text::augment::on_load;
//! use expanded_task_text::config::Config;
//! use expanded_task_text::host::{load_quest_database, open_locale_database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let quests = load_quest_database(&config.paths.quests).await?;
//!     let mut locales = open_locale_database(&config.paths.locales_dir, &config.augment).await?;
//!
//!     let report = on_load(&config.paths.catalog, &quests, &mut locales).await?;
//!     println!("{} quests augmented", report.quests_augmented);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`augment`] - catalog loading, dependency index, composition, cache and transform registration
//! - [`host`] - file-backed quest database and locale directory used by the CLI
//! - [`config`] - TOML configuration
//! - [`logutil`] - single-line escaping of locale text for logs

pub mod augment;
pub mod config;
pub mod host;
pub mod logutil;
