//! Locale augmentation engine.
//!
//! Prepends computed quest information (Collector/Lightkeeper requirement,
//! required keys, follow-up quests) to every quest description in every
//! loaded language.

pub mod applier;
pub mod cache;
pub mod catalog;
pub mod composer;
pub mod errors;
pub mod graph;
pub mod locale;
pub mod pass;
pub mod types;

pub use applier::{apply_to_all_languages, register_description_transform, AugmentReport};
pub use cache::DescriptionCache;
pub use catalog::{load_catalog_from_json, parse_catalog, QuestCatalog, CATALOG_FILE_NAME};
pub use composer::{join_prefix, DescriptionComposer};
pub use errors::{AugmentError, Omission, OmissionSink};
pub use graph::DependencyIndex;
pub use locale::{LazyLocale, LocaleDatabase, LocaleTable, Transformer};
pub use pass::{on_load, AugmentPass, LOG_PREFIX};
pub use types::*;
