//! One-shot augmentation pass.
//!
//! Intended to run once, after every quest and locale has been loaded by the
//! host. [`AugmentPass::run`] consumes the pass so it cannot be replayed
//! against tables that already carry a prefix.

use crate::augment::applier::{apply_to_all_languages, AugmentReport};
use crate::augment::cache::DescriptionCache;
use crate::augment::catalog::{load_catalog_from_json, QuestCatalog};
use crate::augment::errors::AugmentError;
use crate::augment::locale::LocaleDatabase;
use crate::augment::types::QuestDatabase;
use log::{error, info};
use std::path::Path;
use std::time::Instant;

pub const LOG_PREFIX: &str = "[Expanded Task Text]";

#[derive(Debug)]
pub struct AugmentPass {
    catalog: QuestCatalog,
    cache: DescriptionCache,
}

impl AugmentPass {
    pub fn new(catalog: QuestCatalog) -> Self {
        Self {
            catalog,
            cache: DescriptionCache::new(),
        }
    }

    /// Load the bundled catalog. A missing or malformed file is fatal.
    pub async fn load<P: AsRef<Path>>(catalog_path: P) -> Result<Self, AugmentError> {
        match load_catalog_from_json(catalog_path.as_ref()).await {
            Ok(catalog) => Ok(Self::new(catalog)),
            Err(e) => {
                error!(
                    "{} Failed to load quest catalog {}: {}",
                    LOG_PREFIX,
                    catalog_path.as_ref().display(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Queue description rewrites on every language in `locales`.
    pub fn run(mut self, quests: &QuestDatabase, locales: &mut LocaleDatabase) -> AugmentReport {
        let started = Instant::now();
        info!("{} Loading please wait...", LOG_PREFIX);

        let mut report = apply_to_all_languages(&self.catalog, quests, locales, &mut self.cache);
        report.elapsed = started.elapsed();

        info!(
            "{} Completed loading in {:.2} seconds.",
            LOG_PREFIX,
            report.elapsed.as_secs_f32()
        );
        if !report.is_clean() {
            info!(
                "{} {} of {} quests augmented across {} languages ({} omissions)",
                LOG_PREFIX,
                report.quests_augmented,
                report.quests_in_catalog,
                locales.language_codes().count(),
                report.omissions.len()
            );
        }
        report
    }
}

/// Load the catalog from `catalog_path` and run a full pass.
pub async fn on_load<P: AsRef<Path>>(
    catalog_path: P,
    quests: &QuestDatabase,
    locales: &mut LocaleDatabase,
) -> Result<AugmentReport, AugmentError> {
    let pass = AugmentPass::load(catalog_path).await?;
    Ok(pass.run(quests, locales))
}
