//! Queues description rewrites on every loaded language.
//!
//! Each (quest, language) pair gets one transformer. When the language table
//! is realized the transformer reads that table's own description and
//! replaces it with `prefix + "\n\n" + description`. The prefix comes from
//! the [`DescriptionCache`], so it is composed once per quest and shared by
//! all languages.

use crate::augment::cache::DescriptionCache;
use crate::augment::catalog::QuestCatalog;
use crate::augment::composer::{join_prefix, DescriptionComposer};
use crate::augment::errors::{Omission, OmissionSink};
use crate::augment::graph::DependencyIndex;
use crate::augment::locale::{LazyLocale, LocaleDatabase, LocaleTable};
use crate::augment::types::{description_key, QuestDatabase, QuestId};
use std::time::Duration;

/// Outcome of one augmentation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentReport {
    pub quests_in_catalog: usize,
    pub quests_augmented: usize,
    pub quests_skipped: usize,
    pub transformers_registered: usize,
    pub compositions: usize,
    pub omissions: Vec<Omission>,
    pub elapsed: Duration,
}

impl AugmentReport {
    pub fn is_clean(&self) -> bool {
        self.omissions.is_empty()
    }
}

/// Register a rewrite of `quest`'s description on `locale`.
pub fn register_description_transform(locale: &mut LazyLocale, quest: &QuestId, prefix: &str) {
    let quest = quest.clone();
    let prefix = prefix.to_string();
    let language = locale.language().to_string();
    locale.add_transformer(move |table| rewrite_description(table, &quest, &prefix, &language));
}

fn rewrite_description(
    mut table: LocaleTable,
    quest: &QuestId,
    prefix: &str,
    language: &str,
) -> LocaleTable {
    match table.get_mut(&description_key(quest)) {
        Some(original) => *original = join_prefix(prefix, original),
        None => Omission::MissingLanguageDescriptionKey {
            quest: quest.clone(),
            language: language.to_string(),
        }
        .log(),
    }
    table
}

/// Walk the catalog and queue transformers on every language.
///
/// Quests missing from the live database, or without a description in the
/// reference table, are skipped for all languages.
pub fn apply_to_all_languages(
    catalog: &QuestCatalog,
    quests: &QuestDatabase,
    locales: &mut LocaleDatabase,
    cache: &mut DescriptionCache,
) -> AugmentReport {
    let index = DependencyIndex::build(quests);
    let mut report = AugmentReport {
        quests_in_catalog: catalog.len(),
        ..AugmentReport::default()
    };

    for info in catalog {
        if !quests.contains(&info.id) {
            report.omissions.omit(Omission::UnknownQuest {
                quest: info.id.clone(),
            });
            report.quests_skipped += 1;
            continue;
        }

        let (reference, languages) = locales.reference_and_languages_mut();
        if !reference.contains_key(&description_key(&info.id)) {
            report.omissions.omit(Omission::MissingQuestDescription {
                quest: info.id.clone(),
            });
            report.quests_skipped += 1;
            continue;
        }

        let composer = DescriptionComposer::new(&index, reference);
        for (_, locale) in languages {
            let prefix = cache.get_or_compose(info, &composer, &mut report.omissions);
            register_description_transform(locale, &info.id, prefix);
            report.transformers_registered += 1;
        }
        report.quests_augmented += 1;
    }

    report.compositions = cache.computations();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::types::{MongoId, QuestMetadata, QuestRecord};

    const Q1: &str = "5936d90786f7742b1420ba5b";
    const Q2: &str = "5967733e86f774602332fc84";

    fn id(raw: &str) -> MongoId {
        MongoId::parse(raw).unwrap()
    }

    fn table(entries: &[(String, &str)]) -> LocaleTable {
        entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    #[test]
    fn each_language_keeps_its_own_description() {
        let catalog = QuestCatalog::new(vec![QuestMetadata::new(id(Q1))]);
        let quests = QuestDatabase::new().with_quest(id(Q1), QuestRecord::default());
        let desc = format!("{Q1} description");
        let mut locales = LocaleDatabase::new("en", table(&[(desc.clone(), "Find the stash.")]))
            .with_language(LazyLocale::from_table("en", table(&[(desc.clone(), "Find the stash.")])))
            .with_language(LazyLocale::from_table("fr", table(&[(desc.clone(), "Trouvez la cache.")])));

        let mut cache = DescriptionCache::new();
        let report = apply_to_all_languages(&catalog, &quests, &mut locales, &mut cache);
        assert_eq!(report.transformers_registered, 2);
        assert_eq!(report.compositions, 1);
        assert!(report.is_clean());

        let tables = locales.into_realized().unwrap();
        assert_eq!(
            tables["en"][&desc],
            "No keys required.\n\nLeads to: Nothing\n\nFind the stash."
        );
        assert_eq!(
            tables["fr"][&desc],
            "No keys required.\n\nLeads to: Nothing\n\nTrouvez la cache."
        );
    }

    #[test]
    fn duplicate_catalog_entry_is_prefixed_once() {
        let catalog = QuestCatalog::new(vec![QuestMetadata::new(id(Q1)), QuestMetadata::new(id(Q1))]);
        let quests = QuestDatabase::new().with_quest(id(Q1), QuestRecord::default());
        let desc = format!("{Q1} description");
        let mut locales = LocaleDatabase::new("en", table(&[(desc.clone(), "Orig")]))
            .with_language(LazyLocale::from_table("en", table(&[(desc.clone(), "Orig")])));

        let report =
            apply_to_all_languages(&catalog, &quests, &mut locales, &mut DescriptionCache::new());
        assert_eq!(report.quests_augmented, 1);
        assert_eq!(report.transformers_registered, 1);

        let tables = locales.into_realized().unwrap();
        assert_eq!(
            tables["en"][&desc],
            "No keys required.\n\nLeads to: Nothing\n\nOrig"
        );
    }

    #[test]
    fn nothing_is_applied_before_realization() {
        let catalog = QuestCatalog::new(vec![QuestMetadata::new(id(Q1))]);
        let quests = QuestDatabase::new().with_quest(id(Q1), QuestRecord::default());
        let desc = format!("{Q1} description");
        let mut locales = LocaleDatabase::new("en", table(&[(desc.clone(), "x")]))
            .with_language(LazyLocale::from_table("en", table(&[(desc.clone(), "x")])));

        apply_to_all_languages(&catalog, &quests, &mut locales, &mut DescriptionCache::new());
        let en = locales.language("en").unwrap();
        assert!(!en.is_realized());
        assert_eq!(en.pending_transformers(), 1);
    }

    #[test]
    fn language_without_key_is_left_alone() {
        let catalog = QuestCatalog::new(vec![QuestMetadata::new(id(Q1))]);
        let quests = QuestDatabase::new().with_quest(id(Q1), QuestRecord::default());
        let desc = format!("{Q1} description");
        let mut locales = LocaleDatabase::new("en", table(&[(desc.clone(), "x")]))
            .with_language(LazyLocale::from_table("de", table(&[("other".into(), "y")])));

        apply_to_all_languages(&catalog, &quests, &mut locales, &mut DescriptionCache::new());
        let tables = locales.into_realized().unwrap();
        assert_eq!(tables["de"].len(), 1);
        assert_eq!(tables["de"]["other"], "y");
    }

    #[test]
    fn skips_quests_missing_from_database_or_reference() {
        let catalog = QuestCatalog::new(vec![
            QuestMetadata::new(id(Q1)),
            QuestMetadata::new(id(Q2)),
        ]);
        // Q1 has no reference description, Q2 is not in the database.
        let quests = QuestDatabase::new().with_quest(id(Q1), QuestRecord::default());
        let mut locales = LocaleDatabase::new("en", LocaleTable::new())
            .with_language(LazyLocale::from_table("en", LocaleTable::new()));

        let report =
            apply_to_all_languages(&catalog, &quests, &mut locales, &mut DescriptionCache::new());
        assert_eq!(report.quests_skipped, 2);
        assert_eq!(report.quests_augmented, 0);
        assert_eq!(report.transformers_registered, 0);
        assert_eq!(
            report.omissions,
            vec![
                Omission::MissingQuestDescription { quest: id(Q1) },
                Omission::UnknownQuest { quest: id(Q2) },
            ]
        );
    }
}
