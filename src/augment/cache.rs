//! Memo of composed prefixes keyed by quest id.
//!
//! Composition reads only the reference table, so the key deliberately
//! excludes the target language: every language receives the same prefix.
//! Entries are never evicted; the cache lives for one augmentation pass.

use crate::augment::composer::DescriptionComposer;
use crate::augment::errors::OmissionSink;
use crate::augment::types::{QuestId, QuestMetadata};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: HashMap<QuestId, String>,
    computations: usize,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `quest`, running `compute` only on the first call.
    pub fn get_or_compute<F>(&mut self, quest: &QuestId, compute: F) -> &str
    where
        F: FnOnce() -> String,
    {
        let computations = &mut self.computations;
        self.entries.entry(quest.clone()).or_insert_with(|| {
            *computations += 1;
            compute()
        })
    }

    /// Cached prefix for `info`, composed against the composer's reference table.
    pub fn get_or_compose<S: OmissionSink>(
        &mut self,
        info: &QuestMetadata,
        composer: &DescriptionComposer<'_>,
        omissions: &mut S,
    ) -> &str {
        self.get_or_compute(&info.id, || {
            let prefix = composer.compose_prefix(info, omissions);
            log::trace!(
                "Composed prefix for {}: {}",
                info.id,
                crate::logutil::escape_log(&prefix)
            );
            prefix
        })
    }

    pub fn get(&self, quest: &QuestId) -> Option<&str> {
        self.entries.get(quest).map(String::as_str)
    }

    /// Number of times a value was actually computed.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::errors::Omission;
    use crate::augment::graph::DependencyIndex;
    use crate::augment::locale::LocaleTable;
    use crate::augment::types::{MongoId, QuestDatabase};

    #[test]
    fn computes_once_per_id() {
        let id = MongoId::parse("5936d90786f7742b1420ba5b").unwrap();
        let mut cache = DescriptionCache::new();
        let mut calls = 0;

        for _ in 0..5 {
            let value = cache
                .get_or_compute(&id, || {
                    calls += 1;
                    "prefix".to_string()
                })
                .to_string();
            assert_eq!(value, "prefix");
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.computations(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn language_does_not_affect_cached_value() {
        let db = QuestDatabase::new();
        let index = DependencyIndex::build(&db);
        let mut reference = LocaleTable::new();
        reference.insert("unused".into(), "x".into());
        let composer = DescriptionComposer::new(&index, &reference);
        let info = QuestMetadata::new(MongoId::parse("5936d90786f7742b1420ba5b").unwrap()).with_kappa();

        let mut cache = DescriptionCache::new();
        let mut omissions: Vec<Omission> = Vec::new();
        let results: Vec<String> = ["en", "fr", "ru", "ch"]
            .iter()
            .map(|_lang| cache.get_or_compose(&info, &composer, &mut omissions).to_string())
            .collect();

        assert!(results.iter().all(|r| r == &results[0]));
        assert_eq!(cache.computations(), 1);
        assert_eq!(cache.get(&info.id), Some(results[0].as_str()));
    }
}
