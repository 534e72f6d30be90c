//! Locale tables and deferred (lazy) realization.
//!
//! A [`LazyLocale`] holds a loader and a queue of transformers. Nothing runs
//! until the table is first realized; at that point the loader runs once and
//! every queued transformer is applied exactly once, in registration order.
//! Later reads return the realized table without re-applying anything.

use crate::augment::errors::AugmentError;
use std::collections::BTreeMap;
use std::fmt;

/// Per-language mapping from string key to display string.
pub type LocaleTable = BTreeMap<String, String>;

/// Deferred mutation of a locale table.
pub type Transformer = Box<dyn FnOnce(LocaleTable) -> LocaleTable>;

/// Produces the raw table on first access.
pub type Loader = Box<dyn FnOnce() -> Result<LocaleTable, AugmentError>>;

enum LazyState {
    Pending {
        loader: Loader,
        transformers: Vec<Transformer>,
    },
    Realized(LocaleTable),
    Failed,
}

/// Locale table that is materialized on first access.
pub struct LazyLocale {
    language: String,
    state: LazyState,
}

impl LazyLocale {
    pub fn new<F>(language: &str, loader: F) -> Self
    where
        F: FnOnce() -> Result<LocaleTable, AugmentError> + 'static,
    {
        Self {
            language: language.to_string(),
            state: LazyState::Pending {
                loader: Box::new(loader),
                transformers: Vec::new(),
            },
        }
    }

    /// Lazy table over an in-memory snapshot.
    pub fn from_table(language: &str, table: LocaleTable) -> Self {
        Self::new(language, move || Ok(table))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_realized(&self) -> bool {
        matches!(self.state, LazyState::Realized(_))
    }

    /// Number of transformers waiting for realization.
    pub fn pending_transformers(&self) -> usize {
        match &self.state {
            LazyState::Pending { transformers, .. } => transformers.len(),
            _ => 0,
        }
    }

    /// Queue a transformer. If the table is already realized the transformer
    /// runs immediately against the live contents.
    pub fn add_transformer<F>(&mut self, transformer: F)
    where
        F: FnOnce(LocaleTable) -> LocaleTable + 'static,
    {
        match &mut self.state {
            LazyState::Pending { transformers, .. } => transformers.push(Box::new(transformer)),
            LazyState::Realized(table) => {
                let current = std::mem::take(table);
                *table = transformer(current);
            }
            LazyState::Failed => log::debug!(
                "Dropping transformer for locale `{}`: table failed to load",
                self.language
            ),
        }
    }

    /// Materialize the table, running the loader and queued transformers on
    /// first call only.
    pub fn realize(&mut self) -> Result<&LocaleTable, AugmentError> {
        let state = std::mem::replace(&mut self.state, LazyState::Failed);
        self.state = match state {
            LazyState::Pending {
                loader,
                transformers,
            } => {
                // A loader error leaves the table in the failed state.
                let table = loader()?;
                let applied = transformers.len();
                let table = transformers
                    .into_iter()
                    .fold(table, |table, transform| transform(table));
                log::trace!(
                    "Realized locale `{}` ({} entries, {} transformers)",
                    self.language,
                    table.len(),
                    applied
                );
                LazyState::Realized(table)
            }
            other => other,
        };

        match &self.state {
            LazyState::Realized(table) => Ok(table),
            _ => Err(AugmentError::LocaleUnavailable(self.language.clone())),
        }
    }

    /// Realize and take ownership of the table.
    pub fn into_table(mut self) -> Result<LocaleTable, AugmentError> {
        self.realize()?;
        match self.state {
            LazyState::Realized(table) => Ok(table),
            _ => Err(AugmentError::LocaleUnavailable(self.language)),
        }
    }
}

impl fmt::Debug for LazyLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            LazyState::Pending { transformers, .. } => format!("pending({})", transformers.len()),
            LazyState::Realized(table) => format!("realized({})", table.len()),
            LazyState::Failed => "failed".to_string(),
        };
        f.debug_struct("LazyLocale")
            .field("language", &self.language)
            .field("state", &state)
            .finish()
    }
}

/// Every loaded language plus the reference table used for name resolution.
#[derive(Debug)]
pub struct LocaleDatabase {
    reference_language: String,
    reference: LocaleTable,
    languages: BTreeMap<String, LazyLocale>,
}

impl LocaleDatabase {
    pub fn new(reference_language: &str, reference: LocaleTable) -> Self {
        Self {
            reference_language: reference_language.to_string(),
            reference,
            languages: BTreeMap::new(),
        }
    }

    pub fn with_language(mut self, locale: LazyLocale) -> Self {
        self.insert_language(locale);
        self
    }

    pub fn insert_language(&mut self, locale: LazyLocale) {
        self.languages.insert(locale.language().to_string(), locale);
    }

    pub fn reference_language(&self) -> &str {
        &self.reference_language
    }

    /// Snapshot used for key and quest-name lookups regardless of target language.
    pub fn reference(&self) -> &LocaleTable {
        &self.reference
    }

    /// Reference table alongside mutable access to every language, so a
    /// composer can borrow the former while transformers are queued on the latter.
    pub fn reference_and_languages_mut(
        &mut self,
    ) -> (&LocaleTable, impl Iterator<Item = (&str, &mut LazyLocale)>) {
        let languages = self
            .languages
            .iter_mut()
            .map(|(code, locale)| (code.as_str(), locale));
        (&self.reference, languages)
    }

    pub fn language(&mut self, code: &str) -> Option<&mut LazyLocale> {
        self.languages.get_mut(code)
    }

    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Consume the database, realizing every language.
    pub fn into_realized(self) -> Result<BTreeMap<String, LocaleTable>, AugmentError> {
        self.languages
            .into_iter()
            .map(|(code, locale)| locale.into_table().map(|table| (code, table)))
            .collect()
    }
}
