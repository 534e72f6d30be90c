//! File-backed host for running the pass outside a game server.
//!
//! The quest database is read eagerly. Each `<lang>.json` in the locale
//! directory becomes a [`LazyLocale`] whose loader reads the file on first
//! realization; the reference language is additionally read up front as the
//! name-resolution snapshot.

use crate::augment::{AugmentError, LazyLocale, LocaleDatabase, LocaleTable, QuestDatabase};
use crate::config::AugmentConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Read the host quest database (`{ "<id>": { "conditions": ... }, ... }`).
pub async fn load_quest_database<P: AsRef<Path>>(path: P) -> Result<QuestDatabase, AugmentError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let quests: QuestDatabase = serde_json::from_slice(&bytes)
        .map_err(|source| AugmentError::QuestDatabaseParse { source })?;
    log::debug!(
        "Loaded {} quests from {}",
        quests.len(),
        path.as_ref().display()
    );
    Ok(quests)
}

/// Read one locale table synchronously.
pub fn read_locale_table(language: &str, path: &Path) -> Result<LocaleTable, AugmentError> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| AugmentError::LocaleParse {
        language: language.to_string(),
        source,
    })
}

/// Language codes with a `<code>.json` table in `dir`, sorted.
pub async fn discover_languages<P: AsRef<Path>>(dir: P) -> Result<Vec<(String, PathBuf)>, AugmentError> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            if let Some(code) = path.file_stem().and_then(|s| s.to_str()) {
                found.push((code.to_string(), path.clone()));
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Build the locale database from a directory of tables.
pub async fn open_locale_database<P: AsRef<Path>>(
    dir: P,
    settings: &AugmentConfig,
) -> Result<LocaleDatabase, AugmentError> {
    let languages = discover_languages(dir.as_ref()).await?;

    let reference_code = settings.reference_language.as_str();
    let reference_path = languages
        .iter()
        .find(|(code, _)| code == reference_code)
        .map(|(_, path)| path.clone())
        .ok_or_else(|| AugmentError::MissingReferenceLocale(reference_code.to_string()))?;
    let reference_bytes = tokio::fs::read(&reference_path).await?;
    let reference: LocaleTable =
        serde_json::from_slice(&reference_bytes).map_err(|source| AugmentError::LocaleParse {
            language: reference_code.to_string(),
            source,
        })?;

    let mut db = LocaleDatabase::new(reference_code, reference);
    for (code, path) in languages {
        if !settings.includes(&code) {
            log::debug!("Skipping locale `{}` (not in configured languages)", code);
            continue;
        }
        let language = code.clone();
        db.insert_language(LazyLocale::new(&code, move || {
            read_locale_table(&language, &path)
        }));
    }
    Ok(db)
}

/// Write realized tables as `<dir>/<lang>.json`. Returns the number written.
///
/// Keys are written in sorted order ([`LocaleTable`] is a `BTreeMap`), not in
/// the order of the source file.
pub async fn write_locale_tables<P: AsRef<Path>>(
    dir: P,
    tables: &BTreeMap<String, LocaleTable>,
) -> Result<usize, AugmentError> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    for (code, table) in tables {
        let json = serde_json::to_vec_pretty(table).map_err(std::io::Error::from)?;
        tokio::fs::write(dir.join(format!("{}.json", code)), json).await?;
    }
    Ok(tables.len())
}
