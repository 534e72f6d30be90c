//! Quest catalog loader.
//!
//! The catalog (`QuestInfo.json`) is a JSON array of [`QuestMetadata`]
//! bundled next to the binary. Parsing is all-or-nothing: any shape mismatch
//! is fatal for the pass.

use crate::augment::errors::AugmentError;
use crate::augment::pass::LOG_PREFIX;
use crate::augment::types::{QuestId, QuestMetadata};
use std::collections::HashMap;
use std::path::Path;

/// File name of the bundled catalog inside the resources directory.
pub const CATALOG_FILE_NAME: &str = "QuestInfo.json";

/// Parse raw catalog bytes.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<QuestMetadata>, AugmentError> {
    serde_json::from_slice(bytes).map_err(|source| AugmentError::CatalogParse { source })
}

/// Read and parse the catalog from disk.
pub async fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<QuestCatalog, AugmentError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let quests = parse_catalog(&bytes)?;
    log::debug!(
        "[Expanded Task Text] Parsed {} catalog entries from {}",
        quests.len(),
        path.display()
    );
    Ok(QuestCatalog::new(quests))
}

/// Parsed catalog with an id index. Iteration keeps file order.
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: Vec<QuestMetadata>,
    by_id: HashMap<QuestId, usize>,
}

impl QuestCatalog {
    pub fn new(quests: Vec<QuestMetadata>) -> Self {
        let mut by_id: HashMap<QuestId, usize> = HashMap::with_capacity(quests.len());
        let mut unique = Vec::with_capacity(quests.len());
        for quest in quests {
            // First entry wins; a repeated id would queue a second rewrite.
            if by_id.contains_key(&quest.id) {
                log::warn!(
                    "{} Ignoring duplicate catalog entry for `{}`",
                    LOG_PREFIX,
                    quest.id
                );
                continue;
            }
            by_id.insert(quest.id.clone(), unique.len());
            unique.push(quest);
        }
        Self {
            quests: unique,
            by_id,
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AugmentError> {
        parse_catalog(bytes).map(Self::new)
    }

    pub fn get(&self, id: &QuestId) -> Option<&QuestMetadata> {
        self.by_id.get(id).map(|&idx| &self.quests[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestMetadata> {
        self.quests.iter()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuestCatalog {
    type Item = &'a QuestMetadata;
    type IntoIter = std::slice::Iter<'a, QuestMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.quests.iter()
    }
}
