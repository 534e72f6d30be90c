use crate::augment::pass::LOG_PREFIX;
use crate::augment::types::QuestId;
use std::fmt;
use thiserror::Error;

/// Errors that abort the augmentation pass.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The bundled quest catalog does not match the expected shape.
    #[error("failed to parse quest catalog: {source}")]
    CatalogParse {
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper around IO errors (catalog, quest database or locale files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The host quest database could not be parsed.
    #[error("failed to parse quest database: {source}")]
    QuestDatabaseParse {
        #[source]
        source: serde_json::Error,
    },

    /// A per-language locale table could not be parsed when it was realized.
    #[error("failed to parse locale table `{language}`: {source}")]
    LocaleParse {
        language: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lazily loaded table failed earlier and cannot be realized.
    #[error("locale `{0}` is unavailable after a failed load")]
    LocaleUnavailable(String),

    /// The configured reference language has no table.
    #[error("reference locale `{0}` is not loaded")]
    MissingReferenceLocale(String),
}

/// Recoverable problems found during the pass. Each one is logged and the
/// affected entry is left out; processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Omission {
    /// A name lookup (`"<id> name"` or `"<id> Name"`) missing from the reference table.
    MissingLocaleEntry { key: String },
    /// The reference table has no description for a catalog quest; the quest is skipped everywhere.
    MissingQuestDescription { quest: QuestId },
    /// A language table lacks the description key; that (quest, language) pair is skipped.
    MissingLanguageDescriptionKey { quest: QuestId, language: String },
    /// A catalog quest that is not in the live quest database.
    UnknownQuest { quest: QuestId },
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Omission::MissingLocaleEntry { key } => {
                write!(f, "Could not find locale for `{}`", key)
            }
            Omission::MissingQuestDescription { quest } => {
                write!(f, "Could not find quest description for `{}`", quest)
            }
            Omission::MissingLanguageDescriptionKey { quest, language } => write!(
                f,
                "Locale `{}` has no description for quest `{}`",
                language, quest
            ),
            Omission::UnknownQuest { quest } => {
                write!(f, "Quest `{}` is not present in the quest database", quest)
            }
        }
    }
}

impl Omission {
    /// Emit this omission through the `log` facade at the level its severity warrants.
    pub fn log(&self) {
        match self {
            Omission::MissingLocaleEntry { .. } | Omission::MissingQuestDescription { .. } => {
                log::error!("{} {}", LOG_PREFIX, self)
            }
            Omission::MissingLanguageDescriptionKey { .. } | Omission::UnknownQuest { .. } => {
                log::warn!("{} {}", LOG_PREFIX, self)
            }
        }
    }
}

/// Collector for omissions raised while composing and applying.
pub trait OmissionSink {
    fn omit(&mut self, omission: Omission);
}

impl OmissionSink for Vec<Omission> {
    fn omit(&mut self, omission: Omission) {
        omission.log();
        self.push(omission);
    }
}
