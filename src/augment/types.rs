//! Data model for the augmentation pass.
//!
//! Two families of types live here: the bundled quest catalog (`QuestInfo.json`)
//! which is parsed into [`QuestMetadata`], and the host's live quest database
//! ([`QuestDatabase`] of [`QuestRecord`]) which is only read for start
//! prerequisites.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Length of a hex object identifier.
pub const MONGO_ID_LEN: usize = 24;

/// Returned when a string is not a 24 character hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id `{0}`: expected 24 hex characters")]
pub struct InvalidIdError(pub String);

/// 24 hex character object identifier used for quests, items and objectives.
///
/// Equality is value based. Hex digits are kept exactly as written so the id
/// can be spliced back into locale keys such as `"<id> description"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MongoId(String);

impl MongoId {
    pub fn parse(raw: &str) -> Result<Self, InvalidIdError> {
        if raw.len() == MONGO_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidIdError(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MongoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MongoId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MongoId {
    type Error = InvalidIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MongoId> for String {
    fn from(id: MongoId) -> Self {
        id.0
    }
}

pub type QuestId = MongoId;
pub type ItemId = MongoId;
pub type ObjectiveId = MongoId;

/// Locale key holding a quest's description text.
pub fn description_key(quest: &QuestId) -> String {
    format!("{} description", quest)
}

/// Locale key holding a quest's display name.
pub fn quest_name_key(quest: &QuestId) -> String {
    format!("{} name", quest)
}

/// Locale key holding an item's display name. Items use a capitalised suffix.
pub fn item_name_key(item: &ItemId) -> String {
    format!("{} Name", item)
}

// ============================================================================
// Bundled catalog (QuestInfo.json)
// ============================================================================

/// Static per-quest metadata shipped with the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestMetadata {
    pub id: QuestId,
    pub wiki_link: String,
    pub kappa_required: bool,
    pub lightkeeper_required: bool,
    pub objectives: Vec<QuestObjective>,
}

impl QuestMetadata {
    pub fn new(id: QuestId) -> Self {
        Self {
            id,
            wiki_link: String::new(),
            kappa_required: false,
            lightkeeper_required: false,
            objectives: Vec::new(),
        }
    }

    pub fn with_kappa(mut self) -> Self {
        self.kappa_required = true;
        self
    }

    pub fn with_lightkeeper(mut self) -> Self {
        self.lightkeeper_required = true;
        self
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    /// Every key reference across all objectives, in declaration order.
    /// Absent alternative lists are skipped.
    pub fn key_refs(&self) -> impl Iterator<Item = &KeyRef> {
        self.objectives
            .iter()
            .filter_map(|obj| obj.required_keys.as_ref())
            .flatten()
            .filter_map(|alternatives| alternatives.as_ref())
            .flatten()
    }
}

/// One objective. `required_keys` is a list of alternative key sets; either
/// level may be null in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestObjective {
    #[serde(default)]
    pub id: Option<ObjectiveId>,
    #[serde(default)]
    pub required_keys: Option<Vec<Option<Vec<KeyRef>>>>,
}

impl QuestObjective {
    pub fn with_keys(keys: Vec<KeyRef>) -> Self {
        Self {
            id: None,
            required_keys: Some(vec![Some(keys)]),
        }
    }
}

/// Key reference. The display name is resolved from the reference locale
/// table; `name` is carried only for readability of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub id: ItemId,
    pub name: String,
}

// ============================================================================
// Host quest database (read only)
// ============================================================================

/// Target of a condition: a single id or a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionTarget {
    Item(String),
    List(Vec<String>),
}

impl ConditionTarget {
    /// The single-id form. Only this form names a prerequisite quest.
    pub fn item(&self) -> Option<&str> {
        match self {
            ConditionTarget::Item(item) => Some(item),
            ConditionTarget::List(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub condition_type: Option<String>,
    #[serde(default)]
    pub target: Option<ConditionTarget>,
}

impl Condition {
    pub const QUEST: &'static str = "Quest";

    pub fn quest(target: &QuestId) -> Self {
        Self {
            condition_type: Some(Self::QUEST.to_string()),
            target: Some(ConditionTarget::Item(target.to_string())),
        }
    }

    /// Prerequisite quest named by this condition, if it is a `"Quest"` condition.
    pub fn prerequisite_quest(&self) -> Option<&str> {
        let item = self.target.as_ref()?.item()?;
        (self.condition_type.as_deref() == Some(Self::QUEST)).then_some(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestConditions {
    #[serde(
        rename = "AvailableForStart",
        alias = "availableForStart",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_for_start: Option<Vec<Condition>>,
}

/// Live quest entry as provided by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestRecord {
    #[serde(default)]
    pub conditions: QuestConditions,
}

impl QuestRecord {
    pub fn with_prerequisite(mut self, quest: &QuestId) -> Self {
        self.conditions
            .available_for_start
            .get_or_insert_with(Vec::new)
            .push(Condition::quest(quest));
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions
            .available_for_start
            .get_or_insert_with(Vec::new)
            .push(condition);
        self
    }
}

/// Quest database keyed by id, kept in declaration order.
///
/// Deserializes from the JSON object form `{ "<id>": { ... }, ... }`; the
/// order of the object's members is the iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestDatabase {
    entries: Vec<(QuestId, QuestRecord)>,
    by_id: HashMap<QuestId, usize>,
}

impl QuestDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a quest. A repeated id replaces the earlier record in place.
    pub fn insert(&mut self, id: QuestId, record: QuestRecord) {
        match self.by_id.get(&id) {
            Some(&idx) => self.entries[idx].1 = record,
            None => {
                self.by_id.insert(id.clone(), self.entries.len());
                self.entries.push((id, record));
            }
        }
    }

    pub fn with_quest(mut self, id: QuestId, record: QuestRecord) -> Self {
        self.insert(id, record);
        self
    }

    pub fn get(&self, id: &QuestId) -> Option<&QuestRecord> {
        self.by_id.get(id).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, id: &QuestId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestId, &QuestRecord)> {
        self.entries.iter().map(|(id, record)| (id, record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for QuestDatabase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatabaseVisitor;

        impl<'de> Visitor<'de> for DatabaseVisitor {
            type Value = QuestDatabase;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of quest id to quest record")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut db = QuestDatabase::new();
                while let Some((id, record)) = map.next_entry::<QuestId, QuestRecord>()? {
                    db.insert(id, record);
                }
                Ok(db)
            }
        }

        deserializer.deserialize_map(DatabaseVisitor)
    }
}
