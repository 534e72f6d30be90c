//! Reverse index of quest start prerequisites.
//!
//! For every quest in the live database, each `"Quest"` condition in
//! `AvailableForStart` adds an edge `target -> quest`. Edges keep database
//! iteration order and are not deduplicated: a quest that lists the same
//! prerequisite twice appears twice.

use crate::augment::errors::{Omission, OmissionSink};
use crate::augment::locale::LocaleTable;
use crate::augment::types::{quest_name_key, QuestDatabase, QuestId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    dependents: HashMap<String, Vec<QuestId>>,
}

impl DependencyIndex {
    /// Scan every quest's start conditions once.
    pub fn build(quests: &QuestDatabase) -> Self {
        let mut dependents: HashMap<String, Vec<QuestId>> = HashMap::new();
        for (qid, quest) in quests.iter() {
            let Some(conditions) = quest.conditions.available_for_start.as_ref() else {
                continue;
            };
            for target in conditions.iter().filter_map(|c| c.prerequisite_quest()) {
                dependents
                    .entry(target.to_string())
                    .or_default()
                    .push(qid.clone());
            }
        }
        log::debug!(
            "Indexed follow-ups for {} prerequisite quests across {} quests",
            dependents.len(),
            quests.len()
        );
        Self { dependents }
    }

    /// Quests that list `quest` as a start prerequisite, in database order.
    pub fn dependents_of(&self, quest: &QuestId) -> &[QuestId] {
        self.dependents
            .get(quest.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Follow-up quests with their names from `reference`. Quests whose
    /// `"<id> name"` entry is missing are left out and reported.
    pub fn follow_ups<S: OmissionSink>(
        &self,
        quest: &QuestId,
        reference: &LocaleTable,
        omissions: &mut S,
    ) -> Vec<(QuestId, String)> {
        let mut result = Vec::new();
        for next in self.dependents_of(quest) {
            let key = quest_name_key(next);
            match reference.get(&key) {
                Some(name) => result.push((next.clone(), name.clone())),
                None => omissions.omit(Omission::MissingLocaleEntry { key }),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::types::{Condition, ConditionTarget, MongoId, QuestRecord};

    fn id(raw: &str) -> QuestId {
        MongoId::parse(raw).unwrap()
    }

    const Q1: &str = "5936d90786f7742b1420ba5b";
    const Q2: &str = "5967733e86f774602332fc84";
    const Q3: &str = "59674cd986f7744ab26e32f2";
    const Q4: &str = "596760e186f7741e11214d58";

    fn database() -> QuestDatabase {
        QuestDatabase::new()
            .with_quest(id(Q1), QuestRecord::default())
            .with_quest(id(Q3), QuestRecord::default().with_prerequisite(&id(Q1)))
            .with_quest(
                id(Q2),
                QuestRecord::default()
                    .with_prerequisite(&id(Q1))
                    .with_prerequisite(&id(Q1)),
            )
            .with_quest(
                id(Q4),
                QuestRecord::default()
                    .with_condition(Condition {
                        condition_type: Some("Level".into()),
                        target: Some(ConditionTarget::Item(Q1.into())),
                    })
                    .with_condition(Condition {
                        condition_type: Some("Quest".into()),
                        target: Some(ConditionTarget::List(vec![Q1.into()])),
                    }),
            )
    }

    #[test]
    fn keeps_database_order_and_duplicates() {
        let index = DependencyIndex::build(&database());
        assert_eq!(index.dependents_of(&id(Q1)), &[id(Q3), id(Q2), id(Q2)]);
        assert!(index.dependents_of(&id(Q2)).is_empty());
    }

    #[test]
    fn ignores_non_quest_and_list_targets() {
        let index = DependencyIndex::build(&database());
        assert!(!index.dependents_of(&id(Q1)).contains(&id(Q4)));
    }

    #[test]
    fn follow_ups_skip_missing_names() {
        let index = DependencyIndex::build(&database());
        let mut reference = LocaleTable::new();
        reference.insert(format!("{Q2} name"), "Chain".into());

        let mut omissions: Vec<Omission> = Vec::new();
        let names = index.follow_ups(&id(Q1), &reference, &mut omissions);
        assert_eq!(
            names,
            vec![(id(Q2), "Chain".to_string()), (id(Q2), "Chain".to_string())]
        );
        assert_eq!(
            omissions,
            vec![Omission::MissingLocaleEntry {
                key: format!("{Q3} name")
            }]
        );
    }
}
