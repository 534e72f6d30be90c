//! Builds the text prepended to a quest description.
//!
//! Layout, in order:
//!
//! ```text
//! This quest is required for Collector\n      (kappa only)
//! This quest is required for Lightkeeper\n    (lightkeeper only)
//! Requires Key(s):\n\t<key>, \n\t<key>        | No keys required.
//! \n\n
//! Leads to:\n\t<quest>, \n\t<quest>           | Leads to: Nothing
//! ```
//!
//! The original description follows after another blank line.

use crate::augment::errors::{Omission, OmissionSink};
use crate::augment::graph::DependencyIndex;
use crate::augment::locale::LocaleTable;
use crate::augment::types::{item_name_key, QuestId, QuestMetadata};

pub const COLLECTOR_REQUIRED: &str = "This quest is required for Collector\n";
pub const LIGHTKEEPER_REQUIRED: &str = "This quest is required for Lightkeeper\n";
pub const REQUIRES_KEYS: &str = "Requires Key(s):";
pub const NO_KEYS_REQUIRED: &str = "No keys required.";
pub const LEADS_TO: &str = "Leads to:";
pub const LEADS_TO_NOTHING: &str = "Leads to: Nothing";
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Composes description prefixes against a single reference table.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionComposer<'a> {
    index: &'a DependencyIndex,
    reference: &'a LocaleTable,
}

impl<'a> DescriptionComposer<'a> {
    pub fn new(index: &'a DependencyIndex, reference: &'a LocaleTable) -> Self {
        Self { index, reference }
    }

    /// Flags, key block and follow-up block, without the original text.
    pub fn compose_prefix<S: OmissionSink>(&self, info: &QuestMetadata, omissions: &mut S) -> String {
        let mut out = String::new();
        if info.kappa_required {
            out.push_str(COLLECTOR_REQUIRED);
        }
        if info.lightkeeper_required {
            out.push_str(LIGHTKEEPER_REQUIRED);
        }
        out.push_str(&self.key_block(info, omissions));
        out.push_str(SECTION_SEPARATOR);
        out.push_str(&self.leads_to_block(&info.id, omissions));
        out
    }

    /// Full augmented description: prefix, blank line, then `original` untouched.
    pub fn compose_description<S: OmissionSink>(
        &self,
        info: &QuestMetadata,
        original: &str,
        omissions: &mut S,
    ) -> String {
        join_prefix(&self.compose_prefix(info, omissions), original)
    }

    /// `"Requires Key(s):"` block, or `"No keys required."` when no key resolves.
    pub fn key_block<S: OmissionSink>(&self, info: &QuestMetadata, omissions: &mut S) -> String {
        let mut names = Vec::new();
        for key in info.key_refs() {
            let locale_key = item_name_key(&key.id);
            match self.reference.get(&locale_key) {
                Some(name) if !name.is_empty() => names.push(format!("\n\t{}", name)),
                Some(_) => {}
                None => omissions.omit(Omission::MissingLocaleEntry { key: locale_key }),
            }
        }

        if names.is_empty() {
            NO_KEYS_REQUIRED.to_string()
        } else {
            format!("{}{}", REQUIRES_KEYS, names.join(", "))
        }
    }

    /// `"Leads to:"` block, or `"Leads to: Nothing"` when no quest follows.
    pub fn leads_to_block<S: OmissionSink>(&self, quest: &QuestId, omissions: &mut S) -> String {
        let names: Vec<String> = self
            .index
            .follow_ups(quest, self.reference, omissions)
            .into_iter()
            .map(|(_, name)| format!("\n\t{}", name))
            .collect();

        if names.is_empty() {
            LEADS_TO_NOTHING.to_string()
        } else {
            format!("{}{}", LEADS_TO, names.join(", "))
        }
    }
}

/// Prepend a composed prefix to a description.
pub fn join_prefix(prefix: &str, original: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + SECTION_SEPARATOR.len() + original.len());
    out.push_str(prefix);
    out.push_str(SECTION_SEPARATOR);
    out.push_str(original);
    out
}
