//! Import reconciliation: classify incoming records against store state.
//!
//! Given the target store's existing records and an incoming batch, every
//! incoming record is classified exactly once: inserted directly when
//! nothing conflicts, silently skipped when an existing record with the
//! same key matches on every meaningful field, or surfaced as a conflict
//! for an external decision. The resolver never decides a conflict itself.

use crate::diff::{render_diffs, FieldDiff};
use crate::record::{column, KeywordRecord};
use crate::ConflictKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fields whose divergence makes two same-key records a conflict,
/// with the labels used when rendering the per-field diff.
///
/// Everything outside this set (flags, timestamps, sync identifiers) is
/// carried through opaquely and never compared.
pub const MEANINGFUL_FIELDS: [(&str, usize); 5] = [
    ("Name:", column::SHORT_NAME),
    ("Keyword:", column::KEYWORD),
    ("Favicon:", column::FAVICON_URL),
    ("URL:", column::URL),
    ("Suggest URL:", column::SUGGEST_URL),
];

/// The identity key deciding whether an incoming record targets the same
/// logical entry as an existing one.
///
/// This is the single decision point for the keying policy. The shipped
/// policy keys on the shortcut (`keyword`) field alone: store-assigned
/// numeric ids are not portable across stores, and the shortcut is the
/// field users depend on for correct behavior. Shortcut-only keying can
/// collide on unrelated records with an accidentally-identical trigger
/// string; swapping the policy means changing only this function.
///
/// An empty shortcut is not a valid key; two records with empty shortcuts
/// are never "the same entry".
pub fn identity_key(record: &KeywordRecord) -> Option<&str> {
    record.keyword().filter(|k| !k.is_empty())
}

/// A detected conflict awaiting an external decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The identity key both records share
    pub key: ConflictKey,
    /// The record currently in the store
    pub existing: KeywordRecord,
    /// The record from the incoming batch
    pub incoming: KeywordRecord,
    /// Human-readable per-field diff of the meaningful fields
    pub diff: String,
}

/// Result of classifying one incoming batch against a store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSet {
    /// Records with no conflicting existing entry
    pub to_insert: Vec<KeywordRecord>,
    /// Records requiring an external replace/keep decision
    pub conflicts: Vec<Conflict>,
    /// Incoming records identical to an existing entry, silently dropped
    pub skipped: usize,
}

/// How one conflict was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// Overwrite the existing record with the incoming one
    Replace,
    /// Leave the existing record untouched
    KeepExisting,
}

/// External decision collaborator, consulted once per conflict.
pub trait DecisionProvider {
    fn resolve(&mut self, conflict: &Conflict) -> Resolution;
}

/// A fully decided import, ready for the store writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    /// Records to insert (insert-if-absent mode)
    pub to_insert: Vec<KeywordRecord>,
    /// Conflicting records the provider chose to overwrite
    pub to_replace: Vec<KeywordRecord>,
    /// Conflicts decided in favor of the existing record
    pub kept: usize,
    /// Identical records silently dropped during classification
    pub skipped: usize,
    /// Total conflicts put to the decision provider
    pub conflicts_resolved: usize,
}

impl DecisionSet {
    /// Put every conflict to the decision provider and finalize the plan.
    ///
    /// Conflicts are decided in classification order. The provider may
    /// block (e.g. prompt a user) per conflict; replacements are deferred
    /// until the whole set is decided.
    pub fn resolve(self, provider: &mut dyn DecisionProvider) -> ImportPlan {
        let conflicts_resolved = self.conflicts.len();
        let mut to_replace = Vec::new();
        let mut kept = 0;

        for conflict in self.conflicts {
            match provider.resolve(&conflict) {
                Resolution::Replace => to_replace.push(conflict.incoming),
                Resolution::KeepExisting => kept += 1,
            }
        }

        ImportPlan {
            to_insert: self.to_insert,
            to_replace,
            kept,
            skipped: self.skipped,
            conflicts_resolved,
        }
    }
}

/// Classifier over a fixed snapshot of the store's existing records.
pub struct Reconciler<'a> {
    /// Existing records indexed by identity key. On duplicate keys in the
    /// store (possible: the store is unique by id, not by shortcut) the
    /// first occurrence wins.
    by_key: HashMap<&'a str, &'a KeywordRecord>,
}

impl<'a> Reconciler<'a> {
    /// Snapshot the existing records' identity keys.
    pub fn new(existing: &'a [KeywordRecord]) -> Self {
        let mut by_key = HashMap::with_capacity(existing.len());
        for record in existing {
            if let Some(key) = identity_key(record) {
                by_key.entry(key).or_insert(record);
            }
        }
        Self { by_key }
    }

    /// Partition an incoming batch against the snapshot.
    ///
    /// Each incoming record is evaluated independently, in input order,
    /// against the snapshot taken at construction; the snapshot is never
    /// updated mid-batch, since replacements are deferred until after
    /// classification.
    pub fn classify(&self, incoming: Vec<KeywordRecord>) -> DecisionSet {
        let mut set = DecisionSet {
            to_insert: Vec::new(),
            conflicts: Vec::new(),
            skipped: 0,
        };

        for record in incoming {
            let existing = identity_key(&record).and_then(|key| self.by_key.get(key).copied());
            match existing {
                None => set.to_insert.push(record),
                Some(existing) => {
                    let diffs = meaningful_diffs(existing, &record);
                    if diffs.is_empty() {
                        set.skipped += 1;
                    } else {
                        set.conflicts.push(Conflict {
                            key: identity_key(&record)
                                .unwrap_or_default()
                                .to_string(),
                            existing: existing.clone(),
                            diff: render_diffs(&diffs),
                            incoming: record,
                        });
                    }
                }
            }
        }

        set
    }
}

/// One-shot classification of `incoming` against `existing`.
pub fn reconcile(existing: &[KeywordRecord], incoming: Vec<KeywordRecord>) -> DecisionSet {
    Reconciler::new(existing).classify(incoming)
}

/// Labeled diffs for every meaningful field where the two records diverge.
///
/// Equality is plain value equality at each position; rendering uses the
/// values' display form.
fn meaningful_diffs(existing: &KeywordRecord, incoming: &KeywordRecord) -> Vec<FieldDiff> {
    MEANINGFUL_FIELDS
        .iter()
        .copied()
        .filter(|&(_, index)| existing.field(index) != incoming.field(index))
        .map(|(label, index)| FieldDiff {
            label,
            existing: existing.field(index).to_string(),
            incoming: incoming.field(index).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn engine(id: i64, name: &str, keyword: &str, url: &str) -> KeywordRecord {
        engine_with_suggest(id, name, keyword, url, "")
    }

    fn engine_with_suggest(
        id: i64,
        name: &str,
        keyword: &str,
        url: &str,
        suggest: &str,
    ) -> KeywordRecord {
        KeywordRecord::new(vec![
            Value::Integer(id),
            Value::text(name),
            Value::text(keyword),
            Value::text("favicon.ico"),
            Value::text(url),
            Value::Integer(1),
            Value::text(""),
            Value::Integer(0),
            Value::Integer(0),
            Value::text("UTF-8"),
            Value::text(suggest),
        ])
    }

    #[test]
    fn empty_store_inserts_everything() {
        let incoming = vec![
            engine(1, "Google", "google", "https://google.com/"),
            engine(2, "Bing", "bing", "https://bing.com/"),
            engine(3, "DuckDuckGo", "ddg", "https://duckduckgo.com/"),
        ];

        let set = reconcile(&[], incoming);

        assert_eq!(set.to_insert.len(), 3);
        assert!(set.conflicts.is_empty());
        assert_eq!(set.skipped, 0);
    }

    #[test]
    fn identical_record_is_silently_skipped() {
        let existing = vec![engine(1, "Google", "google", "https://google.com/")];
        // Same meaningful fields, different store id: still identical.
        let incoming = vec![engine(9, "Google", "google", "https://google.com/")];

        let set = reconcile(&existing, incoming);

        assert!(set.to_insert.is_empty());
        assert!(set.conflicts.is_empty());
        assert_eq!(set.skipped, 1);
    }

    #[test]
    fn diverging_url_is_a_conflict_with_marked_diff() {
        let existing = vec![engine_with_suggest(
            1,
            "Google",
            "google",
            "https://google.es/search?q={searchTerms}",
            "https://google.es/complete/search?q={searchTerms}",
        )];
        let incoming = vec![engine_with_suggest(
            1,
            "Google",
            "google",
            "https://google.com/search?q={searchTerms}",
            "https://google.com/complete/search?q={searchTerms}",
        )];

        let set = reconcile(&existing, incoming);

        assert_eq!(set.conflicts.len(), 1);
        let conflict = &set.conflicts[0];
        assert_eq!(conflict.key, "google");
        assert!(conflict.diff.contains("URL:"));
        assert!(conflict.diff.contains("Suggest URL:"));
        assert!(conflict.diff.contains("[-es-]"));
        assert!(conflict.diff.contains("[+com+]"));
    }

    #[test]
    fn different_keyword_is_no_conflict() {
        let existing = vec![engine(1, "Google", "google", "https://google.com/")];
        let incoming = vec![engine(1, "Google ES", "google.es", "https://google.es/")];

        let set = reconcile(&existing, incoming);

        assert_eq!(set.to_insert.len(), 1);
        assert!(set.conflicts.is_empty());
    }

    #[test]
    fn empty_keyword_never_matches() {
        let existing = vec![engine(1, "No Shortcut", "", "https://a.example/")];
        let incoming = vec![engine(2, "Also None", "", "https://b.example/")];

        let set = reconcile(&existing, incoming);

        // Both have an empty shortcut; that is not a shared identity.
        assert_eq!(set.to_insert.len(), 1);
        assert!(set.conflicts.is_empty());
        assert_eq!(set.skipped, 0);
    }

    #[test]
    fn missing_keyword_field_never_matches() {
        let existing = vec![engine(1, "Narrow", "x", "https://x.example/")];
        let incoming = vec![KeywordRecord::new(vec![Value::Integer(2)])];

        let set = reconcile(&existing, incoming);
        assert_eq!(set.to_insert.len(), 1);
    }

    #[test]
    fn same_key_twice_evaluates_against_snapshot_independently() {
        let incoming = vec![
            engine(1, "Wiki", "w", "https://en.wikipedia.org/"),
            engine(2, "Wiktionary", "w", "https://en.wiktionary.org/"),
        ];

        // No existing record shares the key, so both insert: the snapshot
        // is not updated mid-batch by the first record.
        let set = reconcile(&[], incoming);

        assert_eq!(set.to_insert.len(), 2);
        assert!(set.conflicts.is_empty());
    }

    #[test]
    fn same_key_twice_against_existing_conflicts_twice() {
        let existing = vec![engine(1, "Wiki", "w", "https://en.wikipedia.org/")];
        let incoming = vec![
            engine(2, "Wikinews", "w", "https://en.wikinews.org/"),
            engine(3, "Wiktionary", "w", "https://en.wiktionary.org/"),
        ];

        let set = reconcile(&existing, incoming);

        // Each is compared to the same snapshot record, in input order.
        assert_eq!(set.conflicts.len(), 2);
        assert_eq!(set.conflicts[0].incoming.display_name(), "Wikinews");
        assert_eq!(set.conflicts[1].incoming.display_name(), "Wiktionary");
        for conflict in &set.conflicts {
            assert_eq!(conflict.existing.display_name(), "Wiki");
        }
    }

    #[test]
    fn duplicate_store_keys_first_occurrence_wins() {
        let existing = vec![
            engine(1, "First", "dup", "https://first.example/"),
            engine(2, "Second", "dup", "https://second.example/"),
        ];
        let incoming = vec![engine(3, "Third", "dup", "https://third.example/")];

        let set = reconcile(&existing, incoming);

        assert_eq!(set.conflicts.len(), 1);
        assert_eq!(set.conflicts[0].existing.display_name(), "First");
    }

    #[test]
    fn classification_is_total() {
        let existing = vec![
            engine(1, "Google", "google", "https://google.com/"),
            engine(2, "Bing", "bing", "https://bing.com/"),
        ];
        let incoming = vec![
            engine(3, "Google", "google", "https://google.com/"), // identical -> skip
            engine(4, "Bing!", "bing", "https://bing.example/"),  // conflict
            engine(5, "DuckDuckGo", "ddg", "https://duckduckgo.com/"), // new
        ];
        let total = incoming.len();

        let set = reconcile(&existing, incoming);

        assert_eq!(
            set.to_insert.len() + set.conflicts.len() + set.skipped,
            total
        );
        assert_eq!(set.to_insert.len(), 1);
        assert_eq!(set.conflicts.len(), 1);
        assert_eq!(set.skipped, 1);
    }

    struct ScriptedProvider {
        answers: Vec<Resolution>,
        asked: Vec<ConflictKey>,
    }

    impl DecisionProvider for ScriptedProvider {
        fn resolve(&mut self, conflict: &Conflict) -> Resolution {
            self.asked.push(conflict.key.clone());
            self.answers.remove(0)
        }
    }

    #[test]
    fn resolve_partitions_by_decision() {
        let existing = vec![
            engine(1, "Google", "google", "https://google.es/"),
            engine(2, "Bing", "bing", "https://bing.es/"),
        ];
        let incoming = vec![
            engine(1, "Google", "google", "https://google.com/"),
            engine(2, "Bing", "bing", "https://bing.com/"),
            engine(3, "DuckDuckGo", "ddg", "https://duckduckgo.com/"),
        ];

        let set = reconcile(&existing, incoming);
        assert_eq!(set.conflicts.len(), 2);

        let mut provider = ScriptedProvider {
            answers: vec![Resolution::Replace, Resolution::KeepExisting],
            asked: Vec::new(),
        };
        let plan = set.resolve(&mut provider);

        assert_eq!(provider.asked, vec!["google".to_string(), "bing".to_string()]);
        assert_eq!(plan.to_insert.len(), 1);
        assert_eq!(plan.to_replace.len(), 1);
        assert_eq!(plan.to_replace[0].url(), Some("https://google.com/"));
        assert_eq!(plan.kept, 1);
        assert_eq!(plan.conflicts_resolved, 2);
    }

    #[test]
    fn resolve_with_no_conflicts_never_asks() {
        struct Unreachable;
        impl DecisionProvider for Unreachable {
            fn resolve(&mut self, _: &Conflict) -> Resolution {
                panic!("provider must not be consulted without conflicts");
            }
        }

        let set = reconcile(&[], vec![engine(1, "Google", "google", "https://g/")]);
        let plan = set.resolve(&mut Unreachable);

        assert_eq!(plan.to_insert.len(), 1);
        assert_eq!(plan.conflicts_resolved, 0);
    }

    #[test]
    fn conflict_serializes_for_deferred_decisions() {
        let existing = vec![engine(1, "Google", "google", "https://google.es/")];
        let incoming = vec![engine(1, "Google", "google", "https://google.com/")];

        let set = reconcile(&existing, incoming);
        let text = serde_json::to_string(&set).unwrap();
        let back: DecisionSet = serde_json::from_str(&text).unwrap();
        assert_eq!(back, set);
    }
}
