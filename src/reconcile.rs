//! Reconciliation of local cache, remote rows and the pending queue
//!
//! Conflicts are resolved by merge order, not timestamps: whichever
//! source is merged first wins for a given lowercased word. Remote rows
//! always go first.

use crate::models::{word_key, PendingOperation, SyncStatus, WordEntry};
use std::collections::HashSet;

/// Keep the first entry per lowercased word, preserving order.
/// Entries with an empty `word` are skipped.
pub fn merge_unique_by_word<I>(list: I) -> Vec<WordEntry>
where
    I: IntoIterator<Item = WordEntry>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for entry in list {
        let key = entry.key();
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        result.push(entry);
    }
    result
}

/// `Pending` iff a queued operation names this word (case-insensitive)
pub fn sync_status(queue: &[PendingOperation], word: &str) -> SyncStatus {
    let key = word_key(word);
    if queue.iter().any(|op| word_key(op.word()) == key) {
        SyncStatus::Pending
    } else {
        SyncStatus::Synced
    }
}

/// Remote entries first, local cache second
pub fn reconcile(remote: Vec<WordEntry>, local: Vec<WordEntry>) -> Vec<WordEntry> {
    merge_unique_by_word(remote.into_iter().chain(local))
}

/// Put `entry` first, dropping any entry keyed by `entry` or `replaced`
pub fn upsert_front(list: &[WordEntry], entry: &WordEntry, replaced: Option<&str>) -> Vec<WordEntry> {
    let replaced = replaced.map(word_key);
    let rest = list.iter().filter(|w| match &replaced {
        Some(old) => w.key() != *old,
        None => true,
    });
    merge_unique_by_word(std::iter::once(entry.clone()).chain(rest.cloned()))
}

pub fn remove_word(list: &[WordEntry], word: &str) -> Vec<WordEntry> {
    let key = word_key(word);
    list.iter().filter(|w| w.key() != key).cloned().collect()
}

/// What a refresh changed, for logging and display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub remote_count: usize,
    pub total: usize,
    pub added: usize,
    pub removed: usize,
}

impl RefreshOutcome {
    pub fn between(before: &[WordEntry], after: &[WordEntry], remote_count: usize) -> Self {
        let old: HashSet<String> = before.iter().map(WordEntry::key).collect();
        let new: HashSet<String> = after.iter().map(WordEntry::key).collect();
        Self {
            remote_count,
            total: after.len(),
            added: new.difference(&old).count(),
            removed: old.difference(&new).count(),
        }
    }

    pub fn changed(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}
