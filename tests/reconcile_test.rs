//! Reconciliation properties

use vocab_deck::models::{PendingOperation, SyncStatus, WordEntry};
use vocab_deck::reconcile::{merge_unique_by_word, reconcile, sync_status};

fn entry(word: &str, meaning: &str) -> WordEntry {
    WordEntry::new(word).with_meaning(meaning)
}

fn keys(list: &[WordEntry]) -> Vec<String> {
    list.iter().map(WordEntry::key).collect()
}

/// Merging twice changes nothing
#[test]
fn test_merge_is_idempotent() {
    let list = vec![
        entry("Quell", "suppress"),
        entry("quell", "calm"),
        entry("Verve", "energy"),
        entry("", "orphan"),
        entry("VERVE", "spirit"),
        entry("Wane", "decrease"),
    ];

    let once = merge_unique_by_word(list);
    let twice = merge_unique_by_word(once.clone());
    assert_eq!(once, twice);
}

/// Output keys are unique and carry the first occurrence's fields
#[test]
fn test_merge_keeps_first_occurrence() {
    let list = vec![
        entry("Quell", "suppress"),
        entry("Verve", "energy"),
        entry("quell", "calm"),
        entry("wane", "decrease"),
        entry("VERVE", "spirit"),
    ];

    let merged = merge_unique_by_word(list);
    assert_eq!(keys(&merged), vec!["quell", "verve", "wane"]);
    assert_eq!(merged[0].meaning, "suppress");
    assert_eq!(merged[1].meaning, "energy");
}

/// Remote rows override the cached copy of the same word
#[test]
fn test_remote_wins_on_conflict() {
    let local = vec![WordEntry::new("Apple")];
    let remote = vec![entry("apple", "fruit"), entry("Banana", "fruit2")];

    let merged = reconcile(remote, local);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].word, "apple");
    assert_eq!(merged[0].meaning, "fruit");
    assert_eq!(merged[1].word, "Banana");
    assert_eq!(merged[1].meaning, "fruit2");
}

/// Local-only words survive a refresh, after the remote ones
#[test]
fn test_local_only_words_are_kept() {
    let local = vec![entry("Ephemeral", "short-lived"), entry("apple", "stale")];
    let remote = vec![entry("Apple", "fruit")];

    let merged = reconcile(remote, local);
    assert_eq!(keys(&merged), vec!["apple", "ephemeral"]);
    assert_eq!(merged[0].meaning, "fruit");
}

/// Status depends only on the queue
#[test]
fn test_sync_status_from_queue() {
    let queue = vec![PendingOperation::Delete { word: "Foo".into() }];
    assert_eq!(sync_status(&queue, "foo"), SyncStatus::Pending);
    assert_eq!(sync_status(&queue, "FOO"), SyncStatus::Pending);
    assert_eq!(sync_status(&queue, "bar"), SyncStatus::Synced);
}
