//! Data Models for vocab-deck
//!
//! These structures are shared by the local store, the remote endpoint
//! and the queue. Field names on the wire are camelCase.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One vocabulary record. Identity is the lowercased `word`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub word: String,
    #[serde(deserialize_with = "lenient::string")]
    pub pronunciation: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hindi_meaning: String,
    #[serde(deserialize_with = "lenient::string")]
    pub meaning: String,
    #[serde(deserialize_with = "lenient::string")]
    pub example: String,
    #[serde(deserialize_with = "lenient::string")]
    pub mnemonic: String,
    #[serde(deserialize_with = "lenient::string")]
    pub pos: String,
    #[serde(deserialize_with = "lenient::synonyms")]
    pub synonyms: Vec<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub one_liner: String,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub uses: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self
    }

    /// Lowercased identity key
    pub fn key(&self) -> String {
        word_key(&self.word)
    }

    pub fn is_same_word(&self, other: &str) -> bool {
        self.word.to_lowercase() == other.to_lowercase()
    }

    /// Text used as the quiz answer: meaning, then Hindi meaning.
    pub fn answer_text(&self) -> &str {
        if !self.meaning.is_empty() {
            &self.meaning
        } else if !self.hindi_meaning.is_empty() {
            &self.hindi_meaning
        } else {
            NO_MEANING
        }
    }
}

pub const NO_MEANING: &str = "No meaning available";

/// Case-insensitive identity for a word
pub fn word_key(word: &str) -> String {
    word.to_lowercase()
}

/// Split a comma separated synonym list
pub fn parse_synonyms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// A create/update/delete waiting for delivery to the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PendingOperation {
    Create(WordEntry),
    Update {
        /// Empty when the record is located by `word`
        #[serde(rename = "oldWord", default, skip_serializing_if = "String::is_empty")]
        old_word: String,
        #[serde(flatten)]
        entry: WordEntry,
    },
    Delete {
        #[serde(deserialize_with = "lenient::string", default)]
        word: String,
    },
}

impl PendingOperation {
    pub fn word(&self) -> &str {
        match self {
            PendingOperation::Create(entry) => &entry.word,
            PendingOperation::Update { entry, .. } => &entry.word,
            PendingOperation::Delete { word } => word,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            PendingOperation::Create(_) => Action::Create,
            PendingOperation::Update { .. } => Action::Update,
            PendingOperation::Delete { .. } => Action::Delete,
        }
    }

    pub fn matches_word(&self, word: &str) -> bool {
        word_key(self.word()) == word_key(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Pending,
    Synced,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Pending => write!(f, "pending"),
            SyncStatus::Synced => write!(f, "synced"),
        }
    }
}

/// Spreadsheet rows are loosely typed. Strings may arrive as null or
/// numbers, synonyms as an array or a comma separated string.
mod lenient {
    use super::*;
    use serde_json::Value;

    fn value_to_string(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(value_to_string(Value::deserialize(deserializer)?))
    }

    pub fn synonyms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(value_to_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => parse_synonyms(&s),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_word_entry_from_sheet_row() {
        let row = json!({
            "word": "Laconic",
            "synonyms": "brief, terse, ,concise",
            "pronunciation": null,
            "meaning": "using very few words",
            "pos": "adjective",
            "category": "general"
        });
        let entry: WordEntry = serde_json::from_value(row).unwrap();
        assert_eq!(entry.word, "Laconic");
        assert_eq!(entry.synonyms, vec!["brief", "terse", "concise"]);
        assert_eq!(entry.pronunciation, "");
        assert_eq!(entry.key(), "laconic");
    }

    #[test]
    fn test_numeric_word_is_coerced() {
        let entry: WordEntry = serde_json::from_value(json!({ "word": 42 })).unwrap();
        assert_eq!(entry.word, "42");
    }

    #[test]
    fn test_answer_text_fallbacks() {
        let mut entry = WordEntry::new("x");
        assert_eq!(entry.answer_text(), NO_MEANING);
        entry.hindi_meaning = "हिंदी".into();
        assert_eq!(entry.answer_text(), "हिंदी");
        entry.meaning = "english".into();
        assert_eq!(entry.answer_text(), "english");
    }

    #[test]
    fn test_pending_operation_wire_format() {
        let op = PendingOperation::Update {
            old_word: "Colour".into(),
            entry: WordEntry::new("Color").with_meaning("hue"),
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["action"], "update");
        assert_eq!(value["oldWord"], "Colour");
        assert_eq!(value["word"], "Color");
        assert_eq!(value["meaning"], "hue");

        let delete = serde_json::to_value(PendingOperation::Delete { word: "Foo".into() }).unwrap();
        assert_eq!(delete, json!({ "action": "delete", "word": "Foo" }));
    }

    #[test]
    fn test_pending_operation_reads_stored_queue() {
        let stored = json!([
            { "action": "create", "word": "Ephemeral", "meaning": "short-lived", "synonyms": ["brief"] },
            { "action": "delete", "word": "Foo" }
        ]);
        let ops: Vec<PendingOperation> = serde_json::from_value(stored).unwrap();
        assert_eq!(ops[0].action(), Action::Create);
        assert_eq!(ops[0].word(), "Ephemeral");
        assert!(ops[1].matches_word("foo"));
    }
}
