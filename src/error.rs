//! Error types for vocab-deck

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Please enter a word")]
    EmptyWord,

    #[error("This word already exists: {0}")]
    DuplicateWord(String),

    #[error("Word not found: {0}")]
    WordNotFound(String),

    #[error("{0} requires Admin Mode")]
    AdminRequired(&'static str),

    #[error("Need at least {required} words to start a quiz (have {available})")]
    NotEnoughWords { required: usize, available: usize },

    #[error("Quiz error: {0}")]
    Quiz(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Remote request timed out after {0}s")]
    Timeout(u64),

    #[error("Remote request failed with status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("Remote rejected the write (result: {0})")]
    Rejected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl VocabError {
    /// Failures of the remote endpoint. Writes that fail this way are queued.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            VocabError::Remote(_)
                | VocabError::Timeout(_)
                | VocabError::RemoteStatus { .. }
                | VocabError::MalformedResponse(_)
                | VocabError::Rejected(_)
                | VocabError::Http(_)
        )
    }

    /// Rejections raised at the form boundary, before any state mutation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VocabError::EmptyWord
                | VocabError::DuplicateWord(_)
                | VocabError::WordNotFound(_)
                | VocabError::AdminRequired(_)
                | VocabError::NotEnoughWords { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;
