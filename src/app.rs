//! Application state
//!
//! [`VocabApp`] owns the word collection, the local store, the remote
//! client and the injected capabilities. Every command goes through it;
//! there is no other shared state.
//!
//! Writes are optimistic: the collection and cache change first, then one
//! remote attempt is made and a failure lands in the offline queue.

use crate::capabilities::{Capabilities, NoticeLevel};
use crate::config::Config;
use crate::error::{Result, VocabError};
use crate::favorites::Favorites;
use crate::models::{word_key, PendingOperation, SyncStatus, WordEntry};
use crate::queue::{FlushReport, OfflineQueue};
use crate::quiz::{QuizResult, QuizSession, QuizStats};
use crate::reconcile::{self, RefreshOutcome};
use crate::remote::SheetRemote;
use crate::settings::{Preferences, Settings, Theme};
use crate::store::LocalStore;
use crate::wotd;
use chrono::NaiveDate;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Shown by the CLI at most
pub const SEARCH_LIMIT: usize = 50;
/// Size of the `recent` filter
pub const RECENT_LIMIT: usize = 20;

/// Result of a create/update/delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The endpoint confirmed the write
    Synced,
    /// The write is waiting in the offline queue
    Queued,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordFilter {
    All,
    Recent,
    Pos(String),
}

impl FromStr for WordFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "" | "all" => WordFilter::All,
            "recent" => WordFilter::Recent,
            pos => WordFilter::Pos(pos.to_string()),
        })
    }
}

impl fmt::Display for WordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordFilter::All => write!(f, "all"),
            WordFilter::Recent => write!(f, "recent"),
            WordFilter::Pos(pos) => write!(f, "{}", pos),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCounts {
    pub total: usize,
    /// Words with writes still waiting in the queue
    pub local: usize,
    pub from_sheet: usize,
}

pub struct VocabApp<R: SheetRemote> {
    config: Config,
    store: LocalStore,
    queue: OfflineQueue,
    prefs: Preferences,
    favorites: Favorites,
    remote: Option<R>,
    caps: Capabilities,
    words: watch::Sender<Vec<WordEntry>>,
}

impl<R: SheetRemote> VocabApp<R> {
    /// Open the store named by `config.store.path` and load the cache.
    /// `remote` is `None` in offline mode; writes then go straight to the queue.
    pub fn open(config: Config, remote: Option<R>, caps: Capabilities) -> Result<Self> {
        let store = LocalStore::open_dir(&config.store.path)?;
        Ok(Self::with_store(config, store, remote, caps))
    }

    pub fn with_store(config: Config, store: LocalStore, remote: Option<R>, caps: Capabilities) -> Self {
        let cached = reconcile::merge_unique_by_word(store.load_words());
        debug!("loaded {} cached words", cached.len());
        let (words, _) = watch::channel(cached);
        Self {
            queue: OfflineQueue::new(store.clone()),
            prefs: Preferences::new(store.clone()),
            favorites: Favorites::new(store.clone()),
            config,
            store,
            remote,
            caps,
            words,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    /// Snapshot of the collection
    pub fn words(&self) -> Vec<WordEntry> {
        self.words.borrow().clone()
    }

    /// Receives the whole collection after every change
    pub fn subscribe(&self) -> watch::Receiver<Vec<WordEntry>> {
        self.words.subscribe()
    }

    pub fn find(&self, word: &str) -> Option<WordEntry> {
        let key = word_key(word.trim());
        self.words.borrow().iter().find(|w| w.key() == key).cloned()
    }

    fn replace_words(&self, words: Vec<WordEntry>) -> Result<()> {
        self.store.save_words(&words)?;
        self.words.send_replace(words);
        Ok(())
    }

    pub fn notify(&self, level: NoticeLevel, message: &str) {
        if level.is_optional() && !self.prefs.settings().notifications_enabled {
            debug!("notice suppressed: {}", message);
            return;
        }
        self.caps.notifier.notify(level, message);
    }

    /// Replay the queue if configured to do so on start
    pub async fn start(&self) -> Result<Option<FlushReport>> {
        if !self.config.sync.flush_on_start || self.queue.is_empty() {
            return Ok(None);
        }
        self.flush_queue().await.map(Some)
    }

    // ---------------------------------------------------------------
    // Refresh
    // ---------------------------------------------------------------

    async fn fetch_and_merge(&self) -> Result<RefreshOutcome> {
        let remote = self
            .remote
            .as_ref()
            .ok_or_else(|| VocabError::Remote("offline mode".into()))?;

        let fetched = remote.fetch_words().await?;
        let remote_count = fetched.len();
        let before = self.words();
        let merged = reconcile::reconcile(fetched, self.store.load_words());
        let outcome = RefreshOutcome::between(&before, &merged, remote_count);
        self.replace_words(merged)?;
        info!(
            "refresh: {} remote words, {} total (+{} -{})",
            outcome.remote_count, outcome.total, outcome.added, outcome.removed
        );
        Ok(outcome)
    }

    /// Silent refresh; failures keep the cached collection.
    /// Skipped when `autoRefresh` is off.
    pub async fn background_refresh(&self) -> Option<RefreshOutcome> {
        if !self.prefs.settings().auto_refresh {
            debug!("background refresh disabled by settings");
            return None;
        }
        match self.fetch_and_merge().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!("background refresh failed, staying on cache: {}", e);
                None
            }
        }
    }

    /// Background refresh after the configured idle delay
    pub async fn refresh_after_idle(&self) -> Option<RefreshOutcome> {
        tokio::time::sleep(Duration::from_millis(self.config.refresh.idle_delay_ms)).await;
        self.background_refresh().await
    }

    /// Queue replay and idle refresh side by side, for use once the cache has
    /// been shown. Gives up after `refresh.max_wait_ms`; a pass cut short
    /// leaves the queue as it was.
    pub async fn catch_up(&self) -> Option<RefreshOutcome> {
        let limit = self.config.refresh.max_wait();
        let work = async {
            let (flushed, refreshed) = tokio::join!(self.start(), self.refresh_after_idle());
            if let Err(e) = flushed {
                debug!("startup flush failed: {}", e);
            }
            refreshed
        };
        match tokio::time::timeout(limit, work).await {
            Ok(refreshed) => refreshed,
            Err(_) => {
                debug!("stopped waiting on the endpoint after {:?}", limit);
                None
            }
        }
    }

    /// User-initiated refresh; failures are reported
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        match self.fetch_and_merge().await {
            Ok(outcome) => {
                self.notify(
                    NoticeLevel::Success,
                    &format!("Refreshed: {} words from Google Sheet", outcome.remote_count),
                );
                Ok(outcome)
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, &format!("Refresh failed: {}", e));
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------
    // Queue
    // ---------------------------------------------------------------

    pub async fn flush_queue(&self) -> Result<FlushReport> {
        let Some(remote) = self.remote.as_ref() else {
            let remaining = self.queue.len();
            return Ok(FlushReport {
                attempted: 0,
                synced: 0,
                remaining,
            });
        };

        let report = self
            .queue
            .flush(remote, |action| self.config.remote.timeout_for(action))
            .await?;
        if report.attempted > 0 {
            if report.is_clean() {
                self.notify(NoticeLevel::Success, "All pending changes synced");
            } else {
                self.notify(
                    NoticeLevel::Warning,
                    &format!("{} changes still pending sync", report.remaining),
                );
            }
        }
        Ok(report)
    }

    pub fn sync_status(&self, word: &str) -> SyncStatus {
        self.queue.status(word)
    }

    /// Send one operation, queueing it on any failure
    async fn deliver(&self, op: PendingOperation, supersedes: &[&str]) -> Result<WriteOutcome> {
        let Some(remote) = self.remote.as_ref() else {
            self.queue.enqueue(op)?;
            return Ok(WriteOutcome::Queued);
        };

        let timeout = self.config.remote.timeout_for(op.action());
        match remote.send(&op, timeout).await {
            Ok(()) => {
                for word in supersedes {
                    let dropped = self.queue.discard_word(word)?;
                    if dropped > 0 {
                        debug!("dropped {} superseded queued ops for {:?}", dropped, word);
                    }
                }
                Ok(WriteOutcome::Synced)
            }
            Err(e) => {
                warn!("{} {:?} failed: {}", op.action(), op.word(), e);
                self.queue.enqueue(op)?;
                Ok(WriteOutcome::Queued)
            }
        }
    }

    // ---------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------

    fn require_admin(&self, what: &'static str) -> Result<()> {
        if self.prefs.is_admin() {
            Ok(())
        } else {
            self.notify(NoticeLevel::Error, &format!("{} requires Admin Mode", what));
            Err(VocabError::AdminRequired(what))
        }
    }

    fn reject(&self, err: VocabError) -> Result<WriteOutcome> {
        self.notify(NoticeLevel::Error, &err.to_string());
        Err(err)
    }

    pub async fn add_word(&self, mut entry: WordEntry) -> Result<WriteOutcome> {
        self.require_admin("Add Word function")?;
        entry.word = entry.word.trim().to_string();
        if entry.word.is_empty() {
            return self.reject(VocabError::EmptyWord);
        }
        if self.find(&entry.word).is_some() {
            return self.reject(VocabError::DuplicateWord(entry.word));
        }

        self.replace_words(reconcile::upsert_front(&self.words(), &entry, None))?;

        let word = entry.word.clone();
        let outcome = self
            .deliver(PendingOperation::Create(entry), &[word.as_str()])
            .await?;
        match outcome {
            WriteOutcome::Synced => self.notify(NoticeLevel::Success, "Word added to Google Sheet!"),
            WriteOutcome::Queued => self.notify(
                NoticeLevel::Warning,
                "Saved locally - will sync to Google Sheet when online",
            ),
        }
        Ok(outcome)
    }

    pub async fn update_word(&self, old_word: &str, mut entry: WordEntry) -> Result<WriteOutcome> {
        self.require_admin("Edit function")?;
        entry.word = entry.word.trim().to_string();
        let old_word = old_word.trim().to_string();
        if entry.word.is_empty() {
            return self.reject(VocabError::EmptyWord);
        }
        if self.find(&old_word).is_none() {
            return self.reject(VocabError::WordNotFound(old_word));
        }
        if !entry.is_same_word(&old_word) && self.find(&entry.word).is_some() {
            return self.reject(VocabError::DuplicateWord(entry.word));
        }

        self.replace_words(reconcile::upsert_front(&self.words(), &entry, Some(&old_word)))?;

        let word = entry.word.clone();
        let outcome = self
            .deliver(
                PendingOperation::Update {
                    old_word: old_word.clone(),
                    entry,
                },
                &[word.as_str(), old_word.as_str()],
            )
            .await?;
        match outcome {
            WriteOutcome::Synced => self.notify(NoticeLevel::Success, "Successfully saved to Google Sheet!"),
            WriteOutcome::Queued => self.notify(NoticeLevel::Warning, "Update queued (offline)"),
        }
        Ok(outcome)
    }

    pub async fn delete_word(&self, word: &str) -> Result<WriteOutcome> {
        self.require_admin("Delete function")?;
        let Some(existing) = self.find(word) else {
            return self.reject(VocabError::WordNotFound(word.trim().to_string()));
        };

        self.replace_words(reconcile::remove_word(&self.words(), &existing.word))?;

        let outcome = self
            .deliver(PendingOperation::Delete { word: existing.word.clone() }, &[])
            .await?;
        match outcome {
            WriteOutcome::Synced => self.notify(
                NoticeLevel::Success,
                &format!("\"{}\" deleted from Google Sheet", existing.word),
            ),
            WriteOutcome::Queued => self.notify(NoticeLevel::Warning, "Delete queued (offline)"),
        }
        Ok(outcome)
    }

    // ---------------------------------------------------------------
    // Browsing
    // ---------------------------------------------------------------

    /// Case-insensitive substring match on word, meaning or a synonym
    pub fn search(&self, query: &str) -> Vec<WordEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.words
            .borrow()
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&query)
                    || w.meaning.to_lowercase().contains(&query)
                    || w.synonyms.iter().any(|s| s.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    pub fn vocabulary(&self, filter: &WordFilter) -> Vec<WordEntry> {
        let words = self.words.borrow();
        match filter {
            WordFilter::All => words.clone(),
            WordFilter::Recent => words.iter().take(RECENT_LIMIT).cloned().collect(),
            WordFilter::Pos(pos) => words
                .iter()
                .filter(|w| w.pos.eq_ignore_ascii_case(pos))
                .cloned()
                .collect(),
        }
    }

    pub fn counts(&self) -> WordCounts {
        let queue = self.queue.pending();
        let words = self.words.borrow();
        let total = words.len();
        let local = words
            .iter()
            .filter(|w| reconcile::sync_status(&queue, &w.word) == SyncStatus::Pending)
            .count();
        WordCounts {
            total,
            local,
            from_sheet: total.saturating_sub(local),
        }
    }

    // ---------------------------------------------------------------
    // Word of the day, quiz, preferences
    // ---------------------------------------------------------------

    pub fn word_of_the_day<G: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut G) -> Result<WordEntry> {
        wotd::select_daily(&self.words(), today, &self.store, rng)
    }

    /// Speak `word` if audio is on and a pronouncer is available
    pub fn pronounce(&self, word: &str) -> bool {
        if !self.prefs.settings().audio_enabled {
            self.notify(NoticeLevel::Warning, "Audio is disabled in settings");
            return false;
        }
        if word.trim().is_empty() {
            self.notify(NoticeLevel::Warning, "No word available for pronunciation");
            return false;
        }
        let Some(pronouncer) = self.caps.pronouncer.as_ref() else {
            self.notify(NoticeLevel::Error, "Speech synthesis is not available on this system");
            return false;
        };
        match pronouncer.speak(word) {
            Ok(()) => true,
            Err(e) => {
                debug!("pronunciation failed: {}", e);
                self.notify(NoticeLevel::Error, "Audio playback failed");
                false
            }
        }
    }

    pub fn start_quiz<G: Rng + ?Sized>(&self, requested: Option<usize>, rng: &mut G) -> Result<QuizSession> {
        let requested = requested.unwrap_or(self.config.quiz.default_questions);
        let session = match QuizSession::start(&self.words(), requested, rng) {
            Ok(session) => session,
            Err(e) => {
                self.notify(NoticeLevel::Error, &e.to_string());
                return Err(e);
            }
        };
        if session.was_capped() {
            self.notify(
                NoticeLevel::Warning,
                &format!(
                    "Starting quiz with {} questions (limited by available words)",
                    session.total()
                ),
            );
        }
        Ok(session)
    }

    /// Score a session and persist the updated statistics
    pub fn finish_quiz(&self, session: &QuizSession, today: NaiveDate) -> Result<QuizResult> {
        let mut stats = self.store.load_quiz_stats();
        let result = session.finish(&mut stats, today);
        self.store.save_quiz_stats(&stats)?;
        Ok(result)
    }

    pub fn quiz_stats(&self) -> QuizStats {
        self.store.load_quiz_stats()
    }

    pub fn settings(&self) -> Settings {
        self.prefs.settings()
    }

    pub fn update_setting(&self, key: &str, value: bool) -> Result<Settings> {
        let settings = self.prefs.update(key, value)?;
        self.notify(NoticeLevel::Success, &format!("Setting updated: {}", key));
        Ok(settings)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.prefs.set_theme(theme)
    }

    pub fn set_admin(&self, enabled: bool) -> Result<()> {
        self.prefs.set_admin(enabled)?;
        if enabled {
            self.notify(NoticeLevel::Success, "Admin Mode Enabled 👑");
        } else {
            self.notify(NoticeLevel::Success, "Admin Mode Disabled");
        }
        Ok(())
    }

    pub fn add_favorite(&self, word: &str) -> Result<bool> {
        let Some(entry) = self.find(word) else {
            let err = VocabError::WordNotFound(word.trim().to_string());
            self.notify(NoticeLevel::Error, &err.to_string());
            return Err(err);
        };
        let added = self.favorites.add(&entry)?;
        if added {
            self.notify(
                NoticeLevel::Success,
                &format!("\"{}\" added to favorites! ⭐", entry.word),
            );
        }
        Ok(added)
    }

    pub fn remove_favorite(&self, word: &str) -> Result<bool> {
        let removed = self.favorites.remove(word)?;
        if removed {
            self.notify(
                NoticeLevel::Warning,
                &format!("\"{}\" removed from favorites", word.trim()),
            );
        }
        Ok(removed)
    }
}
