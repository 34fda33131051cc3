//! Word of the day
//!
//! One pick per local calendar day, persisted so repeated runs on the same
//! day show the same word.

use crate::error::Result;
use crate::models::WordEntry;
use crate::store::LocalStore;
use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WotdPick {
    /// Local date, `YYYY-MM-DD`
    pub date: String,
    pub word: String,
}

pub fn today_key(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// Shown when the collection is empty
pub fn fallback_word() -> WordEntry {
    WordEntry {
        word: "Welcome".into(),
        pronunciation: "/ˈwelkəm/".into(),
        hindi_meaning: "स्वागत".into(),
        meaning: "To greet someone in a friendly way".into(),
        example: "Welcome to your daily vocabulary practice!".into(),
        mnemonic: "Well + come: it is well that you came".into(),
        pos: "Interjection".into(),
        synonyms: vec!["greet".into(), "receive".into()],
        ..Default::default()
    }
}

/// Today's word: the stored pick when it is from today and still present,
/// otherwise a fresh uniform pick that is persisted.
pub fn select_daily<R: Rng + ?Sized>(
    words: &[WordEntry],
    today: NaiveDate,
    store: &LocalStore,
    rng: &mut R,
) -> Result<WordEntry> {
    if words.is_empty() {
        return Ok(fallback_word());
    }

    let date = today_key(today);
    if let Some(pick) = store.load_wotd() {
        if pick.date == date && !pick.word.is_empty() {
            if let Some(entry) = words.iter().find(|w| w.is_same_word(&pick.word)) {
                return Ok(entry.clone());
            }
            debug!("stored word of the day {:?} is gone, picking again", pick.word);
        }
    }

    let Some(entry) = words.choose(rng) else {
        return Ok(fallback_word());
    };
    store.save_wotd(Some(&WotdPick {
        date,
        word: entry.word.clone(),
    }))?;
    debug!("picked {:?} as word of the day", entry.word);
    Ok(entry.clone())
}

/// Forget the stored pick so the next selection draws again
pub fn reset(store: &LocalStore) -> Result<()> {
    store.save_wotd(None)
}

/// Time left until the next local midnight
pub fn duration_until_next_midnight(now: DateTime<Local>) -> Duration {
    let tomorrow = now.date_naive() + ChronoDuration::days(1);
    let next = tomorrow
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .unwrap_or_else(|| now + ChronoDuration::hours(24));
    (next - now).to_std().unwrap_or(Duration::from_secs(1))
}
