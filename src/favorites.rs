//! Favorite words, persisted as full entries

use crate::error::Result;
use crate::models::{word_key, WordEntry};
use crate::store::LocalStore;

pub struct Favorites {
    store: LocalStore,
}

impl Favorites {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<WordEntry> {
        self.store.load_favorites()
    }

    pub fn is_favorited(&self, word: &str) -> bool {
        let key = word_key(word);
        self.list().iter().any(|f| f.key() == key)
    }

    /// Returns false when the word was already a favorite
    pub fn add(&self, entry: &WordEntry) -> Result<bool> {
        let mut favorites = self.list();
        if favorites.iter().any(|f| f.key() == entry.key()) {
            return Ok(false);
        }
        favorites.push(entry.clone());
        self.store.save_favorites(&favorites)?;
        Ok(true)
    }

    /// Returns false when the word was not a favorite
    pub fn remove(&self, word: &str) -> Result<bool> {
        let key = word_key(word);
        let favorites = self.list();
        let before = favorites.len();
        let kept: Vec<_> = favorites.into_iter().filter(|f| f.key() != key).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.store.save_favorites(&kept)?;
        Ok(true)
    }

    /// Flip membership; returns the new state
    pub fn toggle(&self, entry: &WordEntry) -> Result<bool> {
        if self.is_favorited(&entry.word) {
            self.remove(&entry.word)?;
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_case_insensitive_noop() {
        let favorites = Favorites::new(LocalStore::in_memory());
        assert!(favorites.add(&WordEntry::new("Serene")).unwrap());
        assert!(!favorites.add(&WordEntry::new("serene")).unwrap());
        assert_eq!(favorites.list().len(), 1);
        assert!(favorites.is_favorited("SERENE"));
    }

    #[test]
    fn test_remove_and_toggle() {
        let favorites = Favorites::new(LocalStore::in_memory());
        let entry = WordEntry::new("Lucid");
        assert!(favorites.toggle(&entry).unwrap());
        assert!(!favorites.toggle(&entry).unwrap());
        assert!(!favorites.remove("lucid").unwrap());
        assert!(favorites.list().is_empty());
    }
}
