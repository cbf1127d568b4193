//! Bookmarked nursery ids, persisted to the local store as a JSON array.

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Store key holding the serialized favorites.
pub const FAVORITES_STORAGE_KEY: &str = "nursery-favorites";

/// Ordered, duplicate-free list of record ids (insertion order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: Vec<u32>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary ids, keeping the first occurrence of each.
    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Remove `id` if present, otherwise append it. Returns whether `id` is
    /// a favorite afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        match self.ids.iter().position(|&f| f == id) {
            Some(i) => {
                self.ids.remove(i);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Load from the store. Missing or malformed data yields an empty set.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let json = match store.get(FAVORITES_STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("Failed to read favorites: {e}");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<u32>>(&json) {
            Ok(ids) => {
                let set = Self::from_ids(ids);
                log::info!("Loaded {} favorites", set.len());
                set
            }
            Err(e) => {
                log::warn!("Failed to parse stored favorites: {e}");
                Self::new()
            }
        }
    }

    /// Overwrite the stored favorites with the current list.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.ids)?;
        store.set(FAVORITES_STORAGE_KEY, &json)?;
        log::debug!("Saved {} favorites", self.ids.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favs = FavoritesSet::from_ids([3, 7]);
        assert!(favs.toggle(9));
        assert_eq!(favs.ids(), &[3, 7, 9]);
        assert!(!favs.toggle(9));
        assert_eq!(favs.ids(), &[3, 7]);
        assert!(!favs.toggle(3));
        assert_eq!(favs.ids(), &[7]);
    }

    #[test]
    fn test_from_ids_dedupes_keeping_first() {
        let favs = FavoritesSet::from_ids([5, 1, 5, 2, 1]);
        assert_eq!(favs.ids(), &[5, 1, 2]);
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let mut store = MemoryStore::new();
        FavoritesSet::from_ids([3, 7, 9]).save(&mut store).unwrap();
        assert_eq!(store.get(FAVORITES_STORAGE_KEY).unwrap().as_deref(), Some("[3,7,9]"));
        assert_eq!(FavoritesSet::load(&store).ids(), &[3, 7, 9]);
    }

    #[test]
    fn test_load_missing_or_malformed_is_empty() {
        let mut store = MemoryStore::new();
        assert!(FavoritesSet::load(&store).is_empty());

        for bad in ["{not json", "\"3,7\"", "[1, \"x\"]", "[-1]", "null"] {
            store.set(FAVORITES_STORAGE_KEY, bad).unwrap();
            assert!(FavoritesSet::load(&store).is_empty(), "{bad}");
        }
    }
}
