//! Join indices over the legacy collections.
//!
//! Every cross-reference the migration resolves goes through a
//! [`FirstMatchIndex`]: the first record seen for a key wins, later records
//! with the same key are ignored, and a missing key resolves to nothing.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::model::legacy::{Building, RoomConfiguration};

/// A key → value map that keeps the first value inserted for each key.
#[derive(Debug, Clone)]
pub struct FirstMatchIndex<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Default for FirstMatchIndex<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> FirstMatchIndex<K, V> {
    /// Indexes `items` by `key`, keeping the first item for each key.
    pub fn by_key<T, F>(items: &[T], key: F) -> Self
    where
        T: Clone + Into<V>,
        F: Fn(&T) -> K,
    {
        items
            .iter()
            .map(|item| (key(item), item.clone().into()))
            .collect()
    }

    /// Inserts `value` unless `key` is already present. Returns whether the
    /// value was kept.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Looks up a key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Looks up a key, returning the zero value on a miss.
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone + Default,
    {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for FirstMatchIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (key, value) in iter {
            index.insert(key, value);
        }
        index
    }
}

/// Building ID → shortname.
#[must_use]
pub fn building_shortnames(buildings: &[Building]) -> FirstMatchIndex<i64, String> {
    buildings
        .iter()
        .map(|b| (b.id, b.shortname.clone()))
        .collect()
}

/// Configuration ID → configuration name.
#[must_use]
pub fn configuration_names(configurations: &[RoomConfiguration]) -> FirstMatchIndex<i64, String> {
    configurations
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect()
}
