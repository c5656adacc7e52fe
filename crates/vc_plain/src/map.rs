use alloc::string::String;
use alloc::vec::{self, Vec};
use core::fmt;
use core::hash::BuildHasher;

use foldhash::fast::FixedState;
use hashbrown::HashTable;

use crate::Plain;

/// Seed of the key index; fixed so lookups do not depend on a random source.
const KEY_STATE: FixedState = FixedState::with_seed(0x2D35_8DCC_AA6C_78A5);

#[inline]
fn hash_key(key: &str) -> u64 {
    KEY_STATE.hash_one(key)
}

// -----------------------------------------------------------------------------
// PlainMap

/// An insertion-ordered, string-keyed map of [`Plain`] values.
///
/// Entries are kept in insertion order; a hash table of entry positions
/// gives constant-time lookups.
///
/// # Examples
///
/// ```
/// use vc_plain::{Plain, PlainMap};
///
/// let mut map = PlainMap::new();
/// map.insert("b", 1);
/// map.insert("a", 2);
/// // Replacing keeps the original position.
/// map.insert("b", 3);
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(map.get("b"), Some(&Plain::Int(3)));
/// ```
#[derive(Clone, Default)]
pub struct PlainMap {
    entries: Vec<(String, Plain)>,
    indices: HashTable<usize>,
}

impl PlainMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let entries = &self.entries;
        self.indices
            .find(hash_key(key), |&index| entries[index].0 == key)
            .copied()
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Plain> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Plain> {
        self.position(key).map(|index| &mut self.entries[index].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Inserts a value.
    ///
    /// If the key already exists its value is replaced in place and the old
    /// value is returned; otherwise the entry is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Plain>) -> Option<Plain> {
        let key = key.into();
        let value = value.into();
        if let Some(index) = self.position(&key) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }

        let Self { entries, indices } = self;
        let hash = hash_key(&key);
        let index = entries.len();
        entries.push((key, value));
        indices.insert_unique(hash, index, |&i| hash_key(&entries[i].0));
        None
    }

    /// Removes `key`, shifting later entries to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Plain> {
        let Self { entries, indices } = self;
        let removed = indices
            .find_entry(hash_key(key), |&index| entries[index].0 == key)
            .ok()?
            .remove()
            .0;
        for index in indices.iter_mut() {
            if *index > removed {
                *index -= 1;
            }
        }
        Some(entries.remove(removed).1)
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Plain> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Plain)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Maps are equal when they hold the same entries in the same order.
impl PartialEq for PlainMap {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for PlainMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl IntoIterator for PlainMap {
    type Item = (String, Plain);
    type IntoIter = vec::IntoIter<(String, Plain)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Plain>> FromIterator<(K, V)> for PlainMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PlainMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Plain>> Extend<(K, V)> for PlainMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
