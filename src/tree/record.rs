//! Plain keyed records.
//!
//! A [`Record`] keeps its entries in enumeration order: index keys in
//! ascending order, then names in insertion order, then symbols in
//! insertion order. Every traversal of a record visits keys in that order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::{Key, Tree};

/// A plain key-value record.
///
/// Equality ignores enumeration order: two records are equal when they hold
/// the same keys with equal values.
///
/// # Examples
///
/// ```rust
/// use deep_map::{Key, Record, Tree};
///
/// let mut record = Record::new();
/// record.insert("b", 1);
/// record.insert("a", 2);
/// record.insert("1", 3);
///
/// let keys: Vec<String> = record.keys().map(ToString::to_string).collect();
/// assert_eq!(keys, vec!["1", "b", "a"]);
/// assert_eq!(record.get(&Key::from("a")), Some(&Tree::from(2)));
/// ```
#[derive(Clone, Default)]
pub struct Record {
    entries: Vec<(Key, Tree)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty record with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builds a record from entries that are already in enumeration order
    /// and free of duplicates.
    pub(crate) const fn from_ordered(entries: Vec<(Key, Tree)>) -> Self {
        Self { entries }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Tree> {
        self.position(key).map(|position| &self.entries[position].1)
    }

    /// Returns `true` if the record has an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.position(key).is_some()
    }

    /// Inserts a value, returning the previous value under the same key.
    ///
    /// Replacing an existing key keeps its position in the enumeration order.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Tree>) -> Option<Tree> {
        let key = key.into().normalized();
        let value = value.into();
        if let Some(position) = self.position(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        let position = match &key {
            Key::Index(index) => self.entries.partition_point(|(existing, _)| {
                matches!(existing, Key::Index(existing) if existing < index)
            }),
            Key::Name(_) => self
                .entries
                .partition_point(|(existing, _)| !existing.is_symbol()),
            Key::Symbol(_) => self.entries.len(),
        };
        self.entries.insert(position, (key, value));
        None
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &Key) -> Option<Tree> {
        self.position(key)
            .map(|position| self.entries.remove(position).1)
    }

    /// Iterates over the keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Iterates over the values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = &Tree> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Iterates over the entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Tree)> {
        self.entries.iter().map(split_entry)
    }

    fn position(&self, key: &Key) -> Option<usize> {
        let key = key.canonical();
        match key.as_ref() {
            Key::Index(index) => {
                let indices = self
                    .entries
                    .partition_point(|(existing, _)| existing.class() == 0);
                self.entries[..indices]
                    .binary_search_by(|(existing, _)| {
                        existing.as_index().unwrap_or(u32::MAX).cmp(index)
                    })
                    .ok()
            }
            _ => self
                .entries
                .iter()
                .position(|(existing, _)| existing == key.as_ref()),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| found == value))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Key>,
    V: Into<Tree>,
{
    /// Later entries replace earlier ones with the same key, keeping the
    /// position of the first.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterator: I) -> Self {
        let mut indices: BTreeMap<u32, Tree> = BTreeMap::new();
        let mut others: Vec<(Key, Tree)> = Vec::new();
        let mut positions: HashMap<Key, usize> = HashMap::new();

        for (key, value) in iterator {
            let value = value.into();
            match key.into().normalized() {
                Key::Index(index) => {
                    indices.insert(index, value);
                }
                key => {
                    if let Some(&position) = positions.get(&key) {
                        others[position].1 = value;
                    } else {
                        positions.insert(key.clone(), others.len());
                        others.push((key, value));
                    }
                }
            }
        }

        // Stable: names and symbols keep their insertion order.
        others.sort_by_key(|(key, _)| key.class());

        let mut entries = Vec::with_capacity(indices.len() + others.len());
        entries.extend(indices.into_iter().map(|(index, value)| (Key::Index(index), value)));
        entries.extend(others);
        Self::from_ordered(entries)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a Key, &'a Tree);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (Key, Tree)>,
        fn(&'a (Key, Tree)) -> (&'a Key, &'a Tree),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(split_entry as fn(&'a (Key, Tree)) -> (&'a Key, &'a Tree))
    }
}

fn split_entry((key, value): &(Key, Tree)) -> (&Key, &Tree) {
    (key, value)
}

impl fmt::Debug for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}
