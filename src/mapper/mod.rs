//! Validated mappers.
//!
//! A mapper mirrors the shape of the trees it applies to. Callers write
//! mappers as ordinary [`Tree`](crate::Tree)s whose leaves are functions; validation turns
//! such a tree into a [`Mapper`], a tagged variant the traversal matches on
//! without inspecting shapes again.
//!
//! | mapper tree          | [`Mapper`]            | applies to     |
//! |----------------------|-----------------------|----------------|
//! | function             | [`Mapper::Transform`] | any value      |
//! | `[child]`            | [`Mapper::Each`]      | sequences      |
//! | `[]`                 | [`Mapper::Keep`]      | nothing        |
//! | `{ key: child, .. }` | [`Mapper::Fields`]    | plain records  |
//!
//! # Examples
//!
//! ```rust
//! use deep_map::{tree, Mapper, Tree};
//!
//! let mapper = Mapper::from_root(&tree!({
//!     "items": [{ "price": (Tree::function(|price| price.as_number().unwrap_or(0.0) * 2.0)) }]
//! }))
//! .unwrap();
//!
//! let input = tree!({ "items": [{ "price": 10 }, { "name": "gift" }] });
//! let output = mapper.apply(&input).unwrap();
//! assert_eq!(output, tree!({ "items": [{ "price": 20 }, { "name": "gift" }] }));
//! ```

mod traverse;
mod validate;

use std::collections::HashMap;

use crate::tree::{Key, Transform};

pub use traverse::deep_map;
pub use validate::is_mapper;

/// A validated mapper.
#[derive(Debug, Clone)]
pub enum Mapper {
    /// Replaces the matched value with the function's output.
    Transform(Transform),
    /// Applies the inner mapper to every element of a sequence.
    Each(Box<Mapper>),
    /// Leaves the matched value untouched.
    Keep,
    /// Applies a mapper per key of a plain record.
    Fields(FieldMappers),
}

impl Mapper {
    /// Returns `true` if applying this mapper never changes anything.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// The per-key mappers of a record arm, in the order they were written.
///
/// Keys whose mapper value was falsy are not stored: they behave exactly
/// like keys the mapper does not mention.
#[derive(Debug, Clone, Default)]
pub struct FieldMappers {
    entries: Vec<(Key, Mapper)>,
    positions: HashMap<Key, usize>,
}

impl FieldMappers {
    /// Creates an empty record arm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the mapper for `key`.
    pub fn insert(&mut self, key: impl Into<Key>, mapper: Mapper) {
        let key = key.into().normalized();
        if let Some(&position) = self.positions.get(&key) {
            self.entries[position].1 = mapper;
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, mapper));
        }
    }

    /// Returns the mapper for `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Mapper> {
        self.positions
            .get(key.canonical().as_ref())
            .map(|&position| &self.entries[position].1)
    }

    /// Returns the number of keys with a mapper.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has a mapper.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys and their mappers.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Mapper)> {
        self.entries.iter().map(|(key, mapper)| (key, mapper))
    }
}

impl<K: Into<Key>> FromIterator<(K, Mapper)> for FieldMappers {
    fn from_iter<I: IntoIterator<Item = (K, Mapper)>>(iterator: I) -> Self {
        let mut fields = Self::new();
        for (key, mapper) in iterator {
            fields.insert(key, mapper);
        }
        fields
    }
}
