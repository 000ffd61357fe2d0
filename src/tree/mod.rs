//! The dynamic tree data model.
//!
//! A [`Tree`] is built from ordered sequences, plain keyed records and
//! leaves. Composite nodes are reference counted: cloning a tree clones a
//! handle, never the substructure, so a mapped tree can reuse every subtree
//! the mapper leaves alone.
//!
//! Only [`Tree::Record`] is a plain record. Any other structured Rust value
//! stored in a tree is an [`Opaque`] leaf and is never recursed into.
//!
//! # Examples
//!
//! ```rust
//! use deep_map::{tree, Tree};
//!
//! let tree = tree!({
//!     "items": [{ "foo": { "bar": 4 } }, { "foo": { "baz": "hello" } }]
//! });
//!
//! let bar = tree.get("items").and_then(|items| items.get(0_u32)).and_then(|item| item.get("foo"));
//! assert_eq!(bar, Some(&tree!({ "bar": 4 })));
//! assert!(tree.is_plain_record());
//! ```

mod key;
mod leaf;
mod macros;
mod record;
#[cfg(feature = "serde")]
mod serialization;

use std::fmt;
use std::rc::Rc;

pub use key::{Key, Symbol};
pub use leaf::{Opaque, Transform};
pub use record::Record;

/// A node of a nested data structure.
#[derive(Clone)]
pub enum Tree {
    /// The null leaf.
    Null,
    /// A boolean leaf.
    Bool(bool),
    /// A numeric leaf.
    Number(f64),
    /// A string leaf.
    String(Rc<str>),
    /// An ordered sequence node.
    Sequence(Rc<[Tree]>),
    /// A plain record node.
    Record(Rc<Record>),
    /// An opaque object leaf.
    Opaque(Opaque),
    /// A function leaf.
    Function(Transform),
}

impl Tree {
    /// Creates a sequence node.
    #[must_use]
    pub fn sequence(elements: Vec<Self>) -> Self {
        Self::Sequence(Rc::from(elements))
    }

    /// Creates a record node. Later entries replace earlier ones with the same key.
    #[must_use]
    pub fn record(entries: Vec<(Key, Self)>) -> Self {
        Self::Record(Rc::new(entries.into_iter().collect()))
    }

    /// Creates an opaque leaf wrapping `value`.
    pub fn opaque<T: std::any::Any>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    /// Creates a function leaf.
    ///
    /// ```rust
    /// use deep_map::Tree;
    ///
    /// let double = Tree::function(|value| value.as_number().unwrap_or(0.0) * 2.0);
    /// assert!(double.is_function());
    /// ```
    pub fn function<F, R>(function: F) -> Self
    where
        F: Fn(&Self) -> R + 'static,
        R: Into<Self>,
    {
        Self::Function(Transform::new(function))
    }

    /// Returns `true` for plain records.
    ///
    /// This is the only classification the traversal relies on: sequences,
    /// opaque objects and null are not plain records.
    #[must_use]
    pub const fn is_plain_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns `true` for sequences.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns `true` for function leaves.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns `true` for sequences and plain records.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Record(_))
    }

    /// Returns the truthiness of the value.
    ///
    /// `null`, `false`, `0`, `-0`, `NaN` and the empty string are falsy;
    /// everything else, including empty sequences and records, is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::String(value) => !value.is_empty(),
            Self::Sequence(_) | Self::Record(_) | Self::Opaque(_) | Self::Function(_) => true,
        }
    }

    /// Returns the name of the kind of value, as used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Record(_) => "record",
            Self::Opaque(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` if both trees are the same value.
    ///
    /// Sequences, records, opaque objects and functions are compared by
    /// reference; scalars by value (`NaN` is never the same as itself).
    ///
    /// ```rust
    /// use deep_map::tree;
    ///
    /// let shared = tree!([1, 2]);
    /// assert!(shared.ptr_eq(&shared.clone()));
    /// assert!(!shared.ptr_eq(&tree!([1, 2])));
    /// assert!(tree!("a").ptr_eq(&tree!("a")));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            #[allow(clippy::float_cmp)]
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Sequence(left), Self::Sequence(right)) => Rc::ptr_eq(left, right),
            (Self::Record(left), Self::Record(right)) => Rc::ptr_eq(left, right),
            (Self::Opaque(left), Self::Opaque(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }

    /// Returns the child under `key`: a record entry, or a sequence element
    /// for index keys.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Self> {
        match (self, key.into()) {
            (Self::Record(record), key) => record.get(&key),
            (Self::Sequence(elements), Key::Index(index)) => {
                elements.get(usize::try_from(index).ok()?)
            }
            _ => None,
        }
    }

    /// Returns the boolean value of a boolean leaf.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric value of a number leaf.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text of a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements of a sequence node.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the record of a plain record node.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the wrapped object of an opaque leaf.
    #[must_use]
    pub const fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }

    /// Returns the function of a function leaf.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Transform> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::Null
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            #[allow(clippy::float_cmp)]
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Sequence(left), Self::Sequence(right)) => {
                Rc::ptr_eq(left, right) || left[..] == right[..]
            }
            (Self::Record(left), Self::Record(right)) => Rc::ptr_eq(left, right) || left == right,
            (Self::Opaque(left), Self::Opaque(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Number(value) => write!(formatter, "{value}"),
            Self::String(value) => write!(formatter, "{value:?}"),
            Self::Sequence(elements) => formatter.debug_list().entries(elements.iter()).finish(),
            Self::Record(record) => fmt::Debug::fmt(record, formatter),
            Self::Opaque(opaque) => fmt::Debug::fmt(opaque, formatter),
            Self::Function(function) => fmt::Debug::fmt(function, formatter),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from_number {
    ($($number:ty),* $(,)?) => {
        $(
            impl From<$number> for Tree {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(value: $number) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for Tree {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<char> for Tree {
    fn from(value: char) -> Self {
        Self::String(Rc::from(value.to_string()))
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Rc<str>> for Tree {
    fn from(value: Rc<str>) -> Self {
        Self::String(value)
    }
}

impl From<Record> for Tree {
    fn from(record: Record) -> Self {
        Self::Record(Rc::new(record))
    }
}

impl From<Opaque> for Tree {
    fn from(opaque: Opaque) -> Self {
        Self::Opaque(opaque)
    }
}

impl From<Transform> for Tree {
    fn from(function: Transform) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Option<T>> for Tree {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Tree {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Tree {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Into<Self>> FromIterator<T> for Tree {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        Self::Sequence(iterator.into_iter().map(Into::into).collect())
    }
}

// Trees hold `Rc` handles and must stay on one thread.
static_assertions::assert_not_impl_any!(Tree: Send, Sync);
