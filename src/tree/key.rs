//! Record keys.
//!
//! A [`Key`] is an array index, a name or a [`Symbol`]. Names that spell a
//! canonical array index are stored as [`Key::Index`], so `"0"` and `0`
//! address the same slot of a record.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The largest valid index key. `u32::MAX` itself is a name, not an index.
const MAX_INDEX: u32 = u32::MAX - 1;

/// A unique key token compared by identity.
///
/// Two symbols created separately are never equal, even with the same
/// description. Clones of a symbol are equal to each other.
///
/// # Examples
///
/// ```rust
/// use deep_map::Symbol;
///
/// let tag = Symbol::new("tag");
/// assert_eq!(tag, tag.clone());
/// assert_ne!(tag, Symbol::new("tag"));
/// assert_eq!(tag.description(), Some("tag"));
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<Option<Box<str>>>);

impl Symbol {
    /// Creates a new symbol with a description.
    #[must_use]
    pub fn new(description: &str) -> Self {
        Self(Rc::new(Some(description.into())))
    }

    /// Creates a new symbol without a description.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Rc::new(None))
    }

    /// Returns the description given at creation, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{self}")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Symbol({})", self.description().unwrap_or(""))
    }
}

/// A record key.
///
/// The `From` conversions always produce the canonical form. Keys built
/// directly from the variants may not be canonical (`Key::Name("0")`), so
/// they compare unequal to their canonical form; [`Record`](crate::Record)
/// and mapper lookups normalize them before comparing.
///
/// # Examples
///
/// ```rust
/// use deep_map::Key;
///
/// assert_eq!(Key::from("3"), Key::Index(3));
/// assert_eq!(Key::from("03"), Key::Name("03".into()));
/// assert_eq!(Key::from("foo").as_name(), Some("foo"));
/// assert_eq!(Key::Name("3".into()).normalized(), Key::Index(3));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A canonical array index (`0`, `1`, ... `2^32 - 2`).
    Index(u32),
    /// Any other string key.
    Name(Rc<str>),
    /// A symbol key.
    Symbol(Symbol),
}

impl Key {
    /// Returns the key as a name, if it is one.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the key as an index, if it is one.
    #[must_use]
    pub const fn as_index(&self) -> Option<u32> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }

    /// Returns `true` for symbol keys.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns the canonical form of the key: names that spell an index
    /// become [`Key::Index`] and indices past the largest index become names.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Index(index) => Self::from(index),
            Self::Name(name) => Self::from(name),
            symbol @ Self::Symbol(_) => symbol,
        }
    }

    /// Borrowing counterpart of [`Key::normalized`].
    pub(crate) fn canonical(&self) -> Cow<'_, Self> {
        match self {
            Self::Index(index) if *index > MAX_INDEX => Cow::Owned(Self::from(*index)),
            Self::Name(name) => parse_index(name)
                .map_or(Cow::Borrowed(self), |index| Cow::Owned(Self::Index(index))),
            _ => Cow::Borrowed(self),
        }
    }

    /// Enumeration class: indices first, then names, then symbols.
    pub(crate) const fn class(&self) -> u8 {
        match self {
            Self::Index(_) => 0,
            Self::Name(_) => 1,
            Self::Symbol(_) => 2,
        }
    }
}

fn parse_index(text: &str) -> Option<u32> {
    let index: u32 = text.parse().ok()?;
    (index <= MAX_INDEX && index.to_string() == text).then_some(index)
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        parse_index(text).map_or_else(|| Self::Name(Rc::from(text)), Self::Index)
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        parse_index(&text).map_or_else(|| Self::Name(Rc::from(text)), Self::Index)
    }
}

impl From<Rc<str>> for Key {
    fn from(text: Rc<str>) -> Self {
        parse_index(&text).map_or(Self::Name(text), Self::Index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        if index <= MAX_INDEX {
            Self::Index(index)
        } else {
            Self::Name(Rc::from(index.to_string()))
        }
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => write!(formatter, "{name:?}"),
            Self::Symbol(symbol) => write!(formatter, "{symbol}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => formatter.write_str(name),
            Self::Symbol(symbol) => write!(formatter, "{symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("4294967294", Some(4_294_967_294))]
    #[case("4294967295", None)]
    #[case("007", None)]
    #[case("-1", None)]
    #[case("+1", None)]
    #[case("", None)]
    #[case("foo", None)]
    fn test_key_from_str_normalizes_indices(#[case] text: &str, #[case] expected: Option<u32>) {
        assert_eq!(Key::from(text).as_index(), expected);
    }

    #[test]
    fn test_key_from_large_u32_is_name() {
        assert_eq!(Key::from(u32::MAX), Key::from("4294967295"));
        assert!(Key::from(u32::MAX).as_name().is_some());
    }

    #[test]
    fn test_symbol_identity() {
        let first = Symbol::new("id");
        let second = Symbol::new("id");
        assert_eq!(Key::from(first.clone()), Key::Symbol(first.clone()));
        assert_ne!(Key::from(first), Key::from(second));
    }

    #[rstest]
    #[case(Key::Name("0".into()), Key::Index(0))]
    #[case(Key::Name("12".into()), Key::Index(12))]
    #[case(Key::Name("012".into()), Key::Name("012".into()))]
    #[case(Key::Index(u32::MAX), Key::Name("4294967295".into()))]
    #[case(Key::Index(5), Key::Index(5))]
    fn test_normalized_variants(#[case] key: Key, #[case] expected: Key) {
        assert_eq!(key.canonical().into_owned(), expected);
        assert_eq!(key.normalized(), expected);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("foo").to_string(), "foo");
        assert_eq!(Key::Index(7).to_string(), "7");
        assert_eq!(Key::from(Symbol::new("tag")).to_string(), "Symbol(tag)");
        assert_eq!(Key::from(Symbol::anonymous()).to_string(), "Symbol()");
    }

    #[test]
    fn test_key_class_order() {
        assert!(Key::Index(9).class() < Key::from("a").class());
        assert!(Key::from("a").class() < Key::from(Symbol::anonymous()).class());
    }
}
