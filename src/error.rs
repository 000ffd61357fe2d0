//! Error types for deep mapping.
//!
//! Three things can go wrong when mapping a tree:
//!
//! - the mapper argument is not a sequence or record at all ([`ArgumentShapeError`]),
//! - the mapper does not follow the mapper grammar ([`InvalidMapperError`]),
//! - a transform function fails while being applied ([`TransformError`]).
//!
//! [`DeepMapError`] unifies the three so that the entry point can use `?`.

use std::fmt;

use smallvec::SmallVec;

use crate::tree::Key;

/// The sentence every mapper validation failure starts with.
pub const INVALID_MAPPER_MESSAGE: &str = "The deep mapper must be a tree whose leaves are functions \
     and whose nodes are plain records or single-element sequences.";

// =============================================================================
// Mapper Path
// =============================================================================

/// One step from a mapper node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// The child stored under a record key.
    Key(Key),
    /// The single child of a sequence arm.
    Element,
}

/// Location of a node inside a mapper, rendered as `$.items[*].foo`.
///
/// A sequence arm is written `[*]` and an index key of a record `[3]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperPath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl MapperPath {
    /// Creates the path of the mapper root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the segments from the root to the node.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` if this is the path of the mapper root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for MapperPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(Key::Index(index)) => write!(formatter, "[{index}]")?,
                PathSegment::Key(key) => write!(formatter, ".{key}")?,
                PathSegment::Element => formatter.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// InvalidMapperError
// =============================================================================

/// Why a mapper node was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMapperReason {
    /// A sequence arm with two or more elements.
    SequenceArmLength(usize),
    /// A leaf that is neither a function nor a falsy record value.
    NotCallable(&'static str),
    /// A node that is neither a function, a plain record nor a sequence.
    NotANode(&'static str),
}

impl fmt::Display for InvalidMapperReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceArmLength(length) => write!(
                formatter,
                "sequence arm has {length} elements, expected exactly one"
            ),
            Self::NotCallable(kind) => write!(formatter, "leaf is a {kind}, expected a function"),
            Self::NotANode(kind) => write!(
                formatter,
                "found a {kind}, expected a function, a plain record or a sequence"
            ),
        }
    }
}

/// Represents a mapper that does not follow the mapper grammar.
///
/// Raised before any part of the tree is visited.
///
/// # Examples
///
/// ```rust
/// use deep_map::{tree, Mapper};
///
/// let error = Mapper::from_node(&tree!({ "a": 5 })).unwrap_err();
/// assert_eq!(error.path().to_string(), "$.a");
/// assert!(error.to_string().starts_with("The deep mapper must be a tree"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMapperError {
    path: MapperPath,
    reason: InvalidMapperReason,
}

impl InvalidMapperError {
    pub(crate) const fn new(path: MapperPath, reason: InvalidMapperReason) -> Self {
        Self { path, reason }
    }

    /// Returns the location of the offending mapper node.
    #[must_use]
    pub const fn path(&self) -> &MapperPath {
        &self.path
    }

    /// Returns why the node was rejected.
    #[must_use]
    pub const fn reason(&self) -> &InvalidMapperReason {
        &self.reason
    }
}

impl fmt::Display for InvalidMapperError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{INVALID_MAPPER_MESSAGE} At {}: {}.",
            self.path, self.reason
        )
    }
}

impl std::error::Error for InvalidMapperError {}

// =============================================================================
// ArgumentShapeError
// =============================================================================

/// Represents a mapper argument that is not a sequence or a record.
///
/// This is the argument-shape `TypeError` of the entry point: scalars and
/// bare functions are not accepted as the root of a mapper.
///
/// # Examples
///
/// ```rust
/// use deep_map::ArgumentShapeError;
///
/// let error = ArgumentShapeError::new("number");
/// assert_eq!(
///     error.to_string(),
///     "The deep mapper must be a sequence or record, got number"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentShapeError {
    found: &'static str,
}

impl ArgumentShapeError {
    /// Creates an error for a root mapper of the given kind.
    #[must_use]
    pub const fn new(found: &'static str) -> Self {
        Self { found }
    }

    /// Returns the kind of value that was passed as the mapper.
    #[must_use]
    pub const fn found(&self) -> &'static str {
        self.found
    }
}

impl fmt::Display for ArgumentShapeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "The deep mapper must be a sequence or record, got {}",
            self.found
        )
    }
}

impl std::error::Error for ArgumentShapeError {}

// =============================================================================
// TransformError
// =============================================================================

/// An error raised by a caller-supplied transform function.
///
/// The original error is kept untouched and is available through
/// [`std::error::Error::source`] and [`TransformError::into_inner`].
///
/// # Examples
///
/// ```rust
/// use deep_map::TransformError;
///
/// let error = TransformError::from("negative input");
/// assert_eq!(error.to_string(), "negative input");
/// ```
#[derive(Debug)]
pub struct TransformError {
    inner: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl TransformError {
    /// Wraps an arbitrary error raised by a transform.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            inner: error.into(),
        }
    }

    /// Returns the error raised by the transform.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Consumes the wrapper, returning the error raised by the transform.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, formatter)
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl From<&str> for TransformError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for TransformError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

// =============================================================================
// DeepMapError
// =============================================================================

/// Represents every error [`deep_map`](crate::deep_map) can return.
///
/// # Examples
///
/// ```rust
/// use deep_map::{deep_map, tree, DeepMapError};
///
/// let result = deep_map(&tree!({ "a": 1 }), &tree!(5));
/// assert!(matches!(result, Err(DeepMapError::ArgumentShape(_))));
/// ```
#[derive(Debug)]
pub enum DeepMapError {
    /// The mapper argument is not a sequence or a record.
    ArgumentShape(ArgumentShapeError),
    /// The mapper does not follow the mapper grammar.
    InvalidMapper(InvalidMapperError),
    /// A transform function failed; the mapping was aborted.
    Transform(TransformError),
}

impl fmt::Display for DeepMapError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentShape(error) => write!(formatter, "{error}"),
            Self::InvalidMapper(error) => write!(formatter, "{error}"),
            Self::Transform(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for DeepMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArgumentShape(error) => Some(error),
            Self::InvalidMapper(error) => Some(error),
            Self::Transform(error) => Some(error),
        }
    }
}

impl From<ArgumentShapeError> for DeepMapError {
    fn from(error: ArgumentShapeError) -> Self {
        Self::ArgumentShape(error)
    }
}

impl From<InvalidMapperError> for DeepMapError {
    fn from(error: InvalidMapperError) -> Self {
        Self::InvalidMapper(error)
    }
}

impl From<TransformError> for DeepMapError {
    fn from(error: TransformError) -> Self {
        Self::Transform(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_mapper_path_display() {
        let mut path = MapperPath::root();
        assert_eq!(path.to_string(), "$");

        path.push(PathSegment::Key(Key::from("items")));
        path.push(PathSegment::Element);
        path.push(PathSegment::Key(Key::from("foo")));
        path.push(PathSegment::Key(Key::Index(3)));
        assert_eq!(path.to_string(), "$.items[*].foo[3]");

        path.pop();
        assert_eq!(path.to_string(), "$.items[*].foo");
        assert!(!path.is_root());
    }

    #[test]
    fn test_invalid_mapper_error_display() {
        let mut path = MapperPath::root();
        path.push(PathSegment::Key(Key::from("a")));
        let error = InvalidMapperError::new(path, InvalidMapperReason::SequenceArmLength(2));
        assert_eq!(
            error.to_string(),
            format!(
                "{INVALID_MAPPER_MESSAGE} At $.a: sequence arm has 2 elements, expected exactly one."
            )
        );
    }

    #[test]
    fn test_argument_shape_error_display() {
        let error = ArgumentShapeError::new("function");
        assert_eq!(
            error.to_string(),
            "The deep mapper must be a sequence or record, got function"
        );
        assert_eq!(error.found(), "function");
    }

    #[test]
    fn test_transform_error_keeps_source() {
        let error = TransformError::new(std::fmt::Error);
        assert_eq!(error.to_string(), std::fmt::Error.to_string());
        assert!(error.source().is_some());
        assert!(error.into_inner().downcast::<std::fmt::Error>().is_ok());
    }

    #[test]
    fn test_deep_map_error_from_conversions() {
        let error: DeepMapError = ArgumentShapeError::new("string").into();
        assert!(matches!(error, DeepMapError::ArgumentShape(_)));

        let error: DeepMapError = TransformError::from("boom").into();
        assert_eq!(error.to_string(), "boom");
        assert_eq!(error.source().map(ToString::to_string), Some("boom".to_string()));
    }
}
