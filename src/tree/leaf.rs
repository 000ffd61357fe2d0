//! Leaves that carry Rust values: opaque objects and transform functions.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::Tree;
use crate::error::TransformError;

// =============================================================================
// Opaque
// =============================================================================

/// An opaque object: any Rust value stored in a tree as a leaf.
///
/// Opaque values are never looked into, whatever fields the wrapped value
/// has. Equality and [`Tree::ptr_eq`] compare them by identity.
///
/// # Examples
///
/// ```rust
/// use deep_map::Opaque;
/// use std::time::Duration;
///
/// let timeout = Opaque::new(Duration::from_secs(5));
/// assert_eq!(timeout.downcast_ref::<Duration>(), Some(&Duration::from_secs(5)));
/// assert!(timeout.downcast_ref::<u64>().is_none());
/// assert!(timeout.ptr_eq(&timeout.clone()));
/// ```
#[derive(Clone)]
pub struct Opaque {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl Opaque {
    /// Wraps a value.
    pub fn new<T: Any>(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }

    /// Wraps a value that is already reference counted.
    pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the wrapped value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Returns `true` if the wrapped value has type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns the name of the wrapped type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if both handles point to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Opaque({})", self.type_name)
    }
}

// =============================================================================
// Transform
// =============================================================================

type TransformFn = dyn Fn(&Tree) -> Result<Tree, TransformError>;

/// A transform function: the leaf of a mapper.
///
/// The function receives the tree value at the matched position and its
/// return value replaces that value verbatim.
///
/// # Examples
///
/// ```rust
/// use deep_map::{Transform, Tree};
///
/// let triple = Transform::new(|value: &Tree| value.as_number().unwrap_or(0.0) * 3.0);
/// assert_eq!(triple.call(&Tree::from(4)).unwrap(), Tree::from(12));
///
/// let checked = Transform::try_new(|value: &Tree| match value.as_number() {
///     Some(number) if number >= 0.0 => Ok(number.sqrt()),
///     _ => Err("expected a non-negative number"),
/// });
/// assert!(checked.call(&Tree::from(-1)).is_err());
/// ```
#[derive(Clone)]
pub struct Transform(Rc<TransformFn>);

impl Transform {
    /// Wraps an infallible function.
    pub fn new<F, R>(function: F) -> Self
    where
        F: Fn(&Tree) -> R + 'static,
        R: Into<Tree>,
    {
        Self(Rc::new(move |tree: &Tree| -> Result<Tree, TransformError> {
            Ok(function(tree).into())
        }))
    }

    /// Wraps a fallible function. Its errors abort the mapping they occur in.
    pub fn try_new<F, R, E>(function: F) -> Self
    where
        F: Fn(&Tree) -> Result<R, E> + 'static,
        R: Into<Tree>,
        E: Into<TransformError>,
    {
        Self(Rc::new(move |tree: &Tree| -> Result<Tree, TransformError> {
            function(tree).map(Into::into).map_err(Into::into)
        }))
    }

    /// Applies the function to a tree value.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function raises.
    pub fn call(&self, tree: &Tree) -> Result<Tree, TransformError> {
        (self.0)(tree)
    }

    /// Returns `true` if both handles point to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Transform(..)")
    }
}
