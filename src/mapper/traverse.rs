//! Applying a validated mapper to a tree.

use std::rc::Rc;

use crate::error::{DeepMapError, TransformError};
use crate::tree::{Record, Tree};

use super::Mapper;

impl Mapper {
    /// Applies the mapper to `tree`, returning the mapped tree.
    ///
    /// The input is never modified. Parts of the input that the mapper does
    /// not rebuild are shared with the output rather than copied:
    ///
    /// - a [`Mapper::Transform`] replaces the value with the function's output;
    /// - a [`Mapper::Each`] builds a new sequence from a sequence;
    /// - a [`Mapper::Fields`] builds a new record from a plain record;
    /// - any other pairing returns the same handle.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a transform. Transforms are called
    /// in enumeration order and nothing after the failing one runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deep_map::{tree, Mapper, Tree};
    ///
    /// let mapper = Mapper::from_root(&tree!({
    ///     "b": (Tree::function(|value| value.as_number().unwrap_or(0.0) + 1.0))
    /// }))
    /// .unwrap();
    ///
    /// let input = tree!({ "a": { "x": 1 }, "b": 1 });
    /// let output = mapper.apply(&input).unwrap();
    ///
    /// assert_eq!(output, tree!({ "a": { "x": 1 }, "b": 2 }));
    /// assert!(!output.ptr_eq(&input));
    /// assert!(output.get("a").unwrap().ptr_eq(input.get("a").unwrap()));
    /// ```
    pub fn apply(&self, tree: &Tree) -> Result<Tree, TransformError> {
        match (self, tree) {
            (Self::Transform(transform), _) => transform.call(tree),
            (Self::Each(arm), Tree::Sequence(elements)) => {
                let mapped = elements
                    .iter()
                    .map(|element| arm.apply(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Tree::sequence(mapped))
            }
            (Self::Fields(fields), Tree::Record(record)) => {
                let entries = record
                    .iter()
                    .map(|(key, value)| {
                        let value = match fields.get(key) {
                            Some(mapper) => mapper.apply(value)?,
                            None => value.clone(),
                        };
                        Ok((key.clone(), value))
                    })
                    .collect::<Result<Vec<_>, TransformError>>()?;
                Ok(Tree::Record(Rc::new(Record::from_ordered(entries))))
            }
            _ => Ok(tree.clone()),
        }
    }
}

/// Validates `mapper` and applies it to `tree`.
///
/// `mapper` mirrors the shape of `tree`: records map keys to child mappers,
/// a one-element sequence maps every element of a sequence, and functions
/// transform the value they sit on. Keys the mapper does not mention are
/// carried over unchanged, and falsy mapper values count as not mentioned.
///
/// # Errors
///
/// - [`DeepMapError::ArgumentShape`] if `mapper` is a scalar or a function.
/// - [`DeepMapError::InvalidMapper`] if `mapper` is not a well-formed mapper.
///   Validation completes before any transform runs.
/// - [`DeepMapError::Transform`] if a transform fails.
///
/// # Examples
///
/// ```rust
/// use deep_map::{deep_map, tree, Tree};
///
/// let input = tree!({
///     "obj": { "a": 0, "b": 1 },
///     "arr": [{ "x": 0 }, { "x": 1 }],
/// });
/// let increment = Tree::function(|value| value.as_number().unwrap_or(0.0) + 1.0);
///
/// let output = deep_map(
///     &input,
///     &tree!({
///         "obj": { "b": (increment.clone()) },
///         "arr": [{ "x": (increment.clone()) }],
///     }),
/// )
/// .unwrap();
///
/// assert_eq!(
///     output,
///     tree!({
///         "obj": { "a": 0, "b": 2 },
///         "arr": [{ "x": 1 }, { "x": 2 }],
///     })
/// );
/// ```
pub fn deep_map(tree: &Tree, mapper: &Tree) -> Result<Tree, DeepMapError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        tree = tree.kind_name(),
        mapper = mapper.kind_name(),
        "deep_map"
    );
    let mapper = Mapper::from_root(mapper)?;
    Ok(mapper.apply(tree)?)
}
