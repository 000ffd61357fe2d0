//! Mapper validation.
//!
//! Validation runs once, before any traversal, and turns a mapper tree into
//! a [`Mapper`]. Node rules:
//!
//! - a function is a leaf;
//! - a sequence must have exactly one element (the arm) or none (no-op);
//! - a plain record is valid when every truthy value is a valid node;
//!   falsy values mark their key as absent;
//! - anything else is rejected.
//!
//! The root of a mapper must additionally be a sequence or a record.

use crate::error::{
    ArgumentShapeError, DeepMapError, InvalidMapperError, InvalidMapperReason, MapperPath,
    PathSegment,
};
use crate::tree::Tree;

use super::{FieldMappers, Mapper};

impl Mapper {
    /// Validates a complete mapper as passed to [`deep_map`](crate::deep_map).
    ///
    /// # Errors
    ///
    /// - [`DeepMapError::ArgumentShape`] if the root is a scalar or a function.
    /// - [`DeepMapError::InvalidMapper`] if any node breaks the mapper grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deep_map::{tree, DeepMapError, Mapper, Tree};
    ///
    /// assert!(Mapper::from_root(&tree!([])).is_ok());
    /// assert!(matches!(
    ///     Mapper::from_root(&Tree::function(|value| value.clone())),
    ///     Err(DeepMapError::ArgumentShape(_))
    /// ));
    /// assert!(matches!(
    ///     Mapper::from_root(&Tree::Null),
    ///     Err(DeepMapError::InvalidMapper(_))
    /// ));
    /// ```
    pub fn from_root(candidate: &Tree) -> Result<Self, DeepMapError> {
        match candidate {
            Tree::Bool(_) | Tree::Number(_) | Tree::String(_) | Tree::Function(_) => {
                let error = ArgumentShapeError::new(candidate.kind_name());
                #[cfg(feature = "tracing")]
                tracing::debug!(found = error.found(), "rejected deep mapper root");
                Err(error.into())
            }
            _ => Ok(Self::from_node(candidate)?),
        }
    }

    /// Validates a mapper node. Unlike [`Mapper::from_root`], a bare
    /// function is accepted.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidMapperError`] pointing at the first offending node.
    pub fn from_node(candidate: &Tree) -> Result<Self, InvalidMapperError> {
        let mut path = MapperPath::root();
        parse_node(candidate, &mut path).inspect_err(log_rejection)
    }
}

impl TryFrom<&Tree> for Mapper {
    type Error = DeepMapError;

    fn try_from(candidate: &Tree) -> Result<Self, Self::Error> {
        Self::from_root(candidate)
    }
}

/// Returns `true` if `candidate` is accepted as the mapper argument of
/// [`deep_map`](crate::deep_map).
///
/// # Examples
///
/// ```rust
/// use deep_map::{is_mapper, tree, Tree};
///
/// let triple = Tree::function(|value| value.as_number().unwrap_or(0.0) * 3.0);
/// assert!(is_mapper(&tree!({ "a": [(triple.clone())] })));
/// assert!(!is_mapper(&tree!({ "a": [(triple.clone()), (triple.clone())] })));
/// assert!(!is_mapper(&tree!({ "a": 5 })));
/// assert!(!is_mapper(&triple));
/// ```
#[must_use]
pub fn is_mapper(candidate: &Tree) -> bool {
    Mapper::from_root(candidate).is_ok()
}

#[cfg(feature = "tracing")]
fn log_rejection(error: &InvalidMapperError) {
    tracing::debug!(path = %error.path(), reason = %error.reason(), "rejected deep mapper");
}

#[cfg(not(feature = "tracing"))]
const fn log_rejection(_error: &InvalidMapperError) {}

fn parse_node(candidate: &Tree, path: &mut MapperPath) -> Result<Mapper, InvalidMapperError> {
    match candidate {
        Tree::Function(function) => Ok(Mapper::Transform(function.clone())),
        Tree::Sequence(elements) => match &elements[..] {
            [] => Ok(Mapper::Keep),
            [arm] => {
                path.push(PathSegment::Element);
                let arm = parse_node(arm, path)?;
                path.pop();
                Ok(Mapper::Each(Box::new(arm)))
            }
            _ => Err(InvalidMapperError::new(
                path.clone(),
                InvalidMapperReason::SequenceArmLength(elements.len()),
            )),
        },
        Tree::Record(record) => {
            let mut fields = FieldMappers::new();
            for (key, value) in record.iter() {
                if !value.is_truthy() {
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                let mapper = parse_node(value, path)?;
                path.pop();
                fields.insert(key.clone(), mapper);
            }
            Ok(Mapper::Fields(fields))
        }
        Tree::Bool(_) | Tree::Number(_) | Tree::String(_) => Err(InvalidMapperError::new(
            path.clone(),
            InvalidMapperReason::NotCallable(candidate.kind_name()),
        )),
        Tree::Null | Tree::Opaque(_) => Err(InvalidMapperError::new(
            path.clone(),
            InvalidMapperReason::NotANode(candidate.kind_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;
    use crate::tree::Key;

    fn identity() -> Tree {
        Tree::function(|value| value.clone())
    }

    #[test]
    fn test_function_leaf() {
        assert!(matches!(Mapper::from_node(&identity()), Ok(Mapper::Transform(_))));
    }

    #[test]
    fn test_sequence_arms() {
        assert!(matches!(Mapper::from_node(&tree!([])), Ok(Mapper::Keep)));
        assert!(matches!(
            Mapper::from_node(&tree!([(identity())])),
            Ok(Mapper::Each(inner)) if matches!(*inner, Mapper::Transform(_))
        ));

        let error = Mapper::from_node(&tree!([(identity()), (identity())])).unwrap_err();
        assert_eq!(error.reason(), &InvalidMapperReason::SequenceArmLength(2));
        assert!(error.path().is_root());
    }

    #[test]
    fn test_falsy_record_values_are_absent() {
        let mapper = Mapper::from_node(&tree!({
            "zero": 0,
            "empty": "",
            "no": false,
            "nothing": null,
            "kept": (identity()),
        }))
        .unwrap();

        let Mapper::Fields(fields) = mapper else {
            panic!("expected a record arm");
        };
        assert_eq!(fields.len(), 1);
        assert!(fields.get(&Key::from("kept")).is_some());
        assert!(fields.get(&Key::from("zero")).is_none());
    }

    #[test]
    fn test_truthy_scalar_leaf_is_rejected_with_path() {
        let error = Mapper::from_node(&tree!({ "items": [{ "foo": 5 }] })).unwrap_err();
        assert_eq!(error.path().to_string(), "$.items[*].foo");
        assert_eq!(error.reason(), &InvalidMapperReason::NotCallable("number"));
    }

    #[test]
    fn test_opaque_and_null_nodes_are_rejected() {
        let error = Mapper::from_node(&tree!({ "a": (Tree::opaque(1_u8)) })).unwrap_err();
        assert_eq!(error.reason(), &InvalidMapperReason::NotANode("object"));

        let error = Mapper::from_node(&tree!([null])).unwrap_err();
        assert_eq!(error.path().to_string(), "$[*]");
        assert_eq!(error.reason(), &InvalidMapperReason::NotANode("null"));
    }

    #[test]
    fn test_root_rules() {
        for root in [tree!(1), tree!("a"), tree!(true), identity()] {
            assert!(matches!(
                Mapper::from_root(&root),
                Err(DeepMapError::ArgumentShape(_))
            ));
        }
        assert!(matches!(
            Mapper::from_root(&Tree::opaque(())),
            Err(DeepMapError::InvalidMapper(_))
        ));
        assert!(Mapper::try_from(&tree!({})).is_ok());
    }
}
