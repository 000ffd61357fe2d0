//! # deep-map
//!
//! Shape-matched deep mapping of nested data.
//!
//! A *mapper* mirrors the shape of the data it applies to: a record of
//! mappers maps the keys it names, a one-element sequence maps every element
//! of a sequence, and functions at the leaves compute the new values.
//! Everything the mapper does not mention is carried over unchanged, and the
//! input is never modified.
//!
//! ## Overview
//!
//! - **Trees**: [`Tree`], a dynamic value of null, booleans, numbers,
//!   strings, sequences, plain records, opaque objects and functions, with
//!   the [`tree!`] literal macro.
//! - **Mappers**: [`Mapper`], a validated mapper, and [`is_mapper`] to check
//!   a candidate without mapping anything.
//! - **Traversal**: [`deep_map`], which validates a mapper and applies it.
//! - **Typed mapping**: the [`typed`] module derives the output type of a
//!   mapping statically for ordinary Rust structs.
//!
//! ## Feature Flags
//!
//! - `derive`: the `Record` and `Opaque` derive macros (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for [`Tree`] and [`Key`]
//! - `tracing`: debug events for rejected mappers and trace events per call
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use deep_map::{deep_map, tree, Tree};
//!
//! let input = tree!({
//!     "obj": { "a": 0, "b": 1 },
//!     "arr": [{ "x": 0 }, { "x": 1 }],
//! });
//! let increment = Tree::function(|value| value.as_number().unwrap_or(0.0) + 1.0);
//!
//! let output = deep_map(
//!     &input,
//!     &tree!({
//!         "obj": { "b": (increment.clone()) },
//!         "arr": [{ "x": (increment.clone()) }],
//!     }),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     output,
//!     tree!({ "obj": { "a": 0, "b": 2 }, "arr": [{ "x": 1 }, { "x": 2 }] })
//! );
//! // The input is untouched.
//! assert_eq!(input.get("obj").and_then(|obj| obj.get("b")), Some(&Tree::from(1)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use deep_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{DeepMapError, TransformError};
    pub use crate::mapper::{Mapper, is_mapper};
    pub use crate::tree::{Key, Record, Tree};
    pub use crate::typed::{
        Apply, Each, Fields, Keep, MapWith, MappedTree, apply, each, fields, map_typed,
    };
    pub use crate::{deep_map, tree};

    #[cfg(feature = "derive")]
    pub use deep_map_derive::{Opaque, Record};
}

pub mod error;
pub mod mapper;
pub mod tree;
pub mod typed;

pub use error::{
    ArgumentShapeError, DeepMapError, INVALID_MAPPER_MESSAGE, InvalidMapperError,
    InvalidMapperReason, MapperPath, PathSegment, TransformError,
};
pub use mapper::{FieldMappers, Mapper, deep_map, is_mapper};
pub use tree::{Key, Opaque, Record, Symbol, Transform, Tree};

#[cfg(feature = "derive")]
pub use deep_map_derive::{Opaque, Record};
