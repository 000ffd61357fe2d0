//! Derive macros for deep-map typed mapping.
//!
//! This crate provides procedural macros that connect ordinary Rust types
//! to the typed mapping layer of `deep-map`.
//!
//! # Available Derive Macros
//!
//! - [`Record`]: Makes a struct a plain record that typed mappers can
//!   traverse field by field
//! - [`Opaque`]: Makes a type a leaf that typed mappers never traverse
//!
//! # Example: Record
//!
//! ```rust,ignore
//! use deep_map::Record;
//! use deep_map::typed::{apply, fields, map_typed};
//!
//! #[derive(Record)]
//! struct Point<X, Y> {
//!     x: X,
//!     y: Y,
//! }
//!
//! let point = Point { x: 1_i32, y: 2_i32 };
//! let mapped = map_typed(point, &fields(PointMapper::new().x(apply(|x: i32| x as f64))));
//! assert_eq!(mapped.x, 1.0);
//! assert_eq!(mapped.y, 2);
//! ```

use proc_macro::TokenStream;

mod opaque;
mod record;

/// Derive macro that makes a struct a plain record for typed mapping.
///
/// # Requirements
///
/// - The type must be a struct with named fields
/// - Every field type must convert into `deep_map::Tree`
///
/// # Generated Code
///
/// For a struct `Name`, generates:
///
/// - `NameMapper<M0 = Keep, ..>`, a record mapper with one type parameter
///   per field, a `new()` constructor that keeps every field, and a setter
///   per field that replaces that field's mapper
/// - `impl MapWith<Fields<NameMapper<..>>> for Name<..>`, mapping each field
///   with its mapper
/// - `impl MapWith<Each<M>> for Name<..>`, which returns the value unchanged
/// - `impl From<Name<..>> for deep_map::Tree`, producing a record keyed by
///   field name
///
/// # Setter Names
///
/// Setters take the names of the fields. When a field is named `new`, its
/// setter replaces the `new()` constructor and the mapper is created with
/// `Default::default()` instead. A field named `default` likewise hides
/// `NameMapper::default()` behind its setter; use `NameMapper::new()` or
/// `<NameMapper as Default>::default()`.
///
/// # Type Changes
///
/// A field whose type is a type parameter used by no other field may change
/// type: the parameter is replaced by the mapped type in the output. Every
/// other field must be mapped to a value of the same type.
///
/// # Example
///
/// ```rust,ignore
/// use deep_map::Record;
/// use deep_map::typed::{apply, fields, map_typed, Fields, Apply, Keep, MappedTree};
///
/// #[derive(Record)]
/// struct Order<Total> {
///     id: u64,
///     total: Total,
/// }
///
/// type ToText = Apply<fn(u32) -> String>;
/// static_assertions::assert_type_eq_all!(
///     MappedTree<Order<u32>, Fields<OrderMapper<Keep, ToText>>>,
///     Order<String>
/// );
/// ```
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record_impl(input)
}

/// Derive macro that makes a type an opaque leaf for typed mapping.
///
/// Opaque values are never traversed: sequence and record mappers leave
/// them unchanged, and only a function mapper can replace them. Any type
/// can derive `Opaque`, including enums and tuple structs.
///
/// # Generated Code
///
/// - `impl MapWith<Each<M>> for Name<..>` and
///   `impl MapWith<Fields<R>> for Name<..>`, both returning the value unchanged
/// - `impl From<Name<..>> for deep_map::Tree`, wrapping the value in an
///   opaque leaf (requires `Name<..>: 'static`)
///
/// # Example
///
/// ```rust,ignore
/// use deep_map::{Opaque, Tree};
///
/// #[derive(Debug, PartialEq, Opaque)]
/// struct Timestamp(u64);
///
/// let tree = Tree::from(Timestamp(1_700_000_000));
/// assert_eq!(
///     tree.as_opaque().and_then(|opaque| opaque.downcast_ref::<Timestamp>()),
///     Some(&Timestamp(1_700_000_000))
/// );
/// ```
#[proc_macro_derive(Opaque)]
pub fn derive_opaque(input: TokenStream) -> TokenStream {
    opaque::derive_opaque_impl(input)
}
