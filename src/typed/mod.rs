//! Statically typed deep mapping.
//!
//! This module is the compile-time counterpart of [`deep_map`](crate::deep_map).
//! Mappers are ordinary Rust values whose *types* describe the mapping, and
//! [`MapWith`] computes the type of the result:
//!
//! | mapper          | applies to                  | result type              |
//! |-----------------|-----------------------------|--------------------------|
//! | [`Apply<F>`]    | any `T` with `F: Fn(T) -> R` | `R`                      |
//! | [`Each<M>`]     | `Vec<T>`, `[T; N]`          | elements mapped by `M`   |
//! | [`Fields<R>`]   | structs deriving `Record`   | the struct, field-mapped |
//! | [`Keep`]        | anything                    | unchanged                |
//!
//! A shape mapper that meets a value of another shape leaves it unchanged,
//! exactly like the dynamic traversal: `Each` on a struct or a number, or
//! `Fields` on a sequence, is the identity. `Option<T>` and `Box<T>`
//! distribute shape mappers over their content, so `None` stays `None`.
//!
//! Record mappers are generated per struct by `#[derive(Record)]`: only the
//! struct's own fields can be given a mapper, and every field without one
//! keeps its type. Types that must never be traversed derive `Opaque`.
//!
//! # Examples
//!
//! ```rust
//! use deep_map::typed::{apply, each, fields, map_typed};
//! use deep_map::Record;
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Item<Price, Name> {
//!     price: Price,
//!     name: Name,
//! }
//!
//! let items = vec![
//!     Item { price: 250_u32, name: "tea" },
//!     Item { price: 1200_u32, name: "cake" },
//! ];
//!
//! let mapper = each(fields(
//!     ItemMapper::new().price(apply(|cents: u32| f64::from(cents) / 100.0)),
//! ));
//! let mapped: Vec<Item<f64, &str>> = map_typed(items, &mapper);
//!
//! assert_eq!(mapped[0], Item { price: 2.5, name: "tea" });
//! assert_eq!(mapped[1].price, 12.0);
//! ```

mod impls;

/// A value that can be mapped by a mapper of type `M`.
///
/// `Output` is the type of the mapped value. Implementations exist for every
/// mapper shape in this module; structs gain them through the derive macros.
pub trait MapWith<M> {
    /// The type of the mapped value.
    type Output;

    /// Maps `self` with `mapper`.
    fn map_with(self, mapper: &M) -> Self::Output;
}

/// The type that results from mapping a `T` with a mapper of type `M`.
///
/// # Examples
///
/// ```rust
/// use deep_map::typed::{Apply, Each, Keep, MappedTree};
///
/// static_assertions::assert_type_eq_all!(MappedTree<Vec<i32>, Each<Keep>>, Vec<i32>);
/// static_assertions::assert_type_eq_all!(
///     MappedTree<Vec<i32>, Each<Apply<fn(i32) -> String>>>,
///     Vec<String>
/// );
/// ```
pub type MappedTree<T, M> = <T as MapWith<M>>::Output;

// =============================================================================
// Mapper shapes
// =============================================================================

/// Transforms the value it meets with a function.
#[derive(Debug, Clone, Copy)]
pub struct Apply<F>(pub F);

/// Maps every element of a sequence with the inner mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Each<M>(pub M);

/// Maps the fields of a record with a generated record mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fields<R>(pub R);

/// Leaves the value it meets unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keep;

/// Mapper shapes accepted at the root of [`map_typed`].
///
/// A bare function is not a mapper; apply it directly instead.
pub trait RootMapper {}

impl<M> RootMapper for Each<M> {}
impl<R> RootMapper for Fields<R> {}
impl RootMapper for Keep {}

/// Creates an [`Apply`] mapper.
pub const fn apply<F>(function: F) -> Apply<F> {
    Apply(function)
}

/// Creates an [`Each`] mapper.
pub const fn each<M>(mapper: M) -> Each<M> {
    Each(mapper)
}

/// Creates a [`Fields`] mapper.
pub const fn fields<R>(mapper: R) -> Fields<R> {
    Fields(mapper)
}

/// Maps `value` with a root mapper and returns the typed result.
///
/// # Examples
///
/// ```rust
/// use deep_map::typed::{apply, each, map_typed};
///
/// let lengths: Vec<usize> = map_typed(vec!["a", "abc"], &each(apply(str::len)));
/// assert_eq!(lengths, vec![1, 3]);
/// ```
///
/// # Compile errors
///
/// A bare function is not a root mapper:
///
/// ```compile_fail,E0277
/// use deep_map::typed::{apply, map_typed};
///
/// let _ = map_typed(1_i32, &apply(|value: i32| value + 1));
/// ```
///
/// A field whose type is not a type parameter of its own must keep its type:
///
/// ```compile_fail,E0271
/// use deep_map::Record;
/// use deep_map::typed::{apply, fields, map_typed};
///
/// #[derive(Record)]
/// struct Person {
///     name: String,
/// }
///
/// let person = Person { name: "ada".to_string() };
/// let _ = map_typed(person, &fields(PersonMapper::new().name(apply(|name: String| name.len()))));
/// ```
///
/// Record mappers only have setters for the struct's own fields:
///
/// ```compile_fail,E0599
/// use deep_map::Record;
/// use deep_map::typed::{apply, fields, map_typed};
///
/// #[derive(Record)]
/// struct Point<X> {
///     x: X,
/// }
///
/// let _ = map_typed(Point { x: 1_i32 }, &fields(PointMapper::new().y(apply(|y: i32| y + 1))));
/// ```
pub fn map_typed<T, M>(value: T, mapper: &M) -> MappedTree<T, M>
where
    T: MapWith<M>,
    M: RootMapper,
{
    value.map_with(mapper)
}

// =============================================================================
// Shape-independent implementations
// =============================================================================

impl<T, F, R> MapWith<Apply<F>> for T
where
    F: Fn(T) -> R,
{
    type Output = R;

    fn map_with(self, mapper: &Apply<F>) -> R {
        (mapper.0)(self)
    }
}

impl<T> MapWith<Keep> for T {
    type Output = T;

    #[inline]
    fn map_with(self, _mapper: &Keep) -> T {
        self
    }
}
