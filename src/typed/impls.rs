//! [`MapWith`] implementations for standard types.

use std::rc::Rc;

use super::{Each, Fields, MapWith};

// =============================================================================
// Sequences
// =============================================================================

impl<T, M> MapWith<Each<M>> for Vec<T>
where
    T: MapWith<M>,
{
    type Output = Vec<T::Output>;

    fn map_with(self, mapper: &Each<M>) -> Self::Output {
        self.into_iter()
            .map(|element| element.map_with(&mapper.0))
            .collect()
    }
}

impl<T, R> MapWith<Fields<R>> for Vec<T> {
    type Output = Self;

    #[inline]
    fn map_with(self, _mapper: &Fields<R>) -> Self {
        self
    }
}

impl<T, M, const N: usize> MapWith<Each<M>> for [T; N]
where
    T: MapWith<M>,
{
    type Output = [T::Output; N];

    fn map_with(self, mapper: &Each<M>) -> Self::Output {
        self.map(|element| element.map_with(&mapper.0))
    }
}

impl<T, R, const N: usize> MapWith<Fields<R>> for [T; N] {
    type Output = Self;

    #[inline]
    fn map_with(self, _mapper: &Fields<R>) -> Self {
        self
    }
}

// =============================================================================
// Containers that distribute shape mappers
// =============================================================================

/// Implements the shape mappers for a single-value container by mapping its
/// content.
macro_rules! distribute_shape {
    ($container:ident, $map:expr) => {
        impl<T, M> MapWith<Each<M>> for $container<T>
        where
            T: MapWith<Each<M>>,
        {
            type Output = $container<T::Output>;

            fn map_with(self, mapper: &Each<M>) -> Self::Output {
                $map(self, |content: T| content.map_with(mapper))
            }
        }

        impl<T, R> MapWith<Fields<R>> for $container<T>
        where
            T: MapWith<Fields<R>>,
        {
            type Output = $container<T::Output>;

            fn map_with(self, mapper: &Fields<R>) -> Self::Output {
                $map(self, |content: T| content.map_with(mapper))
            }
        }
    };
}

#[allow(clippy::boxed_local, clippy::unnecessary_box_returns)]
fn map_box<T, U>(content: Box<T>, function: impl FnOnce(T) -> U) -> Box<U> {
    Box::new(function(*content))
}

distribute_shape!(Option, Option::map);
distribute_shape!(Box, map_box);

// =============================================================================
// Opaque leaves
// =============================================================================

/// Implements the shape mappers as the identity: the values are leaves that
/// no shape mapper traverses.
macro_rules! opaque_leaf {
    ($($leaf:ty),* $(,)?) => {
        $(
            impl<M> MapWith<Each<M>> for $leaf {
                type Output = Self;

                #[inline]
                fn map_with(self, _mapper: &Each<M>) -> Self {
                    self
                }
            }

            impl<R> MapWith<Fields<R>> for $leaf {
                type Output = Self;

                #[inline]
                fn map_with(self, _mapper: &Fields<R>) -> Self {
                    self
                }
            }
        )*
    };
}

opaque_leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Rc<str>,
    crate::tree::Opaque,
);
