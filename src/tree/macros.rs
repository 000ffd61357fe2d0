//! The `tree!` literal macro.

/// Builds a [`Tree`](crate::Tree) from a literal.
///
/// Sequences use `[...]`, records use `{ "key": value, ... }` with string
/// literal keys, and `null` is the null leaf. Any other single token or
/// parenthesized expression is converted with `Tree::from`.
///
/// Negative numbers and other multi-token expressions must be wrapped in
/// parentheses when they appear inside a sequence or record.
///
/// # Example
///
/// ```
/// use deep_map::{tree, Tree};
///
/// let tree = tree!({
///     "name": "widget",
///     "sizes": [1, 2, (-3)],
///     "meta": { "draft": true, "owner": null },
///     "scale": (Tree::function(|value| value.as_number().unwrap_or(0.0) * 2.0)),
/// });
///
/// assert_eq!(tree.get("sizes"), Some(&Tree::from(vec![1, 2, -3])));
/// assert_eq!(tree.get("meta").and_then(|meta| meta.get("owner")), Some(&Tree::Null));
/// ```
#[macro_export]
macro_rules! tree {
    (null) => {
        $crate::Tree::Null
    };
    ([ $($element:tt),* $(,)? ]) => {
        $crate::Tree::sequence(::std::vec![ $( $crate::tree!($element) ),* ])
    };
    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::Tree::record(::std::vec![ $( ($crate::Key::from($key), $crate::tree!($value)) ),* ])
    };
    ($other:expr) => {
        $crate::Tree::from($other)
    };
}
