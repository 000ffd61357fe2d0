//! Property-based tests for `deep_map` laws.
//!
//! Deep Map Laws:
//!
//! 1. **Keep Law**: An empty sequence mapper returns the input itself.
//!    ```text
//!    deep_map(tree, []) is tree
//!    ```
//!
//! 2. **Sharing Law**: A record arm rebuilds the record but shares every
//!    entry it does not map.
//!    ```text
//!    deep_map({k: v, ..rest}, {k: f}).rest[i] is rest[i]
//!    ```
//!
//! 3. **Broadcast Law**: A sequence arm maps every element.
//!    ```text
//!    deep_map([v1, .., vn], [f]) == [f(v1), .., f(vn)]
//!    ```
//!
//! 4. **Composition Law**: Consecutive sequence arms compose.
//!    ```text
//!    deep_map(deep_map(tree, [f]), [g]) == deep_map(tree, [g . f])
//!    ```

#![forbid(unsafe_code)]

use deep_map::{Key, Record, Tree, deep_map, tree};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn leaf() -> impl Strategy<Value = Tree> {
    prop_oneof![
        Just(Tree::Null),
        any::<bool>().prop_map(Tree::from),
        (-1_000_i32..1_000).prop_map(Tree::from),
        "[a-z]{0,6}".prop_map(Tree::from),
    ]
}

fn arbitrary_tree() -> impl Strategy<Value = Tree> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Tree::sequence),
            prop::collection::vec(("[a-z0-9]{1,3}", inner), 0..6)
                .prop_map(|entries| Tree::from(entries.into_iter().collect::<Record>())),
        ]
    })
}

fn record_tree() -> impl Strategy<Value = Record> {
    prop::collection::vec(("[a-z]{1,3}", arbitrary_tree()), 1..8)
        .prop_map(|entries| entries.into_iter().collect::<Record>())
}

fn replace_with_marker() -> Tree {
    Tree::function(|_value| "mapped")
}

// =============================================================================
// Keep Law
// =============================================================================

proptest! {
    #[test]
    fn prop_keep_mapper_returns_same_handle(tree in arbitrary_tree()) {
        let output = deep_map(&tree, &tree!([])).unwrap();
        prop_assert!(output.ptr_eq(&tree));
    }

    #[test]
    fn prop_empty_record_mapper_preserves_value(tree in arbitrary_tree()) {
        let output = deep_map(&tree, &tree!({})).unwrap();
        prop_assert_eq!(&output, &tree);
        if !tree.is_plain_record() {
            prop_assert!(output.ptr_eq(&tree));
        }
    }
}

// =============================================================================
// Sharing Law
// =============================================================================

proptest! {
    #[test]
    fn prop_record_arm_shares_untouched_entries(record in record_tree()) {
        let target = record.keys().next().cloned().unwrap();
        let input = Tree::from(record);
        let mapper = Tree::record(vec![(target.clone(), replace_with_marker())]);

        let output = deep_map(&input, &mapper).unwrap();
        let input_record = input.as_record().unwrap();
        let output_record = output.as_record().unwrap();

        prop_assert_eq!(input_record.len(), output_record.len());
        for (key, value) in input_record {
            let mapped = output_record.get(key).unwrap();
            if *key == target {
                prop_assert_eq!(mapped, &tree!("mapped"));
            } else {
                prop_assert!(mapped.ptr_eq(value));
            }
        }
        let input_keys: Vec<&Key> = input_record.keys().collect();
        let output_keys: Vec<&Key> = output_record.keys().collect();
        prop_assert_eq!(input_keys, output_keys);
    }
}

// =============================================================================
// Broadcast and Composition Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_sequence_arm_broadcasts(values in prop::collection::vec(-10_000_i32..10_000, 0..40)) {
        let input = Tree::from(values.clone());
        let mapper = tree!([(Tree::function(|value| value.as_number().unwrap_or(0.0) * 3.0))]);

        let output = deep_map(&input, &mapper).unwrap();
        let expected = Tree::from(values.iter().map(|value| value * 3).collect::<Vec<_>>());

        prop_assert_eq!(output, expected);
    }

    #[test]
    fn prop_sequence_arms_compose(values in prop::collection::vec(-10_000_i32..10_000, 0..40)) {
        let add_one = |value: &Tree| value.as_number().unwrap_or(0.0) + 1.0;
        let double = |value: &Tree| value.as_number().unwrap_or(0.0) * 2.0;
        let input = Tree::from(values);

        let left = deep_map(
            &deep_map(&input, &tree!([(Tree::function(add_one))])).unwrap(),
            &tree!([(Tree::function(double))]),
        )
        .unwrap();
        let right = deep_map(
            &input,
            &tree!([(Tree::function(move |value| double(&Tree::from(add_one(value)))))]),
        )
        .unwrap();

        prop_assert_eq!(left, right);
    }
}
