//! Tests for `deep_map` on dynamic trees.
//!
//! Covers the observable contract of the traversal:
//!
//! - the input is never modified and untouched subtrees are shared
//! - one-element sequence arms broadcast over every element
//! - falsy mapper values leave their key untouched
//! - opaque objects are leaves even under a record arm
//! - malformed mappers fail before any transform runs

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use deep_map::{DeepMapError, Key, Symbol, Transform, Tree, deep_map, tree};
use rstest::rstest;

// =============================================================================
// Helpers
// =============================================================================

fn triple() -> Tree {
    Tree::function(|value| value.as_number().unwrap_or(f64::NAN) * 3.0)
}

fn increment() -> Tree {
    Tree::function(|value| value.as_number().unwrap_or(f64::NAN) + 1.0)
}

#[derive(Debug, PartialEq)]
struct Date {
    millis: u64,
}

// =============================================================================
// End-to-end
// =============================================================================

#[rstest]
fn test_readme_example() {
    let input = tree!({
        "items": [
            { "foo": { "bar": 4 } },
            { "foo": { "bar": 7, "baz": true } },
            { "foo": { "baz": "hello" } },
        ]
    });
    let mapper = tree!({ "items": [{ "foo": { "bar": (triple()) } }] });

    let output = deep_map(&input, &mapper).unwrap();

    assert_eq!(
        output,
        tree!({
            "items": [
                { "foo": { "bar": 12 } },
                { "foo": { "bar": 21, "baz": true } },
                { "foo": { "baz": "hello" } },
            ]
        })
    );
}

#[rstest]
fn test_basic_usage() {
    let input = tree!({
        "obj": { "a": 0, "b": 1 },
        "arr": [{ "x": 0 }, { "x": 1 }],
    });
    let mapper = tree!({
        "obj": { "b": (increment()) },
        "arr": [{ "x": (increment()) }],
    });

    assert_eq!(
        deep_map(&input, &mapper).unwrap(),
        tree!({
            "obj": { "a": 0, "b": 2 },
            "arr": [{ "x": 1 }, { "x": 2 }],
        })
    );
}

// =============================================================================
// Non-aliasing and structural sharing
// =============================================================================

#[rstest]
fn test_input_is_not_modified() {
    let input = tree!({ "a": { "b": [1, 2, 3] }, "c": "text" });
    let snapshot = tree!({ "a": { "b": [1, 2, 3] }, "c": "text" });

    let output = deep_map(&input, &tree!({ "a": { "b": [(increment())] } })).unwrap();

    assert_eq!(input, snapshot);
    assert!(!output.ptr_eq(&input));
    assert_eq!(output, tree!({ "a": { "b": [2, 3, 4] }, "c": "text" }));
}

#[rstest]
fn test_untouched_keys_are_shared() {
    let input = tree!({ "a": 1, "b": { "nested": [true] } });

    let output = deep_map(&input, &tree!({ "a": (increment()) })).unwrap();

    let input_b = input.get("b").unwrap();
    let output_b = output.get("b").unwrap();
    assert!(output_b.ptr_eq(input_b));
}

#[rstest]
fn test_unmatched_sequence_is_shared() {
    let input = tree!({ "list": [1, 2], "other": [3] });

    let output = deep_map(&input, &tree!({ "list": [(increment())] })).unwrap();

    assert!(output.get("other").unwrap().ptr_eq(input.get("other").unwrap()));
    assert!(!output.get("list").unwrap().ptr_eq(input.get("list").unwrap()));
}

// =============================================================================
// Sequence broadcast
// =============================================================================

#[rstest]
#[case(vec![])]
#[case(vec![1.0])]
#[case(vec![1.0, 2.0, 3.0])]
#[case((0..100).map(f64::from).collect())]
fn test_sequence_arm_maps_every_element(#[case] values: Vec<f64>) {
    let input = Tree::from(values.clone());
    let expected = Tree::from(values.iter().map(|value| value * 3.0).collect::<Vec<_>>());

    assert_eq!(deep_map(&input, &tree!([(triple())])).unwrap(), expected);
}

#[rstest]
fn test_nested_sequence_arms() {
    let input = tree!([[1, 2], [], [3]]);
    assert_eq!(
        deep_map(&input, &tree!([[(triple())]])).unwrap(),
        tree!([[3, 6], [], [9]])
    );
}

#[rstest]
fn test_empty_sequence_arm_keeps_value() {
    let input = tree!({ "a": [1, 2] });
    let output = deep_map(&input, &tree!({ "a": [] })).unwrap();
    assert!(output.get("a").unwrap().ptr_eq(input.get("a").unwrap()));

    let sequence = tree!([1, 2]);
    assert!(deep_map(&sequence, &tree!([])).unwrap().ptr_eq(&sequence));
}

// =============================================================================
// Falsy mapper values
// =============================================================================

#[rstest]
#[case(tree!(0))]
#[case(tree!(""))]
#[case(tree!(false))]
#[case(tree!(null))]
#[case(Tree::Number(f64::NAN))]
fn test_falsy_mapper_value_is_a_no_op(#[case] falsy: Tree) {
    let input = tree!({ "a": 5 });
    let mapper = Tree::record(vec![(Key::from("a"), falsy)]);

    assert_eq!(deep_map(&input, &mapper).unwrap(), tree!({ "a": 5 }));
}

// =============================================================================
// Shape mismatches and opaque objects
// =============================================================================

#[rstest]
fn test_opaque_object_is_passed_through() {
    let date = Tree::opaque(Date { millis: 86_400_000 });
    let input = tree!({ "created": (date.clone()), "n": 1 });
    let mapper = tree!({
        "created": { "millis": (increment()) },
        "n": (increment()),
    });

    let output = deep_map(&input, &mapper).unwrap();

    let created = output.get("created").unwrap();
    assert!(created.ptr_eq(&date));
    assert_eq!(
        created.as_opaque().and_then(|opaque| opaque.downcast_ref::<Date>()),
        Some(&Date { millis: 86_400_000 })
    );
    assert_eq!(output.get("n"), Some(&tree!(2)));
}

#[rstest]
fn test_opaque_object_can_be_replaced_by_a_function() {
    let input = tree!({ "created": (Tree::opaque(Date { millis: 1_000 })) });
    let mapper = tree!({
        "created": (Tree::function(|value| {
            value
                .as_opaque()
                .and_then(|opaque| opaque.downcast_ref::<Date>())
                .map_or(Tree::Null, |date| Tree::from(date.millis / 1_000))
        }))
    });

    assert_eq!(deep_map(&input, &mapper).unwrap(), tree!({ "created": 1 }));
}

#[rstest]
#[case(tree!(null))]
#[case(tree!(42))]
#[case(tree!("leaf"))]
#[case(tree!([1, 2]))]
fn test_record_arm_on_non_record_returns_same_value(#[case] input: Tree) {
    let output = deep_map(&input, &tree!({ "a": (increment()) })).unwrap();
    assert!(output.ptr_eq(&input));
}

#[rstest]
fn test_mapper_keys_missing_from_tree_are_ignored() {
    let calls = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&calls);
    let counting = Tree::function(move |value| {
        counter.set(counter.get() + 1);
        value.clone()
    });

    let output = deep_map(&tree!({ "a": 1 }), &tree!({ "missing": (counting) })).unwrap();

    assert_eq!(output, tree!({ "a": 1 }));
    assert_eq!(calls.get(), 0);
}

#[rstest]
fn test_function_leaf_replaces_whole_subtree() {
    let input = tree!({ "a": { "deep": [1, 2, 3] } });
    let mapper = tree!({ "a": (Tree::function(|_value| "replaced")) });

    assert_eq!(deep_map(&input, &mapper).unwrap(), tree!({ "a": "replaced" }));
}

// =============================================================================
// Keys
// =============================================================================

#[rstest]
fn test_index_keys_match_numeric_strings() {
    let input = tree!({ "0": 1, "10": 2, "name": 3 });
    let mapper = Tree::record(vec![(Key::Index(10), increment())]);

    assert_eq!(
        deep_map(&input, &mapper).unwrap(),
        tree!({ "0": 1, "10": 3, "name": 3 })
    );
}

#[rstest]
fn test_symbol_keys_are_mapped_and_copied() {
    let tagged = Symbol::new("tagged");
    let other = Symbol::new("other");
    let input = Tree::record(vec![
        (Key::from(tagged.clone()), tree!(1)),
        (Key::from(other.clone()), tree!(2)),
    ]);
    let mapper = Tree::record(vec![(Key::from(tagged.clone()), increment())]);

    let output = deep_map(&input, &mapper).unwrap();

    assert_eq!(output.get(tagged), Some(&tree!(2)));
    assert_eq!(output.get(other), Some(&tree!(2)));
}

// =============================================================================
// Traversal order and errors
// =============================================================================

#[rstest]
fn test_transforms_run_depth_first_in_enumeration_order() {
    let visited: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let record = |label: &'static str| {
        let visited = Rc::clone(&visited);
        Tree::function(move |value| {
            visited
                .borrow_mut()
                .push(format!("{label}:{}", value.as_number().unwrap_or_default()));
            value.clone()
        })
    };

    let input = tree!({ "b": [1, 2], "a": { "x": 3 }, "0": 4 });
    let mapper = tree!({
        "a": { "x": (record("x")) },
        "b": [(record("b"))],
        "0": (record("0")),
    });
    deep_map(&input, &mapper).unwrap();

    assert_eq!(*visited.borrow(), vec!["0:4", "b:1", "b:2", "x:3"]);
}

#[rstest]
fn test_invalid_mapper_runs_no_transform() {
    let calls = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&calls);
    let counting = Tree::function(move |value| {
        counter.set(counter.get() + 1);
        value.clone()
    });

    let result = deep_map(
        &tree!({ "a": 1, "b": 2 }),
        &tree!({ "a": (counting), "b": 5 }),
    );

    assert!(matches!(result, Err(DeepMapError::InvalidMapper(_))));
    assert_eq!(calls.get(), 0);
}

#[rstest]
fn test_transform_error_is_propagated_unmodified() {
    #[derive(Debug)]
    struct Overflow;

    impl std::fmt::Display for Overflow {
        fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("overflow")
        }
    }

    impl std::error::Error for Overflow {}

    let failing = Tree::Function(Transform::try_new(|_value: &Tree| {
        Err::<Tree, _>(deep_map::TransformError::new(Overflow))
    }));

    let error = deep_map(&tree!({ "a": 1 }), &tree!({ "a": (failing) })).unwrap_err();

    let DeepMapError::Transform(error) = error else {
        panic!("expected a transform error");
    };
    assert!(error.get_ref().downcast_ref::<Overflow>().is_some());
    assert_eq!(error.to_string(), "overflow");
}
