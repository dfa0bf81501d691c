//! Property-based tests for the diagnostic sub-engines.
//!
//! These use proptest to check the algebraic guarantees callers rely on:
//! 1. Edit distance is a metric-like, symmetric measure
//! 2. Similarity thresholds are monotonic
//! 3. Insertion neighbors bracket the query
//! 4. Diffing a value against itself finds nothing
//! 5. Rendering never over-reports and is deterministic

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use vouch_diagnostic::diff::{diff, diff_report};
use vouch_diagnostic::neighbors::locate;
use vouch_diagnostic::render::{render, render_str};
use vouch_diagnostic::similar::{edit_distance, qualifies};
use vouch_diagnostic::{DiffConfig, Engine, Options, Record, RenderLimits, Value};

// -- Value Generation Strategies --

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::bool),
        any::<i64>().prop_map(Value::int),
        (-1.0e6..1.0e6f64).prop_map(Value::float),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::str),
        Just(Value::null()),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::sequence),
            prop::collection::vec(("[a-z]{1,4}".prop_map(Value::str), inner.clone()), 0..6)
                .prop_map(Value::mapping),
            prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..6).prop_map(|fields| {
                fields
                    .into_iter()
                    .fold(Record::named("Node"), |record, (name, value)| {
                        record.with_value(name, value)
                    })
                    .into()
            }),
            inner.prop_map(Value::some),
        ]
    })
}

fn limits_strategy() -> impl Strategy<Value = RenderLimits> {
    (1usize..8, 0usize..4, 0usize..7, 2usize..12, 1usize..40).prop_map(
        |(head, tail, inline_items, max_lines, width)| RenderLimits {
            inline_items,
            max_lines,
            line_width: width,
            short_string: width,
            ..RenderLimits::default().with_head_and_tail(head, tail)
        },
    )
}

// -- Similarity --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_edit_distance_is_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn prop_edit_distance_to_self_is_zero(a in "\\PC{0,16}") {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn prop_single_insertion_costs_one(
        a in "[a-z]{0,12}",
        at in any::<prop::sample::Index>(),
        c in "[a-z]",
    ) {
        let mut b = a.clone();
        b.insert_str(at.index(a.len() + 1), &c);
        prop_assert_eq!(edit_distance(&a, &b), 1);
        prop_assert_eq!(edit_distance(&b, &a), 1);
    }

    #[test]
    fn prop_threshold_is_monotonic(
        query in "[a-zA-Z0-9_-]{1,10}",
        candidate in "[a-zA-Z0-9_-]{1,10}",
        threshold in 0usize..6,
        extra in 1usize..6,
    ) {
        if qualifies(&query, &candidate, threshold) {
            prop_assert!(qualifies(&query, &candidate, threshold + extra));
        }
    }
}

// -- Neighbors --

proptest! {
    #[test]
    fn prop_neighbors_bracket_query(
        set in prop::collection::hash_set(-1000i64..1000, 0..40),
        query in -1100i64..1100,
    ) {
        prop_assume!(!set.contains(&query));
        let collection: Vec<i64> = set.into_iter().collect();
        let ctx = locate(query, &collection, 2);

        if let Some(below) = ctx.below {
            prop_assert!(below < query);
        }
        if let Some(above) = ctx.above {
            prop_assert!(query < above);
        }
        if collection.iter().all(|&v| query < v) && !collection.is_empty() {
            prop_assert_eq!(ctx.below, None);
            prop_assert!(ctx.above.is_some());
        }
        prop_assert!(ctx.window.len() <= 4);
    }
}

// -- Diff and render --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_diff_is_reflexive(value in value_strategy()) {
        let config = DiffConfig::default();
        prop_assert!(diff(&value, &value, &config).is_empty());
        prop_assert!(diff_report(&value, &value.clone(), &config).is_empty());
    }

    #[test]
    fn prop_render_never_over_reports(value in value_strategy(), limits in limits_strategy()) {
        let block = render(&value, &limits);
        prop_assert!(block.shown <= block.total_count);
        if block.truncated {
            prop_assert!(block.shown < block.total_count);
        } else {
            prop_assert_eq!(block.shown, block.total_count);
        }
    }

    #[test]
    fn prop_long_strings_never_over_report(text in "[a-z \\n]{0,300}", limits in limits_strategy()) {
        let block = render_str(&text, &limits);
        prop_assert!(block.shown <= block.total_count);
        prop_assert_eq!(block.truncated, block.shown < block.total_count);
    }

    #[test]
    fn prop_messages_are_idempotent(actual in value_strategy(), expected in value_strategy()) {
        let engine = Engine::default();
        let options = Options::default();
        prop_assert_eq!(
            engine.equal(&actual, &expected, &options),
            engine.equal(&actual, &expected, &options)
        );
        prop_assert_eq!(
            engine.contains(&actual, &expected, &options),
            engine.contains(&actual, &expected, &options)
        );
    }
}
