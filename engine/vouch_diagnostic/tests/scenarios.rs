//! End-to-end diagnostics through the public API.
//!
//! Each test drives a sub-engine directly and then checks that the assembled
//! message carries the same facts.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use vouch_diagnostic::diff::{self, PathSegment};
use vouch_diagnostic::neighbors::locate;
use vouch_diagnostic::render::render;
use vouch_diagnostic::similar::{
    find_similar, indexed, Distance, MatchMode, Position, SimilarityKind,
};
use vouch_diagnostic::{
    DiffConfig, Engine, EngineConfig, Inspect, Options, Record, RenderLimits, SimilarityConfig,
    Value,
};

struct User {
    name: &'static str,
    age: u32,
}

impl Inspect for User {
    fn inspect(&self) -> Value {
        Record::named("User")
            .field("Name", self.name)
            .field("Age", &self.age)
            .into()
    }
}

#[test]
fn typo_in_string_collection() {
    let names = vec!["user-one", "user_two", "UserThree", "user-3", "userThree"];
    let collection = names.inspect();
    let items = collection.as_sequence().unwrap();

    let found = find_similar(
        "user3",
        indexed(items),
        &SimilarityConfig::default(),
        MatchMode::CaseSensitive,
    );
    let summary: Vec<(&str, SimilarityKind, Distance, Position)> = found
        .iter()
        .map(|c| {
            (
                c.candidate.as_str().unwrap(),
                c.kind,
                c.distance,
                c.position.clone(),
            )
        })
        .collect();
    assert_eq!(summary[0], ("user-3", SimilarityKind::ExtraChars, Distance::Edits(1), Position::Index(3)));
    assert_eq!(summary[1].0, "userThree");
    assert_eq!(summary[1].1, SimilarityKind::Edit);

    let text = Engine::default().contains(&collection, &"user3".inspect(), &Options::default());
    let first_hint = text.lines().find(|l| l.contains("= hint")).unwrap();
    assert_eq!(
        first_hint,
        r#"  = hint: similar element "user-3" has 1 extra character (index 3)"#
    );
}

#[test]
fn number_missing_from_unsorted_collection() {
    let numbers = [10, 80, 20, 70, 30, 60, 40, 50];
    let ctx = locate(55, &numbers, 2);
    assert_eq!((ctx.below, ctx.above), (Some(50), Some(60)));

    let text = Engine::default().contains(&numbers.inspect(), &55.inspect(), &Options::default());
    assert!(text.contains("55 would sort between 50 and 60"));
}

#[test]
fn records_differ_in_declaration_order() {
    let expected = User { name: "John", age: 30 }.inspect();
    let actual = User { name: "Jane", age: 25 }.inspect();

    let entries = diff::diff(&expected, &actual, &DiffConfig::default());
    let paths: Vec<&[PathSegment]> = entries.iter().map(|e| e.path.segments()).collect();
    assert_eq!(
        paths,
        [
            &[PathSegment::Field("Name".into())][..],
            &[PathSegment::Field("Age".into())][..],
        ]
    );

    let text = Engine::default().equal(&actual, &expected, &Options::default());
    assert!(text.contains("    Name: expected \"John\", actual \"Jane\"\n    Age: expected 30, actual 25"));
}

#[test]
fn large_sequence_shows_first_three() {
    let value: Vec<i32> = (1..=15).collect();
    let block = render(&value.inspect(), &RenderLimits::default().with_head(3));
    assert_eq!(block.shown, 3);
    assert_eq!(block.total_count, 15);
    assert!(block.truncated);
}

#[test]
fn mapping_order_does_not_leak_into_output() {
    let engine = Engine::default();
    let options = Options::default();
    let forward: BTreeMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    let hashed: std::collections::HashMap<&str, i32> = forward.clone().into_iter().collect();
    assert_eq!(forward.inspect(), hashed.inspect());
    assert_eq!(
        engine.contains_key(&forward.inspect(), &"d".inspect(), &options),
        engine.contains_key(&hashed.inspect(), &"d".inspect(), &options)
    );
}

#[test]
fn deeply_nested_values_degrade_to_marker() {
    fn nest(depth: usize, leaf: i64) -> Value {
        (0..depth).fold(Value::int(leaf), |v, _| Value::sequence([v]))
    }
    let config = EngineConfig {
        diff: DiffConfig {
            max_depth: 8,
            ..DiffConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = Engine::try_new(config).unwrap();
    let options = Options::new().with_limits(RenderLimits::unlimited());
    let text = engine.equal(&nest(20, 1), &nest(20, 2), &options);
    assert!(text.contains("[0][0][0][0][0][0][0][0]: structure too deep to compare"));
}

#[test]
fn concurrent_callers_get_identical_messages() {
    let engine = Engine::default();
    let options = Options::new().with_message("shared engine");
    let collection: Value = (0..200).map(|i| format!("item-{i}")).collect::<Vec<_>>().inspect();
    let query = "item_42".inspect();
    let serial = engine.contains(&collection, &query, &options);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.contains(&collection, &query, &options)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), serial);
        }
    });
    assert!(serial.starts_with("shared engine\nExpected collection to contain element"));
    assert!(serial.contains(r#"similar element "item-42" is 1 edit away (index 42)"#));
}
