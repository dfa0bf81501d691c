use pretty_assertions::assert_eq;

use super::*;

#[test]
fn mapping_keys_are_canonically_ordered() {
    let map = Value::mapping([
        (Value::str("zeta"), Value::int(1)),
        (Value::str("alpha"), Value::int(2)),
        (Value::str("mid"), Value::int(3)),
    ]);
    assert_eq!(map.to_string(), r#"{"alpha": 2, "mid": 3, "zeta": 1}"#);
}

#[test]
fn mapping_duplicate_key_keeps_last() {
    let map = Value::mapping([
        (Value::int(1), Value::str("first")),
        (Value::int(1), Value::str("second")),
    ]);
    assert_eq!(map.len(), Some(1));
    assert_eq!(map.get(&Value::int(1)), Some(&Value::str("second")));
}

#[test]
fn mapping_keeps_int_and_float_keys_apart() {
    let map = Value::mapping([
        (Value::float(1.0), Value::str("float")),
        (Value::int(1), Value::str("int")),
    ]);
    assert_eq!(map.len(), Some(2));
    assert_eq!(map.get(&Value::int(1)), Some(&Value::str("int")));
    assert_eq!(map.get(&Value::float(1.0)), Some(&Value::str("float")));
    assert_eq!(map.to_string(), r#"{1: "int", 1.0: "float"}"#);
}

#[test]
fn get_on_non_mapping_is_none() {
    assert_eq!(Value::int(3).get(&Value::int(3)), None);
}

#[test]
fn display_covers_every_shape() {
    let value = Value::sequence([
        Value::int(1),
        Value::float(2.5),
        Value::str("x"),
        Value::null(),
        Value::some(Value::bool(true)),
        Record::named("Point").field("x", &1).into(),
        Record::anonymous().into(),
    ]);
    assert_eq!(
        value.to_string(),
        r#"[1, 2.5, "x", None, Some(true), Point { x: 1 }, {}]"#
    );
}

#[test]
fn record_redeclared_field_keeps_position() {
    let record = Record::named("User")
        .field("name", "John")
        .field("age", &30)
        .field("name", "Jane");
    let names: Vec<&str> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["name", "age"]);
    assert_eq!(record.get("name"), Some(&Value::str("Jane")));
}

#[test]
fn type_names() {
    assert_eq!(Value::int(1).type_name(), "int");
    assert_eq!(Value::str("a").type_name(), "string");
    assert_eq!(Value::sequence([]).type_name(), "sequence");
    assert_eq!(Value::from(Record::named("User")).type_name(), "User");
    assert_eq!(Value::from(Record::anonymous()).type_name(), "record");
    assert_eq!(Value::null().type_name(), "nullable");
}

#[test]
fn len_counts_chars_for_strings() {
    assert_eq!(Value::str("日本語").len(), Some(3));
    assert_eq!(Value::int(3).len(), None);
    assert_eq!(Value::sequence([]).is_empty(), Some(true));
}

#[test]
fn canonical_cmp_orders_shapes() {
    let mut values = vec![
        Value::some(Value::int(1)),
        Value::sequence([Value::int(1)]),
        Value::int(9),
        Value::null(),
    ];
    values.sort_by(Value::canonical_cmp);
    assert_eq!(
        values,
        vec![
            Value::null(),
            Value::int(9),
            Value::sequence([Value::int(1)]),
            Value::some(Value::int(1)),
        ]
    );
}

#[test]
fn deeply_nested_display_does_not_overflow() {
    let mut value = Value::int(0);
    for _ in 0..2_000 {
        value = Value::sequence([value]);
    }
    let text = value.to_string();
    assert!(text.starts_with("[[[["));
    assert!(text.ends_with("0]]]]"));
}
