use std::collections::{BTreeMap, HashMap, HashSet};

use pretty_assertions::assert_eq;

use super::*;
use crate::Shape;

#[test]
fn primitives_classify_as_scalars() {
    assert_eq!(5_i32.inspect(), Value::int(5));
    assert_eq!(5_u8.inspect(), Value::uint(5));
    assert_eq!(2.5_f32.inspect(), Value::float(2.5));
    assert_eq!("hi".inspect(), Value::str("hi"));
    assert_eq!(String::from("hi").inspect(), Value::str("hi"));
    assert_eq!(().inspect().shape(), Shape::Scalar);
}

#[test]
fn options_classify_as_nullable() {
    assert_eq!(Inspect::inspect(&Some(3_i64)), Value::some(Value::int(3)));
    assert_eq!(Inspect::inspect(&None::<i64>), Value::null());
}

#[test]
fn hash_map_iteration_order_does_not_leak() {
    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    for i in 0..50_i32 {
        forward.insert(format!("key{i}"), i);
        backward.insert(format!("key{}", 49 - i), 49 - i);
    }
    assert_eq!(forward.inspect().to_string(), backward.inspect().to_string());

    let btree: BTreeMap<String, i32> = forward.into_iter().collect();
    assert_eq!(btree.inspect(), backward.inspect());
}

#[test]
fn sets_are_sorted() {
    let set: HashSet<i32> = [30, 10, 20].into_iter().collect();
    assert_eq!(set.inspect().to_string(), "[10, 20, 30]");
}

#[test]
fn tuples_and_arrays_are_sequences() {
    assert_eq!((1_i32, "a", true).inspect().to_string(), r#"[1, "a", true]"#);
    assert_eq!([1_u16, 2].inspect().shape(), Shape::Sequence);
    assert_eq!(vec![vec![1_i8]].inspect().to_string(), "[[1]]");
}

#[test]
fn pointer_sized_ints_stay_integers() {
    assert_eq!(isize::MIN.inspect(), Value::int(i64::MIN));
    assert_eq!(usize::MAX.inspect(), Value::uint(u64::MAX));
}
