use std::cmp::Ordering;

use super::*;

#[test]
fn float_nan_is_equal_to_itself() {
    let nan = Scalar::Float(f64::NAN);
    assert_eq!(nan, nan.clone());
    assert_ne!(Scalar::Float(1.0), Scalar::Float(1.5));
}

#[test]
fn signed_and_unsigned_ints_compare_numerically() {
    assert_eq!(Scalar::Int(7), Scalar::UInt(7));
    assert_ne!(Scalar::Int(-1), Scalar::UInt(u64::MAX));
    // Int vs float is a type difference, not a value match.
    assert_ne!(Scalar::Int(1), Scalar::Float(1.0));
}

#[test]
fn display_is_rust_like() {
    assert_eq!(Scalar::Str("a\"b".into()).to_string(), r#""a\"b""#);
    assert_eq!(Scalar::Char('x').to_string(), "'x'");
    assert_eq!(Scalar::Float(2.0).to_string(), "2.0");
    assert_eq!(Scalar::Unit.to_string(), "()");
}

#[test]
fn canonical_order_groups_kinds() {
    let mut items = vec![
        Scalar::Str("b".into()),
        Scalar::Int(3),
        Scalar::Bool(true),
        Scalar::Float(1.5),
        Scalar::Str("a".into()),
    ];
    items.sort_by(Scalar::canonical_cmp);
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["true", "1.5", "3", "\"a\"", "\"b\""]);
}

#[test]
fn canonical_order_agrees_with_equality() {
    let pairs = [
        (Scalar::Int(1), Scalar::Float(1.0)),
        (Scalar::UInt(1), Scalar::Float(1.0)),
        (Scalar::Int(7), Scalar::UInt(7)),
        (Scalar::Float(f64::NAN), Scalar::Float(-f64::NAN)),
        (Scalar::Float(0.0), Scalar::Float(-0.0)),
    ];
    for (a, b) in pairs {
        assert_eq!(
            a.canonical_cmp(&b) == Ordering::Equal,
            a == b,
            "{a:?} vs {b:?}"
        );
        assert_eq!(a.canonical_cmp(&b), b.canonical_cmp(&a).reverse());
    }
    assert_eq!(Scalar::Int(1).canonical_cmp(&Scalar::Float(1.0)), Ordering::Less);
    assert_eq!(Scalar::Float(1.0).canonical_cmp(&Scalar::Int(2)), Ordering::Less);
}

#[test]
fn number_abs_diff_does_not_overflow() {
    let diff = Number::Int(i64::MIN).abs_diff(Number::UInt(u64::MAX));
    assert!(diff > 1.0e19);
    assert!((Number::Float(1.5).abs_diff(Number::Int(3)) - 1.5).abs() < f64::EPSILON);
}

#[test]
fn number_nan_sorts_last() {
    assert_eq!(
        Number::Float(f64::NAN).total_cmp(Number::Int(1)),
        Ordering::Greater
    );
    assert_eq!(Number::Int(-5).total_cmp(Number::UInt(0)), Ordering::Less);
}
