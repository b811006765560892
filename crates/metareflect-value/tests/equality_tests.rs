//! Integration tests for structural deep equality
//!
//! Tests cover:
//! - Primitives, NaN and signed zeroes
//! - Dates, patterns, errors
//! - Arrays, maps, sets, binary buffers
//! - General objects: key order, symbols, nesting, ignored fields, classes

use std::sync::Arc;

use metareflect_value::{
    is_equal, BufferView, ClassId, ClassRef, ElementKind, ErrorValue, FunctionRef, ObjectValue,
    Symbol, Value,
};
use serde_json::json;

fn eq(a: &Value, b: &Value) -> bool {
    is_equal(a, b, &[])
}

#[test]
fn test_simple_equality() {
    assert!(eq(&1.into(), &1.into()));
    assert!(eq(&"a".into(), &"a".into()));
    assert!(eq(&true.into(), &true.into()));
    assert!(eq(&Value::Null, &Value::Null));
    assert!(eq(&Value::Undefined, &Value::Undefined));
}

#[test]
fn test_simple_inequality() {
    assert!(!eq(&1.into(), &2.into()));
    assert!(!eq(&"a".into(), &"b".into()));
    assert!(!eq(&true.into(), &false.into()));
    assert!(!eq(&Value::Null, &Value::Undefined));
}

#[test]
fn test_nan_and_zeroes() {
    assert!(eq(&f64::NAN.into(), &f64::NAN.into()));
    assert!(!eq(&0.0.into(), &(-0.0).into()));
    assert!(!eq(&(-0.0).into(), &0.0.into()));
    assert!(eq(&(-0.0).into(), &(-0.0).into()));
}

#[test]
fn test_dates() {
    let d1 = Value::parse_date("2023-01-01");
    let d2 = Value::parse_date("2023-01-01");
    let d3 = Value::parse_date("2023-01-02");
    assert!(eq(&d1, &d2));
    assert!(!eq(&d1, &d3));

    let invalid1 = Value::parse_date("Invalid Date");
    let invalid2 = Value::invalid_date();
    assert!(eq(&invalid1, &invalid2));
    assert!(!eq(&invalid1, &d1));
}

#[test]
fn test_patterns() {
    let abc = Value::pattern("abc", "").unwrap();
    assert!(eq(&abc, &Value::pattern("abc", "").unwrap()));
    assert!(!eq(&abc, &Value::pattern("def", "").unwrap()));
    assert!(!eq(
        &Value::pattern("abc", "g").unwrap(),
        &Value::pattern("abc", "i").unwrap()
    ));
    assert!(eq(
        &Value::pattern("abc", "gi").unwrap(),
        &Value::pattern("abc", "ig").unwrap()
    ));
    assert!(eq(
        &Value::pattern("(?<=a)b\\1", "").unwrap(),
        &Value::pattern("(?<=a)b\\1", "").unwrap()
    ));
}

#[test]
fn test_errors() {
    let e1 = Value::from(ErrorValue::new("test").with_stack("at a"));
    let e2 = Value::from(ErrorValue::new("test").with_stack("at b"));
    let e3 = Value::from(ErrorValue::new("different"));
    let e4 = Value::error("TypeError", "test");
    assert!(eq(&e1, &e2));
    assert!(!eq(&e1, &e3));
    assert!(!eq(&e1, &e4));
}

#[test]
fn test_arrays() {
    let a = Value::from(json!([1, 2, 3]));
    assert!(eq(&a, &Value::from(json!([1, 2, 3]))));
    assert!(!eq(&a, &Value::from(json!([1, 2, 4]))));
    assert!(!eq(&a, &Value::from(json!([1, 2, 3, 4]))));
    assert!(eq(&Value::array([]), &Value::array([])));
}

#[test]
fn test_maps() {
    let m1 = Value::map([("a".into(), 1.into()), ("b".into(), 2.into())]);
    let m2 = Value::map([("b".into(), 2.into()), ("a".into(), 1.into())]);
    let m3 = Value::map([("a".into(), 1.into()), ("b".into(), 3.into())]);
    let m4 = Value::map([
        ("a".into(), 1.into()),
        ("b".into(), 2.into()),
        ("c".into(), 3.into()),
    ]);
    assert!(eq(&m1, &m2));
    assert!(!eq(&m1, &m3));
    assert!(!eq(&m1, &m4));
}

#[test]
fn test_map_values_compare_deeply() {
    let m1 = Value::map([("a".into(), Value::from(json!({ "x": [1] })))]);
    let m2 = Value::map([("a".into(), Value::from(json!({ "x": [1] })))]);
    assert!(eq(&m1, &m2));
}

#[test]
fn test_sets() {
    let s1 = Value::set([1.into(), 2.into(), 3.into()]);
    let s2 = Value::set([3.into(), 2.into(), 1.into()]);
    let s3 = Value::set([1.into(), 2.into(), 4.into()]);
    let s4 = Value::set([1.into(), 2.into()]);
    assert!(eq(&s1, &s2));
    assert!(!eq(&s1, &s3));
    assert!(!eq(&s1, &s4));
}

#[test]
fn test_set_membership_is_identity() {
    let shared = Value::from(json!({ "k": 1 }));
    let s1 = Value::set([shared.clone()]);
    let s2 = Value::set([shared]);
    let s3 = Value::set([Value::from(json!({ "k": 1 }))]);
    assert!(eq(&s1, &s2));
    assert!(!eq(&s1, &s3));
}

#[test]
fn test_buffers() {
    let b1 = Value::from(BufferView::from_i32s(&[1, 2, 3]));
    let b2 = Value::from(BufferView::from_i32s(&[1, 2, 3]));
    let b3 = Value::from(BufferView::from_i32s(&[1, 2, 4]));
    let b4 = Value::from(BufferView::from_i32s(&[1, 2, 3, 4]));
    assert!(eq(&b1, &b2));
    assert!(!eq(&b1, &b3));
    assert!(!eq(&b1, &b4));
}

#[test]
fn test_buffer_offsets() {
    let backing: Arc<[u8]> = vec![7u8; 8].into();
    let head = BufferView::new(backing.clone(), 0, 4, ElementKind::Uint8).unwrap();
    let tail = BufferView::new(backing, 4, 4, ElementKind::Uint8).unwrap();
    assert!(!eq(&head.into(), &tail.into()));

    let short: Arc<[u8]> = vec![7u8; 4].into();
    let whole = BufferView::new(short, 0, 4, ElementKind::Uint8).unwrap();
    let backing: Arc<[u8]> = vec![7u8; 8].into();
    let part = BufferView::new(backing, 0, 4, ElementKind::Uint8).unwrap();
    assert!(!eq(&whole.into(), &part.into()));
}

#[test]
fn test_regular_objects() {
    let o1 = Value::from(json!({ "a": 1, "b": 2 }));
    let o2 = Value::from(json!({ "b": 2, "a": 1 }));
    let o3 = Value::from(json!({ "a": 1, "b": 3 }));
    let o4 = Value::from(json!({ "a": 1, "b": 2, "c": 3 }));
    assert!(eq(&o1, &o2));
    assert!(!eq(&o1, &o3));
    assert!(!eq(&o1, &o4));
    assert!(eq(&Value::from(json!({})), &Value::from(json!({}))));
}

#[test]
fn test_symbol_fields() {
    let sym1 = Symbol::new("test");
    let sym2 = Symbol::new("test");
    let o1 = Value::from(ObjectValue::plain().with_symbol(sym1.clone(), 1));
    let o2 = Value::from(ObjectValue::plain().with_symbol(sym1.clone(), 1));
    let o3 = Value::from(ObjectValue::plain().with_symbol(sym2.clone(), 1));
    assert!(eq(&o1, &o2));
    assert!(!eq(&o1, &o3));

    let nested1 = Value::object([("a", o1)]);
    let nested2 = Value::object([("a", o2)]);
    let nested3 = Value::object([("a", o3)]);
    assert!(eq(&nested1, &nested2));
    assert!(!eq(&nested1, &nested3));
}

#[test]
fn test_nested_objects() {
    let n1 = Value::from(json!({ "a": 1, "b": { "c": 2, "d": [3, 4] } }));
    let n2 = Value::from(json!({ "a": 1, "b": { "c": 2, "d": [3, 4] } }));
    let n3 = Value::from(json!({ "a": 1, "b": { "c": 2, "d": [3, 5] } }));
    assert!(eq(&n1, &n2));
    assert!(!eq(&n1, &n3));
}

#[test]
fn test_ignored_fields() {
    let o1 = Value::from(json!({ "a": 1, "b": 2, "c": 3 }));
    let o2 = Value::from(json!({ "a": 1, "b": 3, "c": 3 }));
    assert!(!is_equal(&o1, &o2, &[]));
    assert!(is_equal(&o1, &o2, &["b"]));

    let nested1 = Value::from(json!({ "inner": [{ "id": 1, "stamp": 10 }] }));
    let nested2 = Value::from(json!({ "inner": [{ "id": 1, "stamp": 20 }] }));
    assert!(is_equal(&nested1, &nested2, &["stamp"]));
}

#[test]
fn test_mixed_field_kinds() {
    let o1 = Value::from(json!({ "a": 1, "b": "2", "c": true }));
    let o2 = Value::from(json!({ "a": 1, "b": "2", "c": true }));
    let o3 = Value::from(json!({ "a": 1, "b": 2, "c": true }));
    assert!(eq(&o1, &o2));
    assert!(!eq(&o1, &o3));
}

#[test]
fn test_functions() {
    let f1 = Value::from(FunctionRef::closure(""));
    let f2 = Value::from(FunctionRef::closure(""));
    assert!(eq(&f1, &f1.clone()));
    assert!(!eq(&f1, &f2));
    assert!(eq(
        &FunctionRef::builtin("String").into(),
        &FunctionRef::builtin("String").into()
    ));
}

#[test]
fn test_different_classes() {
    let a = Value::from(ObjectValue::new(ClassRef::new(ClassId(1), "A")));
    let b = Value::from(ObjectValue::new(ClassRef::new(ClassId(2), "B")));
    let a2 = Value::from(ObjectValue::new(ClassRef::new(ClassId(1), "A")));
    assert!(!eq(&a, &b));
    assert!(eq(&a, &a2));
}
