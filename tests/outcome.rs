//! Outcome semantics: extraction, equality, hashing, rendering.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::panic;

use poltergeist::{AnyFailure, Failure, Outcome, StringError};
use thiserror::Error;

#[derive(Debug, Error, Failure, Clone)]
#[error("{0}")]
struct ValueFailure(String);

#[derive(Debug, Error, Failure)]
#[error("{0}")]
struct OtherFailure(String);

fn value_failure(msg: &str) -> ValueFailure {
    ValueFailure(msg.to_string())
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn ok_extraction() {
    let result: Outcome<&str, ValueFailure> = Outcome::Ok("abc");

    match &result {
        Outcome::Ok(v) => assert_eq!(*v, "abc"),
        Outcome::Err(_) => panic!("Should have been Ok"),
    }

    assert!(result.clone().err().is_none());
    assert_eq!(result.clone().unwrap(), "abc");
    assert_eq!(result.clone().ok(), Some("abc"));
    assert_eq!(result.clone().unwrap_or("aaa"), "abc");
    assert_eq!(result.unwrap_or_else(|_| panic!("fallback must not run")), "abc");
}

#[test]
fn err_extraction() {
    let result: Outcome<String, ValueFailure> = Outcome::Err(value_failure("abc"));

    match &result {
        Outcome::Err(e) => assert_eq!(e.args(), poltergeist::args!["abc"]),
        Outcome::Ok(_) => panic!("Should have been Err"),
    }

    assert_eq!(result.clone().err().map(|e| e.0), Some("abc".to_string()));
    assert_eq!(result.clone().ok(), None);
    assert_eq!(result.clone().unwrap_or("aaa".to_string()), "aaa");
    assert_eq!(
        result.unwrap_or_else(|e| format!("Exception is {}", e)),
        "Exception is abc"
    );
}

#[test]
fn err_unwrap_panics_with_the_failure() {
    let result: Outcome<i32, ValueFailure> = Outcome::Err(value_failure("abc"));

    let payload = panic::catch_unwind(move || result.unwrap()).unwrap_err();
    let failure = payload.downcast::<ValueFailure>().expect("payload is the failure");
    assert_eq!(failure.0, "abc");
}

#[test]
fn unwrap_or_else_is_repeatable() {
    let result: Outcome<usize, ValueFailure> = Outcome::Err(value_failure("four"));
    let len = |e: ValueFailure| e.0.len();

    assert_eq!(result.clone().unwrap_or_else(len), result.unwrap_or_else(len));
}

#[test]
fn ok_equality() {
    let result: Outcome<i32, ValueFailure> = Outcome::Ok(1);
    assert_eq!(result, Outcome::Ok(1));
    assert_ne!(result, Outcome::Ok(2));
    assert_ne!(result, Outcome::Err(value_failure("1")));
}

#[test]
fn err_equality_is_kind_and_args() {
    let result: Outcome<i32, ValueFailure> = Outcome::Err(value_failure("x"));
    assert_eq!(result, Outcome::Err(value_failure("x")));
    assert_ne!(result, Outcome::Err(value_failure("y")));
    assert_ne!(result, Outcome::Ok(1));

    let erased = |f: AnyFailure| -> Outcome<i32, AnyFailure> { Outcome::Err(f) };
    let value = erased(AnyFailure::new(value_failure("x")));
    let other = erased(AnyFailure::new(OtherFailure("x".into())));
    assert_ne!(value, other);
    assert_eq!(value, erased(AnyFailure::new(value_failure("x"))));
}

#[test]
fn err_equality_ignores_identity() {
    let a = value_failure("same");
    let b = a.clone();
    let left: Outcome<(), ValueFailure> = Outcome::Err(a);
    let right: Outcome<(), ValueFailure> = Outcome::Err(b);
    assert_eq!(left, right);
}

#[test]
fn hash_follows_equality() {
    let x1: Outcome<i32, ValueFailure> = Outcome::Err(value_failure("x"));
    let x2: Outcome<i32, ValueFailure> = Outcome::Err(value_failure("x"));
    assert_eq!(hash_of(&x1), hash_of(&x2));

    let ok: Outcome<i32, ValueFailure> = Outcome::Ok(1);
    assert_eq!(hash_of(&ok), hash_of(&Outcome::<i32, ValueFailure>::Ok(1)));
}

#[test]
fn debug_forms() {
    let ok: Outcome<&str, StringError> = Outcome::Ok("abc");
    assert_eq!(format!("{:?}", ok), "Ok(\"abc\")");

    let err: Outcome<&str, ValueFailure> = Outcome::Err(value_failure("Incorrect value!"));
    assert_eq!(format!("{:?}", err), "Err(ValueFailure(\"Incorrect value!\"))");
}
