//! Axis labels and missing-value payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete value along an axis.
///
/// Labels are compared by identity/membership only, so they must be hashable
/// and totally ordered. `Display` renders them the way they read in source
/// (`'USD'`, `30`, `True`) which is also how they appear in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Bool(true) => f.write_str("True"),
            Label::Bool(false) => f.write_str("False"),
            Label::Int(i) => write!(f, "{}", i),
            Label::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self { Label::Str(s.to_string()) }
}

impl From<String> for Label {
    fn from(s: String) -> Self { Label::Str(s) }
}

impl From<&String> for Label {
    fn from(s: &String) -> Self { Label::Str(s.clone()) }
}

impl From<i64> for Label {
    fn from(i: i64) -> Self { Label::Int(i) }
}

impl From<i32> for Label {
    fn from(i: i32) -> Self { Label::Int(i as i64) }
}

impl From<u32> for Label {
    fn from(i: u32) -> Self { Label::Int(i as i64) }
}

impl From<bool> for Label {
    fn from(b: bool) -> Self { Label::Bool(b) }
}

/// A column's missing-value sentinel.
///
/// Opaque schema metadata: nothing in this crate computes with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
    /// Nanoseconds since the Unix epoch.
    DateTime(i64),
    /// Not-a-Time.
    NaT,
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) if v.is_nan() => f.write_str("nan"),
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::DateTime(ns) => write!(f, "{}ns", ns),
            Value::NaT => f.write_str("NaT"),
            Value::Null => f.write_str("None"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Float(v) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Int(v) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Int(v as i64) }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Str(v.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Label::from("not-in-0"), "'not-in-0'")]
    #[case(Label::from(7), "7")]
    #[case(Label::from(-3i64), "-3")]
    #[case(Label::from(true), "True")]
    fn test_label_renders_like_source(#[case] label: Label, #[case] expected: &str) {
        assert_eq!(label.to_string(), expected);
    }

    #[rstest]
    #[case(Value::Float(f64::NAN), "nan")]
    #[case(Value::Int(-1), "-1")]
    #[case(Value::Str("n/a".into()), "'n/a'")]
    #[case(Value::NaT, "NaT")]
    #[case(Value::Null, "None")]
    fn test_value_renders_like_source(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }
}
