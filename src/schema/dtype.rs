//! Semantic column types.

use super::label::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The semantic type of a column.
///
/// Only the identity of a dtype matters here; the values it describes live in
/// the computation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DType {
    Float64,
    Int64,
    Bool,
    Object,
    DateTime64Ns,
    Categorical,
}

impl DType {
    /// The canonical numpy-style code.
    pub fn code(&self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Int64 => "int64",
            DType::Bool => "bool",
            DType::Object => "object",
            DType::DateTime64Ns => "datetime64[ns]",
            DType::Categorical => "category",
        }
    }

    /// The sentinel used when a column doesn't declare its own.
    ///
    /// Integers have no natural sentinel, so `Int64` columns without an explicit
    /// missing value carry none.
    pub fn default_missing_value(&self) -> Option<Value> {
        match self {
            DType::Float64 => Some(Value::Float(f64::NAN)),
            DType::Int64 => None,
            DType::Bool => Some(Value::Bool(false)),
            DType::Object | DType::Categorical => Some(Value::Null),
            DType::DateTime64Ns => Some(Value::NaT),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f8" | "float64" | "<f8" => Ok(DType::Float64),
            "i8" | "int64" | "<i8" => Ok(DType::Int64),
            "?" | "bool" => Ok(DType::Bool),
            "O" | "object" => Ok(DType::Object),
            "M8[ns]" | "datetime64[ns]" | "<M8[ns]" => Ok(DType::DateTime64Ns),
            "category" => Ok(DType::Categorical),
            other => Err(format!("unknown dtype code '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("f8", DType::Float64)]
    #[case("float64", DType::Float64)]
    #[case("i8", DType::Int64)]
    #[case("?", DType::Bool)]
    #[case("bool", DType::Bool)]
    #[case("O", DType::Object)]
    #[case("M8[ns]", DType::DateTime64Ns)]
    #[case("datetime64[ns]", DType::DateTime64Ns)]
    #[case("category", DType::Categorical)]
    fn test_parse_numpy_codes(#[case] code: &str, #[case] expected: DType) {
        assert_eq!(code.parse::<DType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "complex128".parse::<DType>().unwrap_err();
        assert!(err.contains("complex128"), "Msg: {}", err);
    }

    #[test]
    fn test_int64_has_no_default_sentinel() {
        assert_eq!(DType::Int64.default_missing_value(), None);
        assert_eq!(DType::DateTime64Ns.default_missing_value(), Some(Value::NaT));
    }
}
