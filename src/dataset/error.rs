//! Defines the error types for the dataset module.
use crate::schema::Label;
use thiserror::Error;

/// Coarse category of a failure, for callers that branch on the kind rather
/// than match every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The definition itself is malformed.
    Definition,
    /// Too many positional labels, a missing label, or an axis bound twice.
    SliceArity,
    /// A keyword named an axis the definition doesn't have.
    UnknownAxis,
    /// A label isn't in its axis's domain.
    InvalidLabel,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("{dataset} must be defined with non-empty free_axes")]
    EmptyFreeAxes { dataset: String },
    #[error("{dataset}: the {axis} axis must have at least one label")]
    EmptyAxisDomain { dataset: String, axis: String },
    #[error("{dataset}: the {axis} axis is declared more than once")]
    DuplicateAxis { dataset: String, axis: String },
    #[error("{dataset}: column '{column}' is declared more than once")]
    DuplicateColumn { dataset: String, column: String },
    #[error("{dataset}: {message}")]
    UnknownDType { dataset: String, message: String },
}

impl DefinitionError {
    pub fn kind(&self) -> ErrorKind { ErrorKind::Definition }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error("{dataset} has {axes} free axes but {given} were given")]
    TooManyLabels { dataset: String, axes: usize, given: usize },
    #[error("{dataset} does not have the following {}: {}", axis_noun(.axes.len()), .axes.join(", "))]
    UnknownAxes { dataset: String, axes: Vec<String> },
    #[error("{dataset} got multiple values for axis '{axis}'")]
    MultipleValues { dataset: String, axis: String },
    #[error("no label provided for the following {}: {}", axis_noun(.axes.len()), .axes.join(", "))]
    MissingLabels { dataset: String, axes: Vec<String> },
    #[error("{label} is not a value along the {axis} axis")]
    InvalidLabel { label: Label, axis: String },
}

impl SliceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SliceError::TooManyLabels { .. }
            | SliceError::MultipleValues { .. }
            | SliceError::MissingLabels { .. } => ErrorKind::SliceArity,
            SliceError::UnknownAxes { .. } => ErrorKind::UnknownAxis,
            SliceError::InvalidLabel { .. } => ErrorKind::InvalidLabel,
        }
    }
}

fn axis_noun(count: usize) -> &'static str {
    if count == 1 { "axis" } else { "axes" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralized_messages() {
        let one = SliceError::MissingLabels { dataset: "MD".into(), axes: vec!["axis_1".into()] };
        assert_eq!(one.to_string(), "no label provided for the following axis: axis_1");

        let two = SliceError::UnknownAxes {
            dataset: "MD".into(),
            axes: vec!["axis_2".into(), "axis_3".into()],
        };
        assert_eq!(two.to_string(), "MD does not have the following axes: axis_2, axis_3");
        assert_eq!(two.kind(), ErrorKind::UnknownAxis);
    }
}
