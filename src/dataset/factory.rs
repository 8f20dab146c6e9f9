//! Resolves call-site labels against a definition's axes.
//!
//! Resolution is a pure function of the axes and the arguments: it either
//! produces the canonical cache key or a `SliceError`, and never touches the
//! cache. Checks run in a fixed order so the reported error is deterministic:
//!
//! 1. too many positional labels,
//! 2. keywords naming unknown axes (reported sorted),
//! 3. an axis bound twice,
//! 4. axes left without a label (reported in declared order),
//! 5. labels outside their axis's domain (first offending axis only).

use super::error::SliceError;
use crate::schema::{FreeAxes, Label};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Labels in declared axis order. Scoped to one definition's cache, so the
/// axis names are implied by position.
pub type SliceKey = SmallVec<[Label; 4]>;

/// The labels of one `slice` call: positional first, then keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceArgs {
    positional: SmallVec<[Label; 4]>,
    keyword: Vec<(String, Label)>,
}

impl SliceArgs {
    pub fn new() -> Self { Self::default() }

    /// All-positional arguments.
    pub fn positional<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            positional: labels.into_iter().map(Into::into).collect(),
            keyword: Vec::new(),
        }
    }

    /// All-keyword arguments.
    pub fn keywords<K: Into<String>, L: Into<Label>>(pairs: impl IntoIterator<Item = (K, L)>) -> Self {
        Self {
            positional: SmallVec::new(),
            keyword: pairs.into_iter().map(|(k, l)| (k.into(), l.into())).collect(),
        }
    }

    pub fn arg(mut self, label: impl Into<Label>) -> Self {
        self.positional.push(label.into());
        self
    }

    pub fn kwarg(mut self, axis: impl Into<String>, label: impl Into<Label>) -> Self {
        self.keyword.push((axis.into(), label.into()));
        self
    }

    pub fn keyword_labels(&self) -> &[(String, Label)] { &self.keyword }
}

/// Binds `args` to `axes` and validates every label.
pub fn resolve(dataset: &str, axes: &FreeAxes, args: &SliceArgs) -> Result<SliceKey, SliceError> {
    let n = axes.len();

    if args.positional.len() > n {
        return Err(SliceError::TooManyLabels {
            dataset: dataset.to_string(),
            axes: n,
            given: args.positional.len(),
        });
    }

    let unknown: BTreeSet<&str> = args
        .keyword
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| axes.position(name).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(SliceError::UnknownAxes {
            dataset: dataset.to_string(),
            axes: unknown.into_iter().map(str::to_string).collect(),
        });
    }

    let mut bound: SmallVec<[Option<&Label>; 4]> = SmallVec::from_elem(None, n);
    for (slot, label) in bound.iter_mut().zip(args.positional.iter()) {
        *slot = Some(label);
    }
    for (name, label) in &args.keyword {
        // Unknown names were rejected above.
        let Some(idx) = axes.position(name) else { continue };
        if bound[idx].is_some() {
            return Err(SliceError::MultipleValues {
                dataset: dataset.to_string(),
                axis: name.clone(),
            });
        }
        bound[idx] = Some(label);
    }

    let missing: Vec<String> = axes
        .iter()
        .zip(bound.iter())
        .filter(|(_, label)| label.is_none())
        .map(|(axis, _)| axis.name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SliceError::MissingLabels { dataset: dataset.to_string(), axes: missing });
    }

    let mut key = SliceKey::with_capacity(n);
    for (axis, label) in axes.iter().zip(bound) {
        let Some(label) = label else { continue };
        if !axis.contains(label) {
            return Err(SliceError::InvalidLabel {
                label: label.clone(),
                axis: axis.name().to_string(),
            });
        }
        key.push(label.clone());
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::ErrorKind;
    use crate::schema::AxisDomain;
    use rstest::rstest;

    fn two_axes() -> FreeAxes {
        FreeAxes::new(vec![
            AxisDomain::new("axis_0", ["a", "b", "c"]),
            AxisDomain::new("axis_1", ["c", "d", "e"]),
        ])
    }

    fn message(args: SliceArgs) -> String {
        resolve("MD", &two_axes(), &args).unwrap_err().to_string()
    }

    #[rstest]
    #[case(SliceArgs::new(), "no label provided for the following axes: axis_0, axis_1")]
    #[case(SliceArgs::positional(["a"]), "no label provided for the following axis: axis_1")]
    #[case(SliceArgs::new().kwarg("axis_1", "d"), "no label provided for the following axis: axis_0")]
    // A missing axis is reported before the bad label on the bound one.
    #[case(SliceArgs::positional(["zz"]), "no label provided for the following axis: axis_1")]
    #[case(SliceArgs::positional(["a", "b", "c"]), "MD has 2 free axes but 3 were given")]
    #[case(SliceArgs::keywords([("axis_2", "??")]), "MD does not have the following axis: axis_2")]
    #[case(
        SliceArgs::keywords([("axis_1", "??"), ("axis_2", "??")]),
        "MD does not have the following axis: axis_2"
    )]
    #[case(
        SliceArgs::keywords([("axis_0", "??"), ("axis_1", "??"), ("axis_2", "??")]),
        "MD does not have the following axis: axis_2"
    )]
    #[case(
        SliceArgs::keywords([("axis_3", "??"), ("axis_2", "??")]),
        "MD does not have the following axes: axis_2, axis_3"
    )]
    fn test_unknown_axes_and_arity(#[case] args: SliceArgs, #[case] expected: &str) {
        assert_eq!(message(args), expected);
    }

    #[rstest]
    #[case(SliceArgs::positional(["not-in-0", "c"]), "'not-in-0' is not a value along the axis_0 axis")]
    #[case(
        SliceArgs::keywords([("axis_0", "not-in-0"), ("axis_1", "c")]),
        "'not-in-0' is not a value along the axis_0 axis"
    )]
    #[case(SliceArgs::positional(["a", "not-in-1"]), "'not-in-1' is not a value along the axis_1 axis")]
    #[case(
        SliceArgs::keywords([("axis_0", "a"), ("axis_1", "not-in-1")]),
        "'not-in-1' is not a value along the axis_1 axis"
    )]
    // Both labels are bad; only the first axis in declared order is reported.
    #[case(
        SliceArgs::keywords([("axis_1", "bad-1"), ("axis_0", "bad-0")]),
        "'bad-0' is not a value along the axis_0 axis"
    )]
    fn test_invalid_labels(#[case] args: SliceArgs, #[case] expected: &str) {
        let err = resolve("MD", &two_axes(), &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLabel);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_axis_bound_twice() {
        let err = resolve("MD", &two_axes(), &SliceArgs::positional(["a"]).kwarg("axis_0", "b")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SliceArity);
        assert_eq!(err.to_string(), "MD got multiple values for axis 'axis_0'");

        let err = resolve("MD", &two_axes(), &SliceArgs::keywords([("axis_1", "c"), ("axis_1", "d")])).unwrap_err();
        assert!(matches!(err, SliceError::MultipleValues { ref axis, .. } if axis == "axis_1"));
    }

    #[test]
    fn test_call_styles_resolve_to_same_key() {
        let axes = two_axes();
        let positional = resolve("MD", &axes, &SliceArgs::positional(["b", "e"])).unwrap();
        let keyword = resolve("MD", &axes, &SliceArgs::keywords([("axis_1", "e"), ("axis_0", "b")])).unwrap();
        let mixed = resolve("MD", &axes, &SliceArgs::positional(["b"]).kwarg("axis_1", "e")).unwrap();

        assert_eq!(positional.as_slice(), &[Label::from("b"), Label::from("e")]);
        assert_eq!(positional, keyword);
        assert_eq!(positional, mixed);
    }
}
