//! Named axes and the ordered collection of them a definition is parameterized by.

use super::label::Label;
use serde::Serialize;
use std::collections::BTreeSet;

/// One named axis and the finite set of labels that may be bound to it.
///
/// Duplicate labels collapse; label order is irrelevant to equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AxisDomain {
    name: String,
    labels: BTreeSet<Label>,
}

impl AxisDomain {
    pub fn new<L: Into<Label>>(name: impl Into<String>, labels: impl IntoIterator<Item = L>) -> Self {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn labels(&self) -> &BTreeSet<Label> { &self.labels }
    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    #[inline]
    pub fn contains(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }
}

/// The ordered axes of a definition.
///
/// Position is significant: it fixes the order positional labels bind in.
/// Shared between a definition and everything derived from it, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FreeAxes {
    axes: Vec<AxisDomain>,
}

impl FreeAxes {
    pub(crate) fn new(axes: Vec<AxisDomain>) -> Self {
        Self { axes }
    }

    pub fn len(&self) -> usize { self.axes.len() }
    pub fn is_empty(&self) -> bool { self.axes.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, AxisDomain> { self.axes.iter() }
    pub fn names(&self) -> impl Iterator<Item = &str> { self.axes.iter().map(|a| a.name()) }

    pub fn get(&self, name: &str) -> Option<&AxisDomain> {
        self.axes.iter().find(|a| a.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == name)
    }

    /// Number of distinct label tuples, saturating.
    pub fn combination_count(&self) -> usize {
        self.axes.iter().fold(1usize, |acc, a| acc.saturating_mul(a.len()))
    }
}

impl<'a> IntoIterator for &'a FreeAxes {
    type Item = &'a AxisDomain;
    type IntoIter = std::slice::Iter<'a, AxisDomain>;

    fn into_iter(self) -> Self::IntoIter { self.axes.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_deduplicated_and_order_free() {
        let a = AxisDomain::new("currency", ["USD", "EUR", "USD"]);
        let b = AxisDomain::new("currency", ["EUR", "USD"]);
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        assert!(a.contains(&Label::from("EUR")));
        assert!(!a.contains(&Label::from("JPY")));
    }

    #[test]
    fn test_axis_position_is_declared_order() {
        let axes = FreeAxes::new(vec![
            AxisDomain::new("window", [5, 10, 30]),
            AxisDomain::new("currency", ["USD", "EUR"]),
        ]);
        assert_eq!(axes.position("currency"), Some(1));
        assert_eq!(axes.names().collect::<Vec<_>>(), vec!["window", "currency"]);
        assert_eq!(axes.combination_count(), 6);
        assert!(axes.get("missing").is_none());
    }
}
