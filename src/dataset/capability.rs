//! The capability shared by definitions and slices.
use crate::schema::{BoundColumn, Owner};

/// Anything that exposes a named set of columns.
///
/// Subtyping is nominal and follows `lineage`: a definition's lineage is
/// itself followed by its ancestors, while a slice's lineage is only itself.
/// A derived definition can therefore stand in for its parent, but no slice
/// ever stands in for another.
pub trait DatasetLike {
    fn dataset_name(&self) -> &str;

    /// The identity columns of this dataset are attributed to.
    fn identity(&self) -> Owner;

    /// `identity()` first, then each ancestor nearest-first.
    fn lineage(&self) -> Vec<Owner>;

    /// Effective columns, ordered by name.
    fn columns(&self) -> Vec<&BoundColumn>;

    fn column(&self, name: &str) -> Option<&BoundColumn> {
        self.columns().into_iter().find(|c| c.name() == name)
    }

    fn is_subtype_of(&self, other: &dyn DatasetLike) -> bool {
        self.lineage().contains(&other.identity())
    }
}
