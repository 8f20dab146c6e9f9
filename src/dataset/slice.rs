//! The terminal, fully axis-bound dataset.

use super::capability::DatasetLike;
use super::definition::DatasetDefinition;
use super::factory::SliceKey;
use crate::schema::{BoundColumn, DefinitionId, Label, Owner, SliceId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

/// One definition with every axis bound to a label.
///
/// Produced only by [`DatasetDefinition::slice`] and owned by that
/// definition's cache. Its columns are fresh copies of the definition's
/// effective columns, each owned by this slice.
#[derive(Debug)]
pub struct Slice {
    id: SliceId,
    name: String,
    definition_id: DefinitionId,
    definition: Weak<DatasetDefinition>,
    free_axes_labels: Vec<(String, Label)>,
    columns: BTreeMap<String, BoundColumn>,
}

impl Slice {
    pub(crate) fn new(definition: &Arc<DatasetDefinition>, key: &SliceKey) -> Self {
        let id = SliceId::next();
        let owner = Owner::Slice(id);

        let free_axes_labels: Vec<(String, Label)> = definition
            .free_axes()
            .names()
            .zip(key.iter())
            .map(|(axis, label)| (axis.to_string(), label.clone()))
            .collect();

        let bindings: Vec<String> = free_axes_labels
            .iter()
            .map(|(axis, label)| format!("{}={}", axis, label))
            .collect();
        let name = format!("{}.slice({})", definition.name(), bindings.join(", "));

        let columns = definition
            .columns()
            .into_iter()
            .map(|c| (c.name().to_string(), c.rebind(owner)))
            .collect();

        Self {
            id,
            name,
            definition_id: definition.id(),
            definition: Arc::downgrade(definition),
            free_axes_labels,
            columns,
        }
    }

    pub fn id(&self) -> SliceId { self.id }
    pub fn name(&self) -> &str { &self.name }

    /// Axis name to bound label, in declared axis order.
    pub fn free_axes_labels(&self) -> &[(String, Label)] { &self.free_axes_labels }

    pub fn label(&self, axis: &str) -> Option<&Label> {
        self.free_axes_labels.iter().find(|(name, _)| name == axis).map(|(_, label)| label)
    }

    /// Identity of the definition this slice was produced from.
    pub fn parent_multidimensional_dataset(&self) -> DefinitionId { self.definition_id }

    /// The definition itself, while it is still alive.
    pub fn defining_dataset(&self) -> Option<Arc<DatasetDefinition>> {
        self.definition.upgrade()
    }

    pub fn schema(&self) -> SliceSchema {
        SliceSchema {
            name: self.name.clone(),
            definition: self.definition_id,
            free_axes_labels: self.free_axes_labels.clone(),
            columns: self.columns.values().cloned().collect(),
        }
    }
}

impl DatasetLike for Slice {
    fn dataset_name(&self) -> &str { &self.name }
    fn identity(&self) -> Owner { Owner::Slice(self.id) }
    fn lineage(&self) -> Vec<Owner> { vec![self.identity()] }
    fn columns(&self) -> Vec<&BoundColumn> { self.columns.values().collect() }
    fn column(&self, name: &str) -> Option<&BoundColumn> { self.columns.get(name) }
}

/// Read-only snapshot of a slice, for display and export.
#[derive(Debug, Clone, Serialize)]
pub struct SliceSchema {
    pub name: String,
    pub definition: DefinitionId,
    pub free_axes_labels: Vec<(String, Label)>,
    pub columns: Vec<BoundColumn>,
}

impl SliceSchema {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
