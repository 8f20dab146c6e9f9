//! Dataset definitions: axes plus columns, with single inheritance.

use super::cache::SliceCache;
use super::capability::DatasetLike;
use super::error::{DefinitionError, SliceError};
use super::factory::{self, SliceArgs, SliceKey};
use super::slice::Slice;
use crate::schema::{AxisDomain, BoundColumn, Column, DType, DefinitionId, FreeAxes, Label, Owner, Value};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// A family of datasets parameterized by a fixed, ordered set of axes.
///
/// Definitions are immutable once built and are handled through `Arc`.
/// Each one owns the cache of the slices produced from it, so two
/// definitions with identical axes never share slices.
#[derive(Debug)]
pub struct DatasetDefinition {
    id: DefinitionId,
    name: String,
    free_axes: Arc<FreeAxes>,
    own_columns: BTreeMap<String, BoundColumn>,
    parent: Option<Arc<DatasetDefinition>>,
    cache: SliceCache,
}

impl DatasetDefinition {
    pub fn builder(name: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder {
            name: name.into(),
            axes: Vec::new(),
            columns: ColumnList::default(),
        }
    }

    /// Starts a child definition sharing this definition's axes.
    pub fn derive(self: &Arc<Self>, name: impl Into<String>) -> DerivedBuilder {
        DerivedBuilder {
            name: name.into(),
            parent: Arc::clone(self),
            columns: ColumnList::default(),
        }
    }

    pub fn id(&self) -> DefinitionId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn free_axes(&self) -> &FreeAxes { &self.free_axes }
    pub fn parent(&self) -> Option<&Arc<DatasetDefinition>> { self.parent.as_ref() }

    /// Columns declared directly on this definition, excluding inherited ones.
    pub fn own_columns(&self) -> impl Iterator<Item = &BoundColumn> {
        self.own_columns.values()
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &DatasetDefinition> {
        std::iter::successors(self.parent.as_deref(), |d| d.parent.as_deref())
    }

    /// Resolves `args` against the axes and returns the slice for them.
    ///
    /// Every call style that binds the same labels returns the same `Arc`.
    /// A failed call leaves the cache untouched.
    pub fn slice(self: &Arc<Self>, args: &SliceArgs) -> Result<Arc<Slice>, SliceError> {
        let key = factory::resolve(&self.name, &self.free_axes, args)?;
        Ok(self.cache.get_or_insert_with(key, |k| Slice::new(self, k)))
    }

    /// Every label tuple, in declared axis order with the first axis varying slowest.
    pub fn label_combinations(&self) -> LabelCombinations<'_> {
        LabelCombinations::new(&self.free_axes)
    }

    /// Materializes a slice for every label tuple.
    pub fn slice_all(self: &Arc<Self>) -> Vec<Arc<Slice>> {
        let keys: Vec<SliceKey> = self.label_combinations().collect();
        keys.into_par_iter()
            .map(|key| self.cache.get_or_insert_with(key, |k| Slice::new(self, k)))
            .collect()
    }

    /// Number of slices produced so far.
    pub fn cached_slices(&self) -> usize { self.cache.len() }

    pub fn schema(&self) -> DefinitionSchema {
        DefinitionSchema {
            name: self.name.clone(),
            id: self.id,
            parent: self.parent.as_ref().map(|p| p.id),
            free_axes: (*self.free_axes).clone(),
            columns: self.columns().into_iter().cloned().collect(),
        }
    }
}

impl DatasetLike for DatasetDefinition {
    fn dataset_name(&self) -> &str { &self.name }
    fn identity(&self) -> Owner { Owner::Definition(self.id) }

    fn lineage(&self) -> Vec<Owner> {
        std::iter::once(self)
            .chain(self.ancestors())
            .map(|d| d.identity())
            .collect()
    }

    /// Own columns shadow ancestor columns of the same name.
    fn columns(&self) -> Vec<&BoundColumn> {
        let mut chain: Vec<&DatasetDefinition> = std::iter::once(self).chain(self.ancestors()).collect();
        chain.reverse();

        let mut effective: BTreeMap<&str, &BoundColumn> = BTreeMap::new();
        for def in chain {
            for column in def.own_columns.values() {
                effective.insert(column.name(), column);
            }
        }
        effective.into_values().collect()
    }
}

/// Columns collected by a builder, with the first declaration error held
/// back until `build`.
#[derive(Debug, Default)]
struct ColumnList {
    columns: Vec<Column>,
    error: Option<String>,
}

impl ColumnList {
    fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    fn push_code(&mut self, name: &str, code: &str, missing_value: Option<Value>) {
        match code.parse::<DType>() {
            Ok(dtype) => {
                let column = Column::new(name, dtype);
                self.columns.push(match missing_value {
                    Some(v) => column.with_missing_value(v),
                    None => column,
                });
            }
            Err(msg) => {
                self.error.get_or_insert(format!("column '{}': {}", name, msg));
            }
        }
    }

    fn bind(self, dataset: &str, owner: Owner) -> Result<BTreeMap<String, BoundColumn>, DefinitionError> {
        if let Some(message) = self.error {
            return Err(DefinitionError::UnknownDType { dataset: dataset.to_string(), message });
        }
        let mut bound = BTreeMap::new();
        for column in self.columns {
            if bound.contains_key(column.name()) {
                return Err(DefinitionError::DuplicateColumn {
                    dataset: dataset.to_string(),
                    column: column.name().to_string(),
                });
            }
            bound.insert(column.name().to_string(), column.bind(owner));
        }
        Ok(bound)
    }
}

/// Declares a root definition.
#[derive(Debug)]
pub struct DefinitionBuilder {
    name: String,
    axes: Vec<AxisDomain>,
    columns: ColumnList,
}

impl DefinitionBuilder {
    pub fn axis<L: Into<Label>>(mut self, name: impl Into<String>, labels: impl IntoIterator<Item = L>) -> Self {
        self.axes.push(AxisDomain::new(name, labels));
        self
    }

    pub fn axis_domain(mut self, axis: AxisDomain) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Declares a column by numpy-style dtype code (`"f8"`, `"?"`, `"M8[ns]"`).
    pub fn column_code(mut self, name: &str, code: &str, missing_value: Option<Value>) -> Self {
        self.columns.push_code(name, code, missing_value);
        self
    }

    pub fn build(self) -> Result<Arc<DatasetDefinition>, DefinitionError> {
        if self.axes.is_empty() {
            return Err(DefinitionError::EmptyFreeAxes { dataset: self.name });
        }
        let mut seen = HashSet::new();
        for axis in &self.axes {
            if axis.is_empty() {
                return Err(DefinitionError::EmptyAxisDomain {
                    dataset: self.name.clone(),
                    axis: axis.name().to_string(),
                });
            }
            if !seen.insert(axis.name()) {
                return Err(DefinitionError::DuplicateAxis {
                    dataset: self.name.clone(),
                    axis: axis.name().to_string(),
                });
            }
        }

        let id = DefinitionId::next();
        let own_columns = self.columns.bind(&self.name, Owner::Definition(id))?;
        log::debug!(
            "defined {} with {} free axes and {} columns",
            self.name,
            self.axes.len(),
            own_columns.len()
        );

        Ok(Arc::new(DatasetDefinition {
            id,
            name: self.name,
            free_axes: Arc::new(FreeAxes::new(self.axes)),
            own_columns,
            parent: None,
            cache: SliceCache::new(),
        }))
    }
}

/// Declares a child definition. Axes come from the parent and cannot be
/// changed; only columns may be added.
#[derive(Debug)]
pub struct DerivedBuilder {
    name: String,
    parent: Arc<DatasetDefinition>,
    columns: ColumnList,
}

impl DerivedBuilder {
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column_code(mut self, name: &str, code: &str, missing_value: Option<Value>) -> Self {
        self.columns.push_code(name, code, missing_value);
        self
    }

    pub fn build(self) -> Result<Arc<DatasetDefinition>, DefinitionError> {
        let id = DefinitionId::next();
        let own_columns = self.columns.bind(&self.name, Owner::Definition(id))?;
        log::debug!(
            "derived {} from {} with {} new columns",
            self.name,
            self.parent.name,
            own_columns.len()
        );

        Ok(Arc::new(DatasetDefinition {
            id,
            name: self.name,
            free_axes: Arc::clone(&self.parent.free_axes),
            own_columns,
            parent: Some(self.parent),
            cache: SliceCache::new(),
        }))
    }
}

/// Odometer over the cross product of a definition's axis domains.
pub struct LabelCombinations<'a> {
    domains: Vec<Vec<&'a Label>>,
    cursor: Option<Vec<usize>>,
}

impl<'a> LabelCombinations<'a> {
    fn new(axes: &'a FreeAxes) -> Self {
        let domains: Vec<Vec<&Label>> = axes.iter().map(|a| a.labels().iter().collect()).collect();
        let cursor = if domains.iter().any(|d| d.is_empty()) {
            None
        } else {
            Some(vec![0; domains.len()])
        };
        Self { domains, cursor }
    }
}

impl<'a> Iterator for LabelCombinations<'a> {
    type Item = SliceKey;

    fn next(&mut self) -> Option<SliceKey> {
        let cursor = self.cursor.as_mut()?;
        let key: SliceKey = cursor
            .iter()
            .zip(&self.domains)
            .map(|(&i, domain)| domain[i].clone())
            .collect();

        // Advance the last axis first.
        let mut exhausted = true;
        for axis in (0..cursor.len()).rev() {
            cursor[axis] += 1;
            if cursor[axis] < self.domains[axis].len() {
                exhausted = false;
                break;
            }
            cursor[axis] = 0;
        }
        if exhausted {
            self.cursor = None;
        }
        Some(key)
    }
}

/// Read-only snapshot of a definition, for display and export.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionSchema {
    pub name: String,
    pub id: DefinitionId,
    pub parent: Option<DefinitionId>,
    pub free_axes: FreeAxes,
    pub columns: Vec<BoundColumn>,
}

impl DefinitionSchema {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
