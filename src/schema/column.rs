//! Column declarations and their owner-bound copies.

use super::dtype::DType;
use super::ids::Owner;
use super::label::Value;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A column as written in a definition: a name, a semantic type and an
/// optional missing-value sentinel. Not yet attached to anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    missing_value: Option<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self { name: name.into(), dtype, missing_value: None }
    }

    pub fn with_missing_value(mut self, value: impl Into<Value>) -> Self {
        self.missing_value = Some(value.into());
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn dtype(&self) -> DType { self.dtype }
    pub fn missing_value(&self) -> Option<&Value> { self.missing_value.as_ref() }

    /// Attaches the declaration to `owner`. An undeclared sentinel falls back
    /// to the dtype default.
    pub(crate) fn bind(&self, owner: Owner) -> BoundColumn {
        BoundColumn {
            name: self.name.clone(),
            dtype: self.dtype,
            missing_value: self
                .missing_value
                .clone()
                .or_else(|| self.dtype.default_missing_value()),
            owner,
        }
    }
}

/// A column attached to a definition or a slice. Immutable.
///
/// Equality and hashing cover name, dtype and owner, so the column sets of
/// two different slices never compare equal. Use [`BoundColumn::same_schema`]
/// to compare the schema alone.
#[derive(Debug, Clone, Serialize)]
pub struct BoundColumn {
    name: String,
    dtype: DType,
    missing_value: Option<Value>,
    owner: Owner,
}

impl BoundColumn {
    pub fn name(&self) -> &str { &self.name }
    pub fn dtype(&self) -> DType { self.dtype }
    pub fn missing_value(&self) -> Option<&Value> { self.missing_value.as_ref() }
    pub fn owner(&self) -> Owner { self.owner }

    pub fn same_schema(&self, other: &BoundColumn) -> bool {
        self.name == other.name && self.dtype == other.dtype
    }

    /// A fresh copy owned by `owner`.
    pub(crate) fn rebind(&self, owner: Owner) -> BoundColumn {
        BoundColumn { owner, ..self.clone() }
    }
}

impl PartialEq for BoundColumn {
    fn eq(&self, other: &Self) -> bool {
        self.same_schema(other) && self.owner == other.owner
    }
}

impl Eq for BoundColumn {}

impl Hash for BoundColumn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.dtype.hash(state);
        self.owner.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ids::{DefinitionId, SliceId};

    #[test]
    fn test_bind_fills_dtype_default() {
        let owner = Owner::Definition(DefinitionId(0));
        let f8 = Column::new("close", DType::Float64).bind(owner);
        assert!(matches!(f8.missing_value(), Some(Value::Float(v)) if v.is_nan()));

        let i8 = Column::new("volume", DType::Int64).bind(owner);
        assert_eq!(i8.missing_value(), None);

        let i8_explicit = Column::new("volume", DType::Int64).with_missing_value(-1).bind(owner);
        assert_eq!(i8_explicit.missing_value(), Some(&Value::Int(-1)));
    }

    #[test]
    fn test_rebind_keeps_schema_changes_owner() {
        let on_def = Column::new("close", DType::Float64).bind(Owner::Definition(DefinitionId(3)));
        let on_slice = on_def.rebind(Owner::Slice(SliceId(9)));

        assert!(on_def.same_schema(&on_slice));
        assert_ne!(on_def, on_slice);
        assert_eq!(on_slice.owner(), Owner::Slice(SliceId(9)));
        assert_eq!(on_def.owner(), Owner::Definition(DefinitionId(3)));
    }
}
