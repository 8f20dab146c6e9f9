//! Parameterized dataset registry.
//!
//! A dataset definition is declared once with an ordered list of axes and a
//! set of typed columns. Slicing it binds a label to every axis and yields a
//! memoized, fully bound dataset whose columns belong to that slice.
//!
//! The Python facade lives behind the `python` feature.

pub mod dataset;
pub mod schema;

#[cfg(feature = "python")]
pub mod bindings {
    pub mod python;
}

pub use dataset::{
    DatasetDefinition, DatasetLike, DefinitionError, ErrorKind, Slice, SliceArgs, SliceError,
};
pub use schema::{AxisDomain, BoundColumn, Column, DType, DefinitionId, Label, Owner, SliceId, Value};

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `_core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<bindings::python::PyDatasetDefinition>()?;
    m.add_class::<bindings::python::PySlice>()?;
    Ok(())
}
