//! FFI bindings exposing definitions and slices to Python.

use crate::dataset::{DatasetDefinition, DatasetLike, DefinitionError, ErrorKind, Slice, SliceArgs, SliceError};
use crate::schema::{BoundColumn, Label, Value};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyTuple};
use pyo3::IntoPyObjectExt;
use std::sync::Arc;

/// Mirrors the exception classes the pure-Python implementation raised:
/// binding problems are `TypeError`s, bad values are `ValueError`s.
fn slice_err(e: SliceError) -> PyErr {
    match e.kind() {
        ErrorKind::InvalidLabel => PyValueError::new_err(e.to_string()),
        _ => PyTypeError::new_err(e.to_string()),
    }
}

fn definition_err(e: DefinitionError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn label_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Label> {
    // bool is a subclass of int in Python, so it must be checked first.
    if obj.is_instance_of::<PyBool>() {
        return Ok(Label::Bool(obj.extract::<bool>()?));
    }
    if let Ok(i) = obj.extract::<i64>() {
        return Ok(Label::Int(i));
    }
    if let Ok(s) = obj.extract::<String>() {
        return Ok(Label::Str(s));
    }
    Err(PyTypeError::new_err(format!(
        "axis labels must be int, str or bool, got {}",
        obj.get_type().name()?
    )))
}

fn label_to_py<'py>(py: Python<'py>, label: &Label) -> PyResult<Bound<'py, PyAny>> {
    match label {
        Label::Bool(b) => b.into_bound_py_any(py),
        Label::Int(i) => i.into_bound_py_any(py),
        Label::Str(s) => s.as_str().into_bound_py_any(py),
    }
}

fn value_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(obj.extract::<bool>()?));
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::Float(obj.extract::<f64>()?));
    }
    if let Ok(i) = obj.extract::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(s) = obj.extract::<String>() {
        return Ok(Value::Str(s));
    }
    Err(PyTypeError::new_err("unsupported missing_value"))
}

fn describe_columns(columns: Vec<&BoundColumn>) -> Vec<(String, String, String)> {
    columns
        .into_iter()
        .map(|c| (c.name().to_string(), c.dtype().to_string(), c.owner().to_string()))
        .collect()
}

/// `(name, dtype_code, missing_value)` triples as passed from Python.
type ColumnSpec<'py> = (String, String, Option<Bound<'py, PyAny>>);

#[pyclass(name = "MultiDimensionalDataSet", frozen)]
#[derive(Debug, Clone)]
pub struct PyDatasetDefinition {
    inner: Arc<DatasetDefinition>,
}

#[pymethods]
impl PyDatasetDefinition {
    #[new]
    #[pyo3(signature = (name, free_axes, columns = Vec::new()))]
    pub fn new(name: String, free_axes: Vec<(String, Bound<'_, PyAny>)>, columns: Vec<ColumnSpec<'_>>) -> PyResult<Self> {
        let mut builder = DatasetDefinition::builder(name);
        for (axis, labels) in free_axes {
            let mut parsed = Vec::new();
            for item in labels.try_iter()? {
                parsed.push(label_from_py(&item?)?);
            }
            builder = builder.axis(axis, parsed);
        }
        for (column, code, missing) in columns {
            let missing = missing.as_ref().map(value_from_py).transpose()?;
            builder = builder.column_code(&column, &code, missing);
        }
        let inner = builder.build().map_err(definition_err)?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (name, columns = Vec::new()))]
    pub fn derive(&self, name: String, columns: Vec<ColumnSpec<'_>>) -> PyResult<Self> {
        let mut builder = self.inner.derive(name);
        for (column, code, missing) in columns {
            let missing = missing.as_ref().map(value_from_py).transpose()?;
            builder = builder.column_code(&column, &code, missing);
        }
        let inner = builder.build().map_err(definition_err)?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (*args, **kwargs))]
    pub fn slice(&self, args: &Bound<'_, PyTuple>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<PySlice> {
        let mut call = SliceArgs::new();
        for item in args.iter() {
            call = call.arg(label_from_py(&item)?);
        }
        if let Some(kwargs) = kwargs {
            for (key, value) in kwargs.iter() {
                call = call.kwarg(key.extract::<String>()?, label_from_py(&value)?);
            }
        }
        let inner = self.inner.slice(&call).map_err(slice_err)?;
        Ok(PySlice { inner })
    }

    #[getter]
    pub fn name(&self) -> String { self.inner.name().to_string() }

    #[getter]
    pub fn id(&self) -> u32 { self.inner.id().0 }

    #[getter]
    pub fn free_axes<'py>(&self, py: Python<'py>) -> PyResult<Vec<(String, Vec<Bound<'py, PyAny>>)>> {
        self.inner
            .free_axes()
            .iter()
            .map(|axis| {
                let labels = axis.labels().iter().map(|l| label_to_py(py, l)).collect::<PyResult<Vec<_>>>()?;
                Ok((axis.name().to_string(), labels))
            })
            .collect()
    }

    #[getter]
    pub fn columns(&self) -> Vec<(String, String, String)> {
        describe_columns(self.inner.columns())
    }

    pub fn is_subclass_of(&self, other: &PyDatasetDefinition) -> bool {
        self.inner.is_subtype_of(&*other.inner)
    }

    pub fn schema_json(&self) -> PyResult<String> {
        self.inner.schema().to_json().map_err(|e| PyValueError::new_err(e.to_string()))
    }

    // Wrappers are rebuilt per access, so equality is identity of the definition.
    fn __eq__(&self, other: &PyDatasetDefinition) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn __hash__(&self) -> u64 {
        self.inner.id().0 as u64
    }

    fn __repr__(&self) -> String {
        format!("<MultiDimensionalDataSet {}>", self.inner.name())
    }
}

#[pyclass(name = "Slice", frozen)]
#[derive(Debug, Clone)]
pub struct PySlice {
    inner: Arc<Slice>,
}

#[pymethods]
impl PySlice {
    #[getter]
    pub fn name(&self) -> String { self.inner.name().to_string() }

    #[getter]
    pub fn free_axes_labels<'py>(&self, py: Python<'py>) -> PyResult<Vec<(String, Bound<'py, PyAny>)>> {
        self.inner
            .free_axes_labels()
            .iter()
            .map(|(axis, label)| Ok((axis.clone(), label_to_py(py, label)?)))
            .collect()
    }

    /// The defining dataset, or `None` once it has been dropped.
    #[getter]
    pub fn parent_multidimensional_dataset(&self) -> Option<PyDatasetDefinition> {
        self.inner.defining_dataset().map(|inner| PyDatasetDefinition { inner })
    }

    #[getter]
    pub fn columns(&self) -> Vec<(String, String, String)> {
        describe_columns(self.inner.columns())
    }

    pub fn schema_json(&self) -> PyResult<String> {
        self.inner.schema().to_json().map_err(|e| PyValueError::new_err(e.to_string()))
    }

    // Every lookup of the same labels shares one Slice, so identity is the id.
    fn __eq__(&self, other: &PySlice) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn __hash__(&self) -> u64 {
        self.inner.id().0 as u64
    }

    fn __repr__(&self) -> String {
        format!("<{}>", self.inner.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_parent_is_the_defining_dataset() {
        let md = DatasetDefinition::builder("MD").axis("axis_0", ["a", "b"]).build().unwrap();
        let slice = PySlice { inner: md.slice(&SliceArgs::positional(["a"])).unwrap() };
        let wrapped = PyDatasetDefinition { inner: Arc::clone(&md) };

        let parent = slice.parent_multidimensional_dataset().unwrap();
        assert!(parent.__eq__(&wrapped));
        assert_eq!(parent.__hash__(), wrapped.__hash__());

        drop((md, parent, wrapped));
        assert!(slice.parent_multidimensional_dataset().is_none());
    }
}
