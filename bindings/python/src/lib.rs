//! Python bindings for sheetglue
//!
//! This module provides PyO3-based Python classes for the Range and Value
//! adapters, the value type tag, and the development-checkout probe.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyString};

use std::path::PathBuf;

use sheetglue::env::{Environment, ProbeOptions};
use sheetglue::{
    render_type_tag, render_value, render_value_debug, CellError, NumberFormat, Range, Value,
    ValueType,
};

// =============================================================================
// Error Conversion
// =============================================================================

fn to_py_err(e: sheetglue::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// =============================================================================
// Range - Python wrapper for cell ranges
// =============================================================================

/// A rectangular block of cells.
///
/// Example:
///     >>> str(Range(1, 2, 3, 4))
///     'B3:D5'
///     >>> Range(2, 3).get_tuple()
///     (2, 3, 2, 3)
#[pyclass(name = "Range")]
#[derive(Clone)]
pub struct PyRange {
    inner: Range,
}

#[pymethods]
impl PyRange {
    /// Create a range; end_col/end_row default to start_col/start_row
    #[new]
    #[pyo3(signature = (start_col = 0, start_row = 0, end_col = None, end_row = None))]
    fn new(
        start_col: u32,
        start_row: u32,
        end_col: Option<u32>,
        end_row: Option<u32>,
    ) -> PyResult<Self> {
        Range::new(start_col, start_row, end_col, end_row)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Parse an A1-style range such as "A1" or "B3:D5"
    #[staticmethod]
    #[pyo3(signature = (text))]
    fn parse(text: &str) -> PyResult<Self> {
        Range::parse(text)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// The coordinates as (start_col, start_row, end_col, end_row)
    fn get_tuple(&self) -> (u32, u32, u32, u32) {
        self.inner.tuple()
    }

    #[getter]
    fn start_col(&self) -> u32 {
        self.inner.start.col
    }

    #[getter]
    fn start_row(&self) -> u32 {
        self.inner.start.row
    }

    #[getter]
    fn end_col(&self) -> u32 {
        self.inner.end.col
    }

    #[getter]
    fn end_row(&self) -> u32 {
        self.inner.end.row
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        let (sc, sr, ec, er) = self.inner.tuple();
        format!("Range({}, {}, {}, {})", sc, sr, ec, er)
    }
}

// =============================================================================
// ValueType - Python wrapper for the type tag
// =============================================================================

/// The type tag of a Value. str() gives the short name ("INTEGER").
#[pyclass(name = "ValueType")]
#[derive(Clone)]
pub struct PyValueType {
    inner: ValueType,
}

#[pymethods]
impl PyValueType {
    /// Full identifier, e.g. "VALUE_INTEGER"
    #[getter]
    fn value_name(&self) -> &'static str {
        self.inner.value_name()
    }

    /// The engine's numeric code
    #[getter]
    fn code(&self) -> u8 {
        self.inner.code()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __int__(&self) -> u8 {
        self.inner.code()
    }

    fn __str__(&self) -> &'static str {
        render_type_tag(self.inner)
    }

    fn __repr__(&self) -> String {
        format!("<ValueType {}>", self.inner.value_name())
    }
}

// =============================================================================
// Value - Python wrapper for cell values
// =============================================================================

/// A tagged cell value.
///
/// str() gives the displayed text (honouring the number format), repr()
/// the diagnostic "TYPE:plain" form.
///
/// Example:
///     >>> v = Value(1234.5, "#,##0.00")
///     >>> str(v), repr(v)
///     ('1,234.50', 'FLOAT:1234.5')
#[pyclass(name = "Value")]
#[derive(Clone)]
pub struct PyValue {
    inner: Value,
}

#[pymethods]
impl PyValue {
    /// Build a value from None, bool, int, float or str
    ///
    /// Strings that name an error ("#DIV/0!") become error values when
    /// `error=True`.
    #[new]
    #[pyo3(signature = (value = None, format = None, error = false))]
    fn new(
        value: Option<&Bound<'_, PyAny>>,
        format: Option<String>,
        error: bool,
    ) -> PyResult<Self> {
        let mut inner = match value {
            Some(v) => python_to_value(v, error)?,
            None => Value::empty(),
        };
        if let Some(code) = format {
            inner = inner.with_format(NumberFormat::from_string(code));
        }
        Ok(Self { inner })
    }

    /// The type tag of this value
    fn type_of(&self) -> PyValueType {
        PyValueType {
            inner: self.inner.type_of(),
        }
    }

    /// The unformatted textual form
    fn get_as_string(&self) -> String {
        self.inner.peek_string()
    }

    /// The number format code, or None
    #[getter]
    fn format(&self) -> Option<String> {
        self.inner.format().map(|f| f.format_string().to_string())
    }

    fn __str__(&self) -> String {
        render_value(&self.inner)
    }

    fn __repr__(&self) -> String {
        render_value_debug(&self.inner)
    }
}

// =============================================================================
// Environment probe
// =============================================================================

/// Classify the running module once and record the result.
///
/// Args:
///     module_path: Path of the calling module (e.g. the overrides file);
///         defaults to the running executable
///     marker: Path component marking a development checkout
///     depth: Position of the marker counted from the end of the path
///
/// Returns:
///     True when running from a development checkout
#[pyfunction]
#[pyo3(signature = (module_path = None, marker = None, depth = None))]
fn init(
    py: Python<'_>,
    module_path: Option<PathBuf>,
    marker: Option<String>,
    depth: Option<usize>,
) -> PyResult<bool> {
    let mut options = ProbeOptions::from_env();
    if let Some(marker) = marker {
        options = options.with_marker(marker);
    }
    if let Some(depth) = depth {
        options = options.with_depth(depth);
    }

    let module_path = module_path
        .map(|p| p.canonicalize().unwrap_or(p))
        .or_else(sheetglue::env::locate_module);

    // The interpreter's own argv[0] is "python"; the script name lives in sys.argv
    let argv0 = py
        .import_bound("sys")?
        .getattr("argv")?
        .get_item(0)
        .and_then(|a| a.extract::<String>())
        .ok();

    let environment = Environment::classify(&options, module_path, argv0);
    Ok(sheetglue::install(environment).dev_checkout())
}

/// True when running from a development checkout
#[pyfunction]
fn in_tree() -> bool {
    sheetglue::is_dev_checkout()
}

/// The reported program name
#[pyfunction]
fn program_name() -> String {
    sheetglue::program_name()
}

// =============================================================================
// Helper functions
// =============================================================================

/// Convert a Python object to a Value
fn python_to_value(value: &Bound<'_, PyAny>, error: bool) -> PyResult<Value> {
    if value.is_none() {
        Ok(Value::empty())
    } else if value.is_instance_of::<PyBool>() {
        Ok(Value::bool(value.extract()?))
    } else if value.is_instance_of::<PyInt>() {
        Ok(Value::int(value.extract()?))
    } else if value.is_instance_of::<PyFloat>() {
        Ok(Value::float(value.extract()?))
    } else if value.is_instance_of::<PyString>() {
        let s: String = value.extract()?;
        if error {
            CellError::from_str(&s)
                .map(Value::error)
                .ok_or_else(|| PyValueError::new_err(format!("Unknown error value: {}", s)))
        } else {
            Ok(Value::string(s))
        }
    } else {
        Err(PyTypeError::new_err(
            "Value must be None, bool, int, float, or str",
        ))
    }
}

// =============================================================================
// Module definition
// =============================================================================

/// _sheetglue - Range and Value adapters for Python
///
/// Example:
///     >>> import _sheetglue as sg
///     >>> sg.init(__file__)
///     False
///     >>> str(sg.Range(1, 2, 3, 4))
///     'B3:D5'
///     >>> str(sg.Value(42).type_of())
///     'INTEGER'
#[pymodule]
fn _sheetglue(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRange>()?;
    m.add_class::<PyValue>()?;
    m.add_class::<PyValueType>()?;
    m.add_function(wrap_pyfunction!(init, m)?)?;
    m.add_function(wrap_pyfunction!(in_tree, m)?)?;
    m.add_function(wrap_pyfunction!(program_name, m)?)?;
    Ok(())
}
