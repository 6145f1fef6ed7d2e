//! Tagged cell values

use super::reference::RangeRef;
use crate::error::Result;
use crate::format::{format_general, NumberFormat};
use std::fmt;
use std::sync::Arc;

/// Type tag of a [`Value`]
///
/// The discriminants match the engine's numbering, so tags can be compared
/// and sorted the way the engine orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ValueType {
    /// No value
    Empty = 10,
    /// TRUE/FALSE
    Boolean = 20,
    /// Whole number
    Integer = 30,
    /// Floating point number
    Float = 40,
    /// Error value (#DIV/0! etc.)
    Error = 50,
    /// Text
    String = 60,
    /// Reference to a block of cells
    CellRange = 70,
    /// Literal array
    Array = 80,
}

impl ValueType {
    /// Every tag, in engine order
    pub const ALL: [ValueType; 8] = [
        ValueType::Empty,
        ValueType::Boolean,
        ValueType::Integer,
        ValueType::Float,
        ValueType::Error,
        ValueType::String,
        ValueType::CellRange,
        ValueType::Array,
    ];

    /// Namespace prefix shared by every full tag identifier
    pub const PREFIX: &'static str = "VALUE_";

    /// The full tag identifier, e.g. `VALUE_INTEGER`
    pub fn value_name(&self) -> &'static str {
        match self {
            ValueType::Empty => "VALUE_EMPTY",
            ValueType::Boolean => "VALUE_BOOLEAN",
            ValueType::Integer => "VALUE_INTEGER",
            ValueType::Float => "VALUE_FLOAT",
            ValueType::Error => "VALUE_ERROR",
            ValueType::String => "VALUE_STRING",
            ValueType::CellRange => "VALUE_CELLRANGE",
            ValueType::Array => "VALUE_ARRAY",
        }
    }

    /// The engine's numeric code for this tag
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Look a tag up by its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Look a tag up by its full identifier
    pub fn from_value_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value_name() == name)
    }
}

/// Standard error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #NULL! - Incorrect range operator
    Null,
    /// #DIV/0! - Division by zero
    Div0,
    /// #VALUE! - Wrong type of argument or operand
    Value,
    /// #REF! - Invalid cell reference
    Ref,
    /// #NAME? - Unrecognized formula name
    Name,
    /// #NUM! - Invalid numeric value
    Num,
    /// #N/A - Value not available
    Na,
    /// #UNKNOWN! - Anything else
    Unknown,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
            CellError::Unknown => "#UNKNOWN!",
        }
    }

    /// Parse an error string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#NULL!" => Some(CellError::Null),
            "#DIV/0!" => Some(CellError::Div0),
            "#VALUE!" => Some(CellError::Value),
            "#REF!" => Some(CellError::Ref),
            "#NAME?" => Some(CellError::Name),
            "#NUM!" => Some(CellError::Num),
            "#N/A" => Some(CellError::Na),
            "#UNKNOWN!" => Some(CellError::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference-counted string payload
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    /// Create a new shared string
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

/// A literal `cols x rows` array of values, stored row by row
#[derive(Debug, Clone, PartialEq)]
pub struct ValueArray {
    cols: u32,
    rows: u32,
    cells: Vec<Value>,
}

impl ValueArray {
    /// Create an array with every element set to integer zero
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Value::int(0); cols as usize * rows as usize],
        }
    }

    /// Build an array from rows of values
    ///
    /// Returns `None` if the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            cols: cols as u32,
            rows: rows.len() as u32,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Element at `(col, row)`
    pub fn get(&self, col: u32, row: u32) -> Option<&Value> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get((row * self.cols + col) as usize)
    }

    /// Replace the element at `(col, row)`; returns false when out of bounds
    pub fn set(&mut self, col: u32, row: u32, value: Value) -> bool {
        if col >= self.cols || row >= self.rows {
            return false;
        }
        self.cells[(row * self.cols + col) as usize] = value;
        true
    }

    fn write_plain(&self, out: &mut String) {
        out.push('{');
        for row in 0..self.rows {
            if row > 0 {
                out.push(';');
            }
            for col in 0..self.cols {
                if col > 0 {
                    out.push(',');
                }
                match self.get(col, row) {
                    Some(Value {
                        kind: ValueKind::String(s),
                        ..
                    }) => {
                        out.push('"');
                        out.push_str(&s.as_str().replace('"', "\"\""));
                        out.push('"');
                    }
                    Some(v) => out.push_str(&v.peek_string()),
                    None => {}
                }
            }
        }
        out.push('}');
    }
}

/// The payload of a [`Value`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// Empty cell (no value)
    Empty,
    /// Boolean value (TRUE/FALSE)
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    String(SharedString),
    /// Error value
    Error(CellError),
    /// Literal array
    Array(ValueArray),
    /// Reference to a block of cells
    CellRange(RangeRef),
}

/// A tagged cell value with an optional display format
///
/// Values are produced by evaluation or parsing and never change after
/// construction; rendering borrows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    kind: ValueKind,
    format: Option<NumberFormat>,
}

impl Value {
    /// Wrap a payload with no display format
    pub fn new(kind: ValueKind) -> Self {
        Self { kind, format: None }
    }

    /// The empty value
    pub fn empty() -> Self {
        Self::new(ValueKind::Empty)
    }

    /// A boolean
    pub fn bool(b: bool) -> Self {
        Self::new(ValueKind::Boolean(b))
    }

    /// An integer
    pub fn int(n: i64) -> Self {
        Self::new(ValueKind::Integer(n))
    }

    /// A float
    pub fn float(n: f64) -> Self {
        Self::new(ValueKind::Float(n))
    }

    /// A string
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        Self::new(ValueKind::String(SharedString::new(s)))
    }

    /// An error value
    pub fn error(e: CellError) -> Self {
        Self::new(ValueKind::Error(e))
    }

    /// An array value
    pub fn array(array: ValueArray) -> Self {
        Self::new(ValueKind::Array(array))
    }

    /// A range reference
    pub fn cellrange(range: RangeRef) -> Self {
        Self::new(ValueKind::CellRange(range))
    }

    /// Attach a display format
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The payload
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The display format, if any
    pub fn format(&self) -> Option<&NumberFormat> {
        self.format.as_ref()
    }

    /// The type tag of this value
    pub fn type_of(&self) -> ValueType {
        match &self.kind {
            ValueKind::Empty => ValueType::Empty,
            ValueKind::Boolean(_) => ValueType::Boolean,
            ValueKind::Integer(_) => ValueType::Integer,
            ValueKind::Float(_) => ValueType::Float,
            ValueKind::String(_) => ValueType::String,
            ValueKind::Error(_) => ValueType::Error,
            ValueKind::Array(_) => ValueType::Array,
            ValueKind::CellRange(_) => ValueType::CellRange,
        }
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ValueKind::Empty)
    }

    /// Numeric view of the value (booleans count as 0/1)
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ValueKind::Integer(n) => Some(*n as f64),
            ValueKind::Float(n) => Some(*n),
            ValueKind::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// The unformatted textual form of the value
    ///
    /// Ignores the display format: floats use the general rendering,
    /// arrays are spelled `{1,2;3,4}` and references as `Sheet!A1:B2`.
    pub fn peek_string(&self) -> String {
        match &self.kind {
            ValueKind::Empty => String::new(),
            ValueKind::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            ValueKind::Integer(n) => n.to_string(),
            ValueKind::Float(n) => format_general(*n),
            ValueKind::String(s) => s.as_str().to_string(),
            ValueKind::Error(e) => e.as_str().to_string(),
            ValueKind::Array(a) => {
                let mut out = String::new();
                a.write_plain(&mut out);
                out
            }
            ValueKind::CellRange(r) => r.to_string(),
        }
    }

    /// The displayed text of the value, honouring its format
    ///
    /// Numbers go through the attached [`NumberFormat`]; everything else
    /// displays as its plain string. Fails when the format cannot be
    /// applied, e.g. a date format on a negative serial.
    pub fn stringify(&self) -> Result<String> {
        let format = match &self.format {
            Some(fmt) if !fmt.is_general() => fmt,
            _ => return Ok(self.peek_string()),
        };

        match &self.kind {
            ValueKind::Integer(n) => format.format_number(*n as f64),
            ValueKind::Float(n) => format.format_number(*n),
            _ => Ok(self.peek_string()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<CellError> for Value {
    fn from(e: CellError) -> Self {
        Value::error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRef;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_of() {
        assert_eq!(Value::empty().type_of(), ValueType::Empty);
        assert_eq!(Value::from(true).type_of(), ValueType::Boolean);
        assert_eq!(Value::from(42).type_of(), ValueType::Integer);
        assert_eq!(Value::from(2.5).type_of(), ValueType::Float);
        assert_eq!(Value::from("x").type_of(), ValueType::String);
        assert_eq!(Value::from(CellError::Na).type_of(), ValueType::Error);
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(ValueType::Integer.value_name(), "VALUE_INTEGER");
        assert_eq!(ValueType::CellRange.code(), 70);
        assert_eq!(ValueType::from_code(40), Some(ValueType::Float));
        assert_eq!(ValueType::from_code(41), None);
        assert_eq!(
            ValueType::from_value_name("VALUE_ARRAY"),
            Some(ValueType::Array)
        );
        assert!(ValueType::ALL
            .iter()
            .all(|t| t.value_name().starts_with(ValueType::PREFIX)));
    }

    #[test]
    fn test_peek_string_scalars() {
        assert_eq!(Value::empty().peek_string(), "");
        assert_eq!(Value::bool(true).peek_string(), "TRUE");
        assert_eq!(Value::bool(false).peek_string(), "FALSE");
        assert_eq!(Value::int(-17).peek_string(), "-17");
        assert_eq!(Value::float(0.1 + 0.2).peek_string(), "0.3");
        assert_eq!(Value::string("hello").peek_string(), "hello");
        assert_eq!(Value::error(CellError::Div0).peek_string(), "#DIV/0!");
    }

    #[test]
    fn test_peek_string_array() {
        let array = ValueArray::from_rows(vec![
            vec![Value::int(1), Value::string("a\"b")],
            vec![Value::float(2.5), Value::bool(true)],
        ])
        .unwrap();
        assert_eq!(Value::array(array).peek_string(), "{1,\"a\"\"b\";2.5,TRUE}");

        assert_eq!(Value::array(ValueArray::new(2, 1)).peek_string(), "{0,0}");
        assert!(ValueArray::from_rows(vec![vec![Value::int(1)], vec![]]).is_none());
    }

    #[test]
    fn test_peek_string_cellrange() {
        let r = RangeRef::new(
            CellRef::absolute(0, 0).on_sheet("Sheet1"),
            CellRef::absolute(1, 1).on_sheet("Sheet1"),
        );
        assert_eq!(Value::cellrange(r).peek_string(), "Sheet1!$A$1:$B$2");
    }

    #[test]
    fn test_array_access() {
        let mut a = ValueArray::new(2, 2);
        assert!(a.set(1, 0, Value::string("x")));
        assert!(!a.set(2, 0, Value::empty()));
        assert_eq!(a.get(1, 0), Some(&Value::string("x")));
        assert_eq!(a.get(0, 2), None);
    }

    #[test]
    fn test_stringify_uses_format() {
        let v = Value::float(1234.5).with_format(NumberFormat::from_id(4));
        assert_eq!(v.stringify().unwrap(), "1,234.50");
        assert_eq!(v.peek_string(), "1234.5");

        let v = Value::int(45292).with_format(NumberFormat::from_string("yyyy-mm-dd"));
        assert_eq!(v.stringify().unwrap(), "2024-01-01");

        let v = Value::string("text").with_format(NumberFormat::from_id(2));
        assert_eq!(v.stringify().unwrap(), "text");
    }

    #[test]
    fn test_stringify_errors() {
        let v = Value::float(-5.0).with_format(NumberFormat::from_string("yyyy-mm-dd"));
        assert_eq!(v.stringify(), Err(Error::DateOutOfRange(-5.0)));
    }
}
