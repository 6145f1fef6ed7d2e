//! # sheetglue-core
//!
//! Engine-side cell types for the sheetglue adapter layer.
//!
//! This crate owns the raw data and the primitive routines on it:
//! - [`CellRange`] - range initialisation, parsing and A1-style naming
//! - [`Value`] - tagged values, their plain string and formatted display
//! - [`ValueType`] - the type tag and its full identifier
//! - [`NumberFormat`] - display formats applied by [`Value::stringify`]
//!
//! ## Example
//!
//! ```rust
//! use sheetglue_core::{CellRange, NumberFormat, Value};
//!
//! let range = CellRange::init(1, 2, 3, 4).unwrap();
//! assert_eq!(range.as_string(), "B3:D5");
//!
//! let value = Value::float(0.256).with_format(NumberFormat::from_string("0.0%"));
//! assert_eq!(value.stringify().unwrap(), "25.6%");
//! assert_eq!(value.peek_string(), "0.256");
//! ```

pub mod cell;
pub mod error;
pub mod format;

pub use cell::{
    col_name, cols_name, row_name, rows_name, CellError, CellPos, CellRange, CellRef, RangeRef,
    SharedString, SheetSize, Value, ValueArray, ValueKind, ValueType,
};
pub use error::{Error, Result};
pub use format::{format_general, NumberFormat};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;
