//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellPos`] and [`CellRange`] - positions and rectangular ranges ("A1:B10")
//! - [`CellRef`] and [`RangeRef`] - sheet-aware references carried by values
//! - [`Value`] - the tagged cell value and its [`ValueType`]

mod address;
mod reference;
mod value;

pub use address::{
    col_name, cols_name, letters_to_col, row_name, rows_name, CellPos, CellRange, SheetSize,
};
pub use reference::{CellRef, RangeRef};
pub use value::{CellError, SharedString, Value, ValueArray, ValueKind, ValueType};
