//! # sheetglue
//!
//! Ergonomic adapters over the engine cell types of `sheetglue-core`.
//!
//! - [`Range`] - a cell range with a defaulted constructor and an A1-style rendering
//! - [`render_value`] / [`render_value_debug`] - display and diagnostic renderings of a [`Value`]
//! - [`render_type_tag`] - the short name of a [`ValueType`]
//! - [`env`] - the development-checkout probe and the reported program name
//!
//! ## Example
//!
//! ```rust
//! use sheetglue::prelude::*;
//!
//! let range = Range::new(1, 2, Some(3), Some(4)).unwrap();
//! assert_eq!(range.to_string(), "B3:D5");
//!
//! let value = Value::int(42);
//! assert_eq!(value.display().to_string(), "42");
//! assert_eq!(value.debug_tagged().to_string(), "INTEGER:42");
//! ```

pub mod env;
pub mod prelude;
pub mod range;
pub mod value;

pub use env::{
    environment, init, init_with_path, install, is_dev_checkout, program_name, Environment,
    ProbeOptions,
};
pub use range::Range;
pub use value::{
    render_type_tag, render_value, render_value_debug, strip_type_prefix, DebugValue,
    DisplayValue, TypeTag, ValueExt,
};

// Re-export the engine types the adapters work on
pub use sheetglue_core::{
    CellError, CellPos, CellRange, CellRef, Error, NumberFormat, RangeRef, Result, SheetSize,
    Value, ValueArray, ValueKind, ValueType,
};
