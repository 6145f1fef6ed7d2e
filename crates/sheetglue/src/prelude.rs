//! Prelude module - common imports for sheetglue users
//!
//! ```rust
//! use sheetglue::prelude::*;
//! ```

pub use crate::{
    // Engine types
    CellError,
    CellRange,
    Error,
    NumberFormat,
    // Adapters
    Range,
    Result,
    Value,
    // Extension traits
    ValueExt,
    ValueType,
};
