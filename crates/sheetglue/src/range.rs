//! Range adapter: a friendlier constructor and rendering for [`CellRange`]

use sheetglue_core::{CellRange, Result};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// A rectangular block of cells
///
/// Wraps the engine's [`CellRange`] without adding state. Construction goes
/// through [`CellRange::init`], rendering through [`CellRange::as_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range(CellRange);

impl Range {
    /// Create a range; a missing end coordinate defaults to its start
    ///
    /// # Examples
    /// ```
    /// use sheetglue::Range;
    ///
    /// let r = Range::new(1, 2, None, None).unwrap();
    /// assert_eq!(r.tuple(), (1, 2, 1, 2));
    ///
    /// let r = Range::new(0, 0, Some(1), Some(3)).unwrap();
    /// assert_eq!(r.to_string(), "A1:B4");
    /// ```
    pub fn new(
        start_col: u32,
        start_row: u32,
        end_col: Option<u32>,
        end_row: Option<u32>,
    ) -> Result<Self> {
        let end_col = end_col.unwrap_or(start_col);
        let end_row = end_row.unwrap_or(start_row);
        CellRange::init(start_col, start_row, end_col, end_row).map(Self)
    }

    /// Single-cell range at `(col, row)`
    pub fn cell(col: u32, row: u32) -> Result<Self> {
        Self::new(col, row, None, None)
    }

    /// Parse "A1" or "A1:B4"
    pub fn parse(s: &str) -> Result<Self> {
        CellRange::parse(s).map(Self)
    }

    /// The wrapped engine range
    pub fn inner(&self) -> &CellRange {
        &self.0
    }

    /// Unwrap into the engine range
    pub fn into_inner(self) -> CellRange {
        self.0
    }

    /// `(start_col, start_row, end_col, end_row)`
    pub fn tuple(&self) -> (u32, u32, u32, u32) {
        self.0.tuple()
    }
}

impl Deref for Range {
    type Target = CellRange;

    fn deref(&self) -> &CellRange {
        &self.0
    }
}

impl From<CellRange> for Range {
    fn from(range: CellRange) -> Self {
        Self(range)
    }
}

impl From<Range> for CellRange {
    fn from(range: Range) -> Self {
        range.0
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.as_string())
    }
}

impl FromStr for Range {
    type Err = sheetglue_core::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetglue_core::{CellPos, Error};

    #[test]
    fn test_defaults_end_to_start() {
        for (col, row) in [(0, 0), (3, 7), (16383, 1048575)] {
            let r = Range::new(col, row, None, None).unwrap();
            assert_eq!(r.end, CellPos::new(col, row));
            assert!(r.is_singleton());
        }
    }

    #[test]
    fn test_partial_defaults() {
        let r = Range::new(2, 5, Some(4), None).unwrap();
        assert_eq!(r.tuple(), (2, 5, 4, 5));

        let r = Range::new(2, 5, None, Some(9)).unwrap();
        assert_eq!(r.tuple(), (2, 5, 2, 9));
    }

    #[test]
    fn test_default_is_top_left() {
        assert_eq!(Range::default().to_string(), "A1");
    }

    #[test]
    fn test_engine_errors_pass_through() {
        assert_eq!(
            Range::cell(16384, 0),
            Err(Error::ColumnOutOfBounds(16384, 16383))
        );
    }
}
