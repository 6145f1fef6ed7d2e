//! Cell positions, ranges and their A1-style names

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// Dimensions of the sheet a range lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSize {
    /// Number of columns
    pub max_cols: u32,
    /// Number of rows
    pub max_rows: u32,
}

impl SheetSize {
    /// The classic 256 x 65536 sheet
    pub const LEGACY: SheetSize = SheetSize {
        max_cols: 256,
        max_rows: 65_536,
    };

    /// Create a sheet size
    pub fn new(max_cols: u32, max_rows: u32) -> Self {
        Self { max_cols, max_rows }
    }

    /// Check a position against this size
    pub fn check(&self, pos: CellPos) -> Result<()> {
        if pos.col >= self.max_cols {
            return Err(Error::ColumnOutOfBounds(pos.col, self.max_cols - 1));
        }
        if pos.row >= self.max_rows {
            return Err(Error::RowOutOfBounds(pos.row, self.max_rows - 1));
        }
        Ok(())
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        Self {
            max_cols: MAX_COLS,
            max_rows: MAX_ROWS,
        }
    }
}

/// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn col_name(col: u32) -> String {
    let mut result = String::new();
    let mut n = col as u64 + 1;

    while n > 0 {
        n -= 1;
        result.insert(0, ((n % 26) as u8 + b'A') as char);
        n /= 26;
    }

    result
}

/// Convert a row index to its 1-based display name
pub fn row_name(row: u32) -> String {
    (row as u64 + 1).to_string()
}

/// Name a span of columns ("A:C"), or a single column when both ends agree
pub fn cols_name(start_col: u32, end_col: u32) -> String {
    if start_col == end_col {
        col_name(start_col)
    } else {
        format!("{}:{}", col_name(start_col), col_name(end_col))
    }
}

/// Name a span of rows ("1:3"), or a single row when both ends agree
pub fn rows_name(start_row: u32, end_row: u32) -> String {
    if start_row == end_row {
        row_name(start_row)
    } else {
        format!("{}:{}", row_name(start_row), row_name(end_row))
    }
}

/// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
pub fn letters_to_col(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
        if col > u32::MAX as u64 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' is too large",
                letters
            )));
        }
    }

    Ok((col - 1) as u32)
}

/// A cell position (0-based column and row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    /// Column index (A = 0)
    pub col: u32,
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
}

impl CellPos {
    /// Create a new position
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse a plain A1-style position (no `$` markers, no sheet prefix)
    ///
    /// # Examples
    /// ```
    /// use sheetglue_core::CellPos;
    ///
    /// let pos = CellPos::parse("C7").unwrap();
    /// assert_eq!(pos, CellPos::new(2, 6));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());

        if split == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = letters_to_col(&s[..split])?;
        let row_str = &s[split..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { col, row: row - 1 })
    }

    /// Format as an A1-style string
    pub fn as_string(&self) -> String {
        format!("{}{}", col_name(self.col), row_name(self.row))
    }

    /// The position as a `(col, row)` pair
    pub fn tuple(&self) -> (u32, u32) {
        (self.col, self.row)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_name(self.col), row_name(self.row))
    }
}

impl FromStr for CellPos {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Top-left corner
    pub start: CellPos,
    /// Bottom-right corner
    pub end: CellPos,
}

impl CellRange {
    /// Build a range from two corners without validation
    pub fn new(start: CellPos, end: CellPos) -> Self {
        Self { start, end }
    }

    /// Single-cell range
    pub fn single(pos: CellPos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Initialise a range from its four coordinates, checked against the
    /// default sheet size
    pub fn init(start_col: u32, start_row: u32, end_col: u32, end_row: u32) -> Result<Self> {
        Self::init_in(
            &SheetSize::default(),
            start_col,
            start_row,
            end_col,
            end_row,
        )
    }

    /// Initialise a range from its four coordinates, checked against `size`
    ///
    /// Both corners must lie inside the sheet and the start must not be
    /// past the end on either axis.
    pub fn init_in(
        size: &SheetSize,
        start_col: u32,
        start_row: u32,
        end_col: u32,
        end_row: u32,
    ) -> Result<Self> {
        let start = CellPos::new(start_col, start_row);
        let end = CellPos::new(end_col, end_row);
        size.check(start)?;
        size.check(end)?;

        if start_col > end_col || start_row > end_row {
            return Err(Error::InvalidRange(format!(
                "start {} is past end {}",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    /// Parse a simple range ("A1" or "A1:B10"; no `$`, no sheet prefix)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        let range = match s.split_once(':') {
            Some((a, b)) => Self::new(CellPos::parse(a)?, CellPos::parse(b)?),
            None => Self::single(CellPos::parse(s)?),
        };

        if range.start.col > range.end.col || range.start.row > range.end.row {
            return Err(Error::InvalidRange(s.to_string()));
        }
        Ok(range)
    }

    /// Format as "A1" for a single cell, "A1:B10" otherwise
    pub fn as_string(&self) -> String {
        if self.is_singleton() {
            self.start.as_string()
        } else {
            format!("{}:{}", self.start.as_string(), self.end.as_string())
        }
    }

    /// Whether the range covers exactly one cell
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    /// Check if a position lies within this range
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.col >= self.start.col
            && pos.col <= self.end.col
            && pos.row >= self.start.row
            && pos.row <= self.end.row
    }

    /// Number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// The four coordinates as `(start_col, start_row, end_col, end_row)`
    pub fn tuple(&self) -> (u32, u32, u32, u32) {
        (self.start.col, self.start.row, self.end.col, self.end.row)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_name() {
        assert_eq!(col_name(0), "A");
        assert_eq!(col_name(1), "B");
        assert_eq!(col_name(25), "Z");
        assert_eq!(col_name(26), "AA");
        assert_eq!(col_name(27), "AB");
        assert_eq!(col_name(701), "ZZ");
        assert_eq!(col_name(702), "AAA");
        assert_eq!(col_name(16383), "XFD");
    }

    #[test]
    fn test_letters_to_col() {
        assert_eq!(letters_to_col("A").unwrap(), 0);
        assert_eq!(letters_to_col("Z").unwrap(), 25);
        assert_eq!(letters_to_col("AA").unwrap(), 26);
        assert_eq!(letters_to_col("xfd").unwrap(), 16383);
        assert!(letters_to_col("").is_err());
        assert!(letters_to_col("A1").is_err());
    }

    #[test]
    fn test_span_names() {
        assert_eq!(cols_name(0, 2), "A:C");
        assert_eq!(cols_name(3, 3), "D");
        assert_eq!(rows_name(0, 2), "1:3");
        assert_eq!(rows_name(9, 9), "10");
    }

    #[test]
    fn test_cell_pos_parse() {
        assert_eq!(CellPos::parse("A1").unwrap(), CellPos::new(0, 0));
        assert_eq!(CellPos::parse("b2").unwrap(), CellPos::new(1, 1));
        assert_eq!(CellPos::parse("XFD1048576").unwrap(), CellPos::new(16383, 1048575));

        assert!(CellPos::parse("").is_err());
        assert!(CellPos::parse("A").is_err());
        assert!(CellPos::parse("1").is_err());
        assert!(CellPos::parse("A0").is_err());
        assert!(CellPos::parse("$A$1").is_err());
    }

    #[test]
    fn test_range_init() {
        let r = CellRange::init(1, 2, 3, 4).unwrap();
        assert_eq!(r.start, CellPos::new(1, 2));
        assert_eq!(r.end, CellPos::new(3, 4));
        assert_eq!(r.col_count(), 3);
        assert_eq!(r.row_count(), 3);
    }

    #[test]
    fn test_range_init_errors() {
        assert_eq!(
            CellRange::init(16384, 0, 16384, 0),
            Err(Error::ColumnOutOfBounds(16384, 16383))
        );
        assert_eq!(
            CellRange::init_in(&SheetSize::LEGACY, 0, 0, 0, 65536),
            Err(Error::RowOutOfBounds(65536, 65535))
        );
        assert!(matches!(
            CellRange::init(3, 0, 1, 0),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_range_as_string() {
        assert_eq!(CellRange::init(0, 0, 0, 0).unwrap().as_string(), "A1");
        assert_eq!(CellRange::init(1, 2, 3, 4).unwrap().as_string(), "B3:D5");
        assert_eq!(CellRange::init(0, 0, 1, 3).unwrap().to_string(), "A1:B4");
    }

    #[test]
    fn test_range_parse() {
        let r = CellRange::parse("A1:B4").unwrap();
        assert_eq!(r.tuple(), (0, 0, 1, 3));

        let r: CellRange = "C3".parse().unwrap();
        assert!(r.is_singleton());
        assert_eq!(r.tuple(), (2, 2, 2, 2));

        assert!(CellRange::parse("B2:A1").is_err());
        assert!(CellRange::parse("A1:").is_err());
    }

    #[test]
    fn test_range_contains() {
        let r = CellRange::parse("B2:D4").unwrap();
        assert!(r.contains(CellPos::new(1, 1)));
        assert!(r.contains(CellPos::new(3, 3)));
        assert!(!r.contains(CellPos::new(0, 0)));
        assert!(!r.contains(CellPos::new(1, 4)));
    }
}
