//! Cell and range references carried inside values

use super::address::{col_name, row_name, CellPos};
use std::fmt;

/// A reference to one cell, optionally on a named sheet
///
/// Each axis is either relative or absolute (`$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Sheet the reference points into, if not the current one
    pub sheet: Option<String>,
    /// Column index
    pub col: u32,
    /// Row index
    pub row: u32,
    /// Whether the column is relative (no `$`)
    pub col_relative: bool,
    /// Whether the row is relative (no `$`)
    pub row_relative: bool,
}

impl CellRef {
    /// Relative reference to a position on the current sheet
    pub fn relative(col: u32, row: u32) -> Self {
        Self {
            sheet: None,
            col,
            row,
            col_relative: true,
            row_relative: true,
        }
    }

    /// Absolute reference (`$A$1`) to a position on the current sheet
    pub fn absolute(col: u32, row: u32) -> Self {
        Self {
            sheet: None,
            col,
            row,
            col_relative: false,
            row_relative: false,
        }
    }

    /// Attach a sheet name
    pub fn on_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// The referenced position
    pub fn pos(&self) -> CellPos {
        CellPos::new(self.col, self.row)
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.col_relative {
            f.write_str("$")?;
        }
        f.write_str(&col_name(self.col))?;
        if !self.row_relative {
            f.write_str("$")?;
        }
        f.write_str(&row_name(self.row))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", quote_sheet_name(sheet))?;
        }
        self.write_cell(f)
    }
}

/// A reference to a block of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRef {
    /// First corner
    pub a: CellRef,
    /// Second corner
    pub b: CellRef,
}

impl RangeRef {
    /// Create a range reference from two corners
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.a)?;

        // The second corner is only spelled out when it differs from the first
        if self.a != self.b {
            f.write_str(":")?;
            if self.b.sheet.is_some() && self.b.sheet != self.a.sheet {
                write!(f, "{}", self.b)?;
            } else {
                self.b.write_cell(f)?;
            }
        }
        Ok(())
    }
}

/// Quote a sheet name when it would not survive as a bare identifier
fn quote_sheet_name(name: &str) -> String {
    let bare = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if bare {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref_display() {
        assert_eq!(CellRef::relative(0, 0).to_string(), "A1");
        assert_eq!(CellRef::absolute(1, 9).to_string(), "$B$10");
        assert_eq!(
            CellRef::relative(2, 2).on_sheet("Sheet1").to_string(),
            "Sheet1!C3"
        );
        assert_eq!(
            CellRef::relative(0, 0).on_sheet("My Data").to_string(),
            "'My Data'!A1"
        );
    }

    #[test]
    fn test_range_ref_display() {
        let r = RangeRef::new(CellRef::relative(0, 0), CellRef::relative(1, 3));
        assert_eq!(r.to_string(), "A1:B4");

        let r = RangeRef::new(
            CellRef::absolute(0, 0).on_sheet("Data"),
            CellRef::absolute(2, 4).on_sheet("Data"),
        );
        assert_eq!(r.to_string(), "Data!$A$1:$C$5");

        let same = CellRef::relative(3, 3);
        assert_eq!(RangeRef::new(same.clone(), same).to_string(), "D4");
    }
}
