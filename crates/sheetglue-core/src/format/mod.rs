//! Number formats attached to values
//!
//! - [`NumberFormat`] - General, built-in by ID, or a custom format code
//! - [`format_general`] - the engine's default rendering of numbers

mod date;
mod general;
mod number;

pub use date::serial_to_datetime;
pub use general::{format_exponent, format_general, GENERAL_DIGITS};

use crate::error::{Error, Result};

/// Number format for value display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 1 - 0
    pub const ID_NUMBER_INT: u32 = 1;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 3 - #,##0
    pub const ID_NUMBER_SEP: u32 = 3;
    /// 4 - #,##0.00
    pub const ID_NUMBER_SEP_DEC2: u32 = 4;
    /// 9 - 0%
    pub const ID_PERCENT_INT: u32 = 9;
    /// 10 - 0.00%
    pub const ID_PERCENT_DEC2: u32 = 10;
    /// 11 - 0.00E+00
    pub const ID_SCIENTIFIC: u32 = 11;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 20 - h:mm
    pub const ID_TIME_24H: u32 = 20;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a number format from a format string
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        NumberFormat::Custom(format.into())
    }

    /// Create a built-in format by ID
    pub fn from_id(id: u32) -> Self {
        NumberFormat::BuiltIn(id)
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(s) => s,
        }
    }

    /// Get built-in format string by ID
    fn builtin_format_string(id: u32) -> &'static str {
        match id {
            0 => "General",
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            12 => "# ?/?",
            13 => "# ??/??",
            14 => "mm-dd-yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            37 => "#,##0 ;(#,##0)",
            38 => "#,##0 ;[Red](#,##0)",
            39 => "#,##0.00;(#,##0.00)",
            40 => "#,##0.00;[Red](#,##0.00)",
            49 => "@",
            _ => "General",
        }
    }

    /// Whether this is the General format (or an alias of it, like `[Red]General`)
    pub fn is_general(&self) -> bool {
        self.first_section().is_ok_and(|s| is_general_code(&s))
    }

    /// Whether this is the text format (`@`)
    pub fn is_text(&self) -> bool {
        self.format_string() == "@"
    }

    /// Check if this is a date/time format
    pub fn is_date_format(&self) -> bool {
        self.first_section()
            .is_ok_and(|s| !is_general_code(&s) && date::is_date_code(&s))
    }

    fn first_section(&self) -> Result<String> {
        let code = self.format_string();
        strip_modifiers(code.split(';').next().unwrap_or(code))
    }

    /// Render a number with this format
    ///
    /// A second `;`-separated section, when present, is used for negative
    /// numbers (which are then shown without their sign).
    pub fn format_number(&self, n: f64) -> Result<String> {
        let code = self.format_string();
        let mut sections = code.split(';');
        let positive = sections.next().unwrap_or(code);
        let negative = sections.next();

        let (section, n) = match negative {
            Some(neg) if n < 0.0 => (neg, -n),
            _ => (positive, n),
        };

        let section = strip_modifiers(section)?;
        if is_general_code(&section) || section == "@" {
            Ok(format_general(n))
        } else if date::is_date_code(&section) {
            date::format_date(n, &section)
        } else {
            number::format_number(n, &section)
        }
    }
}

fn is_general_code(section: &str) -> bool {
    section.eq_ignore_ascii_case("general")
}

/// Resolve the bracketed modifiers of one format section
///
/// Colours (`[Red]`) and locale tags (`[$-409]`) are dropped and a currency
/// tag (`[$€-407]`) becomes its quoted symbol. Elapsed-time fields (`[h]`)
/// and conditions (`[<100]`) are not supported.
fn strip_modifiers(section: &str) -> Result<String> {
    let mut out = String::with_capacity(section.len());
    let mut chars = section.chars();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                out.push(c);
            }
            '\\' if !quoted => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' if !quoted => {
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                if let Some(tag) = inner.strip_prefix('$') {
                    let symbol = tag.split('-').next().unwrap_or("");
                    if !symbol.is_empty() {
                        out.push('"');
                        out.push_str(symbol);
                        out.push('"');
                    }
                } else if is_elapsed(&inner)
                    || inner.starts_with(|c: char| matches!(c, '<' | '>' | '='))
                {
                    return Err(Error::InvalidFormat(section.to_string()));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// `[h]`, `[mm]`, `[ss]`: hours, minutes or seconds that do not wrap
fn is_elapsed(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| matches!(c.to_ascii_lowercase(), 'h' | 'm' | 's'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_string() {
        assert_eq!(NumberFormat::General.format_string(), "General");
        assert_eq!(NumberFormat::from_id(4).format_string(), "#,##0.00");
        assert_eq!(NumberFormat::from_id(999).format_string(), "General");
        assert_eq!(NumberFormat::from_string("0.0").format_string(), "0.0");
    }

    #[test]
    fn test_is_date_format() {
        assert!(NumberFormat::from_id(NumberFormat::ID_DATE_SHORT).is_date_format());
        assert!(NumberFormat::from_string("yyyy-mm-dd").is_date_format());
        assert!(!NumberFormat::from_id(NumberFormat::ID_NUMBER_SEP).is_date_format());
        assert!(!NumberFormat::General.is_date_format());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(NumberFormat::General.format_number(2.5).unwrap(), "2.5");
        assert_eq!(NumberFormat::from_id(2).format_number(2.5).unwrap(), "2.50");
        assert_eq!(NumberFormat::from_id(49).format_number(7.0).unwrap(), "7");
        assert_eq!(
            NumberFormat::from_id(NumberFormat::ID_DATE_SHORT)
                .format_number(45292.0)
                .unwrap(),
            "01-01-24"
        );
    }

    #[test]
    fn test_modifiers() {
        let general = NumberFormat::from_string("[Red]General");
        assert!(general.is_general());
        assert_eq!(general.format_number(45292.75).unwrap(), "45292.75");

        assert_eq!(
            NumberFormat::from_string("[Blue]0.0\" units\"")
                .format_number(5.0)
                .unwrap(),
            "5.0 units"
        );
        assert_eq!(
            NumberFormat::from_string("[$€-407]#,##0.00")
                .format_number(1234.5)
                .unwrap(),
            "€1,234.50"
        );

        let long_date = NumberFormat::from_string("[$-409]mmmm d, yyyy");
        assert!(long_date.is_date_format());
        assert_eq!(long_date.format_number(45292.75).unwrap(), "January 1, 2024");
    }

    #[test]
    fn test_red_section_is_not_a_date() {
        let fmt = NumberFormat::from_id(40);
        assert!(!fmt.is_date_format());
        assert_eq!(fmt.format_number(-1234.5).unwrap(), "(1,234.50)");
    }

    #[test]
    fn test_unsupported_codes() {
        for code in ["[h]:mm:ss", "[mm]:ss", "[<100]0;0.00", "hh:mm:ss.000", "yyyy #"] {
            let fmt = NumberFormat::from_string(code);
            assert_eq!(
                fmt.format_number(45292.75),
                Err(Error::InvalidFormat(
                    code.split(';').next().unwrap_or(code).to_string()
                )),
                "{}",
                code
            );
        }
    }

    #[test]
    fn test_negative_section() {
        let fmt = NumberFormat::from_id(39);
        assert_eq!(fmt.format_number(1234.5).unwrap(), "1,234.50");
        assert_eq!(fmt.format_number(-1234.5).unwrap(), "(1,234.50)");
    }
}
