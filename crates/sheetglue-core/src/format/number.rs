//! Numeric format codes (`0.00`, `#,##0`, `0%`, `0.00E+00`)

use super::general::format_exponent;
use crate::error::{Error, Result};

/// A parsed numeric section: literal prefix, digit pattern, literal suffix
#[derive(Debug, Clone, PartialEq)]
struct NumberPattern {
    prefix: String,
    suffix: String,
    decimals: usize,
    thousands: bool,
    percent: bool,
    exponent: bool,
}

impl NumberPattern {
    fn parse(code: &str) -> Result<Self> {
        let code = code.to_string();
        let is_digit_char = |c: char| matches!(c, '#' | '0' | '?' | ',' | '.');

        let start = code
            .find(is_digit_char)
            .ok_or_else(|| Error::InvalidFormat(code.clone()))?;
        let mut end = code[start..]
            .find(|c: char| !is_digit_char(c))
            .map_or(code.len(), |i| start + i);

        let body = &code[start..end];
        let mut exponent = false;
        if code[end..].starts_with("E+") || code[end..].starts_with("E-") {
            let digits = code[end + 2..]
                .find(|c: char| c != '0')
                .map_or(code.len() - end - 2, |i| i);
            if digits == 0 {
                return Err(Error::InvalidFormat(code.clone()));
            }
            exponent = true;
            end += 2 + digits;
        }

        let suffix = literal(&code[end..]);
        if suffix.contains(|c: char| matches!(c, '#' | '0' | '?' | '/')) {
            return Err(Error::InvalidFormat(code.clone()));
        }

        let decimals = match body.split_once('.') {
            Some((_, frac)) => frac.chars().filter(|c| matches!(c, '0' | '#' | '?')).count(),
            None => 0,
        };

        Ok(Self {
            prefix: literal(&code[..start]),
            percent: suffix.contains('%'),
            suffix,
            decimals,
            thousands: body.split('.').next().is_some_and(|int| int.contains(',')),
            exponent,
        })
    }

    fn apply(&self, n: f64) -> String {
        let n = if self.percent { n * 100.0 } else { n };

        let digits = if self.exponent {
            format_exponent(n, self.decimals, false)
        } else {
            let fixed = format!("{:.*}", self.decimals, n);
            if self.thousands {
                group_thousands(&fixed)
            } else {
                fixed
            }
        };

        format!("{}{}{}", self.prefix, digits, self.suffix)
    }
}

/// Resolve quoting and escapes in a literal run
fn literal(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {}
            '\\' | '_' => {
                if let Some(next) = chars.next() {
                    // `_x` pads with the width of `x`
                    out.push(if c == '_' { ' ' } else { next });
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Insert `,` every three digits of the integer part of a formatted number
fn group_thousands(fixed: &str) -> String {
    let (sign, rest) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int, frac) = match rest.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Apply a numeric section to `n`
pub fn format_number(n: f64, code: &str) -> Result<String> {
    Ok(NumberPattern::parse(code)?.apply(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed() {
        assert_eq!(format_number(3.14159, "0").unwrap(), "3");
        assert_eq!(format_number(3.14159, "0.00").unwrap(), "3.14");
        assert_eq!(format_number(-2.5, "0.000").unwrap(), "-2.500");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_number(1234567.891, "#,##0").unwrap(), "1,234,568");
        assert_eq!(format_number(1234.5, "#,##0.00").unwrap(), "1,234.50");
        assert_eq!(format_number(-999.0, "#,##0").unwrap(), "-999");
        assert_eq!(format_number(-1000.0, "#,##0").unwrap(), "-1,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_number(0.256, "0%").unwrap(), "26%");
        assert_eq!(format_number(0.256, "0.00%").unwrap(), "25.60%");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(12345.0, "0.00E+00").unwrap(), "1.23E+04");
    }

    #[test]
    fn test_literals() {
        assert_eq!(format_number(5.0, "\"$\"0.00").unwrap(), "$5.00");
        assert_eq!(format_number(5.0, "0.0\" units\"").unwrap(), "5.0 units");
        assert_eq!(format_number(5.0, "(#,##0)").unwrap(), "(5)");
    }

    #[test]
    fn test_unsupported() {
        assert!(format_number(0.5, "# ?/?").is_err());
        assert!(format_number(1.0, "\"text\"").is_err());
    }
}
