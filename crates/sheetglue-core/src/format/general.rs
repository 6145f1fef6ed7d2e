//! The "General" rendering of numbers

/// Significant digits shown by the general format
pub const GENERAL_DIGITS: usize = 15;

/// Render a float the way the engine's general format does
///
/// Up to 15 significant digits with trailing zeros removed. Magnitudes
/// below 1e-4 or at/above 1e15 switch to exponent form (`1.5E+20`).
/// Non-finite numbers render as `#NUM!`.
pub fn format_general(n: f64) -> String {
    if !n.is_finite() {
        return "#NUM!".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let exp = n.abs().log10().floor() as i32;
    if (-4..GENERAL_DIGITS as i32).contains(&exp) {
        let decimals = (GENERAL_DIGITS as i32 - 1 - exp).max(0) as usize;
        trim_fraction(format!("{:.*}", decimals, n))
    } else {
        format_exponent(n, GENERAL_DIGITS - 1, true)
    }
}

/// Render `n` as `<mantissa>E<sign><two or more digits>`
///
/// `decimals` is the number of mantissa fraction digits; with `trim` set,
/// trailing zeros of the mantissa are removed.
pub fn format_exponent(n: f64, decimals: usize, trim: bool) -> String {
    let raw = format!("{:.*e}", decimals, n);
    let (mantissa, exponent) = match raw.split_once('e') {
        Some(parts) => parts,
        None => return raw,
    };

    let mantissa = if trim {
        trim_fraction(mantissa.to_string())
    } else {
        mantissa.to_string()
    };

    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}E{}{:02}", mantissa, sign, exponent.abs())
}

/// Drop trailing zeros after a decimal point, and the point itself
pub(crate) fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
