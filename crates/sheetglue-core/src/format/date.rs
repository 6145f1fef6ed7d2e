//! Date and time format codes

use crate::error::{Error, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Largest serial that still maps to a date (9999-12-31)
const MAX_SERIAL: f64 = 2_958_466.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Split a serial number into a calendar date and seconds past midnight
///
/// Serials follow the 1900 date system: 1 is 1900-01-01 and 61 is
/// 1900-03-01. Serial 60 stands for 1900-02-29, which never existed; it
/// renders as 1900-02-28.
pub fn serial_to_datetime(serial: f64) -> Result<(NaiveDate, u32)> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL).contains(&serial) {
        return Err(Error::DateOutOfRange(serial));
    }

    let mut days = serial.floor() as u64;
    let mut seconds = ((serial - serial.floor()) * SECONDS_PER_DAY).round() as u32;
    if seconds >= SECONDS_PER_DAY as u32 {
        seconds = 0;
        days += 1;
    }

    if days == 60 {
        tracing::warn!("serial 60 names 1900-02-29, rendering 1900-02-28");
    }

    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)
    };

    let date = base
        .and_then(|b| b.checked_add_days(Days::new(days)))
        .ok_or(Error::DateOutOfRange(serial))?;
    Ok((date, seconds))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Year(usize),
    Month(usize),
    Day(usize),
    Hour(usize),
    Minute(usize),
    Second(usize),
    AmPm,
    /// `0`, `#` or `?` outside quotes
    Placeholder,
    Literal(String),
}

fn tokenize(code: &str) -> Vec<Token> {
    let chars: Vec<char> = code.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let lower = c.to_ascii_lowercase();

        if matches!(lower, 'y' | 'm' | 'd' | 'h' | 's') {
            let start = i;
            while i < chars.len() && chars[i].to_ascii_lowercase() == lower {
                i += 1;
            }
            let len = i - start;
            tokens.push(match lower {
                'y' => Token::Year(len),
                'm' => Token::Month(len),
                'd' => Token::Day(len),
                'h' => Token::Hour(len),
                _ => Token::Second(len),
            });
            continue;
        }

        if lower == 'a' {
            let rest: String = chars[i..].iter().take(5).collect();
            if rest.eq_ignore_ascii_case("am/pm") {
                tokens.push(Token::AmPm);
                i += 5;
                continue;
            }
        }

        match c {
            '0' | '#' | '?' => {
                tokens.push(Token::Placeholder);
                i += 1;
            }
            '"' => {
                let start = i + 1;
                i = start;
                while i < chars.len() && chars[i] != '"' {
                    i += 1;
                }
                tokens.push(Token::Literal(chars[start..i].iter().collect()));
                i += 1;
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    tokens.push(Token::Literal(next.to_string()));
                }
                i += 2;
            }
            _ => {
                tokens.push(Token::Literal(c.to_string()));
                i += 1;
            }
        }
    }

    resolve_minutes(&mut tokens);
    tokens
}

/// `m`/`mm` means minutes right after an hour or right before a second
fn resolve_minutes(tokens: &mut [Token]) {
    let is_field = |t: &Token| !matches!(t, Token::Literal(_) | Token::Placeholder);

    for i in 0..tokens.len() {
        let len = match tokens[i] {
            Token::Month(len) if len <= 2 => len,
            _ => continue,
        };

        let prev = tokens[..i].iter().rev().find(|t| is_field(t));
        let next = tokens[i + 1..].iter().find(|t| is_field(t));
        if matches!(prev, Some(Token::Hour(_))) || matches!(next, Some(Token::Second(_))) {
            tokens[i] = Token::Minute(len);
        }
    }
}

/// Whether a format code contains date or time fields
pub fn is_date_code(code: &str) -> bool {
    tokenize(code)
        .iter()
        .any(|t| !matches!(t, Token::Literal(_) | Token::Placeholder))
}

/// Apply a date/time format code to a serial number
///
/// Fractional seconds (`ss.000`) and other digit placeholders are not
/// supported.
pub fn format_date(serial: f64, code: &str) -> Result<String> {
    let tokens = tokenize(code);
    if tokens.contains(&Token::Placeholder) {
        return Err(Error::InvalidFormat(code.to_string()));
    }

    let (date, seconds) = serial_to_datetime(serial)?;
    let twelve_hour = tokens.contains(&Token::AmPm);

    let hour = seconds / 3600;
    let minute = (seconds / 60) % 60;
    let second = seconds % 60;

    let mut out = String::new();
    for token in &tokens {
        match token {
            Token::Year(len) if *len <= 2 => out.push_str(&format!("{:02}", date.year() % 100)),
            Token::Year(_) => out.push_str(&format!("{:04}", date.year())),
            Token::Month(1) => out.push_str(&date.month().to_string()),
            Token::Month(2) => out.push_str(&format!("{:02}", date.month())),
            Token::Month(3) => out.push_str(&MONTHS[date.month0() as usize][..3]),
            Token::Month(_) => out.push_str(MONTHS[date.month0() as usize]),
            Token::Day(1) => out.push_str(&date.day().to_string()),
            Token::Day(2) => out.push_str(&format!("{:02}", date.day())),
            Token::Day(3) => {
                out.push_str(&WEEKDAYS[date.weekday().num_days_from_monday() as usize][..3])
            }
            Token::Day(_) => {
                out.push_str(WEEKDAYS[date.weekday().num_days_from_monday() as usize])
            }
            Token::Hour(len) => {
                let h = if twelve_hour {
                    match hour % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    hour
                };
                if *len == 1 {
                    out.push_str(&h.to_string());
                } else {
                    out.push_str(&format!("{:02}", h));
                }
            }
            Token::Minute(1) => out.push_str(&minute.to_string()),
            Token::Minute(_) => out.push_str(&format!("{:02}", minute)),
            Token::Second(1) => out.push_str(&second.to_string()),
            Token::Second(_) => out.push_str(&format!("{:02}", second)),
            Token::AmPm => out.push_str(if hour < 12 { "AM" } else { "PM" }),
            Token::Literal(s) => out.push_str(s),
            Token::Placeholder => {}
        }
    }

    Ok(out)
}
