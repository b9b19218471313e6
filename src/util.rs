// Utility helpers for parsing and basic statistics.
//
// This module centralizes the CSV/number/date handling so the rest of the
// code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Trim a text field, treating blank cells as missing.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    let s = s?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = non_blank(s)?;
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = non_blank(s)?;
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    // Integer columns written by spreadsheet tools sometimes come out as `12.0`.
    let f = parse_f64_safe(Some(s))?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // CSV dates are expected in `YYYY-MM-DD` format; a trailing time part
    // (`YYYY-MM-DD HH:MM:SS`) is tolerated and dropped.
    let s = non_blank(s)?;
    let date_part = s.split_whitespace().next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Round to `decimals` places, ties to even (`2.25` -> `2.2`).
pub fn round_to(v: f64, decimals: i32) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (v * factor).round_ties_even() / factor
}

/// Format with fixed decimal places plus locale-aware thousands separators
/// (e.g., `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g., `5,000 complaints`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_with_separators_and_rejects_text() {
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn parses_whole_floats_as_u32() {
        assert_eq!(parse_u32_safe(Some("12")), Some(12));
        assert_eq!(parse_u32_safe(Some("12.0")), Some(12));
        assert_eq!(parse_u32_safe(Some("12.5")), None);
        assert_eq!(parse_u32_safe(Some("-3")), None);
    }

    #[test]
    fn parses_dates_with_optional_time() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date_safe(Some("2024-03-09")), Some(d));
        assert_eq!(parse_date_safe(Some("2024-03-09 00:00:00")), Some(d));
        assert_eq!(parse_date_safe(Some("09/03/2024")), None);
        assert_eq!(parse_date_safe(Some("  ")), None);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn rounds_exact_halves_to_even() {
        assert_eq!(round_to(2.25, 1), 2.2);
        assert_eq!(round_to(3.125, 2), 3.12);
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(66.75, 1), 66.8);
    }

    #[test]
    fn rounds_and_formats() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.26, 1), 2.3);
        assert_eq!(round_to(f64::NAN, 1), 0.0);
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-0.5, 1), "-0.5");
        assert_eq!(format_number(0.0, 1), "0.0");
        assert_eq!(format_int(5000usize), "5,000");
    }
}
