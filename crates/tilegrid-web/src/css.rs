#![forbid(unsafe_code)]

//! CSS length helpers.
//!
//! Computed styles report lengths as strings such as `"1000px"` or
//! `"412.5px"`. Parsing follows `parseFloat`: leading whitespace is skipped,
//! the longest numeric prefix is read, and anything after it (the unit) is
//! ignored. `Infinity` (optionally signed) is a numeric prefix too. A value
//! with no numeric prefix (`"auto"`, `""`) yields `None`.

/// Parse the numeric prefix of a CSS length.
pub fn parse_css_px(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when at least one digit follows it.
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Format a whole-pixel length for a style property.
#[inline]
pub fn format_px(px: u32) -> String {
    format!("{px}px")
}

/// Format a fractional length for a style property (`"210.5px"`).
///
/// Whole values print without a fraction, like a JS number. Non-finite
/// values format as `"0px"`.
pub fn format_fractional_px(px: f64) -> String {
    if px.is_finite() {
        format!("{px}px")
    } else {
        "0px".to_string()
    }
}
