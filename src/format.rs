//! Fixed-width rendering of numbers for table columns.

/// Center `text` in a field of `width` characters.
///
/// When the padding is odd the extra space goes left for odd widths and
/// right for even ones. Text wider than the field is returned unchanged.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Order of magnitude of `value`, with 0 for 0.
pub fn magnitude(value: f64) -> i32 {
    if value == 0.0 {
        return 0;
    }
    value.abs().log10().floor() as i32
}

/// Number of decimals worth printing for a value of the given magnitude.
fn decimals(magnitude: i32) -> usize {
    if magnitude > 1 {
        0
    } else if magnitude > -1 {
        1
    } else {
        (1 - magnitude) as usize
    }
}

/// One-decimal scientific notation with a signed, two-digit exponent
/// (`1.2e+05`, `-3.0e-07`).
pub fn scientific(value: f64) -> String {
    let raw = format!("{value:.1e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

/// Render `value` centered in `width` characters.
///
/// Precision follows the magnitude of the value; if the fixed-point form
/// does not fit, scientific notation is used instead.
pub fn format_value(value: f64, width: usize) -> String {
    if !value.is_finite() {
        return center(&value.to_string(), width);
    }
    if value == 0.0 {
        return center("0", width);
    }
    let digits = decimals(magnitude(value));
    let fixed = format!("{value:.digits$}");
    if fixed.len() > width {
        center(&scientific(value), width)
    } else {
        center(&fixed, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_matches_classic_padding() {
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("abc", 7), "  abc  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(0.0), 0);
        assert_eq!(magnitude(5.0), 0);
        assert_eq!(magnitude(-250.0), 2);
        assert_eq!(magnitude(0.05), -2);
    }

    #[test]
    fn test_precision_follows_magnitude() {
        assert_eq!(format_value(123.4, 9), "   123   ");
        assert_eq!(format_value(12.34, 9), "   12.3  ");
        assert_eq!(format_value(1.24, 9), "   1.2   ");
        assert_eq!(format_value(0.0512, 9), "  0.051  ");
    }

    #[test]
    fn test_zero_is_plain() {
        assert_eq!(format_value(0.0, 9), "    0    ");
        assert_eq!(format_value(-0.0, 5), "  0  ");
    }

    #[test]
    fn test_falls_back_to_scientific() {
        assert_eq!(format_value(123456.0, 5).trim(), "1.2e+05");
        assert_eq!(format_value(0.0000123, 9), " 0.000012");
        assert_eq!(format_value(1.23e-9, 9), " 1.2e-09 ");
        assert_eq!(scientific(-3e-7), "-3.0e-07");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_value(f64::INFINITY, 9), "   inf   ");
        assert_eq!(format_value(f64::NAN, 9), "   NaN   ");
        assert_eq!(format_value(f64::NEG_INFINITY, 9).trim(), "-inf");
    }

    #[test]
    fn test_width_is_exact_when_it_fits() {
        for value in [0.0, 1.0, -1.0, 42.5, 1e-3, 9.99e7, -123456.0, 7e-12] {
            for width in [5, 9, 12] {
                let text = format_value(value, width);
                let natural = text.trim().len();
                if natural <= width {
                    assert_eq!(text.len(), width, "{value} in {width}: {text:?}");
                }
            }
        }
    }
}
