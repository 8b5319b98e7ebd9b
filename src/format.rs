// Number Formatter - 2-decimal display text for index values

use crate::error::{DashboardError, Result};

/// Round to 2 decimals and render with the shortest representation.
///
/// Rounding uses the exact binary value (`3.145` -> `"3.15"`,
/// `2.675` -> `"2.67"`). Output always keeps a decimal point
/// (`0.0` -> `"0.0"`, `2.5` -> `"2.5"`). Negative zero prints as `"0.0"`.
/// Magnitudes of 1e16 and above use Rust's exponent form (`"1e16"`, not
/// `"1e+16"`).
pub fn format_number(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(DashboardError::FormatError { value });
    }

    let rounded: f64 = format!("{:.2}", value)
        .parse()
        .map_err(|_| DashboardError::FormatError { value })?;

    // -0.0 == 0.0
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    Ok(format!("{:?}", rounded))
}

/// Formatted value, or `placeholder` when the value can't be formatted
pub fn format_or(value: f64, placeholder: &str) -> String {
    format_number(value).unwrap_or_else(|_| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(format_number(3.14159).unwrap(), "3.14");
        assert_eq!(format_number(53.456).unwrap(), "53.46");
    }

    #[test]
    fn test_rounding_follows_binary_value() {
        // 3.145 is stored slightly above the midpoint, 2.675 slightly below
        assert_eq!(format_number(3.145).unwrap(), "3.15");
        assert_eq!(format_number(2.675).unwrap(), "2.67");
    }

    #[test]
    fn test_keeps_decimal_point() {
        assert_eq!(format_number(0.0).unwrap(), "0.0");
        assert_eq!(format_number(42.0).unwrap(), "42.0");
        assert_eq!(format_number(2.5).unwrap(), "2.5");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_number(-0.5).unwrap(), "-0.5");
        assert_eq!(format_number(-1.234).unwrap(), "-1.23");
        assert_eq!(format_number(-0.001).unwrap(), "0.0");
    }

    #[test]
    fn test_non_finite_is_format_error() {
        assert!(matches!(
            format_number(f64::NAN),
            Err(DashboardError::FormatError { .. })
        ));
        assert!(format_number(f64::INFINITY).is_err());
        assert_eq!(format_or(f64::NEG_INFINITY, "-"), "-");
    }

    #[test]
    fn test_float_noise_is_hidden() {
        // 45.0 - 44.4 is not exactly 0.6
        assert_eq!(format_number(45.0 - 44.4).unwrap(), "0.6");
    }

    #[test]
    fn test_large_values_use_exponent_form() {
        assert_eq!(format_number(1e15).unwrap(), "1000000000000000.0");
        assert_eq!(format_number(1e16).unwrap(), "1e16");
    }
}
