//! Text rendering of record values.
//!
//! Values are printed the way a C++ `std::ostream` prints a `float` with default
//! flags: `%g` style with six significant digits and trailing zeros removed.

/// Significant digits used for text output
const SIGNIFICANT_DIGITS: usize = 6;

/// Format a value in `%g` notation with six significant digits.
///
/// ```
/// use mille::writer::format_general;
///
/// assert_eq!(format_general(0.01), "0.01");
/// assert_eq!(format_general(2.5), "2.5");
/// assert_eq!(format_general(1e-5), "1e-05");
/// assert_eq!(format_general(1234567.0), "1.23457e+06");
/// assert_eq!(format_general(-3.0), "-3");
/// ```
pub fn format_general(value: f32) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first; the exponent after rounding decides the style
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Strip trailing zeros of a fractional part, and the dot if nothing remains
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_general(0.001), "0.001");
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(100000.0), "100000");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(3.14159265), "3.14159");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_general(1000000.0), "1e+06");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(-2.5e-7), "-2.5e-07");
        assert_eq!(format_general(1.0e20), "1e+20");
    }

    #[test]
    fn test_rounding_promotes_exponent() {
        // 999999.7 rounds to 1.00000e6 and switches to scientific notation
        assert_eq!(format_general(999999.7), "1e+06");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(-0.0), "-0");
        assert_eq!(format_general(f32::INFINITY), "inf");
        assert_eq!(format_general(f32::NEG_INFINITY), "-inf");
        assert_eq!(format_general(f32::NAN), "nan");
    }
}
