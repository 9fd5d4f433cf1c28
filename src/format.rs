//! Textual rendering of numbers and sequences.
//!
//! Numbers are printed the way a calculator display shows them: integral
//! values have no fractional part, other values use the shortest decimal that
//! round-trips, and very large or very small magnitudes switch to exponent
//! notation with an explicit sign.

/// Separator used between the terms of a rendered sequence.
pub const SEPARATOR: &str = ", ";

/// Format a single number for display.
///
/// # Examples
///
/// ```
/// use amath::format_number;
///
/// assert_eq!(format_number(14.0), "14");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        // also covers -0
        return "0".into();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => scientific,
    }
}

/// Join the terms of a sequence with [`SEPARATOR`].
///
/// ```
/// assert_eq!(amath::format::join(&[1.0, 3.0, 5.5]), "1, 3, 5.5");
/// assert_eq!(amath::format::join(&[]), "");
/// ```
#[must_use]
pub fn join(terms: &[f64]) -> String {
    terms
        .iter()
        .map(|&term| format_number(term))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
