#![forbid(unsafe_code)]

//! Pluggable value ↔ text policy for the keyboard modality.
//!
//! The controller never parses or renders numbers itself: the host
//! installs a [`ValueFormat`] and the keyboard buffer / commit path go
//! through it. [`DecimalFormat`] is the default policy.

/// Converts values to display text and parses committed text back.
///
/// `parse` returning `None` means the text is not a usable number;
/// the controller treats that as rejected input (mode and value are
/// left untouched), never as a fault.
pub trait ValueFormat {
    /// Render a value for the keyboard buffer and display.
    fn format(&self, value: f64) -> String;

    /// Parse committed text. Must reject non-finite results.
    fn parse(&self, text: &str) -> Option<f64>;
}

/// Default policy: shortest decimal display ("25", "33.25"), parse via
/// `f64` with surrounding whitespace tolerated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalFormat;

impl ValueFormat for DecimalFormat {
    fn format(&self, value: f64) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> Option<f64> {
        text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_values_format_without_fraction() {
        assert_eq!(DecimalFormat.format(25.0), "25");
        assert_eq!(DecimalFormat.format(0.0), "0");
    }

    #[test]
    fn fractional_values_keep_precision() {
        assert_eq!(DecimalFormat.format(33.25), "33.25");
        assert_eq!(DecimalFormat.format(0.5), "0.5");
    }

    #[test]
    fn parse_tolerates_whitespace() {
        assert_eq!(DecimalFormat.parse("  33.25 "), Some(33.25));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(DecimalFormat.parse("abc"), None);
        assert_eq!(DecimalFormat.parse(""), None);
        assert_eq!(DecimalFormat.parse("1.2.3"), None);
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert_eq!(DecimalFormat.parse("NaN"), None);
        assert_eq!(DecimalFormat.parse("inf"), None);
        assert_eq!(DecimalFormat.parse("-inf"), None);
    }

    #[test]
    fn format_parse_roundtrip() {
        for v in [0.0, 25.0, 33.25, -7.5, 199.5] {
            assert_eq!(DecimalFormat.parse(&DecimalFormat.format(v)), Some(v));
        }
    }
}
