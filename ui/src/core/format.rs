//! Formatting helpers for presenting confidence values.

/// Display text for a 0–1 confidence, two decimals (`0.8732` → `87.32%`).
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Bar width in whole percent, rounded and clamped to `0..=100`.
pub fn confidence_bar_width(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_text_has_two_decimals() {
        assert_eq!(format_confidence(0.8732), "87.32%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.0), "0.00%");
    }

    #[test]
    fn bar_width_rounds_to_nearest() {
        assert_eq!(confidence_bar_width(0.8732), 87);
        assert_eq!(confidence_bar_width(0.875), 88);
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(confidence_bar_width(1.7), 100);
        assert_eq!(confidence_bar_width(-0.2), 0);
        assert_eq!(confidence_bar_width(f64::NAN), 0);
    }
}
