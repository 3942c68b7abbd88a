//! Formatting helpers for presenting marks and study time.

/// Whole numbers print without a fraction; everything else keeps up to two decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_hours(value: f64) -> String {
    format!("{} hrs", format_number(value))
}
