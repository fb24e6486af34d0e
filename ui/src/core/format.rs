//! Formatting helpers for presenting metrics.

use crate::explore::selection::MetricType;

/// Tooltip / label formatting for a bar value.
pub fn format_metric(metric: MetricType, value: f64) -> String {
    match metric {
        MetricType::Average => format_currency(value),
        MetricType::Count => format_count(value),
    }
}

pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    format!("${value:.2}")
}

pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    format!("{value:.0}")
}

/// Y-axis tick labels: whole dollars for averages, bare numbers for counts.
pub fn format_tick(metric: MetricType, value: f64) -> String {
    match metric {
        MetricType::Average => format!("${value:.0}"),
        MetricType::Count => format_number(value),
    }
}

/// Trims trailing zeros so axis ticks like `2.5` and `40` read naturally.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_formatting_follows_metric_type() {
        assert_eq!(format_metric(MetricType::Average, 59.764), "$59.76");
        assert_eq!(format_metric(MetricType::Count, 12.0), "12");
    }

    #[test]
    fn ticks_drop_cents_and_trailing_zeros() {
        assert_eq!(format_tick(MetricType::Average, 40.0), "$40");
        assert_eq!(format_tick(MetricType::Count, 2.5), "2.5");
        assert_eq!(format_tick(MetricType::Count, 300.0), "300");
    }

    #[test]
    fn non_finite_values_render_as_dash() {
        assert_eq!(format_currency(f64::NAN), "—");
        assert_eq!(format_number(f64::INFINITY), "—");
    }
}
