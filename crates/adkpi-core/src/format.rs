//! Display formatting for KPI cards.

use adkpi_model::{Kpi, KpiUnit};

/// Inserts `,` between groups of three digits in an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats with `decimals` places and `,` grouping, e.g. `-1,234.50`.
fn grouped(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let mut out = String::new();
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// `R$ 1,234.56`
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", grouped(value, 2))
}

/// `12.34%`; `value` is already in percent.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Whole number with thousands separators; fractions are truncated.
pub fn format_number(value: f64) -> String {
    grouped(value.trunc(), 0)
}

/// `2.50x`
pub fn format_roas(value: f64) -> String {
    format!("{value:.2}x")
}

/// Formats `value` the way its KPI card shows it.
pub fn format_kpi(kpi: Kpi, value: f64) -> String {
    match kpi.unit() {
        KpiUnit::Count => format_number(value),
        KpiUnit::Currency => format_currency(value),
        KpiUnit::Percentage => format_percentage(value),
        KpiUnit::Ratio => format!("{value:.2}"),
        KpiUnit::Multiple => format_roas(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency() {
        assert_eq!(format_currency(1234.56), "R$ 1,234.56");
        assert_eq!(format_currency(0.0), "R$ 0.00");
        assert_eq!(format_currency(1_000_000.0), "R$ 1,000,000.00");
        assert_eq!(format_currency(-1500.5), "R$ -1,500.50");
        assert_eq!(format_currency(-0.001), "R$ 0.00");
    }

    #[test]
    fn numbers_and_ratios() {
        assert_eq!(format_number(1234.9), "1,234");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-12345.0), "-12,345");
        assert_eq!(format_percentage(12.345_6), "12.35%");
        assert_eq!(format_roas(2.5), "2.50x");
    }

    #[test]
    fn kpi_picks_unit() {
        assert_eq!(format_kpi(Kpi::Clicks, 1500.0), "1,500");
        assert_eq!(format_kpi(Kpi::TotalCost, 1500.0), "R$ 1,500.00");
        assert_eq!(format_kpi(Kpi::Ctr, 10.0), "10.00%");
        assert_eq!(format_kpi(Kpi::AverageFrequency, 1.234), "1.23");
        assert_eq!(format_kpi(Kpi::Roas, 3.0), "3.00x");
    }
}
