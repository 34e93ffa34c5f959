// Display strings shared by the dashboard, CLI and API

/// `1234567.891` → `"1,234,567.89"`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

pub fn estimate_line(price: f64, units: &str) -> String {
    format!("Estimated Price: ₹ {} {}", format_amount(price), units)
}

pub fn selection_mean_line(mean: f64) -> String {
    format!("Average Price per sqft : ₹ {} /sqft", format_amount(mean))
}

/// Marker popup text for one region
pub fn popup_line(median: Option<f64>) -> String {
    match median {
        Some(price) => format!("Avg Price: ₹ {}/sqft", format_amount(price)),
        None => "No price data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-4321.5), "-4,321.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_output_lines() {
        assert_eq!(estimate_line(152.456, "Lakhs"), "Estimated Price: ₹ 152.46 Lakhs");
        assert_eq!(selection_mean_line(23000.0), "Average Price per sqft : ₹ 23,000.00 /sqft");
        assert_eq!(popup_line(None), "No price data");
        assert_eq!(popup_line(Some(18500.0)), "Avg Price: ₹ 18,500.00/sqft");
    }
}
