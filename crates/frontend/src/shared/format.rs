//! Number formatting for KPI tiles, totals, and table cells.
//!
//! Summation keeps full precision; rounding to two decimals happens here,
//! at render time only.

/// Format a number with a thousands separator (space) and the given number
/// of decimal places.
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        _ => format!("{:.2}", value),
    };

    let parts: Vec<&str> = formatted.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    // Insert spaces every 3 digits from the end of the integer part
    let mut result = String::new();
    let chars: Vec<char> = integer_part.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 && *c != '-' {
            result.push(' ');
        }
        result.push(*c);
    }
    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Money: two decimals, thousands separated
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Whole quantity, thousands separated
pub fn format_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Percentage with two decimals, e.g. "12.50%"
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.891), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
    }

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(1234567.0), "1 234 567");
        assert_eq!(format_int(0.0), "0");
        assert_eq!(format_int(-1234.0), "-1 234");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(12.5), "12.50%");
        assert_eq!(format_pct(0.0), "0.00%");
    }
}
