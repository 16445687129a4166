//! Display formatting for amounts and percentages.

/// Format an amount the way vi-VN renders VND: whole đồng, `.` as the
/// thousands separator, trailing `₫`.
pub fn format_vnd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{amount} ₫");
    }
    let rounded = amount.round() as i64;
    let grouped = group_thousands(&rounded.unsigned_abs().to_string(), '.');
    if rounded < 0 {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Two decimals with an explicit `+` on gains.
pub fn format_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(30_000_000.0), "30.000.000 ₫");
        assert_eq!(format_vnd(110_958.9), "110.959 ₫");
        assert_eq!(format_vnd(999.0), "999 ₫");
        assert_eq!(format_vnd(1_000.0), "1.000 ₫");
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(-1_234_567.0), "-1.234.567 ₫");
        assert_eq!(format_vnd(-0.4), "0 ₫");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(15.556), "+15.56%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(-3.2), "-3.20%");
    }
}
