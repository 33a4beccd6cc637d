//! Display formatting for amounts

/// Rendered in place of a value when no data contributed to it
pub const PLACEHOLDER: &str = "-";

/// Thousands separator of rendered amounts
pub const THOUSANDS_SEPARATOR: char = ' ';

/// Format an amount with no decimals and space-grouped thousands:
/// `1234567.4` → `"1 234 567"`.
///
/// Non-finite values render as the placeholder.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let digits = format!("{:.0}", value.abs());
    let grouped = group_thousands(&digits);
    if value < 0.0 && digits.bytes().any(|b| b != b'0') {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a summed amount; `None` (no contributing data) is the placeholder
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format_amount(v),
        None => PLACEHOLDER.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}
