use rust_decimal::Decimal;

/// Format an amount with thousand separators and 2 decimal places, prefixed
/// with `symbol`. e.g. `1234567.89` → `"₹1,234,567.89"`, `-5` → `"-₹5.00"`.
pub fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Whole-number percentage, truncated toward zero: `83.9` → `"83%"`.
pub fn format_percent(val: Decimal) -> String {
    format!("{}%", val.trunc())
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
