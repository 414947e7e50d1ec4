//! Human-readable USD amounts.
//!
//! Market cap, volume and liquidity are shown in compact form ("$1.23M");
//! prices are shown with ten decimals. The parse helpers invert these so
//! screening can compare already formatted tokens.

/// Format an amount with a B/M/K suffix, two decimals, `$` prefix.
///
/// ```
/// use token_screener_mcp::domain::format_compact_usd;
///
/// assert_eq!(format_compact_usd(1_500_000_000.0), "$1.50B");
/// assert_eq!(format_compact_usd(42.0), "$42.00");
/// ```
pub fn format_compact_usd(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// Price shown when upstream has no usable price.
pub const MISSING_PRICE: &str = "$0.000000";

/// Format an upstream decimal-string price as `$` plus ten decimals.
///
/// Trailing garbage after a numeric prefix is ignored. A missing price, or
/// one without a numeric prefix, yields [`MISSING_PRICE`].
pub fn format_price(price_usd: Option<&str>) -> String {
    match price_usd.and_then(leading_number) {
        Some(price) if price.is_finite() => format!("${:.10}", price),
        _ => MISSING_PRICE.to_string(),
    }
}

/// Numeric value of a formatted price (`"$0.0012300000"` → 0.00123).
pub fn parse_price(price: &str) -> Option<f64> {
    leading_number(&strip_currency(price))
}

/// Numeric value of a compact amount (`"$1.50B"` → 1.5e9).
///
/// The suffix is detected anywhere in the string, checked in B, M, K order.
pub fn parse_compact_usd(amount: &str) -> Option<f64> {
    let value = leading_number(&strip_currency(amount))?;
    let scale = if amount.contains('B') {
        1e9
    } else if amount.contains('M') {
        1e6
    } else if amount.contains('K') {
        1e3
    } else {
        1.0
    };
    Some(value * scale)
}

fn strip_currency(raw: &str) -> String {
    raw.chars().filter(|c| *c != '$' && *c != ',').collect()
}

// Longest prefix that parses as a number, so "1.50B" gives 1.5 and
// "0.1abc" gives 0.1.
fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let candidate = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    (1..=candidate)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
}
