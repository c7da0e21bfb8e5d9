use once_cell::sync::Lazy;
use regex::Regex;

// Leading decimal number, the prefix `parseFloat` would accept.
static LEADING_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

/// Parse the leading number of a CSS value such as `"24px"` or `" 1.5rem"`.
///
/// Returns `None` for values with no numeric prefix (`"normal"`, `""`).
pub fn parse_leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .captures(value)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Number of digits after the decimal point in a numeric string.
pub fn decimal_places(raw: &str) -> usize {
    raw.trim()
        .split_once('.')
        .map(|(_, frac)| frac.chars().take_while(|c| c.is_ascii_digit()).count())
        .unwrap_or(0)
}
