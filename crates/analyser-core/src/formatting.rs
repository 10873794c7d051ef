//! Number formatting shared by the aggregation engine and the report renderer.

/// Format a count with thousands separators.
///
/// # Examples
///
/// ```
/// use analyser_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Exact halves round to the even neighbour, so 1 of 32 is `3.12`.
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use analyser_core::formatting::percentage;
///
/// assert_eq!(percentage(1, 3, 2), 33.33);
/// assert_eq!(percentage(0, 0, 2), 0.0);
/// ```
pub fn percentage(part: usize, whole: usize, decimal_places: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 / whole as f64) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    let scaled = raw * factor;
    let mut rounded = scaled.round();
    if (scaled - scaled.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / factor
}

/// Render a percentage with two decimals and a `%` suffix, e.g. `"66.67%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count_small() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_exact_thousands() {
        assert_eq!(format_count(1_000), "1,000");
    }

    #[test]
    fn test_format_count_millions() {
        assert_eq!(format_count(12_345_678), "12,345,678");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(50, 200, 2), 25.0);
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10, 0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3, 2), 66.67);
        assert_eq!(percentage(1, 7, 2), 14.29);
    }

    #[test]
    fn test_percentage_halves_round_to_even() {
        assert_eq!(percentage(1, 32, 2), 3.12);
        assert_eq!(percentage(3, 32, 2), 9.38);
        assert_eq!(percentage(1, 8, 0), 12.0);
        assert_eq!(percentage(3, 8, 0), 38.0);
    }

    #[test]
    fn test_percentage_full() {
        assert_eq!(percentage(4, 4, 2), 100.0);
    }

    // ── format_percentage ────────────────────────────────────────────────────

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(66.67), "66.67%");
        assert_eq!(format_percentage(25.0), "25.00%");
    }
}
