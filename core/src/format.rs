//! Number formatting shared by the bar, donut and table views.
//!
//! All three formatters round half up: ties go toward positive infinity,
//! so 12.5 → 13 and -12.5 → -12.

pub const CURRENCY_SYMBOL: &str = "$";

/// Round to the nearest integer, ties toward +∞.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // Collapse -0.0 so it never prints as "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `1234567.4 → "$1,234,567"`. Negative values render as `-$1,234`.
pub fn format_money(value: f64) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(&digits))
}

/// `0.4567 → "46%"`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", round_half_up(fraction * 100.0))
}

/// `87654 → "$88K"`.
pub fn format_compact_thousands(value: f64) -> String {
    let thousands = round_half_up(value / 1000.0);
    if thousands < 0.0 {
        format!("-{CURRENCY_SYMBOL}{:.0}K", thousands.abs())
    } else {
        format!("{CURRENCY_SYMBOL}{thousands:.0}K")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(1_234_567.0), "$1,234,567");
        assert_eq!(format_money(999.0), "$999");
        assert_eq!(format_money(1000.0), "$1,000");
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(100_000.0), "$100,000");
    }

    #[test]
    fn money_rounds_half_up() {
        assert_eq!(format_money(0.5), "$1");
        assert_eq!(format_money(1_234.49), "$1,234");
        assert_eq!(format_money(999.5), "$1,000");
        assert_eq!(format_money(-0.2), "$0");
        assert_eq!(format_money(-1_234.6), "-$1,235");
    }

    #[test]
    fn percent_pins_tie_behaviour() {
        assert_eq!(format_percent(0.4567), "46%");
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_percent(0.125), "13%");
        assert_eq!(format_percent(0.375), "38%");
        assert_eq!(format_percent(-0.125), "-12%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn compact_thousands() {
        assert_eq!(format_compact_thousands(87_654.0), "$88K");
        assert_eq!(format_compact_thousands(2_500.0), "$3K");
        assert_eq!(format_compact_thousands(499.0), "$0K");
        assert_eq!(format_compact_thousands(1_250_000.0), "$1250K");
        assert_eq!(format_compact_thousands(-3_600.0), "-$4K");
    }

    #[test]
    fn round_half_up_ties() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.4), 0.0);
        assert!(round_half_up(-0.4).is_sign_positive());
    }
}
