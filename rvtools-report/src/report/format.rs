//! Number and text formatting for the HTML report
//!
//! Escaping is left to the template engine.

/// Round to the nearest integer and group thousands with dots (`1.234.567`)
pub fn fmt_int(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// GB figures are shown like integers
pub fn fmt_gb(value: f64) -> String {
    fmt_int(value)
}

/// Display name for an empty datacenter or host
pub fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "N/D" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_int_grouping() {
        assert_eq!(fmt_int(0.0), "0");
        assert_eq!(fmt_int(999.0), "999");
        assert_eq!(fmt_int(1000.0), "1.000");
        assert_eq!(fmt_int(1234567.4), "1.234.567");
        assert_eq!(fmt_int(-1234.0), "-1.234");
        assert_eq!(fmt_int(f64::NAN), "0");
    }

    #[test]
    fn test_fmt_gb_rounds() {
        assert_eq!(fmt_gb(14.648), "15");
        assert_eq!(fmt_gb(20479.6), "20.480");
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(""), "N/D");
        assert_eq!(or_unknown("esx01"), "esx01");
    }
}
