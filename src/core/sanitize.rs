// src/core/sanitize.rs

/// Drop the leading number token of a KEGG heading:
/// `"09100 Metabolism"` → `"Metabolism"`. Splits on the first plain space
/// only; a label without one is returned whole.
pub fn strip_number_prefix(label: &str) -> String {
    let t = label.trim();
    match t.split_once(' ') {
        Some((_, rest)) => rest.trim().to_string(),
        None => t.to_string(),
    }
}

/// Keep at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s.to_string(),
    }
}

/// Left-pad with '0' to `width` characters. A leading sign stays in front.
pub fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width { return s.to_string(); }
    let pad = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => join!(&sign.to_string(), &pad, &s[1..]),
        _ => join!(&pad, s),
    }
}

/// `%.1e`-style scientific notation with a signed, two-digit exponent,
/// e.g. `1.2e-05`, `5.0e-02`.
pub fn sci_1e(v: f64) -> String {
    if !v.is_finite() { return format!("{v}"); }
    let raw = format!("{v:.1e}"); // "1.2e-5"
    let Some((mantissa, exp)) = raw.split_once('e') else { return raw };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_prefix_is_dropped_once() {
        assert_eq!(strip_number_prefix("09100 Metabolism"), "Metabolism");
        assert_eq!(strip_number_prefix("  09101 Carbohydrate metabolism "), "Carbohydrate metabolism");
        assert_eq!(strip_number_prefix("Metabolism"), "Metabolism");
        assert_eq!(strip_number_prefix(""), "");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 35), "abc");
        assert_eq!(truncate_chars("αβγδ", 2), "αβ");
    }

    #[test]
    fn zfill_matches_pad_rules() {
        assert_eq!(zfill("10", 5), "00010");
        assert_eq!(zfill("00010", 5), "00010");
        assert_eq!(zfill("123456", 5), "123456");
        assert_eq!(zfill("-1", 4), "-001");
        assert_eq!(zfill("", 3), "000");
    }

    #[test]
    fn sci_uses_two_digit_exponent() {
        assert_eq!(sci_1e(0.000012), "1.2e-05");
        assert_eq!(sci_1e(0.05), "5.0e-02");
        assert_eq!(sci_1e(1.0), "1.0e+00");
        assert_eq!(sci_1e(2.5e-120), "2.5e-120");
    }
}
