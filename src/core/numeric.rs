//! Heuristic parsing of tick/value label text into numbers.
//!
//! Chart labels spell numbers in many ways: `1,234.56`, `1.234,56`, `45%`,
//! `2.5mm`, `$400`, `1.2x10^3`. The parser normalizes the common spellings,
//! extracts the first numeric span, and resolves thousands vs. decimal
//! separators. Best-effort by contract: the same input always yields the same
//! value or the same error, and labels that are not numbers fail loudly.

use crate::error::{DigitizeError, DigitizeResult};

/// Unit tokens stripped from label text before span extraction, longest first.
///
/// Closed list: extending it is a configuration change, never a silent side
/// effect of parsing. `x` is special-cased as a trailing multiplier suffix in
/// [`unit_match_allowed`], and matches overlapping the literal `times` are
/// skipped so LaTeX-style `\times10^…` reaches the scientific normalizer.
pub const UNIT_TOKENS: &[&str] = &[
    "mhz", "khz", "min", "°c", "°f", "mm", "cm", "km", "ms", "kg", "mg", "hz", "kw", "ml", "$",
    "€", "£", "¥", "m", "s", "h", "g", "l", "w", "x",
];

/// Parses the text of a tick or value label into a number.
///
/// Pipeline: lower-case and trim; strip a trailing `%` (remembering the 0.01
/// multiplier); strip known unit tokens; normalize scientific-notation
/// spellings to a single `e` marker; extract the first numeric span; resolve
/// separator ambiguity; parse as `f64`.
///
/// Fails with [`DigitizeError::Parse`] when no numeric span exists or the
/// chosen decimal separator kind occurs more than once.
pub fn parse_label_value(text: &str) -> DigitizeResult<f64> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(parse_error(text, "empty label"));
    }
    let (without_percent, percent) = split_percent(&lowered);
    let without_units = strip_unit_tokens(without_percent);
    let normalized = normalize_scientific(&without_units);
    let span = extract_numeric_span(&normalized)
        .ok_or_else(|| parse_error(text, "no numeric characters"))?;
    let mut digits = resolve_separators(&span.mantissa, text)?;
    if let Some(exponent) = span.exponent {
        digits.push_str(&exponent);
    }
    let value: f64 = digits
        .parse()
        .map_err(|_| parse_error(text, "numeric span does not form a number"))?;
    if !value.is_finite() {
        return Err(parse_error(text, "value overflows f64 range"));
    }
    Ok(if percent { value * 0.01 } else { value })
}

fn parse_error(text: &str, reason: impl Into<String>) -> DigitizeError {
    DigitizeError::Parse {
        text: text.to_owned(),
        reason: reason.into(),
    }
}

fn split_percent(input: &str) -> (&str, bool) {
    match input.strip_suffix('%') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (input, false),
    }
}

/// Removes every [`UNIT_TOKENS`] occurrence, longest token first at each
/// position.
fn strip_unit_tokens(input: &str) -> String {
    let protected = find_occurrences(input, "times");
    let mut output = String::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        let rest = &input[index..];
        let matched = UNIT_TOKENS
            .iter()
            .find(|token| {
                rest.starts_with(**token) && unit_match_allowed(input, index, token, &protected)
            })
            .map(|token| token.len());
        match matched {
            Some(length) => index += length,
            None => {
                if let Some(ch) = rest.chars().next() {
                    output.push(ch);
                    index += ch.len_utf8();
                } else {
                    break;
                }
            }
        }
    }
    output
}

fn unit_match_allowed(input: &str, start: usize, token: &str, protected: &[(usize, usize)]) -> bool {
    let end = start + token.len();
    if protected
        .iter()
        .any(|&(from, to)| start < to && end > from)
    {
        return false;
    }
    if token == "x" {
        // `x` only counts as a multiplier suffix ("2.5x"), never an inner letter.
        let trailing = input[end..].chars().all(char::is_whitespace);
        let after_letter = input[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphabetic);
        return trailing && !after_letter;
    }
    true
}

fn find_occurrences(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let start = from + found;
        ranges.push((start, start + needle.len()));
        from = start + needle.len();
    }
    ranges
}

/// Rewrites the scientific-notation spellings into a single `e` marker.
///
/// Handles brace-wrapped exponents, `\times10^`, `×`, `*10^`, `x10^`, a
/// leading `10^`, a bare `^`, and exponent-digit forms `x10`/`*10`. A dangling
/// `e` left by a bare `×10` becomes `e1`; a leading `e` directly followed by
/// an exponent gains an implicit mantissa of 1.
fn normalize_scientific(input: &str) -> String {
    let mut text: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    text = text.replace(['{', '}'], "");
    text = text.replace("\\times", "x");
    text = text.replace('×', "x");
    text = text.replace('−', "-");
    text = text.replace("*10^", "e");
    text = text.replace("x10^", "e");
    if let Some(rest) = text.strip_prefix("10^") {
        text = format!("1e{rest}");
    }
    text = text.replace('^', "e");
    text = text.replace("*10", "e");
    text = text.replace("x10", "e");
    let exponent_follows = text
        .chars()
        .nth(1)
        .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-');
    if text.starts_with('e') && exponent_follows {
        text.insert(0, '1');
    }
    if text.ends_with('e') {
        text.push('1');
    }
    text
}

struct NumericSpan {
    mantissa: String,
    exponent: Option<String>,
}

/// Finds the first contiguous numeric span: an optional leading `-` attached
/// to the first digit, then digits/commas/dots, then an optional attached
/// exponent suffix.
fn extract_numeric_span(input: &str) -> Option<NumericSpan> {
    let first_digit = input.find(|c: char| c.is_ascii_digit())?;
    let start = if input[..first_digit].ends_with('-') {
        first_digit - 1
    } else {
        first_digit
    };
    let tail = &input[start..];

    let mut mantissa = String::new();
    let mut consumed = 0;
    for (offset, ch) in tail.char_indices() {
        let accepted =
            ch.is_ascii_digit() || ch == ',' || ch == '.' || (offset == 0 && ch == '-');
        if !accepted {
            break;
        }
        mantissa.push(ch);
        consumed = offset + ch.len_utf8();
    }

    Some(NumericSpan {
        mantissa,
        exponent: exponent_suffix(&tail[consumed..]),
    })
}

fn exponent_suffix(rest: &str) -> Option<String> {
    let after_marker = rest.strip_prefix('e')?;
    let mut exponent = String::from("e");
    let mut chars = after_marker.chars().peekable();
    if let Some(&sign) = chars.peek() {
        if sign == '+' || sign == '-' {
            exponent.push(sign);
            chars.next();
        }
    }
    let mut digits = 0;
    while let Some(&ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        exponent.push(ch);
        chars.next();
        digits += 1;
    }
    (digits > 0).then_some(exponent)
}

/// Decides which separator kind (if any) is the decimal point and strips the
/// other kind as thousands grouping.
///
/// Both kinds present: the rightmost occurrence wins. Commas only: decimal
/// when the last comma sits within three characters of the span end (`1,5`
/// yes, `1,234` no). Dots only: decimal when there is exactly one. The chosen
/// decimal kind occurring more than once is ambiguous and fails.
fn resolve_separators(mantissa: &str, original: &str) -> DigitizeResult<String> {
    let comma_count = mantissa.matches(',').count();
    let dot_count = mantissa.matches('.').count();

    let decimal = match (mantissa.rfind(','), mantissa.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(comma), None) => (mantissa.len() - comma <= 3).then_some(','),
        (None, Some(_)) => (dot_count == 1).then_some('.'),
        (None, None) => None,
    };

    if let Some(separator) = decimal {
        let occurrences = if separator == ',' { comma_count } else { dot_count };
        if occurrences > 1 {
            return Err(parse_error(
                original,
                format!("decimal separator `{separator}` occurs {occurrences} times"),
            ));
        }
    }

    let mut resolved = String::with_capacity(mantissa.len());
    for ch in mantissa.chars() {
        match ch {
            ',' | '.' => {
                if decimal == Some(ch) {
                    resolved.push('.');
                }
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_spellings_collapse_to_e_marker() {
        assert_eq!(normalize_scientific("1.2x10^3"), "1.2e3");
        assert_eq!(normalize_scientific("1.2 * 10^3"), "1.2e3");
        assert_eq!(normalize_scientific("1.2x10^{3}"), "1.2e3");
        assert_eq!(normalize_scientific("10^4"), "1e4");
        assert_eq!(normalize_scientific("2x10"), "2e1");
        assert_eq!(normalize_scientific("x10^5"), "1e5");
        // A leading `e` with no exponent after it is ordinary text.
        assert_eq!(normalize_scientific("err:3.5"), "err:3.5");
    }

    #[test]
    fn unit_x_is_only_a_trailing_multiplier() {
        assert_eq!(strip_unit_tokens("2.5x"), "2.5");
        assert_eq!(strip_unit_tokens("1.2x10^3"), "1.2x10^3");
    }

    #[test]
    fn times_word_is_protected_from_unit_stripping() {
        assert_eq!(strip_unit_tokens("1.2\\times10^3"), "1.2\\times10^3");
    }

    #[test]
    fn separator_resolution_follows_rightmost_kind() {
        assert_eq!(resolve_separators("1,234.56", "").expect("mixed"), "1234.56");
        assert_eq!(resolve_separators("1.234,56", "").expect("mixed"), "1234.56");
        assert_eq!(resolve_separators("1,5", "").expect("comma"), "1.5");
        assert_eq!(resolve_separators("1,234", "").expect("grouping"), "1234");
        assert_eq!(resolve_separators("1.2.3", "").expect("dots"), "123");
    }

    #[test]
    fn repeated_decimal_kind_is_ambiguous() {
        resolve_separators("1,234,56", "1,234,56").expect_err("two decimal commas");
    }
}
