use serde_json::Value;

/// Render a millisecond duration as `MM:SS.mmm`.
///
/// Non-numeric or non-finite input is returned as-is, stringified, so that malformed
/// upstream data still shows up in the reply instead of failing it.
pub fn format_duration(value: &Value) -> String {
    match as_number(value) {
        Some(ms) if ms.is_finite() => format_millis(ms.trunc() as i64),
        _ => raw(value),
    }
}

pub fn format_millis(ms: i64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Cheap shape check for TMX ids before hitting the API: 3 to 12 ASCII digits.
pub fn is_plausible_numeric_id(value: &str) -> bool {
    let value = value.trim();
    (3..=12).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Render points with `,` thousands separators. Non-numeric values are rendered raw.
pub fn format_points(value: &Value) -> String {
    let Value::Number(number) = value else {
        return raw(value);
    };

    if let Some(n) = number.as_i64() {
        return group_thousands(n.unsigned_abs(), n < 0);
    }
    if let Some(n) = number.as_u64() {
        return group_thousands(n, false);
    }

    match number.as_f64() {
        Some(f) if f.is_finite() => {
            let abs = (f.abs() * 1000.0).round() / 1000.0;
            let whole = group_thousands(abs.trunc() as u64, f < 0.0);
            let fraction = format!("{:.3}", abs.fract());
            let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
            if fraction == "." || fraction.is_empty() {
                whole
            } else {
                format!("{whole}{fraction}")
            }
        }
        _ => raw(value),
    }
}

fn group_thousands(n: u64, negative: bool) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to at most `max_chars` characters, never splitting a UTF-8 sequence.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&json!(125000)), "02:05.000");
        assert_eq!(format_duration(&json!(999)), "00:00.999");
        assert_eq!(format_duration(&json!(0)), "00:00.000");
        assert_eq!(format_duration(&json!(61_234.9)), "01:01.234");
        assert_eq!(format_duration(&json!(3_600_000)), "60:00.000");
    }

    #[test]
    fn test_format_duration_coerces_numeric_strings() {
        assert_eq!(format_duration(&json!(" 45500 ")), "00:45.500");
    }

    #[test]
    fn test_format_duration_falls_back_to_raw_value() {
        assert_eq!(format_duration(&json!("NaN")), "NaN");
        assert_eq!(format_duration(&json!("soon")), "soon");
        assert_eq!(format_duration(&Value::Null), "null");
        assert_eq!(format_duration(&json!(true)), "true");
    }

    #[test]
    fn test_is_plausible_numeric_id() {
        assert!(is_plausible_numeric_id("273080"));
        assert!(is_plausible_numeric_id(" 123 "));
        assert!(is_plausible_numeric_id("123456789012"));
        assert!(!is_plausible_numeric_id("12"));
        assert!(!is_plausible_numeric_id("12a"));
        assert!(!is_plausible_numeric_id("1234567890123"));
        assert!(!is_plausible_numeric_id(""));
        assert!(!is_plausible_numeric_id("٣٤٥"));
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(&json!(1000)), "1,000");
        assert_eq!(format_points(&json!(999)), "999");
        assert_eq!(format_points(&json!(1234567)), "1,234,567");
        assert_eq!(format_points(&json!(-4500)), "-4,500");
        assert_eq!(format_points(&json!(1234.5)), "1,234.5");
        assert_eq!(format_points(&json!(12.0)), "12");
    }

    #[test]
    fn test_format_points_raw_fallback() {
        assert_eq!(format_points(&json!("lots")), "lots");
        assert_eq!(format_points(&json!("1000")), "1000");
        assert_eq!(format_points(&Value::Null), "null");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("", 5), "");
    }
}
