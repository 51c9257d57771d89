//! Field formatting primitives.

use pmu_model::AttributeValue;

/// Double-quote `text`, escaping `\`, `"` and newlines.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Left-justify `field` to `width` characters. Longer fields are kept whole.
#[must_use]
pub fn align(field: &str, width: usize) -> String {
    format!("{field:<width$}")
}

/// Configuration value: raw when it starts with a digit, quoted otherwise.
#[must_use]
pub fn config_field(value: &AttributeValue) -> String {
    let text = value.to_string();
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        text
    } else {
        quote(&text)
    }
}

/// `NAME(field,field,...)`.
#[must_use]
pub fn macro_line(name: &str, fields: &[String]) -> String {
    format!("{name}({})", fields.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("Cycle"), r#""Cycle""#);
        assert_eq!(quote("a \"b\"\nc\\d"), r#""a \"b\"\nc\\d""#);
        assert_eq!(quote(""), r#""""#);
    }

    #[test]
    fn test_quote_width_matches_measured_width() {
        for text in ["Cycle", "a \"b\"\nc\\d", "µs", ""] {
            assert_eq!(quote(text).chars().count(), pmu_normalize::escaped_len(text) + 2);
        }
    }

    #[test]
    fn test_align_pads_by_characters() {
        assert_eq!(align("ab", 5), "ab   ");
        assert_eq!(align("µs", 4), "µs  ");
        assert_eq!(align("toolong", 3), "toolong");
    }

    #[test]
    fn test_config_field() {
        assert_eq!(config_field(&AttributeValue::Integer(6)), "6");
        assert_eq!(config_field(&AttributeValue::from("0xd40")), "0xd40");
        assert_eq!(config_field(&AttributeValue::from("armv8.4-a")), r#""armv8.4-a""#);
        assert_eq!(config_field(&AttributeValue::Integer(-1)), r#""-1""#);
        assert_eq!(config_field(&AttributeValue::from("")), r#""""#);
    }

    #[test]
    fn test_macro_line() {
        let fields = vec!["\"a\"".to_string(), "1".to_string()];
        assert_eq!(macro_line("WPERF_TS_ALIAS", &fields), r#"WPERF_TS_ALIAS("a",1)"#);
    }
}
