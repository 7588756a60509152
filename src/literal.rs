//! Array and string literal helpers shared by the per-language synthesizers.

use serde_json::Value;

/// Scalar element type recovered from an array literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int,
    Long,
    Double,
    Boolean,
    Str,
}

/// Parse an array token, accepting JSON as well as Python-flavoured literals
/// (`'a'`, `None`, `True`). `None` means the token is not a usable array.
pub fn parse_array(raw: &str) -> Option<Vec<Value>> {
    let raw = raw.trim();
    let parsed = serde_json::from_str::<Value>(raw)
        .or_else(|_| serde_json::from_str::<Value>(&python_to_json(raw)));
    match parsed {
        Ok(Value::Array(items)) => Some(items),
        _ => {
            tracing::warn!(token = raw, "array literal could not be parsed");
            None
        }
    }
}

/// Rewrite single-quoted strings and Python keywords into JSON syntax
fn python_to_json(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();
    let mut quote: Option<char> = None;
    let mut chars = raw.chars().peekable();

    let flush_word = |word: &mut String, out: &mut String| {
        match word.as_str() {
            "None" => out.push_str("null"),
            "True" => out.push_str("true"),
            "False" => out.push_str("false"),
            other => out.push_str(other),
        }
        word.clear();
    };

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => match c {
                '\\' => {
                    let next = chars.next();
                    match (q, next) {
                        ('\'', Some('\'')) => out.push('\''),
                        (_, Some(n)) => {
                            out.push('\\');
                            out.push(n);
                        }
                        (_, None) => out.push('\\'),
                    }
                }
                '"' if q == '\'' => out.push_str("\\\""),
                c if c == q => {
                    out.push('"');
                    quote = None;
                }
                c => out.push(c),
            },
            None => {
                if c.is_alphanumeric() || c == '_' {
                    word.push(c);
                    continue;
                }
                flush_word(&mut word, &mut out);
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    out.push('"');
                } else {
                    out.push(c);
                }
            }
        }
    }
    flush_word(&mut word, &mut out);
    out
}

/// Rewrite bare words outside string literals; everything else is kept as written
pub fn replace_bare_words(raw: &str, replace: impl Fn(&str) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    let flush = |word: &mut String, out: &mut String| {
        out.push_str(replace(word.as_str()).unwrap_or(word.as_str()));
        word.clear();
    };

    for c in raw.chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut out);
        if c == '\'' || c == '"' {
            quote = Some(c);
        }
        out.push(c);
    }
    flush(&mut word, &mut out);
    out
}

/// Radix of an integer literal written with a `0x`, `0b` or `0o` prefix
pub fn radix_prefix(raw: &str) -> Option<u32> {
    let lower = raw.trim().get(..2)?.to_ascii_lowercase();
    match lower.as_str() {
        "0x" => Some(16),
        "0b" => Some(2),
        "0o" => Some(8),
        _ => None,
    }
}

/// Number token spelled so Java and C++ accept it; they have no `0o` prefix
pub fn c_family_number(raw: &str) -> String {
    let raw = raw.trim();
    match radix_prefix(raw) {
        Some(8) => u64::from_str_radix(&raw[2..], 8)
            .map(|n| n.to_string())
            .unwrap_or_else(|_| raw.to_string()),
        _ => raw.to_string(),
    }
}

/// Double-quoted literal with escapes valid in Python, Java and C++
pub fn string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Strip one layer of matching outer quotes, if present
pub fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Re-quote a string token with double quotes, keeping existing escapes
pub fn requote(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return trimmed.to_string();
    }
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        let inner = &trimmed[1..trimmed.len() - 1];
        let mut out = String::from("\"");
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(n) => {
                        out.push('\\');
                        out.push(n);
                    }
                    None => out.push_str("\\\\"),
                },
                '"' => out.push_str("\\\""),
                c => out.push(c),
            }
        }
        out.push('"');
        return out;
    }
    string_literal(trimmed)
}

/// First character of a string token, for `char` parameters
pub fn char_literal(raw: &str) -> String {
    char_literal_of(unquote(raw).chars().next().unwrap_or(' '))
}

pub fn char_literal_of(c: char) -> String {
    match c {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        c => format!("'{}'", c),
    }
}

fn leaves<'a>(values: &'a [Value], out: &mut Vec<&'a Value>) {
    for value in values {
        match value {
            Value::Array(inner) => leaves(inner, out),
            other => out.push(other),
        }
    }
}

/// Element type from the first non-null leaf; numbers widen across all leaves
pub fn infer_element_type(values: &[Value]) -> ElementType {
    let mut all = Vec::new();
    leaves(values, &mut all);
    match all.iter().find(|v| !v.is_null()) {
        Some(Value::String(_)) => ElementType::Str,
        Some(Value::Bool(_)) => ElementType::Boolean,
        Some(Value::Number(_)) => {
            let numbers: Vec<_> = all.iter().filter_map(|v| v.as_number()).collect();
            if numbers.iter().any(|n| n.is_f64()) {
                ElementType::Double
            } else if numbers
                .iter()
                .any(|n| n.as_i64().map_or(true, |i| i32::try_from(i).is_err()))
            {
                ElementType::Long
            } else {
                ElementType::Int
            }
        }
        _ => ElementType::Int,
    }
}

/// Scalar rendering shared by the statically typed targets
pub fn scalar_text(value: &Value, null_literal: &str) -> String {
    match value {
        Value::Null => null_literal.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_array() {
        let items = parse_array("[1, [2, 3]]").unwrap();
        assert_eq!(items, vec![json!(1), json!([2, 3])]);
    }

    #[test]
    fn test_parse_python_flavoured_array() {
        let items = parse_array("['a', None, True, \"b\"]").unwrap();
        assert_eq!(items, vec![json!("a"), Value::Null, json!(true), json!("b")]);
    }

    #[test]
    fn test_parse_failure_is_none() {
        assert!(parse_array("[1,2").is_none());
        assert!(parse_array("5").is_none());
    }

    #[test]
    fn test_requote_variants() {
        assert_eq!(requote("\"abc\""), "\"abc\"");
        assert_eq!(requote("'it\"s'"), "\"it\\\"s\"");
        assert_eq!(requote("abc"), "\"abc\"");
    }

    #[test]
    fn test_element_type_inference() {
        assert_eq!(infer_element_type(&[json!(1), json!(2)]), ElementType::Int);
        assert_eq!(infer_element_type(&[json!(1), json!(2.5)]), ElementType::Double);
        assert_eq!(infer_element_type(&[json!(5_000_000_000i64)]), ElementType::Long);
        assert_eq!(infer_element_type(&[Value::Null, json!("x")]), ElementType::Str);
        assert_eq!(infer_element_type(&[json!([true])]), ElementType::Boolean);
        assert_eq!(infer_element_type(&[]), ElementType::Int);
    }

    #[test]
    fn test_replace_bare_words_skips_strings() {
        let to_python = |w: &str| match w {
            "null" => Some("None"),
            "true" => Some("True"),
            _ => None,
        };
        assert_eq!(
            replace_bare_words("[null, \"null\", 'a\\'true', true,nullable]", to_python),
            "[None, \"null\", 'a\\'true', True,nullable]"
        );
        assert_eq!(
            replace_bare_words("[123456789012345678901234567890]", to_python),
            "[123456789012345678901234567890]"
        );
    }

    #[test]
    fn test_radix_prefixed_numbers() {
        assert_eq!(radix_prefix("0X1f"), Some(16));
        assert_eq!(radix_prefix("0b101"), Some(2));
        assert_eq!(radix_prefix("10"), None);
        assert_eq!(c_family_number("0o17"), "15");
        assert_eq!(c_family_number("0b101"), "0b101");
        assert_eq!(c_family_number(" 42 "), "42");
    }

    #[test]
    fn test_char_literal() {
        assert_eq!(char_literal("\"a\""), "'a'");
        assert_eq!(char_literal("'b'"), "'b'");
        assert_eq!(char_literal_of('\''), "'\\''");
    }
}
