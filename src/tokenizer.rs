//! Splits a raw test-case string into top-level parameter tokens.
//!
//! Accepts both `nums = [1,2], target = 5` and the positional `[1,2], 5`
//! (or one value per line). Commas inside brackets or quotes never split.

use crate::types::RawParameter;
use once_cell::sync::Lazy;
use regex::Regex;

static NAMED_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_]\w*)\s*=").expect("valid named-segment regex"));

/// Bracket depth and quote state while walking text one char at a time
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    depth: usize,
    quote: Option<char>,
    escaped: bool,
    angle_brackets: bool,
}

impl ScanState {
    pub(crate) fn with_angle_brackets() -> Self {
        Self {
            angle_brackets: true,
            ..Self::default()
        }
    }

    /// Feed one char; true when it sits at depth zero outside any quote
    pub(crate) fn step(&mut self, c: char) -> bool {
        if let Some(q) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == q {
                self.quote = None;
            }
            return false;
        }
        match c {
            '"' | '\'' if !self.angle_brackets => {
                self.quote = Some(c);
                false
            }
            '[' | '(' | '{' => {
                self.depth += 1;
                false
            }
            '<' if self.angle_brackets => {
                self.depth += 1;
                false
            }
            ']' | ')' | '}' => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            '>' if self.angle_brackets => {
                self.depth = self.depth.saturating_sub(1);
                false
            }
            _ => self.depth == 0,
        }
    }
}

/// Split `text` on top-level occurrences of any of `separators`.
///
/// Pieces are trimmed; empty pieces are kept so callers decide what to drop.
pub(crate) fn split_top_level(text: &str, separators: &[char], mut state: ScanState) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if state.step(c) && separators.contains(&c) {
            pieces.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    pieces.push(current.trim().to_string());
    pieces
}

fn clean_value(value: &str) -> String {
    value.trim().trim_end_matches(',').trim().to_string()
}

/// Byte offset right after `name =` when `text` starts a named segment
fn named_segment_start(text: &str) -> Option<(String, usize)> {
    let caps = NAMED_SEGMENT.captures(text)?;
    let whole = caps.get(0)?;
    // `a == b` is a comparison, not a binding
    if text[whole.end()..].starts_with('=') {
        return None;
    }
    Some((caps[1].to_string(), whole.end()))
}

/// Tokenize a raw input string into ordered `{name, raw_value}` pairs.
///
/// Empty input yields an empty list. Unbalanced brackets leave one large
/// trailing token instead of failing.
pub fn tokenize(raw: &str) -> Vec<RawParameter> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if named_segment_start(raw).is_none() {
        return tokenize_positional(raw);
    }

    let mut params = Vec::new();
    let mut rest = raw;
    while let Some((name, value_start)) = named_segment_start(rest) {
        let body = &rest[value_start..];
        let mut state = ScanState::default();
        let mut end = body.len();
        for (offset, c) in body.char_indices() {
            if state.step(c) && c == ',' && named_segment_start(&body[offset + 1..]).is_some() {
                end = offset;
                break;
            }
        }
        params.push(RawParameter {
            name,
            raw_value: clean_value(&body[..end]),
        });
        if end >= body.len() {
            break;
        }
        rest = &body[end + 1..];
    }
    params
}

fn tokenize_positional(raw: &str) -> Vec<RawParameter> {
    split_top_level(raw, &[',', '\n'], ScanState::default())
        .into_iter()
        .map(|piece| clean_value(&piece))
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(i, raw_value)| RawParameter {
            name: format!("param{}", i),
            raw_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(params: &[RawParameter]) -> Vec<&str> {
        params.iter().map(|p| p.raw_value.as_str()).collect()
    }

    #[test]
    fn test_named_nested_brackets_do_not_split() {
        let params = tokenize("nums = [1,[2,3]], target = 5");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "nums");
        assert_eq!(params[0].raw_value, "[1,[2,3]]");
        assert_eq!(params[1].name, "target");
        assert_eq!(params[1].raw_value, "5");
    }

    #[test]
    fn test_positional_and_named_agree() {
        let positional = tokenize("[1,2,3], 5");
        let named = tokenize("nums = [1,2,3], target = 5");
        assert_eq!(values(&positional), values(&named));
        assert_eq!(positional[0].name, "param0");
        assert_eq!(positional[1].name, "param1");
    }

    #[test]
    fn test_quoted_commas_stay_inside_token() {
        let params = tokenize(r#"s = "a,b", t = 'c, d'"#);
        assert_eq!(values(&params), vec![r#""a,b""#, "'c, d'"]);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let params = tokenize(r#"s = "say \"hi\", ok", k = 2"#);
        assert_eq!(values(&params), vec![r#""say \"hi\", ok""#, "2"]);
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_trailing_comma_is_trimmed() {
        let params = tokenize("[1,2], 3,");
        assert_eq!(values(&params), vec!["[1,2]", "3"]);
    }

    #[test]
    fn test_unterminated_bracket_becomes_one_token() {
        let params = tokenize("nums = [1,2, target = 5");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].raw_value, "[1,2, target = 5");
    }

    #[test]
    fn test_newline_separated_positional_values() {
        let params = tokenize("[2,7,11,15]\n9");
        assert_eq!(values(&params), vec!["[2,7,11,15]", "9"]);
    }

    #[test]
    fn test_string_value_containing_equals() {
        let params = tokenize(r#"s = "a=b", k = 1"#);
        assert_eq!(values(&params), vec![r#""a=b""#, "1"]);
    }

    #[test]
    fn test_angle_bracket_splitting() {
        let pieces = split_top_level(
            "Map<String, List<Integer>> m, int k",
            &[','],
            ScanState::with_angle_brackets(),
        );
        assert_eq!(pieces, vec!["Map<String, List<Integer>> m", "int k"]);
    }
}
