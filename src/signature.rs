//! Heuristic recovery of the user's method signature.
//!
//! Each language plugs in its own [`SignatureExtractor`]; all of them scan
//! text with regular expressions and bracket counting rather than parsing.
//! A miss yields [`MethodSignature::unresolved`], never an error.

use crate::tokenizer::{split_top_level, ScanState};
use crate::types::{MethodSignature, ParameterDecl};
use once_cell::sync::Lazy;
use regex::Regex;

pub trait SignatureExtractor {
    fn extract(&self, source: &str) -> MethodSignature;
}

/// Identifiers a method regex can latch onto that are never the entry point
const NOT_A_METHOD: [&str; 10] = [
    "main", "Solution", "if", "for", "while", "switch", "catch", "return", "sizeof", "new",
];

static TYPED_PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s*\b([A-Za-z_]\w*)\s*((?:\[\s*\])*)$").expect("valid parameter regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

pub(crate) fn is_candidate_name(name: &str) -> bool {
    !NOT_A_METHOD.contains(&name)
}

/// Collapse whitespace runs and drop modifiers that do not change the type
pub(crate) fn clean_type(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    collapsed
        .trim_start_matches("final ")
        .trim()
        .to_string()
}

/// Split `Type name, Type name` into declarations, tracking `<...>` depth
/// so template and generic argument lists stay intact.
pub(crate) fn split_parameter_list(list: &str) -> Vec<ParameterDecl> {
    if list.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(list, &[','], ScanState::with_angle_brackets())
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            // default arguments are not part of the type
            let piece = piece.split('=').next().unwrap_or_default().trim().to_string();
            match TYPED_PARAMETER.captures(&piece) {
                Some(caps) => ParameterDecl {
                    name: caps[2].to_string(),
                    declared_type: clean_type(&format!("{}{}", &caps[1], &caps[3])),
                },
                None => ParameterDecl {
                    name: piece.clone(),
                    declared_type: String::new(),
                },
            }
        })
        .collect()
}

/// Blank out `//` and `/* */` comments, keeping newlines so offsets stay meaningful
pub(crate) fn strip_c_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(n) = chars.next() {
                    out.push(n);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
            }
            ('"', _) | ('\'', _) => {
                quote = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// True when `source` declares `class|struct <name>` outside comments
pub(crate) fn declares_type(source: &str, name: &str) -> bool {
    let pattern = format!(r"\b(?:class|struct)\s+{}\b", regex::escape(name));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(&strip_c_comments(source)),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_java_parameters() {
        let params = split_parameter_list("int[] nums, final int target");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].declared_type, "int[]");
        assert_eq!(params[0].name, "nums");
        assert_eq!(params[1].declared_type, "int");
    }

    #[test]
    fn test_split_cpp_template_parameters() {
        let params = split_parameter_list("vector<pair<int, int>>& edges, ListNode *head");
        assert_eq!(params[0].declared_type, "vector<pair<int, int>>&");
        assert_eq!(params[0].name, "edges");
        assert_eq!(params[1].declared_type, "ListNode *");
        assert_eq!(params[1].name, "head");
    }

    #[test]
    fn test_c_style_array_parameter() {
        let params = split_parameter_list("int nums[]");
        assert_eq!(params[0].declared_type, "int[]");
        assert_eq!(params[0].name, "nums");
    }

    #[test]
    fn test_empty_parameter_list() {
        assert!(split_parameter_list("  ").is_empty());
    }

    #[test]
    fn test_strip_comments_keeps_strings() {
        let src = "int a; // note\n/* block\n */ String s = \"//x\";";
        let stripped = strip_c_comments(src);
        assert!(!stripped.contains("note"));
        assert!(!stripped.contains("block"));
        assert!(stripped.contains("\"//x\""));
        assert_eq!(stripped.lines().count(), src.lines().count());
    }

    #[test]
    fn test_declares_type_ignores_comments() {
        let src = "/**\n * public class ListNode {\n */\nclass Solution {}";
        assert!(!declares_type(src, "ListNode"));
        assert!(declares_type(src, "Solution"));
    }
}
