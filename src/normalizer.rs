//! Canonical form of program output, so results from different languages
//! compare equal as plain strings.

use crate::types::NormalizationOptions;
use once_cell::sync::Lazy;
use regex::Regex;

struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

fn rewrite(pattern: &str, replacement: &'static str) -> Rewrite {
    Rewrite {
        pattern: Regex::new(pattern).expect("valid normalizer regex"),
        replacement,
    }
}

/// Applied in order on every pass
static REWRITES: Lazy<Vec<Rewrite>> = Lazy::new(|| {
    vec![
        rewrite(r"\bTrue\b", "true"),
        rewrite(r"\bFalse\b", "false"),
        rewrite(r"\bNone\b", "null"),
        rewrite(r"\bnullptr\b", "null"),
        rewrite(r"\[\s+", "["),
        rewrite(r"\s+\]", "]"),
        rewrite(r"\s*,\s*", ","),
        rewrite(r"\(", "["),
        rewrite(r"\)", "]"),
    ]
});

fn normalize_pass(output: &str) -> String {
    let mut text = output.trim().to_string();
    for rule in REWRITES.iter() {
        text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
    }
    strip_scalar_quotes(&text).to_string()
}

/// Plain string results compare unquoted; structured ones keep their quoting
fn strip_scalar_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return text;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first != last || !(first == b'"' || first == b'\'') {
        return text;
    }
    let inner = &text[1..text.len() - 1];
    if inner.contains('[') || inner.contains('{') {
        text
    } else {
        inner
    }
}

/// Canonicalize program output. Pure and idempotent.
pub fn normalize_output(output: &str) -> String {
    let mut current = output.replace("\r\n", "\n");
    // each pass only shortens the text or lowers keywords/brackets, so this terminates
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Judge-side comparison form: line-level cleanup, then canonicalization
pub fn normalize_with(output: &str, opts: &NormalizationOptions) -> String {
    let mut s = output.to_string();
    if opts.normalize_crlf {
        s = s.replace("\r\n", "\n");
    }
    if opts.ignore_extra_whitespace {
        s = s
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }
    let s = s.lines().map(|l| l.trim()).collect::<Vec<_>>().join("\n");
    normalize_output(&s)
}

/// True when `actual` and `expected` agree after normalization
pub fn outputs_match(actual: &str, expected: &str, opts: &NormalizationOptions) -> bool {
    normalize_with(actual, opts) == normalize_with(expected, opts)
}
