//! Assigns a [`Kind`] to each test-case token.

use crate::tokenizer::tokenize;
use crate::types::{Kind, ParsedParameter};
use once_cell::sync::Lazy;
use regex::Regex;

const NULL_LITERALS: [&str; 3] = ["null", "None", "nullptr"];
const BOOLEAN_LITERALS: [&str; 4] = ["true", "false", "True", "False"];

static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|Infinity)|0[xX][0-9a-fA-F]+|0[bB][01]+|0[oO][0-7]+)$")
        .expect("valid numeric regex")
});

/// Signed decimal, exponent or `Infinity` literal, or an unsigned `0x`/`0b`/`0o` integer
pub fn is_numeric_literal(value: &str) -> bool {
    NUMERIC_LITERAL.is_match(value.trim())
}

/// Classify a raw token, optionally using its parameter name as a hint.
///
/// First matching rule wins; unrecognised tokens are strings.
pub fn classify(value: &str, name: Option<&str>) -> Kind {
    let value = value.trim();
    let name = name.map(str::to_lowercase).unwrap_or_default();

    if NULL_LITERALS.contains(&value) {
        return Kind::Null;
    }
    if BOOLEAN_LITERALS.contains(&value) {
        return Kind::Boolean;
    }
    if value.starts_with("[[") {
        return Kind::Array2D;
    }
    if value.starts_with('[') && (name.contains("head") || name.contains("list")) {
        return Kind::LinkedList;
    }
    if value.starts_with('[') && (name.contains("root") || name.contains("tree")) {
        return Kind::Tree;
    }
    if value.starts_with('[') {
        return Kind::Array;
    }
    if value.starts_with('"') || value.starts_with('\'') {
        return Kind::String;
    }
    if is_numeric_literal(value) {
        return Kind::Number;
    }
    Kind::String
}

/// Tokenize and classify a raw input string in one pass
pub fn parse_parameters(raw: &str) -> Vec<ParsedParameter> {
    tokenize(raw)
        .into_iter()
        .map(|param| {
            let kind = classify(&param.raw_value, Some(&param.name));
            tracing::debug!(name = %param.name, ?kind, "classified parameter");
            ParsedParameter {
                name: param.name,
                raw_value: param.raw_value,
                kind,
            }
        })
        .collect()
}
