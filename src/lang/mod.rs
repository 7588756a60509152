//! Per-language adapters.
//!
//! Every language bundles its signature extraction, argument synthesis and
//! program assembly behind [`LanguageAdapter`]; [`adapter_for`] looks them
//! up by tag, so a new language is one more module and one registry entry.

pub mod cpp;
pub mod java;
pub mod python;

use crate::signature::SignatureExtractor;
use crate::types::{Kind, Language, MethodSignature, ParsedParameter, SynthesizedArgs, SynthesizedProgram};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub trait LanguageAdapter: SignatureExtractor + Send + Sync {
    fn language(&self) -> Language;

    /// Language-native argument expressions for one test case
    fn synthesize_args(&self, params: &[ParsedParameter], signature: &MethodSignature) -> SynthesizedArgs;

    /// Full program: helpers, the user's code, and a driver calling `signature.name`
    fn assemble(&self, user_code: &str, signature: &MethodSignature, args: &SynthesizedArgs) -> SynthesizedProgram;
}

static ADAPTERS: Lazy<HashMap<Language, Box<dyn LanguageAdapter>>> = Lazy::new(|| {
    let adapters: Vec<Box<dyn LanguageAdapter>> = vec![
        Box::new(python::PythonAdapter),
        Box::new(java::JavaAdapter),
        Box::new(cpp::CppAdapter),
    ];
    adapters.into_iter().map(|a| (a.language(), a)).collect()
});

pub fn adapter_for(language: Language) -> &'static dyn LanguageAdapter {
    match ADAPTERS.get(&language) {
        Some(adapter) => adapter.as_ref(),
        // every Language variant is registered above
        None => &python::PythonAdapter,
    }
}

/// Structural shape a bracketed token is built as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Array,
    LinkedList,
    Tree,
}

/// Builder calls are gated on the declared type when the extractor found one;
/// without it the token kind decides.
pub(crate) fn shape_of(kind: Kind, declared: Option<&str>, list_marker: &str, tree_marker: &str) -> Shape {
    match declared.map(|t| t.replace(char::is_whitespace, "")) {
        Some(t) if t.contains(list_marker) => Shape::LinkedList,
        Some(t) if t.contains(tree_marker) => Shape::Tree,
        Some(_) => Shape::Array,
        None => match kind {
            Kind::LinkedList => Shape::LinkedList,
            Kind::Tree => Shape::Tree,
            _ => Shape::Array,
        },
    }
}

/// Innermost template/generic argument: `vector<vector<char>>` -> `char`
pub(crate) fn innermost_type(declared: &str) -> &str {
    declared
        .rsplit('<')
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| c == '>' || c == '&' || c.is_whitespace())
        .trim()
}

/// Replace lines matching `is_hoisted` with blank ones, returning them separately.
///
/// Line count of the remaining code is unchanged.
pub(crate) fn hoist_lines(code: &str, is_hoisted: impl Fn(&str) -> bool) -> (Vec<String>, String) {
    let mut hoisted = Vec::new();
    let mut body = Vec::new();
    for line in code.lines() {
        if is_hoisted(line.trim_start()) {
            hoisted.push(line.trim().to_string());
            body.push("");
        } else {
            body.push(line);
        }
    }
    (hoisted, body.join("\n"))
}

/// Indent every non-empty line of `block` by `spaces`
pub(crate) fn indent(block: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    block
        .lines()
        .map(|line| if line.trim().is_empty() { String::new() } else { format!("{}{}", pad, line) })
        .collect::<Vec<_>>()
        .join("\n")
}
