//! Python adapter.
//!
//! Python needs no signature: the driver finds the entry point at runtime
//! and arguments are typed by their token [`Kind`] alone.

use super::{indent, LanguageAdapter};
use crate::literal::{replace_bare_words, string_literal, unquote};
use crate::signature::SignatureExtractor;
use crate::types::{
    Kind, Language, MethodSignature, ParsedParameter, SynthesizedArgs, SynthesizedProgram,
    DEFAULT_METHOD_NAME,
};

const PREAMBLE: &str = r#"from typing import *
from collections import *
from collections import deque as _deque
import sys
import json as _json
import inspect as _inspect
import traceback as _traceback
import math
import heapq
import bisect
import itertools
import functools

_MAX_NODES = 10000


class ListNode:
    def __init__(self, val=0, next=None):
        self.val = val
        self.next = next


class TreeNode:
    def __init__(self, val=0, left=None, right=None):
        self.val = val
        self.left = left
        self.right = right


def _build_list(values):
    dummy = ListNode()
    tail = dummy
    for value in values:
        tail.next = ListNode(value)
        tail = tail.next
    return dummy.next


def _build_tree(values):
    if not values or values[0] is None:
        return None
    root = TreeNode(values[0])
    queue = _deque([root])
    i = 1
    while queue and i < len(values):
        node = queue.popleft()
        if i < len(values) and values[i] is not None:
            node.left = TreeNode(values[i])
            queue.append(node.left)
        i += 1
        if i < len(values) and values[i] is not None:
            node.right = TreeNode(values[i])
            queue.append(node.right)
        i += 1
    return root


def _tree_items(root):
    items = []
    queue = _deque([root])
    while queue and len(items) < _MAX_NODES:
        node = queue.popleft()
        if node is None:
            items.append("null")
            continue
        items.append(_serialize(node.val, True))
        queue.append(node.left)
        queue.append(node.right)
    while items and items[-1] == "null":
        items.pop()
    return items


def _serialize(value, nested=False):
    if value is None:
        return "null"
    if isinstance(value, bool):
        return "true" if value else "false"
    if isinstance(value, str):
        return _json.dumps(value, ensure_ascii=False) if nested else value
    if isinstance(value, float):
        return repr(value)
    if isinstance(value, ListNode):
        items = []
        while value is not None and len(items) < _MAX_NODES:
            items.append(_serialize(value.val, True))
            value = value.next
        return "[" + ",".join(items) + "]"
    if isinstance(value, TreeNode):
        return "[" + ",".join(_tree_items(value)) + "]"
    if isinstance(value, dict):
        return "{" + ",".join(_serialize(k, True) + ":" + _serialize(v, True) for k, v in value.items()) + "}"
    if isinstance(value, (list, tuple, set, frozenset, _deque)):
        return "[" + ",".join(_serialize(v, True) for v in value) + "]"
    return str(value)
"#;

const ENTRY_POINT: &str = r#"def _find_entry_point(preferred=None):
    solution_class = globals().get("Solution")
    if isinstance(solution_class, type):
        instance = solution_class()
        if preferred and hasattr(instance, preferred):
            return getattr(instance, preferred)
        for name, member in vars(solution_class).items():
            if name.startswith("_"):
                continue
            if isinstance(member, (staticmethod, classmethod)) or callable(member):
                return getattr(instance, name)
    if preferred and _inspect.isfunction(globals().get(preferred)):
        return globals()[preferred]
    functions = [
        fn for name, fn in list(globals().items())
        if _inspect.isfunction(fn) and not name.startswith("_") and fn.__module__ == __name__
    ]
    if functions:
        return functions[-1]
    raise NameError("no Solution method or top-level function found")


def _returns_none(fn):
    try:
        annotation = _inspect.signature(fn).return_annotation
    except (TypeError, ValueError):
        return False
    return annotation is None or annotation == "None"
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonAdapter;

impl SignatureExtractor for PythonAdapter {
    fn extract(&self, _source: &str) -> MethodSignature {
        MethodSignature::unresolved("Any")
    }
}

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn synthesize_args(&self, params: &[ParsedParameter], _signature: &MethodSignature) -> SynthesizedArgs {
        SynthesizedArgs {
            declarations: Vec::new(),
            expressions: params.iter().map(argument).collect(),
        }
    }

    fn assemble(&self, user_code: &str, signature: &MethodSignature, args: &SynthesizedArgs) -> SynthesizedProgram {
        SynthesizedProgram {
            preamble: PREAMBLE.to_string(),
            user_code: user_code.to_string(),
            driver: driver(signature, &args.expressions),
        }
    }
}

fn argument(param: &ParsedParameter) -> String {
    let raw = param.raw_value.trim();
    match param.kind {
        Kind::Null => "None".to_string(),
        Kind::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
        Kind::Number => raw.to_string(),
        Kind::String => {
            if unquote(raw).len() + 2 == raw.len() {
                raw.to_string()
            } else {
                string_literal(raw)
            }
        }
        Kind::Array | Kind::Array2D => list_literal(raw),
        Kind::LinkedList => format!("_build_list({})", list_literal(raw)),
        Kind::Tree => format!("_build_tree({})", list_literal(raw)),
    }
}

/// Array tokens pass through as written, with JSON keywords spelled the Python way
fn list_literal(raw: &str) -> String {
    replace_bare_words(raw, |word| match word {
        "null" => Some("None"),
        "true" => Some("True"),
        "false" => Some("False"),
        _ => None,
    })
}

fn driver(signature: &MethodSignature, expressions: &[String]) -> String {
    let preferred = if signature.name == DEFAULT_METHOD_NAME {
        "None".to_string()
    } else {
        string_literal(&signature.name)
    };
    let body = format!(
        "_args = [{args}]\n\
         _entry = _find_entry_point({preferred})\n\
         _result = _entry(*_args)\n\
         if _result is None and _args and _returns_none(_entry):\n    _result = _args[0]\n\
         print(_serialize(_result))",
        args = expressions.join(", "),
        preferred = preferred,
    );
    format!(
        "\n\n{entry}\n\nif __name__ == \"__main__\":\n    try:\n{body}\n    except Exception as _error:\n        \
         print(f\"Runtime Error: {{type(_error).__name__}}: {{_error}}\", file=sys.stderr)\n        \
         _traceback.print_exc()\n        sys.exit(1)\n",
        entry = ENTRY_POINT,
        body = indent(&body, 8),
    )
}
