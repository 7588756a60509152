//! C++ adapter.
//!
//! Every argument is declared as a typed local before the call, since
//! LeetCode-style signatures take containers by non-const reference.

use super::{innermost_type, shape_of, LanguageAdapter, Shape};
use crate::literal::{
    c_family_number, char_literal, char_literal_of, infer_element_type, parse_array, radix_prefix, requote, scalar_text,
    ElementType,
};
use crate::signature::{clean_type, declares_type, is_candidate_name, split_parameter_list, strip_c_comments, SignatureExtractor};
use crate::types::{Kind, Language, MethodSignature, ParsedParameter, SynthesizedArgs, SynthesizedProgram};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// Tried in order; the first pattern with a usable match wins
static SIGNATURE_PATTERNS: Lazy<Vec<(Regex, ReturnCapture)>> = Lazy::new(|| {
    let body = r"\s*\(([^)]*)\)\s*(?:const\s*)?(?:override\s*)?\{";
    let patterns = [
        (
            format!(
                r"((?:std::)?(?:vector|unordered_map|map|unordered_set|set|pair|deque|queue|stack|priority_queue|tuple|array)\s*<.*?>)\s*&?\s*\b(\w+){}",
                body
            ),
            ReturnCapture::AsIs,
        ),
        (format!(r"\b(ListNode|TreeNode)\s*\*\s*(\w+){}", body), ReturnCapture::Pointer),
        (
            format!(
                r"\b(unsigned\s+long\s+long|long\s+long|unsigned\s+int|unsigned|long|int|double|float|bool|char|void|size_t|(?:std::)?string)\s*&?\s+(\w+){}",
                body
            ),
            ReturnCapture::AsIs,
        ),
        (
            format!(
                r"(?m)^[ \t]*(?:(?:static|inline|virtual)\s+)*((?:[\w<>,\*&]|::|[ \t])+?)[ \t]*\b(\w+){}",
                body
            ),
            ReturnCapture::AsIs,
        ),
    ];
    patterns
        .into_iter()
        .map(|(pattern, capture)| (Regex::new(&pattern).expect("valid c++ signature regex"), capture))
        .collect()
});

static MAIN_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bint\s+main\s*\(").expect("valid c++ main regex"));

const NOT_A_TYPE: [&str; 7] = ["return", "else", "new", "delete", "case", "class", "struct"];

#[derive(Debug, Clone, Copy)]
enum ReturnCapture {
    AsIs,
    Pointer,
}

const HEADERS: &str = "#include <iostream>
#include <vector>
#include <string>
#include <sstream>
#include <iomanip>
#include <algorithm>
#include <unordered_map>
#include <unordered_set>
#include <map>
#include <set>
#include <queue>
#include <stack>
#include <deque>
#include <list>
#include <array>
#include <tuple>
#include <bitset>
#include <climits>
#include <cmath>
#include <cstring>
#include <cstdlib>
#include <numeric>
#include <functional>
#include <optional>
#include <utility>
#include <stdexcept>
#include <typeinfo>
#include <cxxabi.h>
using namespace std;
";

const LIST_NODE: &str = "
struct ListNode {
    int val;
    ListNode* next;
    ListNode() : val(0), next(nullptr) {}
    ListNode(int x) : val(x), next(nullptr) {}
    ListNode(int x, ListNode* next) : val(x), next(next) {}
};
";

const TREE_NODE: &str = "
struct TreeNode {
    int val;
    TreeNode* left;
    TreeNode* right;
    TreeNode() : val(0), left(nullptr), right(nullptr) {}
    TreeNode(int x) : val(x), left(nullptr), right(nullptr) {}
    TreeNode(int x, TreeNode* left, TreeNode* right) : val(x), left(left), right(right) {}
};
";

const NODE_LIMIT: &str = "
const size_t kMaxSerializedNodes = 10000;
";

const LIST_HELPERS: &str = r#"
ListNode* buildList(const vector<int>& values) {
    ListNode dummy(0);
    ListNode* tail = &dummy;
    for (int value : values) {
        tail->next = new ListNode(value);
        tail = tail->next;
    }
    return dummy.next;
}

string listToString(ListNode* head) {
    string out = "[";
    size_t count = 0;
    for (ListNode* node = head; node != nullptr && count < kMaxSerializedNodes; node = node->next, ++count) {
        if (count > 0) out += ",";
        out += to_string(node->val);
    }
    return out + "]";
}
"#;

const TREE_HELPERS: &str = r#"
TreeNode* buildTree(const vector<optional<int>>& values) {
    if (values.empty() || !values[0]) return nullptr;
    TreeNode* root = new TreeNode(*values[0]);
    queue<TreeNode*> pending;
    pending.push(root);
    size_t i = 1;
    while (!pending.empty() && i < values.size()) {
        TreeNode* node = pending.front();
        pending.pop();
        if (i < values.size() && values[i]) {
            node->left = new TreeNode(*values[i]);
            pending.push(node->left);
        }
        i++;
        if (i < values.size() && values[i]) {
            node->right = new TreeNode(*values[i]);
            pending.push(node->right);
        }
        i++;
    }
    return root;
}

string treeToString(TreeNode* root) {
    vector<string> items;
    queue<TreeNode*> pending;
    pending.push(root);
    while (!pending.empty() && items.size() < kMaxSerializedNodes) {
        TreeNode* node = pending.front();
        pending.pop();
        if (node == nullptr) {
            items.push_back("null");
            continue;
        }
        items.push_back(to_string(node->val));
        pending.push(node->left);
        pending.push(node->right);
    }
    while (!items.empty() && items.back() == "null") items.pop_back();
    string out = "[";
    for (size_t i = 0; i < items.size(); ++i) {
        if (i > 0) out += ",";
        out += items[i];
    }
    return out + "]";
}
"#;

const PRINT_HELPERS: &str = r#"
string demangledTypeName(const type_info& type) {
    int status = 0;
    char* name = abi::__cxa_demangle(type.name(), nullptr, nullptr, &status);
    string out = (status == 0 && name != nullptr) ? name : type.name();
    free(name);
    return out;
}

string quoteString(const string& value) {
    string out = "\"";
    for (char c : value) {
        if (c == '"' || c == '\\') out += '\\';
        out += c;
    }
    return out + "\"";
}

string formatDouble(double value) {
    string text;
    for (int precision = 15; precision <= 17; ++precision) {
        ostringstream out;
        out << setprecision(precision) << value;
        text = out.str();
        if (strtod(text.c_str(), nullptr) == value) break;
    }
    if (text.find_first_of(".eEn") == string::npos) text += ".0";
    return text;
}

string formatValue(int value) { return to_string(value); }
string formatValue(long value) { return to_string(value); }
string formatValue(long long value) { return to_string(value); }
string formatValue(unsigned int value) { return to_string(value); }
string formatValue(unsigned long value) { return to_string(value); }
string formatValue(unsigned long long value) { return to_string(value); }
string formatValue(double value) { return formatDouble(value); }
string formatValue(float value) { return formatDouble(value); }
string formatValue(bool value) { return value ? "true" : "false"; }
string formatValue(char value) { return quoteString(string(1, value)); }
string formatValue(const string& value) { return quoteString(value); }
string formatValue(ListNode* head) { return listToString(head); }
string formatValue(TreeNode* root) { return treeToString(root); }
template <typename T> string formatValue(const vector<T>& values);
template <typename A, typename B> string formatValue(const pair<A, B>& value);
template <typename K, typename V> string formatValue(const map<K, V>& values);
template <typename K, typename V> string formatValue(const unordered_map<K, V>& values);
template <typename T> string formatValue(const set<T>& values);
template <typename T> string formatValue(const unordered_set<T>& values);

template <typename Range>
string formatSequence(const Range& values) {
    string out = "[";
    bool first = true;
    for (const auto& item : values) {
        if (!first) out += ",";
        first = false;
        out += formatValue(item);
    }
    return out + "]";
}

template <typename Map>
string formatMapping(const Map& values) {
    string out = "{";
    bool first = true;
    for (const auto& entry : values) {
        if (!first) out += ",";
        first = false;
        out += formatValue(entry.first) + ":" + formatValue(entry.second);
    }
    return out + "}";
}

template <typename T>
string formatValue(const vector<T>& values) {
    string out = "[";
    for (size_t i = 0; i < values.size(); ++i) {
        if (i > 0) out += ",";
        const T& item = values[i];
        out += formatValue(item);
    }
    return out + "]";
}

template <typename A, typename B>
string formatValue(const pair<A, B>& value) {
    return "[" + formatValue(value.first) + "," + formatValue(value.second) + "]";
}

template <typename K, typename V>
string formatValue(const map<K, V>& values) { return formatMapping(values); }

template <typename K, typename V>
string formatValue(const unordered_map<K, V>& values) { return formatMapping(values); }

template <typename T>
string formatValue(const set<T>& values) { return formatSequence(values); }

template <typename T>
string formatValue(const unordered_set<T>& values) { return formatSequence(values); }

template <typename T>
void printVector(const vector<T>& values) { cout << formatValue(values) << endl; }

template <typename T>
void printVector2D(const vector<vector<T>>& values) { cout << formatValue(values) << endl; }

void printResult(int value) { cout << formatValue(value) << endl; }
void printResult(long value) { cout << formatValue(value) << endl; }
void printResult(long long value) { cout << formatValue(value) << endl; }
void printResult(double value) { cout << formatValue(value) << endl; }
void printResult(bool value) { cout << formatValue(value) << endl; }
void printResult(char value) { cout << value << endl; }
void printResult(const string& value) { cout << value << endl; }
void printResult(ListNode* head) { cout << listToString(head) << endl; }
void printResult(TreeNode* root) { cout << treeToString(root) << endl; }

template <typename T>
void printResult(const vector<T>& values) { printVector(values); }

template <typename T>
void printResult(const vector<vector<T>>& values) { printVector2D(values); }

template <typename T>
void printResult(const T& value) { cout << formatValue(value) << endl; }
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct CppAdapter;

fn signature_from(caps: &Captures<'_>, capture: ReturnCapture) -> Option<MethodSignature> {
    let name = caps[2].to_string();
    let return_type = match capture {
        ReturnCapture::AsIs => clean_type(&caps[1]),
        ReturnCapture::Pointer => format!("{}*", &caps[1]),
    };
    if !is_candidate_name(&name) || return_type.is_empty() || NOT_A_TYPE.contains(&return_type.as_str()) {
        return None;
    }
    Some(MethodSignature {
        name,
        parameters: split_parameter_list(&caps[3]),
        return_type,
    })
}

impl SignatureExtractor for CppAdapter {
    fn extract(&self, source: &str) -> MethodSignature {
        let source = strip_c_comments(source);
        let found = SIGNATURE_PATTERNS.iter().find_map(|(pattern, capture)| {
            pattern
                .captures_iter(&source)
                .find_map(|caps| signature_from(&caps, *capture))
        });
        match found {
            Some(signature) => {
                tracing::debug!(method = %signature.name, params = signature.parameters.len(), "c++ signature");
                signature
            }
            None => {
                tracing::debug!("no c++ method found, using fallback signature");
                MethodSignature::unresolved("auto")
            }
        }
    }
}

impl LanguageAdapter for CppAdapter {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn synthesize_args(&self, params: &[ParsedParameter], signature: &MethodSignature) -> SynthesizedArgs {
        let mut args = SynthesizedArgs::default();
        for (i, param) in params.iter().enumerate() {
            let variable = format!("arg{}", i);
            match declaration(param, signature.declared_type(i)) {
                Some((ty, init)) => {
                    args.declarations.push(format!("{} {} = {};", ty, variable, init));
                    args.expressions.push(variable);
                }
                None => args.expressions.push("nullptr".to_string()),
            }
        }
        args
    }

    fn assemble(&self, user_code: &str, signature: &MethodSignature, args: &SynthesizedArgs) -> SynthesizedProgram {
        if MAIN_FUNCTION.is_match(&strip_c_comments(user_code)) {
            let preamble = if user_code.contains("#include") {
                String::new()
            } else {
                HEADERS.to_string()
            };
            return SynthesizedProgram::passthrough(preamble, user_code);
        }

        // node helpers follow whichever struct definition is in scope
        let mut preamble = format!("{}{}", HEADERS, NODE_LIMIT);
        let mut helpers = String::new();
        for (name, definition, builders) in [("ListNode", LIST_NODE, LIST_HELPERS), ("TreeNode", TREE_NODE, TREE_HELPERS)] {
            if declares_type(user_code, name) {
                helpers.push_str(builders);
            } else {
                preamble.push_str(definition);
                preamble.push_str(builders);
            }
        }
        helpers.push_str(PRINT_HELPERS);

        SynthesizedProgram {
            preamble,
            user_code: user_code.to_string(),
            driver: driver(signature, args, declares_type(user_code, "Solution"), &helpers),
        }
    }
}

fn driver(signature: &MethodSignature, args: &SynthesizedArgs, has_solution_class: bool, helpers: &str) -> String {
    let mut main = String::new();
    if has_solution_class {
        main.push_str("        Solution solution;\n");
    }
    for declaration in &args.declarations {
        main.push_str(&format!("        {}\n", declaration));
    }
    let target = if has_solution_class {
        format!("solution.{}", signature.name)
    } else {
        signature.name.clone()
    };
    let call = format!("{}({})", target, args.expressions.join(", "));
    if signature.returns_void() {
        main.push_str(&format!("        {};\n", call));
        if let Some(first) = args.expressions.first().filter(|e| e.starts_with("arg")) {
            main.push_str(&format!("        printResult({});\n", first));
        }
    } else {
        main.push_str(&format!("        auto result = {};\n", call));
        main.push_str("        printResult(result);\n");
    }

    format!(
        "{helpers}\nint main() {{\n    try {{\n{main}    }} catch (const exception& error) {{\n        \
         cerr << \"Runtime Error: \" << demangledTypeName(typeid(error)) << \": \" << error.what() << endl;\n        \
         return 1;\n    }} catch (...) {{\n        \
         cerr << \"Runtime Error: unknown: non-standard exception\" << endl;\n        \
         return 1;\n    }}\n    return 0;\n}}\n",
        helpers = helpers,
        main = main,
    )
}

/// Local variable type with `const`/reference qualifiers removed
fn local_type(declared: &str) -> String {
    let ty = declared.trim().trim_start_matches("const ").trim();
    ty.trim_end_matches('&').trim().to_string()
}

fn number_type(raw: &str) -> &'static str {
    if radix_prefix(raw).is_none() && raw.contains(&['.', 'e', 'E'][..]) {
        "double"
    } else if raw.parse::<i64>().map_or(false, |n| i32::try_from(n).is_err()) {
        "long long"
    } else {
        "int"
    }
}

/// `(type, initializer)` for one argument; `None` passes a bare `nullptr`
fn declaration(param: &ParsedParameter, declared: Option<&str>) -> Option<(String, String)> {
    let raw = param.raw_value.trim();
    let declared = declared.map(local_type).filter(|t| !t.is_empty());
    match param.kind {
        Kind::Null => declared.map(|ty| {
            let init = if ty.ends_with('*') { "nullptr" } else { "{}" };
            (ty, init.to_string())
        }),
        Kind::Boolean => Some((declared.unwrap_or_else(|| "bool".to_string()), raw.to_lowercase())),
        Kind::Number => {
            let ty = declared.unwrap_or_else(|| number_type(raw).to_string());
            let literal = c_family_number(raw);
            let init = if ty == "long long" && number_type(&literal) == "long long" {
                format!("{}LL", literal)
            } else {
                literal
            };
            Some((ty, init))
        }
        Kind::String => match declared.as_deref() {
            Some("char") => Some(("char".to_string(), char_literal(raw))),
            Some(ty) => Some((ty.to_string(), requote(raw))),
            None => Some(("string".to_string(), requote(raw))),
        },
        Kind::Array | Kind::Array2D | Kind::LinkedList | Kind::Tree => {
            let items = parse_array(raw);
            let shape = shape_of(param.kind, declared.as_deref(), "ListNode*", "TreeNode*");
            Some(match shape {
                Shape::LinkedList => (
                    "ListNode*".to_string(),
                    format!("buildList({{{}}})", join(&items.unwrap_or_default(), Leaf::Int)),
                ),
                Shape::Tree => (
                    "TreeNode*".to_string(),
                    format!("buildTree({{{}}})", join(&items.unwrap_or_default(), Leaf::OptionalInt)),
                ),
                Shape::Array => array(param.kind, items, declared),
            })
        }
    }
}

fn array(kind: Kind, items: Option<Vec<Value>>, declared: Option<String>) -> (String, String) {
    let ty = match declared {
        Some(ty) => ty,
        None => {
            let element = match items.as_deref().map(infer_element_type) {
                Some(ElementType::Str) => "string",
                Some(ElementType::Boolean) => "bool",
                Some(ElementType::Double) => "double",
                Some(ElementType::Long) => "long long",
                _ => "int",
            };
            if kind == Kind::Array2D {
                format!("vector<vector<{}>>", element)
            } else {
                format!("vector<{}>", element)
            }
        }
    };
    let leaf = match innermost_type(&ty) {
        "char" => Leaf::Char,
        "long long" | "long" => Leaf::Long,
        _ => Leaf::Int,
    };
    let init = format!("{{{}}}", join(&items.unwrap_or_default(), leaf));
    (ty, init)
}

/// How scalar leaves of a braced initializer are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    Int,
    Long,
    Char,
    OptionalInt,
}

fn leaf(value: &Value, kind: Leaf) -> String {
    match (value, kind) {
        (Value::Array(items), _) => format!("{{{}}}", join(items, kind)),
        (Value::Null, Leaf::OptionalInt) => "nullopt".to_string(),
        (Value::Null, _) => "0".to_string(),
        (Value::String(s), Leaf::Char) => char_literal_of(s.chars().next().unwrap_or(' ')),
        (Value::Number(n), Leaf::Long) if n.as_i64().map_or(false, |i| i32::try_from(i).is_err()) => {
            format!("{}LL", n)
        }
        (other, _) => scalar_text(other, "0"),
    }
}

fn join(items: &[Value], kind: Leaf) -> String {
    items.iter().map(|v| leaf(v, kind)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::parse_parameters;

    const TWO_SUM: &str = "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        vector<int> seen(2, 0);\n        return seen;\n    }\n};";

    fn synth(source: &str, input: &str) -> SynthesizedArgs {
        let signature = CppAdapter.extract(source);
        CppAdapter.synthesize_args(&parse_parameters(input), &signature)
    }

    #[test]
    fn test_extract_container_return() {
        let sig = CppAdapter.extract(TWO_SUM);
        assert_eq!(sig.name, "twoSum");
        assert_eq!(sig.return_type, "vector<int>");
        assert_eq!(sig.parameters[0].declared_type, "vector<int>&");
        assert_eq!(sig.parameters[1].name, "target");
    }

    #[test]
    fn test_extract_pointer_return() {
        let sig = CppAdapter.extract(
            "class Solution {\npublic:\n    ListNode* reverseList(ListNode* head) {\n        return head;\n    }\n};",
        );
        assert_eq!(sig.name, "reverseList");
        assert_eq!(sig.return_type, "ListNode*");
        assert_eq!(sig.parameters[0].declared_type, "ListNode*");
    }

    #[test]
    fn test_extract_primitive_skips_main() {
        let sig = CppAdapter.extract("int main() {\n return 0;\n}\nlong long count(int n) {\n return n;\n}");
        assert_eq!(sig.name, "count");
        assert_eq!(sig.return_type, "long long");
    }

    #[test]
    fn test_extract_generic_member() {
        let sig = CppAdapter.extract("class Solution {\npublic:\n    Node* clone(Node* node) {\n        return node;\n    }\n};");
        assert_eq!(sig.name, "clone");
        assert_eq!(sig.return_type, "Node*");
    }

    #[test]
    fn test_extract_falls_back() {
        assert_eq!(CppAdapter.extract(""), MethodSignature::unresolved("auto"));
    }

    #[test]
    fn test_declarations_precede_call() {
        let args = synth(TWO_SUM, "nums = [2,7,11,15], target = 9");
        assert_eq!(
            args.declarations,
            vec!["vector<int> arg0 = {2, 7, 11, 15};", "int arg1 = 9;"]
        );
        assert_eq!(args.expressions, vec!["arg0", "arg1"]);
    }

    #[test]
    fn test_list_gating_by_declared_pointer() {
        let source = "class Solution {\npublic:\n    ListNode* addTwoNumbers(ListNode *l1, ListNode* l2) {\n        return l1;\n    }\n};";
        let args = synth(source, "l1 = [2,4,3], l2 = [5,6,4]");
        assert_eq!(
            args.declarations,
            vec!["ListNode* arg0 = buildList({2, 4, 3});", "ListNode* arg1 = buildList({5, 6, 4});"]
        );
    }

    #[test]
    fn test_head_named_vector_stays_vector() {
        let source = "class Solution {\npublic:\n    int f(vector<int>& head) {\n        return 0;\n    }\n};";
        let args = synth(source, "head = [1,2]");
        assert_eq!(args.declarations, vec!["vector<int> arg0 = {1, 2};"]);
    }

    #[test]
    fn test_tree_and_inferred_types_without_signature() {
        let args = synth("", "root = [3,9,20,null,null,15,7], words = [\"a\",\"b\"], grid = [[1,2],[3,4]], ok = false, s = hi, x = None");
        assert_eq!(
            args.declarations,
            vec![
                "TreeNode* arg0 = buildTree({3, 9, 20, nullopt, nullopt, 15, 7});",
                "vector<string> arg1 = {\"a\", \"b\"};",
                "vector<vector<int>> arg2 = {{1, 2}, {3, 4}};",
                "bool arg3 = false;",
                "string arg4 = \"hi\";",
            ]
        );
        assert_eq!(args.expressions.last().map(String::as_str), Some("nullptr"));
    }

    #[test]
    fn test_char_and_long_declared_types() {
        let source = "class Solution {\npublic:\n    bool f(vector<vector<char>>& board, char c, long long n) {\n        return true;\n    }\n};";
        let args = synth(source, "board = [[\"a\",\"b\"]], c = \"x\", n = 5000000000");
        assert_eq!(
            args.declarations,
            vec![
                "vector<vector<char>> arg0 = {{'a', 'b'}};",
                "char arg1 = 'x';",
                "long long arg2 = 5000000000LL;",
            ]
        );
    }

    #[test]
    fn test_unparsable_array_becomes_empty_vector() {
        let args = synth(TWO_SUM, "nums = [1,2, target = 3");
        assert_eq!(args.declarations, vec!["vector<int> arg0 = {};"]);
    }

    #[test]
    fn test_assemble_calls_solution_method() {
        let signature = CppAdapter.extract(TWO_SUM);
        let args = CppAdapter.synthesize_args(&parse_parameters("[2,7,11,15], 9"), &signature);
        let program = CppAdapter.assemble(TWO_SUM, &signature, &args);
        assert!(program.preamble.starts_with("#include <iostream>"));
        assert!(program.preamble.contains("struct ListNode"));
        assert_eq!(program.user_code, TWO_SUM);
        assert!(program.driver.contains("Solution solution;"));
        assert!(program.driver.contains("auto result = solution.twoSum(arg0, arg1);"));
        assert!(program.driver.contains("catch (const exception& error)"));
    }

    #[test]
    fn test_assemble_free_function_and_void() {
        let code = "void rotate(vector<int>& nums, int k) {\n}";
        let signature = CppAdapter.extract(code);
        let args = CppAdapter.synthesize_args(&parse_parameters("[1,2,3], 1"), &signature);
        let program = CppAdapter.assemble(code, &signature, &args);
        assert!(program.driver.contains("        rotate(arg0, arg1);\n        printResult(arg0);"));
        assert!(!program.driver.contains("Solution solution;"));
    }

    #[test]
    fn test_main_passthrough_adds_missing_headers() {
        let code = "int main() { cout << 1; }";
        let program = CppAdapter.assemble(code, &MethodSignature::unresolved("auto"), &SynthesizedArgs::default());
        assert!(program.preamble.contains("#include <iostream>"));
        assert!(program.driver.is_empty());

        let with_includes = "#include <cstdio>\nint main() { puts(\"1\"); }";
        let program = CppAdapter.assemble(with_includes, &MethodSignature::unresolved("auto"), &SynthesizedArgs::default());
        assert_eq!(program.render(), format!("{}\n", with_includes));
    }

    #[test]
    fn test_radix_literals_stay_integral() {
        let args = synth("", "mask = 0b101, perms = 0o17, color = 0x1F, rate = 1e3");
        assert_eq!(
            args.declarations,
            vec!["int arg0 = 0b101;", "int arg1 = 15;", "int arg2 = 0x1F;", "double arg3 = 1e3;"]
        );
    }

    #[test]
    fn test_node_helpers_precede_user_code() {
        let signature = CppAdapter.extract(TWO_SUM);
        let program = CppAdapter.assemble(TWO_SUM, &signature, &SynthesizedArgs::default());
        assert!(program.preamble.contains("ListNode* buildList("));
        assert!(program.preamble.contains("string treeToString("));
        assert!(!program.driver.contains("buildList("));
        assert!(program.driver.contains("void printResult(ListNode* head)"));
    }

    #[test]
    fn test_user_declared_node_keeps_helpers_after_it() {
        let code = "struct ListNode {\n    int val;\n    ListNode* next;\n    ListNode(int x) : val(x), next(nullptr) {}\n};\nclass Solution {\npublic:\n    ListNode* f(ListNode* head) {\n        return head;\n    }\n};";
        let signature = CppAdapter.extract(code);
        let program = CppAdapter.assemble(code, &signature, &SynthesizedArgs::default());
        assert!(!program.preamble.contains("struct ListNode"));
        assert!(!program.preamble.contains("buildList("));
        assert!(program.preamble.contains("kMaxSerializedNodes = 10000"));
        assert!(program.preamble.contains("TreeNode* buildTree("));
        assert!(program.driver.contains("ListNode* buildList("));
        assert!(program.driver.find("buildList(").unwrap() < program.driver.find("int main()").unwrap());
    }

    #[test]
    fn test_runtime_errors_report_demangled_type() {
        let signature = CppAdapter.extract(TWO_SUM);
        let program = CppAdapter.assemble(TWO_SUM, &signature, &SynthesizedArgs::default());
        assert!(program.preamble.contains("#include <cxxabi.h>"));
        assert!(program.driver.contains("abi::__cxa_demangle"));
        assert!(program.driver.contains("demangledTypeName(typeid(error))"));
    }
}
