//! Java adapter.
//!
//! Arguments are inline expressions; only a `void` method's first argument
//! is hoisted into a local so the driver can print it after the call.

use super::{hoist_lines, innermost_type, shape_of, LanguageAdapter, Shape};
use crate::literal::{
    c_family_number, char_literal, char_literal_of, infer_element_type, parse_array, radix_prefix, requote, scalar_text,
    ElementType,
};
use crate::signature::{clean_type, declares_type, is_candidate_name, split_parameter_list, strip_c_comments, SignatureExtractor};
use crate::types::{Kind, Language, MethodSignature, ParsedParameter, SynthesizedArgs, SynthesizedProgram};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PUBLIC_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"public\s+(?:static\s+)?(?:final\s+)?([\w<>\[\],.?\s]+?)\s+(\w+)\s*\(([^)]*)\)")
        .expect("valid java method regex")
});

static MEMBER_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?:(?:private|protected|static|final)\s+)*([\w<>\[\],.?]+(?:\s*\[\s*\])*)\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?\{",
    )
    .expect("valid java member regex")
});

pub(crate) static MAIN_METHOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"public\s+static\s+void\s+main\s*\(").expect("valid java main regex")
});

const NOT_A_TYPE: [&str; 6] = ["class", "interface", "enum", "return", "new", "else"];

const PREAMBLE: &str = "import java.util.*;\nimport java.util.stream.*;\n";

const LIST_NODE: &str = r#"
class ListNode {
    int val;
    ListNode next;
    ListNode() {}
    ListNode(int val) { this.val = val; }
    ListNode(int val, ListNode next) { this.val = val; this.next = next; }
}
"#;

const TREE_NODE: &str = r#"
class TreeNode {
    int val;
    TreeNode left;
    TreeNode right;
    TreeNode() {}
    TreeNode(int val) { this.val = val; }
    TreeNode(int val, TreeNode left, TreeNode right) {
        this.val = val;
        this.left = left;
        this.right = right;
    }
}
"#;

const MAIN_HELPERS: &str = r#"    static final int MAX_NODES = 10000;

    static ListNode buildList(int[] values) {
        ListNode dummy = new ListNode(0);
        ListNode tail = dummy;
        for (int value : values) {
            tail.next = new ListNode(value);
            tail = tail.next;
        }
        return dummy.next;
    }

    static TreeNode buildTree(Integer[] values) {
        if (values.length == 0 || values[0] == null) return null;
        TreeNode root = new TreeNode(values[0]);
        Queue<TreeNode> queue = new LinkedList<>();
        queue.add(root);
        int i = 1;
        while (!queue.isEmpty() && i < values.length) {
            TreeNode node = queue.poll();
            if (i < values.length && values[i] != null) {
                node.left = new TreeNode(values[i]);
                queue.add(node.left);
            }
            i++;
            if (i < values.length && values[i] != null) {
                node.right = new TreeNode(values[i]);
                queue.add(node.right);
            }
            i++;
        }
        return root;
    }

    static String quote(String s) {
        return "\"" + s.replace("\\", "\\\\").replace("\"", "\\\"") + "\"";
    }

    static String render(Object value, boolean nested) {
        if (value == null) return "null";
        if (value instanceof String) return nested ? quote((String) value) : (String) value;
        if (value instanceof Character) return nested ? quote(String.valueOf(value)) : String.valueOf(value);
        if (value instanceof ListNode) {
            StringJoiner out = new StringJoiner(",", "[", "]");
            ListNode node = (ListNode) value;
            for (int count = 0; node != null && count < MAX_NODES; count++) {
                out.add(render(node.val, true));
                node = node.next;
            }
            return out.toString();
        }
        if (value instanceof TreeNode) {
            List<String> items = new ArrayList<>();
            Queue<TreeNode> queue = new LinkedList<>();
            queue.add((TreeNode) value);
            while (!queue.isEmpty() && items.size() < MAX_NODES) {
                TreeNode node = queue.poll();
                if (node == null) {
                    items.add("null");
                    continue;
                }
                items.add(render(node.val, true));
                queue.add(node.left);
                queue.add(node.right);
            }
            while (!items.isEmpty() && items.get(items.size() - 1).equals("null")) {
                items.remove(items.size() - 1);
            }
            return "[" + String.join(",", items) + "]";
        }
        if (value.getClass().isArray()) {
            StringJoiner out = new StringJoiner(",", "[", "]");
            int length = java.lang.reflect.Array.getLength(value);
            for (int i = 0; i < length; i++) {
                out.add(render(java.lang.reflect.Array.get(value, i), true));
            }
            return out.toString();
        }
        if (value instanceof Map) {
            StringJoiner out = new StringJoiner(",", "{", "}");
            for (Map.Entry<?, ?> entry : ((Map<?, ?>) value).entrySet()) {
                out.add(render(entry.getKey(), true) + ":" + render(entry.getValue(), true));
            }
            return out.toString();
        }
        if (value instanceof Iterable) {
            StringJoiner out = new StringJoiner(",", "[", "]");
            for (Object item : (Iterable<?>) value) {
                out.add(render(item, true));
            }
            return out.toString();
        }
        return String.valueOf(value);
    }

    static String serializeOutput(int[] value) { return render(value, false); }
    static String serializeOutput(long[] value) { return render(value, false); }
    static String serializeOutput(double[] value) { return render(value, false); }
    static String serializeOutput(boolean[] value) { return render(value, false); }
    static String serializeOutput(char[] value) { return render(value, false); }
    static String serializeOutput(int[][] value) { return render(value, false); }
    static String serializeOutput(Object[] value) { return render(value, false); }
    static String serializeOutput(List<?> value) { return render(value, false); }
    static String serializeOutput(ListNode value) { return render(value, false); }
    static String serializeOutput(TreeNode value) { return render(value, false); }
    static String serializeOutput(Boolean value) { return render(value, false); }
    static String serializeOutput(String value) { return render(value, false); }
    static String serializeOutput(Object value) { return render(value, false); }
"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaAdapter;

fn signature_from(caps: &Captures<'_>) -> Option<MethodSignature> {
    let name = caps[2].to_string();
    let return_type = clean_type(&caps[1]);
    if !is_candidate_name(&name) || NOT_A_TYPE.contains(&return_type.as_str()) {
        return None;
    }
    Some(MethodSignature {
        name,
        parameters: split_parameter_list(&caps[3]),
        return_type,
    })
}

impl SignatureExtractor for JavaAdapter {
    fn extract(&self, source: &str) -> MethodSignature {
        let source = strip_c_comments(source);
        let found = PUBLIC_METHOD
            .captures_iter(&source)
            .find_map(|caps| signature_from(&caps))
            .or_else(|| MEMBER_METHOD.captures_iter(&source).find_map(|caps| signature_from(&caps)));
        match found {
            Some(signature) => {
                tracing::debug!(method = %signature.name, params = signature.parameters.len(), "java signature");
                signature
            }
            None => {
                tracing::debug!("no java method found, using fallback signature");
                MethodSignature::unresolved("Object")
            }
        }
    }
}

impl LanguageAdapter for JavaAdapter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn synthesize_args(&self, params: &[ParsedParameter], signature: &MethodSignature) -> SynthesizedArgs {
        let mut args = SynthesizedArgs {
            declarations: Vec::new(),
            expressions: params
                .iter()
                .enumerate()
                .map(|(i, param)| argument(param, signature.declared_type(i)))
                .collect(),
        };
        if signature.returns_void() && !args.expressions.is_empty() {
            let declared = signature
                .declared_type(0)
                .filter(|t| !t.is_empty())
                .unwrap_or("var");
            let first = std::mem::replace(&mut args.expressions[0], "arg0".to_string());
            args.declarations.push(format!("{} arg0 = {};", declared, first));
        }
        args
    }

    fn assemble(&self, user_code: &str, signature: &MethodSignature, args: &SynthesizedArgs) -> SynthesizedProgram {
        let stripped = strip_c_comments(user_code);
        if MAIN_METHOD.is_match(&stripped) || declares_type(user_code, "Main") {
            return SynthesizedProgram::passthrough(String::new(), user_code);
        }

        let (imports, body) = hoist_lines(user_code, |line| line.starts_with("import "));
        let body = if declares_type(&body, "Solution") {
            body
        } else {
            format!("class Solution {{\n{}\n}}", body)
        };

        SynthesizedProgram {
            preamble: preamble(&imports, user_code),
            user_code: body,
            driver: driver(signature, args),
        }
    }
}

fn preamble(imports: &[String], user_code: &str) -> String {
    let mut out = String::from(PREAMBLE);
    for import in imports {
        out.push_str(import);
        out.push('\n');
    }
    if !declares_type(user_code, "ListNode") {
        out.push_str(LIST_NODE);
    }
    if !declares_type(user_code, "TreeNode") {
        out.push_str(TREE_NODE);
    }
    out
}

fn driver(signature: &MethodSignature, args: &SynthesizedArgs) -> String {
    let mut main = String::new();
    main.push_str("            Solution solution = new Solution();\n");
    for declaration in &args.declarations {
        main.push_str(&format!("            {}\n", declaration));
    }
    let call = format!("solution.{}({})", signature.name, args.expressions.join(", "));
    if signature.returns_void() {
        main.push_str(&format!("            {};\n", call));
        if !args.expressions.is_empty() {
            main.push_str("            System.out.println(serializeOutput(arg0));\n");
        }
    } else {
        main.push_str(&format!("            {} result = {};\n", signature.return_type, call));
        main.push_str("            System.out.println(serializeOutput(result));\n");
    }

    format!(
        "\nclass Main {{\n{helpers}\n    public static void main(String[] args) {{\n        try {{\n{main}        }} catch (Throwable error) {{\n            \
         System.err.println(\"Runtime Error: \" + error.getClass().getSimpleName() + \": \" + error.getMessage());\n            \
         error.printStackTrace();\n            System.exit(1);\n        }}\n    }}\n}}\n",
        helpers = MAIN_HELPERS,
        main = main,
    )
}

fn argument(param: &ParsedParameter, declared: Option<&str>) -> String {
    let raw = param.raw_value.trim();
    let declared = declared.map(str::trim).filter(|t| !t.is_empty());
    match param.kind {
        Kind::Null => "null".to_string(),
        Kind::Boolean => raw.to_lowercase(),
        Kind::Number => number(raw, declared),
        Kind::String => match declared {
            Some("char") | Some("Character") => char_literal(raw),
            _ => requote(raw),
        },
        Kind::Array | Kind::Array2D | Kind::LinkedList | Kind::Tree => {
            let items = parse_array(raw);
            match shape_of(param.kind, declared, "ListNode", "TreeNode") {
                Shape::LinkedList => {
                    let values = items.unwrap_or_default();
                    format!("buildList(new int[]{{{}}})", join(&values, ElementKind::Int))
                }
                Shape::Tree => {
                    let values = items.unwrap_or_default();
                    format!("buildTree(new Integer[]{{{}}})", join(&values, ElementKind::Int))
                }
                Shape::Array => array(param.kind, items, declared),
            }
        }
    }
}

fn number(raw: &str, declared: Option<&str>) -> String {
    let raw = c_family_number(raw);
    // `0x1Ff` would read as hex digits, so prefixed literals rely on widening instead
    let radix = radix_prefix(&raw);
    let integral = radix.is_some() || !raw.contains(&['.', 'e', 'E'][..]);
    let value = match radix {
        Some(radix) => i64::from_str_radix(&raw[2..], radix).ok(),
        None => raw.parse::<i64>().ok(),
    };
    match declared {
        Some("long") | Some("Long") if !raw.ends_with(&['L', 'l'][..]) => format!("{}L", raw),
        Some("double") | Some("Double") if integral && radix.is_none() => format!("{}.0", raw),
        Some("float") | Some("Float") if radix.is_none() => format!("{}f", raw),
        None if integral && value.map_or(false, |n| i32::try_from(n).is_err()) => format!("{}L", raw),
        _ => raw,
    }
}

/// Element rendering policy derived from a Java element type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Int,
    Long,
    Double,
    Float,
    Char,
    Other,
}

impl ElementKind {
    fn from_java(element: &str) -> Self {
        match element {
            "long" | "Long" => ElementKind::Long,
            "double" | "Double" => ElementKind::Double,
            "float" | "Float" => ElementKind::Float,
            "char" | "Character" => ElementKind::Char,
            "int" | "Integer" | "short" | "byte" => ElementKind::Int,
            _ => ElementKind::Other,
        }
    }
}

fn element(value: &Value, kind: ElementKind) -> String {
    match (value, kind) {
        (Value::Array(items), _) => format!("{{{}}}", join(items, kind)),
        (Value::String(s), ElementKind::Char) => char_literal_of(s.chars().next().unwrap_or(' ')),
        (Value::Number(n), ElementKind::Long) => format!("{}L", n),
        (Value::Number(n), ElementKind::Float) => format!("{}f", n),
        (Value::Number(n), ElementKind::Double) if !n.is_f64() => format!("{}.0", n),
        (other, _) => scalar_text(other, "null"),
    }
}

fn join(items: &[Value], kind: ElementKind) -> String {
    items
        .iter()
        .map(|v| element(v, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

fn java_element_name(element: ElementType) -> &'static str {
    match element {
        ElementType::Int => "int",
        ElementType::Long => "long",
        ElementType::Double => "double",
        ElementType::Boolean => "boolean",
        ElementType::Str => "String",
    }
}

fn array(kind: Kind, items: Option<Vec<Value>>, declared: Option<&str>) -> String {
    if let Some(list_type) = declared.filter(|t| t.starts_with("List<") || t.starts_with("ArrayList<")) {
        let leaf = ElementKind::from_java(innermost_type(list_type));
        return list_of(&items.unwrap_or_default(), leaf);
    }

    let (element_name, dims) = match declared.and_then(array_type) {
        Some((element, dims)) => (element.to_string(), dims),
        None => {
            let inferred = items.as_deref().map(infer_element_type).unwrap_or(ElementType::Int);
            let dims = if kind == Kind::Array2D { 2 } else { 1 };
            (java_element_name(inferred).to_string(), dims)
        }
    };
    let brackets = "[]".repeat(dims);
    let body = join(&items.unwrap_or_default(), ElementKind::from_java(&element_name));
    format!("new {}{}{{{}}}", element_name, brackets, body)
}

/// `int[][]` -> (`int`, 2)
fn array_type(declared: &str) -> Option<(&str, usize)> {
    let compact = declared.trim();
    let mut element = compact;
    let mut dims = 0;
    while let Some(stripped) = element.strip_suffix("[]") {
        element = stripped.trim_end();
        dims += 1;
    }
    (dims > 0).then_some((element, dims))
}

fn list_of(items: &[Value], kind: ElementKind) -> String {
    let rendered: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Array(inner) => list_of(inner, kind),
            other => element(other, kind),
        })
        .collect();
    format!("new ArrayList<>(Arrays.asList({}))", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::parse_parameters;

    fn synth(source: &str, input: &str) -> SynthesizedArgs {
        let signature = JavaAdapter.extract(source);
        JavaAdapter.synthesize_args(&parse_parameters(input), &signature)
    }

    #[test]
    fn test_extract_public_method() {
        let sig = JavaAdapter.extract(
            "class Solution {\n    public int[] twoSum(int[] nums, int target) {\n        return null;\n    }\n}",
        );
        assert_eq!(sig.name, "twoSum");
        assert_eq!(sig.return_type, "int[]");
        assert_eq!(sig.parameters.len(), 2);
        assert_eq!(sig.parameters[1].declared_type, "int");
    }

    #[test]
    fn test_extract_generic_return() {
        let sig = JavaAdapter.extract("public List<List<Integer>> threeSum(int[] nums) { }");
        assert_eq!(sig.name, "threeSum");
        assert_eq!(sig.return_type, "List<List<Integer>>");
    }

    #[test]
    fn test_extract_skips_main_and_falls_back() {
        let sig = JavaAdapter.extract("public static void main(String[] args) {}");
        assert_eq!(sig.name, "solve");
        let sig = JavaAdapter.extract("");
        assert_eq!(sig, MethodSignature::unresolved("Object"));
    }

    #[test]
    fn test_extract_package_private_method() {
        let sig = JavaAdapter.extract("class Solution {\n    int climb(int n) {\n        return n;\n    }\n}");
        assert_eq!(sig.name, "climb");
        assert_eq!(sig.parameters[0].name, "n");
    }

    #[test]
    fn test_linked_list_gated_on_declared_type() {
        let args = synth(
            "class Solution { public ListNode addTwo(ListNode l1, ListNode l2) { return l1; } }",
            "l1 = [2,4,3], l2 = [5,6,4]",
        );
        assert_eq!(
            args.expressions,
            vec!["buildList(new int[]{2, 4, 3})", "buildList(new int[]{5, 6, 4})"]
        );
    }

    #[test]
    fn test_head_named_array_stays_array() {
        let args = synth(
            "class Solution { public int sum(int[] head) { return 0; } }",
            "head = [1,2]",
        );
        assert_eq!(args.expressions, vec!["new int[]{1, 2}"]);
    }

    #[test]
    fn test_kind_decides_without_signature() {
        let args = synth("", "head = [1,2], root = [1,null,2]");
        assert_eq!(
            args.expressions,
            vec!["buildList(new int[]{1, 2})", "buildTree(new Integer[]{1, null, 2})"]
        );
    }

    #[test]
    fn test_arrays_and_scalars() {
        let args = synth("", "a = [\"x\",\"y\"], b = [[1,2],[3]], c = 'q', d = True, e = None, f = []");
        assert_eq!(
            args.expressions,
            vec![
                "new String[]{\"x\", \"y\"}",
                "new int[][]{{1, 2}, {3}}",
                "\"q\"",
                "true",
                "null",
                "new int[]{}"
            ]
        );
    }

    #[test]
    fn test_declared_types_shape_literals() {
        let args = synth(
            "public long f(char[] cs, long n, List<Integer> xs, char c, double d) {}",
            "cs = [\"a\",\"b\"], n = 3, xs = [1,2], c = \"z\", d = 2",
        );
        assert_eq!(
            args.expressions,
            vec![
                "new char[]{'a', 'b'}",
                "3L",
                "new ArrayList<>(Arrays.asList(1, 2))",
                "'z'",
                "2.0"
            ]
        );
    }

    #[test]
    fn test_unparsable_array_becomes_empty() {
        let args = synth("public int f(int[] nums) {}", "nums = [1,2");
        assert_eq!(args.expressions, vec!["new int[]{}"]);
    }

    #[test]
    fn test_void_method_hoists_first_argument() {
        let args = synth("public void rotate(int[] nums, int k) {}", "nums = [1,2,3], k = 1");
        assert_eq!(args.declarations, vec!["int[] arg0 = new int[]{1, 2, 3};"]);
        assert_eq!(args.expressions, vec!["arg0", "1"]);
    }

    #[test]
    fn test_main_passthrough() {
        let code = "public class Main { public static void main(String[] a) {} }";
        let program = JavaAdapter.assemble(code, &MethodSignature::unresolved("Object"), &SynthesizedArgs::default());
        assert_eq!(program.render(), format!("{}\n", code));
    }

    #[test]
    fn test_assembly_hoists_imports_and_builds_main() {
        let code = "import java.math.BigInteger;\nclass Solution {\n    public int one() { return 1; }\n}";
        let signature = JavaAdapter.extract(code);
        let program = JavaAdapter.assemble(code, &signature, &SynthesizedArgs::default());
        assert!(program.preamble.contains("import java.math.BigInteger;"));
        assert!(program.preamble.contains("class ListNode"));
        assert!(!program.user_code.contains("import"));
        assert_eq!(program.user_code.lines().count(), code.lines().count());
        assert!(program.driver.contains("int result = solution.one();"));
        assert!(program.driver.contains("\"Runtime Error: \" + error.getClass().getSimpleName()"));
    }

    #[test]
    fn test_user_defined_list_node_is_not_redeclared() {
        let code = "class ListNode { int val; ListNode next; ListNode(int v) { val = v; } }\nclass Solution {}";
        let program = JavaAdapter.assemble(code, &MethodSignature::unresolved("Object"), &SynthesizedArgs::default());
        assert!(!program.preamble.contains("class ListNode"));
        assert!(program.preamble.contains("class TreeNode"));
    }

    #[test]
    fn test_bare_method_is_wrapped_in_solution() {
        let program = JavaAdapter.assemble("", &MethodSignature::unresolved("Object"), &SynthesizedArgs::default());
        assert!(program.user_code.starts_with("class Solution {"));
        assert!(program.driver.contains("Object result = solution.solve();"));
    }

    #[test]
    fn test_radix_literals() {
        let args = synth(
            "public long f(int mask, int perms, double d, float g, long n) {}",
            "mask = 0b101, perms = 0o17, d = 0x10, g = 0x1F, n = 0xFF",
        );
        assert_eq!(args.expressions, vec!["0b101", "15", "0x10", "0x1F", "0xFFL"]);
        assert_eq!(synth("", "x = 0x1FFFFFFFF").expressions, vec!["0x1FFFFFFFFL"]);
    }
}
