use crate::classifier::parse_parameters;
use crate::lang::adapter_for;
use crate::types::{Language, MethodSignature, SynthesizedProgram};

/// Build the program for one test case without rendering it.
///
/// `signature` overrides what would be recovered from `user_code`.
pub fn prepare_program(
    language: Language,
    user_code: &str,
    raw_input: &str,
    signature: Option<&MethodSignature>,
) -> SynthesizedProgram {
    let adapter = adapter_for(language);
    let params = parse_parameters(raw_input);
    let extracted;
    let signature = match signature {
        Some(signature) => signature,
        None => {
            extracted = adapter.extract(user_code);
            &extracted
        }
    };
    if !signature.parameters.is_empty() && signature.parameters.len() != params.len() {
        tracing::debug!(
            declared = signature.parameters.len(),
            supplied = params.len(),
            "argument count differs from recovered signature"
        );
    }
    let args = adapter.synthesize_args(&params, signature);
    adapter.assemble(user_code, signature, &args)
}

/// Complete, self-contained program text for the execution engine
pub fn wrap_code_for_execution(
    language: Language,
    user_code: &str,
    raw_input: &str,
    signature: Option<&MethodSignature>,
) -> String {
    prepare_program(language, user_code, raw_input, signature).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterDecl;

    #[test]
    fn test_explicit_signature_overrides_extraction() {
        let signature = MethodSignature {
            name: "merge".to_string(),
            parameters: vec![ParameterDecl {
                name: "a".to_string(),
                declared_type: "ListNode".to_string(),
            }],
            return_type: "ListNode".to_string(),
        };
        let program = wrap_code_for_execution(
            Language::Java,
            "class Solution { public int other(int[] a) { return 0; } }",
            "a = [1,2]",
            Some(&signature),
        );
        assert!(program.contains("ListNode result = solution.merge(buildList(new int[]{1, 2}));"));
    }

    #[test]
    fn test_empty_code_still_assembles() {
        for language in [Language::Python, Language::Java, Language::Cpp] {
            let program = wrap_code_for_execution(language, "", "", None);
            assert!(!program.trim().is_empty());
        }
    }
}
