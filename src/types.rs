use crate::error::HarnessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    Cpp,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            other => Err(HarnessError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Semantic type tag assigned to a test-case value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Array,
    Array2D,
    String,
    Number,
    Boolean,
    Null,
    LinkedList,
    Tree,
}

/// One `name = value` segment of a raw test-case input, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub raw_value: String,
}

/// One classified test-case argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedParameter {
    pub name: String,
    pub raw_value: String,
    pub kind: Kind,
}

/// A declared parameter recovered from user source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    pub declared_type: String,
}

/// Method name used when nothing better can be recovered from the source
pub const DEFAULT_METHOD_NAME: &str = "solve";

/// Recovered shape of the user's callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: String,
}

impl MethodSignature {
    /// Signature used when extraction finds nothing
    pub fn unresolved(return_type: &str) -> Self {
        Self {
            name: DEFAULT_METHOD_NAME.to_string(),
            parameters: Vec::new(),
            return_type: return_type.to_string(),
        }
    }

    /// Declared type of the parameter at `index`, if the extractor found one
    pub fn declared_type(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(|p| p.declared_type.as_str())
    }

    pub fn returns_void(&self) -> bool {
        self.return_type.trim() == "void"
    }
}

/// Language-native argument expressions plus any statements that must precede the call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesizedArgs {
    pub declarations: Vec<String>,
    pub expressions: Vec<String>,
}

/// The program handed to an execution engine, kept as separate segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedProgram {
    pub preamble: String,
    pub user_code: String,
    pub driver: String,
}

impl SynthesizedProgram {
    /// A program that is run exactly as the user wrote it
    pub fn passthrough(preamble: String, user_code: &str) -> Self {
        Self {
            preamble,
            user_code: user_code.to_string(),
            driver: String::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.preamble.len() + self.user_code.len() + self.driver.len() + 2,
        );
        for segment in [&self.preamble, &self.user_code, &self.driver] {
            if segment.is_empty() {
                continue;
            }
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(segment);
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Represents a test case for a problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// LeetCode-style argument list, e.g. `nums = [2,7,11,15], target = 9`
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Represents a programming problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub time_limit: u64, // in milliseconds
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Difficulty levels for problems
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// How a single program run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Ok,
    CompileError,
    RuntimeError,
    TimeLimitExceeded,
}

/// Result of code execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub output: String,
    pub error: Option<String>,
    pub execution_time: u64, // in milliseconds
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.status == ExecutionStatus::Ok
    }

    pub fn failed(status: ExecutionStatus, error: impl Into<String>, execution_time: u64) -> Self {
        Self {
            status,
            output: String::new(),
            error: Some(error.into()),
            execution_time,
        }
    }
}

/// Result of test case evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub test_case_id: usize,
    pub passed: bool,
    pub execution_result: ExecutionResult,
    pub expected_output: String,
    pub actual_output: String,
}

/// Overall submission result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub problem_id: String,
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
    pub test_case_results: Vec<TestCaseResult>,
    pub total_execution_time: u64,
    pub score: f64, // percentage
}

/// Output comparison switches applied on top of canonical normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    pub normalize_crlf: bool,
    pub ignore_extra_whitespace: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            normalize_crlf: true,
            ignore_extra_whitespace: true,
        }
    }
}

/// Request to wrap, run and judge code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub code: String,
    pub problem: Problem,
    pub language: Language,
    /// Overrides the signature recovered from `code`
    #[serde(default)]
    pub method_signature: Option<MethodSignature>,
    /// Falls back to the judge's configured options when absent
    #[serde(default)]
    pub normalization: Option<NormalizationOptions>,
}

/// Verdict for a whole submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Accepted,
    WrongAnswer,
    CompileError,
    RuntimeError,
    TimeLimitExceeded,
}

/// Response from judge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeResponse {
    pub success: bool,
    pub result: Option<SubmissionResult>,
    pub error: Option<String>,
    pub status: OverallStatus,
}
