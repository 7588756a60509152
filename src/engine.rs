//! Execution engines: something that takes a complete program and runs it.

use crate::compiler::{CompileOutcome, Compiler};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::executor::Executor;
use crate::lang::java::MAIN_METHOD;
use crate::sandbox::Sandbox;
use crate::types::*;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command as TokioCommand;

#[allow(async_fn_in_trait)]
pub trait ExecutionEngine {
    /// Run an assembled program once. `Err` means the engine itself failed,
    /// not the program.
    async fn run(&self, language: Language, program: &str, stdin: &str, time_limit: Duration) -> Result<ExecutionResult>;
}

static PUBLIC_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpublic\s+(?:final\s+|abstract\s+)*class\s+(\w+)").expect("valid regex"));
static CLASS_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+(\w+)").expect("valid regex"));

/// Source file name and class to launch for a Java program
pub fn java_layout(program: &str) -> (String, String) {
    let file_class = PUBLIC_CLASS
        .captures(program)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "Main".to_string());
    let main_class = MAIN_METHOD
        .find(program)
        .and_then(|m| CLASS_DECL.captures_iter(&program[..m.start()]).last())
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "Main".to_string());
    (format!("{}.java", file_class), main_class)
}

/// Runs programs with the locally installed toolchains
pub struct LocalEngine {
    config: HarnessConfig,
    compiler: Compiler,
    sandbox: Sandbox,
}

impl LocalEngine {
    pub fn new(config: HarnessConfig) -> Result<Self> {
        let sandbox = Sandbox::new().context("Failed to create sandbox")?;
        Ok(Self {
            compiler: Compiler::new(&config),
            config,
            sandbox,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Build the launch command, or the compiler's rejection
    async fn prepare(&self, language: Language, program: &str, work_dir: &std::path::Path) -> Result<std::result::Result<TokioCommand, String>> {
        match language {
            Language::Python => {
                let source_path = work_dir.join("solution.py");
                tokio::fs::write(&source_path, program)
                    .await
                    .context("Failed to write source code")?;
                let mut cmd = TokioCommand::new(&self.config.python_command);
                cmd.arg(&source_path).current_dir(work_dir);
                Ok(Ok(cmd))
            }
            Language::Java => {
                let (file_name, main_class) = java_layout(program);
                match self.compiler.compile_java(program, &file_name, work_dir).await? {
                    CompileOutcome::Built(classpath) => {
                        let mut cmd = TokioCommand::new(&self.config.java_command);
                        cmd.arg("-cp").arg(classpath).arg(main_class).current_dir(work_dir);
                        Ok(Ok(cmd))
                    }
                    CompileOutcome::Failed(diagnostics) => Ok(Err(diagnostics)),
                }
            }
            Language::Cpp => match self.compiler.compile_cpp(program, work_dir).await? {
                CompileOutcome::Built(executable) => {
                    let mut cmd = TokioCommand::new(executable);
                    cmd.current_dir(work_dir);
                    Ok(Ok(cmd))
                }
                CompileOutcome::Failed(diagnostics) => Ok(Err(diagnostics)),
            },
        }
    }
}

impl ExecutionEngine for LocalEngine {
    async fn run(&self, language: Language, program: &str, stdin: &str, time_limit: Duration) -> Result<ExecutionResult> {
        if program.len() > self.config.max_source_bytes {
            let err = HarnessError::SourceTooLarge {
                size: program.len(),
                limit: self.config.max_source_bytes,
            };
            return Ok(ExecutionResult::failed(ExecutionStatus::CompileError, err.to_string(), 0));
        }

        let run_dir = self.sandbox.run_dir()?;
        let cmd = match self.prepare(language, program, run_dir.path()).await? {
            Ok(cmd) => cmd,
            Err(diagnostics) => {
                tracing::debug!(%language, "compilation failed");
                return Ok(ExecutionResult::failed(
                    ExecutionStatus::CompileError,
                    format!("Compilation failed: {}", diagnostics),
                    0,
                ));
            }
        };

        Executor::new(time_limit).execute(cmd, stdin).await
    }
}

/// Whether the command a language needs is on `PATH`
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub language: Language,
    pub command: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub fn available(&self) -> bool {
        self.path.is_some()
    }
}

/// Locate every interpreter and compiler named in `config`
pub fn check_environment(config: &HarnessConfig) -> Vec<ToolStatus> {
    let tools = [
        (Language::Python, &config.python_command),
        (Language::Java, &config.javac_command),
        (Language::Java, &config.java_command),
        (Language::Cpp, &config.cxx_command),
    ];
    tools
        .into_iter()
        .map(|(language, command)| ToolStatus {
            language,
            command: command.clone(),
            path: which::which(command).ok(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_layout_for_wrapped_program() {
        let program = "import java.util.*;\nclass Solution {}\nclass Main {\n    public static void main(String[] args) {}\n}";
        assert_eq!(java_layout(program), ("Main.java".to_string(), "Main".to_string()));
    }

    #[test]
    fn test_java_layout_for_public_class_with_main() {
        let program = "public class Runner {\n    public static void main(String[] args) {}\n}";
        assert_eq!(java_layout(program), ("Runner.java".to_string(), "Runner".to_string()));
    }

    #[test]
    fn test_java_layout_public_solution_keeps_driver() {
        let program = "public class Solution {}\nclass Main {\n    public static void main(String[] a) {}\n}";
        assert_eq!(java_layout(program), ("Solution.java".to_string(), "Main".to_string()));
    }

    #[tokio::test]
    async fn test_oversized_program_is_rejected_before_running() {
        let config = HarnessConfig {
            max_source_bytes: 8,
            ..HarnessConfig::default()
        };
        let engine = LocalEngine::new(config).unwrap();
        let result = engine
            .run(Language::Python, "print('too long')", "", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(result.status, ExecutionStatus::CompileError);
        assert!(result.error.unwrap().starts_with("Source too large"));
    }

    #[test]
    fn test_check_environment_lists_every_tool() {
        let statuses = check_environment(&HarnessConfig::default());
        let commands: Vec<_> = statuses.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(commands, vec!["python3", "javac", "java", "g++"]);
    }
}
