use crate::engine::ExecutionEngine;
use crate::normalizer::normalize_with;
use crate::types::*;
use crate::wrapper::wrap_code_for_execution;
use anyhow::Result;
use futures::future::join_all;
use std::time::Duration;

/// Orchestrates wrapping, execution and evaluation of a submission
pub struct Judge<E> {
    engine: E,
    default_time_limit: Duration,
    normalization: NormalizationOptions,
}

impl<E: ExecutionEngine> Judge<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            default_time_limit: Duration::from_millis(2000),
            normalization: NormalizationOptions::default(),
        }
    }

    /// Comparison options for requests that carry none
    pub fn with_normalization(mut self, normalization: NormalizationOptions) -> Self {
        self.normalization = normalization;
        self
    }

    /// Used for problems whose `time_limit` is 0
    pub fn with_default_time_limit(mut self, limit: Duration) -> Self {
        self.default_time_limit = limit;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Process a judge request and return results
    pub async fn judge(&self, request: &JudgeRequest) -> Result<JudgeResponse> {
        let time_limit = match request.problem.time_limit {
            0 => self.default_time_limit,
            ms => Duration::from_millis(ms),
        };

        let runs = request
            .problem
            .test_cases
            .iter()
            .enumerate()
            .map(|(i, test_case)| self.run_test_case(request, i, test_case, time_limit));
        let test_case_results = join_all(runs).await;

        let total_execution_time = test_case_results.iter().map(|r| r.execution_result.execution_time).sum();
        let passed_count = test_case_results.iter().filter(|r| r.passed).count();
        let score = if test_case_results.is_empty() {
            100.0
        } else {
            (passed_count as f64 / test_case_results.len() as f64) * 100.0
        };

        let status = overall_status(&test_case_results);
        let error = test_case_results
            .iter()
            .find(|r| !r.passed && r.execution_result.error.is_some())
            .and_then(|r| r.execution_result.error.clone());
        tracing::info!(
            problem = %request.problem.id,
            passed = passed_count,
            total = test_case_results.len(),
            ?status,
            "submission judged"
        );

        Ok(JudgeResponse {
            success: status != OverallStatus::CompileError,
            result: Some(SubmissionResult {
                problem_id: request.problem.id.clone(),
                total_test_cases: test_case_results.len(),
                passed_test_cases: passed_count,
                test_case_results,
                total_execution_time,
                score,
            }),
            error,
            status,
        })
    }

    async fn run_test_case(
        &self,
        request: &JudgeRequest,
        index: usize,
        test_case: &TestCase,
        time_limit: Duration,
    ) -> TestCaseResult {
        let program = wrap_code_for_execution(
            request.language,
            &request.code,
            &test_case.input,
            request.method_signature.as_ref(),
        );

        let execution_result = self
            .engine
            .run(request.language, &program, "", time_limit)
            .await
            .unwrap_or_else(|e| {
                ExecutionResult::failed(ExecutionStatus::RuntimeError, format!("Execution error: {:#}", e), 0)
            });

        let opts = request.normalization.as_ref().unwrap_or(&self.normalization);
        let passed = execution_result.success()
            && normalize_with(&execution_result.output, opts) == normalize_with(&test_case.expected_output, opts);
        tracing::debug!(test_case = index, passed, status = ?execution_result.status, "test case finished");

        TestCaseResult {
            test_case_id: index,
            passed,
            actual_output: execution_result.output.clone(),
            expected_output: test_case.expected_output.clone(),
            execution_result,
        }
    }
}

/// Worst outcome wins: compile error, then time limit, then runtime error
pub fn overall_status(results: &[TestCaseResult]) -> OverallStatus {
    let any = |status: ExecutionStatus| results.iter().any(|r| r.execution_result.status == status);
    if results.iter().all(|r| r.passed) {
        OverallStatus::Accepted
    } else if any(ExecutionStatus::CompileError) {
        OverallStatus::CompileError
    } else if any(ExecutionStatus::TimeLimitExceeded) {
        OverallStatus::TimeLimitExceeded
    } else if any(ExecutionStatus::RuntimeError) {
        OverallStatus::RuntimeError
    } else {
        OverallStatus::WrongAnswer
    }
}
