use crate::types::*;
use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command as TokioCommand;

/// Prefix generated drivers put on the line describing an uncaught exception
pub const RUNTIME_ERROR_PREFIX: &str = "Runtime Error:";

/// Runs a prepared command under a wall-clock limit
pub struct Executor {
    time_limit: Duration,
}

impl Executor {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    /// Execute `cmd`, feeding `input` on stdin
    pub async fn execute(&self, mut cmd: TokioCommand, input: &str) -> Result<ExecutionResult> {
        let start_time = Instant::now();

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context("Failed to start process")?;

        // Closing stdin after the write lets programs that read to EOF finish
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                // the program may exit without reading its input
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to write to stdin");
                }
            }
        }

        let mut stdout_opt = child.stdout.take();
        let mut stderr_opt = child.stderr.take();

        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(s) = stdout_opt.as_mut() {
                let _ = s.read_to_end(&mut buf).await;
            }
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(s) = stderr_opt.as_mut() {
                let _ = s.read_to_end(&mut buf).await;
            }
            buf
        });

        let wait_result = tokio::time::timeout(self.time_limit, child.wait()).await;
        let execution_time = start_time.elapsed().as_millis() as u64;

        match wait_result {
            Ok(Ok(status)) => {
                let stdout_buf = stdout_task.await.unwrap_or_default();
                let stderr_buf = stderr_task.await.unwrap_or_default();
                let output = String::from_utf8_lossy(&stdout_buf).to_string();
                if status.success() {
                    return Ok(ExecutionResult {
                        status: ExecutionStatus::Ok,
                        output,
                        error: None,
                        execution_time,
                    });
                }
                let stderr = String::from_utf8_lossy(&stderr_buf);
                let error = runtime_error_line(&stderr)
                    .map(str::to_string)
                    .unwrap_or_else(|| match stderr.trim() {
                        "" => format!("Process exited with {}", status),
                        text => text.to_string(),
                    });
                Ok(ExecutionResult {
                    status: ExecutionStatus::RuntimeError,
                    output,
                    error: Some(error),
                    execution_time,
                })
            }
            Ok(Err(e)) => Ok(ExecutionResult::failed(
                ExecutionStatus::RuntimeError,
                format!("Process error: {}", e),
                execution_time,
            )),
            Err(_) => {
                let _ = child.kill().await;
                let _ = child.wait().await;
                let _ = stdout_task.await;
                let _ = stderr_task.await;
                tracing::debug!(limit_ms = self.time_limit.as_millis() as u64, "process killed on timeout");
                Ok(ExecutionResult::failed(
                    ExecutionStatus::TimeLimitExceeded,
                    "Time limit exceeded",
                    execution_time,
                ))
            }
        }
    }
}

/// The driver's one-line exception summary, if the program printed one
pub fn runtime_error_line(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(RUNTIME_ERROR_PREFIX))
}
