use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dsa_harness::engine::check_environment;
use dsa_harness::{normalize_output, wrap_code_for_execution, HarnessConfig, Judge, JudgeRequest, Language, LocalEngine};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Wrap LeetCode-style solutions into runnable programs and judge them
#[derive(Parser, Debug)]
#[command(name = "dsa-harness", version)]
struct Cli {
    /// JSON config file (falls back to $DSA_HARNESS_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the program generated for one test case
    Wrap {
        #[arg(long, short)]
        language: Language,
        /// file holding the user's solution
        #[arg(long, short)]
        code: PathBuf,
        /// test-case input, e.g. "nums = [2,7,11,15], target = 9"
        #[arg(long, short, default_value = "")]
        input: String,
    },
    /// print the canonical form of program output
    Normalize { text: String },
    /// judge a JudgeRequest and print the JudgeResponse as JSON
    Judge {
        /// request file (stdin if omitted)
        #[arg(long, short)]
        request: Option<PathBuf>,
    },
    /// report which toolchains are installed
    Check,
}

fn read_request(path: Option<&PathBuf>) -> Result<JudgeRequest> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("Invalid judge request")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.cmd {
        Command::Wrap { language, code, input } => {
            let code = std::fs::read_to_string(&code).with_context(|| format!("Failed to read {}", code.display()))?;
            print!("{}", wrap_code_for_execution(language, &code, &input, None));
        }
        Command::Normalize { text } => {
            println!("{}", normalize_output(&text));
        }
        Command::Judge { request } => {
            let request = read_request(request.as_ref())?;
            let default_limit = Duration::from_millis(config.default_time_limit_ms);
            let normalization = config.normalization.clone();
            let judge = Judge::new(LocalEngine::new(config)?)
                .with_default_time_limit(default_limit)
                .with_normalization(normalization);
            let response = judge.judge(&request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Check => {
            let statuses = check_environment(&config);
            for status in &statuses {
                match &status.path {
                    Some(path) => println!("{:<7} {:<8} {}", status.language.as_str(), status.command, path.display()),
                    None => println!("{:<7} {:<8} not found", status.language.as_str(), status.command),
                }
            }
            if statuses.iter().any(|s| !s.available()) {
                tracing::warn!("some toolchains are missing; their languages cannot be judged locally");
            }
        }
    }

    Ok(())
}
