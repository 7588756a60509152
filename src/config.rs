use crate::error::{HarnessError, Result};
use crate::types::NormalizationOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--config` flag is given
pub const CONFIG_ENV_VAR: &str = "DSA_HARNESS_CONFIG";

/// Toolchain commands and resource limits for the local engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub python_command: String,
    pub java_command: String,
    pub javac_command: String,
    pub cxx_command: String,
    /// Whitespace-separated flags passed to the C++ compiler
    pub cxx_flags: String,
    pub compile_timeout_secs: u64,
    pub max_source_bytes: usize,
    pub max_executable_bytes: u64,
    pub cache_dir: Option<PathBuf>,
    /// Compiled artifacts kept in `cache_dir`, oldest evicted first; 0 disables caching
    pub cache_max_entries: usize,
    pub default_time_limit_ms: u64,
    pub normalization: NormalizationOptions,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            python_command: "python3".to_string(),
            java_command: "java".to_string(),
            javac_command: "javac".to_string(),
            cxx_command: "g++".to_string(),
            cxx_flags: "-std=c++17 -O2".to_string(),
            compile_timeout_secs: 10,
            max_source_bytes: 256 * 1024,
            max_executable_bytes: 64 * 1024 * 1024,
            cache_dir: None,
            cache_max_entries: 64,
            default_time_limit_ms: 2000,
            normalization: NormalizationOptions::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Explicit path first, then `DSA_HARNESS_CONFIG`, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.compile_timeout_secs == 0 {
            return Err(HarnessError::Config("compile_timeout_secs must be positive".to_string()));
        }
        if self.max_source_bytes == 0 {
            return Err(HarnessError::Config("max_source_bytes must be positive".to_string()));
        }
        Ok(())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("dsa_harness_cache"))
    }

    pub fn cxx_flag_list(&self) -> Vec<&str> {
        self.cxx_flags.split_whitespace().collect()
    }
}
