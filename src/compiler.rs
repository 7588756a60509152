use crate::config::HarnessConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

/// What a compile attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Native executable, or a directory of `.class` files for Java
    Built(PathBuf),
    /// The program was rejected; carries the compiler's diagnostics
    Failed(String),
}

/// Compiles C++ and Java programs, caching artifacts on disk by program hash
pub struct Compiler {
    cxx_command: String,
    cxx_flags: Vec<String>,
    javac_command: String,
    cache_dir: PathBuf,
    cache_max_entries: usize,
    compile_timeout: Duration,
    max_executable_bytes: u64,
}

impl Compiler {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            cxx_command: config.cxx_command.clone(),
            cxx_flags: config.cxx_flag_list().into_iter().map(str::to_string).collect(),
            javac_command: config.javac_command.clone(),
            cache_dir: config.cache_dir(),
            cache_max_entries: config.cache_max_entries,
            compile_timeout: Duration::from_secs(config.compile_timeout_secs),
            max_executable_bytes: config.max_executable_bytes,
        }
    }

    fn cache_key(&self, program: &str, suffix: &str) -> PathBuf {
        let mut hasher = sha1_smol::Sha1::new();
        hasher.update(program.as_bytes());
        self.cache_dir.join(format!("{}_{}", hasher.digest(), suffix))
    }

    /// Compile a C++ program in `work_dir` and return the cached executable
    pub async fn compile_cpp(&self, program: &str, work_dir: &Path) -> Result<CompileOutcome> {
        let cache_path = self.cache_key(program, "cpp.exe");
        if self.caching() && cache_path.exists() {
            tracing::debug!(path = %cache_path.display(), "compile cache hit");
            return Ok(CompileOutcome::Built(cache_path));
        }

        let source_path = work_dir.join("solution.cpp");
        let executable_path = work_dir.join("solution.exe");
        fs::write(&source_path, program)
            .await
            .context("Failed to write source code")?;

        let mut cmd = TokioCommand::new(&self.cxx_command);
        cmd.arg("-pipe")
            .arg("-o")
            .arg(&executable_path)
            .arg(&source_path)
            .args(&self.cxx_flags);
        if let Some(diagnostics) = self.run_compiler(cmd).await? {
            return Ok(CompileOutcome::Failed(diagnostics));
        }

        if let Ok(meta) = std::fs::metadata(&executable_path) {
            if meta.len() > self.max_executable_bytes {
                return Ok(CompileOutcome::Failed(format!(
                    "Executable too large: {} bytes (limit {})",
                    meta.len(),
                    self.max_executable_bytes
                )));
            }
        }

        Ok(CompileOutcome::Built(self.store(&executable_path, &cache_path)))
    }

    /// Compile a Java source file named after its public class.
    ///
    /// Returns the directory to use as the runtime classpath.
    pub async fn compile_java(&self, program: &str, file_name: &str, work_dir: &Path) -> Result<CompileOutcome> {
        let cache_path = self.cache_key(program, "java");
        if self.caching() && cache_path.is_dir() {
            tracing::debug!(path = %cache_path.display(), "compile cache hit");
            return Ok(CompileOutcome::Built(cache_path));
        }

        let source_path = work_dir.join(file_name);
        let classes_dir = work_dir.join("classes");
        fs::write(&source_path, program)
            .await
            .context("Failed to write source code")?;
        fs::create_dir_all(&classes_dir)
            .await
            .context("Failed to create class output directory")?;

        let mut cmd = TokioCommand::new(&self.javac_command);
        cmd.arg("-encoding")
            .arg("UTF-8")
            .arg("-d")
            .arg(&classes_dir)
            .arg(&source_path);
        if let Some(diagnostics) = self.run_compiler(cmd).await? {
            return Ok(CompileOutcome::Failed(diagnostics));
        }

        Ok(CompileOutcome::Built(self.store_dir(&classes_dir, &cache_path)))
    }

    /// `Ok(Some(stderr))` when the compiler rejected the program
    async fn run_compiler(&self, mut cmd: TokioCommand) -> Result<Option<String>> {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);
        let output = match timeout(self.compile_timeout, cmd.output()).await {
            Ok(output) => output.context("Failed to execute compiler")?,
            Err(_) => {
                return Ok(Some(format!(
                    "Compilation timed out after {}s",
                    self.compile_timeout.as_secs()
                )))
            }
        };

        if output.status.success() {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&output.stderr).to_string()))
        }
    }

    fn caching(&self) -> bool {
        self.cache_max_entries > 0
    }

    /// Copy a build artifact into the cache; the uncached path is returned if that fails
    fn store(&self, built: &Path, cache_path: &Path) -> PathBuf {
        if !self.caching() {
            return built.to_path_buf();
        }
        let stored = std::fs::create_dir_all(&self.cache_dir)
            .and_then(|_| tempfile::NamedTempFile::new_in(&self.cache_dir))
            .and_then(|staged| {
                std::fs::copy(built, staged.path())?;
                staged.persist(cache_path).map_err(|e| e.error)?;
                Ok(())
            });
        match stored {
            Ok(()) => {
                self.evict();
                cache_path.to_path_buf()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to cache executable");
                built.to_path_buf()
            }
        }
    }

    fn store_dir(&self, built: &Path, cache_path: &Path) -> PathBuf {
        if !self.caching() {
            return built.to_path_buf();
        }
        let stored = std::fs::create_dir_all(&self.cache_dir)
            .and_then(|_| tempfile::tempdir_in(&self.cache_dir))
            .and_then(|staged| {
                for entry in std::fs::read_dir(built)? {
                    let entry = entry?;
                    std::fs::copy(entry.path(), staged.path().join(entry.file_name()))?;
                }
                // on failure the staged copy is removed with `staged`
                std::fs::rename(staged.path(), cache_path)
            });
        match stored {
            Ok(()) => {
                self.evict();
                cache_path.to_path_buf()
            }
            // a concurrent run may have stored the same classes first
            Err(_) if cache_path.is_dir() => cache_path.to_path_buf(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to cache class files");
                built.to_path_buf()
            }
        }
    }

    /// Drop the oldest cached artifacts until at most `cache_max_entries` remain
    fn evict(&self) {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        let mut cached: Vec<_> = entries
            .flatten()
            // skip in-flight staging files
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((modified, entry.path()))
            })
            .collect();
        if cached.len() <= self.cache_max_entries {
            return;
        }
        cached.sort();
        let excess = cached.len() - self.cache_max_entries;
        for (_, path) in cached.into_iter().take(excess) {
            let removed = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            match removed {
                Ok(()) => tracing::debug!(path = %path.display(), "evicted cached artifact"),
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "cache eviction skipped"),
            }
        }
    }
}
