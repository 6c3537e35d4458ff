//! Report source backed by the external analysis process
//!
//! Each call to [`LiveAnalysisSource::produce`] spawns one child process,
//! drains its stdout and stderr concurrently into bounded buffers, waits for
//! it to exit under a deadline and parses stdout on success.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::config::AnalysisConfig;
use crate::models::TrendReport;
use crate::parser::parse_output;

use super::{AnalysisError, TrendSource};

const READ_CHUNK: usize = 8 * 1024;

/// Runs `<interpreter> <script>` and parses what it prints
#[derive(Debug, Clone)]
pub struct LiveAnalysisSource {
    interpreter: String,
    script_path: PathBuf,
    timeout: Duration,
    max_output_bytes: usize,
}

impl LiveAnalysisSource {
    /// Create a source with default deadline and output bound
    pub fn new(interpreter: impl Into<String>, script_path: impl Into<PathBuf>) -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            interpreter: interpreter.into(),
            script_path: script_path.into(),
            timeout: Duration::from_secs(defaults.timeout_secs),
            max_output_bytes: defaults.max_output_bytes,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            script_path: config.script_path.clone(),
            timeout: config.timeout(),
            max_output_bytes: config.max_output_bytes,
        }
    }

    /// Set the deadline for a single run
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the byte bound applied to each output stream
    #[must_use]
    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    /// Script path, joined onto the working directory when relative
    pub fn resolved_script_path(&self) -> PathBuf {
        if self.script_path.is_absolute() {
            return self.script_path.clone();
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(&self.script_path),
            Err(_) => self.script_path.clone(),
        }
    }

    /// Run the process to completion and return `(stdout, stderr)` on success
    pub async fn run(&self) -> Result<(String, String), AnalysisError> {
        let script = self.resolved_script_path();
        if !script.is_file() {
            return Err(AnalysisError::ScriptNotFound { path: script });
        }

        let mut child = self.spawn(&script)?;
        tracing::debug!(
            pid = ?child.id(),
            interpreter = %self.interpreter,
            script = %script.display(),
            "Analysis process started"
        );

        let outcome = tokio::time::timeout(
            self.timeout,
            collect(&mut child, self.max_output_bytes),
        )
        .await;

        let (status, stdout, stderr) = match outcome {
            Ok(Ok(collected)) => collected,
            Ok(Err(e)) => {
                terminate(&mut child).await;
                return Err(e);
            }
            Err(_) => {
                terminate(&mut child).await;
                return Err(AnalysisError::Timeout {
                    timeout: self.timeout,
                });
            }
        };

        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        if !status.success() {
            return Err(AnalysisError::Failed {
                status: status.code(),
                stderr,
            });
        }

        Ok((String::from_utf8_lossy(&stdout).into_owned(), stderr))
    }

    fn spawn(&self, script: &Path) -> Result<Child, AnalysisError> {
        Command::new(&self.interpreter)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AnalysisError::Launch {
                program: self.interpreter.clone(),
                source,
            })
    }
}

#[async_trait]
impl TrendSource for LiveAnalysisSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn produce(&self) -> Result<TrendReport, AnalysisError> {
        let started = Instant::now();
        let (stdout, stderr) = self.run().await?;

        if !stderr.is_empty() {
            tracing::debug!(stderr = %stderr, "Analysis process wrote to stderr");
        }

        let results = parse_output(&stdout);
        tracing::info!(
            predictions = results.predictions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis output parsed"
        );

        Ok(TrendReport::new(stdout, results))
    }
}

/// Drain both pipes concurrently, then wait for exit
async fn collect(
    child: &mut Child,
    limit: usize,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), AnalysisError> {
    let stdout = child.stdout.take().ok_or_else(|| not_captured("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| not_captured("stderr"))?;

    let (out, err) = tokio::try_join!(
        read_bounded(stdout, limit, "stdout"),
        read_bounded(stderr, limit, "stderr"),
    )?;

    let status = child.wait().await.map_err(|source| AnalysisError::Read {
        stream: "exit status",
        source,
    })?;

    Ok((status, out, err))
}

/// Read `reader` to EOF, failing once more than `limit` bytes arrive
async fn read_bounded<R>(
    mut reader: R,
    limit: usize,
    stream: &'static str,
) -> Result<Vec<u8>, AnalysisError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .map_err(|source| AnalysisError::Read { stream, source })?;
        if n == 0 {
            return Ok(buf);
        }
        if buf.len() + n > limit {
            return Err(AnalysisError::OutputTooLarge { stream, limit });
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn not_captured(stream: &'static str) -> AnalysisError {
    AnalysisError::Read {
        stream,
        source: std::io::Error::other("pipe not captured"),
    }
}

async fn terminate(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "Failed to kill analysis process");
    }
}
