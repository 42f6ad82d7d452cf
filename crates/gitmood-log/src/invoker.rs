// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! `git log` invocation
//!
//! Builds the history query as an argument vector (never a shell string),
//! runs it in the repository directory and captures its output under a byte
//! cap.

use crate::commit::CommitRecord;
use crate::error::{LogError, LogResult};
use crate::parser::parse_commit_output;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Smallest number of commits a query will request
pub const MIN_LIMIT: usize = 1;
/// Largest number of commits a query will request
pub const MAX_LIMIT: usize = 1000;
/// Commit limit used when none is given
pub const DEFAULT_LIMIT: usize = 20;

/// One mebibyte
pub const BYTES_PER_MB: usize = 1024 * 1024;
/// Lower bound of the output buffer, in megabytes
pub const MIN_OUTPUT_MB: usize = 1;
/// Upper bound of the output buffer, in megabytes
pub const MAX_OUTPUT_MB: usize = 100;
/// Output buffer used when none is given, in megabytes
pub const DEFAULT_OUTPUT_MB: usize = 10;

/// Program invoked when no override is set
pub const DEFAULT_GIT_PROGRAM: &str = "git";

const FULL_DIFF_FORMAT: &str = "--pretty=format:COMMIT: %s%nAUTHOR: %an%nDATE: %ad%n";
const STAT_FORMAT: &str = "--pretty=format:COMMIT: %s%nAUTHOR: %an%nDATE: %ad%n--STATS--%n";

/// What git emits after each commit header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogMode {
    /// Complete unified diff (`git log -p`)
    #[default]
    FullDiff,
    /// Per-file change summary (`git log --stat`)
    StatOnly,
}

impl LogMode {
    /// Select a mode from a "full diff?" flag
    #[must_use]
    pub fn from_full_diff(full_diff: bool) -> Self {
        if full_diff {
            Self::FullDiff
        } else {
            Self::StatOnly
        }
    }

    /// Whether this mode produces diffs
    #[must_use]
    pub fn is_full_diff(self) -> bool {
        matches!(self, Self::FullDiff)
    }

    fn change_flag(self) -> &'static str {
        match self {
            Self::FullDiff => "-p",
            Self::StatOnly => "--stat",
        }
    }

    fn pretty_format(self) -> &'static str {
        match self {
            Self::FullDiff => FULL_DIFF_FORMAT,
            Self::StatOnly => STAT_FORMAT,
        }
    }
}

/// Floor a requested commit count and clamp it to `[MIN_LIMIT, MAX_LIMIT]`
///
/// Out-of-range values are coerced, never rejected. NaN becomes
/// [`MIN_LIMIT`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_limit(requested: f64) -> usize {
    if requested.is_nan() {
        return MIN_LIMIT;
    }
    // Bounds are small integers, so the cast after clamping is exact.
    requested.floor().clamp(MIN_LIMIT as f64, MAX_LIMIT as f64) as usize
}

/// Clamp an output cap in bytes to `[1 MiB, 100 MiB]`
#[must_use]
pub fn clamp_max_output_bytes(bytes: usize) -> usize {
    bytes.clamp(MIN_OUTPUT_MB * BYTES_PER_MB, MAX_OUTPUT_MB * BYTES_PER_MB)
}

/// Clamp an output cap in megabytes to `[1, 100]` and convert it to bytes
#[must_use]
pub fn clamp_max_output_mb(megabytes: i64) -> usize {
    let mb = usize::try_from(megabytes.max(0)).unwrap_or(MAX_OUTPUT_MB);
    mb.clamp(MIN_OUTPUT_MB, MAX_OUTPUT_MB) * BYTES_PER_MB
}

/// A single history query against one repository
///
/// Every setter sanitizes its input, so a constructed query is always within
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    repo_path: PathBuf,
    limit: usize,
    mode: LogMode,
    max_output_bytes: usize,
    program: String,
}

impl LogQuery {
    /// Create a full-diff query for the latest [`DEFAULT_LIMIT`] commits
    #[must_use]
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            limit: DEFAULT_LIMIT,
            mode: LogMode::FullDiff,
            max_output_bytes: DEFAULT_OUTPUT_MB * BYTES_PER_MB,
            program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }

    /// Set the number of commits (floored, then clamped)
    #[must_use]
    pub fn with_limit(mut self, requested: f64) -> Self {
        self.limit = clamp_limit(requested);
        self
    }

    /// Set the output mode
    #[must_use]
    pub fn with_mode(mut self, mode: LogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Request `--stat` summaries instead of diffs
    #[must_use]
    pub fn stat_only(self) -> Self {
        self.with_mode(LogMode::StatOnly)
    }

    /// Set the output cap in bytes (clamped)
    #[must_use]
    pub fn with_max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = clamp_max_output_bytes(bytes);
        self
    }

    /// Set the output cap in megabytes (clamped)
    #[must_use]
    pub fn with_max_output_mb(mut self, megabytes: i64) -> Self {
        self.max_output_bytes = clamp_max_output_mb(megabytes);
        self
    }

    /// Use a different git executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Repository the query runs in
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Effective commit limit
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Output mode
    #[must_use]
    pub fn mode(&self) -> LogMode {
        self.mode
    }

    /// Effective output cap in bytes
    #[must_use]
    pub fn max_output_bytes(&self) -> usize {
        self.max_output_bytes
    }

    /// The argument vector passed to git
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            "--no-pager".to_string(),
            "log".to_string(),
            self.mode.change_flag().to_string(),
            "--no-color".to_string(),
            self.mode.pretty_format().to_string(),
            "--date=short".to_string(),
            "-n".to_string(),
            self.limit.to_string(),
        ]
    }

    /// Run the query and return git's raw standard output
    ///
    /// # Errors
    ///
    /// - `LogError::Execution` if git cannot be started
    /// - `LogError::Command` if git exits non-zero
    /// - `LogError::OutputTooLarge` if stdout exceeds the cap
    pub fn run(&self) -> LogResult<String> {
        debug!(
            repo = %self.repo_path.display(),
            limit = self.limit,
            mode = ?self.mode,
            max_output_bytes = self.max_output_bytes,
            "Running git log"
        );
        run_capped(
            &self.program,
            self.args(),
            &self.repo_path,
            self.max_output_bytes,
        )
    }

    /// Run the query and parse its output into commit records
    ///
    /// # Errors
    ///
    /// Returns any error from [`LogQuery::run`]; no partial list is returned.
    pub fn fetch(&self) -> LogResult<Vec<CommitRecord>> {
        let output = self.run()?;
        Ok(parse_commit_output(&output))
    }
}

/// Fetch the latest commits of a repository
///
/// `limit` is floored and clamped to `[1, 1000]`; `full_diff` selects
/// between `git log -p` and `git log --stat`.
///
/// # Errors
///
/// See [`LogQuery::run`].
pub fn get_commits(
    repo_path: impl Into<PathBuf>,
    limit: f64,
    full_diff: bool,
) -> LogResult<Vec<CommitRecord>> {
    LogQuery::new(repo_path)
        .with_limit(limit)
        .with_mode(LogMode::from_full_diff(full_diff))
        .fetch()
}

/// Run `program` with `args` in `cwd`, capturing stdout and stderr
///
/// Stdout beyond `limit_bytes` kills the child and yields
/// `LogError::OutputTooLarge`. Stderr is drained on a helper thread so
/// neither pipe can stall the child; only its first `limit_bytes` are kept.
pub(crate) fn run_capped<I, S>(
    program: &str,
    args: I,
    cwd: &Path,
    limit_bytes: usize,
) -> LogResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let execution_error = |source: io::Error| LogError::Execution {
        program: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(execution_error)?;

    let cap = u64::try_from(limit_bytes).unwrap_or(u64::MAX);

    let stderr_pipe = child.stderr.take();
    let stderr_reader = thread::spawn(move || -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr_pipe {
            (&mut pipe).take(cap).read_to_end(&mut buf)?;
            io::copy(&mut pipe, &mut io::sink())?;
        }
        Ok(buf)
    });

    let mut stdout = Vec::new();
    if let Some(pipe) = child.stdout.take() {
        // One byte past the cap is enough to detect overflow.
        if let Err(source) = pipe.take(cap.saturating_add(1)).read_to_end(&mut stdout) {
            abort_child(&mut child, stderr_reader);
            return Err(execution_error(source));
        }
    }

    if stdout.len() > limit_bytes {
        warn!(limit_bytes, "git output exceeded buffer, aborting");
        abort_child(&mut child, stderr_reader);
        return Err(LogError::OutputTooLarge { limit_bytes });
    }

    let status = child.wait().map_err(execution_error)?;
    let stderr = match stderr_reader.join() {
        Ok(Ok(buf)) => buf,
        Ok(Err(e)) => {
            debug!(error = %e, "Failed to read git stderr");
            Vec::new()
        }
        Err(_) => Vec::new(),
    };

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        warn!(code = ?status.code(), stderr = %stderr.trim(), "git exited with an error");
        return Err(LogError::Command {
            code: status.code(),
            stderr,
        });
    }

    debug!(bytes = stdout.len(), "git finished");
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Kill and reap `child`, then wait for its stderr reader to finish
fn abort_child(child: &mut Child, stderr_reader: thread::JoinHandle<io::Result<Vec<u8>>>) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = stderr_reader.join();
}
