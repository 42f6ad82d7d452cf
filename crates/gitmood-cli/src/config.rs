// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! Configuration for the gitmood command line
//!
//! This module provides the CLI configuration type: which repository to
//! read, how many commits, which output mode and buffer size, and the
//! logging level.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gitmood_log::invoker::{DEFAULT_LIMIT, DEFAULT_OUTPUT_MB};
use gitmood_log::{LogMode, LogQuery};

/// gitmood - extract structured commit history for mood analysis
#[derive(Parser, Debug, Clone)]
#[command(name = "gitmood")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the git working tree
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "GITMOOD_REPO")]
    pub repo: Option<PathBuf>,

    /// Number of commits to read
    ///
    /// Values are floored and clamped to 1..=1000 rather than rejected.
    #[arg(
        short = 'n',
        long,
        env = "GITMOOD_COMMIT_LIMIT",
        default_value_t = DEFAULT_LIMIT as f64,
        allow_negative_numbers = true
    )]
    pub limit: f64,

    /// Read `--stat` summaries instead of full diffs
    #[arg(long, default_value = "false")]
    pub stat: bool,

    /// Maximum git output to accept, in megabytes (clamped to 1..=100)
    #[arg(
        long,
        env = "GITMOOD_MAX_BUFFER_MB",
        default_value_t = DEFAULT_OUTPUT_MB as i64,
        allow_negative_numbers = true
    )]
    pub max_buffer_mb: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Include commit and remote branch counts in JSON output
    #[arg(long, default_value = "false")]
    pub repo_stats: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays machine-readable.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// How the commit history is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON report
    #[default]
    Json,
    /// The plain-text block handed to the sentiment engine
    Analysis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: None,
            limit: DEFAULT_LIMIT as f64,
            stat: false,
            max_buffer_mb: DEFAULT_OUTPUT_MB as i64,
            format: OutputFormat::Json,
            repo_stats: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the repository path, using the current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// The output mode selected by `--stat`
    #[must_use]
    pub fn mode(&self) -> LogMode {
        LogMode::from_full_diff(!self.stat)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path cannot be determined, does
    /// not exist, or is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let repo = self.repo_path().ok_or(ConfigError::NoWorkingDirectory)?;
        if !repo.exists() {
            return Err(ConfigError::RepositoryNotFound(repo));
        }
        if !repo.is_dir() {
            return Err(ConfigError::RepositoryNotDirectory(repo));
        }
        Ok(())
    }

    /// Build the history query described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoWorkingDirectory` if no repository path is
    /// given and the current directory is unavailable.
    pub fn to_query(&self) -> Result<LogQuery, ConfigError> {
        let repo = self.repo_path().ok_or(ConfigError::NoWorkingDirectory)?;
        Ok(LogQuery::new(repo)
            .with_limit(self.limit)
            .with_mode(self.mode())
            .with_max_output_mb(self.max_buffer_mb))
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No repository given and the current directory is unavailable
    #[error("No repository path given and the current directory is unavailable")]
    NoWorkingDirectory,

    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),
}
