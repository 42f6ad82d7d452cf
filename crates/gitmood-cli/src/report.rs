// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! Commit history report
//!
//! Runs the configured query and shapes the result for stdout: either a JSON
//! document for the presentation layer or the plain-text block consumed by
//! the sentiment engine.

use gitmood_log::{
    CommitRecord, LogError, LogMode, RepoStats, render_for_analysis, repository_name,
    repository_stats,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, ConfigError, OutputFormat};

/// Result of one history extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogReport {
    /// Display name of the repository
    pub repository: String,
    /// Mode the history was read in
    pub mode: LogMode,
    /// Effective (clamped) commit limit
    pub limit: usize,
    /// Commit and branch counters, when requested and available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RepoStats>,
    /// Commits, most recent first
    pub commits: Vec<CommitRecord>,
}

/// Errors that can occur while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The git query failed
    #[error("Failed to fetch commits: {0}")]
    Log(#[from] LogError),

    /// The report could not be encoded
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run the configured query and collect the report
///
/// A failed query aborts the report; no partial commit list is produced.
/// Repository counters are best-effort and only logged when they fail.
///
/// # Errors
///
/// Returns `ReportError::Config` or `ReportError::Log`.
pub fn build_report(config: &Config) -> Result<LogReport, ReportError> {
    let query = config.to_query()?;
    let repository = repository_name(query.repo_path());

    info!(
        repository = %repository,
        limit = query.limit(),
        mode = ?query.mode(),
        "Fetching commits"
    );
    let commits = query.fetch()?;
    info!(count = commits.len(), "Fetched commits");

    let stats = if config.repo_stats {
        match repository_stats(query.repo_path()) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(error = %e, "Could not read repository counters");
                None
            }
        }
    } else {
        None
    };

    Ok(LogReport {
        repository,
        mode: query.mode(),
        limit: query.limit(),
        stats,
        commits,
    })
}

/// Render a report in the requested format
///
/// # Errors
///
/// Returns `ReportError::Encode` if JSON serialization fails.
pub fn render(report: &LogReport, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Analysis => Ok(render_for_analysis(&report.commits)),
    }
}
