// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! Repository summary information

use crate::error::LogResult;
use crate::invoker::{BYTES_PER_MB, DEFAULT_GIT_PROGRAM, run_capped};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const FALLBACK_NAME: &str = "Repository";

/// Commit and branch counters for a repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    /// Commits reachable from HEAD
    pub total_commits: usize,
    /// Remote-tracking branches
    pub remote_branches: usize,
}

/// Display name of a repository: the last component of its path
#[must_use]
pub fn repository_name(repo_path: &Path) -> String {
    repo_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Count commits on HEAD and remote-tracking branches
///
/// # Errors
///
/// Returns a `LogError` if either git command fails, e.g. in a repository
/// without commits.
pub fn repository_stats(repo_path: &Path) -> LogResult<RepoStats> {
    let count = run_capped(
        DEFAULT_GIT_PROGRAM,
        ["rev-list", "--count", "HEAD"],
        repo_path,
        BYTES_PER_MB,
    )?;
    let total_commits = count.trim().parse().unwrap_or_else(|_| {
        debug!(output = %count.trim(), "Unexpected rev-list output");
        0
    });

    let branches = run_capped(
        DEFAULT_GIT_PROGRAM,
        ["branch", "-r", "--no-color"],
        repo_path,
        BYTES_PER_MB,
    )?;
    let remote_branches = count_remote_branches(&branches);

    Ok(RepoStats {
        total_commits,
        remote_branches,
    })
}

fn count_remote_branches(output: &str) -> usize {
    output.lines().filter(|l| !l.trim().is_empty()).count()
}
