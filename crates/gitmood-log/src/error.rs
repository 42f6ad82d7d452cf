// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! Error types for gitmood-log

use thiserror::Error;

/// Errors that can occur while querying the git history
#[derive(Debug, Error)]
pub enum LogError {
    /// The git executable could not be started
    #[error("Failed to start {program}: {source}")]
    Execution {
        /// Program that was invoked
        program: String,
        /// Underlying spawn or pipe failure
        #[source]
        source: std::io::Error,
    },

    /// git ran but exited with a non-zero status
    #[error("git exited with {}: {}", exit_label(*.code), .stderr.trim())]
    Command {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// git produced more output than the configured cap allows
    #[error(
        "git output exceeded the {limit_bytes} byte buffer; reduce the commit limit or raise the buffer setting"
    )]
    OutputTooLarge {
        /// The configured cap in bytes
        limit_bytes: usize,
    },
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("status {c}"))
}

/// Result type for log operations
pub type LogResult<T> = Result<T, LogError>;
