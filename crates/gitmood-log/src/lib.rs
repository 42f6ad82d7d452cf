// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! gitmood-log: Git log extraction and parsing for gitmood
//!
//! This library crate runs `git log` against a working tree and turns its
//! output into structured commit records, ready to be handed to a sentiment
//! engine or a presentation layer.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitmood_log::{LogQuery, render_for_analysis};
//!
//! let commits = LogQuery::new(".")
//!     .with_limit(10.0)
//!     .fetch()
//!     .expect("fetch commits");
//!
//! for c in &commits {
//!     println!("{} ({})", c.message, c.author.as_deref().unwrap_or("unknown"));
//! }
//!
//! let prompt_input = render_for_analysis(&commits);
//! # let _ = prompt_input;
//! ```

pub mod commit;
pub mod error;
pub mod invoker;
pub mod parser;
pub mod repo;

pub use commit::{CommitRecord, render_for_analysis};
pub use error::{LogError, LogResult};
pub use invoker::{LogMode, LogQuery, clamp_limit, clamp_max_output_mb, get_commits};
pub use parser::parse_commit_output;
pub use repo::{RepoStats, repository_name, repository_stats};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::CommitRecord;
    pub use crate::error::LogError;
    pub use crate::invoker::{LogMode, LogQuery};
    pub use crate::parser::parse_commit_output;
}
