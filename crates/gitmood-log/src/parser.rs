// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! `git log` output parsing
//!
//! The invoker asks git for a header per commit:
//!
//! ```text
//! COMMIT: <subject>
//! AUTHOR: <author name>
//! DATE: <short date>
//! ```
//!
//! followed by either a unified diff (`-p`) or a `--STATS--` marker line and a
//! `--stat` summary. This module turns that text back into [`CommitRecord`]s.

use crate::commit::CommitRecord;
use tracing::debug;

/// Marker that opens every commit block (must start a line)
pub const COMMIT_MARKER: &str = "COMMIT: ";
const LINE_START_COMMIT: &str = "\nCOMMIT: ";

/// Prefix of the author line
pub const AUTHOR_MARKER: &str = "AUTHOR: ";
/// Prefix of the date line
pub const DATE_MARKER: &str = "DATE: ";
/// Line that introduces the `--stat` summary
pub const STATS_MARKER: &str = "--STATS--";
/// Prefix of the first line of each file's diff
pub const DIFF_MARKER: &str = "diff --git";

/// Line scanner state within one commit block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Reading `AUTHOR:`/`DATE:` lines, waiting for a diff or stats marker
    Header,
    /// Every remaining line belongs to the diff
    InDiff,
    /// Stats consumed the rest of the block
    Done,
}

/// Parse complete `git log` output into commit records
///
/// Records are returned in the order git emitted them. Blocks that carry no
/// content are skipped rather than failing the whole parse.
#[must_use]
pub fn parse_commit_output(output: &str) -> Vec<CommitRecord> {
    let blocks = split_blocks(output);
    let block_count = blocks.len();

    let records: Vec<CommitRecord> = blocks.into_iter().filter_map(parse_block).collect();

    if records.len() != block_count {
        debug!(
            skipped = block_count - records.len(),
            "Skipped commit blocks without content"
        );
    }
    debug!(count = records.len(), "Parsed commit records");

    records
}

/// Split raw output into commit blocks
///
/// A block starts right after a [`COMMIT_MARKER`] found at the start of a
/// line and runs up to the next such marker. The marker itself is not part
/// of the block. Non-blank text before the first marker (or output with no
/// marker at all) is kept as a leading block, so its first line becomes a
/// record message like any other.
#[must_use]
pub fn split_blocks(output: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = Vec::new();
    if output.starts_with(COMMIT_MARKER) {
        starts.push(0);
    }
    starts.extend(
        output
            .match_indices(LINE_START_COMMIT)
            .map(|(idx, _)| idx + 1),
    );

    let mut blocks = Vec::with_capacity(starts.len() + 1);

    let preamble = starts.first().map_or(output, |&first| &output[..first]);
    if !preamble.trim().is_empty() {
        debug!(
            bytes = preamble.len(),
            "Keeping text before the first commit marker as a block"
        );
        blocks.push(preamble);
    }

    blocks.extend(starts.iter().enumerate().map(|(i, &start)| {
        let end = starts.get(i + 1).copied().unwrap_or(output.len());
        &output[start + COMMIT_MARKER.len()..end]
    }));

    blocks
}

/// Parse a single commit block (text following a [`COMMIT_MARKER`])
///
/// Returns `None` for a block with no content.
#[must_use]
pub fn parse_block(block: &str) -> Option<CommitRecord> {
    if block.trim().is_empty() {
        return None;
    }

    let mut lines = block.split('\n');
    let message = lines.next()?.trim().to_string();

    let mut author = None;
    let mut date = None;
    let mut diff = String::new();
    let mut stats = String::new();
    let mut state = ScanState::Header;

    while let Some(line) = lines.next() {
        match state {
            ScanState::Header => {
                if let Some(rest) = line.strip_prefix(AUTHOR_MARKER) {
                    author = Some(rest.trim().to_string());
                } else if let Some(rest) = line.strip_prefix(DATE_MARKER) {
                    date = Some(rest.trim().to_string());
                } else if is_stats_marker(line) {
                    stats = lines.by_ref().collect::<Vec<_>>().join("\n");
                    state = ScanState::Done;
                } else if line.starts_with(DIFF_MARKER) {
                    diff.push_str(line);
                    diff.push('\n');
                    state = ScanState::InDiff;
                }
            }
            ScanState::InDiff => {
                diff.push_str(line);
                diff.push('\n');
            }
            ScanState::Done => break,
        }
    }

    Some(CommitRecord {
        message,
        author,
        date,
        diff: non_empty(&diff),
        stats: non_empty(&stats),
    })
}

fn is_stats_marker(line: &str) -> bool {
    line.trim_end() == STATS_MARKER
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// A commit with known fields and a diff body
    #[derive(Debug, Clone)]
    struct KnownCommit {
        message: String,
        author: String,
        date: String,
        diff_lines: Vec<String>,
    }

    impl KnownCommit {
        fn render(&self) -> String {
            let mut out = format!(
                "COMMIT: {}\nAUTHOR: {}\nDATE: {}\n",
                self.message, self.author, self.date
            );
            if !self.diff_lines.is_empty() {
                out.push_str("\ndiff --git a/f b/f\n");
                out.push_str(&self.diff_lines.join("\n"));
                out.push('\n');
            }
            out
        }

        fn expected_diff(&self) -> Option<String> {
            if self.diff_lines.is_empty() {
                return None;
            }
            let text = format!("diff --git a/f b/f\n{}", self.diff_lines.join("\n"));
            Some(text.trim().to_string())
        }
    }

    fn known_commit_strategy() -> impl Strategy<Value = KnownCommit> {
        (
            "[A-Za-z0-9]([A-Za-z0-9 .,:()-]{0,40}[A-Za-z0-9])?",
            "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?",
            (2000u32..2030, 1u32..13, 1u32..29),
            // Hunk lines always carry a one-character prefix, so markers
            // embedded in them never start a line.
            proptest::collection::vec("[ +-][ -~]{0,60}", 0..8),
        )
            .prop_map(|(message, author, (y, m, d), diff_lines)| KnownCommit {
                message,
                author,
                date: format!("{y:04}-{m:02}-{d:02}"),
                diff_lines,
            })
    }

    proptest! {
        /// Property: parsing reproduces hand-constructed fields
        #[test]
        fn prop_known_fields_roundtrip(
            commits in proptest::collection::vec(known_commit_strategy(), 1..6)
        ) {
            let raw: String = commits.iter().map(KnownCommit::render).collect::<Vec<_>>().join("\n");
            let records = parse_commit_output(&raw);

            prop_assert_eq!(records.len(), commits.len());
            for (record, known) in records.iter().zip(&commits) {
                prop_assert_eq!(&record.message, &known.message);
                prop_assert_eq!(record.author.as_deref(), Some(known.author.as_str()));
                prop_assert_eq!(record.date.as_deref(), Some(known.date.as_str()));
                prop_assert_eq!(record.diff.clone(), known.expected_diff());
                prop_assert!(record.stats.is_none());
            }
        }

        /// Property: stats equal the lines after the marker, joined and trimmed
        #[test]
        fn prop_stats_lines_joined(
            message in "[A-Za-z][A-Za-z ]{0,20}",
            lines in proptest::collection::vec(" [a-z/]{1,20} \\| [0-9]{1,3} [+-]{1,5}", 1..10)
        ) {
            let raw = format!("COMMIT: {}\nAUTHOR: A\n--STATS--\n{}\n", message, lines.join("\n"));
            let records = parse_commit_output(&raw);
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(records[0].stats.clone(), Some(lines.join("\n").trim().to_string()));
            prop_assert!(records[0].diff.is_none());
        }

        /// Property: arbitrary input never panics and never yields both bodies
        #[test]
        fn prop_arbitrary_input_is_safe(raw in "(COMMIT: |AUTHOR: |DATE: |--STATS--|diff --git|\n|[ -~]){0,200}") {
            for record in parse_commit_output(&raw) {
                prop_assert!(!(record.diff.is_some() && record.stats.is_some()));
            }
        }

        /// Property: one record per line-start marker when no block is blank
        #[test]
        fn prop_block_count_matches_markers(
            subjects in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,15}", 1..10),
            noise in "[a-z ]{0,10}"
        ) {
            let raw: String = subjects
                .iter()
                .map(|s| format!("COMMIT: {s}\ndiff --git a/x b/x\n+{noise} COMMIT: {noise}\n"))
                .collect();
            prop_assert_eq!(split_blocks(&raw).len(), subjects.len());
            prop_assert_eq!(parse_commit_output(&raw).len(), subjects.len());
        }
    }
}
