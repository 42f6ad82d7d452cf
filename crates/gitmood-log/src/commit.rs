// Copyright (c) 2026 - present gitmood contributors
// SPDX-License-Identifier: MIT

//! Commit record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One commit extracted from `git log` output
///
/// `diff` and `stats` are never both set by a single parse: the query
/// selects exactly one of the two modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Subject line of the commit (may be empty)
    pub message: String,
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Author date in short form (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Unified diff text, trimmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// `--stat` summary text, trimmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
}

impl CommitRecord {
    /// Create a record with only a subject line
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// The change body: the diff if present, otherwise the stats, otherwise empty
    #[must_use]
    pub fn body(&self) -> &str {
        self.diff
            .as_deref()
            .or(self.stats.as_deref())
            .unwrap_or("")
    }

    /// Whether the commit carries a diff or a stat summary
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.diff.is_some() || self.stats.is_some()
    }

    /// Parse the `date` field as a calendar date
    ///
    /// Returns `None` when the date is absent or not in `YYYY-MM-DD` form.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Render this record as a block of analysis input
    ///
    /// `COMMIT: <message>`, then optional `AUTHOR:` and `DATE:` lines, then
    /// the body on its own line.
    #[must_use]
    pub fn to_analysis_block(&self) -> String {
        let mut out = format!("COMMIT: {}", self.message);
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty()) {
            out.push_str("\nAUTHOR: ");
            out.push_str(author);
        }
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            out.push_str("\nDATE: ");
            out.push_str(date);
        }
        out.push('\n');
        out.push_str(self.body());
        out
    }
}

/// Join records into the single text block handed to the sentiment engine
///
/// Blocks are separated by a blank line.
#[must_use]
pub fn render_for_analysis(records: &[CommitRecord]) -> String {
    records
        .iter()
        .map(CommitRecord::to_analysis_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn sample_record() -> CommitRecord {
        CommitRecord {
            message: "Fix bug".to_string(),
            author: Some("Jane".to_string()),
            date: Some("2024-01-01".to_string()),
            diff: Some("diff --git a/x b/x\n+added line".to_string()),
            stats: None,
        }
    }

    #[test]
    fn test_body_prefers_diff() {
        let record = sample_record();
        assert_eq!(record.body(), "diff --git a/x b/x\n+added line");
    }

    #[test]
    fn test_body_falls_back_to_stats() {
        let record = CommitRecord {
            diff: None,
            stats: Some("x | 1 +".to_string()),
            ..sample_record()
        };
        assert_eq!(record.body(), "x | 1 +");
        assert!(record.has_changes());
    }

    #[test]
    fn test_body_empty_when_no_changes() {
        let record = CommitRecord::new("Empty");
        assert_eq!(record.body(), "");
        assert!(!record.has_changes());
    }

    #[test]
    fn test_parsed_date() {
        let record = sample_record();
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_parsed_date_rejects_long_form() {
        let record = CommitRecord {
            date: Some("Mon Jan 1 10:00:00 2024 +0000".to_string()),
            ..sample_record()
        };
        assert!(record.parsed_date().is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let record = CommitRecord::new("Only a subject");
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(json, r#"{"message":"Only a subject"}"#);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize");
        let back: CommitRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, back);
    }

    #[test]
    fn test_analysis_block_full() {
        assert_eq!(
            sample_record().to_analysis_block(),
            "COMMIT: Fix bug\nAUTHOR: Jane\nDATE: 2024-01-01\ndiff --git a/x b/x\n+added line"
        );
    }

    #[test]
    fn test_analysis_block_without_header_fields() {
        let record = CommitRecord::new("Bare");
        assert_eq!(record.to_analysis_block(), "COMMIT: Bare\n");
    }

    #[test]
    fn test_render_for_analysis_separates_with_blank_line() {
        let second = CommitRecord {
            message: "Add feature".to_string(),
            author: Some("Bob".to_string()),
            date: None,
            diff: None,
            stats: Some("y | 2 ++".to_string()),
        };
        let text = render_for_analysis(&[sample_record(), second]);
        assert_eq!(
            text,
            "COMMIT: Fix bug\nAUTHOR: Jane\nDATE: 2024-01-01\ndiff --git a/x b/x\n+added line\n\n\
             COMMIT: Add feature\nAUTHOR: Bob\ny | 2 ++"
        );
    }

    #[test]
    fn test_render_for_analysis_empty() {
        assert_eq!(render_for_analysis(&[]), "");
    }
}
