//! Pipeline error types.
//!
//! Per-item failures are accumulated and reported in aggregate: a run
//! processes everything it can, then fails once with the full list of
//! offending items instead of stopping at the first or swallowing them all.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::plist::ConvertError;

/// A string table that failed binary conversion.
#[derive(Debug)]
pub struct ConversionFailure {
    /// The staged file that could not be converted.
    pub path: PathBuf,
    /// What the converter reported.
    pub error: ConvertError,
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Aggregate failure from a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Manifest entries with no match anywhere in the source tree. A
    /// silently incomplete public header bundle is worse than a loud
    /// failure, so this aborts the run by default.
    #[error(
        "{} manifest entr{} not found in the source tree: {}",
        .0.len(),
        if .0.len() == 1 { "y" } else { "ies" },
        .0.join(", ")
    )]
    UnmatchedHeaders(Vec<String>),

    /// String tables the external converter rejected. An unconverted table
    /// causes the downstream signing failure this pipeline exists to
    /// prevent, so this aborts the run by default.
    #[error(
        "{} string table{} failed binary conversion:\n{}",
        .0.len(),
        if .0.len() == 1 { "" } else { "s" },
        format_failures(.0)
    )]
    ConversionFailures(Vec<ConversionFailure>),
}

fn format_failures(failures: &[ConversionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_headers_lists_every_name() {
        let err = PipelineError::UnmatchedHeaders(vec!["Missing.h".into(), "AlsoGone.h".into()]);
        let msg = err.to_string();
        assert!(msg.contains("2 manifest entries"));
        assert!(msg.contains("Missing.h"));
        assert!(msg.contains("AlsoGone.h"));
    }

    #[test]
    fn test_single_unmatched_header_uses_singular() {
        let err = PipelineError::UnmatchedHeaders(vec!["Missing.h".into()]);
        assert!(err.to_string().contains("1 manifest entry not found"));
    }

    #[test]
    fn test_conversion_failures_list_paths() {
        let err = PipelineError::ConversionFailures(vec![ConversionFailure {
            path: PathBuf::from("en.lproj/Localizable.strings"),
            error: ConvertError::ToolNotFound {
                program: "plutil".into(),
            },
        }]);
        let msg = err.to_string();
        assert!(msg.contains("1 string table failed"));
        assert!(msg.contains("en.lproj/Localizable.strings"));
    }
}
