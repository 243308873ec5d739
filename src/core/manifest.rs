//! The public header manifest.

use std::path::Path;

use anyhow::Result;

use crate::util::fs::read_to_string;

/// Ordered list of public header filenames.
///
/// Parsed from a plain text file, one filename per line. Order is
/// significant: it defines the order of the `#import` directives in the
/// generated umbrella header. Entries are not deduplicated; a duplicate line
/// yields a duplicate import and a duplicate placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderManifest {
    entries: Vec<String>,
}

impl HeaderManifest {
    /// Load a manifest from a file.
    ///
    /// Fails if the file is missing or unreadable; there is no fallback
    /// header list.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Parse manifest text: one filename per line, blank lines ignored.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        HeaderManifest { entries }
    }

    /// The header filenames, in manifest order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest lists no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
