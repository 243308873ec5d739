//! Localized resource normalization.
//!
//! Replicates every localization bundle under a resources tree into a
//! staging directory, then rewrites the staged string tables to the binary
//! plist encoding. Originals are never touched; conversion happens only on
//! the staged copies.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::ops::errors::{ConversionFailure, PipelineError};
use crate::plist::PlistConverter;
use crate::util::fs::{copy_dir_all, reset_dir};

/// Directory name suffix identifying a localization bundle.
pub const LPROJ_SUFFIX: &str = ".lproj";

/// File extension of string tables.
pub const STRINGS_EXTENSION: &str = "strings";

/// Options for a resource normalization run.
#[derive(Debug, Clone)]
pub struct ResourceOptions {
    /// Resources tree searched (at any depth) for `.lproj` directories.
    pub resources_root: PathBuf,

    /// Staging directory; destructively recreated on every run.
    pub staging: PathBuf,

    /// Downgrade string-table conversion failures from a hard failure to
    /// warnings.
    pub keep_going: bool,
}

/// Outcome of a resource normalization run.
#[derive(Debug, Serialize)]
pub struct ResourceReport {
    /// Localization bundles replicated into staging.
    pub bundles: Vec<PathBuf>,
    /// Staged string tables successfully converted to binary form.
    pub converted: Vec<PathBuf>,
    /// Staged string tables the converter rejected.
    #[serde(serialize_with = "serialize_failures")]
    pub failed: Vec<ConversionFailure>,
}

fn serialize_failures<S>(failures: &[ConversionFailure], ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    ser.collect_seq(failures.iter().map(|f| f.to_string()))
}

/// Normalize localized resources into the staging directory.
///
/// Discovers `.lproj` bundles, resets staging, replicates each bundle, then
/// converts every staged `.strings` file via `converter`. Conversion
/// failures fail the run in aggregate unless [`ResourceOptions::keep_going`]
/// is set.
pub fn normalize(opts: &ResourceOptions, converter: &dyn PlistConverter) -> Result<ResourceReport> {
    if !opts.resources_root.is_dir() {
        bail!(
            "resources root is not a directory: {}",
            opts.resources_root.display()
        );
    }

    let bundles = discover_bundles(&opts.resources_root)?;
    tracing::debug!(
        "Discovered {} localization bundle(s) under {}",
        bundles.len(),
        opts.resources_root.display()
    );

    reset_dir(&opts.staging)?;

    for bundle in &bundles {
        // Bundles replicate flat, by directory name. Identically named
        // bundles from different locations collapse; the last copy wins.
        let name = bundle
            .file_name()
            .with_context(|| format!("localization bundle has no name: {}", bundle.display()))?;
        let dest = opts.staging.join(name);
        copy_dir_all(bundle, &dest)
            .with_context(|| format!("failed to replicate bundle {}", bundle.display()))?;
        tracing::debug!("Replicated {} -> {}", bundle.display(), dest.display());
    }

    let mut converted = Vec::new();
    let mut failed = Vec::new();

    for table in find_string_tables(&opts.staging)? {
        match converter.convert_to_binary(&table) {
            Ok(()) => {
                tracing::debug!("Converted {}", table.display());
                converted.push(table);
            }
            Err(error) => {
                tracing::warn!("failed to convert {}: {}", table.display(), error);
                failed.push(ConversionFailure { path: table, error });
            }
        }
    }

    if !failed.is_empty() && !opts.keep_going {
        return Err(PipelineError::ConversionFailures(failed).into());
    }

    Ok(ResourceReport {
        bundles,
        converted,
        failed,
    })
}

/// Find every `.lproj` directory under `root`, at any depth.
///
/// Non-directory entries with a matching name are skipped. Results are
/// sorted so replication order (and thus collision outcome) is stable.
fn discover_bundles(root: &Path) -> Result<Vec<PathBuf>> {
    let mut bundles = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_dir()
            && entry.file_name().to_string_lossy().ends_with(LPROJ_SUFFIX)
        {
            bundles.push(entry.into_path());
        }
    }
    bundles.sort();
    Ok(bundles)
}

/// Find every `.strings` file under `root`, at any depth.
fn find_string_tables(root: &Path) -> Result<Vec<PathBuf>> {
    let mut tables = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == STRINGS_EXTENSION)
        {
            tables.push(entry.into_path());
        }
    }
    tables.sort();
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plist::ConvertError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Test double: rewrites files with a binary plist signature instead of
    /// shelling out.
    struct FakeConverter {
        seen: RefCell<Vec<PathBuf>>,
        fail_on: Option<String>,
    }

    impl FakeConverter {
        fn new() -> Self {
            FakeConverter {
                seen: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(name: &str) -> Self {
            FakeConverter {
                seen: RefCell::new(Vec::new()),
                fail_on: Some(name.to_string()),
            }
        }
    }

    impl PlistConverter for FakeConverter {
        fn convert_to_binary(&self, path: &Path) -> Result<(), ConvertError> {
            self.seen.borrow_mut().push(path.to_path_buf());
            if let Some(fail_on) = &self.fail_on {
                if path.to_string_lossy().contains(fail_on.as_str()) {
                    return Err(ConvertError::Failed {
                        command: format!("plutil -convert binary1 {}", path.display()),
                        code: Some(1),
                        stderr: "invalid property list".to_string(),
                    });
                }
            }
            fs::write(path, b"bplist00").map_err(|e| ConvertError::Invoke {
                command: "fake".to_string(),
                message: e.to_string(),
            })
        }
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn options(tmp: &TempDir) -> ResourceOptions {
        ResourceOptions {
            resources_root: tmp.path().join("Resources"),
            staging: tmp.path().join("GeneratedResources"),
            keep_going: false,
        }
    }

    #[test]
    fn test_replicates_bundles_and_converts_string_tables() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(&root.join("en.lproj/Localizable.strings"), "\"k\" = \"v\";");
        write(&root.join("fr.lproj/Localizable.strings"), "\"k\" = \"f\";");

        let opts = options(&tmp);
        let report = normalize(&opts, &FakeConverter::new()).unwrap();

        assert_eq!(report.bundles.len(), 2);
        assert_eq!(report.converted.len(), 2);
        for lang in ["en", "fr"] {
            let staged = opts.staging.join(format!("{lang}.lproj/Localizable.strings"));
            let bytes = fs::read(&staged).unwrap();
            assert!(bytes.starts_with(b"bplist00"));
        }
    }

    #[test]
    fn test_originals_are_never_converted() {
        let tmp = TempDir::new().unwrap();
        let original = tmp.path().join("Resources/en.lproj/Localizable.strings");
        write(&original, "\"k\" = \"v\";");

        normalize(&options(&tmp), &FakeConverter::new()).unwrap();

        assert_eq!(fs::read_to_string(&original).unwrap(), "\"k\" = \"v\";");
    }

    #[test]
    fn test_non_string_table_files_pass_through_unmodified() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(&root.join("en.lproj/Localizable.strings"), "\"k\" = \"v\";");
        write(&root.join("en.lproj/flag.png"), "not really a png");

        let opts = options(&tmp);
        normalize(&opts, &FakeConverter::new()).unwrap();

        assert_eq!(
            fs::read(opts.staging.join("en.lproj/flag.png")).unwrap(),
            b"not really a png"
        );
    }

    #[test]
    fn test_nested_bundles_are_discovered() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(
            &root.join("Nibs/Deep/de.lproj/HLSAboutView.strings"),
            "\"k\" = \"v\";",
        );

        let opts = options(&tmp);
        let report = normalize(&opts, &FakeConverter::new()).unwrap();

        assert_eq!(report.bundles.len(), 1);
        assert!(opts.staging.join("de.lproj/HLSAboutView.strings").exists());
    }

    #[test]
    fn test_plain_file_with_lproj_suffix_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(&root.join("notes.lproj"), "just a file");
        write(&root.join("en.lproj/Localizable.strings"), "\"k\" = \"v\";");

        let report = normalize(&options(&tmp), &FakeConverter::new()).unwrap();

        assert_eq!(report.bundles.len(), 1);
        assert!(report.bundles[0].ends_with("en.lproj"));
    }

    #[test]
    fn test_conversion_failures_are_aggregated() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(&root.join("en.lproj/Good.strings"), "\"k\" = \"v\";");
        write(&root.join("en.lproj/Bad.strings"), "garbage");
        write(&root.join("fr.lproj/Bad.strings"), "garbage");

        let converter = FakeConverter::failing_on("Bad.strings");
        let err = normalize(&options(&tmp), &converter).unwrap_err();

        // Every table was still attempted before the run failed.
        assert_eq!(converter.seen.borrow().len(), 3);
        let msg = err.to_string();
        assert!(msg.contains("2 string tables failed"));
        assert!(msg.contains("Bad.strings"));
    }

    #[test]
    fn test_keep_going_reports_failures_without_failing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Resources");
        write(&root.join("en.lproj/Good.strings"), "\"k\" = \"v\";");
        write(&root.join("en.lproj/Bad.strings"), "garbage");

        let mut opts = options(&tmp);
        opts.keep_going = true;
        let report = normalize(&opts, &FakeConverter::failing_on("Bad.strings")).unwrap();

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].path.ends_with("en.lproj/Bad.strings"));
    }

    #[test]
    fn test_stale_staging_contents_are_removed() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("Resources/en.lproj/L.strings"), "\"k\" = \"v\";");

        let opts = options(&tmp);
        fs::create_dir_all(&opts.staging).unwrap();
        fs::write(opts.staging.join("stale.txt"), "stale").unwrap();

        normalize(&opts, &FakeConverter::new()).unwrap();

        assert!(!opts.staging.join("stale.txt").exists());
    }

    #[test]
    fn test_empty_resources_tree_is_a_clean_no_op() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Resources")).unwrap();

        let opts = options(&tmp);
        let report = normalize(&opts, &FakeConverter::new()).unwrap();

        assert!(report.bundles.is_empty());
        assert!(report.converted.is_empty());
        assert!(opts.staging.is_dir());
    }

    #[test]
    fn test_missing_resources_root_fails() {
        let tmp = TempDir::new().unwrap();
        let err = normalize(&options(&tmp), &FakeConverter::new()).unwrap_err();
        assert!(err.to_string().contains("resources root"));
    }
}
