//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Reset a staging directory: remove it and everything in it, then recreate it.
///
/// Every pipeline run starts from this, so output never depends on leftover
/// state from a previous run. Callers must only ever point this at a
/// directory owned by the pipeline; whatever occupies the path is deleted.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    } else if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;
    Ok(())
}

/// Recursively copy a directory.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in
        fs::read_dir(src).with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reset_dir_removes_stale_contents() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::create_dir_all(staging.join("nested")).unwrap();
        fs::write(staging.join("stale.txt"), "stale").unwrap();
        fs::write(staging.join("nested/deep.txt"), "deep").unwrap();

        reset_dir(&staging).unwrap();

        assert!(staging.is_dir());
        assert!(!staging.join("stale.txt").exists());
        assert!(!staging.join("nested").exists());
        assert_eq!(fs::read_dir(&staging).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_dir_creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("a/b/staging");

        reset_dir(&staging).unwrap();

        assert!(staging.is_dir());
    }

    #[test]
    fn test_reset_dir_replaces_plain_file() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::write(&staging, "not a directory").unwrap();

        reset_dir(&staging).unwrap();

        assert!(staging.is_dir());
    }

    #[test]
    fn test_copy_dir_all() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir_all(src.join("en.lproj")).unwrap();
        fs::write(src.join("en.lproj/Localizable.strings"), "\"a\" = \"b\";").unwrap();

        copy_dir_all(&src, &dst).unwrap();

        assert!(dst.join("en.lproj/Localizable.strings").exists());
        assert_eq!(
            fs::read_to_string(dst.join("en.lproj/Localizable.strings")).unwrap(),
            "\"a\" = \"b\";"
        );
    }
}
