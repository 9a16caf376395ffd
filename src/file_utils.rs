use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::formats::FileFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Sibling path with a suffix before the extension
    // @example: ui.de.csv + "filled" -> ui.de.filled.csv
    pub fn output_path_for<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
        let input = input.as_ref();
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = match input.extension() {
            Some(ext) => format!("{}.{}.{}", stem, suffix, ext.to_string_lossy()),
            None => format!("{}.{}", stem, suffix),
        };
        input.with_file_name(file_name)
    }

    // @finds: Supported translation files under a directory, sorted
    pub fn find_translation_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            anyhow::bail!("Not a directory: {}", dir.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
            if entry.file_type().is_file() && FileFormat::from_path(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Found {} translation files under {}", files.len(), dir.display());
        Ok(files)
    }

    // @reads: File content as UTF-8
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    // @writes: Content via a temp file in the same directory, then renames it into place
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        temp.persist(path)
            .with_context(|| format!("Failed to replace file: {}", path.display()))?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}
