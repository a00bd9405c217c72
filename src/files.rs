//! File handling around the converter: input discovery, atomic in-place
//! rewrites and backups.

use anyhow::{Context, Result};
use doxml::{convert, Conversion, ConvertOptions};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::debug;

/// File extensions recognized as source files when scanning directories.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "cs", "java", "js", "ts", "m", "mm", "swift",
];

/// Suffix appended to the file name of a backup copy.
const BACKUP_SUFFIX: &str = ".bak";

/// What to do with a converted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Replace the source file.
    InPlace,
    /// Leave the file alone; the caller prints the output.
    Stdout,
    /// Leave the file alone; the caller reports whether it would change.
    Check,
}

/// Settings for one batch run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub convert: ConvertOptions,
    pub mode: Mode,
    pub backup: bool,
}

/// Outcome of converting one file.
#[derive(Debug)]
pub struct FileReport {
    pub conversion: Conversion,
    pub changed: bool,
    pub elapsed: Duration,
}

/// Convert one file. In [`Mode::InPlace`] the original is replaced only
/// after the whole conversion succeeded, and only if the text changed.
pub fn convert_file(path: &Path, config: &RunConfig) -> Result<FileReport> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let started = Instant::now();
    let conversion = convert(&source, &config.convert)
        .with_context(|| format!("failed to convert {}", path.display()))?;
    let elapsed = started.elapsed();
    let changed = conversion.output != source;

    if config.mode == Mode::InPlace && changed {
        if config.backup {
            let backup = backup_path(path);
            fs::copy(path, &backup)
                .with_context(|| format!("failed to write backup {}", backup.display()))?;
            debug!(backup = %backup.display(), "backup written");
        }
        write_atomically(path, &conversion.output)?;
    }

    Ok(FileReport {
        conversion,
        changed,
        elapsed,
    })
}

/// Write `contents` to a temporary file next to `path`, then move it over
/// `path`. The original's permissions are carried over.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write temporary file for {}", path.display()))?;

    let permissions = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("failed to set permissions for {}", path.display()))?;

    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// `foo.cs` → `foo.cs.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
