//! Root validation and deterministic enumeration of source files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::InspectConfig;
use crate::error::InspectError;
use crate::languages::AnalyserRegistry;

/// A file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as reached from the root (root joined with the relative path).
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub rel_path: String,
}

/// Check that `root` names an existing directory before anything is walked.
pub fn validate_root(root: &Path) -> Result<(), InspectError> {
    let metadata = std::fs::metadata(root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InspectError::NotFound {
                path: root.to_path_buf(),
            }
        } else {
            InspectError::InaccessibleRoot {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;
    if !metadata.is_dir() {
        return Err(InspectError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Walk `config.repo_path` in lexical order, yielding files a registered analyser handles.
///
/// Errors from the walk itself are yielded in place; the caller decides to stop.
pub fn discover<'a>(
    config: &'a InspectConfig,
    registry: &'a AnalyserRegistry,
) -> impl Iterator<Item = Result<SourceFile, InspectError>> + 'a {
    let root = Path::new(&config.repo_path);

    WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !config.exclude_patterns.iter().any(|p| name == p.as_str())
        })
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => return Some(Err(InspectError::from(err))),
            };
            // Anything that is not itself a directory is a candidate, symlinks included;
            // a dangling link fails later when it is read
            if entry.file_type().is_dir() {
                return None;
            }
            let abs_path = entry.path();
            registry.get_for_path(abs_path)?;

            let rel_path = abs_path
                .strip_prefix(root)
                .unwrap_or(abs_path)
                .to_string_lossy()
                .replace('\\', "/");

            Some(Ok(SourceFile {
                path: abs_path.to_path_buf(),
                rel_path,
            }))
        })
}
