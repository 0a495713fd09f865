//! Output folder resolution.

use crate::config::ExportSettings;
use crate::error::{ExportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory used for unsaved projects: the desktop, else home, else `.`.
fn fallback_base_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Derives the export folder for a project.
///
/// A saved project exports beside its project file; an unsaved one exports
/// to the desktop. The folder name is always `settings.subfolder`.
pub fn resolve_output_folder(project_path: Option<&Path>, settings: &ExportSettings) -> PathBuf {
    let base = match project_path {
        Some(path) => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        None => fallback_base_dir(),
    };
    // A bare file name has an empty parent.
    let base = if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base
    };
    base.join(&settings.subfolder)
}

/// Creates `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ExportError::FileSystemFailure {
        path: path.to_path_buf(),
        source,
    })
}
