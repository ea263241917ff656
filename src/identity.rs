//! Stable identity derivation from the filesystem layout.
//!
//! A document's id is the name of the directory its metadata file lives in:
//! `documents/rumasa/details.md` → `rumasa`. The path is resolved to an
//! absolute path first so relative and absolute invocations agree.
//!
//! ## Collision Risk
//!
//! Identity is purely a function of directory naming. Two metadata files
//! under identically named directories, even in unrelated parent trees,
//! resolve to the same id and silently overwrite each other on upsert.
//! Nothing here detects that; keeping directory names unique across the
//! archive is a convention this tool depends on but does not enforce.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no containing directory to derive an id from: {0}")]
    NoContainingDir(PathBuf),
}

/// Derive the canonical slug for a metadata document at `path`.
///
/// The file itself does not have to exist; only the path shape matters.
/// Fails when the resolved path has no named containing directory (for
/// example a file directly under the filesystem root).
pub fn resolve(path: &Path) -> Result<String, IdentityError> {
    let absolute = std::path::absolute(path)?;
    let slug = absolute
        .parent()
        .and_then(Path::file_name)
        .ok_or_else(|| IdentityError::NoContainingDir(path.to_path_buf()))?;
    Ok(slug.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_the_containing_directory_name() {
        let slug = resolve(Path::new("/archive/documents/rumasa/details.md")).unwrap();
        assert_eq!(slug, "rumasa");
    }

    #[test]
    fn relative_paths_resolve_against_the_working_directory() {
        let slug = resolve(Path::new("documents/my-slug/details.md")).unwrap();
        assert_eq!(slug, "my-slug");
    }

    #[test]
    fn bare_filename_uses_the_working_directory_name() {
        let cwd_name = std::env::current_dir()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert_eq!(resolve(Path::new("details.md")).unwrap(), cwd_name);
    }

    #[test]
    fn file_under_root_has_no_slug() {
        let err = resolve(Path::new("/details.md")).unwrap_err();
        assert!(matches!(err, IdentityError::NoContainingDir(_)));
    }

    #[test]
    fn identical_directory_names_collide() {
        let a = resolve(Path::new("/tree-a/rumasa/details.md")).unwrap();
        let b = resolve(Path::new("/tree-b/rumasa/details.md")).unwrap();
        // Known gap: distinct documents, same id
        assert_eq!(a, b);
    }
}
