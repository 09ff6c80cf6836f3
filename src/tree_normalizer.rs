//! Renaming of everything left in the tree to normalized names.

use crate::file_category::is_category_dir_name;
use crate::file_organizer::{OrganizeError, OrganizeResult, list_dir};
use crate::normalize::normalize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Renames every entry below `path` to its normalized name.
///
/// Only the last path component changes; entries stay in their parent.
/// Folders are descended into after their rename. Category folders are
/// skipped entirely, contents included.
///
/// # Errors
///
/// Fails with [`OrganizeError::RenameFailed`] when the normalized name is
/// already taken in the same folder; the existing entry is never replaced.
///
/// # Returns
///
/// The number of entries whose name changed.
pub fn normalize_tree(path: &Path) -> OrganizeResult<usize> {
    let mut renamed = 0;

    for entry in list_dir(path)? {
        let is_dir = entry.is_dir();
        let Some(name) = entry.file_name() else {
            continue;
        };
        if is_dir && is_category_dir_name(name) {
            continue;
        }

        let new_name = normalize(&name.to_string_lossy());
        let mut current = entry.clone();

        if name != new_name.as_str() {
            let target = path.join(&new_name);
            if target.symlink_metadata().is_ok() {
                return Err(OrganizeError::RenameFailed {
                    from: entry,
                    to: target,
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "normalized name is already taken",
                    ),
                });
            }
            fs::rename(&entry, &target).map_err(|e| OrganizeError::RenameFailed {
                from: entry.clone(),
                to: target.clone(),
                source: e,
            })?;
            debug!("renamed {} -> {}", entry.display(), target.display());
            current = target;
            renamed += 1;
        }

        if is_dir {
            renamed += normalize_tree(&current)?;
        }
    }

    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_renames_files_and_folders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("Нова папка")).unwrap();
        fs::write(root.join("Нова папка").join("звіт!.odt"), "x").unwrap();
        fs::write(root.join("plain.dat"), "x").unwrap();

        assert_eq!(normalize_tree(root).unwrap(), 2);
        assert!(root.join("Nova papka").join("zvit_.odt").exists());
        assert!(root.join("plain.dat").exists());
        assert!(!root.join("Нова папка").exists());
    }

    #[test]
    fn test_category_folders_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("archives/архів")).unwrap();
        fs::write(root.join("archives/архів/файл.txt"), "x").unwrap();

        assert_eq!(normalize_tree(root).unwrap(), 0);
        assert!(root.join("archives/архів/файл.txt").exists());
    }

    #[test]
    fn test_already_normal_tree_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/c.txt"), "x").unwrap();

        assert_eq!(normalize_tree(root).unwrap(), 0);
        assert!(root.join("a/b/c.txt").exists());
    }

    #[test]
    fn test_taken_name_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("foto.rs"), "latin").unwrap();
        fs::write(root.join("фото.rs"), "cyrillic").unwrap();

        let err = normalize_tree(root).unwrap_err();
        match err {
            OrganizeError::RenameFailed { from, to, source } => {
                assert_eq!(from, root.join("фото.rs"));
                assert_eq!(to, root.join("foto.rs"));
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(root.join("foto.rs")).unwrap(), "latin");
        assert_eq!(fs::read_to_string(root.join("фото.rs")).unwrap(), "cyrillic");
    }

    #[test]
    fn test_missing_directory_fails() {
        let result = normalize_tree(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::ReadDirFailed { .. })));
    }
}
