//! Moving classified files into category directories.
//!
//! This module moves files into category-specific subdirectories of the
//! sorted root, renaming them to their normalized form on the way. It also
//! defines the error type shared by every filesystem phase of a run.

use crate::config::ConfigError;
use crate::file_category::Category;
use crate::normalize::normalize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Errors that can occur while sorting a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to list the contents of a directory.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category or archive directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to delete a file or directory.
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to rename an entry to its normalized name.
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The archive format cannot be derived from the file name.
    UnsupportedArchive { path: PathBuf },
    /// The archive could not be read or unpacked.
    ArchiveExtractFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The built-in category table is invalid.
    Config(ConfigError),
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDirFailed { path, .. } => {
                write!(f, "Failed to read directory {}", path.display())
            }
            Self::DirectoryCreationFailed { path, .. } => {
                write!(f, "Failed to create directory {}", path.display())
            }
            Self::FileMoveFailure {
                source,
                destination,
                ..
            } => {
                write!(
                    f,
                    "Failed to move {} to {}",
                    source.display(),
                    destination.display()
                )
            }
            Self::RemoveFailed { path, .. } => {
                write!(f, "Failed to remove {}", path.display())
            }
            Self::RenameFailed { from, to, .. } => {
                write!(f, "Failed to rename {} to {}", from.display(), to.display())
            }
            Self::UnsupportedArchive { path } => {
                write!(f, "Unsupported archive format: {}", path.display())
            }
            Self::ArchiveExtractFailed { path, .. } => {
                write!(f, "Failed to unpack archive {}", path.display())
            }
            Self::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadDirFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::RemoveFailed { source, .. }
            | Self::RenameFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::ArchiveExtractFailed { source, .. } => Some(source.as_ref()),
            Self::Config(e) => Some(e),
            Self::UnsupportedArchive { .. } => None,
        }
    }
}

impl From<ConfigError> for OrganizeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Result type for sorting operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Lists the immediate children of a directory.
pub(crate) fn list_dir(path: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let read_err = |e| OrganizeError::ReadDirFailed {
        path: path.to_path_buf(),
        source: e,
    };

    fs::read_dir(path)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(read_err))
        .collect()
}

/// Moves classified files into category subdirectories of a root.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves every file of one category into `root/<category dir>`.
    ///
    /// The category directory is created if it doesn't exist yet. Each file
    /// is moved under its normalized name; when that name is already taken in
    /// the category directory, the incoming file is discarded instead (see
    /// [`FileOrganizer::discard_duplicate`]).
    ///
    /// # Returns
    ///
    /// The normalized names of all files in list order, including the ones
    /// that were discarded as duplicates.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::file_category::Category;
    /// use sortdir::file_organizer::FileOrganizer;
    /// use std::path::{Path, PathBuf};
    ///
    /// let names = FileOrganizer::move_files(
    ///     &[PathBuf::from("/path/to/root/old/фото.jpg")],
    ///     Path::new("/path/to/root"),
    ///     Category::Images,
    /// )
    /// .unwrap();
    /// assert_eq!(names, vec!["foto.jpg"]);
    /// ```
    pub fn move_files(
        files: &[PathBuf],
        root: &Path,
        category: Category,
    ) -> OrganizeResult<Vec<String>> {
        let category_path = Self::ensure_category_dir(root, category)?;
        let mut names = Vec::with_capacity(files.len());

        for file_path in files {
            let file_name = file_path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            let new_name = normalize(&file_name);
            let destination_path = category_path.join(&new_name);

            if destination_path.exists() {
                Self::discard_duplicate(file_path, &destination_path)?;
            } else {
                fs::rename(file_path, &destination_path).map_err(|e| {
                    OrganizeError::FileMoveFailure {
                        source: file_path.clone(),
                        destination: destination_path.clone(),
                        source_error: e,
                    }
                })?;
                debug!(
                    "moved {} -> {}",
                    file_path.display(),
                    destination_path.display()
                );
            }

            names.push(new_name);
        }

        Ok(names)
    }

    /// Resolves a name collision in a category directory.
    ///
    /// The file already in place wins and the incoming file is deleted.
    pub fn discard_duplicate(file_path: &Path, existing: &Path) -> OrganizeResult<()> {
        warn!(
            "{} already exists, deleting duplicate {}",
            existing.display(),
            file_path.display()
        );

        fs::remove_file(file_path).map_err(|e| OrganizeError::RemoveFailed {
            path: file_path.to_path_buf(),
            source: e,
        })
    }

    /// Creates `root/<category dir>` unless it already exists.
    fn ensure_category_dir(root: &Path, category: Category) -> OrganizeResult<PathBuf> {
        let category_path = root.join(category.dir_name());

        if !category_path.is_dir() {
            fs::create_dir(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: category_path.clone(),
                source: e,
            })?;
        }

        Ok(category_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_move_files_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let names = FileOrganizer::move_files(&[file_path.clone()], base_path, Category::Docs)
            .expect("Failed to move file");

        let category_dir = base_path.join("docs");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert!(category_dir.join("test.txt").exists());
        assert_eq!(names, vec!["test.txt"]);
    }

    #[test]
    fn test_move_files_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("keep.png"), "old").expect("Failed to write file");

        let file_path = base_path.join("test.png");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        FileOrganizer::move_files(&[file_path.clone()], base_path, Category::Images)
            .expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
        assert!(category_dir.join("keep.png").exists());
    }

    #[test]
    fn test_move_files_normalizes_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let nested = base_path.join("nested");
        fs::create_dir(&nested).unwrap();
        let file_path = nested.join("Пісня #1.mp3");
        fs::write(&file_path, "la la").unwrap();

        let names = FileOrganizer::move_files(&[file_path.clone()], base_path, Category::Music)
            .expect("Failed to move file");

        assert_eq!(names, vec!["Pisnya _1.mp3"]);
        assert!(base_path.join("music").join("Pisnya _1.mp3").exists());
        assert!(!file_path.exists());
    }

    #[test]
    fn test_collision_deletes_incoming_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let first = base_path.join("foto.jpg");
        let sub = base_path.join("sub");
        fs::create_dir(&sub).unwrap();
        let second = sub.join("фото.jpg");
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();

        let names =
            FileOrganizer::move_files(&[first.clone(), second.clone()], base_path, Category::Images)
                .expect("Collision must not be an error");

        assert_eq!(names, vec!["foto.jpg", "foto.jpg"]);
        assert!(!first.exists());
        assert!(!second.exists());

        let kept = base_path.join("images").join("foto.jpg");
        assert_eq!(fs::read_to_string(kept).unwrap(), "first");
        assert_eq!(fs::read_dir(base_path.join("images")).unwrap().count(), 1);
    }

    #[test]
    fn test_move_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let result = FileOrganizer::move_files(
            &[base_path.join("ghost.txt")],
            base_path,
            Category::Docs,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, OrganizeError::FileMoveFailure { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_move_into_missing_root_fails() {
        let result = FileOrganizer::move_files(
            &[PathBuf::from("/some/file.txt")],
            Path::new("/non/existent/path"),
            Category::Docs,
        );
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_list_dir_missing_directory() {
        let result = list_dir(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::ReadDirFailed { .. })));
    }
}
