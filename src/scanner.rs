//! Recursive classification of a directory tree.
//!
//! The scanner walks the tree below a root, sorting every file into the list
//! of its category or recording its extension as unknown. Category folders
//! left by a previous run are not entered.

use crate::file_category::{Category, ExtensionTable, is_category_dir_name};
use crate::file_organizer::{OrganizeResult, list_dir};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything one scan found.
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    /// Files per category, in the order the walk met them.
    pub files: BTreeMap<Category, Vec<PathBuf>>,
    /// Upper-case extensions that matched a category.
    pub known_extensions: BTreeSet<String>,
    /// Upper-case extensions that matched no category (may contain `""`).
    pub unknown_extensions: BTreeSet<String>,
}

impl ScanResult {
    /// Files found for a category.
    pub fn files_in(&self, category: Category) -> &[PathBuf] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of classified files.
    pub fn classified_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Returns the upper-cased extension of a file, or an empty string.
pub fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Walks a directory tree and classifies the files in it.
pub struct Scanner<'a> {
    table: &'a ExtensionTable,
}

impl<'a> Scanner<'a> {
    pub fn new(table: &'a ExtensionTable) -> Self {
        Self { table }
    }

    /// Scans `root` recursively.
    ///
    /// # Errors
    ///
    /// Fails with `OrganizeError::ReadDirFailed` if any directory of the tree
    /// cannot be listed, including `root` itself.
    pub fn scan(&self, root: &Path) -> OrganizeResult<ScanResult> {
        let mut result = ScanResult::default();
        self.scan_into(root, &mut result)?;
        Ok(result)
    }

    fn scan_into(&self, dir: &Path, result: &mut ScanResult) -> OrganizeResult<()> {
        for path in list_dir(dir)? {
            if path.is_file() {
                self.classify(path, result);
            } else if path.is_dir() {
                if path.file_name().is_some_and(is_category_dir_name) {
                    debug!("skipping category folder {}", path.display());
                    continue;
                }
                self.scan_into(&path, result)?;
            }
        }

        Ok(())
    }

    fn classify(&self, path: PathBuf, result: &mut ScanResult) {
        let ext = extension_key(&path);

        match self.table.category_of(&ext) {
            Some(category) => {
                result.files.entry(category).or_default().push(path);
                result.known_extensions.insert(ext);
            }
            None => {
                result.unknown_extensions.insert(ext);
            }
        }
    }
}
