//! Removal of folders emptied by sorting.

use crate::file_category::is_category_dir_name;
use crate::file_organizer::{OrganizeError, OrganizeResult, list_dir};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Removes every empty folder below `path`, depth first.
///
/// A folder is pruned inside before it is checked, so a folder that only
/// held empty folders goes away too. Category folders are neither entered
/// nor removed, and `path` itself is always kept.
///
/// # Returns
///
/// The number of folders removed.
pub fn prune_empty_dirs(path: &Path) -> OrganizeResult<usize> {
    let mut removed = 0;

    for dir in list_dir(path)? {
        if !dir.is_dir() || dir.file_name().is_some_and(is_category_dir_name) {
            continue;
        }

        removed += prune_empty_dirs(&dir)?;

        if list_dir(&dir)?.is_empty() {
            fs::remove_dir(&dir).map_err(|e| OrganizeError::RemoveFailed {
                path: dir.clone(),
                source: e,
            })?;
            debug!("removed empty folder {}", dir.display());
            removed += 1;
        }
    }

    Ok(removed)
}
