//! Unpacking of sorted archives.
//!
//! Every archive inside the `archives` category folder is unpacked into a
//! sibling folder named after it and then deleted. Supported formats are zip,
//! tar and gzip-compressed tar; anything else aborts the run.

use crate::file_category::Category;
use crate::file_organizer::{OrganizeError, OrganizeResult, list_dir};
use crate::normalize::normalize;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Archive formats that can be unpacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    /// Detects the format from a file name, ignoring case.
    ///
    /// A bare `.gz` that is not a compressed tar is not supported.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::archive::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::from_file_name("a.ZIP"), Some(ArchiveFormat::Zip));
    /// assert_eq!(ArchiveFormat::from_file_name("a.tar.gz"), Some(ArchiveFormat::TarGz));
    /// assert_eq!(ArchiveFormat::from_file_name("a.gz"), None);
    /// ```
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();

        if lower.ends_with(".zip") {
            Some(Self::Zip)
        } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if lower.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }

    /// Unpacks `archive` into the existing directory `destination`.
    pub fn extract(self, archive: &Path, destination: &Path) -> OrganizeResult<()> {
        let extract_err = |e: Box<dyn std::error::Error + Send + Sync>| {
            OrganizeError::ArchiveExtractFailed {
                path: archive.to_path_buf(),
                source: e,
            }
        };

        let file = File::open(archive).map_err(|e| extract_err(e.into()))?;

        match self {
            Self::Zip => {
                let mut zip = zip::ZipArchive::new(file).map_err(|e| extract_err(e.into()))?;
                zip.extract(destination).map_err(|e| extract_err(e.into()))
            }
            Self::Tar => unpack_tar(file, destination).map_err(|e| extract_err(e.into())),
            Self::TarGz => {
                unpack_tar(GzDecoder::new(file), destination).map_err(|e| extract_err(e.into()))
            }
        }
    }
}

fn unpack_tar<R: Read>(reader: R, destination: &Path) -> std::io::Result<()> {
    tar::Archive::new(reader).unpack(destination)
}

/// Returns the folder name an archive is unpacked into.
///
/// This is the normalized file name cut at its first dot, so
/// `"report.v2.zip"` unpacks into `"report"`.
pub fn unpack_dir_name(file_name: &str) -> String {
    let normalized = normalize(file_name);
    match normalized.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => normalized,
    }
}

/// Unpacks every archive directly inside `root/archives`.
///
/// Each archive gets a fresh folder next to it (see [`unpack_dir_name`]) and
/// is deleted once its contents are out. Sub-folders of `archives` are left
/// alone.
///
/// # Errors
///
/// Fails without trying the remaining archives when an unpack folder already
/// exists, when the format is not supported or when an archive is corrupt.
///
/// # Returns
///
/// The folders that were created, in processing order.
pub fn expand_archives(root: &Path) -> OrganizeResult<Vec<PathBuf>> {
    expand_archives_with(root, |_| {})
}

/// Same as [`expand_archives`], calling `on_unpacked` after each archive.
pub fn expand_archives_with<F>(root: &Path, mut on_unpacked: F) -> OrganizeResult<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    let archives_dir = root.join(Category::Archives.dir_name());
    let mut created = Vec::new();

    for archive in list_dir(&archives_dir)? {
        if !archive.is_file() {
            continue;
        }

        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let format = ArchiveFormat::from_file_name(&file_name).ok_or_else(|| {
            OrganizeError::UnsupportedArchive {
                path: archive.clone(),
            }
        })?;

        let target = archives_dir.join(unpack_dir_name(&file_name));
        fs::create_dir(&target).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: target.clone(),
            source: e,
        })?;

        format.extract(&archive, &target)?;
        debug!("unpacked {} into {}", archive.display(), target.display());

        fs::remove_file(&archive).map_err(|e| OrganizeError::RemoveFailed {
            path: archive.clone(),
            source: e,
        })?;

        on_unpacked(&archive);
        created.push(target);
    }

    Ok(created)
}
