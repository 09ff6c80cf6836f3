//! Command-line interface module for sortdir.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Logging setup
//! - Running the sorting phases in order
//! - Printing the report

use crate::archive::expand_archives_with;
use crate::file_category::{Category, ExtensionTable};
use crate::file_organizer::{FileOrganizer, OrganizeResult, list_dir};
use crate::output::OutputFormatter;
use crate::pruner::prune_empty_dirs;
use crate::scanner::Scanner;
use crate::tree_normalizer::normalize_tree;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sort a folder into category subfolders, unpack archives and normalize names.
#[derive(Debug, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    /// Folder to sort
    pub root: PathBuf,
}

/// What a completed run did.
#[derive(Debug, Default, Clone)]
pub struct SortReport {
    /// Names produced per non-empty category, in category order.
    pub categories: Vec<(Category, Vec<String>)>,
    /// Extensions that matched a category.
    pub known_extensions: BTreeSet<String>,
    /// Extensions that matched nothing.
    pub unknown_extensions: BTreeSet<String>,
    /// Folders created by unpacking archives.
    pub unpacked: Vec<PathBuf>,
    /// Number of empty folders removed.
    pub pruned: usize,
    /// Number of entries renamed by the final normalization pass.
    pub renamed: usize,
}

impl SortReport {
    /// Names reported for a category, empty if nothing was found.
    pub fn names(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }
}

/// Installs the stderr log subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to warnings only, so
/// discarded duplicates are reported while the normal output stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Sorts `root` in place and prints the report.
///
/// Each category is reported as soon as its files are moved, so the output
/// reflects what was done even when a later phase fails.
///
/// # Examples
///
/// ```no_run
/// use sortdir::cli::run_cli;
/// use std::path::Path;
///
/// match run_cli(Path::new("/path/to/Downloads")) {
///     Ok(()) => {}
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(root: &Path) -> OrganizeResult<()> {
    let table = ExtensionTable::builtin()?;
    let report = sort_directory_with(root, &table, OutputFormatter::category_report)?;

    OutputFormatter::extension_summary(&report.known_extensions, &report.unknown_extensions);

    Ok(())
}

/// Runs every phase over `root`, in order:
///
/// 1. Scan the tree and classify files
/// 2. Move each non-empty category into its folder
/// 3. Unpack archives, if any were found
/// 4. Remove folders left empty
/// 5. Normalize the names of everything else
///
/// The first error aborts the run; nothing done so far is rolled back.
pub fn sort_directory(root: &Path, table: &ExtensionTable) -> OrganizeResult<SortReport> {
    sort_directory_with(root, table, |_, _| {})
}

/// Same as [`sort_directory`], calling `on_category` right after each
/// category's files are moved.
pub fn sort_directory_with<F>(
    root: &Path,
    table: &ExtensionTable,
    mut on_category: F,
) -> OrganizeResult<SortReport>
where
    F: FnMut(Category, &[String]),
{
    info!("sorting {}", root.display());

    let scan = Scanner::new(table).scan(root)?;
    info!("classified {} files", scan.classified_count());

    let mut report = SortReport {
        known_extensions: scan.known_extensions.clone(),
        unknown_extensions: scan.unknown_extensions.clone(),
        ..Default::default()
    };

    for category in Category::ALL {
        let files = scan.files_in(category);
        if files.is_empty() {
            continue;
        }
        let names = FileOrganizer::move_files(files, root, category)?;
        on_category(category, &names);
        report.categories.push((category, names));
    }

    if !scan.files_in(Category::Archives).is_empty() {
        let archives_dir = root.join(Category::Archives.dir_name());
        let pending = list_dir(&archives_dir)?
            .iter()
            .filter(|p| p.is_file())
            .count();
        let pb = OutputFormatter::create_progress_bar(pending as u64);
        pb.set_message("unpacking");
        report.unpacked = expand_archives_with(root, |_| pb.inc(1))?;
        pb.finish_and_clear();
        info!("unpacked {} archives", report.unpacked.len());
    }

    report.pruned = prune_empty_dirs(root)?;
    info!("removed {} empty folders", report.pruned);

    report.renamed = normalize_tree(root)?;
    info!("renamed {} entries", report.renamed);

    Ok(report)
}
