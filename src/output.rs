//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: the per-category
//! report, the extension summary, error chains and the archive progress bar.

use crate::file_category::Category;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::error::Error;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message in red with an X mark, followed by its chain
    /// of causes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::output::OutputFormatter;
    ///
    /// let err = std::io::Error::other("disk on fire");
    /// OutputFormatter::error(&err);
    /// ```
    pub fn error(error: &dyn Error) {
        eprintln!("{} {}", "✗".red(), error);

        let mut cause = error.source();
        while let Some(inner) = cause {
            eprintln!("  {} {}", "caused by:".dimmed(), inner);
            cause = inner.source();
        }
    }

    /// Prints the files moved into one category.
    ///
    /// ```text
    /// Found files in category "Images": 2
    /// photo.JPG
    /// foto.jpg
    /// ```
    pub fn category_report(category: Category, names: &[String]) {
        println!("{}", Self::category_header(category, names.len()).bold());
        for name in names {
            println!("{}", name);
        }
    }

    /// Header line of a category report.
    pub fn category_header(category: Category, count: usize) -> String {
        format!("Found files in category \"{}\": {}", category.label(), count)
    }

    /// Prints the known and unknown extensions met during the scan.
    pub fn extension_summary(known: &BTreeSet<String>, unknown: &BTreeSet<String>) {
        println!("{}", Self::known_types_line(known).cyan());
        println!("{}", Self::unknown_types_line(unknown).yellow());
    }

    /// Summary line listing the extensions that matched a category.
    pub fn known_types_line(known: &BTreeSet<String>) -> String {
        format!("Found known file types: {}", Self::join(known))
    }

    /// Summary line listing the extensions that matched nothing.
    pub fn unknown_types_line(unknown: &BTreeSet<String>) -> String {
        format!("Found unknown file types: {}", Self::join(unknown))
    }

    /// Joins a set of extensions with commas.
    pub fn join(extensions: &BTreeSet<String>) -> String {
        extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Creates and returns a progress bar for archive unpacking.
    ///
    /// The bar draws to stderr and stays hidden when stderr is not a terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }
}
