//! sortdir - sort a messy folder by file type
//!
//! This library classifies files by extension, moves them into category
//! folders, unpacks archives, removes folders left empty and normalizes
//! file names by transliterating Cyrillic and replacing unsafe characters.

pub mod archive;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod normalize;
pub mod output;
pub mod pruner;
pub mod scanner;
pub mod tree_normalizer;

pub use config::{CategoryConfig, ConfigError};
pub use file_category::{Category, ExtensionTable};
pub use file_organizer::{FileOrganizer, OrganizeError, OrganizeResult};
pub use normalize::normalize;
pub use scanner::{ScanResult, Scanner};

pub use cli::{SortReport, run_cli, sort_directory, sort_directory_with};
