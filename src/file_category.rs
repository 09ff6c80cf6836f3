//! File categorization by extension.
//!
//! This module defines the fixed set of categories files are sorted into,
//! the folder name each category owns under the sorted root, and the
//! extension table used to classify files.
//!
//! # Examples
//!
//! ```
//! use sortdir::file_category::{Category, ExtensionTable};
//!
//! let table = ExtensionTable::builtin().unwrap();
//! assert_eq!(table.category_of("jpg"), Some(Category::Images));
//! assert_eq!(table.category_of("ZIP"), Some(Category::Archives));
//! assert_eq!(table.category_of("rs"), None);
//! ```

use crate::config::{CategoryConfig, ConfigError};
use std::collections::HashMap;
use std::ffi::OsStr;

/// Represents one of the categories files are sorted into.
///
/// The declaration order is the order categories are processed and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPEG, PNG, SVG, ...)
    Images,
    /// Video files (AVI, MP4, MKV, ...)
    Videos,
    /// Document files (DOCX, TXT, PDF, ...)
    Docs,
    /// Audio files (MP3, OGG, WAV, ...)
    Music,
    /// Archive files (ZIP, GZ, TAR)
    Archives,
    /// Installable applications (EXE, APK)
    Apps,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Videos,
        Category::Docs,
        Category::Music,
        Category::Archives,
        Category::Apps,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortdir::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Archives.dir_name(), "archives");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Docs => "docs",
            Category::Music => "music",
            Category::Archives => "archives",
            Category::Apps => "apps",
        }
    }

    /// Returns the capitalized name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Docs => "Docs",
            Category::Music => "Music",
            Category::Archives => "Archives",
            Category::Apps => "Apps",
        }
    }
}

/// Returns true if a directory with this name is a category folder.
///
/// Category folders are the sorted output of a previous run and are never
/// scanned, pruned or renamed. The comparison is exact.
pub fn is_category_dir_name(name: &OsStr) -> bool {
    Category::ALL
        .iter()
        .any(|category| name == OsStr::new(category.dir_name()))
}

/// Maps file extensions to categories.
///
/// Extensions are stored upper-case without the leading dot; lookups are
/// case-insensitive. The table is built once and never modified afterwards.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    extension_map: HashMap<String, Category>,
}

impl ExtensionTable {
    /// Builds the table from the built-in category configuration.
    pub fn builtin() -> Result<Self, ConfigError> {
        CategoryConfig::builtin()?.compile()
    }

    /// Builds a table from `(category, extensions)` pairs.
    ///
    /// # Errors
    ///
    /// Fails if an extension is registered twice or if an extension equals a
    /// category folder name.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Category, &'a [String])>,
    {
        let mut table = Self {
            extension_map: HashMap::new(),
        };

        for (category, extensions) in entries {
            for ext in extensions {
                table.add_extension_mapping(ext, category)?;
            }
        }

        Ok(table)
    }

    fn add_extension_mapping(&mut self, ext: &str, category: Category) -> Result<(), ConfigError> {
        let key = ext.trim_start_matches('.').to_uppercase();

        if Category::ALL
            .iter()
            .any(|c| c.dir_name().eq_ignore_ascii_case(&key))
        {
            return Err(ConfigError::ExtensionIsCategoryName { extension: key });
        }

        if let Some(existing) = self.extension_map.get(&key) {
            return Err(ConfigError::DuplicateExtension {
                extension: key,
                first: *existing,
                second: category,
            });
        }

        self.extension_map.insert(key, category);
        Ok(())
    }

    /// Maps a file extension (without the dot) to a category.
    pub fn category_of(&self, ext: &str) -> Option<Category> {
        self.extension_map.get(&ext.to_uppercase()).copied()
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.extension_map.len()
    }

    /// Returns true if no extension is registered.
    pub fn is_empty(&self) -> bool {
        self.extension_map.is_empty()
    }
}
