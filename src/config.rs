//! Category table configuration.
//!
//! The extension-to-category table ships with the binary as a TOML document.
//! It is deserialized once at startup and compiled into an
//! [`ExtensionTable`], which validates it.
//!
//! # Configuration Format
//!
//! ```toml
//! [categories]
//! images = ["JPEG", "PNG", "JPG", "SVG", "BMP"]
//! videos = ["AVI", "MP4", "MOV", "MKV", "WEBM"]
//! docs = ["DOC", "DOCX", "TXT", "PDF", "XLSX", "PPTX", "EPUB"]
//! music = ["MP3", "OGG", "WAV", "AMR", "AIFF"]
//! archives = ["ZIP", "GZ", "TAR"]
//! apps = ["EXE", "APK"]
//! ```

use crate::file_category::{Category, ExtensionTable};
use serde::Deserialize;

/// Built-in category table.
const BUILTIN_CATEGORIES: &str = r#"
[categories]
images = ["JPEG", "PNG", "JPG", "SVG", "BMP"]
videos = ["AVI", "MP4", "MOV", "MKV", "WEBM"]
docs = ["DOC", "DOCX", "TXT", "PDF", "XLSX", "PPTX", "EPUB"]
music = ["MP3", "OGG", "WAV", "AMR", "AIFF"]
archives = ["ZIP", "GZ", "TAR"]
apps = ["EXE", "APK"]
"#;

/// Errors that can occur while loading the category table.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid TOML syntax or structure.
    Invalid(String),
    /// The same extension is listed under two categories.
    DuplicateExtension {
        extension: String,
        first: Category,
        second: Category,
    },
    /// An extension equals a category folder name, which would break the
    /// category folder check.
    ExtensionIsCategoryName { extension: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(msg) => write!(f, "Invalid category table: {}", msg),
            ConfigError::DuplicateExtension {
                extension,
                first,
                second,
            } => write!(
                f,
                "Extension '{}' is listed under both {} and {}",
                extension,
                first.dir_name(),
                second.dir_name()
            ),
            ConfigError::ExtensionIsCategoryName { extension } => {
                write!(
                    f,
                    "Extension '{}' clashes with a category folder name",
                    extension
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Category table as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub categories: CategoryLists,
}

/// Extension lists, one per category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryLists {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub music: Vec<String>,
    #[serde(default)]
    pub archives: Vec<String>,
    #[serde(default)]
    pub apps: Vec<String>,
}

impl CategoryLists {
    /// Returns the extension list of a category.
    pub fn extensions(&self, category: Category) -> &[String] {
        match category {
            Category::Images => &self.images,
            Category::Videos => &self.videos,
            Category::Docs => &self.docs,
            Category::Music => &self.music,
            Category::Archives => &self.archives,
            Category::Apps => &self.apps,
        }
    }
}

impl CategoryConfig {
    /// Parses the category table shipped with the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_CATEGORIES)
    }

    /// Parses a category table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the text is not valid TOML or has
    /// unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compiles the lists into a lookup table.
    ///
    /// # Errors
    ///
    /// Returns an error if an extension is duplicated or clashes with a
    /// category folder name.
    pub fn compile(self) -> Result<ExtensionTable, ConfigError> {
        let lists = &self.categories;
        ExtensionTable::from_entries(
            Category::ALL
                .iter()
                .map(|&category| (category, lists.extensions(category))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_parses() {
        let config = CategoryConfig::builtin().unwrap();
        assert_eq!(config.categories.images.len(), 5);
        assert_eq!(config.categories.docs.len(), 7);
        assert_eq!(config.categories.apps, vec!["EXE", "APK"]);
    }

    #[test]
    fn test_builtin_config_compiles() {
        let table = CategoryConfig::builtin().unwrap().compile();
        assert!(table.is_ok());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let config = CategoryConfig::from_toml("[categories]\nimages = [\"PNG\"]\n").unwrap();
        assert!(config.categories.videos.is_empty());

        let table = config.compile().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.category_of("png"), Some(Category::Images));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = CategoryConfig::from_toml("[categories]\nfonts = [\"TTF\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = CategoryConfig::from_toml("[categories\nimages = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_across_categories_fails_compile() {
        let config = CategoryConfig::from_toml(
            "[categories]\nimages = [\"SVG\"]\ndocs = [\"svg\"]\n",
        )
        .unwrap();

        let err = config.compile().unwrap_err();
        assert!(err.to_string().contains("SVG"));
    }
}
