//! Browse configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Configuration for building a navigation tree.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BrowseConfig {
    /// Root folder to browse.
    pub root: PathBuf,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Maximum directory depth to traverse (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Glob patterns matched against entry names; matches are skipped.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Extensions treated as JSON files.
    #[builder(default = "default_json_extensions()")]
    #[serde(default = "default_json_extensions")]
    pub json_extensions: Vec<String>,

    /// Extensions treated as zip archives.
    #[builder(default = "default_archive_extensions()")]
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,

    /// Show directory and file names lower-cased.
    #[builder(default = "false")]
    #[serde(default)]
    pub lowercase_names: bool,
}

fn default_true() -> bool {
    true
}

fn default_json_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_archive_extensions() -> Vec<String> {
    vec!["zip".to_string()]
}

impl BrowseConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref patterns) = self.ignore_patterns {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| format!("Bad ignore pattern '{pattern}': {e}"))?;
            }
        }
        Ok(())
    }
}

/// How a file is represented in the navigation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// A JSON document shown as a selectable leaf.
    Json,
    /// A zip archive expanded into its entries.
    Archive,
    /// Anything else; left out of the tree.
    Ignored,
}

impl BrowseConfig {
    /// Create a new browse config builder.
    pub fn builder() -> BrowseConfigBuilder {
        BrowseConfigBuilder::default()
    }

    /// Create a simple config for browsing a folder.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
            ignore_patterns: Vec::new(),
            json_extensions: default_json_extensions(),
            archive_extensions: default_archive_extensions(),
            lowercase_names: false,
        }
    }

    /// Classify a file by its extension, ignoring case.
    pub fn classify(&self, name: &str) -> FileClass {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return FileClass::Ignored;
        };
        if has_extension(&self.json_extensions, ext) {
            FileClass::Json
        } else if has_extension(&self.archive_extensions, ext) {
            FileClass::Archive
        } else {
            FileClass::Ignored
        }
    }

    /// Check if a name ends with one of the JSON extensions.
    pub fn is_json_name(&self, name: &str) -> bool {
        self.classify(name) == FileClass::Json
    }

    /// Label shown for a directory or file name.
    pub fn display_name(&self, name: &str) -> String {
        if self.lowercase_names {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    /// Compile the ignore patterns and hidden-file rule into a filter.
    pub fn entry_filter(&self) -> Result<EntryFilter, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
                message: format!("Bad ignore pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| ScanError::InvalidConfig {
            message: e.to_string(),
        })?;
        Ok(EntryFilter {
            globs,
            include_hidden: self.include_hidden,
        })
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

fn has_extension(extensions: &[String], ext: &str) -> bool {
    extensions
        .iter()
        .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Compiled entry filter for a browse.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    globs: GlobSet,
    include_hidden: bool,
}

impl EntryFilter {
    /// Check if an entry name should be left out of the tree.
    pub fn should_skip(&self, name: &str) -> bool {
        self.should_skip_hidden(name) || self.globs.is_match(name)
    }

    /// Check if hidden entries should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}
