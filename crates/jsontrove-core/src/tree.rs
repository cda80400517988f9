//! Navigation tree container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::BrowseConfig;
use crate::node::TreeNode;

/// Summary statistics for a built navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Directories visited, excluding the root.
    pub directories: u64,
    /// JSON files added as leaves.
    pub json_files: u64,
    /// Archives expanded.
    pub archives: u64,
    /// Archive entries added as leaves.
    pub archive_entries: u64,
    /// Group nodes created for archive entry prefixes.
    pub archive_groups: u64,
    /// Files left out because of their extension.
    pub ignored_files: u64,
    /// Maximum directory depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.directories += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a JSON file.
    pub fn record_json_file(&mut self) {
        self.json_files += 1;
    }

    /// Record an expanded archive with its entry and group counts.
    pub fn record_archive(&mut self, entries: u64, groups: u64) {
        self.archives += 1;
        self.archive_entries += entries;
        self.archive_groups += groups;
    }

    /// Record a file that was left out.
    pub fn record_ignored(&mut self) {
        self.ignored_files += 1;
    }

    /// Number of selectable leaves in the tree.
    pub fn selectable_leaves(&self) -> u64 {
        self.json_files + self.archive_entries
    }
}

/// Complete navigation tree with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationTree {
    /// Root directory node.
    pub root: TreeNode,

    /// Root path that was browsed.
    pub root_path: PathBuf,

    /// When this tree was built.
    pub built_at: SystemTime,

    /// Duration of the build.
    pub build_duration: Duration,

    /// Configuration used.
    pub config: BrowseConfig,

    /// Summary statistics.
    pub stats: TreeStats,
}

impl NavigationTree {
    /// Create a new navigation tree.
    pub fn new(
        root: TreeNode,
        root_path: PathBuf,
        config: BrowseConfig,
        stats: TreeStats,
        build_duration: Duration,
    ) -> Self {
        Self {
            root,
            root_path,
            built_at: SystemTime::now(),
            build_duration,
            config,
            stats,
        }
    }

    /// Addresses of every selectable item, in tree order.
    pub fn addresses(&self) -> Vec<&Address> {
        self.root
            .selectable()
            .filter_map(|node| node.address())
            .collect()
    }

    /// Find the node carrying an address.
    pub fn find(&self, address: &Address) -> Option<&TreeNode> {
        self.root.find_by_address(address)
    }

    /// Check if the tree has no entries besides the root.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}
