//! JWalk-based directory walker that builds the navigation tree.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;

use jsontrove_core::{
    Address, BrowseConfig, FileClass, NavigationTree, ScanError, TreeNode, TreeStats,
};

use crate::archive::ArchiveTreeBuilder;
use crate::progress::ScanProgress;

/// Builds navigation trees from a root folder.
///
/// Directories come before files at every level, each group sorted by
/// name. Any unreadable directory or archive aborts the whole build.
pub struct DirectoryScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl DirectoryScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to build progress updates, sent once per directory.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Build the navigation tree for `config.root`.
    pub fn scan(&self, config: &BrowseConfig) -> Result<NavigationTree, ScanError> {
        let start = Instant::now();
        let root_path = config.root.clone();
        if root_path.to_str().is_none() {
            return Err(ScanError::InvalidConfig {
                message: format!("root path {} is not UTF-8", root_path.display()),
            });
        }

        let metadata = std::fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }

        let entries_by_parent = self.collect_entries(config, &root_path)?;

        let mut builder = TreeBuilder {
            config,
            entries_by_parent,
            stats: TreeStats::new(),
            start,
            progress_tx: &self.progress_tx,
        };

        let root_name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.to_string_lossy().into_owned());
        let root = builder.build_directory(&root_path, config.display_name(&root_name))?;
        let stats = builder.stats;
        let build_duration = start.elapsed();

        tracing::info!(
            root = %root_path.display(),
            directories = stats.directories,
            json_files = stats.json_files,
            archives = stats.archives,
            archive_entries = stats.archive_entries,
            elapsed_ms = build_duration.as_millis() as u64,
            "built navigation tree"
        );

        Ok(NavigationTree::new(
            root,
            root_path,
            config.clone(),
            stats,
            build_duration,
        ))
    }

    /// Build on the blocking thread pool, keeping the caller's runtime free.
    pub async fn scan_in_background(self, config: BrowseConfig) -> Result<NavigationTree, ScanError> {
        tokio::task::spawn_blocking(move || self.scan(&config))
            .await
            .unwrap_or_else(|e| {
                Err(ScanError::Other {
                    message: e.to_string(),
                })
            })
    }

    /// List every entry below the root, grouped by parent directory.
    fn collect_entries(
        &self,
        config: &BrowseConfig,
        root_path: &Path,
    ) -> Result<HashMap<PathBuf, Vec<EntryInfo>>, ScanError> {
        let filter = config.entry_filter()?;

        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(1)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX))
            .process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => match entry.file_name.to_str() {
                        Some(name) => !filter.should_skip(name),
                        None => {
                            // Addresses are text, so these could never be resolved
                            tracing::warn!(
                                path = %entry.path().display(),
                                "skipping entry with a non UTF-8 name"
                            );
                            false
                        }
                    },
                    Err(_) => true,
                });
            });

        let mut entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>> = HashMap::new();

        for entry_result in walker {
            let entry = entry_result.map_err(|err| walk_error(root_path, err))?;
            let file_type = entry.file_type();
            let path = entry.path();

            // Sockets, devices and unfollowed links to directories never
            // appear in the tree
            let is_dir = if file_type.is_dir() {
                true
            } else if file_type.is_file() {
                false
            } else if file_type.is_symlink() {
                let target = std::fs::metadata(&path).map_err(|e| ScanError::io(&path, e))?;
                if !target.is_file() {
                    tracing::debug!(path = %path.display(), "not following linked directory");
                    continue;
                }
                false
            } else {
                continue;
            };

            if let Some(parent) = path.parent() {
                let info = EntryInfo {
                    name: entry.file_name().to_string_lossy().as_ref().into(),
                    depth: entry.depth() as u32,
                    is_dir,
                    path: path.clone(),
                };
                entries_by_parent
                    .entry(parent.to_path_buf())
                    .or_default()
                    .push(info);
            }
        }

        Ok(entries_by_parent)
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary struct for collecting entry information.
struct EntryInfo {
    name: CompactString,
    path: PathBuf,
    depth: u32,
    is_dir: bool,
}

/// State of one build, threaded through the recursion.
struct TreeBuilder<'a> {
    config: &'a BrowseConfig,
    entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>>,
    stats: TreeStats,
    start: Instant,
    progress_tx: &'a broadcast::Sender<ScanProgress>,
}

impl TreeBuilder<'_> {
    /// Recursively build a directory node: subdirectories first, then files.
    fn build_directory(&mut self, path: &Path, name: String) -> Result<TreeNode, ScanError> {
        tracing::debug!(path = %path.display(), "building directory");

        let mut node = TreeNode::new_directory(name);
        let children = self.entries_by_parent.remove(path).unwrap_or_default();
        let (mut dirs, mut files): (Vec<_>, Vec<_>) = children.into_iter().partition(|e| e.is_dir);
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let _ = self.progress_tx.send(ScanProgress::from_stats(
            &self.stats,
            path.to_path_buf(),
            self.start.elapsed(),
        ));

        for dir in dirs {
            self.stats.record_dir(dir.depth);
            let display = self.config.display_name(&dir.name);
            let child = self.build_directory(&dir.path, display)?;
            node.push_child(child);
        }

        for file in files {
            let display = self.config.display_name(&file.name);
            match self.config.classify(&file.name) {
                FileClass::Json => {
                    self.stats.record_json_file();
                    node.push_child(TreeNode::new_file(display, Address::plain(&file.path)));
                }
                FileClass::Archive => {
                    let (archive, summary) = ArchiveTreeBuilder::new(&file.path).build(&display)?;
                    self.stats.record_archive(summary.entries, summary.groups);
                    node.push_child(archive);
                }
                FileClass::Ignored => self.stats.record_ignored(),
            }
        }

        Ok(node)
    }
}

fn walk_error(root_path: &Path, err: jwalk::Error) -> ScanError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root_path.to_path_buf());
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => ScanError::io(path, source),
        None => ScanError::Other { message },
    }
}
