//! Navigation tree building for jsontrove.
//!
//! This crate turns a root folder into one navigable tree that merges real
//! directories with the internal structure of zip archives, and resolves
//! the addresses of selected leaves back into their text.
//!
//! # Overview
//!
//! - **Directory walking** via jwalk, serial and name-sorted
//! - **Archive expansion** via zip, merging entries by shared prefix
//! - **Content resolution** from addresses to text and JSON trees
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use jsontrove_scan::{BrowseConfig, ContentResolver, DirectoryScanner};
//!
//! let config = BrowseConfig::new("/path/to/data");
//! let tree = DirectoryScanner::new().scan(&config).unwrap();
//!
//! let resolver = ContentResolver::with_config(config);
//! for address in tree.addresses() {
//!     if let Ok(Some(content)) = resolver.load_tree(address) {
//!         println!("{address}: {} top-level nodes", content.child_count());
//!     }
//! }
//! ```
//!
//! # Background builds
//!
//! Builds are blocking calls. Hand them to the blocking pool when running
//! inside an async application:
//!
//! ```rust,no_run
//! use jsontrove_scan::{BrowseConfig, DirectoryScanner};
//!
//! # async fn run() {
//! let scanner = DirectoryScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Visited {} directories", progress.dirs_visited);
//!     }
//! });
//!
//! let tree = scanner
//!     .scan_in_background(BrowseConfig::new("/path/to/data"))
//!     .await
//!     .unwrap();
//! # }
//! ```

mod archive;
mod content;
mod progress;
mod scanner;

pub use archive::{ArchiveSummary, ArchiveTreeBuilder, read_entry_names};
pub use content::{ContentResolver, MAX_ENTRY_SIZE};
pub use progress::ScanProgress;
pub use scanner::DirectoryScanner;

// Re-export core types for convenience
pub use jsontrove_core::{
    Address, AddressTarget, BrowseConfig, DocumentError, FileClass, NavigationTree, NodeKind,
    ResolveError, ScanError, TreeNode, TreeStats,
};
