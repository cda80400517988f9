//! Core types and traits for jsontrove.
//!
//! This crate provides the data structures shared by the navigation and
//! content sides of jsontrove: tree nodes, addresses, configuration and
//! the error taxonomy.

mod address;
mod config;
mod error;
mod node;
mod tree;

pub use address::{ARCHIVE_PREFIX, Address, AddressTarget};
pub use config::{BrowseConfig, BrowseConfigBuilder, EntryFilter, FileClass};
pub use error::{DocumentError, ResolveError, ScanError};
pub use node::{NodeKind, TreeNode, Walk};
pub use tree::{NavigationTree, TreeStats};
