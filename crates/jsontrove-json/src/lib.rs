//! JSON document trees for jsontrove.
//!
//! Turns the raw text of a JSON document into a [`TreeNode`] tree:
//!
//! - **Objects** become internal nodes labeled by key, in document order
//! - **Arrays** become internal nodes whose elements are keyed `1`, `2`, ...
//! - **Scalars** become leaves labeled `<key> : "<value>"`
//!
//! Only documents whose top level is an object or an array are accepted.
//!
//! ```rust
//! use jsontrove_json::JsonTreeBuilder;
//!
//! let tree = JsonTreeBuilder::new().build("[10, 20]").unwrap();
//! assert_eq!(tree.children[0].name.as_str(), "1 : \"10\"");
//! assert_eq!(tree.children[1].name.as_str(), "2 : \"20\"");
//! ```
//!
//! [`TreeNode`]: jsontrove_core::TreeNode

mod builder;
pub mod render;

pub use builder::JsonTreeBuilder;
pub use render::{leaf_label, render_scalar};

/// Parsed JSON document with insertion-ordered objects.
pub use serde_json::Value as JsonValue;
