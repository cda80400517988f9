//! Conversion of JSON text into a display tree.

use compact_str::CompactString;
use serde_json::Value;

use jsontrove_core::{DocumentError, TreeNode};

use crate::render::leaf_label;

/// Builds content trees from JSON documents.
///
/// Objects and arrays become internal nodes, scalars become leaves. Arrays
/// are keyed by 1-based position. Node order follows the document exactly.
#[derive(Debug, Clone, Default)]
pub struct JsonTreeBuilder {
    root_label: CompactString,
}

impl JsonTreeBuilder {
    /// Create a builder with an empty root label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label of the root node.
    pub fn with_root_label(mut self, label: impl Into<CompactString>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Parse text whose top level is an object or an array.
    pub fn parse(text: &str) -> Result<Value, DocumentError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DocumentError::malformed(e.to_string()))?;
        match value {
            Value::Object(_) | Value::Array(_) => Ok(value),
            _ => Err(DocumentError::malformed(
                "top-level value must be an object or an array",
            )),
        }
    }

    /// Parse and convert a JSON document.
    pub fn build(&self, text: &str) -> Result<TreeNode, DocumentError> {
        let value = Self::parse(text)?;
        self.convert(&value)
    }

    /// Convert an already parsed document.
    pub fn convert(&self, value: &Value) -> Result<TreeNode, DocumentError> {
        if !is_container(value) {
            return Err(DocumentError::malformed(
                "top-level value must be an object or an array",
            ));
        }

        let mut root = TreeNode::new_json_internal(self.root_label.clone());
        append_children(&mut root, value);

        tracing::debug!(
            top_level = root.child_count(),
            nodes = root.descendant_count(),
            "built content tree"
        );

        Ok(root)
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn append_children(parent: &mut TreeNode, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                push_entry(parent, key, child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                push_entry(parent, &(index + 1).to_string(), child);
            }
        }
        _ => {}
    }
}

fn push_entry(parent: &mut TreeNode, key: &str, value: &Value) {
    if is_container(value) {
        let mut node = TreeNode::new_json_internal(key);
        append_children(&mut node, value);
        parent.push_child(node);
    } else {
        parent.push_child(TreeNode::new_json_leaf(leaf_label(key, value)));
    }
}
