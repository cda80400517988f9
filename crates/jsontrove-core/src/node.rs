//! Tree node types shared by the navigation and content trees.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::address::Address;

/// Type of tree node, with kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Folder on disk.
    Directory,
    /// JSON file on disk.
    File {
        /// Plain address of the file.
        address: Address,
    },
    /// Zip archive on disk. Selectable as an opaque item.
    Archive {
        /// Plain address of the archive file.
        address: Address,
    },
    /// Directory prefix shared by one or more archive entries.
    ArchiveEntryGroup,
    /// Entry stored inside an archive.
    ArchiveEntryLeaf {
        /// Archive-entry address of the item.
        address: Address,
    },
    /// JSON object or array.
    JsonInternal,
    /// JSON scalar.
    JsonLeaf,
}

impl NodeKind {
    /// Check if nodes of this kind may have children.
    pub fn has_children(&self) -> bool {
        matches!(
            self,
            Self::Directory | Self::Archive { .. } | Self::ArchiveEntryGroup | Self::JsonInternal
        )
    }

    /// Check if this kind is a leaf kind.
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Check if the user can select nodes of this kind as a content source.
    pub fn is_selectable(&self) -> bool {
        self.address().is_some()
    }

    /// Get the address carried by this kind, if any.
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::File { address }
            | Self::Archive { address }
            | Self::ArchiveEntryLeaf { address } => Some(address),
            _ => None,
        }
    }

    /// Check if this kind belongs to a JSON content tree.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::JsonInternal | Self::JsonLeaf)
    }
}

/// A single node in a navigation or content tree.
///
/// Each node owns its children exclusively, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display label.
    pub name: CompactString,

    /// Node type and associated data.
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Children nodes, always empty for leaf kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: impl Into<CompactString>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Create a directory node.
    pub fn new_directory(name: impl Into<CompactString>) -> Self {
        Self::new(name, NodeKind::Directory)
    }

    /// Create a JSON file node.
    pub fn new_file(name: impl Into<CompactString>, address: Address) -> Self {
        Self::new(name, NodeKind::File { address })
    }

    /// Create an archive node.
    pub fn new_archive(name: impl Into<CompactString>, address: Address) -> Self {
        Self::new(name, NodeKind::Archive { address })
    }

    /// Create an archive entry group node.
    pub fn new_entry_group(name: impl Into<CompactString>) -> Self {
        Self::new(name, NodeKind::ArchiveEntryGroup)
    }

    /// Create an archive entry leaf node.
    pub fn new_entry_leaf(name: impl Into<CompactString>, address: Address) -> Self {
        Self::new(name, NodeKind::ArchiveEntryLeaf { address })
    }

    /// Create a JSON object/array node.
    pub fn new_json_internal(name: impl Into<CompactString>) -> Self {
        Self::new(name, NodeKind::JsonInternal)
    }

    /// Create a JSON scalar node.
    pub fn new_json_leaf(name: impl Into<CompactString>) -> Self {
        Self::new(name, NodeKind::JsonLeaf)
    }

    /// Check if this node is of a leaf kind.
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Get the address if this node is selectable.
    pub fn address(&self) -> Option<&Address> {
        self.kind.address()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append a child.
    ///
    /// Leaf kinds never hold children.
    pub fn push_child(&mut self, child: TreeNode) {
        debug_assert!(
            self.kind.has_children(),
            "{} node '{}' cannot hold children",
            self.kind,
            self.name
        );
        self.children.push(child);
    }

    /// Find a direct child by its display name.
    pub fn child_named(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name.as_str() == name)
    }

    /// Position of a direct child by its display name.
    pub fn child_position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name.as_str() == name)
    }

    /// Iterate over this node and all descendants in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.walk().count() - 1
    }

    /// Iterate over all selectable descendants in pre-order.
    pub fn selectable(&self) -> impl Iterator<Item = &TreeNode> {
        self.walk()
            .map(|(_, node)| node)
            .filter(|node| node.kind.is_selectable())
    }

    /// Find the node carrying the given address.
    pub fn find_by_address(&self, address: &Address) -> Option<&TreeNode> {
        self.selectable().find(|node| node.address() == Some(address))
    }

    /// Check that no leaf-kind node has children and that sibling names
    /// inside archives are unique.
    pub fn is_well_formed(&self) -> bool {
        self.walk().all(|(_, node)| {
            if node.is_leaf() {
                return node.children.is_empty();
            }
            if matches!(node.kind, NodeKind::Archive { .. } | NodeKind::ArchiveEntryGroup) {
                let mut names: Vec<_> = node.children.iter().map(|c| &c.name).collect();
                let count = names.len();
                names.sort();
                names.dedup();
                return names.len() == count;
            }
            true
        })
    }
}

/// Pre-order iterator over a tree, yielding `(depth, node)`.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut root = TreeNode::new_directory("root");
        let mut sub = TreeNode::new_directory("d");
        sub.push_child(TreeNode::new_file("x.json", Address::plain("/r/d/x.json")));
        root.push_child(sub);
        let mut archive = TreeNode::new_archive("y.zip", Address::plain("/r/y.zip"));
        archive.push_child(TreeNode::new_entry_leaf(
            "e.json",
            Address::archive_entry("/r/y.zip", "e.json"),
        ));
        root.push_child(archive);
        root
    }

    #[test]
    fn test_kind_capabilities() {
        assert!(NodeKind::Directory.has_children());
        assert!(!NodeKind::Directory.is_selectable());
        assert!(NodeKind::JsonLeaf.is_leaf());
        assert!(!NodeKind::JsonLeaf.is_selectable());
        let file = NodeKind::File {
            address: Address::plain("a.json"),
        };
        assert!(file.is_leaf());
        assert!(file.is_selectable());
        let archive = NodeKind::Archive {
            address: Address::plain("a.zip"),
        };
        assert!(archive.has_children());
        assert!(archive.is_selectable());
    }

    #[test]
    fn test_walk_is_pre_order() {
        let names: Vec<_> = sample()
            .walk()
            .map(|(depth, n)| (depth, n.name.to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "root".to_string()),
                (1, "d".to_string()),
                (2, "x.json".to_string()),
                (1, "y.zip".to_string()),
                (2, "e.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_find_by_address() {
        let root = sample();
        let address = Address::archive_entry("/r/y.zip", "e.json");
        let found = root.find_by_address(&address).unwrap();
        assert_eq!(found.name.as_str(), "e.json");
        assert!(root.find_by_address(&Address::plain("/nope")).is_none());
    }

    #[test]
    fn test_descendant_count() {
        assert_eq!(sample().descendant_count(), 4);
        assert!(sample().is_well_formed());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::ArchiveEntryGroup.to_string(), "ArchiveEntryGroup");
    }
}
