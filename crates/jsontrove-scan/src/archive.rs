//! Zip archive expansion into nested entry groups.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use jsontrove_core::{Address, NodeKind, ScanError, TreeNode};

/// Counts from expanding one archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Leaf entries in the tree.
    pub entries: u64,
    /// Group nodes created for shared prefixes.
    pub groups: u64,
}

impl ArchiveSummary {
    /// Count the entry leaves and groups below `node`.
    pub fn of(node: &TreeNode) -> Self {
        node.walk()
            .skip(1)
            .fold(Self::default(), |mut summary, (_, child)| {
                match child.kind {
                    NodeKind::ArchiveEntryGroup => summary.groups += 1,
                    NodeKind::ArchiveEntryLeaf { .. } => summary.entries += 1,
                    _ => {}
                }
                summary
            })
    }
}

/// Builds the subtree of an archive from its flat entry list.
///
/// Entries sharing a directory prefix are merged under one group per
/// prefix segment, whatever order the archive lists them in. Sibling names
/// stay unique: a group wins over a leaf of the same name, and a repeated
/// entry name keeps its first leaf.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveTreeBuilder<'a> {
    archive_path: &'a Path,
}

impl<'a> ArchiveTreeBuilder<'a> {
    /// Create a builder for the archive at `archive_path`.
    pub fn new(archive_path: &'a Path) -> Self {
        Self { archive_path }
    }

    /// Open the archive and build its node, labeled `name`.
    pub fn build(&self, name: &str) -> Result<(TreeNode, ArchiveSummary), ScanError> {
        let entries = read_entry_names(self.archive_path)?;
        let mut node = TreeNode::new_archive(name, Address::plain(self.archive_path));
        let summary = self.populate(&mut node, &entries);

        tracing::debug!(
            archive = %self.archive_path.display(),
            entries = summary.entries,
            groups = summary.groups,
            "expanded archive"
        );

        Ok((node, summary))
    }

    /// Insert every entry name under `parent`, in order.
    pub fn populate<S: AsRef<str>>(&self, parent: &mut TreeNode, entries: &[S]) -> ArchiveSummary {
        for entry in entries {
            self.insert_entry(parent, entry.as_ref());
        }
        ArchiveSummary::of(parent)
    }

    /// Insert one slash-delimited entry name under `parent`.
    ///
    /// Names ending in `/` are directory entries: they only ensure their
    /// groups exist. Empty segments are skipped. Returns `true` if a leaf
    /// was added.
    pub fn insert_entry(&self, parent: &mut TreeNode, full_name: &str) -> bool {
        let segments: Vec<&str> = full_name.split('/').filter(|s| !s.is_empty()).collect();

        let (groups, leaf) = if full_name.ends_with('/') {
            (segments.as_slice(), None)
        } else {
            match segments.split_last() {
                Some((leaf, groups)) => (groups, Some(*leaf)),
                None => return false,
            }
        };

        let mut node = parent;
        for segment in groups {
            let index = match node.child_position(segment) {
                Some(index) if node.children[index].kind == NodeKind::ArchiveEntryGroup => index,
                Some(index) => {
                    tracing::warn!(
                        archive = %self.archive_path.display(),
                        entry = *segment,
                        "entry hidden by a folder of the same name"
                    );
                    node.children[index] = TreeNode::new_entry_group(*segment);
                    index
                }
                None => {
                    node.push_child(TreeNode::new_entry_group(*segment));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }

        let Some(leaf) = leaf else {
            return false;
        };
        if node.child_position(leaf).is_some() {
            tracing::warn!(
                archive = %self.archive_path.display(),
                entry = full_name,
                "skipping entry, name already taken"
            );
            return false;
        }

        node.push_child(TreeNode::new_entry_leaf(
            leaf,
            Address::archive_entry(self.archive_path, full_name),
        ));
        true
    }
}

/// Read the full entry names of a zip archive, in central directory order.
///
/// The archive handle is released before returning.
pub fn read_entry_names(path: &Path) -> Result<Vec<String>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(path, e))?;

    (0..archive.len())
        .map(|index| {
            archive
                .by_index_raw(index)
                .map(|entry| entry.name().to_string())
                .map_err(|e| zip_error(path, e))
        })
        .collect()
}

fn zip_error(path: &Path, err: ZipError) -> ScanError {
    match err {
        ZipError::Io(source) => ScanError::io(path, source),
        other => ScanError::archive(path, other),
    }
}
