//! Content resolution: from a selected address to text and a JSON tree.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use jsontrove_core::{Address, AddressTarget, BrowseConfig, DocumentError, ResolveError, TreeNode};
use jsontrove_json::JsonTreeBuilder;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Largest archive entry read into memory, by its declared size.
pub const MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// Reads the content behind addresses produced by the navigation tree.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    config: BrowseConfig,
}

impl ContentResolver {
    /// Create a resolver using the default JSON extensions.
    pub fn new() -> Self {
        Self::with_config(BrowseConfig::default())
    }

    /// Create a resolver sharing a browse configuration.
    pub fn with_config(config: BrowseConfig) -> Self {
        Self { config }
    }

    /// Check if the address names a JSON document.
    pub fn is_json_address(&self, address: &Address) -> bool {
        self.config.is_json_name(&address.item_name())
    }

    /// Read the whole text behind an address.
    ///
    /// Archives are opened, searched for the exact entry name, and closed
    /// before returning.
    pub fn try_read_text(&self, address: &Address) -> Result<String, ResolveError> {
        let bytes = match address.decode() {
            AddressTarget::Plain(path) => {
                std::fs::read(&path).map_err(|e| ResolveError::io(&path, e))?
            }
            AddressTarget::ArchiveEntry { archive, entry } => {
                read_archive_entry(&archive, &entry, address)?
            }
        };
        decode_text(bytes, address)
    }

    /// Read the text behind an address, or empty text on any failure.
    pub fn read_text(&self, address: &Address) -> String {
        self.try_read_text(address).unwrap_or_else(|err| {
            tracing::warn!(%address, error = %err, "content unavailable, showing nothing");
            String::new()
        })
    }

    /// Resolve an address and build its content tree.
    ///
    /// Returns `None` for non-JSON addresses and for empty or unreadable
    /// content. The root node is labeled with the item name.
    pub fn load_tree(&self, address: &Address) -> Result<Option<TreeNode>, DocumentError> {
        if !self.is_json_address(address) {
            tracing::debug!(%address, "not a JSON address");
            return Ok(None);
        }

        let text = self.read_text(address);
        if text.trim().is_empty() {
            return Ok(None);
        }

        JsonTreeBuilder::new()
            .with_root_label(address.item_name())
            .build(&text)
            .map(Some)
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn read_archive_entry(archive_path: &Path, entry: &str, address: &Address) -> Result<Vec<u8>, ResolveError> {
    let file = File::open(archive_path).map_err(|e| ResolveError::io(archive_path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(archive_path, e))?;

    let mut entry_file = match archive.by_name(entry) {
        Ok(entry_file) => entry_file,
        Err(ZipError::FileNotFound) => {
            return Err(ResolveError::UnresolvedAddress {
                address: address.clone(),
            });
        }
        Err(e) => return Err(zip_error(archive_path, e)),
    };

    let declared = entry_file.size();
    if declared > MAX_ENTRY_SIZE {
        return Err(ResolveError::TooLarge {
            address: address.clone(),
            size: declared,
        });
    }

    let mut bytes = Vec::with_capacity(declared as usize);
    entry_file
        .by_ref()
        .take(MAX_ENTRY_SIZE + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ResolveError::io(archive_path, e))?;
    if bytes.len() as u64 > MAX_ENTRY_SIZE {
        return Err(ResolveError::TooLarge {
            address: address.clone(),
            size: bytes.len() as u64,
        });
    }
    Ok(bytes)
}

fn decode_text(mut bytes: Vec<u8>, address: &Address) -> Result<String, ResolveError> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|_| ResolveError::NotText {
        address: address.clone(),
    })
}

fn zip_error(path: &Path, err: ZipError) -> ResolveError {
    match err {
        ZipError::Io(source) => ResolveError::io(path, source),
        other => ResolveError::archive(path, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_plain_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.json");
        fs::write(&path, "{\"a\": 1}").unwrap();

        let resolver = ContentResolver::new();
        assert_eq!(resolver.read_text(&Address::plain(&path)), "{\"a\": 1}");
    }

    #[test]
    fn test_bom_is_stripped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bom.json");
        fs::write(&path, b"\xEF\xBB\xBF[1]").unwrap();

        let resolver = ContentResolver::new();
        assert_eq!(resolver.read_text(&Address::plain(&path)), "[1]");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let resolver = ContentResolver::new();
        let address = Address::plain("/definitely/not/here.json");
        assert!(matches!(
            resolver.try_read_text(&address),
            Err(ResolveError::Io { .. })
        ));
        assert_eq!(resolver.read_text(&address), "");
    }

    #[test]
    fn test_is_json_address() {
        let resolver = ContentResolver::new();
        assert!(resolver.is_json_address(&Address::plain("/r/x.json")));
        assert!(resolver.is_json_address(&Address::plain("/r/X.JSON")));
        assert!(resolver.is_json_address(&Address::archive_entry("/r/y.zip", "a/e.json")));
        assert!(!resolver.is_json_address(&Address::plain("/r/y.zip")));
        assert!(!resolver.is_json_address(&Address::archive_entry("/r/y.zip", "a/readme.md")));
    }

    #[test]
    fn test_load_tree_skips_non_json() {
        let resolver = ContentResolver::new();
        assert!(resolver.load_tree(&Address::plain("/r/y.zip")).unwrap().is_none());
    }
}
