//! Textual addresses for selectable leaves.
//!
//! An address is the contract between the navigation tree and the content
//! loader. It is either a bare filesystem path, or an archive-embedded entry
//! written as `zip:<archive path>,<entry path>`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix marking an archive-embedded entry.
pub const ARCHIVE_PREFIX: &str = "zip:";

/// Separator between the archive path and the entry path.
const ENTRY_SEPARATOR: char = ',';

/// Opaque address of a selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Encode a plain filesystem path. The address is the path, unchanged.
    pub fn plain(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().into_owned())
    }

    /// Encode an entry stored inside an archive.
    pub fn archive_entry(archive: impl AsRef<Path>, entry: &str) -> Self {
        Self(format!(
            "{ARCHIVE_PREFIX}{}{ENTRY_SEPARATOR}{entry}",
            archive.as_ref().to_string_lossy()
        ))
    }

    /// Wrap an already-encoded address string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the address points inside an archive.
    pub fn is_archive_entry(&self) -> bool {
        matches!(self.decode(), AddressTarget::ArchiveEntry { .. })
    }

    /// Decode into the content source it names.
    ///
    /// Never fails: anything that is not a well-formed archive entry is a
    /// plain path. The split happens on the first comma after the prefix.
    pub fn decode(&self) -> AddressTarget {
        if let Some(rest) = self.0.strip_prefix(ARCHIVE_PREFIX) {
            if let Some((archive, entry)) = rest.split_once(ENTRY_SEPARATOR) {
                return AddressTarget::ArchiveEntry {
                    archive: PathBuf::from(archive),
                    entry: entry.to_string(),
                };
            }
        }
        AddressTarget::Plain(PathBuf::from(&self.0))
    }

    /// Name of the addressed item: the final path segment of the file or
    /// archive entry.
    pub fn item_name(&self) -> String {
        match self.decode() {
            AddressTarget::Plain(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.0.clone()),
            AddressTarget::ArchiveEntry { entry, .. } => entry
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(entry.as_str())
                .to_string(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_raw(s))
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decoded form of an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressTarget {
    /// A file on disk.
    Plain(PathBuf),
    /// An entry inside a zip archive.
    ArchiveEntry {
        /// Path of the archive file.
        archive: PathBuf,
        /// Full slash-delimited name of the entry.
        entry: String,
    },
}

impl AddressTarget {
    /// Encode back into an address.
    pub fn encode(&self) -> Address {
        match self {
            Self::Plain(path) => Address::plain(path),
            Self::ArchiveEntry { archive, entry } => Address::archive_entry(archive, entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_address_is_path() {
        let address = Address::plain("/data/report.json");
        assert_eq!(address.as_str(), "/data/report.json");
        assert_eq!(
            address.decode(),
            AddressTarget::Plain(PathBuf::from("/data/report.json"))
        );
    }

    #[test]
    fn test_archive_entry_format() {
        let address = Address::archive_entry("/r/y.zip", "a/e.json");
        assert_eq!(address.as_str(), "zip:/r/y.zip,a/e.json");
        assert!(address.is_archive_entry());
    }

    #[test]
    fn test_decode_splits_on_first_comma() {
        let address = Address::from_raw("zip:/r/y.zip,dir/a,b.json");
        assert_eq!(
            address.decode(),
            AddressTarget::ArchiveEntry {
                archive: PathBuf::from("/r/y.zip"),
                entry: "dir/a,b.json".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_degrades_to_plain() {
        assert_eq!(
            Address::from_raw("").decode(),
            AddressTarget::Plain(PathBuf::new())
        );
        assert_eq!(
            Address::from_raw("zip:/no/comma.zip").decode(),
            AddressTarget::Plain(PathBuf::from("zip:/no/comma.zip"))
        );
        assert_eq!(
            Address::from_raw("ZIP:/r/y.zip,e.json").decode(),
            AddressTarget::Plain(PathBuf::from("ZIP:/r/y.zip,e.json"))
        );
    }

    #[test]
    fn test_item_name() {
        assert_eq!(Address::plain("/r/d/x.json").item_name(), "x.json");
        assert_eq!(
            Address::archive_entry("/r/y.zip", "a/b/e.json").item_name(),
            "e.json"
        );
    }
}
