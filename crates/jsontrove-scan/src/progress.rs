//! Build progress reporting.

use std::path::PathBuf;
use std::time::Duration;

use jsontrove_core::TreeStats;

/// Progress information during a navigation tree build.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of directories visited so far.
    pub dirs_visited: u64,
    /// Number of JSON files added so far.
    pub json_files: u64,
    /// Number of archives expanded so far.
    pub archives: u64,
    /// Number of archive entries added so far.
    pub archive_entries: u64,
    /// Directory being built.
    pub current_path: PathBuf,
    /// Time elapsed since the build started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            dirs_visited: 0,
            json_files: 0,
            archives: 0,
            archive_entries: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Snapshot running stats for the directory at `current_path`.
    pub fn from_stats(stats: &TreeStats, current_path: PathBuf, elapsed: Duration) -> Self {
        Self {
            dirs_visited: stats.directories,
            json_files: stats.json_files,
            archives: stats.archives,
            archive_entries: stats.archive_entries,
            current_path,
            elapsed,
        }
    }

    /// Get total selectable items found so far.
    pub fn items_found(&self) -> u64 {
        self.json_files + self.archive_entries
    }

    /// Calculate build rate in directories per second.
    pub fn dirs_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.dirs_visited as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stats() {
        let mut stats = TreeStats::new();
        stats.record_dir(1);
        stats.record_json_file();
        stats.record_archive(5, 2);

        let progress = ScanProgress::from_stats(&stats, PathBuf::from("/r/d"), Duration::from_secs(2));
        assert_eq!(progress.dirs_visited, 1);
        assert_eq!(progress.items_found(), 6);
        assert_eq!(progress.dirs_per_second(), 0.5);
    }

    #[test]
    fn test_rate_without_elapsed_time() {
        assert_eq!(ScanProgress::new().dirs_per_second(), 0.0);
    }
}
