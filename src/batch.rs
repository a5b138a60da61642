//! Batch directory resolver: maps "now" to an hour-stamped input directory
//! and lists the data files inside it.
//!
//! A missing directory and a directory with no usable data files are both
//! everyday conditions (no producer ran yet), not errors.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use tokio::fs;

const DATA_SUFFIX: &str = ".txt";
/// Integrity-marker convention left behind by the producer's storage layer.
/// Any name carrying it is excluded, even when the data suffix also matches.
const MARKER_TOKEN: &str = ".crc";

/// Outcome of resolving the current hour's batch. Only `Ready` proceeds to
/// parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum Batch {
    NotFound,
    Empty,
    Ready(Vec<PathBuf>),
}

/// Compact hour stamp naming both the input directory and the output file.
pub fn hour_stamp(now: &DateTime<FixedOffset>) -> String {
    now.format("%Y%m%d%H").to_string()
}

fn is_data_file(name: &str) -> bool {
    name.ends_with(DATA_SUFFIX) && !name.contains(MARKER_TOKEN)
}

/// Lists the eligible data files for `stamp` under `input_root`. The list is
/// sorted by name for stable logging; processing order carries no meaning.
pub async fn resolve(input_root: &Path, stamp: &str) -> Result<Batch> {
    let dir = input_root.join(stamp);
    let mut entries = match fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Batch::NotFound),
        Err(err) => {
            return Err(err).with_context(|| format!("listing batch directory {}", dir.display()));
        }
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("listing batch directory {}", dir.display()))?
    {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_data_file(name) {
            continue;
        }
        if matches!(entry.file_type().await, Ok(kind) if kind.is_file()) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Ok(Batch::Empty);
    }
    files.sort();
    Ok(Batch::Ready(files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn nine_thirty() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 11, 18, 9, 30, 0)
            .unwrap()
    }

    #[test]
    fn hour_stamp_is_compact_and_zero_padded() {
        assert_eq!(hour_stamp(&nine_thirty()), "2024111809");
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let root = TempDir::new().unwrap();
        let batch = resolve(root.path(), "2024111809").await.unwrap();
        assert_eq!(batch, Batch::NotFound);
    }

    #[tokio::test]
    async fn directory_without_data_files_is_empty() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("2024111809");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("part-0.txt.crc"), "").unwrap();
        std::fs::write(dir.join("_SUCCESS"), "").unwrap();
        std::fs::write(dir.join("notes.md"), "").unwrap();

        let batch = resolve(root.path(), "2024111809").await.unwrap();
        assert_eq!(batch, Batch::Empty);
    }

    #[tokio::test]
    async fn marker_files_are_excluded_even_with_data_suffix() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("2024111809");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("part-0.crc.txt"), "").unwrap();

        let batch = resolve(root.path(), "2024111809").await.unwrap();
        assert_eq!(batch, Batch::Empty);
    }

    #[tokio::test]
    async fn ready_lists_only_data_files_sorted() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("2024111809");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("part-1.txt"), "").unwrap();
        std::fs::write(dir.join("part-0.txt"), "").unwrap();
        std::fs::write(dir.join("part-0.txt.crc"), "").unwrap();
        std::fs::create_dir(dir.join("nested.txt")).unwrap();

        let batch = resolve(root.path(), "2024111809").await.unwrap();
        assert_eq!(
            batch,
            Batch::Ready(vec![dir.join("part-0.txt"), dir.join("part-1.txt")])
        );
    }
}
