//! Output writer: serializes one run's aggregate rows to a summary file.
//!
//! Row format is `HOUR| PRODUCT| REVENUE` with a single space after each
//! `|`; the downstream report generator depends on that exact spacing.
//! Revenue is written with fixed two-decimal precision. The file is staged
//! under a `.tmp` name and renamed into place so a concurrent reader never
//! sees a partial summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::event::AggregateRow;

pub fn format_row(row: &AggregateRow) -> String {
    format!("{}| {}| {:.2}", row.hour, row.product, row.total_revenue)
}

/// Writes the summary for one run to `<output_root>/<stamp>.txt`, rows
/// sorted ascending by hour bucket. Returns the written path, or `None`
/// (and touches nothing) when there are no rows.
pub async fn write_summary(
    output_root: &Path,
    stamp: &str,
    mut rows: Vec<AggregateRow>,
) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        return Ok(None);
    }
    rows.sort_by_key(|row| row.hour);

    let mut contents = String::new();
    for row in &rows {
        contents.push_str(&format_row(row));
        contents.push('\n');
    }

    let target = output_root.join(format!("{stamp}.txt"));
    let staging = output_root.join(format!("{stamp}.txt.tmp"));
    fs::write(&staging, contents.as_bytes())
        .await
        .with_context(|| format!("writing staging file {}", staging.display()))?;
    fs::rename(&staging, &target)
        .await
        .with_context(|| format!("publishing summary {}", target.display()))?;
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HourBucket;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn row(h: u32, product: &str, total_revenue: f64) -> AggregateRow {
        let ts = NaiveDate::from_ymd_opt(2024, 11, 18)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        AggregateRow {
            hour: HourBucket::of(ts),
            product: product.into(),
            total_revenue,
        }
    }

    #[tokio::test]
    async fn empty_rows_write_nothing() {
        let dir = TempDir::new().unwrap();
        let written = write_summary(dir.path(), "2024111809", Vec::new())
            .await
            .unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn writes_rows_sorted_by_hour_with_fixed_format() {
        let dir = TempDir::new().unwrap();
        let rows = vec![row(10, "Gadget", 5.0), row(9, "Widget", 29.97)];
        let written = write_summary(dir.path(), "2024111809", rows)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(written, dir.path().join("2024111809.txt"));
        let contents = std::fs::read_to_string(&written).unwrap();
        assert_eq!(
            contents,
            "2024/11/18 09| Widget| 29.97\n2024/11/18 10| Gadget| 5.00\n"
        );
    }

    #[tokio::test]
    async fn leaves_no_staging_file_behind() {
        let dir = TempDir::new().unwrap();
        write_summary(dir.path(), "2024111809", vec![row(9, "Widget", 1.0)])
            .await
            .unwrap();
        assert!(!dir.path().join("2024111809.txt.tmp").exists());
        assert!(dir.path().join("2024111809.txt").exists());
    }
}
