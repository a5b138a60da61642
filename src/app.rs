//! One pipeline pass: resolve the current batch, fan file readers into a
//! channel, parse, filter, aggregate, and write the summary.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use tokio::sync::mpsc;
use tracing::warn;

use crate::aggregate::HourAggregator;
use crate::batch::{self, Batch};
use crate::cli::Config;
use crate::filter::is_buy;
use crate::log::{LineSource, LogFile};
use crate::parse::parse_line;
use crate::writer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// No directory existed for the current hour.
    NotFound,
    /// The directory existed but held no usable data files.
    Empty,
    /// Data files were read; the pass ran the full pipeline.
    Processed,
}

/// Per-run summary reported by the scheduler. `dropped` counts malformed
/// lines that were silently discarded; the drop never changes control flow.
#[derive(Debug)]
pub struct RunReport {
    pub stamp: String,
    pub outcome: BatchOutcome,
    pub files: usize,
    pub lines: usize,
    pub parsed: usize,
    pub dropped: usize,
    pub buys: usize,
    pub rows: usize,
    pub output: Option<PathBuf>,
}

impl RunReport {
    fn new(stamp: String, outcome: BatchOutcome) -> Self {
        RunReport {
            stamp,
            outcome,
            files: 0,
            lines: 0,
            parsed: 0,
            dropped: 0,
            buys: 0,
            rows: 0,
            output: None,
        }
    }
}

/// Runs the pipeline once for the hour containing `now`.
///
/// A missing or empty batch is a clean no-op. An unreadable file is logged
/// and skipped; the pass continues with the remaining files. Only a failed
/// summary write fails the pass.
pub async fn run_once(config: &Config, now: DateTime<FixedOffset>) -> Result<RunReport> {
    let stamp = batch::hour_stamp(&now);
    let files = match batch::resolve(&config.input_root, &stamp).await? {
        Batch::NotFound => return Ok(RunReport::new(stamp, BatchOutcome::NotFound)),
        Batch::Empty => return Ok(RunReport::new(stamp, BatchOutcome::Empty)),
        Batch::Ready(files) => files,
    };

    let mut report = RunReport::new(stamp, BatchOutcome::Processed);
    report.files = files.len();

    let sources: Vec<LogFile> = files.into_iter().map(|path| LogFile { path }).collect();
    let mut aggregator = HourAggregator::new();
    drain_batch(sources, &mut report, &mut aggregator).await;

    // Nothing aggregated means nothing to write; the run completed empty.
    if aggregator.is_empty() {
        return Ok(report);
    }
    let rows = aggregator.into_rows();
    report.rows = rows.len();
    report.output = writer::write_summary(&config.output_root, &report.stamp, rows).await?;
    Ok(report)
}

/// Fans one reader task per source into a channel and folds every line
/// through parse → filter → aggregate. A source that errors is logged and
/// skipped; the channel closes once all readers finish, so the remaining
/// sources keep the pass alive.
async fn drain_batch<S>(sources: Vec<S>, report: &mut RunReport, aggregator: &mut HourAggregator)
where
    S: LineSource + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<(usize, String)>(1024);
    for (source_id, source) in sources.into_iter().enumerate() {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(err) = source.stream(source_id, tx).await {
                warn!(source_id, error = %err, "skipping unreadable source");
            }
        });
    }
    drop(tx);

    while let Some((_source_id, line)) = rx.recv().await {
        report.lines += 1;
        match parse_line(&line) {
            Some(event) => {
                report.parsed += 1;
                if is_buy(&event) {
                    report.buys += 1;
                    aggregator.record(&event);
                }
            }
            None => report.dropped += 1,
        }
    }
}
