//! Log ingestion layer: a generic interface for streaming raw log lines
//! from batch files.
//!
//! The pipeline depends on the `LineSource` abstraction instead of a
//! concrete file reader, so other backends (sockets, object storage) can be
//! slotted in without touching the parse/aggregate stages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;

/// Generic trait for raw-line sources.
///
/// Implementors send every line to the provided channel, tagged with the
/// caller-assigned source id, and return once the source is exhausted.
#[async_trait::async_trait]
pub trait LineSource {
    async fn stream(self, source_id: usize, tx: Sender<(usize, String)>) -> Result<()>;
}

/// Concrete batch-file source: reads one file to EOF, line by line.
pub struct LogFile {
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl LineSource for LogFile {
    async fn stream(self, source_id: usize, tx: Sender<(usize, String)>) -> Result<()> {
        let file = File::open(&self.path)
            .await
            .with_context(|| format!("opening log file {}", self.path.display()))?;
        let mut reader = BufReader::new(file);
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = reader
                .read_line(&mut buf)
                .await
                .with_context(|| format!("reading log file {}", self.path.display()))?;
            if read == 0 {
                break; // EOF
            }
            if buf.ends_with('\n') {
                buf.pop();
            }
            if buf.ends_with('\r') {
                buf.pop();
            }
            if tx.send((source_id, buf.clone())).await.is_err() {
                break; // receiver gone
            }
        }
        Ok(())
    }
}
