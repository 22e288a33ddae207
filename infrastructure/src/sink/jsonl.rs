//! JSONL file sink for output records.
//!
//! Each [`OutputRecord`] is serialized as a single JSON line and appended to
//! the file via a buffered writer. Existing content is kept, so one file can
//! collect the records of many runs.

use async_trait::async_trait;
use llm_plus_application::ports::result_sink::{ResultSink, SinkError};
use llm_plus_domain::OutputRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Appends one JSON object per record.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and on `Drop`.
pub struct JsonlResultSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlResultSink {
    /// Open (or create) the file for appending, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the sink file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultSink for JsonlResultSink {
    async fn publish(&self, record: &OutputRecord) -> Result<(), SinkError> {
        let line = record.to_json_line()?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SinkError::Unavailable("sink writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;

        debug!(
            request_id = %record.request_id,
            path = %self.path.display(),
            "Record appended"
        );
        Ok(())
    }
}

impl Drop for JsonlResultSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use llm_plus_domain::{RequestId, StrategyKind};
    use std::io::Read;

    fn record(id: &str, answer: &str) -> OutputRecord {
        OutputRecord {
            request_id: RequestId::from(id),
            answer: answer.to_string(),
            confidence: 1.0,
            strategy: StrategyKind::Majority,
            providers: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    fn read(path: &Path) -> String {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[tokio::test]
    async fn test_sink_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("records.jsonl");
        let sink = JsonlResultSink::open(&path).unwrap();

        sink.publish(&record("req-1", "Paris")).await.unwrap();
        sink.publish(&record("req-2", "42")).await.unwrap();
        drop(sink);

        let content = read(&path);
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["requestId"], "req-1");
        assert_eq!(first["answer"], "Paris");
        let second: OutputRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.answer, "42");
    }

    #[tokio::test]
    async fn test_sink_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        for id in ["a", "b"] {
            let sink = JsonlResultSink::open(&path).unwrap();
            sink.publish(&record(id, "x")).await.unwrap();
        }

        assert_eq!(read(&path).lines().count(), 2);
    }
}
