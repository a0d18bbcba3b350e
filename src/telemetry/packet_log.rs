//! # Packet Log
//!
//! Appends a JSON line per transmitted packet:
//!
//! ```text
//! {"timestamp":"2026-10-18T09:12:44.120+00:00","axis":"Y","value":119,"bytes":[1,119,0,255]}
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TelemetryConfig;
use crate::error::Result;
use crate::packet::protocol::Packet;
use crate::sample::{AdcSample, AxisId};

const FILE_PREFIX: &str = "packets_";
const FILE_EXTENSION: &str = "jsonl";

#[derive(Debug, Serialize)]
struct PacketRecord {
    timestamp: String,
    axis: AxisId,
    value: i16,
    bytes: Packet,
}

/// Rotating JSONL packet log
#[derive(Debug)]
pub struct PacketLog {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    current: Option<BufWriter<File>>,
    records_in_file: usize,
    files_opened: u64,
}

impl PacketLog {
    /// Create the log directory and an empty log.
    ///
    /// The first file is opened lazily on the first record.
    pub fn new(config: &TelemetryConfig) -> Result<Self> {
        let dir = PathBuf::from(&config.log_dir);
        fs::create_dir_all(&dir)?;
        info!("Packet log enabled in {}", dir.display());

        Ok(Self {
            dir,
            max_records_per_file: config.max_records_per_file.max(1),
            max_files_to_keep: config.max_files_to_keep.max(1),
            current: None,
            records_in_file: 0,
            files_opened: 0,
        })
    }

    /// Append one record for a transmitted packet.
    ///
    /// Runs a plain blocking `std::fs` append on the writer task. At two axes
    /// × 10 Hz that is a few hundred bytes a second into the page cache. The
    /// flush after each line hands the record to the OS (a `write`, not an
    /// `fsync`), so the file is current even if the process is killed.
    pub fn record(&mut self, sample: &AdcSample, packet: &Packet) -> Result<()> {
        if self.current.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let record = PacketRecord {
            timestamp: Utc::now().to_rfc3339(),
            axis: sample.axis,
            value: sample.value,
            bytes: *packet,
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(writer) = self.current.as_mut() {
            writeln!(writer, "{}", line)?;
            writer.flush()?;
            self.records_in_file += 1;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.current.take() {
            writer.flush()?;
        }

        let name = format!(
            "{}{}_{:06}.{}",
            FILE_PREFIX,
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            self.files_opened,
            FILE_EXTENSION
        );
        let path = self.dir.join(name);
        debug!("Opening packet log file {}", path.display());

        self.current = Some(BufWriter::new(File::create(&path)?));
        self.records_in_file = 0;
        self.files_opened += 1;

        self.prune()
    }

    /// Delete the oldest log files beyond `max_files_to_keep`.
    fn prune(&self) -> Result<()> {
        let mut files = self.log_files()?;
        if files.len() <= self.max_files_to_keep {
            return Ok(());
        }

        let excess = files.len() - self.max_files_to_keep;
        for path in files.drain(..excess) {
            debug!("Removing old packet log {}", path.display());
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Log files in the directory, oldest first.
    fn log_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                let is_log = path.extension().map_or(false, |ext| ext == FILE_EXTENSION);
                let has_prefix = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.starts_with(FILE_PREFIX));
                is_log && has_prefix
            })
            .collect();

        // Timestamped names sort chronologically.
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::encoder::encode_packet;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_for(dir: &Path, max_records: usize, max_files: usize) -> TelemetryConfig {
        TelemetryConfig {
            enabled: true,
            log_dir: dir.to_string_lossy().into_owned(),
            max_records_per_file: max_records,
            max_files_to_keep: max_files,
        }
    }

    fn record_sample(log: &mut PacketLog, axis: AxisId, value: i16) {
        let sample = AdcSample::new(axis, value);
        log.record(&sample, &encode_packet(&sample)).unwrap();
    }

    #[test]
    fn test_creates_directory() {
        let root = tempdir().unwrap();
        let dir = root.path().join("nested").join("logs");

        let log = PacketLog::new(&config_for(&dir, 10, 2)).unwrap();
        assert!(dir.is_dir());
        assert_eq!(log.dir, dir);
        // No file until the first record
        assert!(log.log_files().unwrap().is_empty());
    }

    #[test]
    fn test_records_are_json_lines() {
        let root = tempdir().unwrap();
        let mut log = PacketLog::new(&config_for(root.path(), 10, 2)).unwrap();

        record_sample(&mut log, AxisId::Y, 119);
        record_sample(&mut log, AxisId::X, -8);

        let files = log.log_files().unwrap();
        assert_eq!(files.len(), 1);

        let contents = fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["axis"], "Y");
        assert_eq!(lines[0]["value"], 119);
        assert_eq!(lines[0]["bytes"], serde_json::json!([1, 119, 0, 255]));
        assert_eq!(lines[1]["axis"], "X");
        assert_eq!(lines[1]["value"], -8);
        assert!(lines[1]["timestamp"].is_string());
    }

    #[test]
    fn test_record_is_on_disk_when_it_returns() {
        let root = tempdir().unwrap();
        let mut log = PacketLog::new(&config_for(root.path(), 10, 2)).unwrap();

        record_sample(&mut log, AxisId::X, 42);

        // Log still open, nothing left in the BufWriter
        let files = log.log_files().unwrap();
        let contents = fs::read_to_string(&files[0]).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
        assert!(contents.contains("\"value\":42"));
    }

    #[test]
    fn test_rotates_and_keeps_newest_files() {
        let root = tempdir().unwrap();
        let mut log = PacketLog::new(&config_for(root.path(), 2, 2)).unwrap();

        for value in 0..5 {
            record_sample(&mut log, AxisId::X, value);
        }

        let files = log.log_files().unwrap();
        assert_eq!(files.len(), 2);

        let older = fs::read_to_string(&files[0]).unwrap();
        let newest = fs::read_to_string(&files[1]).unwrap();
        assert_eq!(older.lines().count(), 2);
        assert_eq!(newest.lines().count(), 1);
        assert!(newest.contains("\"value\":4"));
    }

    #[test]
    fn test_unrelated_files_are_left_alone() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("notes.txt"), "keep me").unwrap();

        let mut log = PacketLog::new(&config_for(root.path(), 1, 1)).unwrap();
        for value in 0..3 {
            record_sample(&mut log, AxisId::Y, value);
        }

        assert!(root.path().join("notes.txt").exists());
        assert_eq!(log.log_files().unwrap().len(), 1);
    }
}
