//! Append-only ADIF log file writer.
//!
//! The log is a plain-text file: a header written once at creation, then one
//! record per line. Existing content is never rewritten; every operation
//! here either creates the file or appends to it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adif;
use crate::error::{Error, Result};
use crate::qso::Qso;

/// Summary of a log file's contents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LogStats {
    /// Path to the log file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of records (end-of-record tags) in the file.
    pub records: usize,
}

/// An append-only ADIF log file.
#[derive(Debug)]
pub struct LogFile {
    /// Path to the log file.
    path: PathBuf,
}

impl LogFile {
    /// Open a log file at the given path, creating it if necessary.
    ///
    /// Creates parent directories as needed. When the file does not yet
    /// exist it is created and the ADIF header is written; an existing file
    /// is left exactly as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        if !path.exists() {
            debug!("Creating log file at {}", path.display());
            std::fs::write(&path, adif::header()).map_err(|source| Error::LogCreate {
                path: path.clone(),
                source,
            })?;
            info!("Created log file {}", path.display());
        }

        Ok(Self { path })
    }

    /// Get the path to the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one contact to the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn append(&self, qso: &Qso) -> Result<()> {
        self.append_record(&adif::record(qso))
    }

    /// Append one already-serialized record line to the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn append_record(&self, record: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| Error::LogAppend {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{record}").map_err(|source| Error::LogAppend {
            path: self.path.clone(),
            source,
        })?;
        file.flush().map_err(|source| Error::LogAppend {
            path: self.path.clone(),
            source,
        })?;

        debug!("Appended record to {}", self.path.display());
        Ok(())
    }

    /// Summarize the log file: size and record count.
    ///
    /// The record count is the number of end-of-record tags in the file,
    /// matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn stats(&self) -> Result<LogStats> {
        let size_bytes = std::fs::metadata(&self.path)?.len();
        let content = std::fs::read_to_string(&self.path)?;
        let records = content.to_ascii_uppercase().matches(adif::EOR).count();
        Ok(LogStats {
            path: self.path.clone(),
            size_bytes,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn sample_qso(call: &str) -> Qso {
        Qso {
            call: call.to_string(),
            qso_date: NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
            time_on: NaiveTime::from_hms_opt(13, 45, 0).unwrap(),
            mode: "CW".to_string(),
            band: Some("20m".to_string()),
            freq_khz: Some(14_040.0),
            rst_sent: Some("599".to_string()),
            rst_rcvd: Some("599".to_string()),
            tx_pwr: None,
            comment: None,
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_open_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.adi");
        let log = LogFile::open(&path).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("ADIF log file created by "));
        assert!(content.contains("<EOH>"));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("test.adi");
        let log = LogFile::open(&path);
        assert!(log.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_existing_file_is_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.adi");
        std::fs::write(&path, "pre-existing content\n<EOH>\n").unwrap();

        let _log = LogFile::open(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "pre-existing content\n<EOH>\n");
    }

    #[test]
    fn test_append_preserves_prior_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.adi");
        let log = LogFile::open(&path).unwrap();

        log.append(&sample_qso("AB3GY")).unwrap();
        let after_first = std::fs::read_to_string(&path).unwrap();

        log.append(&sample_qso("K3MJW")).unwrap();
        let after_second = std::fs::read_to_string(&path).unwrap();

        assert!(after_second.starts_with(&after_first));
        assert!(after_second.contains("<CALL:5>AB3GY"));
        assert!(after_second.contains("<CALL:5>K3MJW"));
    }

    #[test]
    fn test_appended_record_is_one_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.adi");
        let log = LogFile::open(&path).unwrap();

        log.append(&sample_qso("W3GH")).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let record_line = content
            .lines()
            .find(|l| l.contains("<CALL:"))
            .expect("record line present");
        assert!(record_line.ends_with("<EOR>"));
    }

    #[test]
    fn test_stats_counts_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.adi");
        let log = LogFile::open(&path).unwrap();

        let stats = log.stats().unwrap();
        assert_eq!(stats.records, 0);

        log.append(&sample_qso("AB3GY")).unwrap();
        log.append_record("<CALL:4>W3GH <eor>").unwrap();

        let stats = log.stats().unwrap();
        assert_eq!(stats.records, 2);
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.path, path);
    }
}
