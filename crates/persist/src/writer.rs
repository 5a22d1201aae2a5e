//! Rotating append-only file writer
//!
//! One writer owns the output stream for one category: it buffers writes,
//! emits the newline separator before each logical record, and rotates to
//! a fresh file once the size threshold would be crossed. Rotated files
//! are never reopened, overwritten, or deleted - retention belongs to the
//! operator.
//!
//! The writer has no internal locking. The drain coordinator is the
//! single serialization point; nothing else may call writer methods
//! directly.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Configuration for one category's writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Normalized category key, used as the filename prefix
    pub category: String,

    /// Node tag embedded in filenames so multiple writer processes can
    /// share a directory
    pub node_id: String,

    /// Directory the category's files land in
    pub dir: PathBuf,

    /// Rotation threshold in bytes
    pub max_file_size: u64,

    /// Defer opening the file until the first actual write
    pub lazy: bool,
}

/// Buffered append-only writer with size-based rotation
pub struct RotatingFileWriter {
    config: WriterConfig,
    file: Option<BufWriter<File>>,
    current_path: Option<PathBuf>,
    written: u64,
    seq: u32,
}

impl RotatingFileWriter {
    /// Construct a writer; opens the first file immediately unless `lazy`
    pub fn open(config: WriterConfig) -> io::Result<Self> {
        let mut writer = Self {
            config,
            file: None,
            current_path: None,
            written: 0,
            seq: 0,
        };
        if !writer.config.lazy {
            writer.open_next_file()?;
        }
        Ok(writer)
    }

    /// Append one logical record
    ///
    /// A newline separator is emitted before the record, so each record
    /// occupies its own line. If the appended bytes would push the file
    /// past the rotation threshold, the current file is closed and a new
    /// one opened first. Returns the number of bytes appended.
    ///
    /// On failure the error propagates and the byte counter is not
    /// advanced for the failed record.
    pub fn write(&mut self, text: &str) -> io::Result<u64> {
        let pending = text.len() as u64 + 1;
        if self.written > 0 && self.written + pending > self.config.max_file_size {
            self.rotate()?;
        }
        let file = self.handle()?;
        file.write_all(b"\n")?;
        file.write_all(text.as_bytes())?;
        self.written += pending;
        Ok(pending)
    }

    /// Push buffered bytes to the OS
    pub fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Flush and drop the current handle
    ///
    /// The writer stays usable: a later write lazily opens the next file
    /// with a fresh byte counter.
    pub fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            self.current_path = None;
            self.written = 0;
            file.flush()?;
        }
        Ok(())
    }

    /// Bytes accounted against the current file
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Whether a file handle is currently open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Path of the current file, if one is open
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    fn handle(&mut self) -> io::Result<&mut BufWriter<File>> {
        if self.file.is_none() {
            self.open_next_file()?;
        }
        match self.file.as_mut() {
            Some(file) => Ok(file),
            None => Err(io::Error::new(io::ErrorKind::Other, "writer has no open file")),
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        let old = self.current_path.take();
        self.written = 0;
        self.seq += 1;
        self.open_next_file()?;
        if let (Some(old), Some(new)) = (old, self.current_path.as_deref()) {
            tracing::info!(
                category = %self.config.category,
                old = %old.display(),
                new = %new.display(),
                "rotated spool file"
            );
        }
        Ok(())
    }

    fn open_next_file(&mut self) -> io::Result<()> {
        fs::create_dir_all(&self.config.dir)?;
        let date = Local::now().format("%Y%m%d").to_string();

        // Skip names already on disk so rotated files are never
        // overwritten, including across restarts sharing a directory.
        let path = loop {
            let name = format!(
                "{}-{}-{}-{:04}.log",
                self.config.category, self.config.node_id, date, self.seq
            );
            let path = self.config.dir.join(name);
            if !path.try_exists()? {
                break path;
            }
            self.seq += 1;
        };

        let file = OpenOptions::new().create_new(true).append(true).open(&path)?;
        tracing::debug!(
            category = %self.config.category,
            path = %path.display(),
            "opened spool file"
        );
        self.file = Some(BufWriter::new(file));
        self.current_path = Some(path);
        self.written = 0;
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("category", &self.config.category)
            .field("open", &self.is_open())
            .field("written", &self.written)
            .field("seq", &self.seq)
            .finish()
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
