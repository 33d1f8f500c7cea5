//! # Result Sink
//!
//! Results accumulate in memory and are written once, as a single json array,
//! to a file which must not already exist.
//!
//! The sink is written on every exit path: explicitly by [`ResultSink::finish`],
//! or by `Drop` when the owner unwinds without finishing.

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{NBResult, NmtBatchError},
    pipeline::ResultRecord,
};

/// An exclusive-create accumulator of [`ResultRecord`]s.
#[derive(Debug)]
pub struct ResultSink {
    path: PathBuf,
    records: Vec<ResultRecord>,
    finished: bool,
}

impl ResultSink {
    /// Create a sink for `path`.
    ///
    /// ## Returns
    /// The sink, or `OutputExists` if `path` is already present.
    pub fn create<P: AsRef<Path>>(path: P) -> NBResult<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(NmtBatchError::OutputExists { path });
        }
        Ok(Self {
            path,
            records: Vec::new(),
            finished: false,
        })
    }

    /// The output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The accumulated records.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// The number of accumulated records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the sink empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append records.
    pub fn extend<W: IntoIterator<Item = ResultRecord>>(
        &mut self,
        records: W,
    ) {
        self.records.extend(records);
    }

    /// Write the accumulated records.
    ///
    /// Parent directories are created as needed.
    ///
    /// ## Returns
    /// The number of records written, or `OutputExists` if the file appeared
    /// since the sink was created.
    pub fn finish(mut self) -> NBResult<usize> {
        self.finished = true;
        self.write()
    }

    fn write(&self) -> NBResult<usize> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => NmtBatchError::OutputExists {
                    path: self.path.clone(),
                },
                _ => e.into(),
            })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.records)?;
        writer.flush()?;

        log::debug!(
            "wrote {} results to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(self.records.len())
    }
}

impl Drop for ResultSink {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        log::warn!(
            "saving {} partial results to {}",
            self.records.len(),
            self.path.display()
        );
        if let Err(e) = self.write() {
            log::error!("failed to save partial results: {e}");
        }
    }
}
