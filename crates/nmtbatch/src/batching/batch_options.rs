//! Batch Options

use crate::errors::{NBResult, NmtBatchError};

/// The default batch size.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Options for a [`BatchGenerator`](super::BatchGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Records per batch; must be positive.
    pub batch_size: usize,

    /// Permute record order once per pass, before batching.
    pub shuffle: bool,

    /// Discard a short final batch.
    pub drop_last: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchOptions {
    /// In-order, keep-last options with the given batch size.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            shuffle: false,
            drop_last: false,
        }
    }

    /// Sets the batch size.
    pub fn with_batch_size(
        mut self,
        batch_size: usize,
    ) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the shuffle flag.
    pub fn with_shuffle(
        mut self,
        shuffle: bool,
    ) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the drop-last flag.
    pub fn with_drop_last(
        mut self,
        drop_last: bool,
    ) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Check the options are usable.
    pub fn validate(&self) -> NBResult<()> {
        if self.batch_size == 0 {
            return Err(NmtBatchError::InvalidBatchSize);
        }
        Ok(())
    }

    /// The number of batches over `len` records.
    ///
    /// `floor(len / batch_size)` when dropping the last batch,
    /// else `ceil(len / batch_size)`.
    pub fn num_batches(
        &self,
        len: usize,
    ) -> NBResult<usize> {
        self.validate()?;
        Ok(self.count_batches(len))
    }

    /// Batch count for already-validated options.
    pub(crate) fn count_batches(
        &self,
        len: usize,
    ) -> usize {
        if self.drop_last {
            len / self.batch_size
        } else {
            len.div_ceil(self.batch_size)
        }
    }

    /// The number of records covered by all batches.
    pub fn num_batched_records(
        &self,
        len: usize,
    ) -> NBResult<usize> {
        Ok(len.min(self.num_batches(len)? * self.batch_size))
    }
}
