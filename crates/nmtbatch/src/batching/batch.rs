//! # Batches

use std::collections::BTreeMap;

use crate::runtime::Device;

/// A column-oriented group of records.
///
/// All columns hold one value per record, in batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    device: Device,
    positions: Vec<usize>,
    columns: BTreeMap<String, Vec<String>>,
}

impl Batch {
    /// Create an empty batch with the named columns.
    pub fn new<W, S>(
        device: Device,
        column_names: W,
    ) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device,
            positions: Vec::new(),
            columns: column_names
                .into_iter()
                .map(|name| (name.into(), Vec::new()))
                .collect(),
        }
    }

    /// Append one row.
    ///
    /// ## Arguments
    /// * `position` - the dataset position of the record.
    /// * `row` - `(column, value)` pairs; unknown columns are ignored.
    pub(crate) fn push_row<'r, W>(
        &mut self,
        position: usize,
        row: W,
    ) where
        W: IntoIterator<Item = (&'r str, &'r str)>,
    {
        self.positions.push(position);
        for (name, value) in row {
            if let Some(column) = self.columns.get_mut(name) {
                column.push(value.to_string());
            }
        }
    }

    /// The device placement hint.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The dataset positions of the records, in batch order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Get a column by name.
    pub fn column(
        &self,
        name: &str,
    ) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Take a column out of the batch.
    pub fn take_column(
        &mut self,
        name: &str,
    ) -> Option<Vec<String>> {
        self.columns.remove(name)
    }

    /// The column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
