//! # Batch Generator

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    batching::{Batch, BatchOptions},
    dataset::PredictionDataset,
    errors::NBResult,
    runtime::{Device, RuntimeConfig},
};

/// A restartable source of [`Batch`]es over a [`PredictionDataset`].
///
/// Each call to [`BatchGenerator::iter`] starts a new pass. With shuffling
/// enabled, pass `k` is permuted with the seed `runtime.seed + k`; so two
/// generators built with the same seed yield the same sequence of passes.
#[derive(Debug, Clone)]
pub struct BatchGenerator<'a> {
    dataset: &'a PredictionDataset,
    options: BatchOptions,
    runtime: RuntimeConfig,
    epoch: u64,
}

impl<'a> BatchGenerator<'a> {
    /// Create a new generator.
    ///
    /// ## Arguments
    /// * `dataset` - the records to batch.
    /// * `options` - batch size, shuffle, and drop-last policy.
    /// * `runtime` - device hint and shuffle seed.
    ///
    /// ## Returns
    /// The generator, or `InvalidBatchSize`.
    pub fn new(
        dataset: &'a PredictionDataset,
        options: BatchOptions,
        runtime: RuntimeConfig,
    ) -> NBResult<Self> {
        options.validate()?;
        Ok(Self {
            dataset,
            options,
            runtime,
            epoch: 0,
        })
    }

    /// The batch options.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// The number of passes started so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The number of batches each pass yields.
    pub fn num_batches(&self) -> usize {
        self.options.count_batches(self.dataset.len())
    }

    /// Start a new pass over the dataset.
    pub fn iter(&mut self) -> BatchIter<'a> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.options.shuffle {
            let seed = self.runtime.seed.wrapping_add(self.epoch);
            log::debug!("shuffling pass {} with seed {seed}", self.epoch);
            order.shuffle(&mut StdRng::seed_from_u64(seed));
        }
        self.epoch += 1;

        let end = self.num_batches() * self.options.batch_size;
        order.truncate(end);

        BatchIter {
            dataset: self.dataset,
            order,
            cursor: 0,
            batch_size: self.options.batch_size,
            device: self.runtime.device.clone(),
        }
    }
}

/// Create a single pass of batches over a dataset.
///
/// See [`BatchGenerator`].
pub fn generate_raw_batches<'a>(
    dataset: &'a PredictionDataset,
    options: BatchOptions,
    runtime: RuntimeConfig,
) -> NBResult<BatchIter<'a>> {
    Ok(BatchGenerator::new(dataset, options, runtime)?.iter())
}

/// One pass of batches.
///
/// Only the record order is materialized up front; each batch is built
/// when it is pulled.
#[derive(Debug, Clone)]
pub struct BatchIter<'a> {
    dataset: &'a PredictionDataset,
    order: Vec<usize>,
    cursor: usize,
    batch_size: usize,
    device: Device,
}

impl<'a> Iterator for BatchIter<'a> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = self.order.len().min(self.cursor + self.batch_size);
        let window = &self.order[self.cursor..end];
        self.cursor = end;

        let text_field = self.dataset.text_field();
        let extra_fields = self.dataset.extra_fields();

        let mut batch = Batch::new(
            self.device.clone(),
            std::iter::once(text_field).chain(extra_fields.iter().map(String::as_str)),
        );
        for &position in window {
            let Some(record) = self.dataset.get(position) else {
                continue;
            };
            let row = std::iter::once((text_field, record.text())).chain(
                extra_fields
                    .iter()
                    .filter_map(|field| record.extra(field).map(|value| (field.as_str(), value))),
            );
            batch.push_row(position, row);
        }
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter<'_> {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        dataset::{DatasetOptions, PredictionRecord},
        errors::NmtBatchError,
    };

    fn numbered_dataset(n: usize) -> PredictionDataset {
        PredictionDataset::from_texts((0..n).map(|i| format!("s{i}")))
    }

    fn texts(batch: &Batch) -> Vec<String> {
        batch.column("prediction").unwrap_or_default().to_vec()
    }

    #[test]
    fn test_in_order_keep_last() {
        let dataset = numbered_dataset(5);
        let batches: Vec<Batch> =
            generate_raw_batches(&dataset, BatchOptions::new(2), RuntimeConfig::default())
                .unwrap()
                .collect();

        assert_eq!(
            batches.iter().map(texts).collect::<Vec<_>>(),
            vec![
                vec!["s0".to_string(), "s1".to_string()],
                vec!["s2".to_string(), "s3".to_string()],
                vec!["s4".to_string()],
            ]
        );
        assert_eq!(batches[2].positions(), &[4]);
        assert_eq!(batches[0].device(), &Device::Cpu);
    }

    #[test]
    fn test_drop_last() {
        let dataset = numbered_dataset(5);
        let sizes: Vec<usize> = generate_raw_batches(
            &dataset,
            BatchOptions::new(2).with_drop_last(true),
            RuntimeConfig::default(),
        )
        .unwrap()
        .map(|b| b.len())
        .collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn test_zero_batch_size() {
        let dataset = numbered_dataset(3);
        assert!(matches!(
            generate_raw_batches(&dataset, BatchOptions::new(0), RuntimeConfig::default()),
            Err(NmtBatchError::InvalidBatchSize)
        ));
    }

    #[test]
    fn test_device_and_extra_columns() {
        let options = DatasetOptions::default().with_extra_fields(["id"]);
        let dataset = PredictionDataset::from_records(
            options,
            vec![
                PredictionRecord::new(0, "a").with_extra("id", "x0"),
                PredictionRecord::new(1, "b").with_extra("id", "x1"),
            ],
        );
        let runtime = RuntimeConfig::default().with_device(Device::Cuda(vec![0, 1]));

        let batch = generate_raw_batches(&dataset, BatchOptions::new(8), runtime)
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(batch.device(), &Device::Cuda(vec![0, 1]));
        assert_eq!(batch.column("id"), Some(&["x0".to_string(), "x1".to_string()][..]));
    }

    #[test]
    fn test_restartable_passes() {
        let dataset = numbered_dataset(7);
        let mut generator =
            BatchGenerator::new(&dataset, BatchOptions::new(3), RuntimeConfig::default()).unwrap();

        let first: Vec<Batch> = generator.iter().collect();
        let second: Vec<Batch> = generator.iter().collect();
        assert_eq!(first, second);
        assert_eq!(generator.epoch(), 2);
        assert_eq!(first.len(), generator.num_batches());
    }

    #[test]
    fn test_seeded_shuffle() {
        let dataset = numbered_dataset(50);
        let options = BatchOptions::new(50).with_shuffle(true);
        let runtime = RuntimeConfig::default().with_seed(42);

        fn pass(generator: &mut BatchGenerator<'_>) -> Vec<usize> {
            generator
                .iter()
                .flat_map(|b| b.positions().to_vec())
                .collect()
        }

        let mut a = BatchGenerator::new(&dataset, options, runtime.clone()).unwrap();
        let mut b = BatchGenerator::new(&dataset, options, runtime).unwrap();

        let a0 = pass(&mut a);
        let a1 = pass(&mut a);
        assert_eq!(a0, pass(&mut b));
        assert_eq!(a1, pass(&mut b));

        assert_ne!(a0, (0..50).collect::<Vec<_>>());
        assert_ne!(a0, a1);

        let mut sorted = a0.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_lazy_size_hint() {
        let dataset = numbered_dataset(5);
        let mut iter =
            generate_raw_batches(&dataset, BatchOptions::new(2), RuntimeConfig::default()).unwrap();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn batch_counts_and_sizes(
            n in 0usize..200,
            batch_size in 1usize..40,
            drop_last in any::<bool>(),
            shuffle in any::<bool>(),
        ) {
            let dataset = numbered_dataset(n);
            let options = BatchOptions::new(batch_size)
                .with_drop_last(drop_last)
                .with_shuffle(shuffle);
            let batches: Vec<Batch> =
                generate_raw_batches(&dataset, options, RuntimeConfig::default())
                    .unwrap()
                    .collect();

            let expected = if drop_last { n / batch_size } else { n.div_ceil(batch_size) };
            prop_assert_eq!(batches.len(), expected);
            prop_assert_eq!(dataset.num_batches(&options).unwrap(), expected);

            let total: usize = batches.iter().map(|b| b.len()).sum();
            if drop_last {
                prop_assert_eq!(total, (n / batch_size) * batch_size);
            } else {
                prop_assert_eq!(total, n);
            }

            for (i, batch) in batches.iter().enumerate() {
                prop_assert_eq!(texts(batch).len(), batch.len());
                if i + 1 < batches.len() || drop_last {
                    prop_assert_eq!(batch.len(), batch_size);
                }
            }

            if !shuffle {
                let positions: Vec<usize> =
                    batches.iter().flat_map(|b| b.positions().to_vec()).collect();
                prop_assert_eq!(positions, (0..total).collect::<Vec<_>>());
            }
        }
    }
}
