// src/store.rs
//
// Builds the resident dataset: load both partitions, then merge train → test.

use crate::config::options::LoadOptions;
use crate::data::{DatasetPartition, Partition, UnifiedDataset};
use crate::error::LoadError;
use crate::loader::load_partition;
use crate::progress::Progress;

/// Load train and test from `opts` and merge them.
pub fn load(
    opts: &LoadOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<UnifiedDataset, LoadError> {
    let chunk = opts.effective_chunk_size();
    let train = load_partition(&opts.train_path, Partition::Train, chunk, progress.as_deref_mut())?;
    let test = load_partition(&opts.test_path, Partition::Test, chunk, progress.as_deref_mut())?;
    Ok(merge(train, test))
}

/// Concatenate two partitions, train first, whatever order they are passed in.
/// Length is the sum of both; relative order inside each is kept.
pub fn merge(a: DatasetPartition, b: DatasetPartition) -> UnifiedDataset {
    let (train, test) = match (a.partition, b.partition) {
        (Partition::Test, Partition::Train) => (b, a),
        _ => (a, b),
    };
    if train.partition == test.partition {
        logw!("merging two {} partitions", train.partition.name());
    }
    let ds = UnifiedDataset::from_partitions(train, test);
    logd!("merged dataset: {} rows", ds.len());
    ds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::rec;
    use crate::data::Origin;

    fn part(p: Partition, n: usize) -> DatasetPartition {
        let origin: Origin = p.into();
        DatasetPartition {
            partition: p,
            records: (0..n).map(|i| rec(&format!("{}{i}", p.name()), 5.0, 0, origin)).collect(),
        }
    }

    #[test]
    fn merge_is_ordered_concatenation() {
        let train = part(Partition::Train, 3);
        let test = part(Partition::Test, 2);
        let expected: Vec<String> = train.records.iter().chain(&test.records)
            .map(|r| r.drug_name.clone()).collect();

        let ds = merge(train, test);
        assert_eq!(ds.len(), 5);
        let got: Vec<String> = ds.records().iter().map(|r| r.drug_name.clone()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn merge_puts_train_first_regardless_of_argument_order() {
        let ds = merge(part(Partition::Test, 1), part(Partition::Train, 2));
        assert_eq!(ds.records()[0].origin, Origin::Train);
        assert_eq!(ds.records()[2].origin, Origin::Test);
        assert_eq!(ds.partition(Partition::Train).len(), 2);
    }

    #[test]
    fn merge_of_two_train_partitions_has_no_test_rows() {
        let ds = merge(part(Partition::Train, 2), part(Partition::Train, 3));
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.partition(Partition::Train).len(), 5);
        assert!(ds.partition(Partition::Test).is_empty());
        assert!(ds.submitted().is_empty());
    }

    #[test]
    fn merge_of_empty_partitions_is_empty() {
        let ds = merge(part(Partition::Train, 0), part(Partition::Test, 0));
        assert!(ds.is_empty());
    }
}
