//! Seeded train/test splitting

use crate::error::{Result, StepError};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The four tables produced by a train/test split
#[derive(Debug)]
pub struct SplitTables {
    pub features_train: DataFrame,
    pub features_test: DataFrame,
    pub targets_train: DataFrame,
    pub targets_test: DataFrame,
}

/// Shuffled split of aligned feature/target tables.
///
/// The same seed always yields the same partition. `test_size` must lie in
/// (0, 1) and both sides of the split must be non-empty.
pub fn train_test_split(
    features: &DataFrame,
    targets: &DataFrame,
    test_size: f64,
    seed: u64,
) -> Result<SplitTables> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(StepError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be in (0, 1)".to_string(),
        });
    }
    let n = features.height();
    if n != targets.height() {
        return Err(StepError::ShapeError {
            expected: format!("targets with {n} rows"),
            actual: format!("{} rows", targets.height()),
        });
    }

    let n_test = ((n as f64) * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(StepError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: format!("leaves an empty split for {n} rows"),
        });
    }

    let mut indices: Vec<IdxSize> = (0..n as IdxSize).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_idx = IdxCa::from_vec("idx".into(), indices[..n_test].to_vec());
    let train_idx = IdxCa::from_vec("idx".into(), indices[n_test..].to_vec());

    Ok(SplitTables {
        features_train: features.take(&train_idx)?,
        features_test: features.take(&test_idx)?,
        targets_train: targets.take(&train_idx)?,
        targets_test: targets.take(&test_idx)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> (DataFrame, DataFrame) {
        let features = df!(
            "x" => &(0..10).map(|i| i as f64).collect::<Vec<_>>(),
        )
        .unwrap();
        let targets = df!(
            "y" => &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
        )
        .unwrap();
        (features, targets)
    }

    #[test]
    fn test_split_sizes() {
        let (features, targets) = tables();
        let split = train_test_split(&features, &targets, 0.2, 42).unwrap();
        assert_eq!(split.features_test.height(), 2);
        assert_eq!(split.features_train.height(), 8);
        assert_eq!(split.targets_test.height(), 2);
        assert_eq!(split.targets_train.height(), 8);
    }

    #[test]
    fn test_split_deterministic() {
        let (features, targets) = tables();
        let a = train_test_split(&features, &targets, 0.3, 42).unwrap();
        let b = train_test_split(&features, &targets, 0.3, 42).unwrap();
        assert_eq!(a.features_train, b.features_train);
        assert_eq!(a.targets_test, b.targets_test);
    }

    #[test]
    fn test_split_seed_changes_partition() {
        let (features, targets) = tables();
        let a = train_test_split(&features, &targets, 0.3, 42).unwrap();
        let b = train_test_split(&features, &targets, 0.3, 7).unwrap();
        assert_ne!(a.features_train, b.features_train);
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        let (features, targets) = tables();
        assert!(train_test_split(&features, &targets, 0.0, 42).is_err());
        assert!(train_test_split(&features, &targets, 1.0, 42).is_err());
    }

    #[test]
    fn test_split_rejects_misaligned_tables() {
        let (features, _) = tables();
        let short = df!("y" => &[1.0, 0.0]).unwrap();
        assert!(matches!(
            train_test_split(&features, &short, 0.2, 42),
            Err(StepError::ShapeError { .. })
        ));
    }
}
