// ============================================================
// Layer 4 — Train/Holdout Splitter
// ============================================================
// Shuffles row indices and cuts them into two disjoint sets:
//   - Holdout:  the first ceil(n * fraction) shuffled rows
//   - Training: the rest
//
// The seed is the only source of randomness: rows are shuffled
// with a StdRng seeded from it (Fisher-Yates via
// rand::seq::SliceRandom), so the same dataset, fraction and
// seed always give the same partition.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::dataset::Dataset;
use crate::domain::error::{PrepareError, PrepareResult};

/// Default share of rows kept back for evaluation
pub const DEFAULT_HOLDOUT_FRACTION: f64 = 0.2;

/// A train/holdout partition of one Dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub training: Dataset,
    pub holdout:  Dataset,
}

/// Deterministically partition `dataset`.
///
/// # Errors
/// InvalidFraction if `holdout_fraction` is not strictly between
/// 0 and 1, or if either side of the split would be empty.
pub fn split(dataset: &Dataset, holdout_fraction: f64, seed: u64) -> PrepareResult<Split> {
    let n_holdout = holdout_size(dataset.len(), holdout_fraction)?;

    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (holdout_idx, training_idx) = indices.split_at(n_holdout);

    let take = |idx: &[usize]| {
        Dataset::new(
            dataset.fields().to_vec(),
            idx.iter().map(|&i| dataset.records()[i].clone()).collect(),
        )
    };

    let split = Split {
        training: take(training_idx),
        holdout:  take(holdout_idx),
    };

    tracing::debug!(
        "Dataset split (seed={}): {} training, {} holdout",
        seed,
        split.training.len(),
        split.holdout.len(),
    );

    Ok(split)
}

/// Number of holdout rows for `n` rows, validated.
fn holdout_size(n: usize, fraction: f64) -> PrepareResult<usize> {
    // Negated so NaN fails too
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(PrepareError::InvalidFraction {
            fraction,
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }

    let n_holdout  = (n as f64 * fraction).ceil() as usize;
    let n_training = n.saturating_sub(n_holdout);

    if n_holdout == 0 || n_training == 0 {
        return Err(PrepareError::InvalidFraction {
            fraction,
            reason: format!(
                "{n} rows would give {n_training} training and {n_holdout} holdout rows"
            ),
        });
    }

    Ok(n_holdout)
}
