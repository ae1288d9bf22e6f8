//! Scalar statistics and jackknife resampling for the flexwave estimators.
//!
//! The jackknife helpers work on one sample vector at a time: the caller
//! gathers the `na` angular samples for a pixel and scale, builds the
//! leave-one-out replicates, maps them through the statistic of interest and
//! asks for the standard error of the mapped replicates.

use std::ops::{Add, Div, Sub};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance (N denominator). Returns 0.0 if empty.
///
/// Matches the variance a Parseval-type energy check compares against: the
/// mean squared deviation over every grid node.
pub fn variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Mean of the finite values in `data`, or `NaN` when none are finite.
pub fn finite_mean(data: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = data
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Leave-one-out means of `samples`.
///
/// Replicate `i` is the mean of every sample except `samples[i]`, computed as
/// `(total - samples[i]) / (n - 1)`. Generic so that complex cross-power
/// samples resample the same way as real power samples.
///
/// Returns an empty vector when fewer than 2 samples are given.
pub fn jackknife_replicates<T>(samples: &[T]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Div<f64, Output = T>,
{
    let n = samples.len();
    if n < 2 {
        return Vec::new();
    }
    let total = samples.iter().fold(T::default(), |acc, &v| acc + v);
    let denom = (n - 1) as f64;
    samples.iter().map(|&v| (total - v) / denom).collect()
}

/// Jackknife standard error from leave-one-out replicates of a statistic.
///
/// `sqrt((n - 1) / n * sum_i (theta_i - theta_bar)^2)`.
///
/// Returns `NaN` for fewer than 2 replicates. Non-finite replicates propagate.
pub fn jackknife_std_error(replicates: &[f64]) -> f64 {
    let n = replicates.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let theta_bar = replicates.iter().sum::<f64>() / nf;
    let ss: f64 = replicates
        .iter()
        .map(|&t| (t - theta_bar) * (t - theta_bar))
        .sum();
    ((nf - 1.0) / nf * ss).sqrt()
}
