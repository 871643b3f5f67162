//! Positional error of estimated tracks against ground truth.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::types::Position;

/// Euclidean distance between estimate and truth, tick by tick.
pub fn position_errors(estimate: &[Position], truth: &[Position]) -> Result<Vec<f64>> {
    if estimate.len() != truth.len() {
        return Err(TrackerError::LengthMismatch {
            what: "estimated track",
            expected: truth.len(),
            actual: estimate.len(),
        });
    }
    Ok(estimate
        .iter()
        .zip(truth)
        .map(|(est, actual)| (est - actual).norm())
        .collect())
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Error at the last tick of the interval
    pub final_error: f64,
    /// Arithmetic mean over the interval
    pub mean_error: f64,
    pub max_error: f64,
    pub rmse: f64,
}

impl ErrorSummary {
    pub fn from_errors(errors: &[f64]) -> Result<Self> {
        let final_error = *errors.last().ok_or(TrackerError::EmptyInterval)?;
        let n = errors.len() as f64;
        let mean_error = errors.iter().sum::<f64>() / n;
        let max_error = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();
        Ok(Self {
            final_error,
            mean_error,
            max_error,
            rmse,
        })
    }
}

/// Error series and summary for one estimator over the fix-lost interval.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimatorEvaluation {
    pub name: String,
    pub errors: Vec<f64>,
    pub summary: ErrorSummary,
}

impl EstimatorEvaluation {
    /// Evaluate `track` (full length) over ticks `start..` against `truth`
    /// (full length).
    pub fn over_interval(
        name: &str,
        track: &[Position],
        truth: &[Position],
        start: usize,
    ) -> Result<Self> {
        if track.len() != truth.len() {
            return Err(TrackerError::LengthMismatch {
                what: "estimated track",
                expected: truth.len(),
                actual: track.len(),
            });
        }
        if start >= truth.len() {
            return Err(TrackerError::EmptyInterval);
        }
        let errors = position_errors(&track[start..], &truth[start..])?;
        let summary = ErrorSummary::from_errors(&errors)?;
        Ok(Self {
            name: name.to_string(),
            errors,
            summary,
        })
    }
}

/// Side-by-side result for the baseline and B-QRE.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: EstimatorEvaluation,
    pub bqre: EstimatorEvaluation,
    /// Baseline final error minus B-QRE final error; positive means B-QRE
    /// ended closer to the truth.
    pub improvement: f64,
}

impl Comparison {
    pub fn new(baseline: EstimatorEvaluation, bqre: EstimatorEvaluation) -> Self {
        let improvement = baseline.summary.final_error - bqre.summary.final_error;
        Self {
            baseline,
            bqre,
            improvement,
        }
    }

    pub fn bqre_wins(&self) -> bool {
        self.improvement > 0.0
    }

    pub fn mean_improvement(&self) -> f64 {
        self.baseline.summary.mean_error - self.bqre.summary.mean_error
    }
}
