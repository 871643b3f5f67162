//! Run both estimators over a timeline and compare them.

use serde::{Deserialize, Serialize};

use crate::config::EstimatorConfig;
use crate::error::{Result, TrackerError};
use crate::evaluation::{Comparison, EstimatorEvaluation};
use crate::filters::{
    run_estimator, BqreEstimator, FrozenEstimator, LearnedSnapshot, TrajectoryEstimator,
};
use crate::types::{Position, Timeline};

/// Everything the reporting side needs from one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub config: EstimatorConfig,
    pub fix_ticks: usize,
    pub lost_ticks: usize,
    /// Full-length tracks (N ticks)
    pub baseline_track: Vec<Position>,
    pub bqre_track: Vec<Position>,
    /// Heading/speed/position B-QRE carried into the fix-lost phase
    pub learned: LearnedSnapshot,
    pub comparison: Comparison,
}

pub fn run_comparison(timeline: &Timeline, config: &EstimatorConfig) -> Result<ComparisonReport> {
    config.validate()?;
    timeline.validate()?;
    if (timeline.dt - config.dt).abs() > f64::EPSILON * config.dt.max(1.0) {
        return Err(TrackerError::InvalidConfig(format!(
            "timeline dt {} does not match estimator dt {}",
            timeline.dt, config.dt
        )));
    }

    log::info!(
        "Running comparison: {} fix ticks, {} lost ticks, dt={}s",
        timeline.fix_ticks(),
        timeline.lost_ticks(),
        config.dt
    );

    let mut frozen = FrozenEstimator::new();
    let mut bqre = BqreEstimator::new(*config);

    let baseline_track = run_estimator(&mut frozen, timeline)?;
    let bqre_track = run_estimator(&mut bqre, timeline)?;
    let learned = bqre.snapshot().ok_or(TrackerError::EmptyInterval)?;

    let start = timeline.fix_ticks();
    let comparison = Comparison::new(
        EstimatorEvaluation::over_interval(frozen.name(), &baseline_track, &timeline.truth, start)?,
        EstimatorEvaluation::over_interval(bqre.name(), &bqre_track, &timeline.truth, start)?,
    );

    log::info!(
        "Final error: frozen {:.2} m, bqre {:.2} m (improvement {:.2} m)",
        comparison.baseline.summary.final_error,
        comparison.bqre.summary.final_error,
        comparison.improvement
    );

    Ok(ComparisonReport {
        config: *config,
        fix_ticks: timeline.fix_ticks(),
        lost_ticks: timeline.lost_ticks(),
        baseline_track,
        bqre_track,
        learned,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::QuinarySymbol;
    use crate::types::{east_north, InertialSample};
    use approx::assert_relative_eq;

    /// Due-North walk at 1.2 m/tick with clean sensors.
    fn clean_walk(fix_ticks: usize, lost_ticks: usize) -> Timeline {
        let n = fix_ticks + lost_ticks;
        let truth: Vec<_> = (0..n).map(|t| east_north(0.0, 1.2 * (t + 1) as f64)).collect();
        Timeline {
            dt: 1.0,
            fixes: truth[..fix_ticks].to_vec(),
            samples: vec![InertialSample::new(1.2, 0.0); n],
            truth,
        }
    }

    #[test]
    fn test_clean_walk_is_tracked_exactly() {
        let tl = clean_walk(10, 10);
        let report = run_comparison(&tl, &EstimatorConfig::default()).unwrap();

        assert_eq!(report.baseline_track.len(), 20);
        assert_eq!(report.bqre_track.len(), 20);
        assert_eq!(report.comparison.bqre.errors.len(), 10);
        assert_eq!(report.learned.speed, QuinarySymbol::Two);
        assert_eq!(report.learned.heading, 0.0);

        // 1.2 is two 0.6 levels, so dead reckoning follows the truth
        assert!(report.comparison.bqre.summary.max_error < 1e-9);
        assert_relative_eq!(report.comparison.baseline.summary.final_error, 12.0, epsilon = 1e-9);
        assert!(report.comparison.bqre_wins());
    }

    #[test]
    fn test_fix_phase_identity_and_freeze() {
        let tl = clean_walk(5, 7);
        let report = run_comparison(&tl, &EstimatorConfig::default()).unwrap();
        for t in 0..5 {
            assert_eq!(report.baseline_track[t], tl.fixes[t]);
            assert_eq!(report.bqre_track[t], tl.fixes[t]);
        }
        for t in 5..12 {
            assert_eq!(report.baseline_track[t], report.baseline_track[4]);
        }
    }

    #[test]
    fn test_rejects_preconditions() {
        let cfg = EstimatorConfig::default();

        let mut tl = clean_walk(5, 5);
        tl.fixes.clear();
        assert!(matches!(run_comparison(&tl, &cfg), Err(TrackerError::NoFixYet)));

        let tl = clean_walk(5, 0);
        assert!(matches!(run_comparison(&tl, &cfg), Err(TrackerError::EmptyInterval)));

        let tl = clean_walk(5, 5);
        let bad = EstimatorConfig {
            unit_lost: 0.0,
            ..cfg
        };
        assert!(matches!(run_comparison(&tl, &bad), Err(TrackerError::InvalidConfig(_))));

        let mismatched = cfg.with_dt(0.5);
        assert!(matches!(
            run_comparison(&tl, &mismatched),
            Err(TrackerError::InvalidConfig(_))
        ));
    }
}
