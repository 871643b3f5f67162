pub mod bqre;
pub mod frozen;

pub use bqre::{BqreEstimator, BqreState, EstimatorPhase, LearnedSnapshot};
pub use frozen::FrozenEstimator;

use crate::error::Result;
use crate::types::{Position, TickInput, Timeline};

/// A recursive position estimator fed one tick at a time.
pub trait TrajectoryEstimator {
    fn name(&self) -> &'static str;

    /// Consume one tick and return the position estimate for it.
    fn update(&mut self, input: &TickInput) -> Result<Position>;
}

/// Drive an estimator over every tick of a timeline, in order.
///
/// Fails with `LengthMismatch` if the timeline's sequences don't line up.
pub fn run_estimator<E>(estimator: &mut E, timeline: &Timeline) -> Result<Vec<Position>>
where
    E: TrajectoryEstimator + ?Sized,
{
    timeline.check_alignment()?;
    let mut track = Vec::with_capacity(timeline.len());
    for input in timeline.ticks() {
        track.push(estimator.update(&input)?);
    }
    log::debug!(
        "{}: produced {} positions over {} fix ticks",
        estimator.name(),
        track.len(),
        timeline.fix_ticks()
    );
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstimatorConfig;
    use crate::error::TrackerError;
    use crate::types::{east_north, InertialSample};

    fn timeline() -> Timeline {
        Timeline {
            dt: 1.0,
            truth: (0..8).map(|t| east_north(0.0, t as f64)).collect(),
            samples: vec![InertialSample::new(1.2, 0.0); 8],
            fixes: (0..5).map(|t| east_north(0.0, t as f64 * 1.2)).collect(),
        }
    }

    #[test]
    fn test_run_both_through_trait_objects() {
        let tl = timeline();
        let mut estimators: Vec<Box<dyn TrajectoryEstimator>> = vec![
            Box::new(FrozenEstimator::new()),
            Box::new(BqreEstimator::new(EstimatorConfig::default())),
        ];
        for estimator in estimators.iter_mut() {
            let track = run_estimator(estimator.as_mut(), &tl).unwrap();
            assert_eq!(track.len(), tl.len());
            for t in 0..tl.fix_ticks() {
                assert_eq!(track[t], tl.fixes[t], "{} at t={t}", estimator.name());
            }
        }
    }

    #[test]
    fn test_run_rejects_short_samples() {
        let tl = Timeline {
            dt: 1.0,
            truth: (0..3).map(|t| east_north(0.0, t as f64)).collect(),
            samples: vec![InertialSample::new(1.2, 0.0)],
            fixes: vec![east_north(0.0, 0.0)],
        };
        let mut frozen = FrozenEstimator::new();
        assert!(matches!(
            run_estimator(&mut frozen, &tl),
            Err(TrackerError::LengthMismatch { expected: 3, actual: 1, .. })
        ));
        assert_eq!(frozen.get_state().fix_updates, 0);

        let mut bqre = BqreEstimator::new(EstimatorConfig::default());
        assert!(matches!(
            run_estimator(&mut bqre, &tl),
            Err(TrackerError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_run_rejects_extra_fixes() {
        let mut tl = timeline();
        tl.fixes = (0..10).map(|t| east_north(0.0, t as f64)).collect();
        let mut frozen = FrozenEstimator::new();
        assert!(matches!(
            run_estimator(&mut frozen, &tl),
            Err(TrackerError::LengthMismatch { what: "fixes", expected: 8, actual: 10 })
        ));
    }

    #[test]
    fn test_run_without_fixes_fails() {
        let mut tl = timeline();
        tl.fixes.clear();
        let mut frozen = FrozenEstimator::new();
        assert!(matches!(
            run_estimator(&mut frozen, &tl),
            Err(TrackerError::NoFixYet)
        ));
    }
}
