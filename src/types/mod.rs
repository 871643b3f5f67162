pub mod linalg;

pub use linalg::*;

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result, TrackerError};

/// Inertial reading for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InertialSample {
    /// Forward acceleration magnitude
    pub accel: f64,
    /// Heading rate (rad/s), positive turns clockwise toward East
    pub gyro_z: f64,
}

impl InertialSample {
    pub fn new(accel: f64, gyro_z: f64) -> Self {
        Self { accel, gyro_z }
    }
}

/// Everything an estimator sees at one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickInput {
    pub fix: Option<Position>,
    pub sample: InertialSample,
}

/// Which side of the fix-loss boundary a tick falls on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixPhase {
    FixAvailable,
    FixLost,
}

impl FixPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::FixAvailable => "fix_available",
            Self::FixLost => "fix_lost",
        }
    }
}

/// A pre-generated run: ground truth and inertial samples for every tick,
/// absolute fixes for the leading `fixes.len()` ticks only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timeline {
    pub dt: f64,
    pub truth: Vec<Position>,
    pub samples: Vec<InertialSample>,
    pub fixes: Vec<Position>,
}

impl Timeline {
    /// Total tick count (N)
    pub fn len(&self) -> usize {
        self.truth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.truth.is_empty()
    }

    /// Length of the fix-available phase (F)
    pub fn fix_ticks(&self) -> usize {
        self.fixes.len()
    }

    /// Length of the fix-lost phase (L)
    pub fn lost_ticks(&self) -> usize {
        self.len().saturating_sub(self.fix_ticks())
    }

    pub fn phase(&self, t: usize) -> FixPhase {
        if t < self.fix_ticks() {
            FixPhase::FixAvailable
        } else {
            FixPhase::FixLost
        }
    }

    /// Input for tick `t`. Ticks past the fix phase never carry a fix.
    pub fn tick(&self, t: usize) -> TickInput {
        TickInput {
            fix: self.fixes.get(t).copied(),
            sample: self.samples.get(t).copied().unwrap_or_default(),
        }
    }

    pub fn ticks(&self) -> impl Iterator<Item = TickInput> + '_ {
        (0..self.len()).map(move |t| self.tick(t))
    }

    /// Ground truth restricted to the fix-lost phase
    pub fn lost_truth(&self) -> &[Position] {
        &self.truth[self.fix_ticks().min(self.len())..]
    }

    /// Per-tick sequences must line up with `truth`: one sample per tick,
    /// no more fixes than ticks.
    pub fn check_alignment(&self) -> Result<()> {
        if self.samples.len() != self.truth.len() {
            return Err(TrackerError::LengthMismatch {
                what: "inertial samples",
                expected: self.truth.len(),
                actual: self.samples.len(),
            });
        }
        if self.fixes.len() > self.truth.len() {
            return Err(TrackerError::LengthMismatch {
                what: "fixes",
                expected: self.truth.len(),
                actual: self.fixes.len(),
            });
        }
        Ok(())
    }

    /// Check the partition and alignment the estimators rely on.
    pub fn validate(&self) -> Result<()> {
        require_positive("dt", self.dt)?;
        if self.fixes.is_empty() {
            return Err(TrackerError::NoFixYet);
        }
        self.check_alignment()?;
        if self.lost_ticks() == 0 {
            return Err(TrackerError::EmptyInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(n: usize, f: usize) -> Timeline {
        Timeline {
            dt: 1.0,
            truth: (0..n).map(|t| east_north(0.0, t as f64)).collect(),
            samples: vec![InertialSample::new(1.0, 0.0); n],
            fixes: (0..f).map(|t| east_north(0.0, t as f64)).collect(),
        }
    }

    #[test]
    fn test_phase_partition() {
        let tl = timeline(6, 4);
        assert_eq!(tl.fix_ticks(), 4);
        assert_eq!(tl.lost_ticks(), 2);
        for t in 0..4 {
            assert_eq!(tl.phase(t), FixPhase::FixAvailable);
            assert!(tl.tick(t).fix.is_some());
        }
        for t in 4..6 {
            assert_eq!(tl.phase(t), FixPhase::FixLost);
            assert!(tl.tick(t).fix.is_none());
        }
        assert_eq!(tl.lost_truth().len(), 2);
        assert_eq!(tl.ticks().count(), 6);
    }

    #[test]
    fn test_validate_ok() {
        assert!(timeline(6, 4).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fix() {
        assert!(matches!(
            timeline(6, 0).validate(),
            Err(TrackerError::NoFixYet)
        ));
    }

    #[test]
    fn test_validate_rejects_misaligned_samples() {
        let mut tl = timeline(6, 4);
        tl.samples.pop();
        assert!(matches!(
            tl.validate(),
            Err(TrackerError::LengthMismatch { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn test_alignment_ignores_partition() {
        // no fixes and no lost interval are the estimators' concern
        assert!(timeline(4, 0).check_alignment().is_ok());
        assert!(timeline(4, 4).check_alignment().is_ok());

        let mut tl = timeline(4, 2);
        tl.samples.truncate(1);
        assert!(matches!(
            tl.check_alignment(),
            Err(TrackerError::LengthMismatch { what: "inertial samples", expected: 4, actual: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_no_lost_interval() {
        assert!(matches!(
            timeline(4, 4).validate(),
            Err(TrackerError::EmptyInterval)
        ));
        assert!(matches!(
            timeline(4, 5).validate(),
            Err(TrackerError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_dt() {
        let mut tl = timeline(6, 4);
        tl.dt = 0.0;
        assert!(matches!(tl.validate(), Err(TrackerError::InvalidConfig(_))));
    }
}
