use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result};
use crate::quantize::RoundingMode;

/// Default quantization unit for both phases (m/s per level).
pub const DEFAULT_UNIT: f64 = 0.6;

/// Tuning for the dead-reckoning estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Tick duration (s)
    pub dt: f64,
    /// Unit for quantizing fix-to-fix displacement while fixes are available
    pub unit_learn: f64,
    /// Unit for quantizing acceleration once fixes are lost
    pub unit_lost: f64,
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            unit_learn: DEFAULT_UNIT,
            unit_lost: DEFAULT_UNIT,
            rounding: RoundingMode::HalfAwayFromZero,
        }
    }
}

impl EstimatorConfig {
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("dt", self.dt)?;
        require_positive("unit_learn", self.unit_learn)?;
        require_positive("unit_lost", self.unit_lost)?;
        Ok(())
    }
}
