//! Synthetic walker scenario: ground truth plus noisy inertial and fix streams.
//!
//! The agent moves at constant speed from the origin, optionally turning at
//! a constant rate. Accelerometer readings center on the true speed (the
//! estimator treats them as a speed proxy), gyro readings on the true turn
//! rate, and fixes on the true position. Fixes exist for the first
//! `fix_ticks` ticks only.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result, TrackerError};
use crate::types::{east_north, heading_unit, InertialSample, Position, Timeline};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub dt: f64,                 // s
    pub fix_ticks: usize,        // ticks with an absolute fix
    pub lost_ticks: usize,       // ticks after fix loss
    pub true_speed: f64,         // m/s
    pub true_heading_deg: f64,   // clockwise from North
    pub turn_rate_deg: f64,      // deg/s
    pub accel_noise_std: f64,    // m/s^2
    pub gyro_noise_std_deg: f64, // deg/s
    pub fix_noise_std: f64,      // m, per axis
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            fix_ticks: 30,
            lost_ticks: 30,
            true_speed: 1.2,
            true_heading_deg: 10.0,
            turn_rate_deg: 0.0,
            accel_noise_std: 0.15,
            gyro_noise_std_deg: 2.0,
            fix_noise_std: 3.0,
            seed: 42,
        }
    }
}

impl ScenarioConfig {
    pub fn total_ticks(&self) -> usize {
        self.fix_ticks + self.lost_ticks
    }

    /// Straight-line net displacement over the fix-lost interval.
    pub fn lost_displacement(&self) -> f64 {
        self.true_speed.abs() * self.dt * self.lost_ticks as f64
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("dt", self.dt)?;
        for (name, std) in [
            ("accel_noise_std", self.accel_noise_std),
            ("gyro_noise_std_deg", self.gyro_noise_std_deg),
            ("fix_noise_std", self.fix_noise_std),
        ] {
            if !(std.is_finite() && std >= 0.0) {
                return Err(TrackerError::InvalidConfig(format!(
                    "{name} must be a non-negative finite value, got {std}"
                )));
            }
        }
        if !self.true_speed.is_finite()
            || !self.true_heading_deg.is_finite()
            || !self.turn_rate_deg.is_finite()
        {
            return Err(TrackerError::InvalidConfig(
                "motion parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

fn normal(std: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std).map_err(|e| TrackerError::InvalidConfig(format!("noise model: {e}")))
}

/// Generate a timeline. Identical configs (seed included) give identical
/// timelines.
pub fn generate(cfg: &ScenarioConfig) -> Result<Timeline> {
    cfg.validate()?;

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let n = cfg.total_ticks();

    let d_accel = normal(cfg.accel_noise_std)?;
    let d_gyro = normal(cfg.gyro_noise_std_deg.to_radians())?;
    let d_fix = normal(cfg.fix_noise_std)?;

    let heading0 = cfg.true_heading_deg.to_radians();
    let turn_rate = cfg.turn_rate_deg.to_radians();

    // 1. Ground truth: cumulative steps, so truth[0] is one step from origin
    let mut truth = Vec::with_capacity(n);
    let mut pos = Position::zeros();
    for t in 0..n {
        let heading = heading0 + turn_rate * t as f64 * cfg.dt;
        pos += heading_unit(heading) * (cfg.true_speed * cfg.dt);
        truth.push(pos);
    }

    // 2. Inertial streams: the whole accel series, then the whole gyro series
    let accel: Vec<f64> = (0..n)
        .map(|_| cfg.true_speed + d_accel.sample(&mut rng))
        .collect();
    let gyro: Vec<f64> = (0..n)
        .map(|_| turn_rate + d_gyro.sample(&mut rng))
        .collect();
    let samples = accel
        .into_iter()
        .zip(gyro)
        .map(|(a, g)| InertialSample::new(a, g))
        .collect();

    // 3. Fixes for the leading phase only
    let fix_ticks = cfg.fix_ticks.min(n);
    let noise_x: Vec<f64> = (0..fix_ticks).map(|_| d_fix.sample(&mut rng)).collect();
    let noise_y: Vec<f64> = (0..fix_ticks).map(|_| d_fix.sample(&mut rng)).collect();
    let fixes = truth[..fix_ticks]
        .iter()
        .zip(noise_x.iter().zip(&noise_y))
        .map(|(p, (nx, ny))| east_north(p.x + nx, p.y + ny))
        .collect();

    log::debug!(
        "Generated scenario: {} ticks ({} with fix), seed {}",
        n,
        fix_ticks,
        cfg.seed
    );

    Ok(Timeline {
        dt: cfg.dt,
        truth,
        samples,
        fixes,
    })
}
