//! Balanced-quinary dead reckoning (B-QRE).
//!
//! While fixes arrive the estimator reports them verbatim and re-learns a
//! heading and a quantized speed level from the latest fix pair. When fixes
//! stop it switches once, permanently, to dead reckoning: heading integrates
//! the gyro, speed is the quantized accelerometer reading, and position is
//! advanced by first-order Euler steps.
//!
//! Heading is measured clockwise from North, so a heading `h` moves the
//! estimate by `(sin h, cos h)` in East/North.

use serde::{Deserialize, Serialize};

use super::TrajectoryEstimator;
use crate::config::EstimatorConfig;
use crate::error::{Result, TrackerError};
use crate::quantize::{quantize_with, QuinarySymbol};
use crate::types::{heading_of, heading_unit, InertialSample, Position, TickInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorPhase {
    /// Consuming fixes, learning heading and speed level
    Tracking,
    /// Fixes exhausted, integrating inertial samples only
    DeadReckoning,
}

/// State carried across the `Tracking -> DeadReckoning` transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnedSnapshot {
    pub heading: f64,
    pub speed: QuinarySymbol,
    pub position: Position,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BqreState {
    pub phase: EstimatorPhase,
    pub position: Position,
    pub heading: f64,
    pub heading_deg: f64,
    pub speed: QuinarySymbol,
    pub speed_estimate: f64,
    pub fix_updates: u64,
    pub inertial_updates: u64,
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Tracking { last_fix: Option<Position> },
    DeadReckoning { snapshot: LearnedSnapshot },
}

#[derive(Clone, Debug)]
pub struct BqreEstimator {
    config: EstimatorConfig,
    mode: Mode,
    heading: f64,
    speed: QuinarySymbol,
    position: Position,
    fix_updates: u64,
    inertial_updates: u64,
}

impl BqreEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            mode: Mode::Tracking { last_fix: None },
            heading: 0.0,
            speed: QuinarySymbol::Zero,
            position: Position::zeros(),
            fix_updates: 0,
            inertial_updates: 0,
        }
    }

    pub fn phase(&self) -> EstimatorPhase {
        match self.mode {
            Mode::Tracking { .. } => EstimatorPhase::Tracking,
            Mode::DeadReckoning { .. } => EstimatorPhase::DeadReckoning,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn speed(&self) -> QuinarySymbol {
        self.speed
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// What was learned at fix loss; `None` while still tracking.
    pub fn snapshot(&self) -> Option<LearnedSnapshot> {
        match self.mode {
            Mode::DeadReckoning { snapshot } => Some(snapshot),
            Mode::Tracking { .. } => None,
        }
    }

    /// Absorb a fix while tracking. The position snaps to the fix and,
    /// from the second fix on, heading and speed level are recomputed from
    /// the displacement since the previous one.
    ///
    /// Ignored once dead reckoning has started.
    pub fn update_fix(&mut self, fix: Position) -> Position {
        let Mode::Tracking { last_fix } = self.mode else {
            log::trace!("B-QRE: ignoring fix ({:.2}, {:.2}) after fix loss", fix.x, fix.y);
            return self.position;
        };

        if let Some(prev) = last_fix {
            let delta = fix - prev;
            self.heading = heading_of(&delta);
            self.speed = quantize_with(delta.norm(), self.config.unit_learn, self.config.rounding);
        }

        self.position = fix;
        self.mode = Mode::Tracking {
            last_fix: Some(fix),
        };
        self.fix_updates += 1;
        self.position
    }

    /// Switch to dead reckoning, freezing the learned heading and speed.
    /// Calling it again returns the snapshot taken the first time.
    pub fn enter_dead_reckoning(&mut self) -> Result<LearnedSnapshot> {
        match self.mode {
            Mode::DeadReckoning { snapshot } => Ok(snapshot),
            Mode::Tracking { last_fix: None } => Err(TrackerError::NoFixYet),
            Mode::Tracking { last_fix: Some(_) } => {
                let snapshot = LearnedSnapshot {
                    heading: self.heading,
                    speed: self.speed,
                    position: self.position,
                };
                log::debug!(
                    "B-QRE: fix lost at ({:.2}, {:.2}), heading {:.1} deg, speed level {}",
                    snapshot.position.x,
                    snapshot.position.y,
                    snapshot.heading.to_degrees(),
                    snapshot.speed
                );
                self.mode = Mode::DeadReckoning { snapshot };
                Ok(snapshot)
            }
        }
    }

    /// One dead-reckoning step from an inertial sample. Enters dead
    /// reckoning first if still tracking.
    pub fn propagate(&mut self, sample: &InertialSample) -> Result<Position> {
        self.enter_dead_reckoning()?;

        let dt = self.config.dt;
        let unit = self.config.unit_lost;

        // heading first, then speed level
        self.heading += sample.gyro_z * dt;
        self.speed = quantize_with(sample.accel, unit, self.config.rounding);

        let speed_estimate = self.speed.scaled(unit);
        self.position += heading_unit(self.heading) * (speed_estimate * dt);
        self.inertial_updates += 1;

        Ok(self.position)
    }

    pub fn get_state(&self) -> BqreState {
        let unit = match self.phase() {
            EstimatorPhase::Tracking => self.config.unit_learn,
            EstimatorPhase::DeadReckoning => self.config.unit_lost,
        };
        BqreState {
            phase: self.phase(),
            position: self.position,
            heading: self.heading,
            heading_deg: self.heading.to_degrees(),
            speed: self.speed,
            speed_estimate: self.speed.scaled(unit),
            fix_updates: self.fix_updates,
            inertial_updates: self.inertial_updates,
        }
    }
}

impl TrajectoryEstimator for BqreEstimator {
    fn name(&self) -> &'static str {
        "bqre"
    }

    fn update(&mut self, input: &TickInput) -> Result<Position> {
        match (self.phase(), input.fix) {
            (EstimatorPhase::Tracking, Some(fix)) => Ok(self.update_fix(fix)),
            (EstimatorPhase::DeadReckoning, Some(fix)) => {
                log::trace!("B-QRE: dropping fix ({:.2}, {:.2})", fix.x, fix.y);
                self.propagate(&input.sample)
            }
            (_, None) => self.propagate(&input.sample),
        }
    }
}
